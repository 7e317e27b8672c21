//! Configuration types.

use crate::error::ConfigError;
use crate::pack::Pack;

/// Default number of transcript entries sent to the chat backend as history.
pub const DEFAULT_HISTORY_LIMIT: usize = 6;

/// Bot configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Base URL of the chat/lead backend.
    pub base_url: String,
    /// Public bot identifier sent with every backend call.
    pub bot_id: String,
    /// Business vertical.
    pub pack: Pack,
    /// Maximum number of prior transcript entries sent with a chat call.
    pub history_limit: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        let pack = Pack::default();
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            bot_id: pack.default_bot_id().to_string(),
            pack,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl BotConfig {
    /// Build a configuration from `BETTY_*` environment variables.
    ///
    /// All variables are optional; unset values fall back to defaults
    /// (`BETTY_BOT_ID` falls back to the pack's seed identifier).
    pub fn from_env() -> Result<Self, ConfigError> {
        let pack = match std::env::var("BETTY_PACK") {
            Ok(raw) => raw
                .parse::<Pack>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "BETTY_PACK".to_string(),
                    message,
                })?,
            Err(_) => Pack::default(),
        };

        let base_url = std::env::var("BETTY_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let bot_id =
            std::env::var("BETTY_BOT_ID").unwrap_or_else(|_| pack.default_bot_id().to_string());

        let history_limit = match std::env::var("BETTY_HISTORY_LIMIT") {
            Ok(raw) => raw.parse::<usize>().map_err(|e| ConfigError::InvalidValue {
                key: "BETTY_HISTORY_LIMIT".to_string(),
                message: e.to_string(),
            })?,
            Err(_) => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            base_url,
            bot_id,
            pack,
            history_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BotConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.pack, Pack::Avocat);
        assert_eq!(config.bot_id, "avocat-001");
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }
}
