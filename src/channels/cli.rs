//! Terminal chat surface — stdin/stdout REPL driving the engine.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::BotMeta;
use crate::conversation::{Author, Kind, Message};
use crate::engine::Engine;

/// Run an interactive chat session until EOF or `/quit`.
pub async fn run(engine: Engine, meta: Option<BotMeta>) -> std::io::Result<()> {
    if let Some(meta) = &meta {
        eprintln!("💬 {}", meta.display_name);
        if let Some(owner) = meta.owner_name.as_deref().filter(|o| !o.is_empty()) {
            eprintln!("   {owner}");
        }
        eprintln!();
    }

    let greeting = meta.as_ref().and_then(|m| m.greeting.as_deref());
    for message in engine.start(greeting).await {
        render(&message);
    }

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        for message in engine.submit(&line).await {
            render(&message);
        }
        eprint!("> ");
    }

    Ok(())
}

/// Print one bubble. User messages are already on screen (the visitor typed
/// them), so only bot output is rendered.
fn render(message: &Message) {
    match (message.author, message.kind) {
        (Author::User, _) => {}
        (Author::Bot, Kind::Warning) => println!("⚠️  {}", message.text),
        (Author::Bot, Kind::Normal) => println!("Betty: {}", message.text),
    }
}
