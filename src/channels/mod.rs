//! Chat surfaces for the engine.

pub mod cli;
