//! Betty — lead-qualification chat engine.
//!
//! A small conversational engine that interleaves a scripted contact-capture
//! sequence (last name, first name, phone, email) with free-form replies
//! proxied to a remote chat backend, degrading gracefully when network calls
//! fail.

pub mod api;
pub mod channels;
pub mod config;
pub mod conversation;
pub mod engine;
pub mod error;
pub mod lead;
pub mod pack;
pub mod payload;
