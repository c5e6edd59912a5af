//! Gemini REST implementations of the conversation, plan, and image seams.

pub mod chat;
pub mod client;
pub mod image;
pub mod plan;
