//! External service integrations

pub mod calendar;
pub mod issues;
pub mod openai;
pub mod tracker;
