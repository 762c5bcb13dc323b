//! Calendar REST integration
//!
//! Implements the `EventSource` port over a Google-style calendar events API.

mod client;
mod types;

pub use client::CalendarClient;
