//! In-memory theater booking and recommendation engine.
//!
//! `showtime-core` tracks seat inventories across venues, serializes booking
//! requests through a first-come-first-served queue, answers shortest-route
//! queries over the venue network, and recommends the most valuable combo
//! bundle that fits a budget. Seat commits are all-or-nothing and combo
//! selection is deterministic: identical inputs always pick identical items.

pub mod booking;
pub mod catalog;
pub mod combo;
pub mod config;
pub mod engine;
pub mod types;
pub mod venue;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, ScreeningSummary, TheaterSummary};
