//! # genshinstats
//!
//! A blocking client for the HoYoLAB game-record API plus the small tools
//! built on top of it.
//!
//! ## Overview
//!
//! - Signed requests (`ds` header) with an explicit, caller-owned [`client::Session`]
//! - Typed errors for every known `(retcode, message)` pair
//! - Server recognition and UID shape checks
//! - Wish history download, JSON dump and per-banner pity summary
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Command-line argument parsing
pub mod cli;

/// HTTP session, request dispatch and game-record endpoints
pub mod client;

/// Credential and settings resolution (flags, env, config file)
pub mod config;

/// Text and JSON output
pub mod display;

/// Dynamic secret token generation
pub mod ds;

/// Error taxonomy and retcode classification
pub mod error;

/// Wish history endpoints and pagination
pub mod gacha;

/// Wish history dump files
pub mod history;

/// Query string values and encoding
pub mod query;

/// Server recognition from UIDs
pub mod server;

/// Pity streak summary
pub mod summary;

pub use client::{Client, Session};
pub use error::{Error, Result};
pub use server::{Server, is_game_uid, recognize_server};
