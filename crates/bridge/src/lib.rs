//! Pingdom webhook to Mattermost notification bridge.
//!
//! This crate provides:
//! - Constant-time webhook token authentication against the
//!   configured hook set
//! - Lazy hook-to-channel resolution with channel auto-creation
//! - Check-type-aware rendering of check events into message
//!   attachments
//! - The axum HTTP server tying the pipeline together
//!
//! One inbound request produces one outbound notification or one
//! error response; there is no queuing, batching, retrying, or
//! deduplication.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod channel;
pub mod config;
pub mod error;
pub mod render;
pub mod server;

pub use auth::authenticate;
pub use channel::Resolver;
pub use config::{Config, HookConfig};
pub use error::{ConfigError, DeliverError, ResolveError};
pub use render::render;
pub use server::{build_router, AppState};
