//! # twitchlive
//!
//! Lists which Twitch channels a user follows are currently live.
//!
//! ## Overview
//!
//! A run is three chained Helix calls followed by rendering:
//! - resolve the login to a numeric user id (`users`)
//! - page through every followed channel id (`users/follows`)
//! - query live status for the deduplicated ids, 100 per request (`streams`)
//!
//! Results are printed as delimited lines, a table, or JSON.
//!
//! ## Features
//!
//! - `colors` (default): Colored error prefix on stderr via owo-colors

/// Command-line argument parsing
pub mod cli;

/// YAML config file discovery and settings resolution
pub mod config;

/// Output rendering for basic, table, and JSON formats
pub mod display;

/// Error types for API and configuration failures
pub mod error;

/// User resolution and follow-list pagination
pub mod follows;

/// HTTP transport for the Helix API
pub mod helix;

/// Wire models and the live channel record
pub mod models;

/// Batched live-status lookup
pub mod streams;

/// Time and title formatting helpers
pub mod utils;

use tracing::info;

use crate::error::ApiError;
use crate::helix::HelixTransport;
use crate::models::LiveChannel;

/// Run the whole lookup for `login`: resolve, paginate follows, dedup, then
/// batch the live-status queries.
pub fn fetch_live_channels<H: HelixTransport + ?Sized>(
    transport: &H,
    login: &str,
) -> Result<Vec<LiveChannel>, ApiError> {
    let user_id = follows::resolve_user_id(transport, login)?;
    let followed = follows::dedup_ids(follows::fetch_followed_ids(transport, &user_id)?);
    info!(
        login,
        followed = followed.len(),
        batches = streams::batch_count(followed.len()),
        "checking live status"
    );
    streams::fetch_live_streams(transport, &followed)
}
