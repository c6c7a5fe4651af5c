use chrono::{DateTime, Utc};
use tracing::warn;

use super::helix::HelixStream;

/// A followed channel that is broadcasting right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveChannel {
    pub user_name: String,
    pub title: String,
    pub viewer_count: u64,
    pub started_at: DateTime<Utc>,
}

impl From<HelixStream> for LiveChannel {
    fn from(stream: HelixStream) -> Self {
        let started_at = match DateTime::parse_from_rfc3339(&stream.started_at) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(err) => {
                warn!(
                    user = %stream.user_name,
                    started_at = %stream.started_at,
                    "unparsable stream start time ({err}), using epoch"
                );
                DateTime::<Utc>::UNIX_EPOCH
            }
        };
        LiveChannel {
            user_name: stream.user_name,
            title: stream.title,
            viewer_count: stream.viewer_count,
            started_at,
        }
    }
}
