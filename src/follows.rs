//! # Follows Module
//!
//! Resolves a login to its Helix user id and walks the paginated follow list
//! for that id.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::helix::{FOLLOWS_ENDPOINT, HelixTransport, USERS_ENDPOINT, get_json};
use crate::models::{FollowsResponse, UsersResponse};

/// Largest page the follows endpoint will return.
pub const FOLLOWS_PAGE_SIZE: usize = 100;

/// Extra requests tolerated beyond what `total / page_len` predicts.
const PAGE_SAFETY_MARGIN: usize = 2;

/// Look up the numeric user id for `login`.
pub fn resolve_user_id<H: HelixTransport + ?Sized>(
    transport: &H,
    login: &str,
) -> Result<String, ApiError> {
    let response: UsersResponse = get_json(transport, USERS_ENDPOINT, &[("login", login)])?;
    match response.data.into_iter().next() {
        Some(user) if !user.id.is_empty() => {
            debug!(login, id = %user.id, "resolved user");
            Ok(user.id)
        }
        _ => Err(ApiError::UserNotFound(login.to_string())),
    }
}

/// Collect the ids of every channel `user_id` follows, in server order.
///
/// The result may contain duplicates; see [`dedup_ids`].
pub fn fetch_followed_ids<H: HelixTransport + ?Sized>(
    transport: &H,
    user_id: &str,
) -> Result<Vec<String>, ApiError> {
    let page_size = FOLLOWS_PAGE_SIZE.to_string();
    let mut followed: Vec<String> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut requests = 0usize;
    let mut max_requests: Option<usize> = None;

    loop {
        let mut query = vec![("from_id", user_id), ("first", page_size.as_str())];
        if let Some(after) = cursor.as_deref() {
            query.push(("after", after));
        }
        let page: FollowsResponse = get_json(transport, FOLLOWS_ENDPOINT, &query)?;
        requests += 1;

        let total = usize::try_from(page.total).unwrap_or(usize::MAX);
        let page_len = page.data.len();
        followed.extend(page.data.into_iter().map(|f| f.to_id));
        debug!(page = requests, page_len, collected = followed.len(), total, "follows page");

        if followed.len() >= total {
            return Ok(followed);
        }
        if page_len == 0 {
            return Err(ApiError::StalledPagination {
                collected: followed.len(),
                total,
            });
        }

        let limit = *max_requests.get_or_insert_with(|| max_pages(total, page_len));
        if requests >= limit {
            warn!(requests, total, "follow pagination exceeded its request cap");
            return Err(ApiError::StalledPagination {
                collected: followed.len(),
                total,
            });
        }

        let next = match page.pagination.next_cursor() {
            Some(next) => next.to_string(),
            None => {
                warn!(
                    collected = followed.len(),
                    total, "no pagination cursor before reaching total; stopping"
                );
                return Ok(followed);
            }
        };
        if cursor.as_deref() == Some(next.as_str()) {
            return Err(ApiError::StalledPagination {
                collected: followed.len(),
                total,
            });
        }
        cursor = Some(next);
    }
}

/// Upper bound on follows requests for `total` entries served `page_len` at a time.
pub fn max_pages(total: usize, page_len: usize) -> usize {
    total.div_ceil(page_len.max(1)) + PAGE_SAFETY_MARGIN
}

/// Drop repeated ids, keeping the first occurrence of each.
///
/// Helix occasionally lists the same channel twice (e.g. banned and
/// reinstated accounts).
pub fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(ids.len());
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
