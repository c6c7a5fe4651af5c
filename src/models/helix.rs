//! Helix response bodies.
//!
//! Fields are read leniently: a missing, `null`, or wrong-typed value falls
//! back to its empty/zero default instead of failing the whole response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `GET users?login=...`
#[derive(Deserialize, Debug, Default)]
pub struct UsersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<HelixUser>,
}

#[derive(Deserialize, Debug, Default)]
pub struct HelixUser {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
}

/// `GET users/follows?from_id=...`
#[derive(Deserialize, Debug, Default)]
pub struct FollowsResponse {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<HelixFollow>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

#[derive(Deserialize, Debug, Default)]
pub struct HelixFollow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub to_id: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct Pagination {
    #[serde(default, deserialize_with = "lenient_string")]
    pub cursor: String,
}

impl Pagination {
    /// The cursor, treating an empty string the same as an absent one.
    pub fn next_cursor(&self) -> Option<&str> {
        Some(self.cursor.as_str()).filter(|c| !c.is_empty())
    }
}

/// `GET streams?user_id=...`
#[derive(Deserialize, Debug, Default)]
pub struct StreamsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<HelixStream>,
}

#[derive(Deserialize, Debug, Default)]
pub struct HelixStream {
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub viewer_count: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub started_at: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings pass through, numbers are stringified, anything else is empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Non-negative numbers (including floats and numeric strings) pass through,
/// anything else is zero.
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let from_f64 = |f: f64| if f.is_finite() && f >= 0.0 { f as u64 } else { 0 };
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| n.as_f64().map_or(0, from_f64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(from_f64))
                .unwrap_or(0)
        }
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_wrong_types_default() {
        let stream: HelixStream = serde_json::from_str(
            r#"{"user_name":7,"title":null,"viewer_count":"12","started_at":false}"#,
        )
        .unwrap();
        assert_eq!(stream.user_name, "7");
        assert_eq!(stream.title, "");
        assert_eq!(stream.viewer_count, 12);
        assert_eq!(stream.started_at, "");

        let stream: HelixStream =
            serde_json::from_str(r#"{"viewer_count":-3,"title":["x"]}"#).unwrap();
        assert_eq!(stream.viewer_count, 0);
        assert_eq!(stream.title, "");
    }

    #[test]
    fn follows_tolerates_nulls() {
        let page: FollowsResponse =
            serde_json::from_str(r#"{"total":null,"data":null,"pagination":null}"#).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.next_cursor(), None);

        let page: FollowsResponse = serde_json::from_str(
            r#"{"total":2.0,"data":[{"to_id":null},{"to_id":99}],"pagination":{"cursor":"abc"}}"#,
        )
        .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.data[0].to_id, "");
        assert_eq!(page.data[1].to_id, "99");
        assert_eq!(page.pagination.next_cursor(), Some("abc"));
    }
}
