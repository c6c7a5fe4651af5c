use chrono::{DateTime, TimeDelta, Utc};

/// Longest title token kept intact in table output.
pub const MAX_TOKEN_CHARS: usize = 30;
/// Characters kept from an over-long token before the `--` marker.
pub const TRUNCATED_TOKEN_CHARS: usize = 28;

/// Like Go's `time.UnixDate`, pinned to UTC.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

/// Elapsed time as zero-padded `HH:MM`. Hours are not wrapped at 24 and a
/// negative duration (start time in the future) shows as `00:00`.
pub fn format_uptime(elapsed: TimeDelta) -> String {
    let minutes = elapsed.num_minutes().max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_epoch_seconds(ts: DateTime<Utc>) -> String {
    ts.timestamp().to_string()
}

/// Shorten space-separated tokens longer than [`MAX_TOKEN_CHARS`] so one
/// long word can't blow out a table column.
pub fn truncate_title(title: &str) -> String {
    title
        .split(' ')
        .map(|token| {
            if token.chars().count() > MAX_TOKEN_CHARS {
                let mut short: String = token.chars().take(TRUNCATED_TOKEN_CHARS).collect();
                short.push_str("--");
                short
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn uptime_is_hours_and_minutes() {
        assert_eq!(format_uptime(TimeDelta::minutes(90)), "01:30");
        assert_eq!(format_uptime(TimeDelta::seconds(59)), "00:00");
        assert_eq!(format_uptime(TimeDelta::hours(27) + TimeDelta::minutes(5)), "27:05");
        assert_eq!(format_uptime(TimeDelta::hours(123)), "123:00");
    }

    #[test]
    fn uptime_clamps_negative() {
        assert_eq!(format_uptime(TimeDelta::minutes(-10)), "00:00");
    }

    #[test]
    fn epoch_seconds() {
        let ts = Utc.timestamp_opt(1000, 0).unwrap();
        assert_eq!(format_epoch_seconds(ts), "1000");
    }

    #[test]
    fn timestamp_is_fixed_width() {
        let early = Utc.with_ymd_and_hms(2020, 3, 2, 7, 4, 5).unwrap();
        let late = Utc.with_ymd_and_hms(2020, 3, 22, 17, 14, 15).unwrap();
        assert_eq!(format_timestamp(early), "Mon Mar  2 07:04:05 UTC 2020");
        assert_eq!(format_timestamp(late), "Sun Mar 22 17:14:15 UTC 2020");
    }

    #[test]
    fn long_tokens_are_truncated() {
        let long = "a".repeat(35);
        assert_eq!(truncate_title(&long), format!("{}--", "a".repeat(28)));

        let title = format!("playing {} now", "b".repeat(31));
        assert_eq!(
            truncate_title(&title),
            format!("playing {}-- now", "b".repeat(28))
        );
    }

    #[test]
    fn short_tokens_untouched() {
        let exactly = "c".repeat(30);
        assert_eq!(truncate_title(&exactly), exactly);
        assert_eq!(truncate_title("  padded title "), "padded title");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let wide = "é".repeat(31);
        assert_eq!(truncate_title(&wide), format!("{}--", "é".repeat(28)));
    }
}
