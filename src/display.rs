use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::LiveChannel;
use crate::utils::{format_epoch_seconds, format_timestamp, format_uptime, truncate_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Basic,
    Table,
    Json,
}

/// How the time column is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeMode {
    /// `HH:MM` since the stream started
    #[default]
    Uptime,
    /// Start time as a calendar timestamp
    Timestamp,
    /// Start time as seconds since the Unix epoch
    EpochSeconds,
}

impl TimeMode {
    /// Seconds take precedence when both flags are set.
    pub fn from_flags(timestamp: bool, timestamp_seconds: bool) -> Self {
        if timestamp_seconds {
            TimeMode::EpochSeconds
        } else if timestamp {
            TimeMode::Timestamp
        } else {
            TimeMode::Uptime
        }
    }

    pub fn column_header(self) -> &'static str {
        match self {
            TimeMode::Uptime => "Uptime",
            TimeMode::Timestamp | TimeMode::EpochSeconds => "Live Since",
        }
    }

    pub fn format(self, started_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
        match self {
            TimeMode::Uptime => format_uptime(now - started_at),
            TimeMode::Timestamp => format_timestamp(started_at),
            TimeMode::EpochSeconds => format_epoch_seconds(started_at),
        }
    }
}

/// A live channel with its time column already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayChannel {
    pub user_name: String,
    pub title: String,
    pub viewer_count: u64,
    pub time: String,
}

impl DisplayChannel {
    pub fn new(channel: &LiveChannel, mode: TimeMode, now: DateTime<Utc>) -> Self {
        DisplayChannel {
            user_name: channel.user_name.clone(),
            title: channel.title.clone(),
            viewer_count: channel.viewer_count,
            time: mode.format(channel.started_at, now),
        }
    }
}

#[derive(Serialize)]
struct ChannelsJson<'a> {
    channels: &'a [DisplayChannel],
}

pub fn prepare_channels(
    channels: &[LiveChannel],
    mode: TimeMode,
    now: DateTime<Utc>,
) -> Vec<DisplayChannel> {
    channels
        .iter()
        .map(|c| DisplayChannel::new(c, mode, now))
        .collect()
}

/// One line per channel: name, time, viewers, title.
pub fn render_basic(rows: &[DisplayChannel], delimiter: &str) -> String {
    let mut out = String::new();
    for row in rows {
        let viewers = row.viewer_count.to_string();
        let fields = [
            row.user_name.as_str(),
            row.time.as_str(),
            viewers.as_str(),
            row.title.as_str(),
        ];
        out.push_str(&fields.join(delimiter));
        out.push('\n');
    }
    out
}

pub fn render_table(rows: &[DisplayChannel], mode: TimeMode) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec![
        "User".to_string(),
        mode.column_header().to_string(),
        "Viewer Count".to_string(),
        "Stream Title".to_string(),
    ]);
    for row in rows {
        builder.push_record(vec![
            row.user_name.clone(),
            row.time.clone(),
            row.viewer_count.to_string(),
            truncate_title(&row.title),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::ascii());
    let mut out = table.to_string();
    out.push('\n');
    out
}

pub fn render_json(rows: &[DisplayChannel]) -> serde_json::Result<String> {
    serde_json::to_string(&ChannelsJson { channels: rows })
}

/// Render `channels` in `format`, computing the time column relative to `now`.
pub fn render(
    channels: &[LiveChannel],
    format: OutputFormat,
    mode: TimeMode,
    delimiter: &str,
    now: DateTime<Utc>,
) -> serde_json::Result<String> {
    let rows = prepare_channels(channels, mode, now);
    match format {
        OutputFormat::Basic => Ok(render_basic(&rows, delimiter)),
        OutputFormat::Table => Ok(render_table(&rows, mode)),
        OutputFormat::Json => render_json(&rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn row(name: &str, time: &str, viewers: u64, title: &str) -> DisplayChannel {
        DisplayChannel {
            user_name: name.to_string(),
            title: title.to_string(),
            viewer_count: viewers,
            time: time.to_string(),
        }
    }

    #[test]
    fn basic_joins_with_delimiter() {
        let rows = [row("alice", "01:30", 42, "hello world"), row("bob", "00:05", 7, "")];
        assert_eq!(
            render_basic(&rows, " @@@ "),
            "alice @@@ 01:30 @@@ 42 @@@ hello world\nbob @@@ 00:05 @@@ 7 @@@ \n"
        );
        assert_eq!(render_basic(&[], "|"), "");
    }

    #[test]
    fn time_modes() {
        let start = Utc.timestamp_opt(1000, 0).unwrap();
        let now = start + TimeDelta::minutes(90);
        assert_eq!(TimeMode::Uptime.format(start, now), "01:30");
        assert_eq!(TimeMode::EpochSeconds.format(start, now), "1000");
        assert_eq!(
            TimeMode::Timestamp.format(start, now),
            "Thu Jan  1 00:16:40 UTC 1970"
        );
    }

    #[test]
    fn table_header_follows_time_mode() {
        let rows = [row("alice", "01:30", 42, "hi")];
        let table = render_table(&rows, TimeMode::Uptime);
        assert!(table.contains("Uptime"));
        assert!(!table.contains("Live Since"));

        let table = render_table(&rows, TimeMode::EpochSeconds);
        assert!(table.contains("Live Since"));
        assert!(table.contains("Viewer Count"));
        assert!(table.contains("alice"));
    }

    #[test]
    fn table_truncates_long_tokens() {
        let long = "x".repeat(35);
        let rows = [row("alice", "01:30", 1, &format!("watch {long}"))];
        let table = render_table(&rows, TimeMode::Uptime);
        assert!(table.contains(&format!("watch {}--", "x".repeat(28))));
        assert!(!table.contains(&long));
    }
}
