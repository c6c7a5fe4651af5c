use std::path::PathBuf;

pub const DESCRIPTION: &str =
    "A CLI tool to list which twitch channels you follow are currently live.";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormatArg {
    /// Delimiter-separated fields, one channel per line
    #[default]
    Basic,
    /// Aligned table with a header row
    Table,
    /// A single JSON object with a `channels` array
    Json,
}

#[derive(clap::Parser, Debug)]
#[command(name = "twitchlive", version, about = DESCRIPTION)]
pub struct Args {
    /// String to separate entries when printing
    #[arg(long, default_value = " @@@ ")]
    pub delimiter: String,

    /// Specify user to get live channels for (defaults to the config file)
    #[arg(long)]
    pub username: Option<String>,

    /// Output format: basic|table|json
    #[arg(long, value_enum, default_value_t = OutputFormatArg::Basic)]
    pub output_format: OutputFormatArg,

    /// Print the stream start timestamp instead of uptime
    #[arg(long)]
    pub timestamp: bool,

    /// Print seconds since epoch instead of a formatted timestamp
    #[arg(long)]
    pub timestamp_seconds: bool,

    /// Read this config file instead of searching the default locations
    #[arg(long, env = "TWITCHLIVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug mode: log requests and pagination progress to stderr
    #[arg(long, env = "TWITCHLIVE_DEBUG")]
    pub debug: bool,
}
