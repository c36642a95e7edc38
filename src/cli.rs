use std::path::PathBuf;

use clap::Parser;

/// tile-screen: drag over a grid, then click the window to snap into it.
#[derive(Parser, Debug)]
#[command(name = "tile-screen", version, about)]
pub struct Args {
    /// Tiles per row and column (2-9), overriding the stored value.
    #[arg(short = 't', long, value_parser = clap::value_parser!(u32).range(2..=9))]
    pub tiles: Option<u32>,

    /// Milliseconds between foreground window checks.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_ms: u64,

    /// Give up waiting for a window after this many seconds.
    #[arg(long)]
    pub target_timeout_secs: Option<u64>,

    /// Settings file path override.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["tile-screen"]).unwrap();
        assert_eq!(args.tiles, None);
        assert_eq!(args.poll_interval_ms, 100);
        assert_eq!(args.target_timeout_secs, None);
        assert!(args.settings.is_none());
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "tile-screen",
            "--tiles",
            "4",
            "--poll-interval-ms",
            "50",
            "--target-timeout-secs",
            "30",
            "--settings",
            "/tmp/tiles.set",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.tiles, Some(4));
        assert_eq!(args.poll_interval_ms, 50);
        assert_eq!(args.target_timeout_secs, Some(30));
        assert_eq!(args.settings, Some(PathBuf::from("/tmp/tiles.set")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Args::try_parse_from(["tile-screen", "--tiles", "1"]).is_err());
        assert!(Args::try_parse_from(["tile-screen", "--tiles", "10"]).is_err());
        assert!(Args::try_parse_from(["tile-screen", "--poll-interval-ms", "0"]).is_err());
    }
}
