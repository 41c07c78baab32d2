use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_FPS: u32 = 60;
const DEFAULT_LOG_FILE: &str = "logs/tvheat.log";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub language: String,
    pub fps: u32,
    pub include_specials: bool,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("TMDB_API_KEY not set")?;
        let language = env::var("TMDB_LANGUAGE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let fps = env::var("TVHEAT_FPS")
            .ok()
            .and_then(|v| parse_fps(&v))
            .unwrap_or(DEFAULT_FPS);
        let include_specials = env::var("TVHEAT_INCLUDE_SPECIALS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let log_file = env::var("TVHEAT_LOG")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            api_key,
            language,
            fps,
            include_specials,
            log_file,
        })
    }

    /// Time budget for a single frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

fn parse_fps(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().map(|n| n.clamp(1, 240))
}

fn parse_flag(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_clamped() {
        assert_eq!(parse_fps("0"), Some(1));
        assert_eq!(parse_fps(" 30 "), Some(30));
        assert_eq!(parse_fps("1000"), Some(240));
        assert_eq!(parse_fps("fast"), None);
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn frame_interval_follows_fps() {
        let cfg = Config {
            api_key: "k".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            fps: 60,
            include_specials: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        };
        assert_eq!(cfg.frame_interval(), Duration::from_millis(16));
    }
}
