use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Flip a coin in your terminal, or tempt fate in a best-of-N match.
#[derive(Debug, Clone, Parser)]
#[command(name = "fate-coin", version, about)]
pub struct Settings {
    /// Seed for the outcome stream; omit for a fresh random table
    #[arg(long, env = "FATE_SEED")]
    pub seed: Option<u64>,

    /// Start without audio
    #[arg(long, env = "FATE_MUTE")]
    pub mute: bool,

    /// Where log lines go (the terminal itself is busy drawing)
    #[arg(long, env = "FATE_LOG_FILE", default_value = "fate-coin.log")]
    pub log_file: PathBuf,

    /// Write logs as JSON lines instead of plain text
    #[arg(long, env = "FATE_LOG_JSON")]
    pub log_json: bool,

    /// Frames drawn per second
    #[arg(long, env = "FATE_FPS", default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: u32,
}

impl Settings {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unset(var: &str) -> bool {
        std::env::var_os(var).is_none()
    }

    // Each default only holds when its environment variable is absent.
    #[test]
    fn defaults() {
        let s = Settings::try_parse_from(["fate-coin"]).unwrap();
        if unset("FATE_SEED") {
            assert_eq!(s.seed, None);
        }
        if unset("FATE_MUTE") {
            assert!(!s.mute);
        }
        if unset("FATE_LOG_FILE") {
            assert_eq!(s.log_file, PathBuf::from("fate-coin.log"));
        }
        if unset("FATE_FPS") {
            assert_eq!(s.fps, 30);
            assert_eq!(s.frame_duration(), Duration::from_secs_f64(1.0 / 30.0));
        }
    }

    #[test]
    fn flags_win_over_defaults() {
        let s = Settings::try_parse_from(["fate-coin", "--fps", "30", "--log-file", "x.log"])
            .unwrap();
        assert_eq!(s.fps, 30);
        assert_eq!(s.log_file, PathBuf::from("x.log"));
        assert_eq!(s.frame_duration(), Duration::from_secs_f64(1.0 / 30.0));
    }

    #[test]
    fn flags() {
        let s = Settings::try_parse_from([
            "fate-coin", "--seed", "7", "--mute", "--fps", "60", "--log-json",
        ])
        .unwrap();
        assert_eq!(s.seed, Some(7));
        assert!(s.mute && s.log_json);
        assert_eq!(s.fps, 60);
    }

    #[test]
    fn fps_is_bounded() {
        assert!(Settings::try_parse_from(["fate-coin", "--fps", "0"]).is_err());
        assert!(Settings::try_parse_from(["fate-coin", "--fps", "500"]).is_err());
    }
}
