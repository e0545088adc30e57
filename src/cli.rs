// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "scroll-path-camera")]
#[command(about = "Scroll-driven camera travelling along a precomputed path", long_about = None)]
pub struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path resource identifier, relative to the asset directory
    #[arg(long)]
    pub path: Option<String>,

    /// Directory path resources are loaded from
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Camera speed factor (fraction of remaining distance per second)
    #[arg(long)]
    pub speed: Option<f32>,

    /// Scroll region height in viewports
    #[arg(long)]
    pub pages: Option<f32>,

    /// Scroll damping time constant in seconds, 0 disables easing
    #[arg(long)]
    pub damping: Option<f32>,

    /// Extra attempts for a failed path load
    #[arg(long)]
    pub retries: Option<u32>,

    /// Run this many simulated 60 Hz frames without a window and print the
    /// camera trace
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u32>,

    /// Disable the status line in the window title
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "scroll-path-camera",
            "--path",
            "curve.json",
            "--speed",
            "2.5",
            "--headless",
            "30",
            "--no-ui",
        ])
        .unwrap();

        assert_eq!(cli.path.as_deref(), Some("curve.json"));
        assert_eq!(cli.speed, Some(2.5));
        assert_eq!(cli.headless, Some(30));
        assert!(cli.no_ui);
        assert!(cli.pages.is_none());
    }

    #[test]
    fn defaults_are_empty() {
        let cli = Cli::try_parse_from(["scroll-path-camera"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.no_ui);
    }
}
