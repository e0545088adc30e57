use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::camera::{CameraDriver, CameraPose, LookAtTarget, DEFAULT_SPEED_FACTOR};
use crate::cli::Cli;
use crate::path::{DirectorySource, PathStore, RetryPolicy};
use crate::rig::ScrollRig;
use crate::scroll::ScrollProgress;

/// Scene settings for the scroll rig
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigConfig {
    /// Path resource identifier
    pub path: String,
    /// Directory path resources resolve against
    pub assets: PathBuf,
    pub speed_factor: f32,
    pub look_at: [f32; 3],
    pub initial_position: [f32; 3],
    pub pages: f32,
    /// Scroll damping time constant in seconds
    pub damping: f32,
    pub retries: u32,
    /// Wait before each retry, in milliseconds
    pub retry_backoff_ms: u64,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            path: "porscheCurve.json".into(),
            assets: PathBuf::from("assets"),
            speed_factor: DEFAULT_SPEED_FACTOR,
            look_at: [0.0, -2.21, -5.0],
            initial_position: [0.0, 0.0, 0.0],
            pages: 9.0,
            damping: 0.1,
            retries: 0,
            retry_backoff_ms: 250,
            fov: 75.0,
        }
    }
}

impl RigConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid rig config")
    }

    pub fn load(file: impl Into<PathBuf>) -> Result<Self> {
        let file = file.into();
        let json = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read config file: {:?}", file))?;
        Self::from_json(&json).with_context(|| format!("In config file {:?}", file))
    }

    /// Config file (if any) with command-line overrides applied
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(file) => Self::load(file)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.path {
            self.path = path.clone();
        }
        if let Some(assets) = &cli.assets {
            self.assets = assets.clone();
        }
        if let Some(speed) = cli.speed {
            self.speed_factor = speed;
        }
        if let Some(pages) = cli.pages {
            self.pages = pages;
        }
        if let Some(damping) = cli.damping {
            self.damping = damping;
        }
        if let Some(retries) = cli.retries {
            self.retries = retries;
        }
    }

    pub fn store(&self) -> PathStore {
        PathStore::new(DirectorySource::new(self.assets.clone()))
            .with_retry(
                RetryPolicy::retries(self.retries)
                    .with_backoff(Duration::from_millis(self.retry_backoff_ms)),
            )
    }

    pub fn driver(&self) -> CameraDriver {
        CameraDriver::new(
            CameraPose::at(Vec3::from_array(self.initial_position)),
            LookAtTarget::fixed(Vec3::from_array(self.look_at)),
        )
        .with_speed_factor(self.speed_factor)
    }

    pub fn scroll(&self, viewport_height: f32) -> ScrollProgress {
        ScrollProgress::new(self.pages, viewport_height).with_damping(self.damping)
    }

    /// Mount a rig; the path starts loading in the background
    pub fn mount(&self, viewport_height: f32) -> ScrollRig {
        log::info!(
            "Mounting scroll rig: path {:?} from {:?}, {} pages",
            self.path,
            self.assets,
            self.pages
        );
        ScrollRig::mount(
            self.store(),
            self.path.clone(),
            self.scroll(viewport_height),
            self.driver(),
        )
    }
}
