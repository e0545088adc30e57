use crate::camera::{CameraDriver, CameraPose};
use crate::path::{Path, PathState, PathStore, PendingPath};
use crate::scroll::ScrollProgress;

/// What one frame produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub offset: f32,
    /// Sample followed this frame, `None` while holding
    pub index: Option<usize>,
    pub pose: CameraPose,
}

/// Scroll-driven camera for one scene
///
/// Owns the path load, the scroll progress and the camera driver, and ties them
/// together in [`ScrollRig::frame`]. Everything runs on the caller's thread
/// except the path load itself.
#[derive(Debug)]
pub struct ScrollRig {
    pending: Option<PendingPath>,
    state: PathState,
    scroll: ScrollProgress,
    driver: CameraDriver,
}

impl ScrollRig {
    /// Start loading `identifier` and build a rig that renders the fallback
    /// pose until it arrives
    pub fn mount(
        store: PathStore,
        identifier: impl Into<String>,
        scroll: ScrollProgress,
        driver: CameraDriver,
    ) -> Self {
        Self::with_pending(PendingPath::spawn(store, identifier), scroll, driver)
    }

    pub fn with_pending(pending: PendingPath, scroll: ScrollProgress, driver: CameraDriver) -> Self {
        Self {
            pending: Some(pending),
            state: PathState::Loading,
            scroll,
            driver,
        }
    }

    /// Rig around an already loaded path
    pub fn with_path(path: Path, scroll: ScrollProgress, mut driver: CameraDriver) -> Self {
        driver.on_path_ready(&path);
        Self {
            pending: None,
            state: PathState::Ready(path),
            scroll,
            driver,
        }
    }

    /// Pick up a finished load; true on the frame it lands
    fn poll_load(&mut self) -> bool {
        let Some(result) = self.pending.as_mut().and_then(PendingPath::poll) else {
            return false;
        };
        self.pending = None;

        match &result {
            Ok(path) if path.len() < 2 => {
                log::warn!("Path has {} point(s), camera stays put", path.len());
            }
            Ok(path) => self.driver.on_path_ready(path),
            Err(e) => log::warn!("Path unavailable, keeping fallback camera: {e}"),
        }

        self.state = PathState::from(result);
        true
    }

    /// Run one frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        self.poll_load();
        self.scroll.tick(dt);

        let offset = self.scroll.offset();
        let index = self.driver.update(self.state.path(), offset, dt);

        FrameReport {
            offset,
            index,
            pose: *self.driver.pose(),
        }
    }

    pub fn state(&self) -> &PathState {
        &self.state
    }

    pub fn path(&self) -> Option<&Path> {
        self.state.path()
    }

    pub fn scroll(&self) -> &ScrollProgress {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollProgress {
        &mut self.scroll
    }

    pub fn driver(&self) -> &CameraDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut CameraDriver {
        &mut self.driver
    }

    pub fn pose(&self) -> &CameraPose {
        self.driver.pose()
    }
}
