use glam::Vec3;
use scroll_path_camera::path::{MemorySource, PendingPath};
use scroll_path_camera::{
    CameraDriver, CameraPose, LoadError, LookAtTarget, Path, PathStore, RigConfig, ScrollProgress,
    ScrollRig,
};
use std::time::{Duration, Instant};

const DT: f32 = 1.0 / 60.0;
const VIEWPORT: f32 = 800.0;

fn initial_pose() -> CameraPose {
    CameraPose::at(Vec3::new(0.0, 3.0, 12.0))
}

fn driver() -> CameraDriver {
    CameraDriver::new(initial_pose(), LookAtTarget::fixed(Vec3::new(0.0, -2.21, -5.0)))
}

fn curve() -> Path {
    Path::from_positions((0..5).map(|i| Vec3::new(i as f32 * 4.0, 1.0, 6.0 - i as f32)))
}

/// Run frames until the background load lands
fn frame_until_loaded(rig: &mut ScrollRig) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while rig.state().is_loading() {
        assert!(Instant::now() < deadline, "Path never finished loading");
        rig.frame(0.0);
        std::thread::sleep(Duration::from_millis(1));
    }
}

#[cfg(test)]
mod fallback_tests {
    use super::*;

    #[test]
    fn test_missing_resource_keeps_initial_pose() {
        let store = PathStore::new(MemorySource::new());
        let scroll = ScrollProgress::new(9.0, VIEWPORT);
        let mut rig = ScrollRig::mount(store, "porscheCurve.json", scroll, driver());
        frame_until_loaded(&mut rig);

        assert!(matches!(rig.state().error(), Some(LoadError::NotFound { .. })));

        for i in 0..600 {
            rig.scroll_mut().scroll_by(25.0);
            let report = rig.frame(DT);
            assert_eq!(report.index, None, "frame {}", i);
            assert_eq!(report.pose, initial_pose(), "frame {}", i);
        }
    }

    #[test]
    fn test_failure_lands_on_first_frame() {
        let pending = PendingPath::completed("slow.json", Err(LoadError::not_found("slow.json")));
        let scroll = ScrollProgress::new(3.0, VIEWPORT);
        let mut rig = ScrollRig::with_pending(pending, scroll, driver());
        assert!(rig.state().is_loading());

        let report = rig.frame(DT);
        assert_eq!(report.pose, initial_pose());
        assert_eq!(rig.state().label(), "unavailable");
    }

    #[test]
    fn test_single_point_path_holds_pose() {
        let path = Path::from_positions([Vec3::new(50.0, 50.0, 50.0)]);
        let mut rig = ScrollRig::with_path(path, ScrollProgress::new(4.0, VIEWPORT), driver());

        rig.scroll_mut().scroll_to_offset(1.0);
        for _ in 0..120 {
            let report = rig.frame(DT);
            assert_eq!(report.index, None);
        }
        assert_eq!(*rig.pose(), initial_pose());
    }
}

#[cfg(test)]
mod travel_tests {
    use super::*;

    #[test]
    fn test_background_load_becomes_ready() {
        let store = PathStore::new(
            MemorySource::new().with("curve.json", "[[0,0,0],[1,0,0],[2,0,0],[3,0,0]]"),
        );
        let scroll = ScrollProgress::new(2.0, VIEWPORT);
        let mut rig = ScrollRig::mount(store, "curve.json", scroll, driver());
        frame_until_loaded(&mut rig);

        assert!(rig.state().is_ready());
        assert_eq!(rig.path().map(Path::len), Some(4));

        rig.scroll_mut().scroll_to_offset(1.0);
        assert_eq!(rig.frame(DT).index, Some(3));
    }

    #[test]
    fn test_ready_path_points_driver_at_last_sample() {
        let rig = ScrollRig::with_path(curve(), ScrollProgress::new(9.0, VIEWPORT), driver());
        assert_eq!(rig.driver().current_index(), Some(4));
        assert_eq!(*rig.pose(), initial_pose());
    }

    #[test]
    fn test_scrolling_to_end_parks_on_last_point() {
        let path = curve();
        let last = path[path.len() - 1].position;
        let mut rig = ScrollRig::with_path(path, ScrollProgress::new(9.0, VIEWPORT), driver());

        rig.scroll_mut().scroll_to_offset(1.0);
        let mut report = rig.frame(DT);
        for _ in 0..1200 {
            report = rig.frame(DT);
        }

        assert_eq!(report.offset, 1.0);
        assert_eq!(report.index, Some(4));
        assert!(report.pose.position.distance(last) < 1e-3);
    }

    #[test]
    fn test_start_of_scroll_follows_first_point() {
        let path = curve();
        let first = path[0].position;
        let mut rig = ScrollRig::with_path(path, ScrollProgress::new(9.0, VIEWPORT), driver());

        for _ in 0..1200 {
            rig.frame(DT);
        }
        assert!(rig.pose().position.distance(first) < 1e-3);
    }

    #[test]
    fn test_random_jumps_stay_on_valid_samples() {
        let path = curve();
        let mut rig = ScrollRig::with_path(path, ScrollProgress::new(9.0, VIEWPORT), driver());

        // Deterministic pseudo-random sequence of jump targets
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let target = (seed % 10_001) as f32 / 10_000.0;

            rig.scroll_mut().jump_to_offset(target);
            let report = rig.frame(DT);
            let index = report.index.unwrap();
            assert!(index < 5);
            assert!(report.pose.position.is_finite());
            assert!((0.0..=1.0).contains(&report.offset));
        }
    }

    #[test]
    fn test_minimize_and_restore_keeps_camera_in_place() {
        let path = Path::from_positions((0..9).map(|i| Vec3::new(i as f32, 0.0, 0.0)));
        let scroll = ScrollProgress::new(9.0, 540.0).with_damping(0.1);
        let mut rig = ScrollRig::with_path(path, scroll, driver());

        rig.scroll_mut().jump_to_offset(0.75);
        assert_eq!(rig.frame(DT).index, Some(6));

        rig.scroll_mut().set_viewport_height(0.0);
        for _ in 0..30 {
            assert_eq!(rig.frame(DT).index, Some(6));
        }
        rig.scroll_mut().set_viewport_height(540.0);
        for _ in 0..120 {
            let report = rig.frame(DT);
            assert_eq!(report.index, Some(6));
            assert!((report.offset - 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn test_damped_scroll_moves_camera_forward_monotonically() {
        let path = Path::from_positions((0..50).map(|i| Vec3::new(i as f32, 0.0, 0.0)));
        let scroll = ScrollProgress::new(9.0, VIEWPORT).with_damping(0.1);
        let mut rig = ScrollRig::with_path(path, scroll, driver());

        rig.scroll_mut().scroll_to_offset(1.0);
        let mut last_offset = 0.0;
        let mut last_index = 0;
        for _ in 0..300 {
            let report = rig.frame(DT);
            assert!(report.offset >= last_offset);
            let index = report.index.unwrap();
            assert!(index >= last_index);
            last_offset = report.offset;
            last_index = index;
        }
        assert_eq!(last_index, 49);
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_config_builds_rig_with_defaults() {
        let config = RigConfig::default();
        assert_eq!(config.path, "porscheCurve.json");

        let driver = config.driver();
        assert_eq!(driver.speed_factor(), 1.0);
        assert_eq!(driver.look_at().point(), Vec3::new(0.0, -2.21, -5.0));

        let scroll = config.scroll(VIEWPORT);
        assert_eq!(scroll.pages(), 9.0);
        assert_eq!(scroll.extent(), 8.0 * VIEWPORT);
    }
}
