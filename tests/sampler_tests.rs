use glam::Vec3;
use scroll_path_camera::{Path, PathSampler, SampleError};

fn straight_path(n: usize) -> Path {
    Path::from_positions((0..n).map(|i| Vec3::new(i as f32 * 10.0, 0.0, 0.0)))
}

#[cfg(test)]
mod endpoint_tests {
    use super::*;

    #[test]
    fn test_offset_zero_resolves_first_point() {
        for n in 2..40 {
            let path = straight_path(n);
            let point = PathSampler::resolve(&path, 0.0).unwrap();
            assert_eq!(point.position, path[0].position, "n = {}", n);
        }
    }

    #[test]
    fn test_offset_one_resolves_last_point() {
        for n in 2..40 {
            let path = straight_path(n);
            let point = PathSampler::resolve(&path, 1.0).unwrap();
            assert_eq!(point.position, path[n - 1].position, "n = {}", n);
        }
    }

    #[test]
    fn test_three_point_midpoint_scenario() {
        let path = Path::from_positions([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(20.0, 0.0, 0.0),
        ]);

        assert_eq!(PathSampler::resolve_index(&path, 0.5), Ok(1));
        assert_eq!(
            PathSampler::resolve(&path, 0.5).unwrap().position,
            Vec3::new(10.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_two_point_upper_boundary_scenario() {
        let path = Path::from_positions([Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)]);

        assert_eq!(PathSampler::resolve_index(&path, 1.0), Ok(1));
        assert_eq!(
            PathSampler::resolve(&path, 1.0).unwrap().position,
            Vec3::new(10.0, 0.0, 0.0)
        );
    }
}

#[cfg(test)]
mod ordering_tests {
    use super::*;

    #[test]
    fn test_index_is_monotone_in_offset() {
        for n in [2, 3, 7, 100, 1001] {
            let path = straight_path(n);
            let mut last_index = 0;

            for step in 0..=2000 {
                let offset = step as f32 / 2000.0;
                let index = PathSampler::resolve_index(&path, offset).unwrap();
                assert!(
                    index >= last_index,
                    "n = {}: offset {} went back from {} to {}",
                    n,
                    offset,
                    last_index,
                    index
                );
                assert!(index < n);
                last_index = index;
            }
            assert_eq!(last_index, n - 1);
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let path = straight_path(17);
        for offset in [0.0, 0.13, 0.5, 0.77, 1.0] {
            let first = *PathSampler::resolve(&path, offset).unwrap();
            for _ in 0..5 {
                assert_eq!(*PathSampler::resolve(&path, offset).unwrap(), first);
            }
        }
        assert_eq!(path, straight_path(17), "Sampling must not touch the path");
    }

    #[test]
    fn test_same_offset_on_longer_path_still_in_bounds() {
        let offset = 0.999_999;
        for n in [2, 10, 1_000, 100_000] {
            let index = PathSampler::resolve_index(&straight_path(n), offset).unwrap();
            assert!(index <= n - 1);
        }
    }
}

#[cfg(test)]
mod degenerate_tests {
    use super::*;

    #[test]
    fn test_empty_path_is_degenerate() {
        let path = Path::default();
        for offset in [0.0, 0.5, 1.0] {
            assert_eq!(
                PathSampler::resolve_index(&path, offset),
                Err(SampleError::DegeneratePath { len: 0 })
            );
        }
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let path = straight_path(1);
        assert_eq!(
            PathSampler::resolve(&path, 1.0).err(),
            Some(SampleError::DegeneratePath { len: 1 })
        );
    }
}
