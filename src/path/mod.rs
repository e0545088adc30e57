pub mod format;
pub mod loading;
pub mod store;

pub use loading::{PathState, PendingPath};
pub use store::{DirectorySource, MemorySource, PathSource, PathStore, RetryPolicy};

use glam::{EulerRot, Quat, Vec3};
use std::ops::Index;

/// Per-point orientation as stored in the curve file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Quaternion(Quat),
    /// Euler angles in radians, XYZ order
    Euler(Vec3),
}

impl Orientation {
    pub fn to_quat(self) -> Quat {
        match self {
            Self::Quaternion(q) => q.normalize(),
            Self::Euler(e) => Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z),
        }
    }
}

/// One sample of the camera trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub position: Vec3,
    pub orientation: Option<Orientation>,
}

impl CurvePoint {
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: None,
        }
    }

    pub const fn with_orientation(position: Vec3, orientation: Orientation) -> Self {
        Self {
            position,
            orientation: Some(orientation),
        }
    }
}

impl From<Vec3> for CurvePoint {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

impl From<[f32; 3]> for CurvePoint {
    fn from(position: [f32; 3]) -> Self {
        Self::new(Vec3::from_array(position))
    }
}

/// Ordered camera trajectory; index order is travel order
///
/// A `Path` never changes after it is built. Paths with fewer than two points
/// can exist (a curve file may hold a single sample) but cannot be sampled,
/// see [`crate::sampler::PathSampler`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<CurvePoint>,
}

impl Path {
    pub fn new(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    /// Build a path from bare positions
    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self::new(positions.into_iter().map(CurvePoint::new).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CurvePoint> {
        self.points.get(index)
    }

    pub fn first(&self) -> Option<&CurvePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&CurvePoint> {
        self.points.last()
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurvePoint> {
        self.points.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().map(|p| p.position)
    }

    /// Total polyline length through all samples
    pub fn arc_length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
            .sum()
    }

    /// Axis-aligned bounds of all sample positions
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.points.first()?.position;
        Some(
            self.positions()
                .fold((first, first), |(min, max), p| (min.min(p), max.max(p))),
        )
    }
}

impl Index<usize> for Path {
    type Output = CurvePoint;

    fn index(&self, index: usize) -> &CurvePoint {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a CurvePoint;
    type IntoIter = std::slice::Iter<'a, CurvePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<CurvePoint> for Path {
    fn from_iter<I: IntoIterator<Item = CurvePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
