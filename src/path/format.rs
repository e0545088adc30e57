//! JSON curve format
//!
//! Accepted shapes, one record per sample in travel order:
//!
//! ```json
//! [[0, 1, 2], [3, 4, 5]]
//! [{"x": 0, "y": 1, "z": 2}, {"position": [3, 4, 5], "quaternion": [0, 0, 0, 1]}]
//! {"points": [{"x": 0, "y": 1, "z": 2, "rotation": [0, 1.57, 0]}]}
//! ```

use glam::{Quat, Vec3};
use serde::Deserialize;

use super::{CurvePoint, Orientation, Path};
use crate::error::LoadError;

#[derive(Deserialize)]
#[serde(untagged)]
enum PathDocument {
    Bare(Vec<PointRecord>),
    Wrapped { points: Vec<PointRecord> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRecord {
    Triple([f32; 3]),
    Object(ObjectRecord),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectRecord {
    #[serde(default)]
    position: Option<[f32; 3]>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default)]
    z: Option<f32>,
    #[serde(default, alias = "quat")]
    quaternion: Option<QuatRecord>,
    /// Euler XYZ, radians
    #[serde(default)]
    rotation: Option<[f32; 3]>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuatRecord {
    Array([f32; 4]),
    Object { x: f32, y: f32, z: f32, w: f32 },
}

impl QuatRecord {
    fn to_quat(&self) -> Quat {
        match *self {
            Self::Array([x, y, z, w]) => Quat::from_xyzw(x, y, z, w),
            Self::Object { x, y, z, w } => Quat::from_xyzw(x, y, z, w),
        }
    }
}

impl PointRecord {
    fn into_point(self, index: usize) -> Result<CurvePoint, String> {
        let point = match self {
            Self::Triple(p) => CurvePoint::new(Vec3::from_array(p)),
            Self::Object(record) => record.into_point(index)?,
        };

        if !point.position.is_finite() {
            return Err(format!("point {index} has a non-finite coordinate"));
        }
        Ok(point)
    }
}

impl ObjectRecord {
    fn into_point(self, index: usize) -> Result<CurvePoint, String> {
        let position = match (self.position, self.x, self.y, self.z) {
            (Some(p), None, None, None) => Vec3::from_array(p),
            (None, Some(x), Some(y), Some(z)) => Vec3::new(x, y, z),
            (Some(_), _, _, _) => {
                return Err(format!("point {index} mixes `position` with x/y/z fields"))
            }
            _ => return Err(format!("point {index} is missing one of x, y, z")),
        };

        let orientation = match (self.quaternion, self.rotation) {
            (Some(_), Some(_)) => {
                return Err(format!("point {index} has both `quaternion` and `rotation`"))
            }
            (Some(q), None) => {
                let q = q.to_quat();
                if !q.is_finite() || q.length_squared() == 0.0 {
                    return Err(format!("point {index} has an invalid quaternion"));
                }
                Some(Orientation::Quaternion(q))
            }
            (None, Some(e)) => {
                let e = Vec3::from_array(e);
                if !e.is_finite() {
                    return Err(format!("point {index} has a non-finite rotation"));
                }
                Some(Orientation::Euler(e))
            }
            (None, None) => None,
        };

        Ok(CurvePoint {
            position,
            orientation,
        })
    }
}

/// Parse a curve document into a path
///
/// Empty point lists and anything that is not a sequence of numeric triples or
/// point records fail with [`LoadError::Parse`].
pub fn parse_path(identifier: &str, bytes: &[u8]) -> Result<Path, LoadError> {
    let document: PathDocument =
        serde_json::from_slice(bytes).map_err(|e| LoadError::parse(identifier, e.to_string()))?;

    let records = match document {
        PathDocument::Bare(records) | PathDocument::Wrapped { points: records } => records,
    };

    if records.is_empty() {
        return Err(LoadError::parse(identifier, "empty point list"));
    }

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_point(i))
        .collect::<Result<Vec<_>, _>>()
        .map(Path::new)
        .map_err(|reason| LoadError::parse(identifier, reason))
}
