pub mod camera;
pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod path;
pub mod rig;
pub mod sampler;
pub mod scroll;
pub mod viewer;

pub use camera::{CameraDriver, CameraPose, LookAtTarget, Projection};
pub use config::RigConfig;
pub use error::{LoadError, SampleError};
pub use path::{CurvePoint, Orientation, Path, PathState, PathStore};
pub use rig::{FrameReport, ScrollRig};
pub use sampler::PathSampler;
pub use scroll::ScrollProgress;
