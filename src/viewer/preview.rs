use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use super::canvas::{Canvas, Color, DrawOp};
use crate::camera::{CameraPose, Projection};
use crate::path::Path;

const BACKGROUND: Color = [0, 0, 0, 255];
const GRID: Color = [38, 38, 44, 255];
const PATH: Color = [84, 229, 255, 255];
const SAMPLE: Color = [40, 120, 140, 255];
const TARGET: Color = [255, 255, 255, 255];
const HEADING: Color = [250, 200, 70, 255];
const LOOK_AT: Color = [255, 80, 60, 255];

/// Most grid lines drawn per axis side, however large the path
const MAX_GRID_HALF_EXTENT: i32 = 200;

/// Wireframe stand-in for the scene: ground grid, path, current sample and
/// look-at point, seen through the driven camera
#[derive(Debug, Clone)]
pub struct Preview {
    /// Height of the ground grid plane
    pub ground_y: f32,
    /// Minimum grid half extent in cells; grows to cover the path
    pub grid_half_extent: i32,
    pub grid_spacing: f32,
    /// World length of the heading tick drawn at oriented samples
    pub heading_length: f32,
}

impl Default for Preview {
    fn default() -> Self {
        Self {
            ground_y: -2.1,
            grid_half_extent: 20,
            grid_spacing: 2.0,
            heading_length: 0.75,
        }
    }
}

/// World-to-pixel projection for one frame
struct Projector {
    view_projection: Mat4,
    width: f32,
    height: f32,
}

impl Projector {
    /// Pixel position, or `None` for points behind the camera
    fn project(&self, point: Vec3) -> Option<(i32, i32)> {
        let clip = self.view_projection * point.extend(1.0);
        if clip.w <= 1e-4 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        let x = (ndc.x * 0.5 + 0.5) * self.width;
        let y = (1.0 - (ndc.y * 0.5 + 0.5)) * self.height;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some((x.round() as i32, y.round() as i32))
    }

    fn line(&self, canvas: &mut Canvas, a: Vec3, b: Vec3, color: Color) {
        if let (Some((x1, y1)), Some((x2, y2))) = (self.project(a), self.project(b)) {
            canvas.push(DrawOp::Line { x1, y1, x2, y2, color });
        }
    }

    fn dot(&self, canvas: &mut Canvas, p: Vec3, radius: u32, color: Color) {
        if let Some((cx, cy)) = self.project(p) {
            canvas.push(DrawOp::FilledCircle { cx, cy, radius, color });
        }
    }

    fn ring(&self, canvas: &mut Canvas, p: Vec3, radius: u32, color: Color) {
        if let Some((cx, cy)) = self.project(p) {
            canvas.push(DrawOp::Circle { cx, cy, radius, color });
        }
    }
}

impl Preview {
    /// Draw one frame into a `width` x `height` canvas
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        width: u32,
        height: u32,
        pose: &CameraPose,
        projection: &Projection,
        path: Option<&Path>,
        current_index: Option<usize>,
        look_at: Vec3,
    ) -> Canvas {
        let projector = Projector {
            view_projection: projection.view_projection(pose),
            width: width as f32,
            height: height as f32,
        };

        let mut canvas = Canvas::new(width, height).draw(DrawOp::Clear(BACKGROUND));
        self.draw_grid(&projector, &mut canvas, path);

        if let Some(path) = path {
            for pair in path.points().windows(2) {
                projector.line(&mut canvas, pair[0].position, pair[1].position, PATH);
            }
            for point in path {
                if let Some(orientation) = point.orientation {
                    let heading = orientation.to_quat() * Vec3::NEG_Z;
                    let tip = point.position + heading * self.heading_length;
                    projector.line(&mut canvas, point.position, tip, HEADING);
                }
            }
            for point in path {
                projector.dot(&mut canvas, point.position, 1, SAMPLE);
            }
            if let Some(target) = current_index.and_then(|i| path.get(i)) {
                projector.dot(&mut canvas, target.position, 4, TARGET);
            }
        }

        projector.dot(&mut canvas, look_at, 3, LOOK_AT);
        projector.ring(&mut canvas, look_at, 8, LOOK_AT);
        canvas.execute_ops()
    }

    /// Grid centre on the ground plane (x, z) and half extent in cells,
    /// framed around the path bounds when there is a path
    fn grid_frame(&self, path: Option<&Path>) -> (Vec2, i32) {
        let fallback = (Vec2::ZERO, self.grid_half_extent);
        if !self.grid_spacing.is_finite() || self.grid_spacing <= 0.0 {
            return fallback;
        }
        let Some((min, max)) = path.and_then(Path::bounds) else {
            return fallback;
        };

        let snap = |v: f32| (v / self.grid_spacing).round() * self.grid_spacing;
        let center = Vec2::new(snap((min.x + max.x) * 0.5), snap((min.z + max.z) * 0.5));
        let half_span = (max.x - min.x).max(max.z - min.z) * 0.5;
        let cells = (half_span / self.grid_spacing).ceil() as i32 + 1;

        (
            center,
            self.grid_half_extent.max(cells).min(MAX_GRID_HALF_EXTENT),
        )
    }

    fn draw_grid(&self, projector: &Projector, canvas: &mut Canvas, path: Option<&Path>) {
        let (center, n) = self.grid_frame(path);
        let extent = n as f32 * self.grid_spacing;
        let y = self.ground_y;

        for i in -n..=n {
            let t = i as f32 * self.grid_spacing;
            projector.line(
                canvas,
                Vec3::new(center.x + t, y, center.y - extent),
                Vec3::new(center.x + t, y, center.y + extent),
                GRID,
            );
            projector.line(
                canvas,
                Vec3::new(center.x - extent, y, center.y + t),
                Vec3::new(center.x + extent, y, center.y + t),
                GRID,
            );
        }
    }
}
