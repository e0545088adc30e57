/// RGBA color, sRGB encoded
pub type Color = [u8; 4];

/// 2D drawing operations for the canvas
///
/// Coordinates are signed so shapes may start or end off-canvas; pixels
/// outside the canvas are dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill entire canvas with color
    Clear(Color),

    /// Draw line from (x1, y1) to (x2, y2)
    Line { x1: i32, y1: i32, x2: i32, y2: i32, color: Color },

    /// Draw circle outline at (cx, cy)
    Circle { cx: i32, cy: i32, radius: u32, color: Color },

    /// Draw filled circle at (cx, cy)
    FilledCircle { cx: i32, cy: i32, radius: u32, color: Color },
}

/// CPU pixel buffer the preview is drawn into
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<Color>,
    operations: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
            operations: Vec::new(),
            width,
            height,
        }
    }

    /// Queue a draw operation
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.push(op);
        self
    }

    pub fn push(&mut self, op: DrawOp) {
        self.operations.push(op);
    }

    /// Execute all pending operations in order
    pub fn execute_ops(mut self) -> Self {
        let operations = std::mem::take(&mut self.operations);
        for op in &operations {
            self.execute_op(op);
        }
        self
    }

    fn execute_op(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.pixels.fill(color),
            DrawOp::Line { x1, y1, x2, y2, color } => self.draw_line(x1, y1, x2, y2, color),
            DrawOp::Circle { cx, cy, radius, color } => self.draw_circle(cx, cy, radius, color),
            DrawOp::FilledCircle { cx, cy, radius, color } => {
                self.draw_filled_circle(cx, cy, radius, color)
            }
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.pixels[idx] = color;
    }

    /// Midpoint circle algorithm
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        let (mut x, mut y) = (radius as i32, 0i32);
        let mut p = 1 - radius as i32;

        while x >= y {
            for (px, py) in [
                (cx + x, cy + y), (cx - x, cy + y),
                (cx + x, cy - y), (cx - x, cy - y),
                (cx + y, cy + x), (cx - y, cy + x),
                (cx + y, cy - x), (cx - y, cy - x),
            ] {
                self.set_pixel(px, py, color);
            }
            y += 1;

            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * (y - x) + 1;
            }
        }
    }

    fn draw_filled_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        let r = radius as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham, clipped to a margin around the canvas so lines to far-off
    /// points stay cheap
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let limit = (self.width.max(self.height) as i64) * 4;
        let far = |v: i32| (v as i64).abs() > limit;
        if far(x1) || far(y1) || far(x2) || far(y2) {
            return;
        }

        let (mut x, mut y) = (x1, y1);
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);
            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Raw RGBA bytes, row-major
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
