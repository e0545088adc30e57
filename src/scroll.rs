/// Damped offsets this close to the target land on it
const SETTLE_EPSILON: f32 = 1e-5;

/// Scroll progress across a paged scroll region
///
/// The region is `pages` viewports tall; the scrollable extent is everything
/// past the first viewport. Input moves a normalized target (pixel input is
/// divided by the extent), and [`ScrollProgress::tick`] eases the published
/// offset toward it once per frame. Both the target and the published offset
/// stay inside `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ScrollProgress {
    pages: f32,
    viewport_height: f32,
    /// Normalized target, independent of the viewport size
    target: f32,
    /// Damping time constant in seconds, 0 = no easing
    damping: f32,
    offset: f32,
    delta: f32,
    velocity: f32,
}

impl ScrollProgress {
    pub fn new(pages: f32, viewport_height: f32) -> Self {
        Self {
            pages: sanitize(pages).max(1.0),
            viewport_height: sanitize(viewport_height).max(0.0),
            target: 0.0,
            damping: 0.0,
            offset: 0.0,
            delta: 0.0,
            velocity: 0.0,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = sanitize(damping).max(0.0);
        self
    }

    /// Scrollable distance in pixels
    pub fn extent(&self) -> f32 {
        (self.pages - 1.0) * self.viewport_height
    }

    pub fn pages(&self) -> f32 {
        self.pages
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Target position in pixels
    pub fn position(&self) -> f32 {
        self.target * self.extent()
    }

    /// Resize the viewport; the normalized target is kept, also across a
    /// zero-height (minimized) viewport
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = sanitize(height).max(0.0);
    }

    /// Move the target by `pixels`, positive = forward
    pub fn scroll_by(&mut self, pixels: f32) {
        self.scroll_to(self.position() + sanitize(pixels));
    }

    /// Move the target to an absolute pixel position; ignored while there is
    /// nothing to scroll
    pub fn scroll_to(&mut self, pixels: f32) {
        let extent = self.extent();
        if extent > 0.0 {
            self.target = (sanitize(pixels) / extent).clamp(0.0, 1.0);
        }
    }

    /// Move the target to a normalized position, e.g. from a scrollbar drag
    pub fn scroll_to_offset(&mut self, offset: f32) {
        self.target = sanitize(offset).clamp(0.0, 1.0);
    }

    /// Move the target by one viewport, `pages` may be negative
    pub fn scroll_pages(&mut self, pages: f32) {
        self.scroll_by(pages * self.viewport_height);
    }

    /// Set target and published offset at once, skipping the easing
    pub fn jump_to_offset(&mut self, offset: f32) {
        self.scroll_to_offset(offset);
        self.offset = self.target_offset();
        self.delta = 0.0;
        self.velocity = 0.0;
    }

    /// Normalized target the published offset is easing toward
    pub fn target_offset(&self) -> f32 {
        self.target
    }

    /// Advance the published offset by one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let dt = sanitize(dt).max(0.0);
        let target = self.target_offset();
        let previous = self.offset;

        self.offset = if self.damping <= 0.0 || (target - previous).abs() <= SETTLE_EPSILON {
            target
        } else {
            let alpha = 1.0 - (-dt / self.damping).exp();
            previous + (target - previous) * alpha
        };

        // Float error must not push past the ends
        self.offset = self.offset.clamp(0.0, 1.0);
        self.delta = self.offset - previous;
        self.velocity = if dt > 0.0 { self.delta / dt } else { 0.0 };
    }

    /// Published progress in `[0, 1]`
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Offset change during the last tick
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Offset change per second during the last tick
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Progress still ahead, `1 - offset`
    pub fn remaining(&self) -> f32 {
        1.0 - self.offset
    }

    /// Progress through the section `[from, from + distance]`, 0 before it,
    /// 1 after it
    pub fn range(&self, from: f32, distance: f32) -> f32 {
        self.range_with_margin(from, distance, 0.0)
    }

    pub fn range_with_margin(&self, from: f32, distance: f32, margin: f32) -> f32 {
        let start = from - margin;
        let end = start + distance + margin * 2.0;
        if self.offset < start {
            0.0
        } else if self.offset > end {
            1.0
        } else if end > start {
            (self.offset - start) / (end - start)
        } else {
            1.0
        }
    }

    /// 0 → 1 → 0 bump across the section, peaking in its middle
    pub fn curve(&self, from: f32, distance: f32) -> f32 {
        (self.range(from, distance) * std::f32::consts::PI).sin()
    }

    /// Whether the offset lies inside the section
    pub fn visible(&self, from: f32, distance: f32) -> bool {
        from <= self.offset && self.offset <= from + distance
    }
}

impl Default for ScrollProgress {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
