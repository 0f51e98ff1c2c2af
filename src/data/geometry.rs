//! Canvas-space geometry for the metering line.
//!
//! All coordinates are `[x, y]` pairs in canvas pixels (the pixel grid of the
//! main camera frame), with Y growing downwards.

/// Endpoint coordinates of a line, either absolute or relative to its center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinePoints {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LinePoints {
    pub fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        Self {
            x1: start[0],
            y1: start[1],
            x2: end[0],
            y2: end[1],
        }
    }

    pub fn start(&self) -> [f64; 2] {
        [self.x1, self.y1]
    }

    pub fn end(&self) -> [f64; 2] {
        [self.x2, self.y2]
    }

    pub fn center(&self) -> [f64; 2] {
        midpoint(self.start(), self.end())
    }

    /// The same endpoints expressed relative to the line's own center.
    pub fn relative_to_center(&self) -> LinePoints {
        let [cx, cy] = self.center();
        LinePoints {
            x1: self.x1 - cx,
            y1: self.y1 - cy,
            x2: self.x2 - cx,
            y2: self.y2 - cy,
        }
    }
}

/// Placement of a line's local points on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTransform {
    /// Canvas position of the line's center.
    pub offset: [f64; 2],
    pub scale_x: f64,
    pub scale_y: f64,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Default for LineTransform {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            scale_x: 1.0,
            scale_y: 1.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

/// Canvas-space endpoints of a line after its transform has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLine {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub length: f64,
}

/// A zero or non-finite scale factor behaves like an unscaled axis.
pub fn effective_scale(scale: f64) -> f64 {
    if scale == 0.0 || !scale.is_finite() {
        1.0
    } else {
        scale
    }
}

/// Compute the true canvas endpoints of a line from its local points.
///
/// With both flip flags equal the local points map straight through. With
/// exactly one axis flipped the rendered segment runs along the other
/// diagonal of its bounding box, so the Y components of start and end swap.
pub fn resolve_line_endpoints(local: &LinePoints, transform: &LineTransform) -> ResolvedLine {
    let sx = effective_scale(transform.scale_x);
    let sy = effective_scale(transform.scale_y);
    let [ox, oy] = transform.offset;

    let (start_ly, end_ly) = if transform.flip_x == transform.flip_y {
        (local.y1, local.y2)
    } else {
        (local.y2, local.y1)
    };

    let start = [ox + local.x1 * sx, oy + start_ly * sy];
    let end = [ox + local.x2 * sx, oy + end_ly * sy];

    ResolvedLine {
        start,
        end,
        length: distance(start, end),
    }
}

pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt()
}

pub fn midpoint(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [(a[0] + b[0]) * 0.5, (a[1] + b[1]) * 0.5]
}

/// Shortest distance from `p` to the closed segment `a`-`b`.
pub fn distance_to_segment(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return distance(p, a);
    }
    let t = (((p[0] - a[0]) * dx + (p[1] - a[1]) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, [a[0] + t * dx, a[1] + t * dy])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_points_are_centered() {
        let p = LinePoints::new([10.0, 20.0], [30.0, 60.0]);
        let rel = p.relative_to_center();
        assert_eq!(rel, LinePoints::new([-10.0, -20.0], [10.0, 20.0]));
        assert_eq!(p.center(), [20.0, 40.0]);
    }

    #[test]
    fn zero_scale_is_treated_as_one() {
        assert_eq!(effective_scale(0.0), 1.0);
        assert_eq!(effective_scale(f64::NAN), 1.0);
        assert_eq!(effective_scale(2.5), 2.5);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = [0.0, 0.0];
        let b = [10.0, 0.0];
        assert_eq!(distance_to_segment([5.0, 3.0], a, b), 3.0);
        assert_eq!(distance_to_segment([-3.0, 4.0], a, b), 5.0);
        assert_eq!(distance_to_segment([13.0, 4.0], a, b), 5.0);
        assert_eq!(distance_to_segment([1.0, 1.0], a, a), 2f64.sqrt());
    }
}
