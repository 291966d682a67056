//! Drop quadrant resolution
//!
//! A drop target is split into four triangles by its two diagonals. The
//! triangle under the pointer decides on which side of the target the
//! dragged terminal is spliced in.

use tracing::warn;

/// One of the four triangular drop regions of a terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    Left,
    Top,
    Right,
    Bottom,
}

/// Split orientation of the container created by a drop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Children laid out side by side
    Horizontal,
    /// Children stacked top to bottom
    Vertical,
}

/// Axis-aligned rectangle in widget coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Left, Quadrant::Top, Quadrant::Right, Quadrant::Bottom];

    pub fn orientation(self) -> Orientation {
        match self {
            Quadrant::Left | Quadrant::Right => Orientation::Horizontal,
            Quadrant::Top | Quadrant::Bottom => Orientation::Vertical,
        }
    }

    /// Whether the dropped terminal goes before the target in its container
    pub fn inserts_before(self) -> bool {
        matches!(self, Quadrant::Left | Quadrant::Top)
    }

    /// Area the drag overlay paints while this quadrant is hovered
    pub fn highlight_rect(self, width: f64, height: f64) -> Rect {
        let (half_w, half_h) = (width / 2.0, height / 2.0);
        match self {
            Quadrant::Left => Rect { x: 0.0, y: 0.0, width: half_w, height },
            Quadrant::Top => Rect { x: 0.0, y: 0.0, width, height: half_h },
            Quadrant::Right => Rect { x: half_w, y: 0.0, width: half_w, height },
            Quadrant::Bottom => Rect { x: 0.0, y: half_h, width, height: half_h },
        }
    }

    /// Whether the normalized point (u, v) lies in this quadrant's triangle,
    /// boundary included. Both diagonals are evaluated once and shared by
    /// their two neighbours, so no point of the unit square falls between
    /// triangles.
    fn contains(self, u: f64, v: f64) -> bool {
        let sum = u + v;
        match self {
            Quadrant::Left => u <= v && sum <= 1.0,
            Quadrant::Top => v <= u && sum <= 1.0,
            Quadrant::Right => u >= v && sum >= 1.0,
            Quadrant::Bottom => v >= u && sum >= 1.0,
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Quadrant::Left => "left",
            Quadrant::Top => "top",
            Quadrant::Right => "right",
            Quadrant::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Resolve which quadrant of a `width` x `height` widget contains (x, y).
///
/// The point is normalized to the unit square first, which turns both
/// diagonals into exact comparisons (`u == v` and `u + v == 1`). Quadrants
/// are tested in the order left, top, right, bottom; points shared by two
/// triangles (the diagonals, the center) go to the first one. A point outside
/// the widget, or any point of an empty widget, resolves to
/// [`Quadrant::Left`].
pub fn resolve_quadrant(x: f64, y: f64, width: f64, height: f64) -> Quadrant {
    let inside = width > 0.0 && height > 0.0 && (0.0..=width).contains(&x) && (0.0..=height).contains(&y);
    if !inside {
        warn!("No drop quadrant for ({}, {}) in {}x{}, defaulting to left", x, y, width, height);
        return Quadrant::Left;
    }
    let (u, v) = (x / width, y / height);
    Quadrant::ALL
        .into_iter()
        .find(|q| q.contains(u, v))
        .unwrap_or(Quadrant::Left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_edge_midpoints_resolve_to_their_side() {
        let (w, h) = (400.0, 300.0);
        assert_eq!(resolve_quadrant(1.0, h / 2.0, w, h), Quadrant::Left);
        assert_eq!(resolve_quadrant(w / 2.0, 1.0, w, h), Quadrant::Top);
        assert_eq!(resolve_quadrant(w - 1.0, h / 2.0, w, h), Quadrant::Right);
        assert_eq!(resolve_quadrant(w / 2.0, h - 1.0, w, h), Quadrant::Bottom);
    }

    #[test]
    fn test_ties_go_to_first_quadrant_in_order() {
        let (w, h) = (200.0, 200.0);
        // Center belongs to every triangle
        assert_eq!(resolve_quadrant(100.0, 100.0, w, h), Quadrant::Left);
        // Top-left diagonal is shared by left and top
        assert_eq!(resolve_quadrant(50.0, 50.0, w, h), Quadrant::Left);
        // Top-right diagonal is shared by top and right
        assert_eq!(resolve_quadrant(150.0, 50.0, w, h), Quadrant::Top);
        // Bottom-right diagonal is shared by right and bottom
        assert_eq!(resolve_quadrant(150.0, 150.0, w, h), Quadrant::Right);
    }

    #[test]
    fn test_outside_point_falls_back_to_left() {
        assert_eq!(resolve_quadrant(-10.0, 500.0, 100.0, 100.0), Quadrant::Left);
        assert_eq!(resolve_quadrant(5.0, 5.0, 0.0, 0.0), Quadrant::Left);
    }

    #[test]
    fn test_random_interior_points_belong_to_exactly_one_quadrant() {
        let mut rng = rand::rng();
        for _ in 0..2000 {
            let w: f64 = rng.random_range(10.0..2000.0);
            let h: f64 = rng.random_range(10.0..2000.0);
            let x: f64 = rng.random_range(0.0..w);
            let y: f64 = rng.random_range(0.0..h);

            let (u, v) = (x / w, y / h);
            let hits = Quadrant::ALL.iter().filter(|q| q.contains(u, v)).count();
            assert!(hits >= 1, "({x}, {y}) in {w}x{h} is in no quadrant");
            let on_diagonal = u == v || u + v == 1.0;
            if !on_diagonal {
                assert_eq!(hits, 1, "({x}, {y}) in {w}x{h}");
            }

            let first = resolve_quadrant(x, y, w, h);
            assert!(first.contains(u, v));
            assert_eq!(first, resolve_quadrant(x, y, w, h));
        }
    }

    #[test]
    fn test_points_along_top_right_diagonal_stay_top_or_right() {
        let (w, h) = (1969.2, 284.4);
        assert_eq!(resolve_quadrant(1882.947, 12.460, w, h), Quadrant::Right);

        let mut rng = rand::rng();
        for _ in 0..200_000 {
            let t: f64 = rng.random_range(0.0..0.5);
            let q = resolve_quadrant(w * (1.0 - t), h * t, w, h);
            assert!(matches!(q, Quadrant::Top | Quadrant::Right), "t = {t} resolved to {q}");
        }
    }

    #[test]
    fn test_fractional_sizes_cover_every_point_near_the_diagonals() {
        let mut rng = rand::rng();
        for _ in 0..50_000 {
            let w: f64 = rng.random_range(10.0..4000.0);
            let h: f64 = rng.random_range(10.0..4000.0);
            let t: f64 = rng.random_range(0.0..1.0);
            let nudge: f64 = rng.random_range(-1e-9..1e-9);
            for (x, y) in [(w * t, h * (t + nudge)), (w * (1.0 - t), h * (t + nudge))] {
                if !(0.0..=w).contains(&x) || !(0.0..=h).contains(&y) {
                    continue;
                }
                let (u, v) = (x / w, y / h);
                assert!(Quadrant::ALL.iter().any(|q| q.contains(u, v)), "({x}, {y}) in {w}x{h}");
            }
        }
    }

    #[test]
    fn test_near_center_is_stable() {
        let (w, h) = (640.0, 480.0);
        for (dx, dy) in [(-0.5, 0.0), (0.0, -0.5), (0.5, 0.0), (0.0, 0.5)] {
            let q = resolve_quadrant(320.0 + dx, 240.0 + dy, w, h);
            for _ in 0..10 {
                assert_eq!(resolve_quadrant(320.0 + dx, 240.0 + dy, w, h), q);
            }
        }
        assert_eq!(resolve_quadrant(320.5, 240.0, w, h), Quadrant::Right);
        assert_eq!(resolve_quadrant(320.0, 240.5, w, h), Quadrant::Bottom);
    }

    #[test]
    fn test_highlight_rect_covers_half() {
        let r = Quadrant::Right.highlight_rect(100.0, 50.0);
        assert_eq!(r, Rect { x: 50.0, y: 0.0, width: 50.0, height: 50.0 });
        let b = Quadrant::Bottom.highlight_rect(100.0, 50.0);
        assert_eq!(b, Rect { x: 0.0, y: 25.0, width: 100.0, height: 25.0 });
    }

    #[test]
    fn test_orientation_and_insertion_side() {
        assert_eq!(Quadrant::Left.orientation(), Orientation::Horizontal);
        assert_eq!(Quadrant::Bottom.orientation(), Orientation::Vertical);
        assert!(Quadrant::Top.inserts_before());
        assert!(!Quadrant::Right.inserts_before());
    }
}
