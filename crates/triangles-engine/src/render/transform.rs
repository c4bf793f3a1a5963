use crate::coords::{Mat4, TouchPoint, Viewport};

/// Maps a touch position to a per-axis scale in `[-2, 2]`.
///
/// ```text
/// M[0][0] = tx / w * 4 - 2
/// M[1][1] = ty / h * 4 - 2
/// M[2][2] = 0
/// M[3][3] = 1
/// ```
///
/// Every other entry is zero, so the vertex stage scales (and may flip) the
/// triangle rather than moving it. Returns `None` for a viewport that cannot
/// be divided by.
pub fn scan_matrix(touch: TouchPoint, viewport: Viewport) -> Option<Mat4> {
    if !viewport.is_valid() {
        return None;
    }
    let sx = touch.x / viewport.width * 4.0 - 2.0;
    let sy = touch.y / viewport.height * 4.0 - 2.0;
    Some(Mat4::from_diagonal(sx, sy, 0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_scan(m: &Mat4, sx: f32, sy: f32) {
        for col in 0..4 {
            for row in 0..4 {
                let expected = match (col, row) {
                    (0, 0) => sx,
                    (1, 1) => sy,
                    (3, 3) => 1.0,
                    _ => 0.0,
                };
                let got = m.get(col, row);
                assert!(
                    (got - expected).abs() < EPS,
                    "M[{col}][{row}] = {got}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn matches_formula_across_samples() {
        let viewports = [(320.0, 480.0), (1.0, 1.0), (1920.0, 1080.0), (0.5, 7.25)];
        for (w, h) in viewports {
            for (fx, fy) in [(0.0, 0.0), (0.1, 0.9), (0.5, 0.5), (0.75, 0.2), (1.0, 1.0), (1.3, -0.4)] {
                let (tx, ty) = (w * fx, h * fy);
                let m = scan_matrix(TouchPoint::new(tx, ty), Viewport::new(w, h)).unwrap();
                assert_scan(&m, tx / w * 4.0 - 2.0, ty / h * 4.0 - 2.0);
            }
        }
    }

    #[test]
    fn default_touch_scales_by_two_thirds() {
        let vp = Viewport::new(360.0, 640.0);
        let m = scan_matrix(vp.default_touch(), vp).unwrap();
        assert_scan(&m, 4.0 / 1.5 - 2.0, 4.0 / 1.5 - 2.0);
        assert!((m.get(0, 0) - 0.6667).abs() < 1e-3);
    }

    #[test]
    fn corners_map_to_extremes() {
        let vp = Viewport::new(200.0, 100.0);
        let origin = scan_matrix(TouchPoint::new(0.0, 0.0), vp).unwrap();
        assert_scan(&origin, -2.0, -2.0);
        let far = scan_matrix(TouchPoint::new(200.0, 100.0), vp).unwrap();
        assert_scan(&far, 2.0, 2.0);
    }

    #[test]
    fn centre_collapses_triangle() {
        let vp = Viewport::new(200.0, 100.0);
        let m = scan_matrix(TouchPoint::new(100.0, 50.0), vp).unwrap();
        assert_scan(&m, 0.0, 0.0);
    }

    #[test]
    fn zero_viewport_yields_nothing() {
        assert!(scan_matrix(TouchPoint::new(1.0, 1.0), Viewport::new(0.0, 100.0)).is_none());
        assert!(scan_matrix(TouchPoint::new(1.0, 1.0), Viewport::default()).is_none());
    }
}
