//! Animation easing curves.
//!
//! Pure curves over `t` in `[0, 1]`; the viewer samples them per frame for
//! tile pops and pile shifts.

/// Overshooting ease-out (the classic "back" curve).
pub fn back_out(t: f64) -> f64 {
    const C1: f64 = 1.70158;
    const C3: f64 = C1 + 1.0;
    let u = t - 1.0;
    1.0 + C3 * u * u * u + C1 * u * u
}

/// Quadratic ease-out.
pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Arc profile for a tile hop: zero at both ends, peaking mid-flight.
pub fn pop_height(t: f64) -> f64 {
    (t * std::f64::consts::PI).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_out_endpoints() {
        assert!((back_out(0.0)).abs() < 1e-12);
        assert!((back_out(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_back_out_overshoots() {
        // the curve exceeds 1.0 before settling
        assert!(back_out(0.8) > 1.0);
    }

    #[test]
    fn test_ease_out_quad_shape() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert!(ease_out_quad(0.5) > 0.5);
    }

    #[test]
    fn test_pop_height_arc() {
        assert!(pop_height(0.0).abs() < 1e-12);
        assert!(pop_height(1.0).abs() < 1e-12);
        assert!((pop_height(0.5) - 1.0).abs() < 1e-12);
    }
}
