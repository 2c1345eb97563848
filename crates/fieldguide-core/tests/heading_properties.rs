//! Property tests for heading normalization

use fieldguide_core::{heading_between, normalize_heading, ABLine, Point};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalized_heading_always_in_range(raw in -1.0e6f64..1.0e6) {
        let h = normalize_heading(raw);
        prop_assert!((0.0..360.0).contains(&h), "{} -> {}", raw, h);
    }

    #[test]
    fn abline_updates_stay_in_range(start in 0.0f64..360.0, delta in -5000.0f64..5000.0) {
        let mut line = ABLine::new("ab", Point::ORIGIN, Point::ORIGIN, start, 10.0);
        line.set_heading(line.heading + delta);
        prop_assert!((0.0..360.0).contains(&line.heading));
    }

    #[test]
    fn heading_between_in_range(x in -1.0e4f64..1.0e4, y in -1.0e4f64..1.0e4) {
        if let Some(h) = heading_between(Point::ORIGIN, Point::new(x, y)) {
            prop_assert!((0.0..360.0).contains(&h));
        }
    }
}
