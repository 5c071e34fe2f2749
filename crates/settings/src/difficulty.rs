//! Difficulty scaling shared by the games.

/// Human-readable label for a difficulty level (1..=5).
pub fn difficulty_label(difficulty: u8) -> Option<&'static str> {
    match difficulty {
        1 => Some("Very Easy"),
        2 => Some("Easy"),
        3 => Some("Normal"),
        4 => Some("Hard"),
        5 => Some("Very Hard"),
        _ => None,
    }
}

/// Interpolate a game parameter from the difficulty level.
///
/// `1 → easy`, `3 → normal`, `5 → hard`, linear in between and clamped
/// outside `1..=5`.
pub fn diff_value(difficulty: f64, easy: f64, normal: f64, hard: f64) -> f64 {
    if difficulty <= 1.0 {
        return easy;
    }
    if difficulty >= 5.0 {
        return hard;
    }
    if difficulty <= 3.0 {
        let t = (difficulty - 1.0) / 2.0;
        return easy + (normal - easy) * t;
    }
    let t = (difficulty - 3.0) / 2.0;
    normal + (hard - normal) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn anchors_hit_exact_values() {
        assert_eq!(diff_value(1.0, 10.0, 20.0, 40.0), 10.0);
        assert_eq!(diff_value(3.0, 10.0, 20.0, 40.0), 20.0);
        assert_eq!(diff_value(5.0, 10.0, 20.0, 40.0), 40.0);
        assert_eq!(diff_value(2.0, 10.0, 20.0, 40.0), 15.0);
        assert_eq!(diff_value(4.0, 10.0, 20.0, 40.0), 30.0);
    }

    #[test]
    fn out_of_range_levels_clamp() {
        assert_eq!(diff_value(0.0, 10.0, 20.0, 40.0), 10.0);
        assert_eq!(diff_value(9.0, 10.0, 20.0, 40.0), 40.0);
        assert_eq!(difficulty_label(0), None);
        assert_eq!(difficulty_label(3), Some("Normal"));
    }

    proptest! {
        #[test]
        fn monotone_when_anchors_are_increasing(a in 1.0f64..5.0, b in 1.0f64..5.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(diff_value(lo, 1.0, 2.0, 4.0) <= diff_value(hi, 1.0, 2.0, 4.0));
        }
    }
}
