// ABOUTME: Picks hover/pressed ramp steps next to a base step
// ABOUTME: Past the dark end it walks back from the base instead of clamping, so steps stay distinct

use crate::ramp::LAST_INDEX;

/// The `N` steps after `position`, darker first. Candidates past the last step are
/// replaced by `position` minus the overshoot.
pub fn interaction_states<const N: usize>(position: u8) -> [u8; N] {
    std::array::from_fn(|offset| {
        let step = u8::try_from(offset + 1).unwrap_or(u8::MAX);
        let candidate = position.saturating_add(step);
        if candidate > LAST_INDEX {
            position.saturating_sub(candidate - LAST_INDEX)
        } else {
            candidate
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_forward_inside_ramp() {
        assert_eq!(interaction_states::<2>(0), [1, 2]);
        assert_eq!(interaction_states::<2>(6), [7, 8]);
        assert_eq!(interaction_states::<2>(7), [8, 9]);
    }

    #[test]
    fn test_wraps_back_at_dark_end() {
        assert_eq!(interaction_states::<2>(8), [9, 7]);
        assert_eq!(interaction_states::<2>(9), [8, 7]);
        assert_eq!(interaction_states::<3>(8), [9, 7, 6]);
    }

    #[test]
    fn test_states_are_distinct_from_base() {
        for position in 0..=LAST_INDEX {
            let [hovered, pressed] = interaction_states::<2>(position);
            assert_ne!(hovered, pressed);
            assert_ne!(hovered, position);
            assert_ne!(pressed, position);
            assert!(hovered <= LAST_INDEX && pressed <= LAST_INDEX);
        }
    }
}
