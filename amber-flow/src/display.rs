//! Derived display values computed from catalog entries on every read.

/// Whole-number completion percentage, saturating at 100.
///
/// `needed` is positive for every validated catalog entry; a zero `needed`
/// reports 0 instead of dividing by zero.
#[must_use]
pub fn progress_percent(current: u32, needed: u32) -> u8 {
    if needed == 0 {
        return 0;
    }
    let pct = u64::from(current) * 100 / u64::from(needed);
    u8::try_from(pct.min(100)).unwrap_or(100)
}

/// Slots left before `total` is reached, floored at zero.
#[must_use]
pub const fn remaining(total: u32, participants: u32) -> u32 {
    total.saturating_sub(participants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_floors_and_saturates() {
        assert_eq!(progress_percent(342, 500), 68);
        assert_eq!(progress_percent(600, 500), 100);
        assert_eq!(progress_percent(180, 200), 90);
        assert_eq!(progress_percent(0, 50), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(u32::MAX, 1), 100);
        assert_eq!(progress_percent(5, 0), 0);
    }

    #[test]
    fn progress_is_monotonic_in_current() {
        let mut last = 0;
        for current in 0..=750 {
            let pct = progress_percent(current, 500);
            assert!(pct >= last, "progress dropped at {current}");
            last = pct;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn remaining_never_goes_negative() {
        assert_eq!(remaining(50, 45), 5);
        assert_eq!(remaining(50, 50), 0);
        assert_eq!(remaining(50, 80), 0);
    }
}
