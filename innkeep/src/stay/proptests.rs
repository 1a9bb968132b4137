//! Property-based tests for the `StayRange` type.

use super::StayRange;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

// Strategy for generating arbitrary calendar dates within a few years.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..2000).prop_map(|offset| base_date().checked_add_days(Days::new(offset)).unwrap())
}

// Strategy for generating valid stay ranges (1 to 60 nights).
fn stay_strategy() -> impl Strategy<Value = StayRange> {
    (0u64..2000, 1u64..60).prop_map(|(start, nights)| {
        let check_in = base_date().checked_add_days(Days::new(start)).unwrap();
        let check_out = check_in.checked_add_days(Days::new(nights)).unwrap();
        StayRange::new(check_in, check_out).unwrap()
    })
}

proptest! {
    // Construction accepts exactly the strictly-ordered date pairs.
    #[test]
    fn construction_requires_strict_order(a in date_strategy(), b in date_strategy()) {
        let result = StayRange::new(a, b);
        if a < b {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }

    // Every constructible stay covers at least one night.
    #[test]
    fn nights_is_positive(stay in stay_strategy()) {
        prop_assert!(stay.nights() >= 1);
    }

    // Overlap is symmetric.
    #[test]
    fn overlap_is_symmetric(a in stay_strategy(), b in stay_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    // A stay always overlaps itself.
    #[test]
    fn overlap_is_reflexive(stay in stay_strategy()) {
        prop_assert!(stay.overlaps(&stay));
    }

    // Back-to-back stays share no night.
    #[test]
    fn touching_stays_never_overlap(stay in stay_strategy(), nights in 1u64..60) {
        let next_out = stay.check_out().checked_add_days(Days::new(nights)).unwrap();
        let next = StayRange::new(stay.check_out(), next_out).unwrap();
        prop_assert!(!stay.overlaps(&next));
        prop_assert!(!next.overlaps(&stay));
    }

    // Two stays overlap exactly when some night is shared.
    #[test]
    fn overlap_matches_shared_night(a in stay_strategy(), b in stay_strategy()) {
        let mut shared = false;
        let mut date = a.check_in();
        while date < a.check_out() {
            if b.contains(date) {
                shared = true;
                break;
            }
            date = date.checked_add_days(Days::new(1)).unwrap();
        }
        prop_assert_eq!(a.overlaps(&b), shared);
    }
}
