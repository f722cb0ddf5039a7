use proptest::prelude::*;

use oig_types::{AccountName, Asset, BallotId, Symbol, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(tb.has_passed(ta), a >= b);
    }

    /// Any name drawn from the ledger alphabet parses; uppercase never does.
    #[test]
    fn account_name_alphabet(raw in "[a-z][a-z1-5]{0,11}") {
        prop_assert!(AccountName::parse(raw.clone()).is_ok());
        prop_assert!(AccountName::parse(raw.to_uppercase()).is_err());
    }

    /// Digits outside 1-5 are not part of the ledger alphabet.
    #[test]
    fn account_name_digit_range(prefix in "[a-z]{1,6}", digit in "[06-9]") {
        let name = format!("{}{}", prefix, digit);
        prop_assert!(AccountName::parse(name).is_err());
    }

    /// Names longer than twelve characters are rejected.
    #[test]
    fn account_name_length_limit(raw in "[a-z]{13,30}") {
        prop_assert!(AccountName::parse(raw).is_err());
    }

    /// Stepping a ballot id forward then back returns the original id.
    #[test]
    fn ballot_id_rollback(raw in 0u64..u64::MAX) {
        let id = BallotId::new(raw);
        let next = id.next().unwrap();
        prop_assert!(next > id);
        prop_assert_eq!(next.prev(), Some(id));
    }

    /// Asset display output parses back to the same quantity.
    #[test]
    fn asset_display_parses_back(amount in 0u64..u64::MAX, precision in 0u8..=8) {
        let symbol = Symbol::new(precision, "WAX").unwrap();
        let asset = Asset::new(amount, symbol);
        let parsed: Asset = asset.to_string().parse().unwrap();
        prop_assert_eq!(parsed, asset);
    }
}

#[test]
fn ballot_id_counter_bounds() {
    assert_eq!(BallotId::ZERO.prev(), None);
    assert_eq!(BallotId::new(u64::MAX).next(), None);
}
