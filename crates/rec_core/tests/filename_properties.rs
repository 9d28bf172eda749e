//! Property tests for filename decoding.

use proptest::prelude::*;
use rec_core::filename::{parse, RecordingStatus};
use rec_test_utils::strategies::{arb_any_filename, arb_valid_filename};

proptest! {
    /// Decoding either fails or yields a record with every field filled in.
    #[test]
    fn prop_parse_is_all_or_nothing(name in arb_any_filename()) {
        if let Ok(parsed) = parse(&name) {
            prop_assert!(!parsed.subject_id.is_empty());
            prop_assert!(!parsed.activity.is_empty());
            prop_assert!(!parsed.subtype.is_empty());
            prop_assert!(!parsed.timestamp.is_empty());
            prop_assert_eq!(parsed.with_status(parsed.status), name);
        }
    }

    /// Well-formed names always decode and rebuild to themselves.
    #[test]
    fn prop_valid_names_round_trip(name in arb_valid_filename()) {
        let parsed = parse(&name);
        prop_assert!(parsed.is_ok(), "{} failed: {:?}", name, parsed);
        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.with_status(parsed.status), name.clone());

        let partner = parse(&parsed.counterpart_name()).unwrap();
        prop_assert_eq!(partner.status, parsed.status.counterpart());
        prop_assert_eq!(partner.counterpart_name(), name);
    }

    /// Names with fewer than five underscore fields never decode.
    #[test]
    fn prop_short_names_rejected(fields in prop::collection::vec("[A-Za-z0-9 .]{1,10}", 1..5)) {
        let name = fields.join("_");
        prop_assert!(parse(&name).is_err());
    }
}

#[test]
fn test_status_counterpart_is_involution() {
    for status in [RecordingStatus::Clean, RecordingStatus::Unprocessed] {
        assert_eq!(status.counterpart().counterpart(), status);
        assert_ne!(status.counterpart(), status);
    }
}
