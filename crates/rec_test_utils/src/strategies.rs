//! Proptest strategies for recording filenames.

use proptest::prelude::*;

/// A device token as written in filenames.
pub fn arb_device() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Respeck"), Just("Thingy")]
}

/// A status token as written in filenames.
pub fn arb_status() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("clean"), Just("unprocessed")]
}

/// An activity or subtype: letters and inner spaces.
pub fn arb_label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]"
}

/// A `DD-MM-YYYY_HH-MM-SS` suffix (digits only, not necessarily a real date).
pub fn arb_timestamp() -> impl Strategy<Value = String> {
    "[0-9]{2}-[0-9]{2}-[0-9]{4}_[0-9]{2}-[0-9]{2}-[0-9]{2}"
}

/// A filename that follows the naming scheme.
pub fn arb_valid_filename() -> impl Strategy<Value = String> {
    (
        arb_device(),
        1u32..1000,
        arb_label(),
        arb_label(),
        arb_status(),
        arb_timestamp(),
    )
        .prop_map(|(device, id, activity, subtype, status, ts)| {
            format!("{device}_s{id}_{activity}_{subtype}_{status}_{ts}.csv")
        })
}

/// Any short printable filename, mostly not following the scheme.
pub fn arb_any_filename() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,80}",
        "[A-Za-z0-9_ .-]{0,80}",
        arb_valid_filename(),
    ]
}
