//! Property-based tests for the checksum invariant.
//!
//! These generate arbitrary dataset bodies and verify that a frame built
//! with a correctly computed checksum always decodes to exactly one field,
//! while flipping any single bit of that checksum always surfaces as a
//! `BadChecksum` error and never as a silently accepted dataset.

use proptest::prelude::*;
use tic::decoder::{Decoder, Event};
use tic::dialect::Historique;
use tic::error::DatasetError;

const STX: u8 = 0x02;
const ETX: u8 = 0x03;
const LF: u8 = 0x0A;
const CR: u8 = 0x0D;

/// Strategy for a value that always decodes cleanly under `BASE`'s `Integer`
/// data type: an ASCII run of 1 to 9 decimal digits.
fn valid_index_digits() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9]{1,9}").expect("digit regex is valid")
}

fn checksum(body: &[u8]) -> u8 {
    let sum: u8 = body.iter().fold(0, |acc, b| acc.wrapping_add(*b));
    (sum.wrapping_sub(0x20) & 0x3F) + 0x20
}

fn frame(label: &str, data: &str, checksum_byte: u8) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(label.as_bytes());
    body.push(0x20);
    body.extend_from_slice(data.as_bytes());
    body.push(0x20);
    let mut wire = vec![STX, LF];
    wire.extend(body);
    wire.push(checksum_byte);
    wire.push(CR);
    wire.push(ETX);
    wire
}

fn run(wire: &[u8]) -> Vec<Event> {
    let mut decoder = Decoder::<_, Historique>::new(wire);
    let mut events = Vec::new();
    while let Some(ev) = decoder.next_event().unwrap() {
        events.push(ev);
    }
    events
}

proptest! {
    /// Property: any digit string framed with its correctly computed
    /// checksum decodes to exactly one field carrying that same value.
    #[test]
    fn prop_correct_checksum_always_decodes(data in valid_index_digits()) {
        let mut body = Vec::new();
        body.extend_from_slice(b"BASE");
        body.push(0x20);
        body.extend_from_slice(data.as_bytes());
        body.push(0x20);
        let ck = checksum(&body);
        let wire = frame("BASE", &data, ck);

        let events = run(&wire);
        let fields: Vec<_> = events
            .into_iter()
            .filter_map(|e| if let Event::Field(f) = e { Some(f) } else { None })
            .collect();
        prop_assert_eq!(fields.len(), 1);
        prop_assert_eq!(fields[0].payload.clone(), tic::field::Payload::Int(data.parse().unwrap()));
    }

    /// Property: corrupting the checksum byte by any non-zero delta within
    /// its 6-bit range never produces a field; it is always reported as a
    /// checksum mismatch instead.
    #[test]
    fn prop_corrupted_checksum_never_decodes(data in valid_index_digits(), delta in 1u8..0x3F) {
        let mut body = Vec::new();
        body.extend_from_slice(b"BASE");
        body.push(0x20);
        body.extend_from_slice(data.as_bytes());
        body.push(0x20);
        let ck = checksum(&body);
        let corrupted = 0x20 + (((ck - 0x20) + delta) & 0x3F);
        let wire = frame("BASE", &data, corrupted);

        let events = run(&wire);
        let mut saw_field = false;
        let mut saw_bad_checksum = false;
        for event in events {
            match event {
                Event::Field(_) => saw_field = true,
                Event::DatasetError(DatasetError::BadChecksum { .. }) => saw_bad_checksum = true,
                _ => {}
            }
        }
        prop_assert!(!saw_field);
        prop_assert!(saw_bad_checksum);
    }
}
