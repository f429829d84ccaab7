//! Decoder for the day-profile fields (`PJOURF+1`, `PPOINTE`).
//!
//! Like [`crate::stge`], this is a content-addressable transformation a
//! sink applies on demand (the CLI's `-p` flag) to an already-decoded
//! string [`Field`](crate::field::Field); the decoder itself just hands
//! the raw string through.

use thiserror::Error;

/// One change-point in a day's schedule: the action code becomes active at
/// `start_time` (`"HH:MM"`) and holds until the next entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayProfileEntry {
    pub start_time: String,
    pub action: u16,
}

/// A day-profile string with no `NONUTILE` terminator, or a malformed
/// 8-character block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PjourfError {
    #[error("day-profile block has the wrong length")]
    BadBlockLength,
    #[error("day-profile block is not a valid HHMMSSSS token")]
    BadBlock,
}

/// Up to 11 `HHMMSSSS` blocks before the terminating `NONUTILE` token.
const MAX_ENTRIES: usize = 11;

/// Decodes a day-profile payload into its change-point schedule. Stops at
/// the first `NONUTILE` token; a malformed stream with no `NONUTILE` is
/// still bounded by `MAX_ENTRIES`.
pub fn decode(payload: &str) -> Result<Vec<DayProfileEntry>, PjourfError> {
    let mut entries = Vec::new();
    for token in payload.split_ascii_whitespace() {
        if token == "NONUTILE" {
            break;
        }
        if entries.len() >= MAX_ENTRIES {
            break;
        }
        entries.push(decode_block(token)?);
    }
    Ok(entries)
}

fn decode_block(token: &str) -> Result<DayProfileEntry, PjourfError> {
    if token.len() != 8 || !token.is_ascii() {
        return Err(PjourfError::BadBlockLength);
    }
    let bytes = token.as_bytes();
    let hh = &token[0..2];
    let mm = &token[2..4];
    if !hh.bytes().all(|b| b.is_ascii_digit()) || !mm.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PjourfError::BadBlock);
    }
    let action = u16::from_str_radix(std::str::from_utf8(&bytes[4..8]).unwrap(), 16)
        .map_err(|_| PjourfError::BadBlock)?;
    Ok(DayProfileEntry { start_time: format!("{hh}:{mm}"), action })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_three_change_points() {
        let entries = decode("00004003 06004004 22004003 NONUTILE NONUTILE").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], DayProfileEntry { start_time: "00:00".into(), action: 16387 });
        assert_eq!(entries[1], DayProfileEntry { start_time: "06:00".into(), action: 16388 });
        assert_eq!(entries[2], DayProfileEntry { start_time: "22:00".into(), action: 16387 });
    }

    #[test]
    fn empty_schedule_is_just_nonutile() {
        let entries = decode("NONUTILE").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn rejects_a_short_block() {
        assert_eq!(decode("0000").unwrap_err(), PjourfError::BadBlockLength);
    }

    #[test]
    fn caps_at_max_entries_with_no_terminator() {
        let payload = std::iter::repeat("00004003").take(20).collect::<Vec<_>>().join(" ");
        let entries = decode(&payload).unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
    }
}
