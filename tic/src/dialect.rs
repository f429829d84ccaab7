//! Dialect tables and the trait that parameterizes the decoder over them.

use crate::etiquette::{Etiquette, Unit};

/// A single TIC dialect: its separator byte, its framing quirks, and its
/// static label table.
///
/// The three dialects ([`Historique`](crate::dialect::v01::Historique),
/// [`Standard`](crate::dialect::v02::Standard),
/// [`PmePmi`](crate::dialect::v01pme::PmePmi)) are zero-sized marker types;
/// [`Decoder`](crate::decoder::Decoder) is generic over this trait so the
/// dialect is fixed at compile time: one decoder instance never parses
/// more than one dialect.
pub trait Dialect {
    /// `HT` (0x09) for the standard dialect, `SP` (0x20) for historique and
    /// PME-PMI.
    const SEPARATOR: u8;

    /// Whether `EOT` (0x04) is a valid frame terminator for this dialect.
    const SUPPORTS_EOT: bool;

    /// Whether the separator immediately preceding the checksum byte must
    /// be compensated for by subtracting one `0x20` before folding. True
    /// for historique and PME-PMI.
    const COMPENSATE_TRAILING_SEP: bool;

    /// Fixed byte length of a horodate on the wire, for labels with
    /// `has_horodate`. Unused (and irrelevant) for dialects with no
    /// horodate-bearing labels.
    const HORODATE_LEN: usize;

    /// The dialect's static label table, dense tag ids starting at 0.
    fn labels() -> &'static [Etiquette];

    /// Exact-match label lookup.
    fn lookup(label: &[u8]) -> Option<&'static Etiquette> {
        Self::labels().iter().find(|e| e.label.as_bytes() == label)
    }

    /// PME-PMI's trailing-unit-suffix special case: for a
    /// dimensionless numeric label, inspect the last non-whitespace byte
    /// of the payload and reclassify the unit, returning the remaining
    /// digits to parse. Every other dialect (and every non-`SANS` label)
    /// is a no-op.
    fn reclassify(etiq: &Etiquette, data: &[u8]) -> (Unit, Vec<u8>) {
        (etiq.unit(), data.to_vec())
    }
}

pub mod v01;
pub mod v01pme;
pub mod v02;

pub use v01::Historique;
pub use v01pme::PmePmi;
pub use v02::Standard;
