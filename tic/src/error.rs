//! Error types returned by the decoder.
//!
//! None of these are fatal to the byte stream: a [`DatasetError`] drops the
//! current dataset, resynchronizes at the next `LF`, and flags the
//! enclosing frame invalid. [`ConfigError`] is the only kind that can abort
//! a run outright, and only at start-up.

use thiserror::Error;

/// A single dataset (one `LF`-delimited record) could not be decoded.
///
/// Non-fatal: the scanner resynchronizes at the next `LF`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The bytes preceding a separator did not match any label in the
    /// active dialect's table.
    #[error("unrecognized label: {0:?}")]
    UnknownLabel(Vec<u8>),

    /// A byte was seen where the grammar allows none (e.g. a second
    /// horodate, or data following a label that forbids it).
    #[error("unexpected byte {0:#04x} in dataset")]
    UnexpectedByte(u8),

    /// The dataset's trailing checksum byte did not match the computed sum.
    #[error("checksum mismatch: computed {computed:#04x}, wire {wire:#04x}")]
    BadChecksum { computed: u8, wire: u8 },

    /// A dataset ended (`LF` seen again, or frame closed) before its
    /// checksum byte was read.
    #[error("dataset truncated before checksum")]
    Truncated,
}

/// Fatal errors, only possible at start-up: no dialect selected,
/// filter file unreadable, or filter file ill-formed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("filter file does not start with the '#ticfilter' marker")]
    MissingMarker,
    #[error("filter file references unrecognized label: {0:?}")]
    UnknownLabel(Vec<u8>),
    #[error("failed to read filter file: {0}")]
    Io(#[from] std::io::Error),
}
