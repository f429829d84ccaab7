//! # `tic`
//!
//! A decoder for the French "Télé-Information Client" (TIC) protocol used
//! by Enedis/Linky electricity meters to report metering data over a
//! low-speed serial link.
//!
//! Three incompatible dialects share the wire format's broad shape (an
//! `STX`/`ETX`-framed sequence of checksummed `label SEP data` datasets)
//! but differ in separator byte, label table, and horodate usage:
//!
//! - [`dialect::Historique`] ("historique"), the original single-phase and
//!   three-phase format.
//! - [`dialect::Standard`] ("standard"), the current Linky format, with
//!   horodated instantaneous measurements.
//! - [`dialect::PmePmi`], the PME-PMI commercial/industrial variant.
//!
//! [`Decoder`](decoder::Decoder) is generic over [`dialect::Dialect`], so
//! the dialect is chosen once, at construction, and fixed for the life of
//! the decoder:
//!
//! ```
//! use tic::decoder::{Decoder, Event};
//! use tic::dialect::Historique;
//!
//! let stream: &[u8] = &[/* ... */];
//! let mut decoder = Decoder::<_, Historique>::new(stream);
//! while let Some(event) = decoder.next_event().unwrap() {
//!     match event {
//!         Event::Field(field) => { /* ... */ }
//!         Event::DatasetError(_) | Event::FrameEnd { .. } => { /* ... */ }
//!     }
//! }
//! ```
//!
//! `STGE`'s status register and the `PJOURF+1`/`PPOINTE` day-profile
//! strings are themselves small encodings; [`stge`] and [`pjourf`] decode
//! them on demand from an already-decoded [`Field`](field::Field).

pub mod decoder;
pub mod dialect;
pub mod error;
pub mod etiquette;
pub mod field;
pub mod filter;
pub mod pjourf;
pub mod stge;

pub use decoder::{Decoder, Event, Sink};
pub use error::{ConfigError, DatasetError};
pub use etiquette::{DataType, Etiquette, Unit};
pub use field::{Field, Payload};
pub use filter::{load_filter, FilterBitmap};
