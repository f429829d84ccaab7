//! The byte-driven TIC decoder.
//!
//! `Decoder<R, D>` owns a small buffered byte source over `R` (the same
//! chunked-`Read` pattern as the rest of this crate's ancestry) and drives
//! a label/separator/horodate/data state machine one byte at a time. Two
//! concerns are kept logically separate within the one state machine:
//! lexical recognition (matching a run of bytes against the active
//! dialect's label table, recognizing control bytes) and dataset assembly
//! (tracking which sub-field comes next, accumulating the running
//! checksum, building the final [`Field`]). Splitting them into separate
//! types would only add an indirection this protocol's grammar doesn't
//! need, since a dataset is a straight-line sequence, not a tree.

use std::io::{self, Read};
use std::marker::PhantomData;

use crate::dialect::Dialect;
use crate::error::DatasetError;
use crate::etiquette::{DataType, Etiquette};
use crate::field::{Field, Payload};

const STX: u8 = 0x02;
const ETX: u8 = 0x03;
const EOT: u8 = 0x04;
const LF: u8 = 0x0A;
const CR: u8 = 0x0D;

/// One unit of decoding progress: either a fully decoded dataset, a
/// dataset that failed and was dropped, or a frame boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A dataset decoded and checksum-verified cleanly.
    Field(Field),
    /// A dataset was dropped; the enclosing frame is now invalid.
    DatasetError(DatasetError),
    /// The frame ended. `valid` mirrors whether every dataset inside it
    /// decoded cleanly (false if the frame was aborted by `EOT`, or if any
    /// dataset failed).
    FrameEnd { valid: bool },
}

/// Receives decoded output as the decoder drives it: one `print_field` call
/// per clean dataset, `frame_sep` once per closed frame, `frame_err` at most
/// once per invalid frame.
pub trait Sink {
    fn print_field(&mut self, field: &Field);
    fn frame_sep(&mut self);
    fn frame_err(&mut self);
}

#[derive(Debug)]
enum Phase {
    /// Between frames; only `STX` is meaningful.
    Outside,
    /// Inside a frame, waiting for the next dataset's `LF` (or `ETX`/`EOT`).
    Initial,
    /// Accumulating a label's bytes, up to the separator.
    Label { buf: Vec<u8> },
    /// Accumulating a fixed-length horodate.
    Horodate { etiq: &'static Etiquette, buf: Vec<u8> },
    /// Horodate complete; the very next byte must be the separator.
    HorodateSep { etiq: &'static Etiquette, horodate: String },
    /// Accumulating the data field, up to the separator.
    Data { etiq: &'static Etiquette, horodate: Option<String>, buf: Vec<u8> },
    /// Waiting for the single checksum byte.
    Checksum { etiq: &'static Etiquette, horodate: Option<String>, data: Vec<u8> },
    /// Checksum byte read; the next byte must be `CR`.
    AwaitCr {
        etiq: &'static Etiquette,
        horodate: Option<String>,
        data: Vec<u8>,
        checksum: u8,
    },
    /// Resynchronizing after a dataset error: discard bytes until `LF`.
    Resync,
}

struct ByteSource<R: Read> {
    reader: R,
    chunk: [u8; 256],
    pos: usize,
    len: usize,
}

impl<R: Read> ByteSource<R> {
    fn new(reader: R) -> Self {
        ByteSource { reader, chunk: [0; 256], pos: 0, len: 0 }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.pos >= self.len {
            self.len = self.reader.read(&mut self.chunk)?;
            self.pos = 0;
            if self.len == 0 {
                return Ok(None);
            }
        }
        let b = self.chunk[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }
}

/// Streaming TIC decoder over a byte source `R`, fixed to dialect `D` for
/// its whole lifetime.
pub struct Decoder<R: Read, D: Dialect> {
    source: ByteSource<R>,
    phase: Phase,
    sum: u8,
    frame_invalid: bool,
    _dialect: PhantomData<D>,
}

impl<R: Read, D: Dialect> Decoder<R, D> {
    pub fn new(reader: R) -> Self {
        Decoder {
            source: ByteSource::new(reader),
            phase: Phase::Outside,
            sum: 0,
            frame_invalid: false,
            _dialect: PhantomData,
        }
    }

    /// Pulls the next event, or `Ok(None)` at end of stream.
    pub fn next_event(&mut self) -> io::Result<Option<Event>> {
        loop {
            let byte = match self.source.next_byte()? {
                Some(b) => b,
                None => return Ok(None),
            };
            if let Some(event) = self.push(byte) {
                return Ok(Some(event));
            }
        }
    }

    /// Drains the decoder, routing every event into `sink` per the sink
    /// contract: one `print_field` per clean dataset, `frame_err` at most
    /// once per invalid frame, `frame_sep` once per closed frame.
    pub fn run(&mut self, sink: &mut impl Sink) -> io::Result<()> {
        let mut notified_err = false;
        while let Some(event) = self.next_event()? {
            match event {
                Event::Field(field) => sink.print_field(&field),
                Event::DatasetError(e) => {
                    log::warn!("dropping dataset: {e}");
                    if !notified_err {
                        sink.frame_err();
                        notified_err = true;
                    }
                }
                Event::FrameEnd { valid } => {
                    if !valid && !notified_err {
                        sink.frame_err();
                    }
                    sink.frame_sep();
                    notified_err = false;
                }
            }
        }
        Ok(())
    }

    fn push(&mut self, byte: u8) -> Option<Event> {
        match byte {
            STX => {
                let truncated = !matches!(self.phase, Phase::Outside | Phase::Initial);
                self.phase = Phase::Initial;
                self.sum = 0;
                self.frame_invalid = false;
                if truncated {
                    self.frame_invalid = true;
                    return Some(Event::DatasetError(DatasetError::Truncated));
                }
                None
            }
            ETX => {
                let truncated = matches!(
                    self.phase,
                    Phase::Label { .. }
                        | Phase::Horodate { .. }
                        | Phase::HorodateSep { .. }
                        | Phase::Data { .. }
                        | Phase::Checksum { .. }
                        | Phase::AwaitCr { .. }
                );
                if truncated {
                    self.frame_invalid = true;
                }
                let valid = !self.frame_invalid;
                self.phase = Phase::Outside;
                self.frame_invalid = false;
                Some(Event::FrameEnd { valid })
            }
            EOT if D::SUPPORTS_EOT => {
                self.phase = Phase::Outside;
                self.frame_invalid = false;
                Some(Event::FrameEnd { valid: false })
            }
            LF => {
                let truncated = matches!(
                    self.phase,
                    Phase::Label { .. }
                        | Phase::Horodate { .. }
                        | Phase::HorodateSep { .. }
                        | Phase::Data { .. }
                        | Phase::Checksum { .. }
                        | Phase::AwaitCr { .. }
                );
                self.phase = Phase::Label { buf: Vec::with_capacity(8) };
                self.sum = 0;
                if truncated {
                    self.frame_invalid = true;
                    Some(Event::DatasetError(DatasetError::Truncated))
                } else {
                    None
                }
            }
            _ => self.push_inner(byte),
        }
    }

    fn push_inner(&mut self, byte: u8) -> Option<Event> {
        match std::mem::replace(&mut self.phase, Phase::Outside) {
            Phase::Outside => {
                // Bytes outside a frame are discarded.
                self.phase = Phase::Outside;
                None
            }
            Phase::Initial => {
                // Stray byte between datasets; ignore rather than abort the
                // whole frame over noise.
                self.phase = Phase::Initial;
                None
            }
            Phase::Label { mut buf } => {
                if byte == D::SEPARATOR {
                    self.sum = self.sum.wrapping_add(byte);
                    match D::lookup(&buf) {
                        Some(etiq) if etiq.has_horodate => {
                            self.phase = Phase::Horodate { etiq, buf: Vec::with_capacity(D::HORODATE_LEN) };
                            None
                        }
                        Some(etiq) => {
                            self.phase = Phase::Data { etiq, horodate: None, buf: Vec::new() };
                            None
                        }
                        None => {
                            self.phase = Phase::Resync;
                            self.frame_invalid = true;
                            Some(Event::DatasetError(DatasetError::UnknownLabel(buf)))
                        }
                    }
                } else {
                    self.sum = self.sum.wrapping_add(byte);
                    buf.push(byte);
                    self.phase = Phase::Label { buf };
                    None
                }
            }
            Phase::Horodate { etiq, mut buf } => {
                self.sum = self.sum.wrapping_add(byte);
                buf.push(byte);
                if buf.len() == D::HORODATE_LEN {
                    let horodate = String::from_utf8_lossy(&buf).into_owned();
                    self.phase = Phase::HorodateSep { etiq, horodate };
                } else {
                    self.phase = Phase::Horodate { etiq, buf };
                }
                None
            }
            Phase::HorodateSep { etiq, horodate } => {
                if byte == D::SEPARATOR {
                    self.sum = self.sum.wrapping_add(byte);
                    self.phase = Phase::Data { etiq, horodate: Some(horodate), buf: Vec::new() };
                    None
                } else {
                    self.phase = Phase::Resync;
                    self.frame_invalid = true;
                    Some(Event::DatasetError(DatasetError::UnexpectedByte(byte)))
                }
            }
            Phase::Data { etiq, horodate, mut buf } => {
                if byte == D::SEPARATOR {
                    self.sum = self.sum.wrapping_add(byte);
                    self.phase = Phase::Checksum { etiq, horodate, data: buf };
                    None
                } else {
                    self.sum = self.sum.wrapping_add(byte);
                    buf.push(byte);
                    self.phase = Phase::Data { etiq, horodate, buf };
                    None
                }
            }
            Phase::Checksum { etiq, horodate, data } => {
                self.phase = Phase::AwaitCr { etiq, horodate, data, checksum: byte };
                None
            }
            Phase::AwaitCr { etiq, horodate, data, checksum } => {
                if byte != CR {
                    self.phase = Phase::Resync;
                    self.frame_invalid = true;
                    return Some(Event::DatasetError(DatasetError::UnexpectedByte(byte)));
                }
                let mut sum = self.sum;
                if D::COMPENSATE_TRAILING_SEP {
                    sum = sum.wrapping_sub(0x20);
                }
                let computed = (sum & 0x3F) + 0x20;
                self.phase = Phase::Initial;
                if computed != checksum {
                    self.frame_invalid = true;
                    return Some(Event::DatasetError(DatasetError::BadChecksum { computed, wire: checksum }));
                }
                match build_field::<D>(etiq, horodate, data) {
                    Ok(field) => Some(Event::Field(field)),
                    Err(e) => {
                        self.frame_invalid = true;
                        Some(Event::DatasetError(e))
                    }
                }
            }
            Phase::Resync => {
                // LF is handled in `push`; every other byte here is noise
                // from the failed dataset.
                self.phase = Phase::Resync;
                None
            }
        }
    }
}

fn build_field<D: Dialect>(
    etiq: &'static Etiquette,
    horodate: Option<String>,
    data: Vec<u8>,
) -> Result<Field, DatasetError> {
    let (unit, payload) = match etiq.data_type() {
        DataType::String | DataType::Profile => {
            (etiq.unit(), Payload::Str(String::from_utf8_lossy(&data).into_owned()))
        }
        DataType::Ignore => (etiq.unit(), Payload::None),
        DataType::Hex => {
            let s = std::str::from_utf8(&data).map_err(|_| DatasetError::UnexpectedByte(0))?;
            let v = i64::from_str_radix(s.trim(), 16).map_err(|_| DatasetError::UnexpectedByte(0))?;
            (etiq.unit(), Payload::Int(v))
        }
        DataType::Integer => {
            let (unit, digits) = D::reclassify(etiq, &data);
            let s = std::str::from_utf8(&digits).map_err(|_| DatasetError::UnexpectedByte(0))?;
            let v = s.trim().parse::<i64>().map_err(|_| DatasetError::UnexpectedByte(0))?;
            (unit, Payload::Int(v))
        }
    };
    Ok(Field { etiquette: etiq, unit, payload, horodate })
}
