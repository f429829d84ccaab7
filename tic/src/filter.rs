//! Configuration preloader: parses a `#ticfilter` allow-list file into a
//! per-dialect bitmap of permitted tag ids.
//!
//! A filter file isn't TIC-framed data (no `STX`/`ETX`, no checksums),
//! just a `#ticfilter` marker line followed by whitespace-separated
//! labels, one allow-listed tag per token. Reusing label lookup (the same
//! table [`Dialect::lookup`] uses) is the part of the scanner worth
//! sharing here; fabricating synthetic frame bytes just to drive the full
//! dataset state machine over a file that was never TIC-framed in the
//! first place would be a worse fit than calling the lookup directly.

use crate::dialect::Dialect;
use crate::error::ConfigError;

const MARKER: &str = "#ticfilter";

/// A dense allow-list bitmap, one bit per `tag_id` in the active dialect.
#[derive(Debug, Clone)]
pub struct FilterBitmap {
    bits: Vec<bool>,
}

impl FilterBitmap {
    fn empty(n_tags: usize) -> Self {
        FilterBitmap { bits: vec![false; n_tags] }
    }

    fn allow(&mut self, tag_id: u8) {
        if let Some(slot) = self.bits.get_mut(tag_id as usize) {
            *slot = true;
        }
    }

    /// Whether `tag_id` is present in the filter. Labels from a different
    /// dialect than the one the bitmap was built for are simply out of
    /// range and read as not-allowed.
    pub fn is_allowed(&self, tag_id: u8) -> bool {
        self.bits.get(tag_id as usize).copied().unwrap_or(false)
    }
}

/// Parses `bytes` as a `#ticfilter` file for dialect `D`.
pub fn load_filter<D: Dialect>(bytes: &[u8]) -> Result<FilterBitmap, ConfigError> {
    let text = String::from_utf8_lossy(bytes);
    let mut lines = text.lines();
    let marker_line = lines.next().unwrap_or("").trim();
    if marker_line != MARKER {
        return Err(ConfigError::MissingMarker);
    }

    let mut bitmap = FilterBitmap::empty(D::labels().len());
    for token in lines.flat_map(|line| line.split_ascii_whitespace()) {
        match D::lookup(token.as_bytes()) {
            Some(etiq) => bitmap.allow(etiq.tag_id),
            None => return Err(ConfigError::UnknownLabel(token.as_bytes().to_vec())),
        }
    }
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Historique;

    #[test]
    fn loads_a_well_formed_filter() {
        let bitmap = load_filter::<Historique>(b"#ticfilter\nADCO BASE\nPAPP\n").unwrap();
        let adco = Historique::lookup(b"ADCO").unwrap();
        let papp = Historique::lookup(b"PAPP").unwrap();
        let ptec = Historique::lookup(b"PTEC").unwrap();
        assert!(bitmap.is_allowed(adco.tag_id));
        assert!(bitmap.is_allowed(papp.tag_id));
        assert!(!bitmap.is_allowed(ptec.tag_id));
    }

    #[test]
    fn rejects_a_file_with_no_marker() {
        let err = load_filter::<Historique>(b"ADCO BASE\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingMarker));
    }

    #[test]
    fn rejects_a_file_with_an_unrecognized_label() {
        let err = load_filter::<Historique>(b"#ticfilter\nNOTALABEL\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLabel(_)));
    }
}
