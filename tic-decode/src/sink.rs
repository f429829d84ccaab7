//! The JSON sink: buffers one frame's worth of fields, then serializes the
//! whole frame as either a JSON array (list mode) or a JSON object keyed by
//! label (dict mode).

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use tic::field::Payload;
use tic::{Field, FilterBitmap};

/// Output shape for a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Dict,
}

#[derive(Serialize)]
struct ListEntry {
    label: &'static str,
    data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    horodate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    desc: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

/// Knobs controlling what the sink keeps and how it renders it, mirroring
/// the CLI's output-modifier flags (spec §6).
pub struct SinkConfig {
    pub mode: Mode,
    /// `-r`: re-render horodates as ISO-8601 instead of echoing them verbatim.
    pub iso_date: bool,
    /// `-l`: include each field's description and unit.
    pub show_meta: bool,
    /// `-n`: one JSON object per field, one per line, instead of one array
    /// per frame. List mode only.
    pub one_per_line: bool,
    pub decode_profile: bool,
    pub decode_stge: bool,
    pub zero_mask: bool,
    pub filter: Option<FilterBitmap>,
    pub id: Option<String>,
    /// Emit only every Nth frame (1 = every frame).
    pub sample: u32,
}

pub struct JsonSink<W: Write> {
    config: SinkConfig,
    out: W,
    fields: Vec<Field>,
    frame_invalid: bool,
    frame_count: u32,
}

impl<W: Write> JsonSink<W> {
    pub fn new(config: SinkConfig, out: W) -> Self {
        JsonSink { config, out, fields: Vec::new(), frame_invalid: false, frame_count: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn accepted(&self, field: &Field) -> bool {
        if let Some(filter) = &self.config.filter {
            if !filter.is_allowed(field.etiquette.tag_id) {
                return false;
            }
        }
        if matches!(field.payload, Payload::None) {
            return false;
        }
        if self.config.zero_mask {
            if let Payload::Int(0) = field.payload {
                return false;
            }
        }
        true
    }

    fn payload_value(&self, field: &Field) -> Value {
        match &field.payload {
            Payload::Str(s)
                if self.config.decode_profile
                    && (field.etiquette.label.starts_with("PJOURF") || field.etiquette.label == "PPOINTE") =>
            {
                match tic::pjourf::decode(s) {
                    Ok(entries) => serde_json::to_value(entries).unwrap_or(Value::Null),
                    Err(_) => Value::String(s.clone()),
                }
            }
            Payload::Str(s) => Value::String(s.clone()),
            Payload::Int(v) if self.config.decode_stge && field.etiquette.label == "STGE" => {
                let stge = tic::stge::Stge::decode(*v as u32);
                serde_json::to_value(stge).unwrap_or(Value::Null)
            }
            Payload::Int(v) => Value::Number((*v).into()),
            Payload::None => Value::Null,
        }
    }

    fn horodate_value(&self, field: &Field) -> Option<String> {
        field.horodate.as_ref().map(|h| {
            if self.config.iso_date {
                format_horodate(h).unwrap_or_else(|| h.clone())
            } else {
                h.clone()
            }
        })
    }

    fn list_entry(&self, f: &Field) -> ListEntry {
        ListEntry {
            label: f.label(),
            data: self.payload_value(f),
            horodate: self.horodate_value(f),
            desc: if self.config.show_meta { Some(f.etiquette.description) } else { None },
            unit: if self.config.show_meta { Some(f.unit.as_str()) } else { None },
            id: self.config.id.clone(),
        }
    }

    fn flush_frame(&mut self) {
        self.frame_count += 1;
        let emit = self.config.sample <= 1 || self.frame_count % self.config.sample == 0;
        if emit {
            match self.config.mode {
                Mode::List => self.flush_list(),
                Mode::Dict => self.flush_dict(),
            }
        }
        self.fields.clear();
        self.frame_invalid = false;
    }

    fn flush_list(&mut self) {
        if self.config.one_per_line {
            for field in self.fields.iter().filter(|f| self.accepted(f)) {
                let entry = self.list_entry(field);
                let _ = writeln!(self.out, "{}", serde_json::to_string(&entry).unwrap_or_default());
            }
            return;
        }
        let entries: Vec<ListEntry> =
            self.fields.iter().filter(|f| self.accepted(f)).map(|f| self.list_entry(f)).collect();
        let _ = writeln!(self.out, "{}", serde_json::to_string(&entries).unwrap_or_default());
    }

    fn flush_dict(&mut self) {
        let mut map = Map::new();
        for field in self.fields.iter().filter(|f| self.accepted(f)) {
            let mut obj = Map::new();
            obj.insert("data".into(), self.payload_value(field));
            if let Some(h) = self.horodate_value(field) {
                obj.insert("horodate".into(), Value::String(h));
            }
            if self.config.show_meta {
                obj.insert("desc".into(), Value::String(field.etiquette.description.into()));
                obj.insert("unit".into(), Value::String(field.unit.as_str().into()));
            }
            if let Some(id) = &self.config.id {
                obj.insert("id".into(), Value::String(id.clone()));
            }
            map.insert(field.label().to_string(), Value::Object(obj));
        }
        map.insert("_tvalide".into(), Value::from(if self.frame_invalid { 0 } else { 1 }));
        let _ = writeln!(self.out, "{}", serde_json::to_string(&Value::Object(map)).unwrap_or_default());
    }
}

impl<W: Write> tic::Sink for JsonSink<W> {
    fn print_field(&mut self, field: &Field) {
        self.fields.push(field.clone());
    }

    fn frame_sep(&mut self) {
        self.flush_frame();
    }

    fn frame_err(&mut self) {
        self.frame_invalid = true;
    }
}

/// Re-renders a dialect-specific horodate as ISO-8601.
///
/// V02: one season byte (`E`/`e` été/summer → `+02:00`, `H`/`h`
/// hiver/winter → `+01:00`, ` ` unknown → no offset) followed by
/// `YYMMDDHHMMSS`. Lowercase marks a degraded/unsynced clock but carries
/// the same offset as its uppercase counterpart. V01PME: `"15/07/21
/// 14:30:12"` → no offset (the format carries no DST hint).
fn format_horodate(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let season = chars.next()?;
    let rest = chars.as_str();
    if matches!(season, 'E' | 'e' | 'H' | 'h' | ' ') && rest.len() == 12 {
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let offset = match season {
            'E' | 'e' => "+02:00",
            'H' | 'h' => "+01:00",
            _ => "",
        };
        let (yy, rest) = rest.split_at(2);
        let (mm, rest) = rest.split_at(2);
        let (dd, rest) = rest.split_at(2);
        let (hh, rest) = rest.split_at(2);
        let (mi, ss) = rest.split_at(2);
        let year: i32 = yy.parse().ok()?;
        let _ = NaiveDate::from_ymd_opt(2000 + year, mm.parse().ok()?, dd.parse().ok()?)?;
        Some(format!("20{yy}-{mm}-{dd}T{hh}:{mi}:{ss}{offset}"))
    } else {
        // "DD/MM/YY HH:MM:SS"
        let bytes = raw.as_bytes();
        if bytes.len() != 17 {
            return None;
        }
        let dd = &raw[0..2];
        let mm = &raw[3..5];
        let yy = &raw[6..8];
        let hh = &raw[9..11];
        let mi = &raw[12..14];
        let ss = &raw[15..17];
        Some(format!("20{yy}-{mm}-{dd}T{hh}:{mi}:{ss}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_v02_summer_horodate() {
        assert_eq!(format_horodate("E210715143012").as_deref(), Some("2021-07-15T14:30:12+02:00"));
    }

    #[test]
    fn formats_v02_winter_horodate() {
        assert_eq!(format_horodate("H210115143012").as_deref(), Some("2021-01-15T14:30:12+01:00"));
    }

    #[test]
    fn formats_v01pme_horodate() {
        assert_eq!(format_horodate("15/07/21 14:30:12").as_deref(), Some("2021-07-15T14:30:12"));
    }

    #[test]
    fn formats_v02_degraded_clock_horodate_with_same_offset_as_uppercase() {
        assert_eq!(format_horodate("e210715143012").as_deref(), Some("2021-07-15T14:30:12+02:00"));
    }

    #[test]
    fn formats_v02_unknown_season_horodate_with_no_offset() {
        assert_eq!(format_horodate(" 210715143012").as_deref(), Some("2021-07-15T14:30:12"));
    }
}
