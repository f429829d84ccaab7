//! PME-PMI dialect (V01PME): `SP`-separated like historique, but with
//! horodated markers, kW/kWh-scale energies and powers, and a handful of
//! dimensionless power labels whose unit is only known from the payload's
//! trailing suffix.

use crate::dialect::Dialect;
use crate::etiquette::{unittype, DataType as T, Etiquette, Unit as U};

macro_rules! row {
    ($id:expr, $label:expr, $unit:expr, $ty:expr, $horo:expr, $desc:expr) => {
        Etiquette {
            tag_id: $id,
            label: $label,
            unittype: unittype($unit, $ty),
            has_horodate: $horo,
            description: $desc,
        }
    };
}

static LABELS: &[Etiquette] = &[
    row!(0, "DATE", U::None, T::String, true, "current date and time"),
    row!(1, "DEBP", U::None, T::String, true, "measurement period start"),
    row!(2, "DEBP-1", U::None, T::String, true, "measurement period start, previous"),
    row!(3, "FINP-1", U::None, T::String, true, "measurement period end, previous"),
    row!(4, "DATEPA1", U::None, T::String, true, "subscribed power change, period 1"),
    row!(5, "DATEPA2", U::None, T::String, true, "subscribed power change, period 2"),
    row!(6, "DATEPA3", U::None, T::String, true, "subscribed power change, period 3"),
    row!(7, "DATEPA4", U::None, T::String, true, "subscribed power change, period 4"),
    row!(8, "PA1_S", U::KW, T::Integer, false, "subscribed power, period 1"),
    row!(9, "PA1_I", U::KW, T::Integer, false, "injected subscribed power, period 1"),
    row!(10, "PA2_S", U::KW, T::Integer, false, "subscribed power, period 2"),
    row!(11, "PA2_I", U::KW, T::Integer, false, "injected subscribed power, period 2"),
    row!(12, "PA3_S", U::KW, T::Integer, false, "subscribed power, period 3"),
    row!(13, "PA3_I", U::KW, T::Integer, false, "injected subscribed power, period 3"),
    row!(14, "PA4_S", U::KW, T::Integer, false, "subscribed power, period 4"),
    row!(15, "PA4_I", U::KW, T::Integer, false, "injected subscribed power, period 4"),
    row!(16, "EAS", U::KWh, T::Integer, false, "active energy index"),
    row!(17, "ERQ", U::KVArh, T::Integer, false, "reactive energy index"),
    row!(18, "PS", U::None, T::Integer, false, "instantaneous power, unit given by suffix"),
    row!(19, "PTCOUR", U::None, T::Ignore, false, "dynamic tariff period indicator"),
    row!(20, "TGPHI", U::None, T::Ignore, false, "tangent phi"),
];

/// PME-PMI, `SP`-separated like historique but with horodates and
/// kW/kWh-scale measurements.
pub struct PmePmi;

impl Dialect for PmePmi {
    const SEPARATOR: u8 = 0x20;
    const SUPPORTS_EOT: bool = true;
    const COMPENSATE_TRAILING_SEP: bool = true;
    const HORODATE_LEN: usize = 17;

    fn labels() -> &'static [Etiquette] {
        LABELS
    }

    /// `PS`'s payload carries its own unit as a trailing suffix (`...A` for
    /// apparent power, `...W` for active power) rather than having a fixed
    /// one in the table.
    fn reclassify(etiq: &Etiquette, data: &[u8]) -> (U, Vec<u8>) {
        if etiq.unit() != U::None {
            return (etiq.unit(), data.to_vec());
        }
        let trimmed = trim_ascii_whitespace(data);
        match trimmed.last() {
            Some(b'A') => (U::KVA, strip_unit_suffix(trimmed)),
            Some(b'W') => (U::KW, strip_unit_suffix(trimmed)),
            _ => (U::None, trimmed.to_vec()),
        }
    }
}

fn trim_ascii_whitespace(data: &[u8]) -> &[u8] {
    let start = data.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(data.len());
    let end = data.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |p| p + 1);
    &data[start..end]
}

/// Drops the trailing unit letter and any whitespace preceding it, leaving
/// only the digits.
fn strip_unit_suffix(data: &[u8]) -> Vec<u8> {
    let mut end = data.len().saturating_sub(1);
    while end > 0 && !data[end - 1].is_ascii_digit() {
        end -= 1;
    }
    data[..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reclassify_strips_apparent_power_suffix() {
        let ps = PmePmi::labels().iter().find(|e| e.label == "PS").unwrap();
        let (unit, digits) = PmePmi::reclassify(ps, b"36kVA");
        assert_eq!(unit, U::KVA);
        assert_eq!(digits, b"36");
    }

    #[test]
    fn reclassify_strips_active_power_suffix_with_space() {
        let ps = PmePmi::labels().iter().find(|e| e.label == "PS").unwrap();
        let (unit, digits) = PmePmi::reclassify(ps, b"36 kW");
        assert_eq!(unit, U::KW);
        assert_eq!(digits, b"36");
    }

    #[test]
    fn reclassify_is_a_no_op_for_fixed_unit_labels() {
        let pa1 = PmePmi::labels().iter().find(|e| e.label == "PA1_S").unwrap();
        let (unit, digits) = PmePmi::reclassify(pa1, b"12");
        assert_eq!(unit, U::KW);
        assert_eq!(digits, b"12");
    }
}
