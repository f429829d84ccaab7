//! "Historique" dialect (V01): the original single-phase/three-phase TIC
//! format, `SP`-separated, no horodates at all.

use crate::dialect::Dialect;
use crate::etiquette::{unittype, DataType as T, Etiquette, Unit as U};

macro_rules! row {
    ($id:expr, $label:expr, $unit:expr, $ty:expr, $desc:expr) => {
        Etiquette {
            tag_id: $id,
            label: $label,
            unittype: unittype($unit, $ty),
            has_horodate: false,
            description: $desc,
        }
    };
}

static LABELS: &[Etiquette] = &[
    row!(0, "ADCO", U::None, T::String, "12-digit meter address"),
    row!(1, "OPTARIF", U::None, T::String, "pricing option"),
    row!(2, "PTEC", U::None, T::String, "current pricing period"),
    row!(3, "DEMAIN", U::None, T::String, "tomorrow's colour (tempo)"),
    row!(4, "HHPHC", U::None, T::String, "peak/off-peak schedule group"),
    row!(5, "MOTDETAT", U::None, T::String, "meter status word"),
    row!(6, "PPOT", U::None, T::String, "present potential presence"),
    row!(7, "GAZ", U::None, T::String, "gas relay index"),
    row!(8, "AUTRE", U::None, T::String, "other relay index"),
    row!(9, "ISOUSC", U::A, T::Integer, "subscribed current"),
    row!(10, "IINST", U::A, T::Integer, "instantaneous current"),
    row!(11, "IINST1", U::A, T::Integer, "instantaneous current, phase 1"),
    row!(12, "IINST2", U::A, T::Integer, "instantaneous current, phase 2"),
    row!(13, "IINST3", U::A, T::Integer, "instantaneous current, phase 3"),
    row!(14, "ADPS", U::A, T::Integer, "power demand excess warning"),
    row!(15, "IMAX", U::A, T::Integer, "max current reached"),
    row!(16, "IMAX1", U::A, T::Integer, "max current reached, phase 1"),
    row!(17, "IMAX2", U::A, T::Integer, "max current reached, phase 2"),
    row!(18, "IMAX3", U::A, T::Integer, "max current reached, phase 3"),
    row!(19, "ADIR1", U::A, T::Integer, "current excess warning, phase 1"),
    row!(20, "ADIR2", U::A, T::Integer, "current excess warning, phase 2"),
    row!(21, "ADIR3", U::A, T::Integer, "current excess warning, phase 3"),
    row!(22, "BASE", U::Wh, T::Integer, "base index"),
    row!(23, "HCHC", U::Wh, T::Integer, "off-peak index"),
    row!(24, "HCHP", U::Wh, T::Integer, "peak index"),
    row!(25, "EJPHN", U::Wh, T::Integer, "EJP normal-hours index"),
    row!(26, "EJPHPM", U::Wh, T::Integer, "EJP mobile-peak index"),
    row!(27, "BBRHCJB", U::Wh, T::Integer, "tempo blue off-peak index"),
    row!(28, "BBRHPJB", U::Wh, T::Integer, "tempo blue peak index"),
    row!(29, "BBRHCJW", U::Wh, T::Integer, "tempo white off-peak index"),
    row!(30, "BBRHPJW", U::Wh, T::Integer, "tempo white peak index"),
    row!(31, "BBRHCJR", U::Wh, T::Integer, "tempo red off-peak index"),
    row!(32, "BBRHPJR", U::Wh, T::Integer, "tempo red peak index"),
    row!(33, "PMAX", U::W, T::Integer, "max power reached"),
    row!(34, "PAPP", U::VA, T::Integer, "apparent power"),
    row!(35, "PEJP", U::Min, T::Integer, "EJP advance notice"),
];

/// Single-phase/three-phase, no horodates. `SP`-separated, `EOT`-abortable.
pub struct Historique;

impl Dialect for Historique {
    const SEPARATOR: u8 = 0x20;
    const SUPPORTS_EOT: bool = true;
    const COMPENSATE_TRAILING_SEP: bool = true;
    const HORODATE_LEN: usize = 0;

    fn labels() -> &'static [Etiquette] {
        LABELS
    }
}
