//! "Standard" dialect (V02): `HT`-separated, no `EOT` framing, horodated
//! instantaneous measurements alongside the running indexes.

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
    row!(0, "ADSC", U::None, T::String, false, "service connection point address"),
    row!(1, "VTIC", U::None, T::String, false, "TIC version"),
    row!(2, "DATE", U::None, T::String, true, "current date and time"),
    row!(3, "NGTF", U::None, T::String, false, "name of the active pricing schedule"),
    row!(4, "LTARF", U::None, T::String, false, "current pricing period label"),
    row!(5, "EAST", U::Wh, T::Integer, false, "total active energy withdrawn"),
    row!(6, "EASF01", U::Wh, T::Integer, false, "active energy, index 1"),
    row!(7, "EASF02", U::Wh, T::Integer, false, "active energy, index 2"),
    row!(8, "EASF03", U::Wh, T::Integer, false, "active energy, index 3"),
    row!(9, "EASF04", U::Wh, T::Integer, false, "active energy, index 4"),
    row!(10, "EASF05", U::Wh, T::Integer, false, "active energy, index 5"),
    row!(11, "EASF06", U::Wh, T::Integer, false, "active energy, index 6"),
    row!(12, "EASF07", U::Wh, T::Integer, false, "active energy, index 7"),
    row!(13, "EASF08", U::Wh, T::Integer, false, "active energy, index 8"),
    row!(14, "EASF09", U::Wh, T::Integer, false, "active energy, index 9"),
    row!(15, "EASF10", U::Wh, T::Integer, false, "active energy, index 10"),
    row!(16, "EASD01", U::Wh, T::Integer, false, "active energy, distributor index 1"),
    row!(17, "EASD02", U::Wh, T::Integer, false, "active energy, distributor index 2"),
    row!(18, "EASD03", U::Wh, T::Integer, false, "active energy, distributor index 3"),
    row!(19, "EASD04", U::Wh, T::Integer, false, "active energy, distributor index 4"),
    row!(20, "EAIT", U::Wh, T::Integer, false, "total active energy injected"),
    row!(21, "ERQ1", U::VArh, T::Integer, false, "reactive energy, index 1"),
    row!(22, "ERQ2", U::VArh, T::Integer, false, "reactive energy, index 2"),
    row!(23, "ERQ3", U::VArh, T::Integer, false, "reactive energy, index 3"),
    row!(24, "ERQ4", U::VArh, T::Integer, false, "reactive energy, index 4"),
    row!(25, "IRMS1", U::A, T::Integer, false, "RMS current, phase 1"),
    row!(26, "IRMS2", U::A, T::Integer, false, "RMS current, phase 2"),
    row!(27, "IRMS3", U::A, T::Integer, false, "RMS current, phase 3"),
    row!(28, "URMS1", U::V, T::Integer, false, "RMS voltage, phase 1"),
    row!(29, "URMS2", U::V, T::Integer, false, "RMS voltage, phase 2"),
    row!(30, "URMS3", U::V, T::Integer, false, "RMS voltage, phase 3"),
    row!(31, "PREF", U::KVA, T::Integer, false, "subscribed apparent power"),
    row!(32, "PCOUP", U::KVA, T::Integer, false, "cut-off apparent power"),
    row!(33, "SINSTS", U::VA, T::Integer, false, "instantaneous apparent power, withdrawn"),
    row!(34, "SINSTS1", U::VA, T::Integer, false, "instantaneous apparent power, withdrawn, phase 1"),
    row!(35, "SINSTS2", U::VA, T::Integer, false, "instantaneous apparent power, withdrawn, phase 2"),
    row!(36, "SINSTS3", U::VA, T::Integer, false, "instantaneous apparent power, withdrawn, phase 3"),
    row!(37, "SMAXSN", U::VA, T::Integer, true, "max apparent power, withdrawn, today"),
    row!(38, "SMAXSN1", U::VA, T::Integer, true, "max apparent power, withdrawn, today, phase 1"),
    row!(39, "SMAXSN2", U::VA, T::Integer, true, "max apparent power, withdrawn, today, phase 2"),
    row!(40, "SMAXSN3", U::VA, T::Integer, true, "max apparent power, withdrawn, today, phase 3"),
    row!(41, "SINSTI", U::W, T::Integer, false, "instantaneous power, injected"),
    row!(42, "SMAXIN", U::W, T::Integer, true, "max power, injected, today"),
    row!(43, "CCASN", U::W, T::Integer, true, "active load curve, withdrawn"),
    row!(44, "CCASN-1", U::W, T::Integer, true, "active load curve, withdrawn, previous period"),
    row!(45, "CCAIN", U::W, T::Integer, true, "active load curve, injected"),
    row!(46, "CCAIN-1", U::W, T::Integer, true, "active load curve, injected, previous period"),
    row!(47, "UMOY1", U::V, T::Integer, true, "mean voltage, phase 1"),
    row!(48, "UMOY2", U::V, T::Integer, true, "mean voltage, phase 2"),
    row!(49, "UMOY3", U::V, T::Integer, true, "mean voltage, phase 3"),
    row!(50, "STGE", U::None, T::Hex, false, "register status"),
    row!(51, "DPM1", U::None, T::String, true, "start of mobile-peak period 1"),
    row!(52, "FPM1", U::None, T::String, true, "end of mobile-peak period 1"),
    row!(53, "DPM2", U::None, T::String, true, "start of mobile-peak period 2"),
    row!(54, "FPM2", U::None, T::String, true, "end of mobile-peak period 2"),
    row!(55, "DPM3", U::None, T::String, true, "start of mobile-peak period 3"),
    row!(56, "FPM3", U::None, T::String, true, "end of mobile-peak period 3"),
    row!(57, "MSG1", U::None, T::String, false, "short message"),
    row!(58, "MSG2", U::None, T::String, false, "ultra-short message"),
    row!(59, "PRM", U::None, T::String, false, "metering point reference"),
    row!(60, "RELAIS", U::None, T::Integer, false, "relay command register"),
    row!(61, "NTARF", U::None, T::Integer, false, "current pricing index"),
    row!(62, "NJOURF", U::None, T::Integer, false, "current day-profile number"),
    row!(63, "NJOURF+1", U::None, T::Integer, false, "next day-profile number"),
    row!(64, "PJOURF+1", U::None, T::Profile, false, "next day's schedule"),
    row!(65, "PPOINTE", U::None, T::Profile, false, "next peak-day schedule"),
];

pub struct Standard;

impl Dialect for Standard {
    const SEPARATOR: u8 = 0x09;
    const SUPPORTS_EOT: bool = false;
    const COMPENSATE_TRAILING_SEP: bool = false;
    const HORODATE_LEN: usize = 13;

    fn labels() -> &'static [Etiquette] {
        LABELS
    }
}
