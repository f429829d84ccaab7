//! Decoder for the `STGE` 32-bit status register.
//!
//! `STGE`'s payload is hex on the wire and already parsed to an integer by
//! the time it reaches a [`Field`](crate::field::Field); [`Stge::decode`]
//! takes that integer and expands it into its 18 named sub-fields. This is
//! a content-addressable transformation any sink can apply on demand (the
//! CLI's `-u` flag), not something the decoder does automatically.

use bitmatch::bitmatch;

macro_rules! flag_enum {
    ($name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $str),+
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

flag_enum!(ContactState {
    Closed => "fermé",
    Open => "ouvert",
});

flag_enum!(CutOffCause {
    Closed => "fermeture",
    OverVoltage => "surtension",
    OverPower => "dépassement de puissance",
    Operator => "fonctionnement produit",
    OverheatWithCurrent => "délestage surchauffe avec préavis",
    OverheatNoPreavis => "délestage surchauffe sans préavis",
    ScheduleOrTelemetry => "demande délestage",
    Reserved => "réservé",
});

flag_enum!(TempoColor {
    Unknown => "inconnu",
    Blue => "bleu",
    White => "blanc",
    Red => "rouge",
});

flag_enum!(PeakSignal {
    NoWarning => "pas de préavis ni pointe mobile",
    PreavisPointeMobile => "préavis pointe mobile",
    PointeMobile => "pointe mobile",
    Reserved => "réservé",
});

flag_enum!(PlcStatus {
    NotSync => "non synchronisé",
    Syncing => "en cours de synchronisation",
    Synced => "synchronisé",
});

flag_enum!(EuridisPort {
    Inactive => "désactivée",
    ActiveNoSecurity => "activée sans sécurité",
    ActiveWithSecurity => "activée avec sécurité",
    Reserved => "réservé",
});

flag_enum!(OutputMode {
    Standard => "standard",
    Historique => "historique",
});

/// The fully decoded `STGE` register: 18 spec-defined sub-fields plus a
/// visibility flag for the reserved bit 18.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stge {
    pub contact_sec: ContactState,
    pub organe_coupure: CutOffCause,
    pub etat_cache_bornes: ContactState,
    pub surtension: bool,
    pub depassement_puissance: bool,
    pub consommateur_producteur_injection: bool,
    pub sens_energie_active: bool,
    /// 1-16 (index + 1; the register stores a 4-bit 0-15 index).
    pub tarif_contrat_fourniture: u8,
    /// 1-8 (index + 1; the register stores a 3-bit 0-7 index).
    pub tarif_contrat_distributeur: u8,
    pub mode_degradee_horloge: bool,
    pub output_mode: OutputMode,
    /// Bit 18 is reserved by the standard; decoded rather than dropped so a
    /// future revision of the register can be told apart from a zeroed
    /// reserved bit.
    pub reserved_bit_18: bool,
    pub sortie_communication_euridis: EuridisPort,
    pub statut_cpl: PlcStatus,
    pub synchro_cpl: bool,
    pub couleur_jour_tempo: TempoColor,
    pub couleur_lendemain_tempo: TempoColor,
    pub preavis_pointe_mobile: PeakSignal,
    pub pointe_mobile: PeakSignal,
}

impl Stge {
    /// Decodes a 32-bit register value. Every field is read via an
    /// exhaustive match over its bit width, so there is no indexing that
    /// could go out of range (`0x00000000` and `0xFFFFFFFF` both decode
    /// without a panic). Bit layout, MSB to LSB: pointe mobile (2), préavis
    /// pointe mobile (2), couleur lendemain (2), couleur jour (2), synchro
    /// CPL (1), statut CPL (2), sortie Euridis (2), reserved bit 18 (1),
    /// output mode (1), tarif distributeur (3, its top bit doubles as
    /// horloge dégradée), tarif fourniture (4), sens énergie (1),
    /// consommateur/producteur (1), dépassement puissance (1), surtension
    /// (1), reserved bit 5 (1), cache-bornes (1), organe de coupure (3),
    /// contact sec (1).
    #[bitmatch]
    pub fn decode(reg: u32) -> Stge {
        #[bitmatch]
        let "ppqqlljjscceegxdddffffaiwt?boooz" = reg;

        Stge {
            contact_sec: contact_state(z),
            organe_coupure: cut_off_cause(o as u8),
            etat_cache_bornes: contact_state(b),
            surtension: t != 0,
            depassement_puissance: w != 0,
            consommateur_producteur_injection: i != 0,
            sens_energie_active: a != 0,
            tarif_contrat_fourniture: (f as u8) + 1,
            tarif_contrat_distributeur: (d as u8) + 1,
            mode_degradee_horloge: (d & 0b100) != 0,
            output_mode: output_mode(x),
            reserved_bit_18: g != 0,
            sortie_communication_euridis: euridis_port(e as u8),
            statut_cpl: plc_status(c as u8),
            synchro_cpl: s != 0,
            couleur_jour_tempo: tempo_color(j as u8),
            couleur_lendemain_tempo: tempo_color(l as u8),
            preavis_pointe_mobile: peak_signal(q as u8),
            pointe_mobile: peak_signal(p as u8),
        }
    }
}

fn contact_state(bit: u32) -> ContactState {
    match bit & 1 {
        0 => ContactState::Closed,
        _ => ContactState::Open,
    }
}

fn cut_off_cause(v: u8) -> CutOffCause {
    match v & 0b111 {
        0 => CutOffCause::Closed,
        1 => CutOffCause::OverVoltage,
        2 => CutOffCause::OverPower,
        3 => CutOffCause::Operator,
        4 => CutOffCause::OverheatWithCurrent,
        5 => CutOffCause::OverheatNoPreavis,
        6 => CutOffCause::ScheduleOrTelemetry,
        _ => CutOffCause::Reserved,
    }
}

fn tempo_color(v: u8) -> TempoColor {
    match v & 0b11 {
        0 => TempoColor::Unknown,
        1 => TempoColor::Blue,
        2 => TempoColor::White,
        _ => TempoColor::Red,
    }
}

fn peak_signal(v: u8) -> PeakSignal {
    match v & 0b11 {
        0 => PeakSignal::NoWarning,
        1 => PeakSignal::PreavisPointeMobile,
        2 => PeakSignal::PointeMobile,
        _ => PeakSignal::Reserved,
    }
}

fn plc_status(v: u8) -> PlcStatus {
    match v & 0b11 {
        0 => PlcStatus::NotSync,
        1 => PlcStatus::Syncing,
        _ => PlcStatus::Synced,
    }
}

fn euridis_port(v: u8) -> EuridisPort {
    match v & 0b11 {
        0 => EuridisPort::Inactive,
        1 => EuridisPort::ActiveNoSecurity,
        2 => EuridisPort::ActiveWithSecurity,
        _ => EuridisPort::Reserved,
    }
}

fn output_mode(bit: u32) -> OutputMode {
    match bit & 1 {
        0 => OutputMode::Standard,
        _ => OutputMode::Historique,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_all_zero_register() {
        let s = Stge::decode(0);
        assert_eq!(s.contact_sec, ContactState::Closed);
        assert_eq!(s.organe_coupure, CutOffCause::Closed);
        assert_eq!(s.couleur_jour_tempo, TempoColor::Unknown);
        assert_eq!(s.output_mode, OutputMode::Standard);
        assert_eq!(s.tarif_contrat_fourniture, 1);
        assert_eq!(s.tarif_contrat_distributeur, 1);
        assert!(!s.mode_degradee_horloge);
        assert!(!s.reserved_bit_18);
    }

    #[test]
    fn decodes_all_one_register_without_panicking() {
        let s = Stge::decode(0xFFFF_FFFF);
        assert_eq!(s.contact_sec, ContactState::Open);
        assert_eq!(s.organe_coupure, CutOffCause::Reserved);
        assert_eq!(s.couleur_jour_tempo, TempoColor::Red);
        assert_eq!(s.pointe_mobile, PeakSignal::Reserved);
        assert_eq!(s.output_mode, OutputMode::Historique);
        assert_eq!(s.tarif_contrat_fourniture, 16);
        assert_eq!(s.tarif_contrat_distributeur, 8);
        assert!(s.mode_degradee_horloge);
        assert!(s.reserved_bit_18);
    }

    #[test]
    fn tarif_fields_read_back_as_index_plus_one() {
        // tarif_contrat_fourniture occupies bits 10-13.
        let s = Stge::decode(0b1101 << 10);
        assert_eq!(s.tarif_contrat_fourniture, 0b1101 + 1);

        // tarif_contrat_distributeur occupies bits 14-16; its top bit (16)
        // doubles as mode_degradee_horloge.
        let s = Stge::decode(0b110 << 14);
        assert_eq!(s.tarif_contrat_distributeur, 0b110 + 1);
        assert!(s.mode_degradee_horloge);
    }

    #[test]
    fn reserved_bits_5_and_18_do_not_leak_into_neighboring_fields() {
        let s = Stge::decode(1 << 5);
        assert!(!s.surtension);
        assert!(!s.depassement_puissance);

        let s = Stge::decode(1 << 18);
        assert!(s.reserved_bit_18);
        assert_eq!(s.output_mode, OutputMode::Standard);
        assert_eq!(s.sortie_communication_euridis, EuridisPort::Inactive);
    }
}
