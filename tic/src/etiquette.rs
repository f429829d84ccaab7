//! Units, payload kinds, and the static label table row type.

/// Physical unit of a field's payload. Packed into the low nibble of an
/// [`Etiquette`]'s `unittype` byte (14 variants, well within the 4-bit
/// budget).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Unit {
    /// No unit (dimensionless, or a string/profile payload).
    None = 0,
    VAh = 1,
    KWh = 2,
    Wh = 3,
    KVArh = 4,
    VArh = 5,
    A = 6,
    V = 7,
    KVA = 8,
    VA = 9,
    KW = 10,
    W = 11,
    Min = 12,
    DaL = 13,
}

impl Unit {
    /// Short label for JSON `unit` output.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::VAh => "VAh",
            Unit::KWh => "kWh",
            Unit::Wh => "Wh",
            Unit::KVArh => "kVArh",
            Unit::VArh => "VArh",
            Unit::A => "A",
            Unit::V => "V",
            Unit::KVA => "kVA",
            Unit::VA => "VA",
            Unit::KW => "kW",
            Unit::W => "W",
            Unit::Min => "min",
            Unit::DaL => "daL",
        }
    }

    const fn from_nibble(n: u8) -> Unit {
        match n {
            0 => Unit::None,
            1 => Unit::VAh,
            2 => Unit::KWh,
            3 => Unit::Wh,
            4 => Unit::KVArh,
            5 => Unit::VArh,
            6 => Unit::A,
            7 => Unit::V,
            8 => Unit::KVA,
            9 => Unit::VA,
            10 => Unit::KW,
            11 => Unit::W,
            12 => Unit::Min,
            13 => Unit::DaL,
            _ => Unit::None,
        }
    }
}

/// Payload form of a field. Packed into the high nibble of an
/// [`Etiquette`]'s `unittype` byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataType {
    /// Decimal signed integer (the default).
    Integer = 0,
    /// Owned string.
    String = 1,
    /// Base-16 integer on the wire, decimal in the type.
    Hex = 2,
    /// A day-profile blob, decoded on demand by [`crate::pjourf`].
    Profile = 3,
    /// Payload is parsed and dropped; contributes to the checksum but is
    /// never handed to the sink.
    Ignore = 4,
}

const fn pack(unit: Unit, data_type: DataType) -> u8 {
    ((data_type as u8) << 4) | (unit as u8)
}

/// One row of a dialect's static label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Etiquette {
    /// Dense, per-dialect index into the filter bitmap.
    pub tag_id: u8,
    /// The literal wire label, e.g. `"ADSC"`.
    pub label: &'static str,
    /// Packed unit (low nibble) / data type (high nibble).
    pub unittype: u8,
    /// Whether the grammar allows (V02: requires for DPM*/FPM*/DATE;
    /// V01PME: requires for DATE/DEBP/DEBP-1/FINP-1/DATEPAx) a horodate
    /// before the data field.
    pub has_horodate: bool,
    /// Human-readable description (`-l`).
    pub description: &'static str,
}

impl Etiquette {
    pub const fn unit(&self) -> Unit {
        Unit::from_nibble(self.unittype & 0x0F)
    }

    pub const fn data_type(&self) -> DataType {
        match (self.unittype >> 4) & 0x0F {
            0 => DataType::Integer,
            1 => DataType::String,
            2 => DataType::Hex,
            3 => DataType::Profile,
            _ => DataType::Ignore,
        }
    }
}

/// Helper used by dialect table definitions to build the `unittype` byte
/// at compile time from its two halves.
pub const fn unittype(unit: Unit, data_type: DataType) -> u8 {
    pack(unit, data_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unittype_roundtrip() {
        for unit in [
            Unit::None,
            Unit::VAh,
            Unit::KWh,
            Unit::Wh,
            Unit::KVArh,
            Unit::VArh,
            Unit::A,
            Unit::V,
            Unit::KVA,
            Unit::VA,
            Unit::KW,
            Unit::W,
            Unit::Min,
            Unit::DaL,
        ] {
            for data_type in [
                DataType::Integer,
                DataType::String,
                DataType::Hex,
                DataType::Profile,
                DataType::Ignore,
            ] {
                let packed = unittype(unit, data_type);
                let etiq = Etiquette {
                    tag_id: 0,
                    label: "X",
                    unittype: packed,
                    has_horodate: false,
                    description: "",
                };
                assert_eq!(etiq.unit(), unit);
                assert_eq!(etiq.data_type(), data_type);
            }
        }
    }
}
