//! Signals and their multiplexing description.

use super::attribute::Attribute;
use super::types::{ByteOrder, ExtendedValueType, ValueType};
use super::value_table::ValueEncodingDescription;
use alloc::string::String;
use alloc::vec::Vec;

/// Multiplexing role of a signal within its message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Multiplexer {
    /// Always present.
    #[default]
    NoMux,
    /// The switch signal selecting other signals.
    MuxSwitch,
    /// Present only while the switch has this value.
    MuxValue(u64),
}

impl Multiplexer {
    /// Parse a raw multiplexer indicator.
    ///
    /// A leading `M` marks the switch. Anything else is read as `m<value>`:
    /// the leading decimal digits after the first character form the switch
    /// value, and a missing or non-numeric suffix reads as `0`.
    #[must_use]
    pub fn from_indicator(indicator: Option<&str>) -> Self {
        let Some(text) = indicator else {
            return Self::NoMux;
        };
        let mut chars = text.chars();
        match chars.next() {
            None => Self::NoMux,
            Some('M') => Self::MuxSwitch,
            Some(_) => {
                let mut value: u64 = 0;
                for c in chars {
                    let Some(digit) = c.to_digit(10) else {
                        break;
                    };
                    value = value.wrapping_mul(10).wrapping_add(u64::from(digit));
                }
                Self::MuxValue(value)
            }
        }
    }

    /// Get the switch value selecting this signal, if any.
    #[must_use]
    pub const fn switch_value(self) -> Option<u64> {
        match self {
            Self::MuxValue(v) => Some(v),
            _ => None,
        }
    }
}

/// Inclusive range of switch values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MuxRange {
    /// First value.
    pub from: u64,
    /// Last value (inclusive).
    pub to: u64,
}

impl MuxRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(from: u64, to: u64) -> Self {
        Self { from, to }
    }

    /// Check whether a switch value falls in the range.
    #[must_use]
    pub const fn contains(&self, value: u64) -> bool {
        self.from <= value && value <= self.to
    }
}

/// Extended multiplexing entry (`SG_MUL_VAL_`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalMultiplexerValue {
    pub(crate) switch_name: String,
    pub(crate) value_ranges: Vec<MuxRange>,
}

impl SignalMultiplexerValue {
    /// Get the name of the switch signal.
    #[must_use]
    pub fn switch_name(&self) -> &str {
        &self.switch_name
    }

    /// Get the switch value ranges selecting the signal.
    #[must_use]
    pub fn value_ranges(&self) -> &[MuxRange] {
        &self.value_ranges
    }

    /// Check whether a switch value selects the signal.
    #[must_use]
    pub fn selects(&self, value: u64) -> bool {
        self.value_ranges.iter().any(|r| r.contains(value))
    }
}

/// Non-fatal problem found while building a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalDiagnostic {
    /// `start_bit + bit_size` lies beyond the end of the message payload.
    SignalExceedsMessageSize,
    /// Float signal not 32 bits wide, or double signal not 64 bits wide.
    WrongBitSizeForExtendedDataType,
    /// The host `f32` is not IEEE 754 binary32.
    MachineFloatEncodingNotSupported,
    /// The host `f64` is not IEEE 754 binary64.
    MachineDoubleEncodingNotSupported,
}

impl SignalDiagnostic {
    /// All kinds, in check order.
    pub const ALL: [Self; 4] = [
        Self::SignalExceedsMessageSize,
        Self::WrongBitSizeForExtendedDataType,
        Self::MachineFloatEncodingNotSupported,
        Self::MachineDoubleEncodingNotSupported,
    ];

    /// Get the diagnostic name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignalExceedsMessageSize => "SignalExceedsMessageSize",
            Self::WrongBitSizeForExtendedDataType => "WrongBitSizeForExtendedDataType",
            Self::MachineFloatEncodingNotSupported => "MachineFloatEncodingNotSupported",
            Self::MachineDoubleEncodingNotSupported => "MachineDoubleEncodingNotSupported",
        }
    }

    /// Get the bit for this kind in a diagnostic mask.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::SignalExceedsMessageSize => 1,
            Self::WrongBitSizeForExtendedDataType => 1 << 1,
            Self::MachineFloatEncodingNotSupported => 1 << 2,
            Self::MachineDoubleEncodingNotSupported => 1 << 3,
        }
    }
}

impl core::fmt::Display for SignalDiagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bit-packed signal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    pub(crate) message_size: u64,
    pub(crate) name: String,
    pub(crate) multiplexer: Multiplexer,
    pub(crate) start_bit: u64,
    pub(crate) bit_size: u64,
    pub(crate) byte_order: ByteOrder,
    pub(crate) value_type: ValueType,
    pub(crate) factor: f64,
    pub(crate) offset: f64,
    pub(crate) minimum: f64,
    pub(crate) maximum: f64,
    pub(crate) unit: String,
    pub(crate) receivers: Vec<String>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) value_encoding_descriptions: Vec<ValueEncodingDescription>,
    pub(crate) comment: String,
    pub(crate) extended_value_type: ExtendedValueType,
    pub(crate) signal_multiplexer_values: Vec<SignalMultiplexerValue>,
    pub(crate) diagnostics: Vec<SignalDiagnostic>,
}

impl Signal {
    /// Get the byte size of the owning message.
    #[must_use]
    pub fn message_size(&self) -> u64 {
        self.message_size
    }

    /// Get the signal name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the multiplexing role.
    #[must_use]
    pub fn multiplexer(&self) -> Multiplexer {
        self.multiplexer
    }

    /// Get the start bit.
    #[must_use]
    pub fn start_bit(&self) -> u64 {
        self.start_bit
    }

    /// Get the bit size.
    #[must_use]
    pub fn bit_size(&self) -> u64 {
        self.bit_size
    }

    /// Get the byte order.
    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Get the signedness of the raw value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Get the scale factor.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Get the offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Get the minimum physical value.
    #[must_use]
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Get the maximum physical value.
    #[must_use]
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Get the unit text.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Get the receiving node names.
    #[must_use]
    pub fn receivers(&self) -> &[String] {
        &self.receivers
    }

    /// Get the attributes attached to this signal, in source order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get the value descriptions.
    #[must_use]
    pub fn value_encoding_descriptions(&self) -> &[ValueEncodingDescription] {
        &self.value_encoding_descriptions
    }

    /// Get the comment (empty if none).
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Get the raw value encoding.
    #[must_use]
    pub fn extended_value_type(&self) -> ExtendedValueType {
        self.extended_value_type
    }

    /// Get the extended multiplexing entries.
    #[must_use]
    pub fn signal_multiplexer_values(&self) -> &[SignalMultiplexerValue] {
        &self.signal_multiplexer_values
    }

    /// Get the fired diagnostics (empty for a clean signal).
    #[must_use]
    pub fn diagnostics(&self) -> &[SignalDiagnostic] {
        &self.diagnostics
    }

    /// Check whether a diagnostic fired for this signal.
    #[must_use]
    pub fn has_diagnostic(&self, kind: SignalDiagnostic) -> bool {
        self.diagnostics.contains(&kind)
    }

    /// Get the fired diagnostics as a bit mask (see [`SignalDiagnostic::mask`]).
    #[must_use]
    pub fn diagnostic_mask(&self) -> u32 {
        self.diagnostics.iter().fold(0, |acc, d| acc | d.mask())
    }

    /// Get a value description by raw value.
    #[must_use]
    pub fn value_description(&self, value: i64) -> Option<&str> {
        self.value_encoding_descriptions
            .iter()
            .find(|d| d.value == value)
            .map(|d| d.description.as_str())
    }
}
