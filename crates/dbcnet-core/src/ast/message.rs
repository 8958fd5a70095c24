//! Message and signal facts.

use alloc::string::String;
use alloc::vec::Vec;

/// A `BO_` message with its `SG_` signals.
///
/// `BO_ id name : size transmitter`
#[derive(Clone, Debug, PartialEq)]
pub struct MessageDef {
    /// CAN identifier (extended frames keep bit 31 set).
    pub id: u64,
    /// Message name.
    pub name: String,
    /// Payload size in bytes.
    pub size: u64,
    /// Transmitting node name.
    pub transmitter: String,
    /// Signals in source order.
    pub signals: Vec<SignalDef>,
}

/// A `SG_` signal.
///
/// `SG_ name [mux] : start|size@order sign (factor,offset) [min|max] "unit" receivers`
#[derive(Clone, Debug, PartialEq)]
pub struct SignalDef {
    /// Signal name.
    pub name: String,
    /// Raw multiplexer indicator (`M`, `m3`, `m3M`), if present.
    pub multiplexer_indicator: Option<String>,
    /// Start bit.
    pub start_bit: u64,
    /// Bit size.
    pub signal_size: u64,
    /// Byte order character (`'0'` big endian, `'1'` little endian).
    pub byte_order: char,
    /// Value type character (`'+'` unsigned, `'-'` signed).
    pub value_type: char,
    /// Scale factor.
    pub factor: f64,
    /// Offset.
    pub offset: f64,
    /// Minimum physical value.
    pub minimum: f64,
    /// Maximum physical value.
    pub maximum: f64,
    /// Unit text.
    pub unit: String,
    /// Receiving node names.
    pub receivers: Vec<String>,
}

/// A `BO_TX_BU_` list of additional transmitters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageTransmittersDef {
    /// Message the list belongs to.
    pub message_id: u64,
    /// Transmitter node names.
    pub transmitters: Vec<String>,
}

/// A `SIG_VALTYPE_` declaration.
///
/// The raw tag is kept: `1` means float, `2` means double, anything else integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalExtendedValueTypeDef {
    /// Owning message.
    pub message_id: u64,
    /// Signal name.
    pub signal_name: String,
    /// Raw type tag.
    pub value: u64,
}

/// An inclusive range of multiplexer switch values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MuxRangeDef {
    /// First selecting switch value.
    pub from: u64,
    /// Last selecting switch value.
    pub to: u64,
}

/// A `SG_MUL_VAL_` extended multiplexing declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalMultiplexerValueDef {
    /// Owning message.
    pub message_id: u64,
    /// Multiplexed signal name.
    pub signal_name: String,
    /// Switch signal name.
    pub switch_name: String,
    /// Selecting ranges in source order.
    pub value_ranges: Vec<MuxRangeDef>,
}

/// A `SIG_GROUP_` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalGroupDef {
    /// Owning message.
    pub message_id: u64,
    /// Group name.
    pub signal_group_name: String,
    /// Repetition count.
    pub repetitions: u64,
    /// Member signal names.
    pub signal_names: Vec<String>,
}
