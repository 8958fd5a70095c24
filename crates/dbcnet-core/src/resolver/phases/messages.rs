//! Message and signal builder.

use super::attributes::attributes_for;
use super::validation::{check_message, check_signal};
use crate::ast::{Document, MessageDef, SignalDef};
use crate::model::{
    ByteOrder, ExtendedValueType, Message, Multiplexer, MuxRange, ObjectType, Signal,
    SignalGroup, SignalMultiplexerValue, ValueEncodingDescription, ValueType,
};
use crate::resolver::CrossReferenceIndex;
use alloc::string::String;
use alloc::vec::Vec;

/// Build one signal of `message` and run the signal checks on it.
#[must_use]
pub fn build_signal(
    message: &MessageDef,
    def: &SignalDef,
    index: &CrossReferenceIndex<'_>,
) -> Signal {
    let id = message.id;
    let name = def.name.as_str();

    let value_encoding_descriptions = index
        .signal_value_descriptions(id, name)
        .unwrap_or_default()
        .iter()
        .map(|item| ValueEncodingDescription::new(item.value, item.description.clone()))
        .collect();

    let signal_multiplexer_values = index
        .signal_multiplexer_values(id, name)
        .iter()
        .map(|fact| SignalMultiplexerValue {
            switch_name: fact.switch_name.clone(),
            value_ranges: fact
                .value_ranges
                .iter()
                .map(|r| MuxRange::new(r.from, r.to))
                .collect(),
        })
        .collect();

    let extended_value_type = index
        .signal_extended_value_type(id, name)
        .map(ExtendedValueType::from_tag)
        .unwrap_or_default();

    let mut signal = Signal {
        message_size: message.size,
        name: def.name.clone(),
        multiplexer: Multiplexer::from_indicator(def.multiplexer_indicator.as_deref()),
        start_bit: def.start_bit,
        bit_size: def.signal_size,
        byte_order: ByteOrder::from_dbc_char(def.byte_order),
        value_type: ValueType::from_dbc_char(def.value_type),
        factor: def.factor,
        offset: def.offset,
        minimum: def.minimum,
        maximum: def.maximum,
        unit: def.unit.clone(),
        receivers: def.receivers.clone(),
        attributes: attributes_for(index.signal_attributes(id, name), ObjectType::Signal),
        value_encoding_descriptions,
        comment: index
            .signal_comment(id, name)
            .map(String::from)
            .unwrap_or_default(),
        extended_value_type,
        signal_multiplexer_values,
        diagnostics: Vec::new(),
    };
    signal.diagnostics = check_signal(&signal);
    signal
}

/// Build one message with its signals and run the message check.
#[must_use]
pub fn build_message(def: &MessageDef, index: &CrossReferenceIndex<'_>) -> Message {
    let id = def.id;
    let signals: Vec<Signal> = def
        .signals
        .iter()
        .map(|s| build_signal(def, s, index))
        .collect();
    let diagnostics = check_message(&signals);

    Message {
        id,
        name: def.name.clone(),
        size: def.size,
        transmitter: def.transmitter.clone(),
        message_transmitters: index
            .message_transmitters(id)
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
        signals,
        attributes: attributes_for(index.message_attributes(id), ObjectType::Message),
        comment: index
            .message_comment(id)
            .map(String::from)
            .unwrap_or_default(),
        signal_groups: index
            .signal_groups(id)
            .iter()
            .map(|g| SignalGroup {
                message_id: g.message_id,
                name: g.signal_group_name.clone(),
                repetitions: g.repetitions,
                signal_names: g.signal_names.clone(),
            })
            .collect(),
        diagnostics,
    }
}

/// Build all messages in source order.
#[must_use]
pub fn build_messages(doc: &Document, index: &CrossReferenceIndex<'_>) -> Vec<Message> {
    doc.messages.iter().map(|m| build_message(m, index)).collect()
}
