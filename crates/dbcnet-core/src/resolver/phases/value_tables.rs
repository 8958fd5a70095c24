//! Value table builder.
//!
//! Signal type templates are few, so the table's template is found by a
//! linear scan instead of an index bucket.

use crate::ast::{Document, SignalTypeDef, ValueTableDef};
use crate::model::{ByteOrder, SignalType, ValueEncodingDescription, ValueTable, ValueType};
use alloc::vec::Vec;

/// Convert a signal type template.
fn build_signal_type(def: &SignalTypeDef) -> SignalType {
    SignalType {
        name: def.name.clone(),
        bit_size: def.size,
        byte_order: ByteOrder::from_dbc_char(def.byte_order),
        value_type: ValueType::from_dbc_char(def.value_type),
        factor: def.factor,
        offset: def.offset,
        minimum: def.minimum,
        maximum: def.maximum,
        unit: def.unit.clone(),
        default_value: def.default_value,
        value_table_name: def.value_table_name.clone(),
    }
}

/// Build one value table; the first template referring to it is attached.
#[must_use]
pub fn build_value_table(def: &ValueTableDef, signal_types: &[SignalTypeDef]) -> ValueTable {
    ValueTable {
        name: def.name.clone(),
        signal_type: signal_types
            .iter()
            .find(|st| st.value_table_name == def.name)
            .map(build_signal_type),
        value_encoding_descriptions: def
            .items
            .iter()
            .map(|item| ValueEncodingDescription::new(item.value, item.description.clone()))
            .collect(),
    }
}

/// Build all value tables in source order.
#[must_use]
pub fn build_value_tables(doc: &Document) -> Vec<ValueTable> {
    doc.value_tables
        .iter()
        .map(|vt| build_value_table(vt, &doc.signal_types))
        .collect()
}
