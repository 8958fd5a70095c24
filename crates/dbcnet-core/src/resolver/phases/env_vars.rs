//! Environment variable builder.

use super::attributes::attributes_for;
use crate::ast::{Document, EnvVarDataDef, EnvVarDef};
use crate::model::{
    AccessType, EnvironmentVariable, ObjectType, ValueEncodingDescription, VarType,
};
use crate::resolver::CrossReferenceIndex;
use alloc::string::String;
use alloc::vec::Vec;

/// Build one environment variable.
///
/// A matching `ENVVAR_DATA_` entry turns the variable into a data variable
/// regardless of its declared type tag.
#[must_use]
pub fn build_env_var(
    def: &EnvVarDef,
    data: &[EnvVarDataDef],
    index: &CrossReferenceIndex<'_>,
) -> EnvironmentVariable {
    let name = def.name.as_str();

    let mut var_type = VarType::from_tag(def.var_type);
    let mut data_size = 0;
    if let Some(d) = data.iter().find(|d| d.name == def.name) {
        var_type = VarType::Data;
        data_size = d.size;
    }

    EnvironmentVariable {
        name: def.name.clone(),
        var_type,
        minimum: def.minimum,
        maximum: def.maximum,
        unit: def.unit.clone(),
        initial_value: def.initial_value,
        id: def.id,
        access_type: AccessType::from_token(&def.access_type),
        access_nodes: def.access_nodes.clone(),
        value_encoding_descriptions: index
            .env_var_value_descriptions(name)
            .unwrap_or_default()
            .iter()
            .map(|item| ValueEncodingDescription::new(item.value, item.description.clone()))
            .collect(),
        data_size,
        attributes: attributes_for(
            index.env_var_attributes(name),
            ObjectType::EnvironmentVariable,
        ),
        comment: index
            .env_var_comment(name)
            .map(String::from)
            .unwrap_or_default(),
    }
}

/// Build all environment variables in source order.
#[must_use]
pub fn build_env_vars(doc: &Document, index: &CrossReferenceIndex<'_>) -> Vec<EnvironmentVariable> {
    doc.environment_variables
        .iter()
        .map(|ev| build_env_var(ev, &doc.environment_variable_data, index))
        .collect()
}
