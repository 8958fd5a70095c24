//! Attribute definitions, defaults and network-level facts.

use crate::ast::{
    AttrLiteral, AttributeDefinitionDef, AttributeValueDef, AttributeValueTypeDef, CommentDef,
    Document,
};
use crate::model::{Attribute, AttributeDefinition, AttributeValue, AttributeValueType, ObjectType};
use alloc::string::String;
use alloc::vec::Vec;

/// Convert a literal into a model value.
#[must_use]
pub fn attribute_value(literal: &AttrLiteral) -> AttributeValue {
    match literal {
        AttrLiteral::Int(v) => AttributeValue::Int(*v),
        AttrLiteral::Float(v) => AttributeValue::Float(*v),
        AttrLiteral::String(s) => AttributeValue::String(s.clone()),
    }
}

/// Convert indexed attribute facts for one object.
#[must_use]
pub fn attributes_for(facts: &[&AttributeValueDef], object_type: ObjectType) -> Vec<Attribute> {
    facts
        .iter()
        .map(|fact| {
            Attribute::new(
                fact.attribute_name(),
                object_type,
                attribute_value(fact.value()),
            )
        })
        .collect()
}

/// Build one attribute definition.
#[must_use]
pub fn build_attribute_definition(def: &AttributeDefinitionDef) -> AttributeDefinition {
    let value_type = match &def.value_type {
        AttributeValueTypeDef::Int { minimum, maximum } => AttributeValueType::Int {
            minimum: *minimum,
            maximum: *maximum,
        },
        AttributeValueTypeDef::Hex { minimum, maximum } => AttributeValueType::Hex {
            minimum: *minimum,
            maximum: *maximum,
        },
        AttributeValueTypeDef::Float { minimum, maximum } => AttributeValueType::Float {
            minimum: *minimum,
            maximum: *maximum,
        },
        AttributeValueTypeDef::String => AttributeValueType::String,
        AttributeValueTypeDef::Enum { values } => AttributeValueType::Enum {
            values: values.clone(),
        },
    };
    AttributeDefinition {
        name: def.name.clone(),
        object_type: ObjectType::from_tag(def.object_type.as_deref()),
        value_type,
    }
}

/// Build all attribute definitions in source order.
#[must_use]
pub fn build_attribute_definitions(doc: &Document) -> Vec<AttributeDefinition> {
    doc.attribute_definitions
        .iter()
        .map(build_attribute_definition)
        .collect()
}

/// Build the attribute defaults. Defaults are attached to the network.
#[must_use]
pub fn build_attribute_defaults(doc: &Document) -> Vec<Attribute> {
    doc.attribute_defaults
        .iter()
        .map(|d| Attribute::new(d.name.clone(), ObjectType::Network, attribute_value(&d.value)))
        .collect()
}

/// Collect the network-scoped attribute values in source order.
#[must_use]
pub fn build_network_attribute_values(doc: &Document) -> Vec<Attribute> {
    doc.attribute_values
        .iter()
        .filter_map(|fact| match fact {
            AttributeValueDef::Network {
                attribute_name,
                value,
            } => Some(Attribute::new(
                attribute_name.clone(),
                ObjectType::Network,
                attribute_value(value),
            )),
            _ => None,
        })
        .collect()
}

/// Get the first network comment in source order.
#[must_use]
pub fn network_comment(doc: &Document) -> Option<String> {
    doc.comments.iter().find_map(|c| match c {
        CommentDef::Network { comment } => Some(comment.clone()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AttributeDefaultDef;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_definition_object_type_mapping() {
        let def = |tag: Option<&str>| AttributeDefinitionDef {
            object_type: tag.map(ToString::to_string),
            name: "A".to_string(),
            value_type: AttributeValueTypeDef::String,
        };
        assert_eq!(build_attribute_definition(&def(None)).object_type(), ObjectType::Network);
        assert_eq!(build_attribute_definition(&def(Some("BU_"))).object_type(), ObjectType::Node);
        assert_eq!(build_attribute_definition(&def(Some("BO_"))).object_type(), ObjectType::Message);
        assert_eq!(build_attribute_definition(&def(Some("SG_"))).object_type(), ObjectType::Signal);
        assert_eq!(
            build_attribute_definition(&def(Some("EV_"))).object_type(),
            ObjectType::EnvironmentVariable
        );
    }

    #[test]
    fn test_definition_value_type_copied() {
        let def = AttributeDefinitionDef {
            object_type: None,
            name: "Kind".to_string(),
            value_type: AttributeValueTypeDef::Enum {
                values: vec!["A".to_string(), "B".to_string()],
            },
        };
        let built = build_attribute_definition(&def);
        assert_eq!(built.name(), "Kind");
        assert_eq!(
            built.value_type(),
            &AttributeValueType::Enum {
                values: vec!["A".to_string(), "B".to_string()]
            }
        );
    }

    #[test]
    fn test_network_level_facts() {
        let mut doc = Document::new();
        doc.attribute_defaults = vec![AttributeDefaultDef {
            name: "BusType".to_string(),
            value: AttrLiteral::String("CAN".to_string()),
        }];
        doc.attribute_values = vec![
            AttributeValueDef::Node {
                attribute_name: "N".to_string(),
                node_name: "ECU1".to_string(),
                value: AttrLiteral::Int(1),
            },
            AttributeValueDef::Network {
                attribute_name: "DBName".to_string(),
                value: AttrLiteral::String("net".to_string()),
            },
        ];
        doc.comments = vec![
            CommentDef::Node {
                node_name: "ECU1".to_string(),
                comment: "node".to_string(),
            },
            CommentDef::Network {
                comment: "first".to_string(),
            },
            CommentDef::Network {
                comment: "second".to_string(),
            },
        ];

        let defaults = build_attribute_defaults(&doc);
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].object_type(), ObjectType::Network);

        let values = build_network_attribute_values(&doc);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].name(), "DBName");

        assert_eq!(network_comment(&doc).as_deref(), Some("first"));
        assert_eq!(network_comment(&Document::new()), None);
    }
}
