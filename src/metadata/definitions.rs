//! Metadata records handed to the host platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations the host knows how to drive against an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownActions {
    None,
    Query,
    Create,
    CreateWith,
    Update,
    UpdateWith,
    UpdateInsert,
    InsertUpdate,
    Delete,
    NativeQuery,
}

impl KnownActions {
    pub fn name(&self) -> &'static str {
        match self {
            KnownActions::None => "None",
            KnownActions::Query => "Query",
            KnownActions::Create => "Create",
            KnownActions::CreateWith => "CreateWith",
            KnownActions::Update => "Update",
            KnownActions::UpdateWith => "UpdateWith",
            KnownActions::UpdateInsert => "UpdateInsert",
            KnownActions::InsertUpdate => "InsertUpdate",
            KnownActions::Delete => "Delete",
            KnownActions::NativeQuery => "NativeQuery",
        }
    }
}

impl fmt::Display for KnownActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub full_name: String,
    pub name: String,
    pub description: String,
    pub known_action_type: KnownActions,
    pub supports_lookup_conditions: bool,
    pub supports_input: bool,
    pub supports_bulk: bool,
    pub supports_multiple_record_operations: bool,
    pub supports_sequences: bool,
    pub supports_constraints: bool,
    pub supports_relations: bool,
}

impl ActionDefinition {
    /// Names the action after `known_action_type`; every capability starts off.
    pub fn new(known_action_type: KnownActions) -> Self {
        let name = known_action_type.name().to_string();
        Self {
            full_name: name.clone(),
            name: name.clone(),
            description: name,
            known_action_type,
            supports_lookup_conditions: false,
            supports_input: false,
            supports_bulk: false,
            supports_multiple_record_operations: false,
            supports_sequences: false,
            supports_constraints: false,
            supports_relations: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    pub full_name: String,
    pub name: String,
    pub description: String,
    pub hidden: bool,
    pub supported_action_full_names: Vec<String>,
    pub property_definitions: Vec<PropertyDefinition>,
    pub relationship_definitions: Vec<RelationshipDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub full_name: String,
    pub name: String,
    pub description: String,
    /// Logical type name, e.g. `System.Int32` or a nested object's full name.
    pub property_type: String,
    pub min_occurs: i32,
    /// `-1` for repeated properties.
    pub max_occurs: i32,
    pub size: i32,
    pub numeric_scale: i32,
    pub numeric_precision: i32,
    pub presentation_type: String,
    pub nullable: bool,
    pub is_primary_key: bool,
    pub used_in_query_select: bool,
    pub used_in_query_constraint: bool,
    pub used_in_action_input: bool,
    pub used_in_action_output: bool,
    pub used_in_lookup_condition: bool,
    pub used_in_query_sequence: bool,
    pub required_in_action_input: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipType {
    #[default]
    Parent,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDefinition {
    pub full_name: String,
    pub name: String,
    pub description: String,
    pub relationship_type: RelationshipType,
    pub this_object_definition_full_name: String,
    pub this_properties: String,
    pub related_object_definition_full_name: String,
    pub related_properties: String,
}

/// Replication-service method; no provider in this crate derives these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub full_name: String,
    pub name: String,
    pub description: String,
    pub input_object_definition: Option<ObjectDefinition>,
    pub output_object_definition: Option<ObjectDefinition>,
}
