//! Entities exposed by the connector.

use crate::metadata::{
    ActionDefinition, BuiltinType, Entity, EntityRegistry, KnownActions, Member, ObjectMarker, PropertyMarker, TypeRef,
};
use serde::{Deserialize, Serialize};

pub const NAMESPACE: &str = "scribe_filter.domain";

/// 使用 Scribe 平台的组织
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Organization {
    pub id: Option<i32>,
    pub name: String,
    pub parent_id: Option<i32>,
}

impl Entity for Organization {
    const TYPE_NAME: &'static str = "Organization";
    const NAMESPACE: &'static str = NAMESPACE;

    fn object_definition() -> Option<ObjectMarker> {
        Some(ObjectMarker::default())
    }

    fn supported_actions() -> Vec<ActionDefinition> {
        vec![
            ActionDefinition::new(KnownActions::Query),
            ActionDefinition::new(KnownActions::Create),
            ActionDefinition::new(KnownActions::Update),
            ActionDefinition::new(KnownActions::Delete),
        ]
    }

    fn members() -> Vec<Member> {
        let input = PropertyMarker {
            used_in_action_output: true,
            used_in_action_input: true,
            required_in_action_input: true,
            used_in_query_constraint: true,
            ..PropertyMarker::default()
        };
        vec![
            Member::property(
                "Id",
                TypeRef::nullable(TypeRef::Builtin(BuiltinType::Int32)),
                PropertyMarker {
                    used_in_action_output: true,
                    used_in_action_input: false,
                    required_in_action_input: false,
                    used_in_query_constraint: true,
                    used_in_lookup_condition: false,
                    is_primary_key: true,
                    ..PropertyMarker::default()
                },
            ),
            Member::property("Name", TypeRef::Builtin(BuiltinType::String), input.clone()),
            Member::property("ParentId", TypeRef::nullable(TypeRef::Builtin(BuiltinType::Int32)), input),
        ]
    }
}

/// Every entity the connector declares, in scan order.
pub fn registry() -> EntityRegistry {
    EntityRegistry::new().register::<Organization>()
}

/// Type filter selecting the connector's own entities.
pub fn is_domain_type(entity: &crate::metadata::EntityType) -> bool {
    entity.namespace == NAMESPACE
}
