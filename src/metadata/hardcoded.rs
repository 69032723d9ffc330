//! Fixed metadata for the Organization object.

use super::definitions::{ActionDefinition, KnownActions, MethodDefinition, ObjectDefinition};
use super::{MetadataError, MetadataProvider};

pub const ORGANIZATION: &str = "Organization";
pub const ORGANIZATION_DESCRIPTION: &str = "Represents the entity that is using TIBCO Scribe ® Online";

#[derive(Debug, Clone, Copy, Default)]
pub struct HardcodedMetadataProvider;

impl HardcodedMetadataProvider {
    pub fn new() -> Self {
        Self
    }

    fn organization() -> ObjectDefinition {
        ObjectDefinition {
            full_name: ORGANIZATION.to_string(),
            name: ORGANIZATION.to_string(),
            description: ORGANIZATION_DESCRIPTION.to_string(),
            hidden: false,
            supported_action_full_names: [
                KnownActions::Query,
                KnownActions::Create,
                KnownActions::Update,
                KnownActions::Delete,
            ]
            .iter()
            .map(|action| action.name().to_string())
            .collect(),
            property_definitions: Vec::new(),
            relationship_definitions: Vec::new(),
        }
    }
}

impl MetadataProvider for HardcodedMetadataProvider {
    fn retrieve_action_definitions(&self) -> Result<Vec<ActionDefinition>, MetadataError> {
        Ok(vec![
            ActionDefinition {
                supports_constraints: true,
                supports_sequences: true,
                supports_lookup_conditions: true,
                ..ActionDefinition::new(KnownActions::Query)
            },
            ActionDefinition {
                supports_input: true,
                ..ActionDefinition::new(KnownActions::Create)
            },
            ActionDefinition {
                supports_input: true,
                supports_lookup_conditions: true,
                ..ActionDefinition::new(KnownActions::Update)
            },
            ActionDefinition {
                supports_lookup_conditions: true,
                ..ActionDefinition::new(KnownActions::Delete)
            },
        ])
    }

    fn retrieve_object_definitions(
        &self,
        _should_get_properties: bool,
        _should_get_relations: bool,
    ) -> Result<Vec<ObjectDefinition>, MetadataError> {
        Ok(vec![Self::organization()])
    }

    fn retrieve_object_definition(
        &self,
        object_name: &str,
        _should_get_properties: bool,
        _should_get_relations: bool,
    ) -> Result<ObjectDefinition, MetadataError> {
        if object_name == ORGANIZATION {
            Ok(Self::organization())
        } else {
            Err(MetadataError::ObjectDefinitionNotFound {
                name: object_name.to_string(),
            })
        }
    }

    fn retrieve_method_definitions(&self, _should_get_parameters: bool) -> Result<Vec<MethodDefinition>, MetadataError> {
        Err(MetadataError::ReplicationServicesNotSupported)
    }

    fn retrieve_method_definition(
        &self,
        _object_name: &str,
        _should_get_parameters: bool,
    ) -> Result<MethodDefinition, MetadataError> {
        Err(MetadataError::ReplicationServicesNotSupported)
    }

    fn reset_metadata(&self) -> Result<(), MetadataError> {
        Ok(())
    }
}
