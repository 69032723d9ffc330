//! Test doubles shared by the provider tests.

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct StubbedState {
    actions: Vec<ActionDefinition>,
    objects: Vec<ObjectDefinition>,
    methods: Vec<MethodDefinition>,
}

/// In-memory provider whose `reset_metadata` empties it, counting every call.
#[derive(Debug)]
pub(crate) struct StubbedMetadataProvider {
    state: Mutex<StubbedState>,
    pub(crate) calls: AtomicUsize,
}

impl StubbedMetadataProvider {
    pub(crate) fn new() -> Self {
        let account = ObjectDefinition {
            full_name: "Account".to_string(),
            name: "Account".to_string(),
            description: "Customer account".to_string(),
            hidden: false,
            supported_action_full_names: vec!["Query".to_string(), "Create".to_string()],
            property_definitions: vec![PropertyDefinition {
                full_name: "Id".to_string(),
                property_type: "System.Int32".to_string(),
                max_occurs: 1,
                is_primary_key: true,
                ..PropertyDefinition::default()
            }],
            relationship_definitions: vec![RelationshipDefinition {
                full_name: "AccountContacts".to_string(),
                relationship_type: RelationshipType::Child,
                this_object_definition_full_name: "Account".to_string(),
                related_object_definition_full_name: "Contact".to_string(),
                ..RelationshipDefinition::default()
            }],
        };
        let contact = ObjectDefinition {
            full_name: "Contact".to_string(),
            name: "Contact".to_string(),
            property_definitions: vec![PropertyDefinition {
                full_name: "Email".to_string(),
                property_type: "System.String".to_string(),
                nullable: true,
                max_occurs: 1,
                ..PropertyDefinition::default()
            }],
            relationship_definitions: vec![RelationshipDefinition {
                full_name: "ContactAccount".to_string(),
                this_object_definition_full_name: "Contact".to_string(),
                related_object_definition_full_name: "Account".to_string(),
                ..RelationshipDefinition::default()
            }],
            ..ObjectDefinition::default()
        };
        let sync = MethodDefinition {
            full_name: "Sync".to_string(),
            name: "Sync".to_string(),
            description: "Replicate accounts".to_string(),
            input_object_definition: Some(account.clone()),
            output_object_definition: Some(contact.clone()),
        };

        Self {
            state: Mutex::new(StubbedState {
                actions: vec![
                    ActionDefinition::new(KnownActions::Query),
                    ActionDefinition::new(KnownActions::Create),
                ],
                objects: vec![account, contact],
                methods: vec![sync],
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn state(&self) -> std::sync::MutexGuard<'_, StubbedState> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap()
    }
}

impl MetadataProvider for StubbedMetadataProvider {
    fn retrieve_action_definitions(&self) -> Result<Vec<ActionDefinition>, MetadataError> {
        Ok(self.state().actions.clone())
    }

    fn retrieve_object_definitions(
        &self,
        should_get_properties: bool,
        should_get_relations: bool,
    ) -> Result<Vec<ObjectDefinition>, MetadataError> {
        Ok(self
            .state()
            .objects
            .iter()
            .map(|object| ObjectDefinition {
                property_definitions: if should_get_properties {
                    object.property_definitions.clone()
                } else {
                    Vec::new()
                },
                relationship_definitions: if should_get_relations {
                    object.relationship_definitions.clone()
                } else {
                    Vec::new()
                },
                ..object.clone()
            })
            .collect())
    }

    fn retrieve_object_definition(
        &self,
        object_name: &str,
        _should_get_properties: bool,
        _should_get_relations: bool,
    ) -> Result<ObjectDefinition, MetadataError> {
        self.state()
            .objects
            .iter()
            .find(|object| object.full_name == object_name)
            .cloned()
            .ok_or_else(|| MetadataError::ObjectDefinitionNotFound {
                name: object_name.to_string(),
            })
    }

    fn retrieve_method_definitions(&self, should_get_parameters: bool) -> Result<Vec<MethodDefinition>, MetadataError> {
        Ok(self
            .state()
            .methods
            .iter()
            .map(|method| MethodDefinition {
                input_object_definition: method
                    .input_object_definition
                    .clone()
                    .filter(|_| should_get_parameters),
                output_object_definition: method
                    .output_object_definition
                    .clone()
                    .filter(|_| should_get_parameters),
                ..method.clone()
            })
            .collect())
    }

    fn retrieve_method_definition(
        &self,
        object_name: &str,
        _should_get_parameters: bool,
    ) -> Result<MethodDefinition, MetadataError> {
        self.state()
            .methods
            .iter()
            .find(|method| method.full_name == object_name)
            .cloned()
            .ok_or_else(|| MetadataError::MethodDefinitionNotFound {
                name: object_name.to_string(),
            })
    }

    fn reset_metadata(&self) -> Result<(), MetadataError> {
        *self.state() = StubbedState::default();
        Ok(())
    }
}

/// Fails every operation with the configured error.
#[derive(Debug)]
pub(crate) struct ThrowingMetadataProvider {
    pub(crate) error: MetadataError,
}

impl ThrowingMetadataProvider {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            error: MetadataError::Provider(message.to_string()),
        }
    }
}

impl MetadataProvider for ThrowingMetadataProvider {
    fn retrieve_action_definitions(&self) -> Result<Vec<ActionDefinition>, MetadataError> {
        Err(self.error.clone())
    }

    fn retrieve_object_definitions(&self, _: bool, _: bool) -> Result<Vec<ObjectDefinition>, MetadataError> {
        Err(self.error.clone())
    }

    fn retrieve_object_definition(&self, _: &str, _: bool, _: bool) -> Result<ObjectDefinition, MetadataError> {
        Err(self.error.clone())
    }

    fn retrieve_method_definitions(&self, _: bool) -> Result<Vec<MethodDefinition>, MetadataError> {
        Err(self.error.clone())
    }

    fn retrieve_method_definition(&self, _: &str, _: bool) -> Result<MethodDefinition, MetadataError> {
        Err(self.error.clone())
    }

    fn reset_metadata(&self) -> Result<(), MetadataError> {
        Err(self.error.clone())
    }
}
