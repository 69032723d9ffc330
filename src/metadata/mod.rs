//! Metadata providers describing the connector's objects and actions.
//!
//! Every provider implements [`MetadataProvider`], so the decorators compose
//! freely, e.g. `Logging(Caching(AttributeBased))`.

pub mod attribute_based;
pub mod caching;
pub mod comparer;
pub mod declaration;
pub mod definitions;
pub mod hardcoded;
pub mod logging;

#[cfg(test)]
pub(crate) mod testing;

pub use attribute_based::AttributeBasedMetadataProvider;
pub use caching::CachingMetadataProvider;
pub use comparer::FullNameAndDescription;
pub use declaration::{
    object_definition_full_name, property_definition_full_name, BuiltinType, Entity, EntityEntry, EntityRegistry,
    EntityType, Member, ObjectMarker, PropertyMarker, TypeKind, TypeRef,
};
pub use definitions::{
    ActionDefinition, KnownActions, MethodDefinition, ObjectDefinition, PropertyDefinition, RelationshipDefinition,
    RelationshipType,
};
pub use hardcoded::HardcodedMetadataProvider;
pub use logging::LoggingMetadataProvider;

use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("ObjectDefinition with {name} name was not found (parameter: object_name)")]
    ObjectDefinitionNotFound { name: String },
    #[error("MethodDefinition with {name} name was not found (parameter: object_name)")]
    MethodDefinitionNotFound { name: String },
    #[error("{count} object definitions share the {name} name (parameter: object_name)")]
    AmbiguousObjectDefinition { name: String, count: usize },
    #[error("Definition full name {name} is declared more than once")]
    DuplicateFullName { name: String },
    #[error("Can't find object definition for {type_name} type")]
    MissingObjectDefinition { type_name: String },
    #[error("Can't find property definition for {member} property in {type_name} type")]
    MissingPropertyDefinition { type_name: String, member: String },
    #[error("Replication Services are not supported")]
    ReplicationServicesNotSupported,
    #[error("{0}")]
    Provider(String),
}

/// Source of object, action and method metadata for the host platform.
pub trait MetadataProvider {
    fn retrieve_action_definitions(&self) -> Result<Vec<ActionDefinition>, MetadataError>;

    fn retrieve_object_definitions(
        &self,
        should_get_properties: bool,
        should_get_relations: bool,
    ) -> Result<Vec<ObjectDefinition>, MetadataError>;

    fn retrieve_object_definition(
        &self,
        object_name: &str,
        should_get_properties: bool,
        should_get_relations: bool,
    ) -> Result<ObjectDefinition, MetadataError>;

    fn retrieve_method_definitions(&self, should_get_parameters: bool) -> Result<Vec<MethodDefinition>, MetadataError>;

    fn retrieve_method_definition(
        &self,
        object_name: &str,
        should_get_parameters: bool,
    ) -> Result<MethodDefinition, MetadataError>;

    /// Drops derived state so the next retrieval starts fresh.
    fn reset_metadata(&self) -> Result<(), MetadataError>;

    /// Releases held resources. Idempotent and infallible.
    fn dispose(&self) {}
}

macro_rules! forward_metadata_provider {
    ($wrapper:ty) => {
        impl<P: MetadataProvider + ?Sized> MetadataProvider for $wrapper {
            fn retrieve_action_definitions(&self) -> Result<Vec<ActionDefinition>, MetadataError> {
                (**self).retrieve_action_definitions()
            }

            fn retrieve_object_definitions(
                &self,
                should_get_properties: bool,
                should_get_relations: bool,
            ) -> Result<Vec<ObjectDefinition>, MetadataError> {
                (**self).retrieve_object_definitions(should_get_properties, should_get_relations)
            }

            fn retrieve_object_definition(
                &self,
                object_name: &str,
                should_get_properties: bool,
                should_get_relations: bool,
            ) -> Result<ObjectDefinition, MetadataError> {
                (**self).retrieve_object_definition(object_name, should_get_properties, should_get_relations)
            }

            fn retrieve_method_definitions(
                &self,
                should_get_parameters: bool,
            ) -> Result<Vec<MethodDefinition>, MetadataError> {
                (**self).retrieve_method_definitions(should_get_parameters)
            }

            fn retrieve_method_definition(
                &self,
                object_name: &str,
                should_get_parameters: bool,
            ) -> Result<MethodDefinition, MetadataError> {
                (**self).retrieve_method_definition(object_name, should_get_parameters)
            }

            fn reset_metadata(&self) -> Result<(), MetadataError> {
                (**self).reset_metadata()
            }

            fn dispose(&self) {
                (**self).dispose()
            }
        }
    };
}

forward_metadata_provider!(Box<P>);
forward_metadata_provider!(Arc<P>);
