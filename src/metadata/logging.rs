//! Tracing decorator for metadata providers.

use super::definitions::{ActionDefinition, MethodDefinition, ObjectDefinition};
use super::{MetadataError, MetadataProvider};
use tracing::{error, trace};

/// Forwards every call to the decorated provider, tracing entry and exit
/// under the connector's name.
#[derive(Debug)]
pub struct LoggingMetadataProvider<P> {
    decorated: P,
    connector_name: String,
}

impl<P: MetadataProvider> LoggingMetadataProvider<P> {
    pub fn new(decorated: P, connector_name: impl Into<String>) -> Self {
        Self {
            decorated,
            connector_name: connector_name.into(),
        }
    }

    pub fn decorated(&self) -> &P {
        &self.decorated
    }

    pub fn connector_name(&self) -> &str {
        &self.connector_name
    }

    fn traced<T>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&P) -> Result<T, MetadataError>,
    ) -> Result<T, MetadataError> {
        let connector = self.connector_name.as_str();
        trace!(target: "scribe_filter::metadata", connector, operation, "Entering {}", operation);
        match call(&self.decorated) {
            Ok(value) => {
                trace!(target: "scribe_filter::metadata", connector, operation, "Leaving {}", operation);
                Ok(value)
            }
            Err(err) => {
                error!(
                    target: "scribe_filter::metadata",
                    connector,
                    operation,
                    error = %err,
                    "{} failed: {}",
                    operation,
                    err
                );
                Err(err)
            }
        }
    }
}

impl<P: MetadataProvider> MetadataProvider for LoggingMetadataProvider<P> {
    fn retrieve_action_definitions(&self) -> Result<Vec<ActionDefinition>, MetadataError> {
        self.traced("RetrieveActionDefinitions", |p| p.retrieve_action_definitions())
    }

    fn retrieve_object_definitions(
        &self,
        should_get_properties: bool,
        should_get_relations: bool,
    ) -> Result<Vec<ObjectDefinition>, MetadataError> {
        self.traced("RetrieveObjectDefinitions", |p| {
            p.retrieve_object_definitions(should_get_properties, should_get_relations)
        })
    }

    fn retrieve_object_definition(
        &self,
        object_name: &str,
        should_get_properties: bool,
        should_get_relations: bool,
    ) -> Result<ObjectDefinition, MetadataError> {
        self.traced("RetrieveObjectDefinition", |p| {
            p.retrieve_object_definition(object_name, should_get_properties, should_get_relations)
        })
    }

    fn retrieve_method_definitions(&self, should_get_parameters: bool) -> Result<Vec<MethodDefinition>, MetadataError> {
        self.traced("RetrieveMethodDefinitions", |p| {
            p.retrieve_method_definitions(should_get_parameters)
        })
    }

    fn retrieve_method_definition(
        &self,
        object_name: &str,
        should_get_parameters: bool,
    ) -> Result<MethodDefinition, MetadataError> {
        self.traced("RetrieveMethodDefinition", |p| {
            p.retrieve_method_definition(object_name, should_get_parameters)
        })
    }

    fn reset_metadata(&self) -> Result<(), MetadataError> {
        self.traced("ResetMetadata", |p| p.reset_metadata())
    }

    // 被装饰者的生命周期由外部管理
    fn dispose(&self) {}
}
