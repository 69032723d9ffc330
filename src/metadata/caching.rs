//! Read-through cache in front of another provider.

use super::definitions::{ActionDefinition, MethodDefinition, ObjectDefinition};
use super::{MetadataError, MetadataProvider};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Definitions in source order with a full-name index.
#[derive(Debug, Clone)]
struct DefinitionIndex<T> {
    items: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T> DefinitionIndex<T> {
    fn build(items: Vec<T>, full_name: impl Fn(&T) -> &str) -> Result<Self, MetadataError> {
        let mut positions = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            let name = full_name(item);
            if positions.insert(name.to_string(), position).is_some() {
                return Err(MetadataError::DuplicateFullName { name: name.to_string() });
            }
        }
        Ok(Self { items, positions })
    }

    fn get(&self, full_name: &str) -> Option<&T> {
        self.positions.get(full_name).map(|&position| &self.items[position])
    }
}

/// 缓存槽位：`None` 表示尚未预热，与内容是否为空无关
#[derive(Debug, Default)]
struct MetadataCache {
    actions: Option<Vec<ActionDefinition>>,
    objects: Option<DefinitionIndex<ObjectDefinition>>,
    methods: Option<DefinitionIndex<MethodDefinition>>,
}

/// Fetches each kind of definition from the decorated provider once, in its
/// fullest shape, and answers every later request from memory.
#[derive(Debug)]
pub struct CachingMetadataProvider<P> {
    decorated: P,
    cache: Mutex<MetadataCache>,
}

impl<P: MetadataProvider> CachingMetadataProvider<P> {
    pub fn new(decorated: P) -> Self {
        Self {
            decorated,
            cache: Mutex::new(MetadataCache::default()),
        }
    }

    pub fn decorated(&self) -> &P {
        &self.decorated
    }

    fn cache(&self) -> MutexGuard<'_, MetadataCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_actions<R>(&self, read: impl FnOnce(&[ActionDefinition]) -> R) -> Result<R, MetadataError> {
        let mut cache = self.cache();
        let actions = match cache.actions.take() {
            Some(actions) => actions,
            None => {
                debug!("warming action definition cache");
                self.decorated.retrieve_action_definitions()?
            }
        };
        Ok(read(cache.actions.insert(actions)))
    }

    fn with_objects<R>(
        &self,
        read: impl FnOnce(&DefinitionIndex<ObjectDefinition>) -> R,
    ) -> Result<R, MetadataError> {
        let mut cache = self.cache();
        let objects = match cache.objects.take() {
            Some(objects) => objects,
            None => {
                debug!("warming object definition cache");
                let objects = self.decorated.retrieve_object_definitions(true, true)?;
                DefinitionIndex::build(objects, |object| &object.full_name)?
            }
        };
        Ok(read(cache.objects.insert(objects)))
    }

    fn with_methods<R>(
        &self,
        read: impl FnOnce(&DefinitionIndex<MethodDefinition>) -> R,
    ) -> Result<R, MetadataError> {
        let mut cache = self.cache();
        let methods = match cache.methods.take() {
            Some(methods) => methods,
            None => {
                debug!("warming method definition cache");
                let methods = self.decorated.retrieve_method_definitions(true)?;
                DefinitionIndex::build(methods, |method| &method.full_name)?
            }
        };
        Ok(read(cache.methods.insert(methods)))
    }
}

fn shape_object(object: &ObjectDefinition, should_get_properties: bool, should_get_relations: bool) -> ObjectDefinition {
    ObjectDefinition {
        full_name: object.full_name.clone(),
        name: object.name.clone(),
        description: object.description.clone(),
        hidden: object.hidden,
        supported_action_full_names: object.supported_action_full_names.clone(),
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
    }
}

fn shape_method(method: &MethodDefinition, should_get_parameters: bool) -> MethodDefinition {
    MethodDefinition {
        full_name: method.full_name.clone(),
        name: method.name.clone(),
        description: method.description.clone(),
        input_object_definition: method
            .input_object_definition
            .as_ref()
            .filter(|_| should_get_parameters)
            .cloned(),
        output_object_definition: method
            .output_object_definition
            .as_ref()
            .filter(|_| should_get_parameters)
            .cloned(),
    }
}

impl<P: MetadataProvider> MetadataProvider for CachingMetadataProvider<P> {
    fn retrieve_action_definitions(&self) -> Result<Vec<ActionDefinition>, MetadataError> {
        self.with_actions(<[ActionDefinition]>::to_vec)
    }

    fn retrieve_object_definitions(
        &self,
        should_get_properties: bool,
        should_get_relations: bool,
    ) -> Result<Vec<ObjectDefinition>, MetadataError> {
        self.with_objects(|objects| {
            objects
                .items
                .iter()
                .map(|object| shape_object(object, should_get_properties, should_get_relations))
                .collect()
        })
    }

    fn retrieve_object_definition(
        &self,
        object_name: &str,
        should_get_properties: bool,
        should_get_relations: bool,
    ) -> Result<ObjectDefinition, MetadataError> {
        self.with_objects(|objects| {
            objects
                .get(object_name)
                .map(|object| shape_object(object, should_get_properties, should_get_relations))
        })?
        .ok_or_else(|| MetadataError::ObjectDefinitionNotFound {
            name: object_name.to_string(),
        })
    }

    fn retrieve_method_definitions(&self, should_get_parameters: bool) -> Result<Vec<MethodDefinition>, MetadataError> {
        self.with_methods(|methods| {
            methods
                .items
                .iter()
                .map(|method| shape_method(method, should_get_parameters))
                .collect()
        })
    }

    fn retrieve_method_definition(
        &self,
        object_name: &str,
        should_get_parameters: bool,
    ) -> Result<MethodDefinition, MetadataError> {
        self.with_methods(|methods| {
            methods
                .get(object_name)
                .map(|method| shape_method(method, should_get_parameters))
        })?
        .ok_or_else(|| MetadataError::MethodDefinitionNotFound {
            name: object_name.to_string(),
        })
    }

    /// Empties every slot; the decorated provider is left alone.
    fn reset_metadata(&self) -> Result<(), MetadataError> {
        *self.cache() = MetadataCache::default();
        debug!("metadata cache cleared");
        Ok(())
    }
}
