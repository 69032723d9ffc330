//! Derives metadata from the declarations registered in an [`EntityRegistry`].

use super::comparer::FullNameAndDescription;
use super::declaration::{EntityEntry, EntityRegistry, EntityType, Member, ObjectMarker, TypeRef};
use super::definitions::{ActionDefinition, MethodDefinition, ObjectDefinition, PropertyDefinition};
use super::{MetadataError, MetadataProvider};
use tracing::debug;

type TypeFilter = Box<dyn Fn(&EntityType) -> bool + Send + Sync>;

/// Stateless provider: every call rescans the registry.
pub struct AttributeBasedMetadataProvider {
    registry: EntityRegistry,
    type_filter: TypeFilter,
}

impl std::fmt::Debug for AttributeBasedMetadataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeBasedMetadataProvider")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl AttributeBasedMetadataProvider {
    pub fn new(registry: EntityRegistry, type_filter: impl Fn(&EntityType) -> bool + Send + Sync + 'static) -> Self {
        Self {
            registry,
            type_filter: Box::new(type_filter),
        }
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// 通过过滤器且带有对象标记的类型，按注册顺序
    fn marked_entries(&self) -> impl Iterator<Item = (&EntityEntry, ObjectMarker)> + '_ {
        self.registry
            .entries()
            .iter()
            .filter(move |entry| (self.type_filter)(&entry.entity_type))
            .filter_map(|entry| (entry.object_definition)().map(|marker| (entry, marker)))
    }

    fn object_definition(entry: &EntityEntry, marker: ObjectMarker, should_get_properties: bool) -> ObjectDefinition {
        let property_definitions = if should_get_properties {
            (entry.members)()
                .into_iter()
                .filter_map(property_definition)
                .collect()
        } else {
            Vec::new()
        };

        ObjectDefinition {
            full_name: marker.resolve_full_name(entry.entity_type.name),
            name: marker.name,
            description: marker.description,
            hidden: marker.hidden,
            supported_action_full_names: (entry.supported_actions)()
                .into_iter()
                .map(|action| action.full_name)
                .collect(),
            property_definitions,
            relationship_definitions: Vec::new(),
        }
    }
}

fn property_definition(member: Member) -> Option<PropertyDefinition> {
    let marker = member.property?;
    let declared = &member.declared_type;

    let property_type = marker
        .property_type
        .clone()
        .unwrap_or_else(|| scalar_type_name(declared.property_definition_type()));
    let nullable = !marker.is_primary_key && (declared.is_nullable() || !declared.is_value_type());
    let max_occurs = if declared.is_enumerable() { -1 } else { 1 };

    Some(PropertyDefinition {
        full_name: marker.resolve_full_name(member.name),
        name: marker.name,
        description: marker.description,
        property_type,
        min_occurs: marker.min_occurs,
        max_occurs,
        size: marker.size,
        numeric_scale: marker.numeric_scale,
        numeric_precision: marker.numeric_precision,
        presentation_type: marker.presentation_type,
        nullable,
        is_primary_key: marker.is_primary_key,
        used_in_query_select: marker.used_in_query_select,
        used_in_query_constraint: marker.used_in_query_constraint,
        used_in_action_input: marker.used_in_action_input,
        used_in_action_output: marker.used_in_action_output,
        used_in_lookup_condition: marker.used_in_lookup_condition,
        used_in_query_sequence: marker.used_in_query_sequence,
        required_in_action_input: marker.required_in_action_input,
    })
}

/// 嵌套的实体类型引用其对象全名，其余使用类型全名
fn scalar_type_name(scalar: &TypeRef) -> String {
    match scalar {
        TypeRef::Named {
            object_full_name: Some(object_full_name),
            ..
        } => object_full_name.clone(),
        other => other.full_name(),
    }
}

impl MetadataProvider for AttributeBasedMetadataProvider {
    fn retrieve_action_definitions(&self) -> Result<Vec<ActionDefinition>, MetadataError> {
        let actions = self
            .marked_entries()
            .filter(|(_, marker)| !marker.hidden)
            .flat_map(|(entry, _)| (entry.supported_actions)());
        let actions = FullNameAndDescription.distinct(actions);
        debug!(count = actions.len(), "derived action definitions");
        Ok(actions)
    }

    fn retrieve_object_definitions(
        &self,
        should_get_properties: bool,
        _should_get_relations: bool,
    ) -> Result<Vec<ObjectDefinition>, MetadataError> {
        let objects: Vec<_> = self
            .marked_entries()
            .map(|(entry, marker)| Self::object_definition(entry, marker, should_get_properties))
            .collect();
        debug!(count = objects.len(), should_get_properties, "derived object definitions");
        Ok(objects)
    }

    fn retrieve_object_definition(
        &self,
        object_name: &str,
        should_get_properties: bool,
        should_get_relations: bool,
    ) -> Result<ObjectDefinition, MetadataError> {
        let mut matches: Vec<_> = self
            .retrieve_object_definitions(should_get_properties, should_get_relations)?
            .into_iter()
            .filter(|object| object.full_name == object_name)
            .collect();

        match matches.len() {
            0 => Err(MetadataError::ObjectDefinitionNotFound {
                name: object_name.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            count => Err(MetadataError::AmbiguousObjectDefinition {
                name: object_name.to_string(),
                count,
            }),
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
