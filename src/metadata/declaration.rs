//! Static declarations that metadata is derived from.
//!
//! Domain types implement [`Entity`] to describe their object marker, the
//! actions they support and their members. An [`EntityRegistry`] lists the
//! declared types in a fixed order and plays the part of the scanned assembly.

use super::definitions::ActionDefinition;
use super::MetadataError;

/// Object-level marker. A blank `full_name` falls back to the type name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMarker {
    pub full_name: String,
    pub name: String,
    pub description: String,
    pub hidden: bool,
}

impl ObjectMarker {
    pub fn resolve_full_name(&self, type_name: &str) -> String {
        resolve_full_name(&self.full_name, type_name)
    }
}

/// Member-level marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMarker {
    pub full_name: String,
    pub name: String,
    pub description: String,
    /// Explicit logical type; when `None` it is derived from the member type.
    pub property_type: Option<String>,
    pub min_occurs: i32,
    pub size: i32,
    pub numeric_scale: i32,
    pub numeric_precision: i32,
    pub presentation_type: String,
    pub is_primary_key: bool,
    pub used_in_query_select: bool,
    pub used_in_query_constraint: bool,
    pub used_in_action_input: bool,
    pub used_in_action_output: bool,
    pub used_in_lookup_condition: bool,
    pub used_in_query_sequence: bool,
    pub required_in_action_input: bool,
}

impl Default for PropertyMarker {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            name: String::new(),
            description: String::new(),
            property_type: None,
            min_occurs: 0,
            size: 0,
            numeric_scale: 0,
            numeric_precision: 0,
            presentation_type: String::new(),
            is_primary_key: false,
            used_in_query_select: true,
            used_in_query_constraint: false,
            used_in_action_input: true,
            used_in_action_output: true,
            used_in_lookup_condition: false,
            used_in_query_sequence: true,
            required_in_action_input: false,
        }
    }
}

impl PropertyMarker {
    pub fn resolve_full_name(&self, member_name: &str) -> String {
        resolve_full_name(&self.full_name, member_name)
    }
}

/// Declared full name, trimmed, or the fallback when it is blank.
pub fn resolve_full_name(declared: &str, fallback: &str) -> String {
    let declared = declared.trim();
    if declared.is_empty() {
        fallback.trim().to_string()
    } else {
        declared.to_string()
    }
}

/// Types the host treats as built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinType {
    Boolean,
    Byte,
    Char,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    String,
    DateTime,
    Guid,
    Object,
}

impl BuiltinType {
    pub fn full_name(&self) -> &'static str {
        match self {
            BuiltinType::Boolean => "System.Boolean",
            BuiltinType::Byte => "System.Byte",
            BuiltinType::Char => "System.Char",
            BuiltinType::Int16 => "System.Int16",
            BuiltinType::Int32 => "System.Int32",
            BuiltinType::Int64 => "System.Int64",
            BuiltinType::Single => "System.Single",
            BuiltinType::Double => "System.Double",
            BuiltinType::Decimal => "System.Decimal",
            BuiltinType::String => "System.String",
            BuiltinType::DateTime => "System.DateTime",
            BuiltinType::Guid => "System.Guid",
            BuiltinType::Object => "System.Object",
        }
    }

    pub fn is_value_type(&self) -> bool {
        !matches!(self, BuiltinType::String | BuiltinType::Object)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
}

/// Shape of a member's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Builtin(BuiltinType),
    Named {
        full_name: String,
        kind: TypeKind,
        /// Resolved object full name when the type carries an object marker.
        object_full_name: Option<String>,
    },
    /// Optional value-type wrapper.
    Nullable(Box<TypeRef>),
    /// Array or enumerable of the inner type.
    Sequence(Box<TypeRef>),
}

impl TypeRef {
    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    pub fn sequence(inner: TypeRef) -> Self {
        TypeRef::Sequence(Box::new(inner))
    }

    pub fn named(full_name: impl Into<String>, kind: TypeKind) -> Self {
        TypeRef::Named {
            full_name: full_name.into(),
            kind,
            object_full_name: None,
        }
    }

    /// Reference to another declared entity type.
    pub fn entity<E: Entity>() -> Self {
        TypeRef::Named {
            full_name: format!("{}.{}", E::NAMESPACE, E::TYPE_NAME),
            kind: E::KIND,
            object_full_name: E::object_definition().map(|marker| marker.resolve_full_name(E::TYPE_NAME)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeRef::Nullable(_))
    }

    pub fn is_enumerable(&self) -> bool {
        matches!(self, TypeRef::Sequence(_))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, TypeRef::Builtin(_))
    }

    pub fn is_value_type(&self) -> bool {
        match self {
            TypeRef::Builtin(builtin) => builtin.is_value_type(),
            TypeRef::Named { kind, .. } => matches!(kind, TypeKind::Struct | TypeKind::Enum),
            TypeRef::Nullable(_) => true,
            TypeRef::Sequence(_) => false,
        }
    }

    /// Peels one nullable wrapper or one sequence level (and the nullable
    /// wrapper of its element).
    pub fn property_definition_type(&self) -> &TypeRef {
        match self {
            TypeRef::Sequence(element) => match element.as_ref() {
                TypeRef::Nullable(inner) => inner.as_ref(),
                other => other,
            },
            TypeRef::Nullable(inner) => inner.as_ref(),
            other => other,
        }
    }

    pub fn full_name(&self) -> String {
        match self {
            TypeRef::Builtin(builtin) => builtin.full_name().to_string(),
            TypeRef::Named { full_name, .. } => full_name.clone(),
            TypeRef::Nullable(inner) => format!("System.Nullable`1[{}]", inner.full_name()),
            TypeRef::Sequence(inner) => format!("{}[]", inner.full_name()),
        }
    }

    /// Full name with a nullable wrapper unwrapped.
    pub fn type_name(&self) -> String {
        match self {
            TypeRef::Nullable(inner) => inner.full_name(),
            other => other.full_name(),
        }
    }
}

/// A field or property of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub declared_type: TypeRef,
    pub property: Option<PropertyMarker>,
}

impl Member {
    pub fn property(name: &'static str, declared_type: TypeRef, marker: PropertyMarker) -> Self {
        Self {
            name,
            declared_type,
            property: Some(marker),
        }
    }

    pub fn unmarked(name: &'static str, declared_type: TypeRef) -> Self {
        Self {
            name,
            declared_type,
            property: None,
        }
    }
}

/// Implemented by every domain type the connector exposes.
pub trait Entity {
    const TYPE_NAME: &'static str;
    const NAMESPACE: &'static str;
    const KIND: TypeKind = TypeKind::Class;

    fn object_definition() -> Option<ObjectMarker> {
        None
    }

    fn supported_actions() -> Vec<ActionDefinition> {
        Vec::new()
    }

    fn members() -> Vec<Member> {
        Vec::new()
    }
}

/// What a type filter sees of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityType {
    pub name: &'static str,
    pub namespace: &'static str,
    pub kind: TypeKind,
}

impl EntityType {
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

#[derive(Clone)]
pub struct EntityEntry {
    pub entity_type: EntityType,
    pub object_definition: fn() -> Option<ObjectMarker>,
    pub supported_actions: fn() -> Vec<ActionDefinition>,
    pub members: fn() -> Vec<Member>,
}

impl std::fmt::Debug for EntityEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityEntry")
            .field("entity_type", &self.entity_type)
            .finish_non_exhaustive()
    }
}

/// Ordered set of declared types; registration order is scan order.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entries: Vec<EntityEntry>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<E: Entity>(mut self) -> Self {
        self.entries.push(EntityEntry {
            entity_type: EntityType {
                name: E::TYPE_NAME,
                namespace: E::NAMESPACE,
                kind: E::KIND,
            },
            object_definition: E::object_definition,
            supported_actions: E::supported_actions,
            members: E::members,
        });
        self
    }

    pub fn entries(&self) -> &[EntityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Object full name declared on `E`.
pub fn object_definition_full_name<E: Entity>() -> Result<String, MetadataError> {
    E::object_definition()
        .map(|marker| marker.resolve_full_name(E::TYPE_NAME))
        .ok_or_else(|| MetadataError::MissingObjectDefinition {
            type_name: format!("{}.{}", E::NAMESPACE, E::TYPE_NAME),
        })
}

/// Property full name declared on member `member_name` of `E`.
pub fn property_definition_full_name<E: Entity>(member_name: &str) -> Result<String, MetadataError> {
    E::members()
        .into_iter()
        .find(|member| member.name == member_name)
        .and_then(|member| member.property)
        .map(|marker| marker.resolve_full_name(member_name))
        .ok_or_else(|| MetadataError::MissingPropertyDefinition {
            type_name: format!("{}.{}", E::NAMESPACE, E::TYPE_NAME),
            member: member_name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Address;

    impl Entity for Address {
        const TYPE_NAME: &'static str = "Address";
        const NAMESPACE: &'static str = "tests.declaration";

        fn object_definition() -> Option<ObjectMarker> {
            Some(ObjectMarker {
                full_name: "  PostalAddress ".to_string(),
                ..ObjectMarker::default()
            })
        }

        fn members() -> Vec<Member> {
            vec![
                Member::property(
                    "Street",
                    TypeRef::Builtin(BuiltinType::String),
                    PropertyMarker {
                        full_name: " street_line ".to_string(),
                        ..PropertyMarker::default()
                    },
                ),
                Member::property("City", TypeRef::Builtin(BuiltinType::String), PropertyMarker::default()),
                Member::unmarked("Internal", TypeRef::Builtin(BuiltinType::Int32)),
            ]
        }
    }

    struct Plain;

    impl Entity for Plain {
        const TYPE_NAME: &'static str = "Plain";
        const NAMESPACE: &'static str = "tests.declaration";
    }

    #[test]
    fn test_property_marker_defaults() {
        let marker = PropertyMarker::default();
        assert!(marker.used_in_query_select);
        assert!(marker.used_in_action_input);
        assert!(marker.used_in_action_output);
        assert!(marker.used_in_query_sequence);
        assert!(!marker.used_in_query_constraint);
        assert!(!marker.used_in_lookup_condition);
        assert!(!marker.required_in_action_input);
        assert!(!marker.is_primary_key);
    }

    #[test]
    fn test_resolve_full_name() {
        assert_eq!(resolve_full_name("", "Id"), "Id");
        assert_eq!(resolve_full_name(" \t ", "Id"), "Id");
        assert_eq!(resolve_full_name("  Key ", "Id"), "Key");
    }

    #[test]
    fn test_property_definition_type_peels_one_level() {
        let int = TypeRef::Builtin(BuiltinType::Int32);
        assert_eq!(TypeRef::nullable(int.clone()).property_definition_type(), &int);
        assert_eq!(TypeRef::sequence(int.clone()).property_definition_type(), &int);
        assert_eq!(
            TypeRef::sequence(TypeRef::nullable(int.clone())).property_definition_type(),
            &int
        );
        let nested = TypeRef::sequence(TypeRef::sequence(int.clone()));
        assert_eq!(nested.property_definition_type(), &TypeRef::sequence(int.clone()));
        assert_eq!(int.property_definition_type(), &int);
    }

    #[test]
    fn test_type_predicates() {
        let string = TypeRef::Builtin(BuiltinType::String);
        assert!(!string.is_enumerable());
        assert!(!string.is_value_type());
        assert!(TypeRef::Builtin(BuiltinType::Int32).is_value_type());
        assert!(TypeRef::named("tests.Color", TypeKind::Enum).is_value_type());
        assert!(!TypeRef::named("tests.Shape", TypeKind::Interface).is_value_type());
        assert!(TypeRef::nullable(TypeRef::Builtin(BuiltinType::Int32)).is_nullable());
        assert!(TypeRef::sequence(string).is_enumerable());
    }

    #[test]
    fn test_type_name_unwraps_nullable() {
        let nullable = TypeRef::nullable(TypeRef::Builtin(BuiltinType::DateTime));
        assert_eq!(nullable.type_name(), "System.DateTime");
        assert_eq!(nullable.full_name(), "System.Nullable`1[System.DateTime]");
    }

    #[test]
    fn test_entity_type_ref_carries_object_full_name() {
        match TypeRef::entity::<Address>() {
            TypeRef::Named {
                full_name,
                object_full_name,
                ..
            } => {
                assert_eq!(full_name, "tests.declaration.Address");
                assert_eq!(object_full_name.as_deref(), Some("PostalAddress"));
            }
            other => panic!("unexpected type ref {other:?}"),
        }
        match TypeRef::entity::<Plain>() {
            TypeRef::Named { object_full_name, .. } => assert!(object_full_name.is_none()),
            other => panic!("unexpected type ref {other:?}"),
        }
    }

    #[test]
    fn test_object_definition_full_name_lookup() {
        assert_eq!(object_definition_full_name::<Address>().unwrap(), "PostalAddress");
        let err = object_definition_full_name::<Plain>().unwrap_err();
        assert!(err.to_string().contains("tests.declaration.Plain"));
    }

    #[test]
    fn test_property_definition_full_name_lookup() {
        assert_eq!(property_definition_full_name::<Address>("Street").unwrap(), "street_line");
        assert_eq!(property_definition_full_name::<Address>("City").unwrap(), "City");
        let unmarked = property_definition_full_name::<Address>("Internal").unwrap_err();
        assert!(unmarked.to_string().contains("Internal"));
        assert!(property_definition_full_name::<Address>("Missing").is_err());
    }

    #[test]
    fn test_registry_keeps_registration_order() {
        let registry = EntityRegistry::new().register::<Plain>().register::<Address>();
        let names: Vec<_> = registry.entries().iter().map(|e| e.entity_type.name).collect();
        assert_eq!(names, vec!["Plain", "Address"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entries()[1].entity_type.full_name(), "tests.declaration.Address");
        assert!((registry.entries()[0].supported_actions)().is_empty());
    }
}
