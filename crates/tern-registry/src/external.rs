//! Externally described declarations.
//!
//! The descriptor cache does not read class files or source itself. An
//! [`ExternalDeclarationProvider`] hands it raw, unresolved descriptions
//! (`Raw*` types) which the cache transforms into descriptors.

use std::cell::Cell;

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};
use tern_core::{BuiltinType, ClassKind, DeclHash, Modality, QualifiedName};

bitflags! {
    /// Modifiers of an external declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RawModifiers: u16 {
        const FINAL = 1 << 0;
        const ABSTRACT = 1 << 1;
        const SEALED = 1 << 2;
        const STATIC = 1 << 3;
        const ENUM = 1 << 4;
        const ANNOTATION = 1 << 5;
        const INTERFACE = 1 << 6;
        const OBJECT = 1 << 7;
    }
}

impl RawModifiers {
    /// The classifier kind these modifiers describe.
    pub fn class_kind(self) -> ClassKind {
        if self.contains(Self::ANNOTATION) {
            ClassKind::Annotation
        } else if self.contains(Self::ENUM) {
            ClassKind::Enum
        } else if self.contains(Self::INTERFACE) {
            ClassKind::Interface
        } else if self.contains(Self::OBJECT) {
            ClassKind::Object
        } else {
            ClassKind::Class
        }
    }

    /// The modality these modifiers describe. Unmarked classes are open.
    pub fn modality(self) -> Modality {
        if self.contains(Self::SEALED) {
            Modality::Sealed
        } else if self.intersects(Self::ABSTRACT | Self::INTERFACE) {
            Modality::Abstract
        } else if self.intersects(Self::FINAL | Self::ENUM | Self::ANNOTATION | Self::OBJECT) {
            Modality::Final
        } else {
            Modality::Open
        }
    }

    #[inline]
    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }
}

/// An unresolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawType {
    Primitive(BuiltinType),
    Class {
        name: QualifiedName,
        arguments: Vec<RawType>,
    },
    /// A type parameter declared by the class `owner`.
    TypeParameter { owner: QualifiedName, name: String },
    Array(Box<RawType>),
}

impl RawType {
    /// A class reference without type arguments.
    pub fn class(name: &str) -> Self {
        RawType::Class {
            name: QualifiedName::from_dotted(name),
            arguments: Vec::new(),
        }
    }

    pub fn type_parameter(owner: &str, name: &str) -> Self {
        RawType::TypeParameter {
            owner: QualifiedName::from_dotted(owner),
            name: name.to_string(),
        }
    }

    pub fn array(element: RawType) -> Self {
        RawType::Array(Box::new(element))
    }

    /// Name with type arguments erased, used for signature hashing.
    pub fn erased_name(&self) -> String {
        match self {
            RawType::Primitive(b) => b.name().to_string(),
            RawType::Class { name, .. } => name.to_string(),
            RawType::TypeParameter { name, .. } => name.clone(),
            RawType::Array(element) => format!("{}[]", element.erased_name()),
        }
    }

    /// Hash of the erased name.
    pub fn erased_hash(&self) -> DeclHash {
        DeclHash::from_type_name(&self.erased_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTypeParameter {
    pub name: String,
    /// Declared upper bounds, in order. Empty when unbounded.
    pub bounds: Vec<RawType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    /// `None` when the declaration carries no parameter names.
    pub name: Option<String>,
    /// For a variadic parameter, the array type.
    pub ty: RawType,
    pub variadic: bool,
}

impl RawParameter {
    pub fn named(name: &str, ty: RawType) -> Self {
        Self {
            name: Some(name.to_string()),
            ty,
            variadic: false,
        }
    }

    pub fn unnamed(ty: RawType) -> Self {
        Self {
            name: None,
            ty,
            variadic: false,
        }
    }

    /// A variadic parameter collecting `element`s.
    pub fn variadic(name: &str, element: RawType) -> Self {
        Self {
            name: Some(name.to_string()),
            ty: RawType::array(element),
            variadic: true,
        }
    }
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMethod {
    pub name: String,
    pub parameters: Vec<RawParameter>,
    pub return_type: RawType,
    pub modifiers: RawModifiers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    pub ty: RawType,
    pub modifiers: RawModifiers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawClass {
    pub name: QualifiedName,
    pub modifiers: RawModifiers,
    pub type_parameters: Vec<RawTypeParameter>,
    pub extends: Vec<RawType>,
    pub implements: Vec<RawType>,
    pub constructors: Vec<RawMethod>,
}

impl RawClass {
    pub fn new(name: &str, modifiers: RawModifiers) -> Self {
        Self {
            name: QualifiedName::from_dotted(name),
            modifiers,
            type_parameters: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            constructors: Vec::new(),
        }
    }
}

/// Source of raw declarations for the descriptor cache.
pub trait ExternalDeclarationProvider {
    /// The class named `name`, if one exists.
    fn find_class(&self, name: &QualifiedName) -> Option<RawClass>;

    /// Whether a package named `name` exists.
    fn has_package(&self, name: &QualifiedName) -> bool;

    /// Methods of `class` named `name`.
    fn find_methods(&self, class: &QualifiedName, name: &str) -> Vec<RawMethod>;

    /// The field of `class` named `name`.
    fn find_field(&self, class: &QualifiedName, name: &str) -> Option<RawField>;
}

/// A provider over declarations held in memory.
///
/// Counts `find_class` calls per name, so callers can check that each class
/// is only described once.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    classes: FxHashMap<QualifiedName, RawClass>,
    packages: FxHashSet<QualifiedName>,
    methods: FxHashMap<(QualifiedName, String), Vec<RawMethod>>,
    fields: FxHashMap<(QualifiedName, String), RawField>,
    class_lookups: FxHashMap<QualifiedName, Cell<usize>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class; its enclosing packages become known too.
    pub fn with_class(mut self, class: RawClass) -> Self {
        let mut package = class.name.parent();
        while let Some(name) = package {
            package = name.parent();
            self.packages.insert(name);
        }
        self.class_lookups.insert(class.name.clone(), Cell::new(0));
        self.classes.insert(class.name.clone(), class);
        self
    }

    pub fn with_package(mut self, name: &str) -> Self {
        self.packages.insert(QualifiedName::from_dotted(name));
        self
    }

    pub fn with_method(mut self, class: &str, method: RawMethod) -> Self {
        self.methods
            .entry((QualifiedName::from_dotted(class), method.name.clone()))
            .or_default()
            .push(method);
        self
    }

    pub fn with_field(mut self, class: &str, field: RawField) -> Self {
        self.fields
            .insert((QualifiedName::from_dotted(class), field.name.clone()), field);
        self
    }

    /// How many times `find_class` was asked for `name`.
    pub fn class_lookups(&self, name: &str) -> usize {
        self.class_lookups
            .get(&QualifiedName::from_dotted(name))
            .map_or(0, Cell::get)
    }
}

impl ExternalDeclarationProvider for InMemoryProvider {
    fn find_class(&self, name: &QualifiedName) -> Option<RawClass> {
        if let Some(count) = self.class_lookups.get(name) {
            count.set(count.get() + 1);
        }
        self.classes.get(name).cloned()
    }

    fn has_package(&self, name: &QualifiedName) -> bool {
        self.packages.contains(name)
    }

    fn find_methods(&self, class: &QualifiedName, name: &str) -> Vec<RawMethod> {
        self.methods
            .get(&(class.clone(), name.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn find_field(&self, class: &QualifiedName, name: &str) -> Option<RawField> {
        self.fields.get(&(class.clone(), name.to_string())).cloned()
    }
}
