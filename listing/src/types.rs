//! Type references rendered through the listing's name policy.
//!
//! Class types append their names with [`Listing::append_name`], so every
//! type used in a document takes part in import resolution.

use listing_core::QualifiedName;

use crate::{Listable, Listing};

/// A primitive type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    /// The keyword spelling, e.g. `int`.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

/// Bound of a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardBound {
    /// `?`
    Unbounded,
    /// `? extends T`
    Extends(Box<TypeRef>),
    /// `? super T`
    Super(Box<TypeRef>),
}

/// A type as it appears in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A primitive type (int, boolean, etc.).
    Primitive(PrimitiveType),
    /// A class or interface type with optional type arguments.
    Class {
        /// The type's name.
        name: QualifiedName,
        /// Type arguments, e.g. `[String]` for `List<String>`.
        args: Vec<TypeRef>,
    },
    /// An array of the component type.
    Array(Box<TypeRef>),
    /// A type variable such as `T`.
    Variable(String),
    /// A wildcard type argument.
    Wildcard(WildcardBound),
}

impl TypeRef {
    /// Create a primitive type reference.
    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::Primitive(ty)
    }

    /// Create a raw class type reference.
    pub fn class(name: QualifiedName) -> Self {
        Self::Class {
            name,
            args: Vec::new(),
        }
    }

    /// Create a parameterized class type reference.
    pub fn generic(name: QualifiedName, args: Vec<TypeRef>) -> Self {
        Self::Class { name, args }
    }

    /// Create an array type reference.
    pub fn array(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    /// Create a type variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// `?`
    pub fn wildcard() -> Self {
        Self::Wildcard(WildcardBound::Unbounded)
    }

    /// `? extends bound`
    pub fn extends(bound: TypeRef) -> Self {
        Self::Wildcard(WildcardBound::Extends(Box::new(bound)))
    }

    /// `? super bound`
    pub fn super_(bound: TypeRef) -> Self {
        Self::Wildcard(WildcardBound::Super(Box::new(bound)))
    }

    /// The class name, for class types.
    pub fn name(&self) -> Option<&QualifiedName> {
        match self {
            Self::Class { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(ty: PrimitiveType) -> Self {
        Self::Primitive(ty)
    }
}

impl From<QualifiedName> for TypeRef {
    fn from(name: QualifiedName) -> Self {
        Self::class(name)
    }
}

impl Listable for TypeRef {
    fn apply(&self, listing: &mut Listing) {
        match self {
            Self::Primitive(ty) => {
                listing.append_text(ty.keyword());
            }
            Self::Class { name, args } => {
                listing.append_name(name);
                if !args.is_empty() {
                    listing.append_char('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            listing.append_text(", ");
                        }
                        arg.apply(listing);
                    }
                    listing.append_char('>');
                }
            }
            Self::Array(component) => {
                component.apply(listing);
                listing.append_text("[]");
            }
            Self::Variable(name) => {
                listing.append_text(name);
            }
            Self::Wildcard(WildcardBound::Unbounded) => {
                listing.append_char('?');
            }
            Self::Wildcard(WildcardBound::Extends(bound)) => {
                listing.append_text("? extends ");
                bound.apply(listing);
            }
            Self::Wildcard(WildcardBound::Super(bound)) => {
                listing.append_text("? super ");
                bound.apply(listing);
            }
        }
    }
}
