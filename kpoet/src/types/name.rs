//! Kotlin type references.

use std::fmt;

use crate::{
    error::{Error, Result},
    render::CodeWriter,
};

/// Packages whose classes Kotlin files can use without an import.
pub const DEFAULT_IMPORTS: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
];

/// A fully-qualified class name, possibly nested (`Map.Entry`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
    nullable: bool,
}

impl ClassName {
    /// Create a top-level class name.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
            nullable: false,
        }
    }

    /// Guess a class name from a dotted string.
    ///
    /// Leading segments starting with a lowercase letter form the package,
    /// the rest are (possibly nested) simple names.
    pub fn best_guess(name: &str) -> Result<Self> {
        let segments: Vec<&str> = name.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::invalid_name(
                name,
                "class",
                "dotted names cannot contain empty segments",
            ));
        }
        let split = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()))
            .ok_or_else(|| {
                Error::invalid_name(name, "class", "no segment starts with an uppercase letter")
            })?;
        Ok(Self {
            package: segments[..split].join("."),
            simple_names: segments[split..].iter().map(|s| s.to_string()).collect(),
            nullable: false,
        })
    }

    /// Create a class nested inside this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
            nullable: false,
        }
    }

    /// Get the package, empty for the default package.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Get the innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    /// Get all simple names from outermost to innermost.
    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// Get the outermost enclosing class.
    pub fn top_level(&self) -> ClassName {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..1].to_vec(),
            nullable: false,
        }
    }

    /// Get the dotted canonical name, e.g. `kotlin.collections.Map.Entry`.
    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_names.join(".")
        } else {
            format!("{}.{}", self.package, self.simple_names.join("."))
        }
    }

    /// Check if this class is visible without an import in every file.
    pub fn is_default_import(&self) -> bool {
        DEFAULT_IMPORTS.contains(&self.package.as_str())
    }

    /// Check if this type is nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Copy this class name with the given nullability.
    pub fn copy_nullable(&self, nullable: bool) -> Self {
        Self {
            nullable,
            ..self.clone()
        }
    }

    /// Apply type arguments, e.g. `List` + `String` -> `List<String>`.
    pub fn parameterized_by(&self, args: impl IntoIterator<Item = TypeName>) -> TypeName {
        TypeName::Parameterized {
            raw: self.copy_nullable(false),
            args: args.into_iter().collect(),
            nullable: false,
        }
    }
}

/// Declaration-site or use-site variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variance {
    /// `in T`
    In,
    /// `out T`
    Out,
}

impl Variance {
    /// Get the Kotlin keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// A type variable such as `T` or `reified out E : Any`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    /// Variable name.
    pub name: String,
    /// Upper bounds.
    pub bounds: Vec<TypeName>,
    /// Declaration-site variance.
    pub variance: Option<Variance>,
    /// Whether the variable is reified (inline functions only).
    pub reified: bool,
    /// Whether usages are nullable (`T?`).
    pub nullable: bool,
}

impl TypeVariable {
    /// Create an unbounded type variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
            variance: None,
            reified: false,
            nullable: false,
        }
    }

    /// Add an upper bound.
    pub fn bound(mut self, bound: impl Into<TypeName>) -> Self {
        self.bounds.push(bound.into());
        self
    }

    /// Set declaration-site variance.
    pub fn variance(mut self, variance: Variance) -> Self {
        self.variance = Some(variance);
        self
    }

    /// Mark as reified.
    pub fn reified(mut self) -> Self {
        self.reified = true;
        self
    }
}

/// A language-level type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// A plain class.
    Class(ClassName),
    /// A class with type arguments.
    Parameterized {
        /// The raw class.
        raw: ClassName,
        /// Type arguments.
        args: Vec<TypeName>,
        /// Whether the type is nullable.
        nullable: bool,
    },
    /// A type variable usage.
    Variable(TypeVariable),
    /// Star projection: `*`.
    Star,
    /// Use-site projection: `out T`, `in T`.
    Wildcard {
        /// Projection variance.
        variance: Variance,
        /// Projected type.
        bound: Box<TypeName>,
    },
    /// Function type: `Receiver.(A, B) -> R`.
    Lambda {
        /// Optional receiver type.
        receiver: Option<Box<TypeName>>,
        /// Parameter types.
        params: Vec<TypeName>,
        /// Return type.
        returns: Box<TypeName>,
        /// Whether the type is nullable.
        nullable: bool,
    },
}

impl TypeName {
    /// Create a class type from a package and simple name.
    pub fn class(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self::Class(ClassName::new(package, simple_name))
    }

    /// Create a type variable usage.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(TypeVariable::new(name))
    }

    /// Create a function type.
    pub fn lambda(params: impl IntoIterator<Item = TypeName>, returns: TypeName) -> Self {
        Self::Lambda {
            receiver: None,
            params: params.into_iter().collect(),
            returns: Box::new(returns),
            nullable: false,
        }
    }

    /// Create an `out T` projection.
    pub fn out(bound: TypeName) -> Self {
        Self::Wildcard {
            variance: Variance::Out,
            bound: Box::new(bound),
        }
    }

    /// Create an `in T` projection.
    pub fn in_(bound: TypeName) -> Self {
        Self::Wildcard {
            variance: Variance::In,
            bound: Box::new(bound),
        }
    }

    /// Convenience: `kotlin.Any`.
    pub fn any() -> Self {
        Self::class("kotlin", "Any")
    }

    /// Convenience: `kotlin.Unit`.
    pub fn unit() -> Self {
        Self::class("kotlin", "Unit")
    }

    /// Convenience: `kotlin.Nothing`.
    pub fn nothing() -> Self {
        Self::class("kotlin", "Nothing")
    }

    /// Convenience: `kotlin.String`.
    pub fn string() -> Self {
        Self::class("kotlin", "String")
    }

    /// Convenience: `kotlin.Int`.
    pub fn int() -> Self {
        Self::class("kotlin", "Int")
    }

    /// Convenience: `kotlin.Long`.
    pub fn long() -> Self {
        Self::class("kotlin", "Long")
    }

    /// Convenience: `kotlin.Double`.
    pub fn double() -> Self {
        Self::class("kotlin", "Double")
    }

    /// Convenience: `kotlin.Float`.
    pub fn float() -> Self {
        Self::class("kotlin", "Float")
    }

    /// Convenience: `kotlin.Boolean`.
    pub fn boolean() -> Self {
        Self::class("kotlin", "Boolean")
    }

    /// Convenience: `kotlin.Char`.
    pub fn char() -> Self {
        Self::class("kotlin", "Char")
    }

    /// Convenience: `kotlin.collections.List<E>`.
    pub fn list(element: TypeName) -> Self {
        ClassName::new("kotlin.collections", "List").parameterized_by([element])
    }

    /// Convenience: `kotlin.collections.MutableList<E>`.
    pub fn mutable_list(element: TypeName) -> Self {
        ClassName::new("kotlin.collections", "MutableList").parameterized_by([element])
    }

    /// Convenience: `kotlin.collections.Set<E>`.
    pub fn set(element: TypeName) -> Self {
        ClassName::new("kotlin.collections", "Set").parameterized_by([element])
    }

    /// Convenience: `kotlin.collections.Map<K, V>`.
    pub fn map(key: TypeName, value: TypeName) -> Self {
        ClassName::new("kotlin.collections", "Map").parameterized_by([key, value])
    }

    /// Check if this type is nullable.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Class(class) => class.is_nullable(),
            Self::Parameterized { nullable, .. } | Self::Lambda { nullable, .. } => *nullable,
            Self::Variable(var) => var.nullable,
            Self::Star | Self::Wildcard { .. } => false,
        }
    }

    /// Copy this type with the given nullability.
    ///
    /// Projections cannot be nullable and are returned unchanged.
    pub fn copy_nullable(&self, nullable: bool) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            Self::Class(class) => class.nullable = nullable,
            Self::Parameterized { nullable: n, .. } | Self::Lambda { nullable: n, .. } => {
                *n = nullable
            }
            Self::Variable(var) => var.nullable = nullable,
            Self::Star | Self::Wildcard { .. } => {}
        }
        copy
    }

    /// Shorthand for `copy_nullable(true)`.
    pub fn nullable(&self) -> Self {
        self.copy_nullable(true)
    }

    /// Check if this is `kotlin.Unit`.
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Class(class) if class.package == "kotlin"
            && class.simple_names.len() == 1
            && class.simple_names[0] == "Unit"
            && !class.nullable)
    }
}

impl From<ClassName> for TypeName {
    fn from(class: ClassName) -> Self {
        Self::Class(class)
    }
}

impl From<&ClassName> for TypeName {
    fn from(class: &ClassName) -> Self {
        Self::Class(class.clone())
    }
}

impl From<TypeVariable> for TypeName {
    fn from(var: TypeVariable) -> Self {
        Self::Variable(var)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = CodeWriter::standalone(Default::default());
        writer.emit_type(self);
        f.write_str(&writer.finish())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TypeName::from(self).fmt(f)
    }
}
