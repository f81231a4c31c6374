//! TypeGuard: a declared element type and the checks made against it.

use crate::error::{CollectionError, Result, Role};
use crate::value::{Element, Kind};
use core::fmt;
use core::str::FromStr;

/// Declared type of a container's values or keys.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeSpec {
    Int,
    Float,
    String,
    Boolean,
    Array,
    Callable,
    Null,
    /// Class or interface name, matched by capability membership.
    Class(String),
}

impl TypeSpec {
    pub fn class(name: impl Into<String>) -> Self {
        TypeSpec::Class(name.into())
    }

    /// Primitive types can key a flat export; classes cannot.
    pub fn is_simple(&self) -> bool {
        !matches!(self, TypeSpec::Class(_))
    }

    pub fn matches<E: Element + ?Sized>(&self, value: &E) -> bool {
        match self {
            TypeSpec::Int => value.kind() == Kind::Int,
            TypeSpec::Float => value.kind() == Kind::Float,
            TypeSpec::String => value.kind() == Kind::Str,
            TypeSpec::Boolean => value.kind() == Kind::Bool,
            TypeSpec::Array => value.kind() == Kind::Array,
            TypeSpec::Callable => value.kind() == Kind::Callable,
            TypeSpec::Null => value.kind() == Kind::Null,
            TypeSpec::Class(name) => value.is_instance_of(name),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Int => f.write_str("int"),
            TypeSpec::Float => f.write_str("float"),
            TypeSpec::String => f.write_str("string"),
            TypeSpec::Boolean => f.write_str("boolean"),
            TypeSpec::Array => f.write_str("array"),
            TypeSpec::Callable => f.write_str("callable"),
            TypeSpec::Null => f.write_str("null"),
            TypeSpec::Class(name) => f.write_str(name),
        }
    }
}

impl FromStr for TypeSpec {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self> {
        let spec = match s.trim() {
            "" => return Err(CollectionError::InvalidTypeSpec(s.to_string())),
            "int" => TypeSpec::Int,
            "float" => TypeSpec::Float,
            "string" => TypeSpec::String,
            "boolean" => TypeSpec::Boolean,
            "array" => TypeSpec::Array,
            "callable" => TypeSpec::Callable,
            "null" => TypeSpec::Null,
            name => TypeSpec::Class(name.to_string()),
        };
        Ok(spec)
    }
}

/// Message and code carried by `TypeMismatch` errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardOptions {
    pub message: String,
    pub code: i32,
}

impl GuardOptions {
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Value => Self::new("value does not match the collection's value type", 0),
            Role::Key => Self::new("key does not match the collection's key type", 0),
        }
    }
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self::for_role(Role::Value)
    }
}

/// Declared type plus the error configuration used when a check fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeGuard {
    spec: TypeSpec,
    role: Role,
    options: GuardOptions,
}

impl TypeGuard {
    pub fn new(spec: TypeSpec, role: Role) -> Self {
        Self::with_options(spec, role, GuardOptions::for_role(role))
    }

    pub fn with_options(spec: TypeSpec, role: Role, options: GuardOptions) -> Self {
        Self {
            spec,
            role,
            options,
        }
    }

    pub fn spec(&self) -> &TypeSpec {
        &self.spec
    }

    pub fn options(&self) -> &GuardOptions {
        &self.options
    }

    pub fn is_simple(&self) -> bool {
        self.spec.is_simple()
    }

    /// Replace the declaration. Containers only call this while empty.
    pub fn set_spec(&mut self, spec: TypeSpec) {
        self.spec = spec;
    }

    pub fn check<E: Element + ?Sized>(&self, value: &E) -> bool {
        self.spec.matches(value)
    }

    pub fn ensure<E: Element + ?Sized>(&self, value: &E) -> Result<()> {
        if self.check(value) {
            return Ok(());
        }
        Err(CollectionError::TypeMismatch {
            role: self.role,
            expected: self.spec.clone(),
            found: value.describe(),
            message: self.options.message.clone(),
            code: self.options.code,
        })
    }

    /// Redeclare the type of a container holding `len` elements.
    pub(crate) fn redeclare(&mut self, spec: TypeSpec, len: usize) -> Result<()> {
        if len > 0 {
            tracing::debug!(role = %self.role, from = %self.spec, to = %spec, len,
                "refusing to redeclare type of populated collection");
            return Err(CollectionError::StateConflict { role: self.role });
        }
        tracing::debug!(role = %self.role, from = %self.spec, to = %spec, "redeclared type");
        self.set_spec(spec);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Instance, Value};

    #[derive(Debug)]
    struct Widget;
    impl Instance for Widget {
        fn class_name(&self) -> &str {
            "Widget"
        }
        fn is_a(&self, class: &str) -> bool {
            matches!(class, "Widget" | "Renderable")
        }
    }

    #[test]
    fn simple_types_dispatch_on_kind() {
        let cases = [
            (TypeSpec::Int, Value::Int(3)),
            (TypeSpec::Float, Value::Float(0.5)),
            (TypeSpec::String, Value::from("s")),
            (TypeSpec::Boolean, Value::Bool(true)),
            (TypeSpec::Array, Value::Array(vec![])),
            (TypeSpec::Callable, Value::callable(|_| Value::Null)),
            (TypeSpec::Null, Value::Null),
        ];
        for (spec, good) in cases.iter() {
            assert!(spec.matches(good), "{spec} should accept {good:?}");
            assert!(spec.is_simple());
        }
        assert!(!TypeSpec::Int.matches(&Value::Float(1.0)));
        assert!(!TypeSpec::String.matches(&Value::Null));
        assert!(!TypeSpec::Null.matches(&Value::Bool(false)));
    }

    #[test]
    fn class_types_use_capability_membership() {
        let w = Value::object(Widget);
        assert!(TypeSpec::class("Widget").matches(&w));
        assert!(TypeSpec::class("Renderable").matches(&w));
        assert!(!TypeSpec::class("Gadget").matches(&w));
        assert!(!TypeSpec::class("Widget").matches(&Value::from("Widget")));
        assert!(!TypeSpec::class("Widget").is_simple());
    }

    #[test]
    fn primitive_elements_are_checked_too() {
        assert!(TypeSpec::Int.matches(&7i64));
        assert!(!TypeSpec::Int.matches(&"7".to_string()));
        assert!(TypeSpec::Float.matches(&1.5f64));
        assert!(TypeSpec::Boolean.matches(&true));
    }

    #[test]
    fn parse_and_display_round_trip() {
        for name in ["int", "float", "string", "boolean", "array", "callable", "null"] {
            let spec: TypeSpec = name.parse().unwrap();
            assert!(spec.is_simple());
            assert_eq!(spec.to_string(), name);
        }
        let spec: TypeSpec = "stdClass".parse().unwrap();
        assert_eq!(spec, TypeSpec::class("stdClass"));
        assert!(matches!(
            "  ".parse::<TypeSpec>(),
            Err(CollectionError::InvalidTypeSpec(_))
        ));
    }

    /// Invariant: `ensure` reports the configured message and code.
    #[test]
    fn ensure_uses_configured_options() {
        let guard = TypeGuard::with_options(
            TypeSpec::Int,
            Role::Value,
            GuardOptions::new("bad score", 42),
        );
        assert!(guard.ensure(&Value::Int(1)).is_ok());
        match guard.ensure(&Value::from("x")) {
            Err(CollectionError::TypeMismatch {
                role,
                expected,
                found,
                message,
                code,
            }) => {
                assert_eq!(role, Role::Value);
                assert_eq!(expected, TypeSpec::Int);
                assert_eq!(found, "string");
                assert_eq!(message, "bad score");
                assert_eq!(code, 42);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn key_guard_has_key_message() {
        let guard = TypeGuard::new(TypeSpec::String, Role::Key);
        let err = guard.ensure(&Value::Int(27)).unwrap_err();
        assert!(err.to_string().starts_with("key does not match"));
    }

    #[test]
    fn redeclare_only_when_empty() {
        let mut guard = TypeGuard::new(TypeSpec::Int, Role::Value);
        guard.redeclare(TypeSpec::String, 0).unwrap();
        assert_eq!(guard.spec(), &TypeSpec::String);
        assert_eq!(
            guard.redeclare(TypeSpec::Int, 3),
            Err(CollectionError::StateConflict { role: Role::Value })
        );
        assert_eq!(guard.spec(), &TypeSpec::String);
    }
}
