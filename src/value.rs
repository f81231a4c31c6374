//! Storable values: the `Element` capability, the dynamic `Value` type and
//! the `Identity` fingerprint used by every hash index.

use core::fmt;
use std::rc::Rc;

/// Primitive kind of a storable value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Array,
    Callable,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "string",
            Kind::Array => "array",
            Kind::Callable => "callable",
            Kind::Object => "object",
        };
        f.write_str(s)
    }
}

/// Hash identity of a stored value.
///
/// Content-derived for primitives, strings and arrays; reference-derived for
/// objects and callables. Identities of different kinds never compare
/// equal, so `Int(1)` and `Str("1")` index separately.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Identity {
    Null,
    Bool(bool),
    Int(i64),
    /// Bit pattern of the float.
    Float(u64),
    Str(String),
    Seq(Vec<Identity>),
    /// Address of a shared allocation.
    Ref(usize),
}

/// Capability every element of a guarded collection provides.
pub trait Element: Clone + PartialEq + fmt::Debug {
    /// Primitive kind used by simple type declarations.
    fn kind(&self) -> Kind;

    /// Whether the value satisfies the named class or interface contract.
    fn is_instance_of(&self, class: &str) -> bool {
        let _ = class;
        false
    }

    /// Fingerprint used as a hash-index key.
    fn identity(&self) -> Identity;

    /// Short description for error messages.
    fn describe(&self) -> String {
        self.kind().to_string()
    }
}

/// An object stored by reference inside a `Value`.
///
/// `is_a` answers capability membership: the class itself plus every
/// interface or parent the implementor chooses to report.
pub trait Instance: fmt::Debug {
    fn class_name(&self) -> &str;

    fn is_a(&self, class: &str) -> bool {
        self.class_name() == class
    }
}

/// Shared handle to an `Instance`. Equality and identity are by reference.
#[derive(Clone)]
pub struct Object(Rc<dyn Instance>);

impl Object {
    pub fn new<T: Instance + 'static>(instance: T) -> Self {
        Object(Rc::new(instance))
    }

    pub fn class_name(&self) -> &str {
        self.0.class_name()
    }

    pub fn is_a(&self, class: &str) -> bool {
        self.0.is_a(class)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type CallableFn = dyn Fn(&[Value]) -> Value;

/// Shared function value. Equality and identity are by reference.
#[derive(Clone)]
pub struct Callable(Rc<CallableFn>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Callable(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:#x})", self.addr())
    }
}

/// Dynamically typed element.
///
/// Equality is strict: the same variant with the same content, or the same
/// reference for objects and callables. `Int(1) != Float(1.0)`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    Callable(Callable),
    Object(Object),
}

impl Value {
    pub fn object<T: Instance + 'static>(instance: T) -> Self {
        Value::Object(Object::new(instance))
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Value::Callable(Callable::new(f))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl Element for Value {
    fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Array(_) => Kind::Array,
            Value::Callable(_) => Kind::Callable,
            Value::Object(_) => Kind::Object,
        }
    }

    fn is_instance_of(&self, class: &str) -> bool {
        match self {
            Value::Object(o) => o.is_a(class),
            _ => false,
        }
    }

    fn identity(&self) -> Identity {
        match self {
            Value::Null => Identity::Null,
            Value::Bool(b) => Identity::Bool(*b),
            Value::Int(i) => Identity::Int(*i),
            Value::Float(x) => Identity::Float(x.to_bits()),
            Value::Str(s) => Identity::Str(s.clone()),
            Value::Array(items) => Identity::Seq(items.iter().map(Element::identity).collect()),
            Value::Callable(c) => Identity::Ref(c.addr()),
            Value::Object(o) => Identity::Ref(o.addr()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Value::Object(o) => format!("object of class `{}`", o.class_name()),
            other => other.kind().to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl Element for i64 {
    fn kind(&self) -> Kind {
        Kind::Int
    }
    fn identity(&self) -> Identity {
        Identity::Int(*self)
    }
}

impl Element for f64 {
    fn kind(&self) -> Kind {
        Kind::Float
    }
    fn identity(&self) -> Identity {
        Identity::Float(self.to_bits())
    }
}

impl Element for bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }
    fn identity(&self) -> Identity {
        Identity::Bool(*self)
    }
}

impl Element for String {
    fn kind(&self) -> Kind {
        Kind::Str
    }
    fn identity(&self) -> Identity {
        Identity::Str(self.clone())
    }
}
