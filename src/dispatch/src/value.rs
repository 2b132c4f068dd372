use anyhow::{Result, bail};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Live object of the hooked process, as exposed by the host.
///
/// Calls go through the object's own methods, so a hook holding `&self` can still change
/// its state the same way the app would.
pub trait JavaObject: Send + Sync {
    fn class_name(&self) -> String;

    fn call_method(&self, name: &str, args: &[Value]) -> Result<Value>;

    fn get_field(&self, name: &str) -> Result<Value>;

    fn set_field(&self, name: &str, value: Value) -> Result<()>;
}

pub type ObjectRef = Arc<dyn JavaObject>;

/// Argument, return or field value crossing the hook boundary.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Object(ObjectRef),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Str(_) => "String",
            Value::Object(_) => "Object",
        }
    }

    pub fn as_int(&self) -> Result<i32> {
        match self {
            Value::Int(value) => Ok(*value),
            other => bail!("expected int, got {}", other.type_name()),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(value) => Ok(*value),
            other => bail!("expected boolean, got {}", other.type_name()),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(value) => Ok(value),
            other => bail!("expected String, got {}", other.type_name()),
        }
    }

    pub fn as_object(&self) -> Result<&ObjectRef> {
        match self {
            Value::Object(value) => Ok(value),
            other => bail!("expected Object, got {}", other.type_name()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Long(value) => write!(f, "{value}L"),
            Value::Float(value) => write!(f, "{value}f"),
            Value::Double(value) => write!(f, "{value}d"),
            Value::Str(value) => write!(f, "{value:?}"),
            Value::Object(object) => write!(f, "<{}>", object.class_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // reference identity, like `==` on the Java side
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.into())
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        assert_eq!(Value::Int(5).as_int().unwrap(), 5);
        assert_eq!(Value::from("x=1").as_str().unwrap(), "x=1");
        assert!(Value::Str("5".into()).as_int().is_err());
        assert!(Value::Null.as_object().is_err());
        assert!(Value::default().is_null());
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Value::Long(3)), "3L");
        assert_eq!(format!("{:?}", Value::from("a")), "\"a\"");
    }
}
