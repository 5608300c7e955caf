//! Values exchanged with the firmware namespace

/// A value passed to or returned from a namespace method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcpiValue {
    Integer(u64),
    Buffer(Vec<u8>),
    String(String),
    Package(Vec<AcpiValue>),
}

impl AcpiValue {
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            AcpiValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            AcpiValue::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Description of one method found while walking a namespace object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Method name relative to its object.
    pub name: String,
    /// Number of arguments the method declares.
    pub param_count: u8,
}
