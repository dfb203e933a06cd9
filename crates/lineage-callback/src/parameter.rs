//! Callback parameters.

use lineage_core::AnyValue;

/// One named or positional value bound to a
/// [`CallbackObject`](crate::CallbackObject).
///
/// An empty name means positional only.
#[derive(Clone, Debug, PartialEq)]
pub struct CallbackParameter {
    name: String,
    value: AnyValue,
}

impl CallbackParameter {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, value: AnyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The parameter name, `""` if positional.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the parameter can also be looked up by name.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// The bound value.
    pub fn any_value(&self) -> &AnyValue {
        &self.value
    }
}
