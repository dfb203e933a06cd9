//! Errors for value conversion.

use crate::value::Datatype;

/// Errors produced while building an [`AnyValue`](crate::AnyValue) from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The text is not a valid literal of the requested type.
    #[error("cannot parse '{text}' as {datatype}")]
    Unparsable {
        /// The requested type.
        datatype: Datatype,
        /// The rejected input.
        text: String,
    },
    /// The requested type has no textual form.
    #[error("values of type {datatype} cannot be parsed from text")]
    NotParsable {
        /// The requested type.
        datatype: Datatype,
    },
}
