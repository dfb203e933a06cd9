//! Errors raised inside callback bodies.
//!
//! Callbacks report failure to the chain as "no result"; these errors are
//! what gets logged alongside.

use lineage_core::Datatype;

/// Why a callback produced no result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CallbackError {
    /// Wrong number of parameters.
    #[error("{callback}: expected {expected} parameters, found {found}")]
    Arity {
        /// Name of the callback.
        callback: &'static str,
        /// Required parameter count.
        expected: usize,
        /// Actual parameter count.
        found: usize,
    },

    /// A parameter or previous value has a type the callback cannot use.
    #[error("{callback}: unsupported operand type {datatype}")]
    TypeMismatch {
        /// Name of the callback.
        callback: &'static str,
        /// The rejected type.
        datatype: Datatype,
    },

    /// Two operands that must share a type do not.
    #[error("{callback}: operand types differ ({left} and {right})")]
    MixedTypes {
        /// Name of the callback.
        callback: &'static str,
        /// Type of the first operand.
        left: Datatype,
        /// Type of the second operand.
        right: Datatype,
    },

    /// A named parameter is absent.
    #[error("{callback}: `{name}` does not contain a value")]
    MissingNamed {
        /// Name of the callback.
        callback: &'static str,
        /// The missing parameter name.
        name: &'static str,
    },

    /// The callback needs a previous result and the chain has none.
    #[error("{callback}: there is no previous return value")]
    NoPreviousValue {
        /// Name of the callback.
        callback: &'static str,
    },
}
