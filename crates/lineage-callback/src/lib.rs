//! Sequential callback chains for the Lineage entity kernel.
//!
//! A [`CallbackEngine`] holds an ordered list of [`CallbackObject`]s. Each
//! object binds one [`Callback`] and the parameters it is called with.
//! Executing the engine runs every object in index order against the same
//! input value; each step can read the results of the steps before it.
//!
//! # Architecture
//!
//! ```text
//! CallbackEngine
//! ├── CallbackObject × n (index-addressed, gaps allowed)
//! │   ├── Box<dyn Callback>
//! │   ├── CallbackParameter × n (positional)
//! │   └── name → AnyValue (keyword lookup)
//! └── return values (live only during execute)
//! ```
//!
//! Callbacks never abort a chain. A failing step logs a [`CallbackError`]
//! and contributes "no result".

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod callback;
pub mod engine;
pub mod error;
pub mod object;
pub mod parameter;
pub mod snippets;

pub use callback::{Callback, Parameters};
pub use engine::CallbackEngine;
pub use error::CallbackError;
pub use object::CallbackObject;
pub use parameter::CallbackParameter;
