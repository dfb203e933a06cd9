//! Callback objects: one callback plus its parameters.

use std::fmt;

use indexmap::IndexMap;
use lineage_core::{AnyValue, ChildId};
use lineage_ontology::Universe;

use crate::callback::{Callback, Parameters};
use crate::engine::CallbackEngine;
use crate::parameter::CallbackParameter;

/// One step of a callback chain.
///
/// Parameters are index-addressed with the same reuse rules as children
/// of an entity. Named parameters are additionally reachable through
/// [`get_any_value`](Self::get_any_value), which callbacks use for
/// keyword-style arguments. The most recent binding of a name wins.
#[derive(Default)]
pub struct CallbackObject {
    callback: Option<Box<dyn Callback>>,
    parameters: Parameters,
    named: IndexMap<String, Binding>,
}

/// What a name currently refers to.
#[derive(Clone, Debug, PartialEq)]
enum Binding {
    Parameter(ChildId),
    Value(AnyValue),
}

impl CallbackObject {
    /// An object with no callback. Executing it yields no result.
    pub fn new() -> Self {
        Self::default()
    }

    /// An object bound to `callback`.
    pub fn with_callback(callback: impl Callback) -> Self {
        Self {
            callback: Some(Box::new(callback)),
            ..Self::default()
        }
    }

    /// Replace the callback. Parameters are kept.
    pub fn set_callback(&mut self, callback: impl Callback) {
        self.callback = Some(Box::new(callback));
    }

    /// Whether a callback is bound.
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Append a parameter at the lowest free index.
    ///
    /// A non-empty `name` also makes the value reachable by name.
    pub fn create_callback_parameter(&mut self, name: &str, value: AnyValue) -> ChildId {
        let id = self.parameters.bind(CallbackParameter::new(name, value));
        if !name.is_empty() {
            self.named.insert(name.to_owned(), Binding::Parameter(id));
        }
        id
    }

    /// Remove the parameter at `id`.
    ///
    /// If the name still referred to this parameter, it falls back to the
    /// highest-indexed surviving parameter of the same name, or is unbound
    /// when there is none. A name rebound since keeps its newer binding.
    pub fn remove_parameter(&mut self, id: ChildId) -> Option<CallbackParameter> {
        let parameter = self.parameters.unbind(id)?;
        let name = parameter.name();
        if self.named.get(name) == Some(&Binding::Parameter(id)) {
            let survivor = self
                .parameters
                .iter()
                .filter(|(_, other)| other.name() == name)
                .map(|(other, _)| other)
                .last();
            match survivor {
                Some(other) => {
                    self.named.insert(name.to_owned(), Binding::Parameter(other));
                }
                None => {
                    self.named.shift_remove(name);
                }
            }
        }
        Some(parameter)
    }

    /// The value of the parameter at index `i`.
    pub fn get_arg(&self, i: usize) -> Option<&AnyValue> {
        let arg = self.parameters.get(ChildId(i)).map(CallbackParameter::any_value);
        if arg.is_none() {
            tracing::debug!(index = i, "no callback parameter at index");
        }
        arg
    }

    /// The value bound to `name`.
    pub fn get_any_value(&self, name: &str) -> Option<&AnyValue> {
        match self.named.get(name)? {
            Binding::Parameter(id) => self.parameters.get(*id).map(CallbackParameter::any_value),
            Binding::Value(value) => Some(value),
        }
    }

    /// Bind `name` to `value` without creating a positional parameter.
    ///
    /// Shadows any parameter of the same name until that name is bound
    /// again.
    pub fn set_any_value(&mut self, name: &str, value: AnyValue) {
        self.named.insert(name.to_owned(), Binding::Value(value));
    }

    /// Number of positional parameters.
    pub fn number_of_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// The positional parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub(crate) fn execute(
        &self,
        universe: &mut Universe,
        engine: &CallbackEngine,
        input: &AnyValue,
    ) -> Option<AnyValue> {
        let Some(callback) = &self.callback else {
            tracing::debug!("callback object has no callback");
            return None;
        };
        callback.call(universe, engine, self, &self.parameters, input)
    }
}

impl fmt::Debug for CallbackObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackObject")
            .field("has_callback", &self.has_callback())
            .field("parameters", &self.parameters)
            .field("named", &self.named)
            .finish()
    }
}
