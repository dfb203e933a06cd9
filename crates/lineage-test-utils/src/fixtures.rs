//! Reusable callback fixtures.
//!
//! - [`Constant`]: yields a fixed value.
//! - [`Echo`]: yields the chain input.
//! - [`Recorder`]: logs what it saw of the running chain.
//! - [`SpawnObject`]: creates an object in a named scene.

use std::cell::RefCell;
use std::rc::Rc;

use lineage_callback::{Callback, CallbackEngine, CallbackObject, Parameters};
use lineage_core::AnyValue;
use lineage_ontology::{ObjectStruct, Request, Universe};

/// Yields a fixed value every call.
pub struct Constant(pub AnyValue);

impl Callback for Constant {
    fn call(
        &self,
        _universe: &mut Universe,
        _engine: &CallbackEngine,
        _object: &CallbackObject,
        _parameters: &Parameters,
        _input: &AnyValue,
    ) -> Option<AnyValue> {
        Some(self.0.clone())
    }
}

/// Yields the input value shared by the chain.
pub struct Echo;

impl Callback for Echo {
    fn call(
        &self,
        _universe: &mut Universe,
        _engine: &CallbackEngine,
        _object: &CallbackObject,
        _parameters: &Parameters,
        input: &AnyValue,
    ) -> Option<AnyValue> {
        Some(input.clone())
    }
}

/// One observation made by a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Results collected before this step ran.
    pub return_values: usize,
    /// The previous step's result.
    pub previous: Option<AnyValue>,
    /// Result of step 0, if any.
    pub first: Option<AnyValue>,
}

/// Records what the engine exposes at the moment it is called, then passes
/// the previous result through unchanged.
///
/// Clone the recorder before binding it; every clone shares the log.
#[derive(Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<Vec<Observation>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn observations(&self) -> Vec<Observation> {
        self.log.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.log.borrow().len()
    }
}

impl Callback for Recorder {
    fn call(
        &self,
        _universe: &mut Universe,
        engine: &CallbackEngine,
        _object: &CallbackObject,
        _parameters: &Parameters,
        _input: &AnyValue,
    ) -> Option<AnyValue> {
        let previous = engine.get_previous_return_value().cloned();
        self.log.borrow_mut().push(Observation {
            return_values: engine.number_of_return_values(),
            previous: previous.clone(),
            first: engine.get_nth_return_value(0).cloned(),
        });
        previous
    }
}

/// Creates an object in the scene registered under `scene`, named after
/// the callback's `name` parameter. Yields the new object's handle.
pub struct SpawnObject {
    pub scene: String,
}

impl SpawnObject {
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
        }
    }
}

impl Callback for SpawnObject {
    fn call(
        &self,
        universe: &mut Universe,
        _engine: &CallbackEngine,
        object: &CallbackObject,
        _parameters: &Parameters,
        _input: &AnyValue,
    ) -> Option<AnyValue> {
        let name = object
            .get_any_value("name")
            .and_then(AnyValue::as_str)
            .unwrap_or_default()
            .to_owned();
        let handle = universe
            .create_object(ObjectStruct {
                global_name: name,
                parent: Request::from(self.scene.as_str()),
                ..ObjectStruct::default()
            })
            .ok()?;
        Some(AnyValue::Entity(handle.erase()))
    }
}
