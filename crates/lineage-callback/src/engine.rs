//! The callback engine: an ordered chain of callback objects.

use lineage_core::{AnyValue, ChildId};
use lineage_ontology::{ChildSlots, Universe};

use crate::callback::Callback;
use crate::object::CallbackObject;

/// Runs its callback objects in index order, collecting their results.
///
/// While [`execute`](Self::execute) runs, each step's result is appended
/// to the engine's return values, so later steps can read earlier ones
/// through [`get_previous_return_value`](Self::get_previous_return_value)
/// and [`get_nth_return_value`](Self::get_nth_return_value). The list is
/// cleared when `execute` returns.
#[derive(Debug, Default)]
pub struct CallbackEngine {
    objects: ChildSlots<CallbackObject>,
    return_values: Vec<Option<AnyValue>>,
}

impl CallbackEngine {
    /// An empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object bound to `callback`.
    pub fn create_callback_object(&mut self, callback: impl Callback) -> ChildId {
        self.objects.bind(CallbackObject::with_callback(callback))
    }

    /// Append a prepared object.
    pub fn add_callback_object(&mut self, object: CallbackObject) -> ChildId {
        self.objects.bind(object)
    }

    /// Remove the object at `id`. Later objects keep their indices.
    pub fn remove_callback_object(&mut self, id: ChildId) -> Option<CallbackObject> {
        self.objects.unbind(id)
    }

    /// The object at `id`.
    pub fn callback_object(&self, id: ChildId) -> Option<&CallbackObject> {
        self.objects.get(id)
    }

    /// Mutable access to the object at `id`, for binding parameters.
    pub fn callback_object_mut(&mut self, id: ChildId) -> Option<&mut CallbackObject> {
        self.objects.get_mut(id)
    }

    /// Number of callback objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the engine has no callback objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Run every callback object in index order with the same `input`.
    ///
    /// Returns the result of the last object run, or `None` if the engine
    /// is empty. A gap left by a removed object contributes `None` to the
    /// return values without running anything.
    pub fn execute(&mut self, universe: &mut Universe, input: &AnyValue) -> Option<AnyValue> {
        let mut last = None;
        let mut executed = false;
        for index in 0..self.objects.span() {
            let result = match self.objects.get(ChildId(index)) {
                Some(object) => {
                    executed = true;
                    object.execute(universe, self, input)
                }
                None => None,
            };
            last.clone_from(&result);
            self.return_values.push(result);
        }
        self.return_values.clear();
        if !executed {
            tracing::debug!("callback engine has no callback objects");
        }
        last
    }

    /// Number of results collected so far in the running execution.
    pub fn number_of_return_values(&self) -> usize {
        self.return_values.len()
    }

    /// The `n`th result of the running execution.
    pub fn get_nth_return_value(&self, n: usize) -> Option<&AnyValue> {
        self.return_values.get(n)?.as_ref()
    }

    /// The most recent result of the running execution.
    pub fn get_previous_return_value(&self) -> Option<&AnyValue> {
        self.return_values.last()?.as_ref()
    }
}
