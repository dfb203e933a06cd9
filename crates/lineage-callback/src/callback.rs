//! The [`Callback`] trait.

use lineage_core::AnyValue;
use lineage_ontology::{ChildSlots, Universe};

use crate::engine::CallbackEngine;
use crate::object::CallbackObject;
use crate::parameter::CallbackParameter;

/// Parameters of one callback object, in index order.
pub type Parameters = ChildSlots<CallbackParameter>;

/// A native function run as one step of a callback chain.
///
/// # Contract
///
/// - `call()` receives the universe, the engine running the chain (for
///   [`get_previous_return_value`](CallbackEngine::get_previous_return_value)
///   and friends), the callback object it is bound to, that object's
///   parameters, and the input value shared by every step.
/// - Returning `None` means "no result". It never aborts the chain.
///
/// Any `fn` or closure with the matching signature is a `Callback`, so
/// stock functions such as [`snippets::neg`](crate::snippets::neg) can be
/// bound directly.
///
/// # Examples
///
/// ```
/// use lineage_callback::{Callback, CallbackEngine, CallbackObject, Parameters};
/// use lineage_core::AnyValue;
/// use lineage_ontology::{Universe, UniverseConfig};
///
/// struct Constant(u32);
///
/// impl Callback for Constant {
///     fn call(
///         &self,
///         _universe: &mut Universe,
///         _engine: &CallbackEngine,
///         _object: &CallbackObject,
///         _parameters: &Parameters,
///         _input: &AnyValue,
///     ) -> Option<AnyValue> {
///         Some(AnyValue::U32(self.0))
///     }
/// }
///
/// let mut universe = Universe::new(UniverseConfig::default()).unwrap();
/// let mut engine = CallbackEngine::new();
/// engine.create_callback_object(Constant(7));
/// assert_eq!(engine.execute(&mut universe, &AnyValue::Bool(false)), Some(AnyValue::U32(7)));
/// ```
pub trait Callback: 'static {
    /// Run one step.
    fn call(
        &self,
        universe: &mut Universe,
        engine: &CallbackEngine,
        object: &CallbackObject,
        parameters: &Parameters,
        input: &AnyValue,
    ) -> Option<AnyValue>;
}

impl<F> Callback for F
where
    F: Fn(
            &mut Universe,
            &CallbackEngine,
            &CallbackObject,
            &Parameters,
            &AnyValue,
        ) -> Option<AnyValue>
        + 'static,
{
    fn call(
        &self,
        universe: &mut Universe,
        engine: &CallbackEngine,
        object: &CallbackObject,
        parameters: &Parameters,
        input: &AnyValue,
    ) -> Option<AnyValue> {
        self(universe, engine, object, parameters, input)
    }
}
