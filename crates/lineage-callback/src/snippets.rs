//! Stock callbacks.
//!
//! Arithmetic snippets accept `i32`, `u32`, `f32` and `f64` operands
//! (`neg` has no unsigned form). Integer arithmetic wraps; integer powers
//! are computed in `f64` and truncated back. Any arity or type problem is
//! logged and the snippet yields no result.

use lineage_core::AnyValue;
use lineage_ontology::Universe;

use crate::callback::Parameters;
use crate::engine::CallbackEngine;
use crate::error::CallbackError;
use crate::object::CallbackObject;

fn report(callback: &'static str, result: Result<AnyValue, CallbackError>) -> Option<AnyValue> {
    match result {
        Ok(value) => {
            tracing::debug!(callback, %value, "callback result");
            Some(value)
        }
        Err(error) => {
            tracing::warn!(%error, "callback produced no result");
            None
        }
    }
}

fn args<'a>(
    callback: &'static str,
    parameters: &'a Parameters,
    expected: usize,
) -> Result<Vec<&'a AnyValue>, CallbackError> {
    let args: Vec<&AnyValue> = parameters.iter().map(|(_, p)| p.any_value()).collect();
    if args.len() != expected {
        return Err(CallbackError::Arity {
            callback,
            expected,
            found: args.len(),
        });
    }
    Ok(args)
}

fn negate(callback: &'static str, value: &AnyValue) -> Result<AnyValue, CallbackError> {
    match *value {
        AnyValue::I32(x) => Ok(AnyValue::I32(x.wrapping_neg())),
        AnyValue::Float(x) => Ok(AnyValue::Float(-x)),
        AnyValue::Double(x) => Ok(AnyValue::Double(-x)),
        ref other => Err(CallbackError::TypeMismatch {
            callback,
            datatype: other.datatype(),
        }),
    }
}

fn squared(callback: &'static str, value: &AnyValue) -> Result<AnyValue, CallbackError> {
    match *value {
        AnyValue::I32(x) => Ok(AnyValue::I32(x.wrapping_mul(x))),
        AnyValue::U32(x) => Ok(AnyValue::U32(x.wrapping_mul(x))),
        AnyValue::Float(x) => Ok(AnyValue::Float(x * x)),
        AnyValue::Double(x) => Ok(AnyValue::Double(x * x)),
        ref other => Err(CallbackError::TypeMismatch {
            callback,
            datatype: other.datatype(),
        }),
    }
}

fn power(
    callback: &'static str,
    base: &AnyValue,
    exponent: &AnyValue,
) -> Result<AnyValue, CallbackError> {
    match (base, exponent) {
        (AnyValue::I32(b), AnyValue::I32(e)) => {
            Ok(AnyValue::I32(f64::from(*b).powf(f64::from(*e)) as i32))
        }
        (AnyValue::U32(b), AnyValue::U32(e)) => {
            Ok(AnyValue::U32(f64::from(*b).powf(f64::from(*e)) as u32))
        }
        (AnyValue::Float(b), AnyValue::Float(e)) => Ok(AnyValue::Float(b.powf(*e))),
        (AnyValue::Double(b), AnyValue::Double(e)) => Ok(AnyValue::Double(b.powf(*e))),
        (b, e) if b.datatype() != e.datatype() => Err(CallbackError::MixedTypes {
            callback,
            left: b.datatype(),
            right: e.datatype(),
        }),
        (b, _) => Err(CallbackError::TypeMismatch {
            callback,
            datatype: b.datatype(),
        }),
    }
}

/// Does nothing and yields no result.
pub fn nop(
    _universe: &mut Universe,
    _engine: &CallbackEngine,
    _object: &CallbackObject,
    _parameters: &Parameters,
    _input: &AnyValue,
) -> Option<AnyValue> {
    None
}

/// Yields `0xdeadbeef` as a `u32`.
pub fn return_u32_deadbeef(
    _universe: &mut Universe,
    _engine: &CallbackEngine,
    _object: &CallbackObject,
    _parameters: &Parameters,
    _input: &AnyValue,
) -> Option<AnyValue> {
    Some(AnyValue::U32(0xdead_beef))
}

/// Negates its single parameter.
pub fn neg(
    _universe: &mut Universe,
    _engine: &CallbackEngine,
    _object: &CallbackObject,
    parameters: &Parameters,
    _input: &AnyValue,
) -> Option<AnyValue> {
    const NAME: &str = "neg";
    report(NAME, args(NAME, parameters, 1).and_then(|a| negate(NAME, a[0])))
}

/// Squares its single parameter.
pub fn square(
    _universe: &mut Universe,
    _engine: &CallbackEngine,
    _object: &CallbackObject,
    parameters: &Parameters,
    _input: &AnyValue,
) -> Option<AnyValue> {
    const NAME: &str = "square";
    report(NAME, args(NAME, parameters, 1).and_then(|a| squared(NAME, a[0])))
}

/// Squares the previous result of the running chain. Takes no parameters.
pub fn square_last(
    _universe: &mut Universe,
    engine: &CallbackEngine,
    _object: &CallbackObject,
    parameters: &Parameters,
    _input: &AnyValue,
) -> Option<AnyValue> {
    const NAME: &str = "square_last";
    let result = args(NAME, parameters, 0).and_then(|_| {
        let previous = engine
            .get_previous_return_value()
            .ok_or(CallbackError::NoPreviousValue { callback: NAME })?;
        squared(NAME, previous)
    });
    report(NAME, result)
}

/// Raises the first parameter to the power of the second.
pub fn expt(
    _universe: &mut Universe,
    _engine: &CallbackEngine,
    _object: &CallbackObject,
    parameters: &Parameters,
    _input: &AnyValue,
) -> Option<AnyValue> {
    const NAME: &str = "expt";
    report(NAME, args(NAME, parameters, 2).and_then(|a| power(NAME, a[0], a[1])))
}

/// Raises the value named `base` to the value named `exponent`.
pub fn expt_with_named_inputs(
    _universe: &mut Universe,
    _engine: &CallbackEngine,
    object: &CallbackObject,
    _parameters: &Parameters,
    _input: &AnyValue,
) -> Option<AnyValue> {
    const NAME: &str = "expt_with_named_inputs";
    let named = |name: &'static str| {
        object
            .get_any_value(name)
            .ok_or(CallbackError::MissingNamed {
                callback: NAME,
                name,
            })
    };
    let result = named("base")
        .and_then(|base| named("exponent").and_then(|exponent| power(NAME, base, exponent)));
    report(NAME, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::Callback;
    use lineage_ontology::UniverseConfig;

    fn run(callback: impl Callback, params: &[(&str, AnyValue)]) -> Option<AnyValue> {
        let mut universe = Universe::new(UniverseConfig::default()).unwrap();
        let mut engine = CallbackEngine::new();
        let id = engine.create_callback_object(callback);
        let object = engine.callback_object_mut(id).unwrap();
        for (name, value) in params {
            object.create_callback_parameter(name, value.clone());
        }
        engine.execute(&mut universe, &AnyValue::Bool(false))
    }

    #[test]
    fn neg_of_signed_and_floating() {
        assert_eq!(run(neg, &[("", AnyValue::I32(0))]), Some(AnyValue::I32(0)));
        assert_eq!(run(neg, &[("", AnyValue::I32(1))]), Some(AnyValue::I32(-1)));
        assert_eq!(run(neg, &[("", AnyValue::I32(-2))]), Some(AnyValue::I32(2)));
        assert_eq!(
            run(neg, &[("", AnyValue::Float(1.5))]),
            Some(AnyValue::Float(-1.5))
        );
        assert_eq!(
            run(neg, &[("", AnyValue::Double(-0.25))]),
            Some(AnyValue::Double(0.25))
        );
    }

    #[test]
    fn neg_rejects_unsigned() {
        assert_eq!(run(neg, &[("", AnyValue::U32(1))]), None);
    }

    #[test]
    fn neg_needs_exactly_one_parameter() {
        assert_eq!(run(neg, &[]), None);
        assert_eq!(
            run(neg, &[("", AnyValue::I32(1)), ("", AnyValue::I32(2))]),
            None
        );
    }

    #[test]
    fn square_all_numeric_types() {
        assert_eq!(run(square, &[("", AnyValue::I32(-3))]), Some(AnyValue::I32(9)));
        assert_eq!(run(square, &[("", AnyValue::U32(256))]), Some(AnyValue::U32(65536)));
        assert_eq!(
            run(square, &[("", AnyValue::Float(0.5))]),
            Some(AnyValue::Float(0.25))
        );
        assert_eq!(
            run(square, &[("", AnyValue::Double(3.0))]),
            Some(AnyValue::Double(9.0))
        );
        assert_eq!(run(square, &[("", AnyValue::Bool(true))]), None);
    }

    #[test]
    fn square_last_without_previous_yields_nothing() {
        assert_eq!(run(square_last, &[]), None);
    }

    #[test]
    fn expt_matching_types() {
        assert_eq!(
            run(expt, &[("", AnyValue::I32(2)), ("", AnyValue::I32(16))]),
            Some(AnyValue::I32(65536))
        );
        assert_eq!(
            run(expt, &[("", AnyValue::U32(3)), ("", AnyValue::U32(4))]),
            Some(AnyValue::U32(81))
        );
        assert_eq!(
            run(expt, &[("", AnyValue::Double(2.0)), ("", AnyValue::Double(0.5))]),
            Some(AnyValue::Double(2.0_f64.sqrt()))
        );
    }

    #[test]
    fn expt_rejects_mixed_types() {
        assert_eq!(
            run(expt, &[("", AnyValue::I32(2)), ("", AnyValue::U32(2))]),
            None
        );
    }

    #[test]
    fn expt_with_named_inputs_reads_names() {
        assert_eq!(
            run(
                expt_with_named_inputs,
                &[("base", AnyValue::I32(2)), ("exponent", AnyValue::I32(16))]
            ),
            Some(AnyValue::I32(65536))
        );
        // Order of declaration does not matter.
        assert_eq!(
            run(
                expt_with_named_inputs,
                &[("exponent", AnyValue::I32(3)), ("base", AnyValue::I32(4))]
            ),
            Some(AnyValue::I32(64))
        );
    }

    #[test]
    fn expt_with_named_inputs_needs_both() {
        assert_eq!(
            run(expt_with_named_inputs, &[("base", AnyValue::I32(2))]),
            None
        );
    }

    #[test]
    fn power_errors_are_specific() {
        assert_eq!(
            power("p", &AnyValue::I32(1), &AnyValue::Float(1.0)),
            Err(CallbackError::MixedTypes {
                callback: "p",
                left: lineage_core::Datatype::I32,
                right: lineage_core::Datatype::Float,
            })
        );
        assert_eq!(
            power("p", &AnyValue::Char('a'), &AnyValue::Char('b')),
            Err(CallbackError::TypeMismatch {
                callback: "p",
                datatype: lineage_core::Datatype::Char,
            })
        );
    }
}
