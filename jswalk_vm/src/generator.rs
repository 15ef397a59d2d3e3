// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [27.5 GeneratorFunction Objects](https://tc39.es/ecma262/#sec-generatorfunction-objects) / [Yield tracker](../SPEC_FULL.md)
//!
//! Generators are modeled by re-running the body from the top on every
//! `.next()`/`.throw()`/`.return()` call rather than capturing a real
//! continuation (spec.md §4.K, §9 "Generator replay vs continuation
//! capture"). A [`GeneratorReplay`] counts how many `yield`s this replay has
//! already passed; a [`ResumePayload`] table on the generator's persistent
//! [`GeneratorInternal`] supplies what each already-passed `yield` resolves
//! to. The first `yield` without an answer suspends the whole call stack by
//! propagating [`JsError::Suspend`] up through ordinary `?`-based control
//! flow — no separate suspension machinery is needed anywhere else in the
//! evaluator.
//!
//! `await` does not need any of this: [`crate::host::PromiseAdapter`] here
//! is purely synchronous (no microtask queue), so an `async function` body
//! just runs start to finish and [`await_value`] resolves immediately.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ahash::AHashMap;

use crate::agent::{Agent, ExceptionType, JsError, JsResult};
use crate::eval::expression::evaluate_expression;
use crate::eval::iterator::{get_iterator, iterator_next_with_value, iterator_try_method, IteratorRecord};
use crate::execution_context::EvaluationContext;
use crate::host::StandardLibrary;
use crate::values::{FunctionData, JsObject, JsValue, NativeFunction, ObjectKind, PropKey, PropertyDescriptor};

/// What a `.next(v)`/`.throw(e)`/`.return(v)` call sends into the suspended
/// `yield` it resumes.
#[derive(Clone, Debug)]
pub enum ResumePayload {
    Next(JsValue),
    Throw(JsValue),
    Return(JsValue),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GeneratorStatus {
    SuspendedStart,
    SuspendedYield,
    Executing,
    Completed,
}

/// The persistent state behind one generator instance, held by
/// [`crate::values::ObjectKind::Generator`]. Survives across every
/// resumption; [`GeneratorReplay`] is the short-lived state for a single
/// replay pass.
pub struct GeneratorInternal {
    function_object: JsObject,
    this_value: JsValue,
    arguments: Vec<JsValue>,
    payloads: Vec<ResumePayload>,
    /// `yield*`'s inner iterator, keyed by the delegating expression's
    /// source position so it survives across replay passes (spec.md §4.K
    /// `DelegatedYieldState`).
    delegated: AHashMap<u32, IteratorRecord>,
    status: GeneratorStatus,
}

/// Per-replay-pass state threaded through [`EvaluationContext::generator`].
pub struct GeneratorReplay {
    payloads: Vec<ResumePayload>,
    index: Cell<usize>,
    internal: Rc<RefCell<GeneratorInternal>>,
}

/// Builds a fresh generator object for a call to a `function*`/`async
/// function*`, ready to run from the top on its first `.next()`.
pub fn create_generator(agent: &Agent, function_object: JsObject, this_value: JsValue, arguments: Vec<JsValue>) -> JsObject {
    let internal = GeneratorInternal {
        function_object,
        this_value,
        arguments,
        payloads: Vec::new(),
        delegated: AHashMap::default(),
        status: GeneratorStatus::SuspendedStart,
    };
    let proto = agent.realm.host.object_prototype();
    let generator = JsObject::new_generator(Some(proto), internal);
    install_generator_methods(agent, &generator);
    generator
}

fn install_generator_methods(agent: &Agent, generator: &JsObject) {
    let next_fn: NativeFunction = Rc::new(|agent, this, args| {
        with_generator(agent, &this, |agent, obj| resume(agent, obj, ResumePayload::Next(args.first().cloned().unwrap_or(JsValue::Undefined))))
    });
    let throw_fn: NativeFunction = Rc::new(|agent, this, args| {
        with_generator(agent, &this, |agent, obj| resume(agent, obj, ResumePayload::Throw(args.first().cloned().unwrap_or(JsValue::Undefined))))
    });
    let return_fn: NativeFunction = Rc::new(|agent, this, args| {
        with_generator(agent, &this, |agent, obj| resume(agent, obj, ResumePayload::Return(args.first().cloned().unwrap_or(JsValue::Undefined))))
    });
    define_native_method(agent, generator, "next", next_fn);
    define_native_method(agent, generator, "throw", throw_fn);
    define_native_method(agent, generator, "return", return_fn);
}

fn define_native_method(agent: &Agent, target: &JsObject, name: &str, native: NativeFunction) {
    let function_prototype = agent.realm.host.function_prototype();
    let func = JsObject::new(Some(function_prototype), ObjectKind::Function(FunctionData::Native(native, Rc::from(name))));
    target.define_property(PropKey::from(name), PropertyDescriptor::data(JsValue::Object(func), true, false, true));
}

fn with_generator(agent: &mut Agent, this: &JsValue, f: impl FnOnce(&mut Agent, &JsObject) -> JsResult<JsValue>) -> JsResult<JsValue> {
    let JsValue::Object(obj) = this else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "not a generator"));
    };
    if !obj.is_generator() {
        return Err(agent.throw_exception(ExceptionType::TypeError, "not a generator"));
    }
    f(agent, obj)
}

fn make_iterator_result(agent: &Agent, value: JsValue, done: bool) -> JsValue {
    let result = agent.realm.host.new_ordinary_object();
    result.define_property(PropKey::from("value"), PropertyDescriptor::data(value, true, true, true));
    result.define_property(PropKey::from("done"), PropertyDescriptor::data(JsValue::Boolean(done), true, true, true));
    JsValue::Object(result)
}

fn resume(agent: &mut Agent, generator_obj: &JsObject, payload: ResumePayload) -> JsResult<JsValue> {
    let internal_rc = generator_obj
        .generator_internal()
        .expect("with_generator already checked is_generator()");

    let status = internal_rc.borrow().status;
    match status {
        GeneratorStatus::Completed => {
            return match payload {
                ResumePayload::Throw(v) => Err(agent.throw_value(v)),
                ResumePayload::Return(v) => Ok(make_iterator_result(agent, v, true)),
                ResumePayload::Next(_) => Ok(make_iterator_result(agent, JsValue::Undefined, true)),
            };
        }
        GeneratorStatus::Executing => {
            return Err(agent.throw_exception(ExceptionType::TypeError, "Generator is already running"));
        }
        GeneratorStatus::SuspendedStart => match &payload {
            ResumePayload::Throw(v) => {
                internal_rc.borrow_mut().status = GeneratorStatus::Completed;
                return Err(agent.throw_value(v.clone()));
            }
            ResumePayload::Return(v) => {
                internal_rc.borrow_mut().status = GeneratorStatus::Completed;
                return Ok(make_iterator_result(agent, v.clone(), true));
            }
            ResumePayload::Next(_) => {}
        },
        GeneratorStatus::SuspendedYield => {
            internal_rc.borrow_mut().payloads.push(payload);
        }
    }

    internal_rc.borrow_mut().status = GeneratorStatus::Executing;
    let (function_object, this_value, arguments, payloads) = {
        let data = internal_rc.borrow();
        (data.function_object.clone(), data.this_value.clone(), data.arguments.clone(), data.payloads.clone())
    };
    let replay = Rc::new(GeneratorReplay {
        payloads,
        index: Cell::new(0),
        internal: internal_rc.clone(),
    });

    let result = crate::function_invocation::run_function_body(agent, &function_object, this_value, &arguments, None, Some(replay));

    match result {
        Ok(crate::completion::Completion::Normal(value)) | Ok(crate::completion::Completion::Return(value)) => {
            internal_rc.borrow_mut().status = GeneratorStatus::Completed;
            Ok(make_iterator_result(agent, value, true))
        }
        Ok(crate::completion::Completion::Throw(err)) => {
            internal_rc.borrow_mut().status = GeneratorStatus::Completed;
            Err(err)
        }
        Ok(crate::completion::Completion::Suspend(value)) => {
            internal_rc.borrow_mut().status = GeneratorStatus::SuspendedYield;
            Ok(make_iterator_result(agent, value, false))
        }
        Ok(crate::completion::Completion::Break(_)) | Ok(crate::completion::Completion::Continue(_)) => {
            internal_rc.borrow_mut().status = GeneratorStatus::Completed;
            Err(agent.throw_exception(ExceptionType::Error, "generator body exited on an unresolved break/continue"))
        }
        Err(engine_err) => {
            internal_rc.borrow_mut().status = GeneratorStatus::Completed;
            Err(crate::function_invocation::engine_error_to_js(agent, engine_err))
        }
    }
}

/// `yield` (spec.md §4.K "yield tracker"): on a fresh replay pass, every
/// `yield` already passed in a previous pass returns its recorded
/// [`ResumePayload`] instead of suspending again; the first one without a
/// recorded payload is the new suspension point.
pub fn evaluate_yield(agent: &mut Agent, ctx: &EvaluationContext, yield_expr: &ast::YieldExpression) -> JsResult<JsValue> {
    let replay = ctx
        .generator
        .clone()
        .ok_or_else(|| agent.throw_exception(ExceptionType::SyntaxError, "yield is only valid inside a generator function"))?;

    let argument_value = match &yield_expr.argument {
        Some(expr) => evaluate_expression(agent, ctx, expr)?,
        None => JsValue::Undefined,
    };

    if yield_expr.delegate {
        return evaluate_yield_star(agent, &replay, yield_expr, argument_value);
    }

    let index = replay.index.get();
    replay.index.set(index + 1);
    if index < replay.payloads.len() {
        match &replay.payloads[index] {
            ResumePayload::Next(v) => Ok(v.clone()),
            ResumePayload::Throw(v) => Err(agent.throw_value(v.clone())),
            ResumePayload::Return(v) => Err(JsError::Return(v.clone())),
        }
    } else {
        Err(JsError::Suspend(argument_value))
    }
}

enum DelegateStep {
    Complete(JsValue),
    Suspend(JsValue),
}

/// Forwards one resume payload into a `yield*`'s inner iterator, producing
/// either the delegation's final value (iterator exhausted) or a value to
/// suspend the outer generator with (spec.md §4.K "Brand").
fn forward_into_delegate(agent: &mut Agent, replay: &Rc<GeneratorReplay>, key: u32, input: ResumePayload) -> JsResult<DelegateStep> {
    let record = replay
        .internal
        .borrow()
        .delegated
        .get(&key)
        .cloned()
        .expect("delegated record installed before forwarding");

    match input {
        ResumePayload::Next(v) => {
            let (done, value) = iterator_next_with_value(agent, &record, v)?;
            if done {
                replay.internal.borrow_mut().delegated.remove(&key);
                Ok(DelegateStep::Complete(value))
            } else {
                Ok(DelegateStep::Suspend(value))
            }
        }
        ResumePayload::Throw(v) => match iterator_try_method(agent, &record, "throw", v.clone())? {
            Some((done, value)) => {
                if done {
                    replay.internal.borrow_mut().delegated.remove(&key);
                    Ok(DelegateStep::Complete(value))
                } else {
                    Ok(DelegateStep::Suspend(value))
                }
            }
            None => {
                replay.internal.borrow_mut().delegated.remove(&key);
                let _ = crate::eval::iterator::iterator_close(agent, &record, Ok::<(), JsError>(()));
                Err(agent.throw_exception(ExceptionType::TypeError, "iterator does not have a throw method"))
            }
        },
        ResumePayload::Return(v) => match iterator_try_method(agent, &record, "return", v.clone())? {
            Some((done, value)) => {
                if done {
                    replay.internal.borrow_mut().delegated.remove(&key);
                    Err(JsError::Return(value))
                } else {
                    Ok(DelegateStep::Suspend(value))
                }
            }
            None => {
                replay.internal.borrow_mut().delegated.remove(&key);
                Err(JsError::Return(v))
            }
        },
    }
}

/// `yield*`: drives the delegated iterator one step per already-answered
/// slot (replaying its past history deterministically), then either
/// completes the expression or suspends the outer generator at the first
/// not-yet-answered slot — indistinguishable, from the replay counter's
/// point of view, from an ordinary `yield` that happens to run in a loop.
fn evaluate_yield_star(agent: &mut Agent, replay: &Rc<GeneratorReplay>, yield_expr: &ast::YieldExpression, argument_value: JsValue) -> JsResult<JsValue> {
    let key = yield_expr.span.start;
    let already_delegating = replay.internal.borrow().delegated.contains_key(&key);
    if !already_delegating {
        let record = get_iterator(agent, &argument_value)?;
        replay.internal.borrow_mut().delegated.insert(key, record);
    }

    let mut input = ResumePayload::Next(JsValue::Undefined);
    loop {
        let idx = replay.index.get();
        let live = idx >= replay.payloads.len();
        if !live {
            input = replay.payloads[idx].clone();
        }
        replay.index.set(idx + 1);

        match forward_into_delegate(agent, replay, key, input.clone())? {
            DelegateStep::Complete(value) => return Ok(value),
            DelegateStep::Suspend(value) => {
                if live {
                    return Err(JsError::Suspend(value));
                }
                // Already answered in a previous pass: keep replaying the
                // next slot, same as a plain `yield` revisited in a loop.
            }
        }
    }
}

/// `await` (spec.md §4.K): evaluates its operand, then resolves it
/// synchronously through [`await_value`].
pub fn evaluate_await(agent: &mut Agent, ctx: &EvaluationContext, await_expr: &ast::AwaitExpression) -> JsResult<JsValue> {
    let value = evaluate_expression(agent, ctx, &await_expr.argument)?;
    await_value(agent, value)
}

/// Resolves a value the way `await` would. [`crate::host::PromiseAdapter`]
/// never schedules a microtask in this evaluator, so there is no event loop
/// to actually suspend for: a fulfilled promise's value is returned, a
/// rejected one is thrown, and a still-pending one can't be waited on
/// (spec.md Non-goals — no host scheduler).
pub fn await_value(agent: &mut Agent, value: JsValue) -> JsResult<JsValue> {
    let JsValue::Object(obj) = &value else {
        return Ok(value);
    };
    let state = obj.get(agent, &PropKey::from("__state"), value.clone())?;
    let JsValue::String(state) = state else {
        return Ok(value);
    };
    match state.as_ref() {
        "fulfilled" => obj.get(agent, &PropKey::from("__value"), value.clone()),
        "rejected" => {
            let reason = obj.get(agent, &PropKey::from("__value"), value.clone())?;
            Err(agent.throw_value(reason))
        }
        "pending" => Err(agent.throw_exception(ExceptionType::TypeError, "cannot await a pending promise synchronously")),
        _ => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_payload_clones_independently() {
        let a = ResumePayload::Next(JsValue::Number(1.0));
        let b = a.clone();
        match (a, b) {
            (ResumePayload::Next(x), ResumePayload::Next(y)) => assert!(x.strict_equals(&y)),
            _ => panic!("expected Next/Next"),
        }
    }
}
