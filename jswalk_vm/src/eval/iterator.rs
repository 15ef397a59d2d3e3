// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [7.4 Operations on Iterator Objects](https://tc39.es/ecma262/#sec-operations-on-iterator-objects)
//!
//! Every `for-of`, spread, destructuring rest-array, and `yield*` ultimately
//! goes through [`get_iterator`]/[`iterator_step_value`]/[`iterator_close`]
//! so that a loop body which throws or `break`s still closes the iterator
//! exactly once (spec.md §4.H).

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::host::Callable;
use crate::values::{JsObject, JsValue, PropKey, WellKnownSymbol};

#[derive(Clone)]
pub struct IteratorRecord {
    pub iterator: JsObject,
    pub(crate) next_method: JsValue,
}

/// `GetIterator`, synchronous iteration only (spec.md Non-goals: no
/// `for-await-of`/async generator delegation beyond what async functions
/// already model through their single suspension point).
pub fn get_iterator(agent: &mut Agent, value: &JsValue) -> JsResult<IteratorRecord> {
    let symbol = agent.realm.well_known_symbol(WellKnownSymbol::Iterator);
    let method = match value {
        JsValue::Object(obj) => obj.get(agent, &PropKey::Symbol(symbol), value.clone())?,
        _ => {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                format!("{} is not iterable", value.type_of()),
            ))
        }
    };
    let JsValue::Object(method_obj) = &method else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Result of the Symbol.iterator method is not a function"));
    };
    if !method_obj.is_callable() {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Result of the Symbol.iterator method is not a function"));
    }
    let iterator = method_obj.call(agent, value.clone(), &[])?;
    let JsValue::Object(iterator) = iterator else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Result of the Symbol.iterator method is not an object"));
    };
    let next_method = iterator.get(agent, &PropKey::from("next"), JsValue::Object(iterator.clone()))?;
    Ok(IteratorRecord { iterator, next_method })
}

/// `IteratorStep` + `IteratorValue` combined: `Ok(None)` means the iterator
/// reported `done: true`.
pub fn iterator_step_value(agent: &mut Agent, record: &IteratorRecord) -> JsResult<Option<JsValue>> {
    let JsValue::Object(next) = &record.next_method else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "iterator.next is not a function"));
    };
    let result = next.call(agent, JsValue::Object(record.iterator.clone()), &[])?;
    let JsValue::Object(result) = result else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Iterator result is not an object"));
    };
    let done = result
        .get(agent, &PropKey::from("done"), JsValue::Object(result.clone()))?
        .to_boolean();
    if done {
        return Ok(None);
    }
    let value = result.get(agent, &PropKey::from("value"), JsValue::Object(result.clone()))?;
    Ok(Some(value))
}

/// `IteratorClose`: calls `return()` if present, swallowing its result but
/// not a throw from the return call itself — unless `completion` was
/// already an `Err`, in which case the original error wins (spec.md §4.H
/// "IteratorClose").
pub fn iterator_close<T>(agent: &mut Agent, record: &IteratorRecord, completion: JsResult<T>) -> JsResult<T> {
    let return_method = record
        .iterator
        .get(agent, &PropKey::from("return"), JsValue::Object(record.iterator.clone()));
    let return_method = match return_method {
        Ok(value) => value,
        Err(err) => return completion.and(Err(err)),
    };
    if return_method.is_undefined() {
        return completion;
    }
    let JsValue::Object(return_method) = &return_method else {
        return completion;
    };
    if !return_method.is_callable() {
        return completion;
    }
    let close_result = return_method.call(agent, JsValue::Object(record.iterator.clone()), &[]);
    match (completion, close_result) {
        (Err(orig), _) => Err(orig),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Ok(value), Ok(_)) => Ok(value),
    }
}

/// `IteratorNext` with an explicit argument, as `yield* it` forwards a
/// resumed generator's `.next(v)` payload into the delegated-to iterator.
/// Returns `(done, value)` instead of `Option<JsValue>` since the caller
/// needs to know `done` even on the final value.
pub fn iterator_next_with_value(agent: &mut Agent, record: &IteratorRecord, value: JsValue) -> JsResult<(bool, JsValue)> {
    let JsValue::Object(next) = &record.next_method else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "iterator.next is not a function"));
    };
    let result = next.call(agent, JsValue::Object(record.iterator.clone()), &[value])?;
    let JsValue::Object(result) = result else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Iterator result is not an object"));
    };
    let done = result
        .get(agent, &PropKey::from("done"), JsValue::Object(result.clone()))?
        .to_boolean();
    let value = result.get(agent, &PropKey::from("value"), JsValue::Object(result.clone()))?;
    Ok((done, value))
}

/// Forwards a delegated `yield*`'s `.throw(v)`/`.return(v)` into the inner
/// iterator's own `throw`/`return` method, if it has one. `Ok(None)` means
/// the iterator doesn't implement that method at all — the caller falls
/// back to closing the iterator and raising/returning the value itself
/// (spec.md §4.K "yield* delegation").
pub fn iterator_try_method(agent: &mut Agent, record: &IteratorRecord, method_name: &str, arg: JsValue) -> JsResult<Option<(bool, JsValue)>> {
    let method = record.iterator.get(agent, &PropKey::from(method_name), JsValue::Object(record.iterator.clone()))?;
    if method.is_undefined() {
        return Ok(None);
    }
    let JsValue::Object(method) = &method else {
        return Err(agent.throw_exception(ExceptionType::TypeError, format!("iterator.{method_name} is not a function")));
    };
    if !method.is_callable() {
        return Err(agent.throw_exception(ExceptionType::TypeError, format!("iterator.{method_name} is not a function")));
    }
    let result = method.call(agent, JsValue::Object(record.iterator.clone()), &[arg])?;
    let JsValue::Object(result) = result else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Iterator result is not an object"));
    };
    let done = result
        .get(agent, &PropKey::from("done"), JsValue::Object(result.clone()))?
        .to_boolean();
    let value = result.get(agent, &PropKey::from("value"), JsValue::Object(result.clone()))?;
    Ok(Some((done, value)))
}

/// Drains the whole iterator into a `Vec`, used for array-destructuring
/// rest elements and spread in array literals/call arguments.
pub fn iterator_to_vec(agent: &mut Agent, value: &JsValue) -> JsResult<Vec<JsValue>> {
    let record = get_iterator(agent, value)?;
    let mut items = Vec::new();
    loop {
        match iterator_step_value(agent, &record) {
            Ok(Some(item)) => items.push(item),
            Ok(None) => return Ok(items),
            Err(err) => return Err(err),
        }
    }
}
