// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.1.1.3 Function Environment Records](https://tc39.es/ecma262/#sec-function-environment-records)

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::values::{JsObject, JsValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThisBindingStatus {
    /// An arrow function: no local `this`, lookups defer to the outer
    /// environment entirely.
    Lexical,
    /// A derived-class constructor before `super()` has run.
    Uninitialized,
    Initialized,
}

#[derive(Debug)]
pub struct FunctionEnvironmentRecord {
    this_value: Option<JsValue>,
    this_binding_status: ThisBindingStatus,
    /// `[[FunctionObject]]`, used to resolve `super` through its
    /// `[[HomeObject]]`.
    pub function_object: JsObject,
    pub new_target: Option<JsObject>,
}

impl FunctionEnvironmentRecord {
    pub fn new(function_object: JsObject, new_target: Option<JsObject>, lexical_this: bool) -> Self {
        Self {
            this_value: None,
            this_binding_status: if lexical_this {
                ThisBindingStatus::Lexical
            } else {
                ThisBindingStatus::Uninitialized
            },
            function_object,
            new_target,
        }
    }

    pub fn has_this_binding(&self) -> bool {
        self.this_binding_status != ThisBindingStatus::Lexical
    }

    pub fn has_super_binding(&self) -> bool {
        self.this_binding_status != ThisBindingStatus::Lexical
    }

    /// `BindThisValue`: only legal once, typically right after invocation
    /// (base constructors/ordinary functions) or after `super()` returns
    /// (derived constructors).
    pub fn bind_this_value(&mut self, value: JsValue) {
        debug_assert_ne!(self.this_binding_status, ThisBindingStatus::Initialized);
        self.this_value = Some(value);
        self.this_binding_status = ThisBindingStatus::Initialized;
    }

    /// Whether `this` has already been bound — a derived constructor's
    /// `super()` call is only legal once; a second one is a `ReferenceError`
    /// (spec.md §4.F).
    pub fn is_bound(&self) -> bool {
        self.this_binding_status == ThisBindingStatus::Initialized
    }

    pub fn get_this_binding(&self, agent: &Agent) -> JsResult<JsValue> {
        match self.this_binding_status {
            ThisBindingStatus::Uninitialized => Err(agent.throw_exception(
                ExceptionType::ReferenceError,
                "Must call super constructor in derived class before accessing 'this'",
            )),
            _ => Ok(self.this_value.clone().unwrap_or(JsValue::Undefined)),
        }
    }
}
