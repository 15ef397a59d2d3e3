// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.1.1.2 Object Environment Records](https://tc39.es/ecma262/#sec-object-environment-records)
//!
//! Used both for the global object's var-scope and, when
//! `is_with_environment` is set, for the overlay a `with` statement pushes
//! (spec.md §3's environment-chain note).

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::values::{JsObject, JsValue, PropKey};

#[derive(Debug)]
pub struct ObjectEnvironmentRecord {
    pub binding_object: JsObject,
    pub is_with_environment: bool,
}

impl ObjectEnvironmentRecord {
    pub fn new(binding_object: JsObject, is_with_environment: bool) -> Self {
        Self {
            binding_object,
            is_with_environment,
        }
    }

    pub fn has_binding(&self, _agent: &mut Agent, name: &str) -> JsResult<bool> {
        // `@@unscopables` filtering is not modeled; a `with` overlay shadows
        // every own-or-inherited property of the binding object.
        Ok(self.binding_object.has_property(&PropKey::from(name)))
    }

    pub fn create_mutable_binding(&self, agent: &mut Agent, name: &str) -> JsResult<()> {
        self.binding_object
            .set(agent, PropKey::from(name), JsValue::Undefined, JsValue::Object(self.binding_object.clone()))
    }

    pub fn initialize_binding(&self, agent: &mut Agent, name: &str, value: JsValue) -> JsResult<()> {
        self.binding_object
            .set(agent, PropKey::from(name), value, JsValue::Object(self.binding_object.clone()))
    }

    pub fn set_mutable_binding(
        &self,
        agent: &mut Agent,
        name: &str,
        value: JsValue,
        strict: bool,
    ) -> JsResult<()> {
        let key = PropKey::from(name);
        let receiver = JsValue::Object(self.binding_object.clone());
        if strict && !self.binding_object.has_property(&key) {
            return Err(agent.throw_exception(
                ExceptionType::ReferenceError,
                format!("{name} is not defined"),
            ));
        }
        self.binding_object.set(agent, key, value, receiver)
    }

    pub fn get_binding_value(&self, agent: &mut Agent, name: &str, strict: bool) -> JsResult<JsValue> {
        let key = PropKey::from(name);
        if !self.binding_object.has_property(&key) {
            if strict {
                return Err(agent.throw_exception(
                    ExceptionType::ReferenceError,
                    format!("{name} is not defined"),
                ));
            }
            return Ok(JsValue::Undefined);
        }
        self.binding_object
            .get(agent, &key, JsValue::Object(self.binding_object.clone()))
    }

    pub fn delete_binding(&self, name: &str) -> bool {
        self.binding_object.delete(&PropKey::from(name))
    }
}
