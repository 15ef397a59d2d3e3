// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.1.1.4 Global Environment Records](https://tc39.es/ecma262/#sec-global-environment-records)
//!
//! A composite of a declarative record (for top-level `let`/`const`/class)
//! and an object record over the global object (for `var`/function
//! declarations and every pre-existing global property).

use std::rc::Rc;

use ahash::AHashSet;

use crate::agent::{Agent, JsResult};
use crate::environment::declarative::DeclarativeEnvironmentRecord;
use crate::environment::object::ObjectEnvironmentRecord;
use crate::values::{JsObject, JsValue};

#[derive(Debug)]
pub struct GlobalEnvironmentRecord {
    pub object_record: ObjectEnvironmentRecord,
    pub declarative_record: DeclarativeEnvironmentRecord,
    /// Names declared by top-level `var`/function declarations, tracked
    /// separately so `HasVarDeclaration` doesn't need a property lookup.
    var_names: AHashSet<Rc<str>>,
}

impl GlobalEnvironmentRecord {
    pub fn new(global_object: JsObject) -> Self {
        Self {
            object_record: ObjectEnvironmentRecord::new(global_object, false),
            declarative_record: DeclarativeEnvironmentRecord::new(),
            var_names: AHashSet::default(),
        }
    }

    pub fn global_object(&self) -> JsObject {
        self.object_record.binding_object.clone()
    }

    pub fn has_binding(&self, agent: &mut Agent, name: &str) -> JsResult<bool> {
        if self.declarative_record.has_binding(name) {
            return Ok(true);
        }
        self.object_record.has_binding(agent, name)
    }

    pub fn has_var_declaration(&self, name: &str) -> bool {
        self.var_names.contains(name)
    }

    pub fn create_mutable_binding(&mut self, agent: &mut Agent, name: Rc<str>, deletable: bool) -> JsResult<()> {
        self.object_record.create_mutable_binding(agent, &name)?;
        self.var_names.insert(name);
        Ok(())
    }

    pub fn create_immutable_binding(&mut self, name: Rc<str>, strict: bool) {
        self.declarative_record.create_immutable_binding(name, strict);
    }

    pub fn initialize_binding(&mut self, agent: &mut Agent, name: &str, value: JsValue) -> JsResult<()> {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.initialize_binding(name, value);
            Ok(())
        } else {
            self.object_record.initialize_binding(agent, name, value)
        }
    }

    pub fn set_mutable_binding(
        &mut self,
        agent: &mut Agent,
        name: &str,
        value: JsValue,
        strict: bool,
    ) -> JsResult<()> {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.set_mutable_binding(agent, name, value, strict)
        } else {
            self.object_record.set_mutable_binding(agent, name, value, strict)
        }
    }

    pub fn get_binding_value(&mut self, agent: &mut Agent, name: &str, strict: bool) -> JsResult<JsValue> {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.get_binding_value(agent, name)
        } else {
            self.object_record.get_binding_value(agent, name, strict)
        }
    }

    pub fn delete_binding(&mut self, name: &str) -> bool {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.delete_binding(name)
        } else {
            let deleted = self.object_record.delete_binding(name);
            if deleted {
                self.var_names.remove(name);
            }
            deleted
        }
    }
}
