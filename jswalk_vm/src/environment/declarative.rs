// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.1.1.1 Declarative Environment Records](https://tc39.es/ecma262/#sec-declarative-environment-records)

use std::rc::Rc;

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::values::JsValue;

/// A single identifier binding. `value: None` means the binding exists but
/// is in the temporal dead zone (spec.md §4.B TDZ).
#[derive(Clone, Debug)]
pub struct Binding {
    pub value: Option<JsValue>,
    pub mutable: bool,
    pub strict: bool,
    pub deletable: bool,
}

#[derive(Debug, Default)]
pub struct DeclarativeEnvironmentRecord {
    bindings: ahash::AHashMap<Rc<str>, Binding>,
}

impl DeclarativeEnvironmentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// `var`-style binding: mutable, deletable only when explicitly marked
    /// (catch parameters and function-scope `var`s are never deletable).
    pub fn create_mutable_binding(&mut self, name: Rc<str>, deletable: bool) {
        self.bindings.insert(
            name,
            Binding {
                value: None,
                mutable: true,
                strict: false,
                deletable,
            },
        );
    }

    /// `const`/class-binding: immutable once initialized.
    pub fn create_immutable_binding(&mut self, name: Rc<str>, strict: bool) {
        self.bindings.insert(
            name,
            Binding {
                value: None,
                mutable: false,
                strict,
                deletable: false,
            },
        );
    }

    pub fn initialize_binding(&mut self, name: &str, value: JsValue) {
        let binding = self
            .bindings
            .get_mut(name)
            .expect("InitializeBinding on a name with no declared binding");
        binding.value = Some(value);
    }

    pub fn set_mutable_binding(
        &mut self,
        agent: &Agent,
        name: &str,
        value: JsValue,
        strict: bool,
    ) -> JsResult<()> {
        let Some(binding) = self.bindings.get_mut(name) else {
            if strict {
                return Err(agent.throw_exception(
                    ExceptionType::ReferenceError,
                    format!("{name} is not defined"),
                ));
            }
            self.bindings.insert(
                Rc::from(name),
                Binding {
                    value: Some(value),
                    mutable: true,
                    strict: false,
                    deletable: true,
                },
            );
            return Ok(());
        };
        if binding.value.is_none() {
            return Err(agent.throw_exception(
                ExceptionType::ReferenceError,
                format!("Cannot access '{name}' before initialization"),
            ));
        }
        if !binding.mutable {
            if strict || binding.strict {
                return Err(agent.throw_exception(
                    ExceptionType::TypeError,
                    format!("Assignment to constant variable '{name}'"),
                ));
            }
            return Ok(());
        }
        binding.value = Some(value);
        Ok(())
    }

    pub fn get_binding_value(&self, agent: &Agent, name: &str) -> JsResult<JsValue> {
        let binding = self
            .bindings
            .get(name)
            .expect("GetBindingValue on a name with no declared binding");
        binding.value.clone().ok_or_else(|| {
            agent.throw_exception(
                ExceptionType::ReferenceError,
                format!("Cannot access '{name}' before initialization"),
            )
        })
    }

    pub fn delete_binding(&mut self, name: &str) -> bool {
        match self.bindings.get(name) {
            Some(binding) if !binding.deletable => false,
            Some(_) => {
                self.bindings.remove(name);
                true
            }
            None => true,
        }
    }

    pub fn binding_names(&self) -> impl Iterator<Item = &Rc<str>> {
        self.bindings.keys()
    }
}
