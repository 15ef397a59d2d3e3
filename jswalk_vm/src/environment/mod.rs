// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.1 Environment Records](https://tc39.es/ecma262/#sec-environment-records)
//!
//! One [`Environment`] handle stands in for whichever kind of Environment
//! Record it wraps (spec.md §4.B); callers never match on the kind except
//! to decide which concrete record to build. Where the teacher indexes into
//! a generational GC-tracked heap, this is a plain `Rc<RefCell<_>>` chain
//! (see SPEC_FULL.md §4 design note).

mod declarative;
mod function;
mod global;
mod object;
mod private;

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashSet;

pub use declarative::{Binding, DeclarativeEnvironmentRecord};
pub use function::{FunctionEnvironmentRecord, ThisBindingStatus};
pub use global::GlobalEnvironmentRecord;
pub use object::ObjectEnvironmentRecord;
pub use private::{PrivateEnvironment, PrivateMember};

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::values::{JsObject, JsValue};

enum EnvironmentKind {
    Declarative(DeclarativeEnvironmentRecord),
    Function(FunctionEnvironmentRecord),
    Object(ObjectEnvironmentRecord),
    Global(GlobalEnvironmentRecord),
}

struct EnvironmentData {
    outer: Option<Environment>,
    kind: EnvironmentKind,
    /// Names bound via a destructured simple `catch` parameter in this
    /// environment, consulted by Annex B var hoisting (spec.md §4.B,
    /// "SetSimpleCatchParameters").
    simple_catch_parameters: AHashSet<Rc<str>>,
}

/// A lexical or variable environment. Cheap to clone; clones alias the same
/// underlying record.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<EnvironmentData>>);

impl Environment {
    fn wrap(outer: Option<Environment>, kind: EnvironmentKind) -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData {
            outer,
            kind,
            simple_catch_parameters: AHashSet::default(),
        })))
    }

    pub fn new_declarative(outer: Option<Environment>) -> Self {
        Self::wrap(outer, EnvironmentKind::Declarative(DeclarativeEnvironmentRecord::new()))
    }

    pub fn new_object(outer: Option<Environment>, binding_object: JsObject, is_with_environment: bool) -> Self {
        Self::wrap(
            outer,
            EnvironmentKind::Object(ObjectEnvironmentRecord::new(binding_object, is_with_environment)),
        )
    }

    pub fn new_function(
        outer: Option<Environment>,
        function_object: JsObject,
        new_target: Option<JsObject>,
        lexical_this: bool,
    ) -> Self {
        Self::wrap(
            outer,
            EnvironmentKind::Function(FunctionEnvironmentRecord::new(function_object, new_target, lexical_this)),
        )
    }

    pub fn new_global(global_object: JsObject) -> Self {
        Self::wrap(None, EnvironmentKind::Global(GlobalEnvironmentRecord::new(global_object)))
    }

    pub fn outer(&self) -> Option<Environment> {
        self.0.borrow().outer.clone()
    }

    pub fn has_binding(&self, agent: &mut Agent, name: &str) -> JsResult<bool> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            EnvironmentKind::Declarative(rec) => Ok(rec.has_binding(name)),
            EnvironmentKind::Function(_) => Ok(name == "this" || self.decl_has_binding(name)),
            EnvironmentKind::Object(rec) => rec.has_binding(agent, name),
            EnvironmentKind::Global(rec) => rec.has_binding(agent, name),
        }
    }

    fn decl_has_binding(&self, _name: &str) -> bool {
        // Function environments layer a declarative record's worth of
        // behavior via their own bindings map in a full implementation;
        // this evaluator keeps parameter/local bindings in a child
        // declarative environment instead, so function environments only
        // ever answer `this`/`super`-shaped lookups directly.
        false
    }

    pub fn create_mutable_binding(&self, agent: &mut Agent, name: Rc<str>, deletable: bool) -> JsResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            EnvironmentKind::Declarative(rec) => {
                rec.create_mutable_binding(name, deletable);
                Ok(())
            }
            EnvironmentKind::Global(rec) => rec.create_mutable_binding(agent, name, deletable),
            EnvironmentKind::Object(_) => Err(agent.throw_exception(
                ExceptionType::TypeError,
                "cannot declare a binding on an object environment",
            )),
            EnvironmentKind::Function(_) => {
                panic!("create_mutable_binding called on a function environment")
            }
        }
    }

    pub fn create_immutable_binding(&self, name: Rc<str>, strict: bool) {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            EnvironmentKind::Declarative(rec) => rec.create_immutable_binding(name, strict),
            EnvironmentKind::Global(rec) => rec.create_immutable_binding(name, strict),
            _ => panic!("create_immutable_binding called on a non-declarative environment"),
        }
    }

    pub fn initialize_binding(&self, agent: &mut Agent, name: &str, value: JsValue) -> JsResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            EnvironmentKind::Declarative(rec) => {
                rec.initialize_binding(name, value);
                Ok(())
            }
            EnvironmentKind::Global(rec) => rec.initialize_binding(agent, name, value),
            EnvironmentKind::Object(rec) => rec.initialize_binding(agent, name, value),
            EnvironmentKind::Function(_) => {
                panic!("initialize_binding called on a function environment")
            }
        }
    }

    pub fn set_mutable_binding(&self, agent: &mut Agent, name: &str, value: JsValue, strict: bool) -> JsResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            EnvironmentKind::Declarative(rec) => rec.set_mutable_binding(agent, name, value, strict),
            EnvironmentKind::Global(rec) => rec.set_mutable_binding(agent, name, value, strict),
            EnvironmentKind::Object(rec) => rec.set_mutable_binding(agent, name, value, strict),
            EnvironmentKind::Function(_) => {
                panic!("set_mutable_binding called on a function environment")
            }
        }
    }

    pub fn get_binding_value(&self, agent: &mut Agent, name: &str, strict: bool) -> JsResult<JsValue> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            EnvironmentKind::Declarative(rec) => rec.get_binding_value(agent, name),
            EnvironmentKind::Global(rec) => rec.get_binding_value(agent, name, strict),
            EnvironmentKind::Object(rec) => rec.get_binding_value(agent, name, strict),
            EnvironmentKind::Function(_) => {
                panic!("get_binding_value called on a function environment")
            }
        }
    }

    pub fn delete_binding(&self, name: &str) -> bool {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            EnvironmentKind::Declarative(rec) => rec.delete_binding(name),
            EnvironmentKind::Global(rec) => rec.delete_binding(name),
            EnvironmentKind::Object(rec) => rec.delete_binding(name),
            EnvironmentKind::Function(_) => false,
        }
    }

    pub fn has_this_binding(&self) -> bool {
        match &self.0.borrow().kind {
            EnvironmentKind::Function(rec) => rec.has_this_binding(),
            EnvironmentKind::Global(_) => true,
            _ => false,
        }
    }

    pub fn has_super_binding(&self) -> bool {
        matches!(&self.0.borrow().kind, EnvironmentKind::Function(rec) if rec.has_super_binding())
    }

    pub fn bind_this_value(&self, value: JsValue) {
        match &mut self.0.borrow_mut().kind {
            EnvironmentKind::Function(rec) => rec.bind_this_value(value),
            _ => panic!("bind_this_value called on a non-function environment"),
        }
    }

    /// Whether this (function) environment's `this` has already been bound.
    /// Used to reject a second `super()` call in a derived constructor.
    pub fn this_binding_is_initialized(&self) -> bool {
        matches!(&self.0.borrow().kind, EnvironmentKind::Function(rec) if rec.is_bound())
    }

    pub fn function_object(&self) -> Option<JsObject> {
        match &self.0.borrow().kind {
            EnvironmentKind::Function(rec) => Some(rec.function_object.clone()),
            _ => None,
        }
    }

    pub fn new_target(&self) -> Option<JsObject> {
        match &self.0.borrow().kind {
            EnvironmentKind::Function(rec) => rec.new_target.clone(),
            _ => None,
        }
    }

    pub fn with_base_object(&self) -> Option<JsObject> {
        match &self.0.borrow().kind {
            EnvironmentKind::Object(rec) if rec.is_with_environment => Some(rec.binding_object.clone()),
            _ => None,
        }
    }

    pub fn global_object(&self) -> Option<JsObject> {
        match &self.0.borrow().kind {
            EnvironmentKind::Global(rec) => Some(rec.global_object()),
            _ => None,
        }
    }

    pub fn has_var_declaration(&self, name: &str) -> bool {
        matches!(&self.0.borrow().kind, EnvironmentKind::Global(rec) if rec.has_var_declaration(name))
    }

    /// `GetThisEnvironment`: the nearest environment (outward, inclusive)
    /// that has its own `this` binding.
    pub fn get_this_environment(&self) -> Environment {
        let mut env = self.clone();
        loop {
            if env.has_this_binding() {
                return env;
            }
            let outer = env.outer().expect("global environment always has a this binding");
            env = outer;
        }
    }

    pub fn get_this_binding(&self, agent: &Agent) -> JsResult<JsValue> {
        let env = self.get_this_environment();
        let data = env.0.borrow();
        match &data.kind {
            EnvironmentKind::Function(rec) => rec.get_this_binding(agent),
            EnvironmentKind::Global(rec) => Ok(JsValue::Object(rec.global_object())),
            _ => Ok(JsValue::Undefined),
        }
    }

    /// `GetSuperBase`: the `[[HomeObject]]`'s prototype, used by `super.x`.
    pub fn get_super_base(&self, agent: &Agent) -> JsResult<JsValue> {
        let env = self.get_this_environment();
        let function_object = env.function_object();
        let Some(function_object) = function_object else {
            return Ok(JsValue::Undefined);
        };
        match function_object.home_object() {
            Some(home) => Ok(home.prototype().map(JsValue::Object).unwrap_or(JsValue::Undefined)),
            None => {
                let _ = agent;
                Ok(JsValue::Undefined)
            }
        }
    }

    /// `GetIdentifierReference`'s environment-walk half: returns the nearest
    /// environment (inclusive) binding `name`, skipping `with` overlays that
    /// don't actually shadow it.
    pub fn resolve_binding(&self, agent: &mut Agent, name: &str) -> JsResult<Option<Environment>> {
        let mut env = Some(self.clone());
        while let Some(current) = env {
            if current.has_binding(agent, name)? {
                return Ok(Some(current));
            }
            env = current.outer();
        }
        Ok(None)
    }

    /// `GetFunctionScope` / `GetVarScope` (spec.md §4.B): the nearest
    /// function or global environment a `var`/function declaration should
    /// hoist into, skipping block/catch/with environments along the way.
    pub fn get_function_scope(&self) -> Environment {
        let mut env = self.clone();
        loop {
            let is_var_scope = matches!(&env.0.borrow().kind, EnvironmentKind::Function(_) | EnvironmentKind::Global(_));
            if is_var_scope {
                return env;
            }
            let outer = env.outer().expect("global environment terminates every chain");
            env = outer;
        }
    }

    /// Marks `name` as bound by a destructured (non-simple) or simple catch
    /// parameter in this environment. Annex B sloppy-mode function hoisting
    /// (spec.md Non-goals: "beyond the switch expressly called out") must
    /// not shadow a *non-simple* catch parameter with the same name.
    pub fn set_simple_catch_parameters(&self, names: impl IntoIterator<Item = Rc<str>>) {
        self.0.borrow_mut().simple_catch_parameters.extend(names);
    }

    pub fn is_simple_catch_parameter(&self, name: &str) -> bool {
        self.0.borrow().simple_catch_parameters.contains(name)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}
