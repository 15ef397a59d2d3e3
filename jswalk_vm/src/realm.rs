// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.3 Realms](https://tc39.es/ecma262/#sec-code-realms)
//!
//! A Realm bundles the global environment and the intrinsic objects code
//! running in it can reach (spec.md §1 "standard library"). Grounded in
//! `nova_vm::ecmascript::execution::realm::Realm`, trimmed to the handful of
//! intrinsics [`crate::host::StandardLibrary`]'s default implementation
//! actually needs.

use std::cell::RefCell;
use std::rc::Rc;

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::environment::Environment;
use crate::host::{PromiseAdapter, StandardLibrary};
use crate::values::{JsObject, JsSymbol, JsValue, ObjectKind, PropKey, PropertyDescriptor, WellKnownSymbol};

/// The default, self-contained [`StandardLibrary`]/[`PromiseAdapter`]
/// implementation: a handful of ordinary-object prototypes linked the way
/// `InitializeHostDefinedRealm` would, without any of the actual
/// `Array.prototype.map`-style methods a real standard library installs on
/// them (those live entirely outside this evaluator's scope, spec.md §1).
pub struct DefaultHost {
    object_prototype: JsObject,
    array_prototype: JsObject,
    function_prototype: JsObject,
    error_prototypes: RefCell<ahash::AHashMap<ExceptionType, JsObject>>,
}

impl DefaultHost {
    fn new() -> Self {
        let object_prototype = JsObject::new(None, ObjectKind::Ordinary);
        let array_prototype = JsObject::new(Some(object_prototype.clone()), ObjectKind::Ordinary);
        let function_prototype = JsObject::new(Some(object_prototype.clone()), ObjectKind::Ordinary);
        Self {
            object_prototype,
            array_prototype,
            function_prototype,
            error_prototypes: RefCell::new(ahash::AHashMap::default()),
        }
    }

    fn error_prototype_for(&self, kind: ExceptionType) -> JsObject {
        self.error_prototypes
            .borrow_mut()
            .entry(kind)
            .or_insert_with(|| {
                let proto = JsObject::new(Some(self.object_prototype.clone()), ObjectKind::Ordinary);
                proto.define_property(
                    PropKey::from("name"),
                    PropertyDescriptor::data(JsValue::string(kind.name()), true, false, true),
                );
                proto
            })
            .clone()
    }
}

impl StandardLibrary for DefaultHost {
    fn object_prototype(&self) -> JsObject {
        self.object_prototype.clone()
    }

    fn array_prototype(&self) -> JsObject {
        self.array_prototype.clone()
    }

    fn function_prototype(&self) -> JsObject {
        self.function_prototype.clone()
    }

    fn error_prototype(&self, kind: ExceptionType) -> JsObject {
        self.error_prototype_for(kind)
    }

    fn new_ordinary_object(&self) -> JsObject {
        JsObject::new(Some(self.object_prototype.clone()), ObjectKind::Ordinary)
    }

    fn new_array(&self, elements: Vec<JsValue>) -> JsObject {
        let array = JsObject::new(Some(self.array_prototype.clone()), ObjectKind::Array);
        for (index, value) in elements.into_iter().enumerate() {
            array.define_property(
                PropKey::from(index.to_string()),
                PropertyDescriptor::data(value, true, true, true),
            );
        }
        array
    }

    fn create_error(&self, kind: ExceptionType, message: String) -> JsValue {
        let error = JsObject::new(Some(self.error_prototype_for(kind)), ObjectKind::Error);
        error.define_property(
            PropKey::from("message"),
            PropertyDescriptor::data(JsValue::string(message), true, false, true),
        );
        JsValue::Object(error)
    }
}

impl PromiseAdapter for DefaultHost {
    fn new_pending(&self) -> JsObject {
        let promise = JsObject::new(Some(self.object_prototype.clone()), ObjectKind::Ordinary);
        promise.define_property(
            PropKey::from("__state"),
            PropertyDescriptor::data(JsValue::string("pending"), true, false, false),
        );
        promise
    }

    fn resolve(&self, _agent: &mut Agent, promise: &JsObject, value: JsValue) {
        promise.define_property(
            PropKey::from("__state"),
            PropertyDescriptor::data(JsValue::string("fulfilled"), true, false, false),
        );
        promise.define_property(PropKey::from("__value"), PropertyDescriptor::data(value, true, false, false));
    }

    fn reject(&self, _agent: &mut Agent, promise: &JsObject, reason: JsValue) {
        promise.define_property(
            PropKey::from("__state"),
            PropertyDescriptor::data(JsValue::string("rejected"), true, false, false),
        );
        promise.define_property(PropKey::from("__value"), PropertyDescriptor::data(reason, true, false, false));
    }
}

pub struct Realm {
    pub host: Rc<DefaultHost>,
    global_environment: Environment,
    well_known_symbols: RefCell<ahash::AHashMap<WellKnownSymbol, JsSymbol>>,
}

impl Realm {
    pub fn new() -> Rc<Self> {
        let host = Rc::new(DefaultHost::new());
        let global_object = JsObject::new(Some(host.object_prototype()), ObjectKind::Ordinary);
        Rc::new(Self {
            host,
            global_environment: Environment::new_global(global_object),
            well_known_symbols: RefCell::new(ahash::AHashMap::default()),
        })
    }

    pub fn global_environment(&self) -> Environment {
        self.global_environment.clone()
    }

    pub fn global_object(&self) -> JsObject {
        self.global_environment
            .global_object()
            .expect("realm's global environment is always a GlobalEnvironmentRecord")
    }

    /// Interns the handful of well-known symbols spec.md §4.E names, so
    /// `Symbol.iterator` compares equal (by identity) everywhere it's asked
    /// for across the lifetime of the realm.
    pub fn well_known_symbol(&self, which: WellKnownSymbol) -> JsSymbol {
        self.well_known_symbols
            .borrow_mut()
            .entry(which)
            .or_insert_with(|| JsSymbol::new(Some(format!("Symbol.{which:?}"))))
            .clone()
    }

    pub fn throw_type_error(agent: &Agent, message: impl Into<String>) -> crate::agent::JsError {
        agent.throw_exception(ExceptionType::TypeError, message)
    }
}

pub fn new_realm() -> JsResult<Rc<Realm>> {
    Ok(Realm::new())
}
