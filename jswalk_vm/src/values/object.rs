// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::generator::GeneratorInternal;
use crate::values::function::FunctionData;
use crate::values::symbol::JsSymbol;
use crate::values::JsValue;

/// An opaque token identifying membership in a class's private-name scope
/// (spec.md §3/§9, "Brand"). Instances carry the brands of every class whose
/// constructor initialized them; private-member access checks for presence
/// rather than looking anything up by name, so a like-named property on an
/// unrelated object is never mistaken for the private member.
#[derive(Clone, Debug)]
pub struct PrivateBrand(pub(crate) Rc<()>);

impl PrivateBrand {
    pub fn new() -> Self {
        Self(Rc::new(()))
    }
}

impl Default for PrivateBrand {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateBrand {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for PrivateBrand {}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropKey {
    String(Rc<str>),
    Symbol(JsSymbol),
}

impl From<&str> for PropKey {
    fn from(s: &str) -> Self {
        Self::String(Rc::from(s))
    }
}
impl From<String> for PropKey {
    fn from(s: String) -> Self {
        Self::String(Rc::from(s.as_str()))
    }
}

#[derive(Clone, Debug)]
pub enum PropertyKind {
    Data { value: JsValue, writable: bool },
    Accessor { get: Option<JsObject>, set: Option<JsObject> },
}

#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    pub kind: PropertyKind,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyDescriptor {
    pub fn data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> Self {
        Self {
            kind: PropertyKind::Data { value, writable },
            enumerable,
            configurable,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ObjectKind {
    Ordinary,
    Array,
    /// Mapped (sloppy, simple parameter list) or unmapped `arguments`
    /// object. `mapped` links indexed slots back to parameter names in the
    /// owning call's environment (spec.md §4.J).
    Arguments,
    Function(FunctionData),
    Error,
    /// A generator (or async generator) instance produced by calling a
    /// `function*`/`async function*`. Holds the cooperative replay state
    /// driven by `.next()`/`.throw()`/`.return()` (spec.md §4.K).
    Generator(Rc<RefCell<GeneratorInternal>>),
}

#[derive(Debug)]
pub struct ObjectData {
    pub prototype: Option<JsObject>,
    pub extensible: bool,
    pub properties: IndexMap<PropKey, PropertyDescriptor>,
    /// Private fields keyed by their mangled, globally-unique name (spec.md
    /// §9, "Private names"). Methods/accessors are not stored here: they
    /// live once on the class and are looked up through the private-name
    /// scope, with only the brand check performed per-instance.
    pub private_fields: ahash::AHashMap<Rc<str>, JsValue>,
    pub brands: Vec<PrivateBrand>,
    pub kind: ObjectKind,
}

/// A JS object. Cheaply cloned (`Rc`); interior mutability via `RefCell`
/// stands in for the teacher's tracing-GC heap indices (see SPEC_FULL.md §4
/// design note).
#[derive(Clone, Debug)]
pub struct JsObject(pub Rc<RefCell<ObjectData>>);

impl PartialEq for JsObject {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for JsObject {}

impl JsObject {
    pub fn new(prototype: Option<JsObject>, kind: ObjectKind) -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            prototype,
            extensible: true,
            properties: IndexMap::new(),
            private_fields: ahash::AHashMap::default(),
            brands: Vec::new(),
            kind,
        })))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Function(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Array)
    }

    /// Clones this object's [`FunctionData`] out of its borrow, mirroring
    /// [`Self::generator_internal`]'s reason for existing: the caller is
    /// about to re-enter evaluation (a call) and must not hold this
    /// object's `RefCell` borrow while doing so.
    pub fn function_data(&self) -> Option<FunctionData> {
        match &self.0.borrow().kind {
            ObjectKind::Function(data) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn new_generator(prototype: Option<JsObject>, internal: GeneratorInternal) -> Self {
        Self::new(prototype, ObjectKind::Generator(Rc::new(RefCell::new(internal))))
    }

    pub fn is_generator(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Generator(_))
    }

    /// Clones the `Rc` handle to this generator's replay state without
    /// holding the object's own borrow for the caller's lifetime, so the
    /// caller can re-enter evaluation (which may touch this same object)
    /// while driving a resumption.
    pub fn generator_internal(&self) -> Option<Rc<RefCell<GeneratorInternal>>> {
        match &self.0.borrow().kind {
            ObjectKind::Generator(state) => Some(state.clone()),
            _ => None,
        }
    }

    pub fn prototype(&self) -> Option<JsObject> {
        self.0.borrow().prototype.clone()
    }

    pub fn set_prototype(&self, proto: Option<JsObject>) {
        self.0.borrow_mut().prototype = proto;
    }

    /// `[[GetOwnProperty]]`, own properties only.
    pub fn get_own_property(&self, key: &PropKey) -> Option<PropertyDescriptor> {
        self.0.borrow().properties.get(key).cloned()
    }

    /// `[[DefineOwnProperty]]` for the common case (no reconfiguration
    /// validation beyond "is the slot already non-configurable"); sufficient
    /// for the evaluator's own needs (method/field installation, binding
    /// pattern rest objects, array literal construction).
    pub fn define_property(&self, key: PropKey, desc: PropertyDescriptor) {
        self.maybe_bump_array_length(&key);
        self.0.borrow_mut().properties.insert(key, desc);
    }

    fn maybe_bump_array_length(&self, key: &PropKey) {
        let is_array = matches!(self.0.borrow().kind, ObjectKind::Array);
        if !is_array {
            return;
        }
        if let PropKey::String(s) = key {
            if let Ok(index) = s.parse::<u32>() {
                let mut data = self.0.borrow_mut();
                let current_len = match data.properties.get(&PropKey::from("length")) {
                    Some(PropertyDescriptor {
                        kind: PropertyKind::Data { value: JsValue::Number(n), .. },
                        ..
                    }) => *n as u32,
                    _ => 0,
                };
                if index >= current_len {
                    data.properties.insert(
                        PropKey::from("length"),
                        PropertyDescriptor::data(JsValue::Number((index + 1) as f64), true, false, false),
                    );
                }
            }
        }
    }

    /// `[[HasProperty]]`, walking the prototype chain.
    pub fn has_property(&self, key: &PropKey) -> bool {
        if self.0.borrow().properties.contains_key(key) {
            return true;
        }
        match self.prototype() {
            Some(proto) => proto.has_property(key),
            None => false,
        }
    }

    /// `[[Get]]`, walking the prototype chain and invoking accessors.
    pub fn get(&self, agent: &mut Agent, key: &PropKey, receiver: JsValue) -> JsResult<JsValue> {
        let desc = self.get_own_property(key);
        match desc {
            Some(PropertyDescriptor { kind: PropertyKind::Data { value, .. }, .. }) => Ok(value),
            Some(PropertyDescriptor { kind: PropertyKind::Accessor { get, .. }, .. }) => match get {
                Some(getter) => crate::function_invocation::call_function(agent, &getter, receiver, &[]),
                None => Ok(JsValue::Undefined),
            },
            None => match self.prototype() {
                Some(proto) => proto.get(agent, key, receiver),
                None => Ok(JsValue::Undefined),
            },
        }
    }

    /// `[[Set]]` (ordinary objects only: no `Proxy`/exotic receivers).
    pub fn set(&self, agent: &mut Agent, key: PropKey, value: JsValue, receiver: JsValue) -> JsResult<()> {
        if let Some(desc) = self.get_own_property(&key) {
            match desc.kind {
                PropertyKind::Data { writable, .. } => {
                    if !writable {
                        return Ok(());
                    }
                    self.define_property(
                        key,
                        PropertyDescriptor::data(value, true, desc.enumerable, desc.configurable),
                    );
                    Ok(())
                }
                PropertyKind::Accessor { set, .. } => {
                    if let Some(setter) = set {
                        crate::function_invocation::call_function(agent, &setter, receiver, &[value])?;
                    }
                    Ok(())
                }
            }
        } else if let Some(proto) = self.prototype() {
            proto.set(agent, key, value, receiver)
        } else {
            self.define_property(key, PropertyDescriptor::data(value, true, true, true));
            Ok(())
        }
    }

    pub fn delete(&self, key: &PropKey) -> bool {
        match self.get_own_property(key) {
            Some(desc) if !desc.configurable => false,
            _ => {
                self.0.borrow_mut().properties.shift_remove(key);
                true
            }
        }
    }

    /// Own enumerable string keys in insertion order (spec.md §4.D rest
    /// element, §6 `GetEnumerableOwnPropertyKeysInOrder`).
    pub fn enumerable_own_string_keys(&self) -> Vec<Rc<str>> {
        self.0
            .borrow()
            .properties
            .iter()
            .filter(|(_, desc)| desc.enumerable)
            .filter_map(|(key, _)| match key {
                PropKey::String(s) => Some(s.clone()),
                PropKey::Symbol(_) => None,
            })
            .collect()
    }

    /// `[[HomeObject]]`, for ECMAScript function objects only (spec.md
    /// §4.J `super` resolution).
    pub fn home_object(&self) -> Option<JsObject> {
        match &self.0.borrow().kind {
            ObjectKind::Function(FunctionData::Ecmascript(data)) => data.home_object.borrow().clone(),
            _ => None,
        }
    }

    pub fn set_home_object(&self, home_object: JsObject) {
        if let ObjectKind::Function(FunctionData::Ecmascript(data)) = &self.0.borrow().kind {
            *data.home_object.borrow_mut() = Some(home_object);
        }
    }

    /// `NamedEvaluation`: gives an anonymous function/class expression the
    /// name of the binding it's assigned to, unless it already has one.
    pub fn set_name_if_anonymous(&self, name: &str) {
        if let ObjectKind::Function(FunctionData::Ecmascript(data)) = &self.0.borrow().kind {
            data.set_name_if_anonymous(name);
        }
    }

    pub fn has_private_brand(&self, brand: &PrivateBrand) -> bool {
        self.0.borrow().brands.iter().any(|b| b == brand)
    }

    pub fn add_private_brand(&self, brand: PrivateBrand) {
        self.0.borrow_mut().brands.push(brand);
    }

    pub fn get_private_field(&self, name: &str) -> Option<JsValue> {
        self.0.borrow().private_fields.get(name).cloned()
    }

    pub fn set_private_field(&self, name: Rc<str>, value: JsValue) {
        self.0.borrow_mut().private_fields.insert(name, value);
    }

    /// Helper for the expression evaluator's `obj.#x` brand check
    /// (spec.md §4.C).
    pub fn require_private_brand(
        &self,
        agent: &Agent,
        brand: &PrivateBrand,
    ) -> JsResult<()> {
        if self.has_private_brand(brand) {
            Ok(())
        } else {
            Err(agent.throw_exception(
                ExceptionType::TypeError,
                "Invalid access of private member",
            ))
        }
    }
}
