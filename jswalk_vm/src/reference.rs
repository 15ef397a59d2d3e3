// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [6.2.5 The Reference Record Specification Type](https://tc39.es/ecma262/#sec-reference-record-specification-type)
//!
//! A [`Reference`] captures the base and referenced name an identifier or
//! member expression resolves to, evaluated exactly once, so that compound
//! assignment (`x.y += 1`) and `delete`/`typeof` don't re-run the base
//! expression's side effects a second time (spec.md §4.C).

use std::rc::Rc;

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::environment::{Environment, PrivateEnvironment};
use crate::values::{JsObject, JsValue, PropKey};

#[derive(Clone)]
pub enum Reference {
    /// No environment in the chain bound this name.
    Unresolvable { name: Rc<str>, strict: bool },
    /// A binding resolved to some environment in the lexical chain.
    Environment { env: Environment, name: Rc<str>, strict: bool },
    /// `obj.x`, `obj[x]`, optionally through a `with` overlay.
    Property { base: JsValue, key: PropKey, strict: bool },
    /// `super.x` / `super[x]`: reads walk `base`'s prototype chain but
    /// writes use `this_value` as the receiver (spec.md §4.J).
    Super { base: JsValue, key: PropKey, this_value: JsValue, strict: bool },
    /// `obj.#x`: brand-checked against `env`'s class before any lookup.
    PrivateMember { base: JsObject, env: PrivateEnvironment, surface_name: Rc<str> },
}

impl Reference {
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, Self::Unresolvable { .. })
    }

    pub fn is_strict(&self) -> bool {
        match self {
            Self::Unresolvable { strict, .. }
            | Self::Environment { strict, .. }
            | Self::Property { strict, .. }
            | Self::Super { strict, .. } => *strict,
            Self::PrivateMember { .. } => true,
        }
    }

    /// `typeof` on an unresolvable reference yields `"undefined"` instead of
    /// throwing; every other read throws `ReferenceError`/brand errors the
    /// usual way. Callers needing that special case should match
    /// [`Reference::Unresolvable`] themselves before calling [`Self::get_value`].
    pub fn get_value(&self, agent: &mut Agent) -> JsResult<JsValue> {
        match self {
            Self::Unresolvable { name, .. } => Err(agent.throw_exception(
                ExceptionType::ReferenceError,
                format!("{name} is not defined"),
            )),
            Self::Environment { env, name, strict } => env.get_binding_value(agent, name, *strict),
            Self::Property { base, key, .. } => get_property(agent, base, key),
            Self::Super { base, key, this_value, .. } => match base {
                JsValue::Object(obj) => obj.get(agent, key, this_value.clone()),
                _ => Ok(JsValue::Undefined),
            },
            Self::PrivateMember { base, env, surface_name } => {
                let (mangled, member) = env
                    .resolve(surface_name)
                    .expect("private name resolved at parse/bind time");
                base.require_private_brand(agent, &env.brand())?;
                match member {
                    crate::environment::PrivateMember::Field => Ok(base
                        .get_private_field(&mangled)
                        .unwrap_or(JsValue::Undefined)),
                    crate::environment::PrivateMember::Method(f) => Ok(JsValue::Object(f)),
                    crate::environment::PrivateMember::Accessor { get: Some(getter), .. } => {
                        crate::function_invocation::call_function(agent, &getter, JsValue::Object(base.clone()), &[])
                    }
                    crate::environment::PrivateMember::Accessor { get: None, .. } => Err(agent.throw_exception(
                        ExceptionType::TypeError,
                        format!("'#{surface_name}' was defined without a getter"),
                    )),
                }
            }
        }
    }

    pub fn put_value(&self, agent: &mut Agent, value: JsValue) -> JsResult<()> {
        match self {
            Self::Unresolvable { name, strict } => {
                if *strict {
                    return Err(agent.throw_exception(
                        ExceptionType::ReferenceError,
                        format!("{name} is not defined"),
                    ));
                }
                let global = agent.realm.global_environment();
                global.create_mutable_binding(agent, name.clone(), true)?;
                global.initialize_binding(agent, name, value)
            }
            Self::Environment { env, name, strict } => env.set_mutable_binding(agent, name, value, *strict),
            Self::Property { base, key, strict } => set_property(agent, base, key.clone(), value, *strict),
            Self::Super { base, key, this_value, .. } => match base {
                JsValue::Object(obj) => obj.set(agent, key.clone(), value, this_value.clone()),
                _ => Ok(()),
            },
            Self::PrivateMember { base, env, surface_name } => {
                let (mangled, member) = env
                    .resolve(surface_name)
                    .expect("private name resolved at parse/bind time");
                base.require_private_brand(agent, &env.brand())?;
                match member {
                    crate::environment::PrivateMember::Field => {
                        base.set_private_field(mangled, value);
                        Ok(())
                    }
                    crate::environment::PrivateMember::Method(_) => Err(agent.throw_exception(
                        ExceptionType::TypeError,
                        format!("'#{surface_name}' was defined without a setter"),
                    )),
                    crate::environment::PrivateMember::Accessor { set: Some(setter), .. } => {
                        crate::function_invocation::call_function(agent, &setter, JsValue::Object(base.clone()), &[value])
                            .map(|_| ())
                    }
                    crate::environment::PrivateMember::Accessor { set: None, .. } => Err(agent.throw_exception(
                        ExceptionType::TypeError,
                        format!("'#{surface_name}' was defined without a setter"),
                    )),
                }
            }
        }
    }

    /// `delete` on a reference. Member deletes honor `[[Configurable]]`;
    /// anything else (bindings, private members, `super`) is not a valid
    /// `delete` target and the caller is expected to have already rejected
    /// it syntactically, matching spec.md's "no module loading" scoping of
    /// what AST shapes even reach here.
    pub fn delete(&self, agent: &mut Agent) -> JsResult<bool> {
        match self {
            Self::Unresolvable { .. } => Ok(true),
            Self::Property { base, key, strict } => match base {
                JsValue::Object(obj) => {
                    let deleted = obj.delete(key);
                    if !deleted && *strict {
                        return Err(agent.throw_exception(
                            ExceptionType::TypeError,
                            "Cannot delete property",
                        ));
                    }
                    Ok(deleted)
                }
                _ => Ok(true),
            },
            Self::Environment { strict, .. } if *strict => Err(agent.throw_exception(
                ExceptionType::SyntaxError,
                "Delete of an unqualified identifier in strict mode",
            )),
            Self::Environment { env, name, .. } => Ok(env.delete_binding(name)),
            Self::Super { .. } => Err(agent.throw_exception(ExceptionType::ReferenceError, "Unsupported reference to 'delete super.prop'")),
            Self::PrivateMember { .. } => Err(agent.throw_exception(
                ExceptionType::SyntaxError,
                "Private fields can not be deleted",
            )),
        }
    }
}

fn get_property(agent: &mut Agent, base: &JsValue, key: &PropKey) -> JsResult<JsValue> {
    match base {
        JsValue::Object(obj) => obj.get(agent, key, base.clone()),
        JsValue::Undefined | JsValue::Null => Err(agent.throw_exception(
            ExceptionType::TypeError,
            format!("Cannot read properties of {} (reading '{}')", base.type_of(), describe_key(key)),
        )),
        // Primitive wrapper property access (string length/indexing, etc.)
        // is intentionally out of scope: the evaluator's value domain has
        // no boxed-primitive prototypes to walk.
        _ => Ok(JsValue::Undefined),
    }
}

fn set_property(agent: &mut Agent, base: &JsValue, key: PropKey, value: JsValue, strict: bool) -> JsResult<()> {
    match base {
        JsValue::Object(obj) => obj.set(agent, key, value, base.clone()),
        JsValue::Undefined | JsValue::Null => Err(agent.throw_exception(
            ExceptionType::TypeError,
            format!("Cannot set properties of {}", base.type_of()),
        )),
        _ => {
            if strict {
                Err(agent.throw_exception(ExceptionType::TypeError, "Cannot create property on a primitive value"))
            } else {
                Ok(())
            }
        }
    }
}

fn describe_key(key: &PropKey) -> String {
    match key {
        PropKey::String(s) => s.to_string(),
        PropKey::Symbol(_) => "Symbol()".to_string(),
    }
}
