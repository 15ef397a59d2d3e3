// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cell::RefCell;
use std::rc::Rc;

use crate::agent::{Agent, JsResult};
use crate::environment::{Environment, PrivateEnvironment};
use crate::values::{JsObject, JsValue, PrivateBrand};

/// Whether a function has its own `this` binding or inherits one lexically
/// from its enclosing scope (spec.md §4.J, §3 `FunctionEnvironmentRecord`).
/// Named to match `nova_vm::ecmascript::builtins::ThisMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThisMode {
    Lexical,
    Normal,
}

#[derive(Clone)]
pub enum FunctionBodyKind {
    Statements(Rc<ast::FunctionBody>),
    /// An arrow function with a concise (expression) body.
    Expression(Rc<ast::Expression>),
}

/// Distinguishes the handful of ways an ECMAScript-authored callable can be
/// invoked/constructed, replacing the teacher's separate `ThisBindingStatus`
/// and constructor-kind enums with one tag (spec.md §4.I, §4.J).
#[derive(Clone)]
pub enum EcmaFunctionKind {
    Function,
    Arrow,
    Method,
    BaseConstructor,
    DerivedConstructor { parent: JsObject },
}

#[derive(Clone)]
pub struct EcmaFunctionData {
    pub name: Rc<RefCell<Rc<str>>>,
    pub params: Rc<ast::Params>,
    pub body: FunctionBodyKind,
    pub closure_env: Environment,
    pub kind: EcmaFunctionKind,
    /// \[\[HomeObject]]: the prototype (instance methods) or constructor
    /// (static methods) a method is installed on, used to resolve `super`.
    pub home_object: Rc<RefCell<Option<JsObject>>>,
    pub is_async: bool,
    pub is_generator: bool,
    pub is_strict: bool,
    /// Non-static field initializers to run after `super()` (derived
    /// classes) or at entry (base classes). Empty for ordinary functions.
    pub instance_field_initializers: Rc<Vec<Rc<ast::ClassField>>>,
    pub private_scope: Option<PrivateEnvironment>,
    /// Set only on a class's own constructor, when that class declares at
    /// least one private member: the brand stamped onto `this` once it
    /// exists, before that class's own field initializers run (spec.md
    /// §4.I, §9 "Brand"). `None` for every other function, including
    /// methods of the same class (brand membership lives on the instance,
    /// not the accessor).
    pub own_brand: Option<PrivateBrand>,
}

impl EcmaFunctionData {
    pub fn this_mode(&self) -> ThisMode {
        match self.kind {
            EcmaFunctionKind::Arrow => ThisMode::Lexical,
            _ => ThisMode::Normal,
        }
    }

    /// Ordinary function declarations/expressions are constructible too
    /// (`new f()`) unless they're async, a generator, an arrow, or a method
    /// — matching `IsConstructor` for ECMAScript function objects.
    pub fn is_constructor(&self) -> bool {
        match self.kind {
            EcmaFunctionKind::BaseConstructor | EcmaFunctionKind::DerivedConstructor { .. } => true,
            EcmaFunctionKind::Function => !self.is_async && !self.is_generator,
            EcmaFunctionKind::Arrow | EcmaFunctionKind::Method => false,
        }
    }

    pub fn is_derived_constructor(&self) -> bool {
        matches!(self.kind, EcmaFunctionKind::DerivedConstructor { .. })
    }

    pub fn name(&self) -> Rc<str> {
        self.name.borrow().clone()
    }

    /// `NamedEvaluation`: an anonymous function/class expression used as a
    /// default-export or default-parameter value takes the binding's name.
    pub fn set_name_if_anonymous(&self, name: &str) {
        let mut slot = self.name.borrow_mut();
        if slot.is_empty() {
            *slot = Rc::from(name);
        }
    }
}

pub type NativeFunction = Rc<dyn Fn(&mut Agent, JsValue, &[JsValue]) -> JsResult<JsValue>>;

#[derive(Clone)]
pub enum FunctionData {
    Native(NativeFunction, Rc<str>),
    Ecmascript(EcmaFunctionData),
}

impl std::fmt::Debug for FunctionData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native(_, name) => write!(f, "NativeFunction({name})"),
            Self::Ecmascript(data) => write!(f, "EcmaFunction({})", data.name()),
        }
    }
}
