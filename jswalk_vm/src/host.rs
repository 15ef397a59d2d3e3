// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The collaborator boundary spec.md §1 draws around the evaluator: a
//! standard library, promise scheduler, and property/brand machinery the
//! evaluator calls into but does not itself define the final shape of. The
//! concrete [`crate::values`] object model implements the narrower traits
//! directly; [`StandardLibrary`] and [`PromiseAdapter`] are the seams a
//! real host (with actual `Object.prototype`, `Array.prototype`, intrinsic
//! constructors, and a microtask queue) is expected to substitute its own
//! implementation for (see SPEC_FULL.md §4 design note).

use std::rc::Rc;

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::values::{JsObject, JsValue, PropKey, PrivateBrand};

/// Anything invocable as a function (spec.md §4.J `Call`/`Construct`).
pub trait Callable {
    fn call(&self, agent: &mut Agent, this: JsValue, args: &[JsValue]) -> JsResult<JsValue>;
}

impl Callable for JsObject {
    fn call(&self, agent: &mut Agent, this: JsValue, args: &[JsValue]) -> JsResult<JsValue> {
        crate::function_invocation::call_function(agent, self, this, args)
    }
}

/// `[[Get]]`/`[[Set]]` as seen from outside the value model (spec.md §4.C
/// reference resolution).
pub trait PropertyAccessor {
    fn accessor_get(&self, agent: &mut Agent, key: &PropKey, receiver: JsValue) -> JsResult<JsValue>;
    fn accessor_set(&self, agent: &mut Agent, key: PropKey, value: JsValue, receiver: JsValue) -> JsResult<()>;
}

impl PropertyAccessor for JsObject {
    fn accessor_get(&self, agent: &mut Agent, key: &PropKey, receiver: JsValue) -> JsResult<JsValue> {
        self.get(agent, key, receiver)
    }

    fn accessor_set(&self, agent: &mut Agent, key: PropKey, value: JsValue, receiver: JsValue) -> JsResult<()> {
        self.set(agent, key, value, receiver)
    }
}

/// Private-name brand membership (spec.md §9).
pub trait PrivateBrandHolder {
    fn holds_brand(&self, brand: &PrivateBrand) -> bool;
    fn require_brand(&self, agent: &Agent, brand: &PrivateBrand) -> JsResult<()>;
}

impl PrivateBrandHolder for JsObject {
    fn holds_brand(&self, brand: &PrivateBrand) -> bool {
        self.has_private_brand(brand)
    }

    fn require_brand(&self, agent: &Agent, brand: &PrivateBrand) -> JsResult<()> {
        self.require_private_brand(agent, brand)
    }
}

/// Everything the evaluator asks of "the standard library": prototype
/// objects to chain new instances onto, error construction, and the handful
/// of built-in constructors the AST can reach without any of it having been
/// looked up through a global binding (`[]`/`{}` literals, `throw`'s
/// `Error`, etc). A real host swaps this for its actual intrinsics; the
/// default used by [`crate::realm::Realm::new`] builds a minimal but
/// functioning set so the evaluator can run standalone.
pub trait StandardLibrary {
    fn object_prototype(&self) -> JsObject;
    fn array_prototype(&self) -> JsObject;
    fn function_prototype(&self) -> JsObject;
    fn error_prototype(&self, kind: ExceptionType) -> JsObject;

    fn new_ordinary_object(&self) -> JsObject;
    fn new_array(&self, elements: Vec<JsValue>) -> JsObject;
    fn create_error(&self, kind: ExceptionType, message: String) -> JsValue;
}

/// The seam for `async function`/`await` (spec.md §4.K): the evaluator
/// drives generator-shaped suspension and hands the host a value to wrap in
/// a promise rather than implementing `Promise` itself (Non-goal carried
/// from spec.md, see SPEC_FULL.md §6).
pub trait PromiseAdapter {
    fn new_pending(&self) -> JsObject;
    fn resolve(&self, agent: &mut Agent, promise: &JsObject, value: JsValue);
    fn reject(&self, agent: &mut Agent, promise: &JsObject, reason: JsValue);
}

/// `GetEnumerableOwnPropertyKeysInOrder` (spec.md §6), split out as its own
/// trait because `for-in`'s enumeration order additionally walks the
/// prototype chain with duplicate suppression, something `Object.keys`
/// never needs to do.
pub trait GetEnumerableOwnPropertyKeysInOrder {
    fn enumerable_own_keys_in_order(&self, object: &JsObject) -> Vec<Rc<str>>;
}

impl GetEnumerableOwnPropertyKeysInOrder for () {
    fn enumerable_own_keys_in_order(&self, object: &JsObject) -> Vec<Rc<str>> {
        object.enumerable_own_string_keys()
    }
}
