// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The value representation spec.md §1 lists as an external collaborator
//! ("`JsObject`, `JsArray`, `Symbol`, `JsBigInt`" and "property-descriptor
//! and prototype machinery"). A minimal, self-contained slice lives here so
//! the evaluator can actually run and be tested; a full standard library
//! would replace this module wholesale.

mod function;
mod object;
mod symbol;
mod value;

pub use function::{EcmaFunctionData, EcmaFunctionKind, FunctionBodyKind, FunctionData, NativeFunction, ThisMode};
pub use object::{JsObject, ObjectData, ObjectKind, PrivateBrand, PropKey, PropertyDescriptor, PropertyKind};
pub use symbol::{JsSymbol, WellKnownSymbol};
pub use value::JsValue;
