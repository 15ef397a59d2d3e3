// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

/// A JS symbol. Interned well-known symbols compare by identity like any
/// other symbol; [`WellKnownSymbol`] just gives the evaluator a stable way
/// to ask the realm for one without a full `Symbol.for` registry.
#[derive(Clone, Debug)]
pub struct JsSymbol(Rc<SymbolData>);

#[derive(Debug)]
struct SymbolData {
    description: Option<String>,
}

impl JsSymbol {
    pub fn new(description: Option<String>) -> Self {
        Self(Rc::new(SymbolData { description }))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }
}

impl PartialEq for JsSymbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for JsSymbol {}

impl std::hash::Hash for JsSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

/// `Symbol.iterator` / `Symbol.asyncIterator` / `Symbol.toStringTag`, the
/// three well-known symbols spec.md §4.E calls out by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WellKnownSymbol {
    Iterator,
    AsyncIterator,
    ToStringTag,
}
