// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Private-name scopes (spec.md §9): resolves a `#name` token to the
//! method/accessor bound to it by the nearest enclosing class, and carries
//! the class's [`PrivateBrand`] for instance membership checks.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;

use crate::values::{JsObject, PrivateBrand};

#[derive(Clone, Debug)]
pub enum PrivateMember {
    Field,
    Method(JsObject),
    Accessor { get: Option<JsObject>, set: Option<JsObject> },
}

struct PrivateEnvironmentData {
    outer: Option<PrivateEnvironment>,
    brand: PrivateBrand,
    /// Mangled per-class unique name (e.g. `#x@<class-id>`) to the member
    /// it names, so sibling classes reusing `#x` never collide.
    names: AHashMap<Rc<str>, (Rc<str>, PrivateMember)>,
}

/// Cheaply cloned handle onto a class's private-name scope.
#[derive(Clone)]
pub struct PrivateEnvironment(Rc<RefCell<PrivateEnvironmentData>>);

impl PrivateEnvironment {
    pub fn new(outer: Option<PrivateEnvironment>) -> Self {
        Self(Rc::new(RefCell::new(PrivateEnvironmentData {
            outer,
            brand: PrivateBrand::new(),
            names: AHashMap::default(),
        })))
    }

    pub fn brand(&self) -> PrivateBrand {
        self.0.borrow().brand.clone()
    }

    pub fn declare(&self, surface_name: &str, member: PrivateMember) {
        let mangled: Rc<str> = Rc::from(format!("{surface_name}@{:p}", Rc::as_ptr(&self.0)));
        self.0
            .borrow_mut()
            .names
            .insert(Rc::from(surface_name), (mangled, member));
    }

    /// Resolves `#name` to its mangled key and member, walking outward
    /// through enclosing classes the way a lexical scope lookup would.
    pub fn resolve(&self, surface_name: &str) -> Option<(Rc<str>, PrivateMember)> {
        let data = self.0.borrow();
        if let Some(entry) = data.names.get(surface_name) {
            return Some(entry.clone());
        }
        data.outer.as_ref()?.resolve(surface_name)
    }
}

impl std::fmt::Debug for PrivateEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateEnvironment").finish_non_exhaustive()
    }
}
