// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [6.2.4 The Completion Record Specification Type](https://tc39.es/ecma262/#sec-completion-record-specification-type)
//!
//! Statement evaluation threads a [`Completion`] value rather than using
//! Rust's own unwinding for `return`/`break`/`continue`/`throw`: a `throw`
//! deep inside a `try` block must be inspectable and re-raised *after* a
//! `finally` block runs, which native `Result`-propagation via `?` can't
//! express once `finally` needs to swap in its own completion (spec.md §4.A).
//! [`crate::agent::JsError`] (and the `JsResult` it rides in) is reserved for
//! expression evaluation and the host-collaborator boundary, where a throw
//! has nowhere else to go but up.

use std::rc::Rc;

use crate::agent::{EngineError, JsError};
use crate::values::JsValue;

/// A statement's completion. `Normal` also carries a value for expression
/// statements / the completion value of a block, mirroring the spec's
/// `UpdateEmpty` bookkeeping used by `eval`-like constructs; this evaluator
/// only surfaces it for the top-level program result (spec.md §6).
#[derive(Clone, Debug)]
pub enum Completion {
    Normal(JsValue),
    Return(JsValue),
    Throw(JsError),
    /// `None` is an unlabeled break/continue; `Some` names the target
    /// label (spec.md §4.F labeled statements).
    Break(Option<Rc<str>>),
    Continue(Option<Rc<str>>),
    /// A `yield` reached during a generator body replay (spec.md §4.K,
    /// [`crate::generator`]). Bypasses `catch` *and* `finally` entirely —
    /// the try block hasn't actually completed, it's merely paused — and
    /// must be propagated by every statement sequencer verbatim.
    Suspend(JsValue),
}

impl Completion {
    pub fn normal_empty() -> Self {
        Self::Normal(JsValue::Undefined)
    }

    pub fn is_abrupt(&self) -> bool {
        !matches!(self, Self::Normal(_))
    }

    pub fn is_suspend(&self) -> bool {
        matches!(self, Self::Suspend(_))
    }

    /// `UpdateEmpty`: a `Normal`/`Break`/`Continue` completion value is
    /// replaced by whatever the previous statement produced, so a
    /// completed block reports the last expression statement it ran.
    pub fn update_empty(self, previous_value: &JsValue) -> Self {
        match self {
            Self::Normal(JsValue::Undefined) => Self::Normal(previous_value.clone()),
            other => other,
        }
    }

    pub fn throw(err: JsError) -> Self {
        Self::Throw(err)
    }
}

/// Converts an expression-evaluation error into the completion it produces
/// at the nearest enclosing statement: a real throw becomes `Throw`, a
/// generator suspend or forced return become their matching completions.
/// Used by [`crate::eval::statement`]'s `complete!` helper so every
/// expression-evaluating statement gets this translation via a single `?`.
impl From<JsError> for Completion {
    fn from(err: JsError) -> Self {
        match err {
            JsError::Thrown(_) => Self::Throw(err),
            JsError::Suspend(value) => Self::Suspend(value),
            JsError::Return(value) => Self::Return(value),
        }
    }
}

/// The result type every statement evaluator returns: `Err` is reserved for
/// host-level invariant violations (spec.md §7 item 2), never for a
/// catchable JS throw.
pub type StatementResult = Result<Completion, EngineError>;
