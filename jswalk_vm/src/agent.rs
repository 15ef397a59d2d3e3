// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The running agent: realm access, exception construction, and the
//! cancellation token. Grounded in
//! `nova_vm::ecmascript::execution::agent::Agent`, simplified from a
//! tracing-GC heap to plain `Rc`/`RefCell` ownership (see SPEC_FULL.md §4).

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::host::StandardLibrary;
use crate::realm::Realm;
use crate::values::JsValue;

/// Spec.md §7 distinguishes catchable JS throws (carried as [`JsError`] /
/// [`JsResult`]) from host-level invariant violations and cancellation,
/// neither of which is catchable from JS. [`EvalOutcome`] is the union the
/// program driver's entry point actually returns.
pub type JsResult<T> = Result<T, JsError>;

/// The error channel every expression evaluation threads through `?`. Never
/// unwinds the Rust stack on its own: it is mirrored onto
/// [`crate::completion::Completion`] at the nearest statement boundary so
/// that `try`/`finally` and loop control flow can see and clear it without
/// native exception handling (spec.md §4.A).
///
/// [`JsError::Suspend`] and [`JsError::Return`] are not catchable JS
/// throws — they are the generator `yield` mechanism's way of unwinding a
/// replayed call back to [`crate::generator`]'s driver loop (a suspend) or
/// performing a non-local `return` from a suspended `yield` expression
/// (`.return()` on a generator, spec.md §4.K). Every `?`-based call site
/// gets this propagation for free; only [`crate::eval::statement`]'s `try`
/// handling and [`crate::generator`] ever need to look inside the variant.
#[derive(Clone, Debug)]
pub enum JsError {
    Thrown(JsValue),
    Suspend(JsValue),
    Return(JsValue),
}

impl JsError {
    pub fn value(&self) -> JsValue {
        match self {
            Self::Thrown(v) | Self::Suspend(v) | Self::Return(v) => v.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionType {
    Error,
    TypeError,
    ReferenceError,
    SyntaxError,
    RangeError,
}

impl ExceptionType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::TypeError => "TypeError",
            Self::ReferenceError => "ReferenceError",
            Self::SyntaxError => "SyntaxError",
            Self::RangeError => "RangeError",
        }
    }
}

/// Host-level failures: unsupported AST shapes and other invariant
/// violations that are not catchable from JS (spec.md §7 item 2).
#[derive(Clone, Debug)]
pub enum EngineError {
    Unsupported(String),
    /// A loop or iteration surfaced a cancellation request (spec.md §5).
    /// Threaded through the same `StatementResult` channel as other host
    /// failures, then unpacked back into [`EvalOutcome::Cancelled`] instead
    /// of [`EvalOutcome::Internal`] once it reaches the program driver.
    Cancelled,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(what) => write!(f, "unsupported AST shape: {what}"),
            Self::Cancelled => write!(f, "evaluation cancelled"),
        }
    }
}

impl std::error::Error for EngineError {}

/// The three ways [`crate::program::evaluate_program`] can fail, matching
/// spec.md §6's "Errors" clause.
#[derive(Clone, Debug)]
pub enum EvalOutcome {
    Thrown(JsError),
    Cancelled,
    Internal(EngineError),
}

impl From<JsError> for EvalOutcome {
    fn from(err: JsError) -> Self {
        Self::Thrown(err)
    }
}

impl From<EngineError> for EvalOutcome {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Cancelled => Self::Cancelled,
            other => Self::Internal(other),
        }
    }
}

/// Cooperative cancellation, checked at every loop iteration and iterator
/// step (spec.md §5). Cheap to clone and share between nested invocations.
#[derive(Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    pub fn throw_if_cancellation_requested(&self) -> Result<(), EvalOutcome> {
        if self.is_cancelled() {
            Err(EvalOutcome::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// The `SloppyAnnexB` switch and the handful of other engine-wide knobs
/// spec.md §1/§3 calls out. Grounded in
/// `nova_vm::ecmascript::execution::agent::Options`.
#[derive(Clone, Copy, Debug)]
pub struct EvaluatorOptions {
    pub sloppy_annex_b: bool,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            sloppy_annex_b: cfg!(feature = "annex-b"),
        }
    }
}

/// The ECMAScript Agent (spec.md §3): realm access plus the handful of
/// engine-wide pieces of state that outlive any single evaluation context.
pub struct Agent {
    pub realm: Rc<Realm>,
    pub options: EvaluatorOptions,
    pub cancellation: CancellationToken,
}

impl Agent {
    pub fn new(realm: Rc<Realm>, options: EvaluatorOptions, cancellation: CancellationToken) -> Self {
        Self {
            realm,
            options,
            cancellation,
        }
    }

    /// [5.2.3.2 Throw an Exception](https://tc39.es/ecma262/#sec-throw-an-exception)
    pub fn throw_exception(&self, kind: ExceptionType, message: impl Into<String>) -> JsError {
        JsError::Thrown(self.realm.host.create_error(kind, message.into()))
    }

    /// `Throw(value)` for an already-computed value (e.g. a re-thrown catch
    /// binding, or a user `throw expr;`).
    pub fn throw_value(&self, value: JsValue) -> JsError {
        JsError::Thrown(value)
    }
}
