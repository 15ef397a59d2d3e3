// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A typed-AST tree-walking ECMAScript evaluator.
//!
//! The crate takes a previously parsed [`ast::Program`] and runs it to
//! completion, implementing ECMAScript's binding, class, iteration, and
//! generator/async suspension semantics. The standard library, value heap
//! internals beyond what's needed to exercise the evaluator, and the host
//! promise scheduler are out of scope here and are represented as the
//! [`host`] traits instead.

pub mod agent;
pub mod binding_patterns;
pub mod class_builder;
pub mod completion;
pub mod environment;
pub mod eval;
pub mod execution_context;
pub mod function_invocation;
pub mod generator;
pub mod host;
pub mod program;
pub mod realm;
pub mod reference;
pub mod values;

pub use agent::{Agent, EngineError, EvalOutcome, EvaluatorOptions, ExceptionType, JsError, JsResult};
pub use program::{evaluate_program, ExecutionKind};
