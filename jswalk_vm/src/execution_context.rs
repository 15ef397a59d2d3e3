// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.4 Execution Contexts](https://tc39.es/ecma262/#sec-execution-contexts)
//!
//! One [`EvaluationContext`] is live per nested function/program
//! invocation. The evaluator passes it down the call tree explicitly
//! instead of threading it through the [`Agent`](crate::agent::Agent),
//! since invocation here is plain recursive Rust calls rather than a
//! trampolined bytecode interpreter.

use std::rc::Rc;

use crate::environment::{Environment, PrivateEnvironment};
use crate::generator::GeneratorReplay;
use crate::values::JsObject;

#[derive(Clone)]
pub struct EvaluationContext {
    /// Resolves identifier references (spec.md §3 `LexicalEnvironment`).
    pub lexical_environment: Environment,
    /// Where top-level `var`/function declarations of this context land
    /// (spec.md §3 `VariableEnvironment`); equal to `lexical_environment`
    /// except inside `catch` blocks and other pure-lexical overlays.
    pub variable_environment: Environment,
    /// The nearest enclosing class's private-name scope, if any.
    pub private_environment: Option<PrivateEnvironment>,
    /// The function object this context evaluates, `None` for a top-level
    /// program (spec.md §3 `Function`).
    pub function: Option<JsObject>,
    pub is_strict: bool,
    /// Present while replaying a generator body (spec.md §4.K); `yield`
    /// consults it to tell an already-answered resumption from the one that
    /// must suspend the current call stack.
    pub generator: Option<Rc<GeneratorReplay>>,
}

impl EvaluationContext {
    pub fn new_program(global_environment: Environment, is_strict: bool) -> Self {
        Self {
            lexical_environment: global_environment.clone(),
            variable_environment: global_environment,
            private_environment: None,
            function: None,
            is_strict,
            generator: None,
        }
    }

    /// A child context sharing everything but the lexical environment, as
    /// pushed for a block statement, `for` head, or `catch` clause.
    pub fn with_lexical_environment(&self, lexical_environment: Environment) -> Self {
        Self {
            lexical_environment,
            ..self.clone()
        }
    }

    pub fn with_variable_environment(&self, variable_environment: Environment) -> Self {
        Self {
            variable_environment: variable_environment.clone(),
            lexical_environment: variable_environment,
            ..self.clone()
        }
    }
}
