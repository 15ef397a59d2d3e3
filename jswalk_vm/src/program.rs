// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [16.1 Scripts](https://tc39.es/ecma262/#sec-scripts) / [16.2 Modules](https://tc39.es/ecma262/#sec-modules) / [19.2.1 eval](https://tc39.es/ecma262/#sec-eval-x)
//!
//! `GlobalDeclarationInstantiation` / `EvalDeclarationInstantiation` +
//! running the program to completion (spec.md §4.L, §6). Everything this
//! module does is the top-level counterpart of what
//! [`crate::function_invocation::run_function_body`] already does for a
//! function call: hoist `var`/function declarations, declare lexical
//! bindings, then run the statement list and collapse its [`Completion`]
//! into a result.

use std::rc::Rc;

use crate::agent::{Agent, CancellationToken, EngineError, EvalOutcome, EvaluatorOptions};
use crate::completion::Completion;
use crate::environment::Environment;
use crate::eval::statement::{declare_lexical_bindings, evaluate_statement_list};
use crate::execution_context::EvaluationContext;
use crate::function_invocation::instantiate_ordinary_function;
use crate::hoisting;
use crate::realm::Realm;
use crate::values::JsValue;

/// Which of the three program entry points is being evaluated (spec.md §6).
/// Only affects how the running environment is set up: a `Script` runs
/// directly against the global environment, a `Module` gets its own
/// always-strict scope, and `Eval` gets a scope shaped by whether the call
/// site is itself strict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionKind {
    Script,
    Module,
    Eval,
}

/// `EvaluateProgram` (spec.md §6): runs a whole parsed program against a
/// (possibly fresh) environment and returns its completion value, or the
/// reason it didn't produce one.
///
/// `environment` is the scope the program runs against: the realm's global
/// environment for a `Script`, the enclosing scope for an `Eval`. `program`
/// is assumed to have already been checked for early errors (duplicate
/// `let`, `const` without an initializer, etc.) by whatever produced the
/// AST — this driver only performs the runtime instantiation steps.
pub fn evaluate_program(
    program: &ast::Program,
    environment: Environment,
    realm: Rc<Realm>,
    options: EvaluatorOptions,
    cancellation: CancellationToken,
    execution_kind: ExecutionKind,
    create_strict_environment: bool,
) -> Result<JsValue, EvalOutcome> {
    cancellation.throw_if_cancellation_requested()?;
    let mut agent = Agent::new(realm, options, cancellation);

    let is_strict = program.strict || create_strict_environment || execution_kind == ExecutionKind::Module;

    // Scripts and non-strict, non-fresh evals run their var/lexical
    // declarations directly against the environment they were handed — a
    // script's global environment record already separates its object and
    // declarative halves internally (see `crate::environment`), and a
    // non-strict sloppy eval is required to leak `var`s into the caller's
    // variable environment. Modules and every strict eval instead get a
    // private declarative scope of their own, so top-level `let`/`const`/
    // function declarations never collide with (or leak into) the caller.
    let (lexical_environment, variable_environment) = match execution_kind {
        ExecutionKind::Script => (environment.clone(), environment),
        ExecutionKind::Module => {
            let module_env = Environment::new_declarative(Some(environment));
            (module_env.clone(), module_env)
        }
        ExecutionKind::Eval => {
            if is_strict {
                let eval_env = Environment::new_declarative(Some(environment));
                (eval_env.clone(), eval_env)
            } else {
                let lexical = Environment::new_declarative(Some(environment.clone()));
                (lexical, environment)
            }
        }
    };

    let ctx = EvaluationContext {
        lexical_environment,
        variable_environment: variable_environment.clone(),
        private_environment: None,
        function: None,
        is_strict,
        generator: None,
    };

    if let Err(err) = instantiate_declarations(&mut agent, &ctx, &variable_environment, &program.body) {
        return Err(EvalOutcome::Thrown(err));
    }

    let completion = evaluate_statement_list(&mut agent, &ctx, &program.body).map_err(EvalOutcome::from)?;
    match completion {
        Completion::Normal(value) | Completion::Return(value) => Ok(value),
        Completion::Throw(err) => Err(EvalOutcome::from(err)),
        Completion::Break(_) | Completion::Continue(_) => Err(EvalOutcome::Internal(EngineError::Unsupported(
            "break/continue escaped to program top level".to_string(),
        ))),
        Completion::Suspend(_) => Err(EvalOutcome::Internal(EngineError::Unsupported(
            "yield escaped to program top level".to_string(),
        ))),
    }
}

/// `GlobalDeclarationInstantiation`/`EvalDeclarationInstantiation`'s
/// var/function hoisting half (spec.md §4.L), shared across all three
/// [`ExecutionKind`]s since they only differ in which environment it runs
/// against.
fn instantiate_declarations(
    agent: &mut Agent,
    ctx: &EvaluationContext,
    variable_environment: &Environment,
    statements: &[ast::Statement],
) -> Result<(), crate::agent::JsError> {
    for name in hoisting::var_declared_names(statements) {
        if !variable_environment.has_binding(agent, &name)? {
            variable_environment.create_mutable_binding(agent, name.clone(), false)?;
            variable_environment.initialize_binding(agent, &name, JsValue::Undefined)?;
        }
    }
    for func_def in hoisting::var_scoped_function_declarations(statements) {
        let name = func_def.name.clone().expect("var-scoped function declarations are always named");
        let func_value = JsValue::Object(instantiate_ordinary_function(agent, ctx, &func_def));
        if !variable_environment.has_binding(agent, &name)? {
            variable_environment.create_mutable_binding(agent, Rc::from(name.as_str()), false)?;
        }
        variable_environment.initialize_binding(agent, &name, func_value)?;
    }
    declare_lexical_bindings(agent, &ctx.lexical_environment, statements);
    Ok(())
}
