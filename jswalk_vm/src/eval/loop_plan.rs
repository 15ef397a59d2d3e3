// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [14.7 Iteration Statements](https://tc39.es/ecma262/#sec-iteration-statements)
//!
//! The parser/desugarer normalizes `while`, `do-while`, and C-style `for`
//! into one shape ([`ast::LoopPlan`]); [`evaluate_loop`] is the one executor
//! that walks it, including `ForPerIterationLet` so a closure created in one
//! iteration of `for (let i = ...; ...)` keeps that iteration's binding
//! (spec.md §4.G). `for-in`/`for-of` have their own head shape and get their
//! own functions, sharing iteration-target binding via [`bind_for_target`].

use std::rc::Rc;

use crate::agent::{Agent, EngineError};
use crate::binding_patterns::{assign_pattern, declare_pattern_bindings, initialize_pattern};
use crate::completion::{Completion, StatementResult};
use crate::environment::Environment;
use crate::eval::expression::{evaluate_expression, evaluate_reference};
use crate::eval::iterator::{get_iterator, iterator_close, iterator_step_value};
use crate::eval::statement::{complete, evaluate_statement};
use crate::execution_context::EvaluationContext;
use crate::hoisting;
use crate::values::JsValue;

fn check_cancellation(agent: &Agent) -> Result<(), EngineError> {
    if agent.cancellation.is_cancelled() {
        Err(EngineError::Cancelled)
    } else {
        Ok(())
    }
}

/// Runs a statement that itself returns a [`crate::completion::Completion`]
/// (as opposed to an expression's [`crate::agent::JsResult`]) and, if it's
/// abrupt, bails the enclosing loop out with it right away.
fn run_or_bail(agent: &mut Agent, ctx: &EvaluationContext, stmt: &ast::Statement) -> Result<(), StatementResult> {
    match evaluate_statement(agent, ctx, stmt) {
        Ok(completion) if !completion.is_abrupt() => Ok(()),
        Ok(completion) => Err(Ok(completion)),
        Err(err) => Err(Err(err)),
    }
}

/// `CreatePerIterationEnvironment`: a fresh declarative environment chained
/// off `outer`, re-declaring this loop's own `let` names and copying each
/// one's current value forward, so a closure captured during one iteration
/// keeps seeing that iteration's binding once the next iteration mutates it.
fn per_iteration_environment(agent: &mut Agent, outer: &Environment, names: &[Rc<str>]) -> Environment {
    let fresh = Environment::new_declarative(Some(outer.clone()));
    for name in names {
        let _ = fresh.create_mutable_binding(agent, name.clone(), false);
        if let Ok(value) = outer.get_binding_value(agent, name, false) {
            let _ = fresh.initialize_binding(agent, name, value);
        }
    }
    fresh
}

fn loop_let_names(leading_statements: &[ast::Statement]) -> Vec<Rc<str>> {
    hoisting::lexical_declarations(leading_statements).into_iter().map(|decl| decl.name).collect()
}

/// Matches a loop's own completion against its (optional) label: an
/// unlabeled `break`/`continue` always targets the nearest loop; a labeled
/// one only does if it names this loop.
fn targets_this_loop(label: &Option<Rc<str>>, completion_label: &Option<Rc<str>>) -> bool {
    match completion_label {
        None => true,
        Some(l) => Some(l) == label.as_ref(),
    }
}

pub fn evaluate_loop(agent: &mut Agent, ctx: &EvaluationContext, loop_stmt: &ast::LoopStatement) -> StatementResult {
    let plan = &loop_stmt.plan;
    let label: Option<Rc<str>> = loop_stmt.label.as_deref().map(Rc::from);

    let head_env = Environment::new_declarative(Some(ctx.lexical_environment.clone()));
    let let_names = loop_let_names(&plan.leading_statements);
    for name in &let_names {
        let _ = head_env.create_mutable_binding(agent, name.clone(), false);
    }
    {
        let head_ctx = ctx.with_lexical_environment(head_env.clone());
        for stmt in &plan.leading_statements {
            if let Err(result) = run_or_bail(agent, &head_ctx, stmt) {
                return result;
            }
        }
    }

    let mut iter_env = head_env;
    let mut first_iteration = true;
    let mut last = JsValue::Undefined;

    loop {
        check_cancellation(agent)?;

        if !first_iteration {
            iter_env = per_iteration_environment(agent, &iter_env, &let_names);
            if let Some(prologue) = &plan.condition_prologue {
                let prologue_ctx = ctx.with_lexical_environment(iter_env.clone());
                if let Err(result) = run_or_bail(agent, &prologue_ctx, prologue) {
                    return result;
                }
            }
        }
        let iter_ctx = ctx.with_lexical_environment(iter_env.clone());

        if !(plan.condition_after_body && first_iteration) {
            if let Some(cond) = &plan.condition {
                let test = complete!(evaluate_expression(agent, &iter_ctx, cond));
                if !test.to_boolean() {
                    break;
                }
            }
        }

        let completion = evaluate_statement(agent, &iter_ctx, &plan.body)?.update_empty(&last);
        match completion {
            Completion::Normal(value) => last = value,
            Completion::Break(ref l) if targets_this_loop(&label, l) => break,
            Completion::Continue(ref l) if targets_this_loop(&label, l) => {}
            other => return Ok(other),
        }

        if let Some(post) = &plan.post_iteration {
            complete!(evaluate_expression(agent, &iter_ctx, post));
        }

        first_iteration = false;
    }
    Ok(Completion::Normal(last))
}

/// Binds one iterated value (`for (x of it)`, `for (let {a} in obj)`, ...)
/// for a single iteration, returning the context the loop body should run
/// in — a fresh lexically-scoped one for `let`/`const`, the enclosing
/// context unchanged for `var` and plain assignment targets.
fn bind_for_target(agent: &mut Agent, ctx: &EvaluationContext, left: &ast::ForBinding, value: JsValue) -> crate::agent::JsResult<EvaluationContext> {
    match left {
        ast::ForBinding::Pattern(ast::AssignmentTarget::Simple(expr)) => {
            let reference = evaluate_reference(agent, ctx, expr)?;
            reference.put_value(agent, value)?;
            Ok(ctx.clone())
        }
        ast::ForBinding::Pattern(ast::AssignmentTarget::Pattern(pattern)) => {
            assign_pattern(agent, ctx, pattern, value)?;
            Ok(ctx.clone())
        }
        ast::ForBinding::Declaration(ast::VariableKind::Var, pattern) => {
            assign_pattern(agent, ctx, pattern, value)?;
            Ok(ctx.clone())
        }
        ast::ForBinding::Declaration(kind, pattern) => {
            let iter_env = Environment::new_declarative(Some(ctx.lexical_environment.clone()));
            declare_pattern_bindings(agent, &iter_env, pattern, *kind)?;
            let iter_ctx = ctx.with_lexical_environment(iter_env.clone());
            initialize_pattern(agent, &iter_ctx, pattern, value, &iter_env)?;
            Ok(iter_ctx)
        }
    }
}

/// `EnumerateObjectProperties`: own enumerable string keys first, then each
/// prototype's in turn, suppressing names already seen further down the
/// chain (spec.md §4.H "for-in enumeration order").
fn for_in_keys(object: &crate::values::JsObject) -> Vec<Rc<str>> {
    let mut seen = std::collections::HashSet::new();
    let mut keys = Vec::new();
    let mut current = Some(object.clone());
    while let Some(obj) = current {
        for key in obj.enumerable_own_string_keys() {
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }
        current = obj.prototype();
    }
    keys
}

pub fn evaluate_for_in(agent: &mut Agent, ctx: &EvaluationContext, stmt: &ast::ForInStatement) -> StatementResult {
    let label: Option<Rc<str>> = stmt.label.as_deref().map(Rc::from);
    let right = complete!(evaluate_expression(agent, ctx, &stmt.right));
    if right.is_nullish() {
        return Ok(Completion::normal_empty());
    }
    let Some(object) = right.as_object() else {
        return Ok(Completion::normal_empty());
    };

    let mut last = JsValue::Undefined;
    for key in for_in_keys(object) {
        check_cancellation(agent)?;
        let iter_ctx = complete!(bind_for_target(agent, ctx, &stmt.left, JsValue::string(key)));
        let completion = evaluate_statement(agent, &iter_ctx, &stmt.body)?.update_empty(&last);
        match completion {
            Completion::Normal(value) => last = value,
            Completion::Break(ref l) if targets_this_loop(&label, l) => break,
            Completion::Continue(ref l) if targets_this_loop(&label, l) => {}
            other => return Ok(other),
        }
    }
    Ok(Completion::Normal(last))
}

/// Closes `record` (running its `return()` method if present, per
/// `IteratorClose`) then folds whatever comes back into a [`Completion`] so
/// it can be threaded through this module's `StatementResult`-returning
/// functions the same way `complete!` does for a plain expression throw.
fn close_with(agent: &mut Agent, record: &crate::eval::iterator::IteratorRecord, completion: Completion) -> StatementResult {
    match iterator_close(agent, record, Ok(completion)) {
        Ok(completion) => Ok(completion),
        Err(err) => Ok(Completion::from(err)),
    }
}

fn close_and_bail(agent: &mut Agent, record: &crate::eval::iterator::IteratorRecord, err: crate::agent::JsError) -> StatementResult {
    let _ = iterator_close(agent, record, Err::<(), _>(err.clone()));
    Ok(Completion::from(err))
}

pub fn evaluate_for_of(agent: &mut Agent, ctx: &EvaluationContext, stmt: &ast::ForOfStatement) -> StatementResult {
    let label: Option<Rc<str>> = stmt.label.as_deref().map(Rc::from);
    let right = complete!(evaluate_expression(agent, ctx, &stmt.right));
    let record = complete!(get_iterator(agent, &right));

    let mut last = JsValue::Undefined;
    loop {
        check_cancellation(agent)?;
        let item = match iterator_step_value(agent, &record) {
            Ok(Some(item)) => item,
            Ok(None) => break,
            Err(err) => return Ok(Completion::from(err)),
        };
        let item = if stmt.is_await {
            match crate::generator::await_value(agent, item) {
                Ok(value) => value,
                Err(err) => return close_and_bail(agent, &record, err),
            }
        } else {
            item
        };

        let iter_ctx = match bind_for_target(agent, ctx, &stmt.left, item) {
            Ok(ctx) => ctx,
            Err(err) => return close_and_bail(agent, &record, err),
        };
        let completion = evaluate_statement(agent, &iter_ctx, &stmt.body)?.update_empty(&last);
        match completion {
            Completion::Normal(value) => last = value,
            Completion::Break(ref l) if targets_this_loop(&label, l) => {
                return close_with(agent, &record, Completion::Normal(last));
            }
            Completion::Continue(ref l) if targets_this_loop(&label, l) => {}
            other => return close_with(agent, &record, other),
        }
    }
    Ok(Completion::Normal(last))
}
