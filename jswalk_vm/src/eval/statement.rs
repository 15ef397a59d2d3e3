// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [14 ECMAScript Language: Statements and Declarations](https://tc39.es/ecma262/#sec-ecmascript-language-statements-and-declarations)
//!
//! Each statement produces a [`Completion`] rather than unwinding the Rust
//! stack; the `complete!` macro below is how an expression evaluation
//! (threaded through [`crate::agent::JsError`]/`?`) gets promoted to one at
//! the point a statement needs it, including the generator-suspend and
//! forced-return signals riding along in [`JsError`] (spec.md §4.A, §4.K).

use std::rc::Rc;

use crate::agent::{Agent, EngineError};
use crate::binding_patterns::{assign_pattern, initialize_pattern};
use crate::completion::{Completion, StatementResult};
use crate::environment::Environment;
use crate::eval::expression::evaluate_expression;
use crate::execution_context::EvaluationContext;
use crate::hoisting;
use crate::values::JsValue;

/// Evaluates `$e` (a `JsResult<T>`), returning `T` on success or promoting
/// any error — a real throw, a generator suspend, or a forced `.return()` —
/// to the matching [`Completion`] right here, via [`Completion::from`].
macro_rules! complete {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(err) => return Ok(Completion::from(err)),
        }
    };
}
pub(crate) use complete;

pub fn evaluate_statement(agent: &mut Agent, ctx: &EvaluationContext, stmt: &ast::Statement) -> StatementResult {
    match stmt {
        ast::Statement::Empty(_) => Ok(Completion::normal_empty()),
        ast::Statement::Expression(expr_stmt) => {
            let value = complete!(evaluate_expression(agent, ctx, &expr_stmt.expression));
            Ok(Completion::Normal(value))
        }
        ast::Statement::Block(block) => evaluate_block(agent, ctx, block),
        ast::Statement::If(if_stmt) => evaluate_if(agent, ctx, if_stmt),
        ast::Statement::Loop(loop_stmt) => crate::eval::loop_plan::evaluate_loop(agent, ctx, loop_stmt),
        ast::Statement::ForIn(for_in) => crate::eval::loop_plan::evaluate_for_in(agent, ctx, for_in),
        ast::Statement::ForOf(for_of) => crate::eval::loop_plan::evaluate_for_of(agent, ctx, for_of),
        ast::Statement::Return(ret) => {
            let value = match &ret.argument {
                Some(expr) => complete!(evaluate_expression(agent, ctx, expr)),
                None => JsValue::Undefined,
            };
            Ok(Completion::Return(value))
        }
        ast::Statement::Throw(throw_stmt) => {
            let value = complete!(evaluate_expression(agent, ctx, &throw_stmt.argument));
            Ok(Completion::Throw(agent.throw_value(value)))
        }
        ast::Statement::Try(try_stmt) => evaluate_try(agent, ctx, try_stmt),
        ast::Statement::Break(brk) => Ok(Completion::Break(brk.label.as_deref().map(Rc::from))),
        ast::Statement::Continue(cont) => Ok(Completion::Continue(cont.label.as_deref().map(Rc::from))),
        ast::Statement::Labeled(labeled) => evaluate_labeled(agent, ctx, labeled),
        ast::Statement::VariableDeclaration(decl) => evaluate_variable_declaration(agent, ctx, decl),
        ast::Statement::With(with_stmt) => evaluate_with(agent, ctx, with_stmt),
        ast::Statement::ClassDeclaration(def) => {
            let name = def
                .name
                .as_deref()
                .expect("a class declaration (unlike a class expression) always has a name");
            let class_obj = complete!(crate::class_builder::evaluate_class(agent, ctx, def));
            complete!(ctx.lexical_environment.initialize_binding(agent, name, JsValue::Object(class_obj)));
            Ok(Completion::normal_empty())
        }
        // Already bound (name and value) by the enclosing function/global's
        // hoisting pass (spec.md §4.B); executing the declaration itself
        // does nothing (see `crate::hoisting`'s simplification note).
        ast::Statement::FunctionDeclaration(_) => Ok(Completion::normal_empty()),
        ast::Statement::Switch(switch_stmt) => evaluate_switch(agent, ctx, switch_stmt),
    }
}

/// `StatementList` evaluation: runs every statement in order, threading
/// `UpdateEmpty` so a block's completion value is its last expression
/// statement's value, and stops at the first abrupt completion.
pub fn evaluate_statement_list(agent: &mut Agent, ctx: &EvaluationContext, stmts: &[ast::Statement]) -> StatementResult {
    let mut last = JsValue::Undefined;
    for stmt in stmts {
        let completion = evaluate_statement(agent, ctx, stmt)?.update_empty(&last);
        match completion {
            Completion::Normal(value) => last = value,
            other => return Ok(other),
        }
    }
    Ok(Completion::Normal(last))
}

/// Declares (uninitialized) every `let`/`const`/class binding a statement
/// list's own top level introduces. Infallible in practice: a fresh
/// declarative environment's `[[CreateMutableBinding]]` never fails.
pub(crate) fn declare_lexical_bindings(agent: &mut Agent, env: &Environment, stmts: &[ast::Statement]) {
    for decl in hoisting::lexical_declarations(stmts) {
        match decl.kind {
            ast::VariableKind::Const => env.create_immutable_binding(decl.name, true),
            _ => {
                let _ = env.create_mutable_binding(agent, decl.name, false);
            }
        }
    }
}

fn evaluate_block(agent: &mut Agent, ctx: &EvaluationContext, block: &ast::BlockStatement) -> StatementResult {
    let block_env = Environment::new_declarative(Some(ctx.lexical_environment.clone()));
    declare_lexical_bindings(agent, &block_env, &block.body);
    let block_ctx = ctx.with_lexical_environment(block_env);
    evaluate_statement_list(agent, &block_ctx, &block.body)
}

fn evaluate_if(agent: &mut Agent, ctx: &EvaluationContext, if_stmt: &ast::IfStatement) -> StatementResult {
    let test = complete!(evaluate_expression(agent, ctx, &if_stmt.test));
    if test.to_boolean() {
        evaluate_statement(agent, ctx, &if_stmt.consequent).map(|c| c.update_empty(&JsValue::Undefined))
    } else if let Some(alternate) = &if_stmt.alternate {
        evaluate_statement(agent, ctx, alternate).map(|c| c.update_empty(&JsValue::Undefined))
    } else {
        Ok(Completion::normal_empty())
    }
}

fn evaluate_with(agent: &mut Agent, ctx: &EvaluationContext, with_stmt: &ast::WithStatement) -> StatementResult {
    let object = complete!(evaluate_expression(agent, ctx, &with_stmt.object));
    let JsValue::Object(binding_object) = object else {
        return Err(EngineError::Unsupported("`with` statement object did not evaluate to an object".into()));
    };
    let with_env = Environment::new_object(Some(ctx.lexical_environment.clone()), binding_object, true);
    let with_ctx = ctx.with_lexical_environment(with_env);
    evaluate_statement(agent, &with_ctx, &with_stmt.body)
}

fn evaluate_labeled(agent: &mut Agent, ctx: &EvaluationContext, labeled: &ast::LabeledStatement) -> StatementResult {
    let label: Rc<str> = Rc::from(labeled.label.as_str());
    let completion = evaluate_statement(agent, ctx, &labeled.body)?;
    Ok(match completion {
        Completion::Break(Some(l)) if l == label => Completion::normal_empty(),
        Completion::Continue(Some(l)) if l == label => Completion::normal_empty(),
        other => other,
    })
}

fn evaluate_variable_declaration(agent: &mut Agent, ctx: &EvaluationContext, decl: &ast::VariableDeclaration) -> StatementResult {
    for declarator in &decl.declarations {
        let value = match &declarator.init {
            Some(init) => {
                let value = complete!(evaluate_expression(agent, ctx, init));
                if let (ast::BindingPattern::Identifier(name), JsValue::Object(obj)) = (&declarator.id, &value) {
                    crate::function_invocation::set_name_if_anonymous(obj, name);
                }
                value
            }
            None => JsValue::Undefined,
        };
        match decl.kind {
            ast::VariableKind::Var => {
                if declarator.init.is_some() {
                    complete!(assign_pattern(agent, ctx, &declarator.id, value));
                }
            }
            ast::VariableKind::Let | ast::VariableKind::Const => {
                complete!(initialize_pattern(agent, ctx, &declarator.id, value, &ctx.lexical_environment));
            }
        }
    }
    Ok(Completion::normal_empty())
}

fn evaluate_try(agent: &mut Agent, ctx: &EvaluationContext, stmt: &ast::TryStatement) -> StatementResult {
    let block_completion = evaluate_block(agent, ctx, &stmt.block)?;
    if block_completion.is_suspend() {
        return Ok(block_completion);
    }
    let after_catch = if let (Completion::Throw(err), Some(handler)) = (&block_completion, &stmt.handler) {
        evaluate_catch(agent, ctx, handler, err.value())?
    } else {
        block_completion
    };
    if after_catch.is_suspend() {
        return Ok(after_catch);
    }
    match &stmt.finalizer {
        None => Ok(after_catch),
        Some(finalizer) => match evaluate_block(agent, ctx, finalizer)? {
            Completion::Normal(_) => Ok(after_catch),
            other => Ok(other),
        },
    }
}

fn evaluate_catch(agent: &mut Agent, ctx: &EvaluationContext, handler: &ast::CatchClause, thrown: JsValue) -> StatementResult {
    let catch_env = Environment::new_declarative(Some(ctx.lexical_environment.clone()));
    if let Some(param) = &handler.param {
        for name in crate::binding_patterns::bound_names(param) {
            let _ = catch_env.create_mutable_binding(agent, name, false);
        }
        if let ast::BindingPattern::Identifier(name) = param {
            catch_env.set_simple_catch_parameters([Rc::from(name.as_str())]);
        }
        let catch_ctx = ctx.with_lexical_environment(catch_env.clone());
        complete!(initialize_pattern(agent, &catch_ctx, param, thrown, &catch_env));
    }
    declare_lexical_bindings(agent, &catch_env, &handler.body.body);
    let catch_ctx = ctx.with_lexical_environment(catch_env);
    evaluate_statement_list(agent, &catch_ctx, &handler.body.body)
}

fn evaluate_switch(agent: &mut Agent, ctx: &EvaluationContext, stmt: &ast::SwitchStatement) -> StatementResult {
    let discriminant = complete!(evaluate_expression(agent, ctx, &stmt.discriminant));

    let block_env = Environment::new_declarative(Some(ctx.lexical_environment.clone()));
    for case in &stmt.cases {
        declare_lexical_bindings(agent, &block_env, &case.consequent);
    }
    let block_ctx = ctx.with_lexical_environment(block_env);

    let mut matched_index = None;
    for (index, case) in stmt.cases.iter().enumerate() {
        if let Some(test) = &case.test {
            let test_value = complete!(evaluate_expression(agent, &block_ctx, test));
            if test_value.strict_equals(&discriminant) {
                matched_index = Some(index);
                break;
            }
        }
    }
    let start_index = match matched_index {
        Some(index) => index,
        None => match stmt.cases.iter().position(|c| c.test.is_none()) {
            Some(index) => index,
            None => return Ok(Completion::normal_empty()),
        },
    };

    let label: Option<Rc<str>> = stmt.label.as_deref().map(Rc::from);
    let mut last = JsValue::Undefined;
    for case in &stmt.cases[start_index..] {
        for s in &case.consequent {
            let completion = evaluate_statement(agent, &block_ctx, s)?.update_empty(&last);
            match completion {
                Completion::Normal(value) => last = value,
                Completion::Break(None) => return Ok(Completion::Normal(last)),
                Completion::Break(Some(l)) if Some(&l) == label.as_ref() => return Ok(Completion::Normal(last)),
                other => return Ok(other),
            }
        }
    }
    Ok(Completion::Normal(last))
}
