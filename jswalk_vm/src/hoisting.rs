// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.2.1.3 Runtime Semantics: InstantiateFunctionObject](https://tc39.es/ecma262/#sec-functiondeclarationinstantiation)
//! ### [14.2.2 Block-Level Function Declarations Web Legacy Compatibility Semantics](https://tc39.es/ecma262/#sec-web-compat-blockdeclarationinstantiation)
//!
//! Two passes over a statement list, used by [`crate::program`] and
//! [`crate::function_invocation`] at every function/global entry and by
//! [`crate::eval::statement`] at every block entry:
//!
//! - [`var_declared_names`]/[`var_scoped_function_declarations`] walk *into*
//!   nested blocks, loops, `try`, `switch`, and labeled/`with` statements
//!   (but never into a nested function/class body) to find every `var` and
//!   function declaration that belongs to the enclosing function or global
//!   scope.
//! - [`lexical_declarations`] only looks at the statement list's own top
//!   level, for the `let`/`const`/class bindings a single block introduces.
//!
//! Simplification (see DESIGN.md): function declarations are always hoisted
//! to, and get their value bound at, the nearest enclosing function/global
//! scope — the stricter ES2015 rule that gives a function declaration
//! nested in a block its own block-scoped binding (with only sloppy-mode
//! Annex B copying it outward) is not modeled. Most programs that don't
//! rely on the strict-mode edge case behave identically either way.

use std::rc::Rc;

use crate::binding_patterns::bound_names;

pub struct LexicalDeclaration {
    pub name: Rc<str>,
    pub kind: ast::VariableKind,
}

/// `var`-declared names (including catch-less function declarations and
/// `for (var x of ...)`/`for (var x in ...)` bindings) reachable from this
/// statement list without crossing a function or class boundary.
pub fn var_declared_names(stmts: &[ast::Statement]) -> Vec<Rc<str>> {
    let mut names = Vec::new();
    let mut funcs = Vec::new();
    for stmt in stmts {
        walk_var(stmt, &mut names, &mut funcs);
    }
    names
}

/// The function declarations that must be bound (with their value, not just
/// their name) at function/global entry, last-one-wins order preserved by
/// returning them in source order for the caller to fold over.
pub fn var_scoped_function_declarations(stmts: &[ast::Statement]) -> Vec<Rc<ast::FunctionDefinition>> {
    let mut names = Vec::new();
    let mut funcs = Vec::new();
    for stmt in stmts {
        walk_var(stmt, &mut names, &mut funcs);
    }
    funcs
}

fn walk_var(stmt: &ast::Statement, names: &mut Vec<Rc<str>>, funcs: &mut Vec<Rc<ast::FunctionDefinition>>) {
    match stmt {
        ast::Statement::VariableDeclaration(decl) if decl.kind == ast::VariableKind::Var => {
            for declarator in &decl.declarations {
                names.extend(bound_names(&declarator.id));
            }
        }
        ast::Statement::VariableDeclaration(_) => {}
        ast::Statement::FunctionDeclaration(def) => {
            if let Some(name) = &def.name {
                names.push(Rc::from(name.as_str()));
            }
            funcs.push(Rc::new(def.clone()));
        }
        ast::Statement::Block(block) => {
            for s in &block.body {
                walk_var(s, names, funcs);
            }
        }
        ast::Statement::If(stmt) => {
            walk_var(&stmt.consequent, names, funcs);
            if let Some(alt) = &stmt.alternate {
                walk_var(alt, names, funcs);
            }
        }
        ast::Statement::Loop(loop_stmt) => {
            for s in &loop_stmt.plan.leading_statements {
                walk_var(s, names, funcs);
            }
            if let Some(prologue) = &loop_stmt.plan.condition_prologue {
                walk_var(prologue, names, funcs);
            }
            walk_var(&loop_stmt.plan.body, names, funcs);
        }
        ast::Statement::ForIn(stmt) => {
            if let ast::ForBinding::Declaration(ast::VariableKind::Var, pattern) = &stmt.left {
                names.extend(bound_names(pattern));
            }
            walk_var(&stmt.body, names, funcs);
        }
        ast::Statement::ForOf(stmt) => {
            if let ast::ForBinding::Declaration(ast::VariableKind::Var, pattern) = &stmt.left {
                names.extend(bound_names(pattern));
            }
            walk_var(&stmt.body, names, funcs);
        }
        ast::Statement::Try(stmt) => {
            for s in &stmt.block.body {
                walk_var(s, names, funcs);
            }
            if let Some(handler) = &stmt.handler {
                for s in &handler.body.body {
                    walk_var(s, names, funcs);
                }
            }
            if let Some(finalizer) = &stmt.finalizer {
                for s in &finalizer.body {
                    walk_var(s, names, funcs);
                }
            }
        }
        ast::Statement::Switch(stmt) => {
            for case in &stmt.cases {
                for s in &case.consequent {
                    walk_var(s, names, funcs);
                }
            }
        }
        ast::Statement::Labeled(stmt) => walk_var(&stmt.body, names, funcs),
        ast::Statement::With(stmt) => walk_var(&stmt.body, names, funcs),
        ast::Statement::ClassDeclaration(_)
        | ast::Statement::Return(_)
        | ast::Statement::Throw(_)
        | ast::Statement::Break(_)
        | ast::Statement::Continue(_)
        | ast::Statement::Expression(_)
        | ast::Statement::Empty(_) => {}
    }
}

/// The `let`/`const`/class bindings this statement list's own block
/// introduces — does not recurse into nested blocks (each gets its own
/// environment when it's entered).
pub fn lexical_declarations(stmts: &[ast::Statement]) -> Vec<LexicalDeclaration> {
    let mut decls = Vec::new();
    for stmt in stmts {
        match stmt {
            ast::Statement::VariableDeclaration(decl) if decl.kind != ast::VariableKind::Var => {
                for declarator in &decl.declarations {
                    for name in bound_names(&declarator.id) {
                        decls.push(LexicalDeclaration { name, kind: decl.kind });
                    }
                }
            }
            ast::Statement::ClassDeclaration(def) => {
                if let Some(name) = &def.name {
                    decls.push(LexicalDeclaration {
                        name: Rc::from(name.as_str()),
                        kind: ast::VariableKind::Let,
                    });
                }
            }
            _ => {}
        }
    }
    decls
}
