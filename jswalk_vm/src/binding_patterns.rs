// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [8.6 Runtime Semantics: BindingInitialization](https://tc39.es/ecma262/#sec-runtime-semantics-bindinginitialization)
//! ### [13.15.5 Runtime Semantics: DestructuringAssignmentEvaluation](https://tc39.es/ecma262/#sec-destructuring-assignment)
//!
//! One recursive walk ([`destructure`]) drives both binding initialization
//! (`let`/`const`/parameters/catch) and destructuring *assignment*
//! (`[a, b] = x`); the two differ only in what happens at each identifier
//! leaf, captured in [`Leaf`] (spec.md §4.D).

use std::rc::Rc;

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::environment::Environment;
use crate::eval::expression::{evaluate_expression, evaluate_property_key_literal};
use crate::eval::iterator::{get_iterator, iterator_close, iterator_step_value};
use crate::execution_context::EvaluationContext;
use crate::values::{JsValue, PropKey};

/// Every identifier name a pattern binds, in source order, including
/// duplicates — used by hoisting to know what to pre-declare.
pub fn bound_names(pattern: &ast::BindingPattern) -> Vec<Rc<str>> {
    let mut names = Vec::new();
    collect_bound_names(pattern, &mut names);
    names
}

fn collect_bound_names(pattern: &ast::BindingPattern, out: &mut Vec<Rc<str>>) {
    match pattern {
        ast::BindingPattern::Identifier(name) => out.push(Rc::from(name.as_str())),
        ast::BindingPattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                collect_bound_names(&element.pattern, out);
            }
            if let Some(rest) = &array.rest {
                collect_bound_names(rest, out);
            }
        }
        ast::BindingPattern::Object(object) => {
            for property in &object.properties {
                collect_bound_names(&property.pattern, out);
            }
            if let Some(rest) = &object.rest {
                collect_bound_names(rest, out);
            }
        }
    }
}

/// What happens at each bound identifier: either initializing a binding
/// already created during hoisting (`let x = ...`, parameters, `catch`), or
/// writing through an existing reference (`var x = ...`, plain assignment,
/// `for (x of ...)` with an already-declared `x`).
enum Leaf<'a> {
    Initialize(&'a Environment),
    Assign,
}

fn bind_leaf(agent: &mut Agent, ctx: &EvaluationContext, leaf: &Leaf, name: &str, value: JsValue) -> JsResult<()> {
    match leaf {
        Leaf::Initialize(env) => env.initialize_binding(agent, name, value),
        Leaf::Assign => {
            let reference = crate::eval::expression::evaluate_reference(
                agent,
                ctx,
                &ast::Expression::Identifier(ast::Identifier {
                    span: ast::Span::default(),
                    name: name.to_string(),
                }),
            )?;
            reference.put_value(agent, value)
        }
    }
}

/// Creates (but does not initialize) every binding a `let`/`const`
/// declaration's pattern introduces, so the names exist — in the temporal
/// dead zone — before the declaration's initializer runs (spec.md §4.B).
/// `var` bindings are hoisted separately by [`crate::hoisting`], which
/// creates them on the variable (not lexical) environment ahead of time and
/// pre-initializes them to `undefined`.
pub fn declare_pattern_bindings(agent: &mut Agent, env: &Environment, pattern: &ast::BindingPattern, kind: ast::VariableKind) -> JsResult<()> {
    for name in bound_names(pattern) {
        match kind {
            ast::VariableKind::Let => env.create_mutable_binding(agent, name, false)?,
            ast::VariableKind::Const => env.create_immutable_binding(name, true),
            ast::VariableKind::Var => unreachable!("var bindings are declared via crate::hoisting, not here"),
        }
    }
    Ok(())
}

fn destructure(agent: &mut Agent, ctx: &EvaluationContext, pattern: &ast::BindingPattern, value: JsValue, leaf: &Leaf) -> JsResult<()> {
    match pattern {
        ast::BindingPattern::Identifier(name) => bind_leaf(agent, ctx, leaf, name, value),
        ast::BindingPattern::Array(array) => destructure_array(agent, ctx, array, value, leaf),
        ast::BindingPattern::Object(object) => destructure_object(agent, ctx, object, value, leaf),
    }
}

fn apply_default(agent: &mut Agent, ctx: &EvaluationContext, value: JsValue, default: &Option<ast::Expression>) -> JsResult<JsValue> {
    if value.is_undefined() {
        if let Some(default) = default {
            return evaluate_expression(agent, ctx, default);
        }
    }
    Ok(value)
}

fn destructure_array(
    agent: &mut Agent,
    ctx: &EvaluationContext,
    array: &ast::ArrayPattern,
    value: JsValue,
    leaf: &Leaf,
) -> JsResult<()> {
    let record = get_iterator(agent, &value)?;
    let mut exhausted = false;
    let result = (|| -> JsResult<()> {
        for element in &array.elements {
            let item = if exhausted {
                JsValue::Undefined
            } else {
                match iterator_step_value(agent, &record)? {
                    Some(v) => v,
                    None => {
                        exhausted = true;
                        JsValue::Undefined
                    }
                }
            };
            if let Some(element) = element {
                let item = apply_default(agent, ctx, item, &element.default)?;
                destructure(agent, ctx, &element.pattern, item, leaf)?;
            }
        }
        if let Some(rest) = &array.rest {
            let mut remaining = Vec::new();
            if !exhausted {
                while let Some(item) = iterator_step_value(agent, &record)? {
                    remaining.push(item);
                }
            }
            let rest_array = JsValue::Object(agent.realm.host.new_array(remaining));
            destructure(agent, ctx, rest, rest_array, leaf)?;
        }
        Ok(())
    })();
    if array.rest.is_some() || exhausted {
        result
    } else {
        iterator_close(agent, &record, result)
    }
}

fn destructure_object(
    agent: &mut Agent,
    ctx: &EvaluationContext,
    object: &ast::ObjectPattern,
    value: JsValue,
    leaf: &Leaf,
) -> JsResult<()> {
    if value.is_nullish() {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            format!("Cannot destructure '{}' as it is {}", describe_value(&value), value.type_of()),
        ));
    }
    let mut seen_keys = Vec::new();
    for property in &object.properties {
        let key = evaluate_property_key_literal(agent, ctx, &property.key)?;
        seen_keys.push(key.clone());
        let item = get_value_property(agent, &value, &key)?;
        let item = apply_default(agent, ctx, item, &property.default)?;
        destructure(agent, ctx, &property.pattern, item, leaf)?;
    }
    if let Some(rest) = &object.rest {
        let rest_object = agent.realm.host.new_ordinary_object();
        if let JsValue::Object(source) = &value {
            for key in source.enumerable_own_string_keys() {
                let prop_key = PropKey::String(key.clone());
                if seen_keys.contains(&prop_key) {
                    continue;
                }
                let v = source.get(agent, &prop_key, JsValue::Object(source.clone()))?;
                rest_object.define_property(prop_key, crate::values::PropertyDescriptor::data(v, true, true, true));
            }
        }
        destructure(agent, ctx, rest, JsValue::Object(rest_object), leaf)?;
    }
    Ok(())
}

fn get_value_property(agent: &mut Agent, value: &JsValue, key: &PropKey) -> JsResult<JsValue> {
    match value {
        JsValue::Object(obj) => obj.get(agent, key, value.clone()),
        _ => Ok(JsValue::Undefined),
    }
}

fn describe_value(value: &JsValue) -> &'static str {
    if value.is_undefined() { "undefined" } else { "null" }
}

/// `let x = v;` / `const x = v;` / parameter binding / `catch (x)`: the
/// binding already exists (uninitialized) in `env`; this fills it in.
pub fn initialize_pattern(agent: &mut Agent, ctx: &EvaluationContext, pattern: &ast::BindingPattern, value: JsValue, env: &Environment) -> JsResult<()> {
    destructure(agent, ctx, pattern, value, &Leaf::Initialize(env))
}

/// `var x = v;`, and the plain destructuring-assignment expression form
/// (`[a, b] = arr`): every leaf is an existing binding, written through the
/// normal reference-resolution path.
pub fn assign_pattern(agent: &mut Agent, ctx: &EvaluationContext, pattern: &ast::BindingPattern, value: JsValue) -> JsResult<()> {
    destructure(agent, ctx, pattern, value, &Leaf::Assign)
}
