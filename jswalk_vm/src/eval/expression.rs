// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [13 ECMAScript Language: Expressions](https://tc39.es/ecma262/#sec-ecmascript-language-expressions)

use std::rc::Rc;

use num_bigint::BigInt;

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::execution_context::EvaluationContext;
use crate::host::Callable;
use crate::reference::Reference;
use crate::values::{JsValue, PropKey};

/// Builds the [`Reference`] an identifier, member access, or private-member
/// access denotes, without reading through it (spec.md §4.C).
pub fn evaluate_reference(agent: &mut Agent, ctx: &EvaluationContext, expr: &ast::Expression) -> JsResult<Reference> {
    match expr {
        ast::Expression::Identifier(id) => {
            let name: Rc<str> = Rc::from(id.name.as_str());
            match ctx.lexical_environment.resolve_binding(agent, &name)? {
                Some(env) => Ok(Reference::Environment { env, name, strict: ctx.is_strict }),
                None => Ok(Reference::Unresolvable { name, strict: ctx.is_strict }),
            }
        }
        ast::Expression::Member(member) => evaluate_member_reference(agent, ctx, member),
        _ => Err(agent.throw_exception(ExceptionType::ReferenceError, "Invalid left-hand side expression")),
    }
}

fn evaluate_member_reference(
    agent: &mut Agent,
    ctx: &EvaluationContext,
    member: &ast::MemberExpression,
) -> JsResult<Reference> {
    if let ast::Expression::Super(_) = member.object.as_ref() {
        let this_value = ctx.lexical_environment.get_this_binding(agent)?;
        let base = ctx.lexical_environment.get_super_base(agent)?;
        let key = evaluate_property_key(agent, ctx, &member.property)?;
        return Ok(Reference::Super { base, key, this_value, strict: ctx.is_strict });
    }
    let base = evaluate_expression(agent, ctx, &member.object)?;
    if let ast::MemberProperty::Private(name) = &member.property {
        let JsValue::Object(base_obj) = base else {
            return Err(agent.throw_exception(ExceptionType::TypeError, "Cannot read private member from a non-object"));
        };
        let private_env = ctx
            .private_environment
            .clone()
            .ok_or_else(|| agent.throw_exception(ExceptionType::SyntaxError, "Private field must be used in an enclosing class"))?;
        return Ok(Reference::PrivateMember {
            base: base_obj,
            env: private_env,
            surface_name: Rc::from(name.as_str()),
        });
    }
    let key = evaluate_property_key(agent, ctx, &member.property)?;
    Ok(Reference::Property { base, key, strict: ctx.is_strict })
}

/// Evaluates one link of an optional chain (`?.`): `Ok(None)` means some
/// earlier `?.` in this same chain already found its base nullish, so
/// everything downstream short-circuits without running (spec.md §4.C
/// "OptionalChain" — a single `?.` on a nullish base stops the *whole*
/// chain, not just that one access).
fn evaluate_chain_subexpr(agent: &mut Agent, ctx: &EvaluationContext, expr: &ast::Expression) -> JsResult<Option<JsValue>> {
    match expr {
        ast::Expression::Member(member) => evaluate_chain_member(agent, ctx, member),
        ast::Expression::Call(call) => evaluate_chain_call(agent, ctx, call),
        other => Ok(Some(evaluate_expression(agent, ctx, other)?)),
    }
}

fn evaluate_chain_member(agent: &mut Agent, ctx: &EvaluationContext, member: &ast::MemberExpression) -> JsResult<Option<JsValue>> {
    if matches!(member.object.as_ref(), ast::Expression::Super(_)) {
        return Ok(Some(evaluate_member_reference(agent, ctx, member)?.get_value(agent)?));
    }
    let Some(base) = evaluate_chain_subexpr(agent, ctx, &member.object)? else {
        return Ok(None);
    };
    if member.optional && base.is_nullish() {
        return Ok(None);
    }
    if let ast::MemberProperty::Private(name) = &member.property {
        let JsValue::Object(base_obj) = &base else {
            return Err(agent.throw_exception(ExceptionType::TypeError, "Cannot read private member from a non-object"));
        };
        let private_env = ctx
            .private_environment
            .clone()
            .ok_or_else(|| agent.throw_exception(ExceptionType::SyntaxError, "Private field must be used in an enclosing class"))?;
        let reference = Reference::PrivateMember {
            base: base_obj.clone(),
            env: private_env,
            surface_name: Rc::from(name.as_str()),
        };
        return Ok(Some(reference.get_value(agent)?));
    }
    let key = evaluate_property_key(agent, ctx, &member.property)?;
    Ok(Some(get_value_of(agent, &base, &key)?))
}

fn get_value_of(agent: &mut Agent, base: &JsValue, key: &PropKey) -> JsResult<JsValue> {
    Reference::Property { base: base.clone(), key: key.clone(), strict: false }.get_value(agent)
}

fn evaluate_chain_call(agent: &mut Agent, ctx: &EvaluationContext, call: &ast::CallExpression) -> JsResult<Option<JsValue>> {
    if matches!(call.callee.as_ref(), ast::Expression::Super(_)) {
        let args = evaluate_arguments(agent, ctx, &call.arguments)?;
        return Ok(Some(crate::function_invocation::evaluate_super_call(agent, ctx, &args)?));
    }
    let Some((function_value, this_value)) = evaluate_chain_callee(agent, ctx, &call.callee)? else {
        return Ok(None);
    };
    if call.optional && function_value.is_nullish() {
        return Ok(None);
    }
    let args = evaluate_arguments(agent, ctx, &call.arguments)?;
    Ok(Some(call_value(agent, function_value, this_value, &args)?))
}

/// Like [`evaluate_callee`], but chain-short-circuit-aware: threads the
/// `None` (already short-circuited) case through instead of evaluating a
/// member access against a nullish base.
fn evaluate_chain_callee(agent: &mut Agent, ctx: &EvaluationContext, callee: &ast::Expression) -> JsResult<Option<(JsValue, JsValue)>> {
    match callee {
        ast::Expression::Member(member) => {
            if matches!(member.object.as_ref(), ast::Expression::Super(_)) {
                return Ok(Some(evaluate_callee(agent, ctx, callee)?));
            }
            let Some(base) = evaluate_chain_subexpr(agent, ctx, &member.object)? else {
                return Ok(None);
            };
            if member.optional && base.is_nullish() {
                return Ok(None);
            }
            if let ast::MemberProperty::Private(name) = &member.property {
                let JsValue::Object(base_obj) = &base else {
                    return Err(agent.throw_exception(ExceptionType::TypeError, "Cannot read private member from a non-object"));
                };
                let private_env = ctx
                    .private_environment
                    .clone()
                    .ok_or_else(|| agent.throw_exception(ExceptionType::SyntaxError, "Private field must be used in an enclosing class"))?;
                let reference = Reference::PrivateMember {
                    base: base_obj.clone(),
                    env: private_env,
                    surface_name: Rc::from(name.as_str()),
                };
                return Ok(Some((reference.get_value(agent)?, base)));
            }
            let key = evaluate_property_key(agent, ctx, &member.property)?;
            Ok(Some((get_value_of(agent, &base, &key)?, base)))
        }
        other => match evaluate_chain_subexpr(agent, ctx, other)? {
            None => Ok(None),
            Some(value) => Ok(Some((value, JsValue::Undefined))),
        },
    }
}

fn evaluate_property_key(agent: &mut Agent, ctx: &EvaluationContext, property: &ast::MemberProperty) -> JsResult<PropKey> {
    match property {
        ast::MemberProperty::Identifier(name) => Ok(PropKey::from(name.as_str())),
        ast::MemberProperty::Private(_) => unreachable!("private members never reach evaluate_property_key"),
        ast::MemberProperty::Computed(expr) => to_property_key(agent, evaluate_expression(agent, ctx, expr)?),
    }
}

pub fn to_property_key(agent: &mut Agent, value: JsValue) -> JsResult<PropKey> {
    match value {
        JsValue::Symbol(sym) => Ok(PropKey::Symbol(sym)),
        other => Ok(PropKey::from(to_js_string(agent, &other)?.as_ref())),
    }
}

/// A deliberately narrow `ToString`: it covers every value shape the
/// evaluator itself produces (spec.md's value domain has no boxed
/// primitives or `Symbol.toPrimitive` objects to call out to).
pub fn to_js_string(agent: &mut Agent, value: &JsValue) -> JsResult<Rc<str>> {
    Ok(match value {
        JsValue::Undefined => Rc::from("undefined"),
        JsValue::Null => Rc::from("null"),
        JsValue::Boolean(b) => Rc::from(if *b { "true" } else { "false" }),
        JsValue::Number(n) => Rc::from(format_number(*n)),
        JsValue::BigInt(b) => Rc::from(b.to_string()),
        JsValue::String(s) => s.clone(),
        JsValue::Symbol(_) => {
            return Err(agent.throw_exception(ExceptionType::TypeError, "Cannot convert a Symbol value to a string"))
        }
        JsValue::Object(_) => Rc::from("[object Object]"),
    })
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        let mut buffer = ryu_js::Buffer::new();
        buffer.format(n).to_string()
    }
}

/// `ToNumber`, narrowed the same way [`to_js_string`] is.
pub fn to_number(agent: &Agent, value: &JsValue) -> JsResult<f64> {
    Ok(match value {
        JsValue::Undefined => f64::NAN,
        JsValue::Null => 0.0,
        JsValue::Boolean(b) => if *b { 1.0 } else { 0.0 },
        JsValue::Number(n) => *n,
        JsValue::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        JsValue::BigInt(_) => {
            return Err(agent.throw_exception(ExceptionType::TypeError, "Cannot convert a BigInt value to a number"))
        }
        JsValue::Symbol(_) => {
            return Err(agent.throw_exception(ExceptionType::TypeError, "Cannot convert a Symbol value to a number"))
        }
        JsValue::Object(_) => f64::NAN,
    })
}

pub fn evaluate_expression(agent: &mut Agent, ctx: &EvaluationContext, expr: &ast::Expression) -> JsResult<JsValue> {
    match expr {
        ast::Expression::Literal(lit) => evaluate_literal(agent, &lit.value),
        ast::Expression::Identifier(_) => evaluate_reference(agent, ctx, expr)?.get_value(agent),
        ast::Expression::This(_) => ctx.lexical_environment.get_this_binding(agent),
        ast::Expression::Super(_) => Err(agent.throw_exception(
            ExceptionType::SyntaxError,
            "'super' keyword is only valid inside a class",
        )),
        ast::Expression::Member(member) => Ok(evaluate_chain_member(agent, ctx, member)?.unwrap_or(JsValue::Undefined)),
        ast::Expression::Call(call) => evaluate_call(agent, ctx, call),
        ast::Expression::New(new_expr) => evaluate_new(agent, ctx, new_expr),
        ast::Expression::Unary(unary) => evaluate_unary(agent, ctx, unary),
        ast::Expression::Update(update) => evaluate_update(agent, ctx, update),
        ast::Expression::Binary(binary) => {
            let left = evaluate_expression(agent, ctx, &binary.left)?;
            let right = evaluate_expression(agent, ctx, &binary.right)?;
            apply_binary_operator(agent, binary.operator, left, right)
        }
        ast::Expression::Logical(logical) => evaluate_logical(agent, ctx, logical),
        ast::Expression::Conditional(cond) => {
            if evaluate_expression(agent, ctx, &cond.test)?.to_boolean() {
                evaluate_expression(agent, ctx, &cond.consequent)
            } else {
                evaluate_expression(agent, ctx, &cond.alternate)
            }
        }
        ast::Expression::Assignment(assign) => evaluate_assignment(agent, ctx, assign),
        ast::Expression::Function(def) => Ok(JsValue::Object(crate::function_invocation::instantiate_ordinary_function(
            agent, ctx, def,
        ))),
        ast::Expression::Arrow(arrow) => Ok(JsValue::Object(crate::function_invocation::instantiate_arrow_function(
            agent, ctx, arrow,
        ))),
        ast::Expression::Class(def) => crate::class_builder::evaluate_class(agent, ctx, def).map(JsValue::Object),
        ast::Expression::Template(template) => evaluate_template(agent, ctx, template),
        ast::Expression::TaggedTemplate(tagged) => evaluate_tagged_template(agent, ctx, tagged),
        ast::Expression::Yield(yield_expr) => crate::generator::evaluate_yield(agent, ctx, yield_expr),
        ast::Expression::Await(await_expr) => crate::generator::evaluate_await(agent, ctx, await_expr),
        ast::Expression::Sequence(seq) => {
            let mut last = JsValue::Undefined;
            for e in &seq.expressions {
                last = evaluate_expression(agent, ctx, e)?;
            }
            Ok(last)
        }
        ast::Expression::Array(array) => evaluate_array(agent, ctx, array),
        ast::Expression::Object(object) => evaluate_object(agent, ctx, object),
    }
}

fn evaluate_literal(agent: &Agent, value: &ast::LiteralValue) -> JsResult<JsValue> {
    Ok(match value {
        ast::LiteralValue::Null => JsValue::Null,
        ast::LiteralValue::Undefined => JsValue::Undefined,
        ast::LiteralValue::Boolean(b) => JsValue::Boolean(*b),
        ast::LiteralValue::Number(n) => JsValue::Number(*n),
        ast::LiteralValue::BigInt(digits) => JsValue::BigInt(Rc::new(
            digits.parse::<BigInt>().unwrap_or_default(),
        )),
        ast::LiteralValue::String(s) => JsValue::string(s.as_str()),
        ast::LiteralValue::RegExp { pattern, flags } => {
            // Regular expression *objects* (with `.test`/`.exec`) are out of
            // scope; a literal still evaluates to a plain object carrying
            // its source so code that only inspects `.source`/`.flags`
            // keeps working.
            let object = agent.realm.host.new_ordinary_object();
            object.define_property(
                PropKey::from("source"),
                crate::values::PropertyDescriptor::data(JsValue::string(pattern.as_str()), false, true, false),
            );
            object.define_property(
                PropKey::from("flags"),
                crate::values::PropertyDescriptor::data(JsValue::string(flags.as_str()), false, true, false),
            );
            JsValue::Object(object)
        }
    })
}

fn evaluate_unary(agent: &mut Agent, ctx: &EvaluationContext, unary: &ast::UnaryExpression) -> JsResult<JsValue> {
    if matches!(unary.operator, ast::UnaryOperator::Delete) {
        return match evaluate_reference(agent, ctx, &unary.argument) {
            Ok(reference) => Ok(JsValue::Boolean(reference.delete(agent)?)),
            Err(_) => {
                evaluate_expression(agent, ctx, &unary.argument)?;
                Ok(JsValue::Boolean(true))
            }
        };
    }
    if matches!(unary.operator, ast::UnaryOperator::TypeOf) {
        if let ast::Expression::Identifier(_) = unary.argument.as_ref() {
            let reference = evaluate_reference(agent, ctx, &unary.argument)?;
            if reference.is_unresolvable() {
                return Ok(JsValue::string("undefined"));
            }
            return Ok(JsValue::string(reference.get_value(agent)?.type_of()));
        }
        let value = evaluate_expression(agent, ctx, &unary.argument)?;
        return Ok(JsValue::string(value.type_of()));
    }
    let value = evaluate_expression(agent, ctx, &unary.argument)?;
    Ok(match unary.operator {
        ast::UnaryOperator::Minus => JsValue::Number(-to_number(agent, &value)?),
        ast::UnaryOperator::Plus => JsValue::Number(to_number(agent, &value)?),
        ast::UnaryOperator::LogicalNot => JsValue::Boolean(!value.to_boolean()),
        ast::UnaryOperator::BitwiseNot => JsValue::Number(!(to_int32(agent, &value)?) as f64),
        ast::UnaryOperator::Void => {
            let _ = value;
            JsValue::Undefined
        }
        ast::UnaryOperator::Delete | ast::UnaryOperator::TypeOf => unreachable!("handled above"),
    })
}

fn evaluate_update(agent: &mut Agent, ctx: &EvaluationContext, update: &ast::UpdateExpression) -> JsResult<JsValue> {
    let reference = evaluate_reference(agent, ctx, &update.argument)?;
    let old_value = to_number(agent, &reference.get_value(agent)?)?;
    let new_value = match update.operator {
        ast::UpdateOperator::Increment => old_value + 1.0,
        ast::UpdateOperator::Decrement => old_value - 1.0,
    };
    reference.put_value(agent, JsValue::Number(new_value))?;
    Ok(JsValue::Number(if update.prefix { new_value } else { old_value }))
}

fn evaluate_logical(agent: &mut Agent, ctx: &EvaluationContext, logical: &ast::LogicalExpression) -> JsResult<JsValue> {
    let left = evaluate_expression(agent, ctx, &logical.left)?;
    match logical.operator {
        ast::LogicalOperator::And => {
            if left.to_boolean() {
                evaluate_expression(agent, ctx, &logical.right)
            } else {
                Ok(left)
            }
        }
        ast::LogicalOperator::Or => {
            if left.to_boolean() {
                Ok(left)
            } else {
                evaluate_expression(agent, ctx, &logical.right)
            }
        }
        ast::LogicalOperator::NullishCoalesce => {
            if left.is_nullish() {
                evaluate_expression(agent, ctx, &logical.right)
            } else {
                Ok(left)
            }
        }
    }
}

fn to_int32(agent: &Agent, value: &JsValue) -> JsResult<i32> {
    let n = to_number(agent, value)?;
    if !n.is_finite() {
        return Ok(0);
    }
    Ok(n as i64 as i32)
}

fn to_uint32(agent: &Agent, value: &JsValue) -> JsResult<u32> {
    Ok(to_int32(agent, value)? as u32)
}

pub fn apply_binary_operator(agent: &mut Agent, op: ast::BinaryOperator, left: JsValue, right: JsValue) -> JsResult<JsValue> {
    use ast::BinaryOperator as Op;
    Ok(match op {
        Op::Addition => match (&left, &right) {
            (JsValue::String(_), _) | (_, JsValue::String(_)) => {
                let mut s = to_js_string(agent, &left)?.to_string();
                s.push_str(&to_js_string(agent, &right)?);
                JsValue::string(s)
            }
            (JsValue::BigInt(a), JsValue::BigInt(b)) => JsValue::BigInt(Rc::new(a.as_ref() + b.as_ref())),
            _ => JsValue::Number(to_number(agent, &left)? + to_number(agent, &right)?),
        },
        Op::Subtraction => numeric_op(agent, left, right, |a, b| a - b, |a, b| a - b)?,
        Op::Multiplication => numeric_op(agent, left, right, |a, b| a * b, |a, b| a * b)?,
        Op::Division => JsValue::Number(to_number(agent, &left)? / to_number(agent, &right)?),
        Op::Remainder => JsValue::Number(to_number(agent, &left)? % to_number(agent, &right)?),
        Op::Exponential => JsValue::Number(to_number(agent, &left)?.powf(to_number(agent, &right)?)),
        Op::ShiftLeft => JsValue::Number(((to_int32(agent, &left)?) << (to_uint32(agent, &right)? & 31)) as f64),
        Op::ShiftRight => JsValue::Number(((to_int32(agent, &left)?) >> (to_uint32(agent, &right)? & 31)) as f64),
        Op::ShiftRightZeroFill => JsValue::Number(((to_uint32(agent, &left)?) >> (to_uint32(agent, &right)? & 31)) as f64),
        Op::BitwiseAnd => JsValue::Number(((to_int32(agent, &left)?) & (to_int32(agent, &right)?)) as f64),
        Op::BitwiseOr => JsValue::Number(((to_int32(agent, &left)?) | (to_int32(agent, &right)?)) as f64),
        Op::BitwiseXor => JsValue::Number(((to_int32(agent, &left)?) ^ (to_int32(agent, &right)?)) as f64),
        Op::LessThan => JsValue::Boolean(compare(agent, &left, &right)? == Some(std::cmp::Ordering::Less)),
        Op::LessEqualThan => JsValue::Boolean(matches!(
            compare(agent, &left, &right)?,
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        )),
        Op::GreaterThan => JsValue::Boolean(compare(agent, &left, &right)? == Some(std::cmp::Ordering::Greater)),
        Op::GreaterEqualThan => JsValue::Boolean(matches!(
            compare(agent, &left, &right)?,
            Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
        )),
        Op::Equality => JsValue::Boolean(loose_equals(agent, &left, &right)?),
        Op::Inequality => JsValue::Boolean(!loose_equals(agent, &left, &right)?),
        Op::StrictEquality => JsValue::Boolean(left.strict_equals(&right)),
        Op::StrictInequality => JsValue::Boolean(!left.strict_equals(&right)),
        Op::Instanceof => JsValue::Boolean(instance_of(agent, &left, &right)?),
        Op::In => match &right {
            JsValue::Object(obj) => {
                let key = to_property_key(agent, left)?;
                JsValue::Boolean(obj.has_property(&key))
            }
            _ => return Err(agent.throw_exception(ExceptionType::TypeError, "Cannot use 'in' operator on a non-object")),
        },
    })
}

fn numeric_op(
    agent: &Agent,
    left: JsValue,
    right: JsValue,
    number_op: impl Fn(f64, f64) -> f64,
    bigint_op: impl Fn(&BigInt, &BigInt) -> BigInt,
) -> JsResult<JsValue> {
    Ok(match (&left, &right) {
        (JsValue::BigInt(a), JsValue::BigInt(b)) => JsValue::BigInt(Rc::new(bigint_op(a, b))),
        _ => JsValue::Number(number_op(to_number(agent, &left)?, to_number(agent, &right)?)),
    })
}

fn compare(agent: &Agent, left: &JsValue, right: &JsValue) -> JsResult<Option<std::cmp::Ordering>> {
    if let (JsValue::String(a), JsValue::String(b)) = (left, right) {
        return Ok(a.partial_cmp(b));
    }
    let a = to_number(agent, left)?;
    let b = to_number(agent, right)?;
    Ok(a.partial_cmp(&b))
}

fn loose_equals(agent: &Agent, left: &JsValue, right: &JsValue) -> JsResult<bool> {
    Ok(match (left, right) {
        (JsValue::Undefined | JsValue::Null, JsValue::Undefined | JsValue::Null) => true,
        (JsValue::Number(_), JsValue::Number(_))
        | (JsValue::String(_), JsValue::String(_))
        | (JsValue::Boolean(_), JsValue::Boolean(_))
        | (JsValue::Object(_), JsValue::Object(_))
        | (JsValue::Symbol(_), JsValue::Symbol(_)) => left.strict_equals(right),
        (JsValue::Number(_), JsValue::String(_)) | (JsValue::String(_), JsValue::Number(_)) => {
            (to_number(agent, left)?).to_bits() == (to_number(agent, right)?).to_bits()
                || to_number(agent, left)? == to_number(agent, right)?
        }
        (JsValue::Boolean(_), _) => loose_equals(agent, &JsValue::Number(to_number(agent, left)?), right)?,
        (_, JsValue::Boolean(_)) => loose_equals(agent, left, &JsValue::Number(to_number(agent, right)?))?,
        _ => false,
    })
}

fn instance_of(agent: &mut Agent, left: &JsValue, right: &JsValue) -> JsResult<bool> {
    let JsValue::Object(ctor) = right else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Right-hand side of 'instanceof' is not callable"));
    };
    if !ctor.is_callable() {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Right-hand side of 'instanceof' is not callable"));
    }
    let JsValue::Object(instance) = left else { return Ok(false) };
    let target_prototype = ctor.get(agent, &PropKey::from("prototype"), JsValue::Object(ctor.clone()))?;
    let JsValue::Object(target_prototype) = target_prototype else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Function has non-object prototype in instanceof check"));
    };
    let mut current = instance.prototype();
    while let Some(proto) = current {
        if proto == target_prototype {
            return Ok(true);
        }
        current = proto.prototype();
    }
    Ok(false)
}

fn evaluate_array(agent: &mut Agent, ctx: &EvaluationContext, array: &ast::ArrayExpression) -> JsResult<JsValue> {
    let mut elements = Vec::with_capacity(array.elements.len());
    for element in &array.elements {
        match element {
            None => elements.push(JsValue::Undefined),
            Some(ast::ArrayElement::Normal(expr)) => elements.push(evaluate_expression(agent, ctx, expr)?),
            Some(ast::ArrayElement::Spread(expr)) => {
                let value = evaluate_expression(agent, ctx, expr)?;
                elements.extend(crate::eval::iterator::iterator_to_vec(agent, &value)?);
            }
        }
    }
    Ok(JsValue::Object(agent.realm.host.new_array(elements)))
}

fn evaluate_object(agent: &mut Agent, ctx: &EvaluationContext, object: &ast::ObjectExpression) -> JsResult<JsValue> {
    let result = agent.realm.host.new_ordinary_object();
    for node in &object.properties {
        match node {
            ast::ObjectPropertyNode::Spread(expr) => {
                let value = evaluate_expression(agent, ctx, expr)?;
                if let JsValue::Object(source) = value {
                    for key in source.enumerable_own_string_keys() {
                        let prop_key = PropKey::String(key.clone());
                        let v = source.get(agent, &prop_key, JsValue::Object(source.clone()))?;
                        result.define_property(prop_key, crate::values::PropertyDescriptor::data(v, true, true, true));
                    }
                }
            }
            ast::ObjectPropertyNode::Property(prop) => {
                let key = evaluate_property_key_literal(agent, ctx, &prop.key)?;
                match prop.kind {
                    ast::ObjectPropertyKind::Init => {
                        let value = evaluate_expression(agent, ctx, &prop.value)?;
                        if is_anonymous_function_like(&prop.value) {
                            if let (PropKey::String(name), JsValue::Object(obj)) = (&key, &value) {
                                crate::function_invocation::set_name_if_anonymous(obj, name);
                            }
                        }
                        result.define_property(key, crate::values::PropertyDescriptor::data(value, true, true, true));
                    }
                    ast::ObjectPropertyKind::Get | ast::ObjectPropertyKind::Set => {
                        let accessor_value = evaluate_expression(agent, ctx, &prop.value)?;
                        let JsValue::Object(accessor) = accessor_value else {
                            return Err(agent.throw_exception(ExceptionType::TypeError, "Accessor body did not evaluate to a function"));
                        };
                        let existing = result.get_own_property(&key);
                        let (get, set) = match existing.map(|d| d.kind) {
                            Some(crate::values::PropertyKind::Accessor { get, set }) => (get, set),
                            _ => (None, None),
                        };
                        let (get, set) = if prop.kind == ast::ObjectPropertyKind::Get {
                            (Some(accessor), set)
                        } else {
                            (get, Some(accessor))
                        };
                        result.define_property(
                            key,
                            crate::values::PropertyDescriptor {
                                kind: crate::values::PropertyKind::Accessor { get, set },
                                enumerable: true,
                                configurable: true,
                            },
                        );
                    }
                }
            }
        }
    }
    Ok(JsValue::Object(result))
}

fn is_anonymous_function_like(expr: &ast::Expression) -> bool {
    matches!(
        expr,
        ast::Expression::Function(ast::FunctionDefinition { name: None, .. }) | ast::Expression::Arrow(_)
    )
}

pub(crate) fn evaluate_property_key_literal(agent: &mut Agent, ctx: &EvaluationContext, key: &ast::PropertyKey) -> JsResult<PropKey> {
    match key {
        ast::PropertyKey::Identifier(name) | ast::PropertyKey::String(name) => Ok(PropKey::from(name.as_str())),
        ast::PropertyKey::Number(n) => Ok(PropKey::from(format_number(*n))),
        ast::PropertyKey::Private(_) => unreachable!("object literals don't carry private keys"),
        ast::PropertyKey::Computed(expr) => to_property_key(agent, evaluate_expression(agent, ctx, expr)?),
    }
}

fn evaluate_template(agent: &mut Agent, ctx: &EvaluationContext, template: &ast::TemplateLiteral) -> JsResult<JsValue> {
    let mut result = String::new();
    for (index, quasi) in template.quasis.iter().enumerate() {
        result.push_str(quasi.cooked.as_deref().unwrap_or(&quasi.raw));
        if let Some(expr) = template.expressions.get(index) {
            let value = evaluate_expression(agent, ctx, expr)?;
            result.push_str(&to_js_string(agent, &value)?);
        }
    }
    Ok(JsValue::string(result))
}

fn evaluate_tagged_template(
    agent: &mut Agent,
    ctx: &EvaluationContext,
    tagged: &ast::TaggedTemplateExpression,
) -> JsResult<JsValue> {
    let (tag_function, this_value) = evaluate_callee(agent, ctx, &tagged.tag)?;
    let strings: Vec<JsValue> = tagged
        .quasi
        .quasis
        .iter()
        .map(|q| JsValue::string(q.cooked.clone().unwrap_or_else(|| q.raw.clone())))
        .collect();
    let raw: Vec<JsValue> = tagged.quasi.quasis.iter().map(|q| JsValue::string(q.raw.as_str())).collect();
    let strings_array = agent.realm.host.new_array(strings);
    let raw_array = agent.realm.host.new_array(raw);
    strings_array.define_property(
        PropKey::from("raw"),
        crate::values::PropertyDescriptor::data(JsValue::Object(raw_array), false, false, false),
    );
    let mut args = vec![JsValue::Object(strings_array)];
    for expr in &tagged.quasi.expressions {
        args.push(evaluate_expression(agent, ctx, expr)?);
    }
    call_value(agent, tag_function, this_value, &args)
}

fn evaluate_new(agent: &mut Agent, ctx: &EvaluationContext, new_expr: &ast::NewExpression) -> JsResult<JsValue> {
    let callee = evaluate_expression(agent, ctx, &new_expr.callee)?;
    let JsValue::Object(constructor) = callee else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "not a constructor"));
    };
    let args = evaluate_arguments(agent, ctx, &new_expr.arguments)?;
    crate::function_invocation::construct(agent, &constructor, &args, &constructor)
}

/// Resolves a call's callee to `(function_value, this_value)`, binding
/// `this` to the member access's base for method calls (spec.md §4.J).
fn evaluate_callee(agent: &mut Agent, ctx: &EvaluationContext, callee: &ast::Expression) -> JsResult<(JsValue, JsValue)> {
    match callee {
        ast::Expression::Member(member) => {
            let reference = evaluate_member_reference(agent, ctx, member)?;
            let this_value = match &reference {
                Reference::Super { this_value, .. } => this_value.clone(),
                Reference::Property { base, .. } => base.clone(),
                Reference::PrivateMember { base, .. } => JsValue::Object(base.clone()),
                _ => JsValue::Undefined,
            };
            Ok((reference.get_value(agent)?, this_value))
        }
        other => Ok((evaluate_expression(agent, ctx, other)?, JsValue::Undefined)),
    }
}

fn evaluate_arguments(agent: &mut Agent, ctx: &EvaluationContext, arguments: &[ast::Argument]) -> JsResult<Vec<JsValue>> {
    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        match argument {
            ast::Argument::Normal(expr) => args.push(evaluate_expression(agent, ctx, expr)?),
            ast::Argument::Spread(expr) => {
                let value = evaluate_expression(agent, ctx, expr)?;
                args.extend(crate::eval::iterator::iterator_to_vec(agent, &value)?);
            }
        }
    }
    Ok(args)
}

fn call_value(agent: &mut Agent, function_value: JsValue, this_value: JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let JsValue::Object(function) = function_value else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "value is not a function"));
    };
    if !function.is_callable() {
        return Err(agent.throw_exception(ExceptionType::TypeError, "value is not a function"));
    }
    function.call(agent, this_value, args)
}

fn evaluate_call(agent: &mut Agent, ctx: &EvaluationContext, call: &ast::CallExpression) -> JsResult<JsValue> {
    Ok(evaluate_chain_call(agent, ctx, call)?.unwrap_or(JsValue::Undefined))
}

fn evaluate_assignment(agent: &mut Agent, ctx: &EvaluationContext, assign: &ast::AssignmentExpression) -> JsResult<JsValue> {
    if matches!(assign.operator, ast::AssignmentOperator::Assign) {
        if let ast::AssignmentTarget::Pattern(pattern) = &assign.target {
            let value = evaluate_expression(agent, ctx, &assign.value)?;
            crate::binding_patterns::assign_pattern(agent, ctx, pattern, value.clone())?;
            return Ok(value);
        }
    }
    let ast::AssignmentTarget::Simple(target_expr) = &assign.target else {
        return Err(agent.throw_exception(ExceptionType::SyntaxError, "Invalid destructuring assignment target"));
    };
    let reference = evaluate_reference(agent, ctx, target_expr)?;

    if let Some(logical_op) = logical_assignment_op(assign.operator) {
        let current = reference.get_value(agent)?;
        let should_assign = match logical_op {
            ast::LogicalOperator::And => current.to_boolean(),
            ast::LogicalOperator::Or => !current.to_boolean(),
            ast::LogicalOperator::NullishCoalesce => current.is_nullish(),
        };
        if !should_assign {
            return Ok(current);
        }
        let value = evaluate_expression(agent, ctx, &assign.value)?;
        reference.put_value(agent, value.clone())?;
        return Ok(value);
    }

    let value = if matches!(assign.operator, ast::AssignmentOperator::Assign) {
        evaluate_expression(agent, ctx, &assign.value)?
    } else {
        let current = reference.get_value(agent)?;
        let operand = evaluate_expression(agent, ctx, &assign.value)?;
        let binary_op = assign
            .operator
            .as_binary_operator()
            .expect("non-logical compound assignment operators map to a binary operator");
        apply_binary_operator(agent, binary_op, current, operand)?
    };
    reference.put_value(agent, value.clone())?;
    Ok(value)
}

fn logical_assignment_op(op: ast::AssignmentOperator) -> Option<ast::LogicalOperator> {
    if op.is_logical() {
        Some(match op {
            ast::AssignmentOperator::LogicalAnd => ast::LogicalOperator::And,
            ast::AssignmentOperator::LogicalOr => ast::LogicalOperator::Or,
            ast::AssignmentOperator::NullishCoalesce => ast::LogicalOperator::NullishCoalesce,
            _ => unreachable!(),
        })
    } else {
        None
    }
}
