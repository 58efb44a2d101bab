use std::sync::Arc;

use crate::ast::{truthy, Expr, ExprKind, Function, List, Symbol};
use crate::error::{LaurelError, TraceFrame};
use crate::runtime::RuntimeCtx;
use crate::scope::{self, Scope, ScopeRef};

/// Evaluates one form against a scope and runtime context. This is the
/// single recursive entry point: the REPL calls it once per parsed
/// top-level form. Errors propagate untouched apart from location and
/// trace decoration.
pub fn eval(rt: &RuntimeCtx, scope: &ScopeRef, expr: &Expr) -> Result<Expr, LaurelError> {
    eval_inner(rt, scope, expr).map_err(|err| err.with_location(expr.location.clone()))
}

/// Evaluates a sequence of top-level forms, returning the last value.
/// Stops at the first failure; the runtime state already mutated by
/// earlier forms stays intact.
pub fn eval_forms(rt: &RuntimeCtx, scope: &ScopeRef, forms: &[Expr]) -> Result<Expr, LaurelError> {
    let mut last = Expr::nil();
    for form in forms {
        last = eval(rt, scope, form)?;
    }
    Ok(last)
}

fn eval_inner(rt: &RuntimeCtx, scope: &ScopeRef, expr: &Expr) -> Result<Expr, LaurelError> {
    match &expr.kind {
        ExprKind::Symbol(sym) => resolve_symbol(rt, scope, sym),
        ExprKind::List(list) if !list.is_empty() => eval_list(rt, scope, list, expr),
        // nil, booleans, numbers, strings, functions and the empty list
        // evaluate to themselves.
        _ => Ok(expr.clone()),
    }
}

/// Bare symbols resolve through the local scope chain first, then the
/// current namespace's globals. Qualified symbols resolve through the
/// named namespace.
fn resolve_symbol(rt: &RuntimeCtx, scope: &ScopeRef, sym: &Symbol) -> Result<Expr, LaurelError> {
    let resolved = match sym.namespace() {
        Some(ns) => rt.lookup_qualified(ns, sym.name()),
        None => scope
            .read()
            .unwrap()
            .lookup(sym.name())
            .or_else(|| rt.lookup_global(sym.name())),
    };
    resolved.ok_or_else(|| LaurelError::unbound_symbol(sym.to_string()))
}

fn eval_list(
    rt: &RuntimeCtx,
    scope: &ScopeRef,
    list: &List,
    form: &Expr,
) -> Result<Expr, LaurelError> {
    if let ExprKind::Symbol(sym) = &list.first().kind {
        if !sym.is_qualified() {
            let args = list.rest();
            match sym.name() {
                "def" => return eval_def(rt, scope, &args, form),
                "fn" => return eval_fn(scope, &args, form),
                "if" => return eval_if(rt, scope, &args, form),
                _ => {}
            }
        }
    }
    apply(rt, scope, list, form)
}

/// `(def name value)` — installs a public global in the current
/// namespace, overwriting silently. The result is the symbol itself.
fn eval_def(
    rt: &RuntimeCtx,
    scope: &ScopeRef,
    args: &List,
    form: &Expr,
) -> Result<Expr, LaurelError> {
    if args.count() != 2 {
        return Err(LaurelError::arity(format!(
            "'def' needs exactly 2 arguments, got {}",
            args.count()
        ))
        .with_location(form.location.clone()));
    }
    let name_expr = args.first();
    let sym = match &name_expr.kind {
        ExprKind::Symbol(sym) => sym.clone(),
        _ => {
            return Err(
                LaurelError::type_mismatch("symbol", name_expr.type_name())
                    .with_location(name_expr.location.clone()),
            )
        }
    };
    if sym.is_qualified() {
        return Err(
            LaurelError::type_mismatch("unqualified symbol", "qualified symbol")
                .with_location(name_expr.location.clone()),
        );
    }
    let mut value = eval(rt, scope, &args.rest().first())?;
    // Anonymous functions pick up the name they are bound to, so traces
    // can report something better than <fn>.
    let renamed = match &value.kind {
        ExprKind::Fn(func) if func.name.is_none() => Some(func.with_name(sym.name())),
        _ => None,
    };
    if let Some(func) = renamed {
        value.kind = ExprKind::Fn(Arc::new(func));
    }
    rt.define_global(sym.name(), value, true);
    Ok(name_expr)
}

/// `(fn (params...) body...)` — builds a closure capturing the current
/// scope by reference. Neither the parameter list nor the body is
/// evaluated here.
fn eval_fn(scope: &ScopeRef, args: &List, form: &Expr) -> Result<Expr, LaurelError> {
    if args.is_empty() {
        return Err(
            LaurelError::arity("'fn' needs at least a parameter list")
                .with_location(form.location.clone()),
        );
    }
    let params_expr = args.first();
    let params = match &params_expr.kind {
        ExprKind::List(list) => list.clone(),
        _ => {
            return Err(
                LaurelError::type_mismatch("list", params_expr.type_name())
                    .with_location(params_expr.location.clone()),
            )
        }
    };
    let func = Function {
        scope: scope.clone(),
        params,
        body: args.rest().to_vec(),
        name: None,
        location: form.location.clone(),
    };
    Ok(Expr::new(
        ExprKind::Fn(Arc::new(func)),
        form.location.clone(),
    ))
}

/// `(if pred then else)` — evaluates the predicate first; exactly one
/// branch is evaluated afterwards, so the untaken branch can never fail
/// or side-effect.
fn eval_if(
    rt: &RuntimeCtx,
    scope: &ScopeRef,
    args: &List,
    form: &Expr,
) -> Result<Expr, LaurelError> {
    if args.count() != 3 {
        return Err(LaurelError::arity(format!(
            "'if' needs exactly 3 arguments, got {}",
            args.count()
        ))
        .with_location(form.location.clone()));
    }
    let pred = eval(rt, scope, &args.first())?;
    if truthy(&pred) {
        eval(rt, scope, &args.rest().first())
    } else {
        eval(rt, scope, &args.rest().rest().first())
    }
}

/// Ordinary function application: head and arguments evaluate
/// left-to-right in the caller's scope, then the body runs in a fresh
/// scope chained to the *captured* scope. A failure escaping the body
/// picks up one trace frame on the way out.
fn apply(rt: &RuntimeCtx, scope: &ScopeRef, list: &List, form: &Expr) -> Result<Expr, LaurelError> {
    let head = list.first();
    let callee = eval(rt, scope, &head)?;
    let func = match &callee.kind {
        ExprKind::Fn(func) => func.clone(),
        _ => {
            return Err(LaurelError::type_mismatch("fn", callee.type_name())
                .with_location(head.location.clone()))
        }
    };
    let mut arg_values = Vec::with_capacity(list.count().saturating_sub(1));
    for arg in list.rest().iter() {
        arg_values.push(eval(rt, scope, arg)?);
    }
    if arg_values.len() != func.params.count() {
        return Err(LaurelError::arity(format!(
            "'{}' expects {} arguments, got {}",
            func.frame_name(),
            func.params.count(),
            arg_values.len()
        ))
        .with_location(form.location.clone()));
    }
    let call_scope = scope::new_ref(Scope::new_child(func.scope.clone()));
    {
        let mut frame = call_scope.write().unwrap();
        for (param, value) in func.params.iter().zip(arg_values) {
            match &param.kind {
                ExprKind::Symbol(sym) if !sym.is_qualified() => {
                    frame.define(sym.name(), value);
                }
                _ => {
                    return Err(LaurelError::type_mismatch(
                        "unqualified symbol",
                        param.type_name(),
                    )
                    .with_location(param.location.clone()))
                }
            }
        }
    }
    let mut last = Expr::nil();
    for body_expr in &func.body {
        last = eval(rt, &call_scope, body_expr).map_err(|err| {
            err.push_frame(TraceFrame {
                function: func.frame_name().to_string(),
                fn_location: func.location.clone(),
                call_site: form.location.clone(),
            })
        })?;
    }
    Ok(last)
}
