#![allow(dead_code)]

use laurel_core::ast::{Expr, ExprKind, List, Number, Symbol};
use laurel_core::runtime::RuntimeCtx;
use laurel_core::scope::{new_ref, Scope, ScopeRef};
use laurel_core::source::{Location, Source};

pub fn session() -> (RuntimeCtx, ScopeRef) {
    (RuntimeCtx::new(false), new_ref(Scope::default()))
}

pub fn sym(name: &str) -> Expr {
    Expr::new(ExprKind::Symbol(Symbol::new(name)), Location::unknown())
}

pub fn num(n: i64) -> Expr {
    Expr::new(ExprKind::Number(Number::Integer(n)), Location::unknown())
}

pub fn string(s: &str) -> Expr {
    Expr::new(ExprKind::Str(s.to_string()), Location::unknown())
}

pub fn boolean(b: bool) -> Expr {
    Expr::new(ExprKind::Bool(b), Location::unknown())
}

pub fn list(items: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::List(List::from_vec(items)), Location::unknown())
}

pub fn sym_at(source: &Source, name: &str, start: usize, end: usize) -> Expr {
    Expr::new(
        ExprKind::Symbol(Symbol::new(name)),
        Location::new(source.clone(), start, end),
    )
}

pub fn list_at(source: &Source, items: Vec<Expr>, start: usize, end: usize) -> Expr {
    Expr::new(
        ExprKind::List(List::from_vec(items)),
        Location::new(source.clone(), start, end),
    )
}
