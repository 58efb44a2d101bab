use std::fmt;
use std::sync::Arc;

use im::Vector;

use crate::scope::ScopeRef;
use crate::source::Location;

/// A parsed expression: the unit of evaluation. Immutable once built;
/// the reader (external to this crate) attaches the location.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Symbol(Symbol),
    List(List),
    Fn(Arc<Function>),
    Nil,
    Bool(bool),
    Number(Number),
    Str(String),
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn nil() -> Self {
        Self::new(ExprKind::Nil, Location::unknown())
    }

    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::Symbol(_) => "symbol",
            ExprKind::List(_) => "list",
            ExprKind::Fn(_) => "fn",
            ExprKind::Nil => "nil",
            ExprKind::Bool(_) => "bool",
            ExprKind::Number(_) => "number",
            ExprKind::Str(_) => "string",
        }
    }

    /// Human-oriented rendering. Only strings render differently from the
    /// canonical form; every other kind falls back to it.
    pub fn display_string(&self) -> String {
        match &self.kind {
            ExprKind::Str(s) => s.clone(),
            _ => self.to_string(),
        }
    }
}

/// Conditional classification: only `false` and `nil` are falsy.
pub fn truthy(expr: &Expr) -> bool {
    !matches!(expr.kind, ExprKind::Nil | ExprKind::Bool(false))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Symbol(sym) => write!(f, "{}", sym),
            ExprKind::List(list) => {
                write!(f, "(")?;
                for (idx, item) in list.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            ExprKind::Fn(func) => match &func.name {
                Some(name) => write!(f, "#<fn {}>", name),
                None => write!(f, "#<fn>"),
            },
            ExprKind::Nil => write!(f, "nil"),
            ExprKind::Bool(b) => write!(f, "{}", b),
            ExprKind::Number(n) => write!(f, "{}", n),
            ExprKind::Str(s) => write!(f, "\"{}\"", s.escape_default()),
        }
    }
}

/// A possibly namespace-qualified name. Equality is by name and
/// qualifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: String,
    ns: Option<String>,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.split_once('/') {
            Some((ns, rest)) if !ns.is_empty() && !rest.is_empty() => Self {
                name: rest.to_string(),
                ns: Some(ns.to_string()),
            },
            _ => Self { name, ns: None },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    pub fn is_qualified(&self) -> bool {
        self.ns.is_some()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ns {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A finite ordered sequence of expressions. Backed by a persistent
/// vector, so `cons` shares structure with the receiver instead of
/// copying it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List {
    items: Vector<Expr>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Expr>) -> Self {
        Self {
            items: Vector::from(items),
        }
    }

    /// Head of the sequence; nil when empty, never a fault.
    pub fn first(&self) -> Expr {
        self.items.front().cloned().unwrap_or_else(Expr::nil)
    }

    /// Everything after the head; the empty list stays empty.
    pub fn rest(&self) -> List {
        if self.items.is_empty() {
            return self.clone();
        }
        let mut items = self.items.clone();
        items.pop_front();
        Self { items }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Expr> {
        self.items.iter().cloned().collect()
    }

    /// Non-mutating prepend: returns `[expr, ...self]` and leaves the
    /// receiver untouched.
    pub fn cons(&self, expr: Expr) -> List {
        let mut items = self.items.clone();
        items.push_front(expr);
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expr> {
        self.items.iter()
    }
}

/// A closure: formal parameters plus a body, bundled with the scope it
/// was created in. The scope is held by reference so bindings added to it
/// after capture stay visible at call time.
#[derive(Clone)]
pub struct Function {
    pub scope: ScopeRef,
    pub params: List,
    pub body: Vec<Expr>,
    pub name: Option<String>,
    pub location: Location,
}

impl Function {
    pub fn frame_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<fn>")
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        let mut func = self.clone();
        func.name = Some(name.into());
        func
    }
}

// The captured scope can reach back to the function itself, so a derived
// Debug would not terminate on recursive definitions.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("body_len", &self.body.len())
            .finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.scope, &other.scope)
            && self.params == other.params
            && self.body == other.body
            && self.name == other.name
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(x), Number::Integer(y)) => x == y,
            (Number::Float(x), Number::Float(y)) => x == y,
            (Number::Integer(x), Number::Float(y)) => *x as f64 == *y,
            (Number::Float(x), Number::Integer(y)) => *x == *y as f64,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}
