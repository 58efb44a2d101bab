use std::collections::HashMap;

use crate::ast::Expr;

/// One global binding and its visibility outside the owning namespace.
#[derive(Clone, Debug)]
pub struct GlobalBinding {
    pub value: Expr,
    pub public: bool,
}

/// A named global binding table. Redefinition is last-writer-wins to
/// match interactive use.
#[derive(Clone, Debug)]
pub struct Namespace {
    name: String,
    globals: HashMap<String, GlobalBinding>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            globals: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts or silently overwrites.
    pub fn define_global(&mut self, name: &str, value: Expr, public: bool) {
        self.globals
            .insert(name.to_string(), GlobalBinding { value, public });
    }

    pub fn lookup_global(&self, name: &str) -> Option<Expr> {
        self.globals.get(name).map(|b| b.value.clone())
    }

    /// Lookup restricted to public bindings; used when another namespace
    /// resolves a qualified symbol into this one.
    pub fn lookup_external(&self, name: &str) -> Option<Expr> {
        self.globals
            .get(name)
            .filter(|b| b.public)
            .map(|b| b.value.clone())
    }

    pub fn contains_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, Number};
    use crate::source::Location;

    fn num(n: i64) -> Expr {
        Expr::new(ExprKind::Number(Number::Integer(n)), Location::unknown())
    }

    #[test]
    fn redefinition_is_last_writer_wins() {
        let mut ns = Namespace::new("user");
        ns.define_global("x", num(5), true);
        ns.define_global("x", num(6), true);
        assert_eq!(ns.lookup_global("x"), Some(num(6)));
    }

    #[test]
    fn external_lookup_honors_visibility() {
        let mut ns = Namespace::new("user");
        ns.define_global("pub", num(1), true);
        ns.define_global("priv", num(2), false);
        assert_eq!(ns.lookup_external("pub"), Some(num(1)));
        assert_eq!(ns.lookup_external("priv"), None);
        assert_eq!(ns.lookup_global("priv"), Some(num(2)));
    }
}
