use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ast::Expr;

/// Shared handle to one lexical frame. Closures hold one of these, so a
/// frame lives as long as the longest-lived closure that captured it.
pub type ScopeRef = Arc<RwLock<Scope>>;

/// One lexical frame linked to its enclosing frame. The chain is strictly
/// acyclic: parents exist before their children.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Expr>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn new_child(parent: ScopeRef) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Binds `name` in this frame only, never in an ancestor.
    pub fn define(&mut self, name: &str, value: Expr) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Walks the parent chain outward. Absence is `None`; the evaluator
    /// turns it into an unresolved-symbol error.
    pub fn lookup(&self, name: &str) -> Option<Expr> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.read().unwrap().lookup(name),
            None => None,
        }
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}

pub fn new_ref(scope: Scope) -> ScopeRef {
    Arc::new(RwLock::new(scope))
}
