use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, RwLock};

use crate::ast::Expr;
use crate::error::LaurelError;
use crate::namespace::Namespace;

/// Shared handle to the output sink. The printer takes the lock per
/// call; no buffering beyond the sink's own.
pub type OutputRef = Arc<Mutex<dyn Write + Send>>;

pub const DEFAULT_NS: &str = "user";

/// Session-wide state: the namespace table, the current namespace, the
/// debug flag and the output sink. One per evaluation session; owning it
/// explicitly (instead of process globals) keeps sessions independent.
pub struct RuntimeCtx {
    namespaces: RwLock<HashMap<String, Namespace>>,
    current_ns: RwLock<String>,
    debug: bool,
    out: OutputRef,
}

impl RuntimeCtx {
    pub fn new(debug: bool) -> Self {
        Self::with_output(debug, Arc::new(Mutex::new(io::stdout())))
    }

    pub fn with_output(debug: bool, out: OutputRef) -> Self {
        let mut namespaces = HashMap::new();
        namespaces.insert(DEFAULT_NS.to_string(), Namespace::new(DEFAULT_NS));
        Self {
            namespaces: RwLock::new(namespaces),
            current_ns: RwLock::new(DEFAULT_NS.to_string()),
            debug,
            out,
        }
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn output(&self) -> OutputRef {
        self.out.clone()
    }

    /// Namespace names are unique within a runtime.
    pub fn create_namespace(&self, name: &str) -> Result<(), LaurelError> {
        let mut namespaces = self.namespaces.write().unwrap();
        if namespaces.contains_key(name) {
            return Err(LaurelError::message(format!(
                "namespace '{}' already exists",
                name
            )));
        }
        namespaces.insert(name.to_string(), Namespace::new(name));
        Ok(())
    }

    pub fn set_current_ns(&self, name: &str) -> Result<(), LaurelError> {
        if !self.namespaces.read().unwrap().contains_key(name) {
            return Err(LaurelError::message(format!(
                "no such namespace: '{}'",
                name
            )));
        }
        *self.current_ns.write().unwrap() = name.to_string();
        Ok(())
    }

    pub fn current_ns_name(&self) -> String {
        self.current_ns.read().unwrap().clone()
    }

    /// Installs a global into the current namespace, overwriting any
    /// previous binding.
    pub fn define_global(&self, name: &str, value: Expr, public: bool) {
        let current = self.current_ns_name();
        let mut namespaces = self.namespaces.write().unwrap();
        if let Some(ns) = namespaces.get_mut(&current) {
            ns.define_global(name, value, public);
        }
    }

    /// Bare-symbol global lookup in the current namespace.
    pub fn lookup_global(&self, name: &str) -> Option<Expr> {
        let current = self.current_ns_name();
        self.namespaces
            .read()
            .unwrap()
            .get(&current)
            .and_then(|ns| ns.lookup_global(name))
    }

    /// Qualified lookup. Resolving into the current namespace behaves
    /// like a bare global; a foreign namespace only exposes its public
    /// bindings.
    pub fn lookup_qualified(&self, ns_name: &str, name: &str) -> Option<Expr> {
        let namespaces = self.namespaces.read().unwrap();
        let ns = namespaces.get(ns_name)?;
        if ns_name == self.current_ns_name() {
            ns.lookup_global(name)
        } else {
            ns.lookup_external(name)
        }
    }

    pub fn has_global(&self, name: &str) -> bool {
        let current = self.current_ns_name();
        self.namespaces
            .read()
            .unwrap()
            .get(&current)
            .map(|ns| ns.contains_global(name))
            .unwrap_or(false)
    }
}
