pub mod ast;
pub mod error;
pub mod eval;
pub mod namespace;
pub mod printer;
pub mod runtime;
pub mod scope;
pub mod source;

pub use ast::{Expr, ExprKind};
pub use error::LaurelError;
pub use eval::{eval, eval_forms};
pub use runtime::RuntimeCtx;
