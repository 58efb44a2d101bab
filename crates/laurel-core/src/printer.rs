use std::io;

use crate::ast::Expr;
use crate::error::{format_error, LaurelError};
use crate::runtime::RuntimeCtx;

/// Canonical (read-back) form, space-joined.
pub fn to_repr_string(exprs: &[Expr]) -> String {
    exprs
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human display form, space-joined; kinds without a distinct display
/// rendering fall back to the canonical form.
pub fn to_display_string(exprs: &[Expr]) -> String {
    exprs
        .iter()
        .map(|e| e.display_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Representation form, no trailing newline.
pub fn pr(rt: &RuntimeCtx, exprs: &[Expr]) -> io::Result<()> {
    write_out(rt, &to_repr_string(exprs))
}

/// Representation form with a trailing newline.
pub fn prn(rt: &RuntimeCtx, exprs: &[Expr]) -> io::Result<()> {
    write_line(rt, &to_repr_string(exprs))
}

/// Display form, no trailing newline.
pub fn print(rt: &RuntimeCtx, exprs: &[Expr]) -> io::Result<()> {
    write_out(rt, &to_display_string(exprs))
}

/// Display form with a trailing newline.
pub fn println(rt: &RuntimeCtx, exprs: &[Expr]) -> io::Result<()> {
    write_line(rt, &to_display_string(exprs))
}

/// Writes the error and its call-stack trace to the runtime's sink. The
/// REPL calls this and moves on to the next form.
pub fn print_error(rt: &RuntimeCtx, err: &LaurelError) -> io::Result<()> {
    let out = rt.output();
    let mut sink = out.lock().unwrap();
    for line in format_error(err) {
        writeln!(sink, "{}", line)?;
    }
    Ok(())
}

fn write_out(rt: &RuntimeCtx, text: &str) -> io::Result<()> {
    let out = rt.output();
    let mut sink = out.lock().unwrap();
    write!(sink, "{}", text)
}

fn write_line(rt: &RuntimeCtx, text: &str) -> io::Result<()> {
    let out = rt.output();
    let mut sink = out.lock().unwrap();
    writeln!(sink, "{}", text)
}
