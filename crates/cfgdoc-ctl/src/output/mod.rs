//! Terminal lines printed by `cfgdoc` commands.
//!
//! Everything except [`error`] goes to stdout, where the generation summary and the
//! xref index end up. `anstream` drops the `anstyle` colors when stdout is not a
//! terminal, so `cfgdoc generate ... > index.adoc` captures clean AsciiDoc.

mod styles;

use std::io::Write;

pub(crate) use styles::clap_styles;

use styles::{DIM, ERROR, HEADER, LABEL, SUCCESS, WARNING};

/// Generation result line, e.g. document counts.
pub(crate) fn success(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{SUCCESS}✓{SUCCESS:#} {SUCCESS}{msg}{SUCCESS:#}").ok();
}

/// Fatal error chain, on stderr.
pub(crate) fn error(msg: impl std::fmt::Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{ERROR}✗ {msg}{ERROR:#}").ok();
}

/// Non-fatal problem, e.g. a module filter that matched nothing.
pub(crate) fn warning(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{WARNING}! {msg}{WARNING:#}").ok();
}

/// Heading above the index or an inspected type.
pub(crate) fn header(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{HEADER}{msg}{HEADER:#}").ok();
}

/// Indented `Name: value` pair for type details.
pub(crate) fn label(name: impl std::fmt::Display, value: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  {LABEL}{name}:{LABEL:#} {value}").ok();
}

/// Muted placeholder text, e.g. a type without options.
pub(crate) fn dim(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{DIM}{msg}{DIM:#}").ok();
}

/// Bulleted entry, one per resolved option.
pub(crate) fn item(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  • {msg}").ok();
}

pub(crate) fn blank() {
    let mut out = anstream::stdout().lock();
    writeln!(out).ok();
}

/// Unstyled text, used for the index so it can be pasted as-is.
pub(crate) fn plain(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{msg}").ok();
}
