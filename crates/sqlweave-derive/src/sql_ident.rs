use proc_macro2::Span;
use syn::{Error, LitStr, Result};

/// Same grammar as the runtime identifier check: `[A-Za-z_][A-Za-z0-9_$]*`.
pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub(crate) fn parse_sql_ident(lit: &LitStr, what: &str) -> Result<String> {
    parse_sql_ident_with_span(&lit.value(), lit.span(), what)
}

pub(crate) fn parse_sql_ident_with_span(s: &str, span: Span, what: &str) -> Result<String> {
    match s.trim() {
        "" => Err(Error::new(span, format!("{what} must not be empty"))),
        s if s.contains('.') => Err(Error::new(
            span,
            format!("{what} '{s}' must be a single segment; use `schema = \"...\"` for qualification"),
        )),
        s if !is_valid_sql_ident(s) => Err(Error::new(
            span,
            format!("{what} '{s}' is not a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_$]*)"),
        )),
        s => Ok(s.to_string()),
    }
}
