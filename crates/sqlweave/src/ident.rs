//! Dotted SQL identifier parsing.
//!
//! [`Ident`] splits strings such as `public.users` or `"CamelCase"."UserTable"`
//! into segments. Rendering always quotes every segment independently with the
//! target dialect's quote characters, never the whole dotted path as one token.
//!
//! - Unquoted parts are validated against: `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts (`"..."`) allow any characters except NUL and escape `"` as `""`

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};

/// A dotted identifier (e.g. `schema.table.column`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    parts: Vec<String>,
}

impl Ident {
    /// Parse an identifier string, supporting dotted and quoted forms.
    ///
    /// - Dotted: `schema.table`
    /// - Quoted: `"CamelCase"."UserTable"`
    /// - Mixed: `public."UserTable".id`
    pub fn parse(s: &str) -> SqlResult<Self> {
        if s.is_empty() {
            return Err(SqlError::invalid_identifier("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(SqlError::invalid_identifier(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') => {
                        if chars.peek().is_none() {
                            return Err(SqlError::invalid_identifier("Trailing '.' in identifier"));
                        }
                    }
                    Some(c) => {
                        return Err(SqlError::invalid_identifier(format!(
                            "Expected '.' between identifier parts, got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            if chars.peek() == Some(&'"') {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('"') => {
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                name.push('"');
                            } else {
                                break;
                            }
                        }
                        Some(c) => name.push(c),
                        None => {
                            return Err(SqlError::invalid_identifier(
                                "Unclosed quoted identifier",
                            ));
                        }
                    }
                }
                if name.is_empty() {
                    return Err(SqlError::invalid_identifier("Empty quoted identifier"));
                }
                parts.push(name);
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                if !is_ident_char(c, name.is_empty()) {
                    return Err(SqlError::invalid_identifier(format!(
                        "Invalid character in identifier: '{c}'"
                    )));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(SqlError::invalid_identifier("Empty identifier segment"));
            }
            parts.push(name);
        }

        Ok(Self { parts })
    }

    /// Segments in order.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The last segment (the object name).
    pub fn name(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or_default()
    }

    /// Segments before the last one. Empty for a single-segment name.
    pub fn qualifier(&self) -> &[String] {
        self.parts.split_last().map_or(&[], |(_, rest)| rest)
    }

    /// Render with every segment quoted for the dialect.
    pub fn to_sql(&self, dialect: &Dialect) -> String {
        let mut out = String::new();
        self.write_sql(dialect, &mut out);
        out
    }

    pub(crate) fn write_sql(&self, dialect: &Dialect, out: &mut String) {
        dialect.write_path(out, self.parts.iter().map(String::as_str));
    }
}

fn is_ident_char(c: char, first: bool) -> bool {
    if first {
        c == '_' || c.is_ascii_alphabetic()
    } else {
        c == '_' || c == '$' || c.is_ascii_alphanumeric()
    }
}

/// Check a single segment against the unquoted identifier grammar.
pub fn validate_plain(name: &str) -> SqlResult<()> {
    let mut chars = name.chars();
    match chars.next() {
        None => Err(SqlError::invalid_identifier("Identifier cannot be empty")),
        Some(c) if !is_ident_char(c, true) => Err(SqlError::invalid_identifier(format!(
            "Invalid identifier start character in '{name}'"
        ))),
        Some(_) => match chars.find(|&c| !is_ident_char(c, false)) {
            Some(c) => Err(SqlError::invalid_identifier(format!(
                "Invalid character '{c}' in '{name}'"
            ))),
            None => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MSSQL, MYSQL, POSTGRES};

    #[test]
    fn ident_simple() {
        let ident = Ident::parse("users").unwrap();
        assert_eq!(ident.to_sql(&POSTGRES), r#""users""#);
        assert!(ident.qualifier().is_empty());
    }

    #[test]
    fn ident_dotted_quotes_each_segment() {
        let ident = Ident::parse("public.users").unwrap();
        assert_eq!(ident.to_sql(&POSTGRES), r#""public"."users""#);
        assert_eq!(ident.to_sql(&MYSQL), "`public`.`users`");
        assert_eq!(ident.to_sql(&MSSQL), "[public].[users]");
        assert_eq!(ident.name(), "users");
        assert_eq!(ident.qualifier(), ["public"]);
    }

    #[test]
    fn ident_quoted_with_escape() {
        let ident = Ident::parse(r#""has""quote""#).unwrap();
        assert_eq!(ident.parts(), ["has\"quote"]);
        assert_eq!(ident.to_sql(&POSTGRES), r#""has""quote""#);
    }

    #[test]
    fn ident_mixed_quoted_unquoted() {
        let ident = Ident::parse(r#"public."UserTable".id"#).unwrap();
        assert_eq!(ident.parts(), ["public", "UserTable", "id"]);
        assert_eq!(ident.qualifier(), ["public", "UserTable"]);
    }

    #[test]
    fn ident_with_dollar() {
        assert!(Ident::parse("my_var$1").is_ok());
    }

    #[test]
    fn ident_rejects_bad_input() {
        assert!(Ident::parse("").is_err());
        assert!(Ident::parse("1table").is_err());
        assert!(Ident::parse("my table").is_err());
        assert!(Ident::parse("schema..table").is_err());
        assert!(Ident::parse("schema.").is_err());
        assert!(Ident::parse(r#""unclosed"#).is_err());
    }

    #[test]
    fn validate_plain_segments() {
        assert!(validate_plain("created_at").is_ok());
        assert!(validate_plain("_x$1").is_ok());
        assert!(validate_plain("").is_err());
        assert!(validate_plain("9lives").is_err());
        assert!(validate_plain("drop table").is_err());
    }
}
