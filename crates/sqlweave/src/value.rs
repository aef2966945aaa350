//! Typed literal values bound as statement parameters.

use crate::dialect::{Dialect, Vendor};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// An opaque typed literal.
///
/// The compiler never interprets values: it only moves them into the parameter
/// list in emission order. Conversion to a driver's wire format happens in the
/// driver adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Uuid(Uuid),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name, used in logs and decode errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
            Value::TimestampTz(_) => "timestamptz",
            Value::Uuid(_) => "uuid",
            Value::Json(_) => "json",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Render as an inline SQL literal.
    ///
    /// Only used where parameters are not accepted (DDL column defaults).
    pub fn to_sql_inline(&self, dialect: &Dialect) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => {
                let numeric = matches!(dialect.vendor, Vendor::MsSql | Vendor::Oracle);
                let text = match (numeric, *b) {
                    (true, true) => "1",
                    (true, false) => "0",
                    (false, true) => "TRUE",
                    (false, false) => "FALSE",
                };
                text.to_string()
            }
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => quote_literal(s),
            Value::Bytes(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                match dialect.vendor {
                    Vendor::Postgres => format!("'\\x{hex}'"),
                    Vendor::MsSql => format!("0x{hex}"),
                    _ => format!("X'{hex}'"),
                }
            }
            Value::Date(d) => quote_literal(&d.format("%Y-%m-%d").to_string()),
            Value::Timestamp(ts) => quote_literal(&ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            Value::TimestampTz(ts) => quote_literal(&ts.to_rfc3339()),
            Value::Uuid(u) => quote_literal(&u.to_string()),
            Value::Json(j) => quote_literal(&j.to_string()),
        }
    }
}

/// Quote a string as a SQL literal, doubling single quotes.
pub(crate) fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::TimestampTz(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MSSQL, MYSQL, POSTGRES};

    #[test]
    fn conversions() {
        assert_eq!(Value::from(18), Value::Int(18));
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from("a"), Value::Text("a".into()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Bytes(vec![1, 2]));
    }

    #[test]
    fn inline_literals() {
        assert_eq!(Value::from("it's").to_sql_inline(&POSTGRES), "'it''s'");
        assert_eq!(Value::Bool(true).to_sql_inline(&POSTGRES), "TRUE");
        assert_eq!(Value::Bool(true).to_sql_inline(&MSSQL), "1");
        assert_eq!(Value::Bytes(vec![0xde, 0xad]).to_sql_inline(&POSTGRES), "'\\xDEAD'");
        assert_eq!(Value::Bytes(vec![0xde, 0xad]).to_sql_inline(&MYSQL), "X'DEAD'");
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Value::from(day).to_sql_inline(&MYSQL), "'2024-02-29'");
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::Int(1), Value::Null, "x".into()]).unwrap();
        assert_eq!(json, r#"[1,null,"x"]"#);
    }
}
