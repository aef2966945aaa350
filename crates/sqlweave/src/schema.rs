//! Typed table declarations.
//!
//! A [`Schema`] type knows its table name, its columns and their SQL types.
//! It is normally implemented with `#[derive(Schema)]`:
//!
//! ```ignore
//! use sqlweave::Schema;
//!
//! #[derive(Schema)]
//! #[sql(table = "users")]
//! struct User {
//!     #[sql(id)]
//!     id: i64,
//!     #[sql(unique)]
//!     email: String,
//!     nickname: Option<String>,
//! }
//!
//! let users = User::table();
//! let f = User::fields(&users);
//! let q = query.select([&f.email]).from(&users).where_(f.id.eq(1));
//! ```

use crate::expr::Table;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

/// Dialect-independent column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Boolean,
    Text,
    Varchar(u32),
    Bytes,
    Date,
    Timestamp,
    TimestampTz,
    Uuid,
    Json,
    /// Emitted verbatim.
    Custom(String),
}

/// Column definition for CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: SqlType,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    /// Inlined literal default.
    pub default: Option<Value>,
}

impl ColumnDef {
    /// A NOT NULL column.
    pub fn new(name: impl Into<String>, ty: SqlType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            primary_key: false,
            unique: false,
            default: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Rust types with a natural SQL column type.
pub trait SqlTyped {
    fn sql_type() -> SqlType;

    /// Whether the column accepts NULL.
    const NULLABLE: bool = false;
}

macro_rules! impl_sql_typed {
    ($($t:ty => $variant:expr),* $(,)?) => {
        $(impl SqlTyped for $t {
            fn sql_type() -> SqlType {
                $variant
            }
        })*
    };
}

impl_sql_typed!(
    i8 => SqlType::SmallInt,
    i16 => SqlType::SmallInt,
    u8 => SqlType::SmallInt,
    i32 => SqlType::Integer,
    u16 => SqlType::Integer,
    i64 => SqlType::BigInt,
    u32 => SqlType::BigInt,
    f32 => SqlType::Real,
    f64 => SqlType::Double,
    bool => SqlType::Boolean,
    String => SqlType::Text,
    Vec<u8> => SqlType::Bytes,
    NaiveDate => SqlType::Date,
    NaiveDateTime => SqlType::Timestamp,
    DateTime<Utc> => SqlType::TimestampTz,
    Uuid => SqlType::Uuid,
    serde_json::Value => SqlType::Json,
);

impl<T: SqlTyped> SqlTyped for Option<T> {
    fn sql_type() -> SqlType {
        T::sql_type()
    }

    const NULLABLE: bool = true;
}

/// A table declared in Rust.
pub trait Schema {
    const TABLE_NAME: &'static str;
    const SCHEMA_NAME: Option<&'static str> = None;

    /// Typed column accessors bound to one [`Table`] instance.
    type Fields;

    /// A fresh table handle, schema-qualified when `SCHEMA_NAME` is set.
    fn table() -> Table {
        let table = Table::new(Self::TABLE_NAME);
        match Self::SCHEMA_NAME {
            Some(schema) => table.schema(schema),
            None => table,
        }
    }

    /// Column accessors for `table` (which may be aliased).
    fn fields(table: &Table) -> Self::Fields;

    /// Column definitions in declaration order.
    fn column_defs() -> Vec<ColumnDef>;

    /// Column names in declaration order.
    fn column_names() -> Vec<String> {
        Self::column_defs().into_iter().map(|c| c.name).collect()
    }
}
