//! Static per-vendor rendering configuration.
//!
//! A [`Dialect`] tells the compiler how to quote identifiers, which placeholder
//! token to emit for each bound value, and which dialect-restricted constructs
//! it may emit. Every descriptor is a `static`, looked up with
//! [`Dialect::for_vendor`].
//!
//! ```ignore
//! use sqlweave::{Dialect, Vendor};
//!
//! let pg = Dialect::for_vendor(Vendor::Postgres);
//! assert_eq!(pg.placeholder(2), "$2");
//! assert_eq!(pg.quote_ident("users"), r#""users""#);
//! ```

use crate::error::{SqlError, SqlResult};
use crate::schema::SqlType;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Supported database vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
    MySql,
    MariaDb,
    #[serde(alias = "sqlite3")]
    Sqlite,
    #[serde(alias = "sqlserver")]
    MsSql,
    Oracle,
    Athena,
    Presto,
}

impl Vendor {
    /// All vendors, in registry order.
    pub const ALL: [Vendor; 8] = [
        Vendor::Postgres,
        Vendor::MySql,
        Vendor::MariaDb,
        Vendor::Sqlite,
        Vendor::MsSql,
        Vendor::Oracle,
        Vendor::Athena,
        Vendor::Presto,
    ];

    /// Engine name as used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Vendor::Postgres => "postgres",
            Vendor::MySql => "mysql",
            Vendor::MariaDb => "mariadb",
            Vendor::Sqlite => "sqlite",
            Vendor::MsSql => "mssql",
            Vendor::Oracle => "oracle",
            Vendor::Athena => "athena",
            Vendor::Presto => "presto",
        }
    }

    /// The static dialect descriptor for this vendor.
    pub fn dialect(self) -> &'static Dialect {
        Dialect::for_vendor(self)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vendor {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Vendor::Postgres),
            "mysql" => Ok(Vendor::MySql),
            "mariadb" => Ok(Vendor::MariaDb),
            "sqlite" | "sqlite3" => Ok(Vendor::Sqlite),
            "mssql" | "sqlserver" => Ok(Vendor::MsSql),
            "oracle" => Ok(Vendor::Oracle),
            "athena" => Ok(Vendor::Athena),
            "presto" => Ok(Vendor::Presto),
            other => Err(SqlError::UnknownVendor(other.to_string())),
        }
    }
}

/// Dialect-restricted syntax gated by feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    ILike,
    Returning,
    DistinctOn,
    FullJoin,
    RightJoin,
    AggregateFilter,
    NullsOrdering,
    NamedWindow,
    Upsert,
    JsonObject,
    IfNotExists,
    DropIfExists,
    DropCascade,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feature::ILike => "ILIKE",
            Feature::Returning => "RETURNING",
            Feature::DistinctOn => "DISTINCT ON",
            Feature::FullJoin => "FULL JOIN",
            Feature::RightJoin => "RIGHT JOIN",
            Feature::AggregateFilter => "aggregate FILTER",
            Feature::NullsOrdering => "NULLS FIRST/LAST",
            Feature::NamedWindow => "WINDOW clause",
            Feature::Upsert => "upsert",
            Feature::JsonObject => "JSON object builder",
            Feature::IfNotExists => "CREATE TABLE IF NOT EXISTS",
            Feature::DropIfExists => "DROP TABLE IF EXISTS",
            Feature::DropCascade => "DROP TABLE CASCADE",
        })
    }
}

/// Placeholder token generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Prefix followed by the 1-based position (`$1`, `@P1`, `:1`).
    Numbered(&'static str),
    /// The same token for every position (`?`, `%s`).
    Fixed(&'static str),
}

impl Placeholder {
    /// Token for the 1-based parameter position.
    pub fn token(&self, index: usize) -> Cow<'static, str> {
        match self {
            Placeholder::Numbered(prefix) => Cow::Owned(format!("{prefix}{index}")),
            Placeholder::Fixed(token) => Cow::Borrowed(token),
        }
    }
}

/// How OFFSET is handled when no LIMIT is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BareOffset {
    Allowed,
    /// Emit `LIMIT <sentinel>` before the OFFSET.
    LimitSentinel(&'static str),
    Forbidden,
}

/// Row-limiting syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `LIMIT n OFFSET m`
    LimitOffset { bare_offset: BareOffset },
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch { requires_order_by: bool },
    /// `OFFSET m LIMIT n`
    OffsetLimit,
}

/// INSERT conflict-handling syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStyle {
    /// `ON CONFLICT (...) DO NOTHING | DO UPDATE SET ...`
    OnConflict,
    /// `INSERT IGNORE` / `ON DUPLICATE KEY UPDATE ...`
    OnDuplicateKey,
    Unsupported,
}

/// JSON path accessor rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonPathStyle {
    /// `col->'a'->>'b'`
    Arrows,
    /// `<function>(col, '$.a.b')`
    PathFunction(&'static str),
}

/// JSON object constructor rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonObjectStyle {
    /// `<function>('k', v, ...)`
    Pairs(&'static str),
    /// `JSON_OBJECT('k': v, ...)`
    Colon,
    /// `JSON_OBJECT('k' VALUE v, ...)`
    KeyValue,
    Unsupported,
}

/// Immutable rendering descriptor for one vendor.
#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    pub vendor: Vendor,
    /// Opening and closing identifier quote.
    pub quote: (char, char),
    pub placeholder: Placeholder,
    pub features: &'static [Feature],
    pub pagination: Pagination,
    pub upsert: UpsertStyle,
    pub json_path: JsonPathStyle,
    pub json_object: JsonObjectStyle,
    /// Whether the server infers types of parameters passed to polymorphic functions.
    pub infers_polymorphic_params: bool,
    /// Whether recursive CTEs need the `RECURSIVE` keyword.
    pub recursive_keyword: bool,
    /// ORDER BY expression used inside OVER () for ranking functions without one.
    pub ranking_default_order: Option<&'static str>,
    /// Whether table aliases are introduced with `AS`.
    pub table_alias_keyword: bool,
}

pub static POSTGRES: Dialect = Dialect {
    vendor: Vendor::Postgres,
    quote: ('"', '"'),
    placeholder: Placeholder::Numbered("$"),
    features: &[
        Feature::ILike,
        Feature::Returning,
        Feature::DistinctOn,
        Feature::FullJoin,
        Feature::RightJoin,
        Feature::AggregateFilter,
        Feature::NullsOrdering,
        Feature::NamedWindow,
        Feature::Upsert,
        Feature::JsonObject,
        Feature::IfNotExists,
        Feature::DropIfExists,
        Feature::DropCascade,
    ],
    pagination: Pagination::LimitOffset {
        bare_offset: BareOffset::Allowed,
    },
    upsert: UpsertStyle::OnConflict,
    json_path: JsonPathStyle::Arrows,
    json_object: JsonObjectStyle::Pairs("json_build_object"),
    infers_polymorphic_params: false,
    recursive_keyword: true,
    ranking_default_order: None,
    table_alias_keyword: true,
};

pub static MYSQL: Dialect = Dialect {
    vendor: Vendor::MySql,
    quote: ('`', '`'),
    placeholder: Placeholder::Fixed("%s"),
    features: &[
        Feature::RightJoin,
        Feature::NamedWindow,
        Feature::Upsert,
        Feature::JsonObject,
        Feature::IfNotExists,
        Feature::DropIfExists,
    ],
    pagination: Pagination::LimitOffset {
        bare_offset: BareOffset::Forbidden,
    },
    upsert: UpsertStyle::OnDuplicateKey,
    json_path: JsonPathStyle::PathFunction("JSON_EXTRACT"),
    json_object: JsonObjectStyle::Pairs("JSON_OBJECT"),
    infers_polymorphic_params: true,
    recursive_keyword: true,
    ranking_default_order: None,
    table_alias_keyword: true,
};

pub static MARIADB: Dialect = Dialect {
    vendor: Vendor::MariaDb,
    quote: ('`', '`'),
    placeholder: Placeholder::Fixed("%s"),
    features: &[
        Feature::Returning,
        Feature::RightJoin,
        Feature::Upsert,
        Feature::JsonObject,
        Feature::IfNotExists,
        Feature::DropIfExists,
    ],
    pagination: Pagination::LimitOffset {
        bare_offset: BareOffset::Forbidden,
    },
    upsert: UpsertStyle::OnDuplicateKey,
    json_path: JsonPathStyle::PathFunction("JSON_EXTRACT"),
    json_object: JsonObjectStyle::Pairs("JSON_OBJECT"),
    infers_polymorphic_params: true,
    recursive_keyword: true,
    ranking_default_order: None,
    table_alias_keyword: true,
};

pub static SQLITE: Dialect = Dialect {
    vendor: Vendor::Sqlite,
    quote: ('"', '"'),
    placeholder: Placeholder::Fixed("?"),
    features: &[
        Feature::Returning,
        Feature::FullJoin,
        Feature::RightJoin,
        Feature::AggregateFilter,
        Feature::NullsOrdering,
        Feature::NamedWindow,
        Feature::Upsert,
        Feature::JsonObject,
        Feature::IfNotExists,
        Feature::DropIfExists,
    ],
    pagination: Pagination::LimitOffset {
        bare_offset: BareOffset::LimitSentinel("-1"),
    },
    upsert: UpsertStyle::OnConflict,
    json_path: JsonPathStyle::PathFunction("JSON_EXTRACT"),
    json_object: JsonObjectStyle::Pairs("json_object"),
    infers_polymorphic_params: true,
    recursive_keyword: true,
    ranking_default_order: None,
    table_alias_keyword: true,
};

pub static MSSQL: Dialect = Dialect {
    vendor: Vendor::MsSql,
    quote: ('[', ']'),
    placeholder: Placeholder::Numbered("@P"),
    features: &[
        Feature::FullJoin,
        Feature::RightJoin,
        Feature::JsonObject,
        Feature::DropIfExists,
    ],
    pagination: Pagination::OffsetFetch {
        requires_order_by: true,
    },
    upsert: UpsertStyle::Unsupported,
    json_path: JsonPathStyle::PathFunction("JSON_VALUE"),
    json_object: JsonObjectStyle::Colon,
    infers_polymorphic_params: true,
    recursive_keyword: false,
    ranking_default_order: Some("(SELECT NULL)"),
    table_alias_keyword: true,
};

pub static ORACLE: Dialect = Dialect {
    vendor: Vendor::Oracle,
    quote: ('"', '"'),
    placeholder: Placeholder::Numbered(":"),
    features: &[
        Feature::FullJoin,
        Feature::RightJoin,
        Feature::NullsOrdering,
        Feature::JsonObject,
    ],
    pagination: Pagination::OffsetFetch {
        requires_order_by: false,
    },
    upsert: UpsertStyle::Unsupported,
    json_path: JsonPathStyle::PathFunction("JSON_VALUE"),
    json_object: JsonObjectStyle::KeyValue,
    infers_polymorphic_params: true,
    recursive_keyword: false,
    ranking_default_order: Some("NULL"),
    table_alias_keyword: false,
};

pub static ATHENA: Dialect = Dialect {
    vendor: Vendor::Athena,
    quote: ('"', '"'),
    placeholder: Placeholder::Fixed("?"),
    features: &[
        Feature::FullJoin,
        Feature::RightJoin,
        Feature::NullsOrdering,
        Feature::IfNotExists,
        Feature::DropIfExists,
    ],
    pagination: Pagination::OffsetLimit,
    upsert: UpsertStyle::Unsupported,
    json_path: JsonPathStyle::PathFunction("json_extract_scalar"),
    json_object: JsonObjectStyle::Unsupported,
    infers_polymorphic_params: true,
    recursive_keyword: true,
    ranking_default_order: None,
    table_alias_keyword: true,
};

pub static PRESTO: Dialect = Dialect {
    vendor: Vendor::Presto,
    quote: ('"', '"'),
    placeholder: Placeholder::Fixed("?"),
    features: &[
        Feature::FullJoin,
        Feature::RightJoin,
        Feature::AggregateFilter,
        Feature::NullsOrdering,
        Feature::IfNotExists,
        Feature::DropIfExists,
    ],
    pagination: Pagination::OffsetLimit,
    upsert: UpsertStyle::Unsupported,
    json_path: JsonPathStyle::PathFunction("json_extract_scalar"),
    json_object: JsonObjectStyle::Unsupported,
    infers_polymorphic_params: true,
    recursive_keyword: true,
    ranking_default_order: None,
    table_alias_keyword: true,
};

impl Dialect {
    /// Look up the static descriptor for a vendor.
    pub fn for_vendor(vendor: Vendor) -> &'static Dialect {
        match vendor {
            Vendor::Postgres => &POSTGRES,
            Vendor::MySql => &MYSQL,
            Vendor::MariaDb => &MARIADB,
            Vendor::Sqlite => &SQLITE,
            Vendor::MsSql => &MSSQL,
            Vendor::Oracle => &ORACLE,
            Vendor::Athena => &ATHENA,
            Vendor::Presto => &PRESTO,
        }
    }

    pub fn name(&self) -> &'static str {
        self.vendor.name()
    }

    /// Check whether the dialect supports a feature.
    pub fn supports(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Fail with `UnsupportedDialectFeature` unless the feature is available.
    pub fn require(&self, feature: Feature) -> SqlResult<()> {
        if self.supports(feature) {
            Ok(())
        } else {
            Err(SqlError::unsupported(feature, self.vendor))
        }
    }

    /// Placeholder token for the 1-based parameter position.
    pub fn placeholder(&self, index: usize) -> Cow<'static, str> {
        self.placeholder.token(index)
    }

    /// Quote a single identifier segment.
    pub fn quote_ident(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_ident(&mut out, name);
        out
    }

    /// Write a single quoted identifier segment, doubling embedded closing quotes.
    pub fn write_ident(&self, out: &mut String, name: &str) {
        let (open, close) = self.quote;
        out.push(open);
        for ch in name.chars() {
            if ch == close {
                out.push(close);
            }
            out.push(ch);
        }
        out.push(close);
    }

    /// Write a dotted path, quoting every segment independently.
    pub fn write_path<'a>(&self, out: &mut String, parts: impl IntoIterator<Item = &'a str>) {
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            self.write_ident(out, part);
        }
    }

    /// Column type name used in CREATE TABLE.
    pub fn type_name(&self, ty: &SqlType) -> Cow<'static, str> {
        use SqlType::*;
        use Vendor::*;

        let name: &'static str = match (self.vendor, ty) {
            (_, Custom(raw)) => return Cow::Owned(raw.clone()),
            (Oracle, Varchar(n)) => return Cow::Owned(format!("VARCHAR2({n})")),
            (MsSql, Varchar(n)) => return Cow::Owned(format!("NVARCHAR({n})")),
            (_, Varchar(n)) => return Cow::Owned(format!("VARCHAR({n})")),

            (Sqlite, SmallInt | Integer | BigInt) => "INTEGER",
            (Oracle, SmallInt) => "NUMBER(5)",
            (Oracle, Integer) => "NUMBER(10)",
            (Oracle, BigInt) => "NUMBER(19)",
            (MySql | MariaDb | MsSql, Integer) => "INT",
            (_, SmallInt) => "SMALLINT",
            (_, Integer) => "INTEGER",
            (_, BigInt) => "BIGINT",

            (MySql | MariaDb, Real) => "FLOAT",
            (Oracle, Real) => "BINARY_FLOAT",
            (_, Real) => "REAL",
            (Postgres, Double) => "DOUBLE PRECISION",
            (Sqlite, Double) => "REAL",
            (MsSql, Double) => "FLOAT",
            (Oracle, Double) => "BINARY_DOUBLE",
            (_, Double) => "DOUBLE",

            (MsSql, Boolean) => "BIT",
            (Oracle, Boolean) => "NUMBER(1)",
            (_, Boolean) => "BOOLEAN",

            (MsSql, Text | Json) => "NVARCHAR(MAX)",
            (Oracle, Text | Json) => "CLOB",
            (Athena | Presto, Text) => "VARCHAR",
            (Sqlite, Json) => "TEXT",
            (Postgres, Json) => "JSONB",
            (_, Json) => "JSON",
            (_, Text) => "TEXT",

            (Postgres, Bytes) => "BYTEA",
            (MsSql, Bytes) => "VARBINARY(MAX)",
            (Athena | Presto, Bytes) => "VARBINARY",
            (_, Bytes) => "BLOB",

            (_, Date) => "DATE",
            (MySql | MariaDb, Timestamp) => "DATETIME",
            (MsSql, Timestamp) => "DATETIME2",
            (_, Timestamp) => "TIMESTAMP",
            (Postgres, TimestampTz) => "TIMESTAMPTZ",
            (MySql | MariaDb | Sqlite, TimestampTz) => "TIMESTAMP",
            (MsSql, TimestampTz) => "DATETIMEOFFSET",
            (_, TimestampTz) => "TIMESTAMP WITH TIME ZONE",

            (Postgres | Presto, Uuid) => "UUID",
            (MySql | MariaDb, Uuid) => "CHAR(36)",
            (MsSql, Uuid) => "UNIQUEIDENTIFIER",
            (Oracle, Uuid) => "RAW(16)",
            (Sqlite, Uuid) => "TEXT",
            (Athena, Uuid) => "VARCHAR(36)",
        };
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_styles() {
        assert_eq!(Vendor::Postgres.dialect().placeholder(3), "$3");
        assert_eq!(Vendor::MsSql.dialect().placeholder(2), "@P2");
        assert_eq!(Vendor::Oracle.dialect().placeholder(1), ":1");
        assert_eq!(Vendor::Sqlite.dialect().placeholder(7), "?");
        assert_eq!(Vendor::MySql.dialect().placeholder(7), "%s");
        assert_eq!(Vendor::MariaDb.dialect().placeholder(1), "%s");
        assert_eq!(Vendor::Presto.dialect().placeholder(9), "?");
    }

    #[test]
    fn quoting_per_vendor() {
        assert_eq!(Vendor::Postgres.dialect().quote_ident("users"), r#""users""#);
        assert_eq!(Vendor::MySql.dialect().quote_ident("users"), "`users`");
        assert_eq!(Vendor::MsSql.dialect().quote_ident("users"), "[users]");
    }

    #[test]
    fn quoting_escapes_closing_quote() {
        assert_eq!(Vendor::Postgres.dialect().quote_ident(r#"a"b"#), r#""a""b""#);
        assert_eq!(Vendor::MySql.dialect().quote_ident("a`b"), "`a``b`");
        assert_eq!(Vendor::MsSql.dialect().quote_ident("a]b"), "[a]]b]");
    }

    #[test]
    fn dotted_path_quotes_each_segment() {
        let mut out = String::new();
        Vendor::MySql.dialect().write_path(&mut out, ["shop", "orders", "id"]);
        assert_eq!(out, "`shop`.`orders`.`id`");
    }

    #[test]
    fn feature_flags() {
        assert!(POSTGRES.supports(Feature::ILike));
        assert!(!SQLITE.supports(Feature::ILike));
        assert!(SQLITE.supports(Feature::Returning));
        assert!(!MYSQL.supports(Feature::Returning));
        assert!(MYSQL.require(Feature::DistinctOn).is_err());
        assert!(POSTGRES.require(Feature::DistinctOn).is_ok());
    }

    #[test]
    fn vendor_parses_engine_names() {
        assert_eq!("PostgreSQL".parse::<Vendor>().unwrap(), Vendor::Postgres);
        assert_eq!("sqlserver".parse::<Vendor>().unwrap(), Vendor::MsSql);
        assert_eq!("sqlite3".parse::<Vendor>().unwrap(), Vendor::Sqlite);
        assert!("db2".parse::<Vendor>().is_err());
    }

    #[test]
    fn vendor_serde_names() {
        let v: Vendor = serde_json::from_str(r#""mariadb""#).unwrap();
        assert_eq!(v, Vendor::MariaDb);
        assert_eq!(serde_json::to_string(&Vendor::MsSql).unwrap(), r#""mssql""#);
    }

    #[test]
    fn every_vendor_has_a_descriptor() {
        for vendor in Vendor::ALL {
            assert_eq!(Dialect::for_vendor(vendor).vendor, vendor);
        }
    }

    #[test]
    fn type_names() {
        assert_eq!(POSTGRES.type_name(&SqlType::Boolean), "BOOLEAN");
        assert_eq!(MSSQL.type_name(&SqlType::Boolean), "BIT");
        assert_eq!(ORACLE.type_name(&SqlType::Varchar(64)), "VARCHAR2(64)");
        assert_eq!(SQLITE.type_name(&SqlType::BigInt), "INTEGER");
        assert_eq!(POSTGRES.type_name(&SqlType::Json), "JSONB");
        assert_eq!(MYSQL.type_name(&SqlType::Custom("ENUM('a')".into())), "ENUM('a')");
    }
}
