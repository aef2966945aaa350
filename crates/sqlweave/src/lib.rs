//! # sqlweave
//!
//! A multi-dialect SQL expression compiler with parameter binding.
//!
//! ## Features
//!
//! - **Typed expressions**: tables, fields, conditions and function calls are
//!   plain Rust values; literals are always bound, never inlined
//! - **One model, many dialects**: Postgres, MySQL, MariaDB, SQLite, MSSQL,
//!   Oracle, Athena and Presto, each with its own quoting and placeholders
//! - **Immutable building**: cloning builders never touch their source, so any
//!   statement is a reusable template
//! - **Checked compilation**: unbound tables, dialect gaps and misplaced
//!   clauses are reported before any SQL is produced
//! - **Driver boundary**: compiled `(sql, params)` pairs go to a [`Driver`];
//!   a `tokio-postgres` adapter ships behind the `postgres` feature
//!
//! ## Example
//!
//! ```ignore
//! use sqlweave::{Query, Table, Vendor};
//!
//! let q = Query::new(Vendor::Postgres);
//! let users = Table::new("users");
//!
//! let compiled = q
//!     .select([users.col("name")])
//!     .from(&users)
//!     .where_(users.col("age").gt(18))
//!     .where_(users.col("active").eq(true))
//!     .compile()?;
//!
//! assert_eq!(
//!     compiled.sql,
//!     r#"SELECT "users"."name" FROM "users" WHERE "users"."age" > $1 AND "users"."active" = $2"#
//! );
//! ```

pub mod binder;
pub mod compiler;
pub mod config;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod expr;
pub mod ident;
mod logging;
pub mod schema;
pub mod statement;
pub mod value;

pub use binder::Binder;
pub use compiler::Compiled;
pub use config::{CompileOptions, DangerousDmlPolicy, LogLevel, LogOptions};
pub use dialect::{Dialect, Feature, Vendor};
pub use driver::{Driver, Row};
pub use error::{SqlError, SqlResult};
pub use expr::{
    ColumnName, CompareOp, Condition, Direction, Expr, Field, Frame, FrameBound, FrameUnit,
    Function, Nulls, OrderBy, Over, PathStep, Projection, Table, Window, col, func,
};
pub use ident::Ident;
pub use schema::{ColumnDef, Schema, SqlType, SqlTyped};
pub use statement::{CteBody, JoinKind, JoinOn, Query, Source, Statement, StatementType};
pub use value::Value;

#[cfg(feature = "derive")]
pub use sqlweave_derive::Schema;
