//! Immutable expression model: tables, fields, conditions, function calls.
//!
//! Everything in this module is plain data. Comparison builders such as
//! [`Field::eq`] return new [`Condition`] values and never touch shared state;
//! rendering happens later in the compiler against a chosen dialect.
//!
//! ```ignore
//! use sqlweave::{Table, func};
//!
//! let users = Table::new("users");
//! let adult = users.col("age").gte(18);
//! let named = users.col("name").like("A%");
//! let cond = adult.and_(named).or_(users.col("role").eq("admin"));
//! let total = func::count(users.col("id")).alias("n");
//! ```

mod condition;
mod field;
mod function;
mod table;
mod window;


pub use condition::{CompareOp, Condition, InList};
pub use field::{ColumnName, Field, PathStep, col};
pub use function::{Function, Over, func};
pub use table::Table;
pub(crate) use table::TableRef;
pub use window::{Direction, Frame, FrameBound, FrameUnit, Nulls, OrderBy, Window};

pub(crate) use function::Call;

use crate::ident::Ident;
use crate::statement::Statement;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// A scalar SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Field(Field),
    /// A literal, always emitted as a bound parameter.
    Value(Value),
    Function(Box<Function>),
    /// A scalar subquery, rendered in parentheses.
    Subquery(Box<Statement>),
    Cast { expr: Box<Expr>, ty: String },
    Condition(Box<Condition>),
    /// `*` or `"t".*`
    Star(Option<Table>),
    /// Opaque text inserted verbatim, never parameterized.
    Raw(String),
    Aliased(Box<Expr>, String),
}

impl Expr {
    /// A bound literal.
    pub fn value(value: impl Into<Value>) -> Self {
        Expr::Value(value.into())
    }

    /// Opaque SQL text. The caller is responsible for its safety.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    pub fn star() -> Self {
        Expr::Star(None)
    }

    pub fn subquery(statement: Statement) -> Self {
        Expr::Subquery(Box::new(statement))
    }

    /// `CAST(<expr> AS <ty>)`
    pub fn cast(self, ty: impl Into<String>) -> Self {
        Expr::Cast {
            expr: Box::new(self),
            ty: ty.into(),
        }
    }

    /// Attach a projection alias.
    pub fn alias(self, alias: impl Into<String>) -> Self {
        match self {
            Expr::Field(f) => Expr::Field(f.alias(alias)),
            Expr::Function(f) => Expr::Function(Box::new(f.alias(alias))),
            Expr::Aliased(inner, _) => Expr::Aliased(inner, alias.into()),
            other => Expr::Aliased(Box::new(other), alias.into()),
        }
    }

    /// Number of literal leaves bound when compiled, not counting subqueries.
    pub fn literal_count(&self) -> usize {
        match self {
            Expr::Value(_) => 1,
            Expr::Function(f) => f.literal_count(),
            Expr::Cast { expr, .. } | Expr::Aliased(expr, _) => expr.literal_count(),
            Expr::Condition(c) => c.literal_count(),
            Expr::Field(_) | Expr::Subquery(_) | Expr::Star(_) | Expr::Raw(_) => 0,
        }
    }

    /// Name reported for this expression in a SELECT/RETURNING list.
    ///
    /// `None` when the database picks the name, which differs by vendor.
    pub(crate) fn output_name(&self) -> Option<String> {
        match self {
            Expr::Field(f) => Some(f.alias_name().unwrap_or(f.column()).to_string()),
            Expr::Function(f) => Some(
                f.alias_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| f.output_name()),
            ),
            Expr::Aliased(_, alias) => Some(alias.clone()),
            Expr::Cast { expr, .. } => expr.output_name(),
            Expr::Star(_)
            | Expr::Raw(_)
            | Expr::Value(_)
            | Expr::Subquery(_)
            | Expr::Condition(_) => None,
        }
    }

    /// Projection alias, if any.
    pub(crate) fn projection_alias(&self) -> Option<&str> {
        match self {
            Expr::Field(f) => f.alias_name(),
            Expr::Function(f) => f.alias_name(),
            Expr::Aliased(_, alias) => Some(alias),
            _ => None,
        }
    }
}

/// Generates the comparison builders shared by [`Field`], [`Function`] and [`Expr`].
///
/// These are inherent methods so they win over `PartialEq::eq`/`ne` during
/// method resolution.
macro_rules! impl_compare_methods {
    ($ty:ty) => {
        impl $ty {
            /// `self = rhs`, or `IS NULL` when `rhs` is NULL.
            pub fn eq(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::Eq, rhs.into())
            }

            /// `self <> rhs`, or `IS NOT NULL` when `rhs` is NULL.
            pub fn ne(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::Ne, rhs.into())
            }

            pub fn gt(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::Gt, rhs.into())
            }

            pub fn gte(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::Gte, rhs.into())
            }

            pub fn lt(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::Lt, rhs.into())
            }

            pub fn lte(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::Lte, rhs.into())
            }

            pub fn like(&self, pattern: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::Like, pattern.into())
            }

            pub fn not_like(&self, pattern: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::NotLike, pattern.into())
            }

            /// Case-insensitive LIKE. Postgres only.
            pub fn ilike(&self, pattern: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::ILike, pattern.into())
            }

            pub fn not_ilike(&self, pattern: impl Into<$crate::expr::Expr>) -> $crate::expr::Condition {
                $crate::expr::Condition::compare(self.clone().into(), $crate::expr::CompareOp::NotILike, pattern.into())
            }

            /// `self IN (...)`, one placeholder per element.
            pub fn in_list<I, T>(&self, values: I) -> $crate::expr::Condition
            where
                I: IntoIterator<Item = T>,
                T: Into<$crate::value::Value>,
            {
                $crate::expr::Condition::in_values(self.clone().into(), values, false)
            }

            pub fn not_in<I, T>(&self, values: I) -> $crate::expr::Condition
            where
                I: IntoIterator<Item = T>,
                T: Into<$crate::value::Value>,
            {
                $crate::expr::Condition::in_values(self.clone().into(), values, true)
            }

            /// `self IN (<subquery>)`
            pub fn in_subquery(&self, query: $crate::statement::Statement) -> $crate::expr::Condition {
                $crate::expr::Condition::in_subquery(self.clone().into(), query, false)
            }

            pub fn not_in_subquery(&self, query: $crate::statement::Statement) -> $crate::expr::Condition {
                $crate::expr::Condition::in_subquery(self.clone().into(), query, true)
            }

            pub fn between(
                &self,
                low: impl Into<$crate::expr::Expr>,
                high: impl Into<$crate::expr::Expr>,
            ) -> $crate::expr::Condition {
                $crate::expr::Condition::Between {
                    lhs: self.clone().into(),
                    low: low.into(),
                    high: high.into(),
                    negated: false,
                }
            }

            pub fn not_between(
                &self,
                low: impl Into<$crate::expr::Expr>,
                high: impl Into<$crate::expr::Expr>,
            ) -> $crate::expr::Condition {
                $crate::expr::Condition::Between {
                    lhs: self.clone().into(),
                    low: low.into(),
                    high: high.into(),
                    negated: true,
                }
            }

            pub fn is_null(&self) -> $crate::expr::Condition {
                $crate::expr::Condition::NullCheck {
                    lhs: self.clone().into(),
                    negated: false,
                }
            }

            pub fn is_not_null(&self) -> $crate::expr::Condition {
                $crate::expr::Condition::NullCheck {
                    lhs: self.clone().into(),
                    negated: true,
                }
            }

            pub fn asc(&self) -> $crate::expr::OrderBy {
                $crate::expr::OrderBy::new(self.clone(), $crate::expr::Direction::Asc)
            }

            pub fn desc(&self) -> $crate::expr::OrderBy {
                $crate::expr::OrderBy::new(self.clone(), $crate::expr::Direction::Desc)
            }
        }
    };
}

pub(crate) use impl_compare_methods;

impl_compare_methods!(Expr);

impl From<Field> for Expr {
    fn from(f: Field) -> Self {
        Expr::Field(f)
    }
}

impl From<&Field> for Expr {
    fn from(f: &Field) -> Self {
        Expr::Field(f.clone())
    }
}

impl From<Function> for Expr {
    fn from(f: Function) -> Self {
        Expr::Function(Box::new(f))
    }
}

impl From<Condition> for Expr {
    fn from(c: Condition) -> Self {
        Expr::Condition(Box::new(c))
    }
}

impl From<Statement> for Expr {
    fn from(s: Statement) -> Self {
        Expr::Subquery(Box::new(s))
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Value(v)
    }
}

macro_rules! impl_expr_from_value {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for Expr {
            fn from(v: $t) -> Self {
                Expr::Value(Value::from(v))
            }
        })*
    };
}

impl_expr_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    char,
    &str,
    String,
    &String,
    Vec<u8>,
    &[u8],
    NaiveDate,
    NaiveDateTime,
    DateTime<Utc>,
    Uuid,
    serde_json::Value,
);

impl<T: Into<Value>> From<Option<T>> for Expr {
    fn from(v: Option<T>) -> Self {
        Expr::Value(Value::from(v))
    }
}

/// An item in a SELECT or RETURNING list.
///
/// Strings are interpreted as column names: `"*"` is a star, a dotted name
/// such as `"u.name"` is a qualified column, and anything that is not a valid
/// identifier is kept as raw text (e.g. `"COUNT(*) AS n"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Projection(pub(crate) Expr);

impl Projection {
    pub fn expr(&self) -> &Expr {
        &self.0
    }
}

impl From<Expr> for Projection {
    fn from(e: Expr) -> Self {
        Projection(e)
    }
}

impl From<Field> for Projection {
    fn from(f: Field) -> Self {
        Projection(Expr::Field(f))
    }
}

impl From<&Field> for Projection {
    fn from(f: &Field) -> Self {
        Projection(Expr::Field(f.clone()))
    }
}

impl From<Function> for Projection {
    fn from(f: Function) -> Self {
        Projection(Expr::from(f))
    }
}

impl From<&str> for Projection {
    fn from(s: &str) -> Self {
        if s.trim() == "*" {
            return Projection(Expr::Star(None));
        }
        match Ident::parse(s) {
            Ok(ident) => {
                let column = ident.name().to_string();
                match ident.qualifier() {
                    [] => Projection(Expr::Field(Field::new(column))),
                    table => Projection(Expr::Field(Field::with_table(
                        Arc::new(TableRef::from_parts(table)),
                        column,
                    ))),
                }
            }
            Err(_) => Projection(Expr::Raw(s.to_string())),
        }
    }
}

impl From<String> for Projection {
    fn from(s: String) -> Self {
        Projection::from(s.as_str())
    }
}
