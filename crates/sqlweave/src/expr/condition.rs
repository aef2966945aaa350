use super::Expr;
use crate::statement::Statement;
use crate::value::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    ILike,
    NotILike,
}

impl CompareOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Like => "LIKE",
            CompareOp::NotLike => "NOT LIKE",
            CompareOp::ILike => "ILIKE",
            CompareOp::NotILike => "NOT ILIKE",
        }
    }
}

/// Right-hand side of an IN condition.
#[derive(Debug, Clone, PartialEq)]
pub enum InList {
    Values(Vec<Value>),
    Subquery(Box<Statement>),
}

/// A boolean expression tree for WHERE, HAVING, ON and FILTER.
///
/// Combinators take their operands by value and build a new node, so a tree
/// is finite and acyclic by construction. Clone a condition to reuse it in
/// several statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        lhs: Expr,
        op: CompareOp,
        rhs: Expr,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    In {
        lhs: Expr,
        list: InList,
        negated: bool,
    },
    Between {
        lhs: Expr,
        low: Expr,
        high: Expr,
        negated: bool,
    },
    NullCheck {
        lhs: Expr,
        negated: bool,
    },
    Exists {
        query: Box<Statement>,
        negated: bool,
    },
    /// Opaque SQL text, never parameterized.
    Raw(String),
}

impl Condition {
    /// Build a comparison. `= NULL` and `<> NULL` become `IS NULL` / `IS NOT NULL`
    /// without binding a parameter.
    pub fn compare(lhs: Expr, op: CompareOp, rhs: Expr) -> Self {
        match (op, &rhs) {
            (CompareOp::Eq, Expr::Value(Value::Null)) => Condition::NullCheck {
                lhs,
                negated: false,
            },
            (CompareOp::Ne, Expr::Value(Value::Null)) => Condition::NullCheck { lhs, negated: true },
            _ => Condition::Compare { lhs, op, rhs },
        }
    }

    pub(crate) fn in_values<I, T>(lhs: Expr, values: I, negated: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Condition::In {
            lhs,
            list: InList::Values(values.into_iter().map(Into::into).collect()),
            negated,
        }
    }

    pub(crate) fn in_subquery(lhs: Expr, query: Statement, negated: bool) -> Self {
        Condition::In {
            lhs,
            list: InList::Subquery(Box::new(query)),
            negated,
        }
    }

    /// All conditions must hold. An empty list is always true.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(conditions.into_iter().collect())
    }

    /// At least one condition must hold. An empty list is always false.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(conditions.into_iter().collect())
    }

    pub fn exists(query: Statement) -> Self {
        Condition::Exists {
            query: Box::new(query),
            negated: false,
        }
    }

    pub fn not_exists(query: Statement) -> Self {
        Condition::Exists {
            query: Box::new(query),
            negated: true,
        }
    }

    /// Opaque SQL text. The caller is responsible for its safety.
    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::Raw(sql.into())
    }

    /// `(self AND other)`. Chained ANDs are flattened into one group.
    pub fn and_(self, other: Condition) -> Self {
        match self {
            Condition::And(mut children) => {
                children.push(other);
                Condition::And(children)
            }
            left => Condition::And(vec![left, other]),
        }
    }

    /// `(self OR other)`. Chained ORs are flattened into one group.
    pub fn or_(self, other: Condition) -> Self {
        match self {
            Condition::Or(mut children) => {
                children.push(other);
                Condition::Or(children)
            }
            left => Condition::Or(vec![left, other]),
        }
    }

    /// `NOT (self)`
    pub fn not_(self) -> Self {
        Condition::Not(Box::new(self))
    }

    /// Number of literal leaves, i.e. parameters this tree binds when compiled.
    /// Subqueries are not counted.
    pub fn literal_count(&self) -> usize {
        match self {
            Condition::Compare { lhs, rhs, .. } => lhs.literal_count() + rhs.literal_count(),
            Condition::And(children) | Condition::Or(children) => {
                children.iter().map(Condition::literal_count).sum()
            }
            Condition::Not(inner) => inner.literal_count(),
            Condition::In { lhs, list, .. } => {
                lhs.literal_count()
                    + match list {
                        InList::Values(values) => values.len(),
                        InList::Subquery(_) => 0,
                    }
            }
            Condition::Between { lhs, low, high, .. } => {
                lhs.literal_count() + low.literal_count() + high.literal_count()
            }
            Condition::NullCheck { lhs, .. } => lhs.literal_count(),
            Condition::Exists { .. } | Condition::Raw(_) => 0,
        }
    }
}
