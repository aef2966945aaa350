use super::{Expr, Field};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

/// NULL placement in ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nulls {
    First,
    Last,
}

/// One ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub(crate) expr: Expr,
    pub(crate) direction: Direction,
    pub(crate) nulls: Option<Nulls>,
}

impl OrderBy {
    pub fn new(expr: impl Into<Expr>, direction: Direction) -> Self {
        Self {
            expr: expr.into(),
            direction,
            nulls: None,
        }
    }

    /// Order by a bare (output) column name, e.g. a projection alias.
    pub fn name(name: impl Into<String>, direction: Direction) -> Self {
        Self::new(Field::new(name), direction)
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(Nulls::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(Nulls::Last);
        self
    }
}

impl From<Field> for OrderBy {
    fn from(f: Field) -> Self {
        OrderBy::new(f, Direction::Asc)
    }
}

impl From<&Field> for OrderBy {
    fn from(f: &Field) -> Self {
        OrderBy::new(f.clone(), Direction::Asc)
    }
}

impl From<&str> for OrderBy {
    fn from(name: &str) -> Self {
        OrderBy::name(name, Direction::Asc)
    }
}

/// ROWS or RANGE framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameUnit {
    Rows,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(u64),
    CurrentRow,
    Following(u64),
    UnboundedFollowing,
}

impl FrameBound {
    pub(crate) fn to_sql(self) -> String {
        match self {
            FrameBound::UnboundedPreceding => "UNBOUNDED PRECEDING".to_string(),
            FrameBound::Preceding(n) => format!("{n} PRECEDING"),
            FrameBound::CurrentRow => "CURRENT ROW".to_string(),
            FrameBound::Following(n) => format!("{n} FOLLOWING"),
            FrameBound::UnboundedFollowing => "UNBOUNDED FOLLOWING".to_string(),
        }
    }
}

/// `ROWS|RANGE BETWEEN <start> AND <end>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub unit: FrameUnit,
    pub start: FrameBound,
    pub end: FrameBound,
}

/// Window specification for `OVER (...)` and the WINDOW clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Window {
    pub(crate) partition_by: Vec<Expr>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) frame: Option<Frame>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partition_by(mut self, expr: impl Into<Expr>) -> Self {
        self.partition_by.push(expr.into());
        self
    }

    pub fn order_by(mut self, item: impl Into<OrderBy>) -> Self {
        self.order_by.push(item.into());
        self
    }

    pub fn rows(mut self, start: FrameBound, end: FrameBound) -> Self {
        self.frame = Some(Frame {
            unit: FrameUnit::Rows,
            start,
            end,
        });
        self
    }

    pub fn range(mut self, start: FrameBound, end: FrameBound) -> Self {
        self.frame = Some(Frame {
            unit: FrameUnit::Range,
            start,
            end,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.partition_by.is_empty() && self.order_by.is_empty() && self.frame.is_none()
    }

    pub(crate) fn literal_count(&self) -> usize {
        self.partition_by.iter().map(Expr::literal_count).sum::<usize>()
            + self
                .order_by
                .iter()
                .map(|o| o.expr.literal_count())
                .sum::<usize>()
    }
}
