//! Fluent statement builder.
//!
//! Two kinds of builder methods exist:
//!
//! - **Mutating** methods (`from`, `where_`, `join`, `order_by`, `set`, ...)
//!   take `self` by value, append to the clause set and hand the same
//!   statement back, so they chain.
//! - **Cloning** methods (`select`, `with`, `with_recursive`, `insert_into`,
//!   ...) take `&self` and return a fresh statement that inherits the vendor
//!   and options but starts with empty clauses. The source statement is never
//!   touched, which makes any statement usable as a template for subqueries.
//!
//! Clause order is not enforced while building. Misplaced clauses are
//! reported by [`Statement::compile`].
//!
//! ```ignore
//! let q = Query::new(Vendor::Postgres);
//! let users = Table::new("users");
//! let stmt = q
//!     .select([users.col("name")])
//!     .from(&users)
//!     .where_(users.col("age").gt(18))
//!     .where_(users.col("active").eq(true));
//! let compiled = stmt.compile()?;
//! ```

mod query;


pub use query::Query;

use crate::compiler::{self, Compiled};
use crate::config::CompileOptions;
use crate::dialect::Vendor;
use crate::error::SqlResult;
use crate::expr::{ColumnName, Condition, Expr, Field, OrderBy, Projection, Table, Window};
use crate::ident::Ident;
use crate::schema::{ColumnDef, Schema};
use std::fmt;
use std::sync::Arc;

/// Vendor and options shared by every statement spawned from one [`Query`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Context {
    pub(crate) vendor: Vendor,
    pub(crate) options: Arc<CompileOptions>,
}

/// Statement kind, as reported by [`Statement::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    /// A WITH list still waiting for its main statement.
    With,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementType::Select => "SELECT",
            StatementType::Insert => "INSERT",
            StatementType::Update => "UPDATE",
            StatementType::Delete => "DELETE",
            StatementType::Create => "CREATE TABLE",
            StatementType::Drop => "DROP TABLE",
            StatementType::With => "WITH",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Kind {
    Select,
    Insert(InsertParts),
    Update(UpdateParts),
    Delete(Table),
    Create(CreateParts),
    Drop(DropParts),
    With,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InsertParts {
    pub(crate) table: Table,
    pub(crate) columns: Vec<ColumnName>,
    pub(crate) rows: Vec<Vec<Expr>>,
    pub(crate) source: Option<Box<Statement>>,
    pub(crate) conflict: Option<OnConflict>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OnConflict {
    pub(crate) target: Vec<ColumnName>,
    pub(crate) action: ConflictAction,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConflictAction {
    Nothing,
    Update(Vec<(ColumnName, Assign)>),
}

/// Right-hand side of a DO UPDATE assignment.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Assign {
    /// The value the conflicting row tried to insert.
    Excluded,
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UpdateParts {
    pub(crate) table: Table,
    pub(crate) assignments: Vec<(ColumnName, Expr)>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CreateParts {
    pub(crate) table: Table,
    pub(crate) columns: Vec<ColumnDef>,
    pub(crate) if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DropParts {
    pub(crate) table: Table,
    pub(crate) if_exists: bool,
    pub(crate) cascade: bool,
}

/// A FROM or JOIN target.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Table(Table),
    /// `(<query>) AS alias`
    Subquery { query: Box<Statement>, alias: String },
    /// Opaque text inserted verbatim.
    Raw(String),
}

impl From<Table> for Source {
    fn from(t: Table) -> Self {
        Source::Table(t)
    }
}

impl From<&Table> for Source {
    fn from(t: &Table) -> Self {
        Source::Table(t.clone())
    }
}

/// A plain or dotted name becomes a table; anything else is raw text.
impl From<&str> for Source {
    fn from(s: &str) -> Self {
        match Ident::parse(s) {
            Ok(ident) => Source::Table(Table::from_parts(ident.parts())),
            Err(_) => Source::Raw(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// Join predicate: a typed condition or raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOn {
    Condition(Condition),
    Raw(String),
}

impl From<Condition> for JoinOn {
    fn from(c: Condition) -> Self {
        JoinOn::Condition(c)
    }
}

impl From<&str> for JoinOn {
    fn from(s: &str) -> Self {
        JoinOn::Raw(s.to_string())
    }
}

impl From<String> for JoinOn {
    fn from(s: String) -> Self {
        JoinOn::Raw(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Join {
    pub(crate) kind: JoinKind,
    pub(crate) source: Source,
    pub(crate) on: Option<JoinOn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SetOp {
    Union,
    UnionAll,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum Distinct {
    #[default]
    None,
    All,
    On(Vec<Expr>),
}

/// Body of a CTE.
#[derive(Debug, Clone, PartialEq)]
pub enum CteBody {
    Statement(Box<Statement>),
    /// Opaque SQL text.
    Raw(String),
}

impl From<Statement> for CteBody {
    fn from(s: Statement) -> Self {
        CteBody::Statement(Box::new(s))
    }
}

impl From<&Statement> for CteBody {
    fn from(s: &Statement) -> Self {
        CteBody::Statement(Box::new(s.clone()))
    }
}

impl From<&str> for CteBody {
    fn from(s: &str) -> Self {
        CteBody::Raw(s.to_string())
    }
}

impl From<String> for CteBody {
    fn from(s: String) -> Self {
        CteBody::Raw(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cte {
    pub(crate) name: String,
    pub(crate) columns: Vec<String>,
    pub(crate) body: CteBody,
    pub(crate) recursive: bool,
}

/// Per-statement clause accumulator.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Clauses {
    pub(crate) distinct: Distinct,
    pub(crate) projection: Vec<Projection>,
    pub(crate) sources: Vec<Source>,
    pub(crate) joins: Vec<Join>,
    /// Implicitly ANDed, in call order.
    pub(crate) filters: Vec<Condition>,
    pub(crate) group_by: Vec<Expr>,
    pub(crate) having: Vec<Condition>,
    pub(crate) windows: Vec<(String, Window)>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) returning: Vec<Projection>,
    pub(crate) compound: Vec<(SetOp, Statement)>,
}

impl Clauses {
    /// Names of the clauses that have been set.
    pub(crate) fn used(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            ("SELECT list", !self.projection.is_empty()),
            ("DISTINCT", self.distinct != Distinct::None),
            ("FROM", !self.sources.is_empty()),
            ("JOIN", !self.joins.is_empty()),
            ("WHERE", !self.filters.is_empty()),
            ("GROUP BY", !self.group_by.is_empty()),
            ("HAVING", !self.having.is_empty()),
            ("WINDOW", !self.windows.is_empty()),
            ("ORDER BY", !self.order_by.is_empty()),
            ("LIMIT", self.limit.is_some()),
            ("OFFSET", self.offset.is_some()),
            ("RETURNING", !self.returning.is_empty()),
            ("UNION", !self.compound.is_empty()),
        ]
        .into_iter()
        .filter(|(_, used)| *used)
        .map(|(name, _)| name)
    }
}

/// One SQL command awaiting compilation.
///
/// A statement is inert data: it holds no connection and is compiled afresh
/// on every [`compile`](Statement::compile) call.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Statement {
    pub(crate) ctx: Context,
    pub(crate) kind: Kind,
    pub(crate) ctes: Vec<Cte>,
    pub(crate) clauses: Clauses,
    /// First misapplied builder call, reported at compile time.
    pub(crate) build_error: Option<String>,
}

impl Statement {
    pub(crate) fn new(ctx: Context, kind: Kind) -> Self {
        Self {
            ctx,
            kind,
            ctes: Vec::new(),
            clauses: Clauses::default(),
            build_error: None,
        }
    }

    /// A new statement sharing this one's context. A pending WITH list is
    /// carried over; everything else starts empty.
    fn spawn(&self, kind: Kind) -> Statement {
        let mut next = Statement::new(self.ctx.clone(), kind);
        if matches!(self.kind, Kind::With) {
            next.ctes = self.ctes.clone();
            next.build_error = self.build_error.clone();
        }
        next
    }

    fn fail(mut self, message: impl Into<String>) -> Self {
        if self.build_error.is_none() {
            self.build_error = Some(message.into());
        }
        self
    }

    pub fn kind(&self) -> StatementType {
        match self.kind {
            Kind::Select => StatementType::Select,
            Kind::Insert(_) => StatementType::Insert,
            Kind::Update(_) => StatementType::Update,
            Kind::Delete(_) => StatementType::Delete,
            Kind::Create(_) => StatementType::Create,
            Kind::Drop(_) => StatementType::Drop,
            Kind::With => StatementType::With,
        }
    }

    pub fn vendor(&self) -> Vendor {
        self.ctx.vendor
    }

    pub fn options(&self) -> &CompileOptions {
        &self.ctx.options
    }

    // ==================== Cloning commands ====================

    /// Start a SELECT with the given projection. An empty list selects `*`.
    pub fn select<I, P>(&self, columns: I) -> Statement
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        let mut next = self.spawn(Kind::Select);
        next.clauses.projection = columns.into_iter().map(Into::into).collect();
        next
    }

    /// `SELECT DISTINCT ...`
    pub fn select_distinct<I, P>(&self, columns: I) -> Statement
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        self.select(columns).distinct()
    }

    /// Add a CTE. Called on a pending WITH list, the list is extended in the
    /// returned statement; the receiver is left unchanged.
    pub fn with(&self, name: impl Into<String>, body: impl Into<CteBody>) -> Statement {
        self.push_cte(name.into(), body.into(), false)
    }

    /// Add a recursive CTE whose body is `base UNION ALL step`.
    ///
    /// `step` may reference the CTE by name.
    pub fn with_recursive(
        &self,
        name: impl Into<String>,
        base: Statement,
        step: Statement,
    ) -> Statement {
        let body = base.union_all(step);
        self.push_cte(name.into(), CteBody::from(body), true)
    }

    fn push_cte(&self, name: String, body: CteBody, recursive: bool) -> Statement {
        let mut next = self.spawn(Kind::With);
        next.ctes.push(Cte {
            name,
            columns: Vec::new(),
            body,
            recursive,
        });
        next
    }

    /// `INSERT INTO table`
    pub fn insert_into(&self, table: impl Into<Table>) -> Statement {
        self.spawn(Kind::Insert(InsertParts {
            table: table.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            source: None,
            conflict: None,
        }))
    }

    /// `UPDATE table`
    pub fn update(&self, table: impl Into<Table>) -> Statement {
        self.spawn(Kind::Update(UpdateParts {
            table: table.into(),
            assignments: Vec::new(),
        }))
    }

    /// `DELETE FROM table`
    pub fn delete_from(&self, table: impl Into<Table>) -> Statement {
        self.spawn(Kind::Delete(table.into()))
    }

    /// `CREATE TABLE table`. Add columns with [`column`](Statement::column).
    pub fn create_table(&self, table: impl Into<Table>) -> Statement {
        self.spawn(Kind::Create(CreateParts {
            table: table.into(),
            columns: Vec::new(),
            if_not_exists: false,
        }))
    }

    /// CREATE TABLE for a [`Schema`] type.
    pub fn create_schema<T: Schema>(&self) -> Statement {
        let mut next = self.create_table(T::table());
        if let Kind::Create(parts) = &mut next.kind {
            parts.columns = T::column_defs();
        }
        next
    }

    /// `DROP TABLE table`
    pub fn drop_table(&self, table: impl Into<Table>) -> Statement {
        self.spawn(Kind::Drop(DropParts {
            table: table.into(),
            if_exists: false,
            cascade: false,
        }))
    }

    /// Use this statement as a FROM/JOIN source: `(<self>) AS alias`.
    pub fn aliased(&self, alias: impl Into<String>) -> Source {
        Source::Subquery {
            query: Box::new(self.clone()),
            alias: alias.into(),
        }
    }

    // ==================== SELECT list ====================

    /// Append one projection.
    pub fn add_select(mut self, column: impl Into<Projection>) -> Self {
        self.clauses.projection.push(column.into());
        self
    }

    /// `SELECT DISTINCT`
    pub fn distinct(mut self) -> Self {
        self.clauses.distinct = Distinct::All;
        self
    }

    /// `SELECT DISTINCT ON (...)`. Postgres only.
    pub fn distinct_on<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.clauses.distinct = Distinct::On(exprs.into_iter().map(Into::into).collect());
        self
    }

    // ==================== FROM / JOIN ====================

    /// Add a FROM source. Several sources render comma-separated.
    pub fn from(mut self, source: impl Into<Source>) -> Self {
        self.clauses.sources.push(source.into());
        self
    }

    /// Add a join without a predicate. Follow with [`on`](Statement::on)
    /// unless `kind` is [`JoinKind::Cross`].
    pub fn join(mut self, kind: JoinKind, source: impl Into<Source>) -> Self {
        self.clauses.joins.push(Join {
            kind,
            source: source.into(),
            on: None,
        });
        self
    }

    /// Set the predicate of the most recent join. Repeated typed conditions are ANDed.
    pub fn on(mut self, on: impl Into<JoinOn>) -> Self {
        let on = on.into();
        let Some(join) = self.clauses.joins.last_mut() else {
            return self.fail("ON requires a preceding JOIN");
        };
        match (join.on.take(), on) {
            (None, on) => join.on = Some(on),
            (Some(JoinOn::Condition(prev)), JoinOn::Condition(next)) => {
                join.on = Some(JoinOn::Condition(prev.and_(next)));
            }
            (Some(prev), _) => {
                join.on = Some(prev);
                return self.fail("a raw ON predicate cannot be combined with another");
            }
        }
        self
    }

    pub fn inner_join(self, source: impl Into<Source>, on: impl Into<JoinOn>) -> Self {
        self.join(JoinKind::Inner, source).on(on)
    }

    pub fn left_join(self, source: impl Into<Source>, on: impl Into<JoinOn>) -> Self {
        self.join(JoinKind::Left, source).on(on)
    }

    pub fn right_join(self, source: impl Into<Source>, on: impl Into<JoinOn>) -> Self {
        self.join(JoinKind::Right, source).on(on)
    }

    pub fn full_join(self, source: impl Into<Source>, on: impl Into<JoinOn>) -> Self {
        self.join(JoinKind::Full, source).on(on)
    }

    pub fn cross_join(self, source: impl Into<Source>) -> Self {
        self.join(JoinKind::Cross, source)
    }

    // ==================== WHERE ====================

    /// Add a WHERE condition, ANDed with earlier ones.
    ///
    /// A top-level AND group is spliced in, so `where_(a.and_(b))` and
    /// `where_(a).where_(b)` compile identically.
    pub fn where_(mut self, condition: Condition) -> Self {
        match condition {
            Condition::And(children) => self.clauses.filters.extend(children),
            other => self.clauses.filters.push(other),
        }
        self
    }

    /// Add raw WHERE text. It is never parameterized and is parenthesized
    /// when combined with other conditions.
    pub fn where_raw(mut self, sql: impl Into<String>) -> Self {
        self.clauses.filters.push(Condition::raw(sql));
        self
    }

    /// Add `"column" = value` for each pair, with unqualified column names.
    pub fn filter_by<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expr>,
    {
        for (column, value) in pairs {
            self.clauses.filters.push(Field::new(column).eq(value));
        }
        self
    }

    /// The combined WHERE tree, if any.
    pub fn where_condition(&self) -> Option<Condition> {
        match self.clauses.filters.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(Condition::all(many.iter().cloned())),
        }
    }

    // ==================== Grouping & ordering ====================

    pub fn group_by<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.clauses
            .group_by
            .extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Add a HAVING condition, ANDed with earlier ones.
    pub fn having(mut self, condition: Condition) -> Self {
        self.clauses.having.push(condition);
        self
    }

    /// Declare a named window: `WINDOW name AS (...)`.
    pub fn window(mut self, name: impl Into<String>, window: Window) -> Self {
        self.clauses.windows.push((name.into(), window));
        self
    }

    pub fn order_by(mut self, item: impl Into<OrderBy>) -> Self {
        self.clauses.order_by.push(item.into());
        self
    }

    // ==================== Pagination ====================

    pub fn limit(mut self, n: u64) -> Self {
        self.clauses.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.clauses.offset = Some(n);
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let size = per_page.max(1);
        self.clauses.limit = Some(size);
        self.clauses.offset = Some((page.max(1) - 1) * size);
        self
    }

    // ==================== Set operations ====================

    pub fn union(mut self, other: Statement) -> Self {
        self.clauses.compound.push((SetOp::Union, other));
        self
    }

    pub fn union_all(mut self, other: Statement) -> Self {
        self.clauses.compound.push((SetOp::UnionAll, other));
        self
    }

    // ==================== INSERT / UPDATE ====================

    /// INSERT column list.
    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnName>,
    {
        match &mut self.kind {
            Kind::Insert(parts) => {
                parts.columns.extend(columns.into_iter().map(Into::into));
                self
            }
            _ => self.fail("a column list requires an INSERT statement"),
        }
    }

    /// Add one VALUES row.
    pub fn values<I, E>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        match &mut self.kind {
            Kind::Insert(parts) => {
                parts.rows.push(row.into_iter().map(Into::into).collect());
                self
            }
            _ => self.fail("VALUES requires an INSERT statement"),
        }
    }

    /// `INSERT INTO t (...) SELECT ...`
    pub fn from_select(mut self, query: Statement) -> Self {
        match &mut self.kind {
            Kind::Insert(parts) => {
                parts.source = Some(Box::new(query));
                self
            }
            _ => self.fail("INSERT ... SELECT requires an INSERT statement"),
        }
    }

    /// `SET "column" = value`. The column is never table-qualified.
    pub fn set(mut self, column: impl Into<ColumnName>, value: impl Into<Expr>) -> Self {
        match &mut self.kind {
            Kind::Update(parts) => {
                parts.assignments.push((column.into(), value.into()));
                self
            }
            _ => self.fail("SET requires an UPDATE statement"),
        }
    }

    /// RETURNING list for INSERT, UPDATE and DELETE.
    pub fn returning<I, P>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        self.clauses
            .returning
            .extend(columns.into_iter().map(Into::into));
        self
    }

    // ==================== Upsert ====================

    fn conflict_mut(&mut self) -> Option<&mut OnConflict> {
        match &mut self.kind {
            Kind::Insert(parts) => Some(parts.conflict.get_or_insert_with(|| OnConflict {
                target: Vec::new(),
                action: ConflictAction::Nothing,
            })),
            _ => None,
        }
    }

    /// Conflict target columns. The action defaults to DO NOTHING.
    pub fn on_conflict<I, C>(mut self, target: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnName>,
    {
        match self.conflict_mut() {
            Some(conflict) => {
                conflict.target = target.into_iter().map(Into::into).collect();
                self
            }
            None => self.fail("ON CONFLICT requires an INSERT statement"),
        }
    }

    /// Ignore conflicting rows.
    pub fn do_nothing(mut self) -> Self {
        match self.conflict_mut() {
            Some(conflict) => {
                conflict.action = ConflictAction::Nothing;
                self
            }
            None => self.fail("DO NOTHING requires an INSERT statement"),
        }
    }

    /// Overwrite `columns` with the values of the row being inserted.
    pub fn do_update<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnName>,
    {
        let assigns = columns
            .into_iter()
            .map(|c| (c.into(), Assign::Excluded))
            .collect::<Vec<_>>();
        self.push_conflict_updates(assigns)
    }

    /// Set `column` to an arbitrary expression on conflict.
    pub fn do_update_set(self, column: impl Into<ColumnName>, value: impl Into<Expr>) -> Self {
        self.push_conflict_updates(vec![(column.into(), Assign::Expr(value.into()))])
    }

    fn push_conflict_updates(mut self, assigns: Vec<(ColumnName, Assign)>) -> Self {
        match self.conflict_mut() {
            Some(conflict) => {
                match &mut conflict.action {
                    ConflictAction::Update(existing) => existing.extend(assigns),
                    action => *action = ConflictAction::Update(assigns),
                }
                self
            }
            None => self.fail("DO UPDATE requires an INSERT statement"),
        }
    }

    // ==================== DDL ====================

    /// Add a column to CREATE TABLE.
    pub fn column(mut self, column: ColumnDef) -> Self {
        match &mut self.kind {
            Kind::Create(parts) => {
                parts.columns.push(column);
                self
            }
            _ => self.fail("a column definition requires a CREATE TABLE statement"),
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        match &mut self.kind {
            Kind::Create(parts) => {
                parts.if_not_exists = true;
                self
            }
            _ => self.fail("IF NOT EXISTS requires a CREATE TABLE statement"),
        }
    }

    pub fn if_exists(mut self) -> Self {
        match &mut self.kind {
            Kind::Drop(parts) => {
                parts.if_exists = true;
                self
            }
            _ => self.fail("IF EXISTS requires a DROP TABLE statement"),
        }
    }

    pub fn cascade(mut self) -> Self {
        match &mut self.kind {
            Kind::Drop(parts) => {
                parts.cascade = true;
                self
            }
            _ => self.fail("CASCADE requires a DROP TABLE statement"),
        }
    }

    // ==================== CTE ====================

    /// Column list of the most recent CTE: `name (a, b) AS (...)`.
    pub fn with_columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        match self.ctes.last_mut() {
            Some(cte) => {
                cte.columns = columns.into_iter().map(Into::into).collect();
                self
            }
            None => self.fail("CTE column list requires a preceding WITH"),
        }
    }

    // ==================== Compile ====================

    /// Compile for this statement's vendor.
    pub fn compile(&self) -> SqlResult<Compiled> {
        compiler::compile(self, self.ctx.vendor)
    }

    /// Compile for another vendor.
    pub fn compile_for(&self, vendor: Vendor) -> SqlResult<Compiled> {
        compiler::compile(self, vendor)
    }
}
