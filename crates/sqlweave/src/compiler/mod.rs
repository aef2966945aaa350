//! Statement compiler.
//!
//! A depth-first, left-to-right walk over a [`Statement`] that writes SQL text
//! into one buffer and hands every literal to a shared [`Binder`]. Because the
//! text and the parameter list grow together, placeholder order always equals
//! parameter order, across CTEs and subqueries alike.
//!
//! Compilation is all-or-nothing: the first violation aborts and no SQL is
//! returned.

mod expr;


use crate::binder::Binder;
use crate::config::{CompileOptions, DangerousDmlPolicy};
use crate::dialect::{BareOffset, Dialect, Feature, Pagination, UpsertStyle, Vendor};
use crate::error::{SqlError, SqlResult};
use crate::expr::{ColumnName, Condition, Projection, Table};
use crate::ident::validate_plain;
use crate::logging;
use crate::schema::ColumnDef;
use crate::statement::{
    Assign, Clauses, ConflictAction, CreateParts, Cte, CteBody, Distinct, DropParts, InsertParts,
    JoinKind, JoinOn, Kind, SetOp, Source, Statement, UpdateParts,
};
use crate::value::Value;

/// Output of one compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub sql: String,
    /// Bound values, one per placeholder, in text order.
    pub params: Vec<Value>,
    /// Output column names of the SELECT (or RETURNING) list, one per item.
    /// `None` where the name is chosen by the database: stars, raw text,
    /// literals, subqueries and conditions without an alias.
    pub columns: Vec<Option<String>>,
    pub vendor: Vendor,
    /// Number of raw text fragments spliced in verbatim.
    pub raw_fragments: usize,
}

impl Compiled {
    /// Whether any unparameterized raw text was spliced into the SQL.
    pub fn has_raw_fragments(&self) -> bool {
        self.raw_fragments > 0
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

pub(crate) fn compile(statement: &Statement, vendor: Vendor) -> SqlResult<Compiled> {
    let dialect = Dialect::for_vendor(vendor);
    let mut compiler = Compiler::new(dialect, &statement.ctx.options);
    let mut sql = String::with_capacity(128);

    match compiler.statement(statement, &mut sql) {
        Ok(columns) => {
            let compiled = Compiled {
                sql,
                params: compiler.binder.into_params(),
                columns,
                vendor,
                raw_fragments: compiler.raw_fragments,
            };
            logging::log_compiled(&compiled);
            Ok(compiled)
        }
        Err(err) => {
            logging::log_compile_error(vendor, &err);
            Err(err)
        }
    }
}

/// Table identities visible to one statement.
#[derive(Default)]
struct Frame {
    /// CTE names defined by this statement's WITH.
    ctes: Vec<String>,
    /// FROM/JOIN identities and DML targets.
    sources: Vec<String>,
}

impl Frame {
    fn contains(&self, identity: &str) -> bool {
        self.ctes.iter().chain(&self.sources).any(|name| name == identity)
    }
}

pub(crate) struct Compiler<'a> {
    dialect: &'static Dialect,
    options: &'a CompileOptions,
    binder: Binder,
    /// One frame of visible table identities per statement being compiled.
    scopes: Vec<Frame>,
    /// Per frame: emit bare column names for tables of that frame.
    bare_columns: Vec<bool>,
    raw_fragments: usize,
}

impl<'a> Compiler<'a> {
    fn new(dialect: &'static Dialect, options: &'a CompileOptions) -> Self {
        Self {
            dialect,
            options,
            binder: Binder::new(dialect),
            scopes: Vec::new(),
            bare_columns: Vec::new(),
            raw_fragments: 0,
        }
    }

    // ==================== Scope ====================

    fn register(&mut self, identity: &str) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.sources.push(identity.to_string());
        }
    }

    fn register_cte(&mut self, name: &str) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.ctes.push(name.to_string());
        }
    }

    /// Run `f` with the current frame's FROM/JOIN identities hidden.
    ///
    /// UNION members and derived tables cannot see their siblings' sources;
    /// CTE names and enclosing frames stay visible.
    fn isolated<T>(&mut self, f: impl FnOnce(&mut Self) -> SqlResult<T>) -> SqlResult<T> {
        let hidden = self
            .scopes
            .last_mut()
            .map(|frame| std::mem::take(&mut frame.sources));
        let result = f(self);
        if let (Some(frame), Some(sources)) = (self.scopes.last_mut(), hidden) {
            frame.sources = sources;
        }
        result
    }

    fn register_source(&mut self, source: &Source) {
        match source {
            Source::Table(table) => self.register(table.identity()),
            Source::Subquery { alias, .. } => self.register(alias),
            Source::Raw(sql) => self.register(sql.trim()),
        }
    }

    fn in_scope(&self, identity: &str) -> bool {
        self.scopes.iter().any(|frame| frame.contains(identity))
    }

    /// Whether a field of `identity` may drop its table qualifier.
    fn bare_in_current_frame(&self, identity: &str) -> bool {
        self.bare_columns.last().copied().unwrap_or(false)
            && self
                .scopes
                .last()
                .is_some_and(|frame| frame.contains(identity))
    }

    fn check_ident(&self, name: &str) -> SqlResult<()> {
        if self.options.validate_identifiers {
            validate_plain(name)?;
        }
        Ok(())
    }

    // ==================== Statements ====================

    fn statement(&mut self, stmt: &Statement, out: &mut String) -> SqlResult<Vec<Option<String>>> {
        if let Some(message) = &stmt.build_error {
            return Err(SqlError::invalid_clause(message.clone()));
        }
        if matches!(stmt.kind, Kind::With) {
            return Err(SqlError::empty("WITH has no main statement"));
        }
        validate_clauses(stmt)?;

        let single_source = match stmt.kind {
            Kind::Select => stmt.clauses.sources.len() + stmt.clauses.joins.len() == 1,
            _ => true,
        };
        self.scopes.push(Frame::default());
        self.bare_columns
            .push(!self.options.qualify_columns && single_source);
        let result = self.statement_body(stmt, out);
        self.bare_columns.pop();
        self.scopes.pop();
        result
    }

    fn statement_body(
        &mut self,
        stmt: &Statement,
        out: &mut String,
    ) -> SqlResult<Vec<Option<String>>> {
        if !stmt.ctes.is_empty() {
            self.ctes(&stmt.ctes, out)?;
            out.push(' ');
        }
        match &stmt.kind {
            Kind::Select => self.select(&stmt.clauses, out),
            Kind::Insert(parts) => self.insert(parts, &stmt.clauses, out),
            Kind::Update(parts) => self.update(parts, &stmt.clauses, out),
            Kind::Delete(table) => self.delete(table, &stmt.clauses, out),
            Kind::Create(parts) => self.create(parts, out).map(|()| Vec::new()),
            Kind::Drop(parts) => self.drop(parts, out).map(|()| Vec::new()),
            Kind::With => Err(SqlError::empty("WITH has no main statement")),
        }
    }

    /// `(<statement>)` with its own scope frame.
    fn subquery(&mut self, stmt: &Statement, out: &mut String) -> SqlResult<()> {
        out.push('(');
        self.statement(stmt, out)?;
        out.push(')');
        Ok(())
    }

    fn ctes(&mut self, ctes: &[Cte], out: &mut String) -> SqlResult<()> {
        out.push_str("WITH ");
        if self.dialect.recursive_keyword && ctes.iter().any(|c| c.recursive) {
            out.push_str("RECURSIVE ");
        }
        for (i, cte) in ctes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.check_ident(&cte.name)?;
            // A recursive body refers to itself.
            if cte.recursive {
                self.register_cte(&cte.name);
            }
            self.dialect.write_ident(out, &cte.name);
            if !cte.columns.is_empty() {
                out.push_str(" (");
                for (j, column) in cte.columns.iter().enumerate() {
                    if j > 0 {
                        out.push_str(", ");
                    }
                    self.check_ident(column)?;
                    self.dialect.write_ident(out, column);
                }
                out.push(')');
            }
            out.push_str(" AS ");
            match &cte.body {
                CteBody::Statement(body) => self.subquery(body, out)?,
                CteBody::Raw(sql) => {
                    out.push('(');
                    out.push_str(sql);
                    out.push(')');
                    self.raw_fragments += 1;
                }
            }
            if !cte.recursive {
                self.register_cte(&cte.name);
            }
        }
        Ok(())
    }

    fn select(&mut self, c: &Clauses, out: &mut String) -> SqlResult<Vec<Option<String>>> {
        if c.sources.is_empty() {
            if let Some(clause) = c
                .used()
                .find(|name| matches!(*name, "JOIN" | "WHERE" | "GROUP BY" | "HAVING" | "ORDER BY"))
            {
                return Err(SqlError::empty(format!("SELECT with {clause} has no FROM")));
            }
            if c.projection.is_empty() {
                return Err(SqlError::empty("SELECT has neither columns nor FROM"));
            }
        }
        for source in &c.sources {
            self.register_source(source);
        }
        for join in &c.joins {
            self.register_source(&join.source);
        }

        out.push_str("SELECT ");
        match &c.distinct {
            Distinct::None => {}
            Distinct::All => out.push_str("DISTINCT "),
            Distinct::On(exprs) => {
                self.dialect.require(Feature::DistinctOn)?;
                out.push_str("DISTINCT ON (");
                self.expr_list(exprs, out)?;
                out.push_str(") ");
            }
        }
        let columns = self.projection_list(&c.projection, out)?;

        if c.sources.is_empty() {
            if self.dialect.vendor == Vendor::Oracle {
                out.push_str(" FROM DUAL");
            }
        } else {
            out.push_str(" FROM ");
            for (i, source) in c.sources.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.source(source, out)?;
            }
        }

        for join in &c.joins {
            match join.kind {
                JoinKind::Right => self.dialect.require(Feature::RightJoin)?,
                JoinKind::Full => self.dialect.require(Feature::FullJoin)?,
                _ => {}
            }
            out.push(' ');
            out.push_str(join.kind.as_sql());
            out.push(' ');
            self.source(&join.source, out)?;
            match (join.kind, &join.on) {
                (JoinKind::Cross, None) => {}
                (JoinKind::Cross, Some(_)) => {
                    return Err(SqlError::invalid_clause("CROSS JOIN does not take an ON predicate"));
                }
                (kind, None) => {
                    return Err(SqlError::invalid_clause(format!(
                        "{} requires an ON predicate",
                        kind.as_sql()
                    )));
                }
                (_, Some(JoinOn::Condition(cond))) => {
                    out.push_str(" ON ");
                    self.condition(cond, out)?;
                }
                (_, Some(JoinOn::Raw(sql))) => {
                    out.push_str(" ON ");
                    out.push_str(sql);
                    self.raw_fragments += 1;
                }
            }
        }

        self.where_clause(&c.filters, out)?;

        if !c.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            self.expr_list(&c.group_by, out)?;
        }
        if !c.having.is_empty() {
            out.push_str(" HAVING ");
            self.conjunction(&c.having, out)?;
        }
        if !c.windows.is_empty() {
            self.dialect.require(Feature::NamedWindow)?;
            out.push_str(" WINDOW ");
            for (i, (name, window)) in c.windows.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.dialect.write_ident(out, name);
                out.push_str(" AS (");
                self.window_spec(window, false, out)?;
                out.push(')');
            }
        }
        for (op, member) in &c.compound {
            out.push_str(match op {
                SetOp::Union => " UNION ",
                SetOp::UnionAll => " UNION ALL ",
            });
            self.isolated(|this| this.statement(member, out))?;
        }
        if !c.order_by.is_empty() {
            out.push_str(" ORDER BY ");
            self.order_list(&c.order_by, out)?;
        }
        self.pagination(c, out)?;
        Ok(columns)
    }

    fn insert(
        &mut self,
        parts: &InsertParts,
        c: &Clauses,
        out: &mut String,
    ) -> SqlResult<Vec<Option<String>>> {
        self.register(parts.table.identity());

        let ignore = match &parts.conflict {
            Some(conflict) => {
                self.dialect.require(Feature::Upsert)?;
                self.dialect.upsert == UpsertStyle::OnDuplicateKey
                    && conflict.action == ConflictAction::Nothing
            }
            None => false,
        };
        out.push_str(if ignore { "INSERT IGNORE INTO " } else { "INSERT INTO " });
        self.table_source(&parts.table, out)?;

        if !parts.columns.is_empty() {
            out.push_str(" (");
            self.column_names(&parts.columns, out)?;
            out.push(')');
        }

        match (&parts.source, parts.rows.is_empty()) {
            (Some(_), false) => {
                return Err(SqlError::invalid_clause("INSERT cannot take both VALUES and a SELECT"));
            }
            (Some(query), true) => {
                out.push(' ');
                self.statement(query, out)?;
            }
            (None, true) if parts.columns.is_empty() => match self.dialect.vendor {
                Vendor::MySql | Vendor::MariaDb => out.push_str(" () VALUES ()"),
                _ => out.push_str(" DEFAULT VALUES"),
            },
            (None, true) => {
                return Err(SqlError::empty("INSERT has a column list but no VALUES"));
            }
            (None, false) => {
                let width = match parts.columns.len() {
                    0 => parts.rows[0].len(),
                    n => n,
                };
                out.push_str(" VALUES ");
                for (i, row) in parts.rows.iter().enumerate() {
                    if row.len() != width {
                        return Err(SqlError::invalid_clause(format!(
                            "VALUES row {} has {} values, expected {}",
                            i + 1,
                            row.len(),
                            width
                        )));
                    }
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push('(');
                    self.expr_list(row, out)?;
                    out.push(')');
                }
            }
        }

        if let Some(conflict) = &parts.conflict {
            match self.dialect.upsert {
                UpsertStyle::OnConflict => {
                    out.push_str(" ON CONFLICT");
                    if !conflict.target.is_empty() {
                        out.push_str(" (");
                        self.column_names(&conflict.target, out)?;
                        out.push(')');
                    }
                    match &conflict.action {
                        ConflictAction::Nothing => out.push_str(" DO NOTHING"),
                        ConflictAction::Update(assigns) => {
                            if conflict.target.is_empty() {
                                return Err(SqlError::invalid_clause(
                                    "ON CONFLICT DO UPDATE requires a conflict target",
                                ));
                            }
                            out.push_str(" DO UPDATE SET ");
                            self.conflict_assignments(assigns, out)?;
                        }
                    }
                }
                UpsertStyle::OnDuplicateKey => {
                    if let ConflictAction::Update(assigns) = &conflict.action {
                        out.push_str(" ON DUPLICATE KEY UPDATE ");
                        self.conflict_assignments(assigns, out)?;
                    }
                }
                UpsertStyle::Unsupported => {
                    return Err(SqlError::unsupported(Feature::Upsert, self.dialect.vendor));
                }
            }
        }

        self.returning(&c.returning, out)
    }

    fn conflict_assignments(&mut self, assigns: &[(ColumnName, Assign)], out: &mut String) -> SqlResult<()> {
        for (i, (column, value)) in assigns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.column_name(column, out)?;
            out.push_str(" = ");
            match value {
                Assign::Expr(expr) => self.expr(expr, out)?,
                Assign::Excluded => match self.dialect.upsert {
                    UpsertStyle::OnDuplicateKey => {
                        out.push_str("VALUES(");
                        self.dialect.write_ident(out, column.as_str());
                        out.push(')');
                    }
                    _ => {
                        out.push_str("EXCLUDED.");
                        self.dialect.write_ident(out, column.as_str());
                    }
                },
            }
        }
        Ok(())
    }

    fn update(
        &mut self,
        parts: &UpdateParts,
        c: &Clauses,
        out: &mut String,
    ) -> SqlResult<Vec<Option<String>>> {
        if parts.assignments.is_empty() {
            return Err(SqlError::empty("UPDATE has no SET assignments"));
        }
        if c.filters.is_empty() {
            self.dml_policy("UPDATE", &parts.table, self.options.update_without_where)?;
        }
        self.register(parts.table.identity());

        out.push_str("UPDATE ");
        self.table_source(&parts.table, out)?;
        out.push_str(" SET ");
        for (i, (column, value)) in parts.assignments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.column_name(column, out)?;
            out.push_str(" = ");
            self.expr(value, out)?;
        }
        self.where_clause(&c.filters, out)?;
        self.returning(&c.returning, out)
    }

    fn delete(
        &mut self,
        table: &Table,
        c: &Clauses,
        out: &mut String,
    ) -> SqlResult<Vec<Option<String>>> {
        if c.filters.is_empty() {
            self.dml_policy("DELETE", table, self.options.delete_without_where)?;
        }
        self.register(table.identity());

        out.push_str("DELETE FROM ");
        self.table_source(table, out)?;
        self.where_clause(&c.filters, out)?;
        self.returning(&c.returning, out)
    }

    fn dml_policy(&self, verb: &str, table: &Table, policy: DangerousDmlPolicy) -> SqlResult<()> {
        match policy {
            DangerousDmlPolicy::Allow => Ok(()),
            DangerousDmlPolicy::Warn => {
                logging::warn_unfiltered_dml(verb, table.name());
                Ok(())
            }
            DangerousDmlPolicy::Error => Err(SqlError::invalid_clause(format!(
                "{verb} on \"{}\" without WHERE is rejected by policy",
                table.name()
            ))),
        }
    }

    fn create(&mut self, parts: &CreateParts, out: &mut String) -> SqlResult<()> {
        if parts.columns.is_empty() {
            return Err(SqlError::empty("CREATE TABLE has no columns"));
        }
        out.push_str("CREATE TABLE ");
        if parts.if_not_exists {
            self.dialect.require(Feature::IfNotExists)?;
            out.push_str("IF NOT EXISTS ");
        }
        self.table_name(&parts.table, out)?;
        out.push_str(" (");

        let keys: Vec<&ColumnDef> = parts.columns.iter().filter(|c| c.primary_key).collect();
        for (i, column) in parts.columns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.check_ident(&column.name)?;
            self.dialect.write_ident(out, &column.name);
            out.push(' ');
            out.push_str(&self.dialect.type_name(&column.ty));
            if let Some(default) = &column.default {
                out.push_str(" DEFAULT ");
                out.push_str(&default.to_sql_inline(self.dialect));
            }
            if !column.nullable {
                out.push_str(" NOT NULL");
            }
            if column.primary_key && keys.len() == 1 {
                out.push_str(" PRIMARY KEY");
            }
            if column.unique {
                out.push_str(" UNIQUE");
            }
        }
        if keys.len() > 1 {
            out.push_str(", PRIMARY KEY (");
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.dialect.write_ident(out, &key.name);
            }
            out.push(')');
        }
        out.push(')');
        Ok(())
    }

    fn drop(&mut self, parts: &DropParts, out: &mut String) -> SqlResult<()> {
        out.push_str("DROP TABLE ");
        if parts.if_exists {
            self.dialect.require(Feature::DropIfExists)?;
            out.push_str("IF EXISTS ");
        }
        self.table_name(&parts.table, out)?;
        if parts.cascade {
            self.dialect.require(Feature::DropCascade)?;
            out.push_str(" CASCADE");
        }
        Ok(())
    }

    // ==================== Clauses ====================

    fn where_clause(&mut self, filters: &[Condition], out: &mut String) -> SqlResult<()> {
        if filters.is_empty() {
            return Ok(());
        }
        out.push_str(" WHERE ");
        self.conjunction(filters, out)
    }

    /// Flat `a AND b AND c`. Raw entries are parenthesized when not alone.
    fn conjunction(&mut self, conditions: &[Condition], out: &mut String) -> SqlResult<()> {
        for (i, cond) in conditions.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            if conditions.len() > 1 {
                self.operand(cond, out)?;
            } else {
                self.condition(cond, out)?;
            }
        }
        Ok(())
    }

    fn returning(
        &mut self,
        items: &[Projection],
        out: &mut String,
    ) -> SqlResult<Vec<Option<String>>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        self.dialect.require(Feature::Returning)?;
        out.push_str(" RETURNING ");
        self.projection_list(items, out)
    }

    fn projection_list(
        &mut self,
        items: &[Projection],
        out: &mut String,
    ) -> SqlResult<Vec<Option<String>>> {
        if items.is_empty() {
            out.push('*');
            return Ok(vec![None]);
        }
        let mut columns = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let expr = item.expr();
            self.expr(expr, out)?;
            if let Some(alias) = expr.projection_alias() {
                out.push_str(" AS ");
                self.dialect.write_ident(out, alias);
            }
            columns.push(expr.output_name());
        }
        Ok(columns)
    }

    fn pagination(&mut self, c: &Clauses, out: &mut String) -> SqlResult<()> {
        let (limit, offset) = (c.limit, c.offset);
        if limit.is_none() && offset.is_none() {
            return Ok(());
        }
        match self.dialect.pagination {
            Pagination::LimitOffset { bare_offset } => match (limit, offset) {
                (Some(n), offset) => {
                    out.push_str(&format!(" LIMIT {n}"));
                    if let Some(m) = offset {
                        out.push_str(&format!(" OFFSET {m}"));
                    }
                }
                (None, Some(m)) => match bare_offset {
                    BareOffset::Allowed => out.push_str(&format!(" OFFSET {m}")),
                    BareOffset::LimitSentinel(sentinel) => {
                        out.push_str(&format!(" LIMIT {sentinel} OFFSET {m}"));
                    }
                    BareOffset::Forbidden => {
                        return Err(SqlError::invalid_clause(format!(
                            "OFFSET without LIMIT is not supported by the {} dialect",
                            self.dialect.vendor
                        )));
                    }
                },
                (None, None) => {}
            },
            Pagination::OffsetFetch { requires_order_by } => {
                if requires_order_by && c.order_by.is_empty() {
                    return Err(SqlError::invalid_clause(format!(
                        "OFFSET/FETCH requires ORDER BY in the {} dialect",
                        self.dialect.vendor
                    )));
                }
                match (limit, offset) {
                    (Some(n), None) if !requires_order_by => {
                        out.push_str(&format!(" FETCH FIRST {n} ROWS ONLY"));
                    }
                    (Some(n), m) => {
                        out.push_str(&format!(
                            " OFFSET {} ROWS FETCH NEXT {n} ROWS ONLY",
                            m.unwrap_or(0)
                        ));
                    }
                    (None, Some(m)) => out.push_str(&format!(" OFFSET {m} ROWS")),
                    (None, None) => {}
                }
            }
            Pagination::OffsetLimit => {
                if let Some(m) = offset {
                    out.push_str(&format!(" OFFSET {m}"));
                }
                if let Some(n) = limit {
                    out.push_str(&format!(" LIMIT {n}"));
                }
            }
        }
        Ok(())
    }

    // ==================== Names ====================

    /// Schema-qualified table name, without alias.
    fn table_name(&self, table: &Table, out: &mut String) -> SqlResult<()> {
        for segment in table.schema_path() {
            self.check_ident(segment)?;
            self.dialect.write_ident(out, segment);
            out.push('.');
        }
        self.check_ident(table.name())?;
        self.dialect.write_ident(out, table.name());
        Ok(())
    }

    /// Table name followed by its alias, if any.
    fn table_source(&self, table: &Table, out: &mut String) -> SqlResult<()> {
        self.table_name(table, out)?;
        if let Some(alias) = table.alias_name() {
            self.check_ident(alias)?;
            self.alias_keyword(out);
            self.dialect.write_ident(out, alias);
        }
        Ok(())
    }

    fn alias_keyword(&self, out: &mut String) {
        out.push_str(if self.dialect.table_alias_keyword { " AS " } else { " " });
    }

    fn source(&mut self, source: &Source, out: &mut String) -> SqlResult<()> {
        match source {
            Source::Table(table) => self.table_source(table, out),
            Source::Subquery { query, alias } => {
                self.isolated(|this| this.subquery(query, out))?;
                self.check_ident(alias)?;
                self.alias_keyword(out);
                self.dialect.write_ident(out, alias);
                Ok(())
            }
            Source::Raw(sql) => {
                out.push_str(sql);
                self.raw_fragments += 1;
                Ok(())
            }
        }
    }

    fn column_name(&self, column: &ColumnName, out: &mut String) -> SqlResult<()> {
        self.check_ident(column.as_str())?;
        self.dialect.write_ident(out, column.as_str());
        Ok(())
    }

    fn column_names(&self, columns: &[ColumnName], out: &mut String) -> SqlResult<()> {
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.column_name(column, out)?;
        }
        Ok(())
    }
}

/// Reject clauses that make no sense for the statement kind.
fn validate_clauses(stmt: &Statement) -> SqlResult<()> {
    let allowed: &[&str] = match stmt.kind {
        Kind::Select => &[
            "SELECT list",
            "DISTINCT",
            "FROM",
            "JOIN",
            "WHERE",
            "GROUP BY",
            "HAVING",
            "WINDOW",
            "ORDER BY",
            "LIMIT",
            "OFFSET",
            "UNION",
        ],
        Kind::Insert(_) => &["RETURNING"],
        Kind::Update(_) | Kind::Delete(_) => &["WHERE", "RETURNING"],
        Kind::Create(_) | Kind::Drop(_) | Kind::With => &[],
    };
    match stmt.clauses.used().find(|clause| !allowed.contains(clause)) {
        Some(clause) => Err(SqlError::invalid_clause(format!(
            "{clause} is not valid in a {} statement",
            stmt.kind()
        ))),
        None => Ok(()),
    }
}
