use super::{Context, CteBody, Kind, Statement};
use crate::config::CompileOptions;
use crate::dialect::Vendor;
use crate::driver::Driver;
use crate::expr::{Projection, Table};
use crate::schema::Schema;
use std::sync::Arc;

/// Entry point for building statements against one vendor.
///
/// Every statement spawned from a `Query` inherits its vendor and options.
///
/// ```ignore
/// let q = Query::new(Vendor::Sqlite);
/// let users = Table::new("users");
/// let compiled = q.delete_from(&users).where_(users.col("id").eq(1)).compile()?;
/// assert_eq!(compiled.sql, r#"DELETE FROM "users" WHERE "users"."id" = ?"#);
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    ctx: Context,
}

impl Query {
    pub fn new(vendor: Vendor) -> Self {
        Self {
            ctx: Context {
                vendor,
                options: Arc::new(CompileOptions::default()),
            },
        }
    }

    /// Builder for a driver's vendor.
    pub fn for_driver<D: Driver>(driver: &D) -> Self {
        Self::new(driver.vendor())
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.ctx.options = Arc::new(options);
        self
    }

    pub fn vendor(&self) -> Vendor {
        self.ctx.vendor
    }

    pub fn options(&self) -> &CompileOptions {
        &self.ctx.options
    }

    /// An empty WITH list: spawning from it yields a plain statement.
    fn root(&self) -> Statement {
        Statement::new(self.ctx.clone(), Kind::With)
    }

    pub fn select<I, P>(&self, columns: I) -> Statement
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        self.root().select(columns)
    }

    pub fn select_distinct<I, P>(&self, columns: I) -> Statement
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        self.root().select_distinct(columns)
    }

    pub fn with(&self, name: impl Into<String>, body: impl Into<CteBody>) -> Statement {
        self.root().with(name, body)
    }

    pub fn with_recursive(
        &self,
        name: impl Into<String>,
        base: Statement,
        step: Statement,
    ) -> Statement {
        self.root().with_recursive(name, base, step)
    }

    pub fn insert_into(&self, table: impl Into<Table>) -> Statement {
        self.root().insert_into(table)
    }

    pub fn update(&self, table: impl Into<Table>) -> Statement {
        self.root().update(table)
    }

    pub fn delete_from(&self, table: impl Into<Table>) -> Statement {
        self.root().delete_from(table)
    }

    pub fn create_table(&self, table: impl Into<Table>) -> Statement {
        self.root().create_table(table)
    }

    pub fn create_schema<T: Schema>(&self) -> Statement {
        self.root().create_schema::<T>()
    }

    pub fn drop_table(&self, table: impl Into<Table>) -> Statement {
        self.root().drop_table(table)
    }
}
