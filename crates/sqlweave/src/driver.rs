//! Driver adapter boundary.
//!
//! The compiler never talks to a database. A [`Driver`] receives the compiled
//! `(sql, params)` pair and returns rows or an affected-row count; its errors
//! surface unchanged.

#[cfg(feature = "postgres")]
mod postgres;

use crate::dialect::Vendor;
use crate::error::{SqlError, SqlResult};
use crate::logging;
use crate::statement::Statement;
use crate::value::Value;
use std::sync::Arc;

/// Executes compiled statements against a live database.
pub trait Driver: Sync {
    /// Vendor whose placeholder convention this driver expects.
    fn vendor(&self) -> Vendor;

    /// Run a row-returning statement.
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = SqlResult<Vec<Row>>> + Send;

    /// Run a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = SqlResult<u64>> + Send;
}

/// A result row: column names plus decoded values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: impl Into<Arc<[String]>>, values: Vec<Value>) -> Self {
        Self {
            columns: columns.into(),
            values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value of the first column with this name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|i| self.values.get(i))
    }

    pub fn get_idx(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Like [`get`](Row::get), failing with a decode error for unknown columns.
    pub fn try_get(&self, name: &str) -> SqlResult<&Value> {
        self.get(name)
            .ok_or_else(|| SqlError::decode(name, "no such column in row"))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Driver column names with the statement's known output names laid over
/// them. `None` when the widths differ or nothing is known.
fn named_columns(known: &[Option<String>], driver: &[String]) -> Option<Arc<[String]>> {
    if known.len() != driver.len() || known.iter().all(Option::is_none) {
        return None;
    }
    Some(
        known
            .iter()
            .zip(driver)
            .map(|(ours, theirs)| ours.as_ref().unwrap_or(theirs).clone())
            .collect(),
    )
}

impl Statement {
    /// Compile for the driver's vendor and fetch all rows.
    ///
    /// Columns the statement names (plain columns, aliases, functions) are
    /// renamed accordingly. Stars, raw text and unaliased literals keep the
    /// driver's column names.
    pub async fn fetch_all<D: Driver>(&self, driver: &D) -> SqlResult<Vec<Row>> {
        let compiled = self.compile_for(driver.vendor())?;
        logging::log_execution(&compiled, &self.options().log);
        let rows = driver.query(&compiled.sql, &compiled.params).await?;

        // Rows of one result set usually share their column list.
        let mut last: Option<(Arc<[String]>, Option<Arc<[String]>>)> = None;
        let mut named = Vec::with_capacity(rows.len());
        for row in rows {
            let columns = match &last {
                Some((seen, columns)) if **seen == *row.columns => columns.clone(),
                _ => {
                    let columns = named_columns(&compiled.columns, &row.columns);
                    last = Some((row.columns.clone(), columns.clone()));
                    columns
                }
            };
            named.push(match columns {
                Some(columns) => Row::new(columns, row.values),
                None => row,
            });
        }
        Ok(named)
    }

    /// Fetch the first row, if any.
    pub async fn fetch_optional<D: Driver>(&self, driver: &D) -> SqlResult<Option<Row>> {
        Ok(self.fetch_all(driver).await?.into_iter().next())
    }

    /// Compile for the driver's vendor and execute, returning affected rows.
    pub async fn execute<D: Driver>(&self, driver: &D) -> SqlResult<u64> {
        let compiled = self.compile_for(driver.vendor())?;
        logging::log_execution(&compiled, &self.options().log);
        driver.execute(&compiled.sql, &compiled.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lookup_by_name_and_index() {
        let row = Row::new(
            vec!["id".to_string(), "name".to_string()],
            vec![Value::Int(7), Value::Text("ann".into())],
        );
        assert_eq!(row.get("name"), Some(&Value::Text("ann".into())));
        assert_eq!(row.get_idx(0), Some(&Value::Int(7)));
        assert_eq!(row.len(), 2);
        assert!(row.get("missing").is_none());
        assert!(matches!(row.try_get("missing"), Err(SqlError::Decode { .. })));
    }

    #[test]
    fn named_columns_keep_driver_names_where_unknown() {
        let driver = ["count".to_string(), "?column?".to_string(), "c".to_string()];
        let known = [None, Some("x".to_string()), None];
        let merged = named_columns(&known, &driver).unwrap();
        assert_eq!(merged.as_ref(), ["count", "x", "c"]);

        assert!(named_columns(&[None, None, None], &driver).is_none());
        assert!(named_columns(&[Some("x".to_string())], &driver).is_none());
    }
}
