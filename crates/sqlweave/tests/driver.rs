//! Execution through the `Driver` boundary with an in-memory driver.

use sqlweave::{Driver, Expr, Query, Row, SqlError, SqlResult, Table, Value, Vendor};
use std::sync::Mutex;

/// Records every call and answers with canned rows.
struct RecordingDriver {
    vendor: Vendor,
    rows: Vec<Row>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl RecordingDriver {
    fn new(vendor: Vendor, rows: Vec<Row>) -> Self {
        Self {
            vendor,
            rows,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Driver for RecordingDriver {
    fn vendor(&self) -> Vendor {
        self.vendor
    }

    async fn query(&self, sql: &str, params: &[Value]) -> SqlResult<Vec<Row>> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        Ok(self.rows.clone())
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> SqlResult<u64> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        Ok(3)
    }
}

/// Fails every call, standing in for a broken connection.
struct FailingDriver;

impl Driver for FailingDriver {
    fn vendor(&self) -> Vendor {
        Vendor::Postgres
    }

    async fn query(&self, _sql: &str, _params: &[Value]) -> SqlResult<Vec<Row>> {
        Err(SqlError::Driver("connection reset".into()))
    }

    async fn execute(&self, _sql: &str, _params: &[Value]) -> SqlResult<u64> {
        Err(SqlError::Driver("connection reset".into()))
    }
}

fn driver_row(values: Vec<Value>) -> Row {
    let columns: Vec<String> = (0..values.len()).map(|i| format!("col{i}")).collect();
    Row::new(columns, values)
}

#[tokio::test]
async fn fetch_all_compiles_for_driver_vendor() {
    let driver = RecordingDriver::new(
        Vendor::MsSql,
        vec![driver_row(vec![Value::Int(1), Value::Text("ann".into())])],
    );
    let users = Table::new("users");

    // Built for Postgres, executed under the driver's vendor.
    let rows = Query::new(Vendor::Postgres)
        .select([users.col("id"), users.col("name")])
        .from(&users)
        .where_(users.col("age").gt(18))
        .fetch_all(&driver)
        .await
        .unwrap();

    let calls = driver.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].0,
        "SELECT [users].[id], [users].[name] FROM [users] WHERE [users].[age] > @P1"
    );
    assert_eq!(calls[0].1, vec![Value::Int(18)]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].columns(), ["id", "name"]);
    assert_eq!(rows[0].get("name"), Some(&Value::Text("ann".into())));
}

#[tokio::test]
async fn star_select_keeps_driver_columns() {
    let driver = RecordingDriver::new(Vendor::Sqlite, vec![driver_row(vec![Value::Int(1)])]);
    let query = Query::for_driver(&driver);

    let row = query
        .select(["*"])
        .from("users")
        .fetch_optional(&driver)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(row.columns(), ["col0"]);
    assert_eq!(driver.calls()[0].0, r#"SELECT * FROM "users""#);
}

#[tokio::test]
async fn raw_and_literal_projections_keep_driver_names() {
    let users = Table::new("users");
    let row = Row::new(
        vec!["n".to_string(), "?column?".to_string(), "name".to_string()],
        vec![Value::Int(4), Value::Int(1), Value::Text("ann".into())],
    );
    let driver = RecordingDriver::new(Vendor::Postgres, vec![row]);

    let rows = Query::for_driver(&driver)
        .select([
            Expr::raw("COUNT(*) AS n"),
            Expr::value(1),
            Expr::from(users.col("name")),
        ])
        .from(&users)
        .group_by([users.col("name")])
        .fetch_all(&driver)
        .await
        .unwrap();

    assert_eq!(
        driver.calls()[0].0,
        r#"SELECT COUNT(*) AS n, $1, "users"."name" FROM "users" GROUP BY "users"."name""#
    );
    assert_eq!(rows[0].columns(), ["n", "?column?", "name"]);
    assert_eq!(rows[0].get("n"), Some(&Value::Int(4)));
    assert_eq!(rows[0].get("name"), Some(&Value::Text("ann".into())));
}

#[tokio::test]
async fn mismatched_width_keeps_driver_row() {
    let driver = RecordingDriver::new(
        Vendor::Postgres,
        vec![driver_row(vec![Value::Int(1), Value::Int(2)])],
    );
    let users = Table::new("users");

    let rows = Query::for_driver(&driver)
        .select([users.col("id")])
        .from(&users)
        .fetch_all(&driver)
        .await
        .unwrap();

    assert_eq!(rows[0].columns(), ["col0", "col1"]);
}

#[tokio::test]
async fn execute_returns_affected_rows() {
    let driver = RecordingDriver::new(Vendor::Postgres, Vec::new());
    let users = Table::new("users");

    let affected = Query::for_driver(&driver)
        .update(&users)
        .set("active", false)
        .where_(users.col("last_login").is_null())
        .execute(&driver)
        .await
        .unwrap();

    assert_eq!(affected, 3);
    assert_eq!(
        driver.calls()[0].0,
        r#"UPDATE "users" SET "active" = $1 WHERE "users"."last_login" IS NULL"#
    );
    assert_eq!(driver.calls()[0].1, vec![Value::Bool(false)]);
}

#[tokio::test]
async fn compile_errors_never_reach_the_driver() {
    let driver = RecordingDriver::new(Vendor::MySql, Vec::new());
    let users = Table::new("users");

    let err = Query::for_driver(&driver)
        .select(["*"])
        .from(&users)
        .where_(users.col("name").ilike("a%"))
        .fetch_all(&driver)
        .await
        .unwrap_err();

    assert!(matches!(err, SqlError::UnsupportedDialectFeature { .. }));
    assert!(driver.calls().is_empty());
}

#[tokio::test]
async fn driver_errors_surface_unchanged() {
    let users = Table::new("users");
    let err = Query::for_driver(&FailingDriver)
        .delete_from(&users)
        .where_(users.col("id").eq(1))
        .execute(&FailingDriver)
        .await
        .unwrap_err();

    assert!(matches!(err, SqlError::Driver(ref msg) if msg == "connection reset"));
}
