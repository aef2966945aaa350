//! End-to-end compilation through the public API.

use sqlweave::{Expr, Query, SqlError, Table, Value, Vendor, func};

#[test]
fn select_with_chained_filters() {
    let users = Table::new("users");
    let compiled = Query::new(Vendor::Postgres)
        .select([users.col("name")])
        .from(&users)
        .where_(users.col("age").gt(18))
        .where_(users.col("active").eq(true))
        .compile()
        .unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT "users"."name" FROM "users" WHERE "users"."age" > $1 AND "users"."active" = $2"#
    );
    assert_eq!(compiled.params, vec![Value::Int(18), Value::Bool(true)]);
    assert_eq!(compiled.columns, vec![Some("name".to_string())]);
}

#[test]
fn membership_binds_one_slot_per_element() {
    let users = Table::new("users");
    let compiled = Query::new(Vendor::Postgres)
        .select(["*"])
        .from(&users)
        .where_(users.col("status").in_list(["active", "pending"]))
        .compile()
        .unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "users" WHERE "users"."status" IN ($1, $2)"#
    );
    assert_eq!(
        compiled.params,
        vec![Value::Text("active".into()), Value::Text("pending".into())]
    );
}

#[test]
fn delete_under_sqlite() {
    let users = Table::new("users");
    let compiled = Query::new(Vendor::Sqlite)
        .delete_from(&users)
        .where_(users.col("id").eq(1))
        .compile()
        .unwrap();

    assert_eq!(compiled.sql, r#"DELETE FROM "users" WHERE "users"."id" = ?"#);
    assert_eq!(compiled.params, vec![Value::Int(1)]);
}

#[test]
fn null_comparisons_bind_nothing() {
    let users = Table::new("users");
    let compiled = Query::new(Vendor::Postgres)
        .select(["*"])
        .from(&users)
        .where_(users.col("deleted_at").eq(Value::Null))
        .where_(users.col("email").ne(None::<String>))
        .compile()
        .unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "users" WHERE "users"."deleted_at" IS NULL AND "users"."email" IS NOT NULL"#
    );
    assert!(compiled.params.is_empty());
}

#[test]
fn params_follow_depth_first_order() {
    let t = Table::new("t");
    let cond = t
        .col("a")
        .eq(1)
        .and_(t.col("b").between(2, 3).or_(t.col("c").in_list([4, 5])))
        .and_(t.col("d").eq(6).not_());

    let compiled = Query::new(Vendor::Postgres)
        .select(["*"])
        .from(&t)
        .where_(cond.clone())
        .compile()
        .unwrap();

    assert_eq!(compiled.param_count(), cond.literal_count());
    assert_eq!(
        compiled.params,
        (1..=6).map(Value::Int).collect::<Vec<_>>()
    );
    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "t" WHERE "t"."a" = $1 AND ("t"."b" BETWEEN $2 AND $3 OR "t"."c" IN ($4, $5)) AND NOT ("t"."d" = $6)"#
    );
}

#[test]
fn cte_numbering_continues_into_main_query() {
    let q = Query::new(Vendor::Postgres);
    let orders = Table::new("orders");
    let big = Table::new("big_orders");

    let compiled = q
        .with(
            "big_orders",
            q.select([orders.col("id"), orders.col("user_id")])
                .from(&orders)
                .where_(orders.col("total").gt(500)),
        )
        .select([
            Expr::from(big.col("user_id")),
            func::count(big.col("id")).alias("n").into(),
        ])
        .from(&big)
        .where_(big.col("user_id").ne(7))
        .group_by([big.col("user_id")])
        .having(func::count(big.col("id")).gt(2))
        .compile()
        .unwrap();

    assert_eq!(
        compiled.sql,
        r#"WITH "big_orders" AS (SELECT "orders"."id", "orders"."user_id" FROM "orders" WHERE "orders"."total" > $1) SELECT "big_orders"."user_id", COUNT("big_orders"."id") AS "n" FROM "big_orders" WHERE "big_orders"."user_id" <> $2 GROUP BY "big_orders"."user_id" HAVING COUNT("big_orders"."id") > $3"#
    );
    assert_eq!(
        compiled.params,
        vec![Value::Int(500), Value::Int(7), Value::Int(2)]
    );
}

#[test]
fn cte_referencing_undefined_table_is_unbound() {
    let q = Query::new(Vendor::Postgres);
    let orders = Table::new("orders");
    let ghost = Table::new("ghost");

    let err = q
        .with("recent", q.select([ghost.col("id")]).from(&orders))
        .select(["*"])
        .from("recent")
        .compile()
        .unwrap_err();

    assert!(matches!(err, SqlError::UnboundIdentifier { ref table, .. } if table == "ghost"));
}

#[test]
fn failed_compile_returns_no_sql() {
    let users = Table::new("users");
    let result = Query::new(Vendor::MySql)
        .select(["*"])
        .from(&users)
        .where_(users.col("name").ilike("a%"))
        .compile();

    assert!(matches!(
        result,
        Err(SqlError::UnsupportedDialectFeature {
            vendor: Vendor::MySql,
            ..
        })
    ));
}

#[test]
fn builder_is_reusable_across_statements() {
    let q = Query::new(Vendor::Postgres);
    let users = Table::new("users");
    let base = q.select([users.col("id")]).from(&users);

    let active = base.clone().where_(users.col("active").eq(true));
    let recent = base.clone().order_by(users.col("id").desc()).limit(5);

    assert_eq!(
        base.compile().unwrap().sql,
        r#"SELECT "users"."id" FROM "users""#
    );
    assert_eq!(active.compile().unwrap().params, vec![Value::Bool(true)]);
    assert_eq!(
        recent.compile().unwrap().sql,
        r#"SELECT "users"."id" FROM "users" ORDER BY "users"."id" DESC LIMIT 5"#
    );
}
