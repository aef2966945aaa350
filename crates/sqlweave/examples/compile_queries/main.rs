//! Compile one set of statements for every supported vendor.
//!
//! Run with: cargo run --example compile_queries -p sqlweave

use sqlweave::{Condition, Expr, Query, SqlError, Table, Vendor, Window, func};

fn main() -> Result<(), SqlError> {
    let users = Table::new("users");
    let orders = Table::new("orders").alias("o");

    for vendor in Vendor::ALL {
        println!("=== {vendor} ===");
        let q = Query::new(vendor);

        // ============================================
        // Filtered join with grouping
        // ============================================
        let totals = q
            .select([
                Expr::from(users.col("name")),
                func::sum(orders.col("total")).alias("spent").into(),
            ])
            .from(&users)
            .left_join(&orders, users.col("id").eq(orders.col("user_id")))
            .where_(
                users
                    .col("status")
                    .in_list(["active", "trial"])
                    .and_(users.col("deleted_at").eq(None::<String>)),
            )
            .group_by([users.col("name")])
            .order_by(users.col("name"))
            .limit(20);
        print(totals.compile());

        // ============================================
        // CTE + window function
        // ============================================
        let recent = Table::new("recent");
        let ranked = q
            .with(
                "recent",
                q.select([orders.col("user_id"), orders.col("total")])
                    .from(&orders)
                    .where_(orders.col("total").gt(100)),
            )
            .select([
                Expr::from(recent.col("user_id")),
                func::row_number()
                    .over(Window::new().order_by(recent.col("total").desc()))
                    .alias("rank")
                    .into(),
            ])
            .from(&recent);
        print(ranked.compile());

        // ============================================
        // Upsert
        // ============================================
        let upsert = q
            .insert_into(&users)
            .columns(["email", "name"])
            .values(["ann@example.com", "Ann"])
            .on_conflict(["email"])
            .do_update(["name"]);
        print(upsert.compile());

        // ============================================
        // Correlated subquery
        // ============================================
        let buyers = q
            .select([users.col("id")])
            .from(&users)
            .where_(Condition::exists(
                q.select(["*"])
                    .from(&orders)
                    .where_(orders.col("user_id").eq(users.col("id"))),
            ));
        print(buyers.compile());
        println!();
    }

    Ok(())
}

fn print(result: Result<sqlweave::Compiled, SqlError>) {
    match result {
        Ok(compiled) => println!("{}\n  params: {:?}", compiled.sql, compiled.params),
        Err(e) => println!("-- not supported: {e}"),
    }
}
