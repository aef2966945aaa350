use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlweave::{Query, Statement, Table, Vendor};

/// SELECT c0, c1, ... FROM t WHERE c0 = $1 AND c1 = $2 ...
fn build_select(n: usize) -> Statement {
    let t = Table::new("t");
    let mut stmt = Query::new(Vendor::Postgres)
        .select((0..n).map(|i| t.col(&format!("c{i}"))))
        .from(&t);
    for i in 0..n {
        stmt = stmt.where_(t.col(&format!("c{i}")).eq(i as i64));
    }
    stmt
}

/// Chain of `n` CTEs, each filtering the previous one.
fn build_cte_chain(n: usize) -> Statement {
    let q = Query::new(Vendor::Postgres);
    let base = Table::new("base");
    let mut stmt = q.with(
        "s0",
        q.select([base.col("v")]).from(&base).where_(base.col("v").gt(0)),
    );
    for i in 1..n {
        let prev = Table::new(format!("s{}", i - 1));
        stmt = stmt.with(
            format!("s{i}"),
            q.select([prev.col("v")])
                .from(&prev)
                .where_(prev.col("v").gt(i as i64)),
        );
    }
    let last = Table::new(format!("s{}", n - 1));
    stmt.select([last.col("v")]).from(&last)
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/select");

    for n in [1, 5, 10, 50, 100] {
        let stmt = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(stmt.compile()));
        });
    }

    group.finish();
}

fn bench_vendors(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/vendor");
    let stmt = build_select(10);

    for vendor in Vendor::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(vendor), &vendor, |b, &vendor| {
            b.iter(|| black_box(stmt.compile_for(vendor)));
        });
    }

    group.finish();
}

fn bench_cte_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/cte_chain");

    for n in [1, 4, 16] {
        let stmt = build_cte_chain(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(stmt.compile()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_vendors, bench_cte_chain);
criterion_main!(benches);
