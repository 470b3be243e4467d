use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use sat_core::{solve_parallel, solve_sequential, Clause, Cnf, Literal, VarName};

fn name(id: usize) -> VarName {
    VarName::from(id.to_string().as_str())
}

/// Pigeonhole PHP(n+1, n): unsatisfiable, and a standard hard case for
/// DPLL-style search since it has no short resolution proof.
fn pigeonhole(holes: usize) -> Cnf {
    let pigeons = holes + 1;
    let var = |p: usize, h: usize| name(p * holes + h);

    let mut clauses = Vec::new();
    for p in 0..pigeons {
        clauses.push(Clause::from_iter((0..holes).map(|h| Literal::pos(var(p, h)))));
    }
    for h in 0..holes {
        for p1 in 0..pigeons {
            for p2 in (p1 + 1)..pigeons {
                clauses.push(Clause::from_iter([Literal::neg(var(p1, h)), Literal::neg(var(p2, h))]));
            }
        }
    }
    Cnf::new(clauses)
}

/// A satisfiable random 3-SAT instance planted around a fixed assignment.
fn planted_3sat(num_variables: usize, num_clauses: usize) -> Cnf {
    let assignment: Vec<bool> = (0..num_variables).map(|i| i % 2 == 0).collect();
    let clauses = (0..num_clauses)
        .map(|i| {
            let v1 = i % num_variables;
            let v2 = (i * 7 + 1) % num_variables;
            let v3 = (i * 13 + 3) % num_variables;
            Clause::from_iter([
                Literal::new(name(v1 + 1), assignment[v1]),
                Literal::new(name(v2 + 1), (i % 3) == 0),
                Literal::new(name(v3 + 1), (i % 5) == 0),
            ])
        })
        .collect();
    Cnf::new(clauses)
}

fn bench_engines(c: &mut Criterion, group_name: &str, build: impl Fn() -> Cnf) {
    let mut group = c.benchmark_group(group_name);

    group.bench_function("sequential", |b| {
        b.iter_batched(&build, solve_sequential, BatchSize::SmallInput)
    });
    group.bench_function("parallel", |b| {
        b.iter_batched(&build, solve_parallel, BatchSize::SmallInput)
    });

    group.finish()
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_engines(c, "pigeonhole_php_6_5", || pigeonhole(5));
    bench_engines(c, "planted_3sat_20_80", || planted_3sat(20, 80));
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}
criterion_main!(benches);
