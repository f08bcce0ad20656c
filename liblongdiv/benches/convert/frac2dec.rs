#[macro_use]
extern crate criterion;
extern crate liblongdiv;

use criterion::{black_box, Criterion};
use liblongdiv::{build_trace, to_decimal};

const INPUT: [(i64, i64); 4] = [(1, 3), (22, 7), (1, 97), (355, 113)];

fn bench_to_decimal(c: &mut Criterion) {
    c.bench_function("to_decimal", |b| {
        b.iter(|| {
            for (n, d) in INPUT.iter() {
                to_decimal(black_box(*n), black_box(*d), 150).unwrap();
            }
        })
    });
}

fn bench_build_trace(c: &mut Criterion) {
    c.bench_function("build_trace", |b| {
        b.iter(|| {
            for (n, d) in INPUT.iter() {
                build_trace(&n.to_string(), &d.to_string(), black_box(50)).unwrap();
            }
        })
    });
}

criterion_group!(frac2dec_benches, bench_to_decimal, bench_build_trace);
criterion_main!(frac2dec_benches);
