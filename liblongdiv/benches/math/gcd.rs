#[macro_use]
extern crate criterion;
extern crate liblongdiv;

use criterion::{black_box, Criterion};
use liblongdiv::{_euclidean_gcd, gcd};
use num_bigint::BigInt;

fn input() -> Vec<(BigInt, BigInt)> {
    vec![
        (288_481.into(), 22_783.into()),
        (939_841_321.into(), 28_847_717.into()),
        (48_812.into(), 284_829.into()),
        (
            "2142855000000000000000000000".parse().unwrap(),
            "999999000000000000000000000".parse().unwrap(),
        ),
    ]
}

fn bench_euclidean_gcd(c: &mut Criterion) {
    let input = input();
    c.bench_function("euclidean_gcd", |b| {
        b.iter(|| {
            for (u, v) in input.iter() {
                _euclidean_gcd(black_box(u), black_box(v));
            }
        })
    });
}

fn bench_signed_gcd(c: &mut Criterion) {
    let input: Vec<_> = input().into_iter().map(|(u, v)| (-u, v)).collect();
    c.bench_function("signed_gcd", |b| {
        b.iter(|| {
            for (u, v) in input.iter() {
                gcd(black_box(u), black_box(v));
            }
        })
    });
}

criterion_group!(gcd_benches, bench_euclidean_gcd, bench_signed_gcd);
criterion_main!(gcd_benches);
