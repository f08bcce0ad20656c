#[macro_use]
extern crate criterion;
extern crate liblongdiv;

use criterion::{black_box, Criterion};
use liblongdiv::{parse_decimal, to_fraction};

const INPUT: [&str; 5] = [
    "0.1(6)",
    "-2.(142857)",
    "0.142857142857...",
    "1.25",
    "0.(010309278350515463917525773195876288659793814432989690721649484536082474226804123711340206185567)",
];

fn bench_parse_decimal(c: &mut Criterion) {
    c.bench_function("parse_decimal", |b| {
        b.iter(|| {
            for input in INPUT.iter() {
                parse_decimal(black_box(input)).unwrap();
            }
        })
    });
}

fn bench_to_fraction(c: &mut Criterion) {
    let notations: Vec<_> = INPUT.iter().map(|i| parse_decimal(i).unwrap()).collect();
    c.bench_function("to_fraction", |b| {
        b.iter(|| {
            for notation in notations.iter() {
                to_fraction(black_box(notation)).unwrap();
            }
        })
    });
}

criterion_group!(dec2frac_benches, bench_parse_decimal, bench_to_fraction);
criterion_main!(dec2frac_benches);
