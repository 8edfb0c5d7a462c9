use criterion::{Criterion, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;
use symb_integral::{Integrate, integrate_steps, parse, sym};

// ==============================================================================
// Benchmarks for the parse -> integrate pipeline
// ==============================================================================

/// Polynomial with `n` terms: `1*x^1 + 2*x^2 + ... + n*x^n`
fn generate_polynomial(n: usize) -> String {
    let mut s = String::with_capacity(n * 10);
    for i in 1..=n {
        if i > 1 {
            s.push_str(" + ");
        }
        let _ = write!(s, "{i}*x^{i}");
    }
    s
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let x = sym("x");

    group.bench_function("parse_poly_-3x^3+5x-1", |b| {
        b.iter(|| parse(black_box("-3*x^3 + 5*x - 1"), &x))
    });

    group.bench_function("parse_implicit_2x(x+1)sin(x)", |b| {
        b.iter(|| parse(black_box("2x(x+1) sin(x)"), &x))
    });

    group.finish();
}

fn bench_integration(c: &mut Criterion) {
    let mut group = c.benchmark_group("integration");
    let x = sym("x");

    let cases = [
        ("power", "x^2"),
        ("exp_trig", "sin(x)*exp(x)"),
        ("poly_exp", "x^3*exp(2*x)"),
        ("fallback_atan", "1/(x^2 + 1)"),
        ("substitution", "x*exp(x^2)"),
    ];
    for (name, input) in cases {
        let Ok(expr) = parse(input, &x) else {
            continue;
        };
        group.bench_function(name, |b| b.iter(|| integrate_steps(black_box(&expr), &x)));
    }

    group.finish();
}

fn bench_large_polynomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_polynomial");
    let integrator = Integrate::new();

    for n in [10, 50] {
        let formula = generate_polynomial(n);
        group.bench_function(format!("integrate_str_{n}_terms"), |b| {
            b.iter(|| integrator.integrate_str(black_box(&formula), "x"))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_integration,
    bench_large_polynomial
);
criterion_main!(benches);
