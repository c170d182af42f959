//! Benchmarks for the output parsing path
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use csx::query::{build_records, count_lines, parse_line};

/// cscope-style output with `n` lines
fn sample_output(n: usize) -> Vec<u8> {
    (0..n)
        .map(|i| {
            format!(
                "drivers/net/ethernet/dev{i}.c dev_open_{i} {} \tret = netif_open(dev, {i});\n",
                i * 7 + 1
            )
        })
        .collect::<String>()
        .into_bytes()
}

fn bench_parse_line(c: &mut Criterion) {
    let lines: Vec<(&str, Vec<u8>)> = vec![
        ("short", b"a.c f 1 x".to_vec()),
        (
            "typical",
            b"kernel/sched/core.c __schedule 6512 static void __sched notrace __schedule(unsigned int sched_mode)".to_vec(),
        ),
        ("overlong_file", format!("{} f 1 x", "p/".repeat(1000)).into_bytes()),
        ("overlong_context", format!("a.c f 1 {}", "y".repeat(4096)).into_bytes()),
    ];

    let mut group = c.benchmark_group("parse_line");
    for (name, line) in &lines {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, l| {
            b.iter(|| parse_line(black_box(l)))
        });
    }
    group.finish();
}

fn bench_build_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_records");
    for n in [10, 1_000, 50_000] {
        let raw = sample_output(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &raw, |b, raw| {
            b.iter(|| build_records(black_box(raw), count_lines(raw)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_line, bench_build_records);

criterion_main!(benches);
