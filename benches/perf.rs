use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use goal_markets::batch::calculate_batch;
use goal_markets::markets::compute_markets;
use goal_markets::poisson::build_scoreline_matrix;
use goal_markets::{CalcConfig, LeagueBaseline, MatchRequest, TeamInput, calculate};

fn sample_requests(n: u32) -> Vec<MatchRequest> {
    (0..n)
        .map(|idx| MatchRequest {
            id: Some(format!("m{idx}")),
            home: TeamInput::totals(19, 20 + idx % 17, 10 + idx % 13),
            away: TeamInput::averages(0.9 + (idx % 7) as f64 * 0.1, 1.1),
            league: LeagueBaseline::detailed(1.55, 1.21),
        })
        .collect()
}

fn bench_matrix_build(c: &mut Criterion) {
    c.bench_function("matrix_build_g10", |b| {
        b.iter(|| {
            let m = build_scoreline_matrix(black_box(1.9), black_box(0.6), black_box(10)).unwrap();
            black_box(m.total_mass());
        })
    });
}

fn bench_markets(c: &mut Criterion) {
    let m = build_scoreline_matrix(1.9, 0.6, 10).unwrap();
    let thresholds = CalcConfig::default().thresholds;
    c.bench_function("markets_four_lines", |b| {
        b.iter(|| {
            let markets = compute_markets(black_box(&m), black_box(&thresholds), 0.05).unwrap();
            black_box(markets.len());
        })
    });
}

fn bench_calculate(c: &mut Criterion) {
    let cfg = CalcConfig::default();
    let home = TeamInput::averages(1.89, 0.58);
    let away = TeamInput::averages(1.12, 1.68);
    let league = LeagueBaseline::detailed(1.65, 1.10);
    c.bench_function("calculate_detailed", |b| {
        b.iter(|| {
            let calc = calculate(black_box(&home), black_box(&away), &league, &cfg).unwrap();
            black_box(calc.expected.total());
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let cfg = CalcConfig::default();
    let requests = sample_requests(500);
    c.bench_function("batch_500", |b| {
        b.iter(|| {
            let out = calculate_batch(black_box(&requests), &cfg);
            black_box(out.len());
        })
    });
}

criterion_group!(
    perf,
    bench_matrix_build,
    bench_markets,
    bench_calculate,
    bench_batch
);
criterion_main!(perf);
