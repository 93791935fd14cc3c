//! Criterion benchmarks for u-hyperheur credit assignment and selection.
//!
//! Uses random objective vectors inside the default reference box to
//! measure indicator, credit and selection overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_hyperheur::controller::Controller;
use u_hyperheur::credit::{CreditConfig, CreditFactory, PopulationSnapshot, ProblemDescriptor};
use u_hyperheur::heuristic::HeuristicId;
use u_hyperheur::indicator::{Hypervolume, QualityIndicator};
use u_hyperheur::repository::DecayingAggregation;
use u_hyperheur::selector::{ProbabilityMatching, Scoring};
use u_numflow::random::create_rng;

fn random_points<R: Rng>(n: usize, m: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| (0..m).map(|_| rng.random_range(0.0..2.0)).collect())
        .collect()
}

fn bench_hypervolume(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypervolume");
    group.sample_size(20);

    for &m in &[2, 3] {
        for &n in &[20, 100] {
            let mut rng = create_rng(42);
            let points = random_points(n, m, &mut rng);
            let hv = Hypervolume::new(vec![2.0; m]).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{m}obj"), n),
                &(hv, points),
                |b, (hv, points)| {
                    let set: Vec<&[f64]> = points.iter().map(|p| p.as_slice()).collect();
                    b.iter(|| black_box(hv.evaluate(black_box(&set))))
                },
            );
        }
    }
    group.finish();
}

fn bench_credit_definitions(c: &mut Criterion) {
    let mut group = c.benchmark_group("credit");
    let problem = ProblemDescriptor::new(2);
    let mut rng = create_rng(7);
    let before = random_points(100, 2, &mut rng);
    let offspring = random_points(1, 2, &mut rng);
    let mut after = before.clone();
    after.extend(offspring.iter().cloned());
    let parents = vec![before[0].clone()];

    for name in ["OPDo", "OPIHV", "SIDoPF", "SIHVPF", "SIR2PF", "CSHVPF"] {
        let def = CreditFactory::create(name, &CreditConfig::default(), &problem).unwrap();
        let snapshot = PopulationSnapshot::new()
            .with_parents(&parents)
            .with_offspring(&offspring)
            .with_population(&before, &after);
        group.bench_function(name, |b| {
            b.iter(|| black_box(def.compute(black_box(&snapshot)).unwrap()))
        });
    }
    group.finish();
}

fn bench_controller_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");
    group.sample_size(20);

    for &k in &[4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let parents = vec![vec![1.0, 1.0]];
            let better = vec![vec![0.5, 0.5]];
            let worse = vec![vec![1.5, 1.5]];
            b.iter(|| {
                let ids: Vec<HeuristicId> = (0..k).map(HeuristicId::new).collect();
                let selector =
                    ProbabilityMatching::new(ids, 0.01, Scoring::Proportional).unwrap();
                let credit = CreditFactory::create(
                    "OPDo",
                    &CreditConfig::default(),
                    &ProblemDescriptor::new(2),
                )
                .unwrap();
                let mut controller =
                    Controller::new(selector, credit, DecayingAggregation::new(0.9).unwrap());
                let mut rng = create_rng(42);
                for _ in 0..500 {
                    let picked = controller.select(&mut rng).unwrap();
                    let offspring = if picked.index() % 2 == 0 { &better } else { &worse };
                    let snapshot = PopulationSnapshot::new()
                        .with_parents(&parents)
                        .with_offspring(offspring);
                    controller.reward(&snapshot).unwrap();
                }
                black_box(controller.estimates())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_hypervolume,
    bench_credit_definitions,
    bench_controller_loop
);
criterion_main!(benches);
