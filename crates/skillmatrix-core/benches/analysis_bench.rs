//! # Analysis Benchmarks
//!
//! Performance benchmarks for the skillmatrix-core analyses.
//!
//! Run with: `cargo bench -p skillmatrix-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use skillmatrix_core::primitives::DEFAULT_TRAINING_COST_PER_LEVEL;
use skillmatrix_core::{Money, PositionId, Snapshot, SnapshotBuilder, Workforce};
use std::hint::black_box;

const SKILLS: u32 = 40;
const DEPARTMENTS: u32 = 8;
const POSITIONS: u32 = 50;
const PROCESSES: u32 = 30;

/// A synthetic organisation with `employees` workers spread over fixed
/// departments, positions and processes.
fn create_snapshot(employees: u32) -> Snapshot {
    let mut builder = SnapshotBuilder::new();
    for id in 1..=DEPARTMENTS {
        builder = builder.department(id, &format!("Department {id}"));
    }
    for id in 1..=SKILLS {
        builder = builder.skill(id, &format!("Skill {id}"));
    }
    for id in 1..=POSITIONS {
        builder = builder.position(id, &format!("Position {id}"), id % DEPARTMENTS + 1, 4);
        for k in 0..4 {
            let skill = (id * 3 + k) % SKILLS + 1;
            builder = builder.position_skill(id, skill, (k % 5 + 1) as u8);
        }
    }
    for id in 1..=PROCESSES {
        builder = builder
            .process(id, &format!("Process {id}"), id % 6 + 1)
            .assign_process(id % POSITIONS + 1, id);
        for k in 0..3 {
            let skill = (id * 7 + k) % SKILLS + 1;
            builder = builder.process_skill(id, skill, (k % 4 + 2) as u8);
        }
    }
    for id in 1..=SKILLS {
        let cost = Money::from_major(i64::from(id) * 100);
        builder = builder
            .training(id, &format!("Course {id}"), id % DEPARTMENTS + 1, cost, 8)
            .training_skill(id, id, 5);
        if id > 1 {
            builder = builder.training_prerequisite(id, id - 1);
        }
    }
    for id in 1..=employees {
        builder = builder.employee(
            id,
            &format!("Worker {id}"),
            id % DEPARTMENTS + 1,
            id % POSITIONS + 1,
        );
        for k in 0..6 {
            let skill = (id * 11 + k * 5) % SKILLS + 1;
            builder = builder.employee_skill(id, skill, ((id + k) % 5 + 1) as u8);
        }
    }
    builder.build().expect("synthetic snapshot is valid")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");

    for size in [100, 1000, 10000].iter() {
        let snapshot = create_snapshot(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(Workforce::new(snapshot.clone())));
        });
    }

    group.finish();
}

fn bench_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_candidates");

    for size in [100, 1000, 10000].iter() {
        let wf = Workforce::new(create_snapshot(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &wf, |b, wf| {
            b.iter(|| {
                black_box(wf.analyze_candidates(PositionId(1), DEFAULT_TRAINING_COST_PER_LEVEL))
            });
        });
    }

    group.finish();
}

fn bench_capability(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_capability_gaps");
    group.sample_size(20);

    for size in [100, 1000, 10000].iter() {
        let wf = Workforce::new(create_snapshot(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &wf, |b, wf| {
            b.iter(|| black_box(wf.analyze_capability_gaps(DEFAULT_TRAINING_COST_PER_LEVEL)));
        });
    }

    group.finish();
}

fn bench_reliance(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_worker_reliance");
    group.sample_size(20);

    for size in [100, 1000, 10000].iter() {
        let wf = Workforce::new(create_snapshot(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &wf, |b, wf| {
            b.iter(|| black_box(wf.analyze_worker_reliance(DEFAULT_TRAINING_COST_PER_LEVEL)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_indexing,
    bench_candidates,
    bench_capability,
    bench_reliance
);
criterion_main!(benches);
