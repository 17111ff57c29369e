//! Benchmarks for the effectiveness computation pipeline.
//!
//! Run with:
//!   cargo bench --package matchup_engine --bench effectiveness

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use matchup_engine::effect::{compute_effectiveness, MultOrderIndex, RenderCache};
use matchup_engine::loader::DataStore;
use matchup_engine::session::{Selection, SelectionSession};
use matchup_engine::types::{Generation, Mode, Type, TypeSet};
use matchup_engine::{ExceptionId, ExceptionSet};

fn bench_single_type_offense(c: &mut Criterion) {
    let mut store = DataStore::bundled();
    let chart = store.chart(Generation::Gen6Plus).unwrap();
    let table = store.exceptions().unwrap();
    let mut order = MultOrderIndex::new();

    c.bench_function("effectiveness_single_offense", |b| {
        b.iter(|| {
            compute_effectiveness(
                black_box(TypeSet::only(Type::Fire)),
                Mode::Offense,
                Generation::Gen6Plus,
                &ExceptionSet::empty(),
                &chart,
                &table,
                &mut order,
            )
        })
    });
}

fn bench_dual_type_defense_with_exceptions(c: &mut Criterion) {
    let mut store = DataStore::bundled();
    let chart = store.chart(Generation::Gen6Plus).unwrap();
    let table = store.exceptions().unwrap();
    let mut order = MultOrderIndex::new();
    let active: TypeSet = [Type::Water, Type::Flying].into_iter().collect();
    let exceptions: ExceptionSet = [ExceptionId::Levitate, ExceptionId::Filter]
        .into_iter()
        .collect();

    c.bench_function("effectiveness_dual_defense_exceptions", |b| {
        b.iter(|| {
            compute_effectiveness(
                black_box(active),
                Mode::Defense,
                Generation::Gen6Plus,
                &exceptions,
                &chart,
                &table,
                &mut order,
            )
        })
    });
}

fn bench_reconcile_unchanged(c: &mut Criterion) {
    let mut store = DataStore::bundled();
    let chart = store.chart(Generation::Gen6Plus).unwrap();
    let table = store.exceptions().unwrap();
    let mut order = MultOrderIndex::new();
    let groups = compute_effectiveness(
        TypeSet::only(Type::Water),
        Mode::Defense,
        Generation::Gen6Plus,
        &ExceptionSet::empty(),
        &chart,
        &table,
        &mut order,
    );
    let mut cache = RenderCache::new();
    cache.reconcile(&groups, false);

    c.bench_function("reconcile_unchanged", |b| {
        b.iter(|| cache.reconcile(black_box(&groups), false))
    });
}

fn bench_session_selection_churn(c: &mut Criterion) {
    let mut store = DataStore::bundled();
    let chart = store.chart(Generation::Gen6Plus).unwrap();
    let table = store.exceptions().unwrap();

    c.bench_function("session_selection_churn", |b| {
        b.iter(|| {
            let mut session = SelectionSession::new(Mode::Defense, Generation::Gen6Plus);
            for ty in [Type::Water, Type::Fire, Type::Dragon] {
                session.apply(Selection::Primary(ty), &table);
                session.apply(Selection::Secondary(Type::Flying), &table);
                let _ = session.refresh(&chart, &table, false);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_single_type_offense,
    bench_dual_type_defense_with_exceptions,
    bench_reconcile_unchanged,
    bench_session_selection_churn,
);

criterion_main!(benches);
