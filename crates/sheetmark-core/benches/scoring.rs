use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sheetmark_core::builder::build;
use sheetmark_core::label::LabelScheme;
use sheetmark_core::scoring::{score, Answers};
use sheetmark_core::session::Session;
use sheetmark_core::sheet::{Group, Mode, SheetConfig};

fn make_answers(count: usize, shift: usize) -> Answers {
    (1..=count)
        .map(|i| (i, LabelScheme::Alphabetic.label_for((i + shift) % 4)))
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for count in [10usize, 100, 1000] {
        let user = make_answers(count, 0);
        let key = make_answers(count, count % 3);
        group.bench_function(format!("keyed/{count}"), |b| {
            b.iter(|| score(black_box(&user), black_box(Some(&key)), black_box(count)))
        });
    }

    let user = make_answers(100, 0);
    group.bench_function("plain/100", |b| {
        b.iter(|| score(black_box(&user), None, black_box(100)))
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("keyed/100x5", |b| {
        let config = SheetConfig::new(100, 5, LabelScheme::Numeric, Mode::Keyed).unwrap();
        b.iter(|| build(black_box(config)))
    });

    group.finish();
}

fn bench_session_event(c: &mut Criterion) {
    let mut session = Session::new();
    session
        .submit(SheetConfig::new(100, 4, LabelScheme::Alphabetic, Mode::Keyed).unwrap())
        .unwrap();
    for i in 1..=100 {
        session.select(Group::Key, i, i % 4);
    }

    c.bench_function("session/select", |b| {
        let mut n = 0usize;
        b.iter(|| {
            n = n % 100 + 1;
            session.select(black_box(Group::User), black_box(n), black_box(n % 3))
        })
    });
}

criterion_group!(benches, bench_score, bench_build, bench_session_event);
criterion_main!(benches);
