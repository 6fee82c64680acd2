//! Resolution benchmarks
//!
//! Run with: cargo bench --features benchmark

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveDateTime};
use homeroom::{
    ScheduleEntry, Weekday, build_daily_agenda, resolve_current_moment, subject_color_tag,
};

fn full_week() -> Vec<ScheduleEntry> {
    let subjects = ["Math", "Physics", "Chemistry", "History", "English", "Art", "Music", "PE"];
    let mut entries = Vec::new();
    for weekday in Weekday::ALL {
        for period in 1u8..=8 {
            entries.push(ScheduleEntry::new(
                weekday,
                period,
                "08:10-09:00",
                subjects[(period - 1) as usize],
            ));
        }
    }
    entries
}

fn sample_times() -> Vec<NaiveDateTime> {
    let monday = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
    [(8, 30), (9, 5), (12, 30), (16, 30), (22, 0)]
        .into_iter()
        .map(|(h, m)| monday.and_hms_opt(h, m, 0).unwrap())
        .collect()
}

fn bench_resolve_moment(c: &mut Criterion) {
    let entries = full_week();
    let times = sample_times();

    c.bench_function("resolve_current_moment/full_week", |b| {
        b.iter(|| {
            for &now in &times {
                black_box(resolve_current_moment(black_box(&entries), now));
            }
        })
    });
}

fn bench_build_agenda(c: &mut Criterion) {
    let entries = full_week();

    c.bench_function("build_daily_agenda/full_week", |b| {
        b.iter(|| black_box(build_daily_agenda(black_box(&entries), Weekday::Wed)))
    });
}

fn bench_color_tag(c: &mut Criterion) {
    c.bench_function("subject_color_tag", |b| {
        b.iter(|| black_box(subject_color_tag(black_box("Computer Science"))))
    });
}

criterion_group!(benches, bench_resolve_moment, bench_build_agenda, bench_color_tag);
criterion_main!(benches);
