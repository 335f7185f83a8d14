// Criterion benchmarks for PrepMatch Algo

use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prepmatch_algo::core::{subtract_interval, AvailabilityResolver, InterviewerContext, Matcher, MinuteSpan};
use prepmatch_algo::models::{
    BlockReason, CandidateRequest, InterviewerProfile, TimeBlock, TimeRange, WeeklyAvailability,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn full_week() -> WeeklyAvailability {
    let ranges = |day: &str| {
        vec![
            TimeRange::new(format!("{}_am", day), "09:00", "12:00"),
            TimeRange::new(format!("{}_pm", day), "13:00", "17:00"),
        ]
    };
    WeeklyAvailability {
        monday: ranges("mon"),
        tuesday: ranges("tue"),
        wednesday: ranges("wed"),
        thursday: ranges("thu"),
        friday: ranges("fri"),
        saturday: vec![],
        sunday: vec![],
    }
}

fn create_candidate(id: usize) -> InterviewerContext {
    let categories = if id % 3 == 0 {
        vec!["Frontend Developer".to_string()]
    } else {
        vec!["Backend Developer".to_string()]
    };
    let skills = if id % 2 == 0 {
        vec!["React".to_string(), "TypeScript".to_string()]
    } else {
        vec!["Go".to_string()]
    };

    let blocks = (0..(id % 4))
        .map(|i| TimeBlock {
            interviewer_id: id.to_string(),
            date: monday() + chrono::Duration::days(i as i64),
            start: "09:00".to_string(),
            end: "10:00".to_string(),
            reason: BlockReason::ManualBlock,
            interview_id: None,
        })
        .collect();

    InterviewerContext {
        profile: InterviewerProfile {
            interviewer_id: id.to_string(),
            name: format!("Interviewer {}", id),
            skill_categories: categories,
            skills,
            experience_years: 2 + (id % 8) as u8,
            is_active: true,
            weekly_availability: full_week(),
        },
        blocks,
        interviews: vec![],
    }
}

fn create_request() -> CandidateRequest {
    CandidateRequest {
        candidate_id: "bench_candidate".to_string(),
        skill_categories: vec!["Frontend Developer".to_string()],
        skills: vec!["React".to_string()],
        experience_years: 2,
        experience_months: 0,
        preferred_at: Some(monday().and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap())),
        exclude_interviewer_id: None,
        duration_minutes: 60,
    }
}

fn bench_subtract_interval(c: &mut Criterion) {
    c.bench_function("subtract_interval", |b| {
        b.iter(|| {
            subtract_interval(
                black_box(MinuteSpan::new(540, 1020)),
                black_box(MinuteSpan::new(600, 660)),
            )
        });
    });
}

fn bench_availability_resolution(c: &mut Criterion) {
    let resolver = AvailabilityResolver::new(14, 5, 60);
    let weekly = full_week();
    let blocks: Vec<TimeBlock> = (0..10)
        .map(|i| TimeBlock {
            interviewer_id: "i1".to_string(),
            date: monday() + chrono::Duration::days(i),
            start: "10:00".to_string(),
            end: "11:00".to_string(),
            reason: BlockReason::ManualBlock,
            interview_id: None,
        })
        .collect();

    c.bench_function("resolve_14_day_horizon", |b| {
        b.iter(|| {
            resolver.resolve(
                black_box(&weekly),
                black_box(&blocks),
                black_box(&[]),
                black_box(monday()),
                black_box(Some(
                    monday().and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
                )),
                black_box(60),
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_defaults();
    let request = create_request();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500].iter() {
        let candidates: Vec<InterviewerContext> =
            (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("find_match", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.find_match(
                        black_box(&request),
                        black_box(candidates.clone()),
                        black_box(monday()),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_subtract_interval,
    bench_availability_resolution,
    bench_matching
);

criterion_main!(benches);
