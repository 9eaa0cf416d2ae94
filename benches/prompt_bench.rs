// ABOUTME: Criterion benchmarks for the workout generation hot path outside the model call
// ABOUTME: Measures prompt rendering and reply extraction plus validation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Criterion benchmarks for prompt building and plan parsing.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gym_coach_server::exercise_library::default_exercises;
use gym_coach_server::models::{ExperienceLevel, FatigueScore, FitnessObjective, UserProfile};
use gym_coach_server::workouts::{build_workout_prompt, extract_payload, parse_plan};
use serde_json::json;
use uuid::Uuid;

fn profile() -> UserProfile {
    let now = Utc::now();
    UserProfile {
        user_id: Uuid::new_v4(),
        age: 28,
        weight_kg: 75.5,
        height_cm: 178.0,
        objective: FitnessObjective::Hypertrophy,
        experience_level: ExperienceLevel::Intermediate,
        training_days_per_week: 4,
        equipment_available: vec!["barbell".to_owned(), "dumbbells".to_owned()],
        injury_history: vec!["lower back strain".to_owned()],
        created_at: now,
        updated_at: now,
    }
}

fn model_reply(blocks: usize) -> String {
    let plan = json!({
        "workout_plan": (0..blocks).map(|i| json!({
            "musculo": "Espalda",
            "ejercicio": format!("Remo con barra {i}"),
            "series": 3,
            "repeticiones": "6-10",
            "rpe_objetivo": 8,
            "descanso_segundos": 150,
            "notas_seguridad": "Espalda neutra, sin tirones con la zona lumbar"
        })).collect::<Vec<_>>(),
        "disclaimer_medico": "Consulta a un profesional.",
        "fatiga_score_usado": 45,
        "ajuste_aplicado": null
    });
    format!("Aquí tienes tu plan:\n```json\n{plan}\n```\nBuen entreno.")
}

fn bench_prompt_building(c: &mut Criterion) {
    let profile = profile();
    let library = default_exercises();
    let mut group = c.benchmark_group("build_workout_prompt");

    for fatigue in [20_i64, 50, 70, 90] {
        let score = FatigueScore::new(fatigue).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(fatigue), &score, |b, score| {
            b.iter(|| build_workout_prompt(black_box(&profile), *score, black_box(&library)));
        });
    }

    group.finish();
}

fn bench_reply_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_model_reply");

    for blocks in [3_usize, 8, 15] {
        let reply = model_reply(blocks);
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &reply, |b, reply| {
            b.iter(|| parse_plan(extract_payload(black_box(reply))).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_prompt_building, bench_reply_parsing);
criterion_main!(benches);
