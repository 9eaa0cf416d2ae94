// ABOUTME: Workout service tying profile lookup, exercise selection, generation, and persistence
// ABOUTME: Applies the generation deadline and stores exactly one plan per successful call
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use gym_coach_core::constants::generation::HISTORY_LIMIT;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::gateway::{GenerationError, WorkoutGateway};
use crate::database::Database;
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{Exercise, FatigueScore, PlanRecord, PlanSummary, UserProfile};

/// Workout operation failure
#[derive(Debug, Error)]
pub enum WorkoutError {
    /// The user has not created a profile
    #[error("User profile not found. Please create profile first.")]
    ProfileMissing,

    /// The exercise library is empty
    #[error("No exercises available in database. Please seed exercises.")]
    NoExercisesAvailable,

    /// The gateway failed or timed out
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Plan absent or owned by someone else
    #[error("Workout plan not found or you don't have access")]
    NotFound,

    /// Persistence failure
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<WorkoutError> for AppError {
    fn from(error: WorkoutError) -> Self {
        match error {
            WorkoutError::ProfileMissing => Self::new(ErrorCode::ProfileMissing, error.to_string()),
            WorkoutError::NoExercisesAvailable => {
                Self::new(ErrorCode::NoExercisesAvailable, error.to_string())
            }
            WorkoutError::Generation(e) => Self::generation_failed(e.to_string()),
            WorkoutError::NotFound => Self::new(ErrorCode::ResourceNotFound, error.to_string()),
            WorkoutError::Storage(e) => e,
        }
    }
}

/// Exercises usable with the profile's equipment, or the whole library when none match
fn select_candidates(profile: &UserProfile, library: Vec<Exercise>) -> Vec<Exercise> {
    let matching: Vec<Exercise> = library
        .iter()
        .filter(|exercise| exercise.matches_equipment(&profile.equipment_available))
        .cloned()
        .collect();

    if matching.is_empty() {
        library
    } else {
        matching
    }
}

/// Generates, stores, and reads workout plans
#[derive(Clone)]
pub struct WorkoutService {
    database: Database,
    gateway: Arc<dyn WorkoutGateway>,
    generation_timeout: Duration,
}

impl WorkoutService {
    /// Create a service that waits at most `generation_timeout` for the gateway
    #[must_use]
    pub fn new(
        database: Database,
        gateway: Arc<dyn WorkoutGateway>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            database,
            gateway,
            generation_timeout,
        }
    }

    /// Generate and persist a plan for `user_id`
    ///
    /// A missing `fatigue` defaults to 50. Nothing is written when generation
    /// fails, and no database handle is held while waiting on the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`WorkoutError::ProfileMissing`] or
    /// [`WorkoutError::NoExercisesAvailable`] before calling the gateway, and
    /// [`WorkoutError::Generation`] if the gateway fails or exceeds the deadline
    #[instrument(skip(self))]
    pub async fn generate_workout(
        &self,
        user_id: Uuid,
        fatigue: Option<FatigueScore>,
    ) -> Result<PlanRecord, WorkoutError> {
        let profile = self
            .database
            .get_profile(user_id)
            .await?
            .ok_or(WorkoutError::ProfileMissing)?;

        let library = self.database.list_exercises().await?;
        if library.is_empty() {
            return Err(WorkoutError::NoExercisesAvailable);
        }

        let fatigue = fatigue.unwrap_or_default();
        let candidates = select_candidates(&profile, library);
        info!(
            candidates = candidates.len(),
            fatigue = fatigue.value(),
            "Generating workout plan"
        );

        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.generation_timeout,
            self.gateway.generate(&profile, fatigue, &candidates),
        )
        .await
        .unwrap_or_else(|_| {
            Err(GenerationError::TimedOut(
                self.generation_timeout.as_secs(),
            ))
        });
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let plan = match outcome {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "Workout generation failed");
                AppLogger::log_generation_event(
                    &user_id.to_string(),
                    fatigue.value(),
                    false,
                    duration_ms,
                    None,
                );
                return Err(e.into());
            }
        };

        let record = PlanRecord {
            id: Uuid::new_v4(),
            user_id,
            plan,
            fatigue_score_used: fatigue,
            created_at: Utc::now(),
        };
        self.database.insert_workout_plan(&record).await?;

        AppLogger::log_generation_event(
            &user_id.to_string(),
            fatigue.value(),
            true,
            duration_ms,
            Some(record.plan.blocks.len()),
        );
        Ok(record)
    }

    /// The user's most recent plans, newest first
    ///
    /// # Errors
    ///
    /// Returns [`WorkoutError::Storage`] if the query fails
    pub async fn workout_history(&self, user_id: Uuid) -> Result<Vec<PlanSummary>, WorkoutError> {
        let records = self
            .database
            .list_workout_plans(user_id, HISTORY_LIMIT)
            .await?;
        Ok(records.iter().map(PlanSummary::from).collect())
    }

    /// A single plan owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns [`WorkoutError::NotFound`] if the plan does not exist or
    /// belongs to another user
    pub async fn workout_plan(&self, user_id: Uuid, plan_id: Uuid) -> Result<PlanRecord, WorkoutError> {
        self.database
            .get_workout_plan(user_id, plan_id)
            .await?
            .ok_or(WorkoutError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::database::test_utils::create_test_db;
    use crate::models::{
        ExerciseBlock, ExperienceLevel, FitnessObjective, GeneratedPlan, User, VolumeGuidelines,
    };
    use crate::workouts::validation::PlanValidationError;

    enum Behaviour {
        Succeed,
        Reject,
        Hang,
    }

    struct ScriptedGateway {
        behaviour: Behaviour,
        calls: AtomicUsize,
        seen: Mutex<Vec<(FatigueScore, Vec<String>)>>,
    }

    impl ScriptedGateway {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl WorkoutGateway for ScriptedGateway {
        async fn generate(
            &self,
            _profile: &UserProfile,
            fatigue: FatigueScore,
            exercises: &[Exercise],
        ) -> Result<GeneratedPlan, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push((fatigue, exercises.iter().map(|e| e.name.clone()).collect()));
            match self.behaviour {
                Behaviour::Succeed => Ok(sample_plan(fatigue)),
                Behaviour::Reject => Err(GenerationError::MalformedResponse(
                    PlanValidationError::BlockCount { count: 1 },
                )),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(sample_plan(fatigue))
                }
            }
        }
    }

    fn sample_plan(fatigue: FatigueScore) -> GeneratedPlan {
        GeneratedPlan {
            blocks: (0..4)
                .map(|i| ExerciseBlock {
                    muscle: "pectoral".to_owned(),
                    exercise: format!("Ejercicio {i}"),
                    sets: 3,
                    reps: "8-12".to_owned(),
                    target_rpe: 7,
                    rest_seconds: 90,
                    safety_notes: "Control en el descenso".to_owned(),
                })
                .collect(),
            medical_disclaimer: "Consulta a un profesional".to_owned(),
            fatigue_score_used: fatigue,
            adjustment_applied: None,
        }
    }

    fn exercise(name: &str, equipment: &str) -> Exercise {
        Exercise {
            name: name.to_owned(),
            muscle_groups: vec!["pectoral".to_owned()],
            equipment: vec![equipment.to_owned()],
            safety_notes: "Sin notas especiales".to_owned(),
            technique_cues: vec![],
            volume_guidelines: VolumeGuidelines {
                beginner: "3x10".to_owned(),
                intermediate: "4x8".to_owned(),
                advanced: "5x5".to_owned(),
            },
        }
    }

    async fn setup(with_profile: bool, equipment: &[&str]) -> (Database, Uuid) {
        let db = create_test_db().await;
        let user = User::new("coach@example.com".to_owned(), "h".to_owned());
        db.create_user(&user).await.unwrap();
        if with_profile {
            let now = Utc::now();
            db.create_profile(&UserProfile {
                user_id: user.id,
                age: 28,
                weight_kg: 75.0,
                height_cm: 178.0,
                objective: FitnessObjective::Hypertrophy,
                experience_level: ExperienceLevel::Intermediate,
                training_days_per_week: 4,
                equipment_available: equipment.iter().map(|s| (*s).to_owned()).collect(),
                injury_history: vec![],
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        }
        (db, user.id)
    }

    fn service(db: &Database, gateway: Arc<ScriptedGateway>, timeout: Duration) -> WorkoutService {
        WorkoutService::new(db.clone(), gateway, timeout)
    }

    #[tokio::test]
    async fn test_missing_profile_writes_nothing() {
        let (db, user_id) = setup(false, &[]).await;
        db.seed_exercises(&[exercise("Press", "barbell")], false)
            .await
            .unwrap();
        let gateway = ScriptedGateway::new(Behaviour::Succeed);
        let svc = service(&db, gateway.clone(), Duration::from_secs(5));

        let err = svc.generate_workout(user_id, None).await.unwrap_err();
        assert!(matches!(err, WorkoutError::ProfileMissing));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
        assert!(svc.workout_history(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_library_is_reported() {
        let (db, user_id) = setup(true, &["barbell"]).await;
        let svc = service(&db, ScriptedGateway::new(Behaviour::Succeed), Duration::from_secs(5));

        let err = svc.generate_workout(user_id, None).await.unwrap_err();
        assert!(matches!(err, WorkoutError::NoExercisesAvailable));
        assert_eq!(AppError::from(err).code, ErrorCode::NoExercisesAvailable);
    }

    #[tokio::test]
    async fn test_success_persists_one_plan_with_default_fatigue() {
        let (db, user_id) = setup(true, &["barbell"]).await;
        db.seed_exercises(&[exercise("Press", "barbell")], false)
            .await
            .unwrap();
        let svc = service(&db, ScriptedGateway::new(Behaviour::Succeed), Duration::from_secs(5));

        let record = svc.generate_workout(user_id, None).await.unwrap();
        assert_eq!(record.fatigue_score_used.value(), 50);

        let history = svc.workout_history(user_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, record.id);
        assert_eq!(history[0].exercise_count, 4);

        let stored = svc.workout_plan(user_id, record.id).await.unwrap();
        assert_eq!(stored.plan, record.plan);
    }

    #[tokio::test]
    async fn test_failed_generation_writes_nothing() {
        let (db, user_id) = setup(true, &["barbell"]).await;
        db.seed_exercises(&[exercise("Press", "barbell")], false)
            .await
            .unwrap();
        let svc = service(&db, ScriptedGateway::new(Behaviour::Reject), Duration::from_secs(5));

        let err = svc
            .generate_workout(user_id, Some(FatigueScore::new(70).unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkoutError::Generation(_)));
        assert_eq!(AppError::from(err).code, ErrorCode::GenerationFailed);
        assert!(svc.workout_history(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deadline_is_a_generation_error() {
        let (db, user_id) = setup(true, &["barbell"]).await;
        db.seed_exercises(&[exercise("Press", "barbell")], false)
            .await
            .unwrap();
        let svc = service(&db, ScriptedGateway::new(Behaviour::Hang), Duration::from_millis(50));

        let err = svc.generate_workout(user_id, None).await.unwrap_err();
        assert!(matches!(
            err,
            WorkoutError::Generation(GenerationError::TimedOut(_))
        ));
        assert!(svc.workout_history(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_equipment_filter_with_fallback() {
        let (db, user_id) = setup(true, &["dumbbells"]).await;
        db.seed_exercises(
            &[
                exercise("Press Barra", "barbell"),
                exercise("Curl Mancuerna", "dumbbells"),
            ],
            false,
        )
        .await
        .unwrap();
        let gateway = ScriptedGateway::new(Behaviour::Succeed);
        let svc = service(&db, gateway.clone(), Duration::from_secs(5));
        svc.generate_workout(user_id, Some(FatigueScore::new(20).unwrap()))
            .await
            .unwrap();

        let (fatigue, names) = gateway.seen.lock().unwrap()[0].clone();
        assert_eq!(fatigue.value(), 20);
        assert_eq!(names, vec!["Curl Mancuerna".to_owned()]);

        let (db, user_id) = setup(true, &["kettlebell"]).await;
        db.seed_exercises(&[exercise("Press Barra", "barbell")], false)
            .await
            .unwrap();
        let gateway = ScriptedGateway::new(Behaviour::Succeed);
        let svc = service(&db, gateway.clone(), Duration::from_secs(5));
        svc.generate_workout(user_id, None).await.unwrap();
        assert_eq!(gateway.seen.lock().unwrap()[0].1, vec!["Press Barra".to_owned()]);
    }

    #[tokio::test]
    async fn test_foreign_plan_is_not_found() {
        let (db, user_id) = setup(true, &["barbell"]).await;
        let svc = service(&db, ScriptedGateway::new(Behaviour::Succeed), Duration::from_secs(5));

        let err = svc.workout_plan(user_id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, WorkoutError::NotFound));
        assert_eq!(AppError::from(err).http_status(), 404);
    }
}
