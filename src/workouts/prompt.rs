// ABOUTME: Renders the workout generation prompt from a profile, fatigue score, and exercise list
// ABOUTME: Pure function with Spanish output and exactly one fatigue tier message
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use gym_coach_core::constants::generation::MAX_PROMPT_EXERCISES;
use gym_coach_core::constants::plan::DEFAULT_MEDICAL_DISCLAIMER;

use crate::models::{Exercise, ExperienceLevel, FatigueScore, FitnessObjective, UserProfile};

/// Fatigue band that decides how the model should adjust the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatigueTier {
    /// Below 40
    Low,
    /// 40 to 60 inclusive
    Normal,
    /// Above 60, up to 80
    ModerateHigh,
    /// Above 80
    High,
}

impl FatigueTier {
    /// Classify a score
    #[must_use]
    pub const fn from_score(score: FatigueScore) -> Self {
        match score.value() {
            81..=u8::MAX => Self::High,
            61..=80 => Self::ModerateHigh,
            0..=39 => Self::Low,
            _ => Self::Normal,
        }
    }

    /// Adjustment instruction rendered into the prompt
    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::High => {
                "⚠️ FATIGA ALTA (>80): Reduce volumen 30%. RPE -2 puntos. Considera semana de descarga."
            }
            Self::ModerateHigh => {
                "⚠️ FATIGA MODERADA-ALTA (60-80): Reduce volumen 15%. Mantén RPE pero reduce series."
            }
            Self::Low => {
                "✅ FATIGA BAJA (<40): Usuario está fresco. Puedes aumentar intensidad +5-10%."
            }
            Self::Normal => "✅ FATIGA NORMAL (40-60): Mantén volumen e intensidad estándar.",
        }
    }
}

const fn objective_label(objective: FitnessObjective) -> &'static str {
    match objective {
        FitnessObjective::Hypertrophy => "Hipertrofia (ganancia muscular)",
        FitnessObjective::Cutting => "Definición (pérdida de grasa)",
        FitnessObjective::Strength => "Fuerza máxima",
        FitnessObjective::Recomposition => "Recomposición corporal",
    }
}

const fn experience_label(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::Beginner => "Principiante",
        ExperienceLevel::Intermediate => "Intermedio",
        ExperienceLevel::Advanced => "Avanzado",
    }
}

fn exercise_line(exercise: &Exercise) -> String {
    format!(
        "- {} ({}): {}",
        exercise.name,
        exercise.muscle_groups.join(", "),
        exercise.safety_notes
    )
}

/// Build the generation prompt
///
/// Only the first `MAX_PROMPT_EXERCISES` entries of `exercises` are listed.
#[must_use]
pub fn build_workout_prompt(
    profile: &UserProfile,
    fatigue: FatigueScore,
    exercises: &[Exercise],
) -> String {
    let library = exercises
        .iter()
        .take(MAX_PROMPT_EXERCISES)
        .map(exercise_line)
        .collect::<Vec<_>>()
        .join("\n");

    let injuries = if profile.injury_history.is_empty() {
        "Ninguna".to_owned()
    } else {
        profile.injury_history.join(", ")
    };

    let guidance = FatigueTier::from_score(fatigue).guidance();

    format!(
        r#"Eres un entrenador personal experto. Genera un plan de entrenamiento personalizado para hoy.

**PERFIL DEL USUARIO:**
- Edad: {age} años
- Peso: {weight} kg, Altura: {height} cm
- Objetivo: {objective}
- Experiencia: {experience}
- Días de entrenamiento/semana: {days}
- Equipamiento disponible: {equipment}
- Lesiones/historial: {injuries}

**CONTEXTO DE FATIGA:**
- Score de fatiga: {fatigue}/100
- {guidance}

**BIBLIOTECA DE EJERCICIOS DISPONIBLES:**
{library}

**INSTRUCCIONES:**
1. Diseña un entreno COMPLETO para hoy (todo el cuerpo o split según experiencia)
2. Selecciona 6-12 ejercicios de la biblioteca
3. Ajusta volumen e intensidad según el score de fatiga
4. Para principiantes: enfoque en ejercicios básicos, técnica, RPE 6-7
5. Para avanzados: ejercicios complejos, mayor volumen, RPE 7-9
6. Respeta las contraindicaciones de lesiones
7. Usa solo equipamiento disponible

**FORMATO DE RESPUESTA (JSON estricto):**
{{
  "workout_plan": [
    {{
      "musculo": "nombre del músculo",
      "ejercicio": "nombre exacto del ejercicio",
      "series": 3,
      "repeticiones": "8-12",
      "rpe_objetivo": 7,
      "descanso_segundos": 90,
      "notas_seguridad": "Técnica y precauciones"
    }}
  ],
  "disclaimer_medico": "{disclaimer}",
  "fatiga_score_usado": {fatigue},
  "ajuste_aplicado": "Descripción breve del ajuste hecho por fatiga (o null si no aplica)"
}}

Genera el plan ahora en formato JSON válido:"#,
        age = profile.age,
        weight = profile.weight_kg,
        height = profile.height_cm,
        objective = objective_label(profile.objective),
        experience = experience_label(profile.experience_level),
        days = profile.training_days_per_week,
        equipment = profile.equipment_available.join(", "),
        disclaimer = DEFAULT_MEDICAL_DISCLAIMER,
    )
}
