// ABOUTME: Built-in exercise library used to seed the database
// ABOUTME: Spanish names, muscle groups, equipment tags, safety notes, cues, and volume per level
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Exercise Library
//!
//! Reference data for the prompt builder. Equipment tags use the same
//! vocabulary users pick from when filling `equipment_available`:
//! `barbell`, `dumbbells`, `cables`, `machines`, `bench`, `squat rack`,
//! `pull-up bar`, `dip bars`, and `bodyweight`.

use crate::models::{Exercise, VolumeGuidelines};

struct LibraryEntry {
    name: &'static str,
    muscle_groups: &'static [&'static str],
    equipment: &'static [&'static str],
    safety_notes: &'static str,
    technique_cues: &'static [&'static str],
    /// Beginner, intermediate, advanced
    volume: (&'static str, &'static str, &'static str),
}

impl LibraryEntry {
    fn to_exercise(&self) -> Exercise {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| (*s).to_owned()).collect() };
        Exercise {
            name: self.name.to_owned(),
            muscle_groups: owned(self.muscle_groups),
            equipment: owned(self.equipment),
            safety_notes: self.safety_notes.to_owned(),
            technique_cues: owned(self.technique_cues),
            volume_guidelines: VolumeGuidelines {
                beginner: self.volume.0.to_owned(),
                intermediate: self.volume.1.to_owned(),
                advanced: self.volume.2.to_owned(),
            },
        }
    }
}

/// The built-in library as owned models, in seeding order
#[must_use]
pub fn default_exercises() -> Vec<Exercise> {
    LIBRARY.iter().map(LibraryEntry::to_exercise).collect()
}

const LIBRARY: &[LibraryEntry] = &[
    // Pecho
    LibraryEntry {
        name: "Press Banca con Barra",
        muscle_groups: &["pectoral", "triceps", "deltoides anterior"],
        equipment: &["barbell", "bench"],
        safety_notes: "No arquear excesivamente la espalda. Mantener escápulas retraídas. Usar spotters para cargas altas.",
        technique_cues: &[
            "Escápulas retraídas y deprimidas",
            "Codos 45 grados del torso",
            "Barra desciende a pezones",
            "Pies firmes en el suelo",
        ],
        volume: ("3x8-12", "4x6-10", "4-5x5-8"),
    },
    LibraryEntry {
        name: "Press Inclinado con Mancuernas",
        muscle_groups: &["pectoral superior", "triceps", "deltoides anterior"],
        equipment: &["dumbbells", "bench"],
        safety_notes: "Banco a 30-45 grados. Control en el descenso. No bloquear codos completamente.",
        technique_cues: &[
            "Banco a 30-45 grados",
            "Descenso controlado hasta altura clavícula",
            "Mancuernas en ángulo neutral",
            "Estabilizar core",
        ],
        volume: ("3x10-12", "3-4x8-12", "4x8-10"),
    },
    LibraryEntry {
        name: "Aperturas con Mancuernas",
        muscle_groups: &["pectoral"],
        equipment: &["dumbbells", "bench"],
        safety_notes: "Mantener ligera flexión de codos. No descender más allá del plano del hombro. Usar peso moderado.",
        technique_cues: &[
            "Ligera flexión de codos fija",
            "Descenso hasta nivel del hombro",
            "Movimiento arqueado, no prensa",
            "Apriete en la contracción",
        ],
        volume: ("3x12-15", "3x10-14", "3-4x10-12"),
    },
    LibraryEntry {
        name: "Flexiones (Push-ups)",
        muscle_groups: &["pectoral", "triceps", "deltoides anterior", "core"],
        equipment: &["bodyweight"],
        safety_notes: "Mantener columna neutral. No dejar caer las caderas. Escápulas estables.",
        technique_cues: &[
            "Cuerpo en línea recta",
            "Manos bajo hombros",
            "Descenso hasta pecho cerca del suelo",
            "Activar core y glúteos",
        ],
        volume: ("3x8-15", "3-4x15-25", "4x20-30 o con lastre"),
    },
    // Espalda
    LibraryEntry {
        name: "Dominadas (Pull-ups)",
        muscle_groups: &["dorsal ancho", "bíceps", "trapecio medio"],
        equipment: &["pull-up bar", "bodyweight"],
        safety_notes: "Evitar balanceo excesivo. Descenso controlado. No forzar si hay dolor de hombro.",
        technique_cues: &[
            "Agarre pronado ligeramente mayor que hombros",
            "Escápulas deprimidas al inicio",
            "Pecho hacia la barra",
            "Control en el descenso",
        ],
        volume: ("3x3-8 o asistidas", "3-4x6-12", "4x8-15 o con lastre"),
    },
    LibraryEntry {
        name: "Remo con Barra (Bent-Over Row)",
        muscle_groups: &["dorsal ancho", "trapecio medio", "romboides", "erectores espinales"],
        equipment: &["barbell"],
        safety_notes: "Mantener espalda neutra. No redondear columna lumbar. Core activo todo el movimiento.",
        technique_cues: &[
            "Bisagra de cadera, espalda recta",
            "Barra tira hacia abdomen bajo",
            "Escápulas retraídas en contracción",
            "Codos pegados al torso",
        ],
        volume: ("3x8-12", "4x8-10", "4x6-10"),
    },
    LibraryEntry {
        name: "Remo Unilateral con Mancuerna",
        muscle_groups: &["dorsal ancho", "trapecio", "romboides"],
        equipment: &["dumbbells", "bench"],
        safety_notes: "Apoyar rodilla y mano en banco. Espalda neutral. No rotar torso en la tracción.",
        technique_cues: &[
            "Rodilla y mano de apoyo alineadas",
            "Mancuerna tira hacia cadera",
            "Escápula retrae al final",
            "No rotar el tronco",
        ],
        volume: ("3x10-12 por lado", "3-4x8-12 por lado", "4x8-10 por lado"),
    },
    LibraryEntry {
        name: "Jalón al Pecho (Lat Pulldown)",
        muscle_groups: &["dorsal ancho", "trapecio inferior", "bíceps"],
        equipment: &["cables", "machines"],
        safety_notes: "No tirar detrás del cuello. Evitar balanceo. Descenso controlado.",
        technique_cues: &[
            "Agarre pronado ancho",
            "Pecho alto hacia la barra",
            "Codos bajan hacia costados",
            "Control en la fase excéntrica",
        ],
        volume: ("3x10-12", "3-4x8-12", "4x8-12"),
    },
    LibraryEntry {
        name: "Peso Muerto (Deadlift)",
        muscle_groups: &["erectores espinales", "glúteos", "isquiotibiales", "trapecio"],
        equipment: &["barbell"],
        safety_notes: "CRÍTICO: Mantener columna neutral. No redondear lumbar. Iniciar con peso ligero y dominar técnica.",
        technique_cues: &[
            "Pies ancho de caderas",
            "Barra sobre media pie",
            "Columna neutral siempre",
            "Bisagra de cadera, empuje de glúteos",
            "Barra pegada a piernas",
        ],
        volume: ("3x5-8 (enfoque técnica)", "3-4x5-8", "4x3-6"),
    },
    // Piernas
    LibraryEntry {
        name: "Sentadilla con Barra (Back Squat)",
        muscle_groups: &["cuádriceps", "glúteos", "isquiotibiales", "erectores espinales"],
        equipment: &["barbell", "squat rack"],
        safety_notes: "Profundidad segura según movilidad. No colapsar rodillas hacia adentro. Usar spotters para cargas altas.",
        technique_cues: &[
            "Pies ancho de hombros",
            "Rodillas siguen línea de pies",
            "Profundidad: cadera bajo rodillas",
            "Pecho alto, core activo",
            "Empuje desde talones",
        ],
        volume: ("3x8-12", "4x6-10", "4-5x5-8"),
    },
    LibraryEntry {
        name: "Prensa de Piernas (Leg Press)",
        muscle_groups: &["cuádriceps", "glúteos", "isquiotibiales"],
        equipment: &["machines"],
        safety_notes: "No despegar lumbar del respaldo. Profundidad controlada. No bloquear rodillas.",
        technique_cues: &[
            "Pies posición media-alta del plato",
            "Lumbar pegada al respaldo",
            "Rodillas alineadas con pies",
            "Descenso hasta 90 grados rodilla",
        ],
        volume: ("3x10-15", "3-4x10-12", "4x8-12"),
    },
    LibraryEntry {
        name: "Zancadas (Lunges)",
        muscle_groups: &["cuádriceps", "glúteos", "isquiotibiales"],
        equipment: &["dumbbells", "bodyweight"],
        safety_notes: "Rodilla delantera no sobrepasa punta del pie. Torso erguido. Balance estable.",
        technique_cues: &[
            "Paso amplio hacia adelante",
            "Rodilla trasera cerca del suelo",
            "Torso vertical",
            "Rodilla delantera a 90 grados",
        ],
        volume: ("3x8-10 por pierna", "3x10-12 por pierna", "3-4x10-12 por pierna con peso"),
    },
    LibraryEntry {
        name: "Peso Muerto Rumano",
        muscle_groups: &["isquiotibiales", "glúteos", "erectores espinales"],
        equipment: &["barbell", "dumbbells"],
        safety_notes: "Enfoque en bisagra de cadera, no sentadilla. Columna neutral. Barra cerca de piernas.",
        technique_cues: &[
            "Rodillas ligeramente flexionadas fijas",
            "Bisagra de cadera, pecho hacia adelante",
            "Barra baja por tibias",
            "Sentir estiramiento en isquios",
        ],
        volume: ("3x8-12", "3-4x8-12", "4x8-10"),
    },
    LibraryEntry {
        name: "Extensión de Cuádriceps (Leg Extension)",
        muscle_groups: &["cuádriceps"],
        equipment: &["machines"],
        safety_notes: "No usar cargas excesivas. Control en la fase excéntrica. Evitar si hay dolor de rodilla.",
        technique_cues: &[
            "Espalda contra respaldo",
            "Extensión completa controlada",
            "Descenso lento",
            "Rodillas alineadas con eje de máquina",
        ],
        volume: ("3x12-15", "3x10-15", "3-4x10-15"),
    },
    LibraryEntry {
        name: "Curl Femoral (Leg Curl)",
        muscle_groups: &["isquiotibiales"],
        equipment: &["machines"],
        safety_notes: "No arquear lumbar. Rango completo de movimiento. Peso moderado.",
        technique_cues: &[
            "Caderas firmes contra banco",
            "Flexión completa de rodillas",
            "Control en la extensión",
            "No despegar caderas",
        ],
        volume: ("3x12-15", "3x10-15", "3-4x10-15"),
    },
    LibraryEntry {
        name: "Elevaciones de Gemelos de Pie (Standing Calf Raise)",
        muscle_groups: &["gastrocnemios", "sóleo"],
        equipment: &["machines", "bodyweight"],
        safety_notes: "Rango completo. No rebotar en la parte baja. Mantener rodillas ligeramente flexionadas.",
        technique_cues: &[
            "Bolas de los pies en el borde",
            "Elevación máxima en puntillas",
            "Descenso completo",
            "Pausa en contracción",
        ],
        volume: ("3x15-20", "3-4x12-20", "4x10-20"),
    },
    // Hombros
    LibraryEntry {
        name: "Press Militar con Barra",
        muscle_groups: &["deltoides anterior", "deltoides lateral", "triceps"],
        equipment: &["barbell"],
        safety_notes: "No arquear excesivamente la espalda. Core activo. Barra parte desde clavículas.",
        technique_cues: &[
            "Pies ancho de caderas",
            "Barra parte de clavículas",
            "Empuje vertical",
            "Core activo, no arquear lumbar",
        ],
        volume: ("3x8-12", "3-4x6-10", "4x5-8"),
    },
    LibraryEntry {
        name: "Elevaciones Laterales con Mancuernas",
        muscle_groups: &["deltoides lateral"],
        equipment: &["dumbbells"],
        safety_notes: "No usar impulso. Peso moderado. No elevar por encima del hombro si hay molestias.",
        technique_cues: &[
            "Ligera flexión de codos",
            "Elevar hasta altura de hombros",
            "Codos ligeramente por encima de manos",
            "Control en el descenso",
        ],
        volume: ("3x12-15", "3x10-15", "3-4x10-15"),
    },
    LibraryEntry {
        name: "Elevaciones Frontales con Mancuernas",
        muscle_groups: &["deltoides anterior"],
        equipment: &["dumbbells"],
        safety_notes: "No usar balanceo. Evitar si hay dolor de hombro anterior.",
        technique_cues: &[
            "Mancuernas frente a muslos",
            "Elevación hasta altura de ojos",
            "Alternar brazos o simultáneas",
            "Control en descenso",
        ],
        volume: ("3x12-15", "3x10-12", "3x10-12"),
    },
    LibraryEntry {
        name: "Pájaros (Face Pulls con Cables)",
        muscle_groups: &["deltoides posterior", "trapecio medio", "romboides"],
        equipment: &["cables"],
        safety_notes: "Movimiento esencial para salud de hombro. Peso moderado, muchas repeticiones.",
        technique_cues: &[
            "Cables a altura de cara",
            "Tirar hacia frente de cara",
            "Codos altos y abiertos",
            "Retraer escápulas",
        ],
        volume: ("3x15-20", "3x15-20", "3-4x15-20"),
    },
    LibraryEntry {
        name: "Remo al Mentón con Barra (Upright Row)",
        muscle_groups: &["deltoides lateral", "trapecio superior"],
        equipment: &["barbell"],
        safety_notes: "No elevar más allá del esternón si causa dolor. Considerar alternativas si hay molestia de hombro.",
        technique_cues: &[
            "Agarre ancho",
            "Codos altos y abiertos",
            "Barra hasta esternón",
            "No encoger hombros",
        ],
        volume: ("3x10-12", "3x8-12", "3x8-12"),
    },
    // Brazos
    LibraryEntry {
        name: "Curl de Bíceps con Barra",
        muscle_groups: &["bíceps braquial", "braquial anterior"],
        equipment: &["barbell"],
        safety_notes: "No usar balanceo. Codos fijos al torso. Peso controlado.",
        technique_cues: &[
            "Codos pegados al torso",
            "Extensión completa abajo",
            "Flexión sin mover codos hacia adelante",
            "Control en descenso",
        ],
        volume: ("3x10-12", "3x8-12", "3-4x8-12"),
    },
    LibraryEntry {
        name: "Curl de Bíceps con Mancuernas Alternado",
        muscle_groups: &["bíceps braquial"],
        equipment: &["dumbbells"],
        safety_notes: "Mantener core estable. No rotar muñeca excesivamente. Sin balanceo.",
        technique_cues: &[
            "Mancuernas en posición neutral abajo",
            "Supinación en la subida",
            "Alternar brazos",
            "Codos fijos",
        ],
        volume: ("3x10-12 por brazo", "3x8-12 por brazo", "3x8-12 por brazo"),
    },
    LibraryEntry {
        name: "Curl Martillo (Hammer Curl)",
        muscle_groups: &["bíceps braquial", "braquial anterior", "braquiorradial"],
        equipment: &["dumbbells"],
        safety_notes: "Agarre neutral todo el movimiento. Codos estables. Control total.",
        technique_cues: &[
            "Agarre neutral (palmas enfrentadas)",
            "Codos al costado",
            "Flexión hasta hombro",
            "Descenso controlado",
        ],
        volume: ("3x10-12", "3x10-12", "3x8-12"),
    },
    LibraryEntry {
        name: "Press Francés (Skullcrushers)",
        muscle_groups: &["triceps"],
        equipment: &["barbell", "bench"],
        safety_notes: "No bloquear codos agresivamente. Peso moderado. Control total del movimiento.",
        technique_cues: &[
            "Barra desciende hacia frente",
            "Codos fijos, solo mueven antebrazo",
            "Extensión completa sin bloquear",
            "Control en descenso",
        ],
        volume: ("3x10-12", "3x8-12", "3x8-12"),
    },
    LibraryEntry {
        name: "Extensión de Tríceps en Polea Alta",
        muscle_groups: &["triceps"],
        equipment: &["cables"],
        safety_notes: "Codos fijos al torso. No usar impulso. Extensión completa sin bloquear.",
        technique_cues: &[
            "Codos pegados al torso",
            "Extensión completa abajo",
            "Control en la vuelta",
            "No inclinar torso",
        ],
        volume: ("3x12-15", "3x10-15", "3x10-15"),
    },
    LibraryEntry {
        name: "Fondos en Paralelas (Dips)",
        muscle_groups: &["pectoral inferior", "triceps", "deltoides anterior"],
        equipment: &["dip bars", "bodyweight"],
        safety_notes: "Descenso controlado. No descender más allá de 90 grados de codo si hay dolor. Usar asistencia si es necesario.",
        technique_cues: &[
            "Ligera inclinación hacia adelante para pecho",
            "Descenso hasta 90 grados codo",
            "Empuje controlado",
            "Escápulas estables",
        ],
        volume: ("3x5-10 o asistidas", "3x8-15", "3x10-20 o con lastre"),
    },
    // Core
    LibraryEntry {
        name: "Plancha (Plank)",
        muscle_groups: &["recto abdominal", "transverso abdominal", "oblicuos"],
        equipment: &["bodyweight"],
        safety_notes: "Mantener columna neutral. No dejar caer caderas. Respirar normal.",
        technique_cues: &[
            "Cuerpo en línea recta",
            "Core activo, ombligo hacia dentro",
            "No bajar caderas ni elevarlas",
            "Respiración normal",
        ],
        volume: ("3x20-30 segundos", "3x45-60 segundos", "3x60-90 segundos"),
    },
    LibraryEntry {
        name: "Crunch Abdominal",
        muscle_groups: &["recto abdominal"],
        equipment: &["bodyweight"],
        safety_notes: "No tirar del cuello. Movimiento controlado. Rango parcial del abdomen.",
        technique_cues: &[
            "Manos detrás de cabeza sin tirar",
            "Flexión de tronco, no de cuello",
            "Elevación de escápulas del suelo",
            "Descenso controlado",
        ],
        volume: ("3x15-20", "3x20-30", "3x25-40"),
    },
    LibraryEntry {
        name: "Elevación de Piernas (Leg Raises)",
        muscle_groups: &["recto abdominal inferior", "flexores de cadera"],
        equipment: &["bodyweight", "pull-up bar"],
        safety_notes: "No arquear lumbar. Si es necesario, flexionar rodillas. Descenso controlado.",
        technique_cues: &[
            "Lumbar pegada al suelo",
            "Piernas juntas",
            "Elevación hasta 90 grados",
            "Descenso sin tocar suelo",
        ],
        volume: ("3x10-15 (rodillas flexionadas)", "3x12-20", "3x15-25"),
    },
    LibraryEntry {
        name: "Russian Twist",
        muscle_groups: &["oblicuos", "recto abdominal"],
        equipment: &["bodyweight"],
        safety_notes: "Mantener columna neutra. No usar peso excesivo. Movimiento controlado.",
        technique_cues: &[
            "Torso inclinado 45 grados",
            "Pies elevados o en suelo (según nivel)",
            "Rotación de torso lado a lado",
            "Peso toca suelo cada lado",
        ],
        volume: ("3x20-30 (total ambos lados)", "3x30-40", "3x40-60"),
    },
    LibraryEntry {
        name: "Mountain Climbers",
        muscle_groups: &["core", "cardio"],
        equipment: &["bodyweight"],
        safety_notes: "Mantener espalda neutral. Caderas estables. Movimiento rápido pero controlado.",
        technique_cues: &[
            "Posición de plancha alta",
            "Rodillas alternan hacia pecho",
            "Caderas estables",
            "Ritmo constante",
        ],
        volume: ("3x20-30 segundos", "3x30-45 segundos", "3x45-60 segundos"),
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_library_names_are_unique() {
        let names: HashSet<_> = LIBRARY.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), LIBRARY.len());
        assert_eq!(LIBRARY.len(), 32);
    }

    #[test]
    fn test_every_entry_is_complete() {
        for exercise in default_exercises() {
            assert!(!exercise.muscle_groups.is_empty(), "{}", exercise.name);
            assert!(!exercise.equipment.is_empty(), "{}", exercise.name);
            assert!(!exercise.technique_cues.is_empty(), "{}", exercise.name);
            assert!(!exercise.safety_notes.is_empty(), "{}", exercise.name);
        }
    }

    #[test]
    fn test_bodyweight_only_profile_still_has_options() {
        let available = vec!["bodyweight".to_owned()];
        let matching = default_exercises()
            .into_iter()
            .filter(|e| e.matches_equipment(&available))
            .count();
        assert!(matching >= 6);
    }
}
