// ABOUTME: Exercise library entry with muscle groups, equipment tags, and safety notes
// ABOUTME: Immutable reference data seeded once and read when building prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::profile::ExperienceLevel;

/// Volume prescription per experience level, e.g. `"4x6-10"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeGuidelines {
    /// Prescription for beginners
    pub beginner: String,
    /// Prescription for intermediate lifters
    pub intermediate: String,
    /// Prescription for advanced lifters
    pub advanced: String,
}

impl VolumeGuidelines {
    /// Prescription for the given level
    #[must_use]
    pub fn for_level(&self, level: ExperienceLevel) -> &str {
        match level {
            ExperienceLevel::Beginner => &self.beginner,
            ExperienceLevel::Intermediate => &self.intermediate,
            ExperienceLevel::Advanced => &self.advanced,
        }
    }
}

/// Exercise library entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique display name
    pub name: String,
    /// Muscles worked, primary first
    pub muscle_groups: Vec<String>,
    /// Equipment needed, empty for no equipment
    pub equipment: Vec<String>,
    /// Contraindications and injury warnings
    pub safety_notes: String,
    /// Ordered technique cues
    pub technique_cues: Vec<String>,
    /// Volume prescription per experience level
    pub volume_guidelines: VolumeGuidelines,
}

impl Exercise {
    /// Whether any muscle group or equipment tag appears in `available`
    #[must_use]
    pub fn matches_equipment(&self, available: &[String]) -> bool {
        self.equipment
            .iter()
            .chain(self.muscle_groups.iter())
            .any(|tag| available.iter().any(|item| item.eq_ignore_ascii_case(tag)))
    }
}
