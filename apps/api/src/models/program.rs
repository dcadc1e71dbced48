use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Muscle groups recognized by the exercise classifier.
/// Serialized UPPERCASE to match the mobile client's enum values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Biceps,
    Triceps,
    Shoulders,
    Abs,
    #[default]
    Cardio,
}

/// A fully populated exercise entry. The fallback line scanner builds these
/// directly; JSON-sourced exercises stay as maps so extra model-supplied
/// keys (rest periods, per-exercise difficulty) survive to the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub name: String,
    pub description: String,
    pub muscle_group: MuscleGroup,
    pub equipment: String,
    pub sets_count: u32,
    pub reps_count: u32,
    pub duration_seconds: u32,
    pub weight_kg: Option<f64>,
    pub notes: String,
}

/// The two bodyweight exercises substituted whenever no usable exercise
/// survives extraction or validation. Guarantees the response never ships
/// an empty program.
pub fn default_exercise_pair() -> Vec<ExerciseRecord> {
    vec![
        ExerciseRecord {
            name: "Push-ups".to_string(),
            description: "Pompes pour la poitrine et les triceps".to_string(),
            muscle_group: MuscleGroup::Chest,
            equipment: "BODYWEIGHT".to_string(),
            sets_count: 3,
            reps_count: 10,
            duration_seconds: 0,
            weight_kg: None,
            notes: "Commencez par les genoux si nécessaire".to_string(),
        },
        ExerciseRecord {
            name: "Squats".to_string(),
            description: "Squats pour les jambes".to_string(),
            muscle_group: MuscleGroup::Legs,
            equipment: "BODYWEIGHT".to_string(),
            sets_count: 3,
            reps_count: 15,
            duration_seconds: 0,
            weight_kg: None,
            notes: "Gardez le dos droit".to_string(),
        },
    ]
}

/// Response schema for a generated training program.
///
/// The normalization pipeline guarantees every required field is present
/// and typed; deserializing its output into this struct is the final
/// conformance check before the response leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingProgramResponse {
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty_level: String,
    pub target_audience: String,
    pub duration_weeks: u32,
    pub sessions_per_week: u32,
    pub estimated_duration_minutes: u32,
    pub equipment_required: String,

    /// Validated exercise maps, kept untyped to preserve extra keys.
    #[serde(default)]
    pub exercises: Option<Vec<Value>>,
    #[serde(default)]
    pub tips: Option<String>,
    #[serde(default)]
    pub progression_plan: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muscle_group_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(MuscleGroup::Chest).unwrap(),
            serde_json::json!("CHEST")
        );
        assert_eq!(
            serde_json::to_value(MuscleGroup::Shoulders).unwrap(),
            serde_json::json!("SHOULDERS")
        );
    }

    #[test]
    fn test_muscle_group_deserializes_uppercase() {
        let group: MuscleGroup = serde_json::from_str(r#""LEGS""#).unwrap();
        assert_eq!(group, MuscleGroup::Legs);
    }

    #[test]
    fn test_muscle_group_default_is_cardio() {
        assert_eq!(MuscleGroup::default(), MuscleGroup::Cardio);
    }

    #[test]
    fn test_default_pair_is_chest_then_legs() {
        let pair = default_exercise_pair();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0].name, "Push-ups");
        assert_eq!(pair[0].muscle_group, MuscleGroup::Chest);
        assert_eq!(pair[0].reps_count, 10);
        assert_eq!(pair[1].name, "Squats");
        assert_eq!(pair[1].muscle_group, MuscleGroup::Legs);
        assert_eq!(pair[1].reps_count, 15);
    }

    #[test]
    fn test_exercise_record_serializes_null_weight() {
        let exercise = &default_exercise_pair()[0];
        let json = serde_json::to_value(exercise).unwrap();
        assert!(json["weight_kg"].is_null());
        assert_eq!(json["muscle_group"], "CHEST");
        assert_eq!(json["equipment"], "BODYWEIGHT");
    }

    #[test]
    fn test_response_accepts_map_exercises_with_extra_keys() {
        let json = serde_json::json!({
            "name": "Programme force",
            "description": "Programme de force 8 semaines",
            "category": "musculation",
            "difficulty_level": "intermediate",
            "target_audience": "intermediate level",
            "duration_weeks": 8,
            "sessions_per_week": 4,
            "estimated_duration_minutes": 60,
            "equipment_required": "barbell",
            "exercises": [
                {"name": "Développé couché", "muscle_group": "CHEST", "rest": "90 seconds"}
            ]
        });
        let response: TrainingProgramResponse = serde_json::from_value(json).unwrap();
        let exercises = response.exercises.unwrap();
        assert_eq!(exercises[0]["rest"], "90 seconds");
        assert!(response.tips.is_none());
    }
}
