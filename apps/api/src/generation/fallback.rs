//! Prose fallback when no JSON candidate survives extraction and repair.
//!
//! Local models sometimes answer a JSON-only prompt with free text. We still
//! return a complete program: fixed French defaults for the program shell,
//! plus a line scanner that salvages exercise-looking lines, classifies
//! their muscle group, and pulls sets/reps counts out of the text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use crate::models::program::{default_exercise_pair, ExerciseRecord, MuscleGroup};

// ────────────────────────────────────────────────────────────────────────────
// Classification tables
// ────────────────────────────────────────────────────────────────────────────

/// Substrings that mark a line as exercise-like (English and French,
/// matched against the lowercased line).
const EXERCISE_KEYWORDS: &[&str] = &[
    "push-ups",
    "squats",
    "deadlifts",
    "bench press",
    "pull-ups",
    "lunges",
    "planks",
    "burpees",
    "mountain climbers",
    "jumping jacks",
    "dumbbell",
    "barbell",
    "curl",
    "press",
    "row",
    "fly",
    "extension",
    "flexion",
    "élévation",
    "rotation",
    "abduction",
    "adduction",
];

/// Muscle-group classification rules, checked in order. First rule with a
/// matching keyword wins, so "bench press" lands on Chest before the
/// "press" keyword can reach Shoulders. Unmatched lines fall to Cardio.
const MUSCLE_GROUP_RULES: &[(&[&str], MuscleGroup)] = &[
    (&["push", "bench", "chest", "pectoral"], MuscleGroup::Chest),
    (&["pull", "row", "back", "dorsal"], MuscleGroup::Back),
    (&["squat", "leg", "thigh", "quad"], MuscleGroup::Legs),
    (&["curl", "bicep"], MuscleGroup::Biceps),
    (&["extension", "tricep"], MuscleGroup::Triceps),
    (&["shoulder", "press", "élévation"], MuscleGroup::Shoulders),
    (&["abs", "crunch", "plank"], MuscleGroup::Abs),
];

/// Patterns for sets/reps counts, tried in order: "3 sets of 10 reps",
/// "3x10" (with optional "-12" range), "3 sets, 10 reps". Only the first
/// two capture groups are used; a range keeps its lower bound.
static SETS_REPS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(\d+)\s*sets?\s*of\s*(\d+)-?(\d+)?\s*reps?").expect("valid regex"),
        Regex::new(r"(?i)(\d+)x(\d+)-?(\d+)?").expect("valid regex"),
        Regex::new(r"(?i)(\d+)\s*sets?[,\s]+(\d+)-?(\d+)?\s*reps?").expect("valid regex"),
    ]
});

// ────────────────────────────────────────────────────────────────────────────
// Program builder
// ────────────────────────────────────────────────────────────────────────────

/// Builds a complete program from unparseable model output.
///
/// The shell fields are fixed defaults; the exercise list comes from the
/// line scanner, or the default pair when the scanner finds nothing. The
/// first 100 characters of the raw reply are kept in the description so
/// the answer is not silently lost.
pub fn build_fallback_program(raw: &str) -> Value {
    let exercises = extract_exercises_from_text(raw);
    let preview: String = raw.chars().take(100).collect();

    json!({
        "name": "Programme d'entraînement personnalisé",
        "description": format!("Programme généré par IA: {}...", preview),
        "category": "musculation",
        "difficulty_level": "beginner",
        "target_audience": "tous niveaux",
        "duration_weeks": 8,
        "sessions_per_week": 3,
        "estimated_duration_minutes": 45,
        "equipment_required": "dumbbells",
        "exercises": exercises,
        "tips": "Commencez progressivement et écoutez votre corps",
        "progression_plan": "Augmentez progressivement l'intensité"
    })
}

/// Scans the reply line by line for exercise-looking content. Falls back
/// to the default pair when nothing usable is found.
fn extract_exercises_from_text(raw: &str) -> Vec<ExerciseRecord> {
    let mut exercises = Vec::new();
    for line in raw.lines() {
        let trimmed = line.trim();
        if !is_exercise_line(trimmed) {
            continue;
        }
        if let Some(exercise) = parse_exercise_line(trimmed) {
            exercises.push(exercise);
        }
    }

    if exercises.is_empty() {
        return default_exercise_pair();
    }
    exercises
}

/// A line is exercise-like when it starts with a digit (numbered list) or
/// contains a known exercise keyword.
fn is_exercise_line(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    if line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    let lower = line.to_lowercase();
    EXERCISE_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

/// Turns one exercise-like line into a record. Lines shorter than five
/// characters are noise (bare list markers) and dropped.
fn parse_exercise_line(line: &str) -> Option<ExerciseRecord> {
    if line.chars().count() < 5 {
        return None;
    }

    // "1. Push-ups: 3 sets of 10 (rest 60s)" → name "1. Push-ups"
    let name = line
        .split(':')
        .next()
        .unwrap_or(line)
        .split('(')
        .next()
        .unwrap_or(line)
        .trim();
    let (sets_count, reps_count) = extract_sets_and_reps(line);

    Some(ExerciseRecord {
        name: name.to_string(),
        description: line.to_string(),
        muscle_group: classify_muscle_group(&name.to_lowercase()),
        equipment: "BODYWEIGHT".to_string(),
        sets_count,
        reps_count,
        duration_seconds: 0,
        weight_kg: None,
        notes: "Exercice extrait de la réponse IA".to_string(),
    })
}

fn classify_muscle_group(lower: &str) -> MuscleGroup {
    for (keywords, group) in MUSCLE_GROUP_RULES {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *group;
        }
    }
    MuscleGroup::Cardio
}

/// First matching pattern wins; counts that fail to parse fall back to 3x10.
fn extract_sets_and_reps(line: &str) -> (u32, u32) {
    for pattern in SETS_REPS_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(line) {
            let sets = captures.get(1).and_then(|m| m.as_str().parse().ok());
            let reps = captures.get(2).and_then(|m| m.as_str().parse().ok());
            return match (sets, reps) {
                (Some(sets), Some(reps)) => (sets, reps),
                _ => (3, 10),
            };
        }
    }
    (3, 10)
}
