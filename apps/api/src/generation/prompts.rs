//! Prompt construction for the model backend.
//!
//! Profiles arrive with French UI labels; the model works better on the
//! English vocabulary, so labels go through fixed translation tables and
//! both forms are shown to the model. Unknown labels pass through
//! lowercased. The main template demands JSON-only output; the pipeline
//! downstream copes when the model ignores that.

use crate::models::profile::UserProfile;

/// Probe prompt for the connection-test endpoint.
pub const CONNECTION_TEST_PROMPT: &str =
    "Réponds simplement 'OK' si tu reçois ce message de test.";

// ────────────────────────────────────────────────────────────────────────────
// Profile label translations (French UI value → English prompt value)
// ────────────────────────────────────────────────────────────────────────────

const EXPERIENCE_TRANSLATIONS: &[(&str, &str)] = &[
    ("Débutant", "beginner"),
    ("Intermédiaire", "intermediate"),
    ("Avancé", "advanced"),
    ("Expert", "expert"),
];

const GOAL_TRANSLATIONS: &[(&str, &str)] = &[
    ("Prise de masse", "muscle_gain"),
    ("Perte de poids", "weight_loss"),
    ("Force", "strength"),
    ("Endurance", "endurance"),
    ("Tonification", "toning"),
    ("Réhabilitation", "rehabilitation"),
    ("Performance sportive", "sports_performance"),
];

const PREFERENCE_TRANSLATIONS: &[(&str, &str)] = &[
    ("Musculation", "strength_training"),
    ("Cardio", "cardio"),
    ("CrossFit", "crossfit"),
    ("Yoga", "yoga"),
    ("Pilates", "pilates"),
    ("Fonctionnel", "functional_training"),
];

const EQUIPMENT_TRANSLATIONS: &[(&str, &str)] = &[
    ("Salle de sport complète", "full_gym"),
    ("Équipement basique", "basic_equipment"),
    ("Poids libres", "free_weights"),
    ("Machines", "machines"),
    ("Sans équipement", "bodyweight_only"),
    ("Équipement maison", "home_equipment"),
];

fn translate(table: &[(&str, &str)], value: &str) -> String {
    table
        .iter()
        .find(|(french, _)| *french == value)
        .map(|(_, english)| (*english).to_string())
        .unwrap_or_else(|| value.to_lowercase())
}

// ────────────────────────────────────────────────────────────────────────────
// Derived profile values
// ────────────────────────────────────────────────────────────────────────────

/// BMI rounded to one decimal, "N/A" when the height is unusable.
fn bmi_label(weight: f64, height_cm: f64) -> String {
    if height_cm <= 0.0 {
        return "N/A".to_string();
    }
    let height_m = height_cm / 100.0;
    format!("{:.1}", weight / (height_m * height_m))
}

/// Weekly session count from the free-text frequency label ("4 fois par
/// semaine"). First marker found wins, unknown phrasing means 3.
fn infer_sessions_per_week(session_frequency: &str) -> u32 {
    for (marker, count) in [("3 fois", 3), ("4 fois", 4), ("5 fois", 5), ("6 fois", 6)] {
        if session_frequency.contains(marker) {
            return count;
        }
    }
    3
}

/// Session length in minutes from the free-text duration label. Markers
/// are checked in order 45/90/120, so an "1h45" label reads as 45.
fn infer_session_minutes(session_duration: &str) -> u32 {
    for (marker, minutes) in [("45", 45), ("90", 90), ("120", 120)] {
        if session_duration.contains(marker) {
            return minutes;
        }
    }
    60
}

// ────────────────────────────────────────────────────────────────────────────
// Main generation template
// ────────────────────────────────────────────────────────────────────────────

/// Program generation prompt template. Replace the `{...}` profile
/// placeholders before sending; the braces in the REQUIRED FORMAT block
/// are literal JSON shown to the model.
const TRAINING_PROGRAM_PROMPT_TEMPLATE: &str = r#"
You are an expert fitness trainer. Generate a personalized training program in JSON format for:

PROFILE:
- Age: {age} years old
- Gender: {gender}
- Experience Level: {experience} (translated from: {experience_fr})
- Main Goal: {goal} (translated from: {goal_fr})
- Training Preference: {preference} (translated from: {preference_fr})
- Available Equipment: {equipment} (translated from: {equipment_fr})
- Session Frequency: {sessions_per_week} times per week
- Session Duration: {session_minutes} minutes
- BMI: {bmi}

REQUIREMENTS:
- Create a {experience}-level program
- Focus on {goal}
- Use {equipment} equipment
- Include 4-6 exercises per session
- Adapt sets/reps based on experience level
- Ensure safety and progression

RESPOND ONLY WITH VALID JSON starting with { and ending with }.

REQUIRED FORMAT:
{
    "name": "Programme {goal} - {experience}",
    "description": "Programme personnalisé {goal} pour {gender} de {age} ans, niveau {experience}",
    "category": "{preference}",
    "difficulty_level": "{experience}",
    "target_audience": "{experience} level - {age} years old",
    "duration_weeks": 8,
    "sessions_per_week": {sessions_per_week},
    "estimated_duration_minutes": {session_minutes},
    "equipment_required": "{equipment}",
    "exercises": [
        {
            "name": "Exercise Name in French",
            "description": "Description in French",
            "muscle_group": "MUSCLE_GROUP",
            "equipment": "EQUIPMENT_TYPE",
            "difficulty_level": "{experience}",
            "sets_count": 3,
            "reps_count": "10-12",
            "rest": "90 seconds",
            "notes": "Important notes in French"
        }
    ]
}

EXERCISE GUIDELINES:
- Beginner: 2-3 sets, 10-15 reps, longer rest periods
- Intermediate: 3-4 sets, 8-12 reps, moderate rest
- Advanced: 4-5 sets, 6-10 reps, shorter rest periods
- Expert: 5+ sets, 4-8 reps, minimal rest

MUSCLE GROUPS TO COVER:
- CHEST (pectoraux)
- BACK (dos)
- LEGS (jambes)
- SHOULDERS (épaules)
- ARMS (bras)
- CORE (abdominaux)

EQUIPMENT TYPES:
- BODYWEIGHT (poids du corps)
- DUMBBELLS (haltères)
- BARBELL (barre)
- MACHINE (machine)
- RESISTANCE_BANDS (élastiques)
- CARDIO (cardio)

IMPORTANT: Ensure all exercise names and descriptions are in French, but use English for technical terms like muscle groups and equipment types.
"#;

/// Renders the generation prompt for one profile. Pure string work, no I/O.
pub fn build_training_program_prompt(profile: &UserProfile) -> String {
    let experience = translate(EXPERIENCE_TRANSLATIONS, &profile.experience_level);
    let goal = translate(GOAL_TRANSLATIONS, &profile.main_goal);
    let preference = translate(PREFERENCE_TRANSLATIONS, &profile.training_preference);
    let equipment = translate(EQUIPMENT_TRANSLATIONS, &profile.equipment);
    let sessions_per_week = infer_sessions_per_week(&profile.session_frequency);
    let session_minutes = infer_session_minutes(&profile.session_duration);

    TRAINING_PROGRAM_PROMPT_TEMPLATE
        .replace("{age}", &profile.age.to_string())
        .replace("{gender}", &profile.gender)
        .replace("{experience}", &experience)
        .replace("{experience_fr}", &profile.experience_level)
        .replace("{goal}", &goal)
        .replace("{goal_fr}", &profile.main_goal)
        .replace("{preference}", &preference)
        .replace("{preference_fr}", &profile.training_preference)
        .replace("{equipment}", &equipment)
        .replace("{equipment_fr}", &profile.equipment)
        .replace("{sessions_per_week}", &sessions_per_week.to_string())
        .replace("{session_minutes}", &session_minutes.to_string())
        .replace("{bmi}", &bmi_label(profile.weight, profile.height))
}
