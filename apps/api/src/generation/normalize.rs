//! Final normalization of a parsed or fallback-built program map.
//!
//! Totality is the contract: any `Value` in, a map with every required
//! field out, never an error. Absent and falsy are treated alike for
//! required fields (null, false, 0, "", [], {}), so an explicit zero
//! reads as missing and is replaced by the field default.

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use crate::models::program::default_exercise_pair;

/// Required top-level fields with the defaults substituted when a field
/// is absent or falsy.
static REQUIRED_FIELD_DEFAULTS: Lazy<Vec<(&'static str, Value)>> = Lazy::new(|| {
    vec![
        ("name", json!("Programme d'entraînement")),
        ("description", json!("Programme personnalisé")),
        ("category", json!("musculation")),
        ("difficulty_level", json!("beginner")),
        ("target_audience", json!("tous niveaux")),
        ("duration_weeks", json!(8)),
        ("sessions_per_week", json!(3)),
        ("estimated_duration_minutes", json!(45)),
        ("equipment_required", json!("dumbbells")),
    ]
});

/// Exercise fields defaulted when absent or falsy. The remaining exercise
/// fields (description, duration_seconds, weight_kg, notes) are defaulted
/// only when the key is missing, so explicit zeros and empty strings stay.
static EXERCISE_FIELD_DEFAULTS: Lazy<Vec<(&'static str, Value)>> = Lazy::new(|| {
    vec![
        ("muscle_group", json!("CARDIO")),
        ("equipment", json!("BODYWEIGHT")),
        ("sets_count", json!(3)),
        ("reps_count", json!(10)),
    ]
});

/// Fields the schema types as integers but models like to return as
/// floats, numeric strings, or single-element lists.
const INTEGER_FIELDS: &[&str] = &[
    "estimated_duration_minutes",
    "duration_weeks",
    "sessions_per_week",
];

/// Makes any JSON value conform to the program schema.
///
/// Non-object input is treated as an empty map, so even a bare string or
/// number comes out as a fully defaulted program. Step order matters:
/// required-field defaults run before the integer coercion, so a falsy
/// `[]` in a duration field is already replaced by the time coercion
/// looks for a first element. Coercion can itself land on 0 (a sub-1
/// duration truncates), which reads as missing again, so the defaults
/// pass runs once more at the end. That keeps the result stable under
/// re-normalization.
pub fn normalize_program(value: Value) -> Value {
    let mut program = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    apply_required_defaults(&mut program);
    normalize_exercises(&mut program);
    stringify_field(&mut program, "tips");
    stringify_field(&mut program, "progression_plan");
    join_equipment_list(&mut program);
    for field in INTEGER_FIELDS {
        coerce_integer_field(&mut program, field);
    }
    apply_required_defaults(&mut program);

    Value::Object(program)
}

fn apply_required_defaults(program: &mut Map<String, Value>) {
    for (field, default) in REQUIRED_FIELD_DEFAULTS.iter() {
        if program.get(*field).map_or(true, is_falsy) {
            program.insert((*field).to_string(), default.clone());
        }
    }
}

/// Truthiness in the permissive sense: null, false, zero, and empty
/// containers all count as missing.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Validates the exercise list in place. Absent, falsy, or non-list values
/// and lists where no entry survives validation all land on the default
/// pair, so the output list is never empty.
fn normalize_exercises(program: &mut Map<String, Value>) {
    let validated: Vec<Value> = match program.get("exercises") {
        Some(value) if !is_falsy(value) => value
            .as_array()
            .map(|entries| entries.iter().filter_map(validate_exercise).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    if validated.is_empty() {
        program.insert("exercises".to_string(), json!(default_exercise_pair()));
    } else {
        program.insert("exercises".to_string(), Value::Array(validated));
    }
}

/// One exercise entry: must be a map with a truthy `name`, everything else
/// is defaulted. Unknown keys pass through untouched.
fn validate_exercise(entry: &Value) -> Option<Value> {
    let map = entry.as_object()?;
    let name = map.get("name").filter(|name| !is_falsy(name))?;

    let mut exercise = map.clone();
    for (field, default) in EXERCISE_FIELD_DEFAULTS.iter() {
        if exercise.get(*field).map_or(true, is_falsy) {
            exercise.insert((*field).to_string(), default.clone());
        }
    }

    if !exercise.contains_key("description") {
        let label = match name {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        exercise.insert(
            "description".to_string(),
            Value::String(format!("Exercice: {}", label)),
        );
    }
    exercise.entry("duration_seconds").or_insert(json!(0));
    exercise.entry("weight_kg").or_insert(Value::Null);
    exercise.entry("notes").or_insert(json!(""));

    Some(Value::Object(exercise))
}

/// Present but non-string values become their JSON rendering, so a model
/// answering with a tips array still fits the string-typed schema field.
fn stringify_field(program: &mut Map<String, Value>, field: &str) {
    if let Some(value) = program.get(field) {
        if !value.is_string() {
            let rendered = value.to_string();
            program.insert(field.to_string(), Value::String(rendered));
        }
    }
}

/// `equipment_required` as a list becomes a ", "-joined string. Non-string
/// elements are rendered as JSON rather than rejected.
fn join_equipment_list(program: &mut Map<String, Value>) {
    let joined = match program.get("equipment_required") {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    };
    if let Some(joined) = joined {
        program.insert("equipment_required".to_string(), Value::String(joined));
    }
}

/// Integer coercion for duration-like fields: a non-empty list contributes
/// its first element (numbers truncate, numeric strings parse); a plain
/// number truncates. Anything uncoercible is left as provided and caught
/// by the schema check at the response boundary.
fn coerce_integer_field(program: &mut Map<String, Value>, field: &str) {
    let coerced = match program.get(field) {
        Some(Value::Array(items)) => items.first().and_then(coerce_to_integer),
        Some(value @ Value::Number(_)) => coerce_to_integer(value),
        _ => None,
    };
    if let Some(int) = coerced {
        program.insert(field.to_string(), json!(int));
    }
}

fn coerce_to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
