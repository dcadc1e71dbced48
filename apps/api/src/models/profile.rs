use serde::{Deserialize, Serialize};

/// Incoming user profile for program generation.
///
/// The questionnaire fields arrive in French ("Débutant", "Prise de masse");
/// translation to the English vocabulary the model was prompted with happens
/// in prompt construction, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: i64,
    pub gender: String,
    /// Weight in kg.
    pub weight: f64,
    /// Height in cm.
    pub height: f64,
    pub experience_level: String,
    pub main_goal: String,
    pub session_frequency: String,
    pub session_duration: String,
    pub equipment: String,
    pub training_preference: String,

    #[serde(default)]
    pub body_fat_percentage: Option<f64>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserProfile {
    /// Checks the numeric range constraints, collecting every violation so
    /// the client sees the full list in one round trip.
    pub fn validate(&self) -> Result<(), String> {
        let mut violations = Vec::new();

        if !(13..=100).contains(&self.age) {
            violations.push(format!("age must be between 13 and 100 (got {})", self.age));
        }
        if !(30.0..=300.0).contains(&self.weight) {
            violations.push(format!(
                "weight must be between 30 and 300 kg (got {})",
                self.weight
            ));
        }
        if !(100.0..=250.0).contains(&self.height) {
            violations.push(format!(
                "height must be between 100 and 250 cm (got {})",
                self.height
            ));
        }
        if let Some(body_fat) = self.body_fat_percentage {
            if !(5.0..=50.0).contains(&body_fat) {
                violations.push(format!(
                    "body_fat_percentage must be between 5 and 50 (got {body_fat})"
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            age: 25,
            gender: "Homme".to_string(),
            weight: 75.0,
            height: 180.0,
            experience_level: "Débutant".to_string(),
            main_goal: "Prise de masse".to_string(),
            session_frequency: "3 fois par semaine".to_string(),
            session_duration: "60 minutes".to_string(),
            equipment: "Salle de sport complète".to_string(),
            training_preference: "Musculation".to_string(),
            body_fat_percentage: None,
            phone_number: None,
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn test_age_below_minimum_fails() {
        let mut profile = sample_profile();
        profile.age = 12;
        let err = profile.validate().unwrap_err();
        assert!(err.contains("age"));
    }

    #[test]
    fn test_age_boundaries_are_inclusive() {
        let mut profile = sample_profile();
        profile.age = 13;
        assert!(profile.validate().is_ok());
        profile.age = 100;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_weight_out_of_range_fails() {
        let mut profile = sample_profile();
        profile.weight = 29.9;
        assert!(profile.validate().is_err());
        profile.weight = 300.1;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_height_out_of_range_fails() {
        let mut profile = sample_profile();
        profile.height = 99.0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_body_fat_is_optional() {
        let mut profile = sample_profile();
        profile.body_fat_percentage = None;
        assert!(profile.validate().is_ok());
        profile.body_fat_percentage = Some(18.5);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_body_fat_out_of_range_fails() {
        let mut profile = sample_profile();
        profile.body_fat_percentage = Some(4.0);
        let err = profile.validate().unwrap_err();
        assert!(err.contains("body_fat_percentage"));
    }

    #[test]
    fn test_multiple_violations_are_collected() {
        let mut profile = sample_profile();
        profile.age = 5;
        profile.weight = 10.0;
        let err = profile.validate().unwrap_err();
        assert!(err.contains("age"));
        assert!(err.contains("weight"));
    }

    #[test]
    fn test_profile_deserializes_without_optional_fields() {
        let json = serde_json::json!({
            "age": 30,
            "gender": "Femme",
            "weight": 62.0,
            "height": 168.0,
            "experience_level": "Intermédiaire",
            "main_goal": "Tonification",
            "session_frequency": "4 fois par semaine",
            "session_duration": "45 minutes",
            "equipment": "Équipement maison",
            "training_preference": "Fonctionnel"
        });
        let profile: UserProfile = serde_json::from_value(json).unwrap();
        assert!(profile.body_fat_percentage.is_none());
        assert!(profile.first_name.is_none());
        assert!(profile.validate().is_ok());
    }
}
