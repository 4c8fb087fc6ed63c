//! Mapping of raw, untrusted submission payloads into typed records.
//!
//! The mapper is total: missing or wrong-typed fields coerce to empty
//! defaults instead of failing. Rejecting bad submissions is the
//! orchestrator's job (see the `validate_*` functions), and runs before
//! mapping.

use serde_json::Value;

use crate::error::ApiError;
use crate::models::{HealerApplication, PatientRegistration};

fn text(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn flag(body: &Value, key: &str) -> bool {
    body.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn has_text(body: &Value, key: &str) -> bool {
    body.get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/* -------------------------
   Validation (pre-mapping)
--------------------------*/

pub fn validate_patient(body: &Value) -> Result<(), ApiError> {
    if !has_text(body, "fullName") || !has_text(body, "phone") {
        return Err(ApiError::required_name_and_phone());
    }
    if !flag(body, "privacyConsent") {
        return Err(ApiError::privacy_consent_required());
    }
    Ok(())
}

pub fn validate_healer(body: &Value) -> Result<(), ApiError> {
    if !has_text(body, "fullName") || !has_text(body, "contactPhone") {
        return Err(ApiError::required_name_and_phone());
    }
    Ok(())
}

/* -------------------------
   Mapping
--------------------------*/

pub fn map_patient(body: &Value) -> PatientRegistration {
    PatientRegistration {
        full_name: text(body, "fullName"),
        age: text(body, "age"),
        phone: text(body, "phone"),
        city: text(body, "city"),
        chronic_illnesses: text(body, "chronicIllnesses"),
        medication_history: text(body, "medicationHistory"),
        mental_treatment: text(body, "mentalTreatment"),
        previous_retreats: text(body, "previousRetreats"),
        ptsd_diagnosis: text(body, "ptsdDiagnosis"),
        psychiatric_medication: text(body, "psychiatricMedication"),
        hospitalizations: text(body, "hospitalizations"),
        addictions: text(body, "addictions"),
        reason_for_healing: text(body, "reasonForHealing"),
        support_system: text(body, "supportSystem"),
        readiness_level: text(body, "readinessLevel"),
        expectations: text(body, "expectations"),
        current_situation: text(body, "currentSituation"),
        privacy_consent: flag(body, "privacyConsent"),
    }
}

pub fn map_healer(body: &Value) -> HealerApplication {
    HealerApplication {
        full_name: text(body, "fullName"),
        age: text(body, "age"),
        main_profession: text(body, "mainProfession"),
        treatments: text(body, "treatments"),
        trauma_experience: text(body, "traumaExperience"),
        retreat_experience: text(body, "retreatExperience"),
        team_experience: text(body, "teamExperience"),
        motivation: text(body, "motivation"),
        strengths: text(body, "strengths"),
        weaknesses: text(body, "weaknesses"),
        extreme_tools: text(body, "extremeTools"),
        shamanic_experience: text(body, "shamanicExperience"),
        personal_journey: text(body, "personalJourney"),
        priorities: text(body, "priorities"),
        availability: text(body, "availability"),
        team_nature: text(body, "teamNature"),
        contact_email: text(body, "contactEmail"),
        contact_phone: text(body, "contactPhone"),
    }
}

/* -------------------------
   Derived summaries
--------------------------*/

fn labeled_concat(parts: &[(&str, &str)]) -> String {
    parts
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(label, v)| format!("{label}: {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flattened health-background text stored alongside the patient row for
/// admin list/search views. Not the canonical record.
pub fn patient_health_background(p: &PatientRegistration) -> String {
    labeled_concat(&[
        ("מחלות כרוניות", &p.chronic_illnesses),
        ("תרופות", &p.medication_history),
        ("טיפול נפשי", &p.mental_treatment),
        ("רטריטים קודמים", &p.previous_retreats),
        ("אבחנת PTSD", &p.ptsd_diagnosis),
        ("תרופות פסיכיאטריות", &p.psychiatric_medication),
        ("אשפוזים", &p.hospitalizations),
        ("התמכרויות", &p.addictions),
    ])
}

/// Flattened experience text stored alongside the healer row.
pub fn healer_experience(h: &HealerApplication) -> String {
    labeled_concat(&[
        ("ניסיון עם טראומה", &h.trauma_experience),
        ("ניסיון בריטריטים", &h.retreat_experience),
        ("ניסיון בעבודת צוות", &h.team_experience),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_patient_rejects_missing_name() {
        let body = json!({ "fullName": "", "phone": "0501112222", "privacyConsent": true });
        assert!(validate_patient(&body).is_err());
    }

    #[test]
    fn validate_patient_rejects_whitespace_only_required_fields() {
        let body = json!({ "fullName": "   ", "phone": "0501112222", "privacyConsent": true });
        assert!(validate_patient(&body).is_err());

        let body = json!({ "fullName": "Dana Cohen", "phone": " \t ", "privacyConsent": true });
        assert!(validate_patient(&body).is_err());
    }

    #[test]
    fn validate_patient_rejects_missing_consent() {
        let body = json!({ "fullName": "Dana Cohen", "phone": "0501112222" });
        assert!(validate_patient(&body).is_err());
    }

    #[test]
    fn validate_patient_accepts_minimal_valid_payload() {
        let body = json!({ "fullName": "Dana Cohen", "phone": "0501112222", "privacyConsent": true });
        assert!(validate_patient(&body).is_ok());
    }

    #[test]
    fn validate_healer_requires_contact_phone() {
        let body = json!({ "fullName": "", "contactPhone": "0501112222" });
        assert!(validate_healer(&body).is_err());

        let body = json!({ "fullName": "Yael Levi", "contactPhone": "0501112222" });
        assert!(validate_healer(&body).is_ok());
    }

    #[test]
    fn map_patient_defaults_missing_and_wrong_typed_fields() {
        let body = json!({
            "fullName": "Dana Cohen",
            "phone": "0501112222",
            "age": 34,                // wrong type, coerced to default
            "privacyConsent": "yes",  // wrong type, coerced to false
        });
        let p = map_patient(&body);
        assert_eq!(p.full_name, "Dana Cohen");
        assert_eq!(p.phone, "0501112222");
        assert_eq!(p.age, "");
        assert_eq!(p.city, "");
        assert!(!p.privacy_consent);
    }

    #[test]
    fn map_healer_never_fails_on_empty_payload() {
        let h = map_healer(&json!({}));
        assert_eq!(h.full_name, "");
        assert_eq!(h.contact_phone, "");
    }

    #[test]
    fn health_background_concatenates_only_present_fields() {
        let mut p = PatientRegistration::default();
        p.chronic_illnesses = "אסתמה".to_string();
        p.addictions = "אין".to_string();

        let summary = patient_health_background(&p);
        assert_eq!(summary, "מחלות כרוניות: אסתמה\nהתמכרויות: אין");
    }

    #[test]
    fn experience_summary_empty_when_no_experience_fields() {
        let h = HealerApplication::default();
        assert_eq!(healer_experience(&h), "");
    }
}
