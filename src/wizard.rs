//! Client-side multi-step form state machine.
//!
//! Drives the two intake wizards: four fixed steps per form kind, a flat
//! field map, and the same required-field rules the server enforces, so a
//! front end can reject an incomplete submission before calling the API.
//! The HTTP round-trip itself stays outside this module; callers feed its
//! outcome back through [`MultiStepForm::complete_submit`].

use std::collections::HashMap;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::models::FormKind;

pub const STEP_COUNT: usize = 4;

/// Delay before the post-success redirect to the home route.
const REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

pub struct StepInfo {
    pub title_he: &'static str,
    pub title_en: &'static str,
    pub fields: &'static [&'static str],
}

static PATIENT_STEPS: [StepInfo; STEP_COUNT] = [
    StepInfo {
        title_he: "פרטים אישיים",
        title_en: "Personal Details",
        fields: &["fullName", "age", "phone", "city"],
    },
    StepInfo {
        title_he: "רקע רפואי ופיזי",
        title_en: "Medical Background",
        fields: &["chronicIllnesses", "medicationHistory"],
    },
    StepInfo {
        title_he: "היסטוריה טיפולית ונפשית",
        title_en: "Mental History",
        fields: &[
            "mentalTreatment",
            "previousRetreats",
            "ptsdDiagnosis",
            "psychiatricMedication",
            "hospitalizations",
            "addictions",
        ],
    },
    StepInfo {
        title_he: "הכוונה, תמיכה ומוכנות",
        title_en: "Guidance and Support",
        fields: &[
            "reasonForHealing",
            "supportSystem",
            "readinessLevel",
            "expectations",
            "currentSituation",
        ],
    },
];

static HEALER_STEPS: [StepInfo; STEP_COUNT] = [
    StepInfo {
        title_he: "פרטים אישיים ומקצועיים",
        title_en: "Personal and Professional Details",
        fields: &[
            "fullName",
            "age",
            "mainProfession",
            "treatments",
            "contactEmail",
            "contactPhone",
        ],
    },
    StepInfo {
        title_he: "ניסיון ומומחיות",
        title_en: "Experience and Expertise",
        fields: &["traumaExperience", "retreatExperience", "teamExperience"],
    },
    StepInfo {
        title_he: "מוטיבציה והערכה עצמית",
        title_en: "Motivation and Self-Assessment",
        fields: &["motivation", "strengths", "weaknesses", "extremeTools"],
    },
    StepInfo {
        title_he: "ידע מיוחד וזמינות",
        title_en: "Specialized Knowledge and Availability",
        fields: &[
            "shamanicExperience",
            "personalJourney",
            "priorities",
            "availability",
            "teamNature",
        ],
    },
];

pub fn steps(kind: FormKind) -> &'static [StepInfo; STEP_COUNT] {
    match kind {
        FormKind::Patient => &PATIENT_STEPS,
        FormKind::Healer => &HEALER_STEPS,
    }
}

/// Post-success navigation the front end should perform.
#[derive(Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    pub after: Duration,
}

pub struct MultiStepForm {
    kind: FormKind,
    step: usize,
    fields: HashMap<String, FieldValue>,
    submitting: bool,
    error: Option<String>,
    success: Option<String>,
}

impl MultiStepForm {
    pub fn new(kind: FormKind) -> Self {
        let mut fields = HashMap::new();
        for step in steps(kind) {
            for name in step.fields {
                fields.insert((*name).to_string(), FieldValue::Text(String::new()));
            }
        }
        if kind == FormKind::Patient {
            fields.insert("privacyConsent".to_string(), FieldValue::Flag(false));
        }

        Self {
            kind,
            step: 0,
            fields,
            submitting: false,
            error: None,
            success: None,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn is_last_step(&self) -> bool {
        self.step == STEP_COUNT - 1
    }

    /// 1-based progress indication, e.g. "Step 2 of 4".
    pub fn progress(&self) -> (usize, usize) {
        (self.step + 1, STEP_COUNT)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        self.fields
            .insert(field.to_string(), FieldValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, field: &str, value: bool) {
        self.fields
            .insert(field.to_string(), FieldValue::Flag(value));
    }

    pub fn text(&self, field: &str) -> &str {
        match self.fields.get(field) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    pub fn flag(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(FieldValue::Flag(true)))
    }

    /// Advance one step. The patient form cannot leave its first step until
    /// the privacy consent box is checked.
    pub fn next(&mut self) -> bool {
        if self.is_last_step() {
            return false;
        }
        if self.kind == FormKind::Patient && self.step == 0 && !self.flag("privacyConsent") {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.step == 0 {
            return false;
        }
        self.step -= 1;
        true
    }

    /// Validate and produce the submission payload, marking the form as
    /// in-flight. Mirrors the server's required-field rules; on violation
    /// the error text is set and no payload is produced.
    pub fn begin_submit(&mut self) -> Option<Value> {
        self.error = None;
        self.success = None;

        match self.kind {
            FormKind::Patient => {
                if self.text("fullName").trim().is_empty() || self.text("phone").trim().is_empty() {
                    self.error = Some("שם מלא ומספר טלפון הם שדות חובה".to_string());
                    return None;
                }
                if !self.flag("privacyConsent") {
                    self.error = Some("יש לאשר את הסכמת הפרטיות".to_string());
                    return None;
                }
            }
            FormKind::Healer => {
                if self.text("fullName").trim().is_empty()
                    || self.text("contactPhone").trim().is_empty()
                {
                    self.error = Some("שם מלא ומספר טלפון הם שדות חובה".to_string());
                    return None;
                }
            }
        }

        self.submitting = true;

        let mut payload = Map::new();
        for (name, value) in &self.fields {
            let value = match value {
                FieldValue::Text(s) => Value::String(s.clone()),
                FieldValue::Flag(b) => Value::Bool(*b),
            };
            payload.insert(name.clone(), value);
        }
        Some(Value::Object(payload))
    }

    /// Feed back the orchestrator's response. Success yields the redirect
    /// the front end should schedule; failure keeps every entered value and
    /// surfaces the returned message inline.
    pub fn complete_submit(&mut self, result: Result<String, String>) -> Option<Redirect> {
        self.submitting = false;
        match result {
            Ok(message) => {
                self.success = Some(message);
                Some(Redirect {
                    to: "/",
                    after: REDIRECT_DELAY,
                })
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_patient_form() -> MultiStepForm {
        let mut form = MultiStepForm::new(FormKind::Patient);
        form.set_text("fullName", "Dana Cohen");
        form.set_text("phone", "0501112222");
        form.set_flag("privacyConsent", true);
        form
    }

    #[test]
    fn both_forms_have_four_steps() {
        assert_eq!(steps(FormKind::Patient).len(), STEP_COUNT);
        assert_eq!(steps(FormKind::Healer).len(), STEP_COUNT);
    }

    #[test]
    fn patient_form_cannot_leave_first_step_without_consent() {
        let mut form = MultiStepForm::new(FormKind::Patient);
        assert!(!form.next());
        assert_eq!(form.current_step(), 0);

        form.set_flag("privacyConsent", true);
        assert!(form.next());
        assert_eq!(form.current_step(), 1);
    }

    #[test]
    fn healer_form_advances_without_any_gate() {
        let mut form = MultiStepForm::new(FormKind::Healer);
        assert!(form.next());
        assert!(form.next());
        assert!(form.next());
        assert!(form.is_last_step());
        assert!(!form.next());
    }

    #[test]
    fn prev_stops_at_first_step() {
        let mut form = MultiStepForm::new(FormKind::Healer);
        assert!(!form.prev());
        form.next();
        assert!(form.prev());
        assert_eq!(form.current_step(), 0);
    }

    #[test]
    fn progress_is_one_based() {
        let mut form = MultiStepForm::new(FormKind::Healer);
        assert_eq!(form.progress(), (1, 4));
        form.next();
        assert_eq!(form.progress(), (2, 4));
    }

    #[test]
    fn begin_submit_rejects_missing_required_fields() {
        let mut form = MultiStepForm::new(FormKind::Healer);
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error(), Some("שם מלא ומספר טלפון הם שדות חובה"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn begin_submit_rejects_missing_consent() {
        let mut form = MultiStepForm::new(FormKind::Patient);
        form.set_text("fullName", "Dana Cohen");
        form.set_text("phone", "0501112222");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error(), Some("יש לאשר את הסכמת הפרטיות"));
    }

    #[test]
    fn begin_submit_produces_full_payload() {
        let mut form = valid_patient_form();
        let payload = form.begin_submit().expect("payload");
        assert!(form.is_submitting());
        assert_eq!(payload["fullName"], "Dana Cohen");
        assert_eq!(payload["privacyConsent"], true);
        // untouched fields submit as empty strings
        assert_eq!(payload["city"], "");
    }

    #[test]
    fn success_schedules_home_redirect() {
        let mut form = valid_patient_form();
        form.begin_submit().expect("payload");

        let redirect = form.complete_submit(Ok("ההרשמה נשלחה בהצלחה".to_string()));
        assert_eq!(
            redirect,
            Some(Redirect {
                to: "/",
                after: Duration::from_secs(3)
            })
        );
        assert!(!form.is_submitting());
        assert_eq!(form.success(), Some("ההרשמה נשלחה בהצלחה"));
    }

    #[test]
    fn failure_keeps_entered_values_and_shows_error() {
        let mut form = valid_patient_form();
        form.set_text("city", "חיפה");
        form.begin_submit().expect("payload");

        let redirect = form.complete_submit(Err("שגיאה בשליחת הטופס".to_string()));
        assert!(redirect.is_none());
        assert_eq!(form.error(), Some("שגיאה בשליחת הטופס"));
        assert_eq!(form.text("city"), "חיפה");
        assert_eq!(form.text("fullName"), "Dana Cohen");
    }
}
