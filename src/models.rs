use serde::Serialize;

use crate::notify::{email::EmailNotifier, whatsapp::WhatsAppNotifier};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub email: EmailNotifier,
    pub whatsapp: WhatsAppNotifier,
}

/* -------------------------
   Submission records
--------------------------*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Patient,
    Healer,
}

/// A prospective retreat participant's intake submission. Every field is a
/// plain string (empty when the form left it out) except the consent flag.
#[derive(Debug, Clone, Default)]
pub struct PatientRegistration {
    // personal
    pub full_name: String,
    pub age: String,
    pub phone: String,
    pub city: String,
    // medical background
    pub chronic_illnesses: String,
    pub medication_history: String,
    // therapeutic history
    pub mental_treatment: String,
    pub previous_retreats: String,
    pub ptsd_diagnosis: String,
    pub psychiatric_medication: String,
    pub hospitalizations: String,
    pub addictions: String,
    // readiness
    pub reason_for_healing: String,
    pub support_system: String,
    pub readiness_level: String,
    pub expectations: String,
    pub current_situation: String,
    pub privacy_consent: bool,
}

/// A volunteer therapist's screening submission.
#[derive(Debug, Clone, Default)]
pub struct HealerApplication {
    // personal / professional
    pub full_name: String,
    pub age: String,
    pub main_profession: String,
    pub treatments: String,
    // experience
    pub trauma_experience: String,
    pub retreat_experience: String,
    pub team_experience: String,
    // self-assessment
    pub motivation: String,
    pub strengths: String,
    pub weaknesses: String,
    pub extreme_tools: String,
    // specialized knowledge
    pub shamanic_experience: String,
    pub personal_journey: String,
    pub priorities: String,
    pub availability: String,
    pub team_nature: String,
    // contact
    pub contact_email: String,
    pub contact_phone: String,
}

/// One submission of either kind, as handed to the notification senders.
#[derive(Debug, Clone)]
pub enum FormRecord {
    Patient(PatientRegistration),
    Healer(HealerApplication),
}

impl FormRecord {
    pub fn full_name(&self) -> &str {
        match self {
            FormRecord::Patient(p) => &p.full_name,
            FormRecord::Healer(h) => &h.full_name,
        }
    }
}

/* -------------------------
   API DTOs
--------------------------*/

#[derive(Debug, Serialize)]
pub struct SubmitResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}
