//! WhatsApp alerts for new submissions, delivered through the Green API
//! chat gateway to a configured administrator number.

use serde_json::json;

use super::{NotificationError, NotifyOutcome};
use crate::models::{FormRecord, HealerApplication, PatientRegistration};

const GREEN_API_BASE_URL: &str = "https://api.green-api.com";

/// Free-text answers are clipped to this many characters in the chat summary.
const MAX_FIELD_CHARS: usize = 100;

#[derive(Clone)]
pub struct WhatsAppNotifier {
    client: reqwest::Client,
    id_instance: Option<String>,
    api_token: Option<String>,
    admin_phone: Option<String>,
}

impl WhatsAppNotifier {
    pub fn new(
        client: reqwest::Client,
        id_instance: Option<String>,
        api_token: Option<String>,
        admin_phone: Option<String>,
    ) -> Self {
        Self {
            client,
            id_instance,
            api_token,
            admin_phone,
        }
    }

    pub async fn send_submission_alert(
        &self,
        record: &FormRecord,
    ) -> Result<NotifyOutcome, NotificationError> {
        let (Some(id_instance), Some(api_token)) = (&self.id_instance, &self.api_token) else {
            return Ok(NotifyOutcome::Skipped(
                "GREEN_API_ID_INSTANCE and GREEN_API_API_TOKEN not configured",
            ));
        };
        let Some(admin_phone) = &self.admin_phone else {
            return Ok(NotifyOutcome::Skipped("ADMIN_WHATSAPP_NUMBER not configured"));
        };

        let message = match record {
            FormRecord::Patient(p) => compose_patient_message(p),
            FormRecord::Healer(h) => compose_healer_message(h),
        };
        self.send_text_message(id_instance, api_token, admin_phone, &message)
            .await?;
        Ok(NotifyOutcome::Sent)
    }

    async fn send_text_message(
        &self,
        id_instance: &str,
        api_token: &str,
        phone: &str,
        message: &str,
    ) -> Result<(), NotificationError> {
        let url = format!("{GREEN_API_BASE_URL}/waInstance{id_instance}/sendMessage/{api_token}");
        let chat_id = format!("{}@c.us", format_phone_number(phone));

        let resp = self
            .client
            .post(&url)
            .json(&json!({ "chatId": chat_id, "message": message }))
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(NotificationError::Api { status, message });
        }
        Ok(())
    }
}

/// Normalize a phone number to the international dialing format the gateway
/// expects: digits only, no leading `+` or national trunk `0`. Numbers with
/// no recognizable country code are assumed Israeli.
pub fn format_phone_number(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = cleaned.strip_prefix('0') {
        format!("972{rest}")
    } else if cleaned.starts_with("972") {
        cleaned
    } else {
        format!("972{cleaned}")
    }
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_FIELD_CHARS {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(MAX_FIELD_CHARS).collect();
        clipped.push_str("...");
        clipped
    }
}

fn push_field(out: &mut String, label: &str, value: &str) {
    let value = if value.trim().is_empty() {
        "לא צוין".to_string()
    } else {
        clip(value)
    };
    out.push_str(&format!("{label}: {value}\n"));
}

fn compose_patient_message(p: &PatientRegistration) -> String {
    let mut msg = String::from("🔔 הרשמה חדשה כמטופל\n\n");
    push_field(&mut msg, "שם מלא", &p.full_name);
    push_field(&mut msg, "גיל", &p.age);
    push_field(&mut msg, "טלפון", &p.phone);
    push_field(&mut msg, "עיר", &p.city);
    push_field(&mut msg, "סיבת פניה", &p.reason_for_healing);
    push_field(&mut msg, "רמת מוכנות", &p.readiness_level);
    push_field(&mut msg, "מצב נוכחי", &p.current_situation);
    msg.push_str("\nהטופס המלא נשלח במייל.");
    msg
}

fn compose_healer_message(h: &HealerApplication) -> String {
    let mut msg = String::from("🔔 בקשה חדשה להתנדבות כמרפא\n\n");
    push_field(&mut msg, "שם מלא", &h.full_name);
    push_field(&mut msg, "גיל", &h.age);
    push_field(&mut msg, "טלפון", &h.contact_phone);
    push_field(&mut msg, "אימייל", &h.contact_email);
    push_field(&mut msg, "מקצוע", &h.main_profession);
    push_field(&mut msg, "מוטיבציה", &h.motivation);
    push_field(&mut msg, "זמינות", &h.availability);
    msg.push_str("\nהטופס המלא נשלח במייל.");
    msg
}
