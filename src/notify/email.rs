//! Email alerts for new submissions, delivered through the Resend HTTP API.
//!
//! One Hebrew HTML email per submission, to a fixed recipient. A missing
//! API key downgrades the attempt to a logged skip so an unconfigured
//! environment never blocks form submission.

use serde_json::json;

use super::{NotificationError, NotifyOutcome};
use crate::models::{FormRecord, HealerApplication, PatientRegistration};

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const FROM_ADDRESS: &str = "The Tribe Guardians Forms <onboarding@resend.dev>";
const RECIPIENT_EMAIL: &str = "thetribeguardians@gmail.com";

/// Placeholder rendered for any field the submitter left empty.
const NOT_PROVIDED: &str = "לא צוין";

#[derive(Clone)]
pub struct EmailNotifier {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl EmailNotifier {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub async fn send_form_submission_email(
        &self,
        record: &FormRecord,
    ) -> Result<NotifyOutcome, NotificationError> {
        let Some(api_key) = &self.api_key else {
            return Ok(NotifyOutcome::Skipped("RESEND_API_KEY not configured"));
        };

        let subject = subject_for(record);
        let html = match record {
            FormRecord::Patient(p) => patient_email_html(p),
            FormRecord::Healer(h) => healer_email_html(h),
        };

        let resp = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(api_key)
            .json(&json!({
                "from": FROM_ADDRESS,
                "to": [RECIPIENT_EMAIL],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(NotificationError::Api { status, message });
        }

        Ok(NotifyOutcome::Sent)
    }
}

pub fn subject_for(record: &FormRecord) -> String {
    let name = match record.full_name() {
        "" => "אין שם",
        name => name,
    };
    match record {
        FormRecord::Patient(_) => format!("הרשמה חדשה כמטופל - {name}"),
        FormRecord::Healer(_) => format!("בקשה חדשה להתנדבות כמרפא - {name}"),
    }
}

struct Section<'a> {
    title: &'a str,
    fields: Vec<(&'a str, &'a str)>,
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_email_html(heading: &str, accent: &str, sections: &[Section<'_>]) -> String {
    let mut body = String::new();
    for section in sections {
        body.push_str(&format!(
            r#"<div style="margin-bottom:20px;padding:15px;background-color:white;border-radius:4px;border-left:4px solid {accent}">
  <div style="font-weight:bold;font-size:18px;margin-bottom:10px;color:{accent}">{}</div>
"#,
            section.title
        ));
        for (label, value) in &section.fields {
            let value = if value.trim().is_empty() {
                NOT_PROVIDED.to_string()
            } else {
                escape_html(value)
            };
            body.push_str(&format!(
                r#"  <div style="margin-bottom:10px">
    <div style="font-weight:bold;color:#666">{label}:</div>
    <div style="color:#333;white-space:pre-wrap">{value}</div>
  </div>
"#,
            ));
        }
        body.push_str("</div>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html dir="rtl" lang="he">
<head><meta charset="UTF-8"></head>
<body style="font-family:Arial,sans-serif;line-height:1.6;color:#333;max-width:800px;margin:0 auto;padding:20px">
<div style="background-color:{accent};color:white;padding:20px;border-radius:8px 8px 0 0"><h1>🔔 {heading}</h1></div>
<div style="background-color:#f9fafb;padding:20px;border:1px solid #e5e7eb">
{body}</div>
<div style="text-align:center;padding:20px;color:#666;font-size:12px"><p>אנא בדוק את הפנייה במערכת הניהול.</p></div>
</body>
</html>"#
    )
}

fn patient_email_html(p: &PatientRegistration) -> String {
    render_email_html(
        "הרשמה חדשה כמטופל",
        "#059669",
        &[
            Section {
                title: "פרטים אישיים",
                fields: vec![
                    ("שם מלא", &p.full_name),
                    ("גיל", &p.age),
                    ("טלפון", &p.phone),
                    ("עיר מגורים", &p.city),
                ],
            },
            Section {
                title: "רקע רפואי ופיזי",
                fields: vec![
                    ("מחלות כרוניות או מגבלות פיזיות", &p.chronic_illnesses),
                    ("תרופות (נוכחיות או בעבר)", &p.medication_history),
                ],
            },
            Section {
                title: "היסטוריה טיפולית ונפשית",
                fields: vec![
                    ("תהליך טיפולי נפשי/פסיכולוגי", &p.mental_treatment),
                    ("רטריטים או תהליכי ריפוי קודמים", &p.previous_retreats),
                    ("אבחנת PTSD או הפרעה נפשית אחרת", &p.ptsd_diagnosis),
                    ("תרופות פסיכיאטריות", &p.psychiatric_medication),
                    ("אשפוזים פסיכיאטריים או התמוטטויות נפשיות", &p.hospitalizations),
                    ("התמכרויות (פעילות או עבר)", &p.addictions),
                ],
            },
            Section {
                title: "הכוונה, תמיכה ומוכנות",
                fields: vec![
                    ("סיבת פניה", &p.reason_for_healing),
                    ("מערכת תמיכה", &p.support_system),
                    ("רמת מוכנות", &p.readiness_level),
                    ("ציפיות מתהליך הריפוי", &p.expectations),
                    ("מצב חיים נוכחי", &p.current_situation),
                ],
            },
        ],
    )
}

fn healer_email_html(h: &HealerApplication) -> String {
    render_email_html(
        "בקשה חדשה להתנדבות כמרפא",
        "#4F46E5",
        &[
            Section {
                title: "פרטים אישיים",
                fields: vec![
                    ("שם מלא", &h.full_name),
                    ("גיל", &h.age),
                    ("טלפון", &h.contact_phone),
                    ("אימייל", &h.contact_email),
                ],
            },
            Section {
                title: "רקע מקצועי",
                fields: vec![
                    ("מקצוע עיקרי והסמכות מקצועיות", &h.main_profession),
                    ("סוגי טיפולים, הכשרות ושיטות טיפול", &h.treatments),
                ],
            },
            Section {
                title: "ניסיון ומומחיות",
                fields: vec![
                    ("ניסיון טיפולי מול אוכלוסיות פוסט טראומטיות", &h.trauma_experience),
                    ("ניסיון בריטריטים/טקסים קבוצתיים", &h.retreat_experience),
                    ("ניסיון עבודה עם צוות רב-מקצועי", &h.team_experience),
                ],
            },
            Section {
                title: "מוטיבציה והערכה עצמית",
                fields: vec![
                    ("מה מושך אותך להשתלב בפרויקט", &h.motivation),
                    ("חוזקות כאיש/אשת טיפול", &h.strengths),
                    ("חולשות/אתגרים בעבודת צוות או טיפול", &h.weaknesses),
                    ("כלים בעבודה עם מצבי קיצון רגשיים", &h.extreme_tools),
                ],
            },
            Section {
                title: "ידע מיוחד ומסע אישי",
                fields: vec![
                    ("הכשרה או ניסיון בתהליכים שמאניים", &h.shamanic_experience),
                    ("תהליכים אישיים משמעותיים", &h.personal_journey),
                    ("סדר עדיפויות פנימי כשותף בפרויקט", &h.priorities),
                    ("זמינות למפגשים, הכשרות וסופרוויז'ן", &h.availability),
                    ("מה חשוב באופי הצוות והטיפול", &h.team_nature),
                ],
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient() -> PatientRegistration {
        PatientRegistration {
            full_name: "Dana Cohen".into(),
            phone: "0501112222".into(),
            privacy_consent: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_api_key_skips_without_error() {
        let notifier = EmailNotifier::new(reqwest::Client::new(), None);
        let record = FormRecord::Patient(sample_patient());

        let outcome = notifier.send_form_submission_email(&record).await.unwrap();
        assert_eq!(outcome, NotifyOutcome::Skipped("RESEND_API_KEY not configured"));
    }

    #[test]
    fn subject_embeds_submitter_name() {
        let record = FormRecord::Patient(sample_patient());
        assert_eq!(subject_for(&record), "הרשמה חדשה כמטופל - Dana Cohen");

        let record = FormRecord::Healer(HealerApplication {
            full_name: "Yael Levi".into(),
            ..Default::default()
        });
        assert_eq!(subject_for(&record), "בקשה חדשה להתנדבות כמרפא - Yael Levi");
    }

    #[test]
    fn subject_falls_back_when_name_missing() {
        let record = FormRecord::Healer(HealerApplication::default());
        assert_eq!(subject_for(&record), "בקשה חדשה להתנדבות כמרפא - אין שם");
    }

    #[test]
    fn empty_fields_render_placeholder() {
        let html = patient_email_html(&sample_patient());
        assert!(html.contains("Dana Cohen"));
        assert!(html.contains(NOT_PROVIDED));
    }

    #[test]
    fn field_values_are_html_escaped() {
        let mut p = sample_patient();
        p.city = "<script>alert(1)</script>".into();
        let html = patient_email_html(&p);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
