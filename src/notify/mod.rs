//! Best-effort notification fan-out.
//!
//! Email and WhatsApp alerts for a persisted submission. Each sender is
//! independent; the orchestrator collects both outcomes but never lets
//! either failure affect the HTTP response.

pub mod email;
pub mod whatsapp;

use thiserror::Error;

use crate::models::FormRecord;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("gateway responded {status}: {message}")]
    Api { status: u16, message: String },
}

/// A notification attempt that did not error: either the message went out,
/// or the sender was unconfigured and the attempt was skipped.
#[derive(Debug, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Skipped(&'static str),
}

pub struct FanOutReport {
    pub email: Result<NotifyOutcome, NotificationError>,
    pub whatsapp: Result<NotifyOutcome, NotificationError>,
}

impl FanOutReport {
    /// Surface both outcomes in the log. This is the only place a failed
    /// notification is visible; it never reaches the submitter.
    pub fn log_outcomes(&self) {
        log_one("email", &self.email);
        log_one("WhatsApp", &self.whatsapp);
    }
}

fn log_one(channel: &str, result: &Result<NotifyOutcome, NotificationError>) {
    match result {
        Ok(NotifyOutcome::Sent) => tracing::info!("{channel} notification sent"),
        Ok(NotifyOutcome::Skipped(reason)) => {
            tracing::warn!("{channel} notification skipped: {reason}")
        }
        Err(e) => tracing::warn!("{channel} notification failed: {e}"),
    }
}

/// Run both senders for one persisted submission. Attempts are concurrent
/// and unordered; failures are collected for inspection, never escalated.
pub async fn fan_out(
    email: &email::EmailNotifier,
    whatsapp: &whatsapp::WhatsAppNotifier,
    record: &FormRecord,
) -> FanOutReport {
    let (email_result, whatsapp_result) = tokio::join!(
        email.send_form_submission_email(record),
        whatsapp.send_submission_alert(record),
    );

    FanOutReport {
        email: email_result,
        whatsapp: whatsapp_result,
    }
}
