//! Persistence gateway for form submissions.
//!
//! One atomic `INSERT .. RETURNING` per submission against the hosted
//! Postgres, over the service-role connection (the pool is built from the
//! privileged connection string, so row level security does not apply).
//! No retries: a failure propagates to the orchestrator as a `StoreError`
//! carrying the store's message.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{HealerApplication, PatientRegistration};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to submit registration: {0}")]
    PatientInsert(String),
    #[error("Failed to submit application: {0}")]
    HealerInsert(String),
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PatientRegistrationRow {
    pub id: Uuid,
    pub full_name: String,
    pub age: String,
    pub phone: String,
    pub city: String,
    pub health_background: String,
    pub readiness_level: String,
    pub privacy_consent: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct HealerApplicationRow {
    pub id: Uuid,
    pub full_name: String,
    pub age: String,
    pub main_profession: String,
    pub experience: String,
    pub availability: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a patient registration together with its derived health-background
/// summary and the lossless raw payload. Rows start out `pending`; status
/// transitions happen in the administrative backend, not here.
pub async fn insert_patient_registration(
    pool: &sqlx::PgPool,
    record: &PatientRegistration,
    health_background: &str,
    payload: &Value,
) -> Result<PatientRegistrationRow, StoreError> {
    sqlx::query_as::<_, PatientRegistrationRow>(
        r#"
        INSERT INTO patient_registrations
            (full_name, age, phone, city, health_background, readiness_level,
             privacy_consent, status, payload, created_at)
        VALUES ($1,$2,$3,$4,$5,$6,$7,'pending',$8, now())
        RETURNING id, full_name, age, phone, city, health_background,
                  readiness_level, privacy_consent, status, created_at
        "#,
    )
    .bind(&record.full_name)
    .bind(&record.age)
    .bind(&record.phone)
    .bind(&record.city)
    .bind(health_background)
    .bind(&record.readiness_level)
    .bind(record.privacy_consent)
    .bind(payload)
    .fetch_one(pool)
    .await
    .map_err(|e| StoreError::PatientInsert(e.to_string()))
}

/// Insert a healer application together with its derived experience summary
/// and the lossless raw payload.
pub async fn insert_healer_application(
    pool: &sqlx::PgPool,
    record: &HealerApplication,
    experience: &str,
    payload: &Value,
) -> Result<HealerApplicationRow, StoreError> {
    sqlx::query_as::<_, HealerApplicationRow>(
        r#"
        INSERT INTO healer_applications
            (full_name, age, main_profession, experience, availability,
             contact_email, contact_phone, status, payload, created_at)
        VALUES ($1,$2,$3,$4,$5,$6,$7,'pending',$8, now())
        RETURNING id, full_name, age, main_profession, experience, availability,
                  contact_email, contact_phone, status, created_at
        "#,
    )
    .bind(&record.full_name)
    .bind(&record.age)
    .bind(&record.main_profession)
    .bind(experience)
    .bind(&record.availability)
    .bind(&record.contact_email)
    .bind(&record.contact_phone)
    .bind(payload)
    .fetch_one(pool)
    .await
    .map_err(|e| StoreError::HealerInsert(e.to_string()))
}
