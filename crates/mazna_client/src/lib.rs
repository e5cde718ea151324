//! Typed client for the MAZNA diabetes-tracking backend.
//!
//! The backend owns accounts, credential checks and entry persistence. This
//! crate only describes its wire shapes and exposes them through the
//! [`MaznaClient`] trait, with a reqwest-based implementation in
//! [`http_client`].

use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod utils;

/// Highest glucose value (mg/dL) the entry form accepts.
pub const MAX_GLUCOSE: f64 = 1000.0;
/// Highest insulin dosage (units) the entry form accepts.
pub const MAX_INSULIN: f64 = 100.0;

#[derive(Debug, Error)]
pub enum MaznaError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decoding {what}: {message}")]
    Decode { what: &'static str, message: String },
}

impl MaznaError {
    /// Map a non-success status code and (truncated) body to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 | 422 => MaznaError::InvalidInput(body),
            401 | 403 => MaznaError::Auth(body),
            404 => MaznaError::NotFound(body),
            409 => MaznaError::Conflict(body),
            _ => MaznaError::Status { status, body },
        }
    }
}

/// One calendar day's glucose and insulin readings for an account.
///
/// Deserialises from the backend's `/entries` shape. The day comes from
/// `entry_date`, `created_at` or `date`, whichever the payload carries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(
        rename = "entry_date",
        alias = "created_at",
        alias = "date",
        deserialize_with = "deserialize_entry_date"
    )]
    pub date: NaiveDate,
    #[serde(rename = "bg_morning", default, deserialize_with = "deserialize_opt_number")]
    pub morning_glucose: Option<f64>,
    #[serde(rename = "bg_afternoon", default, deserialize_with = "deserialize_opt_number")]
    pub afternoon_glucose: Option<f64>,
    #[serde(rename = "bg_evening", default, deserialize_with = "deserialize_opt_number")]
    pub evening_glucose: Option<f64>,
    #[serde(rename = "ins_morning", default, deserialize_with = "deserialize_opt_number")]
    pub morning_insulin: Option<f64>,
    #[serde(rename = "ins_afternoon", default, deserialize_with = "deserialize_opt_number")]
    pub afternoon_insulin: Option<f64>,
    #[serde(rename = "ins_evening", default, deserialize_with = "deserialize_opt_number")]
    pub evening_insulin: Option<f64>,
}

impl Entry {
    /// An entry for `date` with every reading absent.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: None,
            account_id: None,
            date,
            morning_glucose: None,
            afternoon_glucose: None,
            evening_glucose: None,
            morning_insulin: None,
            afternoon_insulin: None,
            evening_insulin: None,
        }
    }

    pub fn with_glucose(
        mut self,
        morning: Option<f64>,
        afternoon: Option<f64>,
        evening: Option<f64>,
    ) -> Self {
        self.morning_glucose = morning;
        self.afternoon_glucose = afternoon;
        self.evening_glucose = evening;
        self
    }

    pub fn with_insulin(
        mut self,
        morning: Option<f64>,
        afternoon: Option<f64>,
        evening: Option<f64>,
    ) -> Self {
        self.morning_insulin = morning;
        self.afternoon_insulin = afternoon;
        self.evening_insulin = evening;
        self
    }

    /// Glucose readings as (morning, afternoon, evening).
    pub fn glucose(&self) -> [Option<f64>; 3] {
        [
            self.morning_glucose,
            self.afternoon_glucose,
            self.evening_glucose,
        ]
    }

    /// Insulin dosages as (morning, afternoon, evening).
    pub fn insulin(&self) -> [Option<f64>; 3] {
        [
            self.morning_insulin,
            self.afternoon_insulin,
            self.evening_insulin,
        ]
    }
}

fn deserialize_entry_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let raw = String::deserialize(deserializer)?;
    utils::normalize_entry_date(&raw)
        .ok_or_else(|| D::Error::custom(format!("unrecognised entry date: {raw}")))
}

fn deserialize_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    let number = match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(
            s.trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("expected a number, got {s:?}")))?,
        ),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected number or string, got {other}"
            )));
        }
    };
    match number {
        Some(n) if !n.is_finite() || n < 0.0 => Err(D::Error::custom(format!(
            "reading must be a finite, non-negative number, got {n}"
        ))),
        _ => Ok(number),
    }
}

/// Body of a `POST /entries` submission from the daily entry form.
///
/// Every reading is required; the form refuses to submit partial days.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewEntry {
    pub account_id: i64,
    pub entry_date: NaiveDate,
    pub bg_morning: f64,
    pub ins_morning: f64,
    pub bg_afternoon: f64,
    pub ins_afternoon: f64,
    pub bg_evening: f64,
    pub ins_evening: f64,
}

impl NewEntry {
    /// Check every reading against the entry form's accepted ranges.
    pub fn validate(&self) -> Result<(), MaznaError> {
        let glucose = [
            ("bg_morning", self.bg_morning),
            ("bg_afternoon", self.bg_afternoon),
            ("bg_evening", self.bg_evening),
        ];
        let insulin = [
            ("ins_morning", self.ins_morning),
            ("ins_afternoon", self.ins_afternoon),
            ("ins_evening", self.ins_evening),
        ];
        for (field, value) in glucose {
            check_range(field, value, MAX_GLUCOSE)?;
        }
        for (field, value) in insulin {
            check_range(field, value, MAX_INSULIN)?;
        }
        Ok(())
    }
}

fn check_range(field: &str, value: f64, max: f64) -> Result<(), MaznaError> {
    if !value.is_finite() || value < 0.0 || value > max {
        return Err(MaznaError::InvalidInput(format!(
            "{field} must be between 0 and {max}, got {value}"
        )));
    }
    Ok(())
}

/// Partial update for `PUT /entries/{id}`; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct EntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_morning: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_afternoon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_evening: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ins_morning: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ins_afternoon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ins_evening: Option<f64>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct EntryCreated {
    pub message: String,
    pub id: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let password: String = password.into();
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub id: i64,
    pub message: String,
    pub username: String,
    pub first_name: Option<String>,
}

/// Sign-up form contents for `POST /createUserAccount`.
#[derive(Clone, Debug)]
pub struct NewAccount {
    pub username: String,
    pub password: SecretString,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Date of birth as `YYYY-MM-DD`.
    pub dob: String,
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), MaznaError> {
        use secrecy::ExposeSecret;
        let required = [
            ("username", self.username.as_str()),
            ("password", self.password.expose_secret()),
            ("firstname", self.first_name.as_str()),
            ("lastname", self.last_name.as_str()),
            ("dob", self.dob.as_str()),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| *k)
            .collect();
        if !missing.is_empty() {
            return Err(MaznaError::InvalidInput(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        if utils::parse_date_only(&self.dob).is_none() {
            return Err(MaznaError::InvalidInput(format!(
                "dob must be formatted as YYYY-MM-DD, got {}",
                self.dob
            )));
        }
        Ok(())
    }
}

#[async_trait]
pub trait MaznaClient: Send + Sync + 'static {
    /// List entries, oldest first, optionally restricted to one account.
    async fn list_entries(&self, account_id: Option<i64>) -> Result<Vec<Entry>, MaznaError>;
    async fn get_entry(&self, entry_id: i64) -> Result<Entry, MaznaError>;
    async fn create_entry(&self, entry: &NewEntry) -> Result<EntryCreated, MaznaError>;
    async fn update_entry(
        &self,
        entry_id: i64,
        update: &EntryUpdate,
    ) -> Result<MessageResponse, MaznaError>;
    async fn delete_entry(&self, entry_id: i64) -> Result<(), MaznaError>;
    async fn validate_login(
        &self,
        credentials: &Credentials,
    ) -> Result<LoginResponse, MaznaError>;
    async fn create_account(&self, account: &NewAccount) -> Result<MessageResponse, MaznaError>;
}
