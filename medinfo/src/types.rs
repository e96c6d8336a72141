//! REST wire DTOs for the MedQR admin API.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's camelCase JSON so serde stays lossless.
//! Every response arrives wrapped in [`Envelope`]; the inner `data` shapes
//! differ per endpoint and are modelled as their own structs here.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Standard `{ success, message, data, errors }` response wrapper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Absent on some endpoints; treated as success when missing.
    #[serde(default)]
    pub success: Option<bool>,
    /// Human-readable server message, if any.
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint-specific payload.
    pub data: Option<T>,
    /// Per-field validation details reported by the server.
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// Whether the server reported success (missing flag counts as success).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

/// An authenticated administrator as returned by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Unique admin identifier. The backend sends either `id` or `_id`.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// ISO 8601 creation timestamp, if the backend includes it.
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// `POST /auth/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/signup` body. The confirmation field never leaves the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `data` of a login or signup response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub admin: Option<AdminProfile>,
    #[serde(default)]
    pub token: Option<String>,
}

/// `data` of `GET /auth/me`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MePayload {
    #[serde(default)]
    pub admin: Option<AdminProfile>,
}

/// The ten medicine attributes an admin submits when creating a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInfoRecord {
    pub medicine_name: String,
    pub usage: String,
    pub dosage: String,
    /// Expiry date.
    pub exp: String,
    /// Manufacture date.
    pub man: String,
    pub price: String,
    /// Batch number.
    pub btno: String,
    /// Manufacturer.
    pub comp_name: String,
    /// Storage instructions.
    pub instr: String,
    /// Drug composition.
    pub drugs: String,
}

/// A medicine record as stored by the service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoRecord {
    /// Database identifier used by toggle/update/delete.
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    /// Public identifier embedded in the QR code URL.
    #[serde(default)]
    pub unique_id: String,
    #[serde(default)]
    pub admin_id: Option<String>,
    #[serde(default)]
    pub medicine_name: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub exp: String,
    #[serde(default)]
    pub man: String,
    #[serde(default, deserialize_with = "deserialize_string_lenient")]
    pub price: String,
    #[serde(default)]
    pub btno: String,
    #[serde(default)]
    pub comp_name: String,
    #[serde(default)]
    pub instr: String,
    #[serde(default)]
    pub drugs: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub view_count: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub last_viewed: Option<String>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Paging metadata attached to record listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based current page.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub current: i64,
    /// Total number of pages.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub pages: i64,
    /// Total number of records across all pages.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { current: 1, pages: 1, total: 0 }
    }
}

/// `data` of `GET /info`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    #[serde(default)]
    pub info_records: Vec<InfoRecord>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `data` of `POST /info`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRecord {
    pub info_record: InfoRecord,
    /// Inline `data:image/png;base64,...` QR image.
    #[serde(default)]
    pub qr_code_data_url: Option<String>,
    /// Public view URL encoded in the QR code.
    #[serde(default)]
    pub qr_code_url: Option<String>,
}

/// `data` of `GET /info/view/:uniqueId`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub info_record: InfoRecord,
    #[serde(default)]
    pub qr_code_image: Option<String>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
}

/// A translation target offered by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// `data` of `GET /translate/languages`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageList {
    #[serde(default)]
    pub languages: Vec<Language>,
}

/// `POST /translate` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    pub target_lang: String,
}

/// `data` of `POST /translate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translated {
    pub translated_text: String,
}

/// `POST /translate/batch` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBatchRequest {
    pub texts: Vec<String>,
    pub target_lang: String,
}

/// `data` of `POST /translate/batch`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedBatch {
    #[serde(default)]
    pub translated_texts: Vec<String>,
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("expected integer, got {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected integer string, got {s:?}"))),
        other => Err(D::Error::custom(format!("expected integer, got {other}"))),
    }
}

/// Accept prices sent either as JSON strings or numbers.
fn deserialize_string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number, got {other}"))),
    }
}
