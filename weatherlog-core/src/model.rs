use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weather observation as returned by the per-city endpoint.
///
/// Every field is required on the wire; a response missing any of them is
/// rejected as a decode failure rather than filled with defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub summary: String,
    pub precipitation: i32,
    #[serde(rename = "windSpeed")]
    pub wind_speed: i32,
    pub temperature: i32,
}

/// Request body for the authorize endpoint. The service expects
/// PascalCase field names.
#[derive(Debug, Clone, Serialize)]
pub struct LoginBody {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// A session token together with its wall-clock expiry.
///
/// Credentials are replaced wholesale on renewal, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}
