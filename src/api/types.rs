//! API request types

use serde::Deserialize;

/// Callback body posted by the USSD gateway.
///
/// Only `text` drives the menu; the identifiers are kept for logging.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UssdRequest {
    /// Full dialed path, `*`-separated
    #[serde(default)]
    pub text: String,
    pub session_id: Option<String>,
    pub service_code: Option<String>,
    #[allow(dead_code)] // Accepted from the gateway, never logged
    pub phone_number: Option<String>,
    pub network_code: Option<String>,
}
