//! The JSON envelope carried inside profile QR codes.
//!
//! A scanned payload either decodes into a complete, validated form or is
//! rejected as a whole; nothing is ever partially applied.

use serde::{Deserialize, Serialize};

use super::error::QrError;
use crate::profile::{Profile, ProfileInput};
use crate::serde::{deserialize_string_or_empty, parse_calendar_date};

/// Type tag identifying a profile payload.
pub const PAYLOAD_TYPE: &str = "user-profile";

/// Envelope version written by this client.
pub const PAYLOAD_VERSION: &str = "1.0";

/// `{"type": "user-profile", "version": "1.0", "data": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub version: String,
    #[serde(default)]
    pub data: QrProfileData,
}

/// The transmissible subset of a profile. Absent or `null` fields are empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrProfileData {
    #[serde(deserialize_with = "deserialize_string_or_empty")]
    pub full_name: String,
    #[serde(deserialize_with = "deserialize_string_or_empty")]
    pub email: String,
    #[serde(deserialize_with = "deserialize_string_or_empty")]
    pub phone_number: String,
    #[serde(deserialize_with = "deserialize_string_or_empty")]
    pub bio: String,
    #[serde(deserialize_with = "deserialize_string_or_empty")]
    pub avatar_url: String,
    #[serde(deserialize_with = "deserialize_string_or_empty")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "deserialize_string_or_empty")]
    pub location: String,
}

/// Builds the envelope for a profile.
///
/// Server-only fields (`id`, timestamps) are left out and the date of birth is
/// written as `YYYY-MM-DD`.
pub fn build_envelope(profile: &Profile) -> QrEnvelope {
    QrEnvelope {
        kind: PAYLOAD_TYPE.to_string(),
        version: PAYLOAD_VERSION.to_string(),
        data: QrProfileData {
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone().unwrap_or_default(),
            bio: profile.bio.clone().unwrap_or_default(),
            avatar_url: profile.avatar_url.clone().unwrap_or_default(),
            date_of_birth: profile
                .date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            location: profile.location.clone().unwrap_or_default(),
        },
    }
}

/// Serializes an envelope to the JSON text embedded in the QR code.
pub fn encode_payload(envelope: &QrEnvelope) -> Result<String, QrError> {
    serde_json::to_string(envelope).map_err(|e| QrError::Encode(e.to_string()))
}

/// Parses and validates scanned text.
///
/// Rejects malformed JSON, a type tag other than `user-profile`, and a blank
/// `fullName` or `email`. Every other field is optional.
pub fn decode_payload(text: &str) -> Result<QrEnvelope, QrError> {
    let envelope: QrEnvelope =
        serde_json::from_str(text).map_err(|_| QrError::InvalidFormat)?;

    if envelope.kind != PAYLOAD_TYPE {
        return Err(QrError::InvalidFormat);
    }

    let data = &envelope.data;
    if data.full_name.trim().is_empty() || data.email.trim().is_empty() {
        return Err(QrError::InvalidFormat);
    }

    Ok(envelope)
}

impl QrProfileData {
    /// Converts decoded data into the form submitted for create or update.
    ///
    /// A date of birth that is not a calendar date is left unset.
    pub fn into_input(self) -> ProfileInput {
        ProfileInput {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: non_blank(self.phone_number),
            bio: non_blank(self.bio),
            avatar_url: non_blank(self.avatar_url),
            date_of_birth: parse_calendar_date(self.date_of_birth.trim()),
            location: non_blank(self.location),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// File name offered when saving a profile's QR image.
///
/// `"Ada  Lovelace"` becomes `ada-lovelace-qr-code.png`.
pub fn download_file_name(full_name: &str) -> String {
    let slug = full_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "qr-code.png".to_string()
    } else {
        format!("{slug}-qr-code.png")
    }
}
