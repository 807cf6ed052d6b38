//! src/contract.rs
//!
//! Wire types shared by the intake handler and the form client.
//! Every deployed variant of the form posts a subset of [`RsvpPayload`];
//! absent optional keys fall back to their defaults.

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RsvpPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_allergies: Option<bool>,
    #[serde(
        default,
        alias = "allergyComments",
        skip_serializing_if = "Option::is_none"
    )]
    pub allergy_comment: Option<String>,
    #[serde(
        default,
        rename = "isELogIT",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_elogit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_negotia: Option<bool>,
    #[serde(
        default,
        rename = "teamleder",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_leader: Option<String>,
}

/// Body of every `/rsvp` response, tagged by its `status` field.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status")]
pub enum IntakeResponse {
    #[serde(rename = "success")]
    Success { message: String },
    #[serde(rename = "error")]
    Error { message: String },
    #[serde(rename = "OK")]
    Running { message: String },
}

impl IntakeResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn running() -> Self {
        Self::Running {
            message: "RSVP intake is running".into(),
        }
    }
}
