//! src/routes/rsvp.rs
use crate::contract::{IntakeResponse, RsvpPayload};
use crate::domain::{GuestEmail, GuestName, GuestPhone, NewRsvp, SheetLayout};
use crate::routes::error_chain_fmt;
use crate::sheets_client::SheetsClient;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use chrono::Utc;

#[derive(thiserror::Error)]
pub enum IntakeError {
    #[error("{0}")]
    MalformedRequest(String),
    #[error("Missing required fields.")]
    MissingRequiredField(String),
    #[error("Failed to save data")]
    StoreAppendError(#[source] anyhow::Error),
}

impl IntakeError {
    /// Text sent back to the guest in the `message` field.
    /// Store errors carry their cause chain; the store client strips urls from it.
    fn message(&self) -> String {
        match self {
            IntakeError::StoreAppendError(e) => format!("{}: {:#}", self, e),
            _ => self.to_string(),
        }
    }
}

impl std::fmt::Debug for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

// The form reads the outcome from the body, never from the status line.
impl ResponseError for IntakeError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::Ok().json(IntakeResponse::error(self.message()))
    }
}

impl TryFrom<RsvpPayload> for NewRsvp {
    type Error = String;

    fn try_from(payload: RsvpPayload) -> Result<Self, Self::Error> {
        let name = GuestName::parse(payload.name.unwrap_or_default())?;
        let email = GuestEmail::parse(payload.email.unwrap_or_default())?;
        let phone = GuestPhone::parse(payload.phone.unwrap_or_default())?;
        Ok(NewRsvp {
            name,
            email,
            phone,
            has_allergies: payload.has_allergies.unwrap_or_default(),
            allergy_comment: payload.allergy_comment.unwrap_or_default(),
            is_elogit: payload.is_elogit.unwrap_or_default(),
            is_negotia: payload.is_negotia.unwrap_or_default(),
            team_leader: payload.team_leader.unwrap_or_default(),
        })
    }
}

// The body extractor fails before the handler runs (e.g. over the payload
// limit); that still has to reach the guest as a JSON answer.
fn read_body(body: Result<web::Bytes, actix_web::Error>) -> Result<web::Bytes, IntakeError> {
    body.map_err(|e| IntakeError::MalformedRequest(format!("Failed to read the request body: {}", e)))
}

fn parse_payload(body: &[u8]) -> Result<RsvpPayload, IntakeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(IntakeError::MalformedRequest(
            "No POST data received.".into(),
        ));
    }
    serde_json::from_slice(body)
        .map_err(|e| IntakeError::MalformedRequest(format!("Invalid JSON payload: {}", e)))
}

#[tracing::instrument(
    name = "Adding a new RSVP",
    skip(body, sheets_client, layout),
    fields(
        guest_email = tracing::field::Empty,
        guest_name = tracing::field::Empty
    )
)]
pub async fn submit_rsvp(
    body: Result<web::Bytes, actix_web::Error>,
    sheets_client: web::Data<SheetsClient>,
    layout: web::Data<SheetLayout>,
) -> Result<HttpResponse, IntakeError> {
    let body = read_body(body)?;
    let payload = parse_payload(&body)?;
    let new_rsvp: NewRsvp = payload
        .try_into()
        .map_err(|reason: String| {
            tracing::info!("Rejecting RSVP: {}", reason);
            IntakeError::MissingRequiredField(reason)
        })?;
    tracing::Span::current()
        .record("guest_email", tracing::field::display(&new_rsvp.email))
        .record("guest_name", tracing::field::display(new_rsvp.name.as_ref()));

    append_rsvp(&sheets_client, &layout, &new_rsvp)
        .await
        .map_err(IntakeError::StoreAppendError)?;
    Ok(HttpResponse::Ok().json(IntakeResponse::success("Data saved successfully")))
}

#[tracing::instrument(
    name = "Saving RSVP details in the sheet",
    skip(sheets_client, layout, new_rsvp)
)]
async fn append_rsvp(
    sheets_client: &SheetsClient,
    layout: &SheetLayout,
    new_rsvp: &NewRsvp,
) -> Result<(), anyhow::Error> {
    sheets_client
        .append_record(layout.header(), layout.row(new_rsvp, Utc::now()))
        .await
}

/// Liveness probe and CORS preflight answer. Never touches the sheet.
pub async fn probe() -> HttpResponse {
    HttpResponse::Ok().json(IntakeResponse::running())
}
