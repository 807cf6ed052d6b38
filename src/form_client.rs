//! src/form_client.rs
//!
//! The RSVP form as seen from the guest's side: local form state, validation
//! before anything leaves the machine, one submission per call and a
//! notification describing the outcome.
use crate::contract::{IntakeResponse, RsvpPayload};
use reqwest::{Client, Url};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub has_allergies: bool,
    pub allergy_comment: String,
    pub is_elogit: bool,
    pub is_negotia: bool,
    pub team_leader: String,
}

/// A single field of the form together with its new value.
#[derive(Debug, Clone)]
pub enum FormField {
    Name(String),
    Email(String),
    Phone(String),
    HasAllergies(bool),
    AllergyComment(String),
    IsELogIT(bool),
    IsNegotia(bool),
    TeamLeader(String),
}

impl RsvpForm {
    pub fn update_field(&mut self, field: FormField) {
        match field {
            FormField::Name(value) => self.name = value,
            FormField::Email(value) => self.email = value,
            FormField::Phone(value) => self.phone = value,
            FormField::HasAllergies(value) => self.has_allergies = value,
            FormField::AllergyComment(value) => self.allergy_comment = value,
            FormField::IsELogIT(value) => self.is_elogit = value,
            FormField::IsNegotia(value) => self.is_negotia = value,
            FormField::TeamLeader(value) => self.team_leader = value,
        }
    }

    pub fn validate(&self, required_email_domain: Option<&str>) -> Result<(), ClientValidationError> {
        if [&self.name, &self.email, &self.phone]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(ClientValidationError::MissingRequiredFields);
        }
        if let Some(domain) = required_email_domain {
            if !self.email.contains(domain) {
                return Err(ClientValidationError::EmailOutsideDomain(domain.to_string()));
            }
        }
        Ok(())
    }

    fn to_payload(&self) -> RsvpPayload {
        let optional_text = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        RsvpPayload {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            has_allergies: Some(self.has_allergies),
            allergy_comment: optional_text(&self.allergy_comment),
            is_elogit: Some(self.is_elogit),
            is_negotia: Some(self.is_negotia),
            team_leader: optional_text(&self.team_leader),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ClientValidationError {
    #[error("Name, email and phone are required.")]
    MissingRequiredFields,
    #[error("The email address must belong to {0}.")]
    EmailOutsideDomain(String),
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ClientValidationError),
    #[error("The RSVP could not be delivered.")]
    Transport(#[source] reqwest::Error),
    #[error("The RSVP was rejected: {0}")]
    Rejected(String),
}

impl SubmitError {
    pub fn notification(&self) -> Notification {
        match self {
            SubmitError::Validation(ClientValidationError::MissingRequiredFields) => {
                Notification::error(
                    "Mangler informasjon",
                    "Fyll inn navn, e-post og telefonnummer.",
                )
            }
            SubmitError::Validation(ClientValidationError::EmailOutsideDomain(domain)) => {
                Notification::error(
                    "Ugyldig e-post",
                    format!("Bruk e-postadressen din med {}.", domain),
                )
            }
            SubmitError::Transport(_) => Notification::error(
                "Noe gikk galt",
                "Kunne ikke sende påmeldingen. Prøv igjen.",
            ),
            SubmitError::Rejected(message) => {
                Notification::error("Påmeldingen ble avvist", message.clone())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// What the guest sees after pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub struct RsvpClient {
    http_client: Client,
    endpoint: Url,
    required_email_domain: Option<String>,
    form: RsvpForm,
}

impl RsvpClient {
    pub fn new(
        endpoint: Url,
        required_email_domain: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint,
            required_email_domain,
            form: RsvpForm::default(),
        })
    }

    pub fn form(&self) -> &RsvpForm {
        &self.form
    }

    pub fn update_field(&mut self, field: FormField) {
        self.form.update_field(field);
    }

    /// Validates and submits the form.
    ///
    /// Borrowing the client mutably keeps a second submission from starting
    /// while one is in flight. The form is reset only when the intake handler
    /// confirms the row was saved; on any error it is left as typed so the
    /// guest can try again. Nothing is retried.
    #[tracing::instrument(
        name = "Submitting RSVP form",
        skip(self),
        fields(guest_email = %self.form.email)
    )]
    pub async fn submit(&mut self) -> Result<Notification, SubmitError> {
        self.form.validate(self.required_email_domain.as_deref())?;

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&self.form.to_payload())
            .send()
            .await
            .map_err(SubmitError::Transport)?
            .error_for_status()
            .map_err(SubmitError::Transport)?;
        let outcome: IntakeResponse = response.json().await.map_err(SubmitError::Transport)?;

        match outcome {
            IntakeResponse::Success { .. } => {
                let name = self.form.name.trim().to_string();
                self.form = RsvpForm::default();
                Ok(Notification::success(
                    "Påmelding registrert!",
                    format!("Takk, {}! Vi gleder oss til å se deg.", name),
                ))
            }
            IntakeResponse::Error { message } => Err(SubmitError::Rejected(message)),
            IntakeResponse::Running { .. } => Err(SubmitError::Rejected(
                "The endpoint answered like a probe, the RSVP was not saved.".into(),
            )),
        }
    }
}
