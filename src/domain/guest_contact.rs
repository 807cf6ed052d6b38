//! src/domain/guest_contact.rs

/// Email address as submitted. Only presence is enforced server-side; the
/// company domain check belongs to the form.
#[derive(Debug, Clone)]
pub struct GuestEmail(String);

impl GuestEmail {
    pub fn parse(email: String) -> Result<Self, String> {
        super::required("email", email).map(Self)
    }
}

impl AsRef<str> for GuestEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuestEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct GuestPhone(String);

impl GuestPhone {
    pub fn parse(phone: String) -> Result<Self, String> {
        super::required("phone", phone).map(Self)
    }
}

impl AsRef<str> for GuestPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
