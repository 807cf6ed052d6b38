//! src/domain/guest_name.rs

#[derive(Debug, Clone)]
pub struct GuestName(String);

impl GuestName {
    /// Returns `Ok(GuestName)` holding the trimmed input, `Err(String)` when
    /// nothing but whitespace was submitted.
    pub fn parse(name: String) -> Result<Self, String> {
        super::required("name", name).map(Self)
    }
}

impl AsRef<str> for GuestName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
