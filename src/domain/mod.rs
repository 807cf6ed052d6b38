//! src/domain/mod.rs
mod guest_contact;
mod guest_name;
mod new_rsvp;
mod sheet_layout;

pub use guest_contact::{GuestEmail, GuestPhone};
pub use guest_name::GuestName;
pub use new_rsvp::NewRsvp;
pub use sheet_layout::SheetLayout;

fn required(field: &str, value: String) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("The {} field is missing.", field))
    } else {
        Ok(trimmed.to_string())
    }
}
