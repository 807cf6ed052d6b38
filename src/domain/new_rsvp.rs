//! src/domain/new_rsvp.rs
use crate::domain::{GuestEmail, GuestName, GuestPhone};

#[derive(Debug, Clone)]
pub struct NewRsvp {
    pub name: GuestName,
    pub email: GuestEmail,
    pub phone: GuestPhone,
    pub has_allergies: bool,
    pub allergy_comment: String,
    pub is_elogit: bool,
    pub is_negotia: bool,
    pub team_leader: String,
}
