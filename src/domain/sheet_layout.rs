//! src/domain/sheet_layout.rs
use crate::domain::NewRsvp;
use chrono::{DateTime, SecondsFormat, Utc};

/// Column layout of the RSVP sheet. Deployments that also ask for the
/// guest's team leader use `with_team_leader`.
#[derive(serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SheetLayout {
    #[default]
    Standard,
    WithTeamLeader,
}

impl SheetLayout {
    pub fn header(&self) -> Vec<String> {
        let mut columns = vec![
            "Navn",
            "E-post",
            "Telefon",
            "Har allergier",
            "Allergi kommentarer",
            "ELogIT",
            "Negotia",
        ];
        if *self == SheetLayout::WithTeamLeader {
            columns.push("Teamleder");
        }
        columns.push("Dato");
        columns.into_iter().map(String::from).collect()
    }

    pub fn row(&self, rsvp: &NewRsvp, submitted_at: DateTime<Utc>) -> Vec<String> {
        let mut cells = vec![
            rsvp.name.as_ref().to_string(),
            rsvp.email.as_ref().to_string(),
            rsvp.phone.as_ref().to_string(),
            yes_no(rsvp.has_allergies),
            rsvp.allergy_comment.clone(),
            yes_no(rsvp.is_elogit),
            yes_no(rsvp.is_negotia),
        ];
        if *self == SheetLayout::WithTeamLeader {
            cells.push(rsvp.team_leader.clone());
        }
        cells.push(submitted_at.to_rfc3339_opts(SecondsFormat::Secs, true));
        cells
    }
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "Ja" } else { "Nei" };
    answer.to_string()
}
