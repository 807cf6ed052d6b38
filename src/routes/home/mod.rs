//! src/routes/home/mod.rs

use crate::configuration::FormSettings;
use actix_web::{HttpResponse, http::header, web};

pub async fn home(form_settings: web::Data<FormSettings>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(header::ContentType::html())
        .body(render(form_settings.required_email_domain.as_deref()))
}

fn render(required_email_domain: Option<&str>) -> String {
    // Spliced into the page script as a JSON string literal.
    let literal = serde_json::Value::from(required_email_domain.unwrap_or_default())
        .to_string()
        .replace("</", "<\\/");
    include_str!("home.html").replace("{{required_email_domain}}", &literal)
}
