//! src/startup.rs
use crate::configuration::{FormSettings, Settings};
use crate::domain::SheetLayout;
use crate::routes::{health_check, home, probe, submit_rsvp};
use crate::sheets_client::SheetsClient;
use actix_web::dev::Server;
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let layout = configuration.sheets.layout;
        let sheets_client = configuration.sheets.client()?;

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, sheets_client, layout, configuration.form)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    sheets_client: SheetsClient,
    layout: SheetLayout,
    form_settings: FormSettings,
) -> Result<Server, anyhow::Error> {
    let sheets_client = web::Data::new(sheets_client);
    let layout = web::Data::new(layout);
    let form_settings = web::Data::new(form_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
                    .add(("Access-Control-Allow-Headers", "Content-Type")),
            )
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/rsvp", web::post().to(submit_rsvp))
            .route("/rsvp", web::get().to(probe))
            .route("/rsvp", web::method(Method::OPTIONS).to(probe))
            .app_data(sheets_client.clone())
            .app_data(layout.clone())
            .app_data(form_settings.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
