use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_subscriber::EnvFilter;
use travelsplit::{server, settings::Settings, RateTable};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = Settings::new().map_err(std::io::Error::other)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "travelsplit={level},actix_web={level}",
            level = settings.log.level
        )))
        .init();

    let rates = web::Data::new(RateTable::new(settings.rates).map_err(std::io::Error::other)?);
    tracing::info!(
        bind = %settings.server.bind,
        port = settings.server.port,
        reference = rates.reference(),
        "starting settlement service"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(rates.clone())
            .configure(server::configure)
    })
    .bind((settings.server.bind.as_str(), settings.server.port))?
    .run()
    .await
}
