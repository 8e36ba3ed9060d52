use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::info;
use salesmap_engine::{events::EventProducers, MapApi, OrderFlowApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::nominatim::{create_geocode_event_handlers, NominatimGeocoder},
    middleware::{HmacMiddlewareFactory, JwtMiddlewareFactory},
    routes::{health, map_page_resource, MapDataRoute},
    webhook_routes::{OrderPaidWebhookRoute, WEBHOOK_HMAC_HEADER},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let geocoder =
        NominatimGeocoder::new(config.nominatim.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let handlers = create_geocode_event_handlers(db.clone(), geocoder);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    info!("📬️ Geocoding event handler started");
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let order_flow_api = OrderFlowApi::new(db.clone(), producers.clone());
        let map_api = MapApi::new(db.clone());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("smp::access_log"))
            .app_data(web::Data::new(order_flow_api))
            .app_data(web::Data::new(map_api));
        // Routes that require a control-panel access token
        let api_scope = web::scope("/api")
            .wrap(JwtMiddlewareFactory::new(config.auth.clone()))
            .service(MapDataRoute::<SqliteDatabase>::new())
            .service(map_page_resource(&config.map_tile_domain));
        // Webhook calls are validated against the shared HMAC secret rather than a user token
        let webhook_scope = web::scope("/incoming")
            .wrap(HmacMiddlewareFactory::new(
                WEBHOOK_HMAC_HEADER,
                config.webhook.hmac_secret.clone(),
                config.webhook.hmac_checks,
            ))
            .service(OrderPaidWebhookRoute::<SqliteDatabase>::new());
        app.service(health).service(api_scope).service(webhook_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
