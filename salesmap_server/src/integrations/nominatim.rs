use log::*;
use nominatim_tools::{NominatimApi, NominatimApiError, NominatimConfig};
use salesmap_engine::{
    events::{EventHandlers, EventHooks},
    traits::{GeocodeGateway, GeocodeGatewayError},
    GeocodeFlowApi,
    SqliteDatabase,
};
use smp_common::Coordinates;

pub const GEOCODE_EVENT_BUFFER_SIZE: usize = 25;

/// [`GeocodeGateway`] implementation backed by the Nominatim client.
///
/// The wrapper exists so that the engine never depends on a concrete geocoding service; it maps
/// the client's error taxonomy one-to-one onto the gateway's.
#[derive(Clone)]
pub struct NominatimGeocoder {
    api: NominatimApi,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, NominatimApiError> {
        let api = NominatimApi::new(config)?;
        Ok(Self { api })
    }
}

impl GeocodeGateway for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Coordinates, GeocodeGatewayError> {
        self.api.geocode(query).await.map_err(|e| match e {
            NominatimApiError::Timeout => GeocodeGatewayError::Timeout,
            NominatimApiError::ServiceError(s) => GeocodeGatewayError::ServiceError(s),
            NominatimApiError::NotFound => GeocodeGatewayError::NotFound,
            NominatimApiError::Initialization(s) | NominatimApiError::UnexpectedError(s) => {
                GeocodeGatewayError::UnexpectedError(s)
            },
        })
    }
}

/// Assigns the event handler for the geocoding pipeline.
///
/// Only one event matters here: `OrderPaidEvent`. Each event spawns a background task that loads
/// the order, formats its invoice address and records the gateway's verdict in the geocode store.
/// Whatever happens in that task stays in that task; the webhook that published the event has
/// long since answered.
pub fn create_geocode_event_handlers<G>(db: SqliteDatabase, geocoder: G) -> EventHandlers
where G: GeocodeGateway + 'static {
    let mut hooks = EventHooks::default();
    hooks.on_order_paid(move |ev| {
        let api = GeocodeFlowApi::new(db.clone());
        let geocoder = geocoder.clone();
        Box::pin(async move {
            match api.geocode_order(&ev.order_id, &geocoder).await {
                Ok(outcome) => debug!("📍️ Geocoding task for order {} completed. Outcome: {outcome:?}", ev.order_id),
                Err(e) => error!("📍️ Geocoding task for order {} failed. {e}", ev.order_id),
            }
        })
    });
    EventHandlers::new(GEOCODE_EVENT_BUFFER_SIZE, hooks)
}
