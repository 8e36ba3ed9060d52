//----------------------------------------------   Order paid  ----------------------------------------------------

use actix_web::{web, HttpRequest, HttpResponse};
use log::{info, trace, warn};
use salesmap_engine::{db_types::NewOrder, traits::SalesMapDatabase, OrderFlowApi};

use crate::{
    data_objects::{IncomingOrder, JsonResponse},
    route,
};

/// Header carrying the hex-encoded HMAC-SHA256 signature of the webhook body.
pub const WEBHOOK_HMAC_HEADER: &str = "X-SalesMap-Hmac-Sha256";

route!(order_paid_webhook => Post "/order_paid" impl SalesMapDatabase);
/// Route handler for the order-paid webhook
///
/// The ticketing platform calls this once per order that transitions to paid. The order is
/// mirrored locally and handed to the geocoding hook; the response never blocks on geocoding.
///
/// The HMAC signature on the request is checked by
/// [`crate::middleware::HmacMiddlewareFactory`] before this handler runs.
pub async fn order_paid_webhook<B>(
    req: HttpRequest,
    body: web::Json<IncomingOrder>,
    api: web::Data<OrderFlowApi<B>>,
) -> HttpResponse
where
    B: SalesMapDatabase,
{
    trace!("🎟️ Received webhook request: {}", req.uri());
    let order = NewOrder::from(body.into_inner());
    // Webhook responses must always be in the 200 range, otherwise the platform will keep retrying the delivery
    let result = match api.process_paid_order(order.clone()).await {
        Ok((order, true)) => {
            info!("🎟️ Order {} mirrored. Geocoding has been scheduled.", order.order_id);
            JsonResponse::success("Order processed successfully.")
        },
        Ok((order, false)) => {
            info!("🎟️ Order {} re-delivered. Mirror overwritten and geocoding re-scheduled.", order.order_id);
            JsonResponse::success("Order already exists.")
        },
        Err(e) => {
            warn!("🎟️ Could not process order {}. {e}", order.order_id);
            JsonResponse::failure(e)
        },
    };
    HttpResponse::Ok().json(result)
}
