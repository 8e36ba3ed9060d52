use log::trace;
use smp_common::Coordinates;
use sqlx::SqliteConnection;

use crate::{
    db_types::{GeocodeRecord, OrderId},
    smp_api::map_objects::MapLocation,
    traits::SalesMapDatabaseError,
};

/// Records the outcome of a geocode attempt. Keyed by `order_id`; last write wins, so a re-run
/// task simply replaces the stored coordinates.
pub async fn upsert_geocode(
    order_id: &OrderId,
    coordinates: Option<Coordinates>,
    conn: &mut SqliteConnection,
) -> Result<GeocodeRecord, SalesMapDatabaseError> {
    let (latitude, longitude) = match coordinates {
        Some(c) => (Some(c.latitude), Some(c.longitude)),
        None => (None, None),
    };
    let record: GeocodeRecord = sqlx::query_as(
        r#"
            INSERT INTO order_geocodes (order_id, latitude, longitude)
            VALUES ($1, $2, $3)
            ON CONFLICT (order_id) DO UPDATE SET
                latitude = excluded.latitude,
                longitude = excluded.longitude,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(order_id.as_str())
    .bind(latitude)
    .bind(longitude)
    .fetch_one(conn)
    .await?;
    trace!("📝️ Geocode record for order [{order_id}] written");
    Ok(record)
}

pub async fn fetch_geocode_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<GeocodeRecord>, sqlx::Error> {
    let record = sqlx::query_as("SELECT * FROM order_geocodes WHERE order_id = $1")
        .bind(order_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(record)
}

/// All resolved locations for the event, labelled with the order code. Null-coordinate records
/// (attempts that did not resolve) are filtered out here so callers never see a half pair.
pub async fn fetch_locations_for_event(
    event: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<MapLocation>, sqlx::Error> {
    let locations = sqlx::query_as(
        r#"
            SELECT g.latitude AS lat, g.longitude AS lon, 'Order: ' || o.code AS tooltip
            FROM order_geocodes g
            INNER JOIN orders o ON o.order_id = g.order_id
            WHERE o.event = $1 AND g.latitude IS NOT NULL AND g.longitude IS NOT NULL
            ORDER BY o.code;
        "#,
    )
    .bind(event)
    .fetch_all(conn)
    .await?;
    Ok(locations)
}
