use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderId},
    traits::SalesMapDatabaseError,
};

/// Inserts or overwrites the mirror row for the order, returning `false` in the second tuple
/// field if a row for this `order_id` already existed. The host platform may re-send a payment
/// notification at any time, so this must stay idempotent.
pub async fn upsert_order(
    order: NewOrder,
    conn: &mut SqliteConnection,
) -> Result<(Order, bool), SalesMapDatabaseError> {
    let existing = fetch_order_by_order_id(&order.order_id, conn).await?;
    let inserted = existing.is_none();
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                order_id,
                code,
                event,
                street,
                city,
                zipcode,
                state,
                country,
                paid_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (order_id) DO UPDATE SET
                code = excluded.code,
                event = excluded.event,
                street = excluded.street,
                city = excluded.city,
                zipcode = excluded.zipcode,
                state = excluded.state,
                country = excluded.country,
                paid_at = excluded.paid_at,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(order.order_id)
    .bind(order.code)
    .bind(order.event)
    .bind(order.address.street)
    .bind(order.address.city)
    .bind(order.address.zipcode)
    .bind(order.address.state)
    .bind(order.address.country)
    .bind(order.paid_at)
    .fetch_one(conn)
    .await?;
    if inserted {
        debug!("📝️ Order [{}] inserted with id {}", order.order_id, order.id);
    } else {
        debug!("📝️ Order [{}] overwritten", order.order_id);
    }
    Ok((order, inserted))
}

/// Returns the orders table entry for the corresponding `order_id`
pub async fn fetch_order_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order =
        sqlx::query_as("SELECT * FROM orders WHERE order_id = $1").bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}
