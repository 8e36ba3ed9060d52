//! `SqliteDatabase` is a concrete implementation of a sales map engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use smp_common::Coordinates;
use sqlx::SqlitePool;

use super::db::{db_url, geocodes, new_pool, orders};
use crate::{
    db_types::{GeocodeRecord, NewOrder, Order, OrderId},
    smp_api::map_objects::MapLocation,
    traits::{MapQuery, MapQueryError, SalesMapDatabase, SalesMapDatabaseError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database pool using the url defined in the `SMP_DATABASE_URL` envar.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl SalesMapDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn upsert_order(&self, order: NewOrder) -> Result<(Order, bool), SalesMapDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        orders::upsert_order(order, &mut conn).await
    }

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, SalesMapDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_order_id(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn upsert_geocode(
        &self,
        order_id: &OrderId,
        coordinates: Option<Coordinates>,
    ) -> Result<GeocodeRecord, SalesMapDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        geocodes::upsert_geocode(order_id, coordinates, &mut conn).await
    }

    async fn fetch_geocode_by_order_id(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<GeocodeRecord>, SalesMapDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let record = geocodes::fetch_geocode_by_order_id(order_id, &mut conn).await?;
        Ok(record)
    }
}

impl MapQuery for SqliteDatabase {
    async fn fetch_locations_for_event(&self, event: &str) -> Result<Vec<MapLocation>, MapQueryError> {
        let mut conn = self.pool.acquire().await?;
        let locations = geocodes::fetch_locations_for_event(event, &mut conn).await?;
        Ok(locations)
    }
}
