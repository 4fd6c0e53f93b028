use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use crate::{domain::rating_request::RatingRequest, model::{rating_requests::{RatingRequestForInsert, RatingRequestForUpdate, RatingRequestQuery}, store::SqliteStore}};
use super::{OrderBuilder, QueryBuilder, QueryWhereType};
use crate::model::error::Result;

const RATING_REQUEST_QUERY_ELEMENTS: &str = "id, given_stars, total_given_stars, total_max_stars, average_stars";

impl SqliteStore {

    fn row_to_rating_request(row: &Row) -> rusqlite::Result<RatingRequest> {
        Ok(RatingRequest {
            id: row.get(0)?,
            given_stars: row.get(1)?,
            total_given_stars: row.get(2)?,
            total_max_stars: row.get(3)?,
            average_stars: row.get(4)?,
        })
    }

    pub async fn get_rating_requests(&self, query: RatingRequestQuery) -> Result<Vec<RatingRequest>> {
        let rows = self.server_store.call( move |conn| {
            let mut where_query = QueryBuilder::new();
            if let Some(q) = &query.given_stars {
                where_query.add_where(QueryWhereType::Equal("given_stars", q));
            }
            if let Some(q) = &query.after {
                where_query.add_where(QueryWhereType::After("id", q));
            }
            where_query.add_oder(OrderBuilder::new("id".to_owned(), query.order));
            where_query.set_limit(query.limit);

            let mut stmt = conn.prepare(&format!("SELECT {} FROM rating_requests {}{}", RATING_REQUEST_QUERY_ELEMENTS, where_query.format(), where_query.format_order()))?;
            let rows = stmt.query_map(
                params_from_iter(where_query.values()), Self::row_to_rating_request,
            )?;
            let ratings: Vec<RatingRequest> = rows.collect::<std::result::Result<Vec<RatingRequest>, rusqlite::Error>>()?;
            Ok(ratings)
        }).await?;
        Ok(rows)
    }

    pub async fn get_rating_request(&self, id: i64) -> Result<Option<RatingRequest>> {
        let row = self.server_store.call( move |conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM rating_requests WHERE id = ?", RATING_REQUEST_QUERY_ELEMENTS))?;
            let row = stmt.query_row(
            [id], Self::row_to_rating_request).optional()?;
            Ok(row)
        }).await?;
        Ok(row)
    }

    /// Returns the id generated by the database.
    pub async fn add_rating_request(&self, rating: RatingRequestForInsert) -> Result<i64> {
        let id = self.server_store.call( move |conn| {
            conn.execute("INSERT INTO rating_requests (given_stars, total_given_stars, total_max_stars, average_stars)
            VALUES (?, ?, ?, ?)", params![
                rating.given_stars,
                rating.total_given_stars,
                rating.total_max_stars,
                rating.average_stars
            ])?;
            Ok(conn.last_insert_rowid())
        }).await?;
        Ok(id)
    }

    /// Applies the provided columns and reads the row back in the same
    /// transaction. `None` when no row has this id.
    pub async fn update_rating_request(&self, id: i64, update: RatingRequestForUpdate) -> Result<Option<RatingRequest>> {
        let row = self.server_store.call( move |conn| {
            let tx = conn.transaction()?;
            let mut where_query = QueryBuilder::new();
            where_query.add_update(&update.given_stars, "given_stars");
            where_query.add_update(&update.total_given_stars, "total_given_stars");
            where_query.add_update(&update.total_max_stars, "total_max_stars");
            where_query.add_update(&update.average_stars, "average_stars");
            if where_query.has_update() {
                where_query.add_where(QueryWhereType::Equal("id", &id));
                let update_sql = format!("UPDATE rating_requests SET {} {}", where_query.format_update(), where_query.format());
                tx.execute(&update_sql, params_from_iter(where_query.values()))?;
            }

            let row = tx.query_row(&format!("SELECT {} FROM rating_requests WHERE id = ?", RATING_REQUEST_QUERY_ELEMENTS), [id], Self::row_to_rating_request).optional()?;
            tx.commit()?;
            Ok(row)
        }).await?;
        Ok(row)
    }

    /// Returns the deleted row, `None` when it was already gone.
    pub async fn remove_rating_request(&self, id: i64) -> Result<Option<RatingRequest>> {
        let row = self.server_store.call( move |conn| {
            let tx = conn.transaction()?;
            let existing = tx.query_row(&format!("SELECT {} FROM rating_requests WHERE id = ?", RATING_REQUEST_QUERY_ELEMENTS), [id], Self::row_to_rating_request).optional()?;
            if existing.is_some() {
                tx.execute("DELETE FROM rating_requests WHERE id = ?", [id])?;
            }
            tx.commit()?;
            Ok(existing)
        }).await?;
        Ok(row)
    }
}
