use serde::{Deserialize, Serialize};

use crate::{domain::rating_request::RatingRequest, tools::log::{log_info, LogServiceType}};

use super::{error::{Error, Result}, store::sql::SqlOrder, ModelController};


#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequestQuery {
    pub given_stars: Option<i32>,
    pub after: Option<i64>,
    #[serde(default)]
    pub order: SqlOrder,
    pub limit: Option<u32>,
}

/// Body accepted when creating a rating. A client-sent `id` is ignored,
/// identity always comes from the store.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequestForAdd {
    #[serde(default)]
    pub given_stars: i32,
    #[serde(default)]
    pub total_given_stars: i32,
    #[serde(default)]
    pub total_max_stars: i32,
    #[serde(default)]
    pub average_stars: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RatingRequestForInsert {
    pub given_stars: i32,
    pub total_given_stars: i32,
    pub total_max_stars: i32,
    pub average_stars: f64,
}

impl From<RatingRequestForAdd> for RatingRequestForInsert {
    fn from(value: RatingRequestForAdd) -> Self {
        Self {
            given_stars: value.given_stars,
            total_given_stars: value.total_given_stars,
            total_max_stars: value.total_max_stars,
            average_stars: value.average_stars,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequestForUpdate {
    pub given_stars: Option<i32>,
    pub total_given_stars: Option<i32>,
    pub total_max_stars: Option<i32>,
    pub average_stars: Option<f64>,
}



impl ModelController {

	pub async fn get_rating_requests(&self, query: RatingRequestQuery) -> Result<Vec<RatingRequest>> {
		let ratings = self.store.get_rating_requests(query).await?;
		Ok(ratings)
	}

    pub async fn get_rating_request(&self, id: i64) -> Result<RatingRequest> {
		self.store.get_rating_request(id).await?.ok_or(Error::RatingRequestNotFound(id))
	}

    pub async fn add_rating_request(&self, rating: RatingRequestForAdd) -> Result<RatingRequest> {
        check_average_stars(Some(rating.average_stars))?;
        let id = self.store.add_rating_request(rating.into()).await?;
        log_info(LogServiceType::Database, format!("Added rating request: {}", id));
		self.get_rating_request(id).await
	}

    pub async fn update_rating_request(&self, id: i64, update: RatingRequestForUpdate) -> Result<RatingRequest> {
        check_average_stars(update.average_stars)?;
		self.store.update_rating_request(id, update).await?.ok_or(Error::RatingRequestNotFound(id))
	}

    pub async fn remove_rating_request(&self, id: i64) -> Result<RatingRequest> {
        let removed = self.store.remove_rating_request(id).await?.ok_or(Error::RatingRequestNotFound(id))?;
        log_info(LogServiceType::Database, format!("Removed rating request: {}", id));
        Ok(removed)
	}
}

/// SQLite turns NaN into NULL, which the NOT NULL column rejects, and
/// infinities cannot be written back as JSON numbers.
fn check_average_stars(average_stars: Option<f64>) -> Result<()> {
    match average_stars {
        Some(average) if !average.is_finite() => Err(Error::NonFiniteAverageStars),
        _ => Ok(()),
    }
}
