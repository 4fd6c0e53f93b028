use serde::{Deserialize, Serialize};


/// One star-rating submission with the running totals it was sent with.
///
/// Values are stored as given: nothing checks star bounds or that
/// `average_stars` matches the two totals.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    /// Issued by the store on insert, `None` until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub given_stars: i32,
    pub total_given_stars: i32,
    pub total_max_stars: i32,
    pub average_stars: f64,
}

impl RatingRequest {
    pub fn new(id: Option<i64>, given_stars: i32, total_given_stars: i32, total_max_stars: i32, average_stars: f64) -> Self {
        Self { id, given_stars, total_given_stars, total_max_stars, average_stars }
    }

    pub fn unsaved(given_stars: i32, total_given_stars: i32, total_max_stars: i32, average_stars: f64) -> Self {
        Self::new(None, given_stars, total_given_stars, total_max_stars, average_stars)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
