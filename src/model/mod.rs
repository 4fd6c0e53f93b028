pub mod store;
pub mod error;
pub mod rating_requests;

use std::sync::Arc;

use self::store::SqliteStore;
use error::Result;


#[derive(Clone)]
pub struct ModelController {
	store: Arc<SqliteStore>,
}


// Constructor
impl ModelController {
	pub fn new(store: SqliteStore) -> Self {
		Self {
			store: Arc::new(store),
		}
	}

	pub async fn new_in_memory() -> Result<Self> {
		let connection = tokio_rusqlite::Connection::open_in_memory().await?;
		let store = SqliteStore::new_with_connection(connection).await?;
		Ok(Self::new(store))
	}
}
