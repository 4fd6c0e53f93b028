use tokio_rusqlite::Connection;

use crate::model::store::sql::migrate_database;
use crate::server::get_server_file_path_array;
use crate::tools::log::{log_info, LogServiceType};

use super::error::{Result, Error};


pub mod sql;


pub struct SqliteStore {
	server_store: Connection,
}

// Constructor
impl SqliteStore {
	pub async fn new() -> Result<Self> {
        let server_db_path = get_server_file_path_array(vec!["dbs", "database.db"]).await.map_err(|_| Error::CannotOpenDatabase)?;
        log_info(LogServiceType::Database, format!("Opening database: {:?}", server_db_path));
        let connection = Connection::open(server_db_path).await?;
        Self::new_with_connection(connection).await
	}

	pub async fn new_with_connection(connection: Connection) -> Result<Self> {
        let version = migrate_database(&connection).await?;
        log_info(LogServiceType::Database, format!("Current Database version: {}", version));

		Ok(Self {
			server_store: connection,
		})
	}
}
