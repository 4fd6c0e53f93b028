pub mod rating_requests;

use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::Connection;

use crate::tools::log::{log_info, LogServiceType};

use super::Result;


pub async fn migrate_database(connection: &Connection) -> Result<usize> {
    let version = connection.call( |conn| {
        let mut version = conn.query_row(
            "SELECT user_version FROM pragma_user_version;",
            [],
            |row| {
                let version: usize = row.get(0)?;
                Ok(version)
            })?;

            if version < 1 {
                let initial = String::from_utf8_lossy(include_bytes!("001 - INITIAL.sql"));
                conn.execute_batch(&initial)?;
                version = 1;
                conn.pragma_update(None, "user_version", version)?;
                log_info(LogServiceType::Database, format!("Update Database to version: {}", version));
            }

            Ok(version)
    }).await?;

    Ok(version)
}



pub enum QueryWhereType<'a> {
    Equal(&'a str, &'a dyn ToSql),
    After(&'a str, &'a dyn ToSql),
}

impl<'a> QueryWhereType<'a> {
    pub fn expand(&self) -> (String, Vec<&'a dyn ToSql>) {
        match self {
            QueryWhereType::Equal(name, value) => (format!("{} = ?", name), vec![*value]),
            QueryWhereType::After(name, value) => (format!("{} > ?", name), vec![*value]),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub enum SqlOrder {
    #[default]
    ASC,
    DESC
}

pub struct OrderBuilder {
    column: String,
    order: SqlOrder
}

impl OrderBuilder {
    pub fn new(column: String, order: SqlOrder) -> Self {
        OrderBuilder { column, order }
    }
    pub fn format(&self) -> String {
        match self.order {
            SqlOrder::ASC => self.column.clone(),
            SqlOrder::DESC => format!("{} DESC", self.column),
        }
    }
}

/// Collects the dynamic parts of a statement. Values are bound in the
/// order `values()` returns them: update columns first, then where clauses.
pub struct QueryBuilder<'a> {
    wheres: Vec<QueryWhereType<'a>>,

    columns_update: Vec<String>,
    values_update: Vec<&'a dyn ToSql>,

    columns_orders: Vec<OrderBuilder>,
    limit: Option<u32>,
}

impl <'a> QueryBuilder<'a> {
    pub fn new() -> Self {
        Self {
            wheres: Vec::new(),
            columns_update: Vec::new(),
            values_update: Vec::new(),
            columns_orders: Vec::new(),
            limit: None,
        }
    }

    pub fn add_update<T: ToSql>(&mut self, optional: &'a Option<T>, column: &str)  {
        if let Some(value) = optional {
            self.columns_update.push(format!("{} = ?", column));
            self.values_update.push(value);
        }
    }

    pub fn has_update(&self) -> bool {
        !self.columns_update.is_empty()
    }

    pub fn add_where(&mut self, kind: QueryWhereType<'a>) {
        self.wheres.push(kind);
    }

    pub fn add_oder(&mut self, order: OrderBuilder) {
        self.columns_orders.push(order);
    }

    pub fn set_limit(&mut self, limit: Option<u32>) {
        self.limit = limit;
    }

    pub fn format_update(&self) -> String {
        self.columns_update.join(", ")
    }

    pub fn format(&self) -> String {
        if self.wheres.is_empty() {
            "".to_string()
        } else {
            let columns = self.wheres.iter().map(|w| w.expand().0).collect::<Vec<String>>();
            format!("WHERE {}", columns.join(" and "))
        }
    }

    pub fn format_order(&self) -> String {
        let mut text = String::new();
        if !self.columns_orders.is_empty() {
            text.push_str(&format!(" ORDER BY {}", self.columns_orders.iter().map(|o| o.format()).collect::<Vec<String>>().join(", ")));
        }
        if let Some(limit) = self.limit {
            text.push_str(&format!(" LIMIT {}", limit));
        }
        text
    }

    pub fn values(&self) -> Vec<&'a dyn ToSql> {
        let mut all_values = self.values_update.clone();
        for w in &self.wheres {
            let (_, mut v) = w.expand();
            all_values.append(&mut v);
        }
        all_values
    }
}
