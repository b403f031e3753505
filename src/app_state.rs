//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::verify_schema, pagination::PaginationConfig, timezone::get_local_offset};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Europe/Madrid".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// The connection to the Bluecoins database.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] around a connection to a Bluecoins database.
    ///
    /// The database is not modified. `local_timezone` should be a valid,
    /// canonical timezone name, e.g. "Europe/Madrid".
    ///
    /// # Errors
    /// Returns an error if the database is missing a Bluecoins table or if
    /// `local_timezone` is not a known timezone.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        verify_schema(&db_connection)?;

        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            pagination_config,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{Error, PaginationConfig, db::create_schema};

    use super::AppState;

    fn bluecoins_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_schema(&connection).unwrap();
        connection
    }

    #[test]
    fn accepts_bluecoins_database() {
        let state = AppState::new(
            bluecoins_connection(),
            "Europe/Madrid",
            PaginationConfig::default(),
        );

        assert!(state.is_ok());
    }

    #[test]
    fn rejects_invalid_timezone() {
        let result = AppState::new(
            bluecoins_connection(),
            "Nowhere/Special",
            PaginationConfig::default(),
        );

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Nowhere/Special".to_owned()))
        );
    }

    #[test]
    fn rejects_database_without_bluecoins_tables() {
        let result = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Etc/UTC",
            PaginationConfig::default(),
        );

        assert!(matches!(result, Err(Error::MissingTable(_))));
    }
}
