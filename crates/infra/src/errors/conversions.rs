//! Conversions from external infrastructure errors into domain errors.

use namecast_domain::NamecastError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub NamecastError);

impl From<InfraError> for NamecastError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<NamecastError> for InfraError {
    fn from(value: NamecastError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoNamecastError {
    fn into_namecast(self) -> NamecastError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → NamecastError */
/* -------------------------------------------------------------------------- */

impl IntoNamecastError for SqlError {
    fn into_namecast(self) -> NamecastError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => NamecastError::Store("database is busy".into()),
                    (ErrorCode::DatabaseLocked, _) => {
                        NamecastError::Store("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        NamecastError::Validation("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        NamecastError::Validation("foreign key constraint violation".into())
                    }
                    _ => NamecastError::Store(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => NamecastError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                NamecastError::Store(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                NamecastError::Store(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => NamecastError::Configuration(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => NamecastError::Store(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_namecast())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → NamecastError */
/* -------------------------------------------------------------------------- */

impl IntoNamecastError for r2d2::Error {
    fn into_namecast(self) -> NamecastError {
        NamecastError::Store(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_namecast())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → NamecastError */
/* -------------------------------------------------------------------------- */

impl IntoNamecastError for serde_json::Error {
    fn into_namecast(self) -> NamecastError {
        NamecastError::Store(format!("stored value is not valid JSON: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_namecast())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → NamecastError */
/* -------------------------------------------------------------------------- */

impl IntoNamecastError for HttpError {
    fn into_namecast(self) -> NamecastError {
        if self.is_timeout() {
            return NamecastError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return NamecastError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => NamecastError::Authorization(message),
                404 => NamecastError::NotFound(message),
                400..=499 => NamecastError::Validation(message),
                _ => NamecastError::Network(message),
            };
        }

        if self.is_decode() {
            return NamecastError::Network(format!("invalid response body: {self}"));
        }

        NamecastError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_namecast())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
