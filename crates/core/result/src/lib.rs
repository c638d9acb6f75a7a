#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[cfg(feature = "rocket")]
pub mod rocket;

/// Result type with custom Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error information
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Error {
    /// Type of error and additional information
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub error_type: ErrorType,

    /// Where this error occurred
    pub location: String,
}

/// Possible error types
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, Clone)]
pub enum ErrorType {
    /// This error has not been labelled
    LabelMe,

    // ? Authentication errors
    NotAuthenticated,
    InvalidSession,

    // ? User related errors
    UnknownUser,

    // ? Messaging related errors
    UnknownMessage,
    EmptyMessage,
    PayloadTooLarge,

    // ? Notification related errors
    UnknownNotification,

    // ? Permission errors
    MissingPermission {
        permission: String,
    },

    // ? Ratelimit errors
    TooManyRequests {
        retry_after: f64,
    },

    // ? General errors
    DatabaseError {
        operation: String,
        table: String,
    },
    InternalError,
    NotFound,
    FailedValidation {
        error: String,
    },
}

#[macro_export]
macro_rules! create_error {
    ( $error: ident $( $tt:tt )? ) => {
        $crate::Error {
            error_type: $crate::ErrorType::$error $( $tt )?,
            location: format!("{}:{}:{}", file!(), line!(), column!()),
        }
    };
}

#[macro_export]
macro_rules! create_database_error {
    ( $operation: expr, $table: expr ) => {
        create_error!(DatabaseError {
            operation: $operation.to_string(),
            table: $table.to_string()
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::ErrorType;

    #[test]
    fn use_macro_to_construct_error() {
        let error = create_error!(LabelMe);
        assert!(matches!(error.error_type, ErrorType::LabelMe));
    }

    #[test]
    fn use_macro_to_construct_complex_error() {
        let error = create_error!(MissingPermission {
            permission: "DeleteForEveryone".to_string()
        });
        assert!(matches!(
            error.error_type,
            ErrorType::MissingPermission { .. }
        ));
    }
}
