use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt;
use std::net::AddrParseError;
use std::num::ParseIntError;

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    /// Validation failures raised by the route update operations.
    pub fn is_validation(&self) -> bool {
        (100..200).contains(&self.code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        config_error(err)
    }
}

impl From<AddrParseError> for Error {
    fn from(err: AddrParseError) -> Self {
        config_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => {
                tracing::error!(code = self.code, "{}", self.message);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn empty_title_error() -> Error {
    Error {
        code: 102,
        message: "empty title".into(),
    }
}

pub fn invalid_coordinates_error() -> Error {
    Error {
        code: 103,
        message: "invalid coordinates".into(),
    }
}

pub fn invalid_points_error() -> Error {
    Error {
        code: 104,
        message: "invalid points".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn config_error<T: fmt::Display>(err: T) -> Error {
    Error {
        code: 6,
        message: format!("configuration error: {}", err),
    }
}

pub fn server_error<T: fmt::Display>(err: T) -> Error {
    Error {
        code: 7,
        message: format!("server error: {}", err),
    }
}

#[test]
fn validation_codes() {
    assert!(empty_title_error().is_validation());
    assert!(invalid_coordinates_error().is_validation());
    assert!(invalid_points_error().is_validation());
    assert!(!env_var_error(env::VarError::NotPresent).is_validation());
    assert!(!config_error("bad port").is_validation());
}

#[test]
fn internal_errors_hide_message() {
    use tokio_test::block_on;

    let response = config_error("bad port").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = block_on(hyper::body::to_bytes(response.into_body())).unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "code": 6, "error": "Internal Server Error" }));
}

#[test]
fn caller_errors_expose_message() {
    use tokio_test::block_on;

    let response = empty_title_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = block_on(hyper::body::to_bytes(response.into_body())).unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "code": 102, "error": "empty title" }));
}
