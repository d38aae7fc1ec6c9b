//! Wire format of the calculate endpoint.
use axum::http::StatusCode;
use calc_core::expr;
use serde::{Deserialize, Serialize};

pub const ROUTE: &str = "/api/v1/calculate";

#[derive(Deserialize, Debug)]
pub struct Request {
    /// Missing or `null` is treated as an empty expression.
    #[serde(default)]
    pub expression: Option<String>,
}

/// Response body.
/// Serializes as `{"result": number}` or `{"error": string}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Result(f64),
    Error(String),
}

impl Response {
    pub fn error(err: impl ToString) -> Self {
        Self::Error(err.to_string())
    }
}

/// Failures not caused by the expression itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Request body is not a valid request.
    #[error("invalid json request")]
    InvalidJson,

    /// Request body exceeds the size limit.
    #[error("request body too large")]
    TooLarge,

    /// Result can not be represented.
    #[error("internal server error")]
    Internal,
}

/// Response for a body that could not be read.
pub fn reject(status: StatusCode) -> (StatusCode, Response) {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        (status, Response::error(Rejection::TooLarge))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Response::error(Rejection::InvalidJson),
        )
    }
}

/// Handle a raw request body.
///
/// # Returns
/// + `200` with the result.
/// + `400` if the body could not be decoded.
/// + `422` if the expression was rejected, including a literal out of `f64` range.
/// + `500` if the result is not a finite number.
pub fn respond(calculator: &expr::Calculator, body: &[u8]) -> (StatusCode, Response) {
    let expression = match serde_json::from_slice::<Request>(body) {
        Ok(request) => request.expression.unwrap_or_default(),
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(?err, "could not decode request");

            return (
                StatusCode::BAD_REQUEST,
                Response::error(Rejection::InvalidJson),
            );
        }
    };

    match calculator.calc_spanned(&expression) {
        Ok(value) if value.is_finite() => {
            #[cfg(feature = "tracing")]
            tracing::debug!(expression = %expression, value);

            (StatusCode::OK, Response::Result(value))
        }

        Ok(value) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(expression = %expression, value, "result is not finite");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Response::error(Rejection::Internal),
            )
        }

        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                expression = %expression,
                error = %err.value,
                position = *err.span.start,
                "expression rejected"
            );

            (StatusCode::UNPROCESSABLE_ENTITY, Response::error(err.value))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn request(expression: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({ "expression": expression })).unwrap()
    }

    #[test]
    fn response_shape() {
        let body = serde_json::to_string(&Response::Result(6.0)).unwrap();
        assert_eq!(body, r#"{"result":6.0}"#);

        let body = serde_json::to_string(&Response::error(expr::Error::DivisionByZero)).unwrap();
        assert_eq!(body, r#"{"error":"division by zero"}"#);
    }

    #[test]
    fn respond_ok() {
        let calculator = expr::Calculator::default();
        let (status, response) = respond(&calculator, &request("2+2*2"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, Response::Result(6.0));

        let (status, response) = respond(&calculator, &request("(7)(5)"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, Response::Result(35.0));
    }

    #[test]
    fn respond_rejected_expression() {
        let calculator = expr::Calculator::default();
        let cases = [
            ("24/0", "division by zero"),
            ("((2+3)", "incorrect count of brackets"),
            ("2++3", "multiple operands in a row"),
            ("", "invalid expression"),
            ("2+2..2", "failure to convert to float64"),
            ("2&3", "undefined operand"),
        ];

        for (expression, message) in cases {
            let (status, response) = respond(&calculator, &request(expression));
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "`{expression}`");
            assert_eq!(response, Response::Error(message.to_string()));
        }
    }

    #[test]
    fn respond_missing_expression() {
        let calculator = expr::Calculator::default();
        let (status, response) = respond(&calculator, b"{}");
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response, Response::Error("invalid expression".to_string()));
    }

    #[test]
    fn respond_null_expression() {
        let calculator = expr::Calculator::default();
        let (status, response) = respond(&calculator, br#"{"expression": null}"#);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response, Response::Error("invalid expression".to_string()));
    }

    #[test]
    fn reject_unreadable_body() {
        let (status, response) = reject(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response, Response::Error("request body too large".to_string()));

        let (status, response) = reject(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, Response::Error("invalid json request".to_string()));
    }

    #[test]
    fn respond_invalid_json() {
        let calculator = expr::Calculator::default();
        let bodies: [&[u8]; 4] = [b"{", b"", b"[1, 2]", br#"{"expression": 5}"#];
        for body in bodies {
            let (status, response) = respond(&calculator, body);
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response, Response::Error("invalid json request".to_string()));
        }
    }

    #[test]
    fn respond_non_finite_result() {
        let calculator = expr::Calculator::default();
        let nines = "9".repeat(200);
        let overflow = format!("({nines})*({nines})");
        let (status, response) = respond(&calculator, &request(&overflow));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response, Response::Error("internal server error".to_string()));
    }

    #[test]
    fn respond_literal_out_of_range() {
        let calculator = expr::Calculator::default();
        let huge = format!("1{}", "0".repeat(400));
        let (status, response) = respond(&calculator, &request(&huge));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response,
            Response::Error("failure to convert to float64".to_string())
        );
    }

    #[cfg(feature = "tracing")]
    #[tracing_test::traced_test]
    #[test]
    fn respond_logs_rejection() {
        let calculator = expr::Calculator::default();
        respond(&calculator, &request("1+x"));
        assert!(logs_contain("expression rejected"));
        assert!(logs_contain("undefined operand"));
    }
}
