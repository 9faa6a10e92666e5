use apphub_aggregator::{AggregateError, Artifact};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Response as HttpResponse, StatusCode},
    response::Response,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

pub(crate) fn error_status(err: &AggregateError) -> (StatusCode, &'static str) {
    match err {
        AggregateError::InvalidNamespace(_) => (StatusCode::BAD_REQUEST, "invalid_namespace"),
        AggregateError::InvalidRoot { .. } => (StatusCode::NOT_FOUND, "unknown_app"),
        AggregateError::EmptySuffix | AggregateError::Serialization(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "aggregation_failed")
        }
    }
}

pub(crate) fn error_response(err: &AggregateError) -> Result<Response, StatusCode> {
    let (status, code) = error_status(err);
    let hint = match code {
        "invalid_namespace" => Some(
            "An app name is a single path segment without '/', '\\' or '..'.".to_string(),
        ),
        "unknown_app" => Some("Check that the app directory exists under the apps path.".to_string()),
        _ => None,
    };
    // Filesystem paths and internal details stay in the server log.
    let message = match code {
        "invalid_namespace" => err.to_string(),
        "unknown_app" => "Unknown app".to_string(),
        _ => "Aggregation failed".to_string(),
    };

    let envelope = ErrorEnvelope {
        code: code.to_string(),
        message,
        hint,
    };
    let bytes = serde_json::to_vec(&envelope).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    bytes_response(status, "application/json", bytes)
}

pub(crate) fn artifact_response(artifact: Artifact) -> Result<Response, StatusCode> {
    bytes_response(StatusCode::OK, artifact.content_type(), artifact.body)
}

pub(crate) fn bytes_response(
    status: StatusCode,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<Response, StatusCode> {
    HttpResponse::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn maps_errors_to_statuses() {
        assert_eq!(
            error_status(&AggregateError::InvalidNamespace("..".to_string())).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&AggregateError::InvalidRoot {
                path: PathBuf::from("/apps/ghost"),
                reason: "No such file or directory".to_string(),
            })
            .0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&AggregateError::EmptySuffix).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_carries_envelope() {
        let response = error_response(&AggregateError::InvalidNamespace("a/b".to_string())).unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
