#[cfg(test)]
mod tests {
    use crate::error::*;
    use crate::http::{handle_json_result, IntoHttpResponse};
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_codes() {
        assert_eq!(validation_error("x").status_code(), 400);
        assert_eq!(authentication_error("x").status_code(), 401);
        assert_eq!(authorization_error("x").status_code(), 403);
        assert_eq!(not_found("x").status_code(), 404);
        assert_eq!(conflict("x").status_code(), 409);
        assert_eq!(transport_error("x").status_code(), 502);
    }

    #[test]
    fn test_constructors_build_matching_variants() {
        assert!(matches!(
            validation_error("bad date"),
            TutorlinkError::ValidationError(m) if m == "bad date"
        ));
        assert!(matches!(
            conflict(format!("slot {} already booked", 7)),
            TutorlinkError::ConflictError(m) if m == "slot 7 already booked"
        ));
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = conflict("slot already booked").into_http_response();
        assert_eq!(response.status().as_u16(), 409);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], 409);
        assert_eq!(body["error"]["message"], "Conflict: slot already booked");
    }

    #[derive(Debug)]
    struct MissingRecord;

    impl From<MissingRecord> for TutorlinkError {
        fn from(_: MissingRecord) -> Self {
            not_found("record 3")
        }
    }

    #[tokio::test]
    async fn test_handle_json_result_wraps_ok_and_converts_err() {
        let ok: Result<Vec<i64>, MissingRecord> = Ok(vec![1, 2]);
        let json = handle_json_result(ok).unwrap();
        assert_eq!(json.0, vec![1, 2]);

        let err: Result<Vec<i64>, MissingRecord> = Err(MissingRecord);
        let response = handle_json_result(err).into_response();
        assert_eq!(response.status().as_u16(), 404);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "Not found: record 3");
    }
}
