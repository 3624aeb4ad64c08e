#[cfg(test)]
mod tests {
    use crate::error::HttpStatusCode;
    use crate::models::UserId;
    use crate::session::{SessionContext, USER_ID_HEADER};
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    #[test]
    fn test_missing_header_is_anonymous() {
        let session = SessionContext::from_header_value(None).unwrap();
        assert!(session.is_anonymous());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_blank_header_is_anonymous() {
        let session = SessionContext::from_header_value(Some("  ")).unwrap();
        assert!(session.is_anonymous());
    }

    #[test]
    fn test_numeric_header_is_user() {
        let session = SessionContext::from_header_value(Some(" 42 ")).unwrap();
        assert_eq!(session.user_id(), Some(UserId(42)));
    }

    #[test]
    fn test_malformed_header_is_rejected() {
        let err = SessionContext::from_header_value(Some("alice")).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_extractor_reads_header() {
        let request = Request::builder()
            .uri("/slots/mine")
            .header(USER_ID_HEADER, "7")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let session = SessionContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(session, SessionContext::for_user(UserId(7)));
    }
}
