use super::*;

#[test]
fn status_kind_splits_client_and_server() {
    let rejected = ApiError::Status { status: 422, body: "{}".into() };
    let failed = ApiError::Status { status: 502, body: String::new() };
    assert_eq!(rejected.kind(), ErrorKind::Rejected);
    assert_eq!(failed.kind(), ErrorKind::Server);
}

#[test]
fn unexpected_non_error_status_is_server_kind() {
    let odd = ApiError::Status { status: 302, body: String::new() };
    assert_eq!(odd.kind(), ErrorKind::Server);
}

#[test]
fn unauthorized_kind_and_code() {
    let err = ApiError::Unauthorized { status: 401 };
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.error_code(), "E_UNAUTHORIZED");
    assert!(err.to_string().contains("sign in again"));
    assert!(!err.retryable());
}

#[test]
fn retryable_covers_network_throttle_and_5xx() {
    assert!(ApiError::Network("reset".into()).retryable());
    assert!(ApiError::Status { status: 429, body: String::new() }.retryable());
    assert!(ApiError::Status { status: 503, body: String::new() }.retryable());
    assert!(!ApiError::Status { status: 400, body: String::new() }.retryable());
    assert!(!ApiError::Decode("bad".into()).retryable());
}

#[test]
fn storage_error_converts() {
    let err: ApiError = StorageError::Unavailable("no disk".into()).into();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert_eq!(err.error_code(), "E_STORAGE");
    assert!(err.to_string().contains("no disk"));
}

#[test]
fn client_kinds() {
    assert_eq!(ApiError::HttpClientBuild("tls".into()).kind(), ErrorKind::Client);
    assert_eq!(ApiError::InvalidRequest("file".into()).kind(), ErrorKind::Client);
}
