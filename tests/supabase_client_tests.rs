use clinic_portal::{
    AppConfig, AuthError, SupabaseClient,
    auth::AuthProvider,
};

// These tests exercise the client's local session handling only; the network
// paths are covered by the `AuthProvider` contract tests against the mock.

#[tokio::test]
async fn test_fresh_client_has_no_session() {
    let client = SupabaseClient::new(&AppConfig::default());

    assert!(client.session().is_none());
    assert!(!client.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_user_lookup_without_session_is_rejected_locally() {
    let client = SupabaseClient::new(&AppConfig::default());

    // No round trip is attempted: the missing session short-circuits.
    let result = client.get_user_information().await;
    assert!(matches!(result, Err(AuthError::NotAuthenticated)));
}

#[tokio::test]
async fn test_sign_out_without_session_is_a_no_op() {
    let client = SupabaseClient::new(&AppConfig::default());

    client.sign_out().await.unwrap();
    assert!(client.session().is_none());
}
