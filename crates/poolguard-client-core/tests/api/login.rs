use poolguard_client_core::AuthLevel;
use poolguard_shared::{errors::AuthError, req_args::LoginReqArgs};
use poolguard_test_helper::spawn_backend;

#[tokio::test]
async fn login_failure_invalid_password() {
    // Arrange
    let app = spawn_backend().await;
    let login_args = LoginReqArgs::new(
        app.test_user.username.clone(),
        "random-password".to_string().into(),
    );

    // Act
    let outcome = app.core_client.login(login_args).await;

    // Assert
    assert_eq!(
        outcome.unwrap_err().to_string(),
        AuthError::InvalidCredentials.to_string()
    );
}

#[tokio::test]
async fn login_failure_invalid_user() {
    // Arrange
    let app = spawn_backend().await;
    let login_args = LoginReqArgs::new(
        "random-username".to_string(),
        app.test_user.password.clone().into(),
    );

    // Act
    let outcome = app.core_client.login(login_args).await;

    // Assert
    assert_eq!(
        outcome.unwrap_err().to_string(),
        AuthError::InvalidCredentials.to_string()
    );
}

#[tokio::test]
async fn failed_login_leaves_caches_untouched() {
    // Arrange - log in and warm the fields cache
    let app = spawn_backend().await;
    assert_eq!(app.login().await.unwrap(), AuthLevel::Full);
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(app.state.fields_request_count("pool"), 1);

    // Act
    let bad_args = LoginReqArgs::new(
        app.test_user.username.clone(),
        "random-password".to_string().into(),
    );
    let outcome = app.core_client.login(bad_args).await;

    // Assert
    assert!(outcome.is_err());
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(
        app.state.fields_request_count("pool"),
        1,
        "fields cache should still be warm after a failed login"
    );
}

#[tokio::test]
async fn full_login_clears_caches() {
    // Arrange - log in and warm both caches
    let app = spawn_backend().await;
    assert_eq!(app.login().await.unwrap(), AuthLevel::Full);
    app.core_client.get_fields("pool").await.unwrap();
    let info = app.core_client.get_info().await.unwrap();
    assert!(info.authenticated);
    assert!(app.core_client.cached_info().is_some());

    // Act - log in again
    assert_eq!(app.login().await.unwrap(), AuthLevel::Full);

    // Assert - both caches were dropped
    assert!(app.core_client.cached_info().is_none());
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(app.state.fields_request_count("pool"), 2);
}

#[tokio::test]
async fn partial_login_preserves_caches() {
    // Arrange - log in fully and warm the fields cache
    let app = spawn_backend().await;
    assert_eq!(app.login().await.unwrap(), AuthLevel::Full);
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(app.state.fields_request_count("pool"), 1);

    // Act - a login that only gets partway
    app.state.set_auth_type("partial");
    let outcome = app.login().await.unwrap();

    // Assert
    assert_eq!(outcome, AuthLevel::Partial);
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(
        app.state.fields_request_count("pool"),
        1,
        "a partial login must not clear the caches"
    );
}

#[tokio::test]
async fn unrecognized_auth_type_is_a_typed_error() {
    // Arrange
    let app = spawn_backend().await;
    app.state.set_auth_type("granted");

    // Act
    let outcome = app.login().await;

    // Assert
    let err = outcome.unwrap_err().downcast::<AuthError>().unwrap();
    assert_eq!(err, AuthError::UnrecognizedAuthType("granted".to_string()));
}

#[tokio::test]
async fn logout_clears_caches_even_when_the_request_fails() {
    // Arrange - log in and warm both caches
    let app = spawn_backend().await;
    assert_eq!(app.login().await.unwrap(), AuthLevel::Full);
    app.core_client.get_fields("pool").await.unwrap();
    app.core_client.get_info().await.unwrap();
    assert!(app.core_client.is_logged_in());
    app.state.set_logout_status(500);

    // Act
    app.core_client.logout().await;

    // Assert
    assert!(!app.core_client.is_logged_in());
    assert!(app.core_client.cached_info().is_none());
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(app.state.fields_request_count("pool"), 2);
}

#[tokio::test]
async fn login_logout_round_trip() {
    // Arrange
    let app = spawn_backend().await;

    // Assert - Ensure not logged in
    assert!(
        !app.core_client.is_logged_in(),
        "should not be logged in before logging in"
    );

    // Act - Login
    let login_outcome = app.login().await.unwrap();

    // Assert - Login successful and info cached on first fetch
    assert_eq!(login_outcome, AuthLevel::Full);
    let info = app.core_client.get_info().await.unwrap();
    assert!(info.authenticated);
    assert!(
        app.core_client.is_logged_in(),
        "should be logged in after logging in"
    );

    // Act - Logout
    app.core_client.logout().await;

    // Assert - Ensure we are not logged in
    assert!(
        !app.core_client.is_logged_in(),
        "should not be logged in after logging out"
    );
}
