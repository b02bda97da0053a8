use poolguard_client_core::AuthLevel;
use poolguard_shared::req_args::TotpSaveReqArgs;
use poolguard_test_helper::{spawn_backend, VALID_TOTP_CODE};

#[tokio::test]
async fn challenge_names_the_provider() {
    // Arrange
    let app = spawn_backend().await;

    // Act
    let challenge = app.core_client.get_two_factor_challenge().await.unwrap();

    // Assert
    assert_eq!(challenge.provider, "totp");
}

#[tokio::test]
async fn enabled_flag_follows_enrollment() {
    // Arrange
    let app = spawn_backend().await;
    assert!(!app.core_client.totp_is_enabled().await.unwrap());

    // Act
    app.state.set_tfa_enabled(true);

    // Assert
    assert!(app.core_client.totp_is_enabled().await.unwrap());
}

#[tokio::test]
async fn enrollment_round_trip() {
    // Arrange
    let app = spawn_backend().await;

    // Act
    let setup = app.core_client.totp_initialize().await.unwrap();

    // Assert
    assert!(!setup.secret.is_empty());
    assert!(setup.image.starts_with("data:image/png;base64,"));

    // Act - confirm with a valid code
    let args = TotpSaveReqArgs::new(setup.secret.into(), VALID_TOTP_CODE);
    app.core_client.totp_save(args).await.unwrap();
}

#[tokio::test]
async fn save_with_invalid_code_reports_the_server_message() {
    // Arrange
    let app = spawn_backend().await;
    let setup = app.core_client.totp_initialize().await.unwrap();

    // Act
    let args = TotpSaveReqArgs::new(setup.secret.into(), "000000");
    let outcome = app.core_client.totp_save(args).await;

    // Assert
    let message = outcome.unwrap_err().to_string();
    assert!(message.contains("Invalid code"), "unexpected: {message}");
}

#[tokio::test]
async fn successful_challenge_completes_the_login_and_drops_caches() {
    // Arrange - a partial login with a warm fields cache
    let app = spawn_backend().await;
    app.state.set_auth_type("partial");
    assert_eq!(app.login().await.unwrap(), AuthLevel::Partial);
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(app.state.fields_request_count("pool"), 1);

    // Act
    app.core_client
        .totp_authenticate(VALID_TOTP_CODE)
        .await
        .unwrap();

    // Assert - session is now authenticated and the caches were dropped
    let info = app.core_client.get_info().await.unwrap();
    assert!(info.authenticated);
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(app.state.fields_request_count("pool"), 2);
}

#[tokio::test]
async fn failed_challenge_leaves_state_untouched() {
    // Arrange
    let app = spawn_backend().await;
    app.state.set_auth_type("partial");
    assert_eq!(app.login().await.unwrap(), AuthLevel::Partial);
    app.core_client.get_fields("pool").await.unwrap();

    // Act
    let outcome = app.core_client.totp_authenticate("000000").await;

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "Invalid code");
    app.core_client.get_fields("pool").await.unwrap();
    assert_eq!(app.state.fields_request_count("pool"), 1);
    assert!(!app.core_client.get_info().await.unwrap().authenticated);
}
