use poolguard_client_core::AuthLevel;
use poolguard_test_helper::spawn_backend;

#[tokio::test]
async fn anonymous_info_is_never_cached() {
    // Arrange
    let app = spawn_backend().await;

    // Act - two fetches without logging in
    let first = app.core_client.get_info().await.unwrap();
    let second = app.core_client.get_info().await.unwrap();

    // Assert - both hit the network and nothing was cached
    assert!(!first.authenticated);
    assert!(!second.authenticated);
    assert_eq!(app.state.info_request_count(), 2);
    assert!(app.core_client.cached_info().is_none());
}

#[tokio::test]
async fn authenticated_info_is_served_from_cache() {
    // Arrange
    let app = spawn_backend().await;
    assert_eq!(app.login().await.unwrap(), AuthLevel::Full);

    // Act
    let first = app.core_client.get_info().await.unwrap();
    let second = app.core_client.get_info().await.unwrap();

    // Assert - one network request, same value both times
    assert!(first.authenticated);
    assert_eq!(first, second);
    assert_eq!(app.state.info_request_count(), 1);
}

#[tokio::test]
async fn authenticated_info_includes_build_details() {
    // Arrange
    let app = spawn_backend().await;
    assert_eq!(app.login().await.unwrap(), AuthLevel::Full);

    // Act
    let info = app.core_client.get_info().await.unwrap();

    // Assert
    assert!(info.zfs_version.is_some());
    assert!(info.commit.is_some());
    assert!(info.build_time.is_some());
}
