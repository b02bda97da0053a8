use poolguard_test_helper::spawn_backend;
use std::time::Duration;

#[tokio::test]
async fn concurrent_lookups_share_one_request() {
    // Arrange - stall the endpoint so both calls overlap
    let app = spawn_backend().await;
    app.state.set_fields_delay(Duration::from_millis(100));

    // Act
    let (first, second) = tokio::join!(
        app.core_client.get_fields("pool"),
        app.core_client.get_fields("pool")
    );

    // Assert - one request on the wire, both callers got the same value
    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first, second);
    assert_eq!(app.state.fields_request_count("pool"), 1);
}

#[tokio::test]
async fn resolved_lookup_is_served_from_cache() {
    // Arrange
    let app = spawn_backend().await;

    // Act
    let first = app.core_client.get_fields("dataset").await.unwrap();
    let second = app.core_client.get_fields("dataset").await.unwrap();

    // Assert
    assert_eq!(first, second);
    assert_eq!(app.state.fields_request_count("dataset"), 1);
}

#[tokio::test]
async fn distinct_tables_fetch_separately() {
    // Arrange
    let app = spawn_backend().await;

    // Act
    let pool = app.core_client.get_fields("pool").await.unwrap();
    let snapshot = app.core_client.get_fields("snapshot").await.unwrap();

    // Assert
    assert_eq!(pool["Table"], "pool");
    assert_eq!(snapshot["Table"], "snapshot");
    assert_eq!(app.state.fields_request_count("pool"), 1);
    assert_eq!(app.state.fields_request_count("snapshot"), 1);
}
