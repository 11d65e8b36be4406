//! Process-wide default settings.
//!
//! Kept in its own test binary with a single test so nothing else in the
//! process touches the shared defaults while it runs.

use serde_json::json;
use videoconvert::{config, Client, ConnectionSettings};
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_global_configuration_precedence() {
    assert_eq!(config::current_settings(), ConnectionSettings::default());
    assert!(Client::new(ConnectionSettings::default()).is_err());

    Client::configure(
        ConnectionSettings::new()
            .user("test")
            .password("test")
            .host("localhost")
            .port("8886"),
    );

    // No options: everything comes from the global defaults
    let client = Client::new(ConnectionSettings::default()).unwrap();
    assert_eq!(
        client.settings(),
        &ConnectionSettings::new()
            .user("test")
            .password("test")
            .host("localhost")
            .port("8886")
    );
    assert_eq!(client.url().as_str(), "http://localhost:8886/");

    // Explicit options win field by field
    let client = Client::new(ConnectionSettings::new().user("admin").port("9000")).unwrap();
    assert_eq!(
        client.settings(),
        &ConnectionSettings::new()
            .user("admin")
            .password("test")
            .host("localhost")
            .port("9000")
    );

    // Explicit defaults bypass the global ones entirely
    let client = Client::builder()
        .defaults(ConnectionSettings::new().host("other"))
        .build()
        .unwrap();
    assert_eq!(client.settings(), &ConnectionSettings::new().host("other"));

    // Requests use the merged credentials
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(basic_auth("test", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(
        ConnectionSettings::new()
            .host("127.0.0.1")
            .port(mock_server.address().port().to_string()),
    )
    .unwrap();
    let response = client.done("key").await.unwrap();
    assert_eq!(response.is_done(), Some(true));

    // Already-built clients keep their settings after reconfiguration
    Client::configure(ConnectionSettings::new().host("elsewhere"));
    assert_eq!(client.settings().user.as_deref(), Some("test"));
    assert_eq!(config::current_settings().user, None);
}
