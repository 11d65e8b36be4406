//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Catch missing conversion inputs before anything is sent
//! - Tell the node's error statuses apart
//! - Deal with a node that is not running
//!
//! Run with: `cargo run --example error_handling`

use videoconvert::{Client, ConnectionSettings, ConvertOptions, Error};

fn describe(result: Result<videoconvert::Response, Error>) {
    match result {
        Ok(response) => println!("Success: {}", response.data),
        Err(Error::MissingParameters) => {
            println!("Missing parameters: nothing was sent");
        }
        Err(Error::ConnectionRefused { address, .. }) => {
            println!("Nothing is listening on {}", address);
        }
        Err(Error::Authentication { .. }) => println!("Credentials were rejected"),
        Err(Error::KeyNotFound { raw_response }) => {
            println!("Unknown key: {}", raw_response);
        }
        Err(Error::MalformedRequest { raw_response }) => {
            println!("The node rejected the body: {}", raw_response);
        }
        Err(Error::QueueServiceConnection { .. }) => {
            println!("The node cannot reach its queue service");
        }
        Err(Error::SamConnection { .. }) => {
            println!("The node cannot reach its storage node");
        }
        Err(Error::DeserializationFailed {
            raw_response,
            serde_error,
            status,
        }) => {
            println!("Deserialization Failed!");
            println!("  Status: {}", status);
            println!("  Serde error: {}", serde_error);
            println!(
                "  Raw response (first 200 chars): {}",
                raw_response.chars().take(200).collect::<String>()
            );
        }
        Err(e) => println!("Other error: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("videoconvert=info")
        .init();

    let client = Client::builder()
        .defaults(ConnectionSettings::from_env())
        .build()
        .or_else(|_| {
            Client::builder()
                .defaults(ConnectionSettings::new().host("localhost").port("8886"))
                .build()
        })?;

    println!("=== Example 1: Missing parameters ===");
    // A filename alone is not a video source
    describe(
        client
            .convert(&ConvertOptions::new().filename("video.ogv"))
            .await,
    );
    println!();

    println!("=== Example 2: Unknown key ===");
    describe(client.done("this-key-does-not-exist").await);
    println!();

    println!("=== Example 3: Node not running ===");
    let offline = Client::builder()
        .defaults(ConnectionSettings::new())
        .host("127.0.0.1")
        .port("1")
        .build()?;
    describe(offline.done("key").await);
    println!();

    println!("=== Example 4: Inspecting errors ===");
    let errors = vec![
        Error::from_response(http::StatusCode::UNAUTHORIZED, "Unauthorized"),
        Error::from_response(http::StatusCode::INTERNAL_SERVER_ERROR, "SAM is down"),
        Error::from_response(http::StatusCode::INTERNAL_SERVER_ERROR, "{}"),
    ];

    for error in errors {
        match error {
            Some(error) => {
                println!("Error: {}", error);
                println!("  Status code: {:?}", error.status());
                println!("  Raw response: {:?}", error.raw_response());
            }
            None => println!("Not an error: the body is parsed as JSON"),
        }
        println!();
    }

    Ok(())
}
