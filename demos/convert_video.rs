//! Submits a video to a conversion node and polls until it is converted.
//!
//! This example shows how to:
//! - Read connection settings from the environment
//! - Submit a video by link, with a callback
//! - Poll the node with the returned key
//!
//! Run with:
//! `VIDEOCONVERT_HOST=localhost VIDEOCONVERT_PORT=8886 cargo run --example convert_video -- http://host/video.ogv`

use std::time::Duration;
use videoconvert::{Client, ConnectionSettings, ConvertOptions, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("videoconvert=debug,convert_video=info")
        .init();

    let video_link = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost/video.ogv".to_string());

    Client::configure(ConnectionSettings::from_env());
    let client = Client::new(ConnectionSettings::default())?;

    println!("=== Submitting {} to {} ===", video_link, client.url());
    let options = ConvertOptions::new()
        .video_link(&video_link)
        .callback("http://localhost:9000/converted")
        .verb("PUT");
    let submitted = client.convert(&options).await?;

    println!("Response: {}", submitted.data);
    println!("Request latency: {:?}", submitted.latency);
    println!("Content-Type: {:?}", submitted.header("content-type"));

    let Some(key) = submitted.key() else {
        println!("The node did not return a key");
        return Ok(());
    };

    println!("=== Polling {} ===", key);
    loop {
        let status = client.done(key).await?;
        if status.is_done() == Some(true) {
            println!("Converted: {}", status.data);
            break;
        }
        println!("Still converting...");
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    Ok(())
}
