//! # videoconvert - client for a remote video conversion node
//!
//! The conversion node transcodes videos server-side. This crate submits
//! videos to it and polls for their status over HTTP with Basic
//! authentication, turning the node's error statuses into typed errors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use videoconvert::{Client, ConnectionSettings, ConvertOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), videoconvert::Error> {
//!     let client = Client::new(
//!         ConnectionSettings::new()
//!             .user("test")
//!             .password("test")
//!             .host("localhost")
//!             .port("8886"),
//!     )?;
//!
//!     // The node downloads the video itself and calls back when done
//!     let submitted = client
//!         .convert(
//!             &ConvertOptions::new()
//!                 .video_link("http://host/video.ogv")
//!                 .callback("http://example.com/converted")
//!                 .verb("PUT"),
//!         )
//!         .await?;
//!
//!     if let Some(key) = submitted.key() {
//!         let status = client.done(key).await?;
//!         println!("Done: {:?}", status.is_done());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Video sources
//!
//! [`ConvertOptions`] accepts three ways of handing over a video, tried in
//! this order:
//!
//! - `video_link` - the node downloads the video
//! - `sam_uid` + `filename` - the video already lives on the storage node
//! - `file` + `filename` - the video is sent inline, base64-encoded
//!
//! ## Error Handling
//!
//! ```no_run
//! use videoconvert::{Client, ConnectionSettings, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new(ConnectionSettings::new().host("localhost"))?;
//! match client.done("some-key").await {
//!     Ok(response) => println!("Done: {:?}", response.is_done()),
//!     Err(Error::KeyNotFound { .. }) => eprintln!("Unknown key"),
//!     Err(Error::Authentication { .. }) => eprintln!("Bad credentials"),
//!     Err(Error::SamConnection { raw_response }) => {
//!         eprintln!("Node cannot reach its storage: {}", raw_response)
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Defaults can be set once for the whole process with
//! [`Client::configure`] and are overlaid field by field with the options
//! given to [`Client::new`]. To avoid process-wide state, pass explicit
//! defaults through [`ClientBuilder::defaults`] instead.

mod client;
pub mod config;
mod error;
pub mod request;
mod response;

pub use client::{Client, ClientBuilder};
pub use config::ConnectionSettings;
pub use error::{Error, Result, SAM_ERROR_MARKER};
pub use request::{ConversionRequest, ConvertOptions, StatusRequest, VideoSource};
pub use response::Response;
