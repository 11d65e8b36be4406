//! Request bodies sent to the conversion node.

use crate::{Error, Result};
use base64::Engine;
use serde::Serialize;

/// Inputs accepted by [`Client::convert`](crate::Client::convert).
///
/// Exactly one video source is picked from these, in this order:
///
/// 1. `video_link` (the node downloads the video)
/// 2. `sam_uid` and `filename` (the video is already on the storage node)
/// 3. `file` and `filename` (the video travels base64-encoded in the body)
///
/// Anything else makes `convert` fail with [`Error::MissingParameters`].
/// When more than one source is complete, the first one wins and the others
/// are ignored.
///
/// # Examples
///
/// ```
/// use videoconvert::ConvertOptions;
///
/// let options = ConvertOptions::new()
///     .video_link("http://host/video.ogv")
///     .callback("http://cb")
///     .verb("PUT");
/// assert_eq!(options.video_link.as_deref(), Some("http://host/video.ogv"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Base64-encoded video contents.
    pub file: Option<String>,
    /// Key of a video stored on the storage node.
    pub sam_uid: Option<String>,
    /// Name of the video file.
    pub filename: Option<String>,
    /// Link the node downloads the video from.
    pub video_link: Option<String>,
    /// URL the node calls back once the conversion is done.
    pub callback: Option<String>,
    /// HTTP method used for the callback. The node defaults to POST.
    pub verb: Option<String>,
}

impl ConvertOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base64-encoded video contents.
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Base64-encodes raw video bytes into `file`.
    pub fn file_bytes(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.file = Some(base64::engine::general_purpose::STANDARD.encode(bytes));
        self
    }

    /// Sets the storage node key of an already stored video.
    pub fn sam_uid(mut self, sam_uid: impl Into<String>) -> Self {
        self.sam_uid = Some(sam_uid.into());
        self
    }

    /// Sets the name of the video file.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the link the node downloads the video from.
    pub fn video_link(mut self, video_link: impl Into<String>) -> Self {
        self.video_link = Some(video_link.into());
        self
    }

    /// Sets the URL called once the conversion is done.
    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Sets the HTTP method of the callback.
    pub fn verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }
}

/// Where the node gets the video from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VideoSource {
    /// The node downloads the video from a link.
    Download { video_link: String },
    /// The video is already stored on the storage node.
    Reference { sam_uid: String, filename: String },
    /// The video is sent inline, base64-encoded.
    Inline { video: String, filename: String },
}

/// Body of a conversion request.
///
/// Serializes to a flat JSON object: the source fields first, then
/// `callback` and `verb` when they are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    /// Where the video comes from.
    #[serde(flatten)]
    pub source: VideoSource,
    /// URL called once the conversion is done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
    /// HTTP method of the callback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
}

impl ConversionRequest {
    /// Picks the video source out of `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameters`] when no source is complete.
    pub fn from_options(options: &ConvertOptions) -> Result<Self> {
        let source = match options {
            ConvertOptions {
                video_link: Some(video_link),
                ..
            } => VideoSource::Download {
                video_link: video_link.clone(),
            },
            ConvertOptions {
                sam_uid: Some(sam_uid),
                filename: Some(filename),
                ..
            } => VideoSource::Reference {
                sam_uid: sam_uid.clone(),
                filename: filename.clone(),
            },
            ConvertOptions {
                file: Some(file),
                filename: Some(filename),
                ..
            } => VideoSource::Inline {
                video: file.clone(),
                filename: filename.clone(),
            },
            _ => return Err(Error::MissingParameters),
        };

        Ok(Self {
            source,
            callback: options.callback.clone(),
            verb: options.verb.clone(),
        })
    }

    /// Short name of the source, for logs.
    pub fn kind(&self) -> &'static str {
        match self.source {
            VideoSource::Download { .. } => "download",
            VideoSource::Reference { .. } => "reference",
            VideoSource::Inline { .. } => "inline",
        }
    }
}

/// Body of a status request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRequest {
    /// Key of a previously submitted conversion.
    pub key: String,
}

impl StatusRequest {
    /// Creates a status request for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}
