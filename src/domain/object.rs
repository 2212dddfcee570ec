//! Object storage types and formatting helpers.

use std::path::Path;

use chrono::{DateTime, Local, Utc};

/// Default lifetime of a presigned URL, in seconds.
pub const DEFAULT_PRESIGN_EXPIRES: u64 = 300;

/// Longest lifetime an S3 presigned URL may have (7 days).
pub const MAX_PRESIGN_EXPIRES: u64 = 604_800;

/// Content type that is pretty-printed instead of shown as text.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Fallback content type when none is known.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// One entry of a bucket listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

impl ObjectSummary {
    /// Render as `<key> (<size>, <date>)`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} ({}, {})",
            self.key,
            format_size(self.size),
            format_date(self.last_modified)
        )
    }
}

/// Result of listing a bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// Number of keys reported by the server.
    pub key_count: usize,
    pub objects: Vec<ObjectSummary>,
}

impl Listing {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_count == 0 || self.objects.is_empty()
    }
}

/// Metadata returned by a HEAD request.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
    pub content_type: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// A fetched object body with its declared content type.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl StoredObject {
    /// True when the stored content type is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|ct| ct.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
    }

    /// Render the body for display.
    ///
    /// JSON bodies are re-indented; anything else is shown as lossy UTF-8.
    pub fn render(&self) -> crate::error::Result<String> {
        if self.is_json() {
            let value: serde_json::Value = serde_json::from_slice(&self.body)?;
            return Ok(serde_json::to_string_pretty(&value)?);
        }
        Ok(String::from_utf8_lossy(&self.body).into_owned())
    }
}

/// A file to upload, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

impl Upload {
    pub fn new(key: impl Into<String>, body: impl Into<Vec<u8>>, content_type: &str) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
            content_type: content_type.to_string(),
        }
    }
}

/// Human-readable object size: bytes below 1 KiB, otherwise KB with one decimal.
#[must_use]
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{size}B")
    } else {
        format!("{:.1}KB", size as f64 / 1024.0)
    }
}

/// Local calendar date of a timestamp, or `Unknown`.
#[must_use]
pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => "Unknown".to_string(),
    }
}

/// Guess a content type from a file extension.
#[must_use]
pub fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => JSON_CONTENT_TYPE,
        Some("html" | "htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("csv") => "text/csv",
        Some("xml") => "application/xml",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => OCTET_STREAM,
    }
}

/// Validate a presign lifetime in seconds.
pub fn validate_expiry(seconds: u64) -> crate::error::Result<u64> {
    if seconds == 0 || seconds > MAX_PRESIGN_EXPIRES {
        return Err(crate::error::Error::Validation(format!(
            "presign expiry must be between 1 and {MAX_PRESIGN_EXPIRES} seconds (got {seconds})"
        )));
    }
    Ok(seconds)
}

/// The three files uploaded by the guided demo.
#[must_use]
pub fn demo_files(now: DateTime<Utc>) -> Vec<Upload> {
    let data = serde_json::json!({
        "message": "S3 from Rust rocks!",
        "timestamp": now.to_rfc3339(),
        "version": "1.0",
    });
    let data = serde_json::to_string_pretty(&data).unwrap_or_default();

    vec![
        Upload::new(
            "demo.txt",
            "Hello from the addon CLI! This is a simple text file.",
            "text/plain",
        ),
        Upload::new("data.json", data, JSON_CONTENT_TYPE),
        Upload::new(
            "readme.md",
            "# S3 Demo\n\nThis file was uploaded using the addon CLI.\n\n- Fast\n- Simple\n- Typed",
            "text/markdown",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sizes_switch_to_kilobytes_at_1024() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.0KB");
        assert_eq!(format_size(1536), "1.5KB");
    }

    #[test]
    fn missing_date_is_unknown() {
        assert_eq!(format_date(None), "Unknown");
    }

    #[test]
    fn summary_describes_key_size_and_date() {
        let summary = ObjectSummary {
            key: "demo.txt".into(),
            size: 52,
            last_modified: None,
        };
        assert_eq!(summary.describe(), "demo.txt (52B, Unknown)");
    }

    #[test]
    fn content_type_is_guessed_from_extension() {
        assert_eq!(guess_content_type(Path::new("a/b/notes.MD")), "text/markdown");
        assert_eq!(guess_content_type(Path::new("data.json")), JSON_CONTENT_TYPE);
        assert_eq!(guess_content_type(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("archive.tar.zst")), OCTET_STREAM);
        assert_eq!(guess_content_type(Path::new("Makefile")), OCTET_STREAM);
    }

    #[test]
    fn json_objects_are_pretty_printed() {
        let object = StoredObject {
            content_type: Some("application/json; charset=utf-8".into()),
            body: br#"{"a":1}"#.to_vec(),
        };
        assert!(object.is_json());
        assert_eq!(object.render().unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn text_objects_render_lossily() {
        let object = StoredObject {
            content_type: Some("text/plain".into()),
            body: vec![b'h', b'i', 0xff],
        };
        assert!(!object.is_json());
        assert_eq!(object.render().unwrap(), "hi\u{fffd}");
    }

    #[test]
    fn expiry_bounds_are_enforced() {
        assert!(validate_expiry(0).is_err());
        assert_eq!(validate_expiry(1).unwrap(), 1);
        assert_eq!(validate_expiry(MAX_PRESIGN_EXPIRES).unwrap(), MAX_PRESIGN_EXPIRES);
        assert!(validate_expiry(MAX_PRESIGN_EXPIRES + 1).is_err());
    }

    #[test]
    fn demo_files_embed_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let files = demo_files(now);
        let keys: Vec<_> = files.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["demo.txt", "data.json", "readme.md"]);

        let data: serde_json::Value = serde_json::from_slice(&files[1].body).unwrap();
        assert_eq!(data["timestamp"], "2024-05-01T12:00:00+00:00");
        assert_eq!(data["version"], "1.0");
    }

    #[test]
    fn listing_is_empty_when_no_keys() {
        assert!(Listing::default().is_empty());
    }
}
