// ABOUTME: Retrieved-resource types and the retrieval collaborator interface.
// ABOUTME: Handles charset decoding of raw HTML bytes; network access lives behind the Retriever trait.

use serde::{Deserialize, Serialize};

/// Which retrieval path produced the HTML. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Fetch,
    AlternateFetch,
    /// Lyrics came straight from a metadata lookup; no HTML was scraped.
    Metadata,
}

/// Raw markup plus its provenance, produced once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalResult {
    pub html: String,
    pub source_tag: SourceTag,
}

impl RetrievalResult {
    pub fn new(html: impl Into<String>, source_tag: SourceTag) -> Self {
        Self {
            html: html.into(),
            source_tag,
        }
    }

    /// Wrap HTML obtained through the standard fetch path.
    pub fn fetched(html: impl Into<String>) -> Self {
        Self::new(html, SourceTag::Fetch)
    }

    /// Build from raw bytes, decoding with the content-type charset or detection.
    pub fn from_bytes(body: &[u8], content_type: Option<&str>, source_tag: SourceTag) -> Self {
        Self::new(decode_html(body, content_type), source_tag)
    }
}

/// What a metadata lookup knows about a song id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongMetadata {
    pub url: Option<String>,
    pub lyrics: Option<String>,
}

/// Network collaborator supplying HTML for a song.
///
/// Implementations own transport concerns (headers, timeouts, retries). The
/// pipeline decides *when* to use the alternate path; it never retries on its own.
pub trait Retriever {
    /// Resolve a lyrics-database id to its page URL and, if available, its lyrics.
    fn lookup(&self, id: u64) -> Option<SongMetadata>;

    /// Standard fetch.
    fn fetch(&self, url: &str) -> anyhow::Result<String>;

    /// Secondary fetch path with different client identity. Defaults to `fetch`.
    fn fetch_alternate(&self, url: &str) -> anyhow::Result<String> {
        self.fetch(url)
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
pub fn decode_html(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    lower.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|cs| cs.trim_matches('"').trim_matches('\'').to_string())
    })
}
