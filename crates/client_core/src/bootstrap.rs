//! Reads the page data the component is seeded with.
//!
//! The payload is read once per mount. Anything that goes wrong here (no
//! source, unreadable file, malformed JSON) degrades to
//! [`BootstrapPayload::default`] so the view can always render.

use std::{fs, path::PathBuf};

use shared::protocol::BootstrapPayload;
use tracing::{debug, warn};

/// Id of the `<script>` element the server embeds the payload in.
pub const DATA_ISLAND_ID: &str = "data";

pub trait PayloadSource: Send + Sync {
    /// Raw payload text, or `None` when the source has nothing to offer.
    fn read_payload(&self) -> Option<String>;
}

pub struct MissingPayloadSource;

impl PayloadSource for MissingPayloadSource {
    fn read_payload(&self) -> Option<String> {
        None
    }
}

pub struct StaticPayloadSource {
    raw: String,
}

impl StaticPayloadSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl PayloadSource for StaticPayloadSource {
    fn read_payload(&self) -> Option<String> {
        Some(self.raw.clone())
    }
}

pub struct FilePayloadSource {
    path: PathBuf,
}

impl FilePayloadSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PayloadSource for FilePayloadSource {
    fn read_payload(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(err) => {
                warn!(path = %self.path.display(), "bootstrap file unreadable: {err}");
                None
            }
        }
    }
}

/// Pulls the payload out of the `<script id="data">` element of an HTML
/// page produced by the inner source.
pub struct DocumentPayloadSource<S> {
    inner: S,
}

impl<S: PayloadSource> DocumentPayloadSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: PayloadSource> PayloadSource for DocumentPayloadSource<S> {
    fn read_payload(&self) -> Option<String> {
        let html = self.inner.read_payload()?;
        extract_data_island(&html, DATA_ISLAND_ID).map(str::to_string)
    }
}

/// Returns the trimmed text of the first `<script>` element whose `id`
/// attribute equals `id`.
pub fn extract_data_island<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();
    let mut cursor = 0;
    while let Some(offset) = lower[cursor..].find("<script") {
        let attrs_start = cursor + offset + "<script".len();
        let (attrs, tag_len) = parse_tag_attributes(&html[attrs_start..])?;
        let body_start = attrs_start + tag_len;
        let body_end = body_start + lower[body_start..].find("</script")?;
        let has_id = attrs
            .iter()
            .any(|(name, value)| name.eq_ignore_ascii_case("id") && *value == Some(id));
        if has_id {
            return Some(html[body_start..body_end].trim());
        }
        cursor = body_end;
    }
    None
}

type Attribute<'a> = (&'a str, Option<&'a str>);

/// Parses the attributes of an open tag, starting right after the tag name.
/// Returns them with the length consumed up to and including the closing
/// `>`. Quoted values may contain `>`, and `=` may be surrounded by spaces.
fn parse_tag_attributes(tag: &str) -> Option<(Vec<Attribute<'_>>, usize)> {
    let bytes = tag.as_bytes();
    let skip_space = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    let mut attrs = Vec::new();
    let mut i = 0;
    loop {
        i = skip_space(i);
        match *bytes.get(i)? {
            b'>' => return Some((attrs, i + 1)),
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        while i < bytes.len()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
            && !bytes[i].is_ascii_whitespace()
        {
            i += 1;
        }
        let name = &tag[name_start..i];

        let after_name = skip_space(i);
        if bytes.get(after_name) != Some(&b'=') {
            attrs.push((name, None));
            continue;
        }
        i = skip_space(after_name + 1);

        let value = match *bytes.get(i)? {
            quote @ (b'"' | b'\'') => {
                let value_start = i + 1;
                let value_len = bytes[value_start..].iter().position(|b| *b == quote)?;
                i = value_start + value_len + 1;
                &tag[value_start..value_start + value_len]
            }
            _ => {
                let value_start = i;
                while i < bytes.len() && bytes[i] != b'>' && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &tag[value_start..i]
            }
        };
        attrs.push((name, Some(value)));
    }
}

/// Reads and parses the payload exactly once, substituting the default on
/// any failure.
pub fn load_bootstrap(source: &dyn PayloadSource) -> BootstrapPayload {
    let Some(raw) = source.read_payload() else {
        debug!("no bootstrap payload available, using defaults");
        return BootstrapPayload::default();
    };

    match serde_json::from_str::<BootstrapPayload>(&raw) {
        Ok(payload) => {
            debug!(
                username = %payload.username,
                artists = payload.artist_ids.len(),
                "bootstrap payload loaded"
            );
            payload
        }
        Err(err) => {
            warn!("malformed bootstrap payload, using defaults: {err}");
            BootstrapPayload::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/bootstrap_tests.rs"]
mod tests;
