//! Image references as the CMS serializes them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An image field value.
///
/// Depending on how the block or field is configured, the CMS sends either a
/// plain URL, a bare image id (an image chooser without a rendition), a
/// rendition object carrying a URL, or the pages API image object whose
/// download URL sits under `meta`. Any other shape is kept as
/// [`ImageRef::Other`] and has no URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    /// Direct image URL.
    Url(String),
    /// Image id with no resolvable URL.
    Id(u64),
    /// Rendition object.
    Rendition {
        /// Rendition URL.
        url: String,
        /// Alternative text, if the CMS provides one.
        #[serde(default)]
        alt: Option<String>,
    },
    /// Image object from the pages API: `{"id", "meta": {"download_url"}, "title"}`.
    Api {
        /// Image id.
        #[serde(default)]
        id: Option<u64>,
        /// Image metadata.
        meta: ImageMeta,
        /// Image title.
        #[serde(default)]
        title: Option<String>,
    },
    /// Unrecognized shape.
    Other(Value),
}

/// `meta` of a pages API image object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    /// Image model, e.g. `wagtailimages.Image`.
    #[serde(default, rename = "type")]
    pub image_type: Option<String>,
    /// API URL of the image detail.
    #[serde(default)]
    pub detail_url: Option<String>,
    /// URL of the original file.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ImageRef {
    /// The URL to display, if this reference carries one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) | Self::Rendition { url, .. } => non_blank(url),
            Self::Api { meta, .. } => meta.download_url.as_deref().and_then(non_blank),
            Self::Id(_) | Self::Other(_) => None,
        }
    }

    /// Alternative text supplied by the CMS.
    ///
    /// Pages API image objects carry no alt text; their title stands in.
    pub fn alt(&self) -> Option<&str> {
        match self {
            Self::Rendition { alt: Some(alt), .. } => non_blank(alt),
            Self::Api {
                title: Some(title), ..
            } => non_blank(title),
            _ => None,
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// Deserialize an optional string, treating blank strings as absent.
///
/// Optional char blocks are stored as `""` rather than `null`.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a field that is only usable as text.
///
/// Non-string values (a stream field served as an array, say) read as absent
/// instead of failing the whole record.
pub(crate) fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}
