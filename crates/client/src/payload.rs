//! Blog write payloads: structured JSON or multipart with an image file.

use inkpost_core::BlogStatus;
use serde::Serialize;

use crate::error::Error;

/// Maximum length of the teaser description accepted by the server.
const DESCRIPTION_MAX_CHARS: usize = 300;

/// The writable fields of a blog post.
///
/// Construction truncates the description to the server's 300-character
/// limit so a draft is always submittable as built.
#[derive(Debug, Clone, Serialize)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<i64>,
    pub status: BlogStatus,
    pub is_featured: bool,
}

impl BlogDraft {
    /// Create a draft with the given title and markdown body.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            description: String::new(),
            category_id: None,
            tag_ids: Vec::new(),
            status: BlogStatus::Draft,
            is_featured: false,
        }
    }

    /// Set the teaser description, truncated to 300 characters.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = description.chars().take(DESCRIPTION_MAX_CHARS).collect();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set the selected tag ids.
    #[must_use]
    pub fn tags(mut self, tag_ids: Vec<i64>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    /// Set the publication status.
    #[must_use]
    pub fn status(mut self, status: BlogStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark the post as featured.
    #[must_use]
    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }
}

/// An image file to upload alongside a blog draft.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, forwarded to the server.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// A blog write operation's body, with the encoding chosen explicitly.
///
/// `Structured` is sent as a JSON document. `WithImage` must be multipart
/// form data because a file rides along; the form's content-type header
/// (including the boundary) is left entirely to the transport.
#[derive(Debug, Clone)]
pub enum BlogPayload {
    Structured(BlogDraft),
    WithImage {
        draft: BlogDraft,
        image: ImageUpload,
    },
}

impl BlogPayload {
    /// The draft fields, regardless of encoding.
    #[must_use]
    pub fn draft(&self) -> &BlogDraft {
        match self {
            Self::Structured(draft) | Self::WithImage { draft, .. } => draft,
        }
    }
}

/// Encode tag ids as a single JSON-array string.
///
/// Multipart form data cannot carry a native nested array, so the ids go
/// over the wire as one `tag_ids` field holding `"[1,2,3]"`; the server
/// parses it back. Repeated scalar fields would be silently misread.
pub(crate) fn encode_tag_ids(tag_ids: &[i64]) -> String {
    serde_json::to_string(tag_ids).unwrap_or_else(|_| String::from("[]"))
}

/// Build the multipart form for a draft and optional image.
pub(crate) fn multipart_form(
    draft: &BlogDraft,
    image: Option<&ImageUpload>,
) -> Result<reqwest::multipart::Form, Error> {
    let mut form = reqwest::multipart::Form::new()
        .text("title", draft.title.clone())
        .text("content", draft.content.clone())
        .text("description", draft.description.clone())
        .text("status", draft.status.as_str().to_owned())
        .text("is_featured", draft.is_featured.to_string());

    if let Some(category_id) = draft.category_id {
        form = form.text("category_id", category_id.to_string());
    }
    if !draft.tag_ids.is_empty() {
        form = form.text("tag_ids", encode_tag_ids(&draft.tag_ids));
    }
    if let Some(image) = image {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| Error::Configuration(format!("invalid image content type: {e}")))?;
        form = form.part("featured_image", part);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_ids_encode_as_json_array_string() {
        assert_eq!(encode_tag_ids(&[1, 2, 3]), "[1,2,3]");
        assert_eq!(encode_tag_ids(&[]), "[]");
    }

    #[test]
    fn description_is_truncated_to_limit() {
        let long = "x".repeat(500);
        let draft = BlogDraft::new("t", "c").description(long);
        assert_eq!(draft.description.chars().count(), 300);
    }

    #[test]
    fn description_truncation_respects_char_boundaries() {
        let long = "é".repeat(500);
        let draft = BlogDraft::new("t", "c").description(long);
        assert_eq!(draft.description.chars().count(), 300);
    }

    #[test]
    fn structured_draft_serializes_without_empty_optionals() {
        let draft = BlogDraft::new("Title", "Body");
        let json = serde_json::to_value(&draft).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("category_id"));
        assert!(!obj.contains_key("tag_ids"));
        assert_eq!(obj["status"], "draft");
    }

    #[test]
    fn structured_draft_serializes_native_tag_array() {
        let draft = BlogDraft::new("Title", "Body").tags(vec![4, 5]).category(2);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["tag_ids"], serde_json::json!([4, 5]));
        assert_eq!(json["category_id"], 2);
    }

    #[test]
    fn multipart_form_builds_with_image() {
        let draft = BlogDraft::new("Title", "Body").tags(vec![1, 2]);
        let image = ImageUpload::new("cover.png", "image/png", vec![0x89, 0x50]);
        assert!(multipart_form(&draft, Some(&image)).is_ok());
    }

    #[test]
    fn multipart_form_rejects_bad_mime() {
        let draft = BlogDraft::new("Title", "Body");
        let image = ImageUpload::new("cover.png", "not a mime type", vec![]);
        let err = multipart_form(&draft, Some(&image)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn payload_draft_accessor_covers_both_kinds() {
        let draft = BlogDraft::new("Title", "Body");
        let structured = BlogPayload::Structured(draft.clone());
        assert_eq!(structured.draft().title, "Title");

        let with_image = BlogPayload::WithImage {
            draft,
            image: ImageUpload::new("a.png", "image/png", vec![]),
        };
        assert_eq!(with_image.draft().title, "Title");
    }
}
