//! Note payloads exchanged with the flomo webhook

use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;

pub const MEMO_VIEWER_URL: &str = "https://v.flomoapp.com/mine/?memo_id=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRequest {
    pub content: String,
}

impl NoteRequest {
    pub fn new(content: impl Into<String>) -> Result<Self, AppError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(AppError::validation(
                "invalid_content",
                "content is required and must not be empty",
            ));
        }

        Ok(Self { content })
    }
}

/// Decoded webhook reply. Only `memo.slug` marks a note as created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteResponse {
    Created { slug: String },
    Rejected { message: Option<String> },
}

impl NoteResponse {
    pub fn from_body(body: &Value) -> Self {
        let slug = body
            .get("memo")
            .and_then(|memo| memo.get("slug"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|slug| !slug.is_empty());

        match slug {
            Some(slug) => Self::Created {
                slug: slug.to_string(),
            },
            None => Self::Rejected {
                message: body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
        }
    }

    pub fn into_slug(self) -> Result<String, AppError> {
        match self {
            Self::Created { slug } => Ok(slug),
            Self::Rejected { message } => Err(AppError::semantic_rejection(message)),
        }
    }
}

pub fn memo_url(slug: &str) -> String {
    format!("{MEMO_VIEWER_URL}{slug}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_rejects_blank_content() {
        let err = NoteRequest::new("   ").expect_err("blank content must fail");
        assert_eq!(err.code(), "invalid_content");
    }

    #[test]
    fn request_keeps_content_verbatim() {
        let request = NoteRequest::new("  #inbox hello\n").expect("valid content");
        assert_eq!(request.content, "  #inbox hello\n");
        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({ "content": "  #inbox hello\n" })
        );
    }

    #[test]
    fn response_with_slug_is_created() {
        let response = NoteResponse::from_body(&json!({
            "code": 0,
            "message": "已记录",
            "memo": { "slug": "abc123", "content": "<p>hello</p>" }
        }));
        assert_eq!(
            response,
            NoteResponse::Created {
                slug: "abc123".to_string()
            }
        );
    }

    #[test]
    fn response_without_slug_is_rejected_with_message() {
        let response = NoteResponse::from_body(&json!({ "message": "quota exceeded" }));
        assert_eq!(
            response,
            NoteResponse::Rejected {
                message: Some("quota exceeded".to_string())
            }
        );

        let err = response.into_slug().expect_err("rejection must fail");
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn response_with_empty_or_non_string_slug_is_rejected() {
        assert_eq!(
            NoteResponse::from_body(&json!({ "memo": { "slug": "" } })),
            NoteResponse::Rejected { message: None }
        );
        assert_eq!(
            NoteResponse::from_body(&json!({ "memo": { "slug": 42 } })),
            NoteResponse::Rejected { message: None }
        );
        assert_eq!(
            NoteResponse::from_body(&json!([])),
            NoteResponse::Rejected { message: None }
        );
    }

    #[test]
    fn memo_url_embeds_slug() {
        assert_eq!(
            memo_url("abc123"),
            "https://v.flomoapp.com/mine/?memo_id=abc123"
        );
    }
}
