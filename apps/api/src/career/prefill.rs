use std::sync::LazyLock;

use bytes::Bytes;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").expect("valid email regex"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s().-]{7,}").expect("valid phone regex"));
static ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Engineer|Developer|Designer|Manager|Analyst|Scientist)")
        .expect("valid role regex")
});

/// Candidate fields guessed from an uploaded resume. Missing guesses are
/// omitted so the client keeps whatever it already has.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
}

fn is_pdf(file_name: Option<&str>, content_type: Option<&str>, bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
        || content_type == Some("application/pdf")
        || file_name.is_some_and(|n| n.to_ascii_lowercase().ends_with(".pdf"))
}

/// Plain text of an upload. PDFs go through `pdf-extract` on the blocking
/// pool, anything else is read as UTF-8 with invalid sequences replaced.
pub async fn upload_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: Bytes,
) -> Result<String, AppError> {
    if !is_pdf(file_name, content_type, &bytes) {
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            warn!("PDF extraction task failed: {e}");
            AppError::Validation("Could not read text from the uploaded PDF".to_string())
        })?;
    extracted.map_err(|e| {
        warn!("PDF extraction failed: {e}");
        AppError::Validation("Could not read text from the uploaded PDF".to_string())
    })
}

pub fn prefill_from_text(text: &str) -> Prefill {
    let first_match = |re: &Regex| re.find(text).map(|m| m.as_str().trim().to_string());
    Prefill {
        name: text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string),
        email: first_match(&EMAIL),
        phone: first_match(&PHONE),
        current_role: first_match(&ROLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefill_from_plain_resume() {
        let text = "\n  Jane Doe  \nSenior software engineer\njane.doe+cv@mail.example.com | +1 (555) 010-0199\n";
        let prefill = prefill_from_text(text);
        assert_eq!(prefill.name.as_deref(), Some("Jane Doe"));
        assert_eq!(prefill.email.as_deref(), Some("jane.doe+cv@mail.example.com"));
        assert_eq!(prefill.phone.as_deref(), Some("+1 (555) 010-0199"));
        assert_eq!(prefill.current_role.as_deref(), Some("engineer"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let prefill = prefill_from_text("   \n\n");
        assert_eq!(prefill, Prefill::default());
        let json = serde_json::to_value(&prefill).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_text_upload_is_read_as_utf8() {
        let bytes = Bytes::from("Zoë Analyst".as_bytes());
        let text = upload_text(Some("cv.txt"), Some("text/plain"), bytes).await.unwrap();
        assert_eq!(text, "Zoë Analyst");
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_a_validation_error() {
        let bytes = Bytes::from_static(b"%PDF-1.4 truncated");
        let err = upload_text(Some("cv.pdf"), None, bytes).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
