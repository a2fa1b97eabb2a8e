//! Stored payload format
//!
//! All saved forms live under one storage key as a JSON array of form
//! schemas, with `createdAt` as an ISO-8601 string. This is the same payload
//! the browser front end keeps in local storage.

use crate::RepositoryResult;
use formbuilder_core::FormSchema;

/// Serialize saved forms into the stored payload
pub fn encode_forms(forms: &[FormSchema]) -> RepositoryResult<String> {
    Ok(serde_json::to_string(forms)?)
}

/// Parse a stored payload. A blank payload is an empty list.
pub fn decode_forms(payload: &str) -> RepositoryResult<Vec<FormSchema>> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepositoryError;
    use formbuilder_core::{FieldType, FormField};

    #[test]
    fn test_blank_payload() {
        assert!(decode_forms("").unwrap().is_empty());
        assert!(decode_forms("  \n").unwrap().is_empty());
        assert!(decode_forms("[]").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_payload() {
        let err = decode_forms("{not json").unwrap_err();
        assert!(matches!(err, RepositoryError::Json(_)));

        let err = decode_forms(r#"{"id": "1"}"#).unwrap_err();
        assert!(matches!(err, RepositoryError::Json(_)));
    }

    #[test]
    fn test_payload_is_json_array() {
        let forms = vec![FormSchema::new(
            "1",
            "Contact",
            vec![FormField::new("msg", FieldType::Textarea, "Message")],
        )];
        let payload = encode_forms(&forms).unwrap();
        assert!(payload.starts_with('['));
        assert!(payload.contains("\"createdAt\""));
        assert_eq!(decode_forms(&payload).unwrap(), forms);
    }
}
