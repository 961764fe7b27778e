//! Tests for edit request parsing and payload normalization

#[cfg(test)]
mod tests {
    use crate::models::{split_payload, EditMode, EditRequest};
    use serde_json::json;

    // ========================================================================
    // Payload splitting
    // ========================================================================

    #[test]
    fn test_empty_payload_is_zero_lines() {
        assert!(split_payload("").is_empty());
    }

    #[test]
    fn test_single_line_payload() {
        assert_eq!(split_payload("z"), vec!["z"]);
    }

    #[test]
    fn test_multi_line_payload() {
        assert_eq!(split_payload("x\ny"), vec!["x", "y"]);
    }

    #[test]
    fn test_trailing_newline_does_not_add_line() {
        assert_eq!(split_payload("x\ny\n"), vec!["x", "y"]);
        assert_eq!(split_payload("x\n\n"), vec!["x", ""]);
    }

    #[test]
    fn test_lone_newline_is_one_empty_line() {
        assert_eq!(split_payload("\n"), vec![""]);
    }

    #[test]
    fn test_crlf_matches_lf() {
        assert_eq!(split_payload("x\r\ny\r\n"), split_payload("x\ny\n"));
        assert_eq!(split_payload("a\r\n\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_embedded_empty_lines_preserved() {
        assert_eq!(split_payload("a\n\nb"), vec!["a", "", "b"]);
    }

    // ========================================================================
    // EditMode
    // ========================================================================

    #[test]
    fn test_edit_mode_from_str() {
        assert_eq!("insert".parse::<EditMode>().unwrap(), EditMode::Insert);
        assert_eq!("replace".parse::<EditMode>().unwrap(), EditMode::Replace);
        assert!("append".parse::<EditMode>().is_err());
    }

    #[test]
    fn test_valid_start_lines() {
        assert_eq!(EditMode::Insert.valid_start_lines(3), 1..=4);
        assert_eq!(EditMode::Replace.valid_start_lines(3), 1..=3);
    }

    // ========================================================================
    // EditRequest deserialization
    // ========================================================================

    #[test]
    fn test_edit_request_from_agent_json() {
        let request: EditRequest = serde_json::from_value(json!({
            "startLine": 2,
            "mode": "insert",
            "lines": "x\ny"
        }))
        .unwrap();

        assert_eq!(request, EditRequest::new(2, EditMode::Insert, "x\ny"));
        assert_eq!(request.payload_lines(), vec!["x", "y"]);
    }

    #[test]
    fn test_edit_request_zero_start_line_parses() {
        let request: EditRequest = serde_json::from_value(json!({
            "startLine": 0,
            "mode": "replace",
            "lines": ""
        }))
        .unwrap();

        assert_eq!(request.start_line, 0);
    }

    #[test]
    fn test_edit_request_rejects_unknown_mode() {
        let result: Result<EditRequest, _> = serde_json::from_value(json!({
            "startLine": 1,
            "mode": "overwrite",
            "lines": "a"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_edit_request_requires_lines() {
        let result: Result<EditRequest, _> = serde_json::from_value(json!({
            "startLine": 1,
            "mode": "replace"
        }));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("lines"));
    }

    #[test]
    fn test_edit_request_accepts_explicit_empty_lines() {
        let request: EditRequest = serde_json::from_value(json!({
            "startLine": 1,
            "mode": "insert",
            "lines": ""
        }))
        .unwrap();

        assert!(request.payload_lines().is_empty());
    }
}
