//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Audit identifiers
pub const FIELD_SLUG: &str = "slug";
pub const FIELD_ACTION: &str = "action";
pub const FIELD_DOC_ID: &str = "doc_id";
pub const FIELD_PATH: &str = "path";
pub const FIELD_POLICY: &str = "policy";

// Collection sizes
pub const FIELD_REDACT_LEN: &str = "redact_len";
pub const FIELD_IGNORE_LEN: &str = "ignore_len";
pub const FIELD_RELATIONSHIP_LEN: &str = "relationship_len";
pub const FIELD_CHANGED_LEN: &str = "changed_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_PATH: &str = "err_path";
pub const FIELD_ERR_SLUG: &str = "err_slug";
pub const FIELD_ERR_REQUEST_ID: &str = "err_request_id";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
/// Debug event: a redact/ignore policy decided a path during a diff
pub const EVENT_POLICY: &str = "policy";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_SLUG.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
        assert_ne!(EVENT_POLICY, EVENT_START);
        assert_ne!(EVENT_POLICY, EVENT_END);
    }
}
