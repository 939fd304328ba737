//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_PASS_ID: &str = "pass_id";

// Cursor position
pub const FIELD_SIDE: &str = "side";
pub const FIELD_POSITION: &str = "position";

// Collection sizes
pub const FIELD_LEN: &str = "len";
pub const FIELD_LEFT_ONLY: &str = "left_only";
pub const FIELD_RIGHT_ONLY: &str = "right_only";
pub const FIELD_BOTH: &str = "both";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_MESSAGE: &str = "err.message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_ORDER: &str = "order";
pub const OP_CHECK_SORTED: &str = "check_sorted";
pub const OP_GROUP: &str = "group_by_key";
pub const OP_FULL_JOIN: &str = "full_join";
pub const OP_LENGTH: &str = "length";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_op_names_are_distinct() {
        let ops = [OP_ORDER, OP_CHECK_SORTED, OP_GROUP, OP_FULL_JOIN, OP_LENGTH];
        for (i, a) in ops.iter().enumerate() {
            for b in &ops[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
