//! Stable identifiers for the tool, rule file keys, and outcome codes.

pub const TOOL_NAME: &str = "pfrcheck";

// Rule file keys
pub const KEY_REQ_ID: &str = "req_id";
pub const KEY_DESC: &str = "desc";
pub const KEY_MSG: &str = "msg";
pub const KEY_COND: &str = "cond";

pub const RULE_KEYS: [&str; 4] = [KEY_REQ_ID, KEY_DESC, KEY_MSG, KEY_COND];

/// Placeholder condition used by rule authors for "not yet enforced".
pub const DISABLED_CONDITION: &str = "0 != 0";

// Codes: violation records
pub const CODE_RULE_VIOLATED: &str = "rule_violated";

// Codes: errored outcomes
pub const CODE_CONDITION_SYNTAX: &str = "condition_syntax";
pub const CODE_CONDITION_TYPE: &str = "condition_type";
