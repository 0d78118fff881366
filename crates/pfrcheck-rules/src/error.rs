use pfrcheck_types::RuleIdError;

/// A rule file that cannot be accepted as a rule set.
///
/// `origin` names the source (usually a file path); `index` is the 0-based record position.
#[derive(Debug, thiserror::Error)]
pub enum MalformedRuleError {
    #[error("{origin}: invalid YAML: {message}")]
    Yaml { origin: String, message: String },

    #[error("{origin}: expected a sequence of rule records at the top level")]
    NotASequence { origin: String },

    #[error("{origin}: record #{index} is not a mapping")]
    NotAMapping { origin: String, index: usize },

    #[error("{origin}: record #{index} is missing required key `{key}`")]
    MissingKey {
        origin: String,
        index: usize,
        key: &'static str,
    },

    #[error("{origin}: record #{index}: key `{key}` must be a string")]
    NotAString {
        origin: String,
        index: usize,
        key: String,
    },

    #[error("{origin}: record #{index}: unknown key `{key}`")]
    UnknownKey {
        origin: String,
        index: usize,
        key: String,
    },

    #[error("{origin}: record #{index}: invalid req_id: {reason}")]
    InvalidId {
        origin: String,
        index: usize,
        reason: RuleIdError,
    },

    #[error("{origin}: record #{index}: duplicate req_id `{id}` (first declared in {first_origin})")]
    DuplicateId {
        origin: String,
        index: usize,
        id: String,
        first_origin: String,
    },
}
