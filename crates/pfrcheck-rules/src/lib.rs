//! Rule store: load rule files, validate records, compile conditions.
//!
//! This crate is IO-free: callers supply rule file contents as strings, tagged with an origin
//! used in error messages.
//!
//! Rule file format (YAML, `#` comments allowed):
//!
//! ```yaml
//! - req_id: "1.5"
//!   desc: Inverse value of DCFG_CC_SOCU must match
//!   msg: DCFG_CC_SOCU_NS_PIN is not inverted DCFG_CC_SOCU_PIN
//!   cond: (CFPA.A & 0x2FF) == 0 and ((CFPA.B & 0x2FF) ^ 0) != 0
//! ```

#![forbid(unsafe_code)]

mod compile;
mod error;
mod store;

pub use compile::{CompiledRule, RuleState};
pub use error::MalformedRuleError;
pub use store::{RuleSet, RuleSource, load, load_many};

use pfrcheck_types::Rule;

/// Serialize rules in the rule file format; `load` of the output yields the same rules.
pub fn to_yaml(rules: &[Rule]) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(rules)
}
