use pfrcheck_expr::{Condition, ConditionSyntaxError, is_disabled_marker};
use pfrcheck_types::Rule;

/// How a rule participates in evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleState {
    Enabled(Condition),
    /// The rule file marks this rule as not yet enforced (`0 != 0`).
    Disabled,
    /// The condition does not parse. Isolated to this rule.
    Invalid(ConditionSyntaxError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledRule {
    pub rule: Rule,
    pub state: RuleState,
}

impl CompiledRule {
    pub fn compile(rule: Rule) -> Self {
        let state = if is_disabled_marker(&rule.condition) {
            RuleState::Disabled
        } else {
            match Condition::compile(&rule.condition) {
                Ok(cond) => RuleState::Enabled(cond),
                Err(err) => {
                    tracing::warn!(req_id = %rule.id, error = %err, "rule condition does not compile");
                    RuleState::Invalid(err)
                }
            }
        };
        Self { rule, state }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, RuleState::Disabled)
    }
}
