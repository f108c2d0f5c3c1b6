use crate::error::InternalError;
use ace_types::ids;
use std::fmt;
use std::str::FromStr;

/// Policy-set combination strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Any applicable DENY wins over any applicable ALLOW.
    #[default]
    DenyOverrides,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::DenyOverrides => ids::STRATEGY_DENY_OVERRIDES,
        }
    }
}

impl FromStr for Strategy {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ids::STRATEGY_DENY_OVERRIDES => Ok(Strategy::DenyOverrides),
            other => Err(InternalError::UnsupportedStrategy {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluationConfig {
    pub strategy: Strategy,
    /// Compute per-policy decisions on the rayon pool. Winner selection is unaffected.
    pub parallel: bool,
}
