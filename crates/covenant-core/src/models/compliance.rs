use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const PRESENT_SUFFIX: &str = " present";
const MISSING_PREFIX: &str = "missing ";

/// Outcome of one required compliance check.
///
/// Serializes as `"<name> present"` or `"missing <name>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ComplianceFinding {
    Present(String),
    Missing(String),
}

impl ComplianceFinding {
    pub fn present(name: impl Into<String>) -> Self {
        Self::Present(name.into())
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing(name.into())
    }

    /// Whether this finding is a compliance gap.
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    pub fn rule_name(&self) -> &str {
        match self {
            Self::Present(name) | Self::Missing(name) => name,
        }
    }
}

impl fmt::Display for ComplianceFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(name) => write!(f, "{name}{PRESENT_SUFFIX}"),
            Self::Missing(name) => write!(f, "{MISSING_PREFIX}{name}"),
        }
    }
}

impl FromStr for ComplianceFinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(MISSING_PREFIX) {
            return Ok(Self::Missing(name.to_string()));
        }
        if let Some(name) = s.strip_suffix(PRESENT_SUFFIX) {
            return Ok(Self::Present(name.to_string()));
        }
        Err(format!("not a compliance finding: '{s}'"))
    }
}

impl From<ComplianceFinding> for String {
    fn from(finding: ComplianceFinding) -> Self {
        finding.to_string()
    }
}

impl TryFrom<String> for ComplianceFinding {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
