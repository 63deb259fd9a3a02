use serde::{Deserialize, Serialize};

/// Review rule source. `None` uses the bundled rule set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub path: Option<String>,
}
