use serde::{Deserialize, Serialize};

fn default_max_rows() -> usize {
    50
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UiConfig {
    /// Rows shown in the result list
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}
