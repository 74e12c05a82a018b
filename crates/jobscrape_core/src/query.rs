use serde::{Deserialize, Serialize};

/// Search handed to the scrape engine for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub text: String,
    pub locations: Vec<String>,
    /// Only keep postings that expose an external apply link.
    pub apply_link_required: bool,
    pub skip_promoted: bool,
    pub result_limit: u32,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            text: "data science".to_string(),
            locations: vec!["Ahmedabad".to_string()],
            apply_link_required: true,
            skip_promoted: true,
            result_limit: 100,
        }
    }
}
