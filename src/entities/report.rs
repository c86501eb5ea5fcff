//! Report catalogue entries shown on the reports page

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub display_order: i32,
}

impl ReportDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, display_order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: None,
            display_order,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
