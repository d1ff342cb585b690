// src/forms/search.rs
use serde::{Deserialize, Serialize};

/// Case-insensitive substring match; a blank query matches everything.
pub fn matches_query(haystack: &str, query: Option<&str>) -> bool {
    match query.map(str::trim) {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DriverSearchForm {
    pub username: Option<String>,
}

impl DriverSearchForm {
    pub fn matches(&self, username: &str) -> bool {
        matches_query(username, self.username.as_deref())
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CarSearchForm {
    pub model: Option<String>,
}

impl CarSearchForm {
    pub fn matches(&self, model: &str) -> bool {
        matches_query(model, self.model.as_deref())
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ManufacturerSearchForm {
    pub name: Option<String>,
}

impl ManufacturerSearchForm {
    pub fn matches(&self, name: &str) -> bool {
        matches_query(name, self.name.as_deref())
    }
}
