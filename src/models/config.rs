//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_page_size() -> usize {
    20
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the command-line front end.
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_defaults_when_missing() {
        let config: AppConfig = serde_json::from_str(r#"{"database_url":"roster.db"}"#).unwrap();
        assert_eq!(config.database_url, "roster.db");
        assert_eq!(config.default_page_size, 20);
    }
}
