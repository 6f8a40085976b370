use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Database {
    /// Zotero
    Zotero,
    /// Juris-M
    JurisM,
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Database::Zotero => write!(f, "Zotero"),
            Database::JurisM => write!(f, "Juris-M"),
        }
    }
}

/// Fixed local connector port for the selected database.
pub fn get_port(database: Database) -> &'static str {
    match database {
        Database::Zotero => "23119",
        Database::JurisM => "24119",
    }
}

/// Base URL of the local connector endpoint.
pub fn base_url(database: Database) -> String {
    format!("http://127.0.0.1:{}", get_port(database))
}

/// A library item as returned by the connector API.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub key: String,
    pub data: ItemData,
}

// Annotation fields are only present on annotation children, so everything
// defaults to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemData {
    pub item_type: String,
    pub title: String,
    pub annotation_text: String,
    pub annotation_comment: String,
    pub annotation_color: String,
}

impl Item {
    /// Whether this child item is a PDF highlight annotation.
    pub fn is_annotation(&self) -> bool {
        self.data.item_type == "annotation"
    }
}

// Re-export the connector API module
pub mod api;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_for_zotero() {
        assert_eq!(get_port(Database::Zotero), "23119");
    }

    #[test]
    fn port_for_juris_m() {
        assert_eq!(get_port(Database::JurisM), "24119");
    }

    #[test]
    fn base_url_uses_port() {
        assert_eq!(base_url(Database::Zotero), "http://127.0.0.1:23119");
        assert_eq!(base_url(Database::JurisM), "http://127.0.0.1:24119");
    }

    #[test]
    fn parses_item_with_annotation_fields() {
        let json = r##"{
            "key": "ABCD1234",
            "data": {
                "itemType": "annotation",
                "annotationText": "highlighted passage",
                "annotationComment": "check this",
                "annotationColor": "#ffd400"
            }
        }"##;

        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.is_annotation());
        assert_eq!(item.data.annotation_text, "highlighted passage");
        assert_eq!(item.data.annotation_color, "#ffd400");
        assert_eq!(item.data.title, "");
    }

    #[test]
    fn parses_item_without_annotation_fields() {
        let json = r#"{
            "key": "XYZ99999",
            "data": {
                "itemType": "journalArticle",
                "title": "A Study of Things"
            }
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert!(!item.is_annotation());
        assert_eq!(item.data.title, "A Study of Things");
        assert_eq!(item.data.annotation_color, "");
    }
}
