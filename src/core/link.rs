use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description";

/// Source platform a link was classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    YouTube,
    TikTok,
    Instagram,
    Twitter,
    Vimeo,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::YouTube => "YouTube",
            Category::TikTok => "TikTok",
            Category::Instagram => "Instagram",
            Category::Twitter => "Twitter",
            Category::Vimeo => "Vimeo",
            Category::Other => "Other",
        }
    }

    /// Unknown names map to `Other` so a single odd record never poisons a load.
    pub fn from_name(name: &str) -> Self {
        match name {
            "YouTube" => Category::YouTube,
            "TikTok" => Category::TikTok,
            "Instagram" => Category::Instagram,
            "Twitter" => Category::Twitter,
            "Vimeo" => Category::Vimeo,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Category::from_name(&name))
    }
}

/// Metadata returned by the extraction service, already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMetadata {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl Default for LinkMetadata {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            description: NO_DESCRIPTION.to_string(),
            image: None,
        }
    }
}

/// One bookmarked URL plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: u64,
    pub url: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub embed: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LinkRecord {
    /// Builds a record, deriving category and embed from `url`.
    pub fn new(id: u64, url: &str, metadata: LinkMetadata) -> Self {
        Self {
            id,
            url: url.to_string(),
            category: crate::core::classify(url),
            title: metadata.title,
            description: metadata.description,
            image: metadata.image,
            embed: crate::core::resolve_embed(url),
            tags: Vec::new(),
        }
    }

    /// Lowercased text the search box matches against.
    pub fn search_text(&self) -> String {
        format!(
            "{}{}{}{}",
            self.title, self.description, self.url, self.category
        )
        .to_lowercase()
    }

    pub fn matches(&self, query: &str) -> bool {
        self.search_text().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_as_display_name() {
        let json = serde_json::to_string(&Category::YouTube).unwrap();
        assert_eq!(json, "\"YouTube\"");
        let parsed: Category = serde_json::from_str("\"Vimeo\"").unwrap();
        assert_eq!(parsed, Category::Vimeo);
    }

    #[test]
    fn unknown_category_reads_as_other() {
        let parsed: Category = serde_json::from_str("\"Outros\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }

    #[test]
    fn record_without_tags_field_deserializes() {
        let json = r#"{"id":1,"url":"https://example.com","category":"Other",
            "title":"t","description":"d","image":null,"embed":null}"#;
        let record: LinkRecord = serde_json::from_str(json).unwrap();
        assert!(record.tags.is_empty());
        assert_eq!(record.image, None);
    }

    #[test]
    fn new_record_derives_category_and_embed() {
        let record = LinkRecord::new(
            7,
            "https://vimeo.com/987654",
            LinkMetadata::default(),
        );
        assert_eq!(record.category, Category::Vimeo);
        assert_eq!(
            record.embed.as_deref(),
            Some("https://player.vimeo.com/video/987654")
        );
        assert_eq!(record.title, UNTITLED);
    }

    #[test]
    fn matches_is_case_insensitive_over_category() {
        let record = LinkRecord::new(
            1,
            "https://youtu.be/abc",
            LinkMetadata::default(),
        );
        assert!(record.matches("YOUTUBE"));
        assert!(record.matches(""));
        assert!(!record.matches("vimeo"));
    }
}
