//! CORE v3 response shapes.

use serde::Deserialize;

use super::de::{lenient_number, lenient_seq, null_default, string_or_number};

/// Response of `GET /search/works/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchWorksResponse {
    #[serde(default)]
    pub total_hits: Option<u64>,

    #[serde(default, deserialize_with = "null_default")]
    pub results: Vec<Work>,
}

/// A CORE research output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    /// CORE id (numeric in practice).
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub r#abstract: Option<String>,

    #[serde(default)]
    pub download_url: Option<String>,

    #[serde(default)]
    pub full_text: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub year_published: Option<i32>,

    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub authors: Vec<CoreAuthor>,
}

/// Author entry; CORE returns objects, older records plain strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CoreAuthor {
    Plain(String),
    Named {
        #[serde(default)]
        name: Option<String>,
    },
    /// Anything else (`null`, numbers, malformed objects); has no name.
    Other(serde_json::Value),
}

impl CoreAuthor {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(name) => name,
            Self::Named { name } => name.as_deref().unwrap_or(""),
            Self::Other(_) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_work_parses_camel_case_fields() {
        let work: Work = serde_json::from_value(json!({
            "id": 123_456,
            "title": "Open Paper",
            "downloadUrl": "https://core.ac.uk/download/123456.pdf",
            "fullText": "Body",
            "yearPublished": 2020,
            "authors": [{"name": "Ada Lovelace"}, "Charles Babbage"]
        }))
        .unwrap();

        assert_eq!(work.id.as_deref(), Some("123456"));
        assert_eq!(work.year_published, Some(2020));
        assert_eq!(work.authors[0].name(), "Ada Lovelace");
        assert_eq!(work.authors[1].name(), "Charles Babbage");
    }

    #[test]
    fn test_work_tolerates_odd_author_and_year_shapes() {
        let work: Work = serde_json::from_value(json!({
            "title": "Odd Record",
            "yearPublished": "2019",
            "authors": [null, {"name": 7}, "Grace Hopper"]
        }))
        .unwrap();

        assert_eq!(work.year_published, Some(2019));
        assert_eq!(work.authors.len(), 3);
        assert_eq!(work.authors[0].name(), "");
        assert_eq!(work.authors[1].name(), "");
        assert_eq!(work.authors[2].name(), "Grace Hopper");
    }
}
