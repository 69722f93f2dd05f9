//! SerpAPI Google Scholar response shapes.
//!
//! Only the fields the normalizer reads are modelled; everything else is ignored.

use serde::Deserialize;

use super::de::{lenient_number, lenient_seq, null_default, string_or_number};

/// Response of the `google_scholar` engine (search, `cites`, `cluster`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarResponse {
    /// Result list.
    #[serde(default, deserialize_with = "null_default")]
    pub organic_results: Vec<OrganicResult>,
}

/// One Google Scholar result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub snippet: Option<String>,

    /// Result type (e.g. "Html", "Pdf", "Book").
    #[serde(default, rename = "type")]
    pub result_type: Option<String>,

    #[serde(default)]
    pub publication_info: Option<PublicationInfo>,

    #[serde(default)]
    pub inline_links: Option<InlineLinks>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub resources: Vec<Resource>,
}

/// Publication line under a result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicationInfo {
    /// "A Vaswani, N Shazeer - Advances in neural ..., 2017 - proceedings.neurips.cc"
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub authors: Vec<AuthorRef>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
}

/// Linked author in a publication line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub author_id: Option<String>,
}

/// "Cited by", "Related articles" and "All versions" links.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineLinks {
    #[serde(default)]
    pub cited_by: Option<CitedBy>,

    #[serde(default)]
    pub cluster_id: Option<String>,

    #[serde(default)]
    pub versions: Option<VersionsLink>,
}

impl InlineLinks {
    /// Cluster id, taken from the top level or the "All versions" link.
    #[must_use]
    pub fn cluster_id(&self) -> Option<&str> {
        self.cluster_id
            .as_deref()
            .or_else(|| self.versions.as_ref()?.cluster_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CitedBy {
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: Option<u64>,

    #[serde(default)]
    pub cites_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionsLink {
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: Option<u64>,

    #[serde(default)]
    pub cluster_id: Option<String>,
}

/// Side link to a hosted copy (PDF, HTML).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub file_format: Option<String>,

    #[serde(default)]
    pub link: Option<String>,
}

/// Response of the `google_scholar_profiles` engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilesResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub profiles: Vec<Profile>,
}

/// One author profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub author_id: Option<String>,

    #[serde(default)]
    pub affiliations: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub cited_by: Option<ProfileCitedBy>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub interests: Vec<Interest>,
}

/// Profile citation count: a bare integer, or a table with an `all` column.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileCitedBy {
    Count(u64),
    Text(String),
    Table {
        #[serde(default, deserialize_with = "lenient_number")]
        all: Option<u64>,
    },
    Other(serde_json::Value),
}

impl ProfileCitedBy {
    /// Total citations, if the provider sent something countable.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Text(s) => s.trim().replace(',', "").parse().ok(),
            Self::Table { all } => *all,
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Interest {
    #[serde(default)]
    pub title: Option<String>,
}
