//! Named entities derived from search results.
//!
//! Entities are not a first-class backend resource: the indexer stores
//! them as ordinary search rows with `metadata.type == "entity"` and a
//! free-text line of the form `"Name (LABEL) - description"`. This
//! module owns the filtering and the text parsing, so the browser view
//! only deals in typed [`Entity`] values.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::search::SearchResult;

/// Metadata `type` value marking an entity row.
pub const ENTITY_RESULT_KIND: &str = "entity";

/// Matches the display name ahead of the `"(LABEL)"` portion.
static ENTITY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?)\s*\(").expect("valid regex"));

/// Link to the knowledge-base page for a linked entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeLink {
    pub wikidata_id: String,
    pub url: String,
}

impl KnowledgeLink {
    fn from_id(wikidata_id: &str) -> Option<Self> {
        if wikidata_id.is_empty() {
            return None;
        }
        Some(Self {
            wikidata_id: wikidata_id.to_string(),
            url: format!("https://www.wikidata.org/wiki/{wikidata_id}"),
        })
    }
}

/// One named entity observed in the video.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    /// Clean display name parsed from the indexed text, or the raw text
    /// when it does not follow the `"Name (LABEL)"` format.
    pub name: String,

    /// Entity label (`"PERSON"`, `"ORG"`, ...), used for filtering.
    pub label: String,

    /// Description text after the `" - "` separator, when present.
    pub description: Option<String>,

    pub link: Option<KnowledgeLink>,
}

impl Entity {
    /// Build an entity from a search row, or `None` when the row is not
    /// an entity row.
    pub fn from_search_result(result: &SearchResult) -> Option<Self> {
        if result.metadata.kind != ENTITY_RESULT_KIND {
            return None;
        }

        let name = ENTITY_NAME_RE
            .captures(&result.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| result.text.clone());

        let description = result
            .text
            .split_once(" - ")
            .map(|(_, rest)| rest.trim().to_string())
            .filter(|rest| !rest.is_empty());

        let label = result
            .metadata
            .entity_type
            .clone()
            .unwrap_or_else(|| "unknown".to_string());

        let link = result
            .metadata
            .wikidata_id
            .as_deref()
            .and_then(KnowledgeLink::from_id);

        Some(Self {
            name,
            label,
            description,
            link,
        })
    }
}

/// Distinct entity labels in first-observed order, for the label filter.
pub fn distinct_labels(entities: &[Entity]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for entity in entities {
        if !labels.iter().any(|l| l == &entity.label) {
            labels.push(entity.label.clone());
        }
    }
    labels
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
