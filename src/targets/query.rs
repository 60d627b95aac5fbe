//! # RCSB Query Builder Module
//!
//! ## Purpose
//! Builds the structured boolean search query sent to the RCSB PDB entry-search
//! API, and defines the typed response shapes parsed from it.
//!
//! ## Input/Output Specification
//! - **Input**: Free-text condition/disease term
//! - **Output**: JSON query payload (group of OR'd terminal clauses), typed
//!   response with the `result_set` of entry identifiers
//!
//! ## Query Shape
//! A single group node with `logical_operator: "or"` over three terminal
//! clauses, each testing one attribute against the term with the
//! `contains_word` operator:
//! - `rcsb_entry_container_identifiers.rcsb_id`
//! - `struct_keywords.pdbx_keywords`
//! - `struct.title`
//!
//! The return type is always `"entry"`. Queries are immutable once built; one
//! instance per query term.

use serde::{Deserialize, Serialize};

/// Attributes matched against the query term, one per terminal clause
const SEARCH_ATTRIBUTES: [&str; 3] = [
    "rcsb_entry_container_identifiers.rcsb_id",
    "struct_keywords.pdbx_keywords",
    "struct.title",
];

/// Match operator applied to every clause
const CONTAINS_WORD: &str = "contains_word";

/// Structured search query for the RCSB PDB entry-search API
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    /// Boolean group over the terminal clauses
    pub query: GroupNode,
    /// Result granularity; always `"entry"`
    pub return_type: String,
}

/// Boolean group node OR-ing the terminal clauses
#[derive(Debug, Clone, Serialize)]
pub struct GroupNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub nodes: Vec<TerminalNode>,
    pub logical_operator: String,
}

/// A single attribute-match clause
#[derive(Debug, Clone, Serialize)]
pub struct TerminalNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub service: String,
    pub parameters: TerminalParameters,
}

/// Attribute, operator, and value for a terminal clause
#[derive(Debug, Clone, Serialize)]
pub struct TerminalParameters {
    pub attribute: String,
    pub operator: String,
    pub value: String,
}

impl SearchQuery {
    /// Build the three-clause OR query for a free-text term.
    ///
    /// The term is passed through verbatim into each clause; no length or
    /// character validation is applied.
    pub fn for_term(term: &str) -> Self {
        let nodes = SEARCH_ATTRIBUTES
            .iter()
            .map(|attribute| TerminalNode {
                node_type: "terminal".to_string(),
                service: "text".to_string(),
                parameters: TerminalParameters {
                    attribute: attribute.to_string(),
                    operator: CONTAINS_WORD.to_string(),
                    value: term.to_string(),
                },
            })
            .collect();

        Self {
            query: GroupNode {
                node_type: "group".to_string(),
                nodes,
                logical_operator: "or".to_string(),
            },
            return_type: "entry".to_string(),
        }
    }
}

/// Parsed response from the RCSB entry-search API.
///
/// Only the fields this service consumes are modeled; unknown fields are
/// ignored. A response without `result_set` is well-formed JSON but carries
/// no usable results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RcsbSearchResponse {
    /// Ordered sequence of matching entries, if present
    #[serde(default)]
    pub result_set: Option<Vec<RcsbHit>>,
}

/// A single entry in the result set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RcsbHit {
    /// Opaque entry identifier
    pub rcsb_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_structure() {
        let query = SearchQuery::for_term("diabetes");
        let json = serde_json::to_value(&query).unwrap();

        assert_eq!(json["return_type"], "entry");
        assert_eq!(json["query"]["type"], "group");
        assert_eq!(json["query"]["logical_operator"], "or");

        let nodes = json["query"]["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        for node in nodes {
            assert_eq!(node["type"], "terminal");
            assert_eq!(node["service"], "text");
            assert_eq!(node["parameters"]["operator"], "contains_word");
            assert_eq!(node["parameters"]["value"], "diabetes");
        }
        assert_eq!(
            nodes[0]["parameters"]["attribute"],
            "rcsb_entry_container_identifiers.rcsb_id"
        );
        assert_eq!(nodes[2]["parameters"]["attribute"], "struct.title");
    }

    #[test]
    fn test_term_passed_verbatim() {
        let query = SearchQuery::for_term("type 2 diabetes");
        assert_eq!(query.query.nodes[1].parameters.value, "type 2 diabetes");
    }

    #[test]
    fn test_response_without_result_set_parses() {
        let response: RcsbSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.result_set.is_none());
    }

    #[test]
    fn test_response_preserves_order() {
        let response: RcsbSearchResponse = serde_json::from_str(
            r#"{"result_set": [{"rcsb_id": "1ABC"}, {"rcsb_id": "2DEF"}]}"#,
        )
        .unwrap();
        let ids: Vec<String> = response
            .result_set
            .unwrap()
            .into_iter()
            .map(|hit| hit.rcsb_id)
            .collect();
        assert_eq!(ids, vec!["1ABC", "2DEF"]);
    }
}
