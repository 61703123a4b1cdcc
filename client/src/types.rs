//! FILENAME: client/src/types.rs
//! PURPOSE: Wire types for the backend endpoints.
//! CONTEXT: Shapes follow the backend JSON verbatim (camelCase and p_-prefixed
//! keys preserved through serde renames). Option lists feed the cascading
//! filter selectors; `TreeQuery` carries everything the tree-data endpoint
//! needs; `IndexAttributes` is the indicator "passport" card.

use serde::{Deserialize, Serialize};

use model::RowId;

/// A statistical metric offered by `/get_indicators`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: u64,
    pub name: String,
}

/// A reporting interval offered by `/get_periods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: u64,
    pub name: String,
}

/// A breakdown dimension offered by `/get_segments`. Carries the term and
/// dictionary id lists the tree-data endpoint expects, plus the candidate
/// main classifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u64,

    #[serde(default)]
    pub names: String,

    /// Comma-separated classification term ids (e.g. "247783,741917").
    #[serde(rename = "termIds")]
    pub term_ids: String,

    /// Comma-separated dictionary ids (e.g. "67,749").
    #[serde(rename = "dicId")]
    pub dic_id: String,

    /// Index of this classification combination.
    pub idx: i64,

    /// Candidate main classifications for the final cascade stage.
    #[serde(default)]
    pub mas_names: Vec<MainClassification>,
}

/// One value group of a classification; its id becomes `p_term_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainClassification {
    pub id: u64,
    pub name: String,
}

/// One title/value line of the indicator passport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportEntry {
    pub title: String,
    pub value: String,
}

/// Indicator metadata from `/get_index_attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAttributes {
    #[serde(rename = "measureName", default)]
    pub measure_name: String,

    #[serde(default)]
    pub passport: Vec<PassportEntry>,
}

/// Parameters of one tree-data query. Shared by the root fetch and every
/// child fetch (which additionally scopes by parent id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeQuery {
    pub measure_id: u32,
    pub index_id: u64,
    pub period_id: u64,
    pub terms: String,
    pub term_id: u64,
    pub dic_ids: String,
    pub idx: i64,
}

impl TreeQuery {
    /// Query-string pairs for `/new_get_index_tree_data`. `parent` present
    /// requests one level of children; absent requests the root rows.
    pub fn query_pairs(&self, parent: Option<RowId>) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("p_measure_id", self.measure_id.to_string()),
            ("p_index_id", self.index_id.to_string()),
            ("p_period_id", self.period_id.to_string()),
            ("p_terms", self.terms.clone()),
            ("p_term_id", self.term_id.to_string()),
            ("p_dicIds", self.dic_ids.clone()),
            ("idx", self.idx.to_string()),
        ];
        if let Some(parent_id) = parent {
            pairs.push(("p_parent_id", parent_id.to_string()));
        }
        pairs
    }
}

/// Body of `POST /save-data`: one persisted filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionBody {
    pub p_index_id: u64,
    pub p_period_id: u64,
    pub p_terms: String,
    pub p_term_id: u64,
    #[serde(rename = "p_dicIds")]
    pub p_dic_ids: String,
    pub idx: i64,
}

impl SelectionBody {
    pub fn from_query(query: &TreeQuery) -> Self {
        SelectionBody {
            p_index_id: query.index_id,
            p_period_id: query.period_id,
            p_terms: query.terms.clone(),
            p_term_id: query.term_id,
            p_dic_ids: query.dic_ids.clone(),
            idx: query.idx,
        }
    }
}

/// One item of `GET /get-data`: a previously saved selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSelection {
    pub id: u64,

    #[serde(flatten)]
    pub body: SelectionBody,
}

impl SavedSelection {
    /// Rebuilds the tree query this selection was saved from.
    pub fn to_query(&self, measure_id: u32) -> TreeQuery {
        TreeQuery {
            measure_id,
            index_id: self.body.p_index_id,
            period_id: self.body.p_period_id,
            terms: self.body.p_terms.clone(),
            term_id: self.body.p_term_id,
            dic_ids: self.body.p_dic_ids.clone(),
            idx: self.body.idx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_deserializes_backend_keys() {
        let json = r#"{
            "id": 5,
            "names": "По регионам",
            "termIds": "247783,741917",
            "dicId": "67,749",
            "idx": 0,
            "mas_names": [{"id": 247783, "name": "Регион"}]
        }"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.term_ids, "247783,741917");
        assert_eq!(segment.dic_id, "67,749");
        assert_eq!(segment.mas_names[0].id, 247783);
    }

    #[test]
    fn tree_query_pairs_include_parent_only_when_present() {
        let query = TreeQuery {
            measure_id: 1,
            index_id: 18789901,
            period_id: 8,
            terms: "247783,741917".to_string(),
            term_id: 247783,
            dic_ids: "67,749".to_string(),
            idx: 0,
        };

        let root = query.query_pairs(None);
        assert_eq!(root.len(), 7);
        assert!(root.iter().all(|(k, _)| *k != "p_parent_id"));

        let children = query.query_pairs(Some(42));
        assert_eq!(
            children.last(),
            Some(&("p_parent_id", "42".to_string()))
        );
    }

    #[test]
    fn saved_selection_round_trips_to_query() {
        let json = r#"{
            "id": 9,
            "p_index_id": 18789901,
            "p_period_id": 8,
            "p_terms": "247783",
            "p_term_id": 247783,
            "p_dicIds": "67",
            "idx": 0
        }"#;
        let saved: SavedSelection = serde_json::from_str(json).unwrap();
        let query = saved.to_query(1);
        assert_eq!(query.index_id, 18789901);
        assert_eq!(query.dic_ids, "67");
    }

    #[test]
    fn index_attributes_tolerate_missing_passport() {
        let attrs: IndexAttributes =
            serde_json::from_str(r#"{"measureName": "человек"}"#).unwrap();
        assert_eq!(attrs.measure_name, "человек");
        assert!(attrs.passport.is_empty());
    }
}
