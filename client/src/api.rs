//! FILENAME: client/src/api.rs
//! PURPOSE: HTTP access to the statistics backend.
//! CONTEXT: One thin method per endpoint. All requests are plain
//! request/response fetches; no retry or timeout policy beyond reqwest's
//! defaults. Non-2xx statuses become `ClientError::UnexpectedStatus`; the
//! caller decides whether that is logged or surfaced (only the save flow
//! surfaces it to the user).

use log::debug;
use serde::de::DeserializeOwned;

use model::{RowId, TreeRow};

use crate::error::ClientError;
use crate::types::{
    IndexAttributes, Indicator, Period, SavedSelection, Segment, SelectionBody, TreeQuery,
};

/// Client for the statistics backend.
#[derive(Debug, Clone)]
pub struct StatClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        StatClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status,
                endpoint: path.to_string(),
            });
        }
        Ok(response.json().await?)
    }

    /// Root rows (`parent` absent) or one level of children (`parent`
    /// present) of the drill-down tree.
    pub async fn tree_rows(
        &self,
        query: &TreeQuery,
        parent: Option<RowId>,
    ) -> Result<Vec<TreeRow>, ClientError> {
        self.get_json("new_get_index_tree_data", &query.query_pairs(parent))
            .await
    }

    /// All available indicators.
    pub async fn indicators(&self) -> Result<Vec<Indicator>, ClientError> {
        self.get_json("get_indicators", &[]).await
    }

    /// Reporting periods available for an indicator.
    pub async fn periods(&self, index_id: u64) -> Result<Vec<Period>, ClientError> {
        self.get_json("get_periods", &[("indexId", index_id.to_string())])
            .await
    }

    /// Classification segments available for an indicator and period.
    pub async fn segments(
        &self,
        index_id: u64,
        period_id: u64,
    ) -> Result<Vec<Segment>, ClientError> {
        self.get_json(
            "get_segments",
            &[
                ("indexId", index_id.to_string()),
                ("periodId", period_id.to_string()),
            ],
        )
        .await
    }

    /// The indicator passport (name, hierarchy, unit of measure).
    pub async fn index_attributes(
        &self,
        index_id: u64,
        period_id: u64,
    ) -> Result<IndexAttributes, ClientError> {
        self.get_json(
            "get_index_attributes",
            &[
                ("indexId", index_id.to_string()),
                ("periodId", period_id.to_string()),
            ],
        )
        .await
    }

    /// Persists a filter selection. Unlike the read endpoints, a non-2xx
    /// answer here is surfaced to the user.
    pub async fn save_selection(&self, body: &SelectionBody) -> Result<(), ClientError> {
        let url = self.url("save-data");
        debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status,
                endpoint: "save-data".to_string(),
            });
        }
        Ok(())
    }

    /// Previously saved selections.
    pub async fn saved_selections(&self) -> Result<Vec<SavedSelection>, ClientError> {
        self.get_json("get-data", &[]).await
    }

    /// Removes a saved selection.
    pub async fn delete_selection(&self, id: u64) -> Result<(), ClientError> {
        let url = self.url(&format!("delete-data/{}", id));
        debug!("DELETE {}", url);

        let response = self.http.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status,
                endpoint: "delete-data".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = StatClient::new("http://localhost:8080/");
        assert_eq!(
            client.url("get_indicators"),
            "http://localhost:8080/get_indicators"
        );
    }

    #[test]
    fn wire_rows_parse_into_tree_rows() {
        let json = r#"[
            {"id": 1, "text": "Region A", "leaf": "false", "2020 г.": 100},
            {"id": 2, "text": "Region B", "leaf": "true", "2020 г.": "55,5"}
        ]"#;
        let rows: Vec<TreeRow> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].leaf);
        assert_eq!(rows[1].value("2020 г."), Some(55.5));
    }
}
