use std::fmt;

use crate::model::TreeRoot;

/// Error from a failed API call. Carries the server's response body
/// when one was available, otherwise the transport error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn transport(err: reqwest::Error) -> Self {
        Self {
            message: format!("{err}"),
        }
    }
}

/// Client for the remote tree-storage API. Every call is an HTTP POST
/// with query parameters and no request body.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the tree: the root node id plus its immediate children.
    pub async fn get_tree(&self, tree_name: &str) -> Result<TreeRoot, ApiError> {
        let response = self
            .post("api.user.tree.get", &[("treeName", tree_name.to_string())])
            .await?;
        response.json().await.map_err(ApiError::transport)
    }

    /// Create a node under the given parent.
    pub async fn create_node(
        &self,
        tree_name: &str,
        parent_node_id: i64,
        node_name: &str,
    ) -> Result<(), ApiError> {
        self.post(
            "api.user.tree.node.create",
            &[
                ("treeName", tree_name.to_string()),
                ("parentNodeId", parent_node_id.to_string()),
                ("nodeName", node_name.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Rename an existing node.
    pub async fn rename_node(
        &self,
        tree_name: &str,
        node_id: i64,
        new_node_name: &str,
    ) -> Result<(), ApiError> {
        self.post(
            "api.user.tree.node.rename",
            &[
                ("treeName", tree_name.to_string()),
                ("nodeId", node_id.to_string()),
                ("newNodeName", new_node_name.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// Delete a node; the server deletes its subtree with it.
    pub async fn delete_node(&self, tree_name: &str, node_id: i64) -> Result<(), ApiError> {
        self.post(
            "api.user.tree.node.delete",
            &[
                ("treeName", tree_name.to_string()),
                ("nodeId", node_id.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    /// POST to a path with query parameters, surfacing non-2xx bodies
    /// as errors so the server's detail reaches the user.
    async fn post(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .http
            .post(url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            format!("server returned {status}")
        } else {
            body.trim().to_string()
        };
        Err(ApiError { message })
    }
}
