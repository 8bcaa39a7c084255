use std::time::Duration;

use anyhow::Context as _;
use url::Url;

use crate::domain::repository::SearchIndex;
use crate::domain::types::SearchDocument;
use crate::error::CatalogError;

/// Solr core client, e.g. `http://localhost:8983/solr/courses`.
///
/// Every write commits synchronously so the document is queryable once the
/// call returns.
#[derive(Clone)]
pub struct SolrIndex {
    client: reqwest::Client,
    base: Url,
}

impl SolrIndex {
    pub fn new(base: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build search index client")?;
        Ok(Self::with_client(client, base))
    }

    pub fn with_client(client: reqwest::Client, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    fn endpoint(&self, handler: &str) -> Result<Url, CatalogError> {
        Ok(self
            .base
            .join(handler)
            .with_context(|| format!("build {handler} url"))?)
    }

    fn update_url(&self) -> Result<Url, CatalogError> {
        let mut url = self.endpoint("update")?;
        url.query_pairs_mut().append_pair("commit", "true");
        Ok(url)
    }

    fn select_url(&self, query: &str) -> Result<Url, CatalogError> {
        let mut url = self.endpoint("select")?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    async fn post_update(&self, body: &serde_json::Value, what: &str) -> Result<(), CatalogError> {
        self.client
            .post(self.update_url()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("{what} request"))?
            .error_for_status()
            .with_context(|| format!("{what} status"))?;
        Ok(())
    }
}

impl SearchIndex for SolrIndex {
    async fn upsert(&self, doc: &SearchDocument) -> Result<(), CatalogError> {
        let body = serde_json::json!([doc]);
        self.post_update(&body, "index upsert").await
    }

    async fn remove(&self, id: &str) -> Result<(), CatalogError> {
        let body = serde_json::json!({ "delete": { "id": id } });
        self.post_update(&body, "index delete").await
    }

    async fn select(&self, query: &str) -> Result<serde_json::Value, CatalogError> {
        let response = self
            .client
            .get(self.select_url(query)?)
            .send()
            .await
            .context("index select request")?
            .error_for_status()
            .context("index select status")?;
        Ok(response.json().await.context("index select body")?)
    }
}
