use crate::domain::repository::SearchIndex;
use crate::domain::types::title_query;
use crate::error::CatalogError;

pub struct SearchCoursesUseCase<I: SearchIndex> {
    pub index: I,
}

impl<I: SearchIndex> SearchCoursesUseCase<I> {
    /// Contains-match on `title`; the index response is returned as-is.
    pub async fn execute(&self, q: Option<&str>) -> Result<serde_json::Value, CatalogError> {
        let query = q.and_then(title_query).ok_or(CatalogError::MissingQuery)?;
        self.index.select(&query).await
    }
}
