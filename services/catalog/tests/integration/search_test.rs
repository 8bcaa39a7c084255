use campus_catalog::error::CatalogError;
use campus_catalog::usecase::search::SearchCoursesUseCase;

use crate::helpers::MockSearchIndex;

#[tokio::test]
async fn should_send_title_contains_query() {
    let index = MockSearchIndex::default();
    let usecase = SearchCoursesUseCase {
        index: index.clone(),
    };

    let body = usecase.execute(Some("rust")).await.unwrap();

    assert_eq!(body["response"]["numFound"], 0);
    assert_eq!(*index.queries.lock().unwrap(), vec!["title:*rust*".to_owned()]);
}

#[tokio::test]
async fn should_reject_missing_or_blank_query_without_calling_index() {
    let index = MockSearchIndex::default();
    let usecase = SearchCoursesUseCase {
        index: index.clone(),
    };

    assert!(matches!(
        usecase.execute(None).await,
        Err(CatalogError::MissingQuery)
    ));
    assert!(matches!(
        usecase.execute(Some("  ")).await,
        Err(CatalogError::MissingQuery)
    ));
    assert!(index.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_surface_index_outage_as_internal() {
    let usecase = SearchCoursesUseCase {
        index: MockSearchIndex::down(),
    };
    let result = usecase.execute(Some("rust")).await;
    assert!(matches!(result, Err(CatalogError::Internal(_))));
}
