use campus_catalog::domain::types::CoursePatch;
use campus_catalog::error::CatalogError;
use campus_catalog::usecase::catalog::CatalogStore;
use campus_catalog::usecase::course::{
    CreateCourseUseCase, DeleteCourseUseCase, UpdateCourseUseCase,
};
use campus_catalog::usecase::index::{IndexSynchronizer, ReindexReport};

use crate::helpers::{C1, C2, MockCourseRepo, MockSearchIndex, new_course, test_course};

fn store(repo: &MockCourseRepo) -> CatalogStore<MockCourseRepo> {
    CatalogStore { repo: repo.clone() }
}

fn sync(index: &MockSearchIndex) -> IndexSynchronizer<MockSearchIndex> {
    IndexSynchronizer {
        index: index.clone(),
    }
}

// ── create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_push_created_course_to_index() {
    let repo = MockCourseRepo::default();
    let index = MockSearchIndex::default();
    let usecase = CreateCourseUseCase {
        catalog: store(&repo),
        sync: sync(&index),
    };

    let course = usecase.execute(new_course("Rust")).await.unwrap();

    let docs = index.snapshot();
    let doc = docs.get(&course.id.to_string()).unwrap();
    assert_eq!(doc.title, "Rust");
    assert_eq!(doc.duration, 12);
}

#[tokio::test]
async fn should_create_course_even_when_index_is_down() {
    let repo = MockCourseRepo::default();
    let usecase = CreateCourseUseCase {
        catalog: store(&repo),
        sync: sync(&MockSearchIndex::down()),
    };

    let course = usecase.execute(new_course("Rust")).await.unwrap();
    assert_eq!(repo.courses.lock().unwrap()[0].id, course.id);
}

#[tokio::test]
async fn should_reject_invalid_course_without_touching_index() {
    let repo = MockCourseRepo::default();
    let index = MockSearchIndex::default();
    let usecase = CreateCourseUseCase {
        catalog: store(&repo),
        sync: sync(&index),
    };

    let mut input = new_course("Rust");
    input.duration = 0;
    let result = usecase.execute(input).await;

    assert!(matches!(result, Err(CatalogError::InvalidDuration)));
    assert!(repo.courses.lock().unwrap().is_empty());
    assert!(index.snapshot().is_empty());
}

// ── update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_push_merged_record_after_update() {
    let repo = MockCourseRepo::new(vec![test_course(C1, "Rust")]);
    let index = MockSearchIndex::default();
    let usecase = UpdateCourseUseCase {
        catalog: store(&repo),
        sync: sync(&index),
    };

    let patch = CoursePatch {
        title: Some("Async Rust".into()),
        ..CoursePatch::default()
    };
    let course = usecase.execute(C1, patch).await.unwrap();
    assert_eq!(course.title, "Async Rust");

    let doc = index.snapshot().remove(C1).unwrap();
    assert_eq!(doc.title, "Async Rust");
    assert_eq!(doc.instructor, "Ferris");
    assert_eq!(doc.duration, 30);
}

#[tokio::test]
async fn should_report_missing_course_on_update() {
    let usecase = UpdateCourseUseCase {
        catalog: store(&MockCourseRepo::default()),
        sync: sync(&MockSearchIndex::default()),
    };
    let patch = CoursePatch {
        level: Some("advanced".into()),
        ..CoursePatch::default()
    };

    let result = usecase.execute(C1, patch).await;
    assert!(matches!(result, Err(CatalogError::CourseNotFound)));
}

#[tokio::test]
async fn should_update_course_even_when_index_is_down() {
    let repo = MockCourseRepo::new(vec![test_course(C1, "Rust")]);
    let usecase = UpdateCourseUseCase {
        catalog: store(&repo),
        sync: sync(&MockSearchIndex::down()),
    };
    let patch = CoursePatch {
        availability: Some(false),
        ..CoursePatch::default()
    };

    let course = usecase.execute(C1, patch).await.unwrap();
    assert!(!course.availability);
}

// ── delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_remove_deleted_course_from_index() {
    let repo = MockCourseRepo::new(vec![test_course(C1, "Rust")]);
    let index = MockSearchIndex::default();
    sync(&index)
        .project_and_push(&test_course(C1, "Rust"))
        .await;

    let usecase = DeleteCourseUseCase {
        catalog: store(&repo),
        sync: sync(&index),
    };
    usecase.execute(C1).await.unwrap();

    assert!(repo.courses.lock().unwrap().is_empty());
    assert!(index.snapshot().is_empty());
}

#[tokio::test]
async fn should_report_missing_course_on_delete() {
    let usecase = DeleteCourseUseCase {
        catalog: store(&MockCourseRepo::default()),
        sync: sync(&MockSearchIndex::default()),
    };
    let result = usecase.execute(C1).await;
    assert!(matches!(result, Err(CatalogError::CourseNotFound)));
}

// ── reindex_all ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_converge_on_same_index_content_across_reindexes() {
    let repo = MockCourseRepo::new(vec![test_course(C1, "Rust"), test_course(C2, "Go")]);
    let index = MockSearchIndex::default();
    let sync = sync(&index);

    let first = sync.reindex_all(&store(&repo)).await.unwrap();
    let after_first = index.snapshot();
    let second = sync.reindex_all(&store(&repo)).await.unwrap();

    assert_eq!(first, ReindexReport { pushed: 2, failed: 0 });
    assert_eq!(first, second);
    assert_eq!(after_first, index.snapshot());
    assert_eq!(after_first.len(), 2);
}

#[tokio::test]
async fn should_count_failed_pushes_without_erroring() {
    let repo = MockCourseRepo::new(vec![test_course(C1, "Rust")]);
    let report = sync(&MockSearchIndex::down())
        .reindex_all(&store(&repo))
        .await
        .unwrap();
    assert_eq!(report, ReindexReport { pushed: 0, failed: 1 });
}
