use chrono::Utc;

use campus_catalog::domain::types::{Enrollment, EnrollmentStatus};
use campus_catalog::error::CatalogError;
use campus_catalog::usecase::catalog::CatalogStore;
use campus_catalog::usecase::enrollment::{EnrolledCourses, EnrollmentManager};
use campus_domain::id::UserId;
use campus_testing::auth::{MockAuth, test_tokens};

use crate::helpers::{C1, C2, MockCourseRepo, MockEnrollmentRepo, test_course};

fn manager(
    enrollments: MockEnrollmentRepo,
    courses: MockCourseRepo,
) -> EnrollmentManager<MockEnrollmentRepo, MockCourseRepo> {
    EnrollmentManager {
        enrollments,
        catalog: CatalogStore { repo: courses },
        tokens: test_tokens(),
    }
}

fn record(user_id: i64, course_id: &str) -> Enrollment {
    Enrollment {
        user_id: UserId(user_id),
        course_id: course_id.into(),
        status: EnrollmentStatus::Active,
        created_at: Utc::now(),
    }
}

// ── enroll / unenroll ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_enroll_token_subject_then_unenroll_once() {
    let repo = MockEnrollmentRepo::default();
    let manager = manager(repo.clone(), MockCourseRepo::default());
    let token = MockAuth::user(42).token();

    let enrollment = manager.enroll(&token, C1).await.unwrap();
    assert_eq!(enrollment.user_id, UserId(42));
    assert_eq!(enrollment.status, EnrollmentStatus::Active);

    let stored = repo.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_id, UserId(42));
    assert_eq!(stored[0].course_id, C1);

    manager.unenroll(&token, C1).await.unwrap();
    assert!(repo.snapshot().is_empty());

    let result = manager.unenroll(&token, C1).await;
    assert!(
        matches!(result, Err(CatalogError::EnrollmentNotFound)),
        "expected EnrollmentNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_duplicate_enrollment() {
    let manager = manager(MockEnrollmentRepo::default(), MockCourseRepo::default());
    let token = MockAuth::user(1).token();

    manager.enroll(&token, C1).await.unwrap();
    let result = manager.enroll(&token, C1).await;
    assert!(matches!(result, Err(CatalogError::AlreadyEnrolled)));
}

#[tokio::test]
async fn should_not_write_when_token_is_invalid() {
    let repo = MockEnrollmentRepo::default();
    let manager = manager(repo.clone(), MockCourseRepo::default());

    let result = manager.enroll("not-a-jwt", C1).await;
    assert!(matches!(result, Err(CatalogError::Unauthenticated)));
    assert!(repo.snapshot().is_empty());
}

#[tokio::test]
async fn should_reject_malformed_course_id() {
    let repo = MockEnrollmentRepo::default();
    let manager = manager(repo.clone(), MockCourseRepo::default());

    let result = manager.enroll(&MockAuth::user(1).token(), "abc").await;
    assert!(matches!(result, Err(CatalogError::InvalidId)));
    assert!(repo.snapshot().is_empty());
}

#[tokio::test]
async fn should_leave_other_users_enrollment_alone_on_unenroll() {
    let repo = MockEnrollmentRepo::new(vec![record(7, C1)]);
    let manager = manager(repo.clone(), MockCourseRepo::default());

    let result = manager.unenroll(&MockAuth::user(8).token(), C1).await;
    assert!(matches!(result, Err(CatalogError::EnrollmentNotFound)));
    assert_eq!(repo.snapshot().len(), 1);
}

// ── list_for_user ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_skip_orphaned_enrollments() {
    let courses = MockCourseRepo::new(vec![test_course(C1, "Rust")]);
    let repo = MockEnrollmentRepo::new(vec![record(42, C1), record(42, C2)]);
    let manager = manager(repo, courses);

    let listed = manager
        .list_for_user(&MockAuth::user(42).token())
        .await
        .unwrap();
    match listed {
        EnrolledCourses::Courses(courses) => {
            assert_eq!(courses.len(), 1);
            assert_eq!(courses[0].id.to_string(), C1);
        }
        other => panic!("expected Courses, got {other:?}"),
    }
}

#[tokio::test]
async fn should_skip_malformed_course_references() {
    let courses = MockCourseRepo::new(vec![test_course(C1, "Rust")]);
    let repo = MockEnrollmentRepo::new(vec![record(42, "legacy-key"), record(42, C1)]);
    let manager = manager(repo, courses);

    let listed = manager
        .list_for_user(&MockAuth::user(42).token())
        .await
        .unwrap();
    assert!(matches!(listed, EnrolledCourses::Courses(ref c) if c.len() == 1));
}

#[tokio::test]
async fn should_report_not_enrolled_when_no_records() {
    let courses = MockCourseRepo::new(vec![test_course(C1, "Rust")]);
    let repo = MockEnrollmentRepo::new(vec![record(7, C1)]);
    let manager = manager(repo, courses);

    let listed = manager
        .list_for_user(&MockAuth::user(42).token())
        .await
        .unwrap();
    assert_eq!(listed, EnrolledCourses::NotEnrolled);
}

#[tokio::test]
async fn should_return_empty_list_when_every_course_is_gone() {
    let repo = MockEnrollmentRepo::new(vec![record(42, C2)]);
    let manager = manager(repo, MockCourseRepo::default());

    let listed = manager
        .list_for_user(&MockAuth::user(42).token())
        .await
        .unwrap();
    assert_eq!(listed, EnrolledCourses::Courses(Vec::new()));
}
