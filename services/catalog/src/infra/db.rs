use std::time::Duration;

use anyhow::anyhow;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, SqlErr, sea_query::Expr,
};

use campus_catalog_schema::{courses, enrollments, users};
use campus_core::deadline::with_deadline;
use campus_domain::id::{CourseId, UserId};
use campus_domain::user::UserRole;

use crate::domain::repository::{CourseRepository, EnrollmentRepository, UserRepository};
use crate::domain::types::{
    Course, CoursePatch, Enrollment, EnrollmentStatus, NewCourse, NewUser, User,
};
use crate::error::CatalogError;

fn is_unique_violation(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<DbErr>().and_then(|e| e.sql_err()),
        Some(SqlErr::UniqueConstraintViolation(_))
    )
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, CatalogError> {
        let model = with_deadline(
            self.timeout,
            "find user by id",
            users::Entity::find_by_id(id.0).one(&self.db),
        )
        .await?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        let model = with_deadline(
            self.timeout,
            "find user by email",
            users::Entity::find()
                .filter(users::Column::Email.eq(email))
                .one(&self.db),
        )
        .await?;
        model.map(user_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, CatalogError> {
        let models = with_deadline(
            self.timeout,
            "list users",
            users::Entity::find()
                .order_by_asc(users::Column::Id)
                .all(&self.db),
        )
        .await?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, user: &NewUser) -> Result<UserId, CatalogError> {
        let now = Utc::now();
        let insert = users::ActiveModel {
            id: NotSet,
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db);
        match with_deadline(self.timeout, "create user", insert).await {
            Ok(model) => Ok(UserId(model.id)),
            Err(e) if is_unique_violation(&e) => Err(CatalogError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool, CatalogError> {
        let mut update = users::Entity::update_many()
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id.0));
        if let Some(name) = name {
            update = update.col_expr(users::Column::Name, Expr::value(name));
        }
        if let Some(email) = email {
            update = update.col_expr(users::Column::Email, Expr::value(email));
        }
        match with_deadline(self.timeout, "update user profile", update.exec(&self.db)).await {
            Ok(res) => Ok(res.rows_affected > 0),
            Err(e) if is_unique_violation(&e) => Err(CatalogError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_role(&self, id: UserId, role: UserRole) -> Result<bool, CatalogError> {
        let res = with_deadline(
            self.timeout,
            "set user role",
            users::Entity::update_many()
                .col_expr(users::Column::Role, Expr::value(role.as_str()))
                .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(users::Column::Id.eq(id.0))
                .exec(&self.db),
        )
        .await?;
        Ok(res.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, CatalogError> {
    let role = model
        .role
        .parse::<UserRole>()
        .map_err(|e| anyhow!("user {}: {e}", model.id))?;
    Ok(User {
        id: UserId(model.id),
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl CourseRepository for DbCourseRepository {
    async fn create(&self, course: &NewCourse) -> Result<CourseId, CatalogError> {
        let now = Utc::now();
        // id left unset: the column default assigns it.
        let insert = courses::ActiveModel {
            id: NotSet,
            title: Set(course.title.clone()),
            description: Set(course.description.clone()),
            instructor: Set(course.instructor.clone()),
            duration: Set(course.duration),
            level: Set(course.level.clone()),
            availability: Set(course.availability),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db);
        let model = with_deadline(self.timeout, "insert course", insert).await?;
        Ok(CourseId(model.id))
    }

    async fn get(&self, id: CourseId) -> Result<Option<Course>, CatalogError> {
        let model = with_deadline(
            self.timeout,
            "find course by id",
            courses::Entity::find_by_id(id.0).one(&self.db),
        )
        .await?;
        Ok(model.map(course_from_model))
    }

    async fn list(&self) -> Result<Vec<Course>, CatalogError> {
        let models = with_deadline(
            self.timeout,
            "list courses",
            courses::Entity::find()
                .order_by_asc(courses::Column::CreatedAt)
                .all(&self.db),
        )
        .await?;
        Ok(models.into_iter().map(course_from_model).collect())
    }

    async fn update(&self, id: CourseId, patch: &CoursePatch) -> Result<u64, CatalogError> {
        let mut update = courses::Entity::update_many()
            .col_expr(courses::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(courses::Column::Id.eq(id.0));
        if let Some(ref v) = patch.title {
            update = update.col_expr(courses::Column::Title, Expr::value(v.clone()));
        }
        if let Some(ref v) = patch.description {
            update = update.col_expr(courses::Column::Description, Expr::value(v.clone()));
        }
        if let Some(ref v) = patch.instructor {
            update = update.col_expr(courses::Column::Instructor, Expr::value(v.clone()));
        }
        if let Some(v) = patch.duration {
            update = update.col_expr(courses::Column::Duration, Expr::value(v));
        }
        if let Some(ref v) = patch.level {
            update = update.col_expr(courses::Column::Level, Expr::value(v.clone()));
        }
        if let Some(v) = patch.availability {
            update = update.col_expr(courses::Column::Availability, Expr::value(v));
        }
        let res = with_deadline(self.timeout, "update course", update.exec(&self.db)).await?;
        Ok(res.rows_affected)
    }

    async fn delete(&self, id: CourseId) -> Result<u64, CatalogError> {
        let res = with_deadline(
            self.timeout,
            "delete course",
            courses::Entity::delete_by_id(id.0).exec(&self.db),
        )
        .await?;
        Ok(res.rows_affected)
    }
}

fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: CourseId(model.id),
        title: model.title,
        description: model.description,
        instructor: model.instructor,
        duration: model.duration,
        level: model.level,
        availability: model.availability,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn create(&self, enrollment: &Enrollment) -> Result<(), CatalogError> {
        let insert = enrollments::ActiveModel {
            user_id: Set(enrollment.user_id.0),
            course_id: Set(enrollment.course_id.clone()),
            status: Set(enrollment.status.as_str().to_owned()),
            created_at: Set(enrollment.created_at),
        }
        .insert(&self.db);
        match with_deadline(self.timeout, "insert enrollment", insert).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(CatalogError::AlreadyEnrolled),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, user_id: UserId, course_id: &str) -> Result<bool, CatalogError> {
        let res = with_deadline(
            self.timeout,
            "delete enrollment",
            enrollments::Entity::delete_many()
                .filter(enrollments::Column::UserId.eq(user_id.0))
                .filter(enrollments::Column::CourseId.eq(course_id))
                .exec(&self.db),
        )
        .await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Enrollment>, CatalogError> {
        let models = with_deadline(
            self.timeout,
            "list enrollments by user",
            enrollments::Entity::find()
                .filter(enrollments::Column::UserId.eq(user_id.0))
                .order_by_asc(enrollments::Column::CreatedAt)
                .all(&self.db),
        )
        .await?;
        models.into_iter().map(enrollment_from_model).collect()
    }
}

fn enrollment_from_model(model: enrollments::Model) -> Result<Enrollment, CatalogError> {
    let status = model
        .status
        .parse::<EnrollmentStatus>()
        .map_err(|e| anyhow!("enrollment ({}, {}): {e}", model.user_id, model.course_id))?;
    Ok(Enrollment {
        user_id: UserId(model.user_id),
        course_id: model.course_id,
        status,
        created_at: model.created_at,
    })
}
