use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use campus_auth_types::token::TokenService;

use crate::infra::db::{DbCourseRepository, DbEnrollmentRepository, DbUserRepository};
use crate::infra::solr::SolrIndex;
use crate::usecase::authorize::RoleGate;
use crate::usecase::catalog::CatalogStore;
use crate::usecase::enrollment::EnrollmentManager;
use crate::usecase::index::IndexSynchronizer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub index: SolrIndex,
    pub tokens: TokenService,
    pub token_ttl: Duration,
    pub cookie_secure: bool,
    pub store_timeout: Duration,
    pub admin_emails: Arc<[String]>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
            timeout: self.store_timeout,
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
            timeout: self.store_timeout,
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
            timeout: self.store_timeout,
        }
    }

    pub fn catalog(&self) -> CatalogStore<DbCourseRepository> {
        CatalogStore {
            repo: self.course_repo(),
        }
    }

    pub fn index_sync(&self) -> IndexSynchronizer<SolrIndex> {
        IndexSynchronizer {
            index: self.index.clone(),
        }
    }

    pub fn enrollment_manager(
        &self,
    ) -> EnrollmentManager<DbEnrollmentRepository, DbCourseRepository> {
        EnrollmentManager {
            enrollments: self.enrollment_repo(),
            catalog: self.catalog(),
            tokens: self.tokens.clone(),
        }
    }

    pub fn role_gate(&self) -> RoleGate<DbUserRepository> {
        RoleGate {
            users: self.user_repo(),
            tokens: self.tokens.clone(),
        }
    }
}
