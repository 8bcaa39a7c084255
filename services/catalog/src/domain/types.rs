use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use campus_domain::id::{CourseId, UserId};
use campus_domain::user::UserRole;

/// Account record. `password_hash` is a PHC string, never plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload after hashing; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Authoritative course record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: i32,
    pub level: String,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: i32,
    pub level: String,
    pub availability: bool,
}

/// Partial course update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration: Option<i32>,
    pub level: Option<String>,
    pub availability: Option<bool>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.instructor.is_none()
            && self.duration.is_none()
            && self.level.is_none()
            && self.availability.is_none()
    }

    /// Overwrite the supplied fields of `course`.
    pub fn apply(self, course: &mut Course) {
        if let Some(v) = self.title {
            course.title = v;
        }
        if let Some(v) = self.description {
            course.description = v;
        }
        if let Some(v) = self.instructor {
            course.instructor = v;
        }
        if let Some(v) = self.duration {
            course.duration = v;
        }
        if let Some(v) = self.level {
            course.level = v;
        }
        if let Some(v) = self.availability {
            course.availability = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
}

impl EnrollmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            other => Err(format!("unknown enrollment status: {other}")),
        }
    }
}

/// Link between a user and a course.
///
/// `course_id` is kept as the raw reference string; it may point at a course
/// that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub user_id: UserId,
    pub course_id: String,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Flat document pushed to the search index, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: i32,
    pub level: String,
    pub availability: bool,
}

impl From<&Course> for SearchDocument {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title.clone(),
            description: course.description.clone(),
            instructor: course.instructor.clone(),
            duration: course.duration,
            level: course.level.clone(),
            availability: course.availability,
        }
    }
}

/// Accepts `local@domain.tld` where the local part is lowercase letters, digits
/// or `._%+-`, the domain lowercase letters, digits, `.` or `-`, and the TLD at
/// least two lowercase letters.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "._%+-".contains(c));
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_lowercase());
    local_ok && host_ok && tld_ok
}

/// Wrap free text as a contains-match on the `title` field, e.g. `rust` becomes
/// `title:*rust*`. Returns `None` for blank input.
pub fn title_query(q: &str) -> Option<String> {
    let q = q.trim();
    if q.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(q.len() + 8);
    out.push_str("title:*");
    for c in q.chars() {
        if c.is_whitespace() || "+-&|!(){}[]^\"~*?:\\/".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('*');
    Some(out)
}
