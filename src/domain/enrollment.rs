//! Enrollment domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::non_empty;

/// Enrollment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, EnrollmentStatus::Active)
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "active"),
            EnrollmentStatus::Completed => write!(f, "completed"),
            EnrollmentStatus::Dropped => write!(f, "dropped"),
        }
    }
}

/// A student's seat in a course
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "A")]
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Create an active enrollment dated now
    pub fn new(student_id: Uuid, course_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            enrollment_date: now,
            status: EnrollmentStatus::Active,
            grade: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn set_grade(&mut self, grade: String) {
        self.grade = Some(grade);
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: EnrollmentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Apply the present, non-empty fields of `changes`
    pub fn update(&mut self, changes: &UpdateEnrollment) {
        if let Some(grade) = non_empty(&changes.grade) {
            self.set_grade(grade.to_string());
        }
        if let Some(status) = changes.status {
            self.set_status(status);
        }
    }
}

/// Enrollment update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEnrollment {
    pub status: Option<EnrollmentStatus>,
    #[schema(example = "A")]
    pub grade: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enrollment_is_active() {
        let enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());
        assert!(enrollment.is_active());
        assert!(enrollment.grade.is_none());
        assert_eq!(enrollment.enrollment_date, enrollment.created_at);
    }

    #[test]
    fn test_update_sets_grade_and_status() {
        let mut enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());
        enrollment.update(&UpdateEnrollment {
            status: Some(EnrollmentStatus::Completed),
            grade: Some("B+".to_string()),
        });

        assert_eq!(enrollment.status, EnrollmentStatus::Completed);
        assert_eq!(enrollment.grade.as_deref(), Some("B+"));
    }

    #[test]
    fn test_update_ignores_empty_grade() {
        let mut enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());
        enrollment.update(&UpdateEnrollment {
            status: None,
            grade: Some(String::new()),
        });
        assert!(enrollment.grade.is_none());
        assert!(enrollment.is_active());
    }

    #[test]
    fn test_status_wire_format() {
        let status: EnrollmentStatus = serde_json::from_str("\"dropped\"").unwrap();
        assert_eq!(status, EnrollmentStatus::Dropped);
        assert_eq!(status.to_string(), "dropped");
        assert!(serde_json::from_str::<EnrollmentStatus>("\"paused\"").is_err());
    }
}
