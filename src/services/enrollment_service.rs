//! Enrollment service - seats, status transitions and drops.
//!
//! Every operation that touches a course's seat count runs its checks and
//! the count change under one write guard, so `current_enrollment` always
//! equals the number of active enrollments for the course and never
//! exceeds its capacity.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::{
    MSG_ALREADY_ENROLLED, MSG_COURSE_NOT_FOUND, MSG_ENROLLMENT_NOT_FOUND, MSG_STUDENT_NOT_FOUND,
};
use crate::domain::{Enrollment, UpdateEnrollment};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Database;

/// List filter; `student_id` wins over `course_id`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentFilter {
    /// All enrollments of the student, any status
    pub student_id: Option<Uuid>,
    /// Active enrollments of the course
    pub course_id: Option<Uuid>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EnrollmentService: Send + Sync {
    /// Enroll a student, taking one seat in the course
    async fn enroll(&self, student_id: Uuid, course_id: Uuid) -> AppResult<Enrollment>;

    async fn get_enrollment(&self, id: Uuid) -> AppResult<Enrollment>;

    async fn list_enrollments(&self, filter: EnrollmentFilter) -> AppResult<Vec<Enrollment>>;

    /// Change grade and/or status, adjusting the seat count on transitions
    async fn update_enrollment(&self, id: Uuid, changes: UpdateEnrollment) -> AppResult<Enrollment>;

    /// Remove the enrollment, releasing its seat if it was active
    async fn drop_enrollment(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete EnrollmentService over the in-memory database.
pub struct EnrollmentManager {
    db: Arc<Database>,
}

impl EnrollmentManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EnrollmentService for EnrollmentManager {
    async fn enroll(&self, student_id: Uuid, course_id: Uuid) -> AppResult<Enrollment> {
        let mut store = self.db.write().await;

        store.student(student_id).ok_or_not_found(MSG_STUDENT_NOT_FOUND)?;
        store.course(course_id).ok_or_not_found(MSG_COURSE_NOT_FOUND)?;
        if store.active_enrollment(student_id, course_id).is_some() {
            return Err(AppError::rejected(MSG_ALREADY_ENROLLED));
        }

        store
            .course_mut(course_id)
            .ok_or_not_found(MSG_COURSE_NOT_FOUND)?
            .add_student()?;

        let enrollment = Enrollment::new(student_id, course_id);
        store.add_enrollment(enrollment.clone());

        tracing::info!(
            enrollment_id = %enrollment.id,
            student_id = %student_id,
            course_id = %course_id,
            "Student enrolled"
        );
        Ok(enrollment)
    }

    async fn get_enrollment(&self, id: Uuid) -> AppResult<Enrollment> {
        self.db
            .read()
            .await
            .enrollment(id)
            .cloned()
            .ok_or_not_found(MSG_ENROLLMENT_NOT_FOUND)
    }

    async fn list_enrollments(&self, filter: EnrollmentFilter) -> AppResult<Vec<Enrollment>> {
        let store = self.db.read().await;
        let enrollments = match (filter.student_id, filter.course_id) {
            (Some(student_id), _) => store.enrollments_for_student(student_id),
            (None, Some(course_id)) => store.enrollments_for_course(course_id),
            (None, None) => store.enrollments().iter().collect(),
        };
        Ok(enrollments.into_iter().cloned().collect())
    }

    async fn update_enrollment(&self, id: Uuid, changes: UpdateEnrollment) -> AppResult<Enrollment> {
        let mut store = self.db.write().await;
        let current = store
            .enrollment(id)
            .cloned()
            .ok_or_not_found(MSG_ENROLLMENT_NOT_FOUND)?;

        if let Some(status) = changes.status {
            match (current.is_active(), status.is_active()) {
                // Leaving `active` frees the seat
                (true, false) => {
                    if let Some(course) = store.course_mut(current.course_id) {
                        course.remove_student();
                    }
                }
                // Re-activating needs the same checks as a fresh enroll
                (false, true) => {
                    if store
                        .active_enrollment(current.student_id, current.course_id)
                        .is_some()
                    {
                        return Err(AppError::rejected(MSG_ALREADY_ENROLLED));
                    }
                    store
                        .course_mut(current.course_id)
                        .ok_or_not_found(MSG_COURSE_NOT_FOUND)?
                        .add_student()?;
                }
                _ => {}
            }
        }

        let enrollment = store
            .update_enrollment(id, &changes)
            .cloned()
            .ok_or_not_found(MSG_ENROLLMENT_NOT_FOUND)?;
        tracing::info!(enrollment_id = %id, status = %enrollment.status, "Enrollment updated");
        Ok(enrollment)
    }

    async fn drop_enrollment(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.db.write().await;
        let enrollment = store
            .enrollment(id)
            .cloned()
            .ok_or_not_found(MSG_ENROLLMENT_NOT_FOUND)?;

        if enrollment.is_active() {
            if let Some(course) = store.course_mut(enrollment.course_id) {
                course.remove_student();
            }
        }
        store.delete_enrollment(id);

        tracing::info!(enrollment_id = %id, course_id = %enrollment.course_id, "Enrollment dropped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MSG_COURSE_FULL;
    use crate::domain::{Course, EnrollmentStatus, Password, Student};

    struct Fixture {
        service: EnrollmentManager,
        db: Arc<Database>,
    }

    impl Fixture {
        fn new() -> Self {
            let db = Arc::new(Database::new());
            Self {
                service: EnrollmentManager::new(db.clone()),
                db,
            }
        }

        async fn student(&self, roll: &str) -> Uuid {
            let student = Student::new(
                format!("Student {}", roll),
                format!("{}@uni.edu", roll),
                roll.to_string(),
                1,
                "CS".to_string(),
                Password::from_hash("hash".to_string()),
            );
            let id = student.id;
            self.db.write().await.add_student(student);
            id
        }

        async fn course(&self, capacity: u32) -> Uuid {
            let course = Course::new(
                format!("Course {}", Uuid::new_v4()),
                format!("C-{}", Uuid::new_v4()),
                String::new(),
                3,
                "Staff".to_string(),
                capacity,
            );
            let id = course.id;
            self.db.write().await.add_course(course);
            id
        }

        async fn seats_taken(&self, course_id: Uuid) -> u32 {
            self.db.read().await.course(course_id).unwrap().current_enrollment()
        }

        async fn active_count(&self, course_id: Uuid) -> usize {
            self.db.read().await.count_active_for_course(course_id)
        }
    }

    #[tokio::test]
    async fn test_enroll_takes_a_seat() {
        let fx = Fixture::new();
        let (student, course) = (fx.student("R1").await, fx.course(2).await);

        let enrollment = fx.service.enroll(student, course).await.unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(fx.seats_taken(course).await, 1);
    }

    #[tokio::test]
    async fn test_enroll_missing_references() {
        let fx = Fixture::new();
        let (student, course) = (fx.student("R1").await, fx.course(2).await);

        let err = fx.service.enroll(Uuid::new_v4(), course).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == MSG_STUDENT_NOT_FOUND));

        let err = fx.service.enroll(student, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == MSG_COURSE_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_duplicate_active_enrollment_rejected() {
        let fx = Fixture::new();
        let (student, course) = (fx.student("R1").await, fx.course(5).await);

        fx.service.enroll(student, course).await.unwrap();
        let err = fx.service.enroll(student, course).await.unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref m) if m == MSG_ALREADY_ENROLLED));
        assert_eq!(fx.seats_taken(course).await, 1);
    }

    #[tokio::test]
    async fn test_full_course_then_drop_frees_seat() {
        let fx = Fixture::new();
        let (a, b, course) = (fx.student("A").await, fx.student("B").await, fx.course(1).await);

        let first = fx.service.enroll(a, course).await.unwrap();
        let err = fx.service.enroll(b, course).await.unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref m) if m == MSG_COURSE_FULL));

        fx.service.drop_enrollment(first.id).await.unwrap();
        assert_eq!(fx.seats_taken(course).await, 0);
        assert!(fx.db.read().await.enrollment(first.id).is_none());

        fx.service.enroll(b, course).await.unwrap();
        assert_eq!(fx.seats_taken(course).await, 1);
    }

    #[tokio::test]
    async fn test_drop_unknown_enrollment() {
        let fx = Fixture::new();
        let err = fx.service.drop_enrollment(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == MSG_ENROLLMENT_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_status_transitions_keep_count_in_sync() {
        let fx = Fixture::new();
        let (a, b, course) = (fx.student("A").await, fx.student("B").await, fx.course(1).await);
        let enrollment = fx.service.enroll(a, course).await.unwrap();

        let completed = fx
            .service
            .update_enrollment(
                enrollment.id,
                UpdateEnrollment {
                    status: Some(EnrollmentStatus::Completed),
                    grade: Some("A".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(completed.grade.as_deref(), Some("A"));
        assert_eq!(fx.seats_taken(course).await, 0);

        // A completed enrollment no longer blocks re-enrolling
        let second = fx.service.enroll(a, course).await.unwrap();

        // Re-activating the old one would duplicate the pair
        let err = fx
            .service
            .update_enrollment(
                enrollment.id,
                UpdateEnrollment {
                    status: Some(EnrollmentStatus::Active),
                    grade: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref m) if m == MSG_ALREADY_ENROLLED));

        // Dropping by status and letting B in, then re-activating A hits capacity
        fx.service
            .update_enrollment(
                second.id,
                UpdateEnrollment {
                    status: Some(EnrollmentStatus::Dropped),
                    grade: None,
                },
            )
            .await
            .unwrap();
        fx.service.enroll(b, course).await.unwrap();
        let err = fx
            .service
            .update_enrollment(
                second.id,
                UpdateEnrollment {
                    status: Some(EnrollmentStatus::Active),
                    grade: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref m) if m == MSG_COURSE_FULL));

        assert_eq!(fx.seats_taken(course).await as usize, fx.active_count(course).await);
    }

    #[tokio::test]
    async fn test_count_matches_active_enrollments_over_mixed_sequence() {
        let fx = Fixture::new();
        let course = fx.course(3).await;
        let mut students = Vec::new();
        for roll in ["S1", "S2", "S3", "S4", "S5"] {
            students.push(fx.student(roll).await);
        }

        let mut enrolled = Vec::new();
        for (step, student) in students.iter().cycle().take(15).enumerate() {
            match step % 3 {
                0 | 1 => {
                    if let Ok(enrollment) = fx.service.enroll(*student, course).await {
                        enrolled.push(enrollment.id);
                    }
                }
                _ => {
                    if let Some(id) = enrolled.pop() {
                        fx.service.drop_enrollment(id).await.unwrap();
                    }
                }
            }

            let taken = fx.seats_taken(course).await;
            assert!(taken <= 3);
            assert_eq!(taken as usize, fx.active_count(course).await);
        }
    }

    #[tokio::test]
    async fn test_list_filter_precedence() {
        let fx = Fixture::new();
        let (a, b) = (fx.student("A").await, fx.student("B").await);
        let (c1, c2) = (fx.course(5).await, fx.course(5).await);

        let finished = fx.service.enroll(a, c1).await.unwrap();
        fx.service
            .update_enrollment(
                finished.id,
                UpdateEnrollment {
                    status: Some(EnrollmentStatus::Completed),
                    grade: None,
                },
            )
            .await
            .unwrap();
        fx.service.enroll(a, c2).await.unwrap();
        fx.service.enroll(b, c1).await.unwrap();

        let by_student = fx
            .service
            .list_enrollments(EnrollmentFilter {
                student_id: Some(a),
                course_id: Some(c1),
            })
            .await
            .unwrap();
        assert_eq!(by_student.len(), 2);

        let by_course = fx
            .service
            .list_enrollments(EnrollmentFilter {
                student_id: None,
                course_id: Some(c1),
            })
            .await
            .unwrap();
        assert_eq!(by_course.len(), 1);
        assert_eq!(by_course[0].student_id, b);

        let all = fx.service.list_enrollments(EnrollmentFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_enrollments_respect_capacity() {
        let fx = Fixture::new();
        let course = fx.course(3).await;
        let service = Arc::new(EnrollmentManager::new(fx.db.clone()));

        let mut handles = Vec::new();
        for i in 0..10 {
            let student = fx.student(&format!("C{}", i)).await;
            let service = service.clone();
            handles.push(tokio::spawn(async move { service.enroll(student, course).await }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 3);
        assert_eq!(fx.seats_taken(course).await, 3);
        assert_eq!(fx.active_count(course).await, 3);
    }
}
