//! Student service - Handles student-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::{MSG_EMAIL_EXISTS, MSG_ROLL_NUMBER_EXISTS, MSG_STUDENT_NOT_FOUND};
use crate::domain::{NewStudent, Password, Student, UpdateStudent};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Database;

/// List filter; `search` wins over `year` when both are set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub year: Option<u32>,
}

/// Student service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentService: Send + Sync {
    /// Create a student (same uniqueness rules as registration)
    async fn create_student(&self, input: NewStudent) -> AppResult<Student>;

    async fn get_student(&self, id: Uuid) -> AppResult<Student>;

    /// Students matching the filter, in insertion order
    async fn list_students(&self, filter: StudentFilter) -> AppResult<Vec<Student>>;

    async fn update_student(&self, id: Uuid, changes: UpdateStudent) -> AppResult<Student>;

    /// Delete a student along with their enrollments
    async fn delete_student(&self, id: Uuid) -> AppResult<()>;
}

/// Hash the password, then check email and roll number uniqueness and insert
/// under one write guard. Shared by registration and the students API, which
/// word the duplicate-email message differently.
pub(crate) async fn insert_student(
    db: &Database,
    input: NewStudent,
    email_conflict: &str,
) -> AppResult<Student> {
    let password = Password::new(&input.password)?;
    let student = Student::new(
        input.name,
        input.email,
        input.roll_number,
        input.year,
        input.department,
        password,
    );

    let mut store = db.write().await;
    if store.student_by_email(&student.email).is_some() {
        return Err(AppError::conflict(email_conflict));
    }
    if store.student_by_roll_number(&student.roll_number).is_some() {
        return Err(AppError::conflict(MSG_ROLL_NUMBER_EXISTS));
    }
    store.add_student(student.clone());

    Ok(student)
}

/// Concrete StudentService over the in-memory database.
pub struct StudentManager {
    db: Arc<Database>,
}

impl StudentManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentService for StudentManager {
    async fn create_student(&self, input: NewStudent) -> AppResult<Student> {
        let student = insert_student(&self.db, input, MSG_EMAIL_EXISTS).await?;
        tracing::info!(student_id = %student.id, "Student created");
        Ok(student)
    }

    async fn get_student(&self, id: Uuid) -> AppResult<Student> {
        self.db
            .read()
            .await
            .student(id)
            .cloned()
            .ok_or_not_found(MSG_STUDENT_NOT_FOUND)
    }

    async fn list_students(&self, filter: StudentFilter) -> AppResult<Vec<Student>> {
        let store = self.db.read().await;
        let students = match (filter.search.as_deref().filter(|s| !s.is_empty()), filter.year) {
            (Some(query), _) => store.search_students(query),
            (None, Some(year)) => store.students_in_year(year),
            (None, None) => store.students().iter().collect(),
        };
        Ok(students.into_iter().cloned().collect())
    }

    async fn update_student(&self, id: Uuid, changes: UpdateStudent) -> AppResult<Student> {
        let mut store = self.db.write().await;
        store.student(id).ok_or_not_found(MSG_STUDENT_NOT_FOUND)?;

        // Uniqueness holds across updates too: another student may not own
        // the new email or roll number.
        if let Some(email) = changes.email.as_deref().filter(|e| !e.is_empty()) {
            if store.student_by_email(email).is_some_and(|s| s.id != id) {
                return Err(AppError::conflict(MSG_EMAIL_EXISTS));
            }
        }
        if let Some(roll_number) = changes.roll_number.as_deref().filter(|r| !r.is_empty()) {
            if store.student_by_roll_number(roll_number).is_some_and(|s| s.id != id) {
                return Err(AppError::conflict(MSG_ROLL_NUMBER_EXISTS));
            }
        }

        let student = store
            .update_student(id, &changes)
            .cloned()
            .ok_or_not_found(MSG_STUDENT_NOT_FOUND)?;
        tracing::info!(student_id = %id, "Student updated");
        Ok(student)
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.db.write().await;
        if !store.delete_student(id) {
            return Err(AppError::not_found(MSG_STUDENT_NOT_FOUND));
        }

        let removed = store.remove_enrollments_where(|e| e.student_id == id);
        for enrollment in removed.iter().filter(|e| e.is_active()) {
            if let Some(course) = store.course_mut(enrollment.course_id) {
                course.remove_student();
            }
        }

        tracing::info!(student_id = %id, enrollments = removed.len(), "Student deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Course;

    fn new_student(email: &str, roll: &str) -> NewStudent {
        NewStudent {
            name: "Grace Hopper".to_string(),
            email: email.to_string(),
            roll_number: roll.to_string(),
            year: 3,
            department: "CS".to_string(),
            password: "cobol".to_string(),
        }
    }

    fn service() -> (StudentManager, Arc<Database>) {
        let db = Arc::new(Database::new());
        (StudentManager::new(db.clone()), db)
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email_and_roll_number() {
        let (service, _) = service();
        service.create_student(new_student("g@x.com", "R1")).await.unwrap();

        let email = service.create_student(new_student("g@x.com", "R2")).await.unwrap_err();
        assert!(matches!(email, AppError::Conflict(ref m) if m == MSG_EMAIL_EXISTS));

        let roll = service.create_student(new_student("h@x.com", "R1")).await.unwrap_err();
        assert!(matches!(roll, AppError::Conflict(ref m) if m == MSG_ROLL_NUMBER_EXISTS));
    }

    #[tokio::test]
    async fn test_update_keeps_uniqueness() {
        let (service, _) = service();
        let first = service.create_student(new_student("a@x.com", "R1")).await.unwrap();
        service.create_student(new_student("b@x.com", "R2")).await.unwrap();

        let err = service
            .update_student(
                first.id,
                UpdateStudent {
                    email: Some("b@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == MSG_EMAIL_EXISTS));

        let err = service
            .update_student(
                first.id,
                UpdateStudent {
                    roll_number: Some("R2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == MSG_ROLL_NUMBER_EXISTS));

        // Re-submitting one's own values is fine
        let updated = service
            .update_student(
                first.id,
                UpdateStudent {
                    email: Some("a@x.com".to_string()),
                    name: Some("Grace B. Hopper".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Grace B. Hopper");
    }

    #[tokio::test]
    async fn test_list_filter_precedence() {
        let (service, _) = service();
        service.create_student(new_student("a@x.com", "CS-1")).await.unwrap();
        let mut other = new_student("b@x.com", "EE-2");
        other.year = 1;
        other.name = "Alan".to_string();
        service.create_student(other).await.unwrap();

        let by_year = service
            .list_students(StudentFilter { search: None, year: Some(1) })
            .await
            .unwrap();
        assert_eq!(by_year.len(), 1);

        let search_wins = service
            .list_students(StudentFilter {
                search: Some("cs-".to_string()),
                year: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(search_wins.len(), 1);
        assert_eq!(search_wins[0].roll_number, "CS-1");

        let all = service.list_students(StudentFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_releases_seats() {
        let (service, db) = service();
        let student = service.create_student(new_student("a@x.com", "R1")).await.unwrap();

        let mut course = Course::new(
            "Algorithms".to_string(),
            "CS201".to_string(),
            String::new(),
            4,
            "Knuth".to_string(),
            1,
        );
        course.add_student().unwrap();
        let course_id = course.id;
        {
            let mut store = db.write().await;
            store.add_course(course);
            store.add_enrollment(crate::domain::Enrollment::new(student.id, course_id));
        }

        service.delete_student(student.id).await.unwrap();

        let store = db.read().await;
        assert_eq!(store.course(course_id).unwrap().current_enrollment(), 0);
        assert!(store.enrollments().is_empty());
        drop(store);

        let err = service.delete_student(student.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
