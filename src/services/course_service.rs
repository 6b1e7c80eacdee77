//! Course service - catalog management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::{MSG_COURSE_CODE_EXISTS, MSG_COURSE_NAME_EXISTS, MSG_COURSE_NOT_FOUND};
use crate::domain::{Course, NewCourse, UpdateCourse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Database;

/// List filter; `search` wins over `available_only`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub available_only: bool,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseService: Send + Sync {
    async fn create_course(&self, input: NewCourse) -> AppResult<Course>;

    async fn get_course(&self, id: Uuid) -> AppResult<Course>;

    async fn list_courses(&self, filter: CourseFilter) -> AppResult<Vec<Course>>;

    async fn update_course(&self, id: Uuid, changes: UpdateCourse) -> AppResult<Course>;

    /// Delete a course along with its enrollments
    async fn delete_course(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete CourseService over the in-memory database.
pub struct CourseManager {
    db: Arc<Database>,
}

impl CourseManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseService for CourseManager {
    async fn create_course(&self, input: NewCourse) -> AppResult<Course> {
        let mut store = self.db.write().await;
        if store.course_by_code(&input.course_code).is_some() {
            return Err(AppError::conflict(MSG_COURSE_CODE_EXISTS));
        }
        if store.course_by_name(&input.name).is_some() {
            return Err(AppError::conflict(MSG_COURSE_NAME_EXISTS));
        }

        let course = Course::from(input);
        store.add_course(course.clone());
        tracing::info!(course_id = %course.id, code = %course.course_code, "Course created");
        Ok(course)
    }

    async fn get_course(&self, id: Uuid) -> AppResult<Course> {
        self.db
            .read()
            .await
            .course(id)
            .cloned()
            .ok_or_not_found(MSG_COURSE_NOT_FOUND)
    }

    async fn list_courses(&self, filter: CourseFilter) -> AppResult<Vec<Course>> {
        let store = self.db.read().await;
        let courses = match filter.search.as_deref().filter(|s| !s.is_empty()) {
            Some(query) => store.search_courses(query),
            None if filter.available_only => store.available_courses(),
            None => store.courses().iter().collect(),
        };
        Ok(courses.into_iter().cloned().collect())
    }

    async fn update_course(&self, id: Uuid, changes: UpdateCourse) -> AppResult<Course> {
        let mut store = self.db.write().await;
        store.course(id).ok_or_not_found(MSG_COURSE_NOT_FOUND)?;

        if let Some(name) = changes.name.as_deref().filter(|n| !n.is_empty()) {
            if store.course_by_name(name).is_some_and(|c| c.id != id) {
                return Err(AppError::conflict(MSG_COURSE_NAME_EXISTS));
            }
        }

        let course = store
            .update_course(id, &changes)?
            .cloned()
            .ok_or_not_found(MSG_COURSE_NOT_FOUND)?;
        tracing::info!(course_id = %id, "Course updated");
        Ok(course)
    }

    async fn delete_course(&self, id: Uuid) -> AppResult<()> {
        let mut store = self.db.write().await;
        if !store.delete_course(id) {
            return Err(AppError::not_found(MSG_COURSE_NOT_FOUND));
        }
        let removed = store.remove_enrollments_where(|e| e.course_id == id);
        tracing::info!(course_id = %id, enrollments = removed.len(), "Course deleted");
        Ok(())
    }
}
