//! Course domain entity and capacity accounting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::non_empty;
use crate::config::{MSG_CAPACITY_BELOW_ENROLLMENT, MSG_COURSE_FULL};
use crate::errors::{AppError, AppResult};

/// Course domain entity.
///
/// `current_enrollment` stays within `[0, max_capacity]`; the only ways to
/// move it are `add_student` and `remove_student`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    #[schema(example = "Operating Systems")]
    pub name: String,
    #[schema(example = "CS301")]
    pub course_code: String,
    pub description: String,
    #[schema(example = 4)]
    pub credits: u32,
    #[schema(example = "Dr. Tanenbaum")]
    pub instructor: String,
    #[schema(example = 30)]
    pub max_capacity: u32,
    #[schema(example = 0)]
    current_enrollment: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Create a new course with no enrolled students
    pub fn new(
        name: String,
        course_code: String,
        description: String,
        credits: u32,
        instructor: String,
        max_capacity: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            course_code,
            description,
            credits,
            instructor,
            max_capacity,
            current_enrollment: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn current_enrollment(&self) -> u32 {
        self.current_enrollment
    }

    pub fn is_full(&self) -> bool {
        self.current_enrollment >= self.max_capacity
    }

    /// Take one seat.
    ///
    /// # Errors
    /// Rejects without mutating when the course is full.
    pub fn add_student(&mut self) -> AppResult<()> {
        if self.is_full() {
            return Err(AppError::rejected(MSG_COURSE_FULL));
        }
        self.current_enrollment += 1;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Release one seat. Returns `false` if the count was already zero.
    pub fn remove_student(&mut self) -> bool {
        if self.current_enrollment == 0 {
            return false;
        }
        self.current_enrollment -= 1;
        self.updated_at = Utc::now();
        true
    }

    /// Apply the present, non-empty fields of `changes`.
    ///
    /// # Errors
    /// Rejects a capacity below the current enrollment; nothing is applied.
    pub fn update(&mut self, changes: &UpdateCourse) -> AppResult<()> {
        let max_capacity = changes.max_capacity.filter(|c| *c > 0);
        if max_capacity.is_some_and(|c| c < self.current_enrollment) {
            return Err(AppError::rejected(MSG_CAPACITY_BELOW_ENROLLMENT));
        }

        if let Some(name) = non_empty(&changes.name) {
            self.name = name.to_string();
        }
        if let Some(description) = non_empty(&changes.description) {
            self.description = description.to_string();
        }
        if let Some(credits) = changes.credits.filter(|c| *c > 0) {
            self.credits = credits;
        }
        if let Some(instructor) = non_empty(&changes.instructor) {
            self.instructor = instructor.to_string();
        }
        if let Some(max_capacity) = max_capacity {
            self.max_capacity = max_capacity;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Validated course creation input
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub course_code: String,
    pub description: String,
    pub credits: u32,
    pub instructor: String,
    pub max_capacity: u32,
}

impl From<NewCourse> for Course {
    fn from(input: NewCourse) -> Self {
        Course::new(
            input.name,
            input.course_code,
            input.description,
            input.credits,
            input.instructor,
            input.max_capacity,
        )
    }
}

/// Course update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<u32>,
    pub instructor: Option<String>,
    pub max_capacity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(capacity: u32) -> Course {
        Course::new(
            "Compilers".to_string(),
            "CS401".to_string(),
            "Parsing and codegen".to_string(),
            4,
            "Dr. Aho".to_string(),
            capacity,
        )
    }

    #[test]
    fn test_add_student_stops_at_capacity() {
        let mut course = course(2);
        assert!(course.add_student().is_ok());
        assert!(course.add_student().is_ok());
        assert!(course.is_full());

        let err = course.add_student().unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref m) if m == MSG_COURSE_FULL));
        assert_eq!(course.current_enrollment(), 2);
    }

    #[test]
    fn test_remove_student_floors_at_zero() {
        let mut course = course(1);
        assert!(!course.remove_student());
        assert_eq!(course.current_enrollment(), 0);

        course.add_student().unwrap();
        assert!(course.remove_student());
        assert_eq!(course.current_enrollment(), 0);
    }

    #[test]
    fn test_zero_capacity_course_is_always_full() {
        let mut course = course(0);
        assert!(course.is_full());
        assert!(course.add_student().is_err());
    }

    #[test]
    fn test_update_rejects_capacity_below_enrollment() {
        let mut course = course(3);
        course.add_student().unwrap();
        course.add_student().unwrap();

        let err = course
            .update(&UpdateCourse {
                name: Some("Renamed".to_string()),
                max_capacity: Some(1),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, AppError::Rejected(_)));
        assert_eq!(course.max_capacity, 3);
        assert_eq!(course.name, "Compilers");
    }

    #[test]
    fn test_update_skips_falsy_fields() {
        let mut course = course(3);
        course
            .update(&UpdateCourse {
                credits: Some(0),
                instructor: Some(String::new()),
                max_capacity: Some(5),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(course.credits, 4);
        assert_eq!(course.instructor, "Dr. Aho");
        assert_eq!(course.max_capacity, 5);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(course(3)).unwrap();
        assert_eq!(json["courseCode"], "CS401");
        assert_eq!(json["maxCapacity"], 3);
        assert_eq!(json["currentEnrollment"], 0);
    }
}
