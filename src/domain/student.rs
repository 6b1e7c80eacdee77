//! Student domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{non_empty, Password};

/// Student domain entity
#[derive(Debug, Clone)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub year: u32,
    pub department: String,
    password: Password,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Create a new student with a fresh identity
    pub fn new(
        name: String,
        email: String,
        roll_number: String,
        year: u32,
        department: String,
        password: Password,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            roll_number,
            year,
            department,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check a plain text password against the stored hash
    pub fn compare_password(&self, plain_text: &str) -> bool {
        self.password.verify(plain_text)
    }

    /// Apply the present, non-empty fields of `changes`
    pub fn update(&mut self, changes: &UpdateStudent) {
        if let Some(name) = non_empty(&changes.name) {
            self.name = name.to_string();
        }
        if let Some(email) = non_empty(&changes.email) {
            self.email = email.to_string();
        }
        if let Some(roll_number) = non_empty(&changes.roll_number) {
            self.roll_number = roll_number.to_string();
        }
        if let Some(year) = changes.year.filter(|y| *y > 0) {
            self.year = year;
        }
        if let Some(department) = non_empty(&changes.department) {
            self.department = department.to_string();
        }
        self.updated_at = Utc::now();
    }
}

/// Validated student creation input
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub year: u32,
    pub department: String,
    pub password: String,
}

/// Student update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudent {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@uni.edu")]
    pub email: Option<String>,
    #[schema(example = "CS-2024-001")]
    pub roll_number: Option<String>,
    #[schema(example = 2)]
    pub year: Option<u32>,
    #[schema(example = "Computer Science")]
    pub department: Option<String>,
}

/// Student response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@uni.edu")]
    pub email: String,
    #[schema(example = "CS-2024-001")]
    pub roll_number: String,
    #[schema(example = 1)]
    pub year: u32,
    #[schema(example = "Computer Science")]
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            roll_number: student.roll_number,
            year: student.year,
            department: student.department,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}
