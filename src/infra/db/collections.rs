//! The three ordered collections and their linear-scan operations.

use uuid::Uuid;

use crate::domain::{Course, Enrollment, Student, UpdateCourse, UpdateEnrollment, UpdateStudent};
use crate::errors::AppResult;

/// Students, courses and enrollments in insertion order.
///
/// Every lookup is an O(n) scan. Multi-step sequences must run while the
/// caller holds the `Database` write guard.
#[derive(Debug, Default)]
pub struct Collections {
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl Collections {
    // =========================================================================
    // Students
    // =========================================================================

    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
    }

    pub fn student(&self, id: Uuid) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn student_mut(&mut self, id: Uuid) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    pub fn student_by_email(&self, email: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.email == email)
    }

    pub fn student_by_roll_number(&self, roll_number: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.roll_number == roll_number)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Case-insensitive substring match on name or roll number
    pub fn search_students(&self, query: &str) -> Vec<&Student> {
        let query = query.to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                contains_ignore_case(&s.name, &query) || contains_ignore_case(&s.roll_number, &query)
            })
            .collect()
    }

    pub fn students_in_year(&self, year: u32) -> Vec<&Student> {
        self.students.iter().filter(|s| s.year == year).collect()
    }

    pub fn update_student(&mut self, id: Uuid, changes: &UpdateStudent) -> Option<&Student> {
        let student = self.student_mut(id)?;
        student.update(changes);
        Some(&*student)
    }

    pub fn delete_student(&mut self, id: Uuid) -> bool {
        match self.students.iter().position(|s| s.id == id) {
            Some(index) => {
                self.students.remove(index);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Courses
    // =========================================================================

    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    pub fn course(&self, id: Uuid) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_mut(&mut self, id: Uuid) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.id == id)
    }

    pub fn course_by_code(&self, course_code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.course_code == course_code)
    }

    pub fn course_by_name(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name == name)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Case-insensitive substring match on name or course code
    pub fn search_courses(&self, query: &str) -> Vec<&Course> {
        let query = query.to_lowercase();
        self.courses
            .iter()
            .filter(|c| {
                contains_ignore_case(&c.name, &query) || contains_ignore_case(&c.course_code, &query)
            })
            .collect()
    }

    /// Courses with at least one free seat
    pub fn available_courses(&self) -> Vec<&Course> {
        self.courses.iter().filter(|c| !c.is_full()).collect()
    }

    /// Delegates to `Course::update`; `Ok(None)` when the id is unknown.
    pub fn update_course(&mut self, id: Uuid, changes: &UpdateCourse) -> AppResult<Option<&Course>> {
        match self.course_mut(id) {
            Some(course) => {
                course.update(changes)?;
                Ok(Some(&*course))
            }
            None => Ok(None),
        }
    }

    pub fn delete_course(&mut self, id: Uuid) -> bool {
        match self.courses.iter().position(|c| c.id == id) {
            Some(index) => {
                self.courses.remove(index);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Enrollments
    // =========================================================================

    pub fn add_enrollment(&mut self, enrollment: Enrollment) {
        self.enrollments.push(enrollment);
    }

    pub fn enrollment(&self, id: Uuid) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id == id)
    }

    /// The active enrollment for a (student, course) pair, if any
    pub fn active_enrollment(&self, student_id: Uuid, course_id: Uuid) -> Option<&Enrollment> {
        self.enrollments
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id && e.is_active())
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Every enrollment of a student, whatever its status
    pub fn enrollments_for_student(&self, student_id: Uuid) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .collect()
    }

    /// Active enrollments of a course
    pub fn enrollments_for_course(&self, course_id: Uuid) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.course_id == course_id && e.is_active())
            .collect()
    }

    pub fn count_active_for_course(&self, course_id: Uuid) -> usize {
        self.enrollments
            .iter()
            .filter(|e| e.course_id == course_id && e.is_active())
            .count()
    }

    /// Delegates to `Enrollment::update`. Seat accounting is the caller's job.
    pub fn update_enrollment(&mut self, id: Uuid, changes: &UpdateEnrollment) -> Option<&Enrollment> {
        let enrollment = self.enrollments.iter_mut().find(|e| e.id == id)?;
        enrollment.update(changes);
        Some(&*enrollment)
    }

    pub fn delete_enrollment(&mut self, id: Uuid) -> bool {
        match self.enrollments.iter().position(|e| e.id == id) {
            Some(index) => {
                self.enrollments.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove and return every enrollment matching `predicate`
    pub fn remove_enrollments_where(&mut self, predicate: impl Fn(&Enrollment) -> bool) -> Vec<Enrollment> {
        let (removed, kept): (Vec<Enrollment>, Vec<Enrollment>) = std::mem::take(&mut self.enrollments)
            .into_iter()
            .partition(|e| predicate(e));
        self.enrollments = kept;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EnrollmentStatus, Password};

    fn student(name: &str, email: &str, roll: &str, year: u32) -> Student {
        Student::new(
            name.to_string(),
            email.to_string(),
            roll.to_string(),
            year,
            "CS".to_string(),
            Password::from_hash("hash".to_string()),
        )
    }

    fn course(name: &str, code: &str, capacity: u32) -> Course {
        Course::new(
            name.to_string(),
            code.to_string(),
            String::new(),
            3,
            "Staff".to_string(),
            capacity,
        )
    }

    #[test]
    fn test_student_lookups() {
        let mut store = Collections::default();
        let ada = student("Ada Lovelace", "ada@uni.edu", "CS-001", 1);
        let id = ada.id;
        store.add_student(ada);
        store.add_student(student("Alan Turing", "alan@uni.edu", "CS-002", 2));

        assert_eq!(store.student(id).unwrap().name, "Ada Lovelace");
        assert!(store.student_by_email("ada@uni.edu").is_some());
        assert!(store.student_by_email("ADA@uni.edu").is_none());
        assert!(store.student_by_roll_number("CS-002").is_some());
        assert!(store.student(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_and_roll_number() {
        let mut store = Collections::default();
        store.add_student(student("Ada Lovelace", "ada@uni.edu", "CS-001", 1));
        store.add_student(student("Alan Turing", "alan@uni.edu", "ee-777", 2));

        assert_eq!(store.search_students("LOVE").len(), 1);
        assert_eq!(store.search_students("EE-7").len(), 1);
        assert_eq!(store.search_students("a").len(), 2);
        assert_eq!(store.students_in_year(2).len(), 1);
    }

    #[test]
    fn test_course_search_and_availability() {
        let mut store = Collections::default();
        let mut full = course("Networks", "CS330", 1);
        full.add_student().unwrap();
        store.add_course(full);
        store.add_course(course("Databases", "CS340", 2));

        assert_eq!(store.search_courses("cs3").len(), 2);
        assert_eq!(store.search_courses("base").len(), 1);
        let available = store.available_courses();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Databases");
        assert!(store.course_by_code("CS330").is_some());
        assert!(store.course_by_name("Databases").is_some());
    }

    #[test]
    fn test_delete_reports_existence() {
        let mut store = Collections::default();
        let c = course("Networks", "CS330", 1);
        let id = c.id;
        store.add_course(c);

        assert!(store.delete_course(id));
        assert!(!store.delete_course(id));
        assert!(store.courses().is_empty());
    }

    #[test]
    fn test_update_unknown_course_is_none() {
        let mut store = Collections::default();
        let result = store.update_course(Uuid::new_v4(), &UpdateCourse::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_active_enrollment_lookup_ignores_finished_ones() {
        let mut store = Collections::default();
        let (student_id, course_id) = (Uuid::new_v4(), Uuid::new_v4());

        let mut finished = Enrollment::new(student_id, course_id);
        finished.set_status(EnrollmentStatus::Completed);
        store.add_enrollment(finished);
        assert!(store.active_enrollment(student_id, course_id).is_none());
        assert_eq!(store.count_active_for_course(course_id), 0);
        assert_eq!(store.enrollments_for_student(student_id).len(), 1);
        assert!(store.enrollments_for_course(course_id).is_empty());

        store.add_enrollment(Enrollment::new(student_id, course_id));
        assert!(store.active_enrollment(student_id, course_id).is_some());
        assert_eq!(store.count_active_for_course(course_id), 1);
    }

    #[test]
    fn test_remove_enrollments_where_keeps_order_of_the_rest() {
        let mut store = Collections::default();
        let target = Uuid::new_v4();
        let first = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());
        let last = Enrollment::new(Uuid::new_v4(), Uuid::new_v4());
        let (first_id, last_id) = (first.id, last.id);

        store.add_enrollment(first);
        store.add_enrollment(Enrollment::new(target, Uuid::new_v4()));
        store.add_enrollment(last);

        let removed = store.remove_enrollments_where(|e| e.student_id == target);
        assert_eq!(removed.len(), 1);
        let remaining: Vec<Uuid> = store.enrollments().iter().map(|e| e.id).collect();
        assert_eq!(remaining, vec![first_id, last_id]);
    }
}
