//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum allowed items per page
pub const MAX_PAGE_SIZE: usize = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: usize = 1;

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours (7 days)
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 168;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Secret used by debug builds when JWT_SECRET is unset
pub const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Response messages
// =============================================================================

/// Create requests with a missing or empty required field
pub const MSG_FIELDS_REQUIRED: &str = "All fields required";

pub const MSG_STUDENT_NOT_FOUND: &str = "Student not found";
pub const MSG_COURSE_NOT_FOUND: &str = "Course not found";
pub const MSG_ENROLLMENT_NOT_FOUND: &str = "Enrollment not found";
pub const MSG_ROUTE_NOT_FOUND: &str = "Route not found";

/// Duplicate email on the registration path
pub const MSG_REGISTER_EMAIL_EXISTS: &str = "Email exists";
pub const MSG_EMAIL_EXISTS: &str = "Email already exists";
pub const MSG_ROLL_NUMBER_EXISTS: &str = "Roll number already exists";
pub const MSG_COURSE_CODE_EXISTS: &str = "Course code already exists";
pub const MSG_COURSE_NAME_EXISTS: &str = "Course name already exists";

pub const MSG_ALREADY_ENROLLED: &str = "Already enrolled";
pub const MSG_COURSE_FULL: &str = "Course is full";
pub const MSG_CAPACITY_BELOW_ENROLLMENT: &str =
    "Max capacity cannot be less than current enrollment";

pub const MSG_SERVER_RUNNING: &str = "Server running";
pub const MSG_REGISTERED: &str = "Registered";
pub const MSG_LOGGED_IN: &str = "Logged in";

pub const MSG_STUDENT_CREATED: &str = "Student created";
pub const MSG_STUDENT_UPDATED: &str = "Student updated";
pub const MSG_STUDENT_DELETED: &str = "Student deleted";

pub const MSG_COURSE_CREATED: &str = "Course created";
pub const MSG_COURSE_UPDATED: &str = "Course updated";
pub const MSG_COURSE_DELETED: &str = "Course deleted";

pub const MSG_ENROLLED: &str = "Enrolled successfully";
pub const MSG_ENROLLMENT_UPDATED: &str = "Updated";
pub const MSG_ENROLLMENT_DROPPED: &str = "Dropped course";
