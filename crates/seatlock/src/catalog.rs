//! The content catalog seam.
//!
//! Course metadata lives in an external catalog service. Seatlock only
//! reads it — fetching a course to render its playlist — so the trait
//! is exactly one method.

use seatlock_types::Course;

/// Errors from the external content catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog answered but the request failed.
    #[error("catalog error: {0}")]
    Backend(String),
}

/// Read-only access to the external course catalog.
pub trait CourseCatalog: Send + Sync + 'static {
    /// Fetches a course by id. `Ok(None)` means the course does not
    /// exist (or the caller has no access to it — the catalog does not
    /// distinguish).
    fn fetch_course(
        &self,
        course_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Course>, CatalogError>> + Send;
}
