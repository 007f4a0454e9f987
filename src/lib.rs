// Crate root library declaration and module exports.
//
// A read-only, lazily-derived view over scraped course-schedule stores:
// DataModel -> QuarterView -> DepartmentQuarterView -> CourseQuarterView
// -> SectionQuarterView -> ClassDuration.
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod paths;
pub mod storage;

pub use config::ModelConfig;
pub use error::{LookupKind, ModelError, Result};
pub use model::{
    ClassDuration, CourseQuarterView, DataModel, DateSpan, Day, DepartmentQuarterView,
    QuarterView, SectionQuarterView, SectionType, Status,
};
