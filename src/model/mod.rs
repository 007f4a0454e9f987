// File: ./src/model/mod.rs
pub mod course;
pub mod data;
pub mod department;
pub mod duration;
pub mod parser;
pub mod quarter;
pub mod section;

pub use course::CourseQuarterView;
pub use data::DataModel;
pub use department::DepartmentQuarterView;
pub use duration::{ClassDuration, DateSpan, Day};
pub use parser::CourseKey;
pub use quarter::QuarterView;
pub use section::{SectionQuarterView, SectionType, Status};
