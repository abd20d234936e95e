//! Entity models, validation and partial updates

mod exec;
pub mod patch;
mod student;
mod teacher;
pub mod validate;

pub use exec::Exec;
pub use patch::{apply_patch, PatchMap, Patchable};
pub use student::Student;
pub use teacher::Teacher;
pub use validate::{validate_all, Validate};
