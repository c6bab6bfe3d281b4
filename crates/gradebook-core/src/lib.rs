//! gradebook-core — student records, validation, and the CSV record store.
//!
//! This crate defines the student entity, the grade and test score types it
//! validates against, and the file format its subjects are persisted in.

pub mod config;
pub mod error;
pub mod journal;
pub mod model;
pub mod store;
pub mod student;

pub use config::{load_config_from, GradebookConfig};
pub use error::{LookupError, ValidationError};
pub use journal::{FileLog, MemoryLog, OperationLog};
pub use model::{Grade, SubjectRecord, TestScore};
pub use student::Student;
