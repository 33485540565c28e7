//! Model to entity mappers
//!
//! - `TryFrom<Model> for Entity`: rows whose columns fail domain parsing
//!   surface as `DomainError::CorruptRecord`
//! - `*Insert` structs: entity data prepared for binding

mod appeal;

pub use appeal::AppealInsert;
