//! Domain entities - core business objects

mod appeal;
mod config;
mod identity;

pub use appeal::{Appeal, AppealQuestion, AppealStatus, UnknownAppealStatus};
pub use config::{AppealConfig, DEFAULT_QUESTIONS};
pub use identity::{BanRecord, Identity};
