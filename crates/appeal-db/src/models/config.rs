//! Appeal config database model

use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the appeal_config singleton row
#[derive(Debug, Clone, FromRow)]
pub struct AppealConfigModel {
    pub questions: Json<Vec<String>>,
}
