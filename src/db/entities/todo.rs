use std::fmt;

use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

pub const TITLE_MAX_LENGTH: usize = 200;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,
    #[sea_orm(default_value = false)]
    pub status: bool,
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    #[error("This field may not be blank.")]
    Blank,
    #[error("Ensure this field has no more than {} characters.", TITLE_MAX_LENGTH)]
    TooLong,
}

/// Trims surrounding whitespace and enforces the length bounds on a title.
/// Length is counted in characters, not bytes.
pub fn clean_title(raw: &str) -> Result<String, TitleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Blank);
    }
    if trimmed.chars().count() > TITLE_MAX_LENGTH {
        return Err(TitleError::TooLong);
    }
    Ok(trimmed.to_string())
}
