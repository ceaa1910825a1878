use std::{fmt, str::FromStr};

use jiff::Timestamp;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attachment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Microseconds since the Unix epoch, stamped by the repository on every save.
    pub last_update: i64,
    /// Blob store path of the uploaded file.
    pub file: Option<String>,
    /// `None` is the blank choice.
    #[sea_orm(column_name = "type")]
    pub kind: Option<AttachmentKind>,
    pub film_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::film::Entity",
        from = "Column::FilmId",
        to = "super::film::Column::Id",
        on_delete = "Cascade"
    )]
    Film,
}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn last_updated(&self) -> Option<Timestamp> {
        Timestamp::from_microsecond(self.last_update).ok()
    }

    pub fn attachment_path(&self, filename: &str) -> String {
        crate::paths::attachment_path(self.film_id, filename)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind.map(AttachmentKind::as_str).unwrap_or_default();
        write!(f, "{}, ({kind})", self.title)
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(5))")]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    #[sea_orm(string_value = "audio")]
    Audio,
    #[default]
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "other")]
    Other,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 5] = [
        AttachmentKind::Audio,
        AttachmentKind::Image,
        AttachmentKind::Text,
        AttachmentKind::Video,
        AttachmentKind::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttachmentKind::Audio => "audio",
            AttachmentKind::Image => "image",
            AttachmentKind::Text => "text",
            AttachmentKind::Video => "video",
            AttachmentKind::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttachmentKind::Audio => "Audio",
            AttachmentKind::Image => "Image",
            AttachmentKind::Text => "Text",
            AttachmentKind::Video => "Video",
            AttachmentKind::Other => "Other",
        }
    }

    /// Parses a submitted choice. The empty string is the blank choice.
    pub fn from_choice(value: &str) -> CatalogResult<Option<Self>> {
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for AttachmentKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CatalogError::validation(format!("unknown attachment type {s:?}")))
    }
}
