//! Attachment and image metadata. File contents live outside the portfolio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub id: Uuid,
    pub property_id: Uuid,
    pub file_name: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attachment {
    pub fn new(property_id: Uuid, file_name: impl Into<String>, size_bytes: u64) -> Self {
        let file_name = file_name.into();
        Self {
            id: Uuid::new_v4(),
            property_id,
            content_type: guess_content_type(&file_name).to_string(),
            file_name,
            size_bytes,
            uploaded_at: Utc::now(),
            description: None,
        }
    }
}

impl Identifiable for Attachment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToProperty for Attachment {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub id: Uuid,
    pub property_id: Uuid,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Zero-based gallery position.
    #[serde(default)]
    pub position: u32,
}

impl Image {
    pub fn new(property_id: Uuid, file_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            file_name: file_name.into(),
            caption: None,
            position: 0,
        }
    }
}

impl Identifiable for Image {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToProperty for Image {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "doc" | "docx" => "application/msword",
        _ => "application/octet-stream",
    }
}
