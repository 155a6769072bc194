//! Properties managed on behalf of owners.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub kind: PropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Gallery image shown first in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_id: Option<Uuid>,
}

impl Property {
    pub fn new(owner_id: Uuid, name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            address: String::new(),
            kind,
            notes: None,
            cover_image_id: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

impl Identifiable for Property {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Property {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Property {
    fn display_label(&self) -> String {
        if self.address.is_empty() {
            format!("{} ({})", self.name, self.kind)
        } else {
            format!("{} ({}) - {}", self.name, self.kind, self.address)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PropertyKind {
    #[default]
    Apartment,
    House,
    Commercial,
    Land,
    Other,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PropertyKind::Apartment => "Apartment",
            PropertyKind::House => "House",
            PropertyKind::Commercial => "Commercial",
            PropertyKind::Land => "Land",
            PropertyKind::Other => "Other",
        };
        f.write_str(label)
    }
}

impl PropertyKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "apartment" | "flat" => Some(PropertyKind::Apartment),
            "house" => Some(PropertyKind::House),
            "commercial" | "office" => Some(PropertyKind::Commercial),
            "land" => Some(PropertyKind::Land),
            "other" => Some(PropertyKind::Other),
            _ => None,
        }
    }
}
