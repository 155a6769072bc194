//! The portfolio aggregate holding every managed entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    fee::FeeTemplate,
    media::{Attachment, Image},
    meter::Meter,
    owner::Owner,
    payment::Payment,
    property::Property,
    rental::Rental,
    tenant::Tenant,
    timeline::TimelineEvent,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub rentals: Vec<Rental>,
    #[serde(default)]
    pub fee_templates: Vec<FeeTemplate>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub meters: Vec<Meter>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Portfolio::schema_version_default")]
    pub schema_version: u8,
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            owners: Vec::new(),
            properties: Vec::new(),
            tenants: Vec::new(),
            rentals: Vec::new(),
            fee_templates: Vec::new(),
            payments: Vec::new(),
            meters: Vec::new(),
            attachments: Vec::new(),
            images: Vec::new(),
            events: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn owner(&self, id: Uuid) -> Option<&Owner> {
        self.owners.iter().find(|owner| owner.id == id)
    }

    pub fn owner_mut(&mut self, id: Uuid) -> Option<&mut Owner> {
        self.owners.iter_mut().find(|owner| owner.id == id)
    }

    pub fn property(&self, id: Uuid) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn property_mut(&mut self, id: Uuid) -> Option<&mut Property> {
        self.properties.iter_mut().find(|property| property.id == id)
    }

    pub fn tenant(&self, id: Uuid) -> Option<&Tenant> {
        self.tenants.iter().find(|tenant| tenant.id == id)
    }

    pub fn tenant_mut(&mut self, id: Uuid) -> Option<&mut Tenant> {
        self.tenants.iter_mut().find(|tenant| tenant.id == id)
    }

    pub fn rental(&self, id: Uuid) -> Option<&Rental> {
        self.rentals.iter().find(|rental| rental.id == id)
    }

    pub fn rental_mut(&mut self, id: Uuid) -> Option<&mut Rental> {
        self.rentals.iter_mut().find(|rental| rental.id == id)
    }

    pub fn fee_template(&self, id: Uuid) -> Option<&FeeTemplate> {
        self.fee_templates.iter().find(|fee| fee.id == id)
    }

    pub fn fee_template_mut(&mut self, id: Uuid) -> Option<&mut FeeTemplate> {
        self.fee_templates.iter_mut().find(|fee| fee.id == id)
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    pub fn meter(&self, id: Uuid) -> Option<&Meter> {
        self.meters.iter().find(|meter| meter.id == id)
    }

    pub fn meter_mut(&mut self, id: Uuid) -> Option<&mut Meter> {
        self.meters.iter_mut().find(|meter| meter.id == id)
    }

    pub fn fee_templates_for(&self, property_id: Uuid) -> impl Iterator<Item = &FeeTemplate> {
        self.fee_templates
            .iter()
            .filter(move |fee| fee.property_id == property_id)
    }

    pub fn payments_for(&self, property_id: Uuid) -> impl Iterator<Item = &Payment> {
        self.payments
            .iter()
            .filter(move |payment| payment.property_id == property_id)
    }

    pub fn rentals_for(&self, property_id: Uuid) -> impl Iterator<Item = &Rental> {
        self.rentals
            .iter()
            .filter(move |rental| rental.property_id == property_id)
    }

    /// Resolves a property by id string, exact name, or unique name prefix.
    pub fn find_property(&self, needle: &str) -> Option<&Property> {
        if let Ok(id) = Uuid::parse_str(needle) {
            return self.property(id);
        }
        let lowered = needle.trim().to_lowercase();
        if let Some(exact) = self
            .properties
            .iter()
            .find(|property| property.name.to_lowercase() == lowered)
        {
            return Some(exact);
        }
        let mut matches = self
            .properties
            .iter()
            .filter(|property| property.name.to_lowercase().starts_with(&lowered));
        match (matches.next(), matches.next()) {
            (Some(single), None) => Some(single),
            _ => None,
        }
    }

    /// Resolves a fee template by id string or exact name (case-insensitive).
    pub fn find_fee_template(&self, needle: &str) -> Option<&FeeTemplate> {
        if let Ok(id) = Uuid::parse_str(needle) {
            return self.fee_template(id);
        }
        let lowered = needle.trim().to_lowercase();
        self.fee_templates
            .iter()
            .find(|fee| fee.name.to_lowercase() == lowered)
    }
}
