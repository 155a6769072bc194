use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{FeeTemplate, Portfolio};

use crate::{frequency::FrequencyRule, CoreError};

pub struct FeeService;

impl FeeService {
    /// Stores a template once its amount and frequency rule validate.
    pub fn add(portfolio: &mut Portfolio, template: FeeTemplate) -> Result<Uuid, CoreError> {
        if portfolio.property(template.property_id).is_none() {
            return Err(CoreError::PropertyNotFound(template.property_id));
        }
        Self::validate(portfolio, &template)?;
        let id = template.id;
        portfolio.fee_templates.push(template);
        portfolio.touch();
        Ok(id)
    }

    pub fn edit<F>(portfolio: &mut Portfolio, id: Uuid, mutate: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut FeeTemplate),
    {
        let current = portfolio
            .fee_template(id)
            .ok_or(CoreError::FeeTemplateNotFound(id))?;
        let mut updated = current.clone();
        let property_id = current.property_id;
        mutate(&mut updated);
        updated.id = id;
        if updated.property_id != property_id {
            return Err(CoreError::InvalidOperation(
                "fee templates cannot move between properties".into(),
            ));
        }
        Self::validate(portfolio, &updated)?;
        if let Some(slot) = portfolio.fee_template_mut(id) {
            *slot = updated;
        }
        portfolio.touch();
        Ok(())
    }

    pub fn set_active(portfolio: &mut Portfolio, id: Uuid, active: bool) -> Result<(), CoreError> {
        let template = portfolio
            .fee_template_mut(id)
            .ok_or(CoreError::FeeTemplateNotFound(id))?;
        template.is_active = active;
        portfolio.touch();
        Ok(())
    }

    /// Removes the template. Payments keep their amounts but lose the link.
    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> Result<FeeTemplate, CoreError> {
        let index = portfolio
            .fee_templates
            .iter()
            .position(|fee| fee.id == id)
            .ok_or(CoreError::FeeTemplateNotFound(id))?;
        let removed = portfolio.fee_templates.remove(index);
        for payment in portfolio
            .payments
            .iter_mut()
            .filter(|payment| payment.fee_template_id == Some(id))
        {
            payment.fee_template_id = None;
        }
        portfolio.touch();
        Ok(removed)
    }

    pub fn active_for_property(portfolio: &Portfolio, property_id: Uuid) -> Vec<&FeeTemplate> {
        portfolio
            .fee_templates_for(property_id)
            .filter(|fee| fee.is_active)
            .collect()
    }

    fn validate(portfolio: &Portfolio, template: &FeeTemplate) -> Result<(), CoreError> {
        let name = template.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("fee name cannot be empty".into()));
        }
        if template.amount <= Decimal::ZERO {
            return Err(CoreError::Validation("fee amount must be positive".into()));
        }
        FrequencyRule::of(template)?;
        let duplicate = portfolio.fee_templates_for(template.property_id).any(|other| {
            other.id != template.id && other.name.trim().eq_ignore_ascii_case(name)
        });
        if duplicate {
            return Err(CoreError::Validation(format!(
                "a fee named `{name}` already exists on this property"
            )));
        }
        Ok(())
    }
}
