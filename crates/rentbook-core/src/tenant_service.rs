use uuid::Uuid;

use rentbook_domain::{Portfolio, Tenant};

use crate::CoreError;

pub struct TenantService;

impl TenantService {
    pub fn add(portfolio: &mut Portfolio, tenant: Tenant) -> Result<Uuid, CoreError> {
        Self::validate(&tenant)?;
        let id = tenant.id;
        portfolio.tenants.push(tenant);
        portfolio.touch();
        Ok(id)
    }

    pub fn edit<F>(portfolio: &mut Portfolio, id: Uuid, mutate: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Tenant),
    {
        let mut updated = portfolio
            .tenant(id)
            .cloned()
            .ok_or(CoreError::TenantNotFound(id))?;
        mutate(&mut updated);
        updated.id = id;
        Self::validate(&updated)?;
        if let Some(slot) = portfolio.tenant_mut(id) {
            *slot = updated;
        }
        portfolio.touch();
        Ok(())
    }

    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> Result<Tenant, CoreError> {
        let index = portfolio
            .tenants
            .iter()
            .position(|tenant| tenant.id == id)
            .ok_or(CoreError::TenantNotFound(id))?;
        if portfolio.rentals.iter().any(|rental| rental.tenant_id == id) {
            return Err(CoreError::InvalidOperation(format!(
                "tenant `{}` is referenced by rentals",
                portfolio.tenants[index].name
            )));
        }
        let removed = portfolio.tenants.remove(index);
        portfolio.touch();
        Ok(removed)
    }

    fn validate(tenant: &Tenant) -> Result<(), CoreError> {
        if tenant.name.trim().is_empty() {
            return Err(CoreError::Validation("tenant name cannot be empty".into()));
        }
        if let Some(email) = tenant.email.as_deref() {
            if !email.contains('@') {
                return Err(CoreError::Validation(format!(
                    "`{email}` is not an email address"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rentbook_domain::Rental;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_blank_name_and_bad_email() {
        let mut portfolio = Portfolio::new("Tenants");
        assert!(TenantService::add(&mut portfolio, Tenant::new("  ")).is_err());
        let mut tenant = Tenant::new("Jonas Weir");
        tenant.email = Some("jonas.example.com".into());
        assert!(TenantService::add(&mut portfolio, tenant).is_err());
        assert!(portfolio.tenants.is_empty());
    }

    #[test]
    fn referenced_tenant_is_kept() {
        let mut portfolio = Portfolio::new("Tenants");
        let id = TenantService::add(&mut portfolio, Tenant::new("Kai Moss")).unwrap();
        portfolio.rentals.push(Rental::new(
            Uuid::new_v4(),
            id,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            dec!(900),
        ));
        assert!(matches!(
            TenantService::remove(&mut portfolio, id),
            Err(CoreError::InvalidOperation(_))
        ));
        assert_eq!(portfolio.tenants.len(), 1);
    }

    #[test]
    fn edit_updates_contact_details() {
        let mut portfolio = Portfolio::new("Tenants");
        let id = TenantService::add(&mut portfolio, Tenant::new("Lea Park")).unwrap();
        TenantService::edit(&mut portfolio, id, |tenant| {
            tenant.phone = Some("+45 1234".into())
        })
        .unwrap();
        assert_eq!(
            portfolio.tenant(id).and_then(|t| t.phone.as_deref()),
            Some("+45 1234")
        );
    }
}
