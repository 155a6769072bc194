use tracing::warn;
use uuid::Uuid;

use rentbook_domain::{Owner, Portfolio};

use crate::CoreError;

pub struct OwnerService;

impl OwnerService {
    pub fn add(portfolio: &mut Portfolio, owner: Owner) -> Result<Uuid, CoreError> {
        Self::validate(portfolio, &owner)?;
        let id = owner.id;
        portfolio.owners.push(owner);
        portfolio.touch();
        Ok(id)
    }

    /// Applies `mutate` to a copy of the owner and stores it if it still validates.
    pub fn edit<F>(portfolio: &mut Portfolio, id: Uuid, mutate: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Owner),
    {
        let mut updated = portfolio
            .owner(id)
            .cloned()
            .ok_or(CoreError::OwnerNotFound(id))?;
        mutate(&mut updated);
        updated.id = id;
        Self::validate(portfolio, &updated)?;
        if let Some(slot) = portfolio.owner_mut(id) {
            *slot = updated;
        }
        portfolio.touch();
        Ok(())
    }

    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> Result<Owner, CoreError> {
        let index = portfolio
            .owners
            .iter()
            .position(|owner| owner.id == id)
            .ok_or(CoreError::OwnerNotFound(id))?;
        let owned = portfolio
            .properties
            .iter()
            .filter(|property| property.owner_id == id)
            .count();
        if owned > 0 {
            warn!(owner_id = %id, owned, "refusing to remove owner with properties");
            return Err(CoreError::InvalidOperation(format!(
                "owner `{}` still owns {owned} propert{}",
                portfolio.owners[index].name,
                if owned == 1 { "y" } else { "ies" }
            )));
        }
        let removed = portfolio.owners.remove(index);
        portfolio.touch();
        Ok(removed)
    }

    fn validate(portfolio: &Portfolio, owner: &Owner) -> Result<(), CoreError> {
        let name = owner.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("owner name cannot be empty".into()));
        }
        let taken = portfolio
            .owners
            .iter()
            .any(|other| other.id != owner.id && other.name.trim().eq_ignore_ascii_case(name));
        if taken {
            return Err(CoreError::Validation(format!(
                "an owner named `{name}` already exists"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbook_domain::{Property, PropertyKind};

    #[test]
    fn names_are_unique_ignoring_case() {
        let mut portfolio = Portfolio::new("Owners");
        OwnerService::add(&mut portfolio, Owner::new("Margit Holm")).unwrap();
        let err = OwnerService::add(&mut portfolio, Owner::new("margit holm")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(portfolio.owners.len(), 1);
    }

    #[test]
    fn edit_keeps_id_and_revalidates() {
        let mut portfolio = Portfolio::new("Owners");
        let first = OwnerService::add(&mut portfolio, Owner::new("A. Berg")).unwrap();
        OwnerService::add(&mut portfolio, Owner::new("C. Dahl")).unwrap();

        OwnerService::edit(&mut portfolio, first, |owner| {
            owner.email = Some("berg@example.com".into())
        })
        .unwrap();
        assert_eq!(
            portfolio.owner(first).and_then(|o| o.email.as_deref()),
            Some("berg@example.com")
        );

        let clash = OwnerService::edit(&mut portfolio, first, |owner| owner.name = "C. Dahl".into());
        assert!(clash.is_err());
        assert_eq!(portfolio.owner(first).unwrap().name, "A. Berg");
    }

    #[test]
    fn owner_with_properties_cannot_be_removed() {
        let mut portfolio = Portfolio::new("Owners");
        let id = OwnerService::add(&mut portfolio, Owner::new("E. Falk")).unwrap();
        portfolio
            .properties
            .push(Property::new(id, "Quay 7", PropertyKind::Commercial));
        assert!(matches!(
            OwnerService::remove(&mut portfolio, id),
            Err(CoreError::InvalidOperation(_))
        ));
        portfolio.properties.clear();
        OwnerService::remove(&mut portfolio, id).unwrap();
        assert!(portfolio.owners.is_empty());
    }
}
