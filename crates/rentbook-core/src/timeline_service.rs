use chrono::NaiveDate;
use uuid::Uuid;

use rentbook_domain::{EventKind, Portfolio, TimelineEvent};

use crate::CoreError;

pub struct TimelineService;

impl TimelineService {
    pub fn add(portfolio: &mut Portfolio, event: TimelineEvent) -> Result<Uuid, CoreError> {
        if portfolio.property(event.property_id).is_none() {
            return Err(CoreError::PropertyNotFound(event.property_id));
        }
        if event.title.trim().is_empty() {
            return Err(CoreError::Validation("event title cannot be empty".into()));
        }
        let id = event.id;
        portfolio.events.push(event);
        portfolio.touch();
        Ok(id)
    }

    /// Appends a system-generated event. The property is assumed to exist.
    pub(crate) fn record(
        portfolio: &mut Portfolio,
        property_id: Uuid,
        occurred_on: NaiveDate,
        kind: EventKind,
        title: String,
    ) {
        portfolio
            .events
            .push(TimelineEvent::new(property_id, occurred_on, kind, title));
    }

    /// Events of a property, newest first. Same-day events keep insertion order reversed.
    pub fn for_property(portfolio: &Portfolio, property_id: Uuid) -> Vec<&TimelineEvent> {
        let mut events: Vec<&TimelineEvent> = portfolio
            .events
            .iter()
            .filter(|event| event.property_id == property_id)
            .collect();
        events.reverse();
        events.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));
        events
    }

    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> Result<(), CoreError> {
        let before = portfolio.events.len();
        portfolio.events.retain(|event| event.id != id);
        if portfolio.events.len() == before {
            return Err(CoreError::InvalidOperation(format!("event {id} not found")));
        }
        portfolio.touch();
        Ok(())
    }
}
