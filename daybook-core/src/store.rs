//! In-memory event store.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::error::{DaybookError, DaybookResult};
use crate::event::Event;
use crate::period::Period;

/// The authoritative set of events, shared between request handlers.
///
/// Every operation scans the whole collection. Writes hold the write lock for
/// both the id lookup and the mutation, so a create or update can never race
/// another writer between the check and the change. Queries return clones.
#[derive(Debug, Default)]
pub struct EventStore {
    events: RwLock<Vec<Event>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    // The Vec is never left half-updated by a panicking holder, so a poisoned
    // lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Event>> {
        self.events.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Event>> {
        self.events.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new event. Fails if an event with the same id exists.
    pub fn create(&self, event: Event) -> DaybookResult<Event> {
        let mut events = self.write();

        if position(&events, event.id()).is_some() {
            return Err(DaybookError::DuplicateId(event.id().to_string()));
        }

        events.push(event.clone());
        Ok(event)
    }

    /// Replace the event with the same id. Owner and date are replaced too.
    pub fn update(&self, event: Event) -> DaybookResult<Event> {
        let mut events = self.write();

        let index = position(&events, event.id())
            .ok_or_else(|| DaybookError::NotFound(event.id().to_string()))?;

        events[index] = event.clone();
        Ok(event)
    }

    /// Remove the event with the given id, keeping the order of the rest.
    pub fn delete(&self, id: &str) -> DaybookResult<()> {
        let mut events = self.write();

        let index = position(&events, id).ok_or_else(|| DaybookError::NotFound(id.to_string()))?;

        events.remove(index);
        Ok(())
    }

    pub fn events_for_day(&self, owner_id: &str, date: NaiveDate) -> DaybookResult<Vec<Event>> {
        self.events_in(Period::Day, owner_id, date)
    }

    pub fn events_for_week(&self, owner_id: &str, date: NaiveDate) -> DaybookResult<Vec<Event>> {
        self.events_in(Period::Week, owner_id, date)
    }

    pub fn events_for_month(&self, owner_id: &str, date: NaiveDate) -> DaybookResult<Vec<Event>> {
        self.events_in(Period::Month, owner_id, date)
    }

    /// Events of `owner_id` in the `period` around `date`, in store order.
    /// An empty match is reported as [`DaybookError::EmptyResult`].
    pub fn events_in(
        &self,
        period: Period,
        owner_id: &str,
        date: NaiveDate,
    ) -> DaybookResult<Vec<Event>> {
        let matching: Vec<Event> = self
            .read()
            .iter()
            .filter(|e| e.owner_id() == owner_id && period.contains(date, e.date()))
            .cloned()
            .collect();

        if matching.is_empty() {
            return Err(DaybookError::EmptyResult(period));
        }

        Ok(matching)
    }

    pub fn contains(&self, id: &str) -> bool {
        position(&self.read(), id).is_some()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// A copy of every stored event, in store order.
    pub fn snapshot(&self) -> Vec<Event> {
        self.read().clone()
    }
}

fn position(events: &[Event], id: &str) -> Option<usize> {
    events.iter().position(|e| e.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn event(id: &str, owner: &str, date: &str, content: &str) -> Event {
        Event::new(id, owner, date, content).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store_with(events: &[Event]) -> EventStore {
        let store = EventStore::new();
        for e in events {
            store.create(e.clone()).unwrap();
        }
        store
    }

    #[test]
    fn test_create_appends_in_order() {
        let event1 = event("1", "1", "2022-03-22", "1234");
        let event2 = event("2", "1", "2022-09-09", "1234");
        let store = store_with(&[event1.clone(), event2.clone()]);

        let event3 = event("3", "1", "2022-03-22", "abcdee");
        assert_eq!(store.create(event3.clone()), Ok(event3.clone()));
        assert_eq!(store.snapshot(), vec![event1, event2, event3]);
    }

    #[test]
    fn test_create_duplicate_id_leaves_store_unchanged() {
        let event1 = event("1", "1", "2022-03-22", "1234");
        let event2 = event("2", "1", "2022-09-09", "1234");
        let store = store_with(&[event1.clone(), event2.clone()]);

        let duplicate = event("1", "5", "2023-01-01", "abcdee");
        assert_eq!(
            store.create(duplicate.clone()),
            Err(DaybookError::DuplicateId("1".into()))
        );
        assert_eq!(store.snapshot(), vec![event1.clone(), event2.clone()]);

        // repeating the failed call fails the same way
        let err = store.create(duplicate).unwrap_err();
        assert_eq!(err.to_string(), "event with this id already exists");
        assert_eq!(err, DaybookError::DuplicateId("1".into()));
        assert_eq!(store.snapshot(), vec![event1, event2]);
    }

    #[test]
    fn test_update_replaces_whole_event() {
        let event1 = event("1", "1", "2022-03-22", "1234");
        let event2 = event("2", "1", "2022-09-09", "1234");
        let store = store_with(&[event1, event2.clone()]);

        let replacement = event("1", "1", "2022-03-22", "abcdee");
        assert_eq!(store.update(replacement.clone()), Ok(replacement.clone()));
        assert_eq!(store.snapshot(), vec![replacement, event2]);
    }

    #[test]
    fn test_update_can_move_owner_and_date() {
        let store = store_with(&[event("1", "1", "2022-03-22", "1234")]);

        let moved = event("1", "2", "2022-04-01", "1234");
        store.update(moved.clone()).unwrap();

        assert_eq!(
            store.events_for_day("1", day("2022-03-22")),
            Err(DaybookError::EmptyResult(Period::Day))
        );
        assert_eq!(store.events_for_day("2", day("2022-04-01")), Ok(vec![moved]));
    }

    #[test]
    fn test_update_missing_id_leaves_store_unchanged() {
        let event1 = event("1", "1", "2022-03-22", "1234");
        let event2 = event("2", "1", "2022-09-09", "1234");
        let store = store_with(&[event1.clone(), event2.clone()]);

        let missing = event("1111", "1", "2022-03-22", "abcdee");
        for _ in 0..2 {
            assert_eq!(
                store.update(missing.clone()),
                Err(DaybookError::NotFound("1111".into()))
            );
            assert_eq!(store.snapshot(), vec![event1.clone(), event2.clone()]);
        }
    }

    #[test]
    fn test_delete_keeps_remaining_order() {
        let event1 = event("1", "1", "2022-03-22", "1234");
        let event2 = event("2", "1", "2022-09-09", "1234");
        let event3 = event("3", "23", "2022-03-28", "1234");
        let event4 = event("4", "1", "2022-09-09", "1234");
        let event5 = event("5", "1", "2022-03-26", "1234");
        let store = store_with(&[
            event1.clone(),
            event2,
            event3.clone(),
            event4.clone(),
            event5.clone(),
        ]);

        assert_eq!(store.delete("2"), Ok(()));
        assert_eq!(
            store.snapshot(),
            vec![event1.clone(), event3.clone(), event4.clone(), event5.clone()]
        );

        assert_eq!(store.delete("300"), Err(DaybookError::NotFound("300".into())));
        assert_eq!(store.snapshot(), vec![event1, event3, event4, event5]);
    }

    #[test]
    fn test_delete_twice_fails_second_time() {
        let event1 = event("1", "1", "2022-03-22", "1234");
        let event2 = event("2", "1", "2022-09-09", "1234");
        let store = store_with(&[event1.clone(), event2]);

        assert_eq!(store.delete("2"), Ok(()));
        assert_eq!(store.snapshot(), vec![event1]);
        let err = store.delete("2").unwrap_err();
        assert_eq!(err, DaybookError::NotFound("2".into()));
        assert_eq!(err.to_string(), "event with this id doesn't exist");
        assert!(!store.contains("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_events_for_day() {
        let event1 = event("1", "1", "2022-03-22", "1234");
        let event2 = event("2", "1", "2022-09-09", "1234");
        let event3 = event("3", "23", "2022-03-22", "1234");
        let event4 = event("4", "1", "2022-03-22", "5678");
        let store = store_with(&[event1.clone(), event2, event3, event4.clone()]);

        assert_eq!(
            store.events_for_day("1", day("2022-03-22")),
            Ok(vec![event1, event4])
        );
    }

    #[test]
    fn test_events_for_day_empty_is_an_error() {
        let store = store_with(&[event("1", "1", "2022-03-22", "1234")]);

        // the owner has events, just not on this date
        let err = store.events_for_day("1", day("2022-03-23")).unwrap_err();
        assert_eq!(err, DaybookError::EmptyResult(Period::Day));
        assert_eq!(err.to_string(), "no events for this day");
        assert!(!err.is_validation());

        // someone else's events on the date don't count either
        assert!(store.events_for_day("2", day("2022-03-22")).is_err());
    }

    #[test]
    fn test_events_for_week() {
        let event1 = event("1", "1", "2022-03-22", "1234");
        let event2 = event("2", "1", "2022-09-09", "1234");
        let event3 = event("3", "23", "2022-03-24", "1234");
        let event4 = event("4", "1", "2022-03-28", "1234");
        let event5 = event("5", "1", "2022-03-26", "1234");
        let store = store_with(&[event1.clone(), event2, event3, event4, event5.clone()]);

        assert_eq!(
            store.events_for_week("1", day("2022-03-21")),
            Ok(vec![event1, event5])
        );
        assert_eq!(
            store.events_for_week("1", day("2022-03-14")),
            Err(DaybookError::EmptyResult(Period::Week))
        );
    }

    #[test]
    fn test_events_for_month() {
        let event1 = event("1", "1", "2022-10-09", "1234");
        let event2 = event("2", "1", "2022-10-22", "1234");
        let event3 = event("3", "1", "2022-09-30", "1234");
        let event4 = event("4", "1", "2022-10-01", "1234");
        let event5 = event("5", "8", "2022-10-05", "1234");
        let event6 = event("6", "1", "2021-10-09", "1234");
        let store = store_with(&[
            event1.clone(),
            event2.clone(),
            event3,
            event4.clone(),
            event5,
            event6,
        ]);

        for anchor in ["2022-10-01", "2022-10-17", "2022-10-31"] {
            assert_eq!(
                store.events_for_month("1", day(anchor)),
                Ok(vec![event1.clone(), event2.clone(), event4.clone()])
            );
        }
        assert_eq!(
            store.events_for_month("1", day("2022-11-01")),
            Err(DaybookError::EmptyResult(Period::Month))
        );
    }

    #[test]
    fn test_query_results_are_copies() {
        let store = store_with(&[event("1", "1", "2022-03-22", "1234")]);

        let mut found = store.events_for_day("1", day("2022-03-22")).unwrap();
        found.clear();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_distinct_creates_all_land() {
        const N: usize = 64;
        let store = Arc::new(EventStore::new());

        std::thread::scope(|s| {
            for i in 0..N {
                let store = Arc::clone(&store);
                s.spawn(move || {
                    let e = event(&i.to_string(), "1", "2022-03-22", "load");
                    store.create(e).unwrap();
                });
            }
        });

        assert_eq!(store.len(), N);
        for i in 0..N {
            assert!(store.contains(&i.to_string()));
        }
    }

    #[test]
    fn test_concurrent_duplicate_creates_admit_exactly_one() {
        let store = EventStore::new();
        let shared = &store;

        let successes: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(move |i| {
                    s.spawn(move || {
                        let e = event("same", "1", "2022-03-22", &i.to_string());
                        shared.create(e).is_ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = EventStore::new();
        assert!(store.is_empty());
        assert_eq!(
            store.events_for_month("1", day("2022-10-01")),
            Err(DaybookError::EmptyResult(Period::Month))
        );
    }
}
