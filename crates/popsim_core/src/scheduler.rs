//! Date-keyed event queue.
//!
//! The queue is an ordered multi-map: many events may share a trigger date,
//! and events on the same date fire in insertion order. Draining is
//! "pop-minimum, execute, repeat" rather than "snapshot the due set, then
//! run it": each `pop_due` call re-reads the earliest pending date, so an
//! event scheduled *while a drain is in progress* (a birth registering a
//! child that itself schedules events at or before the cutoff) is picked up
//! by the same drain, while anything past the cutoff stays queued.

use std::collections::{BTreeMap, VecDeque};

use jiff::civil::Date;

use crate::model::Event;

#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    entries: BTreeMap<Date, VecDeque<Event>>,
    pending: usize,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event. Always succeeds: a date already behind the cursor
    /// is simply due on the next drain.
    pub fn schedule(&mut self, date: Date, event: Event) {
        self.entries.entry(date).or_default().push_back(event);
        self.pending += 1;
    }

    /// Remove and return the earliest-date, earliest-inserted event with a
    /// trigger date at or before `cutoff`, if any.
    pub fn pop_due(&mut self, cutoff: Date) -> Option<(Date, Event)> {
        let mut entry = self.entries.first_entry()?;
        let date = *entry.key();
        if date > cutoff {
            return None;
        }
        let bucket = entry.get_mut();
        let event = bucket.pop_front();
        if bucket.is_empty() {
            entry.remove();
        }
        event.map(|event| {
            self.pending -= 1;
            (date, event)
        })
    }

    /// The earliest pending trigger date.
    #[must_use]
    pub fn next_date(&self) -> Option<Date> {
        self.entries.keys().next().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Pending events in firing order. For inspection and tests.
    pub fn iter(&self) -> impl Iterator<Item = (Date, &Event)> {
        self.entries
            .iter()
            .flat_map(|(date, bucket)| bucket.iter().map(|event| (*date, event)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonId;
    use jiff::civil::date;

    fn death(id: u64) -> Event {
        Event::Death {
            person: PersonId(id),
        }
    }

    #[test]
    fn test_pop_due_respects_cutoff() {
        let mut queue = EventQueue::new();
        queue.schedule(date(2000, 1, 1), death(0));
        queue.schedule(date(2000, 3, 1), death(1));

        let cutoff = date(2000, 2, 1);
        assert_eq!(queue.pop_due(cutoff), Some((date(2000, 1, 1), death(0))));
        assert_eq!(queue.pop_due(cutoff), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_pop_due_empty_queue_is_noop() {
        let mut queue = EventQueue::new();
        assert_eq!(queue.pop_due(date(2100, 1, 1)), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_date_events_fire_in_insertion_order() {
        let mut queue = EventQueue::new();
        let d = date(2010, 6, 1);
        queue.schedule(d, death(0));
        queue.schedule(d, death(1));
        queue.schedule(d, death(2));

        assert_eq!(queue.pop_due(d), Some((d, death(0))));
        assert_eq!(queue.pop_due(d), Some((d, death(1))));
        assert_eq!(queue.pop_due(d), Some((d, death(2))));
        assert_eq!(queue.pop_due(d), None);
    }

    #[test]
    fn test_dates_drain_in_ascending_order() {
        let mut queue = EventQueue::new();
        queue.schedule(date(2003, 1, 1), death(2));
        queue.schedule(date(2001, 1, 1), death(0));
        queue.schedule(date(2002, 1, 1), death(1));

        let cutoff = date(2010, 1, 1);
        let mut fired = Vec::new();
        while let Some((d, _)) = queue.pop_due(cutoff) {
            fired.push(d);
        }
        assert_eq!(
            fired,
            vec![date(2001, 1, 1), date(2002, 1, 1), date(2003, 1, 1)]
        );
    }

    #[test]
    fn test_insertion_during_drain_is_seen_by_same_drain() {
        let mut queue = EventQueue::new();
        let cutoff = date(2005, 1, 1);
        queue.schedule(date(2001, 1, 1), death(0));

        let mut fired = Vec::new();
        while let Some((d, event)) = queue.pop_due(cutoff) {
            // The first event inserts one more due event and one past the
            // cutoff, mimicking a birth registering a child mid-drain.
            if event == death(0) {
                queue.schedule(date(2004, 1, 1), death(1));
                queue.schedule(date(2009, 1, 1), death(2));
            }
            fired.push((d, event));
        }

        assert_eq!(
            fired,
            vec![
                (date(2001, 1, 1), death(0)),
                (date(2004, 1, 1), death(1)),
            ]
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_date(), Some(date(2009, 1, 1)));
    }

    #[test]
    fn test_len_tracks_schedules_and_pops() {
        let mut queue = EventQueue::new();
        assert_eq!(queue.len(), 0);
        queue.schedule(date(2001, 1, 1), death(0));
        queue.schedule(date(2001, 1, 1), death(1));
        assert_eq!(queue.len(), 2);
        queue.pop_due(date(2001, 1, 1));
        assert_eq!(queue.len(), 1);
    }
}
