//! Derived views over the store: search, priority ordering, statistics
//!
//! All read-only; nothing in here persists.

use crate::{Priority, Store, Ticket};
use serde::Serialize;
use std::cmp::Reverse;

/// Aggregate counts over the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub closed: usize,
    pub by_priority: PriorityCounts,
}

/// Per-priority ticket counts
///
/// Tickets carrying an unrecognized priority string count toward `total`
/// but land in none of these buckets, so the buckets are not guaranteed
/// to sum to the total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    #[serde(rename = "NullPriority")]
    pub null_priority: usize,
}

impl Store {
    /// Ids of tickets whose description contains `text`, case-insensitive,
    /// in creation order
    pub fn find_by_description(&self, text: &str) -> Vec<u64> {
        let needle = text.to_lowercase();
        self.tickets
            .iter()
            .filter(|(_, ticket)| ticket.description.to_lowercase().contains(&needle))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Ids ordered by priority rank, high first. Equal priorities keep
    /// creation order; with `descending` the rank groups reverse but ties
    /// within a group still keep creation order.
    pub fn list_by_priority(&self, descending: bool) -> Vec<u64> {
        let mut entries: Vec<(u64, u8)> = self
            .tickets
            .iter()
            .map(|(id, ticket)| (*id, ticket.priority.rank()))
            .collect();

        // sort_by_key is stable, so ties never reorder between runs
        if descending {
            entries.sort_by_key(|&(_, rank)| Reverse(rank));
        } else {
            entries.sort_by_key(|&(_, rank)| rank);
        }
        entries.into_iter().map(|(id, _)| id).collect()
    }

    /// Id/ticket pairs in reverse creation order. A pure view: the stored
    /// order never changes and nothing is written.
    pub fn reversed(&self) -> Vec<(u64, &Ticket)> {
        self.tickets
            .iter()
            .rev()
            .map(|(id, ticket)| (*id, ticket))
            .collect()
    }

    /// Count tickets in total, closed, and per priority bucket
    pub fn statistics(&self) -> Stats {
        let mut by_priority = PriorityCounts::default();
        let mut closed = 0;

        for ticket in self.tickets.values() {
            if ticket.is_closed() {
                closed += 1;
            }
            match ticket.priority {
                Priority::High => by_priority.high += 1,
                Priority::Medium => by_priority.medium += 1,
                Priority::Low => by_priority.low += 1,
                Priority::Null => by_priority.null_priority += 1,
                Priority::Other(_) => {}
            }
        }

        Stats {
            total: self.tickets.len(),
            closed,
            by_priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn open_temp() -> (TempDir, Store) {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("tickets.json")).unwrap();
        (dir, store)
    }

    fn create(store: &mut Store, description: &str, priority: Priority) -> u64 {
        store
            .create(Ticket::new(description.to_string(), priority))
            .unwrap()
    }

    #[test]
    fn test_find_by_description_is_case_insensitive() {
        let (_dir, mut store) = open_temp();
        let a = create(&mut store, "Printer broken", Priority::High);
        create(&mut store, "monitor flicker", Priority::Medium);
        let b = create(&mut store, "PRINTER slow", Priority::Low);

        assert_eq!(store.find_by_description("printer"), vec![a, b]);
        assert_eq!(store.find_by_description("nothing"), Vec::<u64>::new());
    }

    #[test]
    fn test_list_by_priority_keeps_ties_in_creation_order() {
        let (_dir, mut store) = open_temp();
        let a = create(&mut store, "a", Priority::Low);
        let b = create(&mut store, "b", Priority::High);
        let c = create(&mut store, "c", Priority::Low);
        let d = create(&mut store, "d", Priority::Medium);
        let e = create(&mut store, "e", Priority::Other("urgent".into()));

        assert_eq!(store.list_by_priority(false), vec![b, d, a, c, e]);
        // Groups reverse, ties inside a group do not: a still before c
        assert_eq!(store.list_by_priority(true), vec![e, a, c, d, b]);
    }

    #[test]
    fn test_statistics_counts_and_unknown_priority_gap() {
        let (_dir, mut store) = open_temp();
        create(&mut store, "a", Priority::High);
        let b = create(&mut store, "b", Priority::Low);
        create(&mut store, "c", Priority::Null);
        create(&mut store, "d", Priority::Other("urgent".into()));
        store.close(b).unwrap();

        let stats = store.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.by_priority.high, 1);
        assert_eq!(stats.by_priority.medium, 0);
        assert_eq!(stats.by_priority.low, 1);
        assert_eq!(stats.by_priority.null_priority, 1);
        // "urgent" is in total but in no bucket
        let bucketed = stats.by_priority.high
            + stats.by_priority.medium
            + stats.by_priority.low
            + stats.by_priority.null_priority;
        assert_eq!(bucketed, stats.total - 1);
    }

    #[test]
    fn test_stats_serialize_with_legacy_bucket_name() {
        let stats = Stats {
            total: 1,
            closed: 0,
            by_priority: PriorityCounts::default(),
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert!(value["by_priority"].get("NullPriority").is_some());
    }

    #[test]
    fn test_reversed_is_a_pure_view() {
        let (dir, mut store) = open_temp();
        let a = create(&mut store, "a", Priority::High);
        let b = create(&mut store, "b", Priority::Low);
        let path = dir.path().join("tickets.json");
        let before = std::fs::read(&path).unwrap();

        let reversed: Vec<u64> = store.reversed().into_iter().map(|(id, _)| id).collect();
        assert_eq!(reversed, vec![b, a]);
        // Neither the in-memory order nor the file changed
        assert_eq!(store.ids(), vec![a, b]);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (_dir, mut store) = open_temp();
        let a = create(&mut store, "printer broken", Priority::High);
        let b = create(&mut store, "printer slow", Priority::Low);
        let c = create(&mut store, "monitor flicker", Priority::Medium);

        assert_eq!(store.find_by_description("printer"), vec![a, b]);
        assert_eq!(store.list_by_priority(false), vec![a, c, b]);

        store.close(b).unwrap();
        let stats = store.statistics();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.by_priority.high, 1);
        assert_eq!(stats.by_priority.medium, 1);
        assert_eq!(stats.by_priority.low, 1);
        assert_eq!(stats.by_priority.null_priority, 0);

        store.clean_finished().unwrap();
        assert_eq!(store.ids(), vec![a, c]);
    }
}
