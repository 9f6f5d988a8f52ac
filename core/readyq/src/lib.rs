//! Ready-Queue Disciplines
//!
//! Ordered container of runnable processes with a per-instance ordering
//! policy: FIFO, LIFO, or priority by an explicit integer key. The key is
//! stored in the entry rather than derived on pop, so a scheduling decision
//! made at enqueue time cannot drift before dispatch.

use std::collections::VecDeque;

/// Ordering policy, fixed for the lifetime of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Push back, pop front.
    Fifo,
    /// Push front, pop front.
    Lifo,
    /// Keep sorted by (key, name) ascending, pop the minimum.
    Priority,
}

/// One queued process: its priority key, its slot in the process table,
/// and its display name (used for tie-breaks and rendering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub key: i64,
    pub pid: usize,
    pub name: char,
}

/// The ready queue itself. "Front" is always the dispatch end.
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    order: Order,
    entries: VecDeque<Entry>,
}

impl ReadyQueue {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            entries: VecDeque::new(),
        }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn push(&mut self, entry: Entry) {
        match self.order {
            Order::Fifo => self.entries.push_back(entry),
            Order::Lifo => self.entries.push_front(entry),
            Order::Priority => {
                let at = self
                    .entries
                    .partition_point(|e| (e.key, e.name) < (entry.key, entry.name));
                self.entries.insert(at, entry);
            }
        }
    }

    pub fn pop(&mut self) -> Option<Entry> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Render the queue contents for the event trace.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "[Q <empty>]".to_string();
        }
        let mut s = String::from("[Q");
        for e in &self.entries {
            s.push(' ');
            s.push(e.name);
        }
        s.push(']');
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: i64, pid: usize, name: char) -> Entry {
        Entry { key, pid, name }
    }

    #[test]
    fn fifo_pops_in_insertion_order() {
        let mut q = ReadyQueue::new(Order::Fifo);
        q.push(entry(0, 0, 'A'));
        q.push(entry(0, 1, 'B'));
        q.push(entry(0, 2, 'C'));
        assert_eq!(q.pop().unwrap().name, 'A');
        assert_eq!(q.pop().unwrap().name, 'B');
        assert_eq!(q.pop().unwrap().name, 'C');
        assert!(q.pop().is_none());
    }

    #[test]
    fn lifo_pops_most_recent_first() {
        let mut q = ReadyQueue::new(Order::Lifo);
        q.push(entry(0, 0, 'A'));
        q.push(entry(0, 1, 'B'));
        assert_eq!(q.pop().unwrap().name, 'B');
        assert_eq!(q.pop().unwrap().name, 'A');
    }

    #[test]
    fn priority_pops_smallest_key() {
        let mut q = ReadyQueue::new(Order::Priority);
        q.push(entry(30, 0, 'A'));
        q.push(entry(10, 1, 'B'));
        q.push(entry(20, 2, 'C'));
        assert_eq!(q.pop().unwrap().name, 'B');
        assert_eq!(q.pop().unwrap().name, 'C');
        assert_eq!(q.pop().unwrap().name, 'A');
    }

    #[test]
    fn priority_breaks_key_ties_by_name() {
        let mut q = ReadyQueue::new(Order::Priority);
        q.push(entry(10, 2, 'C'));
        q.push(entry(10, 0, 'A'));
        q.push(entry(10, 1, 'B'));
        assert_eq!(q.pop().unwrap().name, 'A');
        assert_eq!(q.pop().unwrap().name, 'B');
        assert_eq!(q.pop().unwrap().name, 'C');
    }

    #[test]
    fn priority_accepts_negative_keys() {
        let mut q = ReadyQueue::new(Order::Priority);
        q.push(entry(5, 0, 'A'));
        q.push(entry(-3, 1, 'B'));
        assert_eq!(q.pop().unwrap().name, 'B');
    }

    #[test]
    fn render_matches_trace_format() {
        let mut q = ReadyQueue::new(Order::Fifo);
        assert_eq!(q.render(), "[Q <empty>]");
        q.push(entry(0, 0, 'A'));
        q.push(entry(0, 1, 'B'));
        assert_eq!(q.render(), "[Q A B]");
    }
}
