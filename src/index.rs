use std::collections::HashMap;

use crate::models::Timestamp;

/// Signup instant per customer plus the extremes of every signup read.
#[derive(Debug, Clone, Default)]
pub struct CustomerIndex {
    signups: HashMap<String, Timestamp>,
    earliest: Option<Timestamp>,
    latest: Option<Timestamp>,
}

impl CustomerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a signup. A repeated id overwrites the stored signup, but the
    /// overwritten value still counts toward `span`.
    pub fn insert(&mut self, id: impl Into<String>, signup: Timestamp) {
        if self.earliest.map_or(true, |min| signup < min) {
            self.earliest = Some(signup);
        }
        if self.latest.map_or(true, |max| signup > max) {
            self.latest = Some(signup);
        }
        self.signups.insert(id.into(), signup);
    }

    pub fn signup(&self, id: &str) -> Option<&Timestamp> {
        self.signups.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Timestamp)> {
        self.signups.iter().map(|(id, ts)| (id.as_str(), ts))
    }

    /// `(earliest, latest)` signup, `None` until something is inserted.
    pub fn span(&self) -> Option<(Timestamp, Timestamp)> {
        self.earliest.zip(self.latest)
    }

    pub fn len(&self) -> usize {
        self.signups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signups.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Timestamp)> for CustomerIndex {
    fn from_iter<I: IntoIterator<Item = (S, Timestamp)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (id, signup) in iter {
            index.insert(id, signup);
        }
        index
    }
}

/// Order instants per customer, in input order.
#[derive(Debug, Clone, Default)]
pub struct OrderIndex {
    orders: HashMap<String, Vec<Timestamp>>,
    count: usize,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<String>, placed_at: Timestamp) {
        self.orders.entry(id.into()).or_default().push(placed_at);
        self.count += 1;
    }

    /// Orders placed by `id`; empty for customers who never ordered.
    pub fn orders_for(&self, id: &str) -> &[Timestamp] {
        self.orders.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn customer_count(&self) -> usize {
        self.orders.len()
    }

    pub fn order_count(&self) -> usize {
        self.count
    }
}

impl<S: Into<String>> FromIterator<(S, Timestamp)> for OrderIndex {
    fn from_iter<I: IntoIterator<Item = (S, Timestamp)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (id, placed_at) in iter {
            index.push(id, placed_at);
        }
        index
    }
}
