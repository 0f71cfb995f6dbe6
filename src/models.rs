//! Records shared across accessors: counted listings, prices, policies, notes.

use chrono::NaiveDate;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Names the collection key a [`Listing`] of this type serializes under.
pub trait Listed {
    const LIST_KEY: &'static str = "items";
}

/// A counted collection, serialized as `{count, <key>}`.
///
/// `count` is derived from the items, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    items: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the first item, if any.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }
}

impl<T: Serialize + Listed> Serialize for Listing<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Listing", 2)?;
        state.serialize_field("count", &self.count())?;
        state.serialize_field(T::LIST_KEY, &self.items)?;
        state.end()
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// An amount in a given currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// ISO 4217 code
    pub currency: String,
    pub amount: f64,
}

/// A cancellation charge that applies from `deadline` hours before check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationPolicy {
    /// Hours before check-in; `None` means the charge applies from booking time
    pub deadline: Option<u32>,
    /// Share of the booking price charged, 0-100
    pub percentage: f64,
}

impl CancellationPolicy {
    /// True if cancelling under this policy costs nothing.
    pub fn is_free(&self) -> bool {
        self.percentage == 0.0
    }
}

/// Free-text remark attached to a booking, optionally limited to a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub text: String,
}
