//! Item sources and ordering sinks
//!
//! The pipeline itself never touches a catalogue. A [`MixSession`] pulls
//! items from an [`ItemSource`], orders them and hands the ordered items to
//! an [`OrderSink`].
//!
//! [`MixSession`]: crate::mix::MixSession

pub mod json;

use crate::errors::Result;
use crate::features::FeatureSchema;
use crate::types::Item;

pub use json::{JsonOrderSink, PlaylistLibrary, PlaylistSource};

/// A named collection of items that share one feature schema.
pub trait ItemSource {
    /// Name of the collection, used to name the submitted ordering
    fn collection_name(&self) -> &str;

    /// Schema the item feature vectors follow
    fn schema(&self) -> &FeatureSchema;

    /// Load the items, in their stable index order
    fn items(&self) -> Result<Vec<Item>>;
}

/// Receives an ordered item list under a new name.
pub trait OrderSink {
    fn submit(&mut self, name: &str, ordered: &[&Item]) -> Result<()>;
}

// ============================================================================
// In-memory implementations
// ============================================================================

/// Source backed by an item vector.
#[derive(Debug, Clone)]
pub struct VecSource {
    name: String,
    schema: FeatureSchema,
    items: Vec<Item>,
}

impl VecSource {
    pub fn new(name: impl Into<String>, schema: FeatureSchema, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            schema,
            items,
        }
    }
}

impl ItemSource for VecSource {
    fn collection_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn items(&self) -> Result<Vec<Item>> {
        Ok(self.items.clone())
    }
}

/// One ordering received by a [`VecSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub ids: Vec<String>,
}

/// Sink that keeps every submission in memory.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    submissions: Vec<Submission>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Most recent submission
    pub fn last(&self) -> Option<&Submission> {
        self.submissions.last()
    }
}

impl OrderSink for VecSink {
    fn submit(&mut self, name: &str, ordered: &[&Item]) -> Result<()> {
        self.submissions.push(Submission {
            name: name.to_string(),
            ids: ordered.iter().map(|item| item.id.clone()).collect(),
        });
        Ok(())
    }
}
