//! Flattening suggestion results across mention types
//!
//! A suggestions provider hands back one descriptor per mention type, keyed by
//! that type, each with its own candidate list. The widget navigates them as a
//! single list, so these helpers count and index across all descriptors in
//! insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Results for one mention type, plus whatever else the provider attached
/// (query, trigger position, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionDescriptor<T> {
    pub results: Vec<T>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl<T> SuggestionDescriptor<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self {
            results,
            fields: Map::new(),
        }
    }

    /// Attach an extra descriptor field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Descriptors keyed by mention type, iterated in insertion order.
pub type Suggestions<T> = IndexMap<String, SuggestionDescriptor<T>>;

/// One descriptor's results together with the descriptor itself.
#[derive(Debug)]
pub struct SuggestionGroup<'a, T> {
    pub suggestions: &'a [T],
    pub descriptor: &'a SuggestionDescriptor<T>,
}

/// A single result together with the descriptor it came from.
#[derive(Debug)]
pub struct SuggestionEntry<'a, T> {
    pub suggestion: &'a T,
    pub descriptor: &'a SuggestionDescriptor<T>,
}

/// Total number of results across all descriptors.
pub fn count_suggestions<T>(suggestions: &Suggestions<T>) -> usize {
    suggestions
        .values()
        .map(|descriptor| descriptor.results.len())
        .sum()
}

/// Every descriptor's result list, in key order.
pub fn get_suggestions<T>(suggestions: &Suggestions<T>) -> Vec<SuggestionGroup<'_, T>> {
    suggestions
        .values()
        .map(|descriptor| SuggestionGroup {
            suggestions: &descriptor.results,
            descriptor,
        })
        .collect()
}

/// The `index`-th result counted across all descriptors.
pub fn get_suggestion<T>(suggestions: &Suggestions<T>, index: usize) -> Option<SuggestionEntry<'_, T>> {
    suggestions
        .values()
        .flat_map(|descriptor| {
            descriptor
                .results
                .iter()
                .map(move |suggestion| SuggestionEntry {
                    suggestion,
                    descriptor,
                })
        })
        .nth(index)
}
