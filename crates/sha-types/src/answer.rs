//! The in-progress survey answer set.
//!
//! An [`AnswerSet`] maps question keys to [`AnswerValue`]s and carries the
//! nested contact sub-record. It is built incrementally as the respondent
//! moves through the steps and is only ever persisted as a whole, after the
//! submission service reshapes it into a [`crate::DiscoveryRecord`].

use crate::{ContactInfo, Segment};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One answer: a single selected option code, a set of selected option
/// codes, or free text.
///
/// Empty values (`Single("")`, empty set, `Text("")`) are how unanswered
/// fields are represented; the schemas decide whether that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Multi(BTreeSet<String>),
    Single(String),
    Text(String),
}

impl AnswerValue {
    /// Empty default for a single-choice field.
    pub fn empty_single() -> Self {
        AnswerValue::Single(String::new())
    }

    /// Empty default for a multi-choice field.
    pub fn empty_multi() -> Self {
        AnswerValue::Multi(BTreeSet::new())
    }

    /// Empty default for a free-text field.
    pub fn empty_text() -> Self {
        AnswerValue::Text(String::new())
    }

    /// The contained string for single-choice and text answers.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Single(s) | AnswerValue::Text(s) => Some(s),
            AnswerValue::Multi(_) => None,
        }
    }

    /// The contained set for multi-choice answers.
    pub fn as_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            AnswerValue::Multi(set) => Some(set),
            _ => None,
        }
    }

    /// True if the answer carries no content.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Single(s) | AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Multi(set) => set.is_empty(),
        }
    }
}

/// The complete in-memory answer state for one survey flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    segment: Segment,
    values: BTreeMap<String, AnswerValue>,
    #[serde(default)]
    contact: ContactInfo,
}

impl AnswerSet {
    /// Creates an answer set with no values for the given segment.
    ///
    /// The step engine pre-populates empty defaults for every field its
    /// schema defines; this constructor does not know the schema.
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            values: BTreeMap::new(),
            contact: ContactInfo::default(),
        }
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn values(&self) -> &BTreeMap<String, AnswerValue> {
        &self.values
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactInfo {
        &mut self.contact
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    /// The selected code of a single-choice (or text) field, if any value
    /// has been entered.
    pub fn entry_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(AnswerValue::as_str)
    }

    /// The selected codes of a multi-choice field.
    pub fn entry_set(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.values.get(key).and_then(AnswerValue::as_set)
    }

    /// Inserts or overwrites a field's value wholesale.
    pub fn insert(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.values.insert(key.into(), value);
    }

    /// Overwrites a single-choice field's selected code.
    pub fn set_single(&mut self, key: &str, code: impl Into<String>) {
        self.values
            .insert(key.to_string(), AnswerValue::Single(code.into()));
    }

    /// Overwrites a free-text field's content.
    pub fn set_text(&mut self, key: &str, text: impl Into<String>) {
        self.values
            .insert(key.to_string(), AnswerValue::Text(text.into()));
    }

    /// Toggles one member of a multi-choice field: add if absent, remove if
    /// present. A field that held a different value shape is replaced by a
    /// fresh set containing only the toggled code.
    pub fn toggle_choice(&mut self, key: &str, code: &str) {
        match self.values.get_mut(key) {
            Some(AnswerValue::Multi(set)) => {
                if !set.remove(code) {
                    set.insert(code.to_string());
                }
            }
            _ => {
                let mut set = BTreeSet::new();
                set.insert(code.to_string());
                self.values.insert(key.to_string(), AnswerValue::Multi(set));
            }
        }
    }
}
