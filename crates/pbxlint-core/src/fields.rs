//! Typed access to an object's attribute dictionary.
//!
//! The format is reverse engineered, so readers are forgiving: a field that
//! should always be present but isn't gets a fallback value and a warning
//! instead of failing the whole decode.

use crate::plist::{Dictionary, PlistValue};
use tracing::{debug, warn};

pub(crate) struct Fields<'a> {
    id: &'a str,
    isa: &'a str,
    attrs: &'a Dictionary,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(id: &'a str, isa: &'a str, attrs: &'a Dictionary) -> Self {
        Self { id, isa, attrs }
    }

    /// Logs attributes this kind of object has never been seen to carry.
    pub(crate) fn note_unknown_keys(&self, known: &[&str]) {
        for key in self.attrs.keys() {
            if key != "isa" && !known.contains(&key.as_str()) {
                debug!("{} {} has unrecognized attribute '{}'", self.isa, self.id, key);
            }
        }
    }

    pub(crate) fn optional_str(&self, key: &str) -> Option<String> {
        match self.attrs.get(key)? {
            PlistValue::String(s) => Some(s.clone()),
            other => {
                warn!(
                    "{} {}: expected string for '{}', found {}",
                    self.isa,
                    self.id,
                    key,
                    other.kind_name()
                );
                None
            }
        }
    }

    /// A string the format always writes; substitutes `fallback` if absent.
    pub(crate) fn required_str(&self, key: &str, fallback: &str) -> String {
        self.optional_str(key).unwrap_or_else(|| {
            warn!(
                "{} {} is missing '{}', using {:?}",
                self.isa, self.id, key, fallback
            );
            fallback.to_string()
        })
    }

    pub(crate) fn optional_list(&self, key: &str) -> Option<Vec<String>> {
        match self.attrs.get(key)? {
            PlistValue::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            ),
            other => {
                warn!(
                    "{} {}: expected array for '{}', found {}",
                    self.isa,
                    self.id,
                    key,
                    other.kind_name()
                );
                None
            }
        }
    }

    /// A list the format always writes; substitutes an empty list if absent.
    pub(crate) fn required_list(&self, key: &str) -> Vec<String> {
        self.optional_list(key).unwrap_or_else(|| {
            warn!("{} {} is missing '{}', using ()", self.isa, self.id, key);
            Vec::new()
        })
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// `"1"` is true; anything else, including absence, is false.
    pub(crate) fn flag(&self, key: &str) -> bool {
        matches!(self.attrs.get(key), Some(PlistValue::String(s)) if s == "1")
    }

    pub(crate) fn optional_dictionary(&self, key: &str) -> Dictionary {
        self.attrs
            .get(key)
            .and_then(PlistValue::as_dictionary)
            .cloned()
            .unwrap_or_default()
    }

    /// A dictionary the format always writes; substitutes `{}` if absent.
    pub(crate) fn dictionary(&self, key: &str) -> Dictionary {
        match self.attrs.get(key) {
            Some(PlistValue::Dictionary(dict)) => dict.clone(),
            _ => {
                warn!("{} {} is missing '{}', using {{}}", self.isa, self.id, key);
                Dictionary::new()
            }
        }
    }
}
