//! Defines the [`Context`] type: the key→value mapping handed to every
//! template render. A context is seeded with global defaults (config file,
//! `--config` flag) and then overlaid per document with that document's
//! front-matter, so documents share defaults but may override them locally
//! without the overrides leaking into later documents.

use gtmpl::Value;
use std::collections::HashMap;

/// The data mapping passed into template renders. Values are template
/// [`Value`]s; everything parsed from config blocks and front-matter is a
/// string, while the index page additionally carries the post summaries as
/// an array.
#[derive(Clone, Default)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Context {
        Context::default()
    }

    /// Parses a block of `key: value` pairs into the context, one pair per
    /// `separator`-delimited segment. Keys and values are trimmed, and each
    /// segment is split on its first colon only, so values may themselves
    /// contain colons. Later keys overwrite earlier ones; this is the
    /// mechanism by which front-matter overrides global defaults. Blank
    /// segments are skipped without stopping the scan, and a segment with no
    /// colon at all maps the whole trimmed segment to the empty string.
    pub fn parse_block(&mut self, block: &str, separator: &str) {
        for segment in block.split(separator) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match segment.split_once(':') {
                Some((key, value)) => self.insert(key.trim(), value.trim()),
                None => self.insert(segment, ""),
            }
        }
    }

    /// Inserts a value, overwriting any previous value under `key`.
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the string value under `key`, or `None` if the key is absent
    /// or holds a non-string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Removes and returns the string value under `key`. Non-string values
    /// are left in place.
    pub fn take_str(&mut self, key: &str) -> Option<String> {
        if let Some(Value::String(_)) = self.values.get(key) {
            if let Some(Value::String(s)) = self.values.remove(key) {
                return Some(s);
            }
        }
        None
    }

    /// Converts the context into a template [`Value`] for rendering.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}
