//! Answer collection from positional form fields.
//!
//! Fields are named `q0` .. `q24`. Each value is read for its leading
//! integer, so `"3abc"` is 3 and `"1.5"` is 1. A missing field, or one with
//! no leading digits, becomes `0` ("Never" / "No"), so an incomplete form
//! always scores.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::Value;

use crate::catalog::QUESTION_COUNT;

/// A source of named form fields.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> FieldSource for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl FieldSource for serde_json::Map<String, Value> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.get(name)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => {
                let whole = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
                Some(Cow::Owned(whole.to_string()))
            }
            _ => None,
        }
    }
}

/// Only JSON objects carry fields; any other value yields none.
impl FieldSource for Value {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.as_object()?.field(name)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).field(name)
    }
}

/// Form field name for a zero-based question index.
pub fn field_name(index: usize) -> String {
    format!("q{index}")
}

/// Parse one field value: leading whitespace, an optional sign, then the
/// leading run of digits. No digits (or a run that overflows) gives `0`.
pub fn parse_answer(value: &str) -> i32 {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    match rest[..end].parse::<i32>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

/// Read one answer per question, defaulting absent or malformed fields to `0`.
pub fn collect_answers<F: FieldSource + ?Sized>(source: &F) -> [i32; QUESTION_COUNT] {
    let mut answers = [0; QUESTION_COUNT];
    for (index, slot) in answers.iter_mut().enumerate() {
        if let Some(value) = source.field(&field_name(index)) {
            *slot = parse_answer(&value);
        }
    }
    answers
}
