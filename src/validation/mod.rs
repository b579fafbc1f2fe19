use crate::error::TooltipError;
use crate::forms::ControlSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// error code -> message shown in the tooltip.
///
/// Supplied once per field; never mutated afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ErrorMessageMap(BTreeMap<String, String>);

impl ErrorMessageMap {
    /// Parses a JSON object of `{"code": "message"}` pairs.
    pub fn from_json(json: &str) -> Result<Self, TooltipError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Empty messages count as missing.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.0
            .get(code)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ErrorMessageMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// What the tooltip should do for a given snapshot. Derived on demand,
/// never stored.
#[derive(Clone, Copy, Debug)]
pub struct ValidationState<'a> {
    snapshot: &'a ControlSnapshot,
}

impl<'a> ValidationState<'a> {
    pub fn new(snapshot: &'a ControlSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn should_show(&self) -> bool {
        let s = self.snapshot;
        (s.dirty && s.invalid) || (s.touched && s.invalid)
    }

    /// Smallest error code by byte order.
    pub fn first_error(&self) -> Option<&'a str> {
        self.snapshot.errors.keys().next().map(String::as_str)
    }

    /// The code to display, if the tooltip should be up.
    pub fn visible_error(&self) -> Option<&'a str> {
        self.first_error().filter(|_| self.should_show())
    }
}

impl<'a> From<&'a ControlSnapshot> for ValidationState<'a> {
    fn from(snapshot: &'a ControlSnapshot) -> Self {
        Self::new(snapshot)
    }
}
