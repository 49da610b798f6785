use crate::attributes::{AssignOutcome, AttrValue, Attributes};
use crate::store::AttributeStore;

/// Plain in-memory attribute store.
///
/// Holds the values and the fillable list but enforces nothing; every write
/// is stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    values: Attributes,
    fillable: Vec<String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fillable<I, S>(fillable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: Attributes::new(),
            fillable: fillable.into_iter().map(Into::into).collect(),
        }
    }

    pub fn set_fillable(&mut self, fillable: Vec<String>) {
        self.fillable = fillable;
    }

    /// Replace every value at once (used when hydrating from a stored row).
    pub fn replace_attributes(&mut self, values: Attributes) {
        self.values = values;
    }
}

impl AttributeStore for AttributeMap {
    fn set_attribute(&mut self, key: &str, value: AttrValue) -> AssignOutcome {
        self.values.insert(key.to_string(), value);
        AssignOutcome::Written
    }

    fn get_attribute(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(key)
    }

    fn remove_attribute(&mut self, key: &str) -> Option<AttrValue> {
        self.values.remove(key)
    }

    fn attributes(&self) -> &Attributes {
        &self.values
    }

    fn fillable(&self) -> &[String] {
        &self.fillable
    }
}
