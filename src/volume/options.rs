use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

use crate::errors::Cause;

/// Decodes a volume entry into something useful.
///
/// The archive never looks inside a volume. Whatever turns the HDF5 bytes into a dataset is
/// supplied by the caller through this trait, and any plain function or closure with the right
/// signature already implements it.
pub trait VolumeReader {
    /// What a decoded volume looks like.
    type Volume;

    /// Decode the entry `entry` of the zip container at `container`.
    fn decode(
        &self,
        container: &Path,
        entry: &str,
        options: &ReadOptions,
    ) -> Result<Self::Volume, Cause>;
}

impl<F, T> VolumeReader for F
where
    F: Fn(&Path, &str, &ReadOptions) -> Result<T, Cause>,
{
    type Volume = T;

    fn decode(&self, container: &Path, entry: &str, options: &ReadOptions) -> Result<T, Cause> {
        self(container, entry, options)
    }
}

/// A single option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A flag.
    Bool(bool),
    /// An integer, e.g. a sweep number.
    Int(i64),
    /// A real number.
    Float(f64),
    /// Free text.
    Text(String),
    /// A list of names, e.g. fields.
    List(Vec<String>),
}

impl From<bool> for OptionValue {
    fn from(val: bool) -> Self {
        OptionValue::Bool(val)
    }
}

impl From<i64> for OptionValue {
    fn from(val: i64) -> Self {
        OptionValue::Int(val)
    }
}

impl From<f64> for OptionValue {
    fn from(val: f64) -> Self {
        OptionValue::Float(val)
    }
}

impl From<&str> for OptionValue {
    fn from(val: &str) -> Self {
        OptionValue::Text(val.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(val: String) -> Self {
        OptionValue::Text(val)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(val: Vec<String>) -> Self {
        OptionValue::List(val)
    }
}

/// Options handed to a [`VolumeReader`] verbatim.
///
/// Keys the common ODIM readers understand have helpers; any other key is carried along unchanged
/// for the reader to accept or reject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadOptions {
    values: BTreeMap<String, OptionValue>,
}

impl ReadOptions {
    /// Read only this sweep.
    pub const NSLICE: &'static str = "nslice";
    /// Read only these fields.
    pub const INCLUDE_FIELDS: &'static str = "include_fields";
    /// Skip these fields.
    pub const EXCLUDE_FIELDS: &'static str = "exclude_fields";

    /// No options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an option.
    pub fn with(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Add or replace an option in place.
    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) -> Option<OptionValue> {
        self.values.insert(key.to_owned(), value.into())
    }

    /// Sweep number to read.
    pub fn nslice(self, sweep: i64) -> Self {
        self.with(Self::NSLICE, sweep)
    }

    /// Fields to read.
    pub fn include_fields<S: AsRef<str>>(self, fields: impl IntoIterator<Item = S>) -> Self {
        self.with(Self::INCLUDE_FIELDS, to_names(fields))
    }

    /// Fields to leave out.
    pub fn exclude_fields<S: AsRef<str>>(self, fields: impl IntoIterator<Item = S>) -> Self {
        self.with(Self::EXCLUDE_FIELDS, to_names(fields))
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Every option in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(key, val)| (key.as_str(), val))
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn to_names<S: AsRef<str>>(fields: impl IntoIterator<Item = S>) -> Vec<String> {
    fields
        .into_iter()
        .map(|field| field.as_ref().to_owned())
        .collect()
}
