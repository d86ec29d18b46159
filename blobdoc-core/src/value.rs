//! Core traits and types for stored values.
//!
//! A collection holds values of many concrete types at once. Instead of keeping them as
//! type-erased trait objects and downcasting on the way out, every value is held as a
//! [`TypedValue`]: the name its type is registered under plus its BSON form. Decoding
//! checks the tag first, so asking for the wrong type is a
//! [`DocumentStoreError::TypeMismatch`] rather than a failed cast.

use bson::{Bson, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, btree_map};

use crate::{
    error::{DocumentStoreError, DocumentStoreResult},
    registry::TypeRegistry,
};

/// Marker trait for every type that can be stored as a collection value or raw object.
///
/// Implemented automatically for all `Serialize + Deserialize` types that are
/// `Send + Sync + 'static`. A type must still be registered in the store's
/// [`TypeRegistry`] before it is written or read.
///
/// # Example
///
/// ```ignore
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Thingy {
///     pub name: String,
///     pub bunch: Vec<OtherThingy>,
/// }
/// ```
pub trait Storable: Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static {}

impl<T> Storable for T where T: Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static {}

/// Extension trait converting storable values to and from BSON.
pub trait StorableExt: Storable + Sized {
    /// Converts this value to BSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_bson(&self) -> DocumentStoreResult<Bson>;

    /// Creates a value from BSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure does not match.
    fn from_bson(bson: Bson) -> DocumentStoreResult<Self>;
}

impl<T: Storable> StorableExt for T {
    fn to_bson(&self) -> DocumentStoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }
}

/// A single stored value: its registered type name and its BSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    type_name: String,
    data: Bson,
}

impl TypedValue {
    /// Encodes `value`, tagging it with the name its type is registered under.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::UnregisteredType`] if `T` is not in `registry`,
    /// or a serialization error.
    pub fn encode<T: Storable>(value: &T, registry: &TypeRegistry) -> DocumentStoreResult<Self> {
        let type_name = registry.name_of::<T>()?.to_string();

        Ok(Self {
            type_name,
            data: value.to_bson()?,
        })
    }

    /// Builds a value from an already decoded tag and payload.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::UnregisteredType`] if `type_name` is not in `registry`.
    pub fn from_parts(
        type_name: impl Into<String>,
        data: Bson,
        registry: &TypeRegistry,
    ) -> DocumentStoreResult<Self> {
        let type_name = type_name.into();
        registry.ensure_name(&type_name)?;

        Ok(Self { type_name, data })
    }

    /// Decodes the payload as `T`.
    ///
    /// # Errors
    ///
    /// - [`DocumentStoreError::UnregisteredType`] if `T` is not in `registry`
    /// - [`DocumentStoreError::TypeMismatch`] if the value was stored as another type
    /// - a serialization error if the payload does not fit `T`
    pub fn decode<T: Storable>(&self, registry: &TypeRegistry) -> DocumentStoreResult<T> {
        let expected = registry.name_of::<T>()?;

        if expected != self.type_name {
            return Err(DocumentStoreError::TypeMismatch {
                expected: expected.to_string(),
                found: self.type_name.clone(),
            });
        }

        T::from_bson(self.data.clone())
    }

    /// Returns whether this value was stored as `T`.
    pub fn is<T: Storable>(&self, registry: &TypeRegistry) -> bool {
        registry
            .name_of::<T>()
            .is_ok_and(|name| name == self.type_name)
    }

    /// The registered type name this value is tagged with.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The BSON payload.
    pub fn data(&self) -> &Bson {
        &self.data
    }

    pub(crate) fn into_parts(self) -> (String, Bson) {
        (self.type_name, self.data)
    }
}

/// The key-value mapping owned by one uid.
///
/// Keys iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    entries: BTreeMap<String, TypedValue>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the value at `key` as `T`, or returns `None` if `key` is unset.
    ///
    /// # Errors
    ///
    /// See [`TypedValue::decode`].
    pub fn get<T: Storable>(&self, key: &str, registry: &TypeRegistry) -> DocumentStoreResult<Option<T>> {
        self.entries
            .get(key)
            .map(|value| value.decode(registry))
            .transpose()
    }

    /// Returns the undecoded value at `key`.
    pub fn get_raw(&self, key: &str) -> Option<&TypedValue> {
        self.entries.get(key)
    }

    /// Sets `key` to `value`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: TypedValue) -> Option<TypedValue> {
        self.entries.insert(key.into(), value)
    }

    /// Removes `key`, returning its value if it was set.
    pub fn remove(&mut self, key: &str) -> Option<TypedValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, TypedValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Collection {
    type Item = (String, TypedValue);
    type IntoIter = btree_map::IntoIter<String, TypedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, TypedValue)> for Collection {
    fn from_iter<I: IntoIterator<Item = (String, TypedValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
