//! Registry of value types that may be stored in collections and raw objects.
//!
//! Every value written by the store is tagged with the name it was registered under,
//! and every tag read back must resolve to a registered type again. Writers and readers
//! of the same blobs must therefore register the same types under the same names.
//!
//! A registry is an ordinary value owned by a [`BlobDocStore`](crate::store::BlobDocStore);
//! two stores in one process may carry different registries.
//!
//! # Example
//!
//! ```ignore
//! use blobdoc::registry::TypeRegistry;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Thingy>("Thingy")?;
//! registry.register::<Vec<Thingy>>("[]Thingy")?;
//! ```

use std::{
    any::{TypeId, type_name},
    collections::HashMap,
};

use crate::{
    error::{DocumentStoreError, DocumentStoreResult},
    value::Storable,
};

/// Maps registered type names to concrete Rust types and back.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    by_name: HashMap<String, TypeId>,
    by_type: HashMap<TypeId, String>,
}

impl TypeRegistry {
    /// Creates a registry with the builtin scalar types already registered.
    ///
    /// | Rust type | Name |
    /// |---|---|
    /// | `String` | `string` |
    /// | `bool` | `bool` |
    /// | `i32` | `int32` |
    /// | `i64` | `int64` |
    /// | `f64` | `float64` |
    /// | `Vec<u8>` | `bytes` |
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.insert::<String>("string");
        registry.insert::<bool>("bool");
        registry.insert::<i32>("int32");
        registry.insert::<i64>("int64");
        registry.insert::<f64>("float64");
        registry.insert::<Vec<u8>>("bytes");
        registry
    }

    /// Creates a registry with nothing registered, not even the builtin scalars.
    pub fn empty() -> Self {
        Self {
            by_name: HashMap::new(),
            by_type: HashMap::new(),
        }
    }

    /// Registers `T` under `name`.
    ///
    /// Registering the same type under the same name again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidRegistration`] if `name` is empty, if `name`
    /// is already bound to another type, or if `T` is already registered under another name.
    pub fn register<T: Storable>(&mut self, name: impl Into<String>) -> DocumentStoreResult<&mut Self> {
        let name = name.into();
        let type_id = TypeId::of::<T>();

        if name.is_empty() {
            return Err(DocumentStoreError::InvalidRegistration(format!(
                "empty name for {}",
                type_name::<T>()
            )));
        }

        if self
            .by_name
            .get(&name)
            .is_some_and(|existing| *existing != type_id)
        {
            return Err(DocumentStoreError::InvalidRegistration(format!(
                "name {name} is already registered for another type"
            )));
        }

        if let Some(existing) = self.by_type.get(&type_id).filter(|existing| **existing != name) {
            return Err(DocumentStoreError::InvalidRegistration(format!(
                "{} is already registered as {existing}",
                type_name::<T>()
            )));
        }

        self.insert::<T>(&name);

        Ok(self)
    }

    /// Returns the name `T` is registered under.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::UnregisteredType`] if `T` was never registered.
    pub fn name_of<T: Storable>(&self) -> DocumentStoreResult<&str> {
        self.by_type
            .get(&TypeId::of::<T>())
            .map(String::as_str)
            .ok_or_else(|| DocumentStoreError::UnregisteredType(type_name::<T>().to_string()))
    }

    /// Returns whether a type is registered under `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Fails with [`DocumentStoreError::UnregisteredType`] unless `name` is registered.
    pub fn ensure_name(&self, name: &str) -> DocumentStoreResult<()> {
        if self.contains_name(name) {
            Ok(())
        } else {
            Err(DocumentStoreError::UnregisteredType(name.to_string()))
        }
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn insert<T: Storable>(&mut self, name: &str) {
        let type_id = TypeId::of::<T>();
        self.by_name.insert(name.to_string(), type_id);
        self.by_type.insert(type_id, name.to_string());
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
