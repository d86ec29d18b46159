//! BSON wire format for collection and raw-object blobs.
//!
//! A collection blob is one BSON document. Each field is a collection key and holds an
//! envelope `{ "t": <type name>, "v": <payload> }`. A raw-object blob is a single
//! envelope on its own. Both decoders reject tags the registry does not know.

use bson::{Bson, Document, de::deserialize_from_slice, ser::serialize_to_vec};

use crate::{
    error::{DocumentStoreError, DocumentStoreResult},
    registry::TypeRegistry,
    value::{Collection, TypedValue},
};

/// MIME type written with every collection, backup and raw-object blob.
pub const CONTENT_TYPE: &str = "application/octet-stream";

const TAG_FIELD: &str = "t";
const VALUE_FIELD: &str = "v";

/// Encodes a full collection into one blob.
pub fn encode_collection(collection: &Collection) -> DocumentStoreResult<Vec<u8>> {
    let mut document = Document::new();

    for (key, value) in collection.iter() {
        document.insert(key.clone(), Bson::Document(envelope(value.clone())));
    }

    Ok(serialize_to_vec(&document)?)
}

/// Decodes a collection blob, validating every envelope against `registry`.
pub fn decode_collection(bytes: &[u8], registry: &TypeRegistry) -> DocumentStoreResult<Collection> {
    let document: Document = deserialize_from_slice(bytes)?;

    document
        .into_iter()
        .map(|(key, value)| match value {
            Bson::Document(inner) => Ok((key, open_envelope(inner, registry)?)),
            other => Err(DocumentStoreError::InvalidDocument(format!(
                "collection key {key} holds {:?} instead of an envelope",
                other.element_type()
            ))),
        })
        .collect()
}

/// Encodes a single value as a raw-object blob.
pub fn encode_value(value: &TypedValue) -> DocumentStoreResult<Vec<u8>> {
    Ok(serialize_to_vec(&envelope(value.clone()))?)
}

/// Decodes a raw-object blob, validating its tag against `registry`.
pub fn decode_value(bytes: &[u8], registry: &TypeRegistry) -> DocumentStoreResult<TypedValue> {
    let document: Document = deserialize_from_slice(bytes)?;

    open_envelope(document, registry)
}

fn envelope(value: TypedValue) -> Document {
    let (type_name, data) = value.into_parts();
    let mut document = Document::new();
    document.insert(TAG_FIELD, type_name);
    document.insert(VALUE_FIELD, data);
    document
}

fn open_envelope(mut document: Document, registry: &TypeRegistry) -> DocumentStoreResult<TypedValue> {
    let type_name = match document.remove(TAG_FIELD) {
        Some(Bson::String(name)) => name,
        _ => {
            return Err(DocumentStoreError::InvalidDocument(
                "envelope has no type tag".into(),
            ));
        }
    };
    let data = document
        .remove(VALUE_FIELD)
        .ok_or_else(|| DocumentStoreError::InvalidDocument(format!("envelope for {type_name} has no value")))?;

    TypedValue::from_parts(type_name, data, registry)
}
