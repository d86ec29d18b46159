//! Blob path layout inside a bucket.
//!
//! | Entity | Path |
//! |---|---|
//! | Collection data | `data/<base64(uid)>` |
//! | Collection backup | `backup/<base64(uid)>` |
//! | Raw object | caller-supplied path, unmodified |
//! | Published asset | `public/<filename>` |
//!
//! Uids are encoded with the standard base64 alphabet (with padding) so that any
//! string maps to exactly one path. The encoding itself may contain `/`, also as the
//! last character (`"???"` becomes `data/Pz8/`), so backends must treat a path as an
//! opaque key rather than as nested directories.

use base64::{Engine, engine::general_purpose::STANDARD};

pub const DATA_PREFIX: &str = "data";
pub const BACKUP_PREFIX: &str = "backup";
pub const PUBLIC_PREFIX: &str = "public";

/// Path of the live collection blob for `uid`.
pub fn data_path(uid: &str) -> String {
    format!("{DATA_PREFIX}/{}", encode_uid(uid))
}

/// Path of the backup snapshot blob for `uid`.
pub fn backup_path(uid: &str) -> String {
    format!("{BACKUP_PREFIX}/{}", encode_uid(uid))
}

/// Path of a published asset.
pub fn public_path(filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{filename}")
}

fn encode_uid(uid: &str) -> String {
    STANDARD.encode(uid.as_bytes())
}
