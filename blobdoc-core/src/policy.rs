//! Canned bucket access policies for the public prefix.
//!
//! Only two documents are ever written: one allowing and one denying anonymous
//! `s3:GetObject` on `<bucket>/public/*`. Both are rendered from the same template so
//! that the rendered text is stable and can be compared byte for byte.

use serde::Serialize;

use crate::{error::DocumentStoreResult, paths::PUBLIC_PREFIX};

const POLICY_VERSION: &str = "2012-10-17";

/// Whether the canned statement grants or denies anonymous reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyDocument<'a> {
    version: &'a str,
    statement: [Statement<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Statement<'a> {
    effect: Effect,
    principal: &'a str,
    action: &'a str,
    resource: String,
    sid: &'a str,
}

/// Renders the canned policy document for `bucket`.
pub fn canned_policy(bucket: &str, effect: Effect) -> DocumentStoreResult<String> {
    let document = PolicyDocument {
        version: POLICY_VERSION,
        statement: [Statement {
            effect,
            principal: "*",
            action: "s3:GetObject",
            resource: format!("arn:aws:s3:::{bucket}/{PUBLIC_PREFIX}/*"),
            sid: "",
        }],
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_document() {
        let policy = canned_policy("gost", Effect::Allow).unwrap();
        let value: serde_json::Value = serde_json::from_str(&policy).unwrap();

        assert_eq!(value["Version"], "2012-10-17");
        assert_eq!(value["Statement"][0]["Effect"], "Allow");
        assert_eq!(value["Statement"][0]["Principal"], "*");
        assert_eq!(value["Statement"][0]["Resource"], "arn:aws:s3:::gost/public/*");
        assert_eq!(value["Statement"][0]["Sid"], "");
    }

    #[test]
    fn rendering_is_stable() {
        assert_eq!(
            canned_policy("gost", Effect::Deny).unwrap(),
            canned_policy("gost", Effect::Deny).unwrap()
        );
        assert_ne!(
            canned_policy("gost", Effect::Allow).unwrap(),
            canned_policy("gost", Effect::Deny).unwrap()
        );
    }
}
