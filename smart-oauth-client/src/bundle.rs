//! Read-only helpers over FHIR search results.
//!
//! These never modify the document; they only look into the `Bundle` shape
//! (`resourceType`, `total`, `entry[].resource`, `link[]`).
use serde_json::Value;

pub fn resource_type(resource: &Value) -> Option<&str> {
    resource.get("resourceType").and_then(Value::as_str)
}

pub fn is_bundle(resource: &Value) -> bool {
    resource_type(resource) == Some("Bundle")
}

/// The `entry` array, or an empty slice when the bundle has none.
pub fn entries(bundle: &Value) -> &[Value] {
    bundle.get("entry").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
}

/// The `resource` of every entry that carries one.
pub fn resources(bundle: &Value) -> impl Iterator<Item = &Value> {
    entries(bundle).iter().filter_map(|entry| entry.get("resource"))
}

pub fn total(bundle: &Value) -> Option<u64> {
    bundle.get("total").and_then(Value::as_u64)
}

/// The `url` of the `next` paging link, usable with
/// [`fetch_resource`](crate::SmartAuthClient::fetch_resource) as an absolute url.
pub fn next_link(bundle: &Value) -> Option<&str> {
    bundle
        .get("link")?
        .as_array()?
        .iter()
        .find(|link| link.get("relation").and_then(Value::as_str) == Some("next"))?
        .get("url")?
        .as_str()
}
