//! Backend-to-frontend record normalization.
//!
//! Each entity kind has a converter that coalesces the backend's alternative
//! key spellings into one canonical record. For every field the source keys
//! are tried in a fixed order and the first one that is present and not
//! `null` wins; when none is present the field takes its default.
//!
//! A raw item that is not an object, or whose identifier cannot be resolved to
//! a non-zero number, is rejected with a [`SkipReason`]. Collection converters
//! drop rejected items (logging them at `debug`) and never fail.

use crate::envelope::{self, Envelope};
use crate::types::{MerchantRecord, PagedResult, RoleRef, TagRecord, UserRecord};
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a raw item did not become a record.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    /// The item is not a JSON object
    #[error("item is not an object")]
    NotAnObject,

    /// Neither `ID` nor `id` resolved to a non-zero number
    #[error("item has no usable identifier")]
    MissingId,
}

// ─── Field coalescing ──────────────────────────────────────────────────────

fn first<'a>(item: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find(|value| !value.is_null())
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_or_empty(item: &Map<String, Value>, keys: &[&str]) -> String {
    first(item, keys).and_then(text).unwrap_or_default()
}

fn optional_text(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first(item, keys).and_then(text)
}

fn number(item: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    first(item, keys).and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Positive integer identifier from a number or a numeric string.
fn id_value(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (id != 0).then_some(id)
}

fn resolve_id(item: &Map<String, Value>) -> Result<u64, SkipReason> {
    first(item, &["ID", "id"])
        .and_then(id_value)
        .ok_or(SkipReason::MissingId)
}

fn as_object(raw: &Value) -> Result<&Map<String, Value>, SkipReason> {
    raw.as_object().ok_or(SkipReason::NotAnObject)
}

/// `active` resolves by presence: a present key wins even when it is falsy.
fn active_flag(item: &Map<String, Value>) -> bool {
    ["active", "Active"]
        .iter()
        .find_map(|key| item.get(*key))
        .map_or(true, envelope::is_truthy)
}

fn role_ref(value: &Value) -> Option<RoleRef> {
    match value {
        Value::String(name) => Some(RoleRef {
            id: None,
            name: name.clone(),
        }),
        Value::Number(_) => id_value(value).map(|id| RoleRef {
            id: Some(id),
            name: String::new(),
        }),
        Value::Object(role) => Some(RoleRef {
            id: first(role, &["ID", "id"]).and_then(id_value),
            name: text_or_empty(role, &["name", "Name", "display_name"]),
        }),
        _ => None,
    }
}

/// Tag references arrive as tag objects, bare ids or numeric strings.
fn tag_id(value: &Value) -> Option<u64> {
    match value {
        Value::Object(tag) => first(tag, &["ID", "id"]).and_then(id_value),
        other => id_value(other),
    }
}

// ─── Single-item converters ────────────────────────────────────────────────

/// Convert one raw user item.
///
/// # Errors
///
/// Returns a [`SkipReason`] when the item is not an object or has no id.
pub fn normalize_user(raw: &Value) -> Result<UserRecord, SkipReason> {
    let item = as_object(raw)?;
    let id = resolve_id(item)?;

    let roles = first(item, &["roles", "Roles"])
        .and_then(Value::as_array)
        .map(|roles| roles.iter().filter_map(role_ref).collect())
        .unwrap_or_default();

    Ok(UserRecord {
        id,
        username: text_or_empty(item, &["username", "user_name", "name"]),
        full_name: text_or_empty(item, &["full_name", "FullName", "name"]),
        email: text_or_empty(item, &["email", "Email"]),
        phone: text_or_empty(item, &["phone", "Phone"]),
        active: active_flag(item),
        roles,
        created_at: optional_text(item, &["CreatedAt", "created_at"]),
        updated_at: optional_text(item, &["UpdatedAt", "updated_at"]),
        raw: raw.clone(),
    })
}

/// Convert one raw merchant item.
///
/// # Errors
///
/// Returns a [`SkipReason`] when the item is not an object or has no id.
pub fn normalize_merchant(raw: &Value) -> Result<MerchantRecord, SkipReason> {
    let item = as_object(raw)?;
    let id = resolve_id(item)?;

    let tags = first(item, &["tags", "TagIDs", "tag_ids"])
        .and_then(Value::as_array)
        .map(|tags| tags.iter().filter_map(tag_id).collect())
        .unwrap_or_default();

    Ok(MerchantRecord {
        id,
        name: text_or_empty(item, &["name", "merchant_name", "alias"]),
        phone: text_or_empty(item, &["phone", "Phone"]),
        address: text_or_empty(item, &["address", "Address", "location"]),
        city: text_or_empty(item, &["city", "City"]),
        lng: number(item, &["lng", "Lng", "longitude"]),
        lat: number(item, &["lat", "Lat", "latitude"]),
        geocode_level: optional_text(item, &["geocode_level", "GeocodeLevel"]),
        geocode_score: number(item, &["geocode_score", "GeocodeScore"]),
        geocode_description: optional_text(item, &["geocode_description", "GeocodeDescription"]),
        tags,
        created_at: optional_text(item, &["CreatedAt", "created_at"]),
        updated_at: optional_text(item, &["UpdatedAt", "updated_at"]),
        deleted_at: optional_text(item, &["DeletedAt", "deleted_at"]),
        raw: raw.clone(),
    })
}

/// Convert one raw tag item.
///
/// # Errors
///
/// Returns a [`SkipReason`] when the item is not an object or has no id.
pub fn normalize_tag(raw: &Value) -> Result<TagRecord, SkipReason> {
    let item = as_object(raw)?;
    let id = resolve_id(item)?;

    Ok(TagRecord {
        id,
        name: text_or_empty(item, &["tag_name", "name"]),
        alias: text_or_empty(item, &["alias", "alias_name"]),
        class: text_or_empty(item, &["class", "Class", "category"]),
        remarks: text_or_empty(item, &["remarks", "description"]),
        created_at: optional_text(item, &["CreatedAt", "created_at"]),
        updated_at: optional_text(item, &["UpdatedAt", "updated_at"]),
        deleted_at: optional_text(item, &["DeletedAt", "deleted_at"]),
        raw: raw.clone(),
    })
}

// ─── Collection converters ─────────────────────────────────────────────────

/// Locate the collection in `body` and convert every item with `convert`,
/// dropping items the converter rejects.
pub fn normalize_page<T>(
    body: &Value,
    kind: &'static str,
    convert: fn(&Value) -> Result<T, SkipReason>,
) -> PagedResult<T> {
    let envelope = Envelope::resolve(body);
    let items: Vec<T> = envelope
        .items()
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match convert(raw) {
            Ok(record) => Some(record),
            Err(reason) => {
                tracing::debug!(kind, index, %reason, "Skipping backend item");
                None
            }
        })
        .collect();

    PagedResult::from_items(items, envelope.declared_total())
}

/// Normalize a user listing.
#[must_use]
pub fn normalize_users(body: &Value) -> PagedResult<UserRecord> {
    normalize_page(body, "user", normalize_user)
}

/// Normalize a merchant listing.
#[must_use]
pub fn normalize_merchants(body: &Value) -> PagedResult<MerchantRecord> {
    normalize_page(body, "merchant", normalize_merchant)
}

/// Normalize a tag listing.
#[must_use]
pub fn normalize_tags(body: &Value) -> PagedResult<TagRecord> {
    normalize_page(body, "tag", normalize_tag)
}

/// Interpret a task listing body.
///
/// A `{code: 0, data}` wrapper is unwrapped; a body that already carries
/// `items` or `total` is used as is; anything else is an empty page. Task
/// items are passed through without field coalescing.
#[must_use]
pub fn normalize_task_page(body: &Value) -> PagedResult<Value> {
    let page = if envelope::code(body) == Some(0) {
        envelope::unwrap_data(body)
    } else if body.get("items").is_some_and(envelope::is_truthy) || body.get("total").is_some() {
        body
    } else {
        return PagedResult::empty();
    };

    let items: Vec<Value> = page
        .get("items")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let server_total = page.get("total").and_then(Value::as_u64);

    PagedResult {
        total: server_total.unwrap_or(items.len() as u64),
        items,
        server_total,
    }
}
