//! Response envelope resolution.
//!
//! A response body holds its collection in exactly one of several places.
//! [`Envelope::resolve`] tries an ordered list of shape matchers and keeps the
//! first match, so each body is classified once instead of being probed by
//! nested conditionals at every call site.
//!
//! Priority order:
//!
//! 1. `body.items`
//! 2. `body.data.items`
//! 3. `body.data.list`
//! 4. `body.data` (array)
//! 5. `body` (array)
//!
//! Anything else resolves to [`Envelope::Empty`].

use serde_json::Value;

/// A collection located inside a response body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collection<'a> {
    /// Raw items
    pub items: &'a [Value],
    /// Total declared next to the items, if the server sent one
    pub declared_total: Option<u64>,
}

/// Shape of a response body, discriminated by where the collection lives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Envelope<'a> {
    /// `{ items: [...], total? }`
    Items(Collection<'a>),
    /// `{ data: { items: [...], total? } }`
    DataItems(Collection<'a>),
    /// `{ data: { list: [...], total? } }`
    DataList(Collection<'a>),
    /// `{ data: [...] }`
    DataArray(Collection<'a>),
    /// `[...]`
    Bare(Collection<'a>),
    /// No recognizable collection
    Empty,
}

type ShapeMatcher = for<'a> fn(&'a Value) -> Option<Envelope<'a>>;

const MATCHERS: [ShapeMatcher; 5] = [
    match_items,
    match_data_items,
    match_data_list,
    match_data_array,
    match_bare,
];

impl<'a> Envelope<'a> {
    /// Classify a response body.
    #[must_use]
    pub fn resolve(body: &'a Value) -> Self {
        MATCHERS
            .iter()
            .find_map(|matcher| matcher(body))
            .unwrap_or(Self::Empty)
    }

    /// The located items (empty for [`Envelope::Empty`]).
    #[must_use]
    pub const fn items(&self) -> &'a [Value] {
        match self.collection() {
            Some(collection) => collection.items,
            None => &[],
        }
    }

    /// Total declared by the server next to the collection.
    #[must_use]
    pub const fn declared_total(&self) -> Option<u64> {
        match self.collection() {
            Some(collection) => collection.declared_total,
            None => None,
        }
    }

    const fn collection(&self) -> Option<&Collection<'a>> {
        match self {
            Self::Items(c)
            | Self::DataItems(c)
            | Self::DataList(c)
            | Self::DataArray(c)
            | Self::Bare(c) => Some(c),
            Self::Empty => None,
        }
    }
}

fn array_at<'a>(value: &'a Value, key: &str) -> Option<&'a [Value]> {
    value.get(key)?.as_array().map(Vec::as_slice)
}

fn total_of(value: &Value) -> Option<u64> {
    value.get("total").and_then(Value::as_u64)
}

fn match_items(body: &Value) -> Option<Envelope<'_>> {
    array_at(body, "items").map(|items| {
        Envelope::Items(Collection {
            items,
            declared_total: total_of(body),
        })
    })
}

fn match_data_items(body: &Value) -> Option<Envelope<'_>> {
    let data = body.get("data")?;
    array_at(data, "items").map(|items| {
        Envelope::DataItems(Collection {
            items,
            declared_total: total_of(data),
        })
    })
}

fn match_data_list(body: &Value) -> Option<Envelope<'_>> {
    let data = body.get("data")?;
    array_at(data, "list").map(|items| {
        Envelope::DataList(Collection {
            items,
            declared_total: total_of(data),
        })
    })
}

fn match_data_array(body: &Value) -> Option<Envelope<'_>> {
    array_at(body, "data").map(|items| {
        Envelope::DataArray(Collection {
            items,
            declared_total: None,
        })
    })
}

fn match_bare(body: &Value) -> Option<Envelope<'_>> {
    body.as_array().map(|items| {
        Envelope::Bare(Collection {
            items: items.as_slice(),
            declared_total: None,
        })
    })
}

/// Numeric `code` field of a `{code, msg, data}` wrapper.
#[must_use]
pub fn code(body: &Value) -> Option<i64> {
    body.get("code").and_then(Value::as_i64)
}

/// `msg` field of a `{code, msg, data}` wrapper.
#[must_use]
pub fn msg(body: &Value) -> Option<&str> {
    body.get("msg").and_then(Value::as_str)
}

/// The `data` member when it holds something, otherwise the body itself.
///
/// Used by single-record endpoints that may or may not wrap their payload.
#[must_use]
pub fn unwrap_data(body: &Value) -> &Value {
    match body.get("data") {
        Some(data) if is_truthy(data) => data,
        _ => body,
    }
}

/// Truthiness of a JSON value: `null`, `false`, `0` and `""` are false.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_items_shape_wins_over_data() {
        let body = json!({"items": [{"id": 1}], "total": 9, "data": [{"id": 2}]});
        let envelope = Envelope::resolve(&body);

        assert!(matches!(envelope, Envelope::Items(_)));
        assert_eq!(envelope.items(), &[json!({"id": 1})]);
        assert_eq!(envelope.declared_total(), Some(9));
    }

    #[test]
    fn test_data_items_shape() {
        let body = json!({"code": 0, "data": {"items": [{"id": 1}], "total": 4}});
        let envelope = Envelope::resolve(&body);

        assert!(matches!(envelope, Envelope::DataItems(_)));
        assert_eq!(envelope.declared_total(), Some(4));
    }

    #[test]
    fn test_data_list_shape() {
        let body = json!({"code": 200, "msg": "success", "data": {"list": [{"id": 1}], "total": 12}});
        let envelope = Envelope::resolve(&body);

        assert!(matches!(envelope, Envelope::DataList(_)));
        assert_eq!(envelope.items().len(), 1);
        assert_eq!(envelope.declared_total(), Some(12));
    }

    #[test]
    fn test_data_array_and_bare_shapes() {
        let data = json!({"data": [{"id": 1}, {"id": 2}]});
        let bare = json!([{"id": 1}]);

        assert!(matches!(Envelope::resolve(&data), Envelope::DataArray(_)));
        assert!(matches!(Envelope::resolve(&bare), Envelope::Bare(_)));
        assert_eq!(Envelope::resolve(&data).declared_total(), None);
    }

    #[test]
    fn test_unrecognized_shapes_are_empty() {
        for body in [json!(null), json!({}), json!({"data": {"id": 1}}), json!("text"), json!({"items": "x"})] {
            let envelope = Envelope::resolve(&body);
            assert_eq!(envelope, Envelope::Empty);
            assert!(envelope.items().is_empty());
        }
    }

    #[test]
    fn test_wrapper_fields() {
        let body = json!({"code": 0, "msg": "ok", "data": {"id": 3}});
        assert_eq!(code(&body), Some(0));
        assert_eq!(msg(&body), Some("ok"));
        assert_eq!(unwrap_data(&body), &json!({"id": 3}));

        let bare = json!({"id": 3});
        assert_eq!(unwrap_data(&bare), &bare);
        let null_data = json!({"data": null, "id": 4});
        assert_eq!(unwrap_data(&null_data), &null_data);
    }

    fn item_strategy() -> impl Strategy<Value = Value> {
        (1u64..10_000, "[a-z]{0,8}").prop_map(|(id, name)| json!({"id": id, "name": name}))
    }

    proptest! {
        #[test]
        fn prop_wrapper_shape_does_not_change_selected_items(
            items in prop::collection::vec(item_strategy(), 0..12),
        ) {
            let expected = items.clone();
            let bodies = [
                json!({"items": items.clone(), "total": items.len()}),
                json!({"data": {"items": items.clone()}}),
                json!({"data": items.clone()}),
                Value::Array(items),
            ];

            for body in &bodies {
                prop_assert_eq!(Envelope::resolve(body).items(), expected.as_slice());
            }
        }
    }
}
