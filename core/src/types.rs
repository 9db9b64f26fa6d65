//! Canonical records produced by the normalizer.
//!
//! Records are plain data. Every record carries a numeric identifier; items
//! that cannot be given one never become records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page of normalized records.
///
/// `total` is the number of records that survived normalization, not the
/// server's row count. The count the server declared next to the collection,
/// if any, is kept in `server_total`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Normalized records
    pub items: Vec<T>,
    /// Number of records in `items`
    pub total: u64,
    /// Total declared by the server alongside the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_total: Option<u64>,
}

impl<T> PagedResult<T> {
    /// Build a page from already normalized items.
    #[must_use]
    pub fn from_items(items: Vec<T>, server_total: Option<u64>) -> Self {
        Self {
            total: items.len() as u64,
            items,
            server_total,
        }
    }

    /// An empty page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            server_total: None,
        }
    }

    /// Whether the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Reference to a role attached to a user record.
///
/// The backend sends roles either as bare names or as role objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    /// Role identifier, when the backend sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Role name
    pub name: String,
}

/// Normalized user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identifier
    pub id: u64,
    /// Login name
    pub username: String,
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Whether the account is enabled
    pub active: bool,
    /// Roles granted to the user
    pub roles: Vec<RoleRef>,
    /// Creation timestamp as sent by the backend
    pub created_at: Option<String>,
    /// Last update timestamp as sent by the backend
    pub updated_at: Option<String>,
    /// Raw backend item
    #[serde(skip)]
    pub raw: Value,
}

/// Normalized merchant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MerchantRecord {
    /// Merchant identifier
    pub id: u64,
    /// Merchant name
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// Street address
    pub address: String,
    /// City, used to disambiguate geocoding
    pub city: String,
    /// Longitude
    pub lng: Option<f64>,
    /// Latitude
    pub lat: Option<f64>,
    /// Geocode precision level
    pub geocode_level: Option<String>,
    /// Geocode precision score (0-100)
    pub geocode_score: Option<f64>,
    /// Geocode precision description
    pub geocode_description: Option<String>,
    /// Identifiers of the tags attached to the merchant
    pub tags: Vec<u64>,
    /// Creation timestamp as sent by the backend
    pub created_at: Option<String>,
    /// Last update timestamp as sent by the backend
    pub updated_at: Option<String>,
    /// Soft-delete timestamp
    pub deleted_at: Option<String>,
    /// Raw backend item
    #[serde(skip)]
    pub raw: Value,
}

/// Normalized merchant tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Tag identifier
    pub id: u64,
    /// Tag name
    pub name: String,
    /// Short alias
    pub alias: String,
    /// Tag class (category)
    pub class: String,
    /// Free-form remarks
    pub remarks: String,
    /// Creation timestamp as sent by the backend
    pub created_at: Option<String>,
    /// Last update timestamp as sent by the backend
    pub updated_at: Option<String>,
    /// Soft-delete timestamp
    pub deleted_at: Option<String>,
    /// Raw backend item
    #[serde(skip)]
    pub raw: Value,
}

impl TagRecord {
    /// Display label in the form `"<class>：<alias> <name>"`.
    ///
    /// Missing parts are dropped along with their separator.
    #[must_use]
    pub fn label(&self) -> String {
        let class = self.class.trim();
        let alias = self.alias.trim();
        let prefix = if alias.is_empty() {
            String::new()
        } else {
            format!("{alias} ")
        };

        if class.is_empty() {
            format!("{prefix}{}", self.name).trim().to_string()
        } else {
            format!("{class}：{prefix}{}", self.name).trim().to_string()
        }
    }
}

/// Permission attached to a role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission identifier
    pub id: u64,
    /// Permission name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Grouping category
    #[serde(default)]
    pub category: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Role as returned by the roles endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier
    pub id: u64,
    /// Machine name
    pub name: String,
    /// Human-readable name
    #[serde(default)]
    pub display_name: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Permissions granted by the role
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(class: &str, alias: &str, name: &str) -> TagRecord {
        TagRecord {
            id: 1,
            name: name.to_string(),
            alias: alias.to_string(),
            class: class.to_string(),
            remarks: String::new(),
            created_at: None,
            updated_at: None,
            deleted_at: None,
            raw: Value::Null,
        }
    }

    #[test]
    fn test_tag_label_with_all_parts() {
        assert_eq!(tag("Food", "HK", "Tea").label(), "Food：HK Tea");
    }

    #[test]
    fn test_tag_label_without_class() {
        assert_eq!(tag("", "HK", "Tea").label(), "HK Tea");
        assert_eq!(tag("  ", "", "Tea").label(), "Tea");
    }

    #[test]
    fn test_tag_label_without_alias() {
        assert_eq!(tag("Food", "", "Tea").label(), "Food：Tea");
    }

    #[test]
    fn test_paged_result_counts_items() {
        let page = PagedResult::from_items(vec![1, 2, 3], Some(40));
        assert_eq!(page.total, 3);
        assert_eq!(page.server_total, Some(40));
        assert!(!page.is_empty());
        assert!(PagedResult::<u8>::default().is_empty());
    }
}
