//! Query parameters and request payloads.
//!
//! Every field is optional unless the backend requires it; `None` fields are
//! left out of the serialized query or body.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

// ─── Listing parameters ────────────────────────────────────────────────────

/// Filters for `GET /users`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

/// Filters for `GET /merchants`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantListParams {
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Only merchants carrying these tag ids
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
}

/// Filters for `GET /merchant-tags`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagListParams {
    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Include soft-deleted tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
}

/// Pagination for `GET /roles`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleListParams {
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Filters for task listings.
///
/// Arbitrary extra filters are forwarded verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Additional backend filters
    #[serde(flatten)]
    pub filters: BTreeMap<String, Value>,
}

impl TaskListParams {
    /// Add a backend filter.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Whether no parameter at all is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.page_size.is_none() && self.filters.is_empty()
    }
}

/// Filters for `GET /subtasks`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskListParams {
    /// Parent task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    /// Merchant surveyed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<u64>,
    /// Task/merchant assignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_merchant_id: Option<u64>,
    /// Submitting user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<u64>,
    /// Client-side dedup mark
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_mark: Option<String>,
    /// Confirmation state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

// ─── Users, merchants, tags, roles ─────────────────────────────────────────

/// Body for creating or updating a user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    /// Login name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Initial password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whether the account is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Body for `PUT /users/me/password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    /// Current password
    pub old_password: String,
    /// Replacement password
    pub new_password: String,
}

/// Body for creating or updating a merchant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantPayload {
    /// Merchant name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Street address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Longitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Latitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Tag ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
}

/// Body for creating or updating a merchant tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPayload {
    /// Tag name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short alias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Tag class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Free-form remarks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Body for creating or updating a role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePayload {
    /// Machine name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ─── Tasks ─────────────────────────────────────────────────────────────────

/// Kind of field task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Merchant visit
    Visit,
    /// Survey
    Survey,
    /// Audit
    Audit,
    /// Merchant onboarding
    Onboarding,
}

/// Body for `POST /tasks`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskPayload {
    /// Task kind
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Task name
    pub task_name: String,
    /// Free-form remarks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// Priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Initial status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Scope selection, see [`crate::scope::build_scope_json`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_json: Option<String>,
    /// Planned start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_start_at: Option<String>,
    /// Planned end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_end_at: Option<String>,
    /// Assigning user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigner_id: Option<u64>,
    /// Owning group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
}

impl CreateTaskPayload {
    /// Minimal task with a kind and a name.
    #[must_use]
    pub fn new(task_type: TaskType, task_name: impl Into<String>) -> Self {
        Self {
            task_type,
            task_name: task_name.into(),
            remarks: None,
            priority: None,
            status: None,
            scope_json: None,
            plan_start_at: None,
            plan_end_at: None,
            assigner_id: None,
            group_id: None,
        }
    }

    /// Builder: set the scope selection.
    #[must_use]
    pub fn with_scope_json(mut self, scope_json: String) -> Self {
        self.scope_json = Some(scope_json);
        self
    }
}

/// Body for `PUT /tasks/{id}`; only set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// Task kind
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    /// Task name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    /// Free-form remarks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// Priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Scope selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_json: Option<String>,
    /// Planned start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_start_at: Option<String>,
    /// Planned end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_end_at: Option<String>,
    /// Assigning user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigner_id: Option<u64>,
    /// Owning group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
}

/// Body for `POST /tasks/{id}/merchants`.
///
/// `assigned_to` distinguishes "leave unchanged" (`None`) from "unassign"
/// (`Some(None)`, sent as `null`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskMerchantsRequest {
    /// Merchants to attach
    pub merchant_ids: Vec<u64>,
    /// Assignee for the generated subtasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Option<u64>>,
    /// Desired number of subtasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_subtask_count: Option<u32>,
    /// Replace the current merchant set instead of appending
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub replace: bool,
}

impl TaskMerchantsRequest {
    /// Attach the given merchants.
    #[must_use]
    pub fn new(merchant_ids: Vec<u64>) -> Self {
        Self {
            merchant_ids,
            ..Self::default()
        }
    }

    /// Builder: set (or clear, with `None`) the assignee.
    #[must_use]
    pub const fn assigned_to(mut self, assignee: Option<u64>) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Builder: set the desired subtask count.
    #[must_use]
    pub const fn target_subtask_count(mut self, count: u32) -> Self {
        self.target_subtask_count = Some(count);
        self
    }

    /// Builder: replace the current merchant set.
    #[must_use]
    pub const fn replace(mut self) -> Self {
        self.replace = true;
        self
    }
}

// ─── Subtasks ──────────────────────────────────────────────────────────────

/// Attachment reference embedded in a subtask submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Stored object URL
    pub url: String,
    /// Attachment kind
    #[serde(rename = "type")]
    pub kind: String,
    /// Extra metadata as a JSON string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_json: Option<String>,
}

/// Body for `POST /subtasks`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitSubtaskPayload {
    /// Parent task
    pub task_id: u64,
    /// Task/merchant assignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_merchant_id: Option<u64>,
    /// Merchant surveyed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<u64>,
    /// Submitting user
    pub submitter_id: u64,
    /// Report body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Client-side dedup mark
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_mark: Option<String>,
    /// Submission time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    /// Recorded geo point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geopoint_id: Option<u64>,
    /// Uploaded attachments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
}

/// Body for `POST /subtasks/{id}/attachments/presign`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignAttachmentRequest {
    /// Original file name
    pub file_name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type
    pub mime: String,
    /// Business category of the upload
    pub biz_type: String,
}

/// Upload policy returned by the presign endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignAttachmentResponse {
    /// Object key to upload to
    pub key: String,
    /// Upload host
    pub host: String,
    /// Encoded upload policy
    pub policy: String,
    /// Policy signature
    pub signature: String,
    /// Storage access id
    pub access_id: String,
    /// Policy expiry (unix seconds)
    pub expire_at: i64,
    /// Extra headers to send with the upload
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Body for `POST /subtasks/{id}/attachments/confirm`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmAttachmentRequest {
    /// Object key that was uploaded
    pub key: String,
    /// Original file name
    pub file_name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type
    pub mime: String,
    /// Content hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Business category of the upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biz_type: Option<String>,
}

/// Attachment record returned after confirmation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmAttachmentResponse {
    /// Attachment id
    pub id: u64,
    /// Original file name
    pub file_name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type
    pub mime: String,
    /// Signed download URL
    pub url: String,
    /// URL expiry (unix seconds)
    pub expire_at: i64,
    /// Storage ETag
    pub etag: String,
}
