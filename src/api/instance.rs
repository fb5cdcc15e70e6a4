use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{RuleError, RuleResult};

/// Backend target every instance request addresses.
pub const INSTANCE_TARGET: &str = "instance";

/// Persistence boundary for encoded rule blobs.
///
/// The codec never talks to the backend itself; hosts plug their transport in
/// here and the editor reads/writes opaque Base64 strings through it.
pub trait InstanceStore {
    /// Stored blob for `instance_id`, `None` when nothing was saved yet.
    fn read_blob(&self, instance_id: &str) -> RuleResult<Option<String>>;

    fn write_blob(&mut self, instance_id: &str, blob: &str) -> RuleResult<()>;
}

/// In-memory store used by tests and headless callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryInstanceStore {
    blobs: IndexMap<String, String>,
    pub write_count: usize,
}

impl MemoryInstanceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_blob(mut self, instance_id: impl Into<String>, blob: impl Into<String>) -> Self {
        self.blobs.insert(instance_id.into(), blob.into());
        self
    }

    #[must_use]
    pub fn blob(&self, instance_id: &str) -> Option<&str> {
        self.blobs.get(instance_id).map(String::as_str)
    }

    pub fn instance_ids(&self) -> impl Iterator<Item = &str> {
        self.blobs.keys().map(String::as_str)
    }
}

impl InstanceStore for MemoryInstanceStore {
    fn read_blob(&self, instance_id: &str) -> RuleResult<Option<String>> {
        Ok(self.blobs.get(instance_id).cloned())
    }

    fn write_blob(&mut self, instance_id: &str, blob: &str) -> RuleResult<()> {
        self.blobs.insert(instance_id.to_owned(), blob.to_owned());
        self.write_count += 1;
        debug!(instance_id, blob_len = blob.len(), "stored rule blob");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceOperation {
    List,
    Read,
    Post,
    Start,
    Stop,
}

impl InstanceOperation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Read => "read",
            Self::Post => "post",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }

    /// Backend path the request is posted to.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::List => "instances/list",
            Self::Read => "instances/read",
            Self::Post => "instances/post",
            Self::Start | Self::Stop => "instances/operation",
        }
    }
}

/// Request body of the instance endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRequest {
    pub operation: InstanceOperation,
    pub target: String,
    // Field name as spelled by the backend.
    #[serde(rename = "intance_id")]
    pub instance_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Base64 rule blob on `post`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl InstanceRequest {
    fn bare(operation: InstanceOperation, instance_id: impl Into<String>) -> Self {
        Self {
            operation,
            target: INSTANCE_TARGET.to_owned(),
            instance_id: instance_id.into(),
            payload: None,
            name: None,
            data: None,
        }
    }

    #[must_use]
    pub fn list() -> Self {
        Self::bare(InstanceOperation::List, "")
    }

    #[must_use]
    pub fn read(instance_id: impl Into<String>) -> Self {
        Self::bare(InstanceOperation::Read, instance_id)
    }

    #[must_use]
    pub fn post(
        instance_id: impl Into<String>,
        name: impl Into<String>,
        blob: impl Into<String>,
    ) -> Self {
        Self {
            payload: Some(Value::Object(serde_json::Map::new())),
            name: Some(name.into()),
            data: Some(blob.into()),
            ..Self::bare(InstanceOperation::Post, instance_id)
        }
    }

    /// `start`/`stop` request; other operations are rejected.
    pub fn operation(
        operation: InstanceOperation,
        instance_id: impl Into<String>,
    ) -> RuleResult<Self> {
        if !matches!(operation, InstanceOperation::Start | InstanceOperation::Stop) {
            return Err(RuleError::InvalidData(format!(
                "`{}` is not an instance operation",
                operation.as_str()
            )));
        }
        Ok(Self {
            payload: Some(Value::Object(serde_json::Map::new())),
            ..Self::bare(operation, instance_id)
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        self.operation.endpoint()
    }

    pub fn to_json(&self) -> RuleResult<String> {
        serde_json::to_string(self)
            .map_err(|e| RuleError::InvalidData(format!("failed to serialize request: {e}")))
    }
}

/// Generic backend response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    pub const SUCCESS: &'static str = "success";
    pub const INVALID_TOKEN: &'static str = "invalid token";
    pub const INVALID_TOKEN_CODE: i64 = 2;

    pub fn from_json_str(input: &str) -> RuleResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| RuleError::Store(format!("failed to parse response: {e}")))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.desc == Self::SUCCESS
    }

    /// The access token expired; callers refresh and retry once.
    #[must_use]
    pub fn is_invalid_token(&self) -> bool {
        self.desc == Self::INVALID_TOKEN && self.code == Some(Self::INVALID_TOKEN_CODE)
    }

    #[must_use]
    pub fn data_str(&self) -> Option<&str> {
        self.data.as_str()
    }

    /// Payload of a successful response, `Store` error carrying `desc` otherwise.
    pub fn into_data(self) -> RuleResult<Value> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(RuleError::Store(self.desc))
        }
    }
}
