//! Host-facing surface: the editor facade and the persistence boundary.

mod editor;
mod instance;

pub use editor::RuleEditor;
pub use instance::{
    ApiResponse, INSTANCE_TARGET, InstanceOperation, InstanceRequest, InstanceStore,
    MemoryInstanceStore,
};
