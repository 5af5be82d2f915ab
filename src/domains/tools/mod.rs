//! Tools domain module.
//!
//! - `definitions/` - one file per tool (`NAME`, `handle()`, `to_tool()`)
//! - `registry.rs` - profile-scoped listing and dispatch by name
//! - `response.rs` - the success/error envelope every call returns
//! - `context.rs` - configuration and collaborators handed to each call
//! - `error.rs` - tool-level error taxonomy
//!
//! Adding a tool means a new file in `definitions/` plus one arm in the
//! registry; the server handler does not change.

mod context;
pub mod definitions;
mod error;
mod registry;
mod response;

pub use context::ToolContext;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use response::ToolResponse;
