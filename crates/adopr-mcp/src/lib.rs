//! MCP server exposing Azure DevOps pull requests as read-only resources.
//!
//! Resource URIs:
//! - `ado://pull-requests/{organization}/{project}/{repository}?status={filter}`
//! - `ado://pull-requests/current?status={filter}`
//!
//! The `status` filter is one of `active` (default), `completed`,
//! `abandoned`, `all`.

pub mod handler;
pub mod protocol;
pub mod router;
pub mod server;
pub mod transport;

pub use handler::ResourceHandler;
pub use server::McpServer;
