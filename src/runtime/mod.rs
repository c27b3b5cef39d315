//! Local development host for running functions over HTTP.

mod config;
mod reply;
mod server;

pub use config::HostConfig;
pub use reply::HttpReply;
pub use server::{build_invocation, HostServer, RequestParts};
