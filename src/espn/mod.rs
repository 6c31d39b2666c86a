//! ESPN Fantasy v3 API: HTTP access, payload types, and derived matchups.

pub mod compute;
pub mod http;
pub mod scoreboard;
pub mod types;
