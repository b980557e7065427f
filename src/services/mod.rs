/// Health check service.
pub mod health_service;
/// Periodic fetching of the remote game state.
pub mod poller;
/// Engine driver, task wiring and view access.
pub mod scoreboard_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events subscription and streaming.
pub mod sse_service;
