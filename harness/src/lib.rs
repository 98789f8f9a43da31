//! Waypoint Harness: test worlds, configuration and canonical run reports
//! for the search engine.
//!
//! The harness drives `waypoint_search` and never reaches into its
//! internals: worlds implement `SearchWorld`, the runner calls
//! `anytime_search`, and the report module summarizes the returned
//! `AnytimeResult` as canonical JSON with a content digest.

#![forbid(unsafe_code)]

pub mod canon;
pub mod config;
pub mod hash;
pub mod report;
pub mod runner;
pub mod worlds;
