// Profilescan: client for the fake-profile detection service
//
// This is the library root. The API client talks to the detection server,
// the UI controllers model the page behaviors headlessly, and the formatters
// and chart builders turn scores and counts into display values.

pub mod api;
pub mod charts;
pub mod config;
pub mod cookies;
pub mod format;
pub mod models;
pub mod output;
pub mod ui;
