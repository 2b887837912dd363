//! Integration tests
//!
//! `api_tests` drives the HTTP repository against a wiremock server;
//! `session_tests` runs full browsing scenarios through the session runtime.

mod api_tests;
mod session_tests;
