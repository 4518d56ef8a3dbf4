// Test modules for the incident-ai crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities (stub providers, wiremock-backed settings builders)
pub mod helpers;

// Core unit tests
pub mod config;
pub mod registry;
