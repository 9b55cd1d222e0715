//! Single test binary entry point.
//!
//! All tests compile into one binary to keep linking overhead down.
//!
//! Structure:
//! - integration: multi-file session workflows and end-to-end scenarios
//! - unit: single-component tests against the public API
