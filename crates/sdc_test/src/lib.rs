//! Test-only crate; see `tests/harness.rs` at the workspace root.
