//! Workspace-level integration tests for FactCalc-rs. See `tests/`.
