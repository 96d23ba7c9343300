//! Crate-level tests that run whole documents through the pipeline
