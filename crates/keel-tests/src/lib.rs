//! Adversarial test suite for Keel checkpoints.
//!
//! Integration tests that try to slip an alternate history past the
//! checkpoint table or move the trust anchor backwards.

pub mod helpers;
