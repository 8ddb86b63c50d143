//! Integration tests module
//!
//! This module organizes all integration tests for the abs-probe client.

pub mod client_test;
