//! Scope and resolver tests

mod fixtures;
mod resolver_tests;
