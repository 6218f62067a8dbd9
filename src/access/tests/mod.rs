//! Unit tests for the authorization model.

mod actor_tests;
mod capability_tests;
mod role_tests;
