//! Unit tests for the intake ledger.
