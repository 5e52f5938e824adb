//! Public library API for the record runtime: the tagged-union value type that
//! flows through the engine, its teardown, and its binary wire codec.

/// Record values, lifecycle, map container, collaborator hooks, and wire codec.
pub mod record;
