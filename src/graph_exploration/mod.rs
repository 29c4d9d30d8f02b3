//! Graph exploration domain layer
//!
//! Pure graph logic: building the forward dependency graph from a
//! dependency source, filtering, cycle detection and reverse queries.
//! Nothing in here performs I/O directly; resolution goes through the
//! `DependencySource` port.
pub mod domain;
pub mod services;
