//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

/// Drink identifier - globally unique, immutable after assignment.
///
/// Assigned by [`crate::domain::ids::DrinkIdGen`] at construction. NEVER derived
/// from the drink's memory address or any other process-local identity.
pub type DrinkId = u64;

/// Order identifier - unique within the system.
pub type OrderId = u64;

/// Position of an [`crate::domain::Item`] within the live queue sequence.
pub type Position = usize;
