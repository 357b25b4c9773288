//! ForkGuard - checkpoint verification and hard-fork rules for multi-network nodes
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Checkpoints
//! - [`checkpoints`] - Checkpoint set, block verification, reorg gating, loading
//! - [`feed`] - Remote checkpoint feed sources
//! - [`hash`] - Block hash helpers
//!
//! ## Consensus Rules
//! - [`hardfork`] - Per-network hard-fork feature activation
//! - [`network`] - Network types and per-network parameters
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`node`] - Node bootstrap and the consensus-facing API

#![forbid(unsafe_code)]

// ============================================================================
// Checkpoints
// ============================================================================
pub mod checkpoints;
pub mod feed;
pub mod hash;

// ============================================================================
// Consensus Rules
// ============================================================================
pub mod hardfork;
pub mod network;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
pub mod node;
