// Thin re-export module: the checkpoint set lives in `checkpoints/store.rs`,
// with block verification, reorg gating and loading split into their own
// files as additional `impl` blocks or wrappers around it.

pub mod defaults;
pub mod gate;
pub mod loader;
pub mod store;
pub mod verifier;

pub use loader::*;
pub use store::*;
pub use verifier::*;
