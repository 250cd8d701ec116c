//! # vole-nn
//!
//! Trainable layers and parameter initialization for Vole.
//!
//! Provides the building blocks for manual-backprop training on top of
//! `vole-core` tensors:
//!
//! 1. **Module trait** — every layer implements `forward()` / `backward()`
//!    / `zero_grad()`
//! 2. **Linear** — fully connected: `y = xW + b`, with per-layer gradient
//!    accumulation
//! 3. **init** — seeded initializers (uniform, Xavier uniform, zeros)
//!
//! There is no autograd graph: each layer owns gradient storage mirroring
//! its parameters, and a training loop external to this crate drives the
//! `zero_grad` → `forward` → `backward` cycle before handing gradients to
//! an optimizer.

pub mod init;
pub mod linear;
pub mod module;

pub use linear::{Linear, DEFAULT_SEED};
pub use module::Module;
