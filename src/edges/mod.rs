//! Edge processing: image gradients and the two-threshold edge map.
//!
//! Building blocks for the fracture and veil proxies:
//!
//! - Gradient computation (Sobel/Scharr) returning `gx`, `gy`, and magnitude.
//! - Canny-style detection: non-maximum suppression on the gradient
//!   magnitude, then two-threshold hysteresis linking into a binary edge map.
//!
//! Design goals
//! - Favor clarity and cache-friendly row access over micro-optimizations.
//! - Handle borders by clamping indices (replicate).
//! - Keep outputs simple and serializable for tooling.

pub mod grad;
pub mod hysteresis;

pub use grad::{image_gradients, scharr_gradients, sobel_gradients, Grad, GradientKernel};
pub use hysteresis::{detect_edges, EdgeMap};
