// nn::init - Parameter initialization utilities
//
// Standalone functions for creating initialized tensors, following
// PyTorch's `torch.nn.init` module. These are useful when building custom
// layers or when you need fine-grained control over initialization.
//
// AVAILABLE INITIALIZERS:
//
//   uniform(shape, low, high, rng)  - U(low, high)
//   xavier_uniform(shape, gain, rng) - Glorot uniform
//   zeros(shape)                    - all zeros
//
// Randomness is an injected capability: every sampling function takes the
// caller's generator instead of reaching for a process-wide source, so a
// layer seeded with a fixed value reproduces its parameters exactly.

use rand::Rng;

use vole_core::{bail, Result, Shape, Tensor};

/// Compute (fan_in, fan_out) from a shape.
///
/// Vole stores linear weights as [in_features, out_features], so for a
/// rank-2 shape fan_in is dims[0] and fan_out is dims[1]. For rank 1 both
/// fans equal the single dimension; for higher ranks the first and last
/// dimensions are used.
fn compute_fans(shape: &Shape) -> (f64, f64) {
    let dims = shape.dims();
    match dims {
        [] => (1.0, 1.0),
        [n] => (*n as f64, *n as f64),
        [fan_in, fan_out] => (*fan_in as f64, *fan_out as f64),
        _ => (dims[0] as f64, dims[dims.len() - 1] as f64),
    }
}

/// Initialize a tensor with i.i.d. draws from a uniform distribution over
/// the half-open range [low, high).
pub fn uniform(
    shape: impl Into<Shape>,
    low: f32,
    high: f32,
    rng: &mut impl Rng,
) -> Result<Tensor> {
    if low >= high {
        bail!("uniform: low {} must be strictly below high {}", low, high);
    }
    let mut t = Tensor::new(shape)?;
    for v in t.data_mut() {
        *v = rng.gen_range(low..high);
    }
    Ok(t)
}

/// Xavier (Glorot) uniform initialization.
///
/// Draws from U(-a, a) where a = gain * sqrt(6 / (fan_in + fan_out)).
/// Designed to keep activation variance stable across layers.
///
/// # Arguments
/// - `gain`: scaling factor (1.0 for linear/sigmoid activations)
pub fn xavier_uniform(shape: impl Into<Shape>, gain: f64, rng: &mut impl Rng) -> Result<Tensor> {
    let shape = shape.into();
    let (fan_in, fan_out) = compute_fans(&shape);
    let a = (gain * (6.0 / (fan_in + fan_out)).sqrt()) as f32;
    uniform(shape, -a, a, rng)
}

/// Initialize a tensor with all zeros.
pub fn zeros(shape: impl Into<Shape>) -> Result<Tensor> {
    Tensor::new(shape)
}
