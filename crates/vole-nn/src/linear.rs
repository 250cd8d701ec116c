// Linear - Fully-connected (dense) layer
//
// The most fundamental neural network layer: y = xW + b
//
// Linear(in_features, out_features) transforms an input of shape
// [..., in_features] to [..., out_features]. All leading dimensions are
// collapsed into a single batch count for the matrix product and restored
// on the output, so rank-1 vectors, [batch, features] matrices, and
// higher-rank inputs all go through the same code path.
//
// WEIGHT CONVENTION:
//
//   weight: [in_features, out_features]
//
// This is transposed relative to the usual mathematical convention:
// weight[i, o] connects input feature i to output feature o, and forward
// computes out[r, o] = sum_i in[r, i] * weight[i, o], never weight[o, i].
//
// GRADIENTS:
//
// There is no autograd graph. The layer owns grad_weight and grad_bias
// mirroring its parameter shapes, and forward caches a deep copy of its
// input so a later backward call can accumulate into them:
//
//   grad_weight[i, o] += sum_r x[r, i] * g[r, o]
//   grad_bias[o]      += sum_r g[r, o]
//   grad_input[r, i]   = sum_o g[r, o] * weight[i, o]
//
// Gradients accumulate across forward/backward pairs until zero_grad()
// resets them, which is the conventional training-loop contract.

use rand::rngs::StdRng;
use rand::SeedableRng;

use vole_core::{Error, Result, Shape, Tensor};

use crate::init;
use crate::module::Module;

/// Seed used when the caller has no preference.
pub const DEFAULT_SEED: u64 = 1337;

/// A fully-connected (dense) layer: y = xW + b.
///
/// # Examples
/// ```
/// use vole_nn::{Linear, Module};
/// use vole_core::Tensor;
///
/// let mut linear = Linear::new(3, 2, true, vole_nn::DEFAULT_SEED)?;
/// let x = Tensor::new((4, 3))?; // batch of 4
/// let y = linear.forward(&x)?;  // shape: [4, 2]
/// assert_eq!(y.dims(), &[4, 2]);
/// # Ok::<(), vole_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Linear {
    in_features: usize,
    out_features: usize,

    /// Weight matrix: [in_features, out_features].
    weight: Tensor,
    /// Optional bias vector: [out_features].
    bias: Option<Tensor>,

    /// Accumulated weight gradient, same shape as `weight`.
    grad_weight: Tensor,
    /// Accumulated bias gradient, present iff `bias` is.
    grad_bias: Option<Tensor>,

    /// Deep copy of the most recent forward input. Single slot: each
    /// forward overwrites it, each successful backward consumes it.
    cached_input: Option<Tensor>,

    /// Per-instance generator so initialization is reproducible from the
    /// construction seed alone.
    rng: StdRng,
}

impl Linear {
    /// Create a new Linear layer with Xavier-uniform weights and (if
    /// enabled) a zero bias. Gradient storage starts out zeroed.
    ///
    /// # Arguments
    /// - `in_features`: size of each input sample, must be positive
    /// - `out_features`: size of each output sample, must be positive
    /// - `use_bias`: whether to add a learnable bias
    /// - `seed`: seed for the layer-owned random generator
    pub fn new(in_features: usize, out_features: usize, use_bias: bool, seed: u64) -> Result<Self> {
        if in_features == 0 || out_features == 0 {
            return Err(Error::InvalidArgument(format!(
                "feature counts must be positive, got in_features={}, out_features={}",
                in_features, out_features
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let weight = init::xavier_uniform((in_features, out_features), 1.0, &mut rng)?;
        let grad_weight = init::zeros((in_features, out_features))?;

        let (bias, grad_bias) = if use_bias {
            (
                Some(init::zeros(out_features)?),
                Some(init::zeros(out_features)?),
            )
        } else {
            (None, None)
        };

        Ok(Linear {
            in_features,
            out_features,
            weight,
            bias,
            grad_weight,
            grad_bias,
            cached_input: None,
            rng,
        })
    }

    /// Re-draw the weights from the layer's own generator and zero the
    /// bias and all gradient storage. The forward cache is dropped.
    ///
    /// The generator continues from where construction left it, so a reset
    /// layer gets fresh values while two layers built with the same seed
    /// still evolve identically.
    pub fn reset_parameters(&mut self) -> Result<()> {
        self.weight =
            init::xavier_uniform((self.in_features, self.out_features), 1.0, &mut self.rng)?;
        if let Some(bias) = &mut self.bias {
            bias.data_mut().fill(0.0);
        }
        self.zero_grad();
        Ok(())
    }

    // Accessors

    /// The input feature dimension.
    pub fn in_features(&self) -> usize {
        self.in_features
    }

    /// The output feature dimension.
    pub fn out_features(&self) -> usize {
        self.out_features
    }

    /// Whether this layer carries a bias term.
    pub fn uses_bias(&self) -> bool {
        self.bias.is_some()
    }

    /// The weight tensor, shape [in_features, out_features].
    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    /// The bias tensor (if any), shape [out_features].
    pub fn bias(&self) -> Option<&Tensor> {
        self.bias.as_ref()
    }

    /// Accumulated weight gradient.
    pub fn grad_weight(&self) -> &Tensor {
        &self.grad_weight
    }

    /// Accumulated bias gradient (if bias is enabled).
    pub fn grad_bias(&self) -> Option<&Tensor> {
        self.grad_bias.as_ref()
    }

    /// Mutable weight access, for optimizer updates.
    pub fn weight_mut(&mut self) -> &mut Tensor {
        &mut self.weight
    }

    /// Mutable bias access, for optimizer updates.
    pub fn bias_mut(&mut self) -> Option<&mut Tensor> {
        self.bias.as_mut()
    }

    /// Output shape for a given input shape: leading dims plus
    /// [out_features].
    fn output_shape(&self, input_dims: &[usize]) -> Shape {
        let mut dims = input_dims[..input_dims.len() - 1].to_vec();
        dims.push(self.out_features);
        Shape::new(dims)
    }
}

impl Module for Linear {
    /// Forward pass: out[r, o] = sum_i in[r, i] * weight[i, o] + bias[o].
    ///
    /// The input must have rank >= 1 and its last dimension must equal
    /// `in_features`. Leading dimensions are flattened into a batch count
    /// of B = product(leading dims), or B = 1 for a rank-1 input, and the
    /// output keeps the leading dimensions with the last replaced by
    /// `out_features`.
    ///
    /// Caches a copy of `input` for the next backward call, overwriting
    /// any previous cache. The returned tensor never aliases `input`.
    fn forward(&mut self, input: &Tensor) -> Result<Tensor> {
        if input.rank() == 0 {
            return Err(Error::InvalidArgument(
                "forward input must have rank >= 1".to_string(),
            ));
        }
        let dims = input.dims();
        let last = dims[dims.len() - 1];
        if last != self.in_features {
            return Err(Error::FeatureMismatch {
                expected: self.in_features,
                got: last,
            });
        }

        let batch: usize = dims[..dims.len() - 1].iter().product();
        let mut output = Tensor::new(self.output_shape(dims))?;

        let x = input.data();
        let w = self.weight.data();
        let b = self.bias.as_ref().map(|b| b.data());
        let out = output.data_mut();
        for r in 0..batch {
            for o in 0..self.out_features {
                let mut acc = 0.0f32;
                for i in 0..self.in_features {
                    acc += x[r * self.in_features + i] * w[i * self.out_features + o];
                }
                if let Some(b) = b {
                    acc += b[o];
                }
                out[r * self.out_features + o] = acc;
            }
        }

        self.cached_input = Some(input.clone());
        Ok(output)
    }

    /// Backward pass for the most recent forward call.
    ///
    /// `grad_output` must match the shape of that forward call's output.
    /// Accumulates into `grad_weight` / `grad_bias` and returns the
    /// gradient with respect to the cached input, shape-matched to it.
    /// The cache is consumed: one backward per forward.
    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor> {
        let cached = self.cached_input.take().ok_or_else(|| {
            Error::InvalidState("backward called with no cached forward input".to_string())
        })?;

        let expected = self.output_shape(cached.dims());
        if grad_output.shape() != &expected {
            let got = grad_output.shape().clone();
            // Failed call: the layer stays in the cached state.
            self.cached_input = Some(cached);
            return Err(Error::ShapeMismatch { expected, got });
        }

        let in_dims = cached.dims();
        let batch: usize = in_dims[..in_dims.len() - 1].iter().product();
        let x = cached.data();
        let g = grad_output.data();

        let gw = self.grad_weight.data_mut();
        for r in 0..batch {
            for i in 0..self.in_features {
                let xv = x[r * self.in_features + i];
                for o in 0..self.out_features {
                    gw[i * self.out_features + o] += xv * g[r * self.out_features + o];
                }
            }
        }

        if let Some(gb) = &mut self.grad_bias {
            let gb = gb.data_mut();
            for r in 0..batch {
                for o in 0..self.out_features {
                    gb[o] += g[r * self.out_features + o];
                }
            }
        }

        let mut grad_input = Tensor::new(cached.shape().clone())?;
        let w = self.weight.data();
        let gi = grad_input.data_mut();
        for r in 0..batch {
            for i in 0..self.in_features {
                let mut acc = 0.0f32;
                for o in 0..self.out_features {
                    acc += g[r * self.out_features + o] * w[i * self.out_features + o];
                }
                gi[r * self.in_features + i] = acc;
            }
        }

        Ok(grad_input)
    }

    /// Reset every element of the gradient storage to zero and drop the
    /// forward cache. Idempotent.
    fn zero_grad(&mut self) {
        self.grad_weight.data_mut().fill(0.0);
        if let Some(gb) = &mut self.grad_bias {
            gb.data_mut().fill(0.0);
        }
        self.cached_input = None;
    }

    fn parameters(&self) -> Vec<&Tensor> {
        let mut params = vec![&self.weight];
        if let Some(b) = &self.bias {
            params.push(b);
        }
        params
    }
}
