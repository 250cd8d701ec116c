// Module trait - The interface every trainable layer implements
//
// In PyTorch, `nn.Module` is the base class for all neural network layers.
// In Vole, `Module` is a trait that every layer implements.
//
// Vole has no autograd graph. Each layer owns explicit gradient-accumulator
// tensors mirroring its parameter shapes, and a training loop drives one
// zero_grad / forward / backward cycle per step before handing the
// accumulated gradients to an optimizer. That is why forward takes
// `&mut self`: a layer caches its most recent input so the matching
// backward call can compute gradients from it.

use vole_core::{Result, Tensor};

/// The fundamental trait for all trainable layers.
///
/// Every layer in Vole implements this trait, providing:
/// - `forward()`: compute output from input, caching what backward needs
/// - `backward()`: accumulate parameter gradients and return the input gradient
/// - `zero_grad()`: reset accumulated gradients (and the forward cache)
/// - `parameters()`: the trainable tensors, for optimizer consumption
pub trait Module {
    /// Compute the output tensor from the input tensor.
    ///
    /// Overwrites the layer's forward cache; the next `backward` call
    /// differentiates through this invocation.
    fn forward(&mut self, input: &Tensor) -> Result<Tensor>;

    /// Accumulate parameter gradients from the gradient of the loss with
    /// respect to the last forward output, and return the gradient with
    /// respect to that forward call's input.
    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor>;

    /// Reset all accumulated gradients to zero and drop the forward cache.
    fn zero_grad(&mut self);

    /// All trainable parameters of this layer.
    fn parameters(&self) -> Vec<&Tensor>;

    /// Total number of scalar parameters in this layer.
    fn num_parameters(&self) -> usize {
        self.parameters().iter().map(|p| p.elem_count()).sum()
    }
}
