// Demo: Linear Regression with a Vole Linear layer
//
// Vole has no autograd graph and no built-in optimizer, so this demo is
// the full training contract in one place:
//
//   1. zero_grad:  reset the layer's gradient accumulators
//   2. forward:    compute predictions (the layer caches its input)
//   3. loss:       MSE = mean((y_pred - y_true)^2), computed by hand
//   4. backward:   feed dL/dy_pred, the layer accumulates grad_weight
//                  and grad_bias and returns dL/dx
//   5. update:     SGD step through weight_mut / bias_mut
//
// We're learning y = 2*x + 1 with a single Linear(1, 1) layer.

use vole_core::{Result, Tensor};
use vole_nn::{Linear, Module, DEFAULT_SEED};

fn main() -> Result<()> {
    // Synthetic data for the true function y = 2*x + 1
    let xs: Vec<f32> = (0..10).map(|i| i as f32).collect();
    let ys: Vec<f32> = xs.iter().map(|&x| 2.0 * x + 1.0).collect();
    let n = xs.len();

    let x = Tensor::from_vec(xs, (n, 1))?;
    let y_true = Tensor::from_vec(ys, (n, 1))?;

    let mut layer = Linear::new(1, 1, true, DEFAULT_SEED)?;
    let lr = 0.02f32;

    println!("fitting y = 2x + 1 with Linear(1, 1), lr = {}\n", lr);

    for epoch in 0..1000 {
        layer.zero_grad();

        let y_pred = layer.forward(&x)?;
        let diff = y_pred.sub(&y_true)?;

        let loss: f32 = diff.data().iter().map(|d| d * d).sum::<f32>() / n as f32;
        if epoch % 100 == 0 {
            println!(
                "epoch {:4}: loss = {:.6}, w = {:.4}, b = {:.4}",
                epoch,
                loss,
                layer.weight().get2(0, 0)?,
                layer.bias().map_or(0.0, |b| b.data()[0]),
            );
        }

        // dL/dy = 2/N * (y_pred - y_true)
        let grad_out = diff.scale(2.0 / n as f32);
        layer.backward(&grad_out)?;

        // SGD step
        let new_w = layer.weight().sub(&layer.grad_weight().scale(lr))?;
        *layer.weight_mut() = new_w;
        if let (Some(bias), Some(grad_bias)) = (layer.bias(), layer.grad_bias()) {
            let new_b = bias.sub(&grad_bias.scale(lr))?;
            if let Some(bias) = layer.bias_mut() {
                *bias = new_b;
            }
        }
    }

    println!(
        "\nfinal: w = {:.4} (expected 2.0), b = {:.4} (expected 1.0)",
        layer.weight().get2(0, 0)?,
        layer.bias().map_or(0.0, |b| b.data()[0]),
    );

    Ok(())
}
