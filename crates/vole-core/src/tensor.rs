use std::fmt;

use crate::error::{Error, Result};
use crate::shape::Shape;

// Tensor - The fundamental data structure
//
// A Tensor is an n-dimensional array of f32 values, the building block of
// all numeric computation in Vole. Unlike framework tensors that share
// storage through reference counting, a Vole tensor:
//
//   1. Exclusively owns a contiguous, row-major Vec<f32> buffer
//   2. Has a fixed shape for its whole lifetime (no in-place resizing)
//   3. Is a plain value: Clone is a deep copy of the buffer
//
// MEMORY MODEL:
//
//   Data is stored row-major (C-order), the last dimension varying
//   fastest. Element [i0, i1, ..., ik] lives at flat offset
//   sum(i_d * stride[d]) where the strides are the contiguous strides of
//   the shape. Every arithmetic result is a fresh tensor; no operation
//   ever aliases an operand's buffer, so callers can mutate operands
//   freely after the fact.
//
// The invariant data.len() == shape.elem_count() holds for every
// constructed tensor and is preserved by all operations.

/// A dense, row-major, fixed-shape array of f32 values.
///
/// # Example
/// ```
/// use vole_core::Tensor;
///
/// let mut t = Tensor::new((2, 2))?;
/// t.set(&[0, 1], 3.5)?;
/// assert_eq!(t.get(&[0, 1])?, 3.5);
/// # Ok::<(), vole_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    data: Vec<f32>,
}

impl Tensor {
    // Creation

    /// Create a zero-filled tensor with the given shape.
    ///
    /// The shape must be non-empty (rank >= 1). Dimensions of size 0 are
    /// allowed and produce a tensor with no elements.
    pub fn new(shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        if shape.rank() == 0 {
            return Err(Error::EmptyShape);
        }
        let data = vec![0.0; shape.elem_count()];
        Ok(Tensor { shape, data })
    }

    /// Create a tensor from a flat vec of values in row-major order.
    pub fn from_vec(data: Vec<f32>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        if shape.rank() == 0 {
            return Err(Error::EmptyShape);
        }
        if data.len() != shape.elem_count() {
            return Err(Error::ElementCountMismatch {
                expected: shape.elem_count(),
                got: data.len(),
                shape,
            });
        }
        Ok(Tensor { shape, data })
    }

    // Accessors

    /// The shape of this tensor.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The dimensions as a slice (shortcut for shape().dims()).
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Total number of elements.
    pub fn elem_count(&self) -> usize {
        self.data.len()
    }

    /// The flat row-major data buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the flat data buffer. The shape is unaffected;
    /// this is the hook for initializers and optimizer updates.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    // Indexing

    /// Convert a multi-dimensional index to a flat storage offset,
    /// checking arity and bounds along the way.
    fn flat_index(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.rank() {
            return Err(Error::RankMismatch {
                expected: self.rank(),
                got: indices.len(),
            });
        }
        let dims = self.dims();
        let strides = self.shape.stride_contiguous();
        let mut flat = 0;
        for (d, (&idx, &stride)) in indices.iter().zip(strides.iter()).enumerate() {
            if idx >= dims[d] {
                return Err(Error::IndexOutOfRange {
                    dim: d,
                    index: idx,
                    size: dims[d],
                });
            }
            flat += idx * stride;
        }
        Ok(flat)
    }

    /// Flat offset for a rank-2 tensor addressed by row and column.
    fn flat_index2(&self, i: usize, j: usize) -> Result<usize> {
        if self.rank() != 2 {
            return Err(Error::InvalidArgument(format!(
                "two-index accessor requires a rank-2 tensor, got rank {}",
                self.rank()
            )));
        }
        let dims = self.dims();
        if i >= dims[0] {
            return Err(Error::IndexOutOfRange {
                dim: 0,
                index: i,
                size: dims[0],
            });
        }
        if j >= dims[1] {
            return Err(Error::IndexOutOfRange {
                dim: 1,
                index: j,
                size: dims[1],
            });
        }
        Ok(i * dims[1] + j)
    }

    /// Read the element at a multi-dimensional index.
    pub fn get(&self, indices: &[usize]) -> Result<f32> {
        let idx = self.flat_index(indices)?;
        Ok(self.data[idx])
    }

    /// Write the element at a multi-dimensional index.
    pub fn set(&mut self, indices: &[usize], value: f32) -> Result<()> {
        let idx = self.flat_index(indices)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Read element (i, j) of a rank-2 tensor.
    pub fn get2(&self, i: usize, j: usize) -> Result<f32> {
        let idx = self.flat_index2(i, j)?;
        Ok(self.data[idx])
    }

    /// Write element (i, j) of a rank-2 tensor.
    pub fn set2(&mut self, i: usize, j: usize, value: f32) -> Result<()> {
        let idx = self.flat_index2(i, j)?;
        self.data[idx] = value;
        Ok(())
    }

    // Element-wise arithmetic
    //
    // All binary operations require identical shapes and return a fresh
    // tensor. There is no broadcasting.

    /// Element-wise sum with another tensor of the same shape.
    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        if self.shape != other.shape {
            return Err(Error::ShapeMismatch {
                expected: self.shape.clone(),
                got: other.shape.clone(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Tensor {
            shape: self.shape.clone(),
            data,
        })
    }

    /// Element-wise difference with another tensor of the same shape.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor> {
        if self.shape != other.shape {
            return Err(Error::ShapeMismatch {
                expected: self.shape.clone(),
                got: other.shape.clone(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        Ok(Tensor {
            shape: self.shape.clone(),
            data,
        })
    }

    /// Multiply every element by a scalar.
    pub fn scale(&self, scalar: f32) -> Tensor {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(|v| scalar * v).collect(),
        }
    }
}

impl fmt::Display for Tensor {
    /// Debug dump: shape, element count, and the flat data sequence.
    /// The exact format is a debugging aid, not a compatibility contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tensor(shape={}, size={})", self.shape, self.elem_count())?;
        write!(f, "data=[")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}
