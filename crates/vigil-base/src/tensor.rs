use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape product overflows usize"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape wants {expected} elements, data has {got}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// Dense row-major tensor: a shape plus a flat data vector.
///
/// Frame tensors use HWC layout `[height, width, channels]`; stacked model
/// inputs prepend batch (and time) dimensions.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

fn shape_product(shape: &[usize]) -> Result<usize, TensorError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or(TensorError::ShapeOverflow)
}

impl<T> Tensor<T> {
    /// Build a tensor, checking that `data.len()` matches the shape product.
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected = shape_product(&shape)?;
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Number of dimensions in the shape.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Default + Clone> Tensor<T> {
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let len = shape_product(&shape)?;
        Ok(Self {
            shape,
            data: vec![T::default(); len],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_data() {
        let t = Tensor::new(vec![2, 3], vec![0u8; 6]).unwrap();
        assert_eq!(t.rank(), 2);
        assert_eq!(t.len(), 6);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = Tensor::new(vec![2, 3], vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            TensorError::ShapeMismatch {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn new_rejects_overflowing_shape() {
        let err = Tensor::<u8>::new(vec![usize::MAX, 2], vec![]).unwrap_err();
        assert_eq!(err, TensorError::ShapeOverflow);
    }

    #[test]
    fn zeros_fills_default() {
        let t = Tensor::<f32>::zeros(vec![1, 2, 2, 3]).unwrap();
        assert_eq!(t.len(), 12);
        assert!(t.data.iter().all(|v| *v == 0.0));
    }
}
