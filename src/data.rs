use crate::errors::DriftError;

/// Views over input data that know their own rank.
///
/// Every evaluator works on a single vector. Slices, vectors and arrays
/// are rank-1 and pass through, while two dimensional containers are
/// rejected with [`DriftError::Shape`].
pub trait AsVector<T> {
    /// Number of dimensions of the data.
    fn rank(&self) -> usize;
    /// Borrow the data as a single vector.
    fn as_vector(&self) -> Result<&[T], DriftError>;
}

impl<T> AsVector<T> for [T] {
    fn rank(&self) -> usize {
        1
    }
    fn as_vector(&self) -> Result<&[T], DriftError> {
        Ok(self)
    }
}

impl<T> AsVector<T> for Vec<T> {
    fn rank(&self) -> usize {
        1
    }
    fn as_vector(&self) -> Result<&[T], DriftError> {
        Ok(self.as_slice())
    }
}

impl<T, const N: usize> AsVector<T> for [T; N] {
    fn rank(&self) -> usize {
        1
    }
    fn as_vector(&self) -> Result<&[T], DriftError> {
        Ok(self.as_slice())
    }
}

/// Contiguous Column Major Matrix data container.
///
/// Handy for holding several monitored features at once. A matrix is never
/// a valid input for an evaluator on its own, even with a single column;
/// select a column with [`Matrix::get_col`] instead.
///
/// # Type Parameters
/// * `T` - The type of the data (e.g., `f64`, `&str`).
pub struct Matrix<'a, T> {
    /// The raw data stored in a single slice.
    pub data: &'a [T],
    /// Number of rows in the matrix.
    pub rows: usize,
    /// Number of columns in the matrix.
    pub cols: usize,
}

impl<'a, T> Matrix<'a, T> {
    /// Create a new Matrix.
    pub fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        Matrix { data, rows, cols }
    }

    /// Get an entire column in the matrix.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col(&self, col: usize) -> &'a [T] {
        &self.data[col * self.rows..(col + 1) * self.rows]
    }
}

impl<'a, T> AsVector<T> for Matrix<'a, T> {
    fn rank(&self) -> usize {
        2
    }
    fn as_vector(&self) -> Result<&[T], DriftError> {
        Err(DriftError::Shape(self.rank()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_pass_through() {
        let v = vec![1.0, 2.0, 3.0];
        assert_eq!(v.as_vector().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!([1, 2].as_vector().unwrap(), &[1, 2]);
        assert_eq!(v[1..].as_vector().unwrap(), &[2.0, 3.0]);
    }

    #[test]
    fn test_matrix_is_rejected() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let m = Matrix::new(&v, 3, 2);
        assert_eq!(m.as_vector(), Err(DriftError::Shape(2)));
        assert_eq!(m.get_col(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_single_column_matrix_is_rejected() {
        let v = vec![1.0, 2.0];
        let m = Matrix::new(&v, 2, 1);
        assert!(matches!(m.as_vector(), Err(DriftError::Shape(2))));
    }
}
