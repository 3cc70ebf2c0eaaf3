//! Dense matrix storage with a constant number of columns.

use std::fmt::Debug;
use std::fmt::Error as FmtError;
use std::fmt::Formatter;
use std::ops::Index;
use std::ops::IndexMut;

use generic_array::ArrayLength;
use generic_array::GenericArray;
use typenum::marker_traits::Unsigned;

// --- DenseMatrix -------------------------------------------------------------

/// A dense matrix with a constant number of columns.
///
/// Each row is stored inline as a [`GenericArray`], so the column count is
/// checked at compile time while the number of rows can grow freely.
#[derive(Clone, PartialEq, Eq)]
pub struct DenseMatrix<T: Default + Copy, C: ArrayLength> {
    data: Vec<GenericArray<T, C>>,
}

impl<T: Default + Copy, C: ArrayLength> DenseMatrix<T, C> {
    /// Create a new matrix with the given number of rows.
    pub fn new(rows: usize) -> Self {
        let mut matrix = Self { data: Vec::new() };
        matrix.resize(rows);
        matrix
    }

    /// The number of columns of the matrix.
    #[inline]
    pub fn columns(&self) -> usize {
        C::USIZE
    }

    /// The number of rows of the matrix.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Change the number of rows of the matrix.
    pub fn resize(&mut self, rows: usize) {
        self.data.resize_with(rows, GenericArray::default);
    }

    /// Get a reference to a single cell, if it exists.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.data.get(row).and_then(|r| r.get(column))
    }

    /// Get a mutable reference to a single cell, if it exists.
    #[inline]
    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        self.data.get_mut(row).and_then(|r| r.get_mut(column))
    }

    /// Iterate over the rows of the matrix.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[T]> + ExactSizeIterator {
        self.data.iter().map(|row| row.as_slice())
    }

    /// Returns an iterator that allows modifying each row.
    #[inline]
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut [T]> + ExactSizeIterator {
        self.data.iter_mut().map(|row| row.as_mut_slice())
    }
}

impl<T: Default + Copy + Debug, C: ArrayLength> Debug for DenseMatrix<T, C> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Default + Copy, C: ArrayLength> Index<usize> for DenseMatrix<T, C> {
    type Output = [T];
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.data[index].as_slice()
    }
}

impl<T: Default + Copy, C: ArrayLength> IndexMut<usize> for DenseMatrix<T, C> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.data[index].as_mut_slice()
    }
}

#[cfg(test)]
mod test {
    use typenum::consts::U4;

    use super::*;

    #[test]
    fn test_resize() {
        let mut dense = DenseMatrix::<u64, U4>::new(4);
        for i in 0..4 {
            dense[i][0] = (i + 1) as u64;
        }
        assert_eq!(dense[3][0], 4);

        dense.resize(256);
        assert_eq!(dense.rows(), 256);
        assert_eq!(dense[0][0], 1);
        assert_eq!(dense[3][0], 4);
        assert_eq!(dense[255][0], 0);

        dense.resize(2);
        assert_eq!(dense.rows(), 2);
        assert_eq!(dense[1][0], 2);
    }

    #[test]
    fn test_iter_mut() {
        let mut dense = DenseMatrix::<u64, U4>::new(4);
        for i in 0..4 {
            dense[i][0] = (i + 1) as u64;
        }
        for row in dense.iter_mut() {
            row[0] *= 4;
        }
        assert_eq!(dense[0][0], 4);
        assert_eq!(dense[1][0], 8);
        assert_eq!(dense[2][0], 12);
        assert_eq!(dense[3][0], 16);
    }

    #[test]
    fn test_get() {
        let mut dense = DenseMatrix::<f64, U4>::new(2);
        *dense.get_mut(1, 3).unwrap() = 0.5;
        assert_eq!(dense.get(1, 3), Some(&0.5));
        assert_eq!(dense.get(1, 4), None);
        assert_eq!(dense.get(2, 0), None);
    }
}
