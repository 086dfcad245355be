use crate::{Error, Plane, PlaneView, PlaneViewMut};

/// A dense plane-major stack of same-shaped planes. Plane `k` occupies
/// elements `k * rows * cols .. (k + 1) * rows * cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneStack<T> {
    planes: usize,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> PlaneStack<T> {
    pub fn from_vec(planes: usize, rows: usize, cols: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = planes
            .checked_mul(rows)
            .and_then(|v| v.checked_mul(cols))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            planes,
            rows,
            cols,
            data,
        })
    }

    pub fn planes(&self) -> usize {
        self.planes
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn plane_view(&self, k: usize) -> Result<PlaneView<'_, T>, Error> {
        let slice = self.plane_slice(k)?;
        PlaneView::from_slice(self.rows, self.cols, self.cols, slice)
    }

    pub fn plane_view_mut(&mut self, k: usize) -> Result<PlaneViewMut<'_, T>, Error> {
        let (rows, cols) = (self.rows, self.cols);
        let slice = self.plane_slice_mut(k)?;
        PlaneViewMut::from_slice_mut(rows, cols, cols, slice)
    }

    fn plane_slice(&self, k: usize) -> Result<&[T], Error> {
        if k >= self.planes {
            return Err(Error::OutOfBounds);
        }
        let len = self.rows * self.cols;
        Ok(&self.data[k * len..(k + 1) * len])
    }

    fn plane_slice_mut(&mut self, k: usize) -> Result<&mut [T], Error> {
        if k >= self.planes {
            return Err(Error::OutOfBounds);
        }
        let len = self.rows * self.cols;
        Ok(&mut self.data[k * len..(k + 1) * len])
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T: Clone> PlaneStack<T> {
    pub fn new_fill(planes: usize, rows: usize, cols: usize, value: T) -> Self {
        let len = planes
            .checked_mul(rows)
            .and_then(|v| v.checked_mul(cols))
            .expect("stack size overflow");
        Self {
            planes,
            rows,
            cols,
            data: vec![value; len],
        }
    }

    /// Stack `n` copies of one plane.
    pub fn repeat(plane: &Plane<T>, n: usize) -> Self {
        let mut data = Vec::with_capacity(plane.data().len() * n);
        for _ in 0..n {
            data.extend_from_slice(plane.data());
        }
        Self {
            planes: n,
            rows: plane.rows(),
            cols: plane.cols(),
            data,
        }
    }
}
