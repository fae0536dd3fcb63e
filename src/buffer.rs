use crate::element::Element;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Fixed-size shared storage behind every [`Vector`](crate::Vector) and
/// [`Matrix`](crate::Matrix).
///
/// Cloning a `Buffer` hands out another handle to the same slots; the slots
/// are freed when the last handle goes away. A buffer is never resized.
/// Writes through any handle are visible through all of them, there is no
/// locking and the type is neither `Send` nor `Sync`.
pub struct Buffer<T> {
    cells: Rc<[Cell<T>]>,
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
        }
    }
}

impl<T: Element> Buffer<T> {
    /// Allocates `n` zeroed slots.
    pub fn allocate(n: usize) -> Self {
        Self::from_elem(T::zero(), n)
    }

    pub fn from_elem(elem: T, n: usize) -> Self {
        Self {
            cells: (0..n).map(|_| Cell::new(elem)).collect(),
        }
    }

    pub fn from_vec(v: Vec<T>) -> Self {
        Self {
            cells: v.into_iter().map(Cell::new).collect(),
        }
    }

    /// Reads physical slot `idx`. Panics if `idx` is outside the buffer.
    #[inline]
    pub fn get(&self, idx: usize) -> T {
        self.cells[idx].get()
    }

    /// Writes physical slot `idx`. Panics if `idx` is outside the buffer.
    #[inline]
    pub fn set(&self, idx: usize, x: T) {
        self.cells[idx].set(x)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(Cell::get).collect()
    }
}

impl<T> Buffer<T> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Start of the contiguous region, for handing to native code.
    ///
    /// Writing through the pointer is allowed: the slots are interior-mutable.
    /// The pointer is dangling when the buffer is empty and is only valid
    /// while some handle to this buffer is alive.
    pub fn base_address(&self) -> *mut T {
        // Cell<T> has the same in-memory representation as T.
        self.cells.as_ptr() as *mut T
    }

    /// Number of live handles (buffers and views) sharing this storage.
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.cells)
    }

    pub fn ptr_eq(&self, other: &Buffer<T>) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }
}

impl<T: Element> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.cells.iter().map(Cell::get))
            .finish()
    }
}
