use crate::dimension::{Ix1, Ix2};
use crate::element::Element;
use crate::{ArrayBase, Vector};
use std::fmt;

// Long vectors and matrices are abbreviated to their first and last few
// entries once they reach this length.
const ELLIPSIS_AT: usize = 10;
const EDGE_ITEMS: usize = 3;

fn write_entries<T: Element>(v: &Vector<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let n = v.len();
    if n >= ELLIPSIS_AT {
        for i in 0..EDGE_ITEMS {
            write!(f, "{} ", v.get(i))?;
        }
        f.write_str("... ")?;
        for i in n - EDGE_ITEMS..n {
            write!(f, "{} ", v.get(i))?;
        }
    } else {
        for x in v.iter() {
            write!(f, "{} ", x)?;
        }
    }
    f.write_str("\n")
}

impl<T: Element> fmt::Display for ArrayBase<T, Ix1> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vector of {} (size {})", T::DTYPE, self.len())?;
        write_entries(self, f)
    }
}

impl<T: Element> fmt::Display for ArrayBase<T, Ix2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        writeln!(f, "Matrix of {} (size {} x {})", T::DTYPE, rows, self.cols())?;
        if rows >= ELLIPSIS_AT {
            for i in 0..EDGE_ITEMS {
                write_entries(&self.row(i), f)?;
            }
            f.write_str("...\n")?;
            for i in rows - EDGE_ITEMS..rows {
                write_entries(&self.row(i), f)?;
            }
        } else {
            for i in 0..rows {
                write_entries(&self.row(i), f)?;
            }
        }
        f.write_str("\n")
    }
}

fn format_list<T: Element>(v: &Vector<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{:?}", x)?;
    }
    f.write_str("]")
}

impl<T: Element> fmt::Debug for ArrayBase<T, Ix1> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_list(self, f)
    }
}

impl<T: Element> fmt::Debug for ArrayBase<T, Ix2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.rows() {
            if i > 0 {
                f.write_str(",\n ")?;
            }
            format_list(&self.row(i), f)?;
        }
        f.write_str("]")
    }
}
