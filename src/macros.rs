/// Builds a fresh [`Vector`](crate::Vector) from a list of elements.
#[macro_export]
macro_rules! vector {
    ($($x:expr),* $(,)*) => {{
        $crate::Vector::from_vec(vec![$($x,)*])
    }};
}

/// Builds a fresh row-major [`Matrix`](crate::Matrix) from bracketed rows.
#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {{
        $crate::Matrix::from_rows(vec![$([$($x,)*],)*])
    }};
}
