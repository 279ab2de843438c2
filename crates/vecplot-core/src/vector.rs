//! Elementwise arithmetic over coordinate tuples.
//!
//! Scene authors build primitives out of sums and differences of vectors
//! (`tip = add([tail, direction])`, `edge = subtract(b, a)`). The helpers here
//! work on `[f64; N]` for any dimension `N`; mixing dimensions is a type
//! error rather than a silent truncation.
//!
//! # Examples
//!
//! ```
//! use vecplot_core::vector;
//!
//! let sum = vector::add([[1.0, 2.0], [3.0, 4.0], [-1.0, 0.5]]);
//! assert_eq!(sum, [3.0, 6.5]);
//!
//! let diff = vector::subtract([5.0, 5.0, 5.0], [1.0, 2.0, 3.0]);
//! assert_eq!(diff, [4.0, 3.0, 2.0]);
//! ```

/// Sums any number of same-dimension vectors elementwise.
///
/// An empty input yields the zero vector; a single vector is returned as is.
pub fn add<const N: usize, I>(vectors: I) -> [f64; N]
where
    I: IntoIterator<Item = [f64; N]>,
{
    vectors.into_iter().fold([0.0; N], |mut acc, v| {
        for (sum, coord) in acc.iter_mut().zip(v) {
            *sum += coord;
        }
        acc
    })
}

/// Returns `a - b` elementwise.
pub fn subtract<const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    let mut out = a;
    for (coord, rhs) in out.iter_mut().zip(b) {
        *coord -= rhs;
    }
    out
}

/// Multiplies every coordinate by `factor`.
pub fn scale<const N: usize>(v: [f64; N], factor: f64) -> [f64; N] {
    v.map(|coord| coord * factor)
}

/// Euclidean length.
pub fn length<const N: usize>(v: [f64; N]) -> f64 {
    v.iter().map(|coord| coord * coord).sum::<f64>().sqrt()
}
