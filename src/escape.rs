// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time function.  Iterate z = z^2 + c from the origin
//! until z leaves the circle of radius 2 or we run out of
//! iterations.  Points that leave get a fractional "smoothed" count
//! so the colouring doesn't band; points that never leave get the
//! iteration limit itself.

use num::Complex;

/// One step of the Mandelbrot recurrence.
#[inline]
fn step(z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
    z * z + c
}

/// Compute the smoothed escape value of `c`, using at most
/// `max_iterations` iterations.
///
/// If `c` never left the radius-2 circle, the result is exactly
/// `max_iterations`.  Otherwise it is `n + 1 - ln(log2(|z|))`, where
/// `n` is the iteration count and `z` the first value outside the
/// circle.  Since `|z| > 2` there, `log2(|z|) > 1` and the logarithm is
/// always defined.
pub fn escape_time(c: Complex<f64>, max_iterations: u32) -> f64 {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    let mut iteration = 0;

    while z.norm() <= 2.0 && iteration < max_iterations {
        iteration += 1;
        z = step(z, c);
    }

    let modulus = z.norm();
    if modulus <= 2.0 {
        return f64::from(max_iterations);
    }

    f64::from(iteration) + 1.0 - modulus.log2().ln()
}
