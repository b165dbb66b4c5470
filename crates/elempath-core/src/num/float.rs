// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! # Solver Float Trait
//!
//! Edge weights and resource consumptions are real numbers: weights may be
//! negative, resource components are non-negative. `SolverFloat` collects the
//! bounds the graph model and the engines need into a single alias so generic
//! signatures stay short. `f32` and `f64` both qualify.
//!
//! Besides `num_traits::Float` the alias asks for `Debug`/`Display` (logging
//! and error messages) and `Send + Sync + 'static` so graphs can be shared
//! read-only across threads by callers.

use num_traits::Float;

/// Numeric bound for weights and resource consumption.
pub trait SolverFloat:
    Float + std::fmt::Debug + std::fmt::Display + Default + Send + Sync + 'static
{
    /// Returns `true` if the value may be used as a resource component:
    /// finite and not negative.
    #[inline]
    fn is_valid_resource(self) -> bool {
        self.is_finite() && self >= Self::zero()
    }
}

impl<T> SolverFloat for T where
    T: Float + std::fmt::Debug + std::fmt::Display + Default + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_resource_rejects_negative_and_non_finite() {
        assert!(0.0_f64.is_valid_resource());
        assert!(0.25_f64.is_valid_resource());
        assert!(!(-0.1_f64).is_valid_resource());
        assert!(!f64::INFINITY.is_valid_resource());
        assert!(!f64::NAN.is_valid_resource());
    }
}
