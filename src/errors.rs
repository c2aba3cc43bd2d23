// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two ways a run can go wrong: the user handed us something we
//! can't render, or the render itself failed.  Either way the run is
//! over and nothing is written.

use std::io;

/// Problems with the parameters, caught before any pixel is computed.
#[derive(Debug, Fail)]
pub enum ConfigError {
    /// The value could not be read as a number at all.
    #[fail(display = "{} must be a number, got '{}'", name, value)]
    NotANumber {
        /// The parameter being parsed.
        name: &'static str,
        /// What the user actually gave us.
        value: String,
    },

    /// Width, height and iteration counts must be at least one.
    #[fail(display = "{} must be a positive integer, got {}", name, value)]
    NotPositive {
        /// The parameter being checked.
        name: &'static str,
        /// The offending value.
        value: i64,
    },

    /// Bounds of the complex plane must be ordinary numbers.
    #[fail(display = "{} must be finite, got {}", name, value)]
    NotFinite {
        /// The parameter being checked.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A worker pool of zero threads never finishes.
    #[fail(display = "thread count must be at least 1")]
    NoThreads,
}

/// Problems during the computation or while writing the image.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The escape value for a pixel came out as NaN or infinite.
    #[fail(display = "degenerate escape value at pixel ({}, {})", x, y)]
    Degenerate {
        /// Column of the failing pixel.
        x: u32,
        /// Row of the failing pixel.
        y: u32,
    },

    /// One of the worker threads died before handing back its rows.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The result set does not cover the whole grid.
    #[fail(display = "expected {} pixel results, found {}", expected, found)]
    IncompleteGrid {
        /// width * height
        expected: usize,
        /// What we were handed.
        found: usize,
    },

    /// The same pixel showed up twice in the result set.
    #[fail(display = "pixel ({}, {}) was computed twice", x, y)]
    DuplicatePixel {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },

    /// A result that lies outside the canvas.
    #[fail(display = "pixel ({}, {}) lies outside the image", x, y)]
    OutOfBounds {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },

    /// The output file could not be created or written.
    #[fail(display = "could not write {}: {}", path, cause)]
    Io {
        /// Where we tried to write.
        path: String,
        /// The underlying failure.
        #[cause]
        cause: io::Error,
    },
}
