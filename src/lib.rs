#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  Once `z` leaves the circle of
//! radius 2 it is guaranteed to escape, so the number of steps it
//! took to get there is a measure of how "far" `c` is from the set.
//!
//! We render that measure.  Each pixel is mapped onto a rectangle of
//! the complex plane, iterated up to some limit, and given a smoothed
//! escape value: the whole iteration count plus a fractional
//! correction based on how far past the circle `z` landed.  That
//! value picks a hue; points that never escaped are black.
//!
//! Pixels are independent of one another, so the grid is spread over
//! a pool of worker threads and collected back before anything is
//! painted.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod canvas;
pub mod colour;
pub mod config;
pub mod errors;
pub mod escape;
pub mod planes;
pub mod render;

pub use canvas::Canvas;
pub use config::Config;
pub use errors::{ConfigError, RenderError};
pub use render::{EscapeRenderer, PixelResult};

/// Render `config` into a finished canvas.  Nothing is painted until
/// every pixel has been computed.
pub fn render(config: &Config) -> Result<Canvas, RenderError> {
    let results = config.renderer().render(config.threads)?;
    debug!("collected {} pixel results", results.len());
    Canvas::paint(config.width, config.height, config.max_iterations, &results)
}

/// Render `config` and write the PNG it names.
pub fn run(config: &Config) -> Result<(), RenderError> {
    let canvas = render(config)?;
    canvas.write_png(&config.output_path)?;
    info!("wrote {}", config.output_path.display());
    Ok(())
}
