// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The run configuration, and the string coercions used to build it.
//! Everything is validated up front, so once a `Config` exists the
//! render can't fail because of its parameters.

use std::path::PathBuf;
use std::str::FromStr;

use errors::ConfigError;
use planes::{Axis, PlaneMapper};
use render::EscapeRenderer;

/// Where the image goes when nobody says otherwise.
pub const DEFAULT_OUTPUT: &str = "mandelbrot.png";
/// Default image width.
pub const DEFAULT_WIDTH: u32 = 600;
/// Default image height.
pub const DEFAULT_HEIGHT: u32 = 400;
/// Default iteration limit.
pub const DEFAULT_MAX_ITERATIONS: u32 = 80;
/// Default real axis, start then end.
pub const DEFAULT_REAL: (f64, f64) = (-2.5, 1.0);
/// Default imaginary axis, start then end.
pub const DEFAULT_IMAGINARY: (f64, f64) = (-1.0, 1.0);

/// Read a strictly positive integer.  Negative numbers are reported as
/// not positive rather than as garbage.
pub fn parse_positive(name: &'static str, text: &str) -> Result<u32, ConfigError> {
    let value = i64::from_str(text.trim()).map_err(|_| ConfigError::NotANumber {
        name,
        value: text.to_string(),
    })?;
    positive(name, value)
}

fn positive(name: &'static str, value: i64) -> Result<u32, ConfigError> {
    if value < 1 || value > i64::from(::std::u32::MAX) {
        return Err(ConfigError::NotPositive { name, value });
    }
    Ok(value as u32)
}

/// Read one bound of the complex plane.
pub fn parse_bound(name: &'static str, text: &str) -> Result<f64, ConfigError> {
    let value = f64::from_str(text.trim()).map_err(|_| ConfigError::NotANumber {
        name,
        value: text.to_string(),
    })?;
    finite(name, value)
}

fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { name, value });
    }
    Ok(value)
}

/// Everything a run needs.  Built once, never changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The PNG to write.
    pub output_path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Iteration limit per point.
    pub max_iterations: u32,
    /// Real axis, mapped onto the columns.
    pub real: Axis,
    /// Imaginary axis, mapped onto the rows.
    pub imaginary: Axis,
    /// Size of the worker pool.
    pub threads: usize,
}

impl Config {
    /// Validating constructor.
    pub fn new<P: Into<PathBuf>>(
        output_path: P,
        width: u32,
        height: u32,
        max_iterations: u32,
        real: Axis,
        imaginary: Axis,
        threads: usize,
    ) -> Result<Config, ConfigError> {
        positive("width", i64::from(width))?;
        positive("height", i64::from(height))?;
        positive("max-iterations", i64::from(max_iterations))?;
        finite("real-start-bound", real.start)?;
        finite("real-end-bound", real.end)?;
        finite("imaginary-start-bound", imaginary.start)?;
        finite("imaginary-end-bound", imaginary.end)?;
        if threads == 0 {
            return Err(ConfigError::NoThreads);
        }

        if real.is_reversed() {
            warn!("real axis runs backwards ({} to {})", real.start, real.end);
        }
        if imaginary.is_reversed() {
            warn!(
                "imaginary axis runs backwards ({} to {})",
                imaginary.start, imaginary.end
            );
        }

        Ok(Config {
            output_path: output_path.into(),
            width,
            height,
            max_iterations,
            real,
            imaginary,
            threads,
        })
    }

    /// The default view, rendered on every core.
    pub fn with_defaults() -> Config {
        Config {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            real: Axis::new(DEFAULT_REAL.0, DEFAULT_REAL.1),
            imaginary: Axis::new(DEFAULT_IMAGINARY.0, DEFAULT_IMAGINARY.1),
            threads: num_cpus::get().max(1),
        }
    }

    /// The pixel-to-plane mapping this configuration describes.
    pub fn plane(&self) -> PlaneMapper {
        PlaneMapper::new(self.width, self.height, self.real, self.imaginary)
    }

    /// A renderer for this configuration.  The renderer owns a copy of
    /// what it needs; workers never look back at the `Config`.
    pub fn renderer(&self) -> EscapeRenderer {
        EscapeRenderer::new(self.plane(), self.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(width: u32, height: u32, limit: u32, threads: usize) -> Result<Config, ConfigError> {
        Config::new(
            "out.png",
            width,
            height,
            limit,
            Axis::new(-2.5, 1.0),
            Axis::new(-1.0, 1.0),
            threads,
        )
    }

    #[test]
    fn positive_integers_parse() {
        assert_eq!(parse_positive("width", "600").unwrap(), 600);
        assert_eq!(parse_positive("width", " 7 ").unwrap(), 7);
    }

    #[test]
    fn garbage_is_not_a_number() {
        match parse_positive("width", "wide") {
            Err(ConfigError::NotANumber { name: "width", .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse_positive("width", "1.5") {
            Err(ConfigError::NotANumber { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse_bound("real-start-bound", "left") {
            Err(ConfigError::NotANumber { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn zero_and_negative_are_not_positive() {
        match parse_positive("height", "0") {
            Err(ConfigError::NotPositive { value: 0, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse_positive("height", "-4") {
            Err(ConfigError::NotPositive { value: -4, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse_positive("height", "99999999999") {
            Err(ConfigError::NotPositive { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bounds_parse_with_signs() {
        assert_eq!(parse_bound("real-start-bound", "-2.5").unwrap(), -2.5);
        assert_eq!(parse_bound("real-end-bound", "1").unwrap(), 1.0);
        match parse_bound("real-end-bound", "inf") {
            Err(ConfigError::NotFinite { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse_bound("real-end-bound", "NaN") {
            Err(ConfigError::NotFinite { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn constructor_validates() {
        assert!(build(600, 400, 80, 4).is_ok());
        assert!(build(0, 400, 80, 4).is_err());
        assert!(build(600, 0, 80, 4).is_err());
        assert!(build(600, 400, 0, 4).is_err());
        match build(600, 400, 80, 0) {
            Err(ConfigError::NoThreads) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reversed_bounds_are_allowed() {
        let config = Config::new(
            "out.png",
            10,
            10,
            10,
            Axis::new(1.0, -2.5),
            Axis::new(1.0, -1.0),
            1,
        );
        assert!(config.is_ok());
    }

    #[test]
    fn non_finite_bounds_are_refused() {
        let config = Config::new(
            "out.png",
            10,
            10,
            10,
            Axis::new(-2.5, 1.0),
            Axis::new(::std::f64::NEG_INFINITY, 1.0),
            1,
        );
        match config {
            Err(ConfigError::NotFinite {
                name: "imaginary-start-bound",
                ..
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn defaults_match_the_documented_view() {
        let config = Config::with_defaults();
        assert_eq!(config.output_path, PathBuf::from("mandelbrot.png"));
        assert_eq!((config.width, config.height), (600, 400));
        assert_eq!(config.max_iterations, 80);
        assert_eq!(config.real, Axis::new(-2.5, 1.0));
        assert_eq!(config.imaginary, Axis::new(-1.0, 1.0));
        assert!(config.threads >= 1);
    }

    #[test]
    fn renderer_carries_the_configuration() {
        let config = build(30, 20, 45, 2).unwrap();
        let renderer = config.renderer();
        assert_eq!(renderer.limit(), 45);
        assert_eq!(renderer.plane().len(), 600);
    }
}
