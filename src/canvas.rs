// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image buffer.  Painting takes a complete result set and puts
//! each pixel exactly where its (x, y) says; writing hands the buffer
//! to the PNG encoder.

use image::png::PNGEncoder;
use image::ColorType;
use std::fs::File;
use std::io;
use std::path::Path;

use colour::{colour_for, Rgb};
use errors::RenderError;
use render::PixelResult;

/// A width * height grid of colours, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// A black canvas.
    pub fn new(width: u32, height: u32) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Rgb::default(); width as usize * height as usize],
        }
    }

    /// Build a canvas from a full set of escape values.  Every pixel
    /// must appear exactly once.
    pub fn paint(
        width: u32,
        height: u32,
        max_iterations: u32,
        results: &[PixelResult],
    ) -> Result<Canvas, RenderError> {
        let mut canvas = Canvas::new(width, height);
        let expected = canvas.pixels.len();
        if results.len() != expected {
            return Err(RenderError::IncompleteGrid {
                expected,
                found: results.len(),
            });
        }

        let mut written = vec![false; expected];
        for result in results {
            let offset = canvas
                .offset(result.x, result.y)
                .ok_or(RenderError::OutOfBounds {
                    x: result.x,
                    y: result.y,
                })?;
            if written[offset] {
                return Err(RenderError::DuplicatePixel {
                    x: result.x,
                    y: result.y,
                });
            }
            written[offset] = true;
            canvas.pixels[offset] = colour_for(result.escape, max_iterations);
        }
        Ok(canvas)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The colour at (x, y), if that's on the canvas.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        self.offset(x, y).map(|offset| self.pixels[offset])
    }

    /// Flatten to the RGB byte layout the encoder expects.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.channels().to_vec()).collect()
    }

    /// Encode the canvas as an 8-bit RGB PNG at `path`.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        let io_error = |cause: io::Error| RenderError::Io {
            path: path.display().to_string(),
            cause,
        };
        let output = File::create(path).map_err(io_error)?;
        let encoder = PNGEncoder::new(output);
        encoder
            .encode(&self.to_bytes(), self.width, self.height, ColorType::RGB(8))
            .map_err(io_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(x: u32, y: u32, escape: f64) -> PixelResult {
        PixelResult { x, y, escape }
    }

    #[test]
    fn paints_each_pixel_where_it_belongs() {
        let results = vec![
            result(1, 0, 10.0),
            result(0, 1, 0.0),
            result(0, 0, 10.0),
            result(1, 1, 5.0),
        ];
        let canvas = Canvas::paint(2, 2, 10, &results).unwrap();
        assert_eq!(canvas.get(0, 0), Some(Rgb(0, 0, 0)));
        assert_eq!(canvas.get(1, 0), Some(Rgb(0, 0, 0)));
        assert_eq!(canvas.get(0, 1), Some(Rgb(255, 0, 0)));
        assert_eq!(canvas.get(1, 1), Some(colour_for(5.0, 10)));
        assert_eq!(canvas.get(2, 0), None);
    }

    #[test]
    fn bytes_are_row_major_rgb() {
        let results = vec![result(0, 0, 0.0), result(1, 0, 4.0)];
        let canvas = Canvas::paint(2, 1, 4, &results).unwrap();
        assert_eq!(canvas.to_bytes(), vec![255, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn refuses_gaps() {
        let results = vec![result(0, 0, 1.0)];
        match Canvas::paint(2, 1, 4, &results) {
            Err(RenderError::IncompleteGrid {
                expected: 2,
                found: 1,
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn refuses_duplicates() {
        let results = vec![result(0, 0, 1.0), result(0, 0, 2.0)];
        match Canvas::paint(2, 1, 4, &results) {
            Err(RenderError::DuplicatePixel { x: 0, y: 0 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn refuses_strays() {
        let results = vec![result(0, 0, 1.0), result(5, 0, 2.0)];
        match Canvas::paint(2, 1, 4, &results) {
            Err(RenderError::OutOfBounds { x: 5, y: 0 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unwritable_paths_are_io_errors() {
        let canvas = Canvas::new(1, 1);
        match canvas.write_png("/nonexistent-directory/out.png") {
            Err(RenderError::Io { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
