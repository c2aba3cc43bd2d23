// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane described by a start and an
//! end bound on each of its two axes.
use num::Complex;

/// One axis of the complex plane: where the first pixel lands, and
/// where the pixel one past the last would land.  `start` may exceed
/// `end`; the image is then mirrored along that axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis {
    /// The value at pixel 0.
    pub start: f64,
    /// The value at pixel `size`.
    pub end: f64,
}

impl Axis {
    /// Constructor.
    pub fn new(start: f64, end: f64) -> Axis {
        Axis { start, end }
    }

    /// Linear interpolation along the axis.  The pixel index is used
    /// as-is, not the pixel center, so pixel 0 is exactly `start`.
    pub fn interpolate(&self, value: u32, size: u32) -> f64 {
        self.start + (f64::from(value) / f64::from(size)) * (self.end - self.start)
    }

    /// True when the bounds run backwards.
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

/// Describes the x, y of a point in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub u32, pub u32);

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Maps pixels from one to points in
/// the other.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Width and height of the integral plane.  The origin is assumed
    /// to be at 0,0.
    pub integral_plane: (u32, u32),
    /// The real axis, mapped onto the columns.
    pub real: Axis,
    /// The imaginary axis, mapped onto the rows.
    pub imaginary: Axis,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the two
    /// axes of the complex plane.  Sizes of zero are the caller's
    /// problem; `Config` refuses them before we get here.
    pub fn new(width: u32, height: u32, real: Axis, imaginary: Axis) -> PlaneMapper {
        PlaneMapper {
            integral_plane: (width, height),
            real,
            imaginary,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.integral_plane.0
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 as usize * self.integral_plane.1 as usize
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, map it to a point
    /// on the complex cartesian plane.  Each axis is interpolated
    /// independently.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.real.interpolate(pixel.0, self.integral_plane.0),
            self.imaginary.interpolate(pixel.1, self.integral_plane.1),
        )
    }
}
