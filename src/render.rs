// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The grid scheduler.  Every pixel is an independent unit of work:
//! map it onto the complex plane, then run the escape-time function
//! on the result.  The threaded renderer hands out whole rows to a
//! pool of scoped workers and gathers everything back before
//! returning; nothing downstream ever sees a partial grid.

use crossbeam::thread::ScopedJoinHandle;
use itertools::iproduct;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use errors::RenderError;
use escape::escape_time;
use planes::{Pixel, PlaneMapper};

type RowQueue = Arc<Mutex<Range<u32>>>;

/// The escape value computed for one pixel, tagged with where it goes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelResult {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Smoothed escape value; exactly the iteration limit for points
    /// that never escaped.
    pub escape: f64,
}

/// Holds everything a worker needs to evaluate any pixel: the plane
/// and the iteration limit.  Once set, this object is not mutated, and
/// workers only ever borrow it.
#[derive(Copy, Clone, Debug)]
pub struct EscapeRenderer {
    plane: PlaneMapper,
    limit: u32,
}

impl EscapeRenderer {
    /// Requires the plane mapping and the maximum number of
    /// iterations to perform per point.
    pub fn new(plane: PlaneMapper, limit: u32) -> Self {
        EscapeRenderer { plane, limit }
    }

    /// The plane being rendered.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The iteration limit.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// One unit of work.  A non-finite escape value means the numbers
    /// went somewhere we can't colour, and the whole run stops.
    pub fn evaluate(&self, pixel: Pixel) -> Result<PixelResult, RenderError> {
        let point = self.plane.pixel_to_point(&pixel);
        let escape = escape_time(point, self.limit);
        if !escape.is_finite() {
            return Err(RenderError::Degenerate {
                x: pixel.0,
                y: pixel.1,
            });
        }
        Ok(PixelResult {
            x: pixel.0,
            y: pixel.1,
            escape,
        })
    }

    fn evaluate_row(&self, row: u32, results: &mut Vec<PixelResult>) -> Result<(), RenderError> {
        for column in 0..self.plane.width() {
            results.push(self.evaluate(Pixel(column, row))?);
        }
        Ok(())
    }

    /// The single-threaded renderer.  Results come back in row-major
    /// order.
    pub fn render_single(&self) -> Result<Vec<PixelResult>, RenderError> {
        let mut results = Vec::with_capacity(self.plane.len());
        for (row, column) in iproduct!(0..self.plane.height(), 0..self.plane.width()) {
            results.push(self.evaluate(Pixel(column, row))?);
        }
        Ok(results)
    }

    /// The multi-threaded renderer.  Spawns `threads` workers that pull
    /// rows off a shared queue until it runs dry.  The first failure
    /// raises a flag the other workers check between rows, and that
    /// failure is what gets returned.  Results come back in row-major
    /// order regardless of which worker computed them.
    pub fn render(&self, threads: usize) -> Result<Vec<PixelResult>, RenderError> {
        let threads = threads.max(1);
        if threads == 1 {
            return self.render_single();
        }

        let rows: RowQueue = Arc::new(Mutex::new(0..self.plane.height()));
        let abort = AtomicBool::new(false);
        info!(
            "rendering {}x{} at {} iterations on {} threads",
            self.plane.width(),
            self.plane.height(),
            self.limit,
            threads
        );

        let batches = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Result<Vec<PixelResult>, RenderError>>> =
                (0..threads)
                .map(|worker| {
                    let rows = rows.clone();
                    let abort = &abort;
                    spawner.spawn(move |_| {
                        let mut results: Vec<PixelResult> = vec![];
                        let mut done = 0;
                        while !abort.load(Ordering::SeqCst) {
                            let row = match rows.lock() {
                                Ok(mut rows) => rows.next(),
                                Err(_) => None,
                            };
                            match row {
                                Some(row) => {
                                    if let Err(e) = self.evaluate_row(row, &mut results) {
                                        abort.store(true, Ordering::SeqCst);
                                        return Err(e);
                                    }
                                    done += 1;
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        debug!("worker {} finished {} rows", worker, done);
                        Ok(results)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(Err(RenderError::WorkerPanicked)))
                .collect::<Vec<_>>()
        })
        .map_err(|_| RenderError::WorkerPanicked)?;

        let mut results = Vec::with_capacity(self.plane.len());
        for batch in batches {
            results.extend(batch?);
        }
        results.sort_by_key(|r| (r.y, r.x));

        if results.len() != self.plane.len() {
            return Err(RenderError::IncompleteGrid {
                expected: self.plane.len(),
                found: results.len(),
            });
        }
        Ok(results)
    }
}
