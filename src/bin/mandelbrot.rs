// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelbrot;

use clap::{App, Arg, ArgMatches};
use mandelbrot::config::{parse_bound, parse_positive, DEFAULT_OUTPUT};
use mandelbrot::planes::Axis;
use mandelbrot::{Config, ConfigError};
use std::process;
use std::time::Instant;

const OUTPUT: &str = "output-path";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "max-iterations";
const REAL_START: &str = "real-start-bound";
const REAL_END: &str = "real-end-bound";
const IMAGINARY_START: &str = "imaginary-start-bound";
const IMAGINARY_END: &str = "imaginary-end-bound";
const THREADS: &str = "threads";

fn validate_positive(name: &'static str) -> impl Fn(String) -> Result<(), String> {
    move |s| parse_positive(name, &s).map(|_| ()).map_err(|e| e.to_string())
}

fn validate_bound(name: &'static str) -> impl Fn(String) -> Result<(), String> {
    move |s| parse_bound(name, &s).map(|_| ()).map_err(|e| e.to_string())
}

fn bound<'a>(name: &'a str, default: &'a str, help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(name)
        .required(false)
        .long(name)
        .takes_value(true)
        .allow_hyphen_values(true)
        .default_value(default)
        .help(help)
}

/// `-h` belongs to help, so the two-letter `-h2` spelling of the height
/// flag is rewritten before clap sees it.
fn normalise_height_flag<I: IntoIterator<Item = String>>(argv: I) -> Vec<String> {
    argv.into_iter()
        .map(|arg| {
            if arg == "-h2" {
                "--height".to_string()
            } else if arg.starts_with("-h2=") {
                format!("--height={}", &arg[4..])
            } else {
                arg
            }
        })
        .collect()
}

fn args<'a>(argv: Vec<String>) -> ArgMatches<'a> {
    App::new("mandelbrot")
        .version("0.1.0")
        .about("Smooth-coloured Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .required(false)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("600")
                .validator(validate_positive(WIDTH))
                .help("Image width in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .required(false)
                .long(HEIGHT)
                .takes_value(true)
                .default_value("400")
                .validator(validate_positive(HEIGHT))
                .help("Image height in pixels (also -h2)"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .takes_value(true)
                .default_value("80")
                .validator(validate_positive(ITERATIONS))
                .help("Iterations before a point is considered inside the set"),
        )
        .arg(
            bound(REAL_START, "-2.5", "Real value at the left edge")
                .validator(validate_bound(REAL_START)),
        )
        .arg(
            bound(REAL_END, "1.0", "Real value just past the right edge")
                .validator(validate_bound(REAL_END)),
        )
        .arg(
            bound(IMAGINARY_START, "-1.0", "Imaginary value at the top edge")
                .validator(validate_bound(IMAGINARY_START)),
        )
        .arg(
            bound(IMAGINARY_END, "1.0", "Imaginary value just past the bottom edge")
                .validator(validate_bound(IMAGINARY_END)),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(validate_positive(THREADS))
                .help("Number of threads to use in the renderer (default: one per core)"),
        )
        .get_matches_from(argv)
}

fn config_from(matches: &ArgMatches) -> Result<Config, ConfigError> {
    let value = |name: &str| matches.value_of(name).unwrap_or("");
    let threads = match matches.value_of(THREADS) {
        Some(t) => parse_positive(THREADS, t)? as usize,
        None => Config::with_defaults().threads,
    };
    Config::new(
        value(OUTPUT),
        parse_positive(WIDTH, value(WIDTH))?,
        parse_positive(HEIGHT, value(HEIGHT))?,
        parse_positive(ITERATIONS, value(ITERATIONS))?,
        Axis::new(
            parse_bound(REAL_START, value(REAL_START))?,
            parse_bound(REAL_END, value(REAL_END))?,
        ),
        Axis::new(
            parse_bound(IMAGINARY_START, value(IMAGINARY_START))?,
            parse_bound(IMAGINARY_END, value(IMAGINARY_END))?,
        ),
        threads,
    )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = args(normalise_height_flag(std::env::args()));
    let config = match config_from(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };
    debug!("{:?}", config);

    let start = Instant::now();
    match mandelbrot::run(&config) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            process::exit(1);
        }
        Ok(()) => {
            println!("Image generated in {}ms", start.elapsed().as_millis());
        }
    }
}
