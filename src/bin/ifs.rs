// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use image::ColorType;
use log::info;

use ifsfractal::chaos::UniformSource;
use ifsfractal::colors::hex_to_color;
use ifsfractal::equation::Variation;
use ifsfractal::gallery::Example;
use ifsfractal::{
    Equation, IfsError, IfsIterator, PixelBuffer, PlaneMapper, Point, Rasterizer, RenderOptions,
    View,
};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_parse<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("{}: {}", err, s)),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const EQUATION: &str = "equation";
const ITERATIONS: &str = "iterations";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const VARIATION: &str = "variation";
const ZOOM: &str = "zoom";
const CURSOR: &str = "cursor";
const AXES: &str = "axes";
const DENSITY: &str = "density";
const SEED: &str = "seed";
const BACKGROUND: &str = "background";

fn args<'a>() -> ArgMatches<'a> {
    App::new("ifs")
        .version("0.1.0")
        .about("Iterated Function System fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .help("File to write the PNG image to"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x800")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse image dimensions"))
                .help("Image size in pixels, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(EQUATION)
                .long(EQUATION)
                .short("e")
                .takes_value(true)
                .default_value("eq1")
                .validator(|s| validate_parse::<Example>(&s, "Unknown equation"))
                .help("eq1, spirals, barnsley, chaos or black_spleenwort"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100000")
                .validator(|s| {
                    validate_range(
                        &s,
                        10_000,
                        5_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 10000 and 5000000",
                    )
                })
                .help("Number of rounds of the chaos game to play"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the view, x,y (default: the equation's own)"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the view, x,y (default: the equation's own)"),
        )
        .arg(
            Arg::with_name(VARIATION)
                .long(VARIATION)
                .takes_value(true)
                .validator(|s| validate_parse::<Variation>(&s, "Unknown variation"))
                .help("sinusoidal, spherical, swirl, horseshoe or polar"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse zoom pixel"))
                .help("Zoom in on the pixel x,y, as a click would; may be repeated"),
        )
        .arg(
            Arg::with_name(CURSOR)
                .long(CURSOR)
                .takes_value(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse cursor pixel"))
                .help("Pixel x,y whose coordinates are shown with the axes"),
        )
        .arg(
            Arg::with_name(AXES)
                .long(AXES)
                .short("a")
                .help("Draw the axes and the coordinate readout"),
        )
        .arg(
            Arg::with_name(DENSITY)
                .long(DENSITY)
                .short("d")
                .help("Shade points by density"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .validator(|s| validate_parse::<u64>(&s, "Could not parse seed"))
                .help("Seed for a reproducible render"),
        )
        .arg(
            Arg::with_name(BACKGROUND)
                .long(BACKGROUND)
                .short("b")
                .takes_value(true)
                .validator(|s| match hex_to_color(&s) {
                    Some(_) => Ok(()),
                    None => Err(format!("Could not parse background color: {}", s)),
                })
                .help("Fill empty pixels with this RRGGBB color"),
        )
        .get_matches()
}

fn view_for(matches: &ArgMatches, equation: &Equation) -> View {
    let default = equation.default_view();
    let corner = |name: &str, fallback: (f64, f64)| {
        matches
            .value_of(name)
            .and_then(|s| parse_pair::<f64>(s, ','))
            .unwrap_or(fallback)
    };
    let (x_min, y_min) = corner(LEFTLOWER, (default.x_min, default.y_min));
    let (x_max, y_max) = corner(RIGHTUPPER, (default.x_max, default.y_max));
    View::new(x_min, x_max, y_min, y_max)
}

fn write_image(outfile: &str, buffer: &PixelBuffer) -> Result<(), IfsError> {
    image::save_buffer(
        outfile,
        &buffer.to_rgba_bytes(),
        buffer.width() as u32,
        buffer.height() as u32,
        ColorType::RGBA(8),
    )
    .map_err(|e| IfsError::Image(e.to_string()))
}

fn run(matches: &ArgMatches) -> Result<(), IfsError> {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<usize>(s, 'x'))
        .unwrap_or((800, 800));
    let iterations = matches
        .value_of(ITERATIONS)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or(100_000);
    let example = Example::from_str(matches.value_of(EQUATION).unwrap_or("eq1"))?;
    let variation = match matches.value_of(VARIATION) {
        Some(name) => Some(Variation::from_str(name)?),
        None => None,
    };
    let equation = example.equation().with_variation(variation);

    let mut view = view_for(matches, &equation);
    for pixel in matches.values_of(ZOOM).into_iter().flatten() {
        if let Some((x, y)) = parse_pair::<f64>(pixel, ',') {
            view = PlaneMapper::new(width, height, view).zoom_at(x, y);
        }
    }

    let rasterizer = Rasterizer::new(width, height, view);
    let cursor = matches
        .value_of(CURSOR)
        .and_then(|s| parse_pair::<f64>(s, ','))
        .map(|(x, y)| rasterizer.get_cursor_position(x, y))
        .unwrap_or_else(|| Point::new(0.0, 0.0));
    let options = RenderOptions {
        show_axes: matches.is_present(AXES),
        color_points: matches.is_present(DENSITY),
        cursor,
    };

    info!(
        "rendering {} with {} iterations at {}x{} over {:?}",
        example.name(),
        iterations,
        width,
        height,
        view
    );
    let points = match matches.value_of(SEED).and_then(|s| u64::from_str(s).ok()) {
        Some(seed) => IfsIterator::new(&equation, UniformSource::seeded(seed))?.get_points(iterations),
        None => IfsIterator::new(&equation, UniformSource::thread())?.get_points(iterations),
    };

    let mut canvas = PixelBuffer::new(width, height);
    rasterizer.draw(Some(&mut canvas), &points, &options)?;
    if let Some(background) = matches.value_of(BACKGROUND).and_then(hex_to_color) {
        canvas.fill_background(background);
    }
    info!("{} of {} pixels covered", canvas.covered().count(), width * height);

    let outfile = matches.value_of(OUTPUT).unwrap_or("ifs.png");
    write_image(outfile, &canvas)
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
