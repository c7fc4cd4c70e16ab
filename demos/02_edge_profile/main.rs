//! Example 02: Locating an Edge in a Line Scan
//!
//! Reads a scan across a blurred dark-to-bright edge out of a synthetic
//! image, then locates the edge three ways: the peak of the smoothed
//! first difference, the first sample above a threshold, and the center
//! of a fitted logistic profile.

use std::sync::Arc;

use linescan::{GrayImage, Lut, LutFill, LutIndices, Signal, DEFAULT_THRESHOLD};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const WIDTH: usize = 120;
const HEIGHT: usize = 20;
const EDGE_AT: f64 = 63.4;

/// Logistic step: offset, height, center, width
fn logistic(x: f64, p: &[f64]) -> f64 {
    p[0] + p[1] / (1.0 + (-(x - p[2]) / p[3]).exp())
}

fn synthetic_image(rng: &mut StdRng) -> GrayImage {
    let normal = Normal::new(0.0, 4.0).unwrap();
    let truth = [25.0, 190.0, EDGE_AT, 2.0];
    let mut pixels = Vec::with_capacity(WIDTH * HEIGHT);
    for _ in 0..HEIGHT {
        for x in 0..WIDTH {
            let v = logistic(x as f64, &truth) + normal.sample(&mut *rng);
            pixels.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }
    GrayImage::from_pixels(WIDTH, HEIGHT, pixels).unwrap()
}

fn main() {
    println!("=== Example 02: Locating an Edge in a Line Scan ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let image = Arc::new(synthetic_image(&mut rng));

    // Horizontal scan along the middle row
    let row = HEIGHT / 2;
    let samples: Vec<f64> = (0..WIDTH)
        .map(|x| f64::from(image.get(x, row).unwrap_or(0)))
        .collect();
    let coords: Vec<(usize, usize)> = (0..WIDTH).map(|x| (x, row)).collect();
    let scan = Signal::new(samples)
        .with_coordinates(coords)
        .unwrap()
        .with_image(image.clone())
        .with_endpoints((0.0, row as f64), ((WIDTH - 1) as f64, row as f64));

    println!("--- Scan ---");
    println!("  {scan} along row {row}, true edge at x={EDGE_AT}");

    // --- Section 1: Gradient peak ---
    println!("\n--- Gradient Peak ---");
    let gradient = scan.smooth(3).unwrap().derivative();
    for e in gradient.maxima() {
        println!(
            "  max gradient {:.2} at index {} -> ({:.0}, {:.0})",
            e.value, e.index, e.point.x, e.point.y
        );
    }
    println!("  local gradient maxima: {}", gradient.local_maxima().len());

    // --- Section 2: Threshold crossing ---
    println!("\n--- Threshold Crossing ---");
    let binary = scan.median(5).threshold(DEFAULT_THRESHOLD, false);
    match binary.find_first_index_of(255.0) {
        Some(i) => println!("  first bright sample at x={i}"),
        None => println!("  no sample above {DEFAULT_THRESHOLD}"),
    }
    if let Some(i) = binary.find_last_index_of(0.0) {
        println!("  last dark sample at x={i}");
    }

    // --- Section 3: Logistic fit ---
    println!("\n--- Logistic Fit ---");
    let p0 = [0.0, 255.0, WIDTH as f64 / 2.0, 1.0];
    match scan.model_parameters(logistic, &p0) {
        Ok(p) => {
            println!("  offset={:.2}, height={:.2}", p[0], p[1]);
            println!("  center={:.3} (error {:.3})", p[2], p[2] - EDGE_AT);
            println!("  width={:.3}", p[3].abs());
        }
        Err(e) => println!("  fit failed: {e}"),
    }

    // --- Section 4: Highlight the dark intensities with a LUT ---
    println!("\n--- Lookup Table ---");
    let dark: Vec<i64> = (0..DEFAULT_THRESHOLD as i64).collect();
    let mut lut = Lut::empty(LutFill::Value(-1.0));
    lut.fill(LutIndices::Indices(&dark), 0.0);
    let masked = scan.apply_lut(&lut).unwrap();
    let zeros = masked.iter().filter(|&&v| v == 0.0).count();
    println!("  {zeros} of {} samples mapped to 0", masked.len());

    let mut present = Lut::empty(0.0);
    present.fill(LutIndices::Image(&*image), 255.0);
    let distinct = present.as_slice().iter().filter(|&&v| v == 255.0).count();
    println!("  {distinct} distinct intensities in the image");

    println!("\n=== Done ===");
}
