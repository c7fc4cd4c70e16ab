//! Example 01: Smoothing a Noisy Line Scan
//!
//! Scans across a striped target, adds sensor noise, and compares the
//! Gaussian moving average, the sliding median and a custom convolution
//! kernel against the known noise-free profile.

use linescan::smoothing::gaussian_window;
use linescan::{Signal, DEFAULT_MEDIAN_WINDOW};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// True profile: stripes of period 25 pixels around mid-gray
fn true_profile(x: f64) -> f64 {
    128.0 + 60.0 * (2.0 * std::f64::consts::PI * x / 25.0).sin()
}

fn mse(predicted: &[f64], truth: &[f64]) -> f64 {
    predicted
        .iter()
        .zip(truth.iter())
        .map(|(p, t)| (p - t).powi(2))
        .sum::<f64>()
        / predicted.len() as f64
}

fn main() {
    println!("=== Example 01: Smoothing a Noisy Line Scan ===\n");

    let m = 200;
    let noise_sd = 12.0;

    // Scan along row 40 from x=10 to x=209
    let mut rng = StdRng::seed_from_u64(42);
    let normal = Normal::new(0.0, noise_sd).unwrap();
    let truth: Vec<f64> = (0..m).map(|i| true_profile(i as f64)).collect();
    let noisy: Vec<f64> = truth.iter().map(|&y| y + normal.sample(&mut rng)).collect();
    let coords: Vec<(f64, f64)> = (0..m).map(|i| (10.0 + i as f64, 40.0)).collect();
    let scan = Signal::new(noisy)
        .with_coordinates(coords)
        .unwrap()
        .with_endpoints((10.0, 40.0), (209.0, 40.0));

    println!("--- Data ---");
    println!("  Samples: {}", scan.len());
    println!("  Noise sd: {noise_sd}");
    println!("  Noisy MSE (no smoothing): {:.4}", mse(scan.as_slice(), &truth));

    // --- Section 1: Gaussian moving average ---
    println!("\n--- Gaussian Smoother ---");
    for degree in [2, 3, 5, 8] {
        let smoothed = scan.smooth(degree).unwrap();
        let w = gaussian_window(degree);
        println!(
            "  degree={degree}: window={:2}, MSE={:.4}",
            w.len(),
            mse(smoothed.as_slice(), &truth)
        );
    }

    // --- Section 2: Sliding median ---
    println!("\n--- Sliding Median ---");
    for window in [3, DEFAULT_MEDIAN_WINDOW, 9] {
        let filtered = scan.median(window);
        println!("  window={window}: MSE={:.4}", mse(filtered.as_slice(), &truth));
    }

    // --- Section 3: Custom kernel ---
    println!("\n--- Box Kernel Convolution ---");
    for width in [3, 5, 7] {
        let kernel = vec![1.0 / width as f64; width];
        let filtered = scan.convolve(&kernel).unwrap();
        println!("  width={width}: MSE={:.4}", mse(filtered.as_slice(), &truth));
    }

    // Smoothing keeps the scan's geometry
    let smoothed = scan.smooth(3).unwrap();
    println!("\n--- Sample Smoothed Values (degree=3) ---");
    for &idx in &[0, m / 4, m / 2, 3 * m / 4, m - 1] {
        let p = smoothed.coordinates()[idx];
        println!(
            "  ({:.0}, {:.0}): truth={:.2}, noisy={:.2}, smoothed={:.2}",
            p.x, p.y, truth[idx], scan[idx], smoothed[idx]
        );
    }

    println!("\n=== Done ===");
}
