//! Integration tests comparing linescan results against reference outputs.
//!
//! The fixture in `tests/fixtures/reference.json` holds a noisy 24-sample
//! scan together with expected outputs computed by an independent
//! direct-summation implementation (explicit O(n²) DFT, no FFT).
//!
//! Run: cargo test --test validate_against_reference

use linescan::Signal;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

// ─── Helpers ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct KernelCase {
    kernel: Vec<f64>,
    expected: Vec<f64>,
}

#[derive(Deserialize)]
struct Reference {
    samples: Vec<f64>,
    smooth3: Vec<f64>,
    smooth5: Vec<f64>,
    convolve_odd: KernelCase,
    convolve_even: KernelCase,
    median5: Vec<f64>,
    median4: Vec<f64>,
    resample_10: Vec<f64>,
    resample_31: Vec<f64>,
    resample_48: Vec<f64>,
    fft_re: Vec<f64>,
    fft_im: Vec<f64>,
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("reference.json")
}

fn load_reference() -> Reference {
    let path = fixture_path();
    let data = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&data)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

fn assert_vec_close(actual: &[f64], expected: &[f64], tol: f64, label: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: length mismatch: {} vs {}",
        label,
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() < tol,
            "{} [{}]: got={:.12}, expected={:.12}, diff={:.2e} > tol={:.2e}",
            label,
            i,
            a,
            e,
            (a - e).abs(),
            tol
        );
    }
}

fn reference_signal(r: &Reference) -> Signal {
    Signal::new(r.samples.clone())
}

// ─── Smoothing ──────────────────────────────────────────────────────────────

#[test]
fn test_smooth_matches_reference() {
    let r = load_reference();
    let s = reference_signal(&r);
    assert_vec_close(s.smooth(3).unwrap().as_slice(), &r.smooth3, 1e-9, "smooth(3)");
    assert_vec_close(s.smooth(5).unwrap().as_slice(), &r.smooth5, 1e-9, "smooth(5)");
}

#[test]
fn test_median_matches_reference() {
    let r = load_reference();
    let s = reference_signal(&r);
    assert_vec_close(s.median(5).as_slice(), &r.median5, 1e-12, "median(5)");
    assert_vec_close(s.median(4).as_slice(), &r.median4, 1e-12, "median(4)");
}

// ─── Convolution ────────────────────────────────────────────────────────────

#[test]
fn test_convolve_matches_reference() {
    let r = load_reference();
    let s = reference_signal(&r);

    let odd = s.convolve(&r.convolve_odd.kernel).unwrap();
    assert_vec_close(odd.as_slice(), &r.convolve_odd.expected, 1e-9, "convolve odd");

    let even = s.convolve(&r.convolve_even.kernel).unwrap();
    assert_vec_close(even.as_slice(), &r.convolve_even.expected, 1e-9, "convolve even");
}

// ─── Spectral ───────────────────────────────────────────────────────────────

#[test]
fn test_fft_matches_reference() {
    let r = load_reference();
    let spec = reference_signal(&r).fft();
    let re: Vec<f64> = spec.bins.iter().map(|c| c.re).collect();
    let im: Vec<f64> = spec.bins.iter().map(|c| c.im).collect();
    assert_vec_close(&re, &r.fft_re, 1e-7, "fft real");
    assert_vec_close(&im, &r.fft_im, 1e-7, "fft imag");
}

#[test]
fn test_resample_matches_reference() {
    let r = load_reference();
    let s = reference_signal(&r);
    assert_vec_close(s.resample(10).unwrap().as_slice(), &r.resample_10, 1e-8, "resample(10)");
    assert_vec_close(s.resample(31).unwrap().as_slice(), &r.resample_31, 1e-8, "resample(31)");
    assert_vec_close(s.resample(48).unwrap().as_slice(), &r.resample_48, 1e-8, "resample(48)");
}
