//! Segment a scanned fingerprint card and print the detected boxes.
//!
//! Usage: segment_scan <image> [working-size-hint]

use std::{env, process::ExitCode, time::Instant};

use fingerprint_seg::{GrayImageView, Segmenter, SegmenterParams};
use image::ImageReader;
use log::{info, LevelFilter};
use serde::Serialize;

#[derive(Serialize)]
struct Output {
    source_width: usize,
    source_height: usize,
    working_scale: usize,
    segments: Vec<fingerprint_seg::SegmentInfo>,
}

fn main() -> ExitCode {
    let _ = fingerprint_seg_core::init_with_level(LevelFilter::Info);

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: segment_scan <image> [working-size-hint]");
        return ExitCode::FAILURE;
    };
    let hint: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(SegmenterParams::default().working_size_hint);

    let reader = match ImageReader::open(&path) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("open {path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let img = match reader.decode() {
        Ok(img) => img.to_luma8(),
        Err(e) => {
            eprintln!("decode {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (w, h) = (img.width() as usize, img.height() as usize);
    let view = GrayImageView {
        width: w,
        height: h,
        data: img.as_raw(),
    };

    let params = SegmenterParams {
        working_size_hint: hint,
        ..SegmenterParams::default()
    };
    let mut segmenter = Segmenter::with_params(w, h, params);

    let started = Instant::now();
    let segments = match segmenter.extract_image(&view) {
        Ok(segments) => segments,
        Err(e) => {
            eprintln!("segmentation failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "{} segment(s) in {:.1} ms",
        segments.len(),
        started.elapsed().as_secs_f64() * 1e3
    );

    let out = Output {
        source_width: w,
        source_height: h,
        working_scale: segmenter.scale(),
        segments,
    };
    match serde_json::to_string_pretty(&out) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("serialize: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
