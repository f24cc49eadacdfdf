//! ImageMagick backend against the real `magick` binary.
//!
//! Skips (passes) when ImageMagick is not installed, so the suite still runs
//! on machines without it.
//!
//! Run with: cargo test --test magick_backend -- --nocapture

use image::{ImageEncoder, RgbImage};
use site_assets::imaging::{
    ConvertParams, ImageBackend, MagickBackend, MaxEdge, Quality, RustBackend, ThumbnailParams,
};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn magick_installed() -> bool {
    Command::new("magick").arg("-version").output().is_ok_and(|o| o.status.success())
}

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    });
    let file = std::fs::File::create(path).unwrap();
    image::codecs::jpeg::JpegEncoder::new(std::io::BufWriter::new(file))
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

#[test]
fn thumbnails_match_rust_backend_dimensions() {
    if !magick_installed() {
        eprintln!("ImageMagick not found - skipping comparison");
        return;
    }

    let tmp = TempDir::new().unwrap();
    for (name, width, height) in [("wide", 1600, 900), ("tall", 900, 1600), ("small", 150, 100)] {
        let source = tmp.path().join(format!("{name}.jpg"));
        write_jpeg(&source, width, height);

        let mut dims = Vec::new();
        for (label, backend) in [
            ("magick", &MagickBackend::new() as &dyn ImageBackend),
            ("rust", &RustBackend::new() as &dyn ImageBackend),
        ] {
            let output = tmp.path().join(format!("{name}-{label}-thumb.jpg"));
            backend
                .thumbnail(&ThumbnailParams {
                    source: source.clone(),
                    output: output.clone(),
                    max_edge: MaxEdge::new(400),
                    quality: Quality::new(82),
                })
                .unwrap();
            dims.push(image::image_dimensions(&output).unwrap());
        }
        println!("{name}: magick {:?}, rust {:?}", dims[0], dims[1]);
        assert_eq!(dims[0], dims[1], "{name}");
    }
}

#[test]
fn convert_writes_jpeg_regardless_of_extension() {
    if !magick_installed() {
        eprintln!("ImageMagick not found - skipping");
        return;
    }

    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("scan.png");
    RgbImage::from_pixel(320, 200, image::Rgb([1, 2, 3]))
        .save(&source)
        .unwrap();
    let output = tmp.path().join("scan.out");

    MagickBackend::new()
        .convert(&ConvertParams {
            source,
            output: output.clone(),
            quality: Quality::new(92),
        })
        .unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Jpeg
    );
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 200));
}
