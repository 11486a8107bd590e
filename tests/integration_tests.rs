//! End-to-end batch runs over real FITS files

use std::fs;
use std::path::Path;

use fitsio::FitsFile;
use fitsio::hdu::HduInfo;
use fitsio::images::{ImageDescription, ImageType};
use rgb_splitter::image_pipeline::{BatchConfig, BatchReport, BatchRunner, SplitError};
use tempfile::TempDir;

#[rustfmt::skip]
const MOSAIC: [u16; 16] = [
    1000, 2000, 1010, 2010,
    2002, 3000, 2012, 3010,
    1020, 2020, 1030, 2030,
    2022, 3020, 2032, 3030,
];

fn write_u16_cfa(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let description = ImageDescription {
        data_type: ImageType::UnsignedShort,
        dimensions: &[4, 4],
    };
    let mut fptr = FitsFile::create(path)
        .with_custom_primary(&description)
        .open()
        .unwrap();
    let hdu = fptr.primary_hdu().unwrap();
    hdu.write_key(&mut fptr, "OBJECT", "M42".to_string()).unwrap();
    hdu.write_key(&mut fptr, "BAYERPAT", "RGGB".to_string()).unwrap();
    hdu.write_image(&mut fptr, &MOSAIC[..]).unwrap();
}

fn run(input: &Path, output: &Path) -> Result<BatchReport, SplitError> {
    let config = BatchConfig::builder()
        .input(input)
        .output(output)
        .workers(Some(2))
        .show_progress(false)
        .build();
    BatchRunner::new(config).run()
}

fn read_plane(path: &Path) -> (Vec<usize>, Vec<u16>, FitsFile) {
    let mut fptr = FitsFile::open(path).unwrap();
    let hdu = fptr.primary_hdu().unwrap();
    let HduInfo::ImageInfo { shape, .. } = &hdu.info else {
        panic!("{} has no image", path.display());
    };
    let shape = shape.clone();
    let data: Vec<u16> = hdu.read_image(&mut fptr).unwrap();
    (shape, data, fptr)
}

fn read_key(fptr: &mut FitsFile, key: &str) -> Option<String> {
    let hdu = fptr.primary_hdu().ok()?;
    hdu.read_key::<String>(fptr, key).ok()
}

/// Keywords of the value cards in the primary header, read straight from the file.
fn primary_value_keywords(path: &Path) -> Vec<String> {
    let bytes = fs::read(path).unwrap();
    bytes
        .chunks(80)
        .map(|record| String::from_utf8_lossy(record).into_owned())
        .take_while(|record| record.trim_end() != "END")
        .filter(|record| record.get(8..10) == Some("= "))
        .map(|record| record[..8].trim().to_string())
        .collect()
}

fn assert_unique_keywords(path: &Path) {
    let keywords = primary_value_keywords(path);
    for keyword in &keywords {
        let count = keywords.iter().filter(|k| *k == keyword).count();
        assert_eq!(count, 1, "{} appears {} times in {}", keyword, count, path.display());
    }
}

fn count_files(root: &Path) -> usize {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

#[test]
fn splits_valid_files_and_reports_corrupt_ones() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data");
    let output = dir.path().join("output_rgb");
    write_u16_cfa(&input.join("light_001.fits"));
    write_u16_cfa(&input.join("night2/light_002.fits"));
    fs::write(input.join("night2/corrupt.fits"), b"definitely not FITS").unwrap();

    let report = run(&input, &output).unwrap();

    assert_eq!((report.ok, report.skipped, report.error_count()), (2, 0, 1));
    assert!(report.errors[0].starts_with("corrupt.fits - "));
    assert!(!report.is_success());
    assert_eq!(count_files(&output), 6);

    let plane_dir = output.join("night2");
    let (shape, red, mut fptr) = read_plane(&plane_dir.join("R/light_002.fits"));
    assert_eq!(shape, vec![2, 2]);
    assert_eq!(red, vec![1000, 1010, 1020, 1030]);
    assert_eq!(read_key(&mut fptr, "FILTER").as_deref(), Some("R"));
    assert_eq!(read_key(&mut fptr, "CREATOR").as_deref(), Some("RGB Splitter"));
    assert_eq!(read_key(&mut fptr, "PARENT").as_deref(), Some("light_002.fits"));
    assert_eq!(read_key(&mut fptr, "OBJECT").as_deref(), Some("M42"));
    assert!(read_key(&mut fptr, "CHECKSUM").is_some());
    assert_unique_keywords(&plane_dir.join("R/light_002.fits"));

    let (_, green, mut fptr) = read_plane(&plane_dir.join("G/light_002.fits"));
    assert_eq!(green, vec![2001, 2011, 2021, 2031]);
    assert_eq!(read_key(&mut fptr, "FILTER").as_deref(), Some("G"));

    let (_, blue, _) = read_plane(&plane_dir.join("B/light_002.fits"));
    assert_eq!(blue, vec![3000, 3010, 3020, 3030]);
}

#[test]
fn rerun_skips_completed_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data");
    let output = dir.path().join("output_rgb");
    write_u16_cfa(&input.join("light_001.fits"));
    write_u16_cfa(&input.join("light_002.fits"));

    let first = run(&input, &output).unwrap();
    assert!(first.is_success());
    let green_before = fs::read(output.join("G/light_001.fits")).unwrap();

    let second = run(&input, &output).unwrap();
    assert_eq!((second.ok, second.skipped, second.error_count()), (0, 2, 0));
    assert!(second.is_success());
    assert_eq!(fs::read(output.join("G/light_001.fits")).unwrap(), green_before);
}

#[test]
fn own_output_is_rejected_as_already_processed() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data");
    let output = dir.path().join("output_rgb");
    write_u16_cfa(&input.join("light_001.fits"));
    run(&input, &output).unwrap();

    let again = dir.path().join("again");
    let report = run(&output.join("G/light_001.fits"), &again).unwrap();

    assert_eq!(report.error_count(), 1);
    assert!(report.errors[0].contains("already processed"));
    assert_eq!(count_files(&again), 0);
}

#[test]
fn cube_is_rejected_with_its_dimensionality() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data/stack.fits");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let description = ImageDescription {
        data_type: ImageType::UnsignedShort,
        dimensions: &[3, 2, 2],
    };
    let mut fptr = FitsFile::create(&path)
        .with_custom_primary(&description)
        .open()
        .unwrap();
    let hdu = fptr.primary_hdu().unwrap();
    hdu.write_image(&mut fptr, &[7u16; 12][..]).unwrap();
    drop(fptr);

    let output = dir.path().join("out");
    let report = run(&path, &output).unwrap();

    assert_eq!(report.error_count(), 1);
    assert!(report.errors[0].contains("found 3D"), "{}", report.errors[0]);
    assert_eq!(count_files(&output), 0);
}

#[test]
fn image_in_first_extension_is_used_when_primary_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data/packed.fits");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut fptr = FitsFile::create(&path).open().unwrap();
    let description = ImageDescription {
        data_type: ImageType::Float,
        dimensions: &[2, 2],
    };
    let hdu = fptr.create_image("SCI".to_string(), &description).unwrap();
    hdu.write_image(&mut fptr, &[0.25f32, -3.0, 5.0, 1.0][..]).unwrap();
    drop(fptr);

    let output = dir.path().join("out");
    let report = run(&path, &output).unwrap();
    assert_eq!((report.ok, report.error_count()), (1, 0), "{:?}", report.errors);

    let mut fptr = FitsFile::open(output.join("G/packed.fits")).unwrap();
    let hdu = fptr.primary_hdu().unwrap();
    let green: Vec<f32> = hdu.read_image(&mut fptr).unwrap();
    assert_eq!(green, vec![1.0]);
}

#[test]
fn tile_compressed_source_yields_headers_without_duplicate_keys() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data");
    fs::create_dir_all(&input).unwrap();
    let path = input.join("light.fits.fz");

    let mut fptr = FitsFile::create(format!("{}[compress]", path.display()))
        .open()
        .unwrap();
    let description = ImageDescription {
        data_type: ImageType::UnsignedShort,
        dimensions: &[4, 4],
    };
    let hdu = fptr
        .create_image("COMPRESSED_IMAGE".to_string(), &description)
        .unwrap();
    hdu.write_key(&mut fptr, "OBJECT", "M42".to_string()).unwrap();
    hdu.write_image(&mut fptr, &MOSAIC[..]).unwrap();
    drop(fptr);

    let output = dir.path().join("out");
    let report = run(&input, &output).unwrap();
    assert_eq!((report.ok, report.error_count()), (1, 0), "{:?}", report.errors);

    for channel in ["R", "G", "B"] {
        let plane = output.join(channel).join("light.fits.fz");
        assert_unique_keywords(&plane);
        let keywords = primary_value_keywords(&plane);
        assert!(!keywords.iter().any(|k| k.starts_with("ZNAXIS")), "{:?}", keywords);
        assert!(keywords.iter().any(|k| k == "OBJECT"));
    }

    let (_, green, mut fptr) = read_plane(&output.join("G/light.fits.fz"));
    assert_eq!(green, vec![2001, 2011, 2021, 2031]);
    assert_eq!(read_key(&mut fptr, "EXTNAME").as_deref(), Some("_PRIMARY"));
}

#[test]
fn missing_input_is_a_failure() {
    let dir = TempDir::new().unwrap();
    let result = run(&dir.path().join("absent"), &dir.path().join("out"));
    assert!(matches!(result, Err(SplitError::NoEligibleFiles(_))));
}
