use std::fs;

use playground_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("optimized.svg", "<svg/>").unwrap();
    assert_eq!(first.file_name().unwrap(), "optimized.svg");

    let second = writer.write("optimized.svg", "<svg></svg>").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "<svg></svg>");
}

#[test]
fn write_new_numbers_taken_names() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write_new("input.svg", "a").unwrap();
    let second = writer.write_new("input.svg", "b").unwrap();
    let third = writer.write_new("input.svg", "c").unwrap();

    assert_eq!(first.file_name().unwrap(), "input.svg");
    assert_eq!(second.file_name().unwrap(), "input (1).svg");
    assert_eq!(third.file_name().unwrap(), "input (2).svg");
    assert_eq!(fs::read_to_string(&first).unwrap(), "a");
    assert_eq!(fs::read_to_string(&third).unwrap(), "c");
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write_new("input.svg", "data").is_err());
    assert!(!file_path.with_file_name("input.svg").exists());
}
