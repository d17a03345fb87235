//! End-to-end runs of the binary: flags, scripted prompts and config files.
//!
//! Every test points `DUMMYGEN_CONFIG` at a missing file unless it is testing
//! config loading, so a developer's own config never leaks in.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use calamine::{open_workbook, Data, Reader, Xlsx};
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("dummygen").unwrap();
    cmd.env("DUMMYGEN_CONFIG", "/nonexistent/dummygen/config.toml");
    cmd
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn flags_generate_numbered_raw_files() {
    let dir = scratch_dir("dummygen_cli_raw");

    cmd()
        .args(["--no-input", "-e", "bin", "-s", "1KB", "-n", "dummy{n}", "-c", "3", "-o"])
        .arg(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved:"))
        .stderr(predicate::str::contains("Done: 3/3"));

    assert_eq!(sorted_names(&dir), vec!["dummy1.bin", "dummy2.bin", "dummy3.bin"]);
    for name in sorted_names(&dir) {
        let data = std::fs::read(dir.join(name)).unwrap();
        assert_eq!(data.len(), 1024);
        assert!(data.iter().all(|&b| b == 0));
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn one_failing_file_does_not_stop_the_rest() {
    let dir = scratch_dir("dummygen_cli_partial");
    // A directory in the way makes creating dummy2.bin fail.
    std::fs::create_dir(dir.join("dummy2.bin")).unwrap();

    cmd()
        .args(["--no-input", "-e", "bin", "-s", "10", "-n", "dummy{n}", "-c", "3", "-o"])
        .arg(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed:"))
        .stderr(predicate::str::contains("Done: 2/3"));

    assert!(dir.join("dummy1.bin").is_file());
    assert!(dir.join("dummy3.bin").is_file());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn prompts_read_answers_from_stdin() {
    let dir = scratch_dir("dummygen_cli_prompt");

    cmd()
        .arg("-o")
        .arg(&dir)
        .write_stdin("txt\n100\nnote{n}\n2\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("File extension"));

    assert_eq!(sorted_names(&dir), vec!["note1.txt", "note2.txt"]);
    assert_eq!(std::fs::metadata(dir.join("note1.txt")).unwrap().len(), 100);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn prompted_image_uses_given_dimensions() {
    let dir = scratch_dir("dummygen_cli_image");

    cmd()
        .arg("-o")
        .arg(&dir)
        .write_stdin("png\n\nshot\n1\n16\n9\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Width"));

    let img = image::open(dir.join("shot.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (16, 9));
    assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn spreadsheet_holds_one_hex_cell() {
    let dir = scratch_dir("dummygen_cli_xlsx");

    cmd()
        .args(["--no-input", "-e", "xlsx", "-s", "500", "-n", "book", "-o"])
        .arg(&dir)
        .assert()
        .success();

    let mut workbook: Xlsx<_> = open_workbook(dir.join("book.xlsx")).unwrap();
    assert_eq!(workbook.sheet_names().len(), 1);
    let range = workbook.worksheet_range("Sheet1").unwrap();
    let cells: Vec<_> = range.used_cells().collect();
    assert_eq!(cells.len(), 1);
    match cells[0].2 {
        Data::String(s) => {
            assert_eq!(s.len(), 1000);
            assert!(s.bytes().all(|c| c.is_ascii_hexdigit()));
        }
        other => panic!("expected a string cell, got {other:?}"),
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_output_dir_is_used() {
    let work = scratch_dir("dummygen_cli_config");
    let out = work.join("fixtures");
    let config = work.join("config.toml");
    std::fs::write(&config, format!("[output]\ndir = {:?}\n", out.to_str().unwrap())).unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["--no-input", "-e", "dat", "-s", "2KB", "-n", "cfg"])
        .assert()
        .success();

    assert_eq!(std::fs::metadata(out.join("cfg.dat")).unwrap().len(), 2048);

    let _ = std::fs::remove_dir_all(&work);
}

#[test]
fn invalid_size_flag_exits_with_error() {
    cmd()
        .args(["--no-input", "-e", "bin", "-s", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid size"));
}

#[test]
fn missing_extension_without_prompts_exits_with_error() {
    cmd()
        .args(["--no-input", "-s", "1KB"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is required when --no-input is set"));
}

#[test]
fn closed_stdin_exits_with_error() {
    let dir = scratch_dir("dummygen_cli_eof");

    cmd()
        .arg("-o")
        .arg(&dir)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(sorted_names(&dir).is_empty());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn malformed_config_exits_with_error() {
    let work = scratch_dir("dummygen_cli_bad_config");
    let config = work.join("config.toml");
    std::fs::write(&config, "this is not valid toml {{{").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["--no-input", "-e", "bin", "-s", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));

    let _ = std::fs::remove_dir_all(&work);
}
