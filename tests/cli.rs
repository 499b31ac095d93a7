// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn renders_a_png() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("eq1.png");
    Command::cargo_bin("ifs")
        .unwrap()
        .arg(&out)
        .args(&["--size", "64x48", "--iterations", "10000", "--seed", "3"])
        .args(&["--axes", "--density", "--background", "ffffff"])
        .assert()
        .success();
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn accepts_a_custom_view_and_zoom() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("fern.png");
    Command::cargo_bin("ifs")
        .unwrap()
        .arg(&out)
        .args(&["--equation", "barnsley", "--variation", "swirl"])
        .args(&["--leftlower", "-3,-1", "--rightupper", "3,11"])
        .args(&["--zoom", "10,10", "--zoom", "20,20", "--cursor", "5,5"])
        .args(&["--size", "32x32", "--iterations", "10000"])
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn rejects_too_few_iterations() {
    Command::cargo_bin("ifs")
        .unwrap()
        .args(&["out.png", "--iterations", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count must be between"));
}

#[test]
fn rejects_unknown_equations() {
    Command::cargo_bin("ifs")
        .unwrap()
        .args(&["out.png", "--equation", "mandelbrot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown equation"));
}

#[test]
fn rejects_bad_colors() {
    Command::cargo_bin("ifs")
        .unwrap()
        .args(&["out.png", "--background", "#12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse background color"));
}

#[test]
fn reports_unwritable_output() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("missing").join("out.png");
    Command::cargo_bin("ifs")
        .unwrap()
        .arg(&out)
        .args(&["--size", "16x16", "--iterations", "10000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}
