mod common;

use ndarray::array;
use std::fs;
use std::path::Path;
use std::process::Command;

fn run_bedgen(args: &[&str], extra: &[&Path]) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bedgen"));
    command.args(args);
    for path in extra {
        command.arg(path.as_os_str());
    }
    command.output().expect("failed to run bedgen")
}

fn assert_success(output: &std::process::Output) {
    assert!(
        output.status.success(),
        "bedgen failed: stdout={} stderr={}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn random_stream_writes_header_and_markers() {
    let ws = common::create_workspace("random-stream").unwrap();
    let bed = ws.path("random.bed");

    let output = run_bedgen(
        &["random", "-n", "10", "-p", "7", "--seed", "3", "-o"],
        &[bed.as_path()],
    );
    assert_success(&output);

    let bytes = fs::read(&bed).unwrap();
    assert_eq!(bytes.len(), 3 + 7 * 3);
    assert_eq!(&bytes[..3], &common::BED_HEADER);

    let markers = common::decode_markers(&bytes[3..], 10);
    assert_eq!(markers.len(), 7);
    for marker in &markers {
        assert!(marker.iter().all(|g| matches!(g, Some(0..=2))));
    }
    assert!(
        common::padding_codes(&bytes[3..], 10)
            .iter()
            .all(|&code| code == 0b11)
    );
}

#[test]
fn no_header_drops_magic_bytes() {
    let ws = common::create_workspace("no-header").unwrap();
    let with_header = ws.path("with.bed");
    let without_header = ws.path("without.bed");

    let args = ["random", "-n", "9", "-p", "5", "--seed", "17", "-o"];
    assert_success(&run_bedgen(&args, &[with_header.as_path()]));
    let mut no_header_args = args.to_vec();
    no_header_args.insert(1, "--no-header");
    assert_success(&run_bedgen(&no_header_args, &[without_header.as_path()]));

    let with_bytes = fs::read(&with_header).unwrap();
    let without_bytes = fs::read(&without_header).unwrap();
    assert_eq!(without_bytes.len(), 5 * 3);
    assert_eq!(&with_bytes[3..], without_bytes.as_slice());
}

#[test]
fn streaming_and_materialized_outputs_are_identical() {
    let ws = common::create_workspace("equivalence").unwrap();
    let streamed = ws.path("streamed.bed");
    let materialized = ws.path("materialized.bed");

    let args = ["random", "-n", "37", "-p", "50", "--seed", "2024", "-o"];
    assert_success(&run_bedgen(&args, &[streamed.as_path()]));
    let mut materialize_args = args.to_vec();
    materialize_args.insert(1, "--materialize");
    assert_success(&run_bedgen(&materialize_args, &[materialized.as_path()]));

    let streamed_bytes = fs::read(&streamed).unwrap();
    assert_eq!(streamed_bytes.len(), 3 + 50 * 10);
    assert_eq!(streamed_bytes, fs::read(&materialized).unwrap());
}

#[test]
fn convert_encodes_missing_calls_and_writes_sidecars() {
    let ws = common::create_workspace("convert").unwrap();
    let npy = ws.path("dosages.npy");
    let bed = ws.path("converted.bed");
    let dosages = array![
        [2.0, 0.0, f64::NAN],
        [1.0, 1.0, 0.0],
        [f64::NAN, 2.0, 0.0],
        [0.0, 0.0, 0.0],
        [2.0, f64::NAN, 1.0],
    ];
    common::write_dosages(&npy, &dosages);

    let output = run_bedgen(
        &["convert", "--sidecars", "-i"],
        &[npy.as_path(), Path::new("-o"), bed.as_path()],
    );
    assert_success(&output);

    let bytes = fs::read(&bed).unwrap();
    assert_eq!(bytes.len(), 3 + 3 * 2);
    assert_eq!(&bytes[3..5], &[0xD8, 0b11_11_11_00]);

    let markers = common::decode_markers(&bytes[3..], 5);
    assert_eq!(markers[0], vec![Some(2), Some(1), None, Some(0), Some(2)]);
    assert_eq!(markers[1], vec![Some(0), Some(1), Some(2), Some(0), None]);
    assert_eq!(markers[2], vec![None, Some(0), Some(0), Some(0), Some(1)]);

    let fam = fs::read_to_string(ws.path("converted.fam")).unwrap();
    let bim = fs::read_to_string(ws.path("converted.bim")).unwrap();
    assert_eq!(fam.lines().count(), 5);
    assert_eq!(bim.lines().count(), 3);
    assert!(bim.lines().all(|line| line.split('\t').count() == 6));
}

#[test]
fn convert_rejects_invalid_genotype() {
    let ws = common::create_workspace("convert-invalid").unwrap();
    let npy = ws.path("bad.npy");
    let bed = ws.path("bad.bed");
    common::write_dosages(&npy, &array![[0.0, 1.0], [3.0, 2.0]]);

    let output = run_bedgen(
        &["convert", "-i"],
        &[npy.as_path(), Path::new("-o"), bed.as_path()],
    );
    assert!(
        !output.status.success(),
        "bedgen unexpectedly succeeded: stdout={} stderr={}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid genotype value 3"),
        "stderr did not mention the bad value: {stderr}"
    );
    assert!(!bed.exists(), "no output should be created for invalid input");
}
