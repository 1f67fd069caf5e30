//! Integration tests for the tilecart binary.
//!
//! Every test writes its own config file into a temporary directory and
//! passes it with `--config`, so the user's ~/.tilecart is never touched
//! and log files land in the temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const LAYOUT: &str = "lane\ttile\trow\tcol\n\
1\t1101\t1\t1\n\
1\t1102\t1\t2\n\
1\t1103\t2\t1\n";

/// Temporary workspace with a config file and a small dataset.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: TempDir::new().unwrap(),
        };
        fs::write(
            ws.config(),
            format!(
                "[grid]\nscheme = {}\n\n[pipeline]\nthreads = 2\n\n[logging]\nfile = {}\n",
                ws.path("layout.tsv").display(),
                ws.path("logs/tilecart.log").display()
            ),
        )
        .unwrap();
        fs::write(ws.path("layout.tsv"), LAYOUT).unwrap();
        ws
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn config(&self) -> PathBuf {
        self.path("config.ini")
    }

    /// Tiles 1-1101 (40 x 100 pixels), 1-1102 and 1-1103.
    fn with_dataset(self) -> Self {
        let rows = [
            (1101, [(0, 0), (40, 100)]),
            (1102, [(10, 10), (30, 60)]),
            (1103, [(5, 5), (20, 20)]),
        ];
        for (tile, points) in rows {
            let mut content = String::new();
            for (i, (x, y)) in points.iter().enumerate() {
                content.push_str(&format!("BC{tile}{i}\t{i}\tc\t1\t{tile}\t{y}\t{x}\t1\n"));
            }
            let file = self.path(&format!("data/1/{tile}/barcodes.tsv"));
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, content).unwrap();
        }
        self
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_tilecart"))
            .arg("--config")
            .arg(self.config())
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute CLI command")
    }
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("{} failed:\nstdout: {}\nstderr: {}", context, stdout, stderr);
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// config
// =============================================================================

#[test]
fn test_config_path_and_init() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fresh/config.ini");
    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_tilecart"))
            .arg("--config")
            .arg(&config)
            .args(args)
            .output()
            .unwrap()
    };

    let output = run(&["config", "path"]);
    assert_success(&output, "config path");
    assert_eq!(stdout(&output).trim(), path_str(&config));

    let output = run(&["config", "init"]);
    assert_success(&output, "config init");
    let text = fs::read_to_string(&config).unwrap();
    assert!(text.contains("[promotion]"));
    assert!(text.contains("unit_scale = 26.67"));

    let output = run(&["config", "init"]);
    assert_success(&output, "second config init");
    assert!(stdout(&output).contains("already exists"));
}

#[test]
fn test_config_set_get_list() {
    let ws = Workspace::new();

    let output = ws.run(&["config", "set", "grid.gap", "25"]);
    assert_success(&output, "config set");

    let output = ws.run(&["config", "get", "grid.gap"]);
    assert_success(&output, "config get");
    assert_eq!(stdout(&output).trim(), "25");

    let output = ws.run(&["config", "list"]);
    assert_success(&output, "config list");
    let text = stdout(&output);
    assert!(text.contains("[hexagon]"));
    assert!(text.contains("  mode = false_origin"));
}

#[test]
fn test_config_set_rejects_bad_value() {
    let ws = Workspace::new();

    let output = ws.run(&["config", "set", "promotion.unit_scale", "-1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("promotion.unit_scale"));

    let output = ws.run(&["config", "get", "grid.width"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown configuration key"));
}

#[test]
fn test_invalid_config_file_reported() {
    let ws = Workspace::new();
    fs::write(ws.config(), "[promotion]\nmode = sideways\n").unwrap();

    let output = ws.run(&["config", "list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid configuration: promotion.mode = 'sideways'"));
}

// =============================================================================
// meta / convert / locate
// =============================================================================

#[test]
fn test_meta_writes_metadata() {
    let ws = Workspace::new().with_dataset();
    let out = ws.path("out/metadata.json");

    let output = ws.run(&[
        "meta",
        "-n",
        "toy",
        "-d",
        path_str(&ws.path("data")),
        "-g",
        "10",
        "-o",
        path_str(&out),
    ]);
    assert_success(&output, "meta");
    assert!(stdout(&output).contains("Grid width: 100, height: 40"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["dataset"], "toy");
    assert_eq!(json["number_of_tiles"], 3);
    assert_eq!(json["tile_layout"]["grid_gap"], 10);
    assert_eq!(json["tile_layout"]["max_row"], 2);
    assert_eq!(json["tiles"]["1-1102"]["false_easting"], -110);
    assert_eq!(json["tiles"]["1-1102"]["false_northing"], -50);
    let srs = json["tiles"]["1-1102"]["shifted_srs"].as_str().unwrap();
    assert!(srs.contains("+x_0=-110 +y_0=-50 "));

    assert!(ws.path("logs/tilecart.log").exists());
}

#[test]
fn test_meta_on_empty_dir_fails() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path("empty")).unwrap();

    let output = ws.run(&["meta", "-n", "x", "-d", path_str(&ws.path("empty"))]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No tiles found"));
}

#[test]
fn test_convert_plain() {
    let ws = Workspace::new().with_dataset();

    let output = ws.run(&[
        "convert",
        "-d",
        path_str(&ws.path("data")),
        "-o",
        path_str(&ws.path("converted")),
        "--gap",
        "10",
        "--unit-scale",
        "1",
        "--plain",
    ]);
    assert_success(&output, "convert");
    assert!(stdout(&output).contains("Wrote 6 points from 3 tiles"));

    let text = fs::read_to_string(ws.path("converted/1-1102.tsv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "x\ty\tbarcode\tbarcode_id\tcol1\tcounts");
    assert_eq!(lines[1], "120\t60\tBC11020\t0\tc\t1");
}

#[test]
fn test_locate_with_explicit_grid() {
    let ws = Workspace::new();

    let output = ws.run(&[
        "locate", "--lane", "1", "--tile", "1102", "--x", "10", "--y", "10", "--width", "100",
        "--height", "40", "--gap", "10",
    ]);
    assert_success(&output, "locate");
    assert_eq!(stdout(&output).trim(), "120\t60");
}

#[test]
fn test_locate_from_metadata() {
    let ws = Workspace::new().with_dataset();
    let meta = ws.path("metadata.json");
    assert_success(
        &ws.run(&[
            "meta",
            "-n",
            "toy",
            "-d",
            path_str(&ws.path("data")),
            "-o",
            path_str(&meta),
        ]),
        "meta",
    );

    let output = ws.run(&[
        "locate",
        "--lane",
        "1",
        "--tile",
        "1101",
        "--x",
        "0",
        "--y",
        "0",
        "--metadata",
        path_str(&meta),
    ]);
    assert_success(&output, "locate");
    assert_eq!(stdout(&output).trim(), "0\t40");
}

#[test]
fn test_locate_unknown_tile() {
    let ws = Workspace::new();
    let output = ws.run(&[
        "locate", "--lane", "2", "--tile", "2101", "--x", "0", "--y", "0", "--width", "10",
        "--height", "10",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("2-2101"));
}

// =============================================================================
// hexagon
// =============================================================================

#[test]
fn test_hexagon_command() {
    let ws = Workspace::new();
    let input = ws.path("centroids.tsv");
    let out = ws.path("hexagons.tsv");
    fs::write(
        &input,
        "Hex_center_x\tHex_center_y\tfactor\n2\t1\tF1\n",
    )
    .unwrap();

    let output = ws.run(&[
        "hexagon",
        "-i",
        path_str(&input),
        "-o",
        path_str(&out),
        "--x0",
        "-100",
        "--scale",
        "1",
        "--radius",
        "10",
    ]);
    assert_success(&output, "hexagon");
    assert!(stdout(&output).contains("Wrote 1 hexagons"));

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "x\ty\tgeometry\tfactor");
    assert!(lines[1].starts_with("101\t2\tPOLYGON (("));
    assert!(lines[1].ends_with("))\tF1"));
}
