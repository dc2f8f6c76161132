#![cfg(all(feature = "cli", feature = "png"))]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use archdiagram_renderer::config::{DEFAULT_OUTPUT_PATH, FontConfig};
use archdiagram_renderer::fonts::BUILTIN_FAMILY;
use archdiagram_renderer::render::rasterize;
use archdiagram_renderer::{Canvas, FontSet, Primitive, Rect, Theme, render_fixed_diagram};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_archdiagram"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn archdiagram")
}

fn png_size(path: &Path) -> (u32, u32) {
    let bytes = std::fs::read(path).expect("read png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "not a PNG: {}", path.display());
    assert_eq!(&bytes[12..16], b"IHDR");
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    (width, height)
}

fn drawn(fonts: &FontSet) -> Canvas {
    let mut canvas = Canvas::new(1600, 1200, Theme::onboarding());
    render_fixed_diagram(&mut canvas, fonts);
    canvas
}

#[test]
fn no_arguments_write_the_fixed_path() {
    let output = Path::new(DEFAULT_OUTPUT_PATH);
    std::fs::create_dir_all(output.parent().unwrap()).expect("create default output dir");
    let _ = std::fs::remove_file(output);
    let result = run(&[]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(
        String::from_utf8_lossy(&result.stdout).trim_end(),
        format!("Architecture diagram saved to: {DEFAULT_OUTPUT_PATH}")
    );
    assert_eq!(png_size(output), (1600, 1200));
}

#[test]
fn renders_one_png_and_reports_its_path() {
    let dir = scratch_dir("renders_one_png");
    let output = dir.join("ARCHITECTURE_DIAGRAM.png");
    let result = run(&["-o", output.to_str().unwrap()]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(stdout.lines().count(), 1, "stdout: {stdout}");
    assert!(stdout.contains(output.to_str().unwrap()));

    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(png_size(&output), (1600, 1200));
}

#[test]
fn missing_preferred_font_still_renders_same_size() {
    let dir = scratch_dir("font_fallback");
    let output = dir.join("fallback.png");
    let result = run(&[
        "-o",
        output.to_str().unwrap(),
        "--font",
        "No Such Font Family 41b7",
    ]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(png_size(&output), (1600, 1200));
}

#[test]
fn missing_parent_directory_is_fatal() {
    let dir = scratch_dir("missing_parent");
    let output = dir.join("does-not-exist").join("diagram.png");
    let result = run(&["-o", output.to_str().unwrap()]);

    assert!(!result.status.success());
    assert!(result.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert!(stderr.contains("diagram.png"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn svg_output_and_layout_dump() {
    let dir = scratch_dir("svg_and_dump");
    let output = dir.join("diagram.svg");
    let dump = dir.join("layout.json");
    let result = run(&[
        "-e",
        "svg",
        "-o",
        output.to_str().unwrap(),
        "--dumpLayout",
        dump.to_str().unwrap(),
    ]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("width=\"1600\" height=\"1200\""));
    assert!(svg.contains("Insurance Onboarding Platform"));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&dump).unwrap()).unwrap();
    assert_eq!(value["width"], 1600);
    assert!(!value["primitives"].as_array().unwrap().is_empty());
}

#[test]
fn config_file_resizes_canvas() {
    let dir = scratch_dir("config_file");
    let output = dir.join("small.png");
    let config = dir.join("config.json");
    std::fs::write(&config, r##"{ "width": 1400, "height": 1150, "themeVariables": { "api": "#FFE0B2" } }"##)
        .unwrap();
    let result = run(&["-c", config.to_str().unwrap(), "-o", output.to_str().unwrap()]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(png_size(&output), (1400, 1150));
}

fn assert_labels_inside_boxes(canvas: &Canvas) {
    let mut last_rect: Option<Rect> = None;
    for primitive in canvas.primitives() {
        match primitive {
            Primitive::Rect { rect, .. } => last_rect = Some(*rect),
            Primitive::Text {
                bounds,
                centered: true,
                ..
            } => assert!(last_rect.unwrap().contains_rect(bounds)),
            _ => {}
        }
    }
}

#[test]
fn system_font_labels_stay_inside_their_boxes() {
    let fonts = FontSet::resolve(&FontConfig {
        family: BUILTIN_FAMILY.to_string(),
        ..FontConfig::default()
    });
    assert!(!fonts.is_builtin());
    assert_labels_inside_boxes(&drawn(&fonts));
}

#[test]
fn fallback_font_draws_every_label() {
    let fonts = FontSet::resolve(&FontConfig {
        family: "No Such Font Family 41b7".to_string(),
        ..FontConfig::default()
    });
    assert!(fonts.is_builtin());
    let canvas = drawn(&fonts);
    assert_labels_inside_boxes(&canvas);

    let pixmap = rasterize(&canvas).unwrap();
    for primitive in canvas.primitives() {
        let Primitive::Text { bounds, block, .. } = primitive else {
            continue;
        };
        let dark = (bounds.y as u32..bounds.bottom() as u32)
            .flat_map(|y| (bounds.x as u32..bounds.right() as u32).map(move |x| (x, y)))
            .filter_map(|(x, y)| pixmap.pixel(x, y))
            .filter(|px| px.red() < 128 && px.green() < 128 && px.blue() < 128)
            .count();
        assert!(dark > 0, "{:?} was not rasterised", block.lines);
    }
}
