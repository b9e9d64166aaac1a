//! CLI integration tests for `spritestack compose`, `inspect` and `assets`.
//!
//! Drives the built binary against PNG files generated in a temp directory
//! and checks the written artifacts.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// Run spritestack in `dir` and return (stdout, stderr, exit code).
fn run(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_spritestack"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute spritestack");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

fn write_png(dir: &Path, name: &str, w: u32, h: u32, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(w, h, Rgba(color)).save(&path).unwrap();
    path
}

/// body 32x32 red base, hat 8x8 blue and cape 8x8 green.
fn setup_layers() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_png(temp.path(), "body.png", 32, 32, RED);
    write_png(temp.path(), "hat.png", 8, 8, BLUE);
    write_png(temp.path(), "cape.png", 8, 8, GREEN);
    temp
}

fn pixel(path: &Path, x: u32, y: u32) -> [u8; 4] {
    image::open(path).unwrap().to_rgba8().get_pixel(x, y).0
}

#[test]
fn test_compose_writes_all_artifacts() {
    let temp = setup_layers();
    let (stdout, stderr, code) = run(
        temp.path(),
        &[
            "compose", "hat.png", "cape.png", "--base", "body.png", "--name", "hero", "-o",
            "out/hero.png", "--manifest", "out/hero.json", "--resource", "out/hero.tres",
        ],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout.matches("Saved: ").count(), 3);

    let png = temp.path().join("out/hero.png");
    let image = image::open(&png).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (64, 64));
    // hat takes the first free slot, cape finds none and is centred on the base
    assert_eq!(pixel(&png, 0, 0), BLUE);
    assert_eq!(pixel(&png, 12, 12), GREEN);
    assert_eq!(pixel(&png, 25, 25), RED);
    assert_eq!(pixel(&png, 40, 40), CLEAR);

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("out/hero.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["version"], "1.0");
    let layers = manifest["layers"].as_array().unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0]["name"], "body");
    assert_eq!(layers[0]["isBase"], true);
    assert_eq!(layers[2]["name"], "cape");
    assert_eq!(layers[2]["position"]["x"], 12);

    let resource = std::fs::read_to_string(temp.path().join("out/hero.tres")).unwrap();
    assert!(resource.contains("resource_name = \"hero\""));
    assert!(resource.contains("canvas_size = Vector2(64, 64)"));
    assert!(resource.contains("res://assets/sprites/hero.png"));
}

#[test]
fn test_compose_hide_removes_layer_from_png() {
    let temp = setup_layers();
    let (_, stderr, code) = run(
        temp.path(),
        &["compose", "hat.png", "cape.png", "--base", "body.png", "--hide", "cape", "-o", "a.png"],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(pixel(&temp.path().join("a.png"), 12, 12), RED);
    assert_eq!(pixel(&temp.path().join("a.png"), 0, 0), BLUE);
}

#[test]
fn test_compose_hide_unknown_name_warns() {
    let temp = setup_layers();
    let (_, stderr, code) =
        run(temp.path(), &["compose", "--base", "body.png", "--hide", "wings", "-o", "a.png"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Warning: No layer named 'wings'"));
}

#[test]
fn test_compose_default_output_uses_config_name() {
    let temp = setup_layers();
    std::fs::write(
        temp.path().join("spritestack.toml"),
        "[export]\nname = \"knight\"\nwidth = 16\nheight = 8\n",
    )
    .unwrap();

    let (_, stderr, code) = run(temp.path(), &["compose", "--base", "body.png"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let image = image::open(temp.path().join("knight.png")).unwrap();
    assert_eq!((image.width(), image.height()), (16, 8));
}

#[test]
fn test_compose_size_flag_overrides_config() {
    let temp = setup_layers();
    let (_, _, code) =
        run(temp.path(), &["compose", "--base", "body.png", "--size", "20x10", "-o", "s.png"]);
    assert_eq!(code, 0);
    let image = image::open(temp.path().join("s.png")).unwrap();
    assert_eq!((image.width(), image.height()), (20, 10));
}

#[test]
fn test_compose_invalid_size() {
    let temp = setup_layers();
    let (_, stderr, code) = run(temp.path(), &["compose", "--base", "body.png", "--size", "0x10"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_compose_resource_path_flag() {
    let temp = setup_layers();
    let (_, stderr, code) = run(
        temp.path(),
        &[
            "compose", "--base", "body.png", "--name", "hero", "-o", "hero.png", "--resource",
            "hero.tres", "--resource-path", "res://chars/",
        ],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);

    let resource = std::fs::read_to_string(temp.path().join("hero.tres")).unwrap();
    assert!(resource.contains("path=\"res://chars/hero.png\""));
    assert!(!resource.contains("res://assets/sprites"));
}

#[test]
fn test_compose_grid_step_flag_changes_placement() {
    let temp = setup_layers();
    let (_, stderr, code) = run(
        temp.path(),
        &[
            "compose", "hat.png", "cape.png", "--base", "body.png", "--grid-step", "8", "-o",
            "g.png",
        ],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);

    // With an 8px step the cape fits beside the hat instead of being centred
    let png = temp.path().join("g.png");
    assert_eq!(pixel(&png, 0, 0), BLUE);
    assert_eq!(pixel(&png, 8, 0), GREEN);
    assert_eq!(pixel(&png, 12, 12), RED);
}

#[test]
fn test_compose_zero_grid_step_rejected() {
    let temp = setup_layers();
    let (_, stderr, code) =
        run(temp.path(), &["compose", "--base", "body.png", "--grid-step", "0", "-o", "z.png"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("placement.grid_step"));
    assert!(!temp.path().join("z.png").exists());
}

#[test]
fn test_compose_oversized_canvas_rejected() {
    let temp = setup_layers();
    let (_, stderr, code) = run(
        temp.path(),
        &["compose", "--base", "body.png", "--size", "4294967295x4294967295", "-o", "big.png"],
    );
    assert_eq!(code, 2);
    assert!(stderr.contains("surface limit"));
    assert!(!temp.path().join("big.png").exists());
}

#[test]
fn test_compose_nothing_to_do() {
    let temp = TempDir::new().unwrap();
    let (_, stderr, code) = run(temp.path(), &["compose"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Nothing to compose"));
}

#[test]
fn test_compose_missing_file() {
    let temp = setup_layers();
    let (_, stderr, code) = run(temp.path(), &["compose", "--base", "nope.png", "-o", "x.png"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("nope.png"));
    assert!(!temp.path().join("x.png").exists());
}

#[test]
fn test_compose_rejects_non_image() {
    let temp = setup_layers();
    std::fs::write(temp.path().join("notes.png"), "definitely not a png").unwrap();
    let (_, stderr, code) = run(temp.path(), &["compose", "notes.png", "-o", "x.png"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("notes.png"));
}

#[test]
fn test_compose_invalid_config() {
    let temp = setup_layers();
    std::fs::write(temp.path().join("bad.toml"), "[export]\nwidth = 0\n").unwrap();
    let (_, stderr, code) =
        run(temp.path(), &["compose", "--base", "body.png", "--config", "bad.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("export.width"));
}

#[test]
fn test_inspect_lists_top_to_bottom() {
    let temp = setup_layers();
    let (_, _, code) = run(
        temp.path(),
        &["compose", "hat.png", "--base", "body.png", "--manifest", "m.json"],
    );
    assert_eq!(code, 0);
    assert!(!temp.path().join("character.png").exists());

    let (stdout, _, code) = run(temp.path(), &["inspect", "m.json"]);
    assert_eq!(code, 0);
    let hat = stdout.find("hat").unwrap();
    let body = stdout.find("body").unwrap();
    assert!(hat < body);
    assert!(stdout.contains("2 layer(s)"));
    assert!(stdout.contains("[base]"));
}

#[test]
fn test_inspect_rejects_non_manifest() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("x.json"), "{\"hello\": 1}").unwrap();
    let (_, stderr, code) = run(temp.path(), &["inspect", "x.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not a layer manifest"));
}

fn setup_catalog() -> TempDir {
    let temp = TempDir::new().unwrap();
    let hats = temp.path().join("catalog/hats");
    std::fs::create_dir_all(&hats).unwrap();
    write_png(&hats, "red_cap.png", 4, 4, RED);
    write_png(temp.path(), "body.png", 32, 32, BLUE);
    temp
}

#[test]
fn test_assets_json() {
    let temp = setup_catalog();
    let (stdout, _, code) = run(temp.path(), &["assets", "catalog", "--json"]);
    assert_eq!(code, 0);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["hats"][0]["filename"], "red_cap.png");
    assert_eq!(value["hats"][0]["displayName"], "Red Cap");
}

#[test]
fn test_assets_text() {
    let temp = setup_catalog();
    let (stdout, _, code) = run(temp.path(), &["assets", "catalog"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("hats (1)"));
    assert!(stdout.contains("Red Cap"));
}

#[test]
fn test_compose_with_catalog_asset() {
    let temp = setup_catalog();
    let (_, stderr, code) = run(
        temp.path(),
        &[
            "compose", "--base", "body.png", "--asset", "hats/red_cap.png", "--catalog", "catalog",
            "-o", "c.png",
        ],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(pixel(&temp.path().join("c.png"), 0, 0), RED);
    assert_eq!(pixel(&temp.path().join("c.png"), 5, 5), BLUE);
}

#[test]
fn test_compose_asset_without_catalog() {
    let temp = setup_catalog();
    let (_, stderr, code) =
        run(temp.path(), &["compose", "--asset", "hats/red_cap.png", "-o", "c.png"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("--catalog"));
}

#[test]
fn test_compose_unknown_asset() {
    let temp = setup_catalog();
    let (_, stderr, code) = run(
        temp.path(),
        &["compose", "--asset", "hats/blue_cap.png", "--catalog", "catalog", "-o", "c.png"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown asset"));
}
