//! End-to-end runs of the sprite pipeline against the fixture icons.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};
use walkdir::WalkDir;

use vjs_sprite::cli::generate::{generate_in, GenerateArgs};
use vjs_sprite::output::Printer;
use vjs_sprite::pipeline::STAGING_PREFIX;
use vjs_sprite::{generate_svg_sprite, parse_config_file, GenerateOptions, SpriteError};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Copy the fixture project into a fresh temporary working directory.
fn fixture_project() -> TempDir {
    let dir = tempdir().unwrap();
    let source = fixtures_dir();

    for entry in WalkDir::new(&source).into_iter().filter_map(|e| e.ok()) {
        let relative = entry.path().strip_prefix(&source).unwrap();
        let target = dir.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }

    dir
}

fn staging_dirs(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(STAGING_PREFIX))
        .count()
}

fn generate(dir: &Path) -> vjs_sprite::Result<vjs_sprite::GenerateReport> {
    let config = parse_config_file(Some(&dir.join("icons.json")))?.unwrap();
    generate_svg_sprite(dir, &config, &GenerateOptions::new(), &Printer::silent())
}

#[test]
fn test_fixture_project_generates_sprite_and_preview() {
    let project = fixture_project();
    let report = generate(project.path()).unwrap();

    let sprite_path = project.path().join("dist/vjs-sprite/vjs-sprite-icons.svg");
    let preview_path = project.path().join("dist/vjs-sprite/index.html");
    assert_eq!(report.artifacts, vec![sprite_path.clone(), preview_path.clone()]);

    let sprite = fs::read_to_string(&sprite_path).unwrap();
    assert!(sprite.starts_with(r#"<svg style="display:none" xmlns="http://www.w3.org/2000/svg">"#));

    let play = sprite.find(r#"<symbol id="vjs-icon-play""#).unwrap();
    let pause = sprite.find(r#"<symbol id="vjs-icon-pause""#).unwrap();
    let fullscreen = sprite.find(r#"<symbol id="vjs-icon-fullscreen""#).unwrap();
    assert!(play < pause && pause < fullscreen);

    assert!(sprite.contains(r#"<path d="M8 5v14l11-7z""#));
    assert!(sprite.contains(r##"href="#vjs-icon-fullscreen-a""##));
    for removed in ["<title>", "<desc>", "<!--", "sketch:", "xlink:", "width=\"24"] {
        assert!(!sprite.contains(removed), "sprite still contains {removed}");
    }

    let preview = fs::read_to_string(&preview_path).unwrap();
    assert!(preview.contains("3 icons"));
    assert!(preview.contains(r##"<use href="#vjs-icon-pause"/>"##));

    assert!(!report.staging_dir.exists());
    assert_eq!(staging_dirs(project.path()), 0);
}

#[test]
fn test_bare_entry_with_subdirectory_under_root_dir() {
    let dir = tempdir().unwrap();
    let icons = dir.path().join("src-icons");
    fs::create_dir_all(icons.join("icons")).unwrap();
    fs::write(
        icons.join("home.svg"),
        r#"<svg viewBox="0 0 24 24"><path d="M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z"/></svg>"#,
    )
    .unwrap();
    fs::write(
        icons.join("icons/search.svg"),
        r#"<svg viewBox="0 0 24 24"><circle cx="10" cy="10" r="6"/></svg>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("icons.json"),
        r#"{ "root-dir": "src-icons", "icons": { "home": "home.svg", "search": "icons/search.svg" } }"#,
    )
    .unwrap();

    let report = generate(dir.path()).unwrap();

    assert_eq!(
        report.icons[1].icon_path,
        dir.path().join("src-icons").join("icons/search.svg")
    );
    let sprite = fs::read_to_string(dir.path().join("vjs-sprite/vjs-sprite-icons.svg")).unwrap();
    assert_eq!(sprite.matches("<symbol ").count(), 2);
    assert!(sprite.contains(r#"<symbol id="vjs-icon-home""#));
    assert!(sprite.contains(r#"<symbol id="vjs-icon-search""#));
    assert!(!report.staging_dir.exists());
    assert_eq!(staging_dirs(dir.path()), 0);
}

#[test]
fn test_regenerating_overwrites_with_identical_output() {
    let project = fixture_project();
    let sprite_path = project.path().join("dist/vjs-sprite/vjs-sprite-icons.svg");

    generate(project.path()).unwrap();
    let first = fs::read(&sprite_path).unwrap();
    generate(project.path()).unwrap();
    let second = fs::read(&sprite_path).unwrap();

    assert_eq!(first, second);
    assert_eq!(staging_dirs(project.path()), 0);
}

#[test]
fn test_missing_icon_fails_without_output() {
    let project = fixture_project();
    fs::remove_file(project.path().join("icons/pause.svg")).unwrap();

    let err = generate(project.path()).unwrap_err();

    assert!(matches!(err, SpriteError::IconNotFound { ref name, .. } if name == "pause"));
    assert!(!project.path().join("dist").exists());
    assert_eq!(staging_dirs(project.path()), 0);
}

#[test]
fn test_malformed_icon_fails_and_cleans_up() {
    let project = fixture_project();
    fs::write(project.path().join("icons/play.svg"), "<svg><g></svg>").unwrap();

    let err = generate(project.path()).unwrap_err();

    assert!(matches!(err, SpriteError::SvgParse { .. }));
    assert_eq!(staging_dirs(project.path()), 0);
}

#[test]
fn test_generate_command_with_yaml_override() {
    let project = fixture_project();
    fs::write(
        project.path().join("sprite.yml"),
        "dest: build\nmode:\n  symbol:\n    sprite: icons.svg\n",
    )
    .unwrap();

    let args = GenerateArgs {
        config_file: PathBuf::from("icons.json"),
        svg_sprite_config_file: Some(PathBuf::from("sprite.yml")),
        svgo_config_file: None,
        svgo_clean_sprite_config_file: None,
        debug: true,
    };
    generate_in(project.path(), &args, &Printer::silent()).unwrap();

    // output-dir from the icon config still replaces mode.symbol.dest
    assert!(project.path().join("build/dist/vjs-sprite/icons.svg").exists());
    assert!(project.path().join("build/dist/vjs-sprite/index.html").exists());
}
