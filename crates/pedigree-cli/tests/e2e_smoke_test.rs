use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use pedigree::chart::{Direction, TreeStyle};
use pedigree_cli::{Args, run};

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo databases live at the workspace root
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(database: &Path, output: &Path) -> Args {
    Args {
        database: database.to_string_lossy().to_string(),
        root: None,
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        depth: None,
        style: None,
        direction: None,
        no_marriage_labels: false,
        no_placeholders: false,
    }
}

fn output_name(prefix: &str, path: &Path) -> String {
    format!(
        "{prefix}{}.svg",
        path.file_stem().unwrap().to_string_lossy()
    )
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_toml_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_path = temp_dir.path().join(output_name("", demo_path));
        let args = args_for(demo_path, &output_path);

        match run(&args) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).unwrap();
                assert!(svg.contains("</svg>"), "{} is incomplete", output_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_every_style_and_direction() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let database = demos_path().join("lovelace.toml");

    for style in [TreeStyle::Standard, TreeStyle::Compact, TreeStyle::Expanded] {
        for direction in [Direction::Right, Direction::Left, Direction::Down, Direction::Up] {
            let output_path = temp_dir.path().join(format!("{style}_{direction}.svg"));
            let mut args = args_for(&database, &output_path);
            args.depth = Some(4);
            args.style = Some(style);
            args.direction = Some(direction);

            run(&args).unwrap_or_else(|err| panic!("{style} {direction}: {err}"));

            let svg = fs::read_to_string(&output_path).unwrap();
            assert!(svg.contains("Ada Lovelace"));
            assert!(svg.contains("m. 1815"));
        }
    }
}

#[test]
fn e2e_smoke_test_explicit_root_and_flags() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("george.svg");
    let mut args = args_for(&demos_path().join("lovelace.toml"), &output_path);
    args.root = Some("george".to_string());
    args.no_marriage_labels = true;
    args.no_placeholders = true;

    run(&args).expect("Failed to render explicit root");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("George Gordon Byron"));
    assert!(!svg.contains("Ada Lovelace"));
    assert!(!svg.contains("m. 1785"));
    assert!(!svg.contains("placeholder"));
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_toml_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(output_name("error_", demo_path));
        let args = args_for(demo_path, &output_path);

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_smoke_test_unknown_root() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("nobody.svg");
    let mut args = args_for(&demos_path().join("lovelace.toml"), &output_path);
    args.root = Some("nobody".to_string());

    assert!(run(&args).is_err());
    assert!(!output_path.exists());
}

#[test]
fn e2e_smoke_test_style_flag_overrides_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[layout]\nstyle = \"compact\"\nmax_depth = 7\n").unwrap();
    let output_path = temp_dir.path().join("override.svg");
    let mut args = args_for(&demos_path().join("lovelace.toml"), &output_path);
    args.config = Some(config_path.to_string_lossy().to_string());

    assert!(run(&args).is_err());
    assert!(!output_path.exists());

    args.style = Some(TreeStyle::Standard);
    run(&args).expect("Flags should repair the configuration file");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("Ada Lovelace"));
}
