use std::{fs, path::PathBuf};

use tempfile::tempdir;

use archsketch::{architectures::Architecture, export::OutputFormat};
use archsketch_cli::{Args, run};

fn workspace_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn args(architecture: Architecture, output_dir: PathBuf) -> Args {
    Args {
        architecture,
        output_dir: Some(output_dir),
        format: Some(OutputFormat::Dot),
        icons_dir: None,
        assets_dir: Some(workspace_path("assets")),
        config: None,
        show: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_all_architectures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut failed = Vec::new();
    for architecture in Architecture::ALL {
        match run(&args(architecture, temp_dir.path().to_path_buf())) {
            Ok(path) => {
                let source = fs::read_to_string(&path).expect("Failed to read output");
                assert!(source.starts_with("digraph") || source.contains("digraph"));
            }
            Err(e) => failed.push((architecture, e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nArchitectures that failed:");
        for (architecture, err) in &failed {
            eprintln!("  - {architecture}: {err}");
        }
        panic!("{} architecture(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_missing_assets_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let empty = tempdir().expect("Failed to create temp directory");

    let mut args = args(Architecture::BastionHost, temp_dir.path().to_path_buf());
    args.assets_dir = Some(empty.path().to_path_buf());

    let err = run(&args).expect_err("Missing person icon should fail");
    assert!(err.is_asset_error());
    assert!(fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[style.graph]\nsplines = \"spline\"\n").unwrap();

    let mut args = args(Architecture::VpcPeering, temp_dir.path().to_path_buf());
    args.config = Some(config_path.to_string_lossy().into_owned());

    let path = run(&args).expect("Failed to render");
    assert_eq!(path.file_name().unwrap(), "vpc_peering.dot");
    let source = fs::read_to_string(path).unwrap();
    assert!(source.contains("\"spline\""));
}
