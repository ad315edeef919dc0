use std::path::Path;

use archsketch::{color::Color, config::AppConfig, export::OutputFormat};

#[test]
fn test_empty_config_uses_defaults() {
    let config: AppConfig = toml::from_str("").expect("Failed to parse empty config");

    assert_eq!(config.output().format(), OutputFormat::Png);
    assert_eq!(config.output().directory(), Path::new("."));
    assert!(config.icons().directory().is_none());
    assert_eq!(config.icons().base_directory(), Path::new("."));
    assert!(config.style().graph().is_empty());
    assert!(config.style().cluster_backgrounds().is_none());
}

#[test]
fn test_full_config() {
    let source = r##"
        [output]
        format = "svg"
        directory = "out"

        [icons]
        directory = "/usr/share/archsketch/icons"
        base_directory = "assets"

        [style]
        cluster_backgrounds = ["#ffffff", "lightblue"]

        [style.graph]
        splines = "spline"
        rankdir = "TB"

        [style.node]
        fontsize = "11"

        [style.edge]
        color = "#000000"
    "##;

    let config: AppConfig = toml::from_str(source).expect("Failed to parse config");

    assert_eq!(config.output().format(), OutputFormat::Svg);
    assert_eq!(config.output().directory(), Path::new("out"));
    assert_eq!(
        config.icons().directory(),
        Some(Path::new("/usr/share/archsketch/icons"))
    );
    assert_eq!(config.icons().base_directory(), Path::new("assets"));

    let graph: Vec<_> = config.style().graph().keys().map(String::as_str).collect();
    assert_eq!(graph, ["splines", "rankdir"]);
    assert_eq!(config.style().node()["fontsize"], "11");
    assert_eq!(config.style().edge()["color"], "#000000");

    let palette = config.style().cluster_backgrounds().unwrap();
    assert_eq!(palette.len(), 2);
    assert_eq!(palette[0], Color::new("#ffffff").unwrap());
}

#[test]
fn test_empty_palette_is_unset() {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        cluster_backgrounds = []
        "#,
    )
    .unwrap();

    assert!(config.style().cluster_backgrounds().is_none());
}

#[test]
fn test_unknown_format_is_rejected() {
    let result: Result<AppConfig, _> = toml::from_str(
        r#"
        [output]
        format = "gif"
        "#,
    );

    assert!(result.is_err());
}

#[test]
fn test_invalid_color_is_rejected() {
    let result: Result<AppConfig, _> = toml::from_str(
        r#"
        [style]
        cluster_backgrounds = ["not a color"]
        "#,
    );

    assert!(result.is_err());
}
