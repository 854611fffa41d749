use std::io::Write;
use std::path::{Path, PathBuf};

use projdag::config::loader::expand_home;
use projdag::config::{ConfigFile, RawConfigFile, load_and_validate, load_effective, resolve_graph_path};
use projdag::errors::ProjdagError;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn empty_file_gives_defaults() {
    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert!(cfg.storage.graph_file.is_none());
    assert!(cfg.schedule.detect_overbooking);
    assert_eq!(cfg.view.gantt_width, 60);
    assert_eq!(cfg.view.date_format, "%Y-%m-%d");
}

#[test]
fn all_sections_are_read() {
    let file = config_file(
        r#"
[storage]
graph_file = "/srv/plans/graph.json"

[schedule]
detect_overbooking = false

[view]
gantt_width = 120
date_format = "%d.%m."
"#,
    );
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(
        cfg.storage.graph_file.as_deref(),
        Some(Path::new("/srv/plans/graph.json"))
    );
    assert!(!cfg.schedule.detect_overbooking);
    assert_eq!(cfg.view.gantt_width, 120);
    assert_eq!(cfg.view.date_format, "%d.%m.");
}

#[test]
fn gantt_width_out_of_range_is_rejected() {
    for width in [0, 9, 401] {
        let file = config_file(&format!("[view]\ngantt_width = {width}\n"));
        match load_and_validate(file.path()) {
            Err(ProjdagError::ConfigError(msg)) => assert!(msg.contains("gantt_width")),
            other => panic!("expected ConfigError for width {width}, got {other:?}"),
        }
    }
}

#[test]
fn bad_date_format_is_rejected() {
    let file = config_file("[view]\ndate_format = \"%Q\"\n");
    match load_and_validate(file.path()) {
        Err(ProjdagError::ConfigError(msg)) => assert!(msg.contains("date_format")),
        other => panic!("expected ConfigError, got {other:?}"),
    }

    let file = config_file("[view]\ndate_format = \"  \"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(ProjdagError::ConfigError(_))
    ));
}

#[test]
fn empty_graph_file_is_rejected() {
    let file = config_file("[storage]\ngraph_file = \"\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(ProjdagError::ConfigError(_))
    ));
}

#[test]
fn invalid_toml_is_a_toml_error() {
    let file = config_file("[view\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(ProjdagError::TomlError(_))
    ));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let err = load_effective(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
    assert!(matches!(err, ProjdagError::ConfigError(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn explicit_graph_path_wins_over_config() {
    let raw = RawConfigFile {
        storage: projdag::config::StorageSection {
            graph_file: Some(PathBuf::from("/from/config.json")),
        },
        ..RawConfigFile::default()
    };
    let cfg = ConfigFile::try_from(raw).unwrap();

    assert_eq!(
        resolve_graph_path(Some(Path::new("/from/flag.json")), &cfg),
        PathBuf::from("/from/flag.json")
    );
}

#[test]
fn home_prefix_is_expanded() {
    let expanded = expand_home(Path::new("~/plans/graph.json"));
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expanded, home.join("plans/graph.json"));
    }
    assert_eq!(
        expand_home(Path::new("/abs/graph.json")),
        PathBuf::from("/abs/graph.json")
    );
}
