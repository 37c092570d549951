use std::fs;

use cityclean::filter;
use cityclean::index;
use cityclean::{CleanConfig, CleanError, FilterConfig, IndexConfig};
use tempfile::tempdir;

const SAMPLE: &str = concat!(
    "{\"city\": \"Springfield\", \"zip\": \"01101\"}\n",
    "{\"city\": \"ZCTA 01102\"}\n",
    "{\"city\": \"zcta-Town\"}\n",
    " \n",
    "{\"zip\": \"01103\"}\n",
);

#[test]
fn cleans_file_to_file() {
    let dir = tempdir().unwrap();
    let config = FilterConfig {
        input_path: dir.path().join("dynamic_cities.json"),
        output_path: dir.path().join("dynamic_cities_clean.json"),
    };
    fs::write(&config.input_path, SAMPLE).unwrap();

    let stats = filter::run(&config).unwrap();

    assert_eq!(stats.kept, 2);
    assert_eq!(stats.excluded, 2);
    assert_eq!(
        fs::read_to_string(&config.output_path).unwrap(),
        "{\"city\": \"Springfield\", \"zip\": \"01101\"}\n{\"zip\": \"01103\"}\n"
    );
}

#[test]
fn rerunning_on_output_changes_nothing() {
    let dir = tempdir().unwrap();
    let first = FilterConfig {
        input_path: dir.path().join("in.json"),
        output_path: dir.path().join("once.json"),
    };
    let second = FilterConfig {
        input_path: first.output_path.clone(),
        output_path: dir.path().join("twice.json"),
    };
    fs::write(&first.input_path, SAMPLE).unwrap();

    filter::run(&first).unwrap();
    let stats = filter::run(&second).unwrap();

    assert_eq!(stats.excluded, 0);
    assert_eq!(
        fs::read(&first.output_path).unwrap(),
        fs::read(&second.output_path).unwrap()
    );
}

#[test]
fn missing_input_leaves_no_output() {
    let dir = tempdir().unwrap();
    let config = FilterConfig {
        input_path: dir.path().join("absent.json"),
        output_path: dir.path().join("out.json"),
    };

    let err = filter::run(&config).unwrap_err();

    assert!(matches!(err, CleanError::OpenInput { .. }));
    assert!(err.is_file_access());
    assert!(!config.output_path.exists());
}

#[test]
fn unwritable_output_is_reported() {
    let dir = tempdir().unwrap();
    let config = FilterConfig {
        input_path: dir.path().join("in.json"),
        output_path: dir.path().join("no-such-dir").join("out.json"),
    };
    fs::write(&config.input_path, SAMPLE).unwrap();

    let err = filter::run(&config).unwrap_err();
    assert!(matches!(err, CleanError::CreateOutput { .. }));
}

#[test]
fn malformed_line_keeps_partial_output() {
    let dir = tempdir().unwrap();
    let config = FilterConfig {
        input_path: dir.path().join("in.json"),
        output_path: dir.path().join("out.json"),
    };
    fs::write(
        &config.input_path,
        "{\"city\": \"Salem\"}\n{\"city\": \"Dover\"\n{\"city\": \"Keene\"}\n",
    )
    .unwrap();

    let err = filter::run(&config).unwrap_err();

    assert!(matches!(err, CleanError::MalformedLine { line_number: 2, .. }));
    assert!(err.to_string().contains("line 2"));
    // The writer is dropped on the error path, which flushes what was buffered.
    assert_eq!(
        fs::read_to_string(&config.output_path).unwrap(),
        "{\"city\": \"Salem\"}\n"
    );
}

#[test]
fn config_file_drives_paths() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("cityclean.toml");
    let input = dir.path().join("cities.ndjson");
    fs::write(
        &config_path,
        format!(
            "[filter]\ninput_path = {:?}\n\n[index]\noutput_path = \"states.json\"\n",
            input.display().to_string()
        ),
    )
    .unwrap();

    let config = CleanConfig::resolve(Some(&config_path)).unwrap();

    assert_eq!(config.filter.input_path, input);
    assert_eq!(config.filter.output_path, FilterConfig::default().output_path);
    assert_eq!(config.index.output_path, std::path::PathBuf::from("states.json"));
}

#[test]
fn broken_config_file_is_reported() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("cityclean.toml");
    fs::write(&config_path, "[filter\n").unwrap();

    let err = CleanConfig::resolve(Some(&config_path)).unwrap_err();
    assert!(matches!(err, CleanError::ConfigParse { .. }));
}

#[test]
fn builds_state_index_file() {
    let dir = tempdir().unwrap();
    let config = IndexConfig {
        input_path: dir.path().join("dynamic_cities.json"),
        output_path: dir.path().join("cities-data.json"),
    };
    fs::write(
        &config.input_path,
        concat!(
            "{\"city\": \"Austin\", \"state\": \"Texas\", \"county\": \"Travis\"}\n",
            "{\"city\": \"Reno\", \"state\": \"Nevada\"}\n",
            "{\"city\": \"Austin\", \"state\": \"Texas\"}\n",
        ),
    )
    .unwrap();

    let stats = index::run_index(&config).unwrap();
    assert_eq!(stats.states, 2);
    assert_eq!(
        index::completion_message(&config, &stats),
        format!("Written data for 2 states to {}", config.output_path.display())
    );

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.output_path).unwrap()).unwrap();
    assert_eq!(written["texas"]["cities"].as_array().unwrap().len(), 1);
    assert_eq!(written["texas"]["cities"][0]["county"], "Travis");
    assert_eq!(written["nevada"]["name"], "Nevada");
}
