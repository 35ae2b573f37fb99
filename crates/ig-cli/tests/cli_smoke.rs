use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const AUTUMN: &str = include_str!("fixtures/autumn_sale.json");

fn workdir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("infograph-cli-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for name in ["a.jpg", "B.png", "readme.txt"] {
        std::fs::write(dir.join(name), b"").unwrap();
    }
    dir
}

fn infograph(dir: &PathBuf, args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_infograph"))
        .arg(dir)
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let mut input = child.stdin.take().unwrap();
    if let Some(text) = stdin {
        input.write_all(text.as_bytes()).unwrap();
    }
    drop(input);
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn cli_saves_lints_and_prepares_a_template() {
    let dir = workdir("flow");

    let images = stdout(&infograph(&dir, &["images"], None));
    let names: Vec<_> = images
        .lines()
        .map(|l| l.rsplit('/').next().unwrap())
        .collect();
    assert_eq!(names, vec!["a.jpg", "B.png"]);

    let saved = stdout(&infograph(&dir, &["save", "Autumn sale"], Some(AUTUMN)));
    assert!(saved.trim().ends_with(".infographics-templates/Autumn sale.json"));

    let listed = stdout(&infograph(&dir, &["templates"], None));
    assert!(listed.starts_with("Autumn sale\t"));

    stdout(&infograph(&dir, &["lint", "Autumn sale"], None));

    let prepared = stdout(&infograph(
        &dir,
        &["prepare", "Autumn sale", "--parallelism", "3"],
        None,
    ));
    let request: serde_json::Value = serde_json::from_str(&prepared).unwrap();
    assert_eq!(request["parallelism"], 3);
    assert_eq!(request["templateName"], "Autumn sale");
    assert_eq!(request["selectedImages"].as_array().unwrap().len(), 2);
    let first = request["selectedImages"][0]["path"].as_str().unwrap();
    assert_eq!(request["tableData"][first]["PRICE"], "$19");

    stdout(&infograph(&dir, &["delete", "Autumn sale"], None));
    assert_eq!(stdout(&infograph(&dir, &["templates"], None)), "");

    let missing = infograph(&dir, &["lint", "Autumn sale"], None);
    assert!(!missing.status.success());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cli_rejects_a_malformed_payload() {
    let dir = workdir("bad");
    let output = infograph(&dir, &["save", "broken"], Some("{not json"));
    assert!(!output.status.success());
    assert!(!dir.join(".infographics-templates").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cli_rejects_inverted_zoom_bounds_in_config() {
    let dir = workdir("config");
    let config = dir.join("editor.json");
    std::fs::write(&config, r#"{"zoom_min": 5.0}"#).unwrap();
    let output = infograph(&dir, &["--config", config.to_str().unwrap(), "images"], None);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("zoom bounds"), "stderr: {stderr}");
    let _ = std::fs::remove_dir_all(&dir);
}
