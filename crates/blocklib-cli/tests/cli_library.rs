use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn demo(file: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
        .join(file)
}

fn json_stdout(cmd: &mut assert_cmd::Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn extract_demo_pages_into_a_library_file() {
    let dir = tempfile::tempdir().unwrap();
    let library = dir.path().join("library.json");

    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args([
        "extract",
        demo("pages.json").to_str().unwrap(),
        "--library",
        library.to_str().unwrap(),
    ]);
    let summary = json_stdout(&mut cmd);
    assert_eq!(summary["extracted"], 2);
    assert_eq!(summary["skipped"], 3);
    assert_eq!(
        summary["decisions"],
        serde_json::json!({
            "admitted": 2,
            "duplicate_exact": 1,
            "duplicate_similar": 1,
            "malformed": 1
        })
    );

    // Second run: everything is already known.
    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["extract", demo("pages.json").to_str().unwrap()]);
    cmd.env("BLOCKLIB_LIBRARY", &library);
    let summary = json_stdout(&mut cmd);
    assert_eq!(summary["extracted"], 0);
    assert_eq!(summary["skipped"], 5);

    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["library", "--library", library.to_str().unwrap(), "list"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("ID"))
        .stdout(predicate::str::contains("Aurora Hero"))
        .stdout(predicate::str::contains("Grid Features"));
}

#[test]
fn no_skip_existing_admits_similar_blocks() {
    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["extract", demo("pages.json").to_str().unwrap(), "--no-skip-existing"]);
    cmd.env_remove("BLOCKLIB_LIBRARY");
    let summary = json_stdout(&mut cmd);
    // Only the (type, variant) uniqueness rule applies.
    assert_eq!(summary["extracted"], 3);
    assert_eq!(summary["decisions"]["duplicate_exact"], 1);
}

#[test]
fn seed_then_search_and_use() {
    let dir = tempfile::tempdir().unwrap();
    let library = dir.path().join("library.json");
    let lib = library.to_str().unwrap();

    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["seed", demo("seed-hero.json").to_str().unwrap(), "--library", lib]);
    let summary = json_stdout(&mut cmd);
    assert_eq!(summary["seeded"], 2);

    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["seed", demo("seed-hero.json").to_str().unwrap(), "--library", lib]);
    let summary = json_stdout(&mut cmd);
    assert_eq!(summary["seeded"], 0);
    assert_eq!(summary["unchanged"], 2);

    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["library", "--library", lib, "search", "split", "--json"]);
    let hits = json_stdout(&mut cmd);
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Split Hero");
    assert_eq!(hits[0]["metadata"]["source"], "foundation");
    let id = hits[0]["id"].as_str().unwrap().to_string();

    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["library", "--library", lib, "use", id.as_str()]);
    cmd.assert().success().stdout("1\n");

    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["library", "--library", lib, "list", "--json", "--limit", "1"]);
    let top = json_stdout(&mut cmd);
    assert_eq!(top[0]["id"], id.as_str());
    assert_eq!(top[0]["metadata"]["usage_count"], 1);
}

#[test]
fn using_an_unknown_entry_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let library = dir.path().join("library.json");

    let mut cmd = cargo_bin_cmd!("blocklib");
    cmd.args(["library", "--library", library.to_str().unwrap(), "use", "nope"]);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("library entry 'nope' not found"));
}
