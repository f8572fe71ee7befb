mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestHome;

fn json_output(home: &TestHome, args: &[&str]) -> Value {
    let output = home
        .rb_cmd()
        .args(args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("json envelope")
}

#[test]
fn first_list_shows_the_seed_areas() {
    let home = TestHome::new();
    let value = json_output(&home, &["area", "list"]);

    let areas = value["data"].as_array().expect("area array");
    assert_eq!(areas.len(), 4);
    let names: Vec<&str> = areas.iter().map(|a| a["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Work", "Personal", "Health", "Family"]);
    assert_eq!(areas[1]["color"], "#AF52DE");
}

#[test]
fn add_area_and_project() {
    let home = TestHome::new();
    let value = json_output(
        &home,
        &["area", "add", "Side quests", "--color", "#FF2D55"],
    );
    let area_id = value["data"]["id"].as_str().expect("area id").to_string();
    assert_eq!(value["data"]["name"], "Side quests");
    assert!(value["data"]["projects"].as_array().unwrap().is_empty());

    let value = json_output(&home, &["area", "project", area_id.as_str(), "Learn the banjo"]);
    assert_eq!(value["data"]["added"], true);
    assert_eq!(value["data"]["project"]["title"], "Learn the banjo");
    assert_eq!(value["data"]["project"]["completed"], false);

    home.rb_cmd()
        .args(["area", "list"])
        .assert()
        .success()
        .stdout(contains("Learn the banjo"));
}

#[test]
fn project_to_unknown_area_is_a_noop_success() {
    let home = TestHome::new();
    let value = json_output(&home, &["area", "project", "missing", "Nowhere"]);
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["added"], false);
    assert_eq!(value["warnings"][0], "area not found: missing");
}

#[test]
fn mood_log_then_list() {
    let home = TestHome::new();
    let value = json_output(
        &home,
        &["mood", "log", "😊", "Happy", "--note", "good run"],
    );
    assert_eq!(value["data"]["label"], "Happy");
    assert_eq!(value["data"]["note"], "good run");

    json_output(&home, &["mood", "log", "😐", "Neutral"]);

    let value = json_output(&home, &["mood", "list"]);
    let entries = value["data"].as_array().expect("mood array");
    assert_eq!(entries.len(), 2);
    // Newest first.
    assert_eq!(entries[0]["label"], "Neutral");
    assert_eq!(entries[1]["label"], "Happy");
}

#[test]
fn mood_list_can_filter_by_day() {
    let home = TestHome::new();
    json_output(&home, &["mood", "log", "😊", "Happy"]);

    let value = json_output(&home, &["mood", "list", "--on", "1999-01-01"]);
    assert_eq!(value["data"].as_array().unwrap().len(), 0);
}
