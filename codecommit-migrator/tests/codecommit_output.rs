use std::path::PathBuf;

use codecommit_migrator::source::{
    parse_get_pull_request, parse_get_repository, parse_list_pull_requests,
};
use codecommit_migrator::translator::RAW_OBJECT_SUMMARY;
use codecommit_migrator::{translate, RawChangeRequest};
use url::Url;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn tracker() -> Url {
    Url::parse("https://acme.atlassian.net").unwrap()
}

#[test]
fn list_keeps_provider_order() {
    let ids = parse_list_pull_requests(&fixture("list-pull-requests.json")).unwrap();
    assert_eq!(ids, vec!["42", "43", "51"]);
}

#[test]
fn get_pull_request_keeps_unmodelled_fields() {
    let raw = parse_get_pull_request(&fixture("get-pull-request.json")).unwrap();

    assert_eq!(raw.pull_request_id, "42");
    assert_eq!(raw.title, "ABC-42: fix bug");
    assert_eq!(raw.pull_request_targets.len(), 1);
    assert!(raw.extra.contains_key("revisionId"));
    assert!(raw.pull_request_targets[0].extra.contains_key("mergeMetadata"));
}

#[test]
fn repository_region_comes_from_arn() {
    let metadata = parse_get_repository(&fixture("get-repository.json")).unwrap();

    assert_eq!(metadata.repository_name, "billing");
    assert_eq!(metadata.region(), Some("eu-central-1"));
}

#[test]
fn fixture_translates_to_github_request() {
    let raw = parse_get_pull_request(&fixture("get-pull-request.json")).unwrap();
    let metadata = parse_get_repository(&fixture("get-repository.json")).unwrap();

    let translated = translate(&raw, &metadata, &tracker());

    assert_eq!(translated.title, "ABC-42: fix bug");
    assert_eq!(translated.base, "main");
    assert_eq!(translated.head, "feature/ABC-42-rounding");

    let body = &translated.body;
    assert!(body.starts_with("Fixes the rounding bug in invoice totals.\n\n---\n"));
    assert!(body.contains(
        "https://eu-central-1.console.aws.amazon.com/codesuite/codecommit/repositories/billing/pull-requests/42"
    ));
    assert!(body.contains("https://acme.atlassian.net/browse/ABC-42"));
    assert!(body.contains("`jane.doe`"));
    assert!(body.contains("5 Jan 2023, 10:15:30 UTC"));
    assert!(body.contains(RAW_OBJECT_SUMMARY));
}

#[test]
fn embedded_object_parses_back() {
    let raw = parse_get_pull_request(&fixture("get-pull-request.json")).unwrap();
    let metadata = parse_get_repository(&fixture("get-repository.json")).unwrap();
    let body = translate(&raw, &metadata, &tracker()).body;

    let start = body.find("json\n").unwrap() + "json\n".len();
    let end = body.rfind("\n```").unwrap();
    let embedded: RawChangeRequest = serde_json::from_str(&body[start..end]).unwrap();

    assert_eq!(embedded, raw);
}
