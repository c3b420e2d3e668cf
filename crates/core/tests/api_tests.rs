//! Library API integration tests
use jobsift_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn get_site_fixture_path(site: &str, name: &str) -> String {
    format!("../../tests/fixtures/sites/{}/{}", site, name)
}

fn read_fixture(path: &str) -> String {
    std::fs::read_to_string(path).expect("fixture should exist")
}

#[test]
fn test_extract_always_complete() {
    let fixtures = vec![
        get_site_fixture_path("generic", "posting.html"),
        get_site_fixture_path("greenhouse", "posting.html"),
        get_fixture_path("structured_data.html"),
        get_fixture_path("remote_posting.html"),
        get_fixture_path("empty_content.html"),
    ];

    for path in fixtures {
        let html = read_fixture(&path);
        let record = extract(&html, "https://acme.example/careers/1");

        assert!(!record.company.is_empty(), "{} company", path);
        assert!(!record.title.is_empty(), "{} title", path);
        assert!(!record.location.is_empty(), "{} location", path);
        assert!(!record.description.is_empty(), "{} description", path);
        assert!(record.extraction.quality_score <= 100, "{} quality", path);
        assert!(record.extraction.confidence_score <= 100, "{} confidence", path);
    }
}

#[test]
fn test_structured_data_takes_precedence() {
    let html = read_fixture(&get_fixture_path("structured_data.html"));
    let record = extract(&html, "https://globex.example/careers/senior-data-engineer");

    // the JSON-LD title survives verbatim even though a heading carries the
    // same text
    assert_eq!(record.title, "Senior Data Engineer");
    assert_eq!(record.extraction.methods.title, Method::StructuredData);

    assert_eq!(record.company, "Globex Corporation");
    assert_eq!(record.location, "Portland, OR, US");
    assert_eq!(record.extraction.methods.company, Method::StructuredData);
    assert_eq!(record.extraction.methods.location, Method::StructuredData);

    assert_eq!(record.application_url, "https://globex.example/jobs/senior-data-engineer");
    assert!(record.description.contains("Responsibilities"));
    assert!(!record.description.contains("<ul>"));
}

#[test]
fn test_selector_scenario() {
    let html = read_fixture(&get_site_fixture_path("generic", "posting.html"));
    let record = extract(&html, "https://acme.example/careers/backend-engineer");

    assert_eq!(record.title, "Backend Engineer");
    assert_eq!(record.extraction.methods.title, Method::Selector);

    assert!(record.description.len() >= 200);
    assert!(record.extraction.quality_score >= 70);

    assert_eq!(record.company, "Acme Corp");
    assert_eq!(record.location, "Austin, TX");
    assert_eq!(
        record.application_url,
        "https://acme.example/careers/backend-engineer/apply"
    );
}

#[test]
fn test_remote_detection_scenario() {
    let html = read_fixture(&get_fixture_path("remote_posting.html"));
    let record = extract(&html, "https://hooli.example/careers/technical-writer");

    assert_eq!(record.location, "Remote");
    assert_eq!(record.extraction.methods.location, Method::RemoteDetection);
}

#[test]
fn test_empty_document_scenario() {
    let html = read_fixture(&get_fixture_path("empty_content.html"));
    let record = JobExtractor::new().extract(&html);

    assert_eq!(record.company, COMPANY_FALLBACK);
    assert_eq!(record.title, TITLE_FALLBACK);
    assert_eq!(record.location, LOCATION_FALLBACK);
    assert_eq!(record.description, DESCRIPTION_FALLBACK);
    assert_eq!(record.extraction.quality_score, 0);
    assert_eq!(record.extraction.quality_grade, QualityGrade::Failed);
}

#[test]
fn test_extract_idempotent() {
    let html = read_fixture(&get_site_fixture_path("generic", "posting.html"));
    let url = "https://acme.example/careers/backend-engineer";

    let mut first = extract(&html, url);
    let mut second = extract(&html, url);

    first.extraction.elapsed_ms = 0;
    second.extraction.elapsed_ms = 0;
    assert_eq!(first, second);
}

#[test]
fn test_validated_values_never_generic() {
    let fixtures = vec![
        get_site_fixture_path("generic", "posting.html"),
        get_site_fixture_path("greenhouse", "posting.html"),
        get_fixture_path("structured_data.html"),
    ];
    let generic_titles = ["job", "career", "position", "opportunity"];

    for path in fixtures {
        let html = read_fixture(&path);
        let record = extract(&html, "https://acme.example/careers/1");

        if record.extraction.methods.title != Method::Failed {
            assert!(validate(&record.title, FieldKind::Title).valid, "{}", path);
            assert!(
                !generic_titles.contains(&record.title.to_lowercase().as_str()),
                "{}",
                path
            );
        }
    }
}

#[test]
fn test_noise_filter_properties() {
    assert!(is_noise("Home"));
    assert!(!is_noise("Senior Backend Engineer"));
}

#[test]
fn test_site_profile_dispatch() {
    let html = read_fixture(&get_site_fixture_path("greenhouse", "posting.html"));
    let record = extract(&html, "https://boards.greenhouse.io/initech/jobs/4242");

    assert_eq!(record.title, "Platform Engineer");
    assert_eq!(record.company, "Initech LLC");
    assert_eq!(record.location, "Denver, CO");
    assert_eq!(record.site, "Applicant Tracking System");
    assert_eq!(
        record.application_url,
        "https://boards.greenhouse.io/initech/jobs/4242/apply"
    );
}

#[test]
fn test_custom_registry() {
    let mut registry = SiteRegistry::empty();
    let mut profile = SiteProfile::generic();
    profile.name = "Example Board".to_string();
    profile.host_signatures = vec!["board.example".to_string()];
    profile.title_selectors.insert(0, ".vacancy-title".to_string());
    registry.add(profile);

    let html = r#"
        <html><body>
            <div class="vacancy-title">Field Service Engineer</div>
        </body></html>
    "#;

    let engine = JobExtractor::with_config_and_registry(EngineConfig::default(), registry);
    let record = engine.extract_with_url(html, "https://board.example/vacancy/9");

    assert_eq!(record.title, "Field Service Engineer");
    assert_eq!(record.extraction.methods.title, Method::Selector);
}

#[test]
fn test_record_json_round_trip() {
    let html = read_fixture(&get_site_fixture_path("generic", "posting.html"));
    let record = extract(&html, "https://acme.example/careers/backend-engineer");

    let value: serde_json::Value = serde_json::from_str(&record.to_json()).expect("record serializes");
    assert_eq!(value["title"], "Backend Engineer");
    assert_eq!(value["extraction"]["methods"]["title"], "selector");
    assert!(value["extraction"]["quality_score"].as_u64().unwrap() <= 100);
}

#[test]
fn test_engine_never_panics_on_hostile_input() {
    let engine = JobExtractor::new();
    let inputs = [
        "",
        "not html at all",
        "<div><p>unclosed",
        "<script>while(true){}</script>",
        "<html><body>\u{0}\u{FFFD}</body></html>",
    ];

    for html in inputs {
        let record = engine.extract(html);
        assert!(record.extraction.quality_score <= 100);
    }
}
