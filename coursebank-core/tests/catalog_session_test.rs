//! End-to-end sessions over the core: load records, run operations, persist
//! records again, the way the command-line front end drives the library.

mod common;

use coursebank_core::{
    record, render_listing, Catalog, CatalogError, Course, CourseFields, ListOptions, SortKey,
    DEFAULT_PREREQUISITE_SEPARATOR,
};
use pretty_assertions::assert_eq;

#[test]
fn test_add_to_empty_catalog_then_list() {
    common::init_test_logging();

    let mut catalog = Catalog::from_lines(Vec::<String>::new()).unwrap();
    assert!(catalog.is_empty());

    catalog
        .insert(Course::new("ABC1234", "Intro", 3, vec![]).unwrap())
        .unwrap();

    let listed = catalog.list(ListOptions::default());
    let output = render_listing(&listed, None, DEFAULT_PREREQUISITE_SEPARATOR).unwrap();

    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("ABC1234"));
    assert!(output.contains("Intro"));
}

#[test]
fn test_six_character_code_is_rejected() {
    assert_eq!(
        Course::new("ABC123", "Intro", 3, vec![]),
        Err(CatalogError::InvalidCode("ABC123".to_string()))
    );
}

#[test]
fn test_session_persists_state_changes() {
    common::init_test_logging();

    let mut catalog = common::sample_catalog();

    let added = Course::from_fields(CourseFields {
        code: "INF5153".to_string(),
        title: "Genie logiciel".to_string(),
        credits: "3".to_string(),
        prerequisites: vec!["INF3135".to_string()],
        active: None,
    })
    .unwrap();
    catalog.insert(added).unwrap();
    catalog.deactivate("MAT1600").unwrap();
    catalog.remove("INF1120").unwrap();

    let saved = catalog.to_records();
    let reloaded = Catalog::from_lines(saved.lines()).unwrap();

    assert_eq!(reloaded, catalog);
    assert_eq!(
        saved,
        r#"MAT1600 "Algebre matricielle" 4 inactive
INF2120 "Programmation II" 3 INF1120 active
INF3135 "Construction et maintenance de logiciels" 3 INF2120 MAT1600 active
INF5153 "Genie logiciel" 3 INF3135 active
"#
    );
}

#[test]
fn test_listing_after_deactivation() {
    let mut catalog = common::sample_catalog();
    catalog.deactivate("INF2120").unwrap();

    let active = catalog.list(ListOptions::default());
    assert_eq!(
        render_listing(&active, Some("%S"), ":").unwrap(),
        "INF1120\nINF3135\nMAT1600\n"
    );

    let everything = catalog.list(ListOptions {
        include_inactive: true,
        sort_key: SortKey::Title,
    });
    assert_eq!(
        render_listing(&everything, Some("%S%A"), ":").unwrap(),
        "MAT1600\nINF3135\nINF1120\nINF2120?\n"
    );
}

#[test]
fn test_prerequisite_queries() {
    let catalog = common::sample_catalog();

    assert_eq!(
        catalog.direct_prerequisites("INF3135").unwrap(),
        ["INF2120", "MAT1600"]
    );
    assert_eq!(
        catalog.transitive_prerequisites("INF3135").unwrap(),
        vec!["INF1120", "INF2120", "MAT1600"]
    );
    assert_eq!(catalog.total_credits(&["INF3135", "MAT1600"]), Ok(7));
}

#[test]
fn test_bad_depot_line_reports_position() {
    let depot = format!("{}INF4100 Methodes 3\n", common::SAMPLE_DEPOT);
    let err = Catalog::from_lines(depot.lines()).unwrap_err();

    assert_eq!(
        err,
        CatalogError::Record {
            line: 5,
            source: Box::new(CatalogError::MalformedRecord(
                "INF4100 Methodes 3".to_string()
            )),
        }
    );
    assert_eq!(err.to_string(), "Line 5: Malformed record: 'INF4100 Methodes 3'");
}

#[test]
fn test_parse_line_matches_render_line() {
    let catalog = common::sample_catalog();
    for course in catalog.courses() {
        assert_eq!(&record::parse_line(&record::render_line(course)).unwrap(), course);
    }
}
