use attrbase_core::db::open_db_in_memory;
use attrbase_core::{
    AttributeIngestService, AttributeQuery, AttributeQueryService, SqliteAttributeRepository,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use std::collections::HashSet;

fn seeded_connection(names: &[&str]) -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let ingest =
            AttributeIngestService::new(SqliteAttributeRepository::try_new(&conn).unwrap());
        let outcome = ingest.create_attributes(names).unwrap();
        assert_eq!(outcome.created.len(), names.len());
    }
    conn
}

fn names_of(list: &attrbase_core::AttributeList) -> Vec<&str> {
    list.data.iter().map(|attribute| attribute.name.as_str()).collect()
}

#[test]
fn search_filters_case_insensitively_and_ignores_limit() {
    let conn = seeded_connection(&["Color", "Brand"]);
    let service = AttributeQueryService::new(SqliteAttributeRepository::try_new(&conn).unwrap());

    let result = service
        .get_attributes(&AttributeQuery {
            limit: 1,
            search: Some("col".to_string()),
        })
        .unwrap();

    assert_eq!(names_of(&result), vec!["Color"]);
    assert_eq!(result.total, 1);
}

#[test]
fn search_total_counts_matches_not_table_size() {
    let conn = seeded_connection(&["Color", "Colour", "Brand", "Size"]);
    let service = AttributeQueryService::new(SqliteAttributeRepository::try_new(&conn).unwrap());

    let result = service.get_attributes(&AttributeQuery::search("COL")).unwrap();

    assert_eq!(names_of(&result), vec!["Color", "Colour"]);
    assert_eq!(result.total, 2);
}

#[test]
fn limit_samples_subset_and_reports_full_total() {
    let all = ["Color", "Brand", "Size", "Weight", "Material"];
    let conn = seeded_connection(&all);
    let service = AttributeQueryService::new(SqliteAttributeRepository::try_new(&conn).unwrap());
    let universe = all.iter().copied().collect::<HashSet<_>>();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = service
            .get_attributes_with_rng(&AttributeQuery::sample(2), &mut rng)
            .unwrap();

        assert_eq!(result.total, 5);
        assert_eq!(result.data.len(), 2);
        let sampled = names_of(&result).into_iter().collect::<HashSet<_>>();
        assert_eq!(sampled.len(), 2, "sample must not repeat records");
        assert!(sampled.is_subset(&universe));
    }
}

#[test]
fn limit_above_table_size_returns_everything() {
    let conn = seeded_connection(&["Color", "Brand", "Size"]);
    let service = AttributeQueryService::new(SqliteAttributeRepository::try_new(&conn).unwrap());

    let result = service.get_attributes(&AttributeQuery::sample(10)).unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.data.len(), 3);
}

#[test]
fn sampling_eventually_reaches_every_record() {
    let all = ["Color", "Brand", "Size", "Weight", "Material"];
    let conn = seeded_connection(&all);
    let service = AttributeQueryService::new(SqliteAttributeRepository::try_new(&conn).unwrap());
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen = HashSet::new();

    for _ in 0..200 {
        let result = service
            .get_attributes_with_rng(&AttributeQuery::sample(1), &mut rng)
            .unwrap();
        seen.insert(result.data[0].name.clone());
    }

    assert_eq!(seen.len(), all.len());
}

#[test]
fn no_search_and_no_limit_returns_all_in_storage_order() {
    let conn = seeded_connection(&["Weight", "Brand", "Color"]);
    let service = AttributeQueryService::new(SqliteAttributeRepository::try_new(&conn).unwrap());

    let result = service.get_attributes(&AttributeQuery::default()).unwrap();

    assert_eq!(names_of(&result), vec!["Weight", "Brand", "Color"]);
    assert_eq!(result.total, 3);
}

#[test]
fn empty_table_yields_empty_list_in_every_mode() {
    let conn = open_db_in_memory().unwrap();
    let service = AttributeQueryService::new(SqliteAttributeRepository::try_new(&conn).unwrap());

    for query in [
        AttributeQuery::default(),
        AttributeQuery::sample(3),
        AttributeQuery::search("a"),
    ] {
        let result = service.get_attributes(&query).unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.total, 0);
    }
}
