use attrbase_core::db::open_db_in_memory;
use attrbase_core::{Attribute, AttributeRepository, RepoError, SqliteAttributeRepository};

#[test]
fn create_and_find_by_name_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttributeRepository::try_new(&conn).unwrap();

    let attribute = Attribute::new("Color");
    let id = repo.create_attribute(&attribute).unwrap();
    assert_eq!(id, attribute.id);

    let loaded = repo.find_by_name("Color").unwrap().unwrap();
    assert_eq!(loaded, attribute);
}

#[test]
fn find_by_name_is_exact_and_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttributeRepository::try_new(&conn).unwrap();
    repo.create_attribute(&Attribute::new("Color")).unwrap();

    assert!(repo.find_by_name("color").unwrap().is_none());
    assert!(repo.find_by_name("Colo").unwrap().is_none());
    assert!(repo.find_by_name("Color ").unwrap().is_none());
}

#[test]
fn duplicate_insert_reports_duplicate_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttributeRepository::try_new(&conn).unwrap();
    repo.create_attribute(&Attribute::new("Size")).unwrap();

    let err = repo.create_attribute(&Attribute::new("Size")).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName(name) if name == "Size"));
}

#[test]
fn create_rejects_unsanitized_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttributeRepository::try_new(&conn).unwrap();

    let err = repo.create_attribute(&Attribute::new("Size!")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_attributes().unwrap().is_empty());
}

#[test]
fn list_returns_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttributeRepository::try_new(&conn).unwrap();
    for name in ["Weight", "Brand", "Color"] {
        repo.create_attribute(&Attribute::new(name)).unwrap();
    }

    let names = repo
        .list_attributes()
        .unwrap()
        .into_iter()
        .map(|attribute| attribute.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Weight", "Brand", "Color"]);
}

#[test]
fn search_matches_substring_ignoring_case() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttributeRepository::try_new(&conn).unwrap();
    for name in ["Color", "Brand", "Skin COLOUR", "Ärmellänge"] {
        repo.create_attribute(&Attribute::new(name)).unwrap();
    }

    let names = |text: &str| {
        repo.search_attributes(text)
            .unwrap()
            .into_iter()
            .map(|attribute| attribute.name)
            .collect::<Vec<_>>()
    };

    assert_eq!(names("col"), vec!["Color", "Skin COLOUR"]);
    assert_eq!(names("ärmel"), vec!["Ärmellänge"]);
    assert!(names("xyz").is_empty());
}

#[test]
fn search_treats_like_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttributeRepository::try_new(&conn).unwrap();
    repo.create_attribute(&Attribute::new("Color")).unwrap();

    assert!(repo.search_attributes("%").unwrap().is_empty());
    assert!(repo.search_attributes("C_lor").unwrap().is_empty());
}

#[test]
fn list_rejects_corrupt_ids() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO attributes (id, name) VALUES ('not-a-uuid', 'Color');",
        [],
    )
    .unwrap();
    let repo = SqliteAttributeRepository::try_new(&conn).unwrap();

    let err = repo.list_attributes().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
