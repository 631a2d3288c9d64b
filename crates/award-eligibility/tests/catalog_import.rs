use std::path::PathBuf;

use award_eligibility::analysis::{
    CatalogError, CategoryCatalog, CategoryType, EligibilityEngine, ScoringConfig,
};

fn write_dataset(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("award-eligibility-catalog-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write dataset");
    path
}

#[test]
fn csv_dataset_loads_from_disk() {
    let path = write_dataset(
        "awards.csv",
        "name,type,criteria,keywords,required_terms\n\
         Maritime Safety Award,Institutional,,maritime safety;vessel inspection;crew training,\n\
         Culinary Heritage Award,Special,heritage recipes;food festival,,cuisine\n",
    );

    let catalog = CategoryCatalog::from_path(&path).expect("csv loads");

    assert_eq!(catalog.len(), 2);
    let maritime = catalog.get("maritime safety award").expect("case-insensitive lookup");
    assert_eq!(maritime.category_type, CategoryType::Institutional);
    assert_eq!(maritime.keywords.len(), 3);

    let culinary = catalog.get("Culinary Heritage Award").expect("present");
    assert_eq!(culinary.required_terms(), ["cuisine"]);
}

#[test]
fn required_terms_from_csv_gate_inclusion() {
    let path = write_dataset(
        "gated.csv",
        "name,type,criteria,keywords,required_terms\n\
         Culinary Heritage Award,Special,heritage recipes;food festival,,cuisine\n",
    );
    let catalog = CategoryCatalog::from_path(&path).expect("csv loads");
    let engine = EligibilityEngine::new(ScoringConfig::default());

    let without = engine.analyze(
        "The food festival showcased heritage recipes.",
        catalog.categories(),
    );
    let with = engine.analyze(
        "The food festival showcased heritage recipes and regional cuisine.",
        catalog.categories(),
    );

    assert!(without.is_empty());
    assert_eq!(with.len(), 1);
}

#[test]
fn json_dataset_loads_from_disk() {
    let path = write_dataset(
        "awards.json",
        r#"[{ "name": "Maritime Safety Award", "type": "Institutional", "keywords": ["crew training"] }]"#,
    );

    let catalog = CategoryCatalog::from_path(&path).expect("json loads");
    assert_eq!(catalog.categories()[0].name, "Maritime Safety Award");
}

#[test]
fn unreadable_datasets_report_their_cause() {
    let missing = std::env::temp_dir().join("award-eligibility-missing-dataset.json");
    assert!(matches!(
        CategoryCatalog::from_path(&missing),
        Err(CatalogError::Io(_))
    ));

    let broken = write_dataset("broken.json", "{ not json");
    assert!(matches!(
        CategoryCatalog::from_path(&broken),
        Err(CatalogError::Json(_))
    ));
}

#[test]
fn bundled_icons_catalog_is_available() {
    let catalog = CategoryCatalog::icons_awards().expect("bundled catalog parses");
    assert_eq!(catalog.len(), 8);
    assert!(catalog.get("Sustainability Award").is_some());
}
