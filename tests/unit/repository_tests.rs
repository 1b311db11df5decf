/*!
 * Tests for the section store: lookup order, fan-out merge and imports.
 */

use std::io::Write;

use nyayasetu::database::CategoryRepository;

use crate::common::record_for;

#[tokio::test]
async fn test_findByCategory_withSeededStore_shouldReturnInInsertionOrder() {
    let repository = CategoryRepository::new_in_memory().unwrap();
    repository
        .insert_records(vec![
            record_for("theft", "Section 378"),
            record_for("theft", "Section 379"),
            record_for("robbery", "Section 392"),
        ])
        .await
        .unwrap();

    let records = repository.find_by_category("theft").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Section 378");
    assert_eq!(records[1].title, "Section 379");
}

#[tokio::test]
async fn test_findByCategory_withUnknownLabel_shouldReturnEmpty() {
    let repository = CategoryRepository::new_in_memory().unwrap();
    let records = repository.find_by_category("arson").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_resolve_withMultipleLabels_shouldConcatenateInLabelOrder() {
    let repository = CategoryRepository::new_in_memory().unwrap();
    repository
        .insert_records(vec![
            record_for("robbery", "Section 392"),
            record_for("theft", "Section 378"),
            record_for("theft", "Section 379"),
        ])
        .await
        .unwrap();

    let records = repository
        .resolve(&["theft".to_string(), "robbery".to_string()])
        .await;

    // Label order first, then store order within a label
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].title, "Section 378");
    assert_eq!(records[1].title, "Section 379");
    assert_eq!(records[2].title, "Section 392");
}

#[tokio::test]
async fn test_resolve_withRepeatedLabel_shouldReturnRecordsTwice() {
    let repository = CategoryRepository::new_in_memory().unwrap();
    repository
        .insert_records(vec![record_for("theft", "Section 379")])
        .await
        .unwrap();

    let records = repository
        .resolve(&["theft".to_string(), "theft".to_string()])
        .await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);
}

#[tokio::test]
async fn test_resolve_withUnknownLabelAmongKnown_shouldStillResolveOthers() {
    let repository = CategoryRepository::new_in_memory().unwrap();
    repository
        .insert_records(vec![record_for("theft", "Section 379")])
        .await
        .unwrap();

    let records = repository
        .resolve(&["arson".to_string(), "theft".to_string()])
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, "theft");
}

#[tokio::test]
async fn test_insertRecords_withSameCategoryAndTitle_shouldReplace() {
    let repository = CategoryRepository::new_in_memory().unwrap();

    let mut original = record_for("theft", "Section 379");
    repository.insert_records(vec![original.clone()]).await.unwrap();

    original.punishment = "Updated punishment".to_string();
    repository.insert_records(vec![original]).await.unwrap();

    let records = repository.find_by_category("theft").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].punishment, "Updated punishment");
}

#[tokio::test]
async fn test_importRecords_withSeedFile_shouldLoadAndCount() {
    let repository = CategoryRepository::new_in_memory().unwrap();

    let mut seed = tempfile::NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&vec![
        record_for("theft", "Section 379"),
        record_for("assault", "Section 351"),
    ])
    .unwrap();
    seed.write_all(json.as_bytes()).unwrap();

    let imported = repository.import_records(seed.path()).await.unwrap();
    assert_eq!(imported, 2);
    assert_eq!(repository.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_importRecords_withMissingFile_shouldFail() {
    let repository = CategoryRepository::new_in_memory().unwrap();
    let result = repository.import_records("/nonexistent/seed.json").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_open_withFilePath_shouldPersistAcrossReopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sections.db");

    {
        let repository = CategoryRepository::open(&db_path).unwrap();
        repository
            .insert_records(vec![record_for("theft", "Section 379")])
            .await
            .unwrap();
    }

    let reopened = CategoryRepository::open(&db_path).unwrap();
    assert_eq!(reopened.count().await.unwrap(), 1);
}
