/*!
 * Common test utilities shared across the test suite.
 */

use std::sync::Arc;

use nyayasetu::database::{CategoryRecord, CategoryRepository};
use nyayasetu::pipeline::RequestPipeline;
use nyayasetu::providers::mock::{MockClassifier, MockDetector, MockTranslator};
use nyayasetu::taxonomy::Taxonomy;

/// Initialize test logging once; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The taxonomy used throughout the tests
pub fn test_taxonomy() -> Taxonomy {
    Taxonomy::new(vec![
        "theft".to_string(),
        "assault".to_string(),
        "robbery".to_string(),
    ])
    .expect("test taxonomy")
}

/// A section record for the given category
pub fn record_for(category: &str, title: &str) -> CategoryRecord {
    CategoryRecord {
        category: category.to_string(),
        title: title.to_string(),
        description: format!("Description of {}", title),
        punishment: "Imprisonment up to 3 years".to_string(),
        bail_type: "Bailable".to_string(),
        bail_time_limit: "48 hours".to_string(),
    }
}

/// An in-memory repository seeded with one record each for theft,
/// assault and robbery
pub async fn seeded_repository() -> CategoryRepository {
    init_test_logging();
    let repository = CategoryRepository::new_in_memory().expect("in-memory repository");
    repository
        .insert_records(vec![
            record_for("theft", "Section 379"),
            record_for("assault", "Section 351"),
            record_for("robbery", "Section 392"),
        ])
        .await
        .expect("seed records");
    repository
}

/// Build a pipeline from the given mocks over a seeded repository with
/// the default 0.10 threshold
pub async fn build_pipeline(
    detector: MockDetector,
    translator: MockTranslator,
    classifier: MockClassifier,
) -> RequestPipeline {
    RequestPipeline::new(
        Arc::new(detector),
        Arc::new(translator),
        Arc::new(classifier),
        seeded_repository().await,
        test_taxonomy(),
        0.1,
    )
}
