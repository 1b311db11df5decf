/*!
 * Tests for the request pipeline: short-circuits, routing, threshold
 * filtering, fan-out and bilingual responses.
 */

use nyayasetu::errors::PipelineError;
use nyayasetu::pipeline::PipelineOutcome;
use nyayasetu::providers::mock::{MockClassifier, MockDetector, MockTranslator};

use crate::common::build_pipeline;

#[tokio::test]
async fn test_process_withEmptyMessage_shouldReturnNoMatch() {
    let pipeline = build_pipeline(
        MockDetector::returning("en"),
        MockTranslator::working(),
        MockClassifier::with_scores(vec![("theft", 0.9)]),
    )
    .await;

    let outcome = pipeline.process("").await.unwrap();
    assert_eq!(outcome, PipelineOutcome::NoMatch);

    let outcome = pipeline.process("   \t  ").await.unwrap();
    assert_eq!(outcome, PipelineOutcome::NoMatch);
}

#[tokio::test]
async fn test_process_withSingleToken_shouldReturnNoMatchWithoutDetecting() {
    let detector = MockDetector::failing();
    let detect_count = detector.counter();

    let pipeline = build_pipeline(
        detector,
        MockTranslator::working(),
        MockClassifier::with_scores(vec![("theft", 0.9)]),
    )
    .await;

    // Single token short-circuits regardless of collaborator behavior
    let outcome = pipeline.process("hi").await.unwrap();
    assert_eq!(outcome, PipelineOutcome::NoMatch);
    assert_eq!(detect_count.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_process_withDetectionFailure_shouldReturnNoMatch() {
    let pipeline = build_pipeline(
        MockDetector::failing(),
        MockTranslator::working(),
        MockClassifier::with_scores(vec![("theft", 0.9)]),
    )
    .await;

    let outcome = pipeline.process("my phone was stolen").await.unwrap();
    assert_eq!(outcome, PipelineOutcome::NoMatch);
}

#[tokio::test]
async fn test_process_withEnglishInput_shouldClassifyOriginalWithoutTranslating() {
    let translator = MockTranslator::working();
    let translation_calls = translator.call_log();
    let classifier = MockClassifier::with_scores(vec![("theft", 0.9)]);
    let classified_input = classifier.input_cell();

    let pipeline = build_pipeline(MockDetector::returning("en"), translator, classifier).await;

    let outcome = pipeline.process("  my phone was stolen  ").await.unwrap();
    assert!(outcome.is_matched());

    // No translation call occurred, and the classifier saw the trimmed original
    assert!(translation_calls.lock().unwrap().is_empty());
    assert_eq!(
        classified_input.lock().unwrap().as_deref(),
        Some("my phone was stolen")
    );
}

#[tokio::test]
async fn test_process_withHindiInput_shouldTranslateOnceBeforeClassifying() {
    let translator = MockTranslator::working();
    let translation_calls = translator.call_log();
    let classifier = MockClassifier::with_scores(vec![("theft", 0.4)]);
    let classified_input = classifier.input_cell();

    let pipeline = build_pipeline(MockDetector::returning("hi"), translator, classifier).await;

    let outcome = pipeline.process("मेरा फोन छीन लिया गया").await.unwrap();
    let payload = match outcome {
        PipelineOutcome::Matched(payload) => payload,
        PipelineOutcome::NoMatch => panic!("expected a match"),
    };

    assert_eq!(payload.original_language, "hi");

    // Exactly one hi->en input translation happened
    let calls = translation_calls.lock().unwrap().clone();
    let input_calls: Vec<_> = calls
        .iter()
        .filter(|c| c.source == "hi" && c.target == "en")
        .collect();
    assert_eq!(input_calls.len(), 1);
    assert_eq!(input_calls[0].text, "मेरा फोन छीन लिया गया");

    // And the classifier saw the translated text, not the original
    assert_eq!(
        classified_input.lock().unwrap().as_deref(),
        Some(format!("मेरा फोन छीन लिया गया{}", MockTranslator::marker("hi", "en")).as_str())
    );
}

#[tokio::test]
async fn test_process_withHindiTranslationFailure_shouldPropagateError() {
    let pipeline = build_pipeline(
        MockDetector::returning("hi"),
        MockTranslator::failing(),
        MockClassifier::with_scores(vec![("theft", 0.9)]),
    )
    .await;

    let result = pipeline.process("मेरा फोन छीन लिया गया").await;
    assert!(matches!(result, Err(PipelineError::Translation(_))));
}

#[tokio::test]
async fn test_process_withClassificationFailure_shouldReturnNoMatch() {
    let pipeline = build_pipeline(
        MockDetector::returning("en"),
        MockTranslator::working(),
        MockClassifier::failing(),
    )
    .await;

    let outcome = pipeline.process("my phone was stolen").await.unwrap();
    assert_eq!(outcome, PipelineOutcome::NoMatch);
}

#[tokio::test]
async fn test_process_withScoresAroundThreshold_shouldFilterInclusively() {
    let pipeline = build_pipeline(
        MockDetector::returning("en"),
        MockTranslator::working(),
        MockClassifier::with_scores(vec![
            ("theft", 0.10),
            ("assault", 0.099999),
            ("robbery", 0.3),
        ]),
    )
    .await;

    let outcome = pipeline.process("chain snatching on the street").await.unwrap();
    let payload = match outcome {
        PipelineOutcome::Matched(payload) => payload,
        PipelineOutcome::NoMatch => panic!("expected a match"),
    };

    // 0.10 is included, 0.099999 is not; classifier order is preserved
    assert_eq!(payload.matched_categories, vec!["theft", "robbery"]);
}

#[tokio::test]
async fn test_process_withAllScoresBelowThreshold_shouldReturnNoMatch() {
    let pipeline = build_pipeline(
        MockDetector::returning("en"),
        MockTranslator::working(),
        MockClassifier::with_scores(vec![("theft", 0.05), ("assault", 0.01)]),
    )
    .await;

    let outcome = pipeline.process("nothing much happened today").await.unwrap();
    assert_eq!(outcome, PipelineOutcome::NoMatch);
}

#[tokio::test]
async fn test_process_withTwoMatches_shouldResolveOneRecordPerLabel() {
    let pipeline = build_pipeline(
        MockDetector::returning("en"),
        MockTranslator::working(),
        MockClassifier::with_scores(vec![
            ("theft", 0.82),
            ("assault", 0.05),
            ("robbery", 0.31),
        ]),
    )
    .await;

    let outcome = pipeline.process("chain snatching on the street").await.unwrap();
    let payload = match outcome {
        PipelineOutcome::Matched(payload) => payload,
        PipelineOutcome::NoMatch => panic!("expected a match"),
    };

    assert_eq!(payload.original_language, "en");
    assert_eq!(payload.matched_categories, vec!["theft", "robbery"]);
    assert_eq!(payload.sections.len(), 2);
    assert_eq!(payload.sections[0].category, "theft");
    assert_eq!(payload.sections[1].category, "robbery");
}

#[tokio::test]
async fn test_process_withDuplicateMatchedLabel_shouldNotDeduplicate() {
    // A label surviving the threshold twice resolves twice
    let pipeline = build_pipeline(
        MockDetector::returning("en"),
        MockTranslator::working(),
        MockClassifier::with_scores(vec![("theft", 0.8), ("theft", 0.2)]),
    )
    .await;

    let outcome = pipeline.process("repeated label case").await.unwrap();
    let payload = match outcome {
        PipelineOutcome::Matched(payload) => payload,
        PipelineOutcome::NoMatch => panic!("expected a match"),
    };

    assert_eq!(payload.matched_categories, vec!["theft", "theft"]);
    assert_eq!(payload.sections.len(), 2);
    assert_eq!(payload.sections[0], payload.sections[1]);
}

#[tokio::test]
async fn test_process_withHindiInput_shouldTranslateAllRecordFields() {
    let pipeline = build_pipeline(
        MockDetector::returning("hi"),
        MockTranslator::working(),
        MockClassifier::with_scores(vec![("theft", 0.9)]),
    )
    .await;

    let outcome = pipeline.process("मेरा फोन छीन लिया गया").await.unwrap();
    let payload = match outcome {
        PipelineOutcome::Matched(payload) => payload,
        PipelineOutcome::NoMatch => panic!("expected a match"),
    };

    let marker = MockTranslator::marker("en", "hi");
    let section = &payload.sections[0];
    assert!(section.title.ends_with(&marker));
    assert!(section.description.ends_with(&marker));
    assert!(section.punishment.ends_with(&marker));
    assert!(section.bail_type.ends_with(&marker));
    assert!(section.bail_time_limit.ends_with(&marker));
    // The lookup key is never translated
    assert_eq!(section.category, "theft");
}

#[tokio::test]
async fn test_process_withOneFieldFailingTranslation_shouldKeepThatFieldEnglish() {
    let pipeline = build_pipeline(
        MockDetector::returning("hi"),
        MockTranslator::failing_on(vec!["Description of Section 379".to_string()]),
        MockClassifier::with_scores(vec![("theft", 0.9)]),
    )
    .await;

    let outcome = pipeline.process("मेरा फोन छीन लिया गया").await.unwrap();
    let payload = match outcome {
        PipelineOutcome::Matched(payload) => payload,
        PipelineOutcome::NoMatch => panic!("expected a match"),
    };

    let marker = MockTranslator::marker("en", "hi");
    let section = &payload.sections[0];
    // The failed field falls back to English, siblings are translated
    assert_eq!(section.description, "Description of Section 379");
    assert!(section.title.ends_with(&marker));
    assert!(section.punishment.ends_with(&marker));
    assert!(section.bail_type.ends_with(&marker));
    assert!(section.bail_time_limit.ends_with(&marker));
}

#[tokio::test]
async fn test_process_withMatchedLabelButNoRecords_shouldReturnEmptySections() {
    // "robbery" resolves, a label with no stored records contributes nothing
    let pipeline = build_pipeline(
        MockDetector::returning("en"),
        MockTranslator::working(),
        MockClassifier::with_scores(vec![("arson", 0.9)]),
    )
    .await;

    let outcome = pipeline.process("the barn was set on fire").await.unwrap();
    let payload = match outcome {
        PipelineOutcome::Matched(payload) => payload,
        PipelineOutcome::NoMatch => panic!("expected a match"),
    };

    assert_eq!(payload.matched_categories, vec!["arson"]);
    assert!(payload.sections.is_empty());
}
