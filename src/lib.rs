/*!
 * # NyayaSetu - Legal complaint classification service
 *
 * A Rust service that classifies free-text legal complaints (English or
 * Hindi) against a fixed taxonomy of Indian Penal Code categories and
 * returns the matching section records, bilingually for Hindi input.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `taxonomy`: The fixed candidate label list for the classifier
 * - `pipeline`: The request pipeline orchestrating all collaborators
 * - `providers`: Clients for the external collaborators:
 *   - `providers::detector`: Language-detection service client
 *   - `providers::translator`: Translation service client
 *   - `providers::classifier`: Zero-shot classification service client
 * - `database`: SQLite-backed section store and repository
 * - `server`: HTTP boundary (`POST /api`)
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod server;
pub mod taxonomy;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{CategoryRecord, CategoryRepository};
pub use errors::{AppError, DetectionError, PipelineError, ProviderError, TranslationError};
pub use pipeline::{ClassifyRequest, PipelineOutcome, RequestPipeline, ResponsePayload};
pub use taxonomy::Taxonomy;
