/// OpenAPI documentation generation.
pub mod documentation;
/// Score ingest and ranking queries.
pub mod score_service;
/// Background schema bootstrap with retry.
pub mod schema_supervisor;
