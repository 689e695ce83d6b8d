/*!
 * Multilingual glossary maintenance.
 *
 * This module provides:
 * - Aggregate grouping and ordering of glossary entries
 * - Language discovery from supported language pairs
 * - Staleness detection for remote glossaries
 * - The request-scoped glossary service
 */

pub mod aggregate;
pub mod languages;
pub mod models;
pub mod service;
pub mod staleness;

// Re-export main types
pub use aggregate::{build_listing, AggregateSorter};
pub use languages::extract_languages;
pub use models::{
    AggregateListing, CreateAggregateRequest, DeleteAggregateRequest, GlossaryAggregate,
    GlossaryOverview, GlossaryStatus, MutationResponse, UpdateAggregateRequest,
};
pub use service::GlossaryService;
pub use staleness::StalenessEvaluator;
