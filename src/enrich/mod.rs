pub mod orchestrator;

pub use orchestrator::{
    build_summary, EnrichmentOrchestrator, BATCH_SIZE, MAX_WORKERS, NOT_CONFIGURED_FIX,
    NOT_CONFIGURED_PLACEHOLDER,
};
