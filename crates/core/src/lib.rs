pub mod analyzer;
pub mod engine;
pub mod error;
pub mod extractors;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod noise;
pub mod parse;
pub mod record;
pub mod registry;
pub mod score;
pub mod structured;
pub mod text;
pub mod validate;

pub use analyzer::{ContentBlock, JobSignals, PageProfile, SemanticStructure, SiteCategory, analyze, analyze_with};
#[cfg(feature = "fetch")]
pub use engine::fetch_and_extract;
pub use engine::{EngineConfig, EngineConfigBuilder, JobExtractor, extract};
pub use error::{Result, SiftError};
pub use extractors::FieldSet;
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_file, fetch_frame, fetch_stdin, fetch_url};
pub use noise::{clean_text, is_noise, prune_html, prune_subtree};
pub use parse::{Document, Element};
pub use record::{
    COMPANY_FALLBACK, DESCRIPTION_FALLBACK, ExtractionMeta, FieldCandidate, FieldMethods, JobRecord, LOCATION_FALLBACK,
    Method, TITLE_FALLBACK,
};
pub use registry::{SiteProfile, SiteRegistry};
pub use score::{CompositeScore, QualityGrade, confidence_score, quality_score};
pub use structured::{JobPosting, has_job_posting};
pub use text::{FieldKind, FieldScore, normalize, score_field};
pub use validate::{Validation, validate};
