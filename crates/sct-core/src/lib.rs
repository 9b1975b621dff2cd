pub mod archive;
pub mod error;
pub mod extract;
pub mod limits;
pub mod macro_vars;
pub mod request;
pub mod template;
pub mod translate;
pub mod variant;

// Convenience re-exports
pub use archive::ScoreArchive;
pub use error::{ErrorKind, TranslateError, TranslateResult};
pub use limits::{ArchiveLimits, ArchiveLimitsOverrides};
pub use request::{AuxTable, CopyVars, ResolvedRequest, TranslationRequest};
pub use translate::{
    ds_translate, eps_translate, nlp_category_translate, nlp_concepts_translate,
    nlp_sentiment_translate, nlp_topics_translate, render, translate, write_artifact,
    RenderedArtifact,
};
pub use variant::{Variant, VariantSpec};
