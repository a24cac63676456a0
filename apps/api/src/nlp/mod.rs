// Rule-based text processing: normalization, entity and section extraction,
// token similarity. No LLM calls anywhere in this module.

pub mod entities;
pub mod handlers;
pub mod normalize;
pub mod sections;
pub mod similarity;
pub mod vocabulary;
