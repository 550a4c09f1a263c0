//! Remote-model collaborators.

pub mod openai;

pub use openai::{
    capability_catalog, classification_from_response, OpenAIClassifier, OpenAIFormatter,
    OpenAIRequestResolver, PathArgs, DEFAULT_MODEL,
};
