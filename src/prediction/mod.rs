//! Disease forms, classifier loading and prediction dispatch.

pub mod classifier;
pub mod disease;
pub mod dispatcher;
pub mod handlers;
pub mod registry;

pub use classifier::{Classifier, ModelArtifact};
pub use disease::{Disease, FieldSpec};
pub use dispatcher::{FormDispatcher, Prediction};
pub use registry::ModelRegistry;
