//! Model seam: capability traits for fitted and trainable classifiers, the
//! majority-class baseline, and the preprocessor+classifier pipeline.
pub mod classifier_trait;
pub mod majority;
pub mod pipeline;

pub use classifier_trait::{ClassifierModel, FittedModel};
pub use majority::MajorityClassClassifier;
pub use pipeline::Pipeline;
