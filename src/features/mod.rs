mod attributes;
mod extract;

pub use attributes::AttributeSet;
pub use extract::FeatureExtractor;
