mod normalize;
mod params;
mod scorer;
mod transform;

pub use normalize::{aggregate, department_scores, min_max_normalize};
pub use params::ScorerParams;
pub use scorer::GraphScorer;
pub use transform::{Linear, Transform};
