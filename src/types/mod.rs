mod attribute;
mod department;
mod priority;
mod scores;

pub use attribute::SituationAttribute;
pub use department::Department;
pub use priority::Priority;
pub use scores::DepartmentScoreMap;
