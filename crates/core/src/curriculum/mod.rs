mod types;

pub use types::{AcademicDegree, Institution, Profession, Study, StudyType, WorkExperience};
