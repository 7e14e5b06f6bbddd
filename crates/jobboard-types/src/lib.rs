pub mod api;
pub mod error;
pub mod models;
pub mod status;

pub use error::{ErrorBody, ErrorCode};
pub use models::{
    Application, ApplicationId, CompanyId, EmployerId, EmployerProfile, JobId, JobPosting,
    JobseekerProfile, PrincipalKind, Skill, SkillId, UserId,
};
pub use status::{ApplicationStatus, StatusAction, StatusBadge, Tone};
