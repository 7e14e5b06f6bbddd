use std::borrow::Cow;

use jobboard_client::ClientError;
use jobboard_types::ErrorCode;

use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Inline feedback a screen shows next to the form or list it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    // Client-side validation; no request was sent.
    Invalid(ValidationError),
    ResumeRequired,
    ResumeMustBePdf,
    ApplyOnlyForJobseekers,

    // Collaborator rejections, matched on the structured error code.
    InvalidCredentials,
    EmailTaken,
    AlreadyApplied,
    JobHasApplications,
    JobEditBlocked,
    SessionExpired,

    // Generic failures.
    LoadFailed,
    RegistrationFailed,
    CreateJobFailed,
    UpdateJobFailed,
    DeleteJobFailed,
    ApplyFailed,
    DeleteApplicationFailed,
    StatusUpdateFailed,
    SubscribeFailed,
    UnsubscribeFailed,
    ProfileLoadFailed,
    ProfileSaveFailed,

    // Confirmations.
    Applied,
    JobCreated,
    JobUpdated,
    ProfileSaved,
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Applied | Self::JobCreated | Self::JobUpdated | Self::ProfileSaved => Severity::Success,
            _ => Severity::Error,
        }
    }

    pub fn message(&self) -> Cow<'static, str> {
        let text = match self {
            Self::Invalid(err) => return Cow::Owned(err.to_string()),
            Self::ResumeRequired => "Attach your resume as a PDF file",
            Self::ResumeMustBePdf => "Please choose a file in PDF format",
            Self::ApplyOnlyForJobseekers => "Only job seekers can apply for jobs",
            Self::InvalidCredentials => "Invalid credentials",
            Self::EmailTaken => "An account with this email already exists",
            Self::AlreadyApplied => "You have already applied to this job",
            Self::JobHasApplications => "A job that already has applications cannot be deleted",
            Self::JobEditBlocked => "A job that already has applications cannot be changed",
            Self::SessionExpired => "Your session has expired, please sign in again",
            Self::LoadFailed => "Could not load the list. Try again",
            Self::RegistrationFailed => "Registration failed",
            Self::CreateJobFailed => "Failed to create job vacancy. Please try again",
            Self::UpdateJobFailed => "Failed to update the job",
            Self::DeleteJobFailed => "Failed to delete the job",
            Self::ApplyFailed => "Failed to submit application",
            Self::DeleteApplicationFailed => "Failed to withdraw the application",
            Self::StatusUpdateFailed => "Failed to update the application status",
            Self::SubscribeFailed => "Failed to subscribe to notifications",
            Self::UnsubscribeFailed => "Failed to unsubscribe from notifications",
            Self::ProfileLoadFailed => "Failed to load profile data",
            Self::ProfileSaveFailed => "Failed to update profile",
            Self::Applied => "Your application has been sent",
            Self::JobCreated => "Job vacancy created",
            Self::JobUpdated => "Job updated",
            Self::ProfileSaved => "Profile updated",
        };
        Cow::Borrowed(text)
    }

    /// Map a failed request to a notice. Codes with a dedicated notice win;
    /// everything else becomes `fallback`.
    pub fn from_error(err: &ClientError, fallback: Notice) -> Notice {
        match err.code() {
            Some(ErrorCode::InvalidCredentials) => Self::InvalidCredentials,
            Some(ErrorCode::AlreadyApplied) => Self::AlreadyApplied,
            Some(ErrorCode::Unauthorized) => Self::SessionExpired,
            _ => fallback,
        }
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}
