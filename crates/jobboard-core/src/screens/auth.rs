use tracing::{info, warn};

use jobboard_client::{AccessToken, ClientError, Gateway};
use jobboard_types::api::{LoginRequest, RegisterEmployerRequest, RegisterJobseekerRequest, SkillInput};
use jobboard_types::{ErrorCode, PrincipalKind};

use crate::Redirect;
use crate::notice::Notice;
use crate::session::{Principal, SessionAction, SessionStorage, SessionStore};
use crate::validation::{self, ValidationError};

pub struct LoginScreen {
    pub kind: PrincipalKind,
    pub email: String,
    pub password: String,
    notice: Option<Notice>,
    submitting: bool,
}

impl LoginScreen {
    pub fn new(kind: PrincipalKind) -> Self {
        Self {
            kind,
            email: String::new(),
            password: String::new(),
            notice: None,
            submitting: false,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn request(&self) -> Result<LoginRequest, ValidationError> {
        let email = validation::required("email", &self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        Ok(LoginRequest { email, password: self.password.clone() })
    }

    /// Sign in and store the session. Returns where to go on success.
    pub async fn submit<G: Gateway, S: SessionStorage>(
        &mut self,
        gateway: &G,
        store: &mut SessionStore<S>,
    ) -> Option<Redirect> {
        self.notice = None;
        let request = match self.request() {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e.into());
                return None;
            }
        };

        self.submitting = true;
        let result = gateway.login(self.kind, &request).await;
        self.submitting = false;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(kind = %self.kind, error = %e, "login failed");
                self.notice = Some(login_notice(&e));
                return None;
            }
        };

        let token = AccessToken::new(response.access_token);
        if token.is_blank() {
            warn!(kind = %self.kind, "login response carried no token");
            self.notice = Some(Notice::InvalidCredentials);
            return None;
        }
        let principal = match self.kind {
            PrincipalKind::Jobseeker => Principal::Jobseeker(response.user),
            PrincipalKind::Employer => Principal::Employer(response.employer),
        };
        store.dispatch(SessionAction::LoggedIn { token, principal });
        self.password.clear();
        Some(Redirect::JobList)
    }
}

/// A rejected sign-in always reads as bad credentials, including a bare 401
/// without an error body.
fn login_notice(err: &ClientError) -> Notice {
    match err.code() {
        Some(ErrorCode::InvalidCredentials | ErrorCode::Unauthorized) => Notice::InvalidCredentials,
        _ => Notice::from_error(err, Notice::InvalidCredentials),
    }
}

/// Text inputs of the jobseeker sign-up form.
#[derive(Debug, Clone, Default)]
pub struct JobseekerRegistration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub location: String,
    pub desired_industry: String,
    pub desired_job_title: String,
    pub desired_salary_min: String,
    pub desired_salary_max: String,
    pub experience: String,
    pub skills: Vec<SkillInput>,
    pub skills_description: String,
    pub telegram_id: String,
}

impl JobseekerRegistration {
    pub fn validate(&self) -> Result<RegisterJobseekerRequest, ValidationError> {
        let desired_salary_min = validation::required_amount("desired_salary_min", &self.desired_salary_min)?;
        let desired_salary_max = validation::required_amount("desired_salary_max", &self.desired_salary_max)?;
        validation::salary_range(Some(desired_salary_min), Some(desired_salary_max))?;
        Ok(RegisterJobseekerRequest {
            email: validation::email(&self.email)?,
            password: validation::password(&self.password)?,
            full_name: validation::required("full_name", &self.full_name)?,
            location: validation::required("location", &self.location)?,
            desired_industry: validation::required("desired_industry", &self.desired_industry)?,
            desired_job_title: validation::required("desired_job_title", &self.desired_job_title)?,
            desired_salary_min,
            desired_salary_max,
            experience: validation::optional(&self.experience),
            skills: self
                .skills
                .iter()
                .filter(|s| !s.name.trim().is_empty())
                .map(|s| SkillInput { name: s.name.trim().to_string(), years_of_experience: s.years_of_experience })
                .collect(),
            skills_description: validation::optional(&self.skills_description),
            telegram_id: validation::required("telegram_id", &self.telegram_id)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmployerRegistration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub company_name: String,
    pub company_industry: String,
    pub company_location: String,
}

impl EmployerRegistration {
    pub fn validate(&self) -> Result<RegisterEmployerRequest, ValidationError> {
        Ok(RegisterEmployerRequest {
            email: validation::email(&self.email)?,
            password: validation::password(&self.password)?,
            full_name: validation::required("full_name", &self.full_name)?,
            company_name: validation::required("company_name", &self.company_name)?,
            company_industry: validation::required("company_industry", &self.company_industry)?,
            company_location: validation::required("company_location", &self.company_location)?,
        })
    }
}

/// Sign-up for either kind of account. A new account still has to sign in.
#[derive(Debug, Default)]
pub struct RegisterScreen {
    notice: Option<Notice>,
    submitting: bool,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn register_jobseeker<G: Gateway>(
        &mut self,
        gateway: &G,
        form: &JobseekerRegistration,
    ) -> Option<Redirect> {
        self.notice = None;
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e.into());
                return None;
            }
        };
        self.submitting = true;
        let result = gateway.register_jobseeker(&request).await;
        self.submitting = false;
        self.finish(PrincipalKind::Jobseeker, result.map(drop))
    }

    pub async fn register_employer<G: Gateway>(
        &mut self,
        gateway: &G,
        form: &EmployerRegistration,
    ) -> Option<Redirect> {
        self.notice = None;
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e.into());
                return None;
            }
        };
        self.submitting = true;
        let result = gateway.register_employer(&request).await;
        self.submitting = false;
        self.finish(PrincipalKind::Employer, result.map(drop))
    }

    fn finish(&mut self, kind: PrincipalKind, result: jobboard_client::Result<()>) -> Option<Redirect> {
        match result {
            Ok(()) => {
                info!(%kind, "account registered");
                Some(Redirect::Login)
            }
            Err(e) => {
                warn!(%kind, error = %e, "registration failed");
                self.notice = Some(if e.is(ErrorCode::Conflict) {
                    Notice::EmailTaken
                } else {
                    Notice::from_error(&e, Notice::RegistrationFailed)
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_401_on_login_is_bad_credentials() {
        let err = ClientError::from_response(401, br#"{"detail":"Incorrect email or password"}"#);
        assert_eq!(login_notice(&err), Notice::InvalidCredentials);
        let err = ClientError::from_response(500, b"boom");
        assert_eq!(login_notice(&err), Notice::InvalidCredentials);
    }

    fn jobseeker_form() -> JobseekerRegistration {
        JobseekerRegistration {
            email: "ann@example.com".into(),
            password: "secret1".into(),
            full_name: "Ann".into(),
            location: "Berlin".into(),
            desired_industry: "IT".into(),
            desired_job_title: "Engineer".into(),
            desired_salary_min: "1000".into(),
            desired_salary_max: "2000".into(),
            telegram_id: "@ann".into(),
            ..Default::default()
        }
    }

    #[test]
    fn jobseeker_form_validates() {
        let request = jobseeker_form().validate().unwrap();
        assert_eq!(request.desired_salary_max, 2000);
        assert!(request.experience.is_none());
    }

    #[test]
    fn jobseeker_salary_bounds_must_be_ordered() {
        let mut form = jobseeker_form();
        form.desired_salary_min = "3000".into();
        assert_eq!(form.validate().unwrap_err(), ValidationError::SalaryRange);
    }

    #[test]
    fn employer_form_requires_company() {
        let form = EmployerRegistration {
            email: "boss@example.com".into(),
            password: "secret1".into(),
            full_name: "Boss".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::Required("company_name"));
    }

    #[test]
    fn login_only_needs_non_blank_fields() {
        let mut screen = LoginScreen::new(PrincipalKind::Jobseeker);
        screen.email = "ann@example.com".into();
        screen.password = "x".into();
        assert!(screen.request().is_ok());
        screen.password.clear();
        assert_eq!(screen.request().unwrap_err(), ValidationError::Required("password"));
    }
}
