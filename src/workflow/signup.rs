use crate::form::validate::validate_signup_form;
use crate::form::{FieldErrors, SignupField, SignupForm};
use crate::workflow::Banner;
use tracing::debug;

pub const SIGNUP_MESSAGE: &str = "Signup successful!";

/// 회원 가입 화면
///
/// 입력 값 검사만 수행하며 서버로 요청을 보내지 않는다.
#[derive(Default)]
pub struct SignupPage {
    form: SignupForm,
    errors: FieldErrors,
    banner: Option<Banner>,
}

impl SignupPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// 입력 값을 반영하고 해당 필드의 오류를 지운다.
    pub fn change(&mut self, field: SignupField, value: &str) {
        self.form.set(field, value);
        self.errors.remove(field.name());
    }

    /// 폼을 검사해 통과 여부를 반환한다.
    pub fn submit(&mut self) -> bool {
        self.banner = None;
        match validate_signup_form(&self.form) {
            Ok(()) => {
                self.errors.clear();
                self.banner = Some(Banner::success(SIGNUP_MESSAGE));
                true
            }
            Err(errors) => {
                debug!("signup rejected, {} invalid field(s)", errors.len());
                self.errors = errors;
                false
            }
        }
    }
}
