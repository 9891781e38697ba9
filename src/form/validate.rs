use crate::book::Genre;
use crate::form::{BookField, BookForm, FieldErrors, SignupField, SignupForm};
use regex::Regex;
use std::sync::LazyLock;

pub(crate) const INVALID_GENRE: &str = "Select a valid genre";
pub(crate) const INVALID_YEAR: &str = "Year must be a valid number";
pub(crate) const INVALID_PRICE: &str = "Price must be a valid number";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

const NAME_MIN_LEN: usize = 6;
const NAME_MAX_LEN: usize = 20;
const PASSWORD_MIN_LEN: usize = 6;

pub(crate) fn parse_year(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}

/// 입력 중인 연도 값에서 앞쪽의 정수 부분만 읽는다.
///
/// `"2030.5"`는 2030, `"1999abc"`는 1999로 읽으며 범위를 넘는 값은 최대/최소값으로 고정한다.
/// 숫자로 시작하지 않으면 `None`을 반환한다.
pub(crate) fn leading_year(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

pub(crate) fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// 회원 가입 폼을 검사한다.
///
/// 필드 별로 처음 실패한 규칙의 메시지만 기록된다.
///
/// # Example
/// ```
/// use book_heaven::form::SignupForm;
/// use book_heaven::form::validate::validate_signup_form;
///
/// let form = SignupForm {
///     name: "reader01".to_owned(),
///     email: "reader@example.com".to_owned(),
///     address: "221B Baker Street".to_owned(),
///     phone: "0123456789".to_owned(),
///     password: "secret1".to_owned(),
///     confirm_password: "secret1".to_owned(),
/// };
/// assert!(validate_signup_form(&form).is_ok());
/// ```
pub fn validate_signup_form(form: &SignupForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name_len = form.name.chars().count();
    if is_blank(&form.name) {
        errors.insert(SignupField::Name.name(), "Name is required");
    } else if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name_len) {
        errors.insert(SignupField::Name.name(), "Name must be 6 to 20 characters long");
    }

    if is_blank(&form.email) {
        errors.insert(SignupField::Email.name(), "Email is required");
    } else if !EMAIL_PATTERN.is_match(&form.email) {
        errors.insert(SignupField::Email.name(), "Invalid email format");
    }

    if is_blank(&form.address) {
        errors.insert(SignupField::Address.name(), "Address is required");
    }

    if is_blank(&form.phone) {
        errors.insert(SignupField::Phone.name(), "Phone number is required");
    } else if !PHONE_PATTERN.is_match(&form.phone) {
        errors.insert(SignupField::Phone.name(), "Enter a valid 10-digit phone number");
    }

    if form.password.is_empty() {
        errors.insert(SignupField::Password.name(), "Password is required");
    } else if form.password.chars().count() < PASSWORD_MIN_LEN {
        errors.insert(SignupField::Password.name(), "Password must be at least 6 characters long");
    }

    if form.confirm_password.is_empty() {
        errors.insert(SignupField::ConfirmPassword.name(), "Please confirm your password");
    } else if form.confirm_password != form.password {
        errors.insert(SignupField::ConfirmPassword.name(), "Passwords do not match");
    }

    errors.into_result()
}

/// 도서 폼을 검사한다.
///
/// `current_year`는 출판 연도의 상한으로 호출하는 쪽에서 전달한다.
pub fn validate_book_form(form: &BookForm, current_year: i32) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if is_blank(&form.book_name) {
        errors.insert(BookField::Name.name(), "Book name is required");
    }

    if is_blank(&form.genre) {
        errors.insert(BookField::Genre.name(), "Genre is required");
    } else if form.genre.parse::<Genre>().is_err() {
        errors.insert(BookField::Genre.name(), INVALID_GENRE);
    }

    if is_blank(&form.author) {
        errors.insert(BookField::Author.name(), "Author is required");
    }

    if is_blank(&form.year) {
        errors.insert(BookField::Year.name(), "Year is required");
    } else {
        match parse_year(&form.year) {
            None => errors.insert(BookField::Year.name(), INVALID_YEAR),
            Some(year) if year > current_year => {
                errors.insert(BookField::Year.name(), "Year cannot be in the future")
            }
            Some(year) if year <= 0 => errors.insert(BookField::Year.name(), "Year must be a positive number"),
            Some(_) => {}
        }
    }

    if is_blank(&form.description) {
        errors.insert(BookField::Description.name(), "Description is required");
    }

    if is_blank(&form.price) {
        errors.insert(BookField::Price.name(), "Price is required");
    } else {
        match parse_price(&form.price) {
            None => errors.insert(BookField::Price.name(), INVALID_PRICE),
            Some(price) if price <= 0.0 => errors.insert(BookField::Price.name(), "Price must be greater than 0"),
            Some(_) => {}
        }
    }

    errors.into_result()
}
