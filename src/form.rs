pub mod validate;

use crate::book::{Book, BookId, Genre};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// 필드 이름 별 오류 메시지
///
/// 필드 이름은 서버와 화면에서 사용하는 이름(`book_name`, `confirmPassword` 등)을 그대로 사용한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이미 오류가 있는 필드라면 먼저 기록된 오류를 유지한다.
    pub fn insert(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_owned());
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// 오류가 없으면 `Ok(())`, 있으면 자신을 `Err`로 감싸 반환한다.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (field, message) in self.iter() {
            writeln!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// 도서 폼의 입력 필드
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BookField {
    Name,
    Genre,
    Author,
    Year,
    Description,
    Price,
}

impl BookField {
    pub fn name(&self) -> &'static str {
        match self {
            BookField::Name => "book_name",
            BookField::Genre => "genre",
            BookField::Author => "author",
            BookField::Year => "year",
            BookField::Description => "description",
            BookField::Price => "price",
        }
    }
}

/// 입력 변경 처리 결과
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ChangeOutcome {
    Applied,

    /// 입력이 거부되어 폼이 변경되지 않음 (예: 미래의 출판 연도)
    Ignored,
}

/// 폼이 열려 있는 동안 유지되는 도서의 편집용 사본
///
/// 모든 값은 사용자가 입력한 문자열 그대로 보관하며 제출 시점에 [`BookForm::to_book`]으로 변환한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub book_name: String,
    pub genre: String,
    pub author: String,
    pub year: String,
    pub description: String,
    pub price: String,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            book_name: book.name.clone(),
            genre: book.genre.label().to_owned(),
            author: book.author.clone(),
            year: book.year.map(|y| y.to_string()).unwrap_or_default(),
            description: book.description.clone(),
            price: book.price.map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}

impl BookForm {
    pub fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Name => &self.book_name,
            BookField::Genre => &self.genre,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
            BookField::Description => &self.description,
            BookField::Price => &self.price,
        }
    }

    /// 입력 필드 하나의 변경을 반영한다.
    ///
    /// - 도서명, 저자, 설명은 앞뒤 공백을 제거해 저장한다.
    /// - 출판 연도가 `current_year`보다 큰 정수라면 입력을 무시한다.
    pub fn apply_change(&mut self, field: BookField, raw: &str, current_year: i32) -> ChangeOutcome {
        let value = match field {
            BookField::Name | BookField::Author | BookField::Description => raw.trim(),
            _ => raw,
        };

        if field == BookField::Year {
            if let Some(year) = validate::leading_year(value) {
                if year > i64::from(current_year) {
                    return ChangeOutcome::Ignored;
                }
            }
        }

        let slot = match field {
            BookField::Name => &mut self.book_name,
            BookField::Genre => &mut self.genre,
            BookField::Author => &mut self.author,
            BookField::Year => &mut self.year,
            BookField::Description => &mut self.description,
            BookField::Price => &mut self.price,
        };
        *slot = value.to_owned();
        ChangeOutcome::Applied
    }

    /// 장르와 숫자 필드를 변환해 서버로 보낼 도서를 만든다.
    pub fn to_book(&self, id: Option<BookId>) -> Result<Book, FieldErrors> {
        let mut errors = FieldErrors::new();

        let genre = self.genre.parse::<Genre>()
            .inspect_err(|_| errors.insert(BookField::Genre.name(), validate::INVALID_GENRE))
            .ok();
        let year = validate::parse_year(&self.year);
        if year.is_none() {
            errors.insert(BookField::Year.name(), validate::INVALID_YEAR);
        }
        let price = validate::parse_price(&self.price);
        if price.is_none() {
            errors.insert(BookField::Price.name(), validate::INVALID_PRICE);
        }

        match genre {
            Some(genre) if errors.is_empty() => Ok(Book {
                id,
                name: self.book_name.clone(),
                genre,
                author: self.author.clone(),
                year,
                description: self.description.clone(),
                price,
            }),
            _ => Err(errors),
        }
    }
}

/// 회원 가입 폼의 입력 필드
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SignupField {
    Name,
    Email,
    Address,
    Phone,
    Password,
    ConfirmPassword,
}

impl SignupField {
    pub fn name(&self) -> &'static str {
        match self {
            SignupField::Name => "name",
            SignupField::Email => "email",
            SignupField::Address => "address",
            SignupField::Phone => "phone",
            SignupField::Password => "password",
            SignupField::ConfirmPassword => "confirmPassword",
        }
    }
}

/// 회원 가입 폼
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn set(&mut self, field: SignupField, value: &str) {
        let slot = match field {
            SignupField::Name => &mut self.name,
            SignupField::Email => &mut self.email,
            SignupField::Address => &mut self.address,
            SignupField::Phone => &mut self.phone,
            SignupField::Password => &mut self.password,
            SignupField::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.to_owned();
    }
}
