mod genre;

pub use genre::Genre;

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Book 모듈에서 사용할 에러 열거
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// 알 수 없는 장르 라벨
    UnknownGenre(String),

    /// 사용할 수 없는 도서 아이디
    InvalidId(String),
}

impl Display for BookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BookError::UnknownGenre(s) => write!(f, "Unknown genre: {}", s),
            BookError::InvalidId(s) => write!(f, "Invalid book id: {:?}", s),
        }
    }
}

impl std::error::Error for BookError {}

/// 서버에서 부여한 도서 아이디
///
/// 서버는 아이디를 숫자 혹은 문자열로 내려줄 수 있으므로 두 형태 모두 문자열로 보관한다.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BookId(String);

impl BookId {
    /// URL 경로 조각으로 사용할 수 있는 아이디만 허용한다.
    /// `.`과 `..`은 URL에서 경로 이동으로 해석되므로 허용하지 않는다.
    pub fn parse(s: &str) -> Result<Self, BookError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.contains('/') || trimmed == "." || trimmed == ".." {
            return Err(BookError::InvalidId(s.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(BookId(n.to_string())),
            Raw::Text(s) => BookId::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// 서버에서 관리되는 도서
///
/// `year`와 `price`는 서버 응답에 따라 숫자 혹은 숫자 문자열로 내려오므로 두 형태 모두 받는다.
/// 서버로 보낼 때는 항상 숫자로 직렬화 되며, 아이디는 요청 경로에 포함 되므로 본문에서 제외한다.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, skip_serializing)]
    pub id: Option<BookId>,

    #[serde(rename = "book_name")]
    pub name: String,

    pub genre: Genre,

    pub author: String,

    /// 출판 연도로 현재 연도보다 클 수 없다.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub year: Option<i32>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub price: Option<f64>,
}

const NOT_AVAILABLE: &str = "N/A";

impl Book {
    /// 목록과 상세 화면에서 사용하는 출판 연도 표기
    pub fn display_year(&self) -> String {
        self.year
            .map(|year| year.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
    }

    /// 목록과 상세 화면에서 사용하는 가격 표기로 가격이 없거나 0인 경우 `N/A`로 표시한다.
    pub fn display_price(&self) -> String {
        match self.price {
            Some(price) if price != 0.0 && price.is_finite() => format!("${}", price),
            _ => NOT_AVAILABLE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Book {
        Book {
            id: Some(BookId::parse("7").unwrap()),
            name: "Dune".to_owned(),
            genre: Genre::ScienceFiction,
            author: "Frank Herbert".to_owned(),
            year: Some(1965),
            description: "Spice".to_owned(),
            price: Some(12.5),
        }
    }

    #[test]
    fn deserializes_numbers_given_as_strings() {
        let json = r#"{
            "id": 3,
            "book_name": "Emma",
            "genre": "Romance",
            "author": "Jane Austen",
            "year": "1815",
            "description": "Matchmaking",
            "price": "9.99"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();

        assert_eq!(book.id, Some(BookId::parse("3").unwrap()));
        assert_eq!(book.year, Some(1815));
        assert_eq!(book.price, Some(9.99));
        assert_eq!(book.genre, Genre::Romance);
    }

    #[test]
    fn missing_optional_fields_default_to_none() {
        let json = r#"{"id": "a1", "book_name": "Emma", "genre": "Romance", "author": "Jane Austen"}"#;
        let book: Book = serde_json::from_str(json).unwrap();

        assert_eq!(book.year, None);
        assert_eq!(book.price, None);
        assert_eq!(book.description, "");
    }

    #[test]
    fn serializes_wire_names_without_id() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["book_name"], "Dune");
        assert_eq!(value["genre"], "Science Fiction");
        assert_eq!(value["year"], 1965);
        assert_eq!(value["price"], 12.5);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn displays_missing_or_zero_values_as_not_available() {
        let mut book = sample();
        assert_eq!(book.display_year(), "1965");
        assert_eq!(book.display_price(), "$12.5");

        book.year = None;
        book.price = Some(0.0);
        assert_eq!(book.display_year(), "N/A");
        assert_eq!(book.display_price(), "N/A");

        book.price = Some(20.0);
        assert_eq!(book.display_price(), "$20");

        book.price = Some(f64::NAN);
        assert_eq!(book.display_price(), "N/A");
    }

    #[test]
    fn not_a_number_price_from_server_is_not_displayed() {
        let json = r#"{"book_name": "Emma", "genre": "Romance", "author": "Jane Austen", "price": "NaN"}"#;
        let book: Book = serde_json::from_str(json).unwrap();

        assert_eq!(book.display_price(), "N/A");
    }

    #[test]
    fn null_description_becomes_empty() {
        let json = r#"{"book_name": "Emma", "genre": "Romance", "author": "Jane Austen", "description": null}"#;
        let book: Book = serde_json::from_str(json).unwrap();

        assert_eq!(book.description, "");
    }

    #[test]
    fn rejects_ids_that_cannot_be_path_segments() {
        assert!(BookId::parse("").is_err());
        assert!(BookId::parse("  ").is_err());
        assert!(BookId::parse("1/2").is_err());
        assert!(BookId::parse(".").is_err());
        assert!(BookId::parse(" .. ").is_err());
        assert!(BookId::parse("1.5").is_ok());
        assert_eq!(BookId::parse(" 42 ").unwrap().as_str(), "42");
    }
}
