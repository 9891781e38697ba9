use crate::book::{Book, BookId};
use std::fmt;
use std::fmt::{Display, Formatter};

pub mod http;

/// 도서 API 호출 중 발생한 에러 열거
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 설정된 API 주소를 URL로 해석할 수 없음
    InvalidBaseUrl(String),

    /// HTTP 클라이언트 생성 실패
    ClientBuildFailed(String),

    /// 요청 전송 실패 (연결 실패, 타임아웃 등)
    RequestFailed(String),

    /// 서버가 성공이 아닌 상태 코드로 응답함
    UnexpectedStatus(u16),

    /// 응답 본문을 읽지 못함
    ResponseTextExtractionFailed(String),

    /// 응답 본문을 해석하지 못함
    ResponseParseFailed(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidBaseUrl(s) => write!(f, "Invalid base url: {}", s),
            ApiError::ClientBuildFailed(s) => write!(f, "Failed to build http client: {}", s),
            ApiError::RequestFailed(s) => write!(f, "Request failed: {}", s),
            ApiError::UnexpectedStatus(status) => write!(f, "Unexpected status: {}", status),
            ApiError::ResponseTextExtractionFailed(s) => write!(f, "Failed to read response: {}", s),
            ApiError::ResponseParseFailed(s) => write!(f, "Failed to parse response: {}", s),
        }
    }
}

impl std::error::Error for ApiError {}

/// 도서 REST API
///
/// 요청은 한번만 시도하며 실패 시 재시도 하지 않는다.
pub trait BookApi {
    /// `GET /books/`
    fn list_books(&self) -> Result<Vec<Book>, ApiError>;

    /// `GET /books/{id}/`
    fn get_book(&self, id: &BookId) -> Result<Book, ApiError>;

    /// `PUT /books/{id}/update/`
    fn update_book(&self, id: &BookId, book: &Book) -> Result<(), ApiError>;

    /// `POST /books/create/`
    fn create_book(&self, book: &Book) -> Result<Book, ApiError>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::cell::RefCell;

    /// 호출을 기록하고 미리 정해진 결과를 돌려주는 테스트용 API
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub books: Vec<Book>,
        pub fail_reads: bool,
        pub fail_writes: bool,
        pub updates: RefCell<Vec<(BookId, Book)>>,
        pub created: RefCell<Vec<Book>>,
    }

    impl BookApi for FakeApi {
        fn list_books(&self) -> Result<Vec<Book>, ApiError> {
            if self.fail_reads {
                return Err(ApiError::RequestFailed("connection refused".to_owned()));
            }
            Ok(self.books.clone())
        }

        fn get_book(&self, id: &BookId) -> Result<Book, ApiError> {
            if self.fail_reads {
                return Err(ApiError::RequestFailed("connection refused".to_owned()));
            }
            self.books.iter()
                .find(|book| book.id.as_ref() == Some(id))
                .cloned()
                .ok_or(ApiError::UnexpectedStatus(404))
        }

        fn update_book(&self, id: &BookId, book: &Book) -> Result<(), ApiError> {
            if self.fail_writes {
                return Err(ApiError::UnexpectedStatus(500));
            }
            self.updates.borrow_mut().push((id.clone(), book.clone()));
            Ok(())
        }

        fn create_book(&self, book: &Book) -> Result<Book, ApiError> {
            if self.fail_writes {
                return Err(ApiError::UnexpectedStatus(500));
            }
            let mut created = book.clone();
            created.id = BookId::parse(&(self.created.borrow().len() + 100).to_string()).ok();
            self.created.borrow_mut().push(created.clone());
            Ok(created)
        }
    }
}
