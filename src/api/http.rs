use crate::api::{ApiError, BookApi};
use crate::book::{Book, BookId};
use crate::config;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const BOOKS_PATH: &str = "books";
const UPDATE_PATH: &str = "update";
const CREATE_PATH: &str = "create";

/// reqwest 블로킹 클라이언트 기반의 도서 API 구현체
///
/// 저장된 토큰이 있다면 모든 요청에 `Authorization: Bearer` 헤더로 첨부한다.
pub struct HttpClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(api: &config::Api, token: Option<String>) -> Result<Self, ApiError> {
        let base = Url::parse(api.base_url())
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", api.base_url(), e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(api.base_url().to_owned()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout()))
            .build()
            .map_err(|e| ApiError::ClientBuildFailed(e.to_string()))?;

        Ok(Self { client, base, token })
    }

    /// 기본 주소 뒤에 경로 조각들을 붙이고 마지막에 `/`를 붙인다.
    ///
    /// `http://localhost:8000` + `["books", "3"]` => `http://localhost:8000/books/3/`
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus(status.as_u16()));
        }
        Ok(response)
    }
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text()
        .map_err(|e| ApiError::ResponseTextExtractionFailed(e.to_string()))?;

    serde_json::from_str::<T>(&text)
        .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
}

/// 목록 응답을 도서 단위로 해석한다.
/// 해석할 수 없는 도서(알 수 없는 장르 등)는 경고 로그를 남기고 목록에서 제외한다.
fn parse_book_list(records: Vec<serde_json::Value>) -> Vec<Book> {
    records.into_iter()
        .filter_map(|record| {
            let id = record.get("id").cloned();
            serde_json::from_value::<Book>(record)
                .inspect_err(|e| warn!("Skipped unreadable book: {:?} (Err ==> {})", id, e))
                .ok()
        })
        .collect()
}

impl BookApi for HttpClient {
    fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let url = self.endpoint(&[BOOKS_PATH])?;
        debug!("GET {}", url);

        let response = self.send(self.client.get(url))?;
        let records: Vec<serde_json::Value> = read_json(response)?;
        Ok(parse_book_list(records))
    }

    fn get_book(&self, id: &BookId) -> Result<Book, ApiError> {
        let url = self.endpoint(&[BOOKS_PATH, id.as_str()])?;
        debug!("GET {}", url);

        let response = self.send(self.client.get(url))?;
        read_json(response)
    }

    fn update_book(&self, id: &BookId, book: &Book) -> Result<(), ApiError> {
        let url = self.endpoint(&[BOOKS_PATH, id.as_str(), UPDATE_PATH])?;
        debug!("PUT {}", url);

        self.send(self.client.put(url).json(book))?;
        Ok(())
    }

    fn create_book(&self, book: &Book) -> Result<Book, ApiError> {
        let url = self.endpoint(&[BOOKS_PATH, CREATE_PATH])?;
        debug!("POST {}", url);

        let response = self.send(self.client.post(url).json(book))?;
        read_json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpClient {
        let api = config::Api::new(base_url, 1);
        HttpClient::new(&api, None).unwrap()
    }

    #[test]
    fn builds_endpoints_with_trailing_slash() {
        let client = client("http://localhost:8000");

        assert_eq!(client.endpoint(&["books"]).unwrap().as_str(), "http://localhost:8000/books/");
        assert_eq!(
            client.endpoint(&["books", "3", "update"]).unwrap().as_str(),
            "http://localhost:8000/books/3/update/"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let client = client("http://example.com/api/");

        assert_eq!(client.endpoint(&["books", "create"]).unwrap().as_str(), "http://example.com/api/books/create/");
    }

    #[test]
    fn skips_only_unreadable_books_in_list() {
        let records = serde_json::from_str::<Vec<serde_json::Value>>(r#"[
            {"id": 1, "book_name": "Emma", "genre": "Romance", "author": "Jane Austen"},
            {"id": 2, "book_name": "Odes", "genre": "Poetry", "author": "John Keats"},
            {"id": 3, "book_name": "Dune", "genre": "Science Fiction", "author": "Frank Herbert", "description": null}
        ]"#).unwrap();

        let books = parse_book_list(records);

        assert_eq!(books.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(), vec!["Emma", "Dune"]);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let api = config::Api::new("not a url", 1);
        assert!(matches!(HttpClient::new(&api, None), Err(ApiError::InvalidBaseUrl(_))));

        let api = config::Api::new("mailto:someone@example.com", 1);
        assert!(matches!(HttpClient::new(&api, None), Err(ApiError::InvalidBaseUrl(_))));
    }
}
