use crate::api::http::HttpClient;
use crate::api::ApiError;
use crate::auth::{FileTokenStore, StoreError};
use crate::book::BookError;
use crate::config::log::LogError;
use crate::config::AppConfig;
use std::fmt;
use std::fmt::Formatter;

pub mod api;
pub mod auth;
pub mod book;
pub mod config;
pub mod dashboard;
pub mod form;
pub mod nav;
pub mod workflow;

/// 프로그램 실행 중 발생할 수 있는 에러를 모은 열거
#[derive(Debug)]
pub enum Error {
    Config(::config::ConfigError),
    Log(LogError),
    Api(ApiError),
    Store(StoreError),
    InvalidArgument(BookError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Cannot load config: {}", e),
            Error::Log(e) => write!(f, "{}", e),
            Error::Api(e) => write!(f, "{}", e),
            Error::Store(e) => write!(f, "{}", e),
            Error::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<LogError> for Error {
    fn from(e: LogError) -> Self {
        Error::Log(e)
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

impl From<BookError> for Error {
    fn from(e: BookError) -> Self {
        Error::InvalidArgument(e)
    }
}

/// 설정된 경로의 토큰 저장소를 연다.
pub fn open_token_store(config: &AppConfig) -> FileTokenStore {
    FileTokenStore::new(config.auth().storage())
}

/// 저장된 로그인 토큰을 첨부하는 API 클라이언트를 만든다.
pub fn create_client(config: &AppConfig, store: &FileTokenStore) -> Result<HttpClient, Error> {
    let token = auth::access_token(store)?;
    Ok(HttpClient::new(config.api(), token)?)
}
