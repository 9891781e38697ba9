pub mod log;

use serde::Deserialize;
use std::env;

const DEFAULT_RUN_MODE: &str = "development";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECONDS: i64 = 10;
const DEFAULT_STORAGE: &str = ".book-heaven/storage.json";

/// 도서 API 설정
#[derive(Debug, Deserialize)]
pub struct Api {
    /// API 서버 주소로 `/books` 경로는 이 주소 뒤에 붙는다.
    base_url: String,

    /// 요청 타임아웃(초)
    timeout: u64,
}

impl Api {
    pub fn new(base_url: &str, timeout: u64) -> Self {
        Self { base_url: base_url.to_owned(), timeout }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }
}

/// 로그인 토큰 저장 설정
#[derive(Debug, Deserialize)]
pub struct Auth {
    /// 토큰을 보관할 JSON 파일 경로
    storage: String,
}

impl Auth {
    pub fn storage(&self) -> &str {
        &self.storage
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    api: Api,
    auth: Auth,
    log: Option<log::Config>,
}

impl AppConfig {
    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn log(&self) -> Option<&log::Config> {
        self.log.as_ref()
    }
}

fn run_mode() -> String {
    env::var("RUN_MODE").unwrap_or_else(|_| DEFAULT_RUN_MODE.into())
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// 설정을 기본값, `config/{RUN_MODE}.json`, `BOOKS_` 환경 변수 순서로 덮어써 로드한다.
///
/// 환경 변수의 중첩 키는 `__`로 구분한다. (예: `BOOKS_API__BASE_URL`)
pub fn load_config() -> Result<AppConfig, ::config::ConfigError> {
    let file = format!("config/{}.json", run_mode());

    ::config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.timeout", DEFAULT_TIMEOUT_SECONDS)?
        .set_default("auth.storage", DEFAULT_STORAGE)?
        .add_source(::config::File::with_name(&file).required(false))
        .add_source(
            ::config::Environment::with_prefix("BOOKS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
