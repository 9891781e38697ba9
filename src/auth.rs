use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 로그인 토큰이 저장되는 고정 키
pub const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug)]
pub enum StoreError {
    /// 저장소 파일 입출력 실패
    Io(String),

    /// 저장소 파일의 내용이 올바른 JSON 객체가 아님
    Corrupted(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(s) => write!(f, "Token storage io error: {}", s),
            StoreError::Corrupted(s) => write!(f, "Token storage is corrupted: {}", s),
        }
    }
}

impl std::error::Error for StoreError {}

/// 문자열 키/값 로컬 저장소
pub trait TokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// JSON 객체 하나를 담은 파일을 저장소로 사용한다.
///
/// 파일이 없으면 빈 저장소로 취급하며 처음 값을 쓸 때 상위 디렉토리와 함께 생성한다.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&text)
            .map_err(|e| StoreError::Corrupted(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Corrupted(e.to_string()))?;

        fs::write(&self.path, text).map_err(|e| StoreError::Io(e.to_string()))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// 저장된 로그인 토큰을 읽는다. 빈 문자열은 토큰이 없는 것으로 본다.
pub fn access_token(store: &dyn TokenStore) -> Result<Option<String>, StoreError> {
    Ok(store.get(ACCESS_TOKEN_KEY)?.filter(|token| !token.is_empty()))
}

/// 로그인 상태 여부로 인증이 필요한 화면 요소의 노출을 결정할 때 사용한다.
pub fn is_authenticated(store: &dyn TokenStore) -> Result<bool, StoreError> {
    Ok(access_token(store)?.is_some())
}

pub fn login(store: &dyn TokenStore, token: &str) -> Result<(), StoreError> {
    store.set(ACCESS_TOKEN_KEY, token)?;
    info!("access token stored");
    Ok(())
}

pub fn logout(store: &dyn TokenStore) -> Result<(), StoreError> {
    store.remove(ACCESS_TOKEN_KEY)?;
    debug!("access token removed");
    Ok(())
}
