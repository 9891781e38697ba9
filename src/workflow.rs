pub mod create;
pub mod signup;
pub mod update;

use chrono::Datelike;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BannerKind {
    Success,
    Failure,
}

/// 화면 상단에 한번 보여지는 처리 결과 메시지
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Banner {
    kind: BannerKind,
    text: String,
}

impl Banner {
    pub fn success(text: &str) -> Self {
        Self { kind: BannerKind::Success, text: text.to_owned() }
    }

    pub fn failure(text: &str) -> Self {
        Self { kind: BannerKind::Failure, text: text.to_owned() }
    }

    pub fn kind(&self) -> BannerKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_success(&self) -> bool {
        self.kind == BannerKind::Success
    }
}

impl Display for Banner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// 화면 이동 요청을 받는다.
pub trait Navigator {
    /// `delay` 이후 `path`로 이동한다.
    fn navigate_after(&mut self, path: &str, delay: Duration);
}

/// 현재 연도를 제공한다. 출판 연도의 상한으로 사용된다.
pub trait Clock {
    fn current_year(&self) -> i32;
}

/// 로컬 시간대 기준의 시스템 시계
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

/// 이동 요청을 보관했다가 [`DeferredNavigator::follow`] 호출 시 대기 후 이동하는 CLI용 네비게이터
///
/// 처리 결과 메시지를 먼저 출력한 다음 대기할 수 있도록 이동 시점을 호출하는 쪽에 맡긴다.
#[derive(Default)]
pub struct DeferredNavigator {
    pending: Option<(String, Duration)>,
}

impl DeferredNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<(&str, Duration)> {
        self.pending.as_ref().map(|(path, delay)| (path.as_str(), *delay))
    }

    /// 예약된 이동이 있다면 지정된 시간 만큼 대기한 뒤 이동할 경로를 반환한다.
    pub fn follow(&mut self) -> Option<String> {
        let (path, delay) = self.pending.take()?;
        thread::sleep(delay);
        info!("navigating to {}", path);
        Some(path)
    }
}

impl Navigator for DeferredNavigator {
    fn navigate_after(&mut self, path: &str, delay: Duration) {
        self.pending = Some((path.to_owned(), delay));
    }
}
