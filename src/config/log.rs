use serde::Deserialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// 로그 설정이 없을 때 stderr로 출력할 최소 레벨
const FALLBACK_LEVEL: tracing::Level = tracing::Level::WARN;

#[derive(Debug)]
pub enum LogError {
    /// 지원하지 않는 로그 레벨 이름
    UnknownLevel(String),

    /// 지원하지 않는 로테이션 이름
    UnknownRotation(String),

    /// 로그 파일 생성 실패
    AppenderFailed(String),

    /// 전역 subscriber 등록 실패
    InitFailed(String),
}

impl Display for LogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogError::UnknownLevel(s) => write!(
                f, "Log level must be one of TRACE, DEBUG, INFO, WARN, ERROR but was {:?}", s
            ),
            LogError::UnknownRotation(s) => write!(
                f, "Log rotation must be one of DAILY, HOURLY, MINUTELY, NEVER but was {:?}", s
            ),
            LogError::AppenderFailed(s) => write!(f, "Failed to create log file appender: {}", s),
            LogError::InitFailed(s) => write!(f, "Failed to initialize logging: {}", s),
        }
    }
}

impl std::error::Error for LogError {}

#[derive(Debug, Deserialize)]
pub struct Config {
    dir: String,
    name: String,

    /// 최대 로그 파일 개수로 로그 파일이 설정한 개수보다 커질 경우 기존의 로그파일들은 삭제 된다.
    /// 설정 되지 않을 시 로그 파일은 삭제 되지 않는다.
    keep: Option<usize>,

    /// 파일과 stderr에 출력할 로그의 레벨로 지정된 로그 레벨 이상만 로깅된다.
    /// 설정하지 않을시 기본값은 DEBUG로 설정 된다.
    level: Option<String>,

    /// 로깅 파일이 분리 되는 기간으로 .log 파일 하나 당 설정된 기간 동안 로그가 기록 된다.
    /// 설정 되지 않을시 기본값은 DAILY로 설정된다.
    rotation: Option<String>,
}

/// 전역 로깅을 설정한다.
///
/// 로그 설정이 있으면 JSON 형식으로 stderr와 롤링 파일에 함께 기록하고,
/// 없으면 명령 출력(stdout)과 섞이지 않도록 [`FALLBACK_LEVEL`] 이상만 stderr에 기록한다.
///
/// 반환된 [`WorkerGuard`]가 drop 되면 파일에 남지 않은 로그가 flush 되므로 프로그램 종료 시까지 보관해야 한다.
pub fn set_global_logging_config(c: Option<&Config>) -> Result<Option<WorkerGuard>, LogError> {
    let Some(c) = c else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(FALLBACK_LEVEL)
            .try_init()
            .map_err(|e| LogError::InitFailed(e.to_string()))?;
        return Ok(None);
    };

    let rotation = match &c.rotation {
        Some(rotation) => parse_rotation(rotation)?,
        None => rolling::Rotation::DAILY,
    };
    let level = match &c.level {
        Some(level) => parse_level(level)?,
        None => tracing::Level::DEBUG,
    };

    let mut file_appender = rolling::RollingFileAppender::builder()
        .filename_prefix(c.name.clone())
        .filename_suffix("log")
        .rotation(rotation);

    if let Some(keep) = c.keep {
        file_appender = file_appender.max_log_files(keep);
    }

    let file_appender = file_appender.build(c.dir.clone())
        .map_err(|e| LogError::AppenderFailed(e.to_string()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let writer = std::io::stderr.and(non_blocking);

    tracing_subscriber::fmt()
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_timer(LocalTime::new(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]")))
        .with_writer(writer)
        .with_max_level(level)
        .try_init()
        .map_err(|e| LogError::InitFailed(e.to_string()))?;

    Ok(Some(guard))
}

fn parse_rotation(s: &str) -> Result<rolling::Rotation, LogError> {
    match s {
        "DAILY" => Ok(rolling::Rotation::DAILY),
        "HOURLY" => Ok(rolling::Rotation::HOURLY),
        "MINUTELY" => Ok(rolling::Rotation::MINUTELY),
        "NEVER" => Ok(rolling::Rotation::NEVER),
        _ => Err(LogError::UnknownRotation(s.to_owned())),
    }
}

fn parse_level(l: &str) -> Result<tracing::Level, LogError> {
    match l {
        "TRACE" => Ok(tracing::Level::TRACE),
        "DEBUG" => Ok(tracing::Level::DEBUG),
        "INFO" => Ok(tracing::Level::INFO),
        "WARN" => Ok(tracing::Level::WARN),
        "ERROR" => Ok(tracing::Level::ERROR),
        _ => Err(LogError::UnknownLevel(l.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_and_rejects_others() {
        assert_eq!(parse_level("INFO").unwrap(), tracing::Level::INFO);
        assert_eq!(parse_level("ERROR").unwrap(), tracing::Level::ERROR);
        assert!(matches!(parse_level("info"), Err(LogError::UnknownLevel(_))));
    }

    #[test]
    fn parses_known_rotations_and_rejects_others() {
        assert_eq!(parse_rotation("HOURLY").unwrap(), rolling::Rotation::HOURLY);
        assert_eq!(parse_rotation("NEVER").unwrap(), rolling::Rotation::NEVER);
        assert!(matches!(parse_rotation("WEEKLY"), Err(LogError::UnknownRotation(_))));
    }
}
