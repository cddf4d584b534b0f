//! 日志初始化：tracing-subscriber 的 EnvFilter（默认 info）+ fmt 层。
//! 全局只初始化一次，可用 RUST_LOG 覆盖过滤规则。

use std::io::IsTerminal;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("日志已经初始化过")]
    AlreadyInitialised,
    #[error("无法安装全局日志订阅器: {0}")]
    Install(String),
}

/// 安装全局 tracing 订阅器。`default_filter`在未设置 RUST_LOG 时生效。
pub fn init_tracing(default_filter: &str) -> Result<(), LoggingError> {
    INITIALISED
        .set(())
        .map_err(|()| LoggingError::AlreadyInitialised)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
