use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志系统
///
/// 指定 log_file 时输出到文件（非阻塞写入），返回的 guard 需由
/// 调用方持有到进程结束，否则缓冲中的日志会丢失。
pub fn init_logging(
    log_level: &str,
    log_format: Option<&str>,
    log_file: Option<&str>,
    quiet: bool,
) -> Result<Option<WorkerGuard>> {
    // 如果静默模式，只输出错误
    let level = if quiet { "error" } else { log_level };

    // 解析日志级别
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // 文件输出：按完整文件名写入，不做滚动
    let (writer, guard) = match log_file {
        Some(file) => {
            let path = Path::new(file);
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "pushbridge.log".to_string());
            let appender = tracing_appender::rolling::never(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (Some(non_blocking), Some(guard))
        }
        None => (None, None),
    };

    // 根据格式选择不同的输出方式
    match log_format {
        Some("json") => {
            // JSON 格式（适合生产环境）
            let layer = fmt::layer().json();
            match writer {
                Some(w) => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer.with_writer(w))
                    .init(),
                None => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer)
                    .init(),
            }
        }
        Some("pretty") | Some("dev") => {
            // Pretty 格式（适合开发环境）
            let layer = fmt::layer().pretty();
            match writer {
                Some(w) => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer.with_writer(w))
                    .init(),
                None => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer)
                    .init(),
            }
        }
        _ => {
            // Compact 格式（默认）
            let layer = fmt::layer().compact();
            match writer {
                Some(w) => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer.with_writer(w))
                    .init(),
                None => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer)
                    .init(),
            }
        }
    }

    Ok(guard)
}
