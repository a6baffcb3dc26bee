//! 日志初始化

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// 安装控制台日志订阅器
///
/// 宿主进程可能已经装好自己的订阅器，此时保持原样。
pub fn init_tracing_subscriber() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_filter(LevelFilter::INFO),
        )
        .try_init();
}
