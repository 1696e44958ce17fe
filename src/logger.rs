//! 日志初始化模块

use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 默认输出 debug 及以上级别到控制台（带颜色），可通过 RUST_LOG 环境变量覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
