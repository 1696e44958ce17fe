//! # RisingHub Auto-Spin
//!
//! 自动转动 RisingHub 每日轮盘的常驻小工具：登录、选英雄、抽奖、
//! 抓取奖品、按冷却提示休眠，循环往复。
//!
//! ## 架构设计
//!
//! - `client` — 会话层：持有 Cookie 的 HTTP 会话，登录与带会话的请求
//! - `extract` — 解析层：从页面标记中恢复令牌、英雄列表与奖品
//! - `schedule` — 从冷却提示文本推算下次可抽奖时间
//! - `spin` — 流程编排：过滤、随机选择、提交、抓取结果
//! - `notify` — Discord Webhook 通知
//! - `app` — 调度循环：周期性执行流程并休眠
//!
//! ## 外部契约
//!
//! 站点没有接口文档，所有选择器与文本模式都来自对线上页面的观察。
//! 解析失败一律降级并记录，不中断进程；唯一的例外是 CSRF 令牌缺失，
//! 它意味着页面结构已变化，继续运行没有意义。

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod logger;
pub mod notify;
pub mod schedule;
pub mod spin;

// 重新导出常用类型
pub use app::App;
pub use client::HubClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use extract::{Hero, Prize};
pub use notify::Discord;
pub use spin::{SpinOutcome, PROBE_HERO_ID};
