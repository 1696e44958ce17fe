//! 应用主结构与调度循环

use crate::client::HubClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::notify::Discord;
use crate::spin::{self, SpinOutcome};
use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// 周期之间的额外等待秒数，给服务端的冷却计时留出误差
const SLEEP_MARGIN_SECS: i64 = 10;

/// 应用主结构
pub struct App {
    config: Config,
    notifier: Option<Discord>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        let notifier = if config.notify {
            Some(Discord::new(&config.webhook_url))
        } else {
            None
        };
        Self { config, notifier }
    }

    /// 运行主循环：每个周期登录、抽奖、通知、休眠
    ///
    /// 登录失败或令牌缺失是致命错误，直接返回让进程以非零状态退出
    pub async fn run(&self) -> AppResult<()> {
        log_startup(&self.config);
        loop {
            let outcome = self.run_once().await?;
            self.notify_prize(&outcome).await;
            self.sleep_until(outcome.next_spin_time).await;
        }
    }

    /// 执行单个周期，会话只在本周期内存活
    async fn run_once(&self) -> AppResult<SpinOutcome> {
        let client = HubClient::new()?;
        client
            .login(&self.config.username, &self.config.password)
            .await?;
        let outcome = spin::run_cycle(&client, &self.config).await?;
        // client 在这里离开作用域，会话随之释放，不跨周期复用
        Ok(outcome)
    }

    /// 抽到奖品且启用了通知时推送 Discord
    async fn notify_prize(&self, outcome: &SpinOutcome) {
        let prize = match &outcome.prize {
            Some(prize) => prize,
            None => return,
        };
        info!("[+] 你刚刚赢得了 {}x {} !", prize.quantity, prize.item);
        if let (Some(notifier), Some(hero_name)) = (&self.notifier, &outcome.hero_name) {
            debug!("[*] 正在发送通知...");
            notifier
                .notify(hero_name, prize, Some(outcome.next_spin_time))
                .await;
        }
    }

    /// 休眠到下次可抽奖时间，已到期则立即开始下一个周期
    async fn sleep_until(&self, next_spin_time: DateTime<Local>) {
        debug!("[*] 下次抽奖时间: {}", next_spin_time.format("%A at %H:%M:%S"));
        let wait_secs = (next_spin_time - Local::now()).num_seconds();
        if wait_secs > 0 {
            let total = wait_secs + SLEEP_MARGIN_SECS;
            debug!("[*] 等待 {:.2} 分钟后进行下次抽奖...", total as f64 / 60.0);
            sleep(Duration::from_secs(total as u64)).await;
        } else {
            debug!("[*] 立即开始下次抽奖...");
        }
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🎰 RisingHub 自动轮盘启动");
    info!("📣 Discord 通知: {}", if config.notify { "启用" } else { "关闭" });
    if config.heroes.is_empty() {
        info!("🎯 英雄过滤: 不过滤");
    } else {
        info!("🎯 英雄过滤: {:?}", config.heroes);
    }
    info!("{}", "=".repeat(60));
}
