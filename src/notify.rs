//! Discord 通知模块
//!
//! 把中奖结果推送到配置的 Webhook。通知失败只记录，绝不影响主循环。

use crate::client::BASE_URL;
use crate::extract::Prize;
use chrono::{DateTime, Local};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{info, warn};

/// Webhook 请求的超时时间
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Discord Webhook 通知器
pub struct Discord {
    webhook_url: String,
    http: reqwest::Client,
}

impl Discord {
    /// 创建通知器，去掉配置值里可能带的引号
    pub fn new(webhook_url: &str) -> Self {
        Self {
            webhook_url: webhook_url.replace('"', "").replace('\'', ""),
            http: reqwest::Client::new(),
        }
    }

    /// 发送中奖通知
    ///
    /// # 参数
    /// - `hero_name`: 中奖英雄名称
    /// - `prize`: 奖品信息
    /// - `next_spin_time`: 下次可抽奖时间，未知时为 None
    pub async fn notify(
        &self,
        hero_name: &str,
        prize: &Prize,
        next_spin_time: Option<DateTime<Local>>,
    ) {
        let payload = build_payload(hero_name, prize, next_spin_time);
        let result = self
            .http
            .post(&self.webhook_url)
            .timeout(NOTIFY_TIMEOUT)
            .json(&payload)
            .send()
            .await;
        match result {
            Ok(response) if response.status().as_u16() == 204 => {
                info!("[+] 通知已发送!");
            }
            Ok(response) => {
                warn!("[-] 通知发送异常: HTTP {}", response.status());
            }
            Err(e) => {
                warn!("[-] 通知发送失败: {}", e);
            }
        }
    }
}

/// 构造 Discord Embed 消息体
fn build_payload(
    hero_name: &str,
    prize: &Prize,
    next_spin_time: Option<DateTime<Local>>,
) -> Value {
    let next_text = match next_spin_time {
        Some(time) => time.format("%A at %H:%M:%S").to_string(),
        None => "Unknown".to_string(),
    };
    json!({
        "content": null,
        "embeds": [
            {
                "title": format!("Just won {}x {} today !", prize.quantity, prize.item),
                "description": format!("Next available spin will be {}", next_text),
                "color": 59201,
                "author": {
                    "name": capitalize(hero_name)
                },
                "image": {
                    "url": format!("{}{}", BASE_URL, prize.item_url)
                },
                "thumbnail": {
                    "url": format!("{}/images/rh_logo.png", BASE_URL)
                }
            }
        ],
        "username": "Rising Hub Auto-Spin",
        "attachments": []
    })
}

/// 首字母大写、其余小写（Discord 作者栏的显示约定）
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_prize() -> Prize {
        Prize {
            item: "Iron Sword".to_string(),
            quantity: "3".to_string(),
            item_url: "/images/items/sword.png".to_string(),
        }
    }

    #[test]
    fn payload_contains_prize_and_hero() {
        let payload = build_payload("bob the brave", &sample_prize(), None);
        let embed = &payload["embeds"][0];
        assert_eq!(embed["title"], "Just won 3x Iron Sword today !");
        assert_eq!(embed["author"]["name"], "Bob the brave");
        assert_eq!(
            embed["image"]["url"],
            "https://risinghub.net/images/items/sword.png"
        );
        assert_eq!(payload["username"], "Rising Hub Auto-Spin");
    }

    #[test]
    fn payload_shows_unknown_when_time_missing() {
        let payload = build_payload("bob", &sample_prize(), None);
        assert_eq!(
            payload["embeds"][0]["description"],
            "Next available spin will be Unknown"
        );
    }

    #[test]
    fn payload_formats_next_spin_time() {
        let time = Local.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap();
        let payload = build_payload("bob", &sample_prize(), Some(time));
        let description = payload["embeds"][0]["description"].as_str().unwrap();
        assert!(description.starts_with("Next available spin will be Wednesday at 18:30:00"));
    }

    #[test]
    fn quotes_are_stripped_from_webhook_url() {
        let discord = Discord::new("\"https://discord.test/api/webhooks/1\"");
        assert_eq!(discord.webhook_url, "https://discord.test/api/webhooks/1");
    }
}
