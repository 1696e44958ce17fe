//! 配置加载模块
//!
//! 从 TOML 文件加载运行参数。未知键与缺失的必填键在加载时立即报错，
//! 不做运行期的动态属性访问。

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::fs;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// 登录用户名
    pub username: String,
    /// 登录密码
    pub password: String,
    /// 是否推送 Discord 通知
    #[serde(default)]
    pub notify: bool,
    /// Discord Webhook 地址
    #[serde(default)]
    pub webhook_url: String,
    /// 是否随机选择英雄（当前固定为随机选择）
    #[serde(default = "default_random_hero")]
    pub random_hero: bool,
    /// 英雄名称过滤列表（大小写不敏感的子串匹配，留空表示不过滤）
    #[serde(default)]
    pub heroes: Vec<String>,
}

fn default_random_hero() -> bool {
    true
}

impl Config {
    /// 从 TOML 文件加载配置
    ///
    /// # 参数
    /// - `path`: 配置文件路径
    ///
    /// # 返回
    /// 解析并校验通过的配置；文件缺失、存在未知键或缺少必填键时返回配置错误
    pub fn load(path: &str) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("无法读取配置文件 {}: {}", path, e)))?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| AppError::config(format!("配置文件 {} 解析失败: {}", path, e)))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 用环境变量覆盖敏感字段，避免把凭据写进配置文件
    fn apply_env_overrides(&mut self) {
        if let Ok(username) = std::env::var("RH_USERNAME") {
            self.username = username;
        }
        if let Ok(password) = std::env::var("RH_PASSWORD") {
            self.password = password;
        }
    }

    /// 校验跨字段约束
    fn validate(&self) -> AppResult<()> {
        if self.username.is_empty() {
            return Err(AppError::config("username 不能为空"));
        }
        if self.password.is_empty() {
            return Err(AppError::config("password 不能为空"));
        }
        if self.notify && self.webhook_url.replace('"', "").replace('\'', "").trim().is_empty() {
            return Err(AppError::config("启用 notify 时必须提供 webhook_url"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(toml_text)
    }

    #[test]
    fn parses_full_config() {
        let config = parse(
            r#"
            username = "bob"
            password = "secret"
            notify = true
            webhook_url = "https://discord.test/api/webhooks/1"
            random_hero = true
            heroes = ["Bob"]
            "#,
        )
        .unwrap();
        assert_eq!(config.username, "bob");
        assert!(config.notify);
        assert_eq!(config.heroes, vec!["Bob".to_string()]);
    }

    #[test]
    fn optional_keys_have_defaults() {
        let config = parse(
            r#"
            username = "bob"
            password = "secret"
            "#,
        )
        .unwrap();
        assert!(!config.notify);
        assert!(config.webhook_url.is_empty());
        assert!(config.random_hero);
        assert!(config.heroes.is_empty());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = parse(
            r#"
            username = "bob"
            password = "secret"
            heros = ["typo"]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_username_is_rejected() {
        let result = parse(r#"password = "secret""#);
        assert!(result.is_err());
    }

    #[test]
    fn notify_requires_webhook_url() {
        let config = parse(
            r#"
            username = "bob"
            password = "secret"
            notify = true
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
