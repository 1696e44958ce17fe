//! RisingHub 会话客户端
//!
//! 持有带 Cookie 的 HTTP 会话，封装登录与带会话的 GET/POST。
//! 会话的生命周期是一个抽奖周期：周期开始时创建，周期结束随所有权
//! 一并释放，不跨周期复用。

use crate::error::{AppError, AppResult};
use crate::extract;
use std::time::Duration;
use tracing::{debug, info};

/// 站点根地址
pub const BASE_URL: &str = "https://risinghub.net";
/// 登录页路径
pub const LOGIN_PATH: &str = "/login";
/// 轮盘页路径
pub const SPIN_PATH: &str = "/roulette";
/// 个人资料页路径
pub const PROFILE_PATH: &str = "/profile";

/// 单个请求的超时时间
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// RisingHub 会话客户端
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
}

impl HubClient {
    /// 创建指向线上站点的客户端
    pub fn new() -> AppResult<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// 创建指向指定站点的客户端（测试时指向本地桩服务器）
    pub fn with_base_url(base_url: impl Into<String>) -> AppResult<Self> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::transport(base_url.as_str(), e))?;
        Ok(Self { http, base_url })
    }

    /// 获取带会话 Cookie 的页面内容
    ///
    /// # 参数
    /// - `path`: 相对站点根的路径
    ///
    /// # 返回
    /// 页面 HTML；网络故障返回 Transport，非成功状态码返回 BadStatus，
    /// 是否致命由调用方决定
    pub async fn get_page(&self, path: &str) -> AppResult<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::transport(url.as_str(), e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::BadStatus {
                url,
                status: status.as_u16(),
            });
        }
        response
            .text()
            .await
            .map_err(|e| AppError::transport(url.as_str(), e))
    }

    /// 提交表单并返回响应页面
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> AppResult<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::transport(url.as_str(), e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::BadStatus {
                url,
                status: status.as_u16(),
            });
        }
        response
            .text()
            .await
            .map_err(|e| AppError::transport(url.as_str(), e))
    }

    /// 获取页面里隐藏的 CSRF 令牌
    ///
    /// 没有令牌就无法提交任何表单，字段缺失意味着页面结构已变化，
    /// 按致命错误返回
    pub async fn fetch_token(&self, path: &str) -> AppResult<String> {
        let html = self.get_page(path).await?;
        extract::csrf_token(&html).ok_or_else(|| AppError::TokenNotFound {
            url: format!("{}{}", self.base_url, path),
        })
    }

    /// 使用给定凭据登录
    ///
    /// 站点不返回明确的成败标志，只能通过响应内容里是否仍然出现
    /// 登录页路径来判断是否失败
    pub async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        debug!("[*] 正在登录...");
        let token = self.fetch_token(LOGIN_PATH).await?;
        let body = self
            .post_form(
                LOGIN_PATH,
                &[
                    ("username", username),
                    ("password", password),
                    ("_token", token.as_str()),
                    ("submit", ""),
                ],
            )
            .await?;
        if body.contains(LOGIN_PATH) {
            return Err(AppError::AuthFailed {
                username: username.to_string(),
            });
        }
        info!("[+] 登录成功!");
        Ok(())
    }
}
