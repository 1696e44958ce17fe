use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 登录失败（凭据错误或站点已不兼容）
    AuthFailed { username: String },
    /// 页面缺少 CSRF 令牌（页面结构变化，表单无法提交）
    TokenNotFound { url: String },
    /// 网络请求失败
    Transport {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务器返回非成功状态码
    BadStatus { url: String, status: u16 },
    /// 配置错误
    Config { message: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::AuthFailed { username } => {
                write!(f, "登录失败 (用户: {})", username)
            }
            AppError::TokenNotFound { url } => {
                write!(f, "页面缺少 _token 隐藏字段 ({})", url)
            }
            AppError::Transport { url, source } => {
                write!(f, "网络请求失败 ({}): {}", url, source)
            }
            AppError::BadStatus { url, status } => {
                write!(f, "服务器返回错误状态 ({}): HTTP {}", url, status)
            }
            AppError::Config { message } => {
                write!(f, "配置错误: {}", message)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Transport { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建网络传输错误
    pub fn transport(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Transport {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config {
            message: message.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
