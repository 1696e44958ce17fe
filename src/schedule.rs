//! 下次抽奖时间推算模块

use chrono::{DateTime, Duration, Local};
use regex::Regex;
use tracing::warn;

/// 冷却提示的文本格式，例如 "7.5 hours"，整数与小数部分各至多两位
const COOLDOWN_PATTERN: &str = r"\b([0-9]{1,2}(?:\.[0-9]{1,2})?) hours";

/// 根据页面里的冷却提示文本推算下次可抽奖时间
///
/// # 参数
/// - `page_text`: 提交后页面的文本内容，缺失时直接走保守回退
/// - `now`: 当前时间
///
/// # 返回
/// 解析成功时精确返回 now + N 小时；文本缺失或无法解析时返回
/// now + 1 小时并记录一条警告（降级运行，不中断）
pub fn next_spin_time(page_text: Option<&str>, now: DateTime<Local>) -> DateTime<Local> {
    let pattern = Regex::new(COOLDOWN_PATTERN).unwrap();
    if let Some(text) = page_text {
        if let Some(captures) = pattern.captures(text) {
            if let Ok(hours) = captures[1].parse::<f64>() {
                return now + Duration::milliseconds((hours * 3_600_000.0).round() as i64);
            }
        }
    }
    warn!("[-] 页面里找不到下次抽奖时间，按 1 小时后重试");
    now + Duration::hours(1)
}
