//! 页面解析模块
//!
//! RisingHub 没有任何接口文档，这里的选择器全部来自对线上页面的观察：
//! 表单带 name="_token" 的隐藏字段，轮盘页有 name="hero" 的下拉框，
//! 奖品记录挂在 div.content.callout-secondary 容器内 <img> 的 title 上。
//! 页面结构随时可能变化，解析函数一律返回 None / 空集合而不是报错，
//! 是否致命由调用方决定。

use scraper::{Html, Selector};

/// 可参与抽奖的英雄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    /// 服务端分配的标识（option 的 value，会话内稳定）
    pub id: String,
    /// 显示名称
    pub name: String,
}

/// 抽奖获得的奖品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prize {
    /// 物品名称
    pub item: String,
    /// 数量原文，可能带修饰词，保持文本不做数值转换
    pub quantity: String,
    /// 物品图片路径
    pub item_url: String,
}

/// 提取表单的 CSRF 令牌
///
/// # 参数
/// - `html`: 页面内容
///
/// # 返回
/// 隐藏字段 _token 的值，字段缺失时返回 None
pub fn csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"input[name="_token"]"#).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(|value| value.to_string())
}

/// 提取轮盘页的英雄列表，保持文档顺序
///
/// 下拉框缺失是"今天没有可抽的英雄"的正常状态，返回空列表而不是错误
pub fn hero_options(html: &str) -> Vec<Hero> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"select[name="hero"] > option"#).unwrap();
    document
        .select(&selector)
        .filter_map(|option| {
            let id = option.value().attr("value")?.to_string();
            let name = option.text().collect::<String>().trim().to_string();
            Some(Hero { id, name })
        })
        .collect()
}

/// 在结果页中查找属于指定用户的奖品记录
///
/// 图片 title 的约定格式为 `<数量> <物品名> <用户名>`：数量取第一个
/// 空白分隔的词，物品名取数量与用户名之间的部分。用户名按大小写不敏感
/// 匹配，截取结果保留页面原文的大小写。多条匹配时取文档顺序的第一条。
///
/// # 参数
/// - `html`: 结果页内容
/// - `username`: 登录用户名
///
/// # 返回
/// 找到匹配记录时返回奖品信息，没有容器、没有匹配图片或 title/src
/// 缺失时返回 None（奖品未渲染是正常状态）
pub fn prize_for(html: &str, username: &str) -> Option<Prize> {
    let document = Html::parse_document(html);
    let containers = Selector::parse("div.content.callout-secondary").unwrap();
    let images = Selector::parse("img").unwrap();
    let needle = username.to_lowercase();

    for container in document.select(&containers) {
        for image in container.select(&images) {
            let title = match image.value().attr("title") {
                Some(title) => title.replace('\n', " "),
                None => continue,
            };
            let parsed = parse_prize_title(&title, &needle);
            if let Some((quantity, item)) = parsed {
                if let Some(src) = image.value().attr("src") {
                    return Some(Prize {
                        item,
                        quantity,
                        item_url: src.to_string(),
                    });
                }
            }
        }
    }
    None
}

/// 从图片 title 中解出 (数量, 物品名)
///
/// `needle` 必须已转为小写。格式不符时返回 None，继续扫描后面的图片
fn parse_prize_title(title: &str, needle: &str) -> Option<(String, String)> {
    let lower = title.to_lowercase();
    let pos = lower.find(needle)?;
    // to_lowercase 对个别字符会改变字节长度，偏移对不上时放弃这一条
    let before = title.get(..pos)?;
    let quantity = before.split_whitespace().next()?.to_string();
    let item_start = before.find(&quantity)? + quantity.len();
    let item = before[item_start..].trim().to_string();
    Some((quantity, item))
}
