//! 抽奖流程编排
//!
//! 一个周期的状态机：拉取英雄列表 → 过滤 → {无可用英雄 | 选中} →
//! 提交 → {奖品已渲染 | 奖品未渲染}。无可用英雄与奖品未渲染都是
//! 正常分支，不是错误。

use crate::client::{HubClient, SPIN_PATH};
use crate::config::Config;
use crate::error::AppResult;
use crate::extract::{self, Hero, Prize};
use crate::schedule;
use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use tracing::{debug, error, info, warn};

/// 探测用的哨兵英雄标识：只刷新下次抽奖时间，不真正提交
///
/// 站点约定 hero=0 不对应任何英雄；带着它走一遍令牌获取与页面刷新，
/// 可以拿到冷却文本而不产生服务端副作用
pub const PROBE_HERO_ID: &str = "0";

/// 一个抽奖周期的结果
#[derive(Debug, Clone)]
pub struct SpinOutcome {
    /// 被选中英雄的名称，没有可用英雄时为 None
    pub hero_name: Option<String>,
    /// 抓取到的奖品，奖品尚未渲染或未真正抽奖时为 None
    pub prize: Option<Prize>,
    /// 下次可抽奖时间
    pub next_spin_time: DateTime<Local>,
}

/// 按配置的名称子串过滤英雄（大小写不敏感），过滤列表为空时保留全部
pub fn filter_heroes(heroes: Vec<Hero>, wanted: &[String]) -> Vec<Hero> {
    if wanted.is_empty() {
        return heroes;
    }
    let wanted: Vec<String> = wanted.iter().map(|name| name.to_lowercase()).collect();
    heroes
        .into_iter()
        .filter(|hero| {
            let name = hero.name.to_lowercase();
            wanted.iter().any(|w| name.contains(w))
        })
        .collect()
}

/// 执行一次抽奖（或探测）并返回下次可抽奖时间
///
/// # 参数
/// - `hero_id`: 英雄标识，[`PROBE_HERO_ID`] 表示只探测不提交
///
/// # 返回
/// 从提交后的轮盘页文本推算出的下次可抽奖时间
pub async fn spin(client: &HubClient, hero_id: &str) -> AppResult<DateTime<Local>> {
    let token = client.fetch_token(SPIN_PATH).await?;
    if hero_id != PROBE_HERO_ID {
        client
            .post_form(
                SPIN_PATH,
                &[("hero", hero_id), ("_token", token.as_str()), ("submit", "")],
            )
            .await?;
    }
    // 冷却提示在提交后的轮盘页文本里，需要重新拉取一次
    let page = client.get_page(SPIN_PATH).await?;
    Ok(schedule::next_spin_time(Some(&page), Local::now()))
}

/// 运行一个完整的抽奖周期
///
/// 登录已由调用方完成。英雄列表拉取失败按可恢复处理（记录后当作
/// 空列表走探测分支）；令牌缺失与提交阶段的网络故障向上传播
pub async fn run_cycle(client: &HubClient, config: &Config) -> AppResult<SpinOutcome> {
    let heroes = fetch_heroes(client).await;
    if !config.heroes.is_empty() {
        debug!("[*] 按配置过滤英雄: {:?}", config.heroes);
    }
    let eligible = filter_heroes(heroes, &config.heroes);

    let chosen = {
        let mut rng = rand::thread_rng();
        eligible.choose(&mut rng).cloned()
    };

    let hero = match chosen {
        Some(hero) => hero,
        None => {
            warn!("[-] 没有可抽奖的英雄，改为探测下次抽奖时间...");
            let next_spin_time = spin(client, PROBE_HERO_ID).await?;
            return Ok(SpinOutcome {
                hero_name: None,
                prize: None,
                next_spin_time,
            });
        }
    };

    debug!("[*] 正在转动 {} 的轮盘...", hero.name);
    let next_spin_time = spin(client, &hero.id).await?;
    info!("[+] 已转动 {} 的轮盘!", hero.name);

    let prize = fetch_prize(client, &config.username).await;

    Ok(SpinOutcome {
        hero_name: Some(hero.name),
        prize,
        next_spin_time,
    })
}

/// 拉取当前可选的英雄列表
///
/// 这里的网络故障按可恢复处理：记录后返回空列表，让周期走探测分支
async fn fetch_heroes(client: &HubClient) -> Vec<Hero> {
    match client.get_page(SPIN_PATH).await {
        Ok(html) => extract::hero_options(&html),
        Err(e) => {
            error!("[-] 拉取英雄列表失败: {}", e);
            Vec::new()
        }
    }
}

/// 抓取本周期赢得的奖品
///
/// 奖品可能尚未渲染（正常状态），抓取阶段的网络故障同样按可恢复处理
async fn fetch_prize(client: &HubClient, username: &str) -> Option<Prize> {
    match client.get_page(SPIN_PATH).await {
        Ok(html) => extract::prize_for(&html, username),
        Err(e) => {
            warn!("[-] 抓取奖品失败: {}", e);
            None
        }
    }
}
