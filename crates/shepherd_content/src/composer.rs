//! Post bodies for the daily routine and the interaction pass.

use crate::market::{format_coin_price, format_price, group_thousands, market_theme, trend_marker};
use crate::tables::{
    Backer, FALLBACK_CHINESE_POST, FALLBACK_ENGLISH_POST, FALLBACK_VERSES, INSIGHTS, NEWS_ITEMS,
    NewsItem, PROJECTS, Project, SECURITY_TIPS, TOPICS, daily_theme, morning_verse, theme_verses,
};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand::seq::SliceRandom;
use shepherd_core::{BilingualVerse, FetchedPost, MarketSnapshot, Theme, Thread, TrendingCoin};
use shepherd_error::{SourceError, SourceErrorKind, SourceResult};
use shepherd_interface::{ContentComposer, MarketSource, VerseSource};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument, warn};

/// Token the market posts describe unless configured otherwise.
pub const DEFAULT_TOKEN_ID: &str = "binancecoin";

/// Tokens listed in the trending thread.
pub const TRENDING_LIMIT: usize = 5;

const NEWS_TITLE_CHARS: usize = 40;

/// [`ContentComposer`] backed by a verse source, a market source and the
/// static content tables.
pub struct RoutineComposer {
    verses: Arc<dyn VerseSource>,
    market: Arc<dyn MarketSource>,
    token_id: String,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for RoutineComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutineComposer")
            .field("token_id", &self.token_id)
            .finish_non_exhaustive()
    }
}

impl RoutineComposer {
    /// Composer drawing from `verses` and `market`.
    pub fn new(verses: Arc<dyn VerseSource>, market: Arc<dyn MarketSource>) -> Self {
        Self {
            verses,
            market,
            token_id: DEFAULT_TOKEN_ID.to_string(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Describe `token_id` instead of BNB.
    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = token_id.into();
        self
    }

    /// Make random choices reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn pick<T: Copy>(&self, items: &[T], what: &str) -> SourceResult<T> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        items
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| SourceError::new(SourceErrorKind::Empty(what.to_string())))
    }

    /// `items` starting at a random position and wrapping around, so that
    /// repeated posts from the same table differ.
    fn rotated<T: Copy>(&self, items: &[T], what: &str) -> SourceResult<Vec<T>> {
        if items.is_empty() {
            return Err(SourceError::new(SourceErrorKind::Empty(what.to_string())));
        }
        let start = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(0..items.len())
        };
        Ok(items[start..].iter().chain(&items[..start]).copied().collect())
    }

    /// Look up a verse for `theme`, falling back to well-known verses.
    async fn verse_for(&self, theme: Theme) -> SourceResult<BilingualVerse> {
        let first = self.pick(theme_verses(theme), theme.as_ref())?;
        let candidates = std::iter::once(first).chain(FALLBACK_VERSES.iter().copied());

        let mut last_error = None;
        for reference in candidates {
            match self.verses.lookup(reference).await {
                Ok(verse) => {
                    debug!(theme = %theme, reference, "Verse selected");
                    return Ok(verse);
                }
                Err(e) => {
                    warn!(reference, error = %e, "Verse lookup failed, trying fallback");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            SourceError::new(SourceErrorKind::Empty(format!("verses for {}", theme)))
        }))
    }
}

fn two_post_thread(first: String, second: String) -> SourceResult<Thread> {
    Thread::new(vec![first, second])
        .ok_or_else(|| SourceError::new(SourceErrorKind::Empty("thread".to_string())))
}

/// English market summary.
pub fn market_post(snapshot: &MarketSnapshot) -> String {
    let change = *snapshot.change_24h_pct();
    format!(
        "BNB Market Analysis (24h)\n\n\
         {} Price: ${} ({:+.2}%)\n\
         📊 Volume: ${}\n\n\
         #BNB #Binance #Crypto",
        trend_marker(change),
        format_price(*snapshot.price_usd()),
        change,
        group_thousands(*snapshot.volume_24h_usd()),
    )
}

/// Chinese market summary.
pub fn chinese_market_post(snapshot: &MarketSnapshot) -> String {
    let change = *snapshot.change_24h_pct();
    format!(
        "BNB 市场分析 (24小时)\n\n\
         {} 价格: ${} ({:+.2}%)\n\
         📊 交易量: ${}\n\n\
         #BNB #币安 #加密货币",
        trend_marker(change),
        format_price(*snapshot.price_usd()),
        change,
        group_thousands(*snapshot.volume_24h_usd()),
    )
}

fn short_title(title: &str) -> String {
    if title.chars().count() > NEWS_TITLE_CHARS {
        let head: String = title.chars().take(NEWS_TITLE_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

/// English ecosystem news: the first two headlines.
pub fn news_post(items: &[NewsItem]) -> String {
    let mut post = String::from("BNB Ecosystem News (24h)\n\n");
    for (i, item) in items.iter().take(2).enumerate() {
        post.push_str(&format!("{}. {}\n", i + 1, short_title(item.title)));
    }
    post.push_str("\n#BNB #BSC #Ecosystem #News");
    post
}

/// Chinese ecosystem news: the first three headlines.
pub fn chinese_news_post(items: &[NewsItem]) -> String {
    let mut post = String::from("BNB生态系统新闻 (24小时)\n\n");
    for (i, item) in items.iter().take(3).enumerate() {
        post.push_str(&format!("{}. {}\n", i + 1, item.title));
    }
    post.push_str("\n#BNB #BSC #生态系统 #新闻");
    post
}

fn coin_lines(coins: &[TrendingCoin]) -> String {
    coins
        .iter()
        .take(TRENDING_LIMIT)
        .enumerate()
        .map(|(i, coin)| {
            let change = *coin.change_24h_pct();
            format!(
                "{}. {} ({})\n   ${} {} {:+.2}%\n\n",
                i + 1,
                coin.name(),
                coin.symbol(),
                format_coin_price(*coin.price_usd()),
                trend_marker(change),
                change
            )
        })
        .collect()
}

/// English trending token list.
pub fn trending_post(coins: &[TrendingCoin]) -> String {
    format!(
        "🔥 BSC Ecosystem Trending Coins (24h)\n\n{}#BSC #BNB #DeFi #Trending",
        coin_lines(coins)
    )
}

/// Chinese trending token list.
pub fn chinese_trending_post(coins: &[TrendingCoin]) -> String {
    format!(
        "BSC生态系统热门代币 (24小时)\n\n{}#BSC #BNB #DeFi #热门",
        coin_lines(coins)
    )
}

fn project_lines(projects: &[Project], backer: Backer, take: usize) -> String {
    projects
        .iter()
        .filter(|project| project.backer == backer)
        .take(take)
        .map(|project| format!("• {} ({})\n", project.name, project.category))
        .collect()
}

/// English upcoming projects: two backed by YZi Labs, one by Binance.
pub fn projects_post(projects: &[Project]) -> String {
    let mut post = String::from("Upcoming BNB Projects & Investments\n\n");
    let yzi = project_lines(projects, Backer::YziLabs, 2);
    if !yzi.is_empty() {
        post.push_str(&format!("{} Backed:\n{}\n", Backer::YziLabs, yzi));
    }
    let binance = project_lines(projects, Backer::Binance, 1);
    if !binance.is_empty() {
        post.push_str(&format!("{} Supported:\n{}\n", Backer::Binance, binance));
    }
    post.push_str("#BNB #BSC #Investments #Innovation");
    post
}

/// Chinese upcoming projects: three backed by YZi Labs, two by Binance.
pub fn chinese_projects_post(projects: &[Project]) -> String {
    let mut post = String::from("即将推出的BNB项目与投资\n\n");
    let yzi = project_lines(projects, Backer::YziLabs, 3);
    if !yzi.is_empty() {
        post.push_str(&format!("YZi Labs 支持:\n{}\n", yzi));
    }
    let binance = project_lines(projects, Backer::Binance, 2);
    if !binance.is_empty() {
        post.push_str(&format!("币安支持:\n{}\n", binance));
    }
    post.push_str("#BNB #BSC #投资 #创新");
    post
}

#[async_trait]
impl ContentComposer for RoutineComposer {
    #[instrument(skip(self))]
    async fn morning_thread(&self, now: DateTime<Utc>) -> SourceResult<Thread> {
        let theme = daily_theme(now.weekday());
        let reference = morning_verse(theme);
        match self.verses.lookup(reference).await {
            Ok(verse) => two_post_thread(verse.english_post(), verse.chinese_post()),
            Err(e) => {
                warn!(theme = %theme, reference, error = %e, "Morning verse unavailable, using fallback");
                two_post_thread(
                    FALLBACK_ENGLISH_POST.to_string(),
                    FALLBACK_CHINESE_POST.to_string(),
                )
            }
        }
    }

    async fn ecosystem_news_thread(&self) -> SourceResult<Thread> {
        let items = self.rotated(NEWS_ITEMS, "news items")?;
        two_post_thread(news_post(&items), chinese_news_post(&items))
    }

    #[instrument(skip(self))]
    async fn trending_coins_thread(&self) -> SourceResult<Thread> {
        let coins = self.market.trending(TRENDING_LIMIT).await?;
        if coins.is_empty() {
            return Err(SourceError::new(SourceErrorKind::Empty(
                "trending tokens".to_string(),
            )));
        }
        two_post_thread(trending_post(&coins), chinese_trending_post(&coins))
    }

    async fn upcoming_projects_thread(&self) -> SourceResult<Thread> {
        let projects = self.rotated(PROJECTS, "projects")?;
        two_post_thread(projects_post(&projects), chinese_projects_post(&projects))
    }

    #[instrument(skip(self))]
    async fn market_thread(&self) -> SourceResult<Thread> {
        let snapshot = self.market.snapshot(&self.token_id).await?;
        two_post_thread(market_post(&snapshot), chinese_market_post(&snapshot))
    }

    async fn insight(&self) -> SourceResult<String> {
        let insight = self.pick(INSIGHTS, "insights")?;
        Ok(format!(
            "BNB Insight 💡\n\n{}\n\n\
             Understanding the fundamentals helps build long-term confidence in your investments.\n\n\
             #BNB #Binance #CryptoEducation #DeFi",
            insight
        ))
    }

    async fn tip(&self) -> SourceResult<String> {
        let tip = self.pick(SECURITY_TIPS, "security tips")?;
        Ok(format!(
            "BNB Security Tip 🔒\n\n{}\n\n\
             Protecting your investments is as important as making them.\n\n\
             #BNB #Security #Crypto #Binance",
            tip
        ))
    }

    async fn educational(&self) -> SourceResult<String> {
        let topic = self.pick(TOPICS, "educational topics")?;
        Ok(format!(
            "BNB Education 📚\n\n{}\n\n{}\n\n{}",
            topic.title, topic.content, topic.hashtags
        ))
    }

    #[instrument(skip(self))]
    async fn themed_verse_thread(&self) -> SourceResult<Thread> {
        let theme = match self.market.snapshot(&self.token_id).await {
            Ok(snapshot) => market_theme(*snapshot.change_24h_pct()),
            Err(e) => {
                warn!(error = %e, "No market data, using faith theme");
                Theme::Faith
            }
        };
        let verse = self.verse_for(theme).await?;
        two_post_thread(verse.english_post(), verse.chinese_post())
    }

    #[instrument(skip_all, fields(post = %post.id(), theme = %theme))]
    async fn reply_text(&self, post: &FetchedPost, theme: Theme) -> SourceResult<String> {
        let verse = self.verse_for(theme).await?;
        Ok(verse.english_post())
    }
}
