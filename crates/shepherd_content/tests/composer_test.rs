//! Tests for post composition, theme selection and reference mapping.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use shepherd_content::{
    Backer, FALLBACK_CHINESE_POST, FALLBACK_ENGLISH_POST, INSIGHTS, KeywordThemeSelector,
    NEWS_ITEMS, NewsItem, PROJECTS, Project, RoutineComposer, SECURITY_TIPS, VerseReference,
    chinese_book_name, chinese_projects_post, keyword_eligible, keyword_theme, market_post,
    market_theme, news_post, projects_post, theme_verses, trending_post,
};
use shepherd_core::{BilingualVerse, FetchedPost, MarketSnapshot, PostId, Theme, TrendingCoin};
use shepherd_error::{SourceError, SourceErrorKind, SourceResult};
use shepherd_interface::{ContentComposer, MarketSource, ThemeSelector, VerseSource};
use std::sync::{Arc, Mutex};

/// Answers every lookup unless the reference is listed as failing.
#[derive(Default)]
struct FakeVerses {
    failing: Vec<String>,
    fail_all: bool,
    lookups: Mutex<Vec<String>>,
}

impl FakeVerses {
    fn lookups(&self) -> Vec<String> {
        self.lookups.lock().expect("Lock").clone()
    }
}

#[async_trait]
impl VerseSource for FakeVerses {
    async fn lookup(&self, reference: &str) -> SourceResult<BilingualVerse> {
        self.lookups.lock().expect("Lock").push(reference.to_string());
        if self.fail_all || self.failing.iter().any(|r| r == reference) {
            return Err(SourceError::new(SourceErrorKind::Http("offline".into())));
        }
        let parsed = VerseReference::parse(reference)?;
        Ok(BilingualVerse::new(
            parsed.english(),
            format!("english {}", reference),
            parsed.chinese(),
            format!("中文 {}", reference),
        ))
    }
}

struct FakeMarket {
    change: Option<f64>,
    coins: Vec<TrendingCoin>,
}

fn sample_coins() -> Vec<TrendingCoin> {
    vec![
        TrendingCoin::new("pancakeswap-token", "PancakeSwap", "cake", 2.5, 4.2, Some(90)),
        TrendingCoin::new("safemoon", "SafeMoon", "sfm", 0.0000412, -3.0, None),
    ]
}

#[async_trait]
impl MarketSource for FakeMarket {
    async fn snapshot(&self, token_id: &str) -> SourceResult<MarketSnapshot> {
        match self.change {
            Some(change) => Ok(MarketSnapshot::new(
                token_id,
                612.5,
                change,
                1_234_567.0,
                Utc::now(),
            )),
            None => Err(SourceError::new(SourceErrorKind::Status(503))),
        }
    }

    async fn trending(&self, limit: usize) -> SourceResult<Vec<TrendingCoin>> {
        if self.change.is_none() {
            return Err(SourceError::new(SourceErrorKind::Status(503)));
        }
        Ok(self.coins.iter().take(limit).cloned().collect())
    }
}

fn composer(verses: Arc<FakeVerses>, change: Option<f64>) -> RoutineComposer {
    RoutineComposer::new(
        verses,
        Arc::new(FakeMarket {
            change,
            coins: sample_coins(),
        }),
    )
    .with_seed(7)
}

#[tokio::test]
async fn test_morning_thread_uses_weekday_theme() {
    let verses = Arc::new(FakeVerses::default());
    let composer = composer(Arc::clone(&verses), Some(1.0));
    // 2026-10-16 is a Friday.
    let friday = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();

    let thread = composer.morning_thread(friday).await.expect("Thread");

    assert_eq!(verses.lookups(), vec!["1 Corinthians 13:4-7"]);
    assert_eq!(
        thread.posts(),
        &[
            "english 1 Corinthians 13:4-7\n\n— 1 Corinthians 13:4-7".to_string(),
            "中文 1 Corinthians 13:4-7\n\n— 哥林多前书 13:4-7".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_morning_thread_falls_back_to_psalm() {
    let verses = Arc::new(FakeVerses {
        fail_all: true,
        ..Default::default()
    });
    let composer = composer(verses, Some(1.0));
    let monday = Utc.with_ymd_and_hms(2026, 10, 12, 8, 0, 0).unwrap();

    let thread = composer.morning_thread(monday).await.expect("Fallback thread");

    assert_eq!(
        thread.posts(),
        &[
            FALLBACK_ENGLISH_POST.to_string(),
            FALLBACK_CHINESE_POST.to_string()
        ]
    );
}

#[tokio::test]
async fn test_market_thread_is_bilingual() {
    let composer = composer(Arc::new(FakeVerses::default()), Some(-2.5));

    let thread = composer.market_thread().await.expect("Thread");

    assert_eq!(thread.len(), 2);
    assert!(thread.posts()[0].starts_with("BNB Market Analysis (24h)"));
    assert!(thread.posts()[0].contains("📉 Price: $612.50 (-2.50%)"));
    assert!(thread.posts()[0].contains("Volume: $1,234,567"));
    assert!(thread.posts()[1].contains("价格: $612.50"));
}

#[tokio::test]
async fn test_market_thread_fails_without_data() {
    let composer = composer(Arc::new(FakeVerses::default()), None);

    let err = composer.market_thread().await.expect_err("No data");

    assert_eq!(err.kind, SourceErrorKind::Status(503));
}

#[tokio::test]
async fn test_news_thread_is_bilingual() {
    let composer = composer(Arc::new(FakeVerses::default()), Some(0.0));

    let thread = composer.ecosystem_news_thread().await.expect("Thread");

    assert_eq!(thread.len(), 2);
    assert!(thread.posts()[0].starts_with("BNB Ecosystem News (24h)\n\n1. "));
    assert!(thread.posts()[0].ends_with("#BNB #BSC #Ecosystem #News"));
    assert!(thread.posts()[1].starts_with("BNB生态系统新闻 (24小时)"));
    assert!(NEWS_ITEMS.iter().any(|n| thread.posts()[1].contains(n.title)));
}

#[test]
fn test_news_post_shortens_long_titles() {
    let items = [
        NewsItem {
            title: "An Extremely Long Ecosystem Headline That Keeps Going",
            summary: "",
        },
        NewsItem {
            title: "Short",
            summary: "",
        },
        NewsItem {
            title: "Not shown in English",
            summary: "",
        },
    ];

    let post = news_post(&items);

    assert!(post.contains("1. An Extremely Long Ecosystem Headline ...\n"));
    assert!(post.contains("2. Short\n"));
    assert!(!post.contains("Not shown"));
}

#[tokio::test]
async fn test_trending_thread_lists_coins() {
    let composer = composer(Arc::new(FakeVerses::default()), Some(0.0));

    let thread = composer.trending_coins_thread().await.expect("Thread");

    let english = &thread.posts()[0];
    assert!(english.starts_with("🔥 BSC Ecosystem Trending Coins (24h)"));
    assert!(english.contains("1. PancakeSwap (CAKE)\n   $2.50 📈 +4.20%"));
    assert!(english.contains("2. SafeMoon (SFM)\n   $0.000041 📉 -3.00%"));
    assert!(thread.posts()[1].starts_with("BSC生态系统热门代币 (24小时)"));
    assert!(thread.posts()[1].ends_with("#BSC #BNB #DeFi #热门"));
}

#[tokio::test]
async fn test_trending_thread_needs_coins() {
    let empty = RoutineComposer::new(
        Arc::new(FakeVerses::default()),
        Arc::new(FakeMarket {
            change: Some(0.0),
            coins: Vec::new(),
        }),
    );
    let err = empty.trending_coins_thread().await.expect_err("No coins");
    assert!(matches!(err.kind, SourceErrorKind::Empty(_)));

    let offline = composer(Arc::new(FakeVerses::default()), None);
    let err = offline
        .trending_coins_thread()
        .await
        .expect_err("Market down");
    assert_eq!(err.kind, SourceErrorKind::Status(503));
}

#[test]
fn test_trending_post_caps_list() {
    let coins: Vec<TrendingCoin> = (0..8)
        .map(|i| TrendingCoin::new(format!("t{i}"), format!("Token {i}"), "t", 1.0, 0.0, None))
        .collect();

    let post = trending_post(&coins);

    assert!(post.contains("5. Token 4"));
    assert!(!post.contains("Token 5"));
}

#[tokio::test]
async fn test_projects_thread_groups_by_backer() {
    let composer = composer(Arc::new(FakeVerses::default()), Some(0.0));

    let thread = composer.upcoming_projects_thread().await.expect("Thread");

    assert!(thread.posts()[0].starts_with("Upcoming BNB Projects & Investments"));
    assert!(thread.posts()[0].contains("YZi Labs Backed:\n• "));
    assert!(thread.posts()[0].contains("Binance Supported:\n• "));
    assert!(thread.posts()[1].contains("币安支持:"));
}

#[test]
fn test_projects_posts_take_fixed_counts() {
    let english = projects_post(PROJECTS);
    assert!(english.contains("• Aster (DeFi)\n• Blum (AI/DeFi)\n"));
    assert!(!english.contains("Sahara AI"));
    assert!(english.contains("• BSC Gaming Hub (Gaming)\n"));
    assert!(!english.contains("Green BSC"));

    let chinese = chinese_projects_post(PROJECTS);
    assert!(chinese.contains("Sahara AI"));
    assert!(chinese.contains("Green BSC"));

    let binance_only: Vec<Project> = PROJECTS
        .iter()
        .copied()
        .filter(|p| p.backer == Backer::Binance)
        .collect();
    assert!(!projects_post(&binance_only).contains("YZi Labs"));
}

#[tokio::test]
async fn test_themed_verse_follows_market() {
    let verses = Arc::new(FakeVerses::default());
    let composer = composer(Arc::clone(&verses), Some(12.0));

    composer.themed_verse_thread().await.expect("Thread");

    let looked_up = verses.lookups();
    assert_eq!(looked_up.len(), 1);
    assert!(theme_verses(Theme::Gratitude).contains(&looked_up[0].as_str()));
}

#[tokio::test]
async fn test_themed_verse_without_market_uses_faith() {
    let verses = Arc::new(FakeVerses::default());
    let composer = composer(Arc::clone(&verses), None);

    composer.themed_verse_thread().await.expect("Thread");

    assert!(theme_verses(Theme::Faith).contains(&verses.lookups()[0].as_str()));
}

#[tokio::test]
async fn test_reply_falls_back_to_known_verses() {
    let failing = theme_verses(Theme::Peace)
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>();
    let verses = Arc::new(FakeVerses {
        failing,
        ..Default::default()
    });
    let composer = composer(Arc::clone(&verses), Some(0.0));
    let post = FetchedPost::new(PostId::new("1"), "calm markets", None);

    let text = composer.reply_text(&post, Theme::Peace).await.expect("Reply");

    assert_eq!(text, "english John 3:16\n\n— John 3:16");
    assert_eq!(verses.lookups().len(), 2);
}

#[tokio::test]
async fn test_reply_fails_when_every_lookup_fails() {
    let verses = Arc::new(FakeVerses {
        fail_all: true,
        ..Default::default()
    });
    let composer = composer(Arc::clone(&verses), Some(0.0));
    let post = FetchedPost::new(PostId::new("1"), "bitcoin", None);

    assert!(composer.reply_text(&post, Theme::Crypto).await.is_err());
    assert_eq!(verses.lookups().len(), 4);
}

#[tokio::test]
async fn test_static_posts_come_from_tables() {
    let composer = composer(Arc::new(FakeVerses::default()), Some(0.0));

    let insight = composer.insight().await.expect("Insight");
    let tip = composer.tip().await.expect("Tip");
    let educational = composer.educational().await.expect("Educational");

    assert!(insight.starts_with("BNB Insight 💡\n\n"));
    assert!(INSIGHTS.iter().any(|i| insight.contains(i)));
    assert!(tip.starts_with("BNB Security Tip 🔒\n\n"));
    assert!(SECURITY_TIPS.iter().any(|t| tip.contains(t)));
    assert!(educational.starts_with("BNB Education 📚\n\n"));
}

#[tokio::test]
async fn test_keyword_selector() {
    let selector = KeywordThemeSelector;

    assert_eq!(selector.classify("Markets crash again").await, Theme::MarketCrash);
    assert_eq!(selector.classify("Ethereum upgrade shipped").await, Theme::Crypto);
    assert_eq!(selector.classify("gm frens").await, Theme::Wisdom);
    assert!(selector.is_eligible("New TRADING pairs listed").await);
    assert!(!selector.is_eligible("Happy birthday!").await);
}

#[test]
fn test_keyword_theme_order() {
    // Crash keywords win over finance keywords in the same post.
    assert_eq!(keyword_theme("market crash"), Theme::MarketCrash);
    assert_eq!(keyword_theme("so grateful today"), Theme::Gratitude);
    assert_eq!(keyword_theme("staying calm"), Theme::Peace);
    assert!(keyword_eligible("business update"));
}

#[test]
fn test_market_theme_thresholds() {
    assert_eq!(market_theme(15.0), Theme::Gratitude);
    assert_eq!(market_theme(10.0), Theme::Joy);
    assert_eq!(market_theme(5.0), Theme::Hope);
    assert_eq!(market_theme(0.0), Theme::Patience);
    assert_eq!(market_theme(-5.0), Theme::Perseverance);
    assert_eq!(market_theme(-10.0), Theme::Strength);
}

#[test]
fn test_reference_mapping() {
    let song = VerseReference::parse("song of solomon 8:7").expect("Parsed");
    assert_eq!(song.english(), "Song of Solomon 8:7");
    assert_eq!(song.chinese(), "雅歌 8:7");
    assert_eq!(song.api_path(), "song+of+solomon+8:7");

    assert_eq!(chinese_book_name("Psalm"), Some("诗篇"));
    assert_eq!(chinese_book_name("3 John"), Some("约翰三书"));
    assert_eq!(chinese_book_name("Hezekiah"), None);

    assert!(VerseReference::parse("John").is_err());
    assert!(VerseReference::parse("John three:16").is_err());
}

#[test]
fn test_market_post_flat_change() {
    let snapshot = MarketSnapshot::new("binancecoin", 1000.0, 0.0, 0.0, Utc::now());
    assert!(market_post(&snapshot).contains("➡️ Price: $1,000.00 (+0.00%)"));
}
