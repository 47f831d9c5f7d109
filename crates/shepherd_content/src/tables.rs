//! Static content: book names, theme verse lists and BNB post material.

use chrono::Weekday;
use shepherd_core::Theme;

/// Book key, English name and Chinese name.
pub(crate) const CHINESE_BOOKS: &[(&str, &str, &str)] = &[
    ("genesis", "Genesis", "创世记"),
    ("exodus", "Exodus", "出埃及记"),
    ("leviticus", "Leviticus", "利未记"),
    ("numbers", "Numbers", "民数记"),
    ("deuteronomy", "Deuteronomy", "申命记"),
    ("joshua", "Joshua", "约书亚记"),
    ("judges", "Judges", "士师记"),
    ("ruth", "Ruth", "路得记"),
    ("1samuel", "1 Samuel", "撒母耳记上"),
    ("2samuel", "2 Samuel", "撒母耳记下"),
    ("1kings", "1 Kings", "列王纪上"),
    ("2kings", "2 Kings", "列王纪下"),
    ("1chronicles", "1 Chronicles", "历代志上"),
    ("2chronicles", "2 Chronicles", "历代志下"),
    ("ezra", "Ezra", "以斯拉记"),
    ("nehemiah", "Nehemiah", "尼希米记"),
    ("esther", "Esther", "以斯帖记"),
    ("job", "Job", "约伯记"),
    ("psalms", "Psalms", "诗篇"),
    ("psalm", "Psalm", "诗篇"),
    ("proverbs", "Proverbs", "箴言"),
    ("ecclesiastes", "Ecclesiastes", "传道书"),
    ("songofsolomon", "Song of Solomon", "雅歌"),
    ("isaiah", "Isaiah", "以赛亚书"),
    ("jeremiah", "Jeremiah", "耶利米书"),
    ("lamentations", "Lamentations", "耶利米哀歌"),
    ("ezekiel", "Ezekiel", "以西结书"),
    ("daniel", "Daniel", "但以理书"),
    ("hosea", "Hosea", "何西阿书"),
    ("joel", "Joel", "约珥书"),
    ("amos", "Amos", "阿摩司书"),
    ("obadiah", "Obadiah", "俄巴底亚书"),
    ("jonah", "Jonah", "约拿书"),
    ("micah", "Micah", "弥迦书"),
    ("nahum", "Nahum", "那鸿书"),
    ("habakkuk", "Habakkuk", "哈巴谷书"),
    ("zephaniah", "Zephaniah", "西番雅书"),
    ("haggai", "Haggai", "哈该书"),
    ("zechariah", "Zechariah", "撒迦利亚书"),
    ("malachi", "Malachi", "玛拉基书"),
    ("matthew", "Matthew", "马太福音"),
    ("mark", "Mark", "马可福音"),
    ("luke", "Luke", "路加福音"),
    ("john", "John", "约翰福音"),
    ("acts", "Acts", "使徒行传"),
    ("romans", "Romans", "罗马书"),
    ("1corinthians", "1 Corinthians", "哥林多前书"),
    ("2corinthians", "2 Corinthians", "哥林多后书"),
    ("galatians", "Galatians", "加拉太书"),
    ("ephesians", "Ephesians", "以弗所书"),
    ("philippians", "Philippians", "腓立比书"),
    ("colossians", "Colossians", "歌罗西书"),
    ("1thessalonians", "1 Thessalonians", "帖撒罗尼迦前书"),
    ("2thessalonians", "2 Thessalonians", "帖撒罗尼迦后书"),
    ("1timothy", "1 Timothy", "提摩太前书"),
    ("2timothy", "2 Timothy", "提摩太后书"),
    ("titus", "Titus", "提多书"),
    ("philemon", "Philemon", "腓利门书"),
    ("hebrews", "Hebrews", "希伯来书"),
    ("james", "James", "雅各书"),
    ("1peter", "1 Peter", "彼得前书"),
    ("2peter", "2 Peter", "彼得后书"),
    ("1john", "1 John", "约翰一书"),
    ("2john", "2 John", "约翰二书"),
    ("3john", "3 John", "约翰三书"),
    ("jude", "Jude", "犹大书"),
    ("revelation", "Revelation", "启示录"),
];

/// Theme for each weekday's morning thread.
pub fn daily_theme(day: Weekday) -> Theme {
    match day {
        Weekday::Mon => Theme::Hope,
        Weekday::Tue => Theme::Wisdom,
        Weekday::Wed => Theme::Perseverance,
        Weekday::Thu => Theme::Faith,
        Weekday::Fri => Theme::Love,
        Weekday::Sat => Theme::Peace,
        Weekday::Sun => Theme::Gratitude,
    }
}

/// Morning verse for a weekday theme. Themes outside the weekly cycle use
/// their first suggestion.
pub fn morning_verse(theme: Theme) -> &'static str {
    match theme {
        Theme::Hope => "Jeremiah 29:11",
        Theme::Wisdom => "Proverbs 3:5-6",
        Theme::Perseverance => "Romans 5:3-4",
        Theme::Faith => "Hebrews 11:1",
        Theme::Love => "1 Corinthians 13:4-7",
        Theme::Peace => "Philippians 4:7",
        Theme::Gratitude => "1 Thessalonians 5:18",
        other => theme_verses(other).first().copied().unwrap_or("John 3:16"),
    }
}

/// Verses tried when a themed lookup fails.
pub const FALLBACK_VERSES: &[&str] = &["John 3:16", "Psalm 23:1", "Romans 8:28"];

/// English and Chinese text used when no morning verse can be fetched.
pub const FALLBACK_ENGLISH_POST: &str = "The Lord is my shepherd; I shall not want.\n\n— Psalm 23:1";
/// Chinese counterpart of [`FALLBACK_ENGLISH_POST`].
pub const FALLBACK_CHINESE_POST: &str = "耶和华是我的牧者，我必不致缺乏。\n\n— 诗篇 23:1";

/// Suggested verses for a theme. Patience shares the faith list.
pub fn theme_verses(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::Hope => HOPE_VERSES,
        Theme::Wisdom => WISDOM_VERSES,
        Theme::Perseverance => PERSEVERANCE_VERSES,
        Theme::Faith | Theme::Patience => FAITH_VERSES,
        Theme::Love => LOVE_VERSES,
        Theme::Peace => PEACE_VERSES,
        Theme::Gratitude => GRATITUDE_VERSES,
        Theme::Strength => STRENGTH_VERSES,
        Theme::Joy => JOY_VERSES,
        Theme::Grace => GRACE_VERSES,
        Theme::MarketCrash => MARKET_CRASH_VERSES,
        Theme::Crypto => CRYPTO_VERSES,
        Theme::Finance => FINANCE_VERSES,
    }
}

const HOPE_VERSES: &[&str] = &[
    "Romans 15:13", "Jeremiah 29:11", "Psalm 27:14", "Isaiah 40:31",
    "Lamentations 3:22-23", "Romans 8:28", "Psalm 31:24", "Isaiah 41:10",
    "Romans 12:12", "Psalm 62:5", "1 Corinthians 13:13", "Psalm 33:18",
    "Isaiah 25:9", "Romans 5:5", "Titus 2:13", "1 Timothy 4:10",
    "Psalm 71:14", "Isaiah 26:3", "Romans 15:4", "Hebrews 6:19",
];
const WISDOM_VERSES: &[&str] = &[
    "Proverbs 3:5-6", "James 1:5", "Proverbs 16:16", "Proverbs 9:10",
    "Psalm 111:10", "Proverbs 2:6", "Colossians 2:3", "1 Corinthians 1:25",
    "Proverbs 4:7", "Ecclesiastes 7:12", "Job 28:28", "Proverbs 1:7",
    "Psalm 19:7", "Proverbs 8:11", "Daniel 2:20", "Proverbs 3:13",
    "Ecclesiastes 2:26", "Proverbs 24:3-4", "James 3:17", "Proverbs 19:8",
];
const PERSEVERANCE_VERSES: &[&str] = &[
    "Romans 5:3-4", "Hebrews 12:1", "Galatians 6:9", "James 1:12",
    "2 Timothy 4:7-8", "1 Corinthians 9:24", "Philippians 3:14", "Hebrews 10:36",
    "Romans 8:25", "1 Thessalonians 1:3", "2 Thessalonians 3:13", "Revelation 2:3",
    "Matthew 24:13", "Luke 21:19", "Acts 14:22", "Romans 2:7",
    "Colossians 1:11", "2 Timothy 2:12", "Hebrews 6:15", "James 5:11",
];
const FAITH_VERSES: &[&str] = &[
    "Hebrews 11:1", "Mark 11:22", "2 Corinthians 5:7", "Romans 10:17",
    "Galatians 2:20", "Ephesians 2:8", "James 2:17", "1 Peter 1:8-9",
    "John 3:16", "Matthew 17:20", "Mark 9:23", "Luke 17:6",
    "Romans 4:20-21", "Hebrews 11:6", "1 John 5:4", "Revelation 2:10",
    "Matthew 21:21", "Mark 11:22-24", "Luke 18:8", "John 14:1",
];
const LOVE_VERSES: &[&str] = &[
    "1 Corinthians 13:4-7", "John 3:16", "Romans 8:38-39", "1 John 4:19",
    "Ephesians 5:25", "Song of Solomon 8:7", "1 Peter 4:8", "Proverbs 10:12",
    "1 John 3:16", "Romans 13:10", "Galatians 5:22-23", "1 Corinthians 16:14",
    "Colossians 3:14", "1 John 4:7-8", "Matthew 22:37-39", "John 13:34-35",
    "1 John 4:16", "Romans 5:8", "Ephesians 3:17-19", "1 Corinthians 13:13",
];
const PEACE_VERSES: &[&str] = &[
    "Philippians 4:7", "John 14:27", "Isaiah 26:3", "Romans 5:1",
    "Colossians 3:15", "Psalm 29:11", "Isaiah 9:6", "Matthew 5:9",
    "Romans 8:6", "Galatians 5:22", "Ephesians 2:14", "2 Thessalonians 3:16",
    "Psalm 4:8", "Isaiah 32:17", "John 16:33", "Psalm 85:8",
    "Isaiah 54:10", "Romans 14:17", "Philippians 4:9", "Colossians 1:20",
];
const GRATITUDE_VERSES: &[&str] = &[
    "1 Thessalonians 5:18", "Psalm 100:4", "Colossians 3:17", "Ephesians 5:20",
    "Psalm 107:1", "Psalm 118:1", "Psalm 136:1", "2 Corinthians 9:15",
    "Psalm 95:2", "Psalm 96:2", "Psalm 98:1", "Psalm 105:1",
    "Psalm 106:1", "Psalm 111:1", "Psalm 112:1", "Psalm 113:1",
    "Psalm 117:1", "Psalm 135:1", "Psalm 138:1", "Psalm 139:14",
];
const STRENGTH_VERSES: &[&str] = &[
    "Philippians 4:13", "Isaiah 40:31", "Psalm 18:2", "2 Corinthians 12:9",
    "Ephesians 6:10", "Psalm 27:1", "Isaiah 41:10", "Deuteronomy 31:6",
    "Joshua 1:9", "Psalm 46:1", "Isaiah 12:2", "Nahum 1:7",
    "Psalm 28:7", "2 Samuel 22:33", "Psalm 18:32", "Exodus 15:2",
    "Psalm 59:17", "Isaiah 25:4", "2 Chronicles 20:15", "Psalm 29:11",
];
const JOY_VERSES: &[&str] = &[
    "Nehemiah 8:10", "Psalm 16:11", "Galatians 5:22", "Philippians 4:4",
    "1 Thessalonians 5:16", "Psalm 30:5", "Isaiah 12:3", "Luke 2:10",
    "Acts 13:52", "Romans 15:13", "1 Peter 1:8", "Psalm 28:7",
    "Habakkuk 3:18", "John 15:11", "Psalm 97:11", "Psalm 126:3",
    "Isaiah 35:10", "Luke 15:7", "Acts 8:8", "Romans 14:17",
];
const GRACE_VERSES: &[&str] = &[
    "Ephesians 2:8-9", "Romans 3:23-24", "2 Corinthians 12:9", "Titus 2:11",
    "Romans 5:20", "Ephesians 1:7", "Romans 6:14", "2 Corinthians 9:8",
    "Hebrews 4:16", "James 4:6", "1 Peter 5:10", "John 1:16-17",
    "Romans 11:6", "Galatians 2:21", "Ephesians 2:5", "Colossians 1:6",
    "2 Timothy 1:9", "Titus 3:7", "Hebrews 13:9", "1 Peter 1:13",
];
const MARKET_CRASH_VERSES: &[&str] = &[
    "Matthew 6:19-21", "Proverbs 23:4-5", "Luke 12:15", "Ecclesiastes 5:10",
    "1 Timothy 6:9-10", "Proverbs 11:28", "Matthew 6:24", "Luke 16:13",
    "Proverbs 13:11", "Proverbs 22:7", "Ecclesiastes 2:18-19", "Psalm 49:6-7",
    "Proverbs 15:16", "Proverbs 16:8", "Proverbs 28:20", "Ecclesiastes 4:6",
    "Matthew 19:24", "Mark 10:25", "Luke 18:25", "1 Timothy 6:17",
];
const CRYPTO_VERSES: &[&str] = &[
    "Proverbs 13:11", "Luke 16:11", "Matthew 25:14-30", "Proverbs 21:5",
    "Proverbs 24:3-4", "Ecclesiastes 11:2", "Proverbs 27:23-24", "Luke 14:28-30",
    "Proverbs 6:6-8", "Proverbs 10:4", "Proverbs 12:11", "Proverbs 14:23",
    "Proverbs 20:4", "Proverbs 21:20", "Proverbs 22:3", "Proverbs 24:27",
    "Proverbs 28:19", "Ecclesiastes 5:13", "Luke 19:12-26", "Matthew 6:33",
];
const FINANCE_VERSES: &[&str] = &[
    "Proverbs 22:7", "1 Timothy 6:10", "Malachi 3:10", "Proverbs 3:9-10",
    "Proverbs 11:24-25", "2 Corinthians 9:6-7", "Luke 6:38", "Proverbs 19:17",
    "Proverbs 28:27", "Deuteronomy 15:10", "Proverbs 14:31", "Proverbs 21:13",
    "Proverbs 22:9", "Proverbs 28:8", "Ecclesiastes 11:1", "Proverbs 13:22",
    "Proverbs 19:4", "Proverbs 21:20", "Proverbs 22:16", "Proverbs 28:20",
];

/// One-line facts about the BNB ecosystem.
pub const INSIGHTS: &[&str] = &[
    "BNB powers the Binance Smart Chain ecosystem",
    "Used for trading fee discounts on Binance",
    "Governance token for BSC network decisions",
    "Burning mechanism reduces supply over time",
    "Multi-chain utility across BSC and other networks",
    "Staking rewards available for holders",
    "Integration with DeFi protocols",
    "NFT marketplace and gaming applications",
];

/// Account and wallet safety advice.
pub const SECURITY_TIPS: &[&str] = &[
    "Always use official Binance channels for support",
    "Enable 2FA on your Binance account",
    "Store BNB in hardware wallets for long-term holding",
    "Never share your private keys or seed phrases",
    "Verify transaction addresses before sending",
    "Use official BSC network for BNB transactions",
    "Keep your software wallets updated",
    "Be cautious of phishing websites and fake apps",
];

/// Educational topic: title, body and hashtags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    /// Headline.
    pub title: &'static str,
    /// Explanation.
    pub content: &'static str,
    /// Trailing hashtags.
    pub hashtags: &'static str,
}

/// Educational topics.
pub const TOPICS: &[Topic] = &[
    Topic {
        title: "What is BNB?",
        content: "BNB (Binance Coin) is the native cryptocurrency of the Binance ecosystem, used for trading fees, staking, and governance.",
        hashtags: "#BNB #Binance #CryptoEducation",
    },
    Topic {
        title: "BNB Burning Mechanism",
        content: "Binance burns BNB tokens quarterly, reducing supply and potentially increasing value over time.",
        hashtags: "#BNB #Tokenomics #Deflationary",
    },
    Topic {
        title: "BSC vs Ethereum",
        content: "Binance Smart Chain offers lower fees and faster transactions compared to Ethereum, while maintaining compatibility.",
        hashtags: "#BSC #Ethereum #DeFi #BNB",
    },
    Topic {
        title: "BNB Staking Rewards",
        content: "Stake BNB to earn rewards while supporting network security and governance.",
        hashtags: "#BNB #Staking #Rewards #Governance",
    },
];

/// Curated ecosystem headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsItem {
    /// Headline.
    pub title: &'static str,
    /// One-sentence summary.
    pub summary: &'static str,
}

/// Ecosystem headlines, most important first.
pub const NEWS_ITEMS: &[NewsItem] = &[
    NewsItem {
        title: "YZi Labs Launches $1B Builder Fund",
        summary: "Binance's venture arm announces massive funding for BNB ecosystem projects",
    },
    NewsItem {
        title: "BSC Network Upgrades",
        summary: "Latest BSC network improvements enhance transaction speed and reduce fees",
    },
    NewsItem {
        title: "New DeFi Protocols Launch",
        summary: "Several innovative DeFi projects launch on BSC this week",
    },
    NewsItem {
        title: "BNB Token Burn",
        summary: "Latest quarterly BNB burn reduces circulating supply",
    },
    NewsItem {
        title: "Cross-Chain Bridge Updates",
        summary: "Enhanced cross-chain capabilities for BSC ecosystem",
    },
];

/// Who funds an upcoming project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Backer {
    /// Binance's venture arm.
    #[strum(serialize = "YZi Labs")]
    YziLabs,
    /// Binance itself.
    #[strum(serialize = "Binance")]
    Binance,
}

/// Upcoming ecosystem project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    /// Project name.
    pub name: &'static str,
    /// Sector, e.g. `DeFi`.
    pub category: &'static str,
    /// Funding source.
    pub backer: Backer,
}

/// Upcoming projects in announcement order.
pub const PROJECTS: &[Project] = &[
    Project { name: "Aster", category: "DeFi", backer: Backer::YziLabs },
    Project { name: "Blum", category: "AI/DeFi", backer: Backer::YziLabs },
    Project { name: "Sahara AI", category: "AI", backer: Backer::YziLabs },
    Project { name: "Perena", category: "RWA", backer: Backer::YziLabs },
    Project { name: "Sophon", category: "DeSci", backer: Backer::YziLabs },
    Project { name: "BSC Gaming Hub", category: "Gaming", backer: Backer::Binance },
    Project { name: "Green BSC", category: "Sustainability", backer: Backer::Binance },
];

/// CoinGecko ids of BSC ecosystem tokens, in priority order.
pub const BSC_TOKENS: &[&str] = &[
    "binancecoin", "pancakeswap-token", "trust-wallet-token", "venus-bnb",
    "alpaca-finance", "autofarm", "beefy-finance", "bunny", "cake",
    "venus", "bakeryswap", "burger-swap", "dodo", "ellipsis",
    "mdex", "pancakebunny", "safemoon", "swipe", "tokens-of-babel",
    "waultswap", "bscpad", "bscstarter", "bscx", "bunnypark",
    "goose-finance", "jetswap", "knightswap", "moonpot", "pancake-hunny",
];
