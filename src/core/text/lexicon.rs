use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// 封闭词类停用词：冠词、连词、常见介词、指示词
const STOPWORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although", "than",
    // prepositions
    "of", "in", "on", "at", "to", "for", "from", "by", "with", "about", "as", "into", "onto",
    "over", "under", "after", "before", "between", "through", "during", "without", "within",
    "against", "among", "upon", "off", "up", "down",
    // demonstratives
    "this", "that", "these", "those",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// 口语化标记：缩写形式或模糊措辞
static INFORMAL_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:can't|won't|don't|doesn't|didn't|isn't|aren't|wasn't|weren't|haven't|hasn't|hadn't|couldn't|shouldn't|wouldn't|i'm|i've|i'd|i'll|you're|we're|they're|it's|that's|there's|let's)\b|\b(?:maybe|perhaps|probably|i think|i guess|i feel|kinda|sorta|honestly|tbh|imo|lol)\b",
    )
    .expect("informal marker pattern is valid")
});

pub fn is_stopword(lower_word: &str) -> bool {
    STOPWORD_SET.contains(lower_word)
}

/// 输入需已把弯引号统一为 `'`
pub fn has_informal_markers(text: &str) -> bool {
    INFORMAL_MARKERS.is_match(text)
}
