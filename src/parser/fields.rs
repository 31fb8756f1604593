// Heuristic extraction of the tax year and total tax from raw text.
//
// Form 1040 layout varies by year and rendering engine, so positional
// parsing is unreliable. Each field runs an ordered list of named
// strategies; the first one that yields a value wins. Every strategy is
// a pure function of the text so it can be unit-tested on its own.
use once_cell::sync::Lazy;
use regex::Regex;

/// Upper sanity bound on a parsed tax amount, in whole dollars.
pub const MAX_TAX_AMOUNT: i64 = 100_000_000;

/// Characters of the blob the year-frequency fallback scans.
const YEAR_SCAN_WINDOW: usize = 1000;

/// Lines of context (the match line plus the next two) searched for a
/// dollar amount once a total-tax line is found.
const AMOUNT_WINDOW_LINES: usize = 3;

static FORM_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)form\s+1040[^\d]*(\d{4})").unwrap());
static CALENDAR_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:for|calendar)\s+(?:the\s+)?year\s+(\d{4})").unwrap());
static FALLBACK_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"20(?:19|2[0-4])").unwrap());

static LINE_24_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:line\s*)?24\b").unwrap());
static TOTAL_TAX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)total\s*tax").unwrap());
// These qualifiers mark a different tax line and must not match.
static EXCLUDED_TAX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)estimated|additional|self-employment").unwrap());

static DOLLAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?(\d[\d,]*(?:\.\d{1,2})?)").unwrap());
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());

type YearStrategy = fn(&str) -> Option<u16>;

const YEAR_STRATEGIES: &[(&str, YearStrategy)] = &[
    ("form-header", year_from_form_header),
    ("calendar-phrase", year_from_calendar_phrase),
    ("frequency-scan", year_from_frequency_scan),
];

/// Extract the tax year. Range enforcement is the caller's job.
pub fn extract_year(text: &str) -> Option<u16> {
    extract_year_named(text).map(|(_, year)| year)
}

/// Like `extract_year`, but also reports which strategy matched, for
/// progress traces and diagnostics.
pub fn extract_year_named(text: &str) -> Option<(&'static str, u16)> {
    YEAR_STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(text).map(|year| (*name, year)))
}

// "Form 1040 (2023)" and similar headers.
fn year_from_form_header(text: &str) -> Option<u16> {
    FORM_YEAR_RE
        .captures(text)
        .and_then(|c| c[1].parse().ok())
}

// "for the year 2023" / "For calendar year 2023".
fn year_from_calendar_phrase(text: &str) -> Option<u16> {
    CALENDAR_YEAR_RE
        .captures(text)
        .and_then(|c| c[1].parse().ok())
}

// Fallback: scan the start of the document for known-good years and
// take the most frequent. Ties go to the year seen first (stable count).
fn year_from_frequency_scan(text: &str) -> Option<u16> {
    let window: String = text.chars().take(YEAR_SCAN_WINDOW).collect();

    let mut counts: Vec<(u16, usize)> = Vec::new();
    for m in FALLBACK_YEAR_RE.find_iter(&window) {
        let year: u16 = match m.as_str().parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        match counts.iter_mut().find(|(y, _)| *y == year) {
            Some((_, n)) => *n += 1,
            None => counts.push((year, 1)),
        }
    }

    let mut best: Option<(u16, usize)> = None;
    for (year, n) in counts {
        match best {
            Some((_, best_n)) if n <= best_n => {}
            _ => best = Some((year, n)),
        }
    }
    best.map(|(year, _)| year)
}

/// Extract the total federal income tax (line 24), in whole dollars.
pub fn extract_income_tax(text: &str) -> Option<i64> {
    let lines: Vec<&str> = text.lines().collect();

    // Strategy 1: a line carrying both the line number and the label.
    for (i, line) in lines.iter().enumerate() {
        if LINE_24_RE.is_match(line) && TOTAL_TAX_RE.is_match(line) {
            if let Some(amount) = amount_near(&lines, i) {
                return Some(amount);
            }
        }
    }

    // Strategy 2: any "total tax" line that isn't a different tax line.
    for (i, line) in lines.iter().enumerate() {
        if TOTAL_TAX_RE.is_match(line) && !EXCLUDED_TAX_RE.is_match(line) {
            if let Some(amount) = amount_near(&lines, i) {
                return Some(amount);
            }
        }
    }

    None
}

// Search the match line plus the next two for a dollar amount. Lines
// are scanned one at a time so an amount never merges with the next
// line's leading line number; on the anchor line the scan starts after
// the "total tax" label so the line number (24) is never mistaken for
// the amount.
fn amount_near(lines: &[&str], index: usize) -> Option<i64> {
    let end = (index + AMOUNT_WINDOW_LINES).min(lines.len());
    for (offset, line) in lines[index..end].iter().enumerate() {
        let search_from = if offset == 0 {
            TOTAL_TAX_RE.find(line).map(|m| m.end()).unwrap_or(0)
        } else {
            0
        };
        if let Some(amount) = extract_dollar_amount(&line[search_from..]) {
            return Some(amount);
        }
    }
    None
}

/// Pull a plausible dollar amount out of a text window. Whitespace is
/// stripped first to survive "12 345" digit grouping. Candidates
/// outside [0, MAX_TAX_AMOUNT] are skipped; of the rest, the last one
/// wins, because form lines put cross-references ("Add lines 22 and
/// 23") before the dotted leader and the amount after it.
pub fn extract_dollar_amount(text: &str) -> Option<i64> {
    let clean: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    for pattern in [&*DOLLAR_RE, &*DIGITS_RE] {
        let mut found = None;
        for caps in pattern.captures_iter(&clean) {
            let digits = caps[1].replace(',', "");
            let Ok(value) = digits.parse::<f64>() else {
                continue;
            };
            if value >= 0.0 && value <= MAX_TAX_AMOUNT as f64 {
                found = Some(value.round() as i64);
            }
        }
        if found.is_some() {
            return found;
        }
    }

    None
}
