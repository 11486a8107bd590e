//! FITS header card model
//!
//! Headers are kept as an ordered list of cards so a copied header keeps the
//! source's key order. Structural keywords are dropped when a header is built
//! from raw records: the writer regenerates them for the plane it writes.

/// Width of one FITS header record.
pub const RECORD_LEN: usize = 80;

const KEYWORD_LEN: usize = 8;
const HISTORY: &str = "HISTORY";

const STRUCTURAL_KEYWORDS: &[&str] = &[
    "SIMPLE", "BITPIX", "NAXIS", "EXTEND", "BZERO", "BSCALE", "BLANK", "XTENSION", "PCOUNT",
    "GCOUNT", "TFIELDS", "THEAP", "CHECKSUM", "DATASUM", "END", "ZIMAGE", "ZBITPIX", "ZCMPTYPE",
    "ZQUANTIZ", "ZDITHER0", "ZSIMPLE", "ZEXTEND", "ZBLOCKED", "ZTENSION", "ZPCOUNT", "ZGCOUNT",
    "ZHECKSUM", "ZDATASUM", "ZBLANK", "ZSCALE", "ZZERO", "ZNAXIS",
];

/// Keyword families followed by an axis or column index.
const STRUCTURAL_PREFIXES: &[&str] = &[
    "NAXIS", "TTYPE", "TFORM", "TUNIT", "TSCAL", "TZERO", "ZNAXIS", "ZTILE", "ZNAME", "ZVAL",
];

/// Returns true for keywords that describe the data layout rather than the image.
pub fn is_structural(keyword: &str) -> bool {
    if STRUCTURAL_KEYWORDS.contains(&keyword) {
        return true;
    }
    STRUCTURAL_PREFIXES.iter().any(|prefix| {
        keyword
            .strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    })
}

/// One header card.
///
/// Value cards keep their value in raw FITS notation (strings stay quoted) so
/// untouched cards are written back exactly as read. Commentary cards
/// (`HISTORY`, `COMMENT`, blank keyword, `CONTINUE`) have no value and keep the
/// text from column 9 onwards in `comment`.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub keyword: String,
    pub value: Option<String>,
    pub comment: Option<String>,
}

impl Card {
    pub fn string(keyword: &str, value: &str, comment: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            value: Some(quote(value)),
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        }
    }

    pub fn commentary(keyword: &str, text: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            value: None,
            comment: Some(text.to_string()),
        }
    }

    /// Parses one 80-column header record.
    pub fn parse(record: &str) -> Self {
        let record = record.trim_end_matches(['\0', '\n']);
        let split = record
            .char_indices()
            .nth(KEYWORD_LEN)
            .map_or(record.len(), |(i, _)| i);
        let (keyword, rest) = record.split_at(split);
        let keyword = keyword.trim().to_string();

        let Some(value_field) = rest.strip_prefix("= ") else {
            let text = rest.trim_end();
            return Self {
                keyword,
                value: None,
                comment: (!text.is_empty()).then(|| text.to_string()),
            };
        };

        let (value, comment) = split_value_comment(value_field);
        Self {
            keyword,
            value: (!value.is_empty()).then(|| value.to_string()),
            comment: comment
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    /// Renders the card as a single record of at most 80 columns.
    pub fn to_record(&self) -> String {
        let line = match &self.value {
            Some(value) => {
                let mut line = if value.starts_with('\'') {
                    format!("{:<8}= {:<20}", self.keyword, value)
                } else {
                    format!("{:<8}= {:>20}", self.keyword, value)
                };
                if let Some(comment) = &self.comment {
                    line.push_str(" / ");
                    line.push_str(comment);
                }
                line
            }
            None => format!(
                "{:<8}{}",
                self.keyword,
                self.comment.as_deref().unwrap_or_default()
            ),
        };
        line.chars().take(RECORD_LEN).collect()
    }

    /// String value with quotes and padding removed, `None` for non-string cards.
    pub fn string_value(&self) -> Option<String> {
        self.value.as_deref().and_then(unquote)
    }

    pub fn is_history(&self) -> bool {
        self.keyword == HISTORY
    }
}

/// Splits the value field of a card into the raw value and the optional comment.
fn split_value_comment(field: &str) -> (&str, Option<&str>) {
    let trimmed = field.trim_start();
    if trimmed.starts_with('\'') {
        let bytes = trimmed.as_bytes();
        let mut i = 1;
        while i < bytes.len() {
            if bytes[i] == b'\'' {
                if bytes.get(i + 1) == Some(&b'\'') {
                    i += 2;
                    continue;
                }
                let (value, rest) = trimmed.split_at(i + 1);
                let comment = rest.split_once('/').map(|(_, c)| c);
                return (value, comment);
            }
            i += 1;
        }
        // unterminated string, keep everything as the value
        return (trimmed.trim_end(), None);
    }

    match trimmed.split_once('/') {
        Some((value, comment)) => (value.trim(), Some(comment)),
        None => (trimmed.trim(), None),
    }
}

/// Quotes a string in FITS notation, padded to the 8-character minimum.
pub fn quote(value: &str) -> String {
    format!("'{:<8}'", value.replace('\'', "''"))
}

fn unquote(raw: &str) -> Option<String> {
    let inner = raw.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("''", "'").trim_end().to_string())
}

/// Ordered header of one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header from raw records, dropping structural keywords.
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cards = records
            .into_iter()
            .map(|record| Card::parse(record.as_ref()))
            .filter(|card| !is_structural(&card.keyword))
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, keyword: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.keyword == keyword)
    }

    pub fn get_str(&self, keyword: &str) -> Option<String> {
        self.get(keyword).and_then(Card::string_value)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Sets a string key with a comment, replacing an existing card in place.
    pub fn set_str(&mut self, keyword: &str, value: &str, comment: &str) {
        let card = Card::string(keyword, value, comment);
        match self.cards.iter_mut().find(|c| c.keyword == keyword) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
    }

    pub fn add_history(&mut self, line: impl AsRef<str>) {
        self.cards.push(Card::commentary(HISTORY, line.as_ref()));
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.cards
            .iter()
            .filter(|c| c.is_history())
            .map(|c| c.comment.as_deref().unwrap_or_default())
    }
}
