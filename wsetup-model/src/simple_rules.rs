//! Shoebox-style simple collation rules.
//!
//! Each non-blank line is one primary sort position, in order. Whitespace
//! separated segments on a line differ at the secondary level. Elements
//! grouped in parentheses differ only at the tertiary level:
//!
//! ```text
//! b B
//! (a A) ā
//! ```
//!
//! An element is a run of characters other than whitespace, `(`, `)` and
//! `\`, optionally including `\uXXXX` escapes. Every element may be
//! declared once.

use std::collections::{HashMap, HashSet};

use crate::collator::{Collator, SortKey};

/// Parsed simple rules: lines of segments of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleRules {
    lines: Vec<Vec<Vec<String>>>,
}

impl SimpleRules {
    /// Parses rule text. The error is a message suitable for showing to the user.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut rules = Self::default();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, raw_line) in text.split('\n').enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim_end_matches('\r');
            let segments = parse_line(line, &mut seen)
                .map_err(|msg| format!("{msg} (line {line_number})"))?;
            if !segments.is_empty() {
                rules.lines.push(segments);
            }
        }
        Ok(rules)
    }

    /// Primary lines, each a list of secondary segments of tertiary elements.
    #[must_use]
    pub fn lines(&self) -> &[Vec<Vec<String>>] {
        &self.lines
    }

    /// Whether no element is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the equivalent ICU tailoring.
    #[must_use]
    pub fn to_icu_rules(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let lines: Vec<String> = self
            .lines
            .iter()
            .map(|segments| {
                segments
                    .iter()
                    .map(|elements| {
                        elements
                            .iter()
                            .map(|e| icu_escape(e))
                            .collect::<Vec<_>>()
                            .join(" <<< ")
                    })
                    .collect::<Vec<_>>()
                    .join(" << ")
            })
            .collect();
        format!("&[before 1] [first regular] < {}", lines.join(" < "))
    }
}

fn is_element_char(c: char) -> bool {
    !matches!(c, ' ' | '\t' | '(' | ')' | '\\' | '\n' | '\r')
}

fn parse_line(line: &str, seen: &mut HashSet<String>) -> Result<Vec<Vec<String>>, String> {
    let mut segments = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| matches!(c, ' ' | '\t')).is_some() {}
        match chars.peek() {
            None => break,
            Some('(') => {
                chars.next();
                let mut elements = Vec::new();
                loop {
                    while chars.next_if(|c| matches!(c, ' ' | '\t')).is_some() {}
                    match chars.peek() {
                        Some(')') => {
                            chars.next();
                            break;
                        }
                        Some('(') => {
                            return Err("Nested collation groups are not allowed".to_string());
                        }
                        None => return Err("Expected: group close ')'".to_string()),
                        Some(_) => elements.push(parse_element(&mut chars, seen)?),
                    }
                }
                if elements.len() < 2 {
                    return Err(
                        "Expected: 2 or more collation elements in collation group".to_string()
                    );
                }
                segments.push(elements);
            }
            Some(')') => return Err("Invalid character: ')'".to_string()),
            Some(_) => segments.push(vec![parse_element(&mut chars, seen)?]),
        }
    }
    Ok(segments)
}

fn parse_element(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    seen: &mut HashSet<String>,
) -> Result<String, String> {
    let mut element = String::new();
    loop {
        if let Some(c) = chars.next_if(|c| is_element_char(*c)) {
            element.push(c);
        } else if chars.next_if_eq(&'\\').is_some() {
            element.push(parse_escape(chars)?);
        } else {
            break;
        }
    }
    if element.is_empty() {
        let found = chars.peek().map(|c| c.escape_unicode().to_string()).unwrap_or_default();
        return Err(format!("Invalid character: '{found}'"));
    }
    if !seen.insert(element.clone()) {
        return Err(format!("Duplicate collation element: '{element}'"));
    }
    Ok(element)
}

fn parse_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<char, String> {
    if chars.next_if_eq(&'u').is_none() {
        return Err("Invalid unicode character escape sequence: missing 'u' after '\\'".to_string());
    }
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| {
                "Invalid unicode character escape sequence: missing hexadecimal digit after '\\u'"
                    .to_string()
            })?;
        value = value * 16 + digit;
    }
    char::from_u32(value)
        .ok_or_else(|| format!("Invalid unicode character escape sequence: \\u{value:04X}"))
}

/// ASCII characters that are not letters or digits are ICU syntax.
fn icu_escape(element: &str) -> String {
    let mut escaped = String::with_capacity(element.len());
    for c in element.chars() {
        if c.is_ascii() && !c.is_ascii_alphanumeric() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Collator driven by [`SimpleRules`].
///
/// Text is matched greedily against the longest declared element. Characters
/// not covered by the rules sort after every declared element, by code point.
#[derive(Debug, Clone)]
pub struct SimpleRulesCollator {
    weights: HashMap<String, (u32, u32, u32)>,
    longest: usize,
    unlisted_base: u32,
}

impl SimpleRulesCollator {
    /// Builds a collator from rule text.
    pub fn new(rules: &str) -> Result<Self, String> {
        Ok(Self::from_rules(&SimpleRules::parse(rules)?))
    }

    /// Builds a collator from parsed rules.
    #[must_use]
    pub fn from_rules(rules: &SimpleRules) -> Self {
        let mut weights = HashMap::new();
        let mut longest = 1;
        for (p, segments) in rules.lines().iter().enumerate() {
            for (s, elements) in segments.iter().enumerate() {
                for (t, element) in elements.iter().enumerate() {
                    longest = longest.max(element.chars().count());
                    weights.insert(element.clone(), (weight(p), weight(s), weight(t)));
                }
            }
        }
        Self {
            weights,
            longest,
            unlisted_base: weight(rules.lines().len()) + 1,
        }
    }
}

fn weight(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

impl Collator for SimpleRulesCollator {
    fn sort_key(&self, text: &str) -> SortKey {
        let chars: Vec<char> = text.chars().collect();
        let mut primary = Vec::new();
        let mut secondary = Vec::new();
        let mut tertiary = Vec::new();

        let mut i = 0;
        while i < chars.len() {
            let max_len = self.longest.min(chars.len() - i);
            let matched = (1..=max_len).rev().find_map(|len| {
                let candidate: String = chars[i..i + len].iter().collect();
                self.weights.get(&candidate).map(|w| (len, *w))
            });
            match matched {
                Some((len, (p, s, t))) => {
                    primary.push(p);
                    secondary.push(s);
                    tertiary.push(t);
                    i += len;
                }
                None => {
                    primary.push(self.unlisted_base.saturating_add(u32::from(chars[i])));
                    secondary.push(1);
                    tertiary.push(1);
                    i += 1;
                }
            }
        }

        let mut key = primary;
        key.push(0);
        key.extend(secondary);
        key.push(0);
        key.extend(tertiary);
        SortKey(key)
    }
}
