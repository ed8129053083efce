//! Tokenizer for the arithmetic grammar
//!
//! Longest-match-first per operand: a date/time literal is tried
//! before a bare number, and a number greedily attaches a contiguous
//! unit symbol that follows it. Compound unit symbols (`m/s^2`,
//! `kg*m/s^2`) are consumed as a single token here; their structure
//! is resolved later against the registry. Numbers are lexed
//! unsigned, the parser folds a leading sign into the literal.

use unacalc_core::{CalcError, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    NumberWithUnit(f64, String),
    Date(Instant),
    DateTime(Instant),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

/// A token with the char offset it started at, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Spanned>, CalcError> {
    Lexer::new(input).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn run(mut self) -> Result<Vec<Spanned>, CalcError> {
        let mut tokens = Vec::new();
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }
            let start = self.pos;
            let token = match c {
                '(' => {
                    self.pos += 1;
                    Token::LParen
                }
                ')' => {
                    self.pos += 1;
                    Token::RParen
                }
                '+' => {
                    self.pos += 1;
                    Token::Plus
                }
                '-' => {
                    self.pos += 1;
                    Token::Minus
                }
                '*' => {
                    if self.peek(1) == Some('*') {
                        self.pos += 2;
                        Token::Caret
                    } else {
                        self.pos += 1;
                        Token::Star
                    }
                }
                '/' => {
                    self.pos += 1;
                    Token::Slash
                }
                '^' => {
                    self.pos += 1;
                    Token::Caret
                }
                _ if c.is_ascii_digit() => self.lex_temporal_or_number()?,
                '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.lex_number_with_optional_unit()
                }
                _ if is_ident_start(c) => self.lex_ident(),
                _ => {
                    return Err(CalcError::syntax(
                        start,
                        format!("unexpected character '{}'", c),
                    ));
                }
            };
            tokens.push(Spanned { token, pos: start });
        }
        Ok(tokens)
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn lex_temporal_or_number(&mut self) -> Result<Token, CalcError> {
        if let Some(token) = self.try_lex_temporal()? {
            return Ok(token);
        }
        Ok(self.lex_number_with_optional_unit())
    }

    /// Try `YYYY-MM-DD` with an optional `THH:MM[:SS[.frac]]` and
    /// optional `Z`/`+HH:MM`/`-HH:MM` offset. Returns `None` when the
    /// input at the cursor is not shaped like a date at all.
    fn try_lex_temporal(&mut self) -> Result<Option<Token>, CalcError> {
        if !self.matches_digits(0, 4)
            || self.peek(4) != Some('-')
            || !self.matches_digits(5, 2)
            || self.peek(7) != Some('-')
            || !self.matches_digits(8, 2)
        {
            return Ok(None);
        }
        let start = self.pos;
        let mut end = 10;
        let mut has_time = false;

        if self.peek(end) == Some('T')
            && self.matches_digits(end + 1, 2)
            && self.peek(end + 3) == Some(':')
            && self.matches_digits(end + 4, 2)
        {
            has_time = true;
            end += 6;
            if self.peek(end) == Some(':') && self.matches_digits(end + 1, 2) {
                end += 3;
                if self.peek(end) == Some('.')
                    && self.peek(end + 1).is_some_and(|c| c.is_ascii_digit())
                {
                    end += 1;
                    while self.peek(end).is_some_and(|c| c.is_ascii_digit()) {
                        end += 1;
                    }
                }
            }
            if self.peek(end) == Some('Z') {
                end += 1;
            } else if (self.peek(end) == Some('+') || self.peek(end) == Some('-'))
                && self.matches_digits(end + 1, 2)
                && self.peek(end + 3) == Some(':')
                && self.matches_digits(end + 4, 2)
            {
                end += 6;
            }
        }

        let text: String = self.chars[start..start + end].iter().collect();
        let instant = Instant::parse(&text)
            .map_err(|e| CalcError::syntax(start, e.to_string()))?;
        self.pos += end;
        if has_time {
            Ok(Some(Token::DateTime(instant)))
        } else {
            Ok(Some(Token::Date(instant)))
        }
    }

    fn matches_digits(&self, offset: usize, count: usize) -> bool {
        (0..count).all(|i| self.peek(offset + i).is_some_and(|c| c.is_ascii_digit()))
    }

    fn lex_number_with_optional_unit(&mut self) -> Token {
        let start = self.pos;
        while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek(0) == Some('.') {
            self.pos += 1;
            while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        // Exponent only when an actual digit follows, so `3eV` stays
        // a number followed by a unit.
        if matches!(self.peek(0), Some('e') | Some('E')) {
            let sign = matches!(self.peek(1), Some('+') | Some('-'));
            let digit_at = if sign { 2 } else { 1 };
            if self.peek(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += digit_at + 1;
                while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        // Both branches above ensured digit content, parse cannot fail
        let value: f64 = text.parse().unwrap_or(f64::NAN);

        // Whitespace may separate the number from its unit, but the
        // unit symbol itself is contiguous.
        let mut lookahead = self.pos;
        while self
            .chars
            .get(lookahead)
            .is_some_and(|c| c.is_whitespace())
        {
            lookahead += 1;
        }
        if self
            .chars
            .get(lookahead)
            .copied()
            .is_some_and(is_unit_start)
        {
            self.pos = lookahead;
            let unit = self.lex_unit_symbol();
            return Token::NumberWithUnit(value, unit);
        }
        Token::Number(value)
    }

    /// Consume a compound unit symbol: identifier chunks joined by
    /// `/`, `*` or `·`, each optionally raised to an integer power.
    fn lex_unit_symbol(&mut self) -> String {
        let start = self.pos;
        loop {
            while self.peek(0).is_some_and(is_unit_char) {
                self.pos += 1;
            }
            if self.peek(0) == Some('^') {
                let sign = self.peek(1) == Some('-');
                let digit_at = if sign { 2 } else { 1 };
                if self.peek(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += digit_at + 1;
                    while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                        self.pos += 1;
                    }
                }
            }
            let joined = matches!(self.peek(0), Some('/') | Some('*') | Some('·'))
                && self.peek(1).is_some_and(is_unit_start);
            if !joined {
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while self.peek(0).is_some_and(is_ident_char) {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        Token::Ident(name)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == 'µ'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == 'µ'
}

fn is_unit_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == 'µ'
}

fn is_unit_char(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == 'µ'
}
