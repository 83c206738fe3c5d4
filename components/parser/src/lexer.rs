//! Gemstone Lexer - tokenizes source text into tokens

use crate::error::lex_error;
use core_types::{GemResult, SourcePosition};
use std::fmt;
use tracing::trace;

/// Gemstone reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// mem keyword (assignment)
    Mem,
    /// emit keyword (output)
    Emit,
    /// if keyword
    If,
    /// then keyword
    Then,
    /// else keyword
    Else,
    /// end keyword
    End,
    /// while keyword
    While,
    /// do keyword
    Do,
    /// for keyword
    For,
    /// in keyword
    In,
    /// def keyword
    Def,
    /// return keyword
    Return,
}

impl Keyword {
    /// Look up a reserved word by its exact text
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "mem" => Keyword::Mem,
            "emit" => Keyword::Emit,
            "if" => Keyword::If,
            "then" => Keyword::Then,
            "else" => Keyword::Else,
            "end" => Keyword::End,
            "while" => Keyword::While,
            "do" => Keyword::Do,
            "for" => Keyword::For,
            "in" => Keyword::In,
            "def" => Keyword::Def,
            "return" => Keyword::Return,
            _ => return None,
        };
        Some(keyword)
    }

    /// The source spelling of the keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Mem => "mem",
            Keyword::Emit => "emit",
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::End => "end",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::For => "for",
            Keyword::In => "in",
            Keyword::Def => "def",
            Keyword::Return => "return",
        }
    }
}

/// Gemstone punctuators (operators and delimiters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuator {
    /// Plus
    Plus,
    /// Minus
    Minus,
    /// Multiply
    Star,
    /// Divide
    Slash,
    /// Opening parenthesis
    LParen,
    /// Closing parenthesis
    RParen,
    /// Opening bracket
    LBracket,
    /// Closing bracket
    RBracket,
    /// Opening brace
    LBrace,
    /// Closing brace
    RBrace,
    /// Comma
    Comma,
    /// Dot
    Dot,
    /// Colon
    Colon,
    /// Assignment
    Assign,
    /// Equality
    EqEq,
    /// Inequality
    NotEq,
    /// Less than
    Lt,
    /// Greater than
    Gt,
    /// Less than or equal
    LtEq,
    /// Greater than or equal
    GtEq,
}

impl Punctuator {
    /// The source spelling of the punctuator
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuator::Plus => "+",
            Punctuator::Minus => "-",
            Punctuator::Star => "*",
            Punctuator::Slash => "/",
            Punctuator::LParen => "(",
            Punctuator::RParen => ")",
            Punctuator::LBracket => "[",
            Punctuator::RBracket => "]",
            Punctuator::LBrace => "{",
            Punctuator::RBrace => "}",
            Punctuator::Comma => ",",
            Punctuator::Dot => ".",
            Punctuator::Colon => ":",
            Punctuator::Assign => "=",
            Punctuator::EqEq => "==",
            Punctuator::NotEq => "!=",
            Punctuator::Lt => "<",
            Punctuator::Gt => ">",
            Punctuator::LtEq => "<=",
            Punctuator::GtEq => ">=",
        }
    }
}

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal
    Int(i64),
    /// Float literal (exactly one `.` in the numeral)
    Float(f64),
    /// String literal, without the quotes
    String(String),
    /// Identifier (variable or function name)
    Identifier(String),
    /// Reserved word
    Keyword(Keyword),
    /// Punctuator/operator
    Punctuator(Punctuator),
    /// End of input
    EOF,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(n) => write!(f, "INT:{}", n),
            Token::Float(n) => write!(f, "FLOAT:{:?}", n),
            Token::String(s) => write!(f, "STRING:\"{}\"", s),
            Token::Identifier(name) => write!(f, "IDENTIFIER:{}", name),
            Token::Keyword(k) => write!(f, "'{}'", k.as_str()),
            Token::Punctuator(p) => write!(f, "'{}'", p.as_str()),
            Token::EOF => write!(f, "EOF"),
        }
    }
}

/// A token together with the position of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    /// The token itself
    pub token: Token,
    /// Where the token starts
    pub position: SourcePosition,
}

/// Lexer for Gemstone source text
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    /// Create a new lexer for the given source text
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scan the whole input, ending with an EOF token
    pub fn tokenize(mut self) -> GemResult<Vec<SpannedToken>> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token()?;
            let done = spanned.token == Token::EOF;
            tokens.push(spanned);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    /// Get the next token from the source
    pub fn next_token(&mut self) -> GemResult<SpannedToken> {
        self.skip_whitespace_and_comments();

        let position = self.current_position();
        if self.is_at_end() {
            return Ok(SpannedToken {
                token: Token::EOF,
                position,
            });
        }

        let ch = self.advance();
        let token = match ch {
            '+' => Token::Punctuator(Punctuator::Plus),
            '-' => Token::Punctuator(Punctuator::Minus),
            '*' => Token::Punctuator(Punctuator::Star),
            '/' => Token::Punctuator(Punctuator::Slash),
            '(' => Token::Punctuator(Punctuator::LParen),
            ')' => Token::Punctuator(Punctuator::RParen),
            '[' => Token::Punctuator(Punctuator::LBracket),
            ']' => Token::Punctuator(Punctuator::RBracket),
            '{' => Token::Punctuator(Punctuator::LBrace),
            '}' => Token::Punctuator(Punctuator::RBrace),
            ',' => Token::Punctuator(Punctuator::Comma),
            '.' => Token::Punctuator(Punctuator::Dot),
            ':' => Token::Punctuator(Punctuator::Colon),

            '=' => {
                if self.match_char('=') {
                    Token::Punctuator(Punctuator::EqEq)
                } else {
                    Token::Punctuator(Punctuator::Assign)
                }
            }
            '!' => {
                if self.match_char('=') {
                    Token::Punctuator(Punctuator::NotEq)
                } else {
                    return Err(lex_error("Expected '=' after '!'", position));
                }
            }
            '<' => {
                if self.match_char('=') {
                    Token::Punctuator(Punctuator::LtEq)
                } else {
                    Token::Punctuator(Punctuator::Lt)
                }
            }
            '>' => {
                if self.match_char('=') {
                    Token::Punctuator(Punctuator::GtEq)
                } else {
                    Token::Punctuator(Punctuator::Gt)
                }
            }

            '"' => self.scan_string(position)?,
            c if c.is_ascii_digit() => self.scan_number(c, position)?,
            c if c.is_alphabetic() => self.scan_identifier(c),

            c => return Err(lex_error(format!("Illegal character: '{}'", c), position)),
        };

        Ok(SpannedToken { token, position })
    }

    fn skip_whitespace_and_comments(&mut self) {
        while !self.is_at_end() {
            let ch = self.peek();
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '#' {
                // Comment runs to end of line; the newline itself is whitespace
                while !self.is_at_end() && self.peek() != '\n' {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Scan a numeral of digits with at most one `.`
    ///
    /// A second `.` ends the numeral and is left for the next token, so
    /// `1.2.3` becomes `1.2`, `.`, `3`.
    fn scan_number(&mut self, first: char, start: SourcePosition) -> GemResult<Token> {
        let mut num_str = String::new();
        num_str.push(first);
        let mut seen_dot = false;

        while !self.is_at_end() {
            let ch = self.peek();
            if ch.is_ascii_digit() {
                num_str.push(self.advance());
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                num_str.push(self.advance());
            } else {
                break;
            }
        }

        if seen_dot {
            num_str
                .parse::<f64>()
                .map(Token::Float)
                .map_err(|_| lex_error(format!("Invalid float literal: {}", num_str), start))
        } else {
            num_str
                .parse::<i64>()
                .map(Token::Int)
                .map_err(|_| lex_error(format!("Integer literal too large: {}", num_str), start))
        }
    }

    /// Scan a string literal; the opening quote is already consumed.
    /// There are no escape sequences.
    fn scan_string(&mut self, start: SourcePosition) -> GemResult<Token> {
        let mut value = String::new();
        while !self.is_at_end() && self.peek() != '"' {
            value.push(self.advance());
        }

        if self.is_at_end() {
            return Err(lex_error("Unterminated string", start));
        }
        self.advance();

        Ok(Token::String(value))
    }

    fn scan_identifier(&mut self, first: char) -> Token {
        let mut word = String::new();
        word.push(first);
        while !self.is_at_end() {
            let ch = self.peek();
            if ch.is_alphanumeric() || ch == '_' {
                word.push(self.advance());
            } else {
                break;
            }
        }

        match Keyword::from_word(&word) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Identifier(word),
        }
    }

    fn current_position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.position)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars[self.position]
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }
}

/// Tokenize a whole input unit
///
/// # Example
///
/// ```
/// use parser::{tokenize, Keyword, Token};
///
/// let tokens = tokenize("emit 1").unwrap();
/// assert_eq!(tokens[0].token, Token::Keyword(Keyword::Emit));
/// assert_eq!(tokens[1].token, Token::Int(1));
/// assert_eq!(tokens[2].token, Token::EOF);
/// ```
pub fn tokenize(source: &str) -> GemResult<Vec<SpannedToken>> {
    let tokens = Lexer::new(source).tokenize()?;
    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
