//! Recursive descent parser for Gemstone
//!
//! Precedence, loosest first: statement keywords (`mem`, `emit`, `if`,
//! `while`, `for`, `def`, `return`), comparison, additive, multiplicative,
//! unary prefix, postfix call/index/member chain, atom.
//!
//! There is no error recovery: the first mismatch aborts the parse.

use crate::ast::{BinaryOperator, Node, Number, Statement, UnaryOperator};
use crate::error::{syntax_error, unexpected_token};
use crate::lexer::{tokenize, Keyword, Punctuator, SpannedToken, Token};
use core_types::{GemResult, SourcePosition};
use tracing::trace;

/// Gemstone parser over a token sequence
pub struct Parser {
    tokens: Vec<SpannedToken>,
    current: usize,
}

impl Parser {
    /// Create a parser over tokens produced by the lexer
    ///
    /// A missing trailing EOF token is tolerated.
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse the tokens into top-level statements
    pub fn parse(&mut self) -> GemResult<Vec<Node>> {
        Ok(self
            .parse_statements()?
            .into_iter()
            .map(|statement| statement.node)
            .collect())
    }

    /// Parse the tokens into top-level statements, keeping where each starts
    pub fn parse_statements(&mut self) -> GemResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            let position = self.position();
            let node = self.parse_expression()?;
            statements.push(Statement { node, position });
        }
        trace!(statements = statements.len(), "parsed program");
        Ok(statements)
    }

    /// expression := 'mem' target '=' expression
    ///             | 'emit' expression
    ///             | if | while | for | def | return
    ///             | comparison
    fn parse_expression(&mut self) -> GemResult<Node> {
        let keyword = match self.peek() {
            Token::Keyword(k) => Some(*k),
            _ => None,
        };
        if let Some(keyword) = keyword {
            match keyword {
                Keyword::Mem => return self.parse_assignment(),
                Keyword::Emit => {
                    self.advance();
                    let expression = self.parse_expression()?;
                    return Ok(Node::Emit {
                        expression: Box::new(expression),
                    });
                }
                Keyword::If => return self.parse_if(),
                Keyword::While => return self.parse_while(),
                Keyword::For => return self.parse_for(),
                Keyword::Def => return self.parse_function_def(),
                Keyword::Return => {
                    self.advance();
                    let value = self.parse_expression()?;
                    return Ok(Node::Return {
                        value: Box::new(value),
                    });
                }
                _ => {}
            }
        }
        self.parse_comparison()
    }

    fn parse_assignment(&mut self) -> GemResult<Node> {
        self.expect_keyword(Keyword::Mem)?;
        let target = self.parse_assignment_target()?;
        self.expect_punctuator(Punctuator::Assign)?;
        let value = self.parse_expression()?;
        Ok(Node::VarAssign {
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    /// target := atom ( '.' IDENTIFIER | '[' expression ']' )*
    fn parse_assignment_target(&mut self) -> GemResult<Node> {
        let position = self.position();
        let mut target = self.parse_primary()?;

        loop {
            if self.check_punctuator(Punctuator::Dot) {
                self.advance();
                let member = self.expect_identifier("member name after '.'")?;
                target = Node::MemberAccess {
                    target: Box::new(target),
                    member,
                };
            } else if self.check_punctuator(Punctuator::LBracket) {
                self.advance();
                let index = self.parse_expression()?;
                self.expect_punctuator(Punctuator::RBracket)?;
                target = Node::IndexAccess {
                    target: Box::new(target),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }

        match target {
            Node::VarAccess { .. } | Node::IndexAccess { .. } | Node::MemberAccess { .. } => {
                Ok(target)
            }
            other => Err(syntax_error(
                format!("Expected assignable target after 'mem', got {}", other),
                position,
            )),
        }
    }

    /// block := expression* up to 'end', 'else' or end of input
    fn parse_block(&mut self) -> GemResult<Vec<Node>> {
        let mut statements = Vec::new();
        while !self.check_keyword(Keyword::End)
            && !self.check_keyword(Keyword::Else)
            && !self.is_at_end()
        {
            statements.push(self.parse_expression()?);
        }
        Ok(statements)
    }

    fn parse_if(&mut self) -> GemResult<Node> {
        self.expect_keyword(Keyword::If)?;
        let condition = self.parse_comparison()?;
        self.expect_keyword(Keyword::Then)?;
        let body = self.parse_block()?;

        let else_case = if self.check_keyword(Keyword::Else) {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;
        Ok(Node::If {
            cases: vec![(condition, body)],
            else_case,
        })
    }

    fn parse_while(&mut self) -> GemResult<Node> {
        self.expect_keyword(Keyword::While)?;
        let condition = self.parse_comparison()?;
        self.expect_keyword(Keyword::Do)?;
        let body = self.parse_block()?;
        self.expect_keyword(Keyword::End)?;
        Ok(Node::While {
            condition: Box::new(condition),
            body,
        })
    }

    fn parse_for(&mut self) -> GemResult<Node> {
        self.expect_keyword(Keyword::For)?;
        let variable = self.expect_identifier("loop variable after 'for'")?;
        self.expect_keyword(Keyword::In)?;
        let iterable = self.parse_expression()?;
        self.expect_keyword(Keyword::Do)?;
        let body = self.parse_block()?;
        self.expect_keyword(Keyword::End)?;
        Ok(Node::For {
            variable,
            iterable: Box::new(iterable),
            body,
        })
    }

    fn parse_function_def(&mut self) -> GemResult<Node> {
        self.expect_keyword(Keyword::Def)?;
        let name = self.expect_identifier("function name")?;
        self.expect_punctuator(Punctuator::LParen)?;

        let mut params = Vec::new();
        if !self.check_punctuator(Punctuator::RParen) {
            params.push(self.expect_identifier("parameter name")?);
            while self.check_punctuator(Punctuator::Comma) {
                self.advance();
                params.push(self.expect_identifier("parameter name")?);
            }
        }
        self.expect_punctuator(Punctuator::RParen)?;

        let body = self.parse_block()?;
        self.expect_keyword(Keyword::End)?;
        Ok(Node::FuncDef { name, params, body })
    }

    fn parse_comparison(&mut self) -> GemResult<Node> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek() {
                Token::Punctuator(Punctuator::EqEq) => BinaryOperator::Eq,
                Token::Punctuator(Punctuator::NotEq) => BinaryOperator::NotEq,
                Token::Punctuator(Punctuator::Lt) => BinaryOperator::Lt,
                Token::Punctuator(Punctuator::Gt) => BinaryOperator::Gt,
                Token::Punctuator(Punctuator::LtEq) => BinaryOperator::LtEq,
                Token::Punctuator(Punctuator::GtEq) => BinaryOperator::GtEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Node::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> GemResult<Node> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek() {
                Token::Punctuator(Punctuator::Plus) => BinaryOperator::Add,
                Token::Punctuator(Punctuator::Minus) => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Node::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> GemResult<Node> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek() {
                Token::Punctuator(Punctuator::Star) => BinaryOperator::Mul,
                Token::Punctuator(Punctuator::Slash) => BinaryOperator::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Node::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> GemResult<Node> {
        let op = match self.peek() {
            Token::Punctuator(Punctuator::Plus) => UnaryOperator::Plus,
            Token::Punctuator(Punctuator::Minus) => UnaryOperator::Minus,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Node::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    /// postfix := atom ( '(' args ')' | '[' expression ']' | '.' IDENTIFIER )*
    fn parse_postfix(&mut self) -> GemResult<Node> {
        let mut node = self.parse_primary()?;

        loop {
            match self.peek() {
                Token::Punctuator(Punctuator::LParen) => {
                    self.advance();
                    let args = self.parse_comma_separated(Punctuator::RParen)?;
                    node = Node::FuncCall {
                        callee: Box::new(node),
                        args,
                    };
                }
                Token::Punctuator(Punctuator::LBracket) => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect_punctuator(Punctuator::RBracket)?;
                    node = Node::IndexAccess {
                        target: Box::new(node),
                        index: Box::new(index),
                    };
                }
                Token::Punctuator(Punctuator::Dot) => {
                    self.advance();
                    let member = self.expect_identifier("member name after '.'")?;
                    node = Node::MemberAccess {
                        target: Box::new(node),
                        member,
                    };
                }
                _ => break,
            }
        }

        Ok(node)
    }

    fn parse_primary(&mut self) -> GemResult<Node> {
        let spanned = self.advance();
        match spanned.token {
            Token::Int(n) => Ok(Node::Number(Number::Int(n))),
            Token::Float(n) => Ok(Node::Number(Number::Float(n))),
            Token::String(s) => Ok(Node::String(s)),
            Token::Identifier(name) => Ok(Node::VarAccess { name }),
            Token::Punctuator(Punctuator::LParen) => {
                let expr = self.parse_expression()?;
                self.expect_punctuator(Punctuator::RParen)?;
                Ok(expr)
            }
            Token::Punctuator(Punctuator::LBracket) => {
                let elements = self.parse_comma_separated(Punctuator::RBracket)?;
                Ok(Node::List(elements))
            }
            Token::Punctuator(Punctuator::LBrace) => self.parse_dict(),
            other => Err(unexpected_token(
                "int, float, string, identifier, '(', '[' or '{'",
                &other.to_string(),
                spanned.position,
            )),
        }
    }

    /// dict := '{' ( expression ':' expression ( ',' expression ':' expression )* )? '}'
    /// The opening brace is already consumed.
    fn parse_dict(&mut self) -> GemResult<Node> {
        let mut pairs = Vec::new();
        if !self.check_punctuator(Punctuator::RBrace) {
            loop {
                let key = self.parse_expression()?;
                self.expect_punctuator(Punctuator::Colon)?;
                let value = self.parse_expression()?;
                pairs.push((key, value));
                if !self.check_punctuator(Punctuator::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.expect_punctuator(Punctuator::RBrace)?;
        Ok(Node::Dict(pairs))
    }

    /// Expressions separated by commas up to `close`, which is consumed.
    /// The opening delimiter is already consumed.
    fn parse_comma_separated(&mut self, close: Punctuator) -> GemResult<Vec<Node>> {
        let mut items = Vec::new();
        if !self.check_punctuator(close) {
            items.push(self.parse_expression()?);
            while self.check_punctuator(Punctuator::Comma) {
                self.advance();
                items.push(self.parse_expression()?);
            }
        }
        self.expect_punctuator(close)?;
        Ok(items)
    }

    fn peek(&self) -> &Token {
        match self.tokens.get(self.current) {
            Some(spanned) => &spanned.token,
            None => &Token::EOF,
        }
    }

    fn position(&self) -> SourcePosition {
        match self.tokens.get(self.current).or_else(|| self.tokens.last()) {
            Some(spanned) => spanned.position,
            None => SourcePosition::default(),
        }
    }

    fn advance(&mut self) -> SpannedToken {
        let spanned = SpannedToken {
            token: self.peek().clone(),
            position: self.position(),
        };
        if self.current < self.tokens.len() {
            self.current += 1;
        }
        spanned
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::EOF)
    }

    fn check_punctuator(&self, p: Punctuator) -> bool {
        matches!(self.peek(), Token::Punctuator(x) if *x == p)
    }

    fn check_keyword(&self, k: Keyword) -> bool {
        matches!(self.peek(), Token::Keyword(x) if *x == k)
    }

    fn expect_punctuator(&mut self, p: Punctuator) -> GemResult<()> {
        let spanned = self.advance();
        if let Token::Punctuator(ref x) = spanned.token {
            if *x == p {
                return Ok(());
            }
        }
        Err(unexpected_token(
            &format!("'{}'", p.as_str()),
            &spanned.token.to_string(),
            spanned.position,
        ))
    }

    fn expect_keyword(&mut self, k: Keyword) -> GemResult<()> {
        let spanned = self.advance();
        if let Token::Keyword(ref x) = spanned.token {
            if *x == k {
                return Ok(());
            }
        }
        Err(unexpected_token(
            &format!("'{}'", k.as_str()),
            &spanned.token.to_string(),
            spanned.position,
        ))
    }

    fn expect_identifier(&mut self, what: &str) -> GemResult<String> {
        let spanned = self.advance();
        match spanned.token {
            Token::Identifier(name) => Ok(name),
            other => Err(unexpected_token(
                what,
                &other.to_string(),
                spanned.position,
            )),
        }
    }
}

/// Tokenize and parse a whole input unit
pub fn parse_source(source: &str) -> GemResult<Vec<Node>> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).parse()
}
