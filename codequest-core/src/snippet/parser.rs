use crate::snippet::lexer::{Token, TokenKind};
use crate::snippet::SnippetError;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Str(String),
    Bool(bool),
    Var(String),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let {
        name: String,
        value: Expr,
    },
    Assign {
        name: String,
        value: Expr,
    },
    Expr(Expr),
    For {
        var: String,
        start: Expr,
        end: Expr,
        body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    If {
        cond: Expr,
        then: Vec<Stmt>,
        otherwise: Option<Vec<Stmt>>,
    },
    Fn(Rc<FnDef>),
    Return(Option<Expr>),
}

/// Deepest nesting of blocks, parentheses, unary operators and operator chains
pub const MAX_NESTING: usize = 128;

/// Recursive-descent parser over a token stream
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    pub fn parse_program(mut self) -> Result<Vec<Stmt>, SnippetError> {
        let mut program = Vec::new();
        while !self.check(&TokenKind::Eof) {
            program.push(self.statement()?);
        }
        Ok(program)
    }

    fn peek(&self) -> &TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T, SnippetError> {
        Err(SnippetError::Syntax {
            line: self.line(),
            message: message.into(),
        })
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), SnippetError> {
        if self.eat(&kind) {
            Ok(())
        } else {
            self.error(format!("expected {}, found {}", what, describe(self.peek())))
        }
    }

    fn ident(&mut self, what: &str) -> Result<String, SnippetError> {
        match self.peek().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            other => self.error(format!("expected {}, found {}", what, describe(&other))),
        }
    }

    /// Run `parse` one nesting level deeper
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, SnippetError>,
    ) -> Result<T, SnippetError> {
        if self.depth >= MAX_NESTING {
            return self.error("nesting too deep");
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Operator chains are built in a loop, so their depth is checked on the tree
    fn binary(&self, op: BinOp, left: Expr, right: Expr) -> Result<Expr, SnippetError> {
        if 1 + expr_depth(&left).max(expr_depth(&right)) > MAX_NESTING {
            return self.error("nesting too deep");
        }
        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Statements end with `;`, which may be left off before `}` or the end
    fn terminator(&mut self) -> Result<(), SnippetError> {
        if self.eat(&TokenKind::Semi) || self.check(&TokenKind::RBrace) || self.check(&TokenKind::Eof)
        {
            Ok(())
        } else {
            self.error(format!("expected ';', found {}", describe(self.peek())))
        }
    }

    fn block(&mut self) -> Result<Vec<Stmt>, SnippetError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        self.nested(Self::block_body)
    }

    fn block_body(&mut self) -> Result<Vec<Stmt>, SnippetError> {
        let mut body = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.check(&TokenKind::Eof) {
                return self.error("missing '}'");
            }
            body.push(self.statement()?);
        }
        self.advance();
        Ok(body)
    }

    fn statement(&mut self) -> Result<Stmt, SnippetError> {
        match self.peek() {
            TokenKind::Let => {
                self.advance();
                let name = self.ident("variable name")?;
                self.expect(TokenKind::Assign, "'='")?;
                let value = self.expression()?;
                self.terminator()?;
                Ok(Stmt::Let { name, value })
            }
            TokenKind::Fn => {
                self.advance();
                let name = self.ident("function name")?;
                self.expect(TokenKind::LParen, "'('")?;
                let mut params = Vec::new();
                if !self.check(&TokenKind::RParen) {
                    loop {
                        params.push(self.ident("parameter name")?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RParen, "')'")?;
                let body = self.block()?;
                Ok(Stmt::Fn(Rc::new(FnDef { name, params, body })))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.check(&TokenKind::Semi)
                    || self.check(&TokenKind::RBrace)
                    || self.check(&TokenKind::Eof)
                {
                    None
                } else {
                    Some(self.expression()?)
                };
                self.terminator()?;
                Ok(Stmt::Return(value))
            }
            TokenKind::For => {
                self.advance();
                let var = self.ident("loop variable")?;
                self.expect(TokenKind::In, "'in'")?;
                let start = self.expression()?;
                self.expect(TokenKind::DotDot, "'..'")?;
                let end = self.expression()?;
                let body = self.block()?;
                Ok(Stmt::For {
                    var,
                    start,
                    end,
                    body,
                })
            }
            TokenKind::While => {
                self.advance();
                let cond = self.expression()?;
                let body = self.block()?;
                Ok(Stmt::While { cond, body })
            }
            TokenKind::If => self.if_statement(),
            TokenKind::Ident(name) => {
                let name = name.clone();
                if self
                    .tokens
                    .get(self.pos + 1)
                    .is_some_and(|t| t.kind == TokenKind::Assign)
                {
                    self.pos += 2;
                    let value = self.expression()?;
                    self.terminator()?;
                    return Ok(Stmt::Assign { name, value });
                }
                let expr = self.expression()?;
                self.terminator()?;
                Ok(Stmt::Expr(expr))
            }
            _ => {
                let expr = self.expression()?;
                self.terminator()?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn if_statement(&mut self) -> Result<Stmt, SnippetError> {
        self.expect(TokenKind::If, "'if'")?;
        let cond = self.expression()?;
        let then = self.block()?;
        let otherwise = if self.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(vec![self.nested(Self::if_statement)?])
            } else {
                Some(self.block()?)
            }
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then,
            otherwise,
        })
    }

    fn expression(&mut self) -> Result<Expr, SnippetError> {
        self.nested(Self::or)
    }

    fn or(&mut self) -> Result<Expr, SnippetError> {
        let mut left = self.and()?;
        while self.eat(&TokenKind::OrOr) {
            let right = self.and()?;
            left = self.binary(BinOp::Or, left, right)?;
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr, SnippetError> {
        let mut left = self.comparison()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.comparison()?;
            left = self.binary(BinOp::And, left, right)?;
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<Expr, SnippetError> {
        let mut left = self.additive()?;
        loop {
            let op = match self.peek() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::NotEq,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Ge => BinOp::Ge,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.additive()?;
            left = self.binary(op, left, right)?;
        }
    }

    fn additive(&mut self) -> Result<Expr, SnippetError> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.multiplicative()?;
            left = self.binary(op, left, right)?;
        }
    }

    fn multiplicative(&mut self) -> Result<Expr, SnippetError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = self.binary(op, left, right)?;
        }
    }

    fn unary(&mut self) -> Result<Expr, SnippetError> {
        let op = match self.peek() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.primary(),
        };
        self.advance();
        let expr = self.nested(Self::unary)?;
        Ok(Expr::Unary {
            op,
            expr: Box::new(expr),
        })
    }

    fn primary(&mut self) -> Result<Expr, SnippetError> {
        match self.advance() {
            TokenKind::Int(value) => Ok(Expr::Int(value)),
            TokenKind::Str(text) => Ok(Expr::Str(text)),
            TokenKind::True => Ok(Expr::Bool(true)),
            TokenKind::False => Ok(Expr::Bool(false)),
            TokenKind::Ident(name) => {
                if !self.eat(&TokenKind::LParen) {
                    return Ok(Expr::Var(name));
                }
                let mut args = Vec::new();
                if !self.check(&TokenKind::RParen) {
                    loop {
                        args.push(self.expression()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RParen, "')'")?;
                Ok(Expr::Call { name, args })
            }
            TokenKind::LParen => {
                let expr = self.expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            other => {
                // Report against the offending token, not the one after it
                self.pos = self.pos.saturating_sub(1);
                self.error(format!("unexpected {}", describe(&other)))
            }
        }
    }
}

/// Height of an expression tree; bounded by `MAX_NESTING` for parsed trees
fn expr_depth(expr: &Expr) -> usize {
    match expr {
        Expr::Int(_) | Expr::Str(_) | Expr::Bool(_) | Expr::Var(_) => 1,
        Expr::Unary { expr, .. } => 1 + expr_depth(expr),
        Expr::Binary { left, right, .. } => 1 + expr_depth(left).max(expr_depth(right)),
        Expr::Call { args, .. } => 1 + args.iter().map(expr_depth).max().unwrap_or(0),
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Int(value) => format!("number {}", value),
        TokenKind::Str(_) => "string".to_string(),
        TokenKind::Ident(name) => format!("'{}'", name),
        TokenKind::Eof => "end of input".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}
