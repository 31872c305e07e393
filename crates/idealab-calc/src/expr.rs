//! Closed expression grammar: lexer, parser, and tree-walking evaluator.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! ternary  := or ( "?" ternary ":" ternary )?
//! or       := and ( "||" and )*
//! and      := eq ( "&&" eq )*
//! eq       := cmp ( ( "==" | "!=" | "===" | "!==" ) cmp )*
//! cmp      := add ( ( "<" | ">" | "<=" | ">=" ) add )*
//! add      := mul ( ( "+" | "-" ) mul )*
//! mul      := unary ( ( "*" | "/" | "%" ) unary )*
//! unary    := ( "!" | "-" | "+" ) unary | primary
//! primary  := number | string | "true" | "false" | "null" | ident | "(" ternary ")"
//! ```
//!
//! Identifiers parse but never evaluate: by the time an expression reaches
//! the evaluator every known input has been substituted by a literal, so any
//! remaining identifier is unresolved.

use crate::types::{EvalError, Value};

/// Nesting limit for parentheses, prefix operators and ternaries.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Null,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    NotEq,
    StrictEq,
    StrictNe,
    AndAnd,
    OrOr,
    Question,
    Colon,
    LParen,
    RParen,
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::Ne | Self::StrictEq | Self::StrictNe => 3,
            Self::Lt | Self::Gt | Self::Le | Self::Ge => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::Rem => 6,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::StrictEq => "===",
            Self::StrictNe => "!==",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }

    fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::OrOr => Self::Or,
            Token::AndAnd => Self::And,
            Token::EqEq => Self::Eq,
            Token::NotEq => Self::Ne,
            Token::StrictEq => Self::StrictEq,
            Token::StrictNe => Self::StrictNe,
            Token::Lt => Self::Lt,
            Token::Gt => Self::Gt,
            Token::Le => Self::Le,
            Token::Ge => Self::Ge,
            Token::Plus => Self::Add,
            Token::Minus => Self::Sub,
            Token::Star => Self::Mul,
            Token::Slash => Self::Div,
            Token::Percent => Self::Rem,
            _ => return None,
        })
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Ident(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

/// Parse an expression string into a tree.
pub fn parse(src: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: src.len(),
        depth: 0,
    };
    let expr = parser.ternary()?;
    if let Some(extra) = parser.tokens.get(parser.pos) {
        return Err(syntax(extra.offset, "unexpected trailing input"));
    }
    Ok(expr)
}

/// Parse and evaluate an expression that contains no identifiers.
pub fn eval_str(src: &str) -> Result<Value, EvalError> {
    parse(src)?.evaluate()
}

fn syntax(offset: usize, message: impl Into<String>) -> EvalError {
    EvalError::Syntax {
        offset,
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn tokenize(src: &str) -> Result<Vec<Spanned>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = if c.is_ascii_digit() || (c == '.' && next_is_digit(src, offset)) {
            lex_number(src, offset, &mut chars)?
        } else if c == '"' || c == '\'' {
            chars.next();
            lex_string(c, offset, &mut chars)?
        } else if is_ident_start(c) {
            let mut end = offset;
            while let Some(&(i, ch)) = chars.peek() {
                if !is_ident_cont(ch) {
                    break;
                }
                end = i + ch.len_utf8();
                chars.next();
            }
            match &src[offset..end] {
                "true" => Token::True,
                "false" => Token::False,
                "null" => Token::Null,
                name => Token::Ident(name.to_string()),
            }
        } else {
            chars.next();
            let rest = &src[offset + c.len_utf8()..];
            let (token, extra) = match c {
                '+' => (Token::Plus, 0),
                '-' => (Token::Minus, 0),
                '*' => (Token::Star, 0),
                '/' => (Token::Slash, 0),
                '%' => (Token::Percent, 0),
                '?' => (Token::Question, 0),
                ':' => (Token::Colon, 0),
                '(' => (Token::LParen, 0),
                ')' => (Token::RParen, 0),
                '<' if rest.starts_with('=') => (Token::Le, 1),
                '<' => (Token::Lt, 0),
                '>' if rest.starts_with('=') => (Token::Ge, 1),
                '>' => (Token::Gt, 0),
                '=' if rest.starts_with("==") => (Token::StrictEq, 2),
                '=' if rest.starts_with('=') => (Token::EqEq, 1),
                '!' if rest.starts_with("==") => (Token::StrictNe, 2),
                '!' if rest.starts_with('=') => (Token::NotEq, 1),
                '!' => (Token::Bang, 0),
                '&' if rest.starts_with('&') => (Token::AndAnd, 1),
                '|' if rest.starts_with('|') => (Token::OrOr, 1),
                other => return Err(syntax(offset, format!("unexpected character '{other}'"))),
            };
            for _ in 0..extra {
                chars.next();
            }
            token
        };
        tokens.push(Spanned { token, offset });
    }
    Ok(tokens)
}

fn next_is_digit(src: &str, offset: usize) -> bool {
    src[offset + 1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

fn lex_number(
    src: &str,
    start: usize,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<Token, EvalError> {
    let mut end = start;
    let mut prev = '\0';
    while let Some(&(i, c)) = chars.peek() {
        let exponent_sign = (c == '+' || c == '-') && (prev == 'e' || prev == 'E');
        if !(c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign) {
            break;
        }
        prev = c;
        end = i + 1;
        chars.next();
    }
    let text = &src[start..end];
    let n: f64 = text
        .parse()
        .map_err(|_| syntax(start, format!("invalid number '{text}'")))?;
    if !n.is_finite() {
        return Err(syntax(start, format!("number out of range '{text}'")));
    }
    Ok(Token::Number(n))
}

fn lex_string(
    quote: char,
    start: usize,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<Token, EvalError> {
    let mut out = String::new();
    loop {
        let Some((_, c)) = chars.next() else {
            return Err(syntax(start, "unterminated string literal"));
        };
        if c == quote {
            return Ok(Token::Str(out));
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((i, esc)) = chars.next() else {
            return Err(syntax(start, "unterminated string literal"));
        };
        match esc {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            '0' => out.push('\0'),
            'u' => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = chars
                        .next()
                        .and_then(|(_, h)| h.to_digit(16))
                        .ok_or_else(|| syntax(i, "invalid unicode escape"))?;
                    code = code * 16 + digit;
                }
                let ch = char::from_u32(code).ok_or_else(|| syntax(i, "invalid unicode escape"))?;
                out.push(ch);
            }
            other => out.push(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |s| s.offset)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(syntax(self.offset(), "expression nested too deeply"));
        }
        Ok(())
    }

    fn ternary(&mut self) -> Result<Expr, EvalError> {
        self.enter()?;
        let cond = self.binary(1)?;
        let expr = if self.eat(&Token::Question) {
            let then = self.ternary()?;
            if !self.eat(&Token::Colon) {
                return Err(syntax(self.offset(), "expected ':' in conditional expression"));
            }
            let otherwise = self.ternary()?;
            Expr::Ternary {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            }
        } else {
            cond
        };
        self.depth -= 1;
        Ok(expr)
    }

    fn binary(&mut self, min_prec: u8) -> Result<Expr, EvalError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().and_then(BinaryOp::from_token) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.pos += 1;
            let rhs = self.binary(prec + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Bang) => UnaryOp::Not,
            _ => return self.primary(),
        };
        self.pos += 1;
        self.enter()?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let offset = self.offset();
        let Some(token) = self.peek().cloned() else {
            return Err(syntax(offset, "unexpected end of expression"));
        };
        self.pos += 1;
        Ok(match token {
            Token::Number(n) => Expr::Literal(Value::Number(n)),
            Token::Str(s) => Expr::Literal(Value::Text(s)),
            Token::True => Expr::Literal(Value::Bool(true)),
            Token::False => Expr::Literal(Value::Bool(false)),
            Token::Null => Expr::Literal(Value::Null),
            Token::Ident(name) => Expr::Ident(name),
            Token::LParen => {
                let inner = self.ternary()?;
                if !self.eat(&Token::RParen) {
                    return Err(syntax(self.offset(), "expected ')'"));
                }
                inner
            }
            _ => return Err(syntax(offset, "expected an operand")),
        })
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

impl Expr {
    /// Evaluate the tree. Identifiers are always unresolved.
    pub fn evaluate(&self) -> Result<Value, EvalError> {
        match self {
            Self::Literal(v) => Ok(v.clone()),
            Self::Ident(name) => Err(EvalError::UnresolvedIdentifier(name.clone())),
            Self::Unary { op, operand } => apply_unary(*op, operand.evaluate()?),
            Self::Binary { op, lhs, rhs } => match op {
                BinaryOp::And => {
                    let l = lhs.evaluate()?;
                    if l.is_truthy() { rhs.evaluate() } else { Ok(l) }
                }
                BinaryOp::Or => {
                    let l = lhs.evaluate()?;
                    if l.is_truthy() { Ok(l) } else { rhs.evaluate() }
                }
                _ => apply_binary(*op, lhs.evaluate()?, rhs.evaluate()?),
            },
            Self::Ternary {
                cond,
                then,
                otherwise,
            } => {
                if cond.evaluate()?.is_truthy() {
                    then.evaluate()
                } else {
                    otherwise.evaluate()
                }
            }
        }
    }
}

fn apply_unary(op: UnaryOp, value: Value) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(n)),
        (op, v) => Err(EvalError::UnaryTypeMismatch {
            op: if op == UnaryOp::Neg { "-" } else { "+" },
            operand: v.type_name(),
        }),
    }
}

/// Numeric reading of a string operand: its trimmed text as a finite number.
fn numeric_text(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Turn a numeric string into a number; anything else is returned as is.
fn to_numeric(value: Value) -> Value {
    match value {
        Value::Text(s) => match numeric_text(&s) {
            Some(n) => Value::Number(n),
            None => Value::Text(s),
        },
        other => other,
    }
}

/// `==` equality: a number equals a string that reads as the same number.
fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(n), Value::Text(s)) | (Value::Text(s), Value::Number(n)) => {
            numeric_text(s) == Some(*n)
        }
        (l, r) => l == r,
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    use Value::{Number, Text};

    // Select inputs arrive as strings. Arithmetic always reads numeric
    // strings as numbers; relational operators do so unless both sides are
    // strings, which compare lexically.
    let (lhs, rhs) = match op {
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            (to_numeric(lhs), to_numeric(rhs))
        }
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
            if !matches!((&lhs, &rhs), (Text(_), Text(_))) =>
        {
            (to_numeric(lhs), to_numeric(rhs))
        }
        _ => (lhs, rhs),
    };

    let result = match (op, &lhs, &rhs) {
        (BinaryOp::Eq, l, r) => Value::Bool(loose_eq(l, r)),
        (BinaryOp::Ne, l, r) => Value::Bool(!loose_eq(l, r)),
        (BinaryOp::StrictEq, l, r) => Value::Bool(l == r),
        (BinaryOp::StrictNe, l, r) => Value::Bool(l != r),

        (BinaryOp::Add, Number(a), Number(b)) => Number(a + b),
        (BinaryOp::Add, Text(_), _) | (BinaryOp::Add, _, Text(_)) => {
            Text(format!("{}{}", concat_form(&lhs), concat_form(&rhs)))
        }
        (BinaryOp::Sub, Number(a), Number(b)) => Number(a - b),
        (BinaryOp::Mul, Number(a), Number(b)) => Number(a * b),
        (BinaryOp::Div | BinaryOp::Rem, Number(_), Number(b)) if *b == 0.0 => {
            return Err(EvalError::DivisionByZero);
        }
        (BinaryOp::Div, Number(a), Number(b)) => Number(a / b),
        (BinaryOp::Rem, Number(a), Number(b)) => Number(a % b),

        (BinaryOp::Lt, Number(a), Number(b)) => Value::Bool(a < b),
        (BinaryOp::Gt, Number(a), Number(b)) => Value::Bool(a > b),
        (BinaryOp::Le, Number(a), Number(b)) => Value::Bool(a <= b),
        (BinaryOp::Ge, Number(a), Number(b)) => Value::Bool(a >= b),
        (BinaryOp::Lt, Text(a), Text(b)) => Value::Bool(a < b),
        (BinaryOp::Gt, Text(a), Text(b)) => Value::Bool(a > b),
        (BinaryOp::Le, Text(a), Text(b)) => Value::Bool(a <= b),
        (BinaryOp::Ge, Text(a), Text(b)) => Value::Bool(a >= b),

        _ => {
            return Err(EvalError::TypeMismatch {
                op: op.symbol(),
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
            });
        }
    };

    match result {
        Number(n) if !n.is_finite() => Err(EvalError::NonFinite),
        other => Ok(other),
    }
}

/// How a value reads when concatenated onto a string.
fn concat_form(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Text(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(src: &str) -> f64 {
        match eval_str(src) {
            Ok(Value::Number(n)) => n,
            other => panic!("expected number from {src:?}, got {other:?}"),
        }
    }

    fn text(src: &str) -> String {
        match eval_str(src) {
            Ok(Value::Text(s)) => s,
            other => panic!("expected string from {src:?}, got {other:?}"),
        }
    }

    fn boolean(src: &str) -> bool {
        match eval_str(src) {
            Ok(Value::Bool(b)) => b,
            other => panic!("expected boolean from {src:?}, got {other:?}"),
        }
    }

    // -- arithmetic ----------------------------------------------------------

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(num("1 + 2 * 3"), 7.0);
        assert_eq!(num("(1 + 2) * 3"), 9.0);
        assert_eq!(num("10 - 4 - 3"), 3.0);
        assert_eq!(num("100 / 10 / 2"), 5.0);
        assert_eq!(num("7 % 4"), 3.0);
    }

    #[test]
    fn unary_operators() {
        assert_eq!(num("-5 * -2"), 10.0);
        assert_eq!(num("10 - -5"), 15.0);
        assert_eq!(num("+3"), 3.0);
        assert!(!boolean("!1"));
        assert!(boolean("!!'x'"));
    }

    #[test]
    fn number_literals() {
        assert_eq!(num("1.5e3"), 1500.0);
        assert_eq!(num(".25 * 4"), 1.0);
        assert_eq!(num("2E-1 * 10"), 2.0);
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(eval_str("5 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval_str("5 % 0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn overflow_is_not_finite() {
        assert_eq!(eval_str("1e308 * 10"), Err(EvalError::NonFinite));
    }

    // -- strings -------------------------------------------------------------

    #[test]
    fn string_literals_and_escapes() {
        assert_eq!(text("'High'"), "High");
        assert_eq!(text(r#""say \"hi\"""#), "say \"hi\"");
        assert_eq!(text(r"'a\nb'"), "a\nb");
        assert_eq!(text(r"'A'"), "A");
    }

    #[test]
    fn plus_concatenates_with_strings() {
        assert_eq!(text("'Total: ' + 12"), "Total: 12");
        assert_eq!(text("1.5 + ' hours'"), "1.5 hours");
        assert_eq!(text("'a' + true"), "atrue");
    }

    #[test]
    fn arithmetic_on_strings_fails() {
        assert!(matches!(
            eval_str("'a' * 2"),
            Err(EvalError::TypeMismatch { op: "*", .. })
        ));
        assert!(matches!(
            eval_str("-'a'"),
            Err(EvalError::UnaryTypeMismatch { .. })
        ));
    }

    // -- comparison and logic -----------------------------------------------

    #[test]
    fn comparisons() {
        assert!(boolean("80 > 50"));
        assert!(!boolean("30 >= 50"));
        assert!(boolean("'apple' < 'banana'"));
        assert!(boolean("'Remote' == 'Remote'"));
        assert!(boolean("'Remote' === 'Remote'"));
        assert!(boolean("1 !== '1'"));
        assert!(!boolean("1 === '1'"));
    }

    #[test]
    fn numeric_strings_coerce_outside_concatenation() {
        assert_eq!(num("1800 / '3'"), 600.0);
        assert_eq!(num("' 4 ' * 2.5"), 10.0);
        assert_eq!(num("'10' - '4'"), 6.0);
        assert_eq!(num("'7' % 4"), 3.0);
        assert!(boolean("'3' > 2"));
        assert!(boolean("2 <= '2.0'"));
        assert_eq!(text("'1' + 2"), "12");
        assert_eq!(eval_str("100 / '0'"), Err(EvalError::DivisionByZero));
        assert!(matches!(
            eval_str("'' * 2"),
            Err(EvalError::TypeMismatch { op: "*", .. })
        ));
    }

    #[test]
    fn two_strings_compare_lexically() {
        assert!(boolean("'10' < '9'"));
        assert!(!boolean("'10' < 9"));
    }

    #[test]
    fn loose_equality_reads_numeric_strings() {
        assert!(boolean("1 == '1'"));
        assert!(boolean("'2.50' == 2.5"));
        assert!(!boolean("1 != '1'"));
        assert!(boolean("1 != 'one'"));
        assert!(!boolean("'1' == '1.0'"));
        assert!(boolean("1 !== '1'"));
    }

    #[test]
    fn mixed_comparison_fails() {
        assert!(matches!(
            eval_str("1 < 'a'"),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn logical_operators_short_circuit() {
        assert_eq!(num("0 || 5"), 5.0);
        assert_eq!(num("3 && 4"), 4.0);
        assert_eq!(num("0 && missing"), 0.0);
        assert_eq!(num("2 || missing"), 2.0);
    }

    #[test]
    fn ternary_is_right_associative() {
        assert_eq!(text("90 > 80 ? 'A' : 90 > 70 ? 'B' : 'C'"), "A");
        assert_eq!(text("75 > 80 ? 'A' : 75 > 70 ? 'B' : 'C'"), "B");
        assert_eq!(text("60000 > 50000 ? \"High\" : \"Low\""), "High");
    }

    // -- failures ------------------------------------------------------------

    #[test]
    fn identifiers_are_unresolved() {
        assert_eq!(
            eval_str("1000 + input2"),
            Err(EvalError::UnresolvedIdentifier("input2".into()))
        );
    }

    #[test]
    fn syntax_errors_report_offset() {
        match eval_str("1 +") {
            Err(EvalError::Syntax { offset, .. }) => assert_eq!(offset, 3),
            other => panic!("expected syntax error, got {other:?}"),
        }
        assert!(matches!(eval_str("(1 + 2"), Err(EvalError::Syntax { .. })));
        assert!(matches!(eval_str("1 2"), Err(EvalError::Syntax { .. })));
        assert!(matches!(eval_str("a = 1"), Err(EvalError::Syntax { .. })));
        assert!(matches!(eval_str("'open"), Err(EvalError::Syntax { .. })));
        assert!(matches!(eval_str(""), Err(EvalError::Syntax { .. })));
    }

    #[test]
    fn code_execution_syntax_is_rejected() {
        assert!(matches!(
            eval_str("process.exit(1)"),
            Err(EvalError::Syntax { .. })
        ));
        assert!(matches!(eval_str("[1, 2]"), Err(EvalError::Syntax { .. })));
        assert!(matches!(eval_str("x => x"), Err(EvalError::Syntax { .. })));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let src = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert!(matches!(eval_str(&src), Err(EvalError::Syntax { .. })));
        let shallow = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(num(&shallow), 1.0);
    }

    #[test]
    fn parse_builds_tree() {
        assert_eq!(
            parse("a * 2").unwrap(),
            Expr::Binary {
                op: BinaryOp::Mul,
                lhs: Box::new(Expr::Ident("a".into())),
                rhs: Box::new(Expr::Literal(Value::Number(2.0))),
            }
        );
    }
}
