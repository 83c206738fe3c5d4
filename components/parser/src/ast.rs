//! Abstract Syntax Tree node definitions
//!
//! Nodes are built once by the parser and never mutated afterwards. Every
//! node owns its children exclusively.
//!
//! `Display` prints a node back as Gemstone source. Parentheses are only
//! inserted where precedence requires them, so parsing the printed text
//! yields a structurally identical tree.

use core_types::SourcePosition;
use std::fmt;

/// Numeric literal value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,
    /// ==
    Eq,
    /// !=
    NotEq,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    LtEq,
    /// >=
    GtEq,
}

impl BinaryOperator {
    /// The source spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::GtEq => ">=",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::Gt
            | BinaryOperator::LtEq
            | BinaryOperator::GtEq => COMPARISON,
            BinaryOperator::Add | BinaryOperator::Sub => ADDITIVE,
            BinaryOperator::Mul | BinaryOperator::Div => MULTIPLICATIVE,
        }
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// +
    Plus,
    /// -
    Minus,
}

impl UnaryOperator {
    /// The source spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        }
    }
}

/// Gemstone AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Integer or float literal
    Number(Number),

    /// String literal
    String(String),

    /// List literal
    List(Vec<Node>),

    /// Dictionary literal, pairs in source order
    Dict(Vec<(Node, Node)>),

    /// Binary operation
    BinOp {
        /// Left operand
        left: Box<Node>,
        /// Operator
        op: BinaryOperator,
        /// Right operand
        right: Box<Node>,
    },

    /// Prefix operation
    UnaryOp {
        /// Operator
        op: UnaryOperator,
        /// Operand
        operand: Box<Node>,
    },

    /// Variable read
    VarAccess {
        /// Variable name
        name: String,
    },

    /// `mem <target> = <value>`
    VarAssign {
        /// A `VarAccess`, `IndexAccess` or `MemberAccess` node
        target: Box<Node>,
        /// Value expression
        value: Box<Node>,
    },

    /// `target[index]`
    IndexAccess {
        /// Indexed expression
        target: Box<Node>,
        /// Index expression
        index: Box<Node>,
    },

    /// `target.member`
    MemberAccess {
        /// Object expression
        target: Box<Node>,
        /// Member name
        member: String,
    },

    /// `emit <expression>`
    Emit {
        /// Expression to output
        expression: Box<Node>,
    },

    /// `if <cond> then <block> [else <block>] end`
    If {
        /// Condition/body branches, tried in order
        cases: Vec<(Node, Vec<Node>)>,
        /// Else branch
        else_case: Option<Vec<Node>>,
    },

    /// `while <cond> do <block> end`
    While {
        /// Loop condition
        condition: Box<Node>,
        /// Loop body
        body: Vec<Node>,
    },

    /// `for <name> in <expr> do <block> end`
    For {
        /// Loop variable name
        variable: String,
        /// Iterated expression, evaluated once
        iterable: Box<Node>,
        /// Loop body
        body: Vec<Node>,
    },

    /// `def <name>(<params>) <block> end`
    FuncDef {
        /// Function name
        name: String,
        /// Parameter names
        params: Vec<String>,
        /// Function body
        body: Vec<Node>,
    },

    /// `callee(args)`
    FuncCall {
        /// Called expression
        callee: Box<Node>,
        /// Argument expressions
        args: Vec<Node>,
    },

    /// `return <value>`
    Return {
        /// Returned expression
        value: Box<Node>,
    },
}

const STATEMENT: u8 = 0;
const COMPARISON: u8 = 1;
const ADDITIVE: u8 = 2;
const MULTIPLICATIVE: u8 = 3;
const UNARY: u8 = 4;
const POSTFIX: u8 = 5;
const ATOM: u8 = 6;

impl Node {
    fn precedence(&self) -> u8 {
        match self {
            Node::VarAssign { .. }
            | Node::Emit { .. }
            | Node::If { .. }
            | Node::While { .. }
            | Node::For { .. }
            | Node::FuncDef { .. }
            | Node::Return { .. } => STATEMENT,
            Node::BinOp { op, .. } => op.precedence(),
            Node::UnaryOp { .. } => UNARY,
            Node::FuncCall { .. } | Node::IndexAccess { .. } | Node::MemberAccess { .. } => POSTFIX,
            Node::Number(_)
            | Node::String(_)
            | Node::List(_)
            | Node::Dict(_)
            | Node::VarAccess { .. } => ATOM,
        }
    }

    /// Write `self`, parenthesized if it binds looser than `min`
    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    fn fmt_postfix_base(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `1.x` would lex as the float `1.` followed by `x`
        if let Node::Number(Number::Int(_)) = self {
            return write!(f, "({})", self);
        }
        self.fmt_at(f, POSTFIX)
    }
}

fn fmt_block(f: &mut fmt::Formatter<'_>, body: &[Node]) -> fmt::Result {
    for stmt in body {
        write!(f, " {}", stmt)?;
    }
    Ok(())
}

fn fmt_list(f: &mut fmt::Formatter<'_>, items: &[Node]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(n) => {
                let text = n.to_string();
                if text.contains('.') {
                    write!(f, "{}", text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{}", n),
            Node::String(s) => write!(f, "\"{}\"", s),
            Node::List(items) => {
                write!(f, "[")?;
                fmt_list(f, items)?;
                write!(f, "]")
            }
            Node::Dict(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Node::BinOp { left, op, right } => {
                let level = op.precedence();
                left.fmt_at(f, level)?;
                write!(f, " {} ", op.as_str())?;
                right.fmt_at(f, level + 1)
            }
            Node::UnaryOp { op, operand } => {
                write!(f, "{}", op.as_str())?;
                operand.fmt_at(f, UNARY)
            }
            Node::VarAccess { name } => write!(f, "{}", name),
            Node::VarAssign { target, value } => write!(f, "mem {} = {}", target, value),
            Node::IndexAccess { target, index } => {
                target.fmt_postfix_base(f)?;
                write!(f, "[{}]", index)
            }
            Node::MemberAccess { target, member } => {
                target.fmt_postfix_base(f)?;
                write!(f, ".{}", member)
            }
            Node::Emit { expression } => write!(f, "emit {}", expression),
            Node::If { cases, else_case } => {
                for (i, (condition, body)) in cases.iter().enumerate() {
                    if i > 0 {
                        write!(f, " else ")?;
                    }
                    write!(f, "if ")?;
                    condition.fmt_at(f, COMPARISON)?;
                    write!(f, " then")?;
                    fmt_block(f, body)?;
                }
                if let Some(body) = else_case {
                    write!(f, " else")?;
                    fmt_block(f, body)?;
                }
                for _ in 0..cases.len().max(1) {
                    write!(f, " end")?;
                }
                Ok(())
            }
            Node::While { condition, body } => {
                write!(f, "while ")?;
                condition.fmt_at(f, COMPARISON)?;
                write!(f, " do")?;
                fmt_block(f, body)?;
                write!(f, " end")
            }
            Node::For {
                variable,
                iterable,
                body,
            } => {
                write!(f, "for {} in {} do", variable, iterable)?;
                fmt_block(f, body)?;
                write!(f, " end")
            }
            Node::FuncDef { name, params, body } => {
                write!(f, "def {}({})", name, params.join(", "))?;
                fmt_block(f, body)?;
                write!(f, " end")
            }
            Node::FuncCall { callee, args } => {
                callee.fmt_postfix_base(f)?;
                write!(f, "(")?;
                fmt_list(f, args)?;
                write!(f, ")")
            }
            Node::Return { value } => write!(f, "return {}", value),
        }
    }
}

/// A top-level statement with the position of its first token
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The parsed statement
    pub node: Node,
    /// Where the statement starts
    pub position: SourcePosition,
}

/// Print a program as source text, one statement per line
pub fn to_source(program: &[Node]) -> String {
    program
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Box<Node> {
        Box::new(Node::VarAccess {
            name: name.to_string(),
        })
    }

    fn int(n: i64) -> Box<Node> {
        Box::new(Node::Number(Number::Int(n)))
    }

    #[test]
    fn test_display_left_assoc_chain_has_no_parens() {
        let node = Node::BinOp {
            left: Box::new(Node::BinOp {
                left: int(1),
                op: BinaryOperator::Sub,
                right: int(2),
            }),
            op: BinaryOperator::Sub,
            right: int(3),
        };
        assert_eq!(node.to_string(), "1 - 2 - 3");
    }

    #[test]
    fn test_display_right_nested_keeps_parens() {
        let node = Node::BinOp {
            left: int(1),
            op: BinaryOperator::Sub,
            right: Box::new(Node::BinOp {
                left: int(2),
                op: BinaryOperator::Sub,
                right: int(3),
            }),
        };
        assert_eq!(node.to_string(), "1 - (2 - 3)");
    }

    #[test]
    fn test_display_float_keeps_dot() {
        assert_eq!(Node::Number(Number::Float(3.0)).to_string(), "3.0");
        assert_eq!(Node::Number(Number::Float(0.25)).to_string(), "0.25");
    }

    #[test]
    fn test_display_member_on_int_is_parenthesized() {
        let node = Node::MemberAccess {
            target: int(1),
            member: "x".to_string(),
        };
        assert_eq!(node.to_string(), "(1).x");
    }

    #[test]
    fn test_display_keyword_operand_is_parenthesized() {
        let node = Node::BinOp {
            left: Box::new(Node::VarAssign {
                target: var("x"),
                value: int(1),
            }),
            op: BinaryOperator::Add,
            right: int(2),
        };
        assert_eq!(node.to_string(), "(mem x = 1) + 2");
    }

    #[test]
    fn test_display_if_else() {
        let node = Node::If {
            cases: vec![(
                *var("ok"),
                vec![Node::Emit {
                    expression: Box::new(Node::String("yes".to_string())),
                }],
            )],
            else_case: Some(vec![]),
        };
        assert_eq!(node.to_string(), "if ok then emit \"yes\" else end");
    }

    #[test]
    fn test_display_func_def_and_call() {
        let def = Node::FuncDef {
            name: "add".to_string(),
            params: vec!["a".to_string(), "b".to_string()],
            body: vec![Node::Return {
                value: Box::new(Node::BinOp {
                    left: var("a"),
                    op: BinaryOperator::Add,
                    right: var("b"),
                }),
            }],
        };
        assert_eq!(def.to_string(), "def add(a, b) return a + b end");

        let call = Node::FuncCall {
            callee: var("add"),
            args: vec![*int(2), *int(3)],
        };
        assert_eq!(call.to_string(), "add(2, 3)");
    }
}
