// AST (Abstract Syntax Tree) definitions for the Leor front end

use std::fmt;

/// Source location information for error reporting.
///
/// Both fields are 1-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Binary operators understood by the precedence climber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Comparison
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    /// The operator exactly as it appears in source.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// AST nodes for the whole language.
///
/// Every node owns its children outright; a subtree is only ever moved into
/// a new parent, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Placeholder for an absent sub-tree (e.g. a variable without initializer)
    None {
        location: SourceLocation,
    },

    // Literals
    BoolLiteral(bool, SourceLocation),
    CharLiteral(char, SourceLocation),
    IntLiteral(i64, SourceLocation),
    FloatLiteral(f64, SourceLocation),
    StringLiteral(String, SourceLocation),
    Variable(String, SourceLocation),

    // Expressions
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    Assignment {
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
        location: SourceLocation,
    },
    FunctionCall {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
        location: SourceLocation,
    },

    // Definitions
    VarDef {
        name: String,
        type_name: String,
        is_const: bool,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    FunctionDef {
        name: String,
        return_type: String,
        params: Vec<AstNode>,
        body: Box<AstNode>,
        location: SourceLocation,
    },

    /// `{ ... }` block, also used for the top-level program
    Program {
        statements: Vec<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    pub fn none(location: SourceLocation) -> Self {
        AstNode::None { location }
    }

    pub fn boolean(value: bool, location: SourceLocation) -> Self {
        AstNode::BoolLiteral(value, location)
    }

    pub fn char(value: char, location: SourceLocation) -> Self {
        AstNode::CharLiteral(value, location)
    }

    pub fn int(value: i64, location: SourceLocation) -> Self {
        AstNode::IntLiteral(value, location)
    }

    pub fn float(value: f64, location: SourceLocation) -> Self {
        AstNode::FloatLiteral(value, location)
    }

    pub fn string(value: impl Into<String>, location: SourceLocation) -> Self {
        AstNode::StringLiteral(value.into(), location)
    }

    pub fn variable(name: impl Into<String>, location: SourceLocation) -> Self {
        AstNode::Variable(name.into(), location)
    }

    pub fn binary(op: BinOp, left: AstNode, right: AstNode, location: SourceLocation) -> Self {
        AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    pub fn assignment(lhs: AstNode, rhs: AstNode, location: SourceLocation) -> Self {
        AstNode::Assignment {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            location,
        }
    }

    pub fn call(callee: AstNode, args: Vec<AstNode>, location: SourceLocation) -> Self {
        AstNode::FunctionCall {
            callee: Box::new(callee),
            args,
            location,
        }
    }

    /// Build a variable definition; pass [`AstNode::none`] when there is no initializer.
    pub fn var_def(
        name: impl Into<String>,
        type_name: impl Into<String>,
        is_const: bool,
        value: AstNode,
        location: SourceLocation,
    ) -> Self {
        AstNode::VarDef {
            name: name.into(),
            type_name: type_name.into(),
            is_const,
            value: Box::new(value),
            location,
        }
    }

    pub fn function(
        name: impl Into<String>,
        return_type: impl Into<String>,
        params: Vec<AstNode>,
        body: AstNode,
        location: SourceLocation,
    ) -> Self {
        AstNode::FunctionDef {
            name: name.into(),
            return_type: return_type.into(),
            params,
            body: Box::new(body),
            location,
        }
    }

    pub fn program(statements: Vec<AstNode>, location: SourceLocation) -> Self {
        AstNode::Program {
            statements,
            location,
        }
    }

    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            AstNode::None { location } => location,
            AstNode::BoolLiteral(_, loc) => loc,
            AstNode::CharLiteral(_, loc) => loc,
            AstNode::IntLiteral(_, loc) => loc,
            AstNode::FloatLiteral(_, loc) => loc,
            AstNode::StringLiteral(_, loc) => loc,
            AstNode::Variable(_, loc) => loc,
            AstNode::BinaryOp { location, .. } => location,
            AstNode::Assignment { location, .. } => location,
            AstNode::FunctionCall { location, .. } => location,
            AstNode::VarDef { location, .. } => location,
            AstNode::FunctionDef { location, .. } => location,
            AstNode::Program { location, .. } => location,
        }
    }

    /// Short upper-case name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::None { .. } => "NONE",
            AstNode::BoolLiteral(..) => "BOOL",
            AstNode::CharLiteral(..) => "CHAR",
            AstNode::IntLiteral(..) => "INT",
            AstNode::FloatLiteral(..) => "FLOAT",
            AstNode::StringLiteral(..) => "STRING",
            AstNode::Variable(..) => "VAR",
            AstNode::BinaryOp { .. } => "BINARY",
            AstNode::Assignment { .. } => "ASSIGN",
            AstNode::FunctionCall { .. } => "CALL",
            AstNode::VarDef { .. } => "VARDEF",
            AstNode::FunctionDef { .. } => "FUNCTION",
            AstNode::Program { .. } => "PROG",
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&AstNode> {
        match self {
            AstNode::None { .. }
            | AstNode::BoolLiteral(..)
            | AstNode::CharLiteral(..)
            | AstNode::IntLiteral(..)
            | AstNode::FloatLiteral(..)
            | AstNode::StringLiteral(..)
            | AstNode::Variable(..) => Vec::new(),
            AstNode::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            AstNode::Assignment { lhs, rhs, .. } => vec![lhs.as_ref(), rhs.as_ref()],
            AstNode::FunctionCall { callee, args, .. } => {
                std::iter::once(callee.as_ref()).chain(args).collect()
            }
            AstNode::VarDef { value, .. } => vec![value.as_ref()],
            AstNode::FunctionDef { params, body, .. } => {
                params.iter().chain(std::iter::once(body.as_ref())).collect()
            }
            AstNode::Program { statements, .. } => statements.iter().collect(),
        }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_name())?;
        match self {
            AstNode::BoolLiteral(b, _) => write!(f, " {}", b)?,
            AstNode::CharLiteral(c, _) => write!(f, " '{}'", c.escape_default())?,
            AstNode::IntLiteral(n, _) => write!(f, " {}", n)?,
            AstNode::FloatLiteral(x, _) => write!(f, " {:?}", x)?,
            AstNode::StringLiteral(s, _) => write!(f, " \"{}\"", s.escape_default())?,
            AstNode::Variable(name, _) => write!(f, " {}", name)?,
            AstNode::BinaryOp { op, .. } => write!(f, " '{}'", op)?,
            AstNode::Assignment { .. } => f.write_str(" '='")?,
            AstNode::VarDef {
                name,
                type_name,
                is_const,
                ..
            } => {
                let kw = if *is_const { "const" } else { "mut" };
                write!(f, " {} {}: {}", kw, name, type_name)?
            }
            AstNode::FunctionDef {
                name, return_type, ..
            } => write!(f, " {} -> {}", name, return_type)?,
            AstNode::None { .. } | AstNode::FunctionCall { .. } | AstNode::Program { .. } => {}
        }
        write!(f, " ({})", self.location())
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        self.write_header(f)?;
        writeln!(f)?;
        for child in self.children() {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Renders the subtree as an indented outline, one node per line.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
