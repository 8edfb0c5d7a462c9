use thiserror::Error;

/// Source location span for error reporting
/// Represents a range of characters in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed character offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed character offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

fn span_suffix(span: Option<&Span>) -> String {
    span.map_or(String::new(), Span::display)
}

/// Errors that can occur while tokenizing, parsing, building or integrating
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegralError {
    /// Unrecognized character, mismatched parentheses, misplaced comma, empty input
    #[error("Syntax error: {msg}{}", span_suffix(.span.as_ref()))]
    Syntax { msg: String, span: Option<Span> },

    /// An operator or function was applied without enough operands
    #[error("Not enough operands for '{op}' at RPN index {index}. RPN: {rpn}")]
    StackUnderflow {
        op: String,
        index: usize,
        rpn: String,
    },

    /// Evaluating the RPN left something other than exactly one value
    #[error("Invalid expression: leftover stack [{}]. RPN was: {rpn}", .leftover.join(", "))]
    MalformedExpression { leftover: Vec<String>, rpn: String },

    /// The general-purpose integrator could not produce a closed form
    #[error("Integration failed: {0}")]
    IntegrationFailure(String),

    // Safety limits
    #[error("Expression nesting depth exceeds maximum limit")]
    MaxDepthExceeded,
    #[error("Expression size exceeds maximum node count limit")]
    MaxNodesExceeded,
}

impl IntegralError {
    /// Create a syntax error without location
    pub fn syntax(msg: impl Into<String>) -> Self {
        IntegralError::Syntax {
            msg: msg.into(),
            span: None,
        }
    }

    /// Create a syntax error pointing at a span of the input
    pub fn syntax_at(msg: impl Into<String>, span: Span) -> Self {
        IntegralError::Syntax {
            msg: msg.into(),
            span: Some(span),
        }
    }
}
