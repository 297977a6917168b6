//! # AST Types
//!
//! Abstract Syntax Tree node types for HCL native syntax.
//!
//! Every node kind carries a discriminator when serialized: enums that form
//! sums of node shapes are internally tagged with `type` (or `kind` for the
//! splat and for-expression sub-tags), so the serialized form exposes the
//! stable tag strings downstream consumers match on.
//!
//! Nodes are immutable by convention: the parser creates them, the printer
//! and validator read them, and transformations build new trees.
//!
//! ## Example
//!
//! ```rust
//! use hcl_ast::{Attribute, BodyElement, ConfigFile, Expression, Identifier};
//!
//! let file = ConfigFile::with_body(vec![BodyElement::Attribute(Attribute {
//!     name: Identifier::new("port"),
//!     value: Expression::NumberLiteral(hcl_ast::NumberLiteral { value: 8080.0 }),
//! })]);
//! assert_eq!(file.body.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// CONFIG FILE & BODY
// =============================================================================

/// A parsed HCL configuration file: an ordered sequence of body elements.
///
/// Source order is preserved; the stringifier emits elements in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Top-level body elements in source order.
    pub body: Vec<BodyElement>,
}

impl ConfigFile {
    /// Create an empty configuration file.
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    /// Create a configuration file from body elements.
    pub fn with_body(body: Vec<BodyElement>) -> Self {
        Self { body }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new()
    }
}

/// One element of a body: an attribute, a block, or a one-line block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyElement {
    /// `name = expr`
    Attribute(Attribute),
    /// `type label* { ... }` spanning multiple lines.
    Block(Block),
    /// `type label* { name = expr }` on a single line.
    OneLineBlock(OneLineBlock),
}

/// An attribute assignment: `name = expr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name.
    pub name: Identifier,
    /// Assigned expression.
    pub value: Expression,
}

/// A multi-line block: `type label* { body... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Block type, e.g. `resource`.
    pub block_type: Identifier,
    /// Zero or more labels between the type and the opening brace.
    pub labels: Vec<Label>,
    /// Nested body elements in source order.
    pub bodies: Vec<BodyElement>,
}

/// A block whose entire body fits on one line, holding at most one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneLineBlock {
    /// Block type.
    pub block_type: Identifier,
    /// Zero or more labels.
    pub labels: Vec<Label>,
    /// The single attribute, if any.
    pub attribute: Option<Attribute>,
}

/// A block label: a bare identifier or a quoted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Label {
    /// Bare identifier label.
    Identifier(Identifier),
    /// Quoted string label.
    StringLiteral(StringLiteral),
}

// =============================================================================
// ATOMS
// =============================================================================

/// An identifier.
///
/// Starts with a letter, underscore, or non-ASCII character; continuation
/// characters additionally allow digits and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// Identifier text.
    pub value: String,
}

impl Identifier {
    /// Create an identifier from text.
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// A string literal with escapes already decoded (no surrounding quotes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLiteral {
    /// Decoded string contents.
    pub value: String,
}

impl StringLiteral {
    /// Create a string literal from decoded text.
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// A number literal, parsed as an IEEE-754 double. Always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberLiteral {
    /// Numeric value.
    pub value: f64,
}

/// A boolean literal: `true` or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanLiteral {
    /// Boolean value.
    pub value: bool,
}

/// The `null` literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullLiteral {
    /// Serializes as `null`.
    pub value: (),
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// The expression sum type.
///
/// Recursive positions are boxed so the enum stays sized; collections break
/// recursion through `Vec`. The serialized `type` tag is the variant name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Bare string literal value.
    StringLiteral(StringLiteral),
    /// Number literal value.
    NumberLiteral(NumberLiteral),
    /// `true` / `false`.
    BooleanLiteral(BooleanLiteral),
    /// `null`.
    NullLiteral(NullLiteral),

    /// `[e1, e2, ...]`
    TupleValue {
        /// Elements in source order.
        elements: Vec<Expression>,
    },
    /// `{ k1 = v1, k2 = v2, ... }`
    ObjectValue {
        /// Key/value elements in source order.
        elements: Vec<ObjectValueElement>,
    },

    /// `"literal ${interpolation} %{directive}..."`
    QuotedTemplateExpression(QuotedTemplateExpression),
    /// `<<MARKER ... MARKER` (or `<<-MARKER`).
    HeredocTemplateExpression(HeredocTemplateExpression),

    /// `name(arg1, arg2, ...)`
    FunctionCallExpression {
        /// Function name.
        name: Identifier,
        /// Arguments in source order.
        args: Vec<Expression>,
    },
    /// A bare variable reference.
    VariableExpression {
        /// Variable name.
        name: Identifier,
    },

    /// `[for ...]` / `{for ...}` comprehension.
    ForExpression(Box<ForExpression>),

    /// `target[key]`
    IndexOperator {
        /// Index expression.
        key: Box<Expression>,
        /// Expression being indexed.
        target: Box<Expression>,
    },
    /// `target.0`, the numeric attribute-style index kept for HIL compatibility.
    LegacyIndexOperator {
        /// Index value; a non-negative integer.
        key: NumberLiteral,
        /// Expression being indexed.
        target: Box<Expression>,
    },
    /// `target.name`
    GetAttributeOperator {
        /// Attribute name.
        key: Identifier,
        /// Expression being accessed.
        target: Box<Expression>,
    },
    /// `target.*...` / `target[*]...`
    SplatOperator(Box<SplatOperator>),

    /// `!term` / `-term`
    UnaryOperator {
        /// Operator symbol.
        operator: UnaryOp,
        /// Operand.
        term: Box<Expression>,
    },
    /// `left op right`
    BinaryOperator {
        /// Operator symbol.
        operator: BinaryOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },
    /// `predicate ? trueExpr : falseExpr`
    #[serde(rename_all = "camelCase")]
    ConditionalOperator {
        /// Condition.
        predicate: Box<Expression>,
        /// Value when the predicate holds.
        true_expr: Box<Expression>,
        /// Value otherwise.
        false_expr: Box<Expression>,
    },
    /// `(expression)`
    ParenthesizedExpression {
        /// Inner expression.
        expression: Box<Expression>,
    },
}

impl Expression {
    /// Shorthand for a variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::VariableExpression { name: Identifier::new(name) }
    }

    /// Shorthand for a number literal.
    pub fn number(value: f64) -> Self {
        Self::NumberLiteral(NumberLiteral { value })
    }
}

/// One `key = value` element of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectValueElement {
    /// Element key.
    pub key: Identifier,
    /// Element value.
    pub value: Expression,
}

// =============================================================================
// OPERATORS
// =============================================================================

/// Unary operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical not, `!`.
    #[serde(rename = "!")]
    Not,
    /// Arithmetic negation, `-`.
    #[serde(rename = "-")]
    Neg,
}

impl UnaryOp {
    /// Operator symbol as written in source.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
        }
    }
}

/// Binary operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `*`
    #[serde(rename = "*")]
    Mul,
    /// `/`
    #[serde(rename = "/")]
    Div,
    /// `%`
    #[serde(rename = "%")]
    Mod,
    /// `+`
    #[serde(rename = "+")]
    Add,
    /// `-`
    #[serde(rename = "-")]
    Sub,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=`
    #[serde(rename = ">=")]
    GtEq,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    LtEq,
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    NotEq,
    /// `&&`
    #[serde(rename = "&&")]
    And,
    /// `||`
    #[serde(rename = "||")]
    Or,
}

impl BinaryOp {
    /// Operator symbol as written in source.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Precedence level; higher binds tighter.
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Mod => 5,
            Self::Add | Self::Sub => 4,
            Self::Gt | Self::GtEq | Self::Lt | Self::LtEq => 3,
            Self::Eq | Self::NotEq => 2,
            Self::And => 1,
            Self::Or => 0,
        }
    }
}

// =============================================================================
// TEMPLATES
// =============================================================================

/// A quoted template: `"..."` with literals, interpolations, and directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedTemplateExpression {
    /// Template parts in source order. Empty for `""`.
    pub parts: Vec<TemplatePart>,
}

/// A heredoc template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeredocTemplateExpression {
    /// The end-marker identifier that also opened the heredoc.
    pub marker: Identifier,
    /// Whether the heredoc was opened with `<<-`.
    pub strip_indent: bool,
    /// Template parts of the body.
    pub template: Vec<TemplatePart>,
}

/// One part of a template body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TemplatePart {
    /// A run of literal text.
    TemplateLiteral(TemplateLiteral),
    /// `${ expr }`
    TemplateInterpolation(TemplateInterpolation),
    /// `%{if ...} ... %{endif}`
    TemplateIf(TemplateIf),
    /// `%{for ...} ... %{endfor}`
    TemplateFor(TemplateFor),
}

/// Literal template text with escapes decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLiteral {
    /// Decoded text.
    pub value: String,
}

impl TemplateLiteral {
    /// Create a template literal from decoded text.
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// An interpolation: `${ expr }`, optionally with `~` strip markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInterpolation {
    /// Interpolated expression.
    pub expression: Expression,
    /// Whitespace-strip markers on either side.
    pub strip: Strip,
}

/// Strip markers of an interpolation: `${~` sets `left`, `~}` sets `right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Strip {
    /// `~` immediately after `${`.
    pub left: bool,
    /// `~` immediately before `}`.
    pub right: bool,
}

/// Strip markers of one `%{ ... }` directive head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StripMarkers {
    /// `~` immediately after `%{`.
    pub start: bool,
    /// `~` immediately before `}`.
    pub end: bool,
}

/// An `%{if}` directive with optional `%{else}` branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateIf {
    /// Condition expression.
    pub condition: Expression,
    /// Template parts of the `if` branch.
    pub then: Vec<TemplatePart>,
    /// Template parts of the `else` branch, if present.
    #[serde(rename = "else")]
    pub else_branch: Option<Vec<TemplatePart>>,
    /// Strip markers of the `if`/`else`/`endif` heads.
    pub strip: TemplateIfStrip,
}

/// Strip markers for the three heads of an `%{if}` directive.
///
/// `else_marks` is present exactly when the directive has an else branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateIfStrip {
    /// Markers on `%{if ...}`.
    #[serde(rename = "if")]
    pub if_marks: StripMarkers,
    /// Markers on `%{else}`, when present.
    #[serde(rename = "else")]
    pub else_marks: Option<StripMarkers>,
    /// Markers on `%{endif}`.
    pub endif: StripMarkers,
}

/// An `%{for}` directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFor {
    /// Iteration variables and collection.
    pub intro: TemplateForIntro,
    /// Template parts of the loop body.
    pub body: Vec<TemplatePart>,
    /// Strip markers of the `for`/`endfor` heads.
    pub strip: TemplateForStrip,
}

/// The head of a `%{for key, value in collection}` directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateForIntro {
    /// First iteration variable.
    pub key: Identifier,
    /// Second iteration variable, if present.
    pub value: Option<Identifier>,
    /// Collection being iterated.
    pub collection: Expression,
}

/// Strip markers for the two heads of an `%{for}` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplateForStrip {
    /// Markers on `%{for ...}`.
    #[serde(rename = "for")]
    pub for_marks: StripMarkers,
    /// Markers on `%{endfor}`.
    pub endfor: StripMarkers,
}

// =============================================================================
// FOR-EXPRESSIONS
// =============================================================================

/// A collection comprehension; `kind` distinguishes tuple from object output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ForExpression {
    /// `[for x in coll : expr if cond]`
    #[serde(rename = "tuple")]
    Tuple {
        /// Iteration variables and collection.
        intro: ForIntro,
        /// Expression producing each element.
        expression: Expression,
        /// Optional filter condition.
        condition: Option<Expression>,
    },
    /// `{for k, v in coll : key => value... if cond}`
    #[serde(rename = "object")]
    Object {
        /// Iteration variables and collection.
        intro: ForIntro,
        /// Expression producing each key.
        key: Expression,
        /// Expression producing each value.
        value: Expression,
        /// Whether values are grouped with `...`.
        grouping: bool,
        /// Optional filter condition.
        condition: Option<Expression>,
    },
}

/// The head of a for-expression: `for iterator (, value)? in collection :`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForIntro {
    /// First iteration variable.
    pub iterator: Identifier,
    /// Second iteration variable, if present.
    pub value: Option<Identifier>,
    /// Collection being iterated.
    pub collection: Expression,
}

// =============================================================================
// SPLATS
// =============================================================================

/// A splat; `kind` distinguishes the `.*` and `[*]` forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SplatOperator {
    /// `target.*.a.b`, the attribute-only splat.
    Attribute {
        /// Attribute steps applied to each element.
        attributes: Vec<SplatGetAttribute>,
        /// Expression being splatted.
        target: Expression,
    },
    /// `target[*].a[0]`, the full splat.
    Full {
        /// Steps applied to each element.
        operations: Vec<SplatOperation>,
        /// Expression being splatted.
        target: Expression,
    },
}

/// An attribute step inside a splat chain. Carries no `target`; the splat
/// threads each element through the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplatGetAttribute {
    /// Attribute name.
    pub key: Identifier,
}

/// One step of a full splat chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SplatOperation {
    /// `.name`
    #[serde(rename = "GetAttributeOperator")]
    GetAttribute {
        /// Attribute name.
        key: Identifier,
    },
    /// `[expr]`
    #[serde(rename = "IndexOperator")]
    Index {
        /// Index expression.
        key: Expression,
    },
}

// =============================================================================
// TESTS
// =============================================================================
