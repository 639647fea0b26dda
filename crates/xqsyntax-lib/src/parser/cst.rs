//! Syntax kinds for XQuery and its dialects.
//!
//! `SyntaxKind` serves dual roles: token kinds (from the lexers) and node kinds
//! (from the parser). Keywords have no token kinds of their own: the lexer
//! emits `NCName` and the parser relabels names it consumes as keywords.

use serde::Serialize;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `from_raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace = 0,
    /// `(:`
    CommentStart,
    /// Body of an XQuery comment, nested comments included.
    CommentContents,
    /// `:)`
    CommentEnd,
    /// `:)` outside any comment.
    UnmatchedCommentEnd,
    /// Zero-width marker at end of input inside an unterminated comment.
    IncompleteComment,
    /// Body of an xqDoc comment before the xqDoc lexer splits it.
    XQDocComment,

    // --- xqDoc (all trivia) ---
    XQDocCommentMarker,
    XQDocContents,
    XQDocTrim,
    XQDocTagMarker,
    XQDocTag,
    XQDocVariableIndicator,
    XQDocNCName,
    XQDocWhitespace,
    XQDocXmlTagOpen,
    XQDocXmlCloseTagOpen,
    XQDocXmlTagEnd,
    XQDocXmlSelfClose,
    XQDocXmlEqual,
    XQDocXmlAttributeValueStart,
    XQDocXmlAttributeValueContents,
    XQDocXmlAttributeValueEnd,
    XQDocXmlElementContents,
    XQDocEntityReference,

    // --- Literals ---
    IntegerLiteral,
    DecimalLiteral,
    DoubleLiteral,
    /// `e`/`E` with optional sign but no digits after a number.
    PartialDoubleLiteralExponent,
    StringLiteralStart,
    StringLiteralContents,
    StringLiteralEnd,
    /// Zero-width marker at end of input inside an unterminated string.
    IncompleteStringLiteral,
    /// Doubled quote or doubled brace.
    EscapedCharacter,
    PredefinedEntityReference,
    /// `&name;` with a name other than the five predefined ones.
    EntityReference,
    PartialEntityReference,
    EmptyEntityReference,
    CharacterReference,

    // --- Names ---
    NCName,
    /// A name the parser consumed as a keyword. Never produced by the lexer.
    Keyword,
    /// `Q{`
    BracedUriLiteralStart,
    BracedUriLiteralEnd,

    // --- Punctuation and operators ---
    ParenOpen,
    ParenClose,
    SquareOpen,
    SquareClose,
    BlockOpen,
    BlockClose,
    Comma,
    Separator,
    /// `:` between prefix and local name.
    QNameSeparator,
    /// `::`
    AxisSeparator,
    /// `:=`
    Assign,
    /// `$`
    VariableIndicator,
    /// `@`
    AttributeSelector,
    /// `.`
    Dot,
    /// `..`
    ParentSelector,
    Slash,
    DoubleSlash,
    Union,
    /// `||`
    Concatenation,
    /// `!`
    Bang,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    /// `<<`
    NodeBefore,
    GreaterThan,
    GreaterThanOrEqual,
    /// `>>`
    NodeAfter,
    Plus,
    Minus,
    Star,
    QuestionMark,
    /// `%` before an annotation name.
    AnnotationIndicator,
    /// `#` in a named function reference.
    FunctionRefHash,
    /// `(#`
    PragmaBegin,
    /// `#)`
    PragmaEnd,
    PragmaContents,

    // --- Markup ---
    /// `<` starting a direct element constructor.
    XmlTagOpen,
    XmlTagEnd,
    /// `</`
    XmlCloseTagOpen,
    /// `/>`
    XmlSelfClose,
    XmlAttributeValueStart,
    XmlAttributeValueContents,
    XmlAttributeValueEnd,
    XmlElementContents,
    /// `<!--`
    XmlCommentStart,
    XmlCommentContents,
    /// `-->`
    XmlCommentEnd,
    /// `<![CDATA[`
    CDataSectionStart,
    CDataSectionContents,
    /// `]]>`
    CDataSectionEnd,
    /// `<?`
    ProcessingInstructionBegin,
    ProcessingInstructionContents,
    /// `?>`
    ProcessingInstructionEnd,
    /// Zero-width marker at end of input inside unterminated markup.
    IncompleteMarkup,

    // --- Errors ---
    BadCharacter,
    /// End of input. Never stored in the token stream.
    Eof,

    // --- Node kinds (non-terminals) ---
    Module,
    Comment,
    Error,

    // Module structure
    VersionDecl,
    MainModule,
    LibraryModule,
    ModuleDecl,
    Prolog,
    QueryBody,

    // Prolog declarations
    DefaultNamespaceDecl,
    BoundarySpaceDecl,
    DefaultCollationDecl,
    BaseUriDecl,
    ConstructionDecl,
    OrderingModeDecl,
    EmptyOrderDecl,
    CopyNamespacesDecl,
    DecimalFormatDecl,
    DecimalFormatProperty,
    RevalidationDecl,
    FtOptionDecl,
    NamespaceDecl,
    SchemaImport,
    SchemaPrefix,
    ModuleImport,
    StylesheetImport,
    UriLiteral,
    ContextItemDecl,
    AnnotatedDecl,
    Annotation,
    CompatibilityAnnotation,
    VarDecl,
    FunctionDecl,
    ParamList,
    Param,
    TypeDeclaration,
    EnclosedExpr,
    OptionDecl,

    // Names
    QName,
    UriQualifiedName,
    BracedUriLiteral,
    StringLiteral,
    VarRef,
    VarName,

    // FLWOR and friends
    Expr,
    FlworExpr,
    ForClause,
    ForBinding,
    AllowingEmpty,
    PositionalVar,
    FtScoreVar,
    LetClause,
    LetBinding,
    WindowClause,
    TumblingWindowClause,
    SlidingWindowClause,
    WindowStartCondition,
    WindowEndCondition,
    WindowVars,
    WhereClause,
    GroupByClause,
    GroupingSpec,
    OrderByClause,
    OrderSpec,
    OrderModifier,
    CountClause,
    ReturnClause,
    QuantifiedExpr,
    QuantifiedBinding,
    SwitchExpr,
    SwitchCaseClause,
    SwitchDefaultClause,
    TypeswitchExpr,
    CaseClause,
    DefaultCaseClause,
    SequenceTypeUnion,
    IfExpr,
    TryCatchExpr,
    TryClause,
    CatchClause,
    CatchErrorList,

    // Operators
    OrExpr,
    AndExpr,
    ComparisonExpr,
    FtContainsExpr,
    StringConcatExpr,
    RangeExpr,
    AdditiveExpr,
    MultiplicativeExpr,
    UnionExpr,
    IntersectExceptExpr,
    InstanceofExpr,
    TreatExpr,
    CastableExpr,
    CastExpr,
    UnaryExpr,
    ValidateExpr,
    ExtensionExpr,
    Pragma,
    SimpleMapExpr,

    // Paths
    PathExpr,
    RelativePathExpr,
    AxisStep,
    ForwardStep,
    ReverseStep,
    AbbrevForwardStep,
    AbbrevReverseStep,
    NameTest,
    Wildcard,
    PredicateList,
    Predicate,
    PostfixExpr,
    ArgumentList,
    ArgumentPlaceholder,

    // Primary expressions
    ParenthesizedExpr,
    ContextItemExpr,
    OrderedExpr,
    UnorderedExpr,
    FunctionCall,
    NamedFunctionRef,
    InlineFunctionExpr,

    // Constructors
    DirElemConstructor,
    DirAttributeList,
    DirAttribute,
    DirAttributeValue,
    DirElemContent,
    DirCommentConstructor,
    DirPiConstructor,
    CDataSection,
    CompDocConstructor,
    CompElemConstructor,
    CompAttrConstructor,
    CompNamespaceConstructor,
    CompTextConstructor,
    CompCommentConstructor,
    CompPiConstructor,
    CompBinaryConstructor,

    // Types
    SequenceType,
    OccurrenceIndicator,
    SingleType,
    TypeName,
    ParenthesizedItemType,
    AnyItemType,
    EmptySequenceType,
    AnyFunctionTest,
    TypedFunctionTest,
    AnyKindTest,
    DocumentTest,
    TextTest,
    CommentTest,
    NamespaceNodeTest,
    PiTest,
    AttributeTest,
    SchemaAttributeTest,
    ElementTest,
    SchemaElementTest,
    BinaryTest,

    // Update Facility
    InsertExpr,
    DeleteExpr,
    ReplaceExpr,
    RenameExpr,
    TransformExpr,
    CopyBinding,
    SourceExpr,
    TargetExpr,
    NewNameExpr,

    // Full Text
    FtSelection,
    FtOr,
    FtAnd,
    FtMildNot,
    FtUnaryNot,
    FtPrimaryWithOptions,
    FtWords,
    FtAnyallOption,
    FtTimes,
    FtRange,
    FtOrder,
    FtWindow,
    FtDistance,
    FtScope,
    FtContent,
    FtWeight,
    FtMatchOptions,
    FtCaseOption,
    FtDiacriticsOption,
    FtStemOption,
    FtLanguageOption,
    FtWildCardOption,
    FtStopWordOption,
    FtThesaurusOption,
    FtThesaurusId,
    FtExtensionOption,
    FtExtensionSelection,
    FtIgnoreOption,

    // Scripting
    BlockExpr,
    BlockDecls,
    BlockVarDecl,
    AssignmentExpr,
    ExitExpr,
    WhileExpr,

    // Must be last - used for bounds checking in `from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < (Module as u16)
    }

    #[inline]
    pub fn is_node(self) -> bool {
        !self.is_token() && self != __LAST
    }

    /// Tokens the parser skips between productions.
    #[inline]
    pub fn is_trivia(self) -> bool {
        (self as u16) <= (XQDocEntityReference as u16) || self == Comment
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Error
                | BadCharacter
                | UnmatchedCommentEnd
                | IncompleteComment
                | IncompleteStringLiteral
                | IncompleteMarkup
                | PartialDoubleLiteralExponent
                | PartialEntityReference
                | EmptyEntityReference
        )
    }

    pub fn from_raw(raw: u16) -> Option<Self> {
        if raw >= __LAST as u16 {
            return None;
        }
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        Some(unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
    }
}

/// 128-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0
                && let Some(kind) = SyntaxKind::from_raw(i)
            {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const NUMERIC_LITERALS: TokenSet =
        TokenSet::new(&[IntegerLiteral, DecimalLiteral, DoubleLiteral]);

    pub const COMPARISON_OPERATORS: TokenSet = TokenSet::new(&[
        Equal,
        NotEqual,
        LessThan,
        LessThanOrEqual,
        GreaterThan,
        GreaterThanOrEqual,
        NodeBefore,
        NodeAfter,
    ]);

    pub const ADDITIVE_OPERATORS: TokenSet = TokenSet::new(&[Plus, Minus]);

    pub const OCCURRENCE_INDICATORS: TokenSet = TokenSet::new(&[QuestionMark, Star, Plus]);

    /// Content tokens of string literals and attribute values.
    pub const CHARACTER_REFERENCES: TokenSet = TokenSet::new(&[
        EscapedCharacter,
        PredefinedEntityReference,
        EntityReference,
        PartialEntityReference,
        EmptyEntityReference,
        CharacterReference,
    ]);
}
