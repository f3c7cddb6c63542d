//! Typed views over red nodes.
//!
//! Every concrete node kind has a wrapper with slot accessors, and
//! [`Visitor`] dispatches on the kind so consumers can override only the
//! nodes they care about.

use std::marker::PhantomData;

use crate::{RedNode, RedToken, SyntaxKind, SyntaxTrivia};

pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(syntax: RedNode) -> Option<Self>;

    fn syntax(&self) -> &RedNode;
}

fn child<N: AstNode>(parent: &RedNode, slot: usize) -> Option<N> {
    parent.slot(slot)?.into_node().and_then(N::cast)
}

fn token(parent: &RedNode, slot: usize) -> Option<RedToken> {
    parent.slot(slot)?.into_token()
}

fn list<N: AstNode>(parent: &RedNode, slot: usize) -> AstList<N> {
    AstList::new(parent.slot(slot).and_then(|element| element.into_node()))
}

/// A `LIST` node viewed as a sequence of `N`. Separators and elements of
/// other kinds are skipped by [`AstList::iter`].
#[derive(Debug, Clone)]
pub struct AstList<N> {
    syntax: Option<RedNode>,
    _element: PhantomData<fn() -> N>,
}

impl<N: AstNode> AstList<N> {
    fn new(syntax: Option<RedNode>) -> Self {
        Self { syntax: syntax.filter(|node| node.kind() == SyntaxKind::LIST), _element: PhantomData }
    }

    pub fn syntax(&self) -> Option<&RedNode> {
        self.syntax.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = N> + use<N> {
        self.syntax.clone().into_iter().flat_map(|node| node.children()).filter_map(N::cast)
    }

    /// Every token directly inside the list, separators included.
    pub fn tokens(&self) -> impl Iterator<Item = RedToken> + use<N> {
        self.syntax.clone().into_iter().flat_map(|node| node.tokens())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

macro_rules! ast_nodes {
    ($($name:ident => $kind:ident, $visit:ident;)*) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq)]
            pub struct $name(RedNode);

            impl AstNode for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == SyntaxKind::$kind
                }

                fn cast(syntax: RedNode) -> Option<Self> {
                    Self::can_cast(syntax.kind()).then(|| Self(syntax))
                }

                fn syntax(&self) -> &RedNode {
                    &self.0
                }
            }
        )*

        /// One method per node kind. Each defaults to [`Visitor::visit_node`],
        /// which walks the children in source order.
        pub trait Visitor {
            $(
                fn $visit(&mut self, node: &$name) {
                    self.visit_node(node.syntax());
                }
            )*

            fn visit_node(&mut self, node: &RedNode) {
                walk(self, node);
            }

            fn visit_token(&mut self, token: &RedToken) {
                for trivia in token.leading_trivia().chain(token.trailing_trivia()) {
                    self.visit_trivia(&trivia);
                }
            }

            fn visit_trivia(&mut self, _trivia: &SyntaxTrivia<'_>) {}
        }

        /// Calls the [`Visitor`] method matching the kind of `node`.
        pub fn accept<V: Visitor + ?Sized>(node: &RedNode, visitor: &mut V) {
            match node.kind() {
                $(SyntaxKind::$kind => visitor.$visit(&$name(node.clone())),)*
                _ => visitor.visit_node(node),
            }
        }
    };
}

/// Visits the children of `node`: nodes through [`accept`], tokens through
/// [`Visitor::visit_token`].
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &RedNode) {
    for child in node.children_with_tokens() {
        match child {
            crate::NodeOrToken::Node(node) => accept(&node, visitor),
            crate::NodeOrToken::Token(token) => visitor.visit_token(&token),
        }
    }
}

ast_nodes! {
    File => FILE, visit_file;
    Error => ERROR, visit_error;
    ExpressionStatement => EXPRESSION_STATEMENT, visit_expression_statement;
    EmptyStatement => EMPTY_STATEMENT, visit_empty_statement;
    FunctionDeclaration => FUNCTION_DECLARATION, visit_function_declaration;
    FunctionOutputDescription => FUNCTION_OUTPUT_DESCRIPTION, visit_function_output_description;
    FunctionInputDescription => FUNCTION_INPUT_DESCRIPTION, visit_function_input_description;
    ClassDeclaration => CLASS_DECLARATION, visit_class_declaration;
    AttributeList => ATTRIBUTE_LIST, visit_attribute_list;
    Attribute => ATTRIBUTE, visit_attribute;
    AttributeAssignment => ATTRIBUTE_ASSIGNMENT, visit_attribute_assignment;
    BaseClassList => BASE_CLASS_LIST, visit_base_class_list;
    PropertiesList => PROPERTIES_LIST, visit_properties_list;
    MethodsList => METHODS_LIST, visit_methods_list;
    EventsList => EVENTS_LIST, visit_events_list;
    EnumerationList => ENUMERATION_LIST, visit_enumeration_list;
    EnumerationItem => ENUMERATION_ITEM, visit_enumeration_item;
    EnumerationItemValue => ENUMERATION_ITEM_VALUE, visit_enumeration_item_value;
    MethodDefinition => METHOD_DEFINITION, visit_method_definition;
    AbstractMethodDeclaration => ABSTRACT_METHOD_DECLARATION, visit_abstract_method_declaration;
    SwitchStatement => SWITCH_STATEMENT, visit_switch_statement;
    SwitchCase => SWITCH_CASE, visit_switch_case;
    WhileLoopStatement => WHILE_LOOP_STATEMENT, visit_while_loop_statement;
    IfStatement => IF_STATEMENT, visit_if_statement;
    ElseifClause => ELSEIF_CLAUSE, visit_elseif_clause;
    ElseClause => ELSE_CLAUSE, visit_else_clause;
    ForLoopStatement => FOR_LOOP_STATEMENT, visit_for_loop_statement;
    TryCatchStatement => TRY_CATCH_STATEMENT, visit_try_catch_statement;
    CatchClause => CATCH_CLAUSE, visit_catch_clause;
    AssignmentExpression => ASSIGNMENT_EXPRESSION, visit_assignment_expression;
    BinaryOperationExpression => BINARY_OPERATION_EXPRESSION, visit_binary_operation_expression;
    UnaryPrefixOperationExpression => UNARY_PREFIX_OPERATION_EXPRESSION, visit_unary_prefix_operation_expression;
    UnaryPostfixOperationExpression => UNARY_POSTFIX_OPERATION_EXPRESSION, visit_unary_postfix_operation_expression;
    IdentifierNameExpression => IDENTIFIER_NAME_EXPRESSION, visit_identifier_name_expression;
    NumberLiteralExpression => NUMBER_LITERAL_EXPRESSION, visit_number_literal_expression;
    StringLiteralExpression => STRING_LITERAL_EXPRESSION, visit_string_literal_expression;
    DoubleQuotedStringLiteralExpression => DOUBLE_QUOTED_STRING_LITERAL_EXPRESSION, visit_double_quoted_string_literal_expression;
    UnquotedStringLiteralExpression => UNQUOTED_STRING_LITERAL_EXPRESSION, visit_unquoted_string_literal_expression;
    ArrayLiteralExpression => ARRAY_LITERAL_EXPRESSION, visit_array_literal_expression;
    CellArrayLiteralExpression => CELL_ARRAY_LITERAL_EXPRESSION, visit_cell_array_literal_expression;
    EmptyExpression => EMPTY_EXPRESSION, visit_empty_expression;
    ParenthesizedExpression => PARENTHESIZED_EXPRESSION, visit_parenthesized_expression;
    CellArrayElementAccessExpression => CELL_ARRAY_ELEMENT_ACCESS_EXPRESSION, visit_cell_array_element_access_expression;
    FunctionCallExpression => FUNCTION_CALL_EXPRESSION, visit_function_call_expression;
    MemberAccessExpression => MEMBER_ACCESS_EXPRESSION, visit_member_access_expression;
    IndirectMemberAccessExpression => INDIRECT_MEMBER_ACCESS_EXPRESSION, visit_indirect_member_access_expression;
    CommandExpression => COMMAND_EXPRESSION, visit_command_expression;
    BaseClassInvokationExpression => BASE_CLASS_INVOKATION_EXPRESSION, visit_base_class_invokation_expression;
    NamedFunctionHandleExpression => NAMED_FUNCTION_HANDLE_EXPRESSION, visit_named_function_handle_expression;
    LambdaExpression => LAMBDA_EXPRESSION, visit_lambda_expression;
    CompoundName => COMPOUND_NAME, visit_compound_name;
}

macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $($variant($variant),)*
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                $($variant::can_cast(kind))||*
            }

            fn cast(syntax: RedNode) -> Option<Self> {
                $(if $variant::can_cast(syntax.kind()) {
                    return Some(Self::$variant($variant(syntax)));
                })*
                None
            }

            fn syntax(&self) -> &RedNode {
                match self {
                    $(Self::$variant(node) => node.syntax(),)*
                }
            }
        }
    };
}

ast_enum! {
    Statement {
        ExpressionStatement,
        EmptyStatement,
        FunctionDeclaration,
        ClassDeclaration,
        SwitchStatement,
        WhileLoopStatement,
        IfStatement,
        ForLoopStatement,
        TryCatchStatement,
        Error,
    }
}

ast_enum! {
    Expression {
        AssignmentExpression,
        BinaryOperationExpression,
        UnaryPrefixOperationExpression,
        UnaryPostfixOperationExpression,
        IdentifierNameExpression,
        NumberLiteralExpression,
        StringLiteralExpression,
        DoubleQuotedStringLiteralExpression,
        UnquotedStringLiteralExpression,
        ArrayLiteralExpression,
        CellArrayLiteralExpression,
        EmptyExpression,
        ParenthesizedExpression,
        CellArrayElementAccessExpression,
        FunctionCallExpression,
        MemberAccessExpression,
        IndirectMemberAccessExpression,
        CommandExpression,
        BaseClassInvokationExpression,
        NamedFunctionHandleExpression,
        LambdaExpression,
    }
}

ast_enum! {
    /// A block inside `classdef ... end`.
    ClassMember {
        PropertiesList,
        MethodsList,
        EventsList,
        EnumerationList,
    }
}

ast_enum! {
    Method {
        MethodDefinition,
        AbstractMethodDeclaration,
    }
}

impl File {
    pub fn statements(&self) -> AstList<Statement> {
        list(&self.0, 0)
    }

    pub fn end_of_file(&self) -> Option<RedToken> {
        token(&self.0, 1)
    }
}

impl ExpressionStatement {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    /// The `;` or `,` closing the statement, if any.
    pub fn terminator(&self) -> Option<RedToken> {
        token(&self.0, 1)
    }
}

impl EmptyStatement {
    pub fn terminator(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }
}

impl FunctionDeclaration {
    pub fn function_keyword(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }

    pub fn output_description(&self) -> Option<FunctionOutputDescription> {
        child(&self.0, 1)
    }

    pub fn name(&self) -> Option<CompoundName> {
        child(&self.0, 2)
    }

    pub fn input_description(&self) -> Option<FunctionInputDescription> {
        child(&self.0, 3)
    }

    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 4)
    }

    pub fn end_keyword(&self) -> Option<RedToken> {
        token(&self.0, 5)
    }
}

impl MethodDefinition {
    pub fn output_description(&self) -> Option<FunctionOutputDescription> {
        child(&self.0, 1)
    }

    pub fn name(&self) -> Option<CompoundName> {
        child(&self.0, 2)
    }

    pub fn input_description(&self) -> Option<FunctionInputDescription> {
        child(&self.0, 3)
    }

    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 4)
    }

    pub fn end_keyword(&self) -> Option<RedToken> {
        token(&self.0, 5)
    }
}

impl AbstractMethodDeclaration {
    pub fn output_description(&self) -> Option<FunctionOutputDescription> {
        child(&self.0, 0)
    }

    pub fn name(&self) -> Option<CompoundName> {
        child(&self.0, 1)
    }

    pub fn input_description(&self) -> Option<FunctionInputDescription> {
        child(&self.0, 2)
    }
}

impl FunctionOutputDescription {
    /// Output names; `~` placeholders are included.
    pub fn outputs(&self) -> impl Iterator<Item = RedToken> {
        list::<Expression>(&self.0, 1)
            .tokens()
            .filter(|token| matches!(token.kind(), SyntaxKind::IDENTIFIER | SyntaxKind::TILDE))
    }

    pub fn equals(&self) -> Option<RedToken> {
        token(&self.0, 3)
    }
}

impl FunctionInputDescription {
    pub fn parameters(&self) -> impl Iterator<Item = RedToken> {
        list::<Expression>(&self.0, 1)
            .tokens()
            .filter(|token| matches!(token.kind(), SyntaxKind::IDENTIFIER | SyntaxKind::TILDE))
    }
}

impl CompoundName {
    /// The dotted name with trivia removed, e.g. `pkg.sub.fn`.
    pub fn text(&self) -> String {
        self.0.tokens().map(|token| token.text().to_owned()).collect()
    }

    pub fn segments(&self) -> impl Iterator<Item = RedToken> {
        self.0.tokens().filter(|token| token.kind() == SyntaxKind::IDENTIFIER)
    }
}

impl ClassDeclaration {
    pub fn attributes(&self) -> Option<AttributeList> {
        child(&self.0, 1)
    }

    pub fn name(&self) -> Option<RedToken> {
        token(&self.0, 2)
    }

    pub fn base_classes(&self) -> Option<BaseClassList> {
        child(&self.0, 3)
    }

    pub fn members(&self) -> AstList<ClassMember> {
        list(&self.0, 4)
    }

    pub fn end_keyword(&self) -> Option<RedToken> {
        token(&self.0, 5)
    }
}

impl AttributeList {
    pub fn attributes(&self) -> AstList<Attribute> {
        list(&self.0, 1)
    }
}

impl Attribute {
    pub fn is_negated(&self) -> bool {
        token(&self.0, 0).is_some()
    }

    pub fn name(&self) -> Option<RedToken> {
        token(&self.0, 1)
    }

    pub fn value(&self) -> Option<Expression> {
        child::<AttributeAssignment>(&self.0, 2)?.value()
    }
}

impl AttributeAssignment {
    pub fn value(&self) -> Option<Expression> {
        child(&self.0, 1)
    }
}

impl BaseClassList {
    pub fn base_classes(&self) -> AstList<CompoundName> {
        list(&self.0, 1)
    }
}

impl PropertiesList {
    pub fn attributes(&self) -> Option<AttributeList> {
        child(&self.0, 1)
    }

    pub fn properties(&self) -> AstList<Statement> {
        list(&self.0, 2)
    }
}

impl MethodsList {
    pub fn attributes(&self) -> Option<AttributeList> {
        child(&self.0, 1)
    }

    pub fn methods(&self) -> AstList<Method> {
        list(&self.0, 2)
    }
}

impl EventsList {
    pub fn attributes(&self) -> Option<AttributeList> {
        child(&self.0, 1)
    }

    pub fn events(&self) -> impl Iterator<Item = RedToken> {
        list::<Expression>(&self.0, 2)
            .tokens()
            .filter(|token| token.kind() == SyntaxKind::IDENTIFIER)
    }
}

impl EnumerationList {
    pub fn attributes(&self) -> Option<AttributeList> {
        child(&self.0, 1)
    }

    pub fn items(&self) -> AstList<EnumerationItem> {
        list(&self.0, 2)
    }
}

impl EnumerationItem {
    pub fn name(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }

    pub fn arguments(&self) -> AstList<Expression> {
        match child::<EnumerationItemValue>(&self.0, 1) {
            Some(value) => list(&value.0, 1),
            None => AstList::new(None),
        }
    }
}

impl SwitchStatement {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0, 1)
    }

    pub fn cases(&self) -> AstList<SwitchCase> {
        list(&self.0, 3)
    }
}

impl SwitchCase {
    /// `case` or `otherwise`.
    pub fn keyword(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }

    /// `None` for the `otherwise` branch.
    pub fn label(&self) -> Option<Expression> {
        child(&self.0, 1)
    }

    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 3)
    }
}

impl WhileLoopStatement {
    pub fn condition(&self) -> Option<Expression> {
        child(&self.0, 1)
    }

    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 3)
    }
}

impl IfStatement {
    pub fn condition(&self) -> Option<Expression> {
        child(&self.0, 1)
    }

    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 3)
    }

    pub fn elseif_clauses(&self) -> AstList<ElseifClause> {
        list(&self.0, 4)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        child(&self.0, 5)
    }
}

impl ElseifClause {
    pub fn condition(&self) -> Option<Expression> {
        child(&self.0, 1)
    }

    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 3)
    }
}

impl ElseClause {
    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 1)
    }
}

impl ForLoopStatement {
    /// `for` or `parfor`.
    pub fn keyword(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }

    /// Usually an assignment of the loop variable.
    pub fn loop_expression(&self) -> Option<Expression> {
        child(&self.0, 1)
    }

    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 3)
    }
}

impl TryCatchStatement {
    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 2)
    }

    pub fn catch_clause(&self) -> Option<CatchClause> {
        child(&self.0, 3)
    }
}

impl CatchClause {
    pub fn identifier(&self) -> Option<RedToken> {
        token(&self.0, 1)
    }

    pub fn body(&self) -> AstList<Statement> {
        list(&self.0, 3)
    }
}

impl AssignmentExpression {
    pub fn lhs(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    pub fn rhs(&self) -> Option<Expression> {
        child(&self.0, 2)
    }
}

impl BinaryOperationExpression {
    pub fn lhs(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    pub fn operation(&self) -> Option<RedToken> {
        token(&self.0, 1)
    }

    pub fn rhs(&self) -> Option<Expression> {
        child(&self.0, 2)
    }
}

impl UnaryPrefixOperationExpression {
    pub fn operation(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }

    pub fn operand(&self) -> Option<Expression> {
        child(&self.0, 1)
    }
}

impl UnaryPostfixOperationExpression {
    pub fn operand(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    pub fn operation(&self) -> Option<RedToken> {
        token(&self.0, 1)
    }
}

impl IdentifierNameExpression {
    pub fn name(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }
}

impl NumberLiteralExpression {
    pub fn number(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }
}

impl StringLiteralExpression {
    pub fn string(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }
}

impl DoubleQuotedStringLiteralExpression {
    pub fn string(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }
}

impl UnquotedStringLiteralExpression {
    pub fn string(&self) -> Option<RedToken> {
        token(&self.0, 0)
    }
}

impl ArrayLiteralExpression {
    pub fn elements(&self) -> AstList<Expression> {
        list(&self.0, 1)
    }
}

impl CellArrayLiteralExpression {
    pub fn elements(&self) -> AstList<Expression> {
        list(&self.0, 1)
    }
}

impl ParenthesizedExpression {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0, 1)
    }
}

impl CellArrayElementAccessExpression {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    pub fn indices(&self) -> AstList<Expression> {
        list(&self.0, 2)
    }
}

impl FunctionCallExpression {
    pub fn function(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    pub fn arguments(&self) -> AstList<Expression> {
        list(&self.0, 2)
    }
}

impl MemberAccessExpression {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    pub fn member(&self) -> Option<RedToken> {
        token(&self.0, 2)
    }
}

impl IndirectMemberAccessExpression {
    pub fn expression(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    pub fn member(&self) -> Option<Expression> {
        child(&self.0, 3)
    }
}

impl CommandExpression {
    pub fn command(&self) -> Option<IdentifierNameExpression> {
        child(&self.0, 0)
    }

    pub fn arguments(&self) -> impl Iterator<Item = RedToken> {
        list::<Expression>(&self.0, 1).tokens()
    }
}

impl BaseClassInvokationExpression {
    pub fn method(&self) -> Option<Expression> {
        child(&self.0, 0)
    }

    pub fn base_class(&self) -> Option<Expression> {
        child(&self.0, 2)
    }
}

impl NamedFunctionHandleExpression {
    pub fn name(&self) -> Option<CompoundName> {
        child(&self.0, 1)
    }
}

impl LambdaExpression {
    pub fn input_description(&self) -> Option<FunctionInputDescription> {
        child(&self.0, 1)
    }

    pub fn body(&self) -> Option<Expression> {
        child(&self.0, 2)
    }
}
