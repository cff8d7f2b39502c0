//! Mustache-style template engine
//!
//! Supports exactly three constructs:
//! - `{{key}}` - replaced by the value of `key` in the context
//! - `{{#key}}...{{/key}}` - repeated once per element of the list `key`
//! - `{{.}}` - the current element inside a repeated block
//!
//! Templates go through a Lexer + Parser + Evaluator pipeline. Anything the
//! lexer cannot classify, and any placeholder whose key is not in the context,
//! is emitted literally.

use indexmap::IndexMap;

// ============================================================================
// Lexer - Token Types
// ============================================================================

/// Token types produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Raw text content
    Text(String),
    /// Placeholder: {{key}}
    Variable(String),
    /// Current list element: {{.}}
    Dot,
    /// Opening of a repeated block: {{#key}}
    SectionStart(String),
    /// Closing of a repeated block: {{/key}}
    SectionEnd(String),
}

/// Lexer for templates - uses character-based iteration to handle Unicode
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Tokenize the entire input. Never fails: malformed tags become text.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut text = String::new();

        while self.pos < self.chars.len() {
            if self.starts_with("{{") {
                if let Some(token) = self.read_tag() {
                    if !text.is_empty() {
                        tokens.push(Token::Text(std::mem::take(&mut text)));
                    }
                    tokens.push(token);
                    continue;
                }
            }
            // Not a tag: consume a single char so `{{{{key}}` still finds the tag
            text.push(self.chars[self.pos]);
            self.pos += 1;
        }

        if !text.is_empty() {
            tokens.push(Token::Text(text));
        }

        tokens
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut i = self.pos;
        for c in s.chars() {
            if i >= self.chars.len() || self.chars[i] != c {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Try to read a tag at the current position. On success the position is
    /// advanced past the closing `}}`; otherwise it is left untouched.
    fn read_tag(&mut self) -> Option<Token> {
        let start = self.pos + 2;
        let mut end = start;
        while end + 1 < self.chars.len() {
            if self.chars[end] == '}' && self.chars[end + 1] == '}' {
                break;
            }
            end += 1;
        }
        if end + 1 >= self.chars.len() {
            return None;
        }

        let inner: String = self.chars[start..end].iter().collect();
        let token = classify_tag(&inner)?;
        self.pos = end + 2;
        Some(token)
    }
}

fn classify_tag(inner: &str) -> Option<Token> {
    if inner.is_empty() || inner.contains('{') || inner.contains('}') {
        return None;
    }
    if inner == "." {
        return Some(Token::Dot);
    }
    if let Some(name) = inner.strip_prefix('#') {
        if is_section_name(name) {
            return Some(Token::SectionStart(name.to_string()));
        }
    }
    if let Some(name) = inner.strip_prefix('/') {
        if is_section_name(name) {
            return Some(Token::SectionEnd(name.to_string()));
        }
    }
    Some(Token::Variable(inner.to_string()))
}

fn is_section_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// AST
// ============================================================================

/// AST node types
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Variable(String),
    Dot,
    Section { name: String, body: Vec<Node> },
}

// ============================================================================
// Parser - Tokens to AST
// ============================================================================

/// Builds the AST. A section closes at the nearest matching `{{/name}}`, so a
/// same-named section nested inside it is never recognised.
pub struct Parser;

impl Parser {
    pub fn parse(tokens: &[Token]) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i] {
                Token::Text(text) => push_text(&mut nodes, text),
                Token::Variable(name) => nodes.push(Node::Variable(name.clone())),
                Token::Dot => nodes.push(Node::Dot),
                Token::SectionStart(name) => {
                    let close = tokens[i + 1..]
                        .iter()
                        .position(|t| matches!(t, Token::SectionEnd(n) if n == name));
                    match close {
                        Some(offset) => {
                            let end = i + 1 + offset;
                            nodes.push(Node::Section {
                                name: name.clone(),
                                body: Self::parse(&tokens[i + 1..end]),
                            });
                            i = end;
                        }
                        None => push_text(&mut nodes, &format!("{{{{#{}}}}}", name)),
                    }
                }
                Token::SectionEnd(name) => push_text(&mut nodes, &format!("{{{{/{}}}}}", name)),
            }
            i += 1;
        }

        nodes
    }
}

/// Append text, merging with a preceding text node
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(prev)) = nodes.last_mut() {
        prev.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

// ============================================================================
// Values and Context
// ============================================================================

/// A value in the template context
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
}

impl Value {
    /// Convert to string for output
    pub fn to_output_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => {
                if n.fract() == 0.0 {
                    (*n as i64).to_string()
                } else {
                    n.to_string()
                }
            }
            Value::String(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(|v| v.to_output_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Check if the value is truthy. Lists are truthy even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) => true,
        }
    }

    /// String form used for `{{key}}`: falsy values render empty
    fn to_substitution(&self) -> String {
        if self.is_truthy() {
            self.to_output_string()
        } else {
            String::new()
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Named values a template is rendered against. Keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct Context {
    variables: IndexMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.variables.insert(name.to_string(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

// ============================================================================
// Evaluator - AST to output
// ============================================================================

struct Evaluator<'a> {
    context: &'a Context,
}

impl<'a> Evaluator<'a> {
    fn render(&self, nodes: &[Node], item: Option<&Value>, output: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Variable(name) => match self.context.get(name) {
                    Some(value) => output.push_str(&value.to_substitution()),
                    None => {
                        output.push_str("{{");
                        output.push_str(name);
                        output.push_str("}}");
                    }
                },
                Node::Dot => match item {
                    Some(value) => output.push_str(&value.to_output_string()),
                    None => output.push_str("{{.}}"),
                },
                Node::Section { name, body } => {
                    if let Some(Value::List(items)) = self.context.get(name) {
                        for element in items {
                            self.render(body, Some(element), output);
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// A parsed template, reusable across renders
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source
    pub fn parse(source: &str) -> Self {
        let tokens = Lexer::new(source).tokenize();
        Self {
            nodes: Parser::parse(&tokens),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Render against a context
    pub fn render(&self, context: &Context) -> String {
        let mut output = String::new();
        Evaluator { context }.render(&self.nodes, None, &mut output);
        output
    }
}

/// Parse and render in one step
pub fn render(source: &str, context: &Context) -> String {
    Template::parse(source).render(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_simple() {
        let tokens = Lexer::new("Hello {{name}}!").tokenize();
        assert_eq!(
            tokens,
            vec![
                Token::Text("Hello ".to_string()),
                Token::Variable("name".to_string()),
                Token::Text("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_lexer_section_tokens() {
        let tokens = Lexer::new("{{#tags}}<b>{{.}}</b>{{/tags}}").tokenize();
        assert_eq!(
            tokens,
            vec![
                Token::SectionStart("tags".to_string()),
                Token::Text("<b>".to_string()),
                Token::Dot,
                Token::Text("</b>".to_string()),
                Token::SectionEnd("tags".to_string()),
            ]
        );
    }

    #[test]
    fn test_lexer_unclosed_tag_is_text() {
        let tokens = Lexer::new("a {{b c").tokenize();
        assert_eq!(tokens, vec![Token::Text("a {{b c".to_string())]);
    }

    #[test]
    fn test_lexer_extra_braces() {
        let tokens = Lexer::new("{{{{title}}").tokenize();
        assert_eq!(
            tokens,
            vec![
                Token::Text("{{".to_string()),
                Token::Variable("title".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_simple_template() {
        let context = Context::new().with("name", "World");
        assert_eq!(render("Hello {{name}}!", &context), "Hello World!");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let context = Context::new().with("title", "Post");
        assert_eq!(
            render("<title>{{title}}</title><h1>{{title}}</h1>", &context),
            "<title>Post</title><h1>Post</h1>"
        );
    }

    #[test]
    fn test_unknown_placeholder_passes_through() {
        let context = Context::new().with("title", "Post");
        assert_eq!(
            render("{{title}} by {{author}}", &context),
            "Post by {{author}}"
        );
    }

    #[test]
    fn test_spaced_placeholder_is_literal() {
        let context = Context::new().with("title", "Post");
        assert_eq!(render("{{ title }}", &context), "{{ title }}");
    }

    #[test]
    fn test_falsy_values_render_empty() {
        let context = Context::new()
            .with("empty", "")
            .with("missing", Value::Null)
            .with("off", false)
            .with("zero", 0.0);
        assert_eq!(
            render("[{{empty}}][{{missing}}][{{off}}][{{zero}}]", &context),
            "[][][][]"
        );
    }

    #[test]
    fn test_list_placeholder_joins_with_comma() {
        let context = Context::new().with("tags", vec!["a", "b"]);
        assert_eq!(render("{{tags}}", &context), "a,b");
    }

    #[test]
    fn test_block_expansion() {
        let template = "{{#tags}}<span>{{.}}</span>{{/tags}}";
        let context = Context::new().with("tags", vec!["a", "b"]);
        assert_eq!(render(template, &context), "<span>a</span><span>b</span>");
    }

    #[test]
    fn test_block_with_empty_or_missing_list() {
        let template = "{{#tags}}<span>{{.}}</span>{{/tags}}";
        let empty = Context::new().with("tags", Vec::<String>::new());
        assert_eq!(render(template, &empty), "");
        assert_eq!(render(template, &Context::new()), "");
    }

    #[test]
    fn test_block_with_scalar_value_is_removed() {
        let template = "a{{#tags}}<span>{{.}}</span>{{/tags}}b";
        let context = Context::new().with("tags", "rust");
        assert_eq!(render(template, &context), "ab");
    }

    #[test]
    fn test_block_spans_lines() {
        let template = "<ul>\n{{#items}}\n  <li>{{.}}</li>\n{{/items}}\n</ul>";
        let context = Context::new().with("items", vec!["x", "y"]);
        assert_eq!(
            render(template, &context),
            "<ul>\n\n  <li>x</li>\n\n  <li>y</li>\n\n</ul>"
        );
    }

    #[test]
    fn test_block_body_sees_outer_keys() {
        let template = "{{#tags}}<a href=\"{{basePath}}/t/{{.}}\">{{.}}</a>{{/tags}}";
        let context = Context::new()
            .with("basePath", "/sub")
            .with("tags", vec!["x"]);
        assert_eq!(render(template, &context), "<a href=\"/sub/t/x\">x</a>");
    }

    #[test]
    fn test_blocks_are_non_greedy() {
        let template = "{{#a}}[{{.}}]{{/a}}-{{#a}}({{.}}){{/a}}";
        let context = Context::new().with("a", vec!["1", "2"]);
        assert_eq!(render(template, &context), "[1][2]-(1)(2)");
    }

    #[test]
    fn test_unmatched_block_tags_are_literal() {
        let context = Context::new().with("tags", vec!["a"]);
        assert_eq!(render("{{#tags}} open", &context), "{{#tags}} open");
        assert_eq!(render("close {{/tags}}", &context), "close {{/tags}}");
    }

    #[test]
    fn test_dot_outside_block_is_literal() {
        assert_eq!(render("{{.}}", &Context::new()), "{{.}}");
    }

    #[test]
    fn test_same_named_nested_block_closes_early() {
        let template = "{{#a}}x{{#a}}y{{/a}}z{{/a}}";
        let context = Context::new().with("a", vec!["1"]);
        // The outer block closes at the first {{/a}}; the inner opener has no
        // close inside that range and is kept as text.
        assert_eq!(render(template, &context), "x{{#a}}yz{{/a}}");
    }

    #[test]
    fn test_differently_named_nested_block() {
        let template = "{{#outer}}<{{.}}:{{#inner}}{{.}}{{/inner}}>{{/outer}}";
        let context = Context::new()
            .with("outer", vec!["o1", "o2"])
            .with("inner", vec!["i"]);
        assert_eq!(render(template, &context), "<o1:i><o2:i>");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let context = Context::new()
            .with("content", "{{title}}")
            .with("title", "T");
        assert_eq!(render("{{content}}", &context), "{{title}}");
    }

    #[test]
    fn test_render_is_idempotent() {
        let template = Template::parse("{{title}}: {{#tags}}#{{.}} {{/tags}}{{unknown}}");
        let context = Context::new()
            .with("title", "Hi")
            .with("tags", vec!["a", "b"]);
        let first = template.render(&context);
        let second = template.render(&context);
        assert_eq!(first, second);
        assert_eq!(first, "Hi: #a #b {{unknown}}");
    }

    #[test]
    fn test_parser_merges_literal_text() {
        let template = Template::parse("a{{/x}}b");
        assert_eq!(template.nodes(), &[Node::Text("a{{/x}}b".to_string())]);
    }

    #[test]
    fn test_unicode_text_preserved() {
        let context = Context::new().with("name", "世界");
        assert_eq!(render("你好 {{name}} →", &context), "你好 世界 →");
    }
}
