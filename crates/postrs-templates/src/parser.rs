use regex::Regex;
use std::sync::LazyLock;

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("valid variable pattern"));

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Raw(String),
    /// `{{name}}`, keeping the full source text for when the variable is unknown.
    Var { name: String, source: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens {
    pub tokens: Vec<Token>,
}

impl Tokens {
    pub fn has_variables(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Var { .. }))
    }
}

pub fn parse(template: &str) -> Tokens {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in VARIABLE_RE.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            tokens.push(Token::Raw(template[last..whole.start()].to_string()));
        }
        tokens.push(Token::Var {
            name: name.as_str().to_string(),
            source: whole.as_str().to_string(),
        });
        last = whole.end();
    }

    if last < template.len() {
        tokens.push(Token::Raw(template[last..].to_string()));
    }

    Tokens { tokens }
}
