//! Chat prompt templates and the values that fill them.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{PromptError, PromptResult};
use crate::message::{ChatPrompt, Message, Role};

/// One entry of a [`ChatPromptTemplate`], before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTemplate {
    /// A single message whose content may reference `{variables}`.
    Text { role: Role, template: String },
    /// Expands to the message list bound to `variable`.
    Placeholder { variable: String, optional: bool },
}

impl MessageTemplate {
    pub fn system(template: impl Into<String>) -> Self {
        Self::Text {
            role: Role::System,
            template: template.into(),
        }
    }

    pub fn human(template: impl Into<String>) -> Self {
        Self::Text {
            role: Role::Human,
            template: template.into(),
        }
    }

    pub fn ai(template: impl Into<String>) -> Self {
        Self::Text {
            role: Role::Ai,
            template: template.into(),
        }
    }

    pub fn placeholder(variable: impl Into<String>) -> Self {
        Self::Placeholder {
            variable: variable.into(),
            optional: false,
        }
    }

    /// A placeholder that expands to nothing when its variable is unbound.
    pub fn optional_placeholder(variable: impl Into<String>) -> Self {
        Self::Placeholder {
            variable: variable.into(),
            optional: true,
        }
    }
}

/// A value bound to a template variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptValue {
    Text(String),
    Messages(Vec<Message>),
}

impl From<&str> for PromptValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for PromptValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Message>> for PromptValue {
    fn from(messages: Vec<Message>) -> Self {
        Self::Messages(messages)
    }
}

/// Variable bindings passed to [`ChatPromptTemplate::invoke`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptValues {
    values: BTreeMap<String, PromptValue>,
}

impl PromptValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, PromptValue::Text(value.into()));
        self
    }

    pub fn messages(mut self, name: impl Into<String>, messages: Vec<Message>) -> Self {
        self.insert(name, PromptValue::Messages(messages));
        self
    }

    /// Binds `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PromptValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PromptValue> {
        self.values.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text { role: Role, segments: Vec<Segment> },
    Placeholder { variable: String, optional: bool },
}

/// An ordered, compiled list of message templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPromptTemplate {
    parts: Vec<Part>,
}

impl ChatPromptTemplate {
    /// Compiles every text template.
    ///
    /// # Errors
    ///
    /// [`PromptError::UnclosedBrace`] if a template has an unescaped lone
    /// brace or an empty `{}`.
    pub fn new(messages: Vec<MessageTemplate>) -> PromptResult<Self> {
        let parts = messages
            .into_iter()
            .map(|m| match m {
                MessageTemplate::Text { role, template } => Ok(Part::Text {
                    role,
                    segments: parse(&template)?,
                }),
                MessageTemplate::Placeholder { variable, optional } => {
                    Ok(Part::Placeholder { variable, optional })
                }
            })
            .collect::<PromptResult<Vec<_>>>()?;
        Ok(Self { parts })
    }

    /// Variables the template references, placeholders included, in
    /// first-use order without duplicates.
    pub fn input_variables(&self) -> Vec<&str> {
        let names = self.parts.iter().flat_map(|part| match part {
            Part::Text { segments, .. } => segments
                .iter()
                .filter_map(|segment| match segment {
                    Segment::Variable(name) => Some(name.as_str()),
                    Segment::Literal(_) => None,
                })
                .collect::<Vec<_>>(),
            Part::Placeholder { variable, .. } => vec![variable.as_str()],
        });
        let mut seen: Vec<&str> = Vec::new();
        for name in names {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }

    /// Renders the template. Unused bindings are ignored.
    ///
    /// # Errors
    ///
    /// [`PromptError::MissingVariable`] for an unbound variable or required
    /// placeholder, [`PromptError::WrongVariableKind`] when a text variable is
    /// bound to messages or a placeholder to text.
    pub fn invoke(&self, values: &PromptValues) -> PromptResult<ChatPrompt> {
        let mut messages = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            match part {
                Part::Text { role, segments } => {
                    messages.push(Message::new(*role, render(segments, values)?));
                }
                Part::Placeholder { variable, optional } => match values.get(variable) {
                    Some(PromptValue::Messages(history)) => messages.extend(history.iter().cloned()),
                    Some(PromptValue::Text(_)) => {
                        return Err(PromptError::WrongVariableKind {
                            name: variable.clone(),
                            expected: "a message list",
                        });
                    }
                    None if *optional => {}
                    None => return Err(PromptError::MissingVariable(variable.clone())),
                },
            }
        }
        debug!(messages = messages.len(), "rendered chat prompt");
        Ok(ChatPrompt::new(messages))
    }
}

fn render(segments: &[Segment], values: &PromptValues) -> PromptResult<String> {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Variable(name) => match values.get(name) {
                Some(PromptValue::Text(text)) => out.push_str(text),
                Some(PromptValue::Messages(_)) => {
                    return Err(PromptError::WrongVariableKind {
                        name: name.clone(),
                        expected: "text",
                    });
                }
                None => return Err(PromptError::MissingVariable(name.clone())),
            },
        }
    }
    Ok(out)
}

fn parse(template: &str) -> PromptResult<Vec<Segment>> {
    let unbalanced = |position| PromptError::UnclosedBrace {
        template: template.to_owned(),
        position,
    };
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();
    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => return Err(unbalanced(pos)),
                        Some((_, c)) => name.push(c),
                    }
                }
                let name = name.trim();
                if name.is_empty() {
                    return Err(unbalanced(pos));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name.to_owned()));
            }
            '}' => return Err(unbalanced(pos)),
            c => literal.push(c),
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
