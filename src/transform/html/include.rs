//! Template include expansion
//!
//! Directives (shown with the default `@@` prefix):
//!
//! - `@@include('partials/nav.html')` inlines a file, resolved relative to
//!   the directory of the file containing the directive.
//! - `@@include('card.html', {"title": "Hello"})` inlines with extra context.
//! - `@@name` / `@@page.title` substitutes a context value; unknown names are
//!   left untouched.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{BuildError, BuildResult};
use crate::transform::files::read_text;

/// Nesting limit; exceeding it almost always means an include cycle.
pub const MAX_INCLUDE_DEPTH: usize = 32;

pub type Context = Map<String, Value>;

/// Expands include directives and context variables
#[derive(Debug, Clone)]
pub struct IncludeExpander {
    prefix: String,
}

impl IncludeExpander {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Expand `text`, which was read from `file`.
    pub fn expand(&self, text: &str, file: &Path, context: &Context) -> BuildResult<String> {
        self.expand_at_depth(text, file, context, 0)
    }

    fn expand_at_depth(
        &self,
        text: &str,
        file: &Path,
        context: &Context,
        depth: usize,
    ) -> BuildResult<String> {
        if depth > MAX_INCLUDE_DEPTH {
            return Err(BuildError::transform(
                file,
                format!("include depth exceeds {MAX_INCLUDE_DEPTH}; is there an include cycle?"),
            ));
        }

        if self.prefix.is_empty() {
            return Ok(text.to_string());
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        let mut consumed = 0usize;

        while let Some(pos) = rest.find(&self.prefix) {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + self.prefix.len()..];
            let offset = consumed + pos;

            if let Some(directive) = parse_include(after).transpose() {
                let directive = directive.map_err(|message| {
                    BuildError::transform(
                        file,
                        format!("line {}: {message}", line_of(text, offset)),
                    )
                })?;
                out.push_str(&self.include(&directive, file, context, depth)?);
                let used = self.prefix.len() + directive.len;
                consumed += pos + used;
                rest = &rest[pos + used..];
                continue;
            }

            let name = variable_name(after);
            match lookup(context, name) {
                Some(value) if !name.is_empty() => out.push_str(&render_value(value)),
                _ => {
                    out.push_str(&self.prefix);
                    out.push_str(name);
                }
            }
            let used = self.prefix.len() + name.len();
            consumed += pos + used;
            rest = &rest[pos + used..];
        }

        out.push_str(rest);
        Ok(out)
    }

    fn include(
        &self,
        directive: &IncludeDirective,
        file: &Path,
        context: &Context,
        depth: usize,
    ) -> BuildResult<String> {
        let base = file.parent().unwrap_or_else(|| Path::new(""));
        let target = base.join(&directive.path);

        if !target.is_file() {
            return Err(BuildError::transform(
                file,
                format!("cannot include '{}': file not found", directive.path),
            ));
        }
        let included = read_text(&target)?;

        let merged;
        let context = match &directive.context {
            Some(extra) => {
                let mut ctx = context.clone();
                for (k, v) in extra {
                    ctx.insert(k.clone(), v.clone());
                }
                merged = ctx;
                &merged
            }
            None => context,
        };

        self.expand_at_depth(&included, &target, context, depth + 1)
    }
}

#[derive(Debug)]
struct IncludeDirective {
    path: String,
    context: Option<Context>,
    /// Bytes consumed after the prefix
    len: usize,
}

/// Parse `include('path'[, {json}])` at the start of `input`.
///
/// `Ok(None)` means the text is not an include directive at all.
fn parse_include(input: &str) -> Result<Option<IncludeDirective>, String> {
    let Some(after_kw) = input.strip_prefix("include") else {
        return Ok(None);
    };
    let trimmed = after_kw.trim_start();
    let Some(args) = trimmed.strip_prefix('(') else {
        return Ok(None);
    };
    let mut pos = input.len() - args.len();

    let body = &input[pos..];
    let ws = body.len() - body.trim_start().len();
    pos += ws;

    let quote = input[pos..]
        .chars()
        .next()
        .filter(|c| *c == '\'' || *c == '"')
        .ok_or_else(|| "include path must be quoted".to_string())?;
    pos += 1;
    let close = input[pos..]
        .find(quote)
        .ok_or_else(|| "unterminated include path".to_string())?;
    let path = input[pos..pos + close].to_string();
    if path.trim().is_empty() {
        return Err("empty include path".to_string());
    }
    pos += close + 1;

    let skip_ws = |pos: usize| pos + (input[pos..].len() - input[pos..].trim_start().len());
    pos = skip_ws(pos);

    let mut context = None;
    if input[pos..].starts_with(',') {
        pos = skip_ws(pos + 1);
        let mut stream = serde_json::Deserializer::from_str(&input[pos..]).into_iter::<Value>();
        let value = match stream.next() {
            Some(Ok(value)) => value,
            Some(Err(e)) => return Err(format!("invalid include context: {e}")),
            None => return Err("missing include context".to_string()),
        };
        let Value::Object(map) = value else {
            return Err("include context must be a JSON object".to_string());
        };
        pos += stream.byte_offset();
        context = Some(map);
        pos = skip_ws(pos);
    }

    if !input[pos..].starts_with(')') {
        return Err("expected ')' to close include directive".to_string());
    }
    pos += 1;

    Ok(Some(IncludeDirective {
        path,
        context,
        len: pos,
    }))
}

/// Identifier following the prefix; a trailing `.` ends a sentence, not a path.
fn variable_name(input: &str) -> &str {
    let end = input
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    input[..end].trim_end_matches('.')
}

fn lookup<'a>(context: &'a Context, name: &str) -> Option<&'a Value> {
    let mut parts = name.split('.');
    let mut value = context.get(parts.next()?)?;
    for part in parts {
        value = value.as_object()?.get(part)?;
    }
    Some(value)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}
