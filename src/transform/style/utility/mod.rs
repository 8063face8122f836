//! Utility-class expansion
//!
//! Replaces `@tailwind base|components|utilities;` with generated CSS for the
//! classes found in content files, and `@apply a b c;` with the declarations
//! of the named utilities. Output order depends only on the set of classes,
//! never on where they were found, so expansion is deterministic.

mod palette;
mod rules;
mod scan;

pub use rules::{resolve, spacing, Decl, Utility};
pub use scan::{extract_candidates, scan_candidates};

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use crate::config::{ContainerConfig, UtilityConfig};
use crate::error::{BuildError, BuildResult};

/// Responsive breakpoints (`min-width`), smallest first
pub const BREAKPOINTS: [(&str, u32); 5] = [
    ("sm", 640),
    ("md", 768),
    ("lg", 1024),
    ("xl", 1280),
    ("2xl", 1536),
];

const PSEUDO_VARIANTS: [&str; 5] = ["hover", "focus", "focus-visible", "active", "disabled"];

const PREFLIGHT: &str = "\
*, ::before, ::after {
  box-sizing: border-box;
  border-width: 0;
  border-style: solid;
  border-color: #e5e7eb;
}
html {
  line-height: 1.5;
  -webkit-text-size-adjust: 100%;
  tab-size: 4;
  font-family: ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif;
}
body {
  margin: 0;
  line-height: inherit;
}
h1, h2, h3, h4, h5, h6 {
  font-size: inherit;
  font-weight: inherit;
}
a {
  color: inherit;
  text-decoration: inherit;
}
blockquote, dl, dd, h1, h2, h3, h4, h5, h6, hr, figure, p, pre {
  margin: 0;
}
ol, ul, menu {
  list-style: none;
  margin: 0;
  padding: 0;
}
img, svg, video, canvas {
  display: block;
  vertical-align: middle;
  max-width: 100%;
  height: auto;
}
button, input, select, textarea {
  font: inherit;
  color: inherit;
  margin: 0;
  padding: 0;
}
button, [role=\"button\"] {
  cursor: pointer;
}
";

/// A candidate class split into its variants and utility name
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate<'a> {
    class: &'a str,
    breakpoint: Option<usize>,
    pseudos: Vec<&'a str>,
    utility: &'a str,
}

fn parse_candidate(class: &str) -> Option<Candidate<'_>> {
    let mut parts: Vec<&str> = class.split(':').collect();
    let utility = parts.pop()?;
    if utility.is_empty() {
        return None;
    }

    let mut breakpoint = None;
    let mut pseudos = Vec::new();
    for variant in parts {
        if let Some(idx) = BREAKPOINTS.iter().position(|(name, _)| *name == variant) {
            if breakpoint.replace(idx).is_some() {
                return None;
            }
        } else if PSEUDO_VARIANTS.contains(&variant) && !pseudos.contains(&variant) {
            pseudos.push(variant);
        } else {
            return None;
        }
    }

    Some(Candidate {
        class,
        breakpoint,
        pseudos,
        utility,
    })
}

/// Escape a class name for use in a selector.
pub fn escape_class(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 4);
    for (i, c) in class.chars().enumerate() {
        if i == 0 && c.is_ascii_digit() {
            let _ = write!(out, "\\3{c} ");
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

fn write_rule(out: &mut String, indent: &str, selector: &str, decls: &[Decl]) {
    let _ = writeln!(out, "{indent}{selector} {{");
    for d in decls {
        let _ = writeln!(out, "{indent}  {}: {};", d.property, d.value);
    }
    let _ = writeln!(out, "{indent}}}");
}

/// Generates utility CSS and expands directives in a stylesheet
#[derive(Debug, Clone)]
pub struct UtilityEngine {
    container: ContainerConfig,
}

impl UtilityEngine {
    pub fn new(config: &UtilityConfig) -> Self {
        Self {
            container: config.container.clone(),
        }
    }

    /// Expand `@tailwind` and `@apply` directives in `css` (read from `file`).
    pub fn expand(
        &self,
        css: &str,
        candidates: &BTreeSet<String>,
        file: &Path,
    ) -> BuildResult<String> {
        let mut out = String::with_capacity(css.len());
        let mut pos = 0;

        while pos < css.len() {
            let rest = &css[pos..];

            if rest.starts_with("/*") {
                let end = rest.find("*/").map(|i| i + 2).unwrap_or(rest.len());
                out.push_str(&rest[..end]);
                pos += end;
                continue;
            }

            if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
                let end = string_end(rest, quote);
                out.push_str(&rest[..end]);
                pos += end;
                continue;
            }

            if let Some(args) = directive_args(rest, "@tailwind") {
                let (layer, used) = args;
                let generated = match layer.trim() {
                    "base" => PREFLIGHT.to_string(),
                    "components" => self.components(candidates),
                    "utilities" => self.utilities(candidates),
                    other => {
                        return Err(self.error(
                            file,
                            css,
                            pos,
                            format!("unknown @tailwind layer '{other}'"),
                        ))
                    }
                };
                out.push_str(&generated);
                pos += used;
                continue;
            }

            if let Some((classes, used)) = directive_args(rest, "@apply") {
                let decls = self
                    .apply(classes)
                    .map_err(|message| self.error(file, css, pos, message))?;
                out.push_str(&decls);
                pos += used;
                continue;
            }

            let ch_len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
            out.push_str(&rest[..ch_len]);
            pos += ch_len;
        }

        Ok(out)
    }

    fn error(&self, file: &Path, css: &str, offset: usize, message: String) -> BuildError {
        let line = css[..offset].matches('\n').count() + 1;
        BuildError::transform(file, format!("line {line}: {message}"))
    }

    fn apply(&self, classes: &str) -> Result<String, String> {
        let mut decls = Vec::new();
        for class in classes.split_whitespace() {
            if class.contains(':') {
                return Err(format!("variants are not supported in @apply: '{class}'"));
            }
            let utility =
                resolve(class).ok_or_else(|| format!("unknown utility class '{class}' in @apply"))?;
            decls.extend(utility.decls);
        }
        if decls.is_empty() {
            return Err("@apply needs at least one class".to_string());
        }

        Ok(decls
            .iter()
            .map(|d| format!("{}: {};", d.property, d.value))
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// `container` component, only when a content file uses it
    fn components(&self, candidates: &BTreeSet<String>) -> String {
        let mut out = String::new();
        if !candidates.contains("container") {
            return out;
        }

        let mut decls = vec![Decl {
            property: "width",
            value: "100%".to_string(),
        }];
        if self.container.center {
            for property in ["margin-right", "margin-left"] {
                decls.push(Decl {
                    property,
                    value: "auto".to_string(),
                });
            }
        }
        if let Some(padding) = &self.container.padding {
            for property in ["padding-right", "padding-left"] {
                decls.push(Decl {
                    property,
                    value: padding.clone(),
                });
            }
        }
        write_rule(&mut out, "", ".container", &decls);

        for (_, width) in BREAKPOINTS {
            let _ = writeln!(out, "@media (min-width: {width}px) {{");
            write_rule(
                &mut out,
                "  ",
                ".container",
                &[Decl {
                    property: "max-width",
                    value: format!("{width}px"),
                }],
            );
            out.push_str("}\n");
        }
        out
    }

    /// Rules for every candidate that resolves to a utility
    fn utilities(&self, candidates: &BTreeSet<String>) -> String {
        let mut resolved: Vec<(Candidate<'_>, Utility)> = candidates
            .iter()
            .filter_map(|class| parse_candidate(class))
            .filter_map(|c| resolve(c.utility).map(|u| (c, u)))
            .collect();

        resolved.sort_by(|(a, ua), (b, ub)| {
            (a.breakpoint, ua.order, a.pseudos.len(), a.class).cmp(&(
                b.breakpoint,
                ub.order,
                b.pseudos.len(),
                b.class,
            ))
        });

        let mut out = String::new();
        let mut open_media: Option<usize> = None;
        for (candidate, utility) in &resolved {
            if candidate.breakpoint != open_media {
                if open_media.is_some() {
                    out.push_str("}\n");
                }
                if let Some(idx) = candidate.breakpoint {
                    let _ = writeln!(out, "@media (min-width: {}px) {{", BREAKPOINTS[idx].1);
                }
                open_media = candidate.breakpoint;
            }

            let mut selector = format!(".{}", escape_class(candidate.class));
            for pseudo in &candidate.pseudos {
                selector.push(':');
                selector.push_str(pseudo);
            }
            let indent = if open_media.is_some() { "  " } else { "" };
            write_rule(&mut out, indent, &selector, &utility.decls);
        }
        if open_media.is_some() {
            out.push_str("}\n");
        }
        out
    }
}

/// Byte length of the quoted string at the start of `text`
fn string_end(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        match c {
            '\\' if !escaped => escaped = true,
            c if c == quote && !escaped => return i + 1,
            _ => escaped = false,
        }
    }
    text.len()
}

/// For `@name args;` at the start of `text`, the args and the bytes consumed
/// (including the `;`). A directive closed by `}` leaves the brace in place.
fn directive_args<'a>(text: &'a str, name: &str) -> Option<(&'a str, usize)> {
    let after = text.strip_prefix(name)?;
    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    let end = after.find([';', '}']).unwrap_or(after.len());
    let consumed = name.len() + end + usize::from(after[end..].starts_with(';'));
    Some((&after[..end], consumed))
}
