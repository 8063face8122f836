//! Line-preserving JavaScript minifier
//!
//! Removes comments, blank lines and surrounding indentation, and nothing
//! else. Every output line comes from exactly one input line, which keeps the
//! development source map trivial. Lines that begin or end inside a string or
//! template literal are kept byte-for-byte on the literal side.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Str(char),
    Template,
    Regex { in_class: bool },
    BlockComment,
    LineComment,
}

#[derive(Debug, Default)]
struct Line {
    text: String,
    starts_in_literal: bool,
    ends_in_literal: bool,
}

/// Minified code plus, per output line, the 0-based input line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LooseOutput {
    pub code: String,
    pub origins: Vec<usize>,
}

const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case",
    "do", "else", "yield", "await",
];

/// Statements whose `(...)` header may be followed directly by a regex
const HEADER_KEYWORDS: &[&str] = &["if", "while", "for", "with"];

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Can a `/` at this point start a regular expression literal?
fn regex_allowed(prev: Option<char>, word: &str, word_is_prev: bool) -> bool {
    match prev {
        None => true,
        Some(c) if is_ident(c) => word_is_prev && REGEX_KEYWORDS.contains(&word),
        Some(c) => "(,=:[!&|?{};+-*%<>~^".contains(c),
    }
}

pub fn minify_loose(source: &str) -> LooseOutput {
    let mut lines = vec![Line::default()];
    let mut mode = Mode::Code;
    let mut escape = false;
    // Brace depth inside each open `${`
    let mut template_depths: Vec<usize> = Vec::new();
    let mut prev: Option<char> = None;
    let mut word = String::new();
    let mut last_raw_ident = false;
    // One entry per open `(`: does it start a statement header?
    let mut parens: Vec<bool> = Vec::new();
    let mut header_closed = false;

    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            mode = match mode {
                Mode::LineComment | Mode::Regex { .. } => Mode::Code,
                Mode::Str(_) if !escape => Mode::Code,
                other => other,
            };
            escape = false;
            last_raw_ident = false;

            let in_literal = matches!(mode, Mode::Str(_) | Mode::Template);
            if let Some(line) = lines.last_mut() {
                line.ends_in_literal = in_literal;
            }
            lines.push(Line {
                starts_in_literal: in_literal,
                ..Line::default()
            });
            continue;
        }

        let Some(line) = lines.last_mut() else { break };
        let out = &mut line.text;

        match mode {
            Mode::LineComment => {}
            Mode::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push(' ');
                    last_raw_ident = false;
                    mode = Mode::Code;
                }
            }
            Mode::Str(quote) => {
                out.push(c);
                if escape {
                    escape = false;
                } else if c == '\\' {
                    escape = true;
                } else if c == quote {
                    mode = Mode::Code;
                }
            }
            Mode::Template => {
                out.push(c);
                if escape {
                    escape = false;
                } else if c == '\\' {
                    escape = true;
                } else if c == '`' {
                    mode = Mode::Code;
                } else if c == '$' && chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    template_depths.push(0);
                    prev = Some('{');
                    mode = Mode::Code;
                }
            }
            Mode::Regex { in_class } => {
                out.push(c);
                if escape {
                    escape = false;
                } else if c == '\\' {
                    escape = true;
                } else if c == '[' {
                    mode = Mode::Regex { in_class: true };
                } else if c == ']' && in_class {
                    mode = Mode::Regex { in_class: false };
                } else if c == '/' && !in_class {
                    // A closed regex is an operand
                    prev = Some(')');
                    mode = Mode::Code;
                }
            }
            Mode::Code => {
                if c == '/' && chars.peek() == Some(&'/') {
                    chars.next();
                    mode = Mode::LineComment;
                    continue;
                }
                if c == '/' && chars.peek() == Some(&'*') {
                    chars.next();
                    mode = Mode::BlockComment;
                    continue;
                }

                out.push(c);
                if c.is_whitespace() {
                    last_raw_ident = false;
                    continue;
                }

                let word_is_prev = prev.is_some_and(is_ident);
                let after_header = std::mem::take(&mut header_closed);
                match c {
                    '/' if after_header || regex_allowed(prev, &word, word_is_prev) => {
                        mode = Mode::Regex { in_class: false };
                    }
                    '(' => parens.push(word_is_prev && HEADER_KEYWORDS.contains(&word.as_str())),
                    ')' => header_closed = parens.pop().unwrap_or(false),
                    '"' | '\'' => mode = Mode::Str(c),
                    '`' => mode = Mode::Template,
                    '{' => {
                        if let Some(depth) = template_depths.last_mut() {
                            *depth += 1;
                        }
                    }
                    '}' => match template_depths.last_mut() {
                        Some(0) => {
                            template_depths.pop();
                            mode = Mode::Template;
                        }
                        Some(depth) => *depth -= 1,
                        None => {}
                    },
                    _ => {}
                }

                if is_ident(c) {
                    if !last_raw_ident {
                        word.clear();
                    }
                    word.push(c);
                    last_raw_ident = true;
                } else {
                    word.clear();
                    last_raw_ident = false;
                }
                prev = Some(c);
            }
        }
    }

    let mut kept = Vec::new();
    let mut origins = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let mut text = line.text.as_str();
        if !line.starts_in_literal {
            text = text.trim_start();
        }
        if !line.ends_in_literal {
            text = text.trim_end();
        }
        if text.is_empty() && !line.starts_in_literal && !line.ends_in_literal {
            continue;
        }
        kept.push(text);
        origins.push(idx);
    }

    LooseOutput {
        code: kept.join("\n"),
        origins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(source: &str) -> String {
        minify_loose(source).code
    }

    #[test]
    fn strips_comments_blank_lines_and_indentation() {
        let source = "// header\n\nfunction a() {\n    /* block */\n    return 1; // trailing\n}\n";
        let out = minify_loose(source);
        assert_eq!(out.code, "function a() {\nreturn 1;\n}");
        assert_eq!(out.origins, vec![2, 4, 5]);
    }

    #[test]
    fn multi_line_block_comment_keeps_line_mapping() {
        let out = minify_loose("a();\n/*\n * docs\n */\nb();");
        assert_eq!(out.code, "a();\nb();");
        assert_eq!(out.origins, vec![0, 4]);
    }

    #[test]
    fn comment_markers_inside_strings_survive() {
        assert_eq!(code("var u = \"http://x\"; // c"), "var u = \"http://x\";");
        assert_eq!(code("var s = '/* no */';"), "var s = '/* no */';");
    }

    #[test]
    fn template_literal_lines_are_untouched() {
        let source = "var t = `\n    keep me\n\n  // and me\n`;\n  next();";
        assert_eq!(code(source), "var t = `\n    keep me\n\n  // and me\n`;\nnext();");
    }

    #[test]
    fn template_substitution_returns_to_code() {
        let source = "var t = `${ {a: 1}.a /* c */ }` + x; // done";
        assert_eq!(code(source), "var t = `${ {a: 1}.a   }` + x;");
    }

    #[test]
    fn regex_literals_are_not_comments() {
        assert_eq!(code("var r = /\\/\\/x/g; // c"), "var r = /\\/\\/x/g;");
        assert_eq!(code("return /[/*]/.test(s);"), "return /[/*]/.test(s);");
        assert_eq!(
            code("var u = 'a//b';\nif (u) /\\/\\//.test(u) && log('hit');\n"),
            "var u = 'a//b';\nif (u) /\\/\\//.test(u) && log('hit');"
        );
        assert_eq!(
            code("while (f(x)) /a\\/\\/b/.exec(s); // tail"),
            "while (f(x)) /a\\/\\/b/.exec(s);"
        );
    }

    #[test]
    fn call_result_division_stays_division() {
        assert_eq!(code("var r = f(x) / g(y); // q"), "var r = f(x) / g(y);");
        assert_eq!(code("if (a) b = (c) / d; // q"), "if (a) b = (c) / d;");
    }

    #[test]
    fn division_is_not_a_regex() {
        assert_eq!(code("var x = a / b; // half"), "var x = a / b;");
        assert_eq!(code("var y = (a) / 2 / c;"), "var y = (a) / 2 / c;");
    }

    #[test]
    fn idempotent_on_typical_source() {
        let source = "/* a */\nconst el = document.querySelector('.menu');\n\nel.addEventListener('click', () => {\n  el.classList.toggle(\"open\"); // toggle\n});\n";
        let once = code(source);
        assert_eq!(code(&once), once);
    }

    #[test]
    fn empty_input() {
        let out = minify_loose("");
        assert_eq!(out.code, "");
        assert!(out.origins.is_empty());
    }
}
