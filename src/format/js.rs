//! JavaScript module adapter.
//!
//! Handles modules of the form `export default { ... };` whose body is a
//! plain object literal: unquoted keys, single quotes, comments and trailing
//! commas are all accepted (JSON5). Template literals without `${}`
//! interpolation are rewritten into ordinary strings before parsing.
//! Anything needing evaluation (interpolation, function calls, spreads) is
//! a parse error.

use regex_lite::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::OnceLock;

use super::Loader;
use crate::error::MergeError;

/// Loads `*.js` files exporting an object literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsModuleLoader;

impl Loader for JsModuleLoader {
    fn parse(&self, text: &str, path: &Path) -> Result<Value, MergeError> {
        let body = strip_module_wrapper(text);
        let normalized = normalize_template_literals(body);

        json5::from_str(&normalized.text).map_err(|e| {
            if normalized.interpolated > 0 {
                MergeError::parse(
                    path,
                    format!("{} (template literals with interpolation are not supported)", e),
                )
            } else {
                MergeError::parse(path, e)
            }
        })
    }
}

fn export_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?is)^(?:\s+|//[^\n]*|/\*.*?\*/)*(?:export\s+default\b|module\.exports\s*=)\s*",
        )
        .expect("export pattern is valid")
    })
}

/// Drop the leading `export default` (after any comments) and the trailing
/// semicolon.
fn strip_module_wrapper(text: &str) -> &str {
    let rest = match export_re().find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let rest = rest.trim_end();
    rest.strip_suffix(';').map(str::trim_end).unwrap_or(rest)
}

/// Output of [`normalize_template_literals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    /// Template literals left as-is because they contain `${`.
    pub interpolated: usize,
}

/// Rewrite `` `text` `` as `"text"` when it holds no `${` interpolation.
///
/// Quoted strings and comments are copied untouched, so a backtick inside
/// `'...'` stays a backtick. Escape sequences are kept so the parser decodes
/// them as JavaScript would; raw line breaks and double quotes are escaped.
pub fn normalize_template_literals(src: &str) -> Normalized {
    let bytes = src.as_bytes();
    let mut text = String::with_capacity(src.len());
    let mut interpolated = 0;
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => i = closing_quote(bytes, i).unwrap_or(bytes.len()),
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = src[i..].find('\n').map_or(bytes.len(), |n| i + n);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = src[i + 2..].find("*/").map_or(bytes.len(), |n| i + 2 + n + 2);
            }
            b'`' => {
                let Some(end) = closing_quote(bytes, i) else {
                    break;
                };
                let body = &src[i + 1..end - 1];
                text.push_str(&src[copied..i]);
                if has_interpolation(body) {
                    interpolated += 1;
                    text.push_str(&src[i..end]);
                } else {
                    text.push_str(&quote_template_body(body));
                }
                copied = end;
                i = end;
            }
            _ => i += 1,
        }
    }
    text.push_str(&src[copied..]);

    Normalized { text, interpolated }
}

/// Index just past the quote closing the one at `start`, skipping escapes.
fn closing_quote(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

fn has_interpolation(body: &str) -> bool {
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '$' if chars.peek() == Some(&'{') => return true,
            _ => {}
        }
    }
    false
}

fn quote_template_body(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    out.push('"');
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                // Only meaningful inside template literals.
                Some(next @ ('`' | '$')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push_str("\\\\"),
            },
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> Result<Value, MergeError> {
        JsModuleLoader.parse(text, Path::new("en.js"))
    }

    #[test]
    fn test_export_default_object() {
        let value = parse(
            r#"// generated
export default {
  greet: 'Hi',
  "items": ["a", "b",],
  nested: { deep: "value" }, /* trailing */
};
"#,
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"greet": "Hi", "items": ["a", "b"], "nested": {"deep": "value"}})
        );
    }

    #[test]
    fn test_module_exports_and_case() {
        let value = parse("module.exports = { a: 'b' }").unwrap();
        assert_eq!(value, json!({"a": "b"}));

        let value = parse("EXPORT DEFAULT {a: 'b'};").unwrap();
        assert_eq!(value, json!({"a": "b"}));
    }

    #[test]
    fn test_template_literal_becomes_string() {
        let value = parse(
            "export default {\n  multi: `line one\nline \"two\"`,\n  ru: `Привет`,\n};",
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"multi": "line one\nline \"two\"", "ru": "Привет"})
        );
    }

    #[test]
    fn test_template_escapes_decode_like_js() {
        let value = parse(r"export default { a: `tab\there`, b: `tick \` and \${x}` }").unwrap();
        assert_eq!(value, json!({"a": "tab\there", "b": "tick ` and ${x}"}));
    }

    #[test]
    fn test_interpolation_is_rejected() {
        let err = parse("export default { a: `Hello ${name}` }").unwrap_err();
        assert!(matches!(err, MergeError::Parse { .. }));
        assert!(err.to_string().contains("interpolation"));
        assert!(err.to_string().starts_with("en.js: "));
    }

    #[test]
    fn test_normalize_leaves_interpolated_literals() {
        let normalized = normalize_template_literals("`a${b}`");
        assert_eq!(normalized.text, "`a${b}`");
        assert_eq!(normalized.interpolated, 1);

        let normalized = normalize_template_literals("[`x`, `y`]");
        assert_eq!(normalized.text, r#"["x", "y"]"#);
        assert_eq!(normalized.interpolated, 0);

        assert_eq!(
            normalize_template_literals(r"`cost \${n}`").text,
            r#""cost ${n}""#
        );
    }

    #[test]
    fn test_backticks_inside_quoted_strings_are_kept() {
        let value = parse(r#"export default { hint: 'Press `Enter` to save', b: "a `b` c" };"#)
            .unwrap();
        assert_eq!(
            value,
            json!({"hint": "Press `Enter` to save", "b": "a `b` c"})
        );

        let value = parse(r"export default { q: 'it\'s `x`', t: `y` }").unwrap();
        assert_eq!(value, json!({"q": "it's `x`", "t": "y"}));
    }

    #[test]
    fn test_backticks_inside_comments_are_kept() {
        let src = "{\n  // use `code` here\n  a: `A`, /* `b` */\n}";
        let normalized = normalize_template_literals(src);
        assert_eq!(
            normalized.text,
            "{\n  // use `code` here\n  a: \"A\", /* `b` */\n}"
        );

        let value = parse(&format!("export default {}", src)).unwrap();
        assert_eq!(value, json!({"a": "A"}));
    }

    #[test]
    fn test_syntax_error_without_interpolation_has_plain_message() {
        let err = parse("export default {\n  // `note`\n  a: `A` b: 'B'\n}").unwrap_err();
        assert!(matches!(err, MergeError::Parse { .. }));
        assert!(!err.to_string().contains("interpolation"), "{}", err);
    }

    #[test]
    fn test_strip_module_wrapper() {
        assert_eq!(strip_module_wrapper("export default {a: 1};\n\n"), "{a: 1}");
        assert_eq!(strip_module_wrapper("  {a: 1}  "), "  {a: 1}");
        assert_eq!(strip_module_wrapper("export default {} ;"), "{}");
        assert_eq!(
            strip_module_wrapper("/* eslint-disable */\n// locale\nexport default {a: 1}"),
            "{a: 1}"
        );
    }
}
