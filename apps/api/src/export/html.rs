//! Text-to-HTML transform for document delivery.
//!
//! Deterministic, line-based conversion of the generator's markdown-ish
//! output: heading markers become heading elements, blank-line-separated
//! blocks become paragraphs, `**bold**`/`*italic*` become inline emphasis.
//! The result is wrapped in a minimal print-oriented stylesheet.
//!
//! KNOWN GAP: generated content is passed through without HTML escaping, so
//! text containing markup-significant characters can corrupt the rendered
//! document. Kept as-is; the intended behavior upstream is ambiguous.

/// Page template. Replace: {title}, {body}
const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>{title}</title>
  <style>
    body { font-family: 'Times New Roman', serif; line-height: 1.6; margin: 40px; }
    h1 { text-align: center; margin-bottom: 30px; }
    h2 { margin-top: 30px; margin-bottom: 15px; }
    h3 { margin-top: 20px; margin-bottom: 10px; }
    p { margin-bottom: 15px; text-align: justify; }
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p>{body}</p>
</body>
</html>
"#;

/// Renders content as a standalone HTML document titled `title`.
pub fn render_for_delivery(content: &str, title: &str) -> String {
    let with_headings = content
        .lines()
        .map(heading_line)
        .collect::<Vec<_>>()
        .join("\n");
    let with_paragraphs = with_headings.replace("\n\n", "</p><p>");
    let body = replace_pairs(&replace_pairs(&with_paragraphs, "**", "strong"), "*", "em");

    HTML_TEMPLATE
        .replace("{title}", title)
        .replace("{body}", &body)
}

/// Turns a `#`/`##`/`###`-prefixed line into the matching heading element.
fn heading_line(line: &str) -> String {
    if let Some(text) = line.strip_prefix("### ") {
        format!("<h3>{text}</h3>")
    } else if let Some(text) = line.strip_prefix("## ") {
        format!("<h2>{text}</h2>")
    } else if let Some(text) = line.strip_prefix("# ") {
        format!("<h1>{text}</h1>")
    } else {
        line.to_string()
    }
}

/// Replaces non-empty `delim`-delimited spans with `<tag>…</tag>`.
/// Unpaired delimiters are left untouched.
fn replace_pairs(input: &str, delim: &str, tag: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(delim) {
        let after_open = start + delim.len();
        match rest[after_open..].find(delim) {
            Some(0) => {
                // Empty span — emit the delimiter literally and move on.
                out.push_str(&rest[..after_open]);
                rest = &rest[after_open..];
            }
            Some(end_rel) => {
                let end = after_open + end_rel;
                out.push_str(&rest[..start]);
                out.push_str(&format!("<{tag}>{}</{tag}>", &rest[after_open..end]));
                rest = &rest[end + delim.len()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}
