//! Engine-call argument extraction.
//!
//! A regex locates the start of a call such as `ENGINE = Distributed(`; the
//! argument list is then split at top-level commas so nested calls
//! (`cityHash64(a, b)`) and quoted commas (`'b1:9092,b2:9092'`) stay intact.

use regex::Regex;

/// Compile the pattern matching `ENGINE = <engine>(`, case-insensitively.
pub fn engine_call_regex(engine: &str) -> Regex {
    Regex::new(&format!(r"(?i)\bENGINE\s*=\s*{}\s*\(", regex::escape(engine)))
        .expect("valid engine call regex")
}

/// Arguments of the first call matched by `call_start`, still quoted.
///
/// `call_start` must match up to and including the opening parenthesis.
/// Returns `None` when there is no match or the call is never closed.
pub fn call_arguments(ddl: &str, call_start: &Regex) -> Option<Vec<String>> {
    let m = call_start.find(ddl)?;
    split_arguments(&ddl[m.end()..])
}

/// Split the text following an opening parenthesis into top-level arguments.
///
/// Stops at the matching closing parenthesis; returns `None` if it is missing.
pub fn split_arguments(rest: &str) -> Option<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in rest.chars() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '`' | '"' => {
                quote = Some(c);
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' if depth == 0 => {
                let last = current.trim();
                if !last.is_empty() || !args.is_empty() {
                    args.push(last.to_string());
                }
                return Some(args);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    None
}

/// Strip one level of `'...'`, `` `...` `` or `"..."` quoting and unescape
/// backslash escapes inside it. Unquoted input is returned trimmed.
pub fn unquote(arg: &str) -> String {
    let arg = arg.trim();
    let mut chars = arg.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && matches!(open, '\'' | '`' | '"') => {
            let inner = &arg[1..arg.len() - 1];
            let mut out = String::with_capacity(inner.len());
            let mut escaped = false;
            for c in inner.chars() {
                if escaped {
                    out.push(c);
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else {
                    out.push(c);
                }
            }
            out
        }
        _ => arg.to_string(),
    }
}

#[cfg(test)]
#[path = "args_test.rs"]
mod tests;
