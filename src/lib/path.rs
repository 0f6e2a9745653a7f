// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, NcDiffError};

/// One step of a data path: `prefix:name[k1='v1'][k2='v2']`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct PathStep {
    pub(crate) name: String,
    pub(crate) predicates: Vec<(String, String)>,
}

/// Split `/a:b/a:c[a:k='x/y']` into steps. Slashes inside predicates are
/// not separators.
pub(crate) fn parse_path(path: &str) -> Result<Vec<PathStep>, NcDiffError> {
    let path = path.trim();
    let body = path.strip_prefix('/').ok_or_else(|| {
        NcDiffError::new(
            ErrorKind::InvalidArgument,
            format!("Path '{path}' should start with '/'"),
        )
    })?;

    let mut raw_steps: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for c in body.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            cur.push(c);
            continue;
        }
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '\'' | '"' if depth > 0 => quote = Some(c),
            '/' if depth == 0 => {
                raw_steps.push(std::mem::take(&mut cur));
                continue;
            }
            _ => (),
        }
        cur.push(c);
    }
    if quote.is_some() || depth != 0 {
        return Err(NcDiffError::new(
            ErrorKind::InvalidArgument,
            format!("Unbalanced quote or bracket in path '{path}'"),
        ));
    }
    raw_steps.push(cur);

    let mut ret = Vec::new();
    for raw in raw_steps {
        if raw.is_empty() {
            return Err(NcDiffError::new(
                ErrorKind::InvalidArgument,
                format!("Empty step in path '{path}'"),
            ));
        }
        let (name, predicates) = match raw.find('[') {
            Some(i) => (&raw[..i], parse_predicates(&raw[i..])?),
            None => (raw.as_str(), Vec::new()),
        };
        ret.push(PathStep {
            name: name.trim().to_string(),
            predicates,
        });
    }
    Ok(ret)
}

/// Parse `[a:k='v'][b="w"]` into `[("a:k", "v"), ("b", "w")]`.
pub(crate) fn parse_predicates(
    input: &str,
) -> Result<Vec<(String, String)>, NcDiffError> {
    let invalid = |msg: &str| {
        NcDiffError::new(
            ErrorKind::InvalidArgument,
            format!("Invalid predicate '{input}': {msg}"),
        )
    };
    let mut ret = Vec::new();
    let mut rest = input.trim();
    while !rest.is_empty() {
        rest = rest
            .strip_prefix('[')
            .ok_or_else(|| invalid("expecting '['"))?;
        let (name, after_name) =
            rest.split_once('=').ok_or_else(|| invalid("expecting '='"))?;
        let after_name = after_name.trim_start();
        let quote = after_name
            .chars()
            .next()
            .filter(|c| *c == '\'' || *c == '"')
            .ok_or_else(|| invalid("value should be quoted"))?;
        let value_and_more = &after_name[1..];
        let end = value_and_more
            .find(quote)
            .ok_or_else(|| invalid("unterminated quote"))?;
        let value = &value_and_more[..end];
        rest = value_and_more[end + 1..]
            .trim_start()
            .strip_prefix(']')
            .ok_or_else(|| invalid("expecting ']'"))?
            .trim_start();
        ret.push((name.trim().to_string(), value.to_string()));
    }
    Ok(ret)
}

/// Render predicates, quoting with `'` unless the value holds one.
pub(crate) fn format_predicates(predicates: &[(String, String)]) -> String {
    let mut ret = String::new();
    for (name, value) in predicates {
        if value.contains('\'') {
            ret.push_str(&format!("[{name}=\"{value}\"]"));
        } else {
            ret.push_str(&format!("[{name}='{value}']"));
        }
    }
    ret
}
