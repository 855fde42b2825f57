//! Best-effort printf-style substitution for message parameters.
//!
//! Clients send `message` templates like `"connection lost to %s"` with
//! a `params` list. Substitution is an enrichment, not a contract: any
//! mismatch between template and params yields no result rather than an
//! error the caller has to handle.

use serde_json::Value;

/// Apply `params` positionally to the `%`-specifiers in `template`.
///
/// Supported: `%s`, `%d`, `%i`, `%f`, `%x`, and `%%` for a literal
/// percent. Returns `None` on any mismatch: unknown specifier, trailing
/// bare `%`, too few params, too many params, or a value the specifier
/// can't render.
pub fn format_params(template: &str, params: &[Value]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();
    let mut next_param = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('%') => out.push('%'),
            Some(spec) => {
                let value = params.get(next_param)?;
                out.push_str(&render(spec, value)?);
                next_param += 1;
            }
            // Template ends in a bare '%'.
            None => return None,
        }
    }

    // Python's % operator rejects unconsumed arguments; mirror that.
    if next_param != params.len() {
        return None;
    }

    Some(out)
}

fn render(spec: char, value: &Value) -> Option<String> {
    match spec {
        's' => Some(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        'd' | 'i' => match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(i.to_string())
                } else {
                    // Floats truncate toward zero, like %d does.
                    n.as_f64().map(|f| (f.trunc() as i64).to_string())
                }
            }
            _ => None,
        },
        'f' => value.as_f64().map(|f| format!("{f:.6}")),
        'x' => value.as_i64().map(|i| {
            // Signed hex, not two's complement: -255 renders as "-ff".
            if i < 0 {
                format!("-{:x}", i.unsigned_abs())
            } else {
                format!("{i:x}")
            }
        }),
        _ => None,
    }
}
