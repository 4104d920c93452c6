//! Named field substitution (`{version:03d}`).

use std::collections::BTreeMap;

use eve_common::{EveError, EveResult};
use serde::{Deserialize, Serialize};

/// Value bound to a named pattern field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl FieldValue {
    /// Render with a format spec of the form `d`, `Nd`, `0Nd`, `s` or empty.
    fn render(&self, spec: &str, template: &str) -> EveResult<String> {
        let invalid = |message: String| EveError::InvalidPattern {
            pattern: template.to_string(),
            message,
        };

        let spec = spec.trim();
        if spec.is_empty() || spec == "s" {
            return Ok(match self {
                FieldValue::Int(v) => v.to_string(),
                FieldValue::Text(s) => s.clone(),
            });
        }

        let digits = spec
            .strip_suffix('d')
            .ok_or_else(|| invalid(format!("unsupported field format '{}'", spec)))?;
        let value = match self {
            FieldValue::Int(v) => *v,
            FieldValue::Text(s) => {
                return Err(invalid(format!("integer format '{}' applied to text '{}'", spec, s)))
            }
        };

        if digits.is_empty() {
            return Ok(value.to_string());
        }
        let zero_pad = digits.starts_with('0');
        let width: usize = digits
            .parse()
            .map_err(|_| invalid(format!("bad field width in '{}'", spec)))?;

        Ok(if zero_pad {
            format!("{:0width$}", value, width = width)
        } else {
            format!("{:width$}", value, width = width)
        })
    }
}

/// Replace every `{name[:spec]}` in `template` with its bound value.
///
/// `{{` and `}}` produce literal braces.
pub(crate) fn bind_fields(
    template: &str,
    fields: &BTreeMap<String, FieldValue>,
) -> EveResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut body = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }
                if !closed {
                    return Err(EveError::InvalidPattern {
                        pattern: template.to_string(),
                        message: "unclosed '{'".to_string(),
                    });
                }

                let (name, spec) = body.split_once(':').unwrap_or((body.as_str(), ""));
                let value = fields.get(name.trim()).ok_or_else(|| EveError::UnboundField {
                    field: name.trim().to_string(),
                })?;
                out.push_str(&value.render(spec, template)?);
            }
            '}' => {
                return Err(EveError::InvalidPattern {
                    pattern: template.to_string(),
                    message: "unmatched '}'".to_string(),
                })
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eve_fields() -> BTreeMap<String, FieldValue> {
        BTreeMap::from([
            ("product".to_string(), FieldValue::from("S")),
            ("version".to_string(), FieldValue::from(6)),
            ("revision".to_string(), FieldValue::from(2)),
        ])
    }

    #[test]
    fn test_bind_zero_padded() {
        let bound = bind_fields("EV{product}_{version:03d}_{revision:02d}", &eve_fields()).unwrap();
        assert_eq!(bound, "EVS_006_02");
    }

    #[test]
    fn test_bind_space_padded_and_plain() {
        let bound = bind_fields("v{version:3d}|{revision:d}", &eve_fields()).unwrap();
        assert_eq!(bound, "v  6|2");
    }

    #[test]
    fn test_unbound_field() {
        let err = bind_fields("{missing}", &eve_fields()).unwrap_err();
        assert!(matches!(err, EveError::UnboundField { field } if field == "missing"));
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(bind_fields("{{x}}", &eve_fields()).unwrap(), "{x}");
    }

    #[test]
    fn test_integer_format_on_text() {
        assert!(bind_fields("{product:02d}", &eve_fields()).is_err());
        assert!(bind_fields("{version", &eve_fields()).is_err());
    }
}
