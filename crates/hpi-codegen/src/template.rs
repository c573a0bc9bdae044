//! Named-placeholder template substitution.

use rustc_hash::{FxHashMap, FxHashSet};

use hpi_core::GenError;

/// Text template over `${name}` placeholders.
///
/// Substitution is all-or-nothing: a placeholder without a value and a
/// value without a placeholder are both fatal, so a partial artifact can
/// never be produced.
#[derive(Debug, Clone, Copy)]
pub struct Template<'a> {
    text: &'a str,
}

impl<'a> Template<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Substitute every placeholder from `subs`.
    pub fn substitute(&self, subs: &FxHashMap<&str, String>) -> Result<String, GenError> {
        let mut out = String::with_capacity(self.text.len());
        let mut used: FxHashSet<&str> = FxHashSet::default();

        let mut rest = self.text;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                return Err(GenError::UnboundPlaceholder {
                    name: after.chars().take(32).collect(),
                });
            };
            let name = &after[..end];
            match subs.get_key_value(name) {
                Some((key, value)) => {
                    used.insert(*key);
                    out.push_str(value);
                }
                None => {
                    return Err(GenError::UnboundPlaceholder { name: name.into() });
                }
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);

        // Deterministic report order for stray substitutions.
        let mut unused: Vec<&str> = subs
            .keys()
            .copied()
            .filter(|k| !used.contains(k))
            .collect();
        unused.sort_unstable();
        if let Some(name) = unused.first() {
            return Err(GenError::UnusedSubstitution {
                name: (*name).into(),
            });
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(&'static str, &str)]) -> FxHashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn substitutes_named_placeholders() {
        let t = Template::new("// ${filename}\n${body}\n");
        let out = t
            .substitute(&subs(&[("filename", "out.c"), ("body", "int x;")]))
            .unwrap();
        assert_eq!(out, "// out.c\nint x;\n");
    }

    #[test]
    fn missing_value_is_fatal() {
        let t = Template::new("${body}");
        let err = t.substitute(&subs(&[])).unwrap_err();
        assert!(matches!(err, GenError::UnboundPlaceholder { name } if name == "body"));
    }

    #[test]
    fn stray_substitution_is_fatal() {
        let t = Template::new("no placeholders");
        let err = t.substitute(&subs(&[("body", "x")])).unwrap_err();
        assert!(matches!(err, GenError::UnusedSubstitution { name } if name == "body"));
    }

    #[test]
    fn repeated_placeholder_uses_one_value() {
        let t = Template::new("${name}-${name}");
        let out = t.substitute(&subs(&[("name", "hpi")])).unwrap();
        assert_eq!(out, "hpi-hpi");
    }

    #[test]
    fn literal_dollar_passes_through() {
        let t = Template::new("cost: $5 ${x}");
        let out = t.substitute(&subs(&[("x", "y")])).unwrap();
        assert_eq!(out, "cost: $5 y");
    }
}
