//! Rule directive parsing.
//!
//! A directive is a string of the form `name` or `name:param`. The parameter
//! may itself contain colons; only the first colon splits.

use crate::error::ValidationError;

/// Parse a rule directive into a `(name, param)` pair.
///
/// Whitespace around the directive, the name, and the parameter is trimmed
/// independently. A directive without a colon, or with nothing after the
/// colon, yields `param = None`.
///
/// # Errors
///
/// Returns an error if the name portion is empty: the directive is empty,
/// whitespace-only, or starts with a colon.
///
/// ## Example
///
/// ```
/// use payload_validate::parser::parse_directive;
///
/// let (name, param) = parse_directive("min:18").unwrap();
/// assert_eq!(name, "min");
/// assert_eq!(param.as_deref(), Some("18"));
///
/// let (name, param) = parse_directive("datetime:%Y-%m-%d %H:%M").unwrap();
/// assert_eq!(name, "datetime");
/// assert_eq!(param.as_deref(), Some("%Y-%m-%d %H:%M"));
/// ```
pub fn parse_directive(directive: &str) -> Result<(String, Option<String>), ValidationError> {
    let directive = directive.trim();

    let (name, param) = match directive.split_once(':') {
        Some((name, param)) => {
            let param = param.trim();
            (
                name.trim(),
                if param.is_empty() {
                    None
                } else {
                    Some(param.to_string())
                },
            )
        }
        None => (directive, None),
    };

    if name.is_empty() {
        return Err(ValidationError::invalid_rule(
            "Rule must be a non-empty string.",
        ));
    }

    Ok((name.to_string(), param))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn directive_without_param() {
        let (name, param) = parse_directive("required").unwrap();
        assert_eq!(name, "required");
        assert_eq!(param, None);
    }

    #[test]
    fn directive_with_param() {
        let (name, param) = parse_directive("min:18").unwrap();
        assert_eq!(name, "min");
        assert_eq!(param.as_deref(), Some("18"));
    }

    #[test]
    fn splits_on_first_colon_only() {
        let (name, param) = parse_directive("name:param:extra").unwrap();
        assert_eq!(name, "name");
        assert_eq!(param.as_deref(), Some("param:extra"));
    }

    #[test]
    fn trims_name_and_param_separately() {
        let (name, param) = parse_directive("  min : 18 ").unwrap();
        assert_eq!(name, "min");
        assert_eq!(param.as_deref(), Some("18"));
    }

    #[test]
    fn trailing_bare_colon_yields_no_param() {
        let (name, param) = parse_directive("name:").unwrap();
        assert_eq!(name, "name");
        assert_eq!(param, None);

        let (_, param) = parse_directive("name:   ").unwrap();
        assert_eq!(param, None);
    }

    #[test]
    fn empty_name_is_an_error() {
        for bad in ["", "   ", ":param", " : param"] {
            let err = parse_directive(bad).unwrap_err();
            assert_eq!(err.message(), "Rule must be a non-empty string.");
        }
    }

    proptest! {
        // Parameters containing colons survive unsplit beyond the first one.
        #[test]
        fn param_keeps_interior_colons(
            name in "[a-zA-Z][a-zA-Z0-9]{0,10}",
            param in "[a-zA-Z0-9:][a-zA-Z0-9: ]{0,20}[a-zA-Z0-9:]",
        ) {
            let directive = format!("{name}:{param}");
            let (parsed_name, parsed_param) = parse_directive(&directive).unwrap();
            prop_assert_eq!(parsed_name, name);
            prop_assert_eq!(parsed_param.as_deref(), Some(param.trim()));
        }
    }
}
