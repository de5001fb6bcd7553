/// Candidate command name and arguments extracted from message text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// Lowercased first word; empty when the text has no words.
    pub name: String,
    pub args: Vec<String>,
}

/// Split `text` on whitespace into a lowercased command name and its
/// arguments. A configured `prefix` is stripped first when present; text
/// without it is still parsed, so the prefix stays optional for senders.
pub fn parse(text: &str, prefix: Option<&str>) -> ParsedInput {
    let text = text.trim();
    let body = prefix
        .filter(|p| !p.is_empty())
        .and_then(|p| text.strip_prefix(p))
        .unwrap_or(text);

    let mut words = body.split_whitespace();
    let name = words.next().unwrap_or_default().to_lowercase();
    ParsedInput {
        name,
        args: words.map(String::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    fn words(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("imagine a cat", None, "imagine", &["a", "cat"])]
    #[case("  IMAGINE   a\tcat\n", None, "imagine", &["a", "cat"])]
    #[case("ping", None, "ping", &[])]
    #[case("/imagine a cat", Some("/"), "imagine", &["a", "cat"])]
    #[case("imagine a cat", Some("/"), "imagine", &["a", "cat"])]
    #[case("!! help", Some("!!"), "help", &[])]
    #[case("/ping", Some(""), "/ping", &[])]
    fn splits_name_and_args(
        #[case] text: &str,
        #[case] prefix: Option<&str>,
        #[case] name: &str,
        #[case] args: &[&str],
    ) {
        let parsed = parse(text, prefix);
        assert_eq!(parsed.name, name);
        assert_eq!(parsed.args, words(args));
    }

    #[rstest]
    #[case("")]
    #[case("   \n ")]
    fn degenerate_text_yields_empty_name(#[case] text: &str) {
        assert_eq!(parse(text, None), ParsedInput::default());
    }
}
