//! Input tokenizing helpers.

/// Extract the raw command name from an input line.
///
/// Returns `None` when the input does not start with `prefix` (compared
/// byte-for-byte) or when no name follows it directly. With an empty
/// prefix the first whitespace-separated token is the name. The returned
/// name keeps the casing the user typed.
pub fn command_token<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return input.split_whitespace().next();
    }

    // The prefix must sit inside the first token.
    if !input.starts_with(prefix) || prefix.ends_with(char::is_whitespace) {
        return None;
    }

    let rest = &input[prefix.len()..];
    let name = rest.split(char::is_whitespace).next()?;
    (!name.is_empty()).then_some(name)
}

/// Split the arguments off an input line.
///
/// Splits on whitespace runs and drops the first token (the command).
pub fn split_arguments(input: &str) -> Vec<&str> {
    input.split_whitespace().skip(1).collect()
}

/// Everything after the first token, trimmed.
pub fn argument_text(input: &str) -> &str {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(pos) => input[pos..].trim(),
        None => "",
    }
}

/// Format a command invocation for display.
pub fn format_invocation(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_token() {
        assert_eq!(command_token("!help me", "!"), Some("help"));
        assert_eq!(command_token("!HELP", "!"), Some("HELP"));
        assert_eq!(command_token("?help", "!"), None);
        assert_eq!(command_token("help", "!"), None);
    }

    #[test]
    fn test_command_token_input_shorter_than_prefix() {
        assert_eq!(command_token("!", "!!"), None);
        assert_eq!(command_token("", "!"), None);
    }

    #[test]
    fn test_command_token_multi_char_prefix() {
        assert_eq!(command_token("bot:ping now", "bot:"), Some("ping"));
        assert_eq!(command_token("Bot:ping", "bot:"), None);
    }

    #[test]
    fn test_command_token_empty_prefix() {
        assert_eq!(command_token("test", ""), Some("test"));
        assert_eq!(command_token("  test arg", ""), Some("test"));
        assert_eq!(command_token("", ""), None);
        assert_eq!(command_token("   ", ""), None);
    }

    #[test]
    fn test_command_token_bare_prefix() {
        assert_eq!(command_token("!", "!"), None);
        assert_eq!(command_token("! help", "!"), None);
    }

    #[test]
    fn test_command_token_whitespace_prefix() {
        assert_eq!(command_token("! help", "! "), None);
    }

    #[test]
    fn test_command_token_leading_whitespace_prefix() {
        assert_eq!(command_token(" !test", " !"), Some("test"));
        assert_eq!(command_token(" !test arg", " !"), Some("test"));
        assert_eq!(command_token("!test", " !"), None);
        assert_eq!(command_token(" ! test", " !"), None);
    }

    #[test]
    fn test_command_token_multibyte() {
        assert_eq!(command_token("»grüße welt", "»"), Some("grüße"));
    }

    #[test]
    fn test_split_arguments() {
        assert_eq!(split_arguments("!kick  alice\tbob"), vec!["alice", "bob"]);
        assert!(split_arguments("!help").is_empty());
        assert!(split_arguments("").is_empty());
    }

    #[test]
    fn test_argument_text() {
        assert_eq!(argument_text("!say hello   world "), "hello   world");
        assert_eq!(argument_text("  !say"), "");
    }

    #[test]
    fn test_format_invocation() {
        assert_eq!(format_invocation("!", "help"), "!help");
        assert_eq!(format_invocation("", "help"), "help");
    }
}
