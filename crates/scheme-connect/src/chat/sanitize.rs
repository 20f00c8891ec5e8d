//! Reply sanitization applied before model output reaches the client.

use std::sync::OnceLock;

use regex::Regex;

fn script_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid script pattern"))
}

fn iframe_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>").expect("valid iframe pattern"))
}

fn dangerous_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:onclick|onerror|onload|javascript:)\b").expect("valid token pattern")
    })
}

/// Strips script/iframe blocks and the event-handler token denylist while
/// leaving markdown formatting intact.
pub fn sanitize_reply(text: &str) -> String {
    let text = script_block().replace_all(text, "");
    let text = iframe_block().replace_all(&text, "");
    let text = dangerous_token().replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::sanitize_reply;

    #[test]
    fn script_blocks_are_removed_with_their_content() {
        let input = "Good news!<script type=\"text/javascript\">steal()</script> You qualify.";
        assert_eq!(sanitize_reply(input), "Good news! You qualify.");
    }

    #[test]
    fn iframe_blocks_are_removed_case_insensitively() {
        let input = "Before<IFRAME src=\"evil\">framed</IFRAME>After";
        assert_eq!(sanitize_reply(input), "BeforeAfter");
    }

    #[test]
    fn event_handler_tokens_are_stripped() {
        let input = "click here onclick=alert(1) to apply";
        assert_eq!(sanitize_reply(input), "click here =alert(1) to apply");
    }

    #[test]
    fn markdown_formatting_survives() {
        let input = "You're eligible for **3 schemes**:\n- one\n- two";
        assert_eq!(sanitize_reply(input), input);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(sanitize_reply("  reply text \n"), "reply text");
    }
}
