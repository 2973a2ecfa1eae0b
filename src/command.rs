// Argument templates for external programs (capture, speech)
// Placeholders look like `{name}` and are replaced per invocation.

/// Substitute `{key}` placeholders in every argument.
pub fn expand_args(template: &[String], vars: &[(&str, &str)]) -> Vec<String> {
    template
        .iter()
        .map(|arg| {
            vars.iter().fold(arg.clone(), |acc, (key, value)| {
                acc.replace(&format!("{{{}}}", key), value)
            })
        })
        .collect()
}

/// First non-empty line of a child's stderr, for user-facing messages.
pub fn first_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no output")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expand_args() {
        let template = strings(&["-v", "{voice}", "{text}"]);
        let args = expand_args(&template, &[("voice", "en-us"), ("text", "hello")]);
        assert_eq!(args, strings(&["-v", "en-us", "hello"]));
    }

    #[test]
    fn test_placeholder_inside_argument() {
        let template = strings(&["--out={output}"]);
        let args = expand_args(&template, &[("output", "/tmp/f.png")]);
        assert_eq!(args, strings(&["--out=/tmp/f.png"]));
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let template = strings(&["{other}"]);
        assert_eq!(expand_args(&template, &[("text", "x")]), template);
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line(b"\n  oops: denied \nmore"), "oops: denied");
        assert_eq!(first_line(b""), "no output");
    }
}
