use super::Color;

/// Returned when a string cannot be read as a color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {input:?}")]
pub struct InvalidColorError {
    /// The rejected input, verbatim.
    pub input: String,
}

impl InvalidColorError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Parse a CSS color string.
///
/// The accepted forms are whatever `csscolorparser` understands, which covers:
/// * `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
/// * `rgb()` / `rgba()`
/// * `hsl()` / `hsla()`, `hwb()`
/// * CSS named colors (`rebeccapurple`, `transparent`, ...)
///
/// Alpha is discarded; the result is the opaque color with the same channels.
pub fn parse_color(input: &str) -> Result<Color, InvalidColorError> {
    let trimmed = input.trim();
    // csscolorparser slices by byte offset and can panic on multi-byte input.
    if trimmed.is_empty() || !trimmed.is_ascii() {
        return Err(InvalidColorError::new(input));
    }

    let parsed = csscolorparser::parse(trimmed).map_err(|_| InvalidColorError::new(input))?;
    let [r, g, b, _] = parsed.to_rgba8();
    Ok(Color::from_rgb([r, g, b]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#3b82f6").unwrap().hex(), "#3b82f6");
        assert_eq!(parse_color("#3B82F6").unwrap().hex(), "#3b82f6");
        assert_eq!(parse_color("#fff").unwrap().hex(), "#ffffff");
        assert_eq!(parse_color("#ff000080").unwrap().hex(), "#ff0000");
    }

    #[test]
    fn test_parse_functional_forms() {
        assert_eq!(parse_color("rgb(255, 0, 0)").unwrap().hex(), "#ff0000");
        assert_eq!(parse_color("hsl(120, 100%, 50%)").unwrap().hex(), "#00ff00");
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("red").unwrap().hex(), "#ff0000");
        assert_eq!(parse_color("rebeccapurple").unwrap().hex(), "#663399");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_color("  #00ff00\n").unwrap().hex(), "#00ff00");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = parse_color("not-a-color").unwrap_err();
        assert_eq!(err.input, "not-a-color");
        assert!(parse_color("").is_err());
        assert!(parse_color("   ").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gggggg").is_err());
    }

    #[test]
    fn test_rejects_non_ascii_without_panicking() {
        assert!(parse_color("#ffé").is_err());
        assert!(parse_color("röd").is_err());
    }

    #[test]
    fn test_error_message_names_the_input() {
        let err = parse_color("nope").unwrap_err();
        assert_eq!(err.to_string(), "invalid color: \"nope\"");
    }
}
