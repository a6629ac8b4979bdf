//! Language codes accepted by the remote synthesis endpoint.
//!
//! The endpoint is the authority on what it supports; this table only drives
//! `--list-languages` and an early warning for likely typos.

/// All known languages as a compile-time slice (sorted by code for binary search).
const LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("gu", "Gujarati"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("iw", "Hebrew"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("su", "Sundanese"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// Get a language name by code using binary search O(log n).
pub fn get_language(code: &str) -> Option<&'static str> {
    LANGUAGES.binary_search_by_key(&code, |&(c, _)| c).ok().map(|idx| LANGUAGES[idx].1)
}

/// Print all known language codes.
pub fn print_languages() {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Known languages ({})", LANGUAGES.len());
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("{:<8} LANGUAGE", "CODE");
    println!("{}", "─".repeat(40));

    for (code, name) in LANGUAGES {
        println!("{:<8} {}", code, name);
    }

    println!();
    println!("Usage:");
    println!("  ./chunked-tts --lang es \"Hola, ¿cómo estás?\"");
    println!();
}

/// Print information about one language code.
pub fn print_language_info(code: &str) -> anyhow::Result<()> {
    let name = get_language(code).ok_or_else(|| anyhow::anyhow!("Language '{}' not found. Run with --list-languages to see known languages", code))?;

    println!();
    println!("Language: {}", name);
    println!("{}", "─".repeat(40));
    println!("Code:          {}", code);
    println!();
    println!("Usage:");
    println!("  ./chunked-tts --lang {} --file input.txt", code);
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sorted_for_binary_search() {
        assert!(LANGUAGES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_get_language() {
        assert_eq!(get_language("en"), Some("English"));
        assert_eq!(get_language("zh-TW"), Some("Chinese (Traditional)"));
        assert_eq!(get_language("xx"), None);
        assert!(print_language_info("xx").is_err());
    }
}
