use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Letters eligible for glyph substitution. Lowercase `x` has no slot; it passes
/// through unchanged in every style.
const ALPHABET: &str = "abcdefghijklmnopqrstuvwyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BOLD: &str = "𝗮𝗯𝗰𝗱𝗲𝗳𝗴𝗵𝗶𝗷𝗸𝗹𝗺𝗻𝗼𝗽𝗾𝗿𝘀𝘁𝘂𝘃𝘄𝘆𝘇𝗔𝗕𝗖𝗗𝗘𝗙𝗚𝗛𝗜𝗝𝗞𝗟𝗠𝗡𝗢𝗣𝗤𝗥𝗦𝗧𝗨𝗩𝗪𝗫𝗬𝗭";
const BOLD_SERIF: &str = "𝐚𝐛𝐜𝐝𝐞𝐟𝐠𝐡𝐢𝐣𝐤𝐥𝐦𝐧𝐨𝐩𝐪𝐫𝐬𝐭𝐮𝐯𝐰𝐲𝐳𝐀𝐁𝐂𝐃𝐄𝐅𝐆𝐇𝐈𝐉𝐊𝐋𝐌𝐍𝐎𝐏𝐐𝐑𝐒𝐓𝐔𝐕𝐖𝐗𝐘𝐙";
const ITALIC: &str = "𝘢𝘣𝘤𝘥𝘦𝘧𝘨𝘩𝘪𝘫𝘬𝘭𝘮𝘯𝘰𝘱𝘲𝘳𝘴𝘵𝘶𝘷𝘸𝘺𝘻𝘈𝘉𝘊𝘋𝘌𝘍𝘎𝘏𝘐𝘑𝘒𝘓𝘔𝘕𝘖𝘗𝘘𝘙𝘚𝘛𝘜𝘝𝘞𝘟𝘠𝘡";
const ITALIC_SERIF: &str = "𝑎𝑏𝑐𝑑𝑒𝑓𝑔ℎ𝑖𝑗𝑘𝑙𝑚𝑛𝑜𝑝𝑞𝑟𝑠𝑡𝑢𝑣𝑤𝑦𝑧𝐴𝐵𝐶𝐷𝐸𝐹𝐺𝐻𝐼𝐽𝐾𝐿𝑀𝑁𝑂𝑃𝑄𝑅𝑆𝑇𝑈𝑉𝑊𝑋𝑌𝑍";
const BOLD_ITALIC: &str = "𝙖𝙗𝙘𝙙𝙚𝙛𝙜𝙝𝙞𝙟𝙠𝙡𝙢𝙣𝙤𝙥𝙦𝙧𝙨𝙩𝙪𝙫𝙬𝙮𝙯𝘼𝘽𝘾𝘿𝙀𝙁𝙂𝙃𝙄𝙅𝙆𝙇𝙈𝙉𝙊𝙋𝙌𝙍𝙎𝙏𝙐𝙑𝙒𝙓𝙔𝙕";
const BOLD_ITALIC_SERIF: &str = "𝒂𝒃𝒄𝒅𝒆𝒇𝒈𝒉𝒊𝒋𝒌𝒍𝒎𝒏𝒐𝒑𝒒𝒓𝒔𝒕𝒖𝒗𝒘𝒚𝒛𝑨𝑩𝑪𝑫𝑬𝑭𝑮𝑯𝑰𝑱𝑲𝑳𝑴𝑵𝑶𝑷𝑸𝑹𝑺𝑻𝑼𝑽𝑾𝑿𝒀𝒁";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Bold,
    Italic,
    BoldItalic,
    BoldSerif,
    ItalicSerif,
    BoldItalicSerif,
    Plain,
}

/// Styles recognised in templates, in the order their spans are expanded.
pub const TEMPLATE_STYLES: [FontStyle; 6] = [
    FontStyle::Bold,
    FontStyle::Italic,
    FontStyle::BoldItalic,
    FontStyle::BoldSerif,
    FontStyle::ItalicSerif,
    FontStyle::BoldItalicSerif,
];

impl FontStyle {
    /// Parses a dash-separated, case-insensitive set of `bold`, `italic` and
    /// `serif`. Anything without a glyph table resolves to [`FontStyle::Plain`].
    pub fn parse(style: &str) -> Self {
        let (mut bold, mut italic, mut serif) = (false, false, false);
        for part in style.split('-') {
            match part.to_lowercase().as_str() {
                "bold" => bold = true,
                "italic" => italic = true,
                "serif" => serif = true,
                _ => return Self::Plain,
            }
        }

        match (bold, italic, serif) {
            (true, false, false) => Self::Bold,
            (false, true, false) => Self::Italic,
            (true, true, false) => Self::BoldItalic,
            (true, false, true) => Self::BoldSerif,
            (false, true, true) => Self::ItalicSerif,
            (true, true, true) => Self::BoldItalicSerif,
            _ => Self::Plain,
        }
    }

    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("BOLD"),
            Self::Italic => Some("ITALIC"),
            Self::BoldItalic => Some("BOLD-ITALIC"),
            Self::BoldSerif => Some("BOLD-SERIF"),
            Self::ItalicSerif => Some("ITALIC-SERIF"),
            Self::BoldItalicSerif => Some("BOLD-ITALIC-SERIF"),
            Self::Plain => None,
        }
    }

    fn glyphs(self) -> &'static str {
        match self {
            Self::Bold => BOLD,
            Self::Italic => ITALIC,
            Self::BoldItalic => BOLD_ITALIC,
            Self::BoldSerif => BOLD_SERIF,
            Self::ItalicSerif => ITALIC_SERIF,
            Self::BoldItalicSerif => BOLD_ITALIC_SERIF,
            Self::Plain => ALPHABET,
        }
    }

    pub fn apply(self, message: &str) -> String {
        let glyphs = self.glyphs();
        let folded = fold_to_ascii(message);
        let mut output = String::with_capacity(folded.len() * 4);

        for letter in folded.chars() {
            let glyph = ALPHABET
                .find(letter)
                .and_then(|index| glyphs.chars().nth(index));
            output.push(glyph.unwrap_or(letter));
        }

        output
    }
}

/// Rewrites `message` in the decorative glyph set named by `style`
/// (e.g. `"bold"`, `"italic-serif"`).
pub fn apply_font(message: &str, style: &str) -> String {
    FontStyle::parse(style).apply(message)
}

/// Folds the message to its closest ASCII spelling: accented letters lose
/// their marks, typographic punctuation becomes plain ASCII and emoji become
/// their short names.
fn fold_to_ascii(message: &str) -> Cow<'_, str> {
    if message.is_ascii() {
        return Cow::Borrowed(message);
    }
    Cow::Owned(deunicode::deunicode(message))
}

static STYLE_SPANS: LazyLock<Vec<(FontStyle, Regex)>> = LazyLock::new(|| {
    TEMPLATE_STYLES
        .iter()
        .filter_map(|style| {
            let marker = regex::escape(&format!("<<{}>>", style.marker()?));
            let pattern = Regex::new(&format!("{marker}(.*?){marker}")).ok()?;
            Some((*style, pattern))
        })
        .collect()
});

/// Replaces every `<<STYLE>>text<<STYLE>>` span with `text` in that style.
///
/// Styles are expanded one pass at a time in [`TEMPLATE_STYLES`] order. A span
/// closes at the first matching marker on the same line; an opening marker
/// with no partner is left in place.
pub fn expand_fonts(template: &str) -> String {
    let mut expanded = template.to_string();
    for (style, pattern) in STYLE_SPANS.iter() {
        expanded = pattern
            .replace_all(&expanded, |caps: &Captures| style.apply(&caps[1]))
            .into_owned();
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_tables_cover_the_alphabet() {
        for style in TEMPLATE_STYLES {
            assert_eq!(
                style.glyphs().chars().count(),
                ALPHABET.len(),
                "{style:?}"
            );
        }
    }

    #[test]
    fn bold_rewrites_letters() {
        assert_eq!(
            apply_font("hello", "bold"),
            "\u{1D5F5}\u{1D5F2}\u{1D5F9}\u{1D5F9}\u{1D5FC}"
        );
    }

    #[test]
    fn style_names_are_case_insensitive_and_unordered() {
        assert_eq!(FontStyle::parse("Serif-BOLD"), FontStyle::BoldSerif);
        assert_eq!(FontStyle::parse("italic-bold"), FontStyle::BoldItalic);
        assert_eq!(FontStyle::parse("serif-italic-bold"), FontStyle::BoldItalicSerif);
        assert_eq!(FontStyle::parse("bold-bold"), FontStyle::Bold);
    }

    #[test]
    fn unknown_styles_fall_back_to_plain() {
        assert_eq!(apply_font("abc", "unknown-style"), "abc");
        assert_eq!(apply_font("abc", ""), "abc");
        assert_eq!(apply_font("abc", "serif"), "abc");
        assert_eq!(apply_font("abc", "bold-underline"), "abc");
    }

    #[test]
    fn lowercase_x_and_non_letters_pass_through() {
        assert_eq!(apply_font("x1!", "bold"), "x1!");
        assert_eq!(apply_font("X", "bold"), "\u{1D5EB}");
        assert_eq!(apply_font("", "italic"), "");
    }

    #[test]
    fn whole_message_is_folded_to_ascii() {
        assert_eq!(apply_font("Léa’s 🎉 — ok", "plain"), "Lea's tada -- ok");
        assert_eq!(apply_font("a 🎉", "bold"), apply_font("a tada", "bold"));
    }

    #[test]
    fn italic_serif_uses_planck_h() {
        assert_eq!(apply_font("h", "italic-serif"), "\u{210E}");
    }

    #[test]
    fn accents_are_folded_before_styling() {
        assert_eq!(apply_font("café", "plain"), "cafe");
        assert_eq!(
            apply_font("é", "bold-serif"),
            apply_font("e", "bold-serif")
        );
    }

    #[test]
    fn expands_a_single_span() {
        assert_eq!(expand_fonts("<<BOLD>>hello<<BOLD>>"), apply_font("hello", "bold"));
    }

    #[test]
    fn spans_close_at_the_first_marker() {
        let expanded = expand_fonts("<<BOLD>>a<<BOLD>> and <<BOLD>>b<<BOLD>>");
        assert_eq!(
            expanded,
            format!("{} and {}", apply_font("a", "bold"), apply_font("b", "bold"))
        );
    }

    #[test]
    fn unmatched_marker_is_left_alone() {
        let template = "<<ITALIC>>dangling and <<BOLD>>ok<<BOLD>>";
        assert_eq!(
            expand_fonts(template),
            format!("<<ITALIC>>dangling and {}", apply_font("ok", "bold"))
        );
    }

    #[test]
    fn odd_marker_count_leaves_the_last_one() {
        assert_eq!(
            expand_fonts("<<BOLD>>a<<BOLD>>b<<BOLD>>"),
            format!("{}b<<BOLD>>", apply_font("a", "bold"))
        );
    }

    #[test]
    fn markers_must_match_exact_uppercase() {
        let template = "<<bold>>quiet<<bold>>";
        assert_eq!(expand_fonts(template), template);
    }

    #[test]
    fn earlier_styles_swallow_nested_markers() {
        let expanded = expand_fonts("<<BOLD>>a <<ITALIC>>b<<ITALIC>><<BOLD>>");
        assert_eq!(expanded, apply_font("a <<ITALIC>>b<<ITALIC>>", "bold"));
        assert!(!expanded.contains("<<ITALIC>>"));
    }

    #[test]
    fn compound_markers_do_not_match_single_styles() {
        let expanded = expand_fonts("<<BOLD-SERIF>>Title<<BOLD-SERIF>>");
        assert_eq!(expanded, apply_font("Title", "bold-serif"));
    }

    #[test]
    fn spans_do_not_cross_lines() {
        let template = "<<BOLD>>first\nsecond<<BOLD>>";
        assert_eq!(expand_fonts(template), template);
    }
}
