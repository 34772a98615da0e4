//! SAN extraction from free-form agent replies.
//!
//! Agents are asked for a move plus commentary in one message, so the reply
//! is scanned for the first substring shaped like a SAN move; everything else
//! is treated as commentary. This is a heuristic: if the commentary mentions
//! a move before stating the actual one ("I considered Nf3, so e4"), the
//! mention wins and the real move is lost. Legality is not checked here; the
//! board decides whether the token is playable.

use lazy_regex::regex;

/// What a reply was split into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// First move-shaped token, if any. May lack the check/mate suffix the
    /// trailing word boundary refused to cross; the board re-derives it.
    pub move_token: Option<String>,
    /// The rest of the reply, trimmed. `None` when nothing is left.
    pub commentary: Option<String>,
}

/// Split an agent reply into a candidate move and commentary.
///
/// When no token is found the whole trimmed reply becomes the commentary.
pub fn extract_move(text: &str) -> Extraction {
    let pattern =
        regex!(r"\b([KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](=[QRBN])?[+#]?|O-O(?:-O)?[+#]?)\b");

    match pattern.find(text) {
        Some(found) => {
            let mut rest = String::with_capacity(text.len() - found.len());
            rest.push_str(&text[..found.start()]);
            rest.push_str(&text[found.end()..]);
            Extraction {
                move_token: Some(found.as_str().to_string()),
                commentary: non_blank(&rest),
            }
        }
        None => Extraction {
            move_token: None,
            commentary: non_blank(text),
        },
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> (Option<String>, Option<String>) {
        let e = extract_move(text);
        (e.move_token, e.commentary)
    }

    fn assert_split(text: &str, token: Option<&str>, commentary: Option<&str>) {
        let (t, c) = parts(text);
        assert_eq!(t.as_deref(), token, "token for {text:?}");
        assert_eq!(c.as_deref(), commentary, "commentary for {text:?}");
    }

    #[test]
    fn pawn_move_with_commentary() {
        assert_split(
            "I'll play e4. Good luck!",
            Some("e4"),
            Some("I'll play . Good luck!"),
        );
    }

    #[test]
    fn no_move_means_all_commentary() {
        assert_split(
            "I resign, you play too well",
            None,
            Some("I resign, you play too well"),
        );
    }

    #[test]
    fn bare_castle_has_no_commentary() {
        assert_split("O-O", Some("O-O"), None);
    }

    #[test]
    fn long_castle() {
        assert_split("O-O-O! The long castle.", Some("O-O-O"), Some("! The long castle."));
    }

    #[test]
    fn piece_move_and_capture() {
        assert_split("Nf3, developing naturally.", Some("Nf3"), Some(", developing naturally."));
        assert_split("Taking: exd5", Some("exd5"), Some("Taking:"));
        assert_split("Qxf7 wins material", Some("Qxf7"), Some("wins material"));
    }

    #[test]
    fn disambiguated_moves() {
        assert_split("Rad1", Some("Rad1"), None);
        assert_split("N5xf3", Some("N5xf3"), None);
    }

    #[test]
    fn first_match_wins_even_in_commentary() {
        // Documented limitation of the first-match heuristic.
        assert_split(
            "I considered Nf3 but will play e4",
            Some("Nf3"),
            Some("I considered  but will play e4"),
        );
    }

    #[test]
    fn mate_suffix_stays_in_commentary_at_word_end() {
        // The trailing word boundary cannot sit between '#' and whitespace,
        // so the token is matched without its suffix.
        assert_split("Promoting: e8=Q#", Some("e8=Q"), Some("Promoting: #"));
        assert_split("Qh4+ check!", Some("Qh4"), Some("+ check!"));
    }

    #[test]
    fn move_numbers_are_skipped() {
        assert_split("1. e4 is best", Some("e4"), Some("1.  is best"));
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert_split("", None, None);
        assert_split("   \n  ", None, None);
    }
}
