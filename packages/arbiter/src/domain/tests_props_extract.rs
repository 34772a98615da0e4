//! Property-based tests for reply splitting.

use proptest::prelude::*;

use crate::domain::extract::extract_move;
use crate::domain::test_prelude;

prop_compose! {
    /// A syntactically move-shaped token without a check/mate suffix.
    fn san_token()(
        piece in proptest::option::of("[KQRBN]"),
        capture in any::<bool>(),
        file in "[a-h]",
        rank in "[1-8]",
        promotion in proptest::option::of("=[QRBN]"),
    ) -> String {
        let mut token = String::new();
        if let Some(p) = piece {
            token.push_str(&p);
        }
        if capture {
            token.push('x');
        }
        token.push_str(&file);
        token.push_str(&rank);
        if let Some(p) = promotion {
            token.push_str(&p);
        }
        token
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Splitting never panics, and a found token is always a substring of
    /// the input.
    #[test]
    fn splitting_is_total(text in any::<String>()) {
        let extraction = extract_move(&text);
        if let Some(token) = extraction.move_token {
            prop_assert!(text.contains(&token),
                "token {:?} not found in input {:?}", token, text);
            prop_assert!(!token.is_empty());
        }
        if let Some(commentary) = extraction.commentary {
            prop_assert_eq!(commentary.trim().len(), commentary.len(),
                "commentary must come back trimmed");
        }
    }

    /// A reply that is exactly one move has no commentary.
    #[test]
    fn bare_token_extracts_whole(token in san_token()) {
        let extraction = extract_move(&token);
        prop_assert_eq!(extraction.move_token.as_deref(), Some(token.as_str()));
        prop_assert_eq!(extraction.commentary, None);
    }

    /// A move embedded in prose is found, and the prose survives as
    /// commentary with the token cut out.
    #[test]
    fn embedded_token_is_found(
        token in san_token(),
        before in "[a-z]{1,12}",
        after in "[a-z]{1,12}",
    ) {
        let text = format!("{before} {token} {after}");
        let extraction = extract_move(&text);
        prop_assert_eq!(extraction.move_token.as_deref(), Some(token.as_str()));
        prop_assert_eq!(
            extraction.commentary,
            Some(format!("{before}  {after}"))
        );
    }

    /// Text with no digits and no castle notation never yields a token; the
    /// whole reply is commentary.
    #[test]
    fn prose_without_moves_is_all_commentary(text in "[a-zA-Z ,.!?']{0,40}") {
        let extraction = extract_move(&text);
        prop_assert_eq!(extraction.move_token, None);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            prop_assert_eq!(extraction.commentary, None);
        } else {
            prop_assert_eq!(extraction.commentary.as_deref(), Some(trimmed));
        }
    }
}
