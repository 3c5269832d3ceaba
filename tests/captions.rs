// Invariants over the shared copy datasets. Native-friendly, no browser
// APIs involved.

use big_question::{
    AMBIENT_GLYPHS, DISCOURAGEMENTS, FAINT_CAPTION, LANDING_PHRASE, PROPOSAL_PROMPT,
};
use std::collections::HashSet;

#[test]
fn discouragements_are_five_distinct_nonempty_lines() {
    assert_eq!(DISCOURAGEMENTS.len(), 5);
    let mut seen = HashSet::new();
    for caption in DISCOURAGEMENTS {
        assert!(!caption.trim().is_empty(), "empty discouragement caption");
        assert!(seen.insert(caption), "duplicate caption '{caption}'");
    }
}

#[test]
fn steady_state_caption_matches_the_faint_background() {
    // The faint background caption echoes the final discouragement.
    assert_eq!(DISCOURAGEMENTS[4], FAINT_CAPTION);
}

#[test]
fn prompts_are_nonempty_and_distinct() {
    assert!(!LANDING_PHRASE.is_empty());
    assert!(!PROPOSAL_PROMPT.is_empty());
    assert_ne!(LANDING_PHRASE, PROPOSAL_PROMPT);
    assert!(
        !DISCOURAGEMENTS.contains(&PROPOSAL_PROMPT),
        "the default prompt is not a discouragement"
    );
}

#[test]
fn ambient_glyph_pool_is_nonempty_and_single_glyph() {
    assert!(!AMBIENT_GLYPHS.is_empty());
    for glyph in AMBIENT_GLYPHS {
        assert_eq!(
            glyph.chars().count(),
            1,
            "ambient glyph '{glyph}' should be a single scalar"
        );
    }
}
