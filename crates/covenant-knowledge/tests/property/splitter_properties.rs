//! Property tests for TextSplitter chunk bounds and coverage.

use proptest::prelude::*;

use covenant_knowledge::TextSplitter;

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z合同 .\n]{0,400}"
}

proptest! {
    #[test]
    fn chunks_never_exceed_size(text in text(), size in 1usize..80, overlap in 0usize..40) {
        let splitter = TextSplitter::new(size, overlap);
        for chunk in splitter.split(&text) {
            prop_assert!(chunk.chars().count() <= splitter.chunk_size());
            prop_assert!(!chunk.trim().is_empty());
        }
    }

    #[test]
    fn no_content_is_lost(text in text(), size in 1usize..80, overlap in 0usize..40) {
        let chunks = TextSplitter::new(size, overlap).split(&text);
        let joined: String = chunks.concat();
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            let in_text = text.chars().filter(|x| *x == c).count();
            let in_chunks = joined.chars().filter(|x| *x == c).count();
            prop_assert!(in_chunks >= in_text, "lost {:?}", c);
        }
    }

    #[test]
    fn blank_input_has_no_chunks(spaces in "[ \n]{0,20}", size in 1usize..20) {
        prop_assert!(TextSplitter::new(size, 0).split(&spaces).is_empty());
    }
}
