use crate::input::{TextInput, TextRange};
use crate::types::InputSnapshot;

/// Split the input into committed text and marked text, and note whether
/// the caret sits at the end of the document.
pub fn read_snapshot<I: TextInput + ?Sized>(input: &I) -> InputSnapshot {
    let (committed, provisional) = match input.marked_text_range() {
        Some(marked) => (
            input.text_in_range(TextRange::new(0, marked.start)),
            input.text_in_range(marked),
        ),
        None => (Some(input.text()), None),
    };

    let end = input.end_of_document();
    let cursor_at_end = input
        .selected_text_range()
        .is_some_and(|sel| sel.is_empty() && sel.start == end);

    InputSnapshot {
        committed,
        provisional,
        cursor_at_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryInput;

    #[test]
    fn test_plain_text() {
        let input = MemoryInput::with_text("Lemons");
        let snap = read_snapshot(&input);
        assert_eq!(snap.committed.as_deref(), Some("Lemons"));
        assert_eq!(snap.provisional, None);
        assert!(snap.cursor_at_end);
    }

    #[test]
    fn test_marked_region_split() {
        let mut input = MemoryInput::with_text("App");
        input.set_marked_text("les", TextRange::caret(3));
        let snap = read_snapshot(&input);
        assert_eq!(snap.committed.as_deref(), Some("App"));
        assert_eq!(snap.provisional.as_deref(), Some("les"));
        assert!(snap.cursor_at_end);
    }

    #[test]
    fn test_caret_inside_text() {
        let mut input = MemoryInput::with_text("Grapefruit");
        input.move_caret(3);
        assert!(!read_snapshot(&input).cursor_at_end);
    }

    #[test]
    fn test_selection_at_end_is_not_a_caret() {
        let mut input = MemoryInput::with_text("Candies");
        input.select(TextRange::new(4, 7));
        assert!(!read_snapshot(&input).cursor_at_end);
    }

    #[test]
    fn test_empty_input() {
        let input = MemoryInput::new();
        let snap = read_snapshot(&input);
        assert_eq!(snap.committed.as_deref(), Some(""));
        assert!(snap.cursor_at_end);
    }
}
