/// Greedy word wrap on whitespace. A word longer than `max_chars` is never
/// split; it lands on its own overflowing line.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let gap = usize::from(current_len > 0);
        if current_len > 0 && current_len + word_len + gap > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(wrap("", 30).is_empty());
        assert!(wrap("   \t ", 30).is_empty());
    }

    #[test]
    fn fills_lines_up_to_the_limit() {
        assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap("aaa bbb ccc", 11), vec!["aaa bbb ccc"]);
        assert_eq!(wrap("aaa bbb ccc", 6), vec!["aaa", "bbb", "ccc"]);
    }

    #[test]
    fn long_word_is_emitted_whole() {
        assert_eq!(
            wrap("Weight: 18.250000000000000g ok", 10),
            vec!["Weight:", "18.250000000000000g", "ok"]
        );
        assert_eq!(wrap("abcdefghij", 3), vec!["abcdefghij"]);
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        assert_eq!(wrap("Gold:   18k\nwhite", 30), vec!["Gold: 18k white"]);
    }

    #[test]
    fn rewrapping_joined_output_is_stable() {
        let samples = [
            "Description: Solitaire ring with a brilliant cut stone and polished band",
            "Stone: emerald 2.1ct",
            "a bb ccc dddd eeeee ffffff ggggggg hhhhhhhhhhhhhhhhhhhhhhhhhhhhhhhhh i",
        ];
        for width in [1, 5, 25, 30, 80] {
            for sample in samples {
                let first = wrap(sample, width);
                let second = wrap(&first.join(" "), width);
                assert_eq!(first, second, "width {width}: {sample}");
            }
        }
    }
}
