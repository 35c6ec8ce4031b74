use proptest::prelude::*;
use textrank_digest::{summarize, DefaultSummarizer, NoopObserver, SentenceSegmenter};

const WORDS: &[&str] = &[
    "bank", "rates", "circular", "policy", "loan", "river", "market", "the", "of", "growth",
    "credit", "déjà", "北京",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(WORDS), 1..6),
        0..10,
    )
    .prop_map(|sentences| {
        sentences
            .iter()
            .map(|words| format!("{}.", words.join(" ")))
            .collect::<Vec<_>>()
            .join(" ")
    })
}

proptest! {
    #[test]
    fn segmentation_is_trimmed_and_deterministic(s in ".{0,200}") {
        let seg = SentenceSegmenter::new();
        let first = seg.segment(&s);
        prop_assert_eq!(&first, &seg.segment(&s));
        for (i, sentence) in first.iter().enumerate() {
            prop_assert_eq!(sentence.index, i);
            prop_assert!(!sentence.text.is_empty());
            prop_assert_eq!(sentence.text.trim(), sentence.text.as_str());
            prop_assert!(!sentence.text.contains('.'));
            prop_assert_eq!(&s[sentence.start..sentence.end], sentence.text.as_str());
        }
    }

    #[test]
    fn selection_keeps_reading_order(text in document(), top_n in 0usize..12) {
        let out = DefaultSummarizer::default().run(&text, top_n, &mut NoopObserver).unwrap();
        let indices = out.selected_indices();

        prop_assert_eq!(indices.len(), top_n.min(out.sentence_count));
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn summary_is_made_of_document_sentences(text in document(), top_n in 1usize..5) {
        let sentences = SentenceSegmenter::new().split(&text);
        let out = DefaultSummarizer::default().run(&text, top_n, &mut NoopObserver).unwrap();

        for selected in &out.selected {
            prop_assert_eq!(sentences[selected.sentence.index], selected.sentence.text.as_str());
        }
        prop_assert!(out.summary.len() <= text.len());
    }

    #[test]
    fn scores_form_a_distribution(text in document()) {
        let out = DefaultSummarizer::default().run(&text, 3, &mut NoopObserver).unwrap();
        prop_assert_eq!(out.scores.len(), out.sentence_count);
        if !out.scores.is_empty() {
            let total: f64 = out.scores.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "scores sum to {}", total);
            prop_assert!(out.scores.iter().all(|s| s.is_finite() && *s >= 0.0));
        }
    }

    #[test]
    fn summarize_is_idempotent(text in document(), top_n in 0usize..6) {
        prop_assert_eq!(summarize(&text, top_n).unwrap(), summarize(&text, top_n).unwrap());
    }

    #[test]
    fn larger_top_n_extends_selection(text in document(), top_n in 0usize..6) {
        let summarizer = DefaultSummarizer::default();
        let small = summarizer.run(&text, top_n, &mut NoopObserver).unwrap().selected_indices();
        let large = summarizer.run(&text, top_n + 1, &mut NoopObserver).unwrap().selected_indices();

        prop_assert!(small.iter().all(|i| large.contains(i)));
    }
}
