#[cfg(test)]
mod tests {
    use crate::language::{EmbeddingTable, LanguageResources, Morpheme, Tokenizer};
    use crate::pipeline::{ScatterConfig, ScatterReport, Scatterer};
    use crate::{Error, Linkage, Result};

    /// Longest-match tokenizer over a tiny IPADIC-style lexicon.
    struct LexiconTokenizer {
        lexicon: Vec<(&'static str, &'static str)>,
    }

    impl LexiconTokenizer {
        fn new() -> Self {
            let mut lexicon = vec![
                ("猫", "名詞,一般,*,*,*,*,猫"),
                ("犬", "名詞,一般,*,*,*,*,犬"),
                ("好き", "名詞,形容動詞語幹,*,*,*,*,好き"),
                ("晴れ", "名詞,一般,*,*,*,*,晴れ"),
                ("雨", "名詞,一般,*,*,*,*,雨"),
                ("日", "名詞,一般,*,*,*,*,日"),
                ("鳥", "名詞,一般,*,*,*,*,鳥"),
                ("が", "助詞,格助詞,一般,*,*,*,が"),
                ("の", "助詞,連体化,*,*,*,*,の"),
            ];
            lexicon.sort_by_key(|(s, _)| std::cmp::Reverse(s.chars().count()));
            Self { lexicon }
        }
    }

    impl Tokenizer for LexiconTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>> {
            let mut out = Vec::new();
            let mut rest = text;
            while let Some(c) = rest.chars().next() {
                match self.lexicon.iter().find(|(s, _)| rest.starts_with(s)) {
                    Some((s, features)) => {
                        out.push(Morpheme::new(*s, features));
                        rest = &rest[s.len()..];
                    }
                    None => {
                        out.push(Morpheme::new(c.to_string(), "記号,一般,*,*,*,*,*"));
                        rest = &rest[c.len_utf8()..];
                    }
                }
            }
            Ok(out)
        }
    }

    /// Pets near axis 0, weather near axis 2.
    fn embeddings() -> EmbeddingTable {
        EmbeddingTable::from_entries(
            [
                ("猫", [1.0, 0.2, 0.0, 0.0]),
                ("犬", [1.0, -0.2, 0.0, 0.0]),
                ("好き", [1.0, 0.0, 0.0, 0.1]),
                ("晴れ", [0.0, 0.0, 1.0, 0.2]),
                ("雨", [0.0, 0.0, 1.0, -0.2]),
                ("日", [0.1, 0.0, 1.0, 0.0]),
            ]
            .into_iter()
            .map(|(w, v)| (w.to_string(), v.to_vec())),
        )
        .unwrap()
    }

    fn questions() -> Vec<String> {
        ["猫が好き？", "犬が好き", "晴れの日", "雨の日"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn pair_of(leaf: usize) -> usize {
        leaf / 2
    }

    fn assert_two_pair_clustering(config: ScatterConfig) {
        let resources = LanguageResources::new(LexiconTokenizer::new(), embeddings());
        let report = Scatterer::new(&resources)
            .with_config(config)
            .run(questions())
            .unwrap();
        assert_two_pair_report(&report);
    }

    fn assert_two_pair_report(report: &ScatterReport) {
        // Both pairs merge before the root.
        let tree = report.tree();
        let mut first_two: Vec<[usize; 2]> = tree.merges().take(2).map(|m| m.children).collect();
        first_two.sort();
        assert_eq!(first_two, vec![[0, 1], [2, 3]]);
        assert_eq!(tree.children(tree.root()), Some([4, 5]));

        // The scattered order alternates between the pairs.
        let order = report.scatter_order();
        assert_ne!(order, vec![0, 1, 2, 3]);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
        for w in order.windows(2) {
            assert_ne!(pair_of(w[0]), pair_of(w[1]), "{order:?}");
        }

        // Dendrogram: one line per question, original text kept.
        let lines = report.dendrogram_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().any(|l| l.ends_with("0.猫が好き？")));
        for (i, q) in questions().iter().enumerate() {
            assert_eq!(lines.iter().filter(|l| l.ends_with(&format!("{i}.{q}"))).count(), 1);
        }
        assert!(lines[0].starts_with('①'));

        let scattered = report.scatter_lines();
        assert_eq!(scattered.len(), 4);
        assert_eq!(scattered[0], format!("{}.{}", order[0], questions()[order[0]]));
    }

    #[test]
    fn pets_and_weather_default_config() {
        // Ward with k = 9: every distance is negative and the pairs sit near -4.9.
        let resources = LanguageResources::new(LexiconTokenizer::new(), embeddings());
        let report = Scatterer::new(&resources).run(questions()).unwrap();

        assert!(report.distances().get(0, 1) < report.distances().get(0, 3));
        assert!(report.distances().get(0, 3) < 0.0);
        assert_two_pair_report(&report);
    }

    #[test]
    fn pets_and_weather_average_linkage() {
        // Two words per question: 4 pairs, so distances carry the -5 bonus.
        assert_two_pair_clustering(ScatterConfig::new().with_linkage(Linkage::Average));
    }

    #[test]
    fn pets_and_weather_ward_without_bonus() {
        // k = 4 matches the pair count, keeping distances non-negative.
        assert_two_pair_clustering(ScatterConfig::new().with_top_k(4));
    }

    #[test]
    fn distances_reflect_topics() {
        let resources = LanguageResources::new(LexiconTokenizer::new(), embeddings());
        let report = Scatterer::new(&resources).run(questions()).unwrap();
        let d = report.distances();

        assert!(d.is_well_formed());
        assert!(d.get(0, 1) < d.get(0, 2));
        assert!(d.get(2, 3) < d.get(1, 3));
        // Four word pairs each: every distance carries the 4 - 9 bonus.
        assert!(d.get(0, 1) < -4.0);
    }

    #[test]
    fn single_question_is_rejected() {
        let resources = LanguageResources::new(LexiconTokenizer::new(), embeddings());
        let err = Scatterer::new(&resources).run(vec!["猫が好き".into()]).unwrap_err();
        assert_eq!(err, Error::DegenerateInput { n_items: 1 });
    }

    #[test]
    fn vocabulary_gap_still_participates() {
        let resources = LanguageResources::new(LexiconTokenizer::new(), embeddings());
        let mut qs = questions();
        qs.push("鳥".into());
        let report = Scatterer::new(&resources)
            .with_config(ScatterConfig::new().with_linkage(Linkage::Average))
            .run(qs)
            .unwrap();

        assert_eq!(report.distances().get(4, 0), -9.0);
        assert_eq!(report.dendrogram_lines().len(), 5);
        let mut order = report.scatter_order();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }
}
