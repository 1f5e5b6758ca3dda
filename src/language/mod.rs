//! Language resources: tokenization, word filtering and embeddings.
//!
//! These are the boundary collaborators that turn normalized question text
//! into a [`QuestionRepresentation`]:
//!
//! ```text
//! text ──Tokenizer──▶ morphemes ──WordFilter──▶ content words ──EmbeddingTable──▶ representation
//! ```
//!
//! Everything is bundled in [`LanguageResources`], built once and passed by
//! reference. There is no process-wide model state.

mod embedding;
mod mecab;

pub use embedding::EmbeddingTable;
pub use mecab::MecabTokenizer;

use crate::error::Result;
use crate::question::{QuestionRepresentation, WordEntry};

/// One token as reported by a morphological analyzer.
///
/// `features` is the comma-separated feature list of IPADIC-style
/// dictionaries: part of speech, three sub-classes, conjugation type and
/// form, base form, reading, pronunciation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    /// Surface form as it appears in the text.
    pub surface: String,
    /// Feature columns.
    pub features: Vec<String>,
}

impl Morpheme {
    /// Create a morpheme from a surface and a comma-separated feature string.
    pub fn new(surface: impl Into<String>, features: &str) -> Self {
        Self {
            surface: surface.into(),
            features: features.split(',').map(str::to_owned).collect(),
        }
    }

    fn feature(&self, idx: usize) -> &str {
        self.features.get(idx).map(String::as_str).unwrap_or("")
    }

    /// Part of speech (first feature column).
    pub fn pos(&self) -> &str {
        self.feature(0)
    }

    /// First part-of-speech sub-class.
    pub fn pos_detail(&self) -> &str {
        self.feature(1)
    }

    /// Dictionary base form.
    pub fn base_form(&self) -> &str {
        self.feature(6)
    }

    /// `"pos.detail"`, the coarse type stored on [`WordEntry`].
    pub fn word_type(&self) -> String {
        format!("{}.{}", self.pos(), self.pos_detail())
    }
}

/// A morphological analyzer.
pub trait Tokenizer {
    /// Split one text into morphemes, in text order.
    fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>>;

    /// Tokenize several texts. Implementations backed by a process may
    /// override this to amortize start-up cost.
    fn tokenize_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Morpheme>>> {
        texts.iter().map(|t| self.tokenize(t)).collect()
    }
}

/// Which morphemes count as content words.
///
/// The default is the IPADIC rule: nouns, verbs and adjectives, minus
/// pronouns, dependent nouns, numerals, suffix verbs, the light verbs
/// する/いう/ある and a small stoplist.
#[derive(Debug, Clone)]
pub struct WordFilter {
    /// Accepted parts of speech.
    pub content_pos: Vec<String>,
    /// Noun sub-classes to reject.
    pub excluded_noun_details: Vec<String>,
    /// Verb sub-classes to reject.
    pub excluded_verb_details: Vec<String>,
    /// Verb base forms to reject.
    pub excluded_verb_bases: Vec<String>,
    /// Surfaces to reject regardless of part of speech.
    pub stop_surfaces: Vec<String>,
}

const NOUN: &str = "名詞";
const VERB: &str = "動詞";

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for WordFilter {
    fn default() -> Self {
        Self {
            content_pos: owned(&[NOUN, VERB, "形容詞"]),
            excluded_noun_details: owned(&["代名詞", "非自立", "数"]),
            excluded_verb_details: owned(&["接尾"]),
            excluded_verb_bases: owned(&["する", "いう", "ある"]),
            stop_surfaces: owned(&["年"]),
        }
    }
}

impl WordFilter {
    /// Create the default filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stoplist.
    pub fn with_stop_surfaces<I, S>(mut self, surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_surfaces = surfaces.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `morpheme` is a content word. Vocabulary membership is
    /// checked separately by [`LanguageResources`].
    pub fn accepts(&self, morpheme: &Morpheme) -> bool {
        let pos = morpheme.pos();
        let detail = morpheme.pos_detail();
        let contains = |list: &[String], value: &str| list.iter().any(|s| s == value);

        contains(&self.content_pos, pos)
            && !(pos == NOUN && contains(&self.excluded_noun_details, detail))
            && !(pos == VERB && contains(&self.excluded_verb_details, detail))
            && !(pos == VERB && contains(&self.excluded_verb_bases, morpheme.base_form()))
            && !contains(&self.stop_surfaces, &morpheme.surface)
    }
}

/// Tokenizer, embedding table and word filter, loaded once per run.
#[derive(Debug)]
pub struct LanguageResources<T> {
    tokenizer: T,
    embeddings: EmbeddingTable,
    filter: WordFilter,
}

impl<T: Tokenizer> LanguageResources<T> {
    /// Bundle the resources with the default [`WordFilter`].
    pub fn new(tokenizer: T, embeddings: EmbeddingTable) -> Self {
        Self {
            tokenizer,
            embeddings,
            filter: WordFilter::default(),
        }
    }

    /// Use a custom word filter.
    pub fn with_filter(mut self, filter: WordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The embedding table.
    pub fn embeddings(&self) -> &EmbeddingTable {
        &self.embeddings
    }

    /// Represent one normalized question.
    pub fn represent(&self, text: &str) -> Result<QuestionRepresentation> {
        let morphemes = self.tokenizer.tokenize(text)?;
        self.fold(&morphemes)
    }

    /// Represent a batch of normalized questions, one tokenizer call.
    pub fn represent_all(&self, texts: &[&str]) -> Result<Vec<QuestionRepresentation>> {
        self.tokenizer
            .tokenize_batch(texts)?
            .iter()
            .map(|morphemes| self.fold(morphemes))
            .collect()
    }

    fn fold(&self, morphemes: &[Morpheme]) -> Result<QuestionRepresentation> {
        // Out-of-vocabulary words are skipped, not errors.
        let words = morphemes
            .iter()
            .filter(|m| self.filter.accepts(m))
            .filter_map(|m| {
                self.embeddings
                    .get(&m.surface)
                    .map(|v| WordEntry::new(m.surface.clone(), m.word_type(), v.to_vec()))
            });
        QuestionRepresentation::from_occurrences(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on whitespace; `word/pos/detail/base` tokens carry features.
    struct SlashTokenizer;

    impl Tokenizer for SlashTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>> {
            Ok(text
                .split_whitespace()
                .map(|tok| {
                    let mut parts = tok.split('/');
                    let surface = parts.next().unwrap_or_default();
                    let pos = parts.next().unwrap_or("名詞");
                    let detail = parts.next().unwrap_or("一般");
                    let base = parts.next().unwrap_or(surface);
                    Morpheme::new(surface, &format!("{pos},{detail},*,*,*,*,{base}"))
                })
                .collect())
        }
    }

    fn table() -> EmbeddingTable {
        EmbeddingTable::from_entries(vec![
            ("猫".to_string(), vec![1.0, 0.0]),
            ("好き".to_string(), vec![0.0, 1.0]),
            ("し".to_string(), vec![1.0, 1.0]),
            ("年".to_string(), vec![1.0, 1.0]),
            ("これ".to_string(), vec![1.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_morpheme_accessors() {
        let m = Morpheme::new("食べ", "動詞,自立,*,*,一段,連用形,食べる,タベ,タベ");
        assert_eq!(m.pos(), "動詞");
        assert_eq!(m.pos_detail(), "自立");
        assert_eq!(m.base_form(), "食べる");
        assert_eq!(m.word_type(), "動詞.自立");
    }

    #[test]
    fn test_missing_features_read_as_empty() {
        let m = Morpheme::new("", "BOS/EOS");
        assert_eq!(m.pos_detail(), "");
        assert_eq!(m.base_form(), "");
        assert!(!WordFilter::default().accepts(&m));
    }

    #[test]
    fn test_filter_rules() {
        let f = WordFilter::default();
        let accept = |s: &str, feat: &str| f.accepts(&Morpheme::new(s, feat));

        assert!(accept("猫", "名詞,一般,*,*,*,*,猫"));
        assert!(accept("速い", "形容詞,自立,*,*,*,*,速い"));
        assert!(accept("走る", "動詞,自立,*,*,*,*,走る"));
        assert!(!accept("これ", "名詞,代名詞,一般,*,*,*,これ"));
        assert!(!accept("こと", "名詞,非自立,一般,*,*,*,こと"));
        assert!(!accept("3", "名詞,数,*,*,*,*,3"));
        assert!(!accept("られる", "動詞,接尾,*,*,*,*,られる"));
        assert!(!accept("し", "動詞,自立,*,*,サ変,連用形,する"));
        assert!(!accept("年", "名詞,接尾,助数詞,*,*,*,年"));
        assert!(!accept("が", "助詞,格助詞,一般,*,*,*,が"));
    }

    #[test]
    fn test_custom_stoplist() {
        let f = WordFilter::default().with_stop_surfaces(["猫"]);
        assert!(!f.accepts(&Morpheme::new("猫", "名詞,一般,*,*,*,*,猫")));
        assert!(f.accepts(&Morpheme::new("年", "名詞,一般,*,*,*,*,年")));
    }

    #[test]
    fn test_represent_filters_and_counts() {
        let resources = LanguageResources::new(SlashTokenizer, table());
        let rep = resources
            .represent("猫 が/助詞 好き し/動詞/自立/する 年 これ/名詞/代名詞 犬 猫")
            .unwrap();

        let got: Vec<_> = rep.iter().map(|w| (w.surface.as_str(), w.count)).collect();
        // 犬 is out of vocabulary.
        assert_eq!(got, vec![("猫", 2), ("好き", 1)]);
        assert_eq!(rep.words()[0].word_type, "名詞.一般");
    }

    #[test]
    fn test_represent_vocabulary_gap_is_empty() {
        let resources = LanguageResources::new(SlashTokenizer, table());
        assert!(resources.represent("犬 鳥").unwrap().is_empty());
    }

    #[test]
    fn test_represent_all_matches_single() {
        let resources = LanguageResources::new(SlashTokenizer, table());
        let batch = resources.represent_all(&["猫 好き", "犬"]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], resources.represent("猫 好き").unwrap());
        assert!(batch[1].is_empty());
    }
}
