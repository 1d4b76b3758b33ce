/// Plural form of an English noun, keeping the casing of the input.
pub fn pluralize(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}
