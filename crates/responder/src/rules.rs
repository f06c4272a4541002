/// Placeholder replaced with an excerpt of the user's text when a reply is rendered.
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Characters of user text quoted back inside a reply.
pub const EXCERPT_MAX_CHARS: usize = 50;
const EXCERPT_TRUNCATION_MARKER: &str = "...";

/// One `(keyword-set, reply-template)` pair.
///
/// Keywords are compared against lower-cased input, so they must be written in
/// lower case themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub template: &'static str,
}

impl KeywordRule {
    pub const fn new(keywords: &'static [&'static str], template: &'static str) -> Self {
        Self { keywords, template }
    }

    /// Substring containment of any keyword, not whole-word matching.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword))
    }
}

/// Ordered rule table plus the reply used when nothing matches.
///
/// Evaluation is first-match in declared order. There is no scoring: a later
/// rule never wins over an earlier one, however many of its keywords appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGenerator {
    name: &'static str,
    rules: &'static [KeywordRule],
    default_template: &'static str,
}

impl KeywordGenerator {
    pub const fn new(
        name: &'static str,
        rules: &'static [KeywordRule],
        default_template: &'static str,
    ) -> Self {
        Self {
            name,
            rules,
            default_template,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &'static [KeywordRule] {
        self.rules
    }

    pub fn default_template(&self) -> &'static str {
        self.default_template
    }

    /// Index of the first rule matching `text`, if any.
    pub fn matched_rule(&self, text: &str) -> Option<usize> {
        let normalized = normalize(text);
        self.rules
            .iter()
            .position(|rule| rule.matches(&normalized))
    }

    pub fn select_template(&self, text: &str) -> &'static str {
        self.matched_rule(text)
            .map(|index| self.rules[index].template)
            .unwrap_or(self.default_template)
    }

    pub fn generate(&self, text: &str) -> String {
        render(self.select_template(text), text)
    }
}

/// Lower-casing only: punctuation and accents are left alone.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let mut quoted: String = chars.by_ref().take(EXCERPT_MAX_CHARS).collect();
    if chars.next().is_some() {
        quoted.push_str(EXCERPT_TRUNCATION_MARKER);
    }
    quoted
}

/// Fills [`INPUT_PLACEHOLDER`] with the original, un-normalized text.
pub fn render(template: &str, text: &str) -> String {
    if template.contains(INPUT_PLACEHOLDER) {
        template.replace(INPUT_PLACEHOLDER, &excerpt(text))
    } else {
        template.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUIT_RULES: &[KeywordRule] = &[
        KeywordRule::new(&["maçã", "banana"], "fruta: {input}"),
        KeywordRule::new(&["ban"], "prefixo"),
        KeywordRule::new(&["uva"], "uva"),
    ];
    const FRUIT: KeywordGenerator = KeywordGenerator::new("fruit", FRUIT_RULES, "nada");

    #[test]
    fn first_matching_rule_wins_over_later_rules() {
        // "banana" satisfies both rule 0 and rule 1.
        assert_eq!(FRUIT.matched_rule("quero banana"), Some(0));
        assert_eq!(FRUIT.select_template("quero banana e uva"), "fruta: {input}");
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(FRUIT.matched_rule("BANDEIRA"), Some(1));
        assert_eq!(FRUIT.matched_rule("Uvas verdes"), Some(2));
    }

    #[test]
    fn accents_are_not_folded() {
        assert_eq!(FRUIT.matched_rule("MAÇÃ"), Some(0));
        assert_eq!(FRUIT.matched_rule("maca"), None);
    }

    #[test]
    fn default_template_when_nothing_matches() {
        assert_eq!(FRUIT.generate("laranja"), "nada");
    }

    #[test]
    fn template_quotes_original_text() {
        assert_eq!(FRUIT.generate("Quero BANANA"), "fruta: Quero BANANA");
    }

    #[test]
    fn excerpt_is_bounded() {
        let text = "x".repeat(EXCERPT_MAX_CHARS + 10);
        let quoted = excerpt(&text);
        assert_eq!(quoted, format!("{}...", "x".repeat(EXCERPT_MAX_CHARS)));
        assert_eq!(excerpt("curto"), "curto");
    }

    #[test]
    fn interpolated_text_does_not_affect_matching() {
        const ECHO_RULES: &[KeywordRule] = &[KeywordRule::new(&["{input}"], "eco")];
        let echo = KeywordGenerator::new("echo", ECHO_RULES, "padrão {input}");
        assert_eq!(echo.generate("olá"), "padrão olá");
    }

    #[test]
    fn empty_generator_always_returns_default() {
        let generic = KeywordGenerator::new("generic", &[], "sempre igual");
        assert_eq!(generic.generate("grátis"), "sempre igual");
        assert_eq!(generic.generate(""), "sempre igual");
    }
}
