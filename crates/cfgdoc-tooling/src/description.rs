//! Javadoc HTML → AsciiDoc description translation.

use std::sync::LazyLock;

use regex::Regex;

use crate::registry::TypeRegistry;

/// Ordered rewrite rules; list markup collapses before `<li>` turns into a bullet.
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\n\s*<p>", "\n"),
        (r"\s*<p>", "\n"),
        (r"</p>", ""),
        (r"\s*</li>\s*", ""),
        (r"\s*</ul>\s*", "\n\n"),
        (r"\s*</nl>\s*", "\n\n"),
        (r"\n\s*<ul>\s*", "\n"),
        (r"\s*<ul>\s*", "\n"),
        (r"\n\s*<nl>\s*", "\n"),
        (r"\s*<nl>\s*", "\n"),
        (r"<li>\s*", "\n- "),
        (r"\{@value\s+#?(.*?)\}", "`${1}`"),
        (r"\{@link\s+#?(.*?)\}", "`${1}`"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("description rewrite pattern is valid"),
            replacement,
        )
    })
    .collect()
});

/// Translate paragraph/list HTML and inline Javadoc tags into AsciiDoc.
pub fn translate_html(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

/// Translate every option description in the registry in place.
pub fn translate_descriptions(registry: &mut TypeRegistry) {
    let ids: Vec<_> = registry.all_ids().collect();
    for id in ids {
        for option in &mut registry.get_mut(id).options {
            option.description = translate_html(&option.description);
        }
    }
}
