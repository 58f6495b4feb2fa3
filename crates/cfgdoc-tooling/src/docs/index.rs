//! Index of generated documents, for inclusion in the site navigation.

use askama::Template;

use super::GeneratedDoc;

#[derive(Template, Debug)]
#[template(path = "config-index.txt")]
struct ConfigIndexTemplate<'a> {
    prefix: &'a str,
    entries: Vec<&'a GeneratedDoc>,
}

/// One `- xref:<prefix><file>[<title>]` line per document, sorted by title.
pub(crate) fn render_index(prefix: &str, docs: &[GeneratedDoc]) -> Result<String, askama::Error> {
    let mut entries: Vec<&GeneratedDoc> = docs.iter().collect();
    entries.sort_by(|a, b| {
        a.title
            .cmp(&b.title)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
    ConfigIndexTemplate { prefix, entries }.render()
}
