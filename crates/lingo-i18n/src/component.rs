//! Declarative translate blocks.
//!
//! A block is the text content of a `<translate>` element plus its
//! attributes. It resolves through a [`Translator`] and interpolates with its
//! own parameters layered in front of whatever the host passes as parents.

use lingo_common::{LingoError, Result};
use serde_json::Value;

use crate::plural::PluralCount;
use crate::resolver::TranslationRequest;
use crate::translator::Translator;

/// Element wrapped around rendered text unless another tag is given.
pub const DEFAULT_TAG: &str = "span";

/// A translatable block of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateBlock {
    tag: String,
    msgid: String,
    translate_n: Option<PluralCount>,
    translate_plural: Option<String>,
    translate_context: Option<String>,
    translate_params: Option<Value>,
    translate_comment: Option<String>,
}

impl TranslateBlock {
    /// Starts a block from its raw text content.
    pub fn builder(content: impl AsRef<str>) -> TranslateBlockBuilder {
        TranslateBlockBuilder {
            block: Self {
                tag: DEFAULT_TAG.to_string(),
                msgid: content.as_ref().trim().to_string(),
                translate_n: None,
                translate_plural: None,
                translate_context: None,
                translate_params: None,
                translate_comment: None,
            },
        }
    }

    /// The trimmed text content.
    pub fn msgid(&self) -> &str {
        &self.msgid
    }

    /// The enclosing element name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Extractor note; never used for lookups.
    pub fn comment(&self) -> Option<&str> {
        self.translate_comment.as_deref()
    }

    /// Whether both the count and the plural were supplied.
    pub const fn is_plural(&self) -> bool {
        self.translate_n.is_some() && self.translate_plural.is_some()
    }

    /// Replaces the msgid with freshly extracted content, for hosts that
    /// re-read block text on hot reload.
    pub fn refresh_msgid(&mut self, content: &str) {
        self.msgid = content.trim().to_string();
    }

    /// Updates the count.
    pub fn set_n(&mut self, n: impl Into<PluralCount>) {
        self.translate_n = Some(n.into());
    }

    /// Translates and interpolates the text.
    ///
    /// `parents` are searched after the block's own parameters.
    pub fn render(&self, translator: &Translator, parents: &[&Value]) -> String {
        let language = translator.current_language();
        let mut request = TranslationRequest::new(&self.msgid, &language)
            .with_count(self.translate_n.unwrap_or_default());
        if let Some(context) = &self.translate_context {
            request = request.with_context(context);
        }
        if let Some(plural) = self.translate_plural.as_deref().filter(|_| self.is_plural()) {
            request = request.with_default_plural(plural);
        }
        let translation = translator.translate(&request);

        match &self.translate_params {
            Some(params) => {
                let mut layers = Vec::with_capacity(parents.len() + 1);
                layers.push(params);
                layers.extend_from_slice(parents);
                translator.interpolate(&translation, &layers)
            }
            None => translator.interpolate(&translation, parents),
        }
    }

    /// Renders the text wrapped in the block's element, escaped for HTML.
    pub fn render_element(&self, translator: &Translator, parents: &[&Value]) -> String {
        let text = self.render(translator, parents);
        format!("<{tag}>{}</{tag}>", escape_html(&text), tag = self.tag)
    }
}

/// Collects block attributes, then checks them.
#[derive(Debug, Clone)]
#[must_use]
pub struct TranslateBlockBuilder {
    block: TranslateBlock,
}

impl TranslateBlockBuilder {
    /// Element name.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.block.tag = tag.into();
        self
    }

    /// `translate-n`.
    pub fn n(mut self, n: impl Into<PluralCount>) -> Self {
        self.block.translate_n = Some(n.into());
        self
    }

    /// `translate-plural`.
    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.block.translate_plural = Some(plural.into());
        self
    }

    /// `translate-context`.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.block.translate_context = Some(context.into());
        self
    }

    /// `translate-params`.
    pub fn params(mut self, params: Value) -> Self {
        self.block.translate_params = Some(params);
        self
    }

    /// `translate-comment`.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.block.translate_comment = Some(comment.into());
        self
    }

    /// Finishes the block.
    ///
    /// A count without a plural, or a plural without a count, is rejected.
    /// A zero count on its own is tolerated, like any other falsy attribute.
    pub fn build(self) -> Result<TranslateBlock> {
        let block = self.block;
        let n_given = block
            .translate_n
            .is_some_and(|n| n != PluralCount::Integer(0));
        let plural_given = block
            .translate_plural
            .as_deref()
            .is_some_and(|plural| !plural.is_empty());
        if !block.is_plural() && (n_given || plural_given) {
            return Err(LingoError::PluralPairing { msgid: block.msgid });
        }
        Ok(block)
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_common::test_utils::catalog_fixtures::sample_options;
    use lingo_config::PluginOptions;
    use serde_json::json;

    fn translator() -> Translator {
        Translator::from_options(PluginOptions::from_value(sample_options()).unwrap()).unwrap()
    }

    #[test]
    fn test_msgid_is_trimmed() {
        let block = TranslateBlock::builder("\n    Pending\n  ").build().unwrap();
        assert_eq!(block.msgid(), "Pending");
        assert_eq!(block.tag(), DEFAULT_TAG);
        assert_eq!(block.render(&translator(), &[]), "En cours");
    }

    #[test]
    fn test_plural_pairing() {
        let err = TranslateBlock::builder("%{ carCount } car").n(2).build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "`translate-n` and `translate-plural` attributes must be used together: %{ carCount } car."
        );

        let err = TranslateBlock::builder("car").plural("cars").build().unwrap_err();
        assert!(matches!(err, LingoError::PluralPairing { .. }));

        assert!(TranslateBlock::builder("car").n(0).build().is_ok());
    }

    #[test]
    fn test_plural_block_with_parent_layers() {
        let translator = translator();
        let block = TranslateBlock::builder("%{ carCount } car")
            .n(3)
            .plural("%{ carCount } cars")
            .build()
            .unwrap();
        assert!(block.is_plural());

        let parent = json!({ "carCount": 3 });
        assert_eq!(block.render(&translator, &[&parent]), "3 voitures");

        let mut block = block;
        block.set_n(1);
        let parent = json!({ "carCount": 1 });
        assert_eq!(block.render(&translator, &[&parent]), "1 voiture");
    }

    #[test]
    fn test_params_shadow_parents() {
        let translator = translator();
        let block = TranslateBlock::builder("%{ carCount } car")
            .n(1)
            .plural("%{ carCount } cars")
            .params(json!({ "carCount": 1 }))
            .comment("Shown in the garage header")
            .build()
            .unwrap();
        let parent = json!({ "carCount": 40 });
        assert_eq!(block.render(&translator, &[&parent]), "1 voiture");
        assert_eq!(block.comment(), Some("Shown in the garage header"));
    }

    #[test]
    fn test_context_block() {
        let translator = translator();
        let block = TranslateBlock::builder("Answer")
            .context("Noun")
            .build()
            .unwrap();
        assert_eq!(block.render(&translator, &[]), "Réponse (nom)");
    }

    #[test]
    fn test_render_element() {
        let translator = translator();
        translator.set_language("en_US");
        let block = TranslateBlock::builder("<b>%{ who }</b> & co")
            .tag("p")
            .params(json!({ "who": "Ana" }))
            .build()
            .unwrap();
        translator.set_silent(true);
        assert_eq!(
            block.render_element(&translator, &[]),
            "<p>&lt;b&gt;Ana&lt;/b&gt; &amp; co</p>"
        );
    }

    #[test]
    fn test_refresh_msgid() {
        let translator = translator();
        let mut block = TranslateBlock::builder("Answer").build().unwrap();
        block.refresh_msgid("  Pending ");
        assert_eq!(block.render(&translator, &[]), "En cours");
    }
}
