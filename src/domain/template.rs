//! Shared template engine for branch names and PR titles/bodies
//!
//! Thin wrapper around handlebars providing the `humanize`/`title`/`lower`/
//! `upper` helpers and two rendering modes: strict (missing variables are
//! reported by name, so callers can recover interactively) and lenient
//! (missing variables render empty, for body templates full of optional
//! sections).

use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderErrorReason,
};
use regex::Regex;
use serde::Serialize;

use crate::error::Error;

/// Replaces any configured token separator with a space, turning a slug
/// like `this-is-a-change` into prose
struct HumanizeHelper {
    matcher: Regex,
}

impl HelperDef for HumanizeHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h
            .param(0)
            .and_then(|p| p.value().as_str())
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("humanize", 0))?;
        out.write(&self.matcher.replace_all(value, " "))?;
        Ok(())
    }
}

handlebars_helper!(title: |s: String| to_title_case(&s));
handlebars_helper!(lower: |s: String| s.to_lowercase());
handlebars_helper!(upper: |s: String| s.to_uppercase());

fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Template renderer shared by the branch and PR templaters
pub struct TemplateEngine {
    strict: Handlebars<'static>,
    lenient: Handlebars<'static>,
}

impl TemplateEngine {
    /// Build an engine whose `humanize` helper knows the configured token
    /// separators
    ///
    /// # Errors
    /// Returns a `Config` error when a separator cannot form a valid
    /// character class
    pub fn new(separators: &[char]) -> Result<Self, Error> {
        let class: String = separators
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        let matcher = Regex::new(&format!("[{class}]")).map_err(|err| {
            Error::Config(format!("token_separators: invalid humanize matcher: {err}"))
        })?;

        Ok(Self {
            strict: Self::build(true, matcher.clone()),
            lenient: Self::build(false, matcher),
        })
    }

    fn build(strict: bool, matcher: Regex) -> Handlebars<'static> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(strict);
        // PR bodies are markdown, not HTML
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("humanize", Box::new(HumanizeHelper { matcher }));
        registry.register_helper("title", Box::new(title));
        registry.register_helper("lower", Box::new(lower));
        registry.register_helper("upper", Box::new(upper));
        registry
    }

    /// Render with strict missing-key semantics
    ///
    /// # Errors
    /// `MissingField` (naming the key) when the template references a field
    /// absent from `data`; `Template` for syntax or other runtime errors
    pub fn render_strict<T: Serialize>(&self, template: &str, data: &T) -> Result<String, Error> {
        self.strict
            .render_template(template, data)
            .map_err(classify)
    }

    /// Render with lenient missing-key semantics (missing keys are empty)
    ///
    /// # Errors
    /// `Template` for syntax or runtime errors
    pub fn render_lenient<T: Serialize>(&self, template: &str, data: &T) -> Result<String, Error> {
        self.lenient
            .render_template(template, data)
            .map_err(classify)
    }
}

fn classify(err: handlebars::RenderError) -> Error {
    match err.reason() {
        RenderErrorReason::MissingVariable(Some(path)) => {
            // Nested paths keep only the leaf name for the prompt
            let key = path.rsplit('.').next().unwrap_or(path).to_string();
            Error::MissingField(key)
        }
        _ => Error::Template(err.to_string()),
    }
}
