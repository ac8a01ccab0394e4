//! Configuration options for a conversion run.
//!
//! The `Options` struct controls presentation rules, block translation and
//! the HTTP fetcher. None of it is read from files or the environment.

use std::time::Duration;

/// Configuration options for a conversion run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use webpage_binder::Options;
///
/// let options = Options {
///     keep_blank_text: false,
///     ..Options::default()
/// };
/// assert_eq!(options.max_urls, 6);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Maximum number of non-empty URLs accepted per run.
    ///
    /// Default: `6`
    pub max_urls: usize,

    /// Display width of embedded images in the structured document, in inches.
    ///
    /// Default: `4.0`
    pub image_width_inches: f32,

    /// Width of images in the styled markup, as a percentage of the container.
    ///
    /// Default: `70`
    pub image_width_percent: u8,

    /// CSS `font-family` value applied to the body.
    ///
    /// Default: `'Roboto', sans-serif`
    pub body_font_family: String,

    /// CSS `line-height` applied to the body.
    ///
    /// Default: `1.6`
    pub line_height: f32,

    /// Emit whitespace-only text nodes as (empty-looking) paragraphs.
    ///
    /// Renderers must tolerate these. Turn off to drop them during translation.
    ///
    /// Default: `true`
    pub keep_blank_text: bool,

    /// Do not descend into `script`, `style`, `noscript` or `template`
    /// while translating blocks.
    ///
    /// Default: `true`
    pub skip_raw_text_elements: bool,

    /// Replace `<link rel="stylesheet">` elements with fetched `<style>` content.
    ///
    /// Default: `true`
    pub inline_stylesheets: bool,

    /// `User-Agent` header sent by the HTTP fetcher.
    ///
    /// Default: `None` (transport default)
    pub user_agent: Option<String>,

    /// Per-request timeout for the HTTP fetcher.
    ///
    /// Default: `None` (transport default)
    pub timeout: Option<Duration>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_urls: 6,
            image_width_inches: 4.0,
            image_width_percent: 70,
            body_font_family: "'Roboto', sans-serif".to_string(),
            line_height: 1.6,
            keep_blank_text: true,
            skip_raw_text_elements: true,
            inline_stylesheets: true,
            user_agent: None,
            timeout: None,
        }
    }
}
