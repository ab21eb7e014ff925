//! Page assembly from the bundled templates.

use crate::messages;
use anyhow::{Context, Result};
use geocmp_core::{LayerPayload, ViewerConfig};

const TEMPLATE_HTML: &str = include_str!("../templates/template.html");
const TEMPLATE_CSS: &str = include_str!("../templates/style.css");
const TEMPLATE_JS: &str = include_str!("../templates/map.js");

#[derive(Debug, Default)]
pub struct PageOptions {
    pub title: Option<String>,
    pub ext_css: Option<String>,
    pub ext_js: Option<String>,
    pub config: ViewerConfig,
    pub wasm_module: String,
}

pub fn default_title(layers: &[LayerPayload]) -> String {
    layers.iter().map(|l| l.name.as_str()).collect::<Vec<_>>().join(" vs ")
}

pub fn generate_html(layers: &[LayerPayload], opts: &PageOptions) -> Result<String> {
    if layers.is_empty() {
        anyhow::bail!(messages::NO_GEOJSON_DATA);
    }
    let title = opts.title.clone().unwrap_or_else(|| default_title(layers));
    let layers_json = serde_json::to_string(layers).context("failed to encode layers")?;
    let config_json = serde_json::to_string(&opts.config).context("failed to encode config")?;
    let wasm_module = serde_json::to_string(&opts.wasm_module)?;

    Ok(fill_template(
        TEMPLATE_HTML,
        &[
            ("title", &escape_html(&title)),
            ("css", TEMPLATE_CSS),
            ("ext_css", &escape_style(opts.ext_css.as_deref().unwrap_or(""))),
            ("js", TEMPLATE_JS),
            ("ext_js", &escape_script(opts.ext_js.as_deref().unwrap_or(""))),
            ("layers_json", &escape_script(&layers_json)),
            ("config_json", &escape_script(&config_json)),
            ("wasm_module", &escape_script(&wasm_module)),
        ],
    ))
}

/// Replaces `{{key}}` placeholders in one pass; inserted values are not
/// rescanned. Unknown placeholders are left in place.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, v)) => out.push_str(v),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keeps JSON or JS text from closing the surrounding `<script>` element.
pub fn escape_script(s: &str) -> String {
    s.replace("</", "<\\/").replace("<!--", "<\\!--")
}

fn escape_style(s: &str) -> String {
    s.replace("</", "<\\/")
}
