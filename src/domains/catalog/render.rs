//! Tool listings in plain text, JSON and HTML.

use serde::Serialize;

use crate::domains::tools::ToolEntry;

/// Structured tool list served to machine clients.
#[derive(Debug, Clone, Serialize)]
pub struct ToolListing {
    pub server_url: String,
    pub version: String,
    pub tools: Vec<ToolSummary>,
    pub count: usize,
}

/// One tool in a [`ToolListing`].
#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub version: String,
}

/// Renders the discovered tools for one server URL.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    server_url: &'a str,
    entries: &'a [ToolEntry],
}

impl<'a> Catalog<'a> {
    pub fn new(server_url: &'a str, entries: &'a [ToolEntry]) -> Self {
        Self {
            server_url,
            entries,
        }
    }

    /// Plain-text index served to CLI clients at `/`.
    pub fn cli_index(&self) -> String {
        let url = self.server_url;
        format!(
            "# poor-tools Web Installer

Available endpoints:

## Individual Tools (direct download):
{tools}

## Tool Installers (generates installer script):
{installers}

## Bundle Installer:
- {url}/install (or /installer)

## Usage Examples:

# Install curl directly:
curl -sSL {url}/curl > ~/.local/bin/poorcurl && chmod +x ~/.local/bin/poorcurl

# Generate and run installer for curl:
curl -sSL {url}/curl/install | sh

# Install with options:
curl -sSL {url}/curl/install | sh -s -- --dest /usr/local/bin --emulate

# Install all tools:
curl -sSL {url}/install | sh

All endpoints support ?no_templating=1 to disable include processing.
",
            tools = self.tool_links(),
            installers = self.installer_links(),
        )
    }

    /// Usage text served at `/help`.
    pub fn help(&self) -> String {
        let url = self.server_url;
        format!(
            "# poor-tools Available Tools

Available tools and endpoints:

## Direct Tool Downloads:
{tools}

## Tool Installers (generates installer script):
{installers}

## Batch Installer:
- {url}/install (installs all tools)

## Usage Examples:

# Download and run a tool directly:
curl -sSL {url}/curl | sh

# Install a tool to local bin:
curl -sSL {url}/curl/install | sh

# Install all tools:
curl -sSL {url}/install | sh

# Install with custom destination:
curl -sSL {url}/curl/install | sh -s -- --dest /usr/local/bin

# Get simple tool list for scripting:
curl -sSL {url}/list

# Get detailed tool metadata:
curl -sSL {url}/list -H \"Accept: application/json\"
",
            tools = self.tool_links(),
            installers = self.installer_links(),
        )
    }

    /// Structured listing; tools without a pinned version report `version`.
    pub fn listing(&self, version: &str) -> ToolListing {
        let tools: Vec<ToolSummary> = self
            .entries
            .iter()
            .map(|entry| ToolSummary {
                name: entry.name.clone(),
                description: entry.metadata.description_or_empty().to_string(),
                icon: entry.metadata.icon.clone().unwrap_or_default(),
                version: entry.metadata.version_or(version).to_string(),
            })
            .collect();

        ToolListing {
            server_url: self.server_url.to_string(),
            version: version.to_string(),
            count: tools.len(),
            tools,
        }
    }

    /// One HTML card per tool, with staggered animation delays.
    pub fn html_cards(&self) -> String {
        let mut html = String::new();

        for (i, entry) in self.entries.iter().enumerate() {
            let name = escape_html(&entry.display_name);
            let icon = escape_html(&entry.metadata.display_icon());
            let description = match entry.metadata.description.as_deref() {
                Some(desc) => format!(r#"<p class="tool-description">{}</p>"#, escape_html(desc)),
                None => String::new(),
            };
            let run = escape_html(&format!(
                "curl -sSL {}/{} | sh -s -- --help",
                self.server_url, entry.display_name
            ));
            let install = escape_html(&format!(
                "curl -sSL {}/{}/install | sh",
                self.server_url, entry.display_name
            ));
            let delay = i * 100;

            html.push_str(&format!(
                r#"
        <div class="tool-card" style="animation-delay: {delay}ms">
          <div class="tool-header">
            <iconify-icon icon="{icon}" class="tool-icon"></iconify-icon>
            <h3 class="tool-name">{name}</h3>
          </div>
          {description}
          <div class="command-snippets">
            <div class="command-snippet">
              <span class="command-label">Run directly:</span>
              <div class="command-box">
                <pre class="command-code" data-action="run"><code class="language-bash">{run}</code></pre>
                <button class="clipboard-btn" onclick="copyToClipboard(this, '{run}', 'run', '{name}')" title="Copy command">
                  <iconify-icon icon="mdi:content-copy"></iconify-icon>
                </button>
              </div>
            </div>
            <div class="command-snippet">
              <span class="command-label">Install locally:</span>
              <div class="command-box">
                <pre class="command-code" data-action="install"><code class="language-bash">{install}</code></pre>
                <button class="clipboard-btn" onclick="copyToClipboard(this, '{install}', 'install', '{name}')" title="Copy command">
                  <iconify-icon icon="mdi:content-copy"></iconify-icon>
                </button>
              </div>
            </div>
          </div>
        </div>"#
            ));
        }

        html
    }

    fn tool_links(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("- {}/{} (alias: /{})", self.server_url, e.display_name, e.name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn installer_links(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("- {}/{}/install", self.server_url, e.display_name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Sorted canonical names, one per line.
pub fn name_list(names: &[String]) -> String {
    let mut names = names.to_vec();
    names.sort();
    let mut out = names.join("\n");
    out.push('\n');
    out
}

/// Fill the page template slots.
pub fn render_page(template: &str, css: &str, js: &str, cards: &str) -> String {
    template
        .replace("{{ css_content }}", css)
        .replace("{{ js_content }}", js)
        .replace("{{ commands_html }}", "")
        .replace("{{ tools_cards_html }}", cards)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ScriptMetadata;

    fn entry(name: &str, display: &str, description: Option<&str>) -> ToolEntry {
        ToolEntry {
            name: name.to_string(),
            display_name: display.to_string(),
            metadata: ScriptMetadata {
                description: description.map(str::to_string),
                ..Default::default()
            },
        }
    }

    fn entries() -> Vec<ToolEntry> {
        vec![
            entry("poor", "poor", None),
            entry("poorcurl", "curl", Some("curl, but uses wget behind the scenes")),
        ]
    }

    #[test]
    fn test_cli_index_lists_aliases_and_installers() {
        let entries = entries();
        let text = Catalog::new("http://localhost:7667", &entries).cli_index();

        assert!(text.starts_with("# poor-tools Web Installer"));
        assert!(text.contains("Available endpoints:"));
        assert!(text.contains("- http://localhost:7667/curl (alias: /poorcurl)"));
        assert!(text.contains("- http://localhost:7667/poor (alias: /poor)"));
        assert!(text.contains("- http://localhost:7667/curl/install"));
    }

    #[test]
    fn test_help_mentions_json_listing() {
        let entries = entries();
        let text = Catalog::new("https://tools.example.com", &entries).help();

        assert!(text.contains("## Batch Installer:"));
        assert!(text.contains("curl -sSL https://tools.example.com/list -H \"Accept: application/json\""));
    }

    #[test]
    fn test_listing_fields() {
        let mut entries = entries();
        entries[1].metadata.version = Some("2.0".to_string());

        let listing = Catalog::new("http://x", &entries).listing("abc12345");
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["count"], 2);
        assert_eq!(json["server_url"], "http://x");
        assert_eq!(json["tools"][0]["name"], "poor");
        assert_eq!(json["tools"][0]["version"], "abc12345");
        assert_eq!(json["tools"][0]["icon"], "");
        assert_eq!(json["tools"][1]["version"], "2.0");
    }

    #[test]
    fn test_cards_escape_text() {
        let entries = vec![entry("poorx", "x", Some("<b>bold</b> & more"))];

        let html = Catalog::new("http://x", &entries).html_cards();

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(html.contains(r#"icon="mdi:wrench""#));
        assert!(html.contains("animation-delay: 0ms"));
    }

    #[test]
    fn test_name_list_is_sorted() {
        let names = vec!["poorcurl".to_string(), "poor".to_string(), "poorcolumn".to_string()];

        assert_eq!(name_list(&names), "poor\npoorcolumn\npoorcurl\n");
    }

    #[test]
    fn test_render_page_fills_slots() {
        let page = render_page(
            "<style>{{ css_content }}</style>{{ commands_html }}<main>{{ tools_cards_html }}</main><script>{{ js_content }}</script>",
            "a{}",
            "f()",
            "<div>card</div>",
        );

        assert_eq!(
            page,
            "<style>a{}</style><main><div>card</div></main><script>f()</script>"
        );
    }
}
