//! Section dispatcher: maps each section to its renderer.

use std::borrow::Cow;

use askama::Template;
use folio_core::{Error, Result};
use folio_model::{parse_sections, Section};

use crate::options::RenderOptions;
use crate::sanitize::sanitize_rich_text;
use crate::templates::{
    ContentBoxesTemplate, CustomHtmlTemplate, LinksTemplate, NewsTemplate,
    ProjectHighlightsTemplate, StatsTemplate,
};

/// Render one section to its HTML region.
pub fn render_section(section: &Section, options: &RenderOptions) -> Result<String> {
    let rendered = match section {
        Section::StatsSection(s) => StatsTemplate { section: s }.render(),
        Section::LinksSection(s) => LinksTemplate { section: s }.render(),
        Section::ContentBoxes(s) => ContentBoxesTemplate { section: s }.render(),
        Section::ProjectHighlights(s) => ProjectHighlightsTemplate { section: s }.render(),
        Section::NewsSection(s) => NewsTemplate { section: s }.render(),
        Section::CustomHtml(raw) => {
            let html: Cow<'_, str> = if options.trust_custom_html {
                Cow::Borrowed(raw)
            } else {
                Cow::Owned(sanitize_rich_text(raw))
            };
            CustomHtmlTemplate { html: &html }.render()
        }
    };

    rendered.map_err(|e| Error::render(format!("{} section: {e}", section.kind())))
}

/// Render sections in order, concatenating their regions.
pub fn render_sections(sections: &[Section], options: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    for section in sections {
        out.push_str(&render_section(section, options)?);
        out.push('\n');
    }
    tracing::debug!(count = sections.len(), "rendered sections");
    Ok(out)
}

/// Parse an encoded `content_sections` string and render it.
///
/// A malformed list is an error; nothing is rendered from it.
pub fn render_content_sections(raw: &str, options: &RenderOptions) -> Result<String> {
    let sections = parse_sections(raw, options.policy)?;
    render_sections(&sections, options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use folio_model::{
        LinkItem, NewsArticle, NewsSection, Project, ProjectHighlights, Stat, StatsSection,
    };

    fn stats() -> Section {
        Section::StatsSection(StatsSection {
            title: None,
            stats: vec![Stat {
                number: "500+".into(),
                label: "Users".into(),
                description: None,
            }],
        })
    }

    #[test]
    fn test_stats_example_renders_one_box() {
        let raw = r#"[{"type":"stats_section","value":{"stats":[{"number":"500+","label":"Users"}]}}]"#;
        let html = render_content_sections(raw, &RenderOptions::default()).unwrap();

        assert_eq!(html.matches(r#"class="stat-box""#).count(), 1);
        assert!(html.contains("500+"));
        assert!(html.contains("Users"));
        assert!(html.contains(r#"data-section-type="stats_section""#));
    }

    #[test]
    fn test_sections_render_in_order_and_unknown_is_skipped() {
        let raw = r#"[
            {"type":"news_section","value":{"section_title":"News","articles":[]}},
            {"type":"carousel","value":{"slides":[]}},
            {"type":"stats_section","value":{"stats":[]}}
        ]"#;
        let html = render_content_sections(raw, &RenderOptions::default()).unwrap();

        assert_eq!(html.matches("cms-section--").count(), 2);
        let news = html.find("cms-section--news").unwrap();
        let stats = html.find("cms-section--stats").unwrap();
        assert!(news < stats);
        assert!(!html.contains("carousel"));
    }

    #[test]
    fn test_malformed_sections_render_nothing() {
        let err = render_content_sections("[{\"type\":", &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::SectionParse(_)));
    }

    #[test]
    fn test_empty_sections_render_empty() {
        assert_eq!(render_content_sections("", &RenderOptions::default()).unwrap(), "");
        assert_eq!(render_sections(&[], &RenderOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_text_fields_are_escaped() {
        let section = Section::StatsSection(StatsSection {
            title: Some("<script>x</script>".into()),
            stats: vec![],
        });
        let html = render_section(&section, &RenderOptions::default()).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_custom_html_is_sanitized_by_default() {
        let section = Section::CustomHtml("<p>ok</p><script>alert(1)</script>".into());
        let html = render_section(&section, &RenderOptions::default()).unwrap();
        assert!(html.contains("<p>ok</p>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_custom_html_trusted_is_verbatim() {
        let section = Section::CustomHtml("<div onclick=\"go()\">hi</div>".into());
        let options = RenderOptions::default().with_trusted_custom_html(true);
        let html = render_section(&section, &options).unwrap();
        assert!(html.contains("<div onclick=\"go()\">hi</div>"));
    }

    #[test]
    fn test_javascript_links_are_blocked() {
        let section = Section::LinksSection(folio_model::LinksSection {
            title: Some("Elsewhere".into()),
            links: vec![LinkItem {
                url: "javascript:alert(1)".into(),
                title: "Click".into(),
                icon: None,
                description: None,
            }],
        });
        let html = render_section(&section, &RenderOptions::default()).unwrap();
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript"));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_news_dates_are_formatted() {
        let section = Section::NewsSection(NewsSection {
            section_title: "Latest".into(),
            articles: vec![NewsArticle {
                image: None,
                title: "Launch".into(),
                summary: "We launched.".into(),
                date: "2024-03-15".into(),
                category: Some("Company".into()),
                link_url: None,
            }],
        });
        let html = render_section(&section, &RenderOptions::default()).unwrap();
        assert!(html.contains("March 15, 2024"));
        assert!(html.contains("Company"));
    }

    #[test]
    fn test_project_defaults_link_text() {
        let section = Section::ProjectHighlights(ProjectHighlights {
            section_title: "Work".into(),
            projects: vec![Project {
                image: None,
                title: "Atlas".into(),
                description: "Maps".into(),
                tags: vec!["rust".into(), "gis".into()],
                link_url: Some("https://example.com".into()),
                link_text: None,
            }],
        });
        let html = render_section(&section, &RenderOptions::default()).unwrap();
        assert!(html.contains("View project"));
        assert_eq!(html.matches("project-card__tag\"").count(), 2);
    }

    #[test]
    fn test_content_box_rich_text_is_sanitized() {
        let raw = r#"[{"type":"content_boxes","value":{"boxes":[
            {"title":"Why","content":"<p>Fast</p><img src=x onerror=alert(1)>"}
        ]}}]"#;
        let html = render_content_sections(raw, &RenderOptions::default()).unwrap();
        assert!(html.contains("<p>Fast</p>"));
        assert!(!html.contains("onerror"));
        assert!(!html.contains("content-box__link"));
    }

    #[test]
    fn test_link_icon_and_description() {
        let section = Section::LinksSection(folio_model::LinksSection {
            title: None,
            links: vec![
                LinkItem {
                    url: "https://example.com".into(),
                    title: "Docs".into(),
                    icon: Some("book".into()),
                    description: Some("Guides and reference".into()),
                },
                LinkItem {
                    url: "https://example.com".into(),
                    title: "Plain".into(),
                    icon: None,
                    description: None,
                },
            ],
        });
        let html = render_section(&section, &RenderOptions::default()).unwrap();
        assert!(html.contains(r#"<span class="link-item__icon">book</span>"#));
        assert!(html.contains(r#"<p class="link-item__description">Guides and reference</p>"#));
        assert_eq!(html.matches("link-item__icon").count(), 1);
        assert_eq!(html.matches("link-item__description").count(), 1);
    }

    #[test]
    fn test_stat_description() {
        let section = Section::StatsSection(StatsSection {
            title: None,
            stats: vec![Stat {
                number: "99%".into(),
                label: "Uptime".into(),
                description: Some("Over the last year".into()),
            }],
        });
        let html = render_section(&section, &RenderOptions::default()).unwrap();
        assert!(html.contains(r#"<p class="stat-description">Over the last year</p>"#));

        let plain = render_section(&stats(), &RenderOptions::default()).unwrap();
        assert!(!plain.contains("stat-description"));
    }

    #[test]
    fn test_image_alt_prefers_cms_alt_text() {
        let raw = r#"[{"type":"project_highlights","value":{"section_title":"Work","projects":[
            {"title":"Atlas","description":"Maps","image":{"url":"atlas.png","alt":"Atlas screenshot"}},
            {"title":"Beacon","description":"Alerts","image":"beacon.png"}
        ]}}]"#;
        let html = render_content_sections(raw, &RenderOptions::default()).unwrap();
        assert!(html.contains(r#"alt="Atlas screenshot""#));
        assert!(html.contains(r#"alt="Beacon""#));
    }

    #[test]
    fn test_render_sections_concatenates() {
        let html = render_sections(&[stats(), stats()], &RenderOptions::default()).unwrap();
        assert_eq!(html.matches(r#"class="stat-box""#).count(), 2);
    }
}
