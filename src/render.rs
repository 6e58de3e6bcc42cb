//! Document rendering.
//!
//! Turns a parsed [`Document`] into HTML. Markdown chunks go through
//! pulldown-cmark; containers and widgets are rendered with maud.
//!
//! ## Overlays
//!
//! Widgets that open full screen (comparison carousels, mockups, videos,
//! timeline images) never emit their overlay inline. The overlay markup is
//! attached to an [`OverlaySurface`], which the page template places as a
//! direct child of `<body>` (`#overlay-root`). The widget only carries a
//! `data-overlay` reference to it. An overlay therefore never sits inside a
//! transformed or clipped ancestor.
//!
//! ## Initial state
//!
//! Stateful widgets are built from the controllers in [`crate::interaction`]
//! and rendered in their mount state: active slide, dot `aria-current`,
//! timeline emphasis classes, autoplay interval. `static/widgets.js` picks up
//! from there in the browser.
//!
//! ## Media paths
//!
//! References starting with `./` are resolved against the project's media
//! directory (`/projects/<slug>/`). Everything else is used as written.

use crate::blocks::{
    Compare, ComparisonPair, HeroImage, HeroVideo, Kpi, MockupImage, Quotes, Timeline, VideoEmbed,
    VideoModal,
};
use crate::config::WidgetConfig;
use crate::document::{Block, Document, Widget};
use crate::interaction::widgets::{CompareCarousel, QuoteRotator, TimelineWidget};
use crate::interaction::{BackdropAction, Host, SlideSet};
use crate::video::{Playback, VideoSource};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Event, Options, Parser, Tag, html as md_html};
use std::time::Duration;

/// Render target for overlay markup, emitted once per page as
/// `<div id="overlay-root">`.
#[derive(Debug, Default)]
pub struct OverlaySurface {
    layers: Vec<Markup>,
}

impl OverlaySurface {
    pub fn attach(&mut self, layer: Markup) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn render(&self) -> Markup {
        html! {
            div id="overlay-root" {
                @for layer in &self.layers {
                    (layer)
                }
            }
        }
    }
}

/// Renders documents for one page.
///
/// Holds the page's overlay surface and the controller host, so one renderer
/// should be used per page.
pub struct Renderer<'a> {
    media_base: Option<String>,
    widgets: &'a WidgetConfig,
    host: Host,
    surface: OverlaySurface,
    next_overlay: usize,
}

impl<'a> Renderer<'a> {
    /// `media_base` is the site path `./` references resolve to, e.g.
    /// `/projects/redaction-studio`.
    pub fn new(media_base: Option<String>, widgets: &'a WidgetConfig) -> Self {
        Self {
            media_base: media_base.map(|b| b.trim_end_matches('/').to_string()),
            widgets,
            host: Host::new(),
            surface: OverlaySurface::default(),
            next_overlay: 0,
        }
    }

    pub fn render_document(&mut self, document: &Document) -> Markup {
        self.render_blocks(&document.blocks)
    }

    /// Hand over the collected overlays.
    pub fn finish(self) -> OverlaySurface {
        debug_assert!(!self.host.scroll_locked(), "overlays render closed");
        self.surface
    }

    /// Resolve a media reference against the project directory.
    pub fn resolve(&self, src: &str) -> String {
        match (src.strip_prefix("./"), &self.media_base) {
            (Some(rest), Some(base)) => format!("{base}/{rest}"),
            _ => src.to_string(),
        }
    }

    fn render_blocks(&mut self, blocks: &[Block]) -> Markup {
        html! {
            @for block in blocks {
                (self.render_block(block))
            }
        }
    }

    fn render_block(&mut self, block: &Block) -> Markup {
        match block {
            Block::Markdown { source } => self.markdown(source),
            Block::Section { title, children } => {
                let body = self.render_blocks(children);
                html! {
                    section.doc-section {
                        h2.section-title { (title) }
                        div.section-body { (body) }
                    }
                }
            }
            Block::KpiGroup { children } => {
                let body = self.render_blocks(children);
                html! { div.kpi-group { (body) } }
            }
            Block::Widget { widget } => self.render_widget(widget),
        }
    }

    fn render_widget(&mut self, widget: &Widget) -> Markup {
        match widget {
            Widget::HeroImage(hero) => self.hero_image(hero),
            Widget::HeroVideo(hero) => self.hero_video(hero),
            Widget::Kpi(kpi) => kpi_card(kpi),
            Widget::Compare(compare) => self.compare(compare),
            Widget::Quotes(quotes) => self.quotes(quotes),
            Widget::Image(image) => self.mockup(image),
            Widget::Video(video) => self.video_embed(video),
            Widget::VideoModal(modal) => self.video_modal(modal),
            Widget::Timeline(timeline) => self.timeline(timeline),
        }
    }

    // ========================================================================
    // Markdown
    // ========================================================================

    pub fn markdown(&self, source: &str) -> Markup {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_SMART_PUNCTUATION;
        let events = Parser::new_ext(source, options).map(|event| match event {
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: self.resolve(&dest_url).into(),
                title,
                id,
            }),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: self.resolve(&dest_url).into(),
                title,
                id,
            }),
            other => other,
        });
        let mut out = String::new();
        md_html::push_html(&mut out, events);
        html! { div.prose { (PreEscaped(out)) } }
    }

    // ========================================================================
    // Overlay plumbing
    // ========================================================================

    /// Attach an overlay to the surface and return its element id.
    fn overlay(&mut self, label: &str, backdrop: BackdropAction, body: Markup) -> String {
        self.next_overlay += 1;
        let id = format!("overlay-{}", self.next_overlay);
        let backdrop = match backdrop {
            BackdropAction::Close => "close",
            BackdropAction::Advance => "advance",
        };
        self.surface.attach(html! {
            div.overlay id=(id) hidden role="dialog" aria-modal="true" aria-label=(label) data-backdrop=(backdrop) {
                button.overlay-close type="button" data-action="close" aria-label="Close" { "×" }
                (body)
            }
        });
        id
    }

    fn player_overlay(&mut self, label: &str, playback: &Playback) -> String {
        let body = html! {
            div.overlay-panel.overlay-player {
                (player(playback))
            }
        };
        self.overlay(label, BackdropAction::Close, body)
    }

    // ========================================================================
    // Hero
    // ========================================================================

    fn hero_image(&self, hero: &HeroImage) -> Markup {
        html! {
            figure.hero-image {
                img src=(self.resolve(&hero.src)) alt=(hero.alt);
                @if let Some(tagline) = &hero.tagline {
                    figcaption.hero-tagline { (tagline) }
                }
            }
        }
    }

    fn hero_video(&mut self, hero: &HeroVideo) -> Markup {
        let Some((source, background)) = VideoSource::parse(&hero.url)
            .and_then(|s| s.background_url().map(|bg| (s, bg)))
        else {
            return unsupported_video(&hero.url);
        };
        let label = hero.title.as_deref().unwrap_or("Video");
        let overlay = self.player_overlay(label, &Playback::Embed(source));
        let shade = format!("--overlay-opacity: {:.2}", f64::from(hero.overlay_opacity) / 100.0);
        html! {
            div.hero-video data-widget="media" data-overlay=(overlay) style=(shade) {
                iframe.hero-video-bg src=(background) allow="autoplay; fullscreen" tabindex="-1" aria-hidden="true" title="" {}
                div.hero-video-shade {}
                div.hero-video-content {
                    @if let Some(title) = &hero.title {
                        h2.hero-video-title { (title) }
                    }
                    @if let Some(caption) = &hero.caption {
                        p.hero-video-caption { (caption) }
                    }
                    button.play-button type="button" data-action="open" { "Watch video" }
                }
            }
        }
    }

    // ========================================================================
    // Comparison carousel
    // ========================================================================

    fn compare(&mut self, compare: &Compare) -> Markup {
        let Some(pairs) = SlideSet::new(compare.pairs.clone()) else {
            return html! {};
        };
        let interval = compare.interval_ms.unwrap_or(self.widgets.compare_interval_ms);
        let widget = CompareCarousel::new(pairs, Duration::from_millis(interval), &self.host, Duration::ZERO);
        let state = widget.state();
        let count = widget.pairs().len().get();

        let stage = html! {
            div.overlay-stage {
                @for (i, pair) in widget.pairs().iter().enumerate() {
                    div.overlay-slide data-index=(i) hidden[i != state.current] {
                        (self.pair_images(pair))
                    }
                }
            }
            div.overlay-panel.compare-detail {
                @for (i, pair) in widget.pairs().iter().enumerate() {
                    div.compare-detail-slide data-index=(i) hidden[i != state.current] {
                        (pair_info(compare, i, pair))
                    }
                }
            }
        };
        let fullscreen = self.overlay("Comparison", BackdropAction::Advance, stage);

        let has_video = widget.pairs().iter().any(|p| p.video_url.is_some());
        let video_overlay = has_video.then(|| {
            let body = html! {
                div.overlay-panel.overlay-player {
                    video controls playsinline preload="none" data-role="player" {}
                }
            };
            self.overlay("Demo video", BackdropAction::Close, body)
        });

        html! {
            div.compare data-widget="compare" data-interval=(interval) data-count=(count)
                data-current=(state.current) data-overlay=(fullscreen) data-video-overlay=[video_overlay] {
                div.compare-stage {
                    button.compare-nav.compare-prev type="button" data-action="prev" aria-label="Previous comparison" { "‹" }
                    @for (i, pair) in widget.pairs().iter().enumerate() {
                        div.compare-slide.is-active[i == state.current] data-index=(i) hidden[i != state.current] {
                            button.compare-zoom type="button" data-action="fullscreen" aria-label="View full screen" {
                                (self.pair_images(pair))
                            }
                            div.compare-info {
                                (pair_info(compare, i, pair))
                                @if let Some(url) = &pair.video_url {
                                    button.compare-video type="button" data-action="video" data-video=(VideoSource::direct(url)) { "Watch demo" }
                                }
                            }
                        }
                    }
                    button.compare-nav.compare-next type="button" data-action="next" aria-label="Next comparison" { "›" }
                }
                @if count > 1 {
                    (dots("compare-dots", "Go to comparison", count, state.current))
                }
            }
        }
    }

    fn pair_images(&self, pair: &ComparisonPair) -> Markup {
        html! {
            div.compare-images {
                figure.compare-before {
                    img src=(self.resolve(&pair.before)) alt="Before" loading="lazy";
                    figcaption { "Before" }
                }
                figure.compare-after {
                    img src=(self.resolve(&pair.after)) alt="After" loading="lazy";
                    figcaption { "After" }
                }
            }
        }
    }

    // ========================================================================
    // Quotes
    // ========================================================================

    fn quotes(&self, quotes: &Quotes) -> Markup {
        let Some(set) = SlideSet::new(quotes.quotes.clone()) else {
            return html! {};
        };
        let interval = quotes.interval_ms.unwrap_or(self.widgets.quote_interval_ms);
        let rotator = QuoteRotator::new(set, Duration::from_millis(interval), Duration::ZERO);
        let current = rotator.state().current;
        let count = rotator.quotes().len().get();
        html! {
            div.quotes data-widget="quotes" data-interval=(interval) data-count=(count)
                data-current=(current) data-fade-ms=(QuoteRotator::FADE.as_millis() as u64) {
                div.quote-body.is-visible {
                    @for (i, quote) in rotator.quotes().iter().enumerate() {
                        blockquote.quote data-index=(i) hidden[i != current] {
                            p.quote-text { "“" (quote.quote) "”" }
                            cite.quote-source { "— " (quote.source) }
                        }
                    }
                }
                @if count > 1 {
                    (dots("quote-dots", "Go to quote", count, current))
                }
            }
        }
    }

    // ========================================================================
    // Single media
    // ========================================================================

    fn mockup(&mut self, image: &MockupImage) -> Markup {
        let src = self.resolve(&image.src);
        let body = html! {
            div.overlay-panel.overlay-image {
                img src=(src) alt=(image.alt);
                @if let Some(caption) = &image.caption {
                    p.overlay-caption { (caption) }
                }
            }
        };
        let overlay = self.overlay(&image.alt, BackdropAction::Close, body);
        html! {
            figure.mockup data-widget="media" data-overlay=(overlay) {
                button.mockup-open type="button" data-action="open" aria-label="View full size" {
                    img src=(src) alt=(image.alt) loading="lazy";
                }
                @if let Some(caption) = &image.caption {
                    figcaption { (caption) }
                }
            }
        }
    }

    fn video_embed(&mut self, video: &VideoEmbed) -> Markup {
        let Some(source) = VideoSource::parse(&video.url) else {
            return unsupported_video(&video.url);
        };
        let poster = video
            .thumbnail
            .as_deref()
            .map(|t| self.resolve(t))
            .or_else(|| source.default_thumbnail());
        let badge = source.provider.label();
        let label = video.title.as_deref().unwrap_or(badge);
        let overlay = self.player_overlay(label, &Playback::Embed(source));
        html! {
            figure.video-embed data-widget="media" data-overlay=(overlay) {
                button.video-poster type="button" data-action="open" aria-label={ "Play " (label) } {
                    (poster_image(poster.as_deref(), label))
                    span.play-icon aria-hidden="true" { "▶" }
                    span.provider-badge { (badge) }
                }
                (caption_block(video.title.as_deref(), video.caption.as_deref()))
            }
        }
    }

    fn video_modal(&mut self, modal: &VideoModal) -> Markup {
        let playback = match Playback::resolve(&modal.video_url) {
            Playback::File(url) => Playback::File(self.resolve(&url)),
            embed => embed,
        };
        let thumbnail = self.resolve(&modal.thumbnail);
        let label = modal.caption.as_deref().unwrap_or("Video");
        let overlay = self.player_overlay(label, &playback);
        html! {
            figure.video-modal data-widget="media" data-overlay=(overlay) {
                button.video-poster type="button" data-action="open" aria-label={ "Play " (label) } {
                    (poster_image(Some(&thumbnail), label))
                    span.play-icon aria-hidden="true" { "▶" }
                }
                (caption_block(None, modal.caption.as_deref()))
            }
        }
    }

    // ========================================================================
    // Timeline
    // ========================================================================

    fn timeline(&mut self, timeline: &Timeline) -> Markup {
        let Some(nodes) = SlideSet::new(timeline.nodes.clone()) else {
            return html! {};
        };
        let widget = TimelineWidget::new(nodes, &self.host);
        let has_images = widget.nodes().iter().any(|n| n.image.is_some());
        let overlay = has_images.then(|| {
            let body = html! {
                div.overlay-panel.overlay-image {
                    img data-role="viewer" alt="";
                }
            };
            self.overlay("Timeline image", BackdropAction::Close, body)
        });

        html! {
            div.timeline data-widget="timeline" data-overlay=[overlay] {
                ol.timeline-nodes {
                    @for (i, node) in widget.nodes().iter().enumerate() {
                        li class={ "timeline-node " (widget.emphasis(i).class()) } data-index=(i) {
                            span.timeline-year { (node.year) }
                            div.timeline-card {
                                @if let Some(image) = &node.image {
                                    button.timeline-image type="button" data-action="open" data-image=(self.resolve(image)) aria-label={ "View image for " (node.title) } {
                                        img src=(self.resolve(image)) alt=(node.title) loading="lazy";
                                    }
                                }
                                h3.timeline-title { (node.title) }
                                p.timeline-description { (node.description) }
                                @if !node.details.is_empty() {
                                    dl.timeline-details {
                                        @for detail in &node.details {
                                            dt { (detail.label) }
                                            dd { (detail.value) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Stateless fragments
// ============================================================================

fn kpi_card(kpi: &Kpi) -> Markup {
    html! {
        div.kpi {
            div.kpi-metric { (kpi.metric) }
            div.kpi-label { (kpi.label) }
        }
    }
}

fn pair_info(compare: &Compare, index: usize, pair: &ComparisonPair) -> Markup {
    html! {
        @if let Some((part, of)) = compare.group_part(index) {
            span.compare-part { "Part " (part) "/" (of) }
        }
        @if let Some(title) = &pair.title {
            h3.compare-title { (title) }
        }
        @if let Some(description) = &pair.description {
            p.compare-description { (description) }
        }
        @if !pair.details.is_empty() {
            ul.compare-details {
                @for item in &pair.details {
                    li {
                        @match split_detail(item) {
                            (Some(label), text) => { strong { (label) ":" } " " (text) }
                            (None, text) => { (text) }
                        }
                    }
                }
            }
        }
        @if let Some(rationale) = &pair.rationale {
            p.compare-rationale { (rationale) }
        }
    }
}

/// Split a `"Label: text"` detail into its bold label and body.
pub fn split_detail(item: &str) -> (Option<&str>, &str) {
    match item.split_once(':') {
        Some((label, text)) if !label.trim().is_empty() => (Some(label.trim()), text.trim()),
        _ => (None, item),
    }
}

fn dots(class: &str, label: &str, count: usize, current: usize) -> Markup {
    html! {
        div class=(class) {
            @for i in 0..count {
                button.dot.is-active[i == current] type="button" data-action="go" data-index=(i)
                    aria-label={ (label) " " (i + 1) } aria-current=[(i == current).then_some("true")] {}
            }
        }
    }
}

fn player(playback: &Playback) -> Markup {
    match playback {
        Playback::Embed(source) => html! {
            iframe data-src=(source.embed_url()) title=(source.provider.label())
                allow="autoplay; fullscreen; picture-in-picture" allowfullscreen {}
        },
        Playback::File(url) => html! {
            video controls playsinline preload="none" data-src=(url) {}
        },
    }
}

fn poster_image(src: Option<&str>, alt: &str) -> Markup {
    html! {
        @match src {
            Some(src) => { img src=(src) alt=(alt) loading="lazy"; }
            None => { div.video-placeholder {} }
        }
    }
}

fn caption_block(title: Option<&str>, caption: Option<&str>) -> Markup {
    html! {
        @if title.is_some() || caption.is_some() {
            figcaption {
                @if let Some(title) = title {
                    strong { (title) }
                }
                @if let Some(caption) = caption {
                    span { (caption) }
                }
            }
        }
    }
}

fn unsupported_video(url: &str) -> Markup {
    html! {
        div.video-unsupported {
            p { "Unsupported video URL" }
            a href=(url) target="_blank" rel="noopener noreferrer" { (url) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::count;

    fn render(src: &str) -> (String, OverlaySurface) {
        let widgets = WidgetConfig::default();
        let document = Document::parse(src, 1).unwrap();
        let mut renderer = Renderer::new(Some("/projects/demo".to_string()), &widgets);
        let html = renderer.render_document(&document).into_string();
        (html, renderer.finish())
    }

    const COMPARE: &str = "\
```compare
[[pairs]]
before = \"./b1.png\"
after = \"./a1.png\"
title = \"Toolbar\"
group = \"nav\"
details = [\"Clarity: one icon per action\", \"plain bullet\"]

[[pairs]]
before = \"./b2.png\"
after = \"./a2.png\"
group = \"nav\"
video_url = \"https://www.dropbox.com/s/x/demo.mp4?dl=0\"

[[pairs]]
before = \"/abs/b3.png\"
after = \"/abs/a3.png\"
```
";

    #[test]
    fn markdown_resolves_relative_media() {
        let (html, _) = render("![shot](./shot.png) [doc](./brief.pdf) ![ext](https://x.test/a.png)\n");
        assert!(html.contains(r#"src="/projects/demo/shot.png""#));
        assert!(html.contains(r#"href="/projects/demo/brief.pdf""#));
        assert!(html.contains(r#"src="https://x.test/a.png""#));
    }

    #[test]
    fn compare_renders_initial_state() {
        let (html, surface) = render(COMPARE);
        assert!(html.contains(r#"data-interval="6000""#));
        assert!(html.contains(r#"data-count="3""#));
        assert!(html.contains(r#"data-current="0""#));
        assert_eq!(count(&html, r#"aria-current="true""#), 1);
        assert_eq!(count(&html, "compare-slide is-active"), 1);
        assert!(html.contains("Part 1/2"));
        assert!(html.contains("<strong>Clarity:</strong> one icon per action"));
        assert!(html.contains(r#"src="/projects/demo/b1.png""#));
        assert!(html.contains(r#"data-video="https://www.dropbox.com/s/x/demo.mp4?raw=1""#));
        // full screen + demo video overlays
        assert_eq!(surface.len(), 2);
    }

    #[test]
    fn compare_interval_override() {
        let (html, _) = render("```compare\ninterval_ms = 3000\n[[pairs]]\nbefore = \"b\"\nafter = \"a\"\n```\n");
        assert!(html.contains(r#"data-interval="3000""#));
        assert!(!html.contains("compare-dots"), "single pair has no dots");
    }

    #[test]
    fn overlays_are_not_inline() {
        let (html, surface) = render(COMPARE);
        assert!(!html.contains("class=\"overlay\""));
        let root = surface.render().into_string();
        assert!(root.starts_with(r#"<div id="overlay-root">"#));
        assert!(root.contains(r#"data-backdrop="advance""#));
        assert_eq!(count(&root, r#"class="overlay""#), 2);
        assert_eq!(count(&root, r#"aria-modal="true""#), 2);
    }

    #[test]
    fn quotes_render_first_quote_visible() {
        let (html, surface) = render(
            "```quotes\n[[quotes]]\nquote = \"Fast\"\nsource = \"PM\"\n[[quotes]]\nquote = \"Clear\"\nsource = \"Ops\"\n```\n",
        );
        assert!(html.contains(r#"data-interval="5500""#));
        assert!(html.contains(r#"data-fade-ms="100""#));
        assert!(html.contains("“Fast”"));
        assert_eq!(count(&html, "<blockquote"), 2);
        assert!(surface.is_empty());
    }

    #[test]
    fn timeline_nodes_start_neutral() {
        let (html, surface) = render(
            "```timeline\n[[nodes]]\nyear = \"2021\"\ntitle = \"Pilot\"\ndescription = \"d\"\nimage = \"./pilot.png\"\n[[nodes.details]]\nlabel = \"Users\"\nvalue = \"40\"\n\n[[nodes]]\nyear = \"2022\"\ntitle = \"Launch\"\ndescription = \"d\"\n```\n",
        );
        assert_eq!(count(&html, "timeline-node is-neutral"), 2);
        assert!(html.contains(r#"data-image="/projects/demo/pilot.png""#));
        assert!(html.contains("<dt>Users</dt><dd>40</dd>"));
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn unsupported_video_falls_back() {
        let (html, surface) = render("```video\nurl = \"https://example.com/clip\"\n```\n");
        assert!(html.contains("Unsupported video URL"));
        assert!(html.contains(r#"href="https://example.com/clip""#));
        assert!(surface.is_empty());

        let (html, _) = render("```hero-video\nurl = \"https://www.loom.com/share/abc\"\n```\n");
        assert!(html.contains("Unsupported video URL"), "loom has no background mode");
    }

    #[test]
    fn video_embed_uses_provider_thumbnail() {
        let (html, surface) = render("```video\nurl = \"https://youtu.be/dQw4w9WgXcQ\"\ntitle = \"Walkthrough\"\n```\n");
        assert!(html.contains("img.youtube.com/vi/dQw4w9WgXcQ"));
        assert!(html.contains("YouTube"));
        let root = surface.render().into_string();
        assert!(root.contains(r#"data-src="https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&amp;rel=0""#));
    }

    #[test]
    fn video_modal_plays_files_and_embeds() {
        let (_, surface) = render("```video-modal\nthumbnail = \"./poster.png\"\nvideo_url = \"./demo.mp4\"\n```\n");
        let root = surface.render().into_string();
        assert!(root.contains(r#"<video controls playsinline preload="none" data-src="/projects/demo/demo.mp4">"#));

        let (_, surface) = render("```video-modal\nthumbnail = \"p.png\"\nvideo_url = \"https://vimeo.com/42\"\n```\n");
        assert!(surface.render().into_string().contains("player.vimeo.com/video/42"));
    }

    #[test]
    fn hero_video_background_and_opacity() {
        let (html, _) = render("```hero-video\nurl = \"https://vimeo.com/42\"\noverlay_opacity = 35\n```\n");
        assert!(html.contains("background=1"));
        assert!(html.contains("--overlay-opacity: 0.35"));
    }

    #[test]
    fn sections_and_kpi_groups() {
        let (html, _) = render(
            "::: section Results\n::: kpi-group\n```kpi\nmetric = \"70%\"\nlabel = \"Faster\"\n```\n:::\n:::\n",
        );
        assert!(html.contains(r#"<h2 class="section-title">Results</h2>"#));
        assert!(html.contains(r#"<div class="kpi-group"><div class="kpi">"#));
    }

    #[test]
    fn overlay_ids_unique_per_page() {
        let (_, surface) = render("```image\nsrc = \"a.png\"\nalt = \"A\"\n```\n```image\nsrc = \"b.png\"\nalt = \"B\"\n```\n");
        let root = surface.render().into_string();
        assert!(root.contains(r#"id="overlay-1""#));
        assert!(root.contains(r#"id="overlay-2""#));
    }

    #[test]
    fn detail_split() {
        assert_eq!(split_detail("Speed: 70% faster"), (Some("Speed"), "70% faster"));
        assert_eq!(split_detail("no label"), (None, "no label"));
        assert_eq!(split_detail(": odd"), (None, ": odd"));
    }

    #[test]
    fn content_is_escaped() {
        let (html, _) = render("```kpi\nmetric = \"<b>1</b>\"\nlabel = \"x\"\n```\n");
        assert!(html.contains("&lt;b&gt;1&lt;/b&gt;"));
    }
}
