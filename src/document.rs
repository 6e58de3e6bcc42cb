//! Document body parsing into the block vocabulary.
//!
//! A body is CommonMark with two extensions:
//!
//! - **Widget blocks**: a fenced code block whose info string names a widget.
//!   The fence body is a TOML table for that widget (see [`crate::blocks`]).
//!
//!   ````text
//!   ```kpi
//!   metric = "70%"
//!   label = "Faster redaction"
//!   ```
//!   ````
//!
//! - **Containers**: `::: section <title>` and `::: kpi-group` open a
//!   container, a bare `:::` closes the innermost one. Containers nest and
//!   may hold markdown, widgets, and other containers.
//!
//! Ordinary code fences (any other info string) are left to the markdown
//! renderer, and `:::` lines inside them are not treated as directives.

use crate::blocks::{
    Compare, HeroImage, HeroVideo, Kpi, MockupImage, Quotes, Timeline, VideoEmbed, VideoModal,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("line {line}: `{name}` block: {source}")]
    Widget {
        line: usize,
        name: &'static str,
        source: toml::de::Error,
    },
    #[error("line {line}: `{name}` block: {reason}")]
    Invalid {
        line: usize,
        name: &'static str,
        reason: String,
    },
    #[error("line {line}: `{name}` block is never closed")]
    UnterminatedWidget { line: usize, name: &'static str },
    #[error("line {line}: unknown container `{name}`")]
    UnknownContainer { line: usize, name: String },
    #[error("line {line}: `:::` closes nothing")]
    UnbalancedClose { line: usize },
    #[error("line {line}: `{name}` container is never closed")]
    UnclosedContainer { line: usize, name: &'static str },
    #[error("line {line}: section needs a title")]
    MissingSectionTitle { line: usize },
}

/// A parsed document body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    Markdown { source: String },
    Section { title: String, children: Vec<Block> },
    KpiGroup { children: Vec<Block> },
    Widget { widget: Widget },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Widget {
    HeroImage(HeroImage),
    HeroVideo(HeroVideo),
    Kpi(Kpi),
    Compare(Compare),
    Quotes(Quotes),
    Image(MockupImage),
    Video(VideoEmbed),
    VideoModal(VideoModal),
    Timeline(Timeline),
}

impl Widget {
    /// Info-string name of the widget in a document.
    pub fn name(&self) -> &'static str {
        match self {
            Widget::HeroImage(_) => "hero-image",
            Widget::HeroVideo(_) => "hero-video",
            Widget::Kpi(_) => "kpi",
            Widget::Compare(_) => "compare",
            Widget::Quotes(_) => "quotes",
            Widget::Image(_) => "image",
            Widget::Video(_) => "video",
            Widget::VideoModal(_) => "video-modal",
            Widget::Timeline(_) => "timeline",
        }
    }
}

const WIDGET_NAMES: &[&str] = &[
    "hero-image",
    "hero-video",
    "kpi",
    "compare",
    "quotes",
    "image",
    "video",
    "video-modal",
    "timeline",
];

impl Document {
    /// Parse a document body. `first_line` is the 1-based line number of the
    /// body's first line in the source file, so errors point at the file.
    pub fn parse(body: &str, first_line: usize) -> Result<Self, DocumentError> {
        let mut parser = Parser {
            stack: Vec::new(),
            root: Vec::new(),
            markdown: String::new(),
        };
        let mut lines = body.lines().enumerate().map(|(i, l)| (i + first_line, l));

        while let Some((line_no, line)) = lines.next() {
            if let Some(fence) = Fence::open(line) {
                if let Some(&name) = WIDGET_NAMES.iter().find(|&&n| n == fence.info) {
                    let mut source = String::new();
                    let mut closed = false;
                    for (_, inner) in lines.by_ref() {
                        if fence.closes(inner) {
                            closed = true;
                            break;
                        }
                        source.push_str(inner);
                        source.push('\n');
                    }
                    if !closed {
                        return Err(DocumentError::UnterminatedWidget { line: line_no, name });
                    }
                    let widget = parse_widget(name, &source, line_no)?;
                    parser.push_block(Block::Widget { widget });
                } else {
                    // Ordinary code: copy through untouched, directives included.
                    parser.push_line(line);
                    for (_, inner) in lines.by_ref() {
                        parser.push_line(inner);
                        if fence.closes(inner) {
                            break;
                        }
                    }
                }
                continue;
            }

            match Directive::parse(line) {
                Some(Directive::Close) => parser.close(line_no)?,
                Some(Directive::Open(name, arg)) => parser.open(name, arg, line_no)?,
                None => parser.push_line(line),
            }
        }

        parser.finish()
    }

    /// All widgets in document order, descending into containers.
    pub fn widgets(&self) -> Vec<&Widget> {
        fn walk<'a>(blocks: &'a [Block], out: &mut Vec<&'a Widget>) {
            for block in blocks {
                match block {
                    Block::Widget { widget } => out.push(widget),
                    Block::Section { children, .. } | Block::KpiGroup { children } => {
                        walk(children, out)
                    }
                    Block::Markdown { .. } => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.blocks, &mut out);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ContainerKind {
    Section,
    KpiGroup,
}

impl ContainerKind {
    fn name(self) -> &'static str {
        match self {
            ContainerKind::Section => "section",
            ContainerKind::KpiGroup => "kpi-group",
        }
    }
}

struct OpenContainer {
    kind: ContainerKind,
    title: String,
    line: usize,
    children: Vec<Block>,
}

struct Parser {
    stack: Vec<OpenContainer>,
    root: Vec<Block>,
    markdown: String,
}

impl Parser {
    fn target(&mut self) -> &mut Vec<Block> {
        match self.stack.last_mut() {
            Some(open) => &mut open.children,
            None => &mut self.root,
        }
    }

    fn flush_markdown(&mut self) {
        if self.markdown.trim().is_empty() {
            self.markdown.clear();
            return;
        }
        let source = std::mem::take(&mut self.markdown);
        self.target().push(Block::Markdown { source });
    }

    fn push_line(&mut self, line: &str) {
        self.markdown.push_str(line);
        self.markdown.push('\n');
    }

    fn push_block(&mut self, block: Block) {
        self.flush_markdown();
        self.target().push(block);
    }

    fn open(&mut self, name: &str, arg: &str, line: usize) -> Result<(), DocumentError> {
        let kind = match name {
            "section" => ContainerKind::Section,
            "kpi-group" => ContainerKind::KpiGroup,
            other => {
                return Err(DocumentError::UnknownContainer {
                    line,
                    name: other.to_string(),
                });
            }
        };
        if kind == ContainerKind::Section && arg.is_empty() {
            return Err(DocumentError::MissingSectionTitle { line });
        }
        self.flush_markdown();
        self.stack.push(OpenContainer {
            kind,
            title: arg.to_string(),
            line,
            children: Vec::new(),
        });
        Ok(())
    }

    fn close(&mut self, line: usize) -> Result<(), DocumentError> {
        self.flush_markdown();
        let open = self
            .stack
            .pop()
            .ok_or(DocumentError::UnbalancedClose { line })?;
        let block = match open.kind {
            ContainerKind::Section => Block::Section {
                title: open.title,
                children: open.children,
            },
            ContainerKind::KpiGroup => Block::KpiGroup {
                children: open.children,
            },
        };
        self.target().push(block);
        Ok(())
    }

    fn finish(mut self) -> Result<Document, DocumentError> {
        self.flush_markdown();
        if let Some(open) = self.stack.last() {
            return Err(DocumentError::UnclosedContainer {
                line: open.line,
                name: open.kind.name(),
            });
        }
        Ok(Document { blocks: self.root })
    }
}

/// An opening code fence: up to three spaces, then three or more backticks
/// or tildes, then an info string.
struct Fence<'a> {
    marker: char,
    len: usize,
    info: &'a str,
}

impl<'a> Fence<'a> {
    fn open(line: &'a str) -> Option<Self> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }
        let rest = &line[indent..];
        let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = rest.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }
        let info = rest[len..].trim();
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some(Fence { marker, len, info })
    }

    fn closes(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let count = trimmed.chars().take_while(|c| *c == self.marker).count();
        count >= self.len && count == trimmed.chars().count()
    }
}

enum Directive<'a> {
    Open(&'a str, &'a str),
    Close,
}

impl<'a> Directive<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let rest = line.trim().strip_prefix(":::")?;
        let rest = rest.trim();
        if rest.is_empty() {
            return Some(Directive::Close);
        }
        let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        Some(Directive::Open(name, arg.trim()))
    }
}

fn deserialize<T: DeserializeOwned>(
    name: &'static str,
    source: &str,
    line: usize,
) -> Result<T, DocumentError> {
    toml::from_str(source).map_err(|source| DocumentError::Widget { line, name, source })
}

fn invalid(name: &'static str, line: usize, reason: &str) -> DocumentError {
    DocumentError::Invalid {
        line,
        name,
        reason: reason.to_string(),
    }
}

fn parse_widget(name: &'static str, source: &str, line: usize) -> Result<Widget, DocumentError> {
    let widget = match name {
        "hero-image" => Widget::HeroImage(deserialize(name, source, line)?),
        "hero-video" => {
            let hero: HeroVideo = deserialize(name, source, line)?;
            if hero.overlay_opacity > 100 {
                return Err(invalid(name, line, "overlay_opacity must be 0-100"));
            }
            Widget::HeroVideo(hero)
        }
        "kpi" => Widget::Kpi(deserialize(name, source, line)?),
        "compare" => {
            let compare: Compare = deserialize(name, source, line)?;
            if compare.pairs.is_empty() {
                return Err(invalid(name, line, "needs at least one pair"));
            }
            if compare.interval_ms == Some(0) {
                return Err(invalid(name, line, "interval_ms must be positive"));
            }
            Widget::Compare(compare)
        }
        "quotes" => {
            let quotes: Quotes = deserialize(name, source, line)?;
            if quotes.quotes.is_empty() {
                return Err(invalid(name, line, "needs at least one quote"));
            }
            if quotes.interval_ms == Some(0) {
                return Err(invalid(name, line, "interval_ms must be positive"));
            }
            Widget::Quotes(quotes)
        }
        "image" => Widget::Image(deserialize(name, source, line)?),
        "video" => Widget::Video(deserialize(name, source, line)?),
        "video-modal" => Widget::VideoModal(deserialize(name, source, line)?),
        "timeline" => {
            let timeline: Timeline = deserialize(name, source, line)?;
            if timeline.nodes.is_empty() {
                return Err(invalid(name, line, "needs at least one node"));
            }
            Widget::Timeline(timeline)
        }
        _ => unreachable!("widget names are matched against WIDGET_NAMES"),
    };
    Ok(widget)
}
