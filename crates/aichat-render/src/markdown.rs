//! Markdown to HTML with code segments routed through classifiers.

use std::collections::VecDeque;

use markdown_weaver::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::classify::{CodeSegment, SegmentClassifier, math_classifiers};
use crate::config::RendererConfig;

/// Parser options plus an ordered classifier list.
pub struct MarkdownPipeline {
    options: Options,
    classifiers: Vec<Box<dyn SegmentClassifier>>,
}

impl MarkdownPipeline {
    /// A pipeline with no classifiers; code is always written as code.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            classifiers: Vec::new(),
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        let mut pipeline = Self::new(config.markdown.options());
        if config.math {
            pipeline.classifiers.extend(math_classifiers());
        }
        pipeline
    }

    /// Append a classifier. Earlier classifiers win.
    pub fn with_classifier(mut self, classifier: impl SegmentClassifier + 'static) -> Self {
        self.classifiers.push(Box::new(classifier));
        self
    }

    pub fn classifier_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classifiers.iter().map(|c| c.name())
    }

    pub fn render(&self, markdown: &str) -> String {
        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        self.render_into(&mut html, markdown);
        html
    }

    pub fn render_into(&self, html: &mut String, markdown: &str) {
        let parser = Parser::new_ext(markdown, self.options);
        let events = ClassifiedEvents::new(parser, &self.classifiers);
        markdown_weaver::html::push_html(html, events);
    }
}

impl Default for MarkdownPipeline {
    fn default() -> Self {
        Self::from_config(&RendererConfig::default())
    }
}

impl std::fmt::Debug for MarkdownPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownPipeline")
            .field("options", &self.options)
            .field("classifiers", &self.classifier_names().collect::<Vec<_>>())
            .finish()
    }
}

fn classify_with(
    classifiers: &[Box<dyn SegmentClassifier>],
    segment: &CodeSegment<'_>,
) -> Option<String> {
    classifiers.iter().find_map(|classifier| {
        let html = classifier.classify(segment)?;
        tracing::trace!(classifier = classifier.name(), "code segment claimed");
        Some(html)
    })
}

/// Rewrites inline code and code blocks claimed by a classifier into raw
/// HTML events. Everything else passes through untouched.
struct ClassifiedEvents<'a, 'c, I: Iterator<Item = Event<'a>>> {
    iter: I,
    classifiers: &'c [Box<dyn SegmentClassifier>],
    pending: VecDeque<Event<'a>>,
}

impl<'a, 'c, I: Iterator<Item = Event<'a>>> ClassifiedEvents<'a, 'c, I> {
    fn new(iter: I, classifiers: &'c [Box<dyn SegmentClassifier>]) -> Self {
        Self {
            iter,
            classifiers,
            pending: VecDeque::new(),
        }
    }

    /// Buffer a code block up to its end tag, then either replace it or
    /// queue the original events.
    fn code_block(&mut self, start: Event<'a>, kind: &CodeBlockKind<'a>) -> Event<'a> {
        let mut buffered = vec![start];
        let mut content = String::new();

        for event in self.iter.by_ref() {
            let end = matches!(event, Event::End(TagEnd::CodeBlock));
            if let Event::Text(text) = &event {
                content.push_str(text);
            }
            buffered.push(event);
            if end {
                break;
            }
        }

        let lang = match kind {
            CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
            CodeBlockKind::Indented => None,
        };
        let segment = CodeSegment::Block {
            lang,
            content: &content,
        };

        if let Some(html) = classify_with(self.classifiers, &segment) {
            return Event::Html(CowStr::from(html));
        }

        let mut buffered = buffered.into_iter();
        let first = buffered.next();
        self.pending.extend(buffered);
        // first is the start event pushed above
        first.unwrap_or(Event::Html(CowStr::Borrowed("")))
    }
}

impl<'a, 'c, I: Iterator<Item = Event<'a>>> Iterator for ClassifiedEvents<'a, 'c, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        if self.classifiers.is_empty() {
            return self.iter.next();
        }

        let event = self.iter.next()?;
        if let Event::Code(text) = &event {
            if let Some(html) = classify_with(self.classifiers, &CodeSegment::Inline(&**text)) {
                return Some(Event::InlineHtml(CowStr::from(html)));
            }
        }
        if let Event::Start(Tag::CodeBlock(kind)) = &event {
            let kind = kind.clone();
            return Some(self.code_block(event, &kind));
        }
        Some(event)
    }
}
