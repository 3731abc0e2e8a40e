use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// Receives every start tag of a document, attributes in source order.
pub(crate) trait StartTagHandler {
    fn start_tag(&mut self, tag: &Tag);
}

struct StartTagSink<'h, H> {
    handler: &'h mut H,
}

impl<H: StartTagHandler> TokenSink for StartTagSink<'_, H> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(tag) = token {
            if tag.kind == TagKind::StartTag {
                self.handler.start_tag(&tag);
            }
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizes `html` in one pass and hands each start tag to `handler`.
///
/// No tree is built, so tags inside `<noscript>` or misnested markup are seen exactly
/// as written.
pub(crate) fn scan_start_tags<H: StartTagHandler>(html: &str, handler: &mut H) {
    let mut queue = BufferQueue::new();
    queue.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(StartTagSink { handler }, TokenizerOpts::default());
    let _ = tokenizer.feed(&mut queue);
    tokenizer.end();
}

/// Iterates a tag's attributes as `(name, value)` pairs.
pub(crate) fn attributes(tag: &Tag) -> impl Iterator<Item = (&str, &str)> {
    tag.attrs
        .iter()
        .map(|attr| (&*attr.name.local, &*attr.value))
}
