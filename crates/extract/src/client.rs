// ABOUTME: The Client running the lyrics pipeline over retrieved HTML or metadata lyrics.
// ABOUTME: Assembles cleaned blocks, truncates tails, normalizes spacing and carves out variants.

use dom_query::Document;
use tracing::{debug, info, warn};

use crate::error::ExtractError;
use crate::extractors::{self, tabbed, LabeledBlock};
use crate::options::{ClientBuilder, Options};
use crate::resource::{RetrievalResult, Retriever, SourceTag};
use crate::result::{Diagnostics, PipelineResult};
use crate::source::{self, ExtractorKind, SongRef};
use crate::text::{
    collapse_excess_newlines, extract_variants, normalize_spacing, strip_headers, truncate_tail,
    TextCleaner,
};

/// Runs the extraction pipeline. Stateless between calls; safe to share.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    cleaner: TextCleaner,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Client {
    pub fn new(opts: Options) -> Self {
        let cleaner = TextCleaner::new(opts.boilerplate.clone());
        Self { opts, cleaner }
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Extracts lyrics from HTML already retrieved for `url`.
    ///
    /// The strategy is chosen from the URL's host. Fails only with NotFound,
    /// when nothing survives cleaning.
    pub fn extract(
        &self,
        retrieval: &RetrievalResult,
        url: &str,
    ) -> Result<PipelineResult, ExtractError> {
        let kind = source::select(url);
        let doc = Document::from(retrieval.html.as_str());
        let extraction = extractors::extract(kind, &doc, &self.opts.noise_selectors);
        debug!(
            strategy = %kind,
            blocks = extraction.blocks.len(),
            fallback = extraction.fallback_used,
            "markup extracted"
        );

        let diagnostics = Diagnostics {
            strategy: Some(kind),
            source_tag: Some(retrieval.source_tag),
            html_length: retrieval.html.len(),
            blocks_found: extraction.blocks.len(),
            fallback_used: extraction.fallback_used,
            raw_length: extraction.raw_length(),
            cleaned_length: 0,
            retrieval_error: None,
        };
        self.assemble(&extraction.blocks, diagnostics, url)
    }

    /// Convenience for HTML from the standard fetch path.
    pub fn extract_html(&self, html: &str, url: &str) -> Result<PipelineResult, ExtractError> {
        self.extract(&RetrievalResult::fetched(html), url)
    }

    /// Runs plain lyrics text (e.g. from a metadata lookup) through cleaning and normalization.
    pub fn extract_text(&self, text: &str, origin: &str) -> Result<PipelineResult, ExtractError> {
        let diagnostics = Diagnostics {
            strategy: None,
            source_tag: Some(SourceTag::Metadata),
            html_length: 0,
            blocks_found: 1,
            fallback_used: false,
            raw_length: text.len(),
            cleaned_length: 0,
            retrieval_error: None,
        };
        self.assemble(&[LabeledBlock::unlabeled(text)], diagnostics, origin)
    }

    /// Full request flow for an identifier or URL, using `retriever` for network access.
    ///
    /// Ids go through the metadata lookup first; lyrics returned by the lookup
    /// skip scraping. Tab-pane hosts whose first fetch lacks tab panes are
    /// fetched once more through the alternate path. Fetch failures become
    /// empty HTML and end in NotFound.
    pub fn extract_with<R: Retriever + ?Sized>(
        &self,
        retriever: &R,
        input: &str,
    ) -> Result<PipelineResult, ExtractError> {
        let song = SongRef::parse(input)?;
        debug!(song = %song, lookup = song.requires_metadata_lookup(), "resolving song");

        let url = match &song {
            SongRef::Url(url) => url.clone(),
            SongRef::Id(id) => {
                let meta = retriever.lookup(*id).unwrap_or_default();
                if let Some(lyrics) = meta.lyrics.as_deref().filter(|l| !l.trim().is_empty()) {
                    debug!(id, "using lyrics from metadata lookup");
                    return self.extract_text(lyrics, &song.to_string());
                }
                match meta.url {
                    Some(url) => url,
                    None => {
                        warn!(id, "metadata lookup gave no url");
                        return Err(ExtractError::not_found(song.to_string(), "lookup", None));
                    }
                }
            }
        };

        let (retrieval, failure) = self.retrieve(retriever, &url);
        self.extract(&retrieval, &url).map_err(|mut err| {
            if let (Some(diagnostics), Some(failure)) = (err.diagnostics.as_mut(), failure) {
                diagnostics.retrieval_error = Some(failure.to_string());
            }
            err
        })
    }

    /// Fetches `url`, degrading failures to empty HTML. The last failure is returned alongside.
    fn retrieve<R: Retriever + ?Sized>(
        &self,
        retriever: &R,
        url: &str,
    ) -> (RetrievalResult, Option<ExtractError>) {
        let (html, failure) = match retriever.fetch(url) {
            Ok(html) => (html, None),
            Err(e) => {
                let err = ExtractError::retrieval(url, "fetch", Some(e));
                warn!(error = %err, "fetch failed");
                (String::new(), Some(err))
            }
        };
        let first = RetrievalResult::fetched(html);

        let kind = source::select(url);
        if !kind.supports_alternate_fetch() || has_structure(kind, &first.html) {
            return (first, failure);
        }

        debug!(url, "no tab panes in fetched page, trying alternate fetch");
        match retriever.fetch_alternate(url) {
            Ok(html) if !html.trim().is_empty() => {
                (RetrievalResult::new(html, SourceTag::AlternateFetch), None)
            }
            Ok(_) => (first, failure),
            Err(e) => {
                let err = ExtractError::retrieval(url, "fetch_alternate", Some(e));
                warn!(error = %err, "alternate fetch failed");
                (first, Some(err))
            }
        }
    }

    fn assemble(
        &self,
        blocks: &[LabeledBlock],
        mut diagnostics: Diagnostics,
        origin: &str,
    ) -> Result<PipelineResult, ExtractError> {
        let mut joined = String::new();
        for block in blocks {
            let cleaned = self.cleaner.clean(&block.text);
            if cleaned.is_empty() {
                continue;
            }
            if let Some(language) = block.language() {
                joined.push_str(language.header());
                joined.push('\n');
            }
            joined.push_str(&cleaned);
            joined.push_str("\n\n");
        }
        diagnostics.cleaned_length = joined.trim().len();

        let truncated = truncate_tail(&joined);
        let normalized = normalize_spacing(&truncated);
        let variants = extract_variants(&normalized);
        let lyrics = collapse_excess_newlines(&strip_headers(&normalized))
            .trim()
            .to_string();

        if lyrics.is_empty() {
            warn!(
                origin,
                blocks = diagnostics.blocks_found,
                html_length = diagnostics.html_length,
                "lyrics not found"
            );
            return Err(ExtractError::not_found(origin, "extract", Some(diagnostics)));
        }

        info!(
            origin,
            chars = lyrics.len(),
            variants = variants.as_ref().map_or(0, |v| v.len()),
            "lyrics extracted"
        );
        Ok(PipelineResult {
            lyrics,
            variants,
            diagnostics: self.opts.keep_diagnostics.then_some(diagnostics),
        })
    }
}

/// Whether fetched HTML has the markup its strategy relies on.
fn has_structure(kind: ExtractorKind, html: &str) -> bool {
    match kind {
        ExtractorKind::TabbedPane => tabbed::has_tab_panes(&Document::from(html)),
        ExtractorKind::ParagraphTabbed | ExtractorKind::GenericContainer => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::SongMetadata;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const TABBED_URL: &str = "https://teluguchristianresource.com/song/";
    const PANES: &str = r#"<div class="su-tabs-pane" data-title="Telugu Lyrics"><p>పల్లవి</p></div>
        <div class="su-tabs-pane" data-title="English Lyrics"><p>Pallavi</p></div>"#;

    #[derive(Default)]
    struct StubRetriever {
        meta: Option<SongMetadata>,
        fetch: Option<String>,
        alternate: Option<String>,
        calls: RefCell<Vec<String>>,
    }

    impl Retriever for StubRetriever {
        fn lookup(&self, id: u64) -> Option<SongMetadata> {
            self.calls.borrow_mut().push(format!("lookup {}", id));
            self.meta.clone()
        }

        fn fetch(&self, url: &str) -> anyhow::Result<String> {
            self.calls.borrow_mut().push(format!("fetch {}", url));
            self.fetch.clone().ok_or_else(|| anyhow::anyhow!("connection refused"))
        }

        fn fetch_alternate(&self, url: &str) -> anyhow::Result<String> {
            self.calls.borrow_mut().push(format!("alternate {}", url));
            self.alternate.clone().ok_or_else(|| anyhow::anyhow!("curl failed"))
        }
    }

    #[test]
    fn assembles_headers_and_variants() {
        let client = Client::default();
        let result = client.extract_html(PANES, TABBED_URL).unwrap();

        assert_eq!(result.lyrics, "పల్లవి\n\nPallavi");
        assert_eq!(result.variant("telugu"), Some("పల్లవి"));
        assert_eq!(result.variant("english"), Some("Pallavi"));
        let diagnostics = result.diagnostics.unwrap();
        assert_eq!(diagnostics.strategy, Some(ExtractorKind::TabbedPane));
        assert_eq!(diagnostics.blocks_found, 2);
    }

    #[test]
    fn empty_page_is_not_found_with_diagnostics() {
        let client = Client::default();
        let err = client
            .extract_html("<html><body>  </body></html>", "https://genius.com/x")
            .unwrap_err();
        assert!(err.is_not_found());
        let diagnostics = err.diagnostics.unwrap();
        assert_eq!(diagnostics.strategy, Some(ExtractorKind::GenericContainer));
        assert!(diagnostics.fallback_used);
    }

    #[test]
    fn diagnostics_can_be_dropped() {
        let client = Client::builder().keep_diagnostics(false).build().unwrap();
        let result = client.extract_html(PANES, TABBED_URL).unwrap();
        assert!(result.diagnostics.is_none());
    }

    #[test]
    fn metadata_lyrics_skip_scraping() {
        let retriever = StubRetriever {
            meta: Some(SongMetadata {
                url: Some("https://genius.com/a".to_string()),
                lyrics: Some("[Verse]\nFrom the api\n\n\nSecond verse".to_string()),
            }),
            ..Default::default()
        };
        let result = Client::default().extract_with(&retriever, "42").unwrap();

        assert_eq!(result.lyrics, "From the api\n\nSecond verse");
        assert_eq!(*retriever.calls.borrow(), vec!["lookup 42".to_string()]);
        assert_eq!(
            result.diagnostics.unwrap().source_tag,
            Some(SourceTag::Metadata)
        );
    }

    #[test]
    fn id_without_url_or_lyrics_is_not_found() {
        let retriever = StubRetriever::default();
        let err = Client::default().extract_with(&retriever, "7").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.url, "id:7");
    }

    #[test]
    fn id_resolves_to_url_then_scrapes() {
        let retriever = StubRetriever {
            meta: Some(SongMetadata {
                url: Some("https://genius.com/a-lyrics".to_string()),
                lyrics: None,
            }),
            fetch: Some(r#"<div data-lyrics-container="true">Hello<br>World</div>"#.to_string()),
            ..Default::default()
        };
        let result = Client::default().extract_with(&retriever, "42").unwrap();
        assert_eq!(result.lyrics, "Hello\nWorld");
        assert_eq!(
            *retriever.calls.borrow(),
            vec!["lookup 42".to_string(), "fetch https://genius.com/a-lyrics".to_string()]
        );
    }

    #[test]
    fn tabbed_host_without_panes_uses_alternate_fetch() {
        let retriever = StubRetriever {
            fetch: Some("<html><body>Just a moment...</body></html>".to_string()),
            alternate: Some(PANES.to_string()),
            ..Default::default()
        };
        let result = Client::default().extract_with(&retriever, TABBED_URL).unwrap();
        assert_eq!(result.variant("english"), Some("Pallavi"));
        assert_eq!(
            result.diagnostics.unwrap().source_tag,
            Some(SourceTag::AlternateFetch)
        );
    }

    #[test]
    fn alternate_fetch_not_used_when_panes_present() {
        let retriever = StubRetriever {
            fetch: Some(PANES.to_string()),
            ..Default::default()
        };
        Client::default().extract_with(&retriever, TABBED_URL).unwrap();
        assert_eq!(retriever.calls.borrow().len(), 1);
    }

    #[test]
    fn other_hosts_never_use_alternate_fetch() {
        let retriever = StubRetriever {
            fetch: Some("<html></html>".to_string()),
            alternate: Some(PANES.to_string()),
            ..Default::default()
        };
        let err = Client::default()
            .extract_with(&retriever, "https://christianlyricz.com/x")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(retriever.calls.borrow().len(), 1);
    }

    #[test]
    fn failed_fetch_degrades_to_not_found() {
        let retriever = StubRetriever::default();
        let err = Client::default()
            .extract_with(&retriever, "https://genius.com/x")
            .unwrap_err();
        assert!(err.is_not_found());
        let diagnostics = err.diagnostics.unwrap();
        assert_eq!(diagnostics.html_length, 0);
        assert_eq!(
            diagnostics.retrieval_error.as_deref(),
            Some("lyrix: fetch https://genius.com/x: retrieval error: connection refused")
        );
    }

    #[test]
    fn failed_alternate_fetch_is_reported() {
        let retriever = StubRetriever {
            fetch: Some("<html><body>Just a moment...</body></html>".to_string()),
            ..Default::default()
        };
        let err = Client::default()
            .extract_with(&retriever, TABBED_URL)
            .unwrap_err();
        assert!(err.is_not_found());
        let reason = err.diagnostics.unwrap().retrieval_error.unwrap();
        assert!(reason.contains("fetch_alternate"));
        assert!(reason.ends_with("retrieval error: curl failed"));
    }

    #[test]
    fn successful_fetch_leaves_no_retrieval_error() {
        let retriever = StubRetriever {
            fetch: Some("<html></html>".to_string()),
            ..Default::default()
        };
        let err = Client::default()
            .extract_with(&retriever, "https://genius.com/x")
            .unwrap_err();
        assert_eq!(err.diagnostics.unwrap().retrieval_error, None);
    }

    #[test]
    fn empty_input_is_invalid() {
        let err = Client::default()
            .extract_with(&StubRetriever::default(), " ")
            .unwrap_err();
        assert!(err.is_invalid_source());
    }
}
