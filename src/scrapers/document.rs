//! Read-only views over a rendered listing snapshot.
//!
//! The extractor never touches HTML directly. It walks a [`DocumentView`],
//! which hands out one [`PostView`] per listing entry, and every post
//! exposes one typed query per field category. Each query answers with a
//! [`Lookup`]:
//!
//! - `Ok(Some(value))`: the sub-element is present and well formed
//! - `Ok(None)`: the sub-element is missing, the caller substitutes a default
//! - `Err(ElementError)`: the sub-element is present but unusable, which
//!   fails the whole post
//!
//! [`HtmlDocument`] implements the views on top of a `scraper::Html` parse
//! of the page source.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

static POST_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".postArticle").expect("valid post selector"));
static DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time").expect("valid date selector"));
static AUTHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#".postMetaInline-authorLockup a[data-action="show-user-card"]"#)
        .expect("valid author selector")
});
static COUNTER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span > button").expect("valid counter selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3").expect("valid title selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".postArticle-readMore a").expect("valid link selector"));
static LABEL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span[title]").expect("valid label selector"));

/// A post sub-element that exists but cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    #[error("{field} link {href:?} cannot be resolved: {source}")]
    BadHref {
        field: &'static str,
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// Outcome of one per-field query against a post.
pub type Lookup<T> = Result<Option<T>, ElementError>;

/// Author link of a post: profile location and display name, always together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorLink {
    pub href: String,
    pub name: String,
}

/// Typed field queries for a single listing entry.
pub trait PostView {
    /// Raw machine-readable publication timestamp.
    fn date(&self) -> Lookup<String>;
    fn author_link(&self) -> Lookup<AuthorLink>;
    /// Visible popularity counter text, e.g. `"1.2K"`.
    fn counter(&self) -> Lookup<String>;
    fn title(&self) -> Lookup<String>;
    /// Article location, resolved but not yet normalized.
    fn link(&self) -> Lookup<String>;
    /// Read-time label, e.g. `"5 min read"`.
    fn label(&self) -> Lookup<String>;
}

/// A rendered listing: an ordered sequence of post elements.
pub trait DocumentView {
    type Post<'a>: PostView
    where
        Self: 'a;

    /// All post elements, in document order.
    fn posts(&self) -> Vec<Self::Post<'_>>;
}

/// A parsed HTML snapshot of the listing page.
///
/// `base` is the page location; when present, relative links are resolved
/// against it the way a browser would.
#[derive(Debug)]
pub struct HtmlDocument {
    html: Html,
    base: Option<Url>,
}

impl HtmlDocument {
    pub fn parse(source: &str, base: Option<Url>) -> Self {
        Self {
            html: Html::parse_document(source),
            base,
        }
    }
}

impl DocumentView for HtmlDocument {
    type Post<'a> = HtmlPost<'a>;

    fn posts(&self) -> Vec<HtmlPost<'_>> {
        self.html
            .select(&POST_SELECTOR)
            .map(|element| HtmlPost {
                element,
                base: self.base.as_ref(),
            })
            .collect()
    }
}

/// One `.postArticle` element of an [`HtmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct HtmlPost<'a> {
    element: ElementRef<'a>,
    base: Option<&'a Url>,
}

impl<'a> HtmlPost<'a> {
    fn first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.element.select(selector).next()
    }

    /// Resolved `href` of `anchor`. An anchor without one counts as missing.
    fn href(&self, anchor: ElementRef<'a>, field: &'static str) -> Lookup<String> {
        let Some(href) = anchor.value().attr("href") else {
            return Ok(None);
        };
        let bad_href = |source| ElementError::BadHref {
            field,
            href: href.to_string(),
            source,
        };

        match self.base {
            Some(base) => base
                .join(href)
                .map(|resolved| Some(resolved.to_string()))
                .map_err(bad_href),
            None => match Url::parse(href) {
                Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Some(href.to_string())),
                Err(source) => Err(bad_href(source)),
            },
        }
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl PostView for HtmlPost<'_> {
    fn date(&self) -> Lookup<String> {
        Ok(self
            .first(&DATE_SELECTOR)
            .and_then(|time| time.value().attr("datetime"))
            .map(str::to_string))
    }

    fn author_link(&self) -> Lookup<AuthorLink> {
        let Some(anchor) = self.first(&AUTHOR_SELECTOR) else {
            return Ok(None);
        };
        Ok(self.href(anchor, "author")?.map(|href| AuthorLink {
            href,
            name: text_of(anchor),
        }))
    }

    fn counter(&self) -> Lookup<String> {
        Ok(self.first(&COUNTER_SELECTOR).map(text_of))
    }

    fn title(&self) -> Lookup<String> {
        Ok(self.first(&TITLE_SELECTOR).map(text_of))
    }

    fn link(&self) -> Lookup<String> {
        match self.first(&LINK_SELECTOR) {
            Some(anchor) => self.href(anchor, "article"),
            None => Ok(None),
        }
    }

    fn label(&self) -> Lookup<String> {
        Ok(self
            .first(&LABEL_SELECTOR)
            .and_then(|span| span.value().attr("title"))
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::fixtures::{PostHtml, listing};

    #[test]
    fn test_posts_in_document_order() {
        let html = listing(&[
            PostHtml::dated("2019-01-01T00:00:00Z").slug("first"),
            PostHtml::dated("2018-01-01T00:00:00Z").slug("second"),
        ]);
        let doc = HtmlDocument::parse(&html, None);
        let titles: Vec<_> = doc
            .posts()
            .iter()
            .map(|p| p.title().unwrap())
            .collect();
        assert_eq!(
            titles,
            vec![Some("Title first".to_string()), Some("Title second".to_string())]
        );
    }

    #[test]
    fn test_full_post_fields() {
        let html = listing(&[PostHtml::dated("2018-05-04T10:00:00.000Z")
            .slug("hello")
            .claps("1.2K")]);
        let doc = HtmlDocument::parse(&html, None);
        let posts = doc.posts();
        let post = &posts[0];

        assert_eq!(post.date().unwrap().as_deref(), Some("2018-05-04T10:00:00.000Z"));
        assert_eq!(post.counter().unwrap().as_deref(), Some("1.2K"));
        assert_eq!(post.label().unwrap().as_deref(), Some("5 min read"));
        assert_eq!(
            post.link().unwrap().as_deref(),
            Some("https://hackernoon.com/hello?source=tag_archive")
        );
        assert_eq!(
            post.author_link().unwrap(),
            Some(AuthorLink {
                href: "https://hackernoon.com/@writer?source=post_header".to_string(),
                name: "Jane Writer".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_sub_elements_are_none() {
        let html = r#"<html><body><div class="postArticle"><p>bare</p></div></body></html>"#;
        let doc = HtmlDocument::parse(html, None);
        let posts = doc.posts();
        let post = &posts[0];

        assert_eq!(post.date(), Ok(None));
        assert_eq!(post.author_link(), Ok(None));
        assert_eq!(post.counter(), Ok(None));
        assert_eq!(post.title(), Ok(None));
        assert_eq!(post.link(), Ok(None));
        assert_eq!(post.label(), Ok(None));
    }

    #[test]
    fn test_relative_links_resolve_against_base() {
        let html = listing(&[PostHtml::dated("2018-05-04T10:00:00Z").href("/relative?x=1")]);
        let base = Url::parse("https://hackernoon.com/tagged/javascript").unwrap();
        let doc = HtmlDocument::parse(&html, Some(base));

        assert_eq!(
            doc.posts()[0].link().unwrap().as_deref(),
            Some("https://hackernoon.com/relative?x=1")
        );
    }

    #[test]
    fn test_anchor_without_href_is_missing() {
        let html = listing(&[PostHtml::dated("2018-05-04T10:00:00Z").without_hrefs()]);
        let doc = HtmlDocument::parse(&html, None);
        let posts = doc.posts();

        assert_eq!(posts[0].link(), Ok(None));
        assert_eq!(posts[0].author_link(), Ok(None));
        assert_eq!(posts[0].title().unwrap().as_deref(), Some("Title post"));
    }

    #[test]
    fn test_unresolvable_href_is_an_error() {
        let html = listing(&[PostHtml::dated("2018-05-04T10:00:00Z").href("http://[bad")]);
        let base = Url::parse("https://hackernoon.com/").unwrap();
        let doc = HtmlDocument::parse(&html, Some(base));

        assert!(matches!(
            doc.posts()[0].link(),
            Err(ElementError::BadHref { field: "article", .. })
        ));
    }

    #[test]
    fn test_invalid_href_without_base_is_an_error() {
        let html = listing(&[PostHtml::dated("2018-05-04T10:00:00Z").href("http://[bad")]);
        let doc = HtmlDocument::parse(&html, None);

        assert_eq!(
            doc.posts()[0].link(),
            Err(ElementError::BadHref {
                field: "article",
                href: "http://[bad".to_string(),
                source: url::ParseError::InvalidIpv6Address,
            })
        );
    }

    #[test]
    fn test_relative_href_without_base_is_kept_verbatim() {
        let html = listing(&[PostHtml::dated("2018-05-04T10:00:00Z").href("/relative?x=1")]);
        let doc = HtmlDocument::parse(&html, None);

        assert_eq!(doc.posts()[0].link().unwrap().as_deref(), Some("/relative?x=1"));
    }
}
