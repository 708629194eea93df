//! HTML builders for listing-page tests.

/// Builder for one `.postArticle` element.
#[derive(Debug, Clone)]
pub struct PostHtml {
    datetime: Option<String>,
    slug: String,
    claps: Option<String>,
    href: Option<String>,
    author: bool,
    bare_anchors: bool,
}

impl PostHtml {
    pub fn dated(datetime: &str) -> Self {
        Self {
            datetime: Some(datetime.to_string()),
            slug: "post".to_string(),
            claps: Some("58".to_string()),
            href: None,
            author: true,
            bare_anchors: false,
        }
    }

    /// A post published on June 1st of `year`.
    pub fn in_year(year: i32) -> Self {
        Self::dated(&format!("{year}-06-01T09:30:00.000Z")).slug(&format!("post-{year}"))
    }

    pub fn undated() -> Self {
        Self {
            datetime: None,
            ..Self::dated("")
        }
    }

    pub fn slug(mut self, slug: &str) -> Self {
        self.slug = slug.to_string();
        self
    }

    pub fn claps(mut self, claps: &str) -> Self {
        self.claps = Some(claps.to_string());
        self
    }

    pub fn without_claps(mut self) -> Self {
        self.claps = None;
        self
    }

    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn without_author(mut self) -> Self {
        self.author = false;
        self
    }

    /// Render the author and read-more anchors without an `href`.
    pub fn without_hrefs(mut self) -> Self {
        self.bare_anchors = true;
        self
    }

    /// Give the read-more anchor an `href` that is not a valid URL.
    pub fn malformed(self) -> Self {
        self.href("http://[bad")
    }

    pub fn render(&self) -> String {
        let slug = &self.slug;
        let author = match (self.author, self.bare_anchors) {
            (false, _) => "",
            (true, true) => r#"<a data-action="show-user-card">Jane Writer</a>"#,
            (true, false) => {
                r#"<a data-action="show-user-card" href="https://hackernoon.com/@writer?source=post_header">Jane Writer</a>"#
            }
        };
        let time = self
            .datetime
            .as_ref()
            .map(|d| format!(r#"<time datetime="{d}">{d}</time>"#))
            .unwrap_or_default();
        let claps = self
            .claps
            .as_ref()
            .map(|c| format!("<span><button>{c}</button></span>"))
            .unwrap_or_default();
        let anchor = if self.bare_anchors {
            "<a>Read more…</a>".to_string()
        } else {
            let href = self
                .href
                .clone()
                .unwrap_or_else(|| format!("https://hackernoon.com/{slug}?source=tag_archive"));
            format!(r#"<a href="{href}">Read more…</a>"#)
        };

        format!(
            r#"<div class="postArticle">
  <div class="postMetaInline-authorLockup">{author} {time}<span class="readingTime" title="5 min read"></span></div>
  <h3>Title {slug}</h3>
  {claps}
  <div class="postArticle-readMore">{anchor}</div>
</div>"#
        )
    }
}

/// A full listing page holding `posts` in order.
pub fn listing(posts: &[PostHtml]) -> String {
    let body: String = posts.iter().map(PostHtml::render).collect();
    format!("<!DOCTYPE html><html><body><div class=\"streamItems\">{body}</div></body></html>")
}
