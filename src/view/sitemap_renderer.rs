use std::io::Cursor;

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::Post;
use crate::text_utils::{format_iso_date, parse_post_date};

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2024-05-01</lastmod>
    <changefreq>weekly</changefreq>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://example.com/posts/hello-world.html</loc>
    <lastmod>2024-01-01</lastmod>
    <changefreq>monthly</changefreq>
    <priority>0.6</priority>
  </url>
</urlset>
*/

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

pub struct Sitemap<'a> {
    pub base_url: &'a str,
    /// Used for the static pages and for posts that carry no usable date
    pub today: NaiveDate,
}

impl<'a> Sitemap<'a> {
    pub fn entries(&self, posts: &[Post]) -> Vec<SitemapEntry> {
        let base_url = self.base_url.trim_end_matches('/');

        let mut entries = vec![
            SitemapEntry {
                loc: format!("{}/", base_url),
                lastmod: self.today,
                changefreq: "weekly",
                priority: "1.0",
            },
            SitemapEntry {
                loc: format!("{}/about.html", base_url),
                lastmod: self.today,
                changefreq: "monthly",
                priority: "0.8",
            },
        ];

        for post in posts {
            entries.push(SitemapEntry {
                loc: format!("{}/posts/{}.html", base_url, post.slug),
                lastmod: last_modified(post, self.today),
                changefreq: "monthly",
                priority: "0.6",
            });
        }

        entries
    }

    pub fn render(&self, posts: &[Post]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <?xml version="1.0" encoding="UTF-8"?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        // <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NAMESPACE));
        writer.write_event(Event::Start(urlset))?;

        for entry in self.entries(posts) {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            push_text(&mut writer, "loc", &entry.loc)?;
            push_text(&mut writer, "lastmod", &format_iso_date(&entry.lastmod))?;
            push_text(&mut writer, "changefreq", entry.changefreq)?;
            push_text(&mut writer, "priority", entry.priority)?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        // </urlset>
        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut xml = writer.into_inner().into_inner();
        xml.push(b'\n');
        Ok(xml)
    }
}

/// `updated`, then `created`, then today. A value that is not a date is skipped.
pub fn last_modified(post: &Post, today: NaiveDate) -> NaiveDate {
    parse_post_date(&post.updated)
        .or_else(|| parse_post_date(&post.created))
        .unwrap_or(today)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
