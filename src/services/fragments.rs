//! HTML fragment rendering
//!
//! Server-side twins of the site's client renderers. The static pages can
//! inject these fragments as-is. Templates are compiled once into a Tera
//! instance; `.html` names keep Tera's autoescaping on, so record fields
//! are always escaped.

use anyhow::Result;
use serde::Serialize;
use std::error::Error as _;
use tera::{Context as TeraContext, Tera};

use crate::models::{BlogPost, GalleryImage, Message};

/// Characters of post content shown on a blog card
const EXCERPT_CHARS: usize = 100;

const PLACEHOLDER: &str = r#"<p style="text-align: center; color: #666; width: 100%; padding: 40px;">{{ text }}</p>"#;

const BLOG_TEMPLATE: &str = r##"{% if posts | length > 0 %}{% for post in posts %}<div class="blog-card">
    <div class="blog-image"{% if post.image %} style="background-image: url('uploads/{{ post.image }}')"{% endif %}></div>
    <div class="blog-content">
        <span class="blog-date">{{ post.date }}</span>
        <h3>{{ post.title }}</h3>
        <p>{{ post.excerpt }}</p>
        <a href="#" class="blog-link" data-id="{{ post.id }}">阅读更多 →</a>
    </div>
</div>
{% endfor %}{% else %}{% include "placeholder.html" %}{% endif %}"##;

const GALLERY_TEMPLATE: &str = r##"{% if images | length > 0 %}{% for image in images %}<div class="gallery-item">
    <div class="gallery-image">
        <img src="uploads/{{ image.filename }}" alt="{{ image.alt }}">
        <div class="gallery-overlay">
            <p class="gallery-caption">{{ image.caption }}</p>
            <span class="gallery-date">{{ image.date }}</span>
        </div>
    </div>
</div>
{% endfor %}{% else %}{% include "placeholder.html" %}{% endif %}"##;

const MESSAGES_TEMPLATE: &str = r##"{% if messages | length > 0 %}{% for message in messages %}<div class="message-item">
    <div class="message-header">
        <h4 class="message-name">{{ message.name }}</h4>
        <span class="message-date">{{ message.date }}</span>
        <span class="message-email">{{ message.email }}</span>
    </div>
    <div class="message-content">
        <p>{{ message.content }}</p>
    </div>
</div>
{% endfor %}{% else %}{% include "placeholder.html" %}{% endif %}"##;

#[derive(Serialize)]
struct BlogCard<'a> {
    id: i64,
    title: &'a str,
    excerpt: String,
    image: Option<&'a str>,
    date: String,
}

#[derive(Serialize)]
struct GalleryItem<'a> {
    filename: &'a str,
    caption: &'a str,
    alt: &'a str,
    date: String,
}

#[derive(Serialize)]
struct MessageEntry<'a> {
    name: &'a str,
    email: &'a str,
    content: &'a str,
    date: String,
}

/// Renders the blog, gallery and guestbook fragments
pub struct FragmentRenderer {
    tera: Tera,
}

impl FragmentRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("placeholder.html", PLACEHOLDER),
            ("blog.html", BLOG_TEMPLATE),
            ("gallery.html", GALLERY_TEMPLATE),
            ("messages.html", MESSAGES_TEMPLATE),
        ])
        .map_err(|e| anyhow::anyhow!("Failed to compile fragment templates: {}", e))?;

        Ok(Self { tera })
    }

    pub fn blog(&self, posts: &[BlogPost]) -> Result<String> {
        let cards: Vec<BlogCard> = posts
            .iter()
            .map(|post| BlogCard {
                id: post.id,
                title: &post.title,
                excerpt: excerpt(&post.content),
                image: post.image.as_deref(),
                date: post.created_at.format("%Y.%m.%d").to_string(),
            })
            .collect();

        let mut context = TeraContext::new();
        context.insert("posts", &cards);
        context.insert("text", "暂无博客");
        self.render("blog.html", &context)
    }

    pub fn gallery(&self, images: &[GalleryImage]) -> Result<String> {
        let items: Vec<GalleryItem> = images
            .iter()
            .map(|image| {
                let caption = image.caption.as_deref().filter(|c| !c.is_empty());
                GalleryItem {
                    filename: &image.filename,
                    caption: caption.unwrap_or("无描述"),
                    alt: caption.unwrap_or("Gallery Image"),
                    date: image.created_at.format("%Y.%m.%d").to_string(),
                }
            })
            .collect();

        let mut context = TeraContext::new();
        context.insert("images", &items);
        context.insert("text", "暂无相册图片");
        self.render("gallery.html", &context)
    }

    pub fn messages(&self, messages: &[Message]) -> Result<String> {
        let entries: Vec<MessageEntry> = messages
            .iter()
            .map(|message| MessageEntry {
                name: &message.name,
                email: &message.email,
                content: &message.content,
                date: message.created_at.format("%Y.%m.%d").to_string(),
            })
            .collect();

        let mut context = TeraContext::new();
        context.insert("messages", &entries);
        context.insert("text", "暂无留言");
        self.render("messages.html", &context)
    }

    fn render(&self, template: &str, context: &TeraContext) -> Result<String> {
        self.tera.render(template, context).map_err(|e| {
            let mut error_msg = format!("Failed to render '{}': {}", template, e);
            let mut source = e.source();
            while let Some(s) = source {
                error_msg.push_str(&format!("\n  Caused by: {}", s));
                source = s.source();
            }
            anyhow::anyhow!(error_msg)
        })
    }
}

/// First characters of a post, with an ellipsis when cut
fn excerpt(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
