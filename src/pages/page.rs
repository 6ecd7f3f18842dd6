use raylib::prelude::*;
use crossfade::constants::*;

pub enum PageBody {
    Text {
        paragraphs: Vec<String>,
        background: Color,
    },
    Image(Texture2D),
}

pub struct Page {
    pub title: String,
    pub body: PageBody,
}

impl Page {
    pub fn text(title: &str, paragraphs: &[&str], background: Color) -> Self {
        Self {
            title: title.to_string(),
            body: PageBody::Text {
                paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
                background,
            },
        }
    }

    pub fn image(title: String, image: Texture2D) -> Self {
        Self { title, body: PageBody::Image(image) }
    }

    /// Draws the page body into `bounds`.
    pub fn draw(&self, d: &mut impl RaylibDraw, bounds: Rectangle) {
        match &self.body {
            PageBody::Text { paragraphs, background } => {
                d.draw_rectangle_rec(bounds, *background);

                let padding = BODY_FONT_SIZE as f32;
                let max_width = (bounds.width - padding * 2.0) as i32;
                let mut y = (bounds.y + padding) as i32;
                for paragraph in paragraphs {
                    for line in wrap(paragraph, max_width, BODY_FONT_SIZE) {
                        d.draw_text(&line, (bounds.x + padding) as i32, y, BODY_FONT_SIZE, Color::BLACK);
                        y += BODY_FONT_SIZE + BODY_FONT_SIZE / 4;
                    }
                    y += BODY_FONT_SIZE;
                }
            }
            PageBody::Image(image) => {
                d.draw_rectangle_rec(bounds, Color::BLACK);

                let tex_width = image.width() as f32;
                let tex_height = image.height() as f32;

                // Fit inside the bounds, never upscale
                let scale = (bounds.width / tex_width).min(bounds.height / tex_height).min(1.0);
                let scaled_width = tex_width * scale;
                let scaled_height = tex_height * scale;

                d.draw_texture_pro(
                    image,
                    Rectangle::new(0.0, 0.0, tex_width, tex_height),
                    Rectangle::new(
                        bounds.x + (bounds.width - scaled_width) * 0.5,
                        bounds.y + (bounds.height - scaled_height) * 0.5,
                        scaled_width,
                        scaled_height,
                    ),
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE,
                );
            }
        }
    }
}

/// Greedy word wrap using the default font metrics.
fn wrap(text: &str, max_width: i32, font_size: i32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() { word.to_string() } else { format!("{line} {word}") };
        if !line.is_empty() && measure_text(&candidate, font_size) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn builtin_pages() -> Vec<Page> {
    vec![
        Page::text(
            "Page 1 - Introduction",
            &[
                "Curabitur risus risus, semper at sem nec, luctus viverra nisi. Maecenas semper vehicula lorem sed pharetra. Donec malesuada ante eu interdum maximus",
                "Praesent posuere augue massa, quis luctus elit interdum sed. Proin ultricies eros ligula, vitae porttitor leo ullamcorper eu. Donec pellentesque fermentum mauris. Vivamus eget commodo justo, at viverra arcu",
            ],
            Color::new(0xff, 0x8a, 0x65, 0xff),
        ),
        Page::text(
            "Page 2 - Morbi in porttitor",
            &[
                "Class aptent taciti sociosqu ad litora torquent per conubia nostra, per inceptos himenaeos.",
                "Suspendisse venenatis tellus suscipit ipsum dignissim, ac congue ex suscipit. Nam eu dignissim sem, mattis cursus est.",
                "Duis hendrerit turpis nulla, a imperdiet turpis faucibus id",
            ],
            Color::new(0xc5, 0xe1, 0xa5, 0xff),
        ),
        Page::text(
            "Page 3 - Vivamus consectetur",
            &[
                "Maecenas at rhoncus diam. Curabitur molestie tortor ac massa bibendum, a tempor mauris tristique.",
                "Donec tempor tellus velit, elementum gravida tortor dictum eu.",
                "Nullam blandit ante a orci blandit, ac elementum nunc tempus. Cras pulvinar, nisi a aliquet placerat, magna augue condimentum libero, ac facilisis orci turpis a neque.",
            ],
            Color::new(0x80, 0xde, 0xea, 0xff),
        ),
    ]
}
