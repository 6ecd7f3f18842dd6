use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use rand::seq::SliceRandom;
use raylib::prelude::*;
use tracing::{info, warn};

use crossfade::constants::*;
use crossfade::cross_fade::slot::SlotId;
use crossfade::{ContainerStyle, CrossFade, CrossFadeConfig};

use crate::pages::form::{Form, FormEvent};
use crate::pages::page::{builtin_pages, Page};
use crate::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};

/// What the engine needs from a slot view once the frame borrow is gone.
#[derive(Debug, Clone, Copy)]
struct SlotDraw {
    target: usize,
    content: Option<usize>,
    opacity: f32,
    frozen: bool,
}

fn target_index(id: SlotId) -> usize {
    match id {
        SlotId::First => 0,
        SlotId::Second => 1,
    }
}

pub struct PageEngine {
    pages: Vec<Page>,
    current_page: usize,
    image_dir: Option<PathBuf>,
    shuffle: bool,

    fade: CrossFade<usize, usize>,
    // One persistent render target per physical slot
    slot_targets: Vec<RenderTexture2D>,
    form: Form,
}

impl PageEngine {
    pub fn new(config: CrossFadeConfig, image_dir: Option<PathBuf>, shuffle: bool) -> Self {
        let margin = RENDER_WIDTH as f32 * CONTENT_MARGIN;
        let top = TITLE_FONT_SIZE as f32 * 2.5;
        let style = ContainerStyle {
            bounds: Rectangle::new(
                margin,
                top,
                RENDER_WIDTH as f32 - margin * 2.0,
                (RENDER_HEIGHT - FORM_HEIGHT) as f32 - top - margin * 0.5,
            ),
            background: Some(Color::RAYWHITE),
        };
        let config = config.with_style(style);
        let form = Form::new(config.timeout);

        let fade = CrossFade::new(0, 0, config).on_transition(|from, to| {
            info!(from = ?from.id, to = ?to.id, "cross-fade started");
        });

        Self {
            pages: builtin_pages(),
            current_page: 0,
            image_dir,
            shuffle,
            fade,
            slot_targets: Vec::new(),
            form,
        }
    }

    fn load_images(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<()> {
        let Some(dir) = self.image_dir.as_deref() else {
            return Ok(());
        };
        let mut paths = load_sorted_image_paths(dir)?;
        if self.shuffle {
            paths.shuffle(&mut rand::rng());
        }

        for path in paths {
            match load_texture_with_exif_rotation(rl, thread, &path) {
                Ok(texture) => {
                    let title = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    self.pages.push(Page::image(title, texture));
                }
                Err(e) => warn!(error = %e, "skipping image"),
            }
        }
        Ok(())
    }
}

impl crate::engine::Engine for PageEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<bool> {
        self.load_images(rl, thread)
            .context("failed to load image pages")?;

        let bounds = self.fade.config().style.bounds;
        for _ in 0..2 {
            let target = rl
                .load_render_texture(thread, bounds.width as u32, bounds.height as u32)
                .map_err(|e| anyhow!("failed to create slot render texture: {e}"))?;
            self.slot_targets.push(target);
        }

        info!(pages = self.pages.len(), timeout = %self.fade.timeout(), "pages ready");
        Ok(!self.pages.is_empty())
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> Result<bool> {
        // 1. Controls
        for event in self.form.handle_input(rl) {
            match event {
                FormEvent::NextPage => {
                    self.current_page = (self.current_page + 1) % self.pages.len();
                    info!(page = self.current_page, "next page");
                }
                FormEvent::TimeoutChanged(timeout) => {
                    self.fade.set_timeout(timeout);
                    info!(%timeout, "timeout changed");
                }
            }
        }

        // 2. Advance fades and timers, then render the cross-fade
        self.fade.tick(dt);
        let (slots, style) = {
            let frame = self.fade.render(self.current_page, self.current_page)?;
            let slots = frame.draw_order().map(|view| SlotDraw {
                target: target_index(view.handle.id),
                content: view.content.copied(),
                opacity: view.opacity,
                frozen: view.frozen,
            });
            (slots, *frame.style)
        };

        // 3. Redraw slot targets, frozen ones keep their last picture
        let slot_bounds = Rectangle::new(0.0, 0.0, style.bounds.width, style.bounds.height);
        for slot in slots.iter().filter(|slot| !slot.frozen) {
            let mut d = rl.begin_texture_mode(thread, &mut self.slot_targets[slot.target]);
            d.clear_background(Color::BLANK);
            if let Some(page) = slot.content.and_then(|index| self.pages.get(index)) {
                page.draw(&mut d, slot_bounds);
            }
        }

        // 4. Compose the page: title, container, both slots back to front
        {
            let mut d = rl.begin_texture_mode(thread, framebuffer);
            d.clear_background(Color::WHITE);

            let title = &self.pages[self.current_page].title;
            d.draw_text(title, style.bounds.x as i32, TITLE_FONT_SIZE / 2, TITLE_FONT_SIZE, Color::DARKGRAY);

            if let Some(background) = style.background {
                d.draw_rectangle_rec(style.bounds, background);
            }

            for slot in slots.iter().filter(|slot| slot.opacity > 0.0) {
                let target = &self.slot_targets[slot.target];
                d.draw_texture_pro(
                    target,
                    // Render textures are stored upside down
                    Rectangle::new(0.0, 0.0, target.width() as f32, -(target.height() as f32)),
                    style.bounds,
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::new(255, 255, 255, (slot.opacity * 255.0).round() as u8),
                );
            }

            self.form.draw(&mut d);
        }

        // 5. The frame is on its targets: commit
        self.fade.commit();

        Ok(true)
    }
}
