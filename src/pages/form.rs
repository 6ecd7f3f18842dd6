use raylib::prelude::*;
use crossfade::constants::*;
use crossfade::Timeout;

#[derive(Debug, PartialEq)]
pub enum FormEvent {
    NextPage,
    TimeoutChanged(Timeout),
}

/// Control strip: a "Next page" button and an editable timeout field.
pub struct Form {
    timeout_text: String,
    valid: bool,
    button: Rectangle,
}

impl Form {
    pub fn new(timeout: Timeout) -> Self {
        let top = (RENDER_HEIGHT - FORM_HEIGHT) as f32;
        Self {
            timeout_text: timeout.as_millis().to_string(),
            valid: true,
            button: Rectangle::new(40.0, top + 30.0, 300.0, 60.0),
        }
    }

    /// Maps a window-space mouse position to framebuffer space.
    fn to_render_space(rl: &RaylibHandle, point: Vector2) -> Vector2 {
        let sx = RENDER_WIDTH as f32 / rl.get_screen_width().max(1) as f32;
        let sy = RENDER_HEIGHT as f32 / rl.get_screen_height().max(1) as f32;
        Vector2::new(point.x * sx, point.y * sy)
    }

    pub fn handle_input(&mut self, rl: &mut RaylibHandle) -> Vec<FormEvent> {
        let mut events = Vec::new();

        let clicked = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
            && self.button.check_collision_point_rec(Self::to_render_space(rl, rl.get_mouse_position()));
        if clicked || rl.is_key_pressed(KeyboardKey::KEY_RIGHT) || rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            events.push(FormEvent::NextPage);
        }

        let mut edited = false;
        while let Some(c) = rl.get_char_pressed() {
            if c.is_ascii_digit() || c == '-' {
                self.timeout_text.push(c);
                edited = true;
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_BACKSPACE) {
            self.timeout_text.pop();
            edited = true;
        }

        if edited {
            match self.timeout_text.parse::<Timeout>() {
                Ok(timeout) => {
                    self.valid = true;
                    events.push(FormEvent::TimeoutChanged(timeout));
                }
                // Keep the last good timeout until the text parses again
                Err(_) => self.valid = false,
            }
        }

        events
    }

    pub fn draw(&self, d: &mut impl RaylibDraw) {
        let top = RENDER_HEIGHT - FORM_HEIGHT;
        d.draw_rectangle(0, top, RENDER_WIDTH, FORM_HEIGHT, Color::new(0x26, 0x32, 0x38, 0xff));

        d.draw_rectangle_rec(self.button, Color::LIGHTGRAY);
        d.draw_text(
            "Next page",
            self.button.x as i32 + 60,
            self.button.y as i32 + 14,
            32,
            Color::BLACK,
        );

        let label_x = (self.button.x + self.button.width) as i32 + 80;
        d.draw_text("Timeout (ms):", label_x, top + 44, 32, Color::WHITE);
        let color = if self.valid { Color::WHITE } else { Color::RED };
        d.draw_text(&self.timeout_text, label_x + 260, top + 44, 32, color);
    }
}
