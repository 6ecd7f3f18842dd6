use raylib::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    First,
    Second,
}

/// Identity of a physical slot, passed to the transition callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    pub id: SlotId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    From, // Outgoing: fades to 0 and sits behind
    To,   // Incoming: fades to 1
}

impl SlotRole {
    pub fn target_opacity(self) -> f32 {
        match self {
            SlotRole::From => 0.0,
            SlotRole::To => 1.0,
        }
    }
}

/// Persistent render target. Slots are created once and only change role.
pub struct Slot {
    pub handle: SlotHandle,
    pub role: SlotRole,
    pub attached: bool,

    opacity: f32,
    fade: Option<ease::Tween>,
    fade_timer: f32,
    fade_duration: f32,
}

impl Slot {
    pub fn new(id: SlotId, role: SlotRole) -> Self {
        Self {
            handle: SlotHandle { id },
            role,
            attached: false,
            opacity: role.target_opacity(),
            fade: None,
            fade_timer: 0.0,
            fade_duration: 0.0,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Switches role and fades from the opacity reached so far.
    pub fn assign(&mut self, role: SlotRole, duration: f32) {
        if self.role == role {
            return;
        }
        self.role = role;
        let target = role.target_opacity();
        if duration <= 0.0 {
            self.opacity = target;
            self.fade = None;
            return;
        }
        self.fade = Some(ease::Tween::new(ease::cubic_in_out, self.opacity, target, duration));
        self.fade_timer = 0.0;
        self.fade_duration = duration;
    }

    pub fn update(&mut self, dt: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        self.fade_timer += dt;
        self.opacity = fade.apply(dt).clamp(0.0, 1.0);

        if self.fade_timer >= self.fade_duration {
            self.fade = None;
            self.opacity = self.role.target_opacity();
        }
    }
}

/// What a slot should show for one render.
#[derive(Debug)]
pub struct SlotView<'a, C> {
    pub handle: SlotHandle,
    pub role: SlotRole,
    /// `None` means draw nothing.
    pub content: Option<&'a C>,
    pub opacity: f32,
    /// Skip redrawing this slot; whatever it drew last is kept.
    pub frozen: bool,
}

impl<C> SlotView<'_, C> {
    pub fn target_opacity(&self) -> f32 {
        self.role.target_opacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_slot_starts_at_target_opacity() {
        assert_eq!(Slot::new(SlotId::First, SlotRole::From).opacity(), 0.0);
        assert_eq!(Slot::new(SlotId::Second, SlotRole::To).opacity(), 1.0);
    }

    #[test]
    fn fade_reaches_target_after_duration() {
        let mut slot = Slot::new(SlotId::First, SlotRole::From);
        slot.assign(SlotRole::To, 0.4);
        assert!(slot.is_fading());

        slot.update(0.2);
        assert!(slot.opacity() > 0.0 && slot.opacity() < 1.0);

        slot.update(0.2);
        assert!(!slot.is_fading());
        assert_eq!(slot.opacity(), 1.0);
    }

    #[test]
    fn zero_duration_snaps() {
        let mut slot = Slot::new(SlotId::Second, SlotRole::To);
        slot.assign(SlotRole::From, 0.0);
        assert!(!slot.is_fading());
        assert_eq!(slot.opacity(), 0.0);
    }

    #[test]
    fn reassigning_mid_fade_starts_from_current_opacity() {
        let mut slot = Slot::new(SlotId::First, SlotRole::From);
        slot.assign(SlotRole::To, 1.0);
        slot.update(0.5);
        let reached = slot.opacity();

        slot.assign(SlotRole::From, 1.0);
        slot.update(0.0);
        assert!((slot.opacity() - reached).abs() < 1e-4);
    }
}
