//! Opacity cross-fade between two persistent slots.
//!
//! The host drives a [`CrossFade`] once per frame:
//!
//! 1. [`CrossFade::tick`] advances timers and slot fades,
//! 2. [`CrossFade::render`] reports the content key and content and gets a
//!    [`Frame`] describing both slots,
//! 3. the host draws the frame, then calls [`CrossFade::commit`], which
//!    starts the duration timer of a new transition and runs the
//!    transition callback.
//!
//! The two slots are never recreated. A key change only flips which slot is
//! the incoming one, so a slot keeps drawing into the same target for its
//! whole life.

pub mod config;
pub mod slot;
pub mod state;
pub mod timer;

use tracing::debug;

use crate::error::CrossFadeError;
use config::{ContainerStyle, CrossFadeConfig, Timeout};
use slot::{Slot, SlotHandle, SlotId, SlotRole, SlotView};
use state::{Phase, TransitionState};
use timer::{TimerId, Timers};

pub type TransitionCallback = Box<dyn FnMut(SlotHandle, SlotHandle)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    NotifyTransition,
    CompleteTransition,
}

/// Both slots as they should be drawn for one render.
#[derive(Debug)]
pub struct Frame<'a, C> {
    pub slots: [SlotView<'a, C>; 2],
    pub style: &'a ContainerStyle,
}

impl<'a, C> Frame<'a, C> {
    pub fn slot(&self, id: SlotId) -> &SlotView<'a, C> {
        match id {
            SlotId::First => &self.slots[0],
            SlotId::Second => &self.slots[1],
        }
    }

    pub fn from_slot(&self) -> &SlotView<'a, C> {
        self.slots
            .iter()
            .find(|view| view.role == SlotRole::From)
            .unwrap_or(&self.slots[0])
    }

    pub fn to_slot(&self) -> &SlotView<'a, C> {
        self.slots
            .iter()
            .find(|view| view.role == SlotRole::To)
            .unwrap_or(&self.slots[1])
    }

    /// Back to front: the outgoing slot is drawn first so it sits behind.
    pub fn draw_order(&self) -> [&SlotView<'a, C>; 2] {
        [self.from_slot(), self.to_slot()]
    }
}

pub struct CrossFade<K, C> {
    config: CrossFadeConfig,
    state: TransitionState<C>,
    slots: [Slot; 2],
    last_key: K,

    timers: Timers<Task>,
    pending_completion: Option<TimerId>,
    pending_notification: Option<TimerId>,
    effect_pending: bool,

    on_transition: Option<TransitionCallback>,
    mounted: bool,
}

impl<K: PartialEq + Clone, C> CrossFade<K, C> {
    /// Mounts the component showing `content` under `key`.
    pub fn new(key: K, content: C, config: CrossFadeConfig) -> Self {
        Self {
            config,
            state: TransitionState::new(content),
            slots: [
                Slot::new(SlotId::First, SlotRole::From),
                Slot::new(SlotId::Second, SlotRole::To),
            ],
            last_key: key,
            timers: Timers::new(),
            pending_completion: None,
            pending_notification: None,
            effect_pending: false,
            on_transition: None,
            mounted: true,
        }
    }

    /// Called with `(from, to)` after each transition has been committed.
    pub fn on_transition<F>(mut self, callback: F) -> Self
    where
        F: FnMut(SlotHandle, SlotHandle) + 'static,
    {
        self.on_transition = Some(Box::new(callback));
        self
    }

    /// Takes effect for the next transition; a running fade keeps its timer.
    pub fn set_timeout(&mut self, timeout: Timeout) {
        self.config.timeout = timeout;
    }

    pub fn timeout(&self) -> Timeout {
        self.config.timeout
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn state(&self) -> &TransitionState<C> {
        &self.state
    }

    pub fn config(&self) -> &CrossFadeConfig {
        &self.config
    }

    /// Render pass: records a key change, if any, and describes both slots.
    pub fn render(&mut self, key: K, content: C) -> Result<Frame<'_, C>, CrossFadeError> {
        if !self.mounted {
            return Err(CrossFadeError::Unmounted);
        }

        if key != self.last_key {
            self.last_key = key;
            // The earlier completion must not end this transition
            if let Some(id) = self.pending_completion.take() {
                self.timers.cancel(id);
            }
            self.state.begin(content);
            self.effect_pending = true;

            let duration = self.config.timeout.as_secs_f32();
            let (first, second) = self.roles();
            self.slots[0].assign(first, duration);
            self.slots[1].assign(second, duration);
            debug!(swapped = self.state.swapped, timeout = %self.config.timeout, "content key changed");
        } else {
            self.state.current = content;
        }

        Ok(self.frame())
    }

    /// Commit phase: the slots are attached, a fresh transition gets its
    /// duration timer and the transition callback runs.
    pub fn commit(&mut self) {
        if !self.mounted {
            return;
        }
        for slot in self.slots.iter_mut() {
            slot.attached = true;
        }

        if self.effect_pending {
            self.effect_pending = false;
            if let Some(id) = self.pending_notification.take() {
                self.timers.cancel(id);
            }
            self.pending_completion = Some(
                self.timers
                    .schedule(self.config.timeout.as_secs_f32(), Task::CompleteTransition),
            );
            self.pending_notification = Some(self.timers.defer(Task::NotifyTransition));
        }

        for (id, task) in self.timers.flush_deferred() {
            self.run(id, task);
        }
    }

    /// Advances timers and slot fades by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.mounted {
            return;
        }
        for slot in self.slots.iter_mut() {
            slot.update(dt);
        }
        for (id, task) in self.timers.advance(dt) {
            self.run(id, task);
        }
    }

    fn run(&mut self, id: TimerId, task: Task) {
        match task {
            Task::NotifyTransition => {
                if self.pending_notification == Some(id) {
                    self.pending_notification = None;
                }
                self.notify();
            }
            Task::CompleteTransition => {
                if self.pending_completion != Some(id) {
                    return;
                }
                self.pending_completion = None;
                self.state.finish();
                debug!("cross-fade finished");
            }
        }
    }

    fn notify(&mut self) {
        let Some(callback) = self.on_transition.as_mut() else {
            return;
        };
        if !self.slots.iter().all(|slot| slot.attached) {
            debug!("slots not attached, skipping transition callback");
            return;
        }
        let (from, to) = if self.state.swapped {
            (self.slots[1].handle, self.slots[0].handle)
        } else {
            (self.slots[0].handle, self.slots[1].handle)
        };
        callback(from, to);
    }

    /// Roles of the first and second slot for the current assignment.
    fn roles(&self) -> (SlotRole, SlotRole) {
        if self.state.swapped {
            (SlotRole::To, SlotRole::From)
        } else {
            (SlotRole::From, SlotRole::To)
        }
    }

    fn frame(&self) -> Frame<'_, C> {
        Frame {
            slots: [self.view(&self.slots[0]), self.view(&self.slots[1])],
            style: &self.config.style,
        }
    }

    fn view<'a>(&'a self, slot: &'a Slot) -> SlotView<'a, C> {
        let transitioning = self.state.is_transitioning();
        let (content, frozen) = match slot.role {
            SlotRole::To => (Some(&self.state.current), false),
            SlotRole::From if transitioning => (self.state.previous.as_ref(), false),
            SlotRole::From => (None, self.config.freeze_hidden),
        };
        SlotView {
            handle: slot.handle,
            role: slot.role,
            content,
            opacity: slot.opacity(),
            frozen,
        }
    }
}

impl<K, C> CrossFade<K, C> {
    /// Unmounts: cancels every pending timer and notification. Safe to call
    /// more than once.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.timers.clear();
        self.pending_completion = None;
        self.pending_notification = None;
        self.effect_pending = false;
        self.on_transition = None;
        for slot in self.slots.iter_mut() {
            slot.attached = false;
        }
        debug!("cross-fade torn down");
    }

    /// Whether a duration timer is still waiting to end a transition.
    pub fn has_pending_completion(&self) -> bool {
        self.pending_completion
            .is_some_and(|id| self.timers.is_pending(id))
    }
}

impl<K, C> Drop for CrossFade<K, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fade(timeout_ms: i64) -> CrossFade<u32, &'static str> {
        CrossFade::new(
            0,
            "zero",
            CrossFadeConfig::default().with_timeout(Timeout::from_millis(timeout_ms)),
        )
    }

    #[test]
    fn first_render_does_not_transition() {
        let mut fade = fade(100);
        let frame = fade.render(0, "zero").unwrap();
        assert_eq!(frame.to_slot().content, Some(&"zero"));
        assert_eq!(frame.from_slot().content, None);
        assert_eq!(frame.slot(SlotId::Second).role, SlotRole::To);
        fade.commit();
        assert_eq!(fade.phase(), Phase::Idle);
    }

    #[test]
    fn zero_timeout_stays_transitioning_until_next_tick() {
        let mut fade = fade(0);
        fade.render(0, "zero").unwrap();
        fade.commit();
        fade.render(1, "one").unwrap();
        fade.commit();
        assert!(fade.is_transitioning());

        fade.tick(0.0);
        assert!(!fade.is_transitioning());
    }

    #[test]
    fn negative_timeout_behaves_like_zero() {
        let mut fade = fade(-50);
        fade.render(1, "one").unwrap();
        fade.commit();
        assert!(fade.is_transitioning());
        fade.tick(0.016);
        assert_eq!(fade.phase(), Phase::Idle);
    }

    #[test]
    fn render_after_teardown_is_rejected() {
        let mut fade = fade(100);
        fade.teardown();
        fade.teardown();
        assert!(!fade.is_mounted());
        assert!(matches!(fade.render(1, "one"), Err(CrossFadeError::Unmounted)));
    }

    #[test]
    fn freeze_can_be_disabled() {
        let mut fade = CrossFade::new(0, "zero", CrossFadeConfig::default().with_freeze_hidden(false));
        let frame = fade.render(0, "zero").unwrap();
        assert!(!frame.from_slot().frozen);
    }

    #[test]
    fn callback_sees_slot_that_was_showing_old_content() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let mut fade = fade(100).on_transition(move |from, to| seen.borrow_mut().push((from.id, to.id)));

        fade.render(0, "zero").unwrap();
        fade.commit();
        fade.render(1, "one").unwrap();
        fade.commit();
        fade.render(2, "two").unwrap();
        fade.commit();

        assert_eq!(
            *calls.borrow(),
            vec![(SlotId::Second, SlotId::First), (SlotId::First, SlotId::Second)]
        );
    }
}
