// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation queue processing and the [`Animator`] builder.

use core::fmt;

use super::id::NodeId;
use super::store::SceneTree;
use crate::anim::{AnimCallback, AnimOp, AnimState, Completion, CompletionSource, Transition};
use crate::dirty;
use crate::style::{StyleProp, StyleUpdate};
use crate::time::{Duration, HostTime};

impl<A> SceneTree<A> {
    /// Returns a builder that queues animation steps on `id`.
    ///
    /// `now` is the current host time; it arms the deadline of any step that
    /// starts while the builder is in use.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn animate(&mut self, id: NodeId, now: HostTime) -> Animator<'_, A> {
        self.validate(id);
        Animator {
            tree: self,
            node: id,
            now,
        }
    }

    /// Completes the step in flight on `id` because the host reported the
    /// end of its CSS transition.
    ///
    /// Only `Animate` steps listen for this; a `Wait` step or an idle queue
    /// ignores it. Returns `true` if a step completed.
    pub fn transition_end(&mut self, id: NodeId, now: HostTime) -> bool {
        if !self.is_alive(id) || self.animation[id.idx as usize].transition.is_none() {
            return false;
        }
        self.complete_animation(id, CompletionSource::TransitionEnd, now)
    }

    /// Like [`transition_end`](Self::transition_end), but only completes the
    /// in-flight step if it is `step`.
    ///
    /// `step` is the [`AnimationQueue::step`](crate::anim::AnimationQueue::step)
    /// read when the host was handed the transition. An end reported for an
    /// earlier step, or a second end for a step that already completed, is
    /// ignored. Returns `true` if a step completed.
    pub fn transition_end_of(&mut self, id: NodeId, step: u64, now: HostTime) -> bool {
        if !self.is_alive(id) || self.animation[id.idx as usize].step != step {
            tracing::trace!(node = ?id, step, "transition end for a finished step ignored");
            return false;
        }
        self.transition_end(id, now)
    }

    /// Completes every in-flight step whose deadline is at or before `now`.
    ///
    /// Returns the number of steps completed. Callbacks run in slot order and
    /// may start new steps; a step started here is not completed in the same
    /// call unless its deadline has also passed.
    pub fn advance_animations(&mut self, now: HostTime) -> usize {
        let due: Vec<NodeId> = (0..self.len)
            .filter(|&idx| {
                matches!(
                    &self.animation[idx as usize].state,
                    AnimState::Animating(c) if c.deadline <= now
                )
            })
            .map(|idx| self.node_id(idx))
            .collect();

        let mut completed = 0;
        for id in due {
            if !self.is_alive(id) {
                continue;
            }
            let still_due = matches!(
                &self.animation[id.idx as usize].state,
                AnimState::Animating(c) if c.deadline <= now
            );
            if still_due && self.complete_animation(id, CompletionSource::Timeout, now) {
                completed += 1;
            }
        }
        completed
    }

    /// Consumes the in-flight completion of `id` and moves on to the next
    /// queued step.
    ///
    /// Returns `false` if nothing was in flight.
    fn complete_animation(&mut self, id: NodeId, source: CompletionSource, now: HostTime) -> bool {
        let queue = &mut self.animation[id.idx as usize];
        let AnimState::Animating(completion) = core::mem::replace(&mut queue.state, AnimState::Idle)
        else {
            tracing::trace!(node = ?id, ?source, "completion ignored, queue idle");
            return false;
        };
        if queue.transition.take().is_some() {
            self.dirty.mark(id.idx, dirty::TRANSITION);
        }
        tracing::trace!(node = ?id, ?source, "animation step complete");

        if let Some(callback) = completion.callback {
            callback(self, id);
            if !self.is_alive(id) {
                return true;
            }
        }
        self.process_animation(id, now);
        true
    }

    /// Starts queued steps until one is in flight, the queue is empty, or
    /// the queue is paused.
    fn process_animation(&mut self, id: NodeId, now: HostTime) {
        loop {
            let queue = &mut self.animation[id.idx as usize];
            if queue.paused || queue.is_animating() {
                return;
            }
            let Some(op) = queue.ops.pop_front() else {
                return;
            };
            match op {
                AnimOp::Animate {
                    props,
                    transition,
                    callback,
                } => {
                    queue.step += 1;
                    queue.transition = Some(transition);
                    queue.state = AnimState::Animating(Completion {
                        deadline: now.saturating_add(transition.duration),
                        callback,
                    });
                    self.dirty.mark(id.idx, dirty::TRANSITION);
                    for prop in props.iter() {
                        let _ = self.apply_prop(id.idx, prop);
                    }
                    return;
                }
                AnimOp::Wait { duration, callback } => {
                    queue.step += 1;
                    queue.state = AnimState::Animating(Completion {
                        deadline: now.saturating_add(duration),
                        callback,
                    });
                    return;
                }
                AnimOp::Callback(callback) => {
                    callback(self, id);
                    if !self.is_alive(id) {
                        return;
                    }
                }
            }
        }
    }

    fn enqueue_animation(&mut self, id: NodeId, op: AnimOp<A>, now: HostTime) {
        let queue = &mut self.animation[id.idx as usize];
        queue.ops.push_back(op);
        if queue.ops.len() == 1 && !queue.is_animating() {
            self.process_animation(id, now);
        }
    }

    /// Drops queued steps and forces the in-flight step to complete.
    ///
    /// The in-flight callback runs before this returns.
    fn clear_animation(&mut self, id: NodeId) {
        let queue = &mut self.animation[id.idx as usize];
        let had_transition = queue.transition.is_some();
        let callback = queue.reset();
        if had_transition {
            self.dirty.mark(id.idx, dirty::TRANSITION);
        }
        if let Some(callback) = callback {
            tracing::trace!(node = ?id, source = ?CompletionSource::Cleared, "animation step complete");
            callback(self, id);
        }
    }
}

/// Chainable animation surface for one node.
///
/// Every method returns the builder. Once a callback destroys the node, the
/// remaining calls in the chain do nothing.
///
/// ```
/// use tableau_core::anim::Transition;
/// use tableau_core::scene::SceneTree;
/// use tableau_core::style::StyleUpdate;
/// use tableau_core::time::{Duration, HostTime};
///
/// let mut tree = SceneTree::<()>::new();
/// let node = tree.create_node();
/// let _ = tree
///     .animate(node, HostTime(0))
///     .then(StyleUpdate::new().x(100.0), Transition::default())
///     .wait(Duration::from_millis(200))
///     .then(StyleUpdate::new().opacity(0.0), Transition::default());
///
/// // The first step applied its target style immediately.
/// assert_eq!(tree.style(node).x, 100.0);
/// ```
pub struct Animator<'a, A> {
    tree: &'a mut SceneTree<A>,
    node: NodeId,
    now: HostTime,
}

impl<A> fmt::Debug for Animator<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("node", &self.node)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl<A: 'static> Animator<'_, A> {
    /// Returns the node being animated.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn alive(&self) -> bool {
        self.tree.is_alive(self.node)
    }

    fn push(self, op: AnimOp<A>) -> Self {
        if self.alive() {
            self.tree.enqueue_animation(self.node, op, self.now);
        }
        self
    }

    /// Queues a transition to `update`.
    ///
    /// The step completes when the host reports the transition's end or once
    /// `transition.duration` has passed. A zero duration is kept as is: the
    /// step completes on the next [`SceneTree::advance_animations`]. Use
    /// [`Transition::default`] for the 600 ms `ease` default.
    #[must_use = "the builder is only useful for chaining"]
    pub fn then(self, update: impl Into<StyleUpdate>, transition: Transition) -> Self {
        self.push(AnimOp::Animate {
            props: update.into(),
            transition,
            callback: None,
        })
    }

    /// Queues a transition to `update` and runs `callback` when it completes.
    #[must_use = "the builder is only useful for chaining"]
    pub fn then_with(
        self,
        update: impl Into<StyleUpdate>,
        transition: Transition,
        callback: impl FnOnce(&mut SceneTree<A>, NodeId) + 'static,
    ) -> Self {
        self.push(AnimOp::Animate {
            props: update.into(),
            transition,
            callback: Some(Box::new(callback)),
        })
    }

    /// Clears the queue, then starts a transition to `update`.
    #[must_use = "the builder is only useful for chaining"]
    pub fn now(self, update: impl Into<StyleUpdate>, transition: Transition) -> Self {
        self.clear().then(update, transition)
    }

    /// Queues a pause.
    #[must_use = "the builder is only useful for chaining"]
    pub fn wait(self, duration: Duration) -> Self {
        self.push(AnimOp::Wait {
            duration,
            callback: None,
        })
    }

    /// Queues a pause and runs `callback` when it ends.
    #[must_use = "the builder is only useful for chaining"]
    pub fn wait_with(
        self,
        duration: Duration,
        callback: impl FnOnce(&mut SceneTree<A>, NodeId) + 'static,
    ) -> Self {
        self.push(AnimOp::Wait {
            duration,
            callback: Some(Box::new(callback)),
        })
    }

    /// Queues a callback that runs as soon as the steps before it complete.
    #[must_use = "the builder is only useful for chaining"]
    pub fn callback(self, callback: impl FnOnce(&mut SceneTree<A>, NodeId) + 'static) -> Self {
        let callback: AnimCallback<A> = Box::new(callback);
        self.push(AnimOp::Callback(callback))
    }

    /// Discards queued steps and completes the in-flight one immediately.
    #[must_use = "the builder is only useful for chaining"]
    pub fn clear(self) -> Self {
        if self.alive() {
            self.tree.clear_animation(self.node);
        }
        self
    }

    /// Stops starting new steps. The in-flight step still completes.
    #[must_use = "the builder is only useful for chaining"]
    pub fn pause(self) -> Self {
        if self.alive() {
            self.tree.animation[self.node.idx as usize].paused = true;
        }
        self
    }

    /// Resumes starting steps.
    #[must_use = "the builder is only useful for chaining"]
    pub fn resume(self) -> Self {
        if self.alive() {
            self.tree.animation[self.node.idx as usize].paused = false;
            self.tree.process_animation(self.node, self.now);
        }
        self
    }

    /// Shows the node and fades it to full opacity.
    #[must_use = "the builder is only useful for chaining"]
    pub fn fade_in(self, transition: Transition) -> Self {
        self.fade_in_with(transition, |_, _| {})
    }

    /// Like [`fade_in`](Self::fade_in), running `callback` once opaque.
    ///
    /// A node that is already opaque runs `callback` immediately and queues
    /// nothing.
    #[must_use = "the builder is only useful for chaining"]
    pub fn fade_in_with(
        self,
        transition: Transition,
        callback: impl FnOnce(&mut SceneTree<A>, NodeId) + 'static,
    ) -> Self {
        if !self.alive() {
            return self;
        }
        self.tree.set_visible(self.node, true);
        if self.tree.style(self.node).opacity >= 1.0 {
            callback(&mut *self.tree, self.node);
            return self;
        }
        self.then_with(StyleProp::Opacity(1.0), transition, callback)
    }

    /// Fades the node out and hides it.
    #[must_use = "the builder is only useful for chaining"]
    pub fn fade_out(self, transition: Transition) -> Self {
        self.fade_out_with(transition, |_, _| {})
    }

    /// Like [`fade_out`](Self::fade_out), running `callback` once hidden.
    ///
    /// A node that is already transparent is hidden and runs `callback`
    /// immediately.
    #[must_use = "the builder is only useful for chaining"]
    pub fn fade_out_with(
        self,
        transition: Transition,
        callback: impl FnOnce(&mut SceneTree<A>, NodeId) + 'static,
    ) -> Self {
        if !self.alive() {
            return self;
        }
        if self.tree.style(self.node).opacity <= 0.0 {
            self.tree.set_visible(self.node, false);
            callback(&mut *self.tree, self.node);
            return self;
        }
        self.then_with(
            StyleProp::Opacity(0.0),
            transition,
            move |tree: &mut SceneTree<A>, id| {
                tree.set_visible(id, false);
                callback(tree, id);
            },
        )
    }
}

/// Pausing and resuming outside a builder chain.
impl<A> SceneTree<A> {
    /// Stops `id`'s queue from starting new steps.
    pub fn pause_animation(&mut self, id: NodeId) {
        self.validate(id);
        self.animation[id.idx as usize].paused = true;
    }

    /// Lets `id`'s queue start steps again, beginning at `now`.
    pub fn resume_animation(&mut self, id: NodeId, now: HostTime) {
        self.validate(id);
        self.animation[id.idx as usize].paused = false;
        self.process_animation(id, now);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::anim::{AnimPhase, Easing};

    fn t(ms: u64) -> Transition {
        Transition::new(Duration::from_millis(ms), Easing::Linear)
    }

    #[test]
    fn animate_applies_target_and_arms_deadline() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree.animate(n, HostTime(1_000)).then(StyleUpdate::new().x(50.0), t(250));

        assert_eq!(tree.style(n).x, 50.0);
        assert_eq!(
            tree.animation(n).phase(),
            AnimPhase::Animating {
                deadline: HostTime(1_250)
            }
        );
        assert_eq!(tree.animation(n).transition(), Some(t(250)));
    }

    #[test]
    fn steps_run_in_fifo_order() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree
            .animate(n, HostTime(0))
            .then(StyleUpdate::new().x(1.0), t(100))
            .then(StyleUpdate::new().x(2.0), t(100));
        assert_eq!(tree.style(n).x, 1.0);
        assert_eq!(tree.animation(n).pending(), 1);

        assert_eq!(tree.advance_animations(HostTime(50)), 0);
        assert_eq!(tree.advance_animations(HostTime(100)), 1);
        assert_eq!(tree.style(n).x, 2.0);
        assert_eq!(
            tree.animation(n).phase(),
            AnimPhase::Animating {
                deadline: HostTime(200)
            }
        );
    }

    #[test]
    fn completion_fires_once() {
        let fired = Rc::new(RefCell::new(0));
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let counter = fired.clone();
        let _ = tree.animate(n, HostTime(0)).then_with(
            StyleUpdate::new().opacity(0.5),
            t(100),
            move |_, _| *counter.borrow_mut() += 1,
        );

        assert!(tree.transition_end(n, HostTime(90)));
        assert_eq!(tree.advance_animations(HostTime(100)), 0);
        assert!(!tree.transition_end(n, HostTime(110)));
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn transition_end_of_ignores_earlier_steps() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree
            .animate(n, HostTime(0))
            .then(StyleUpdate::new().x(50.0).opacity(0.5), t(100))
            .then(StyleUpdate::new().y(20.0), t(100))
            .then(StyleUpdate::new().x(0.0), t(100));
        let first = tree.animation(n).step();

        // Two properties ended, so the host reports the first step twice.
        assert!(tree.transition_end_of(n, first, HostTime(100)));
        assert!(!tree.transition_end_of(n, first, HostTime(100)));

        assert_eq!(tree.animation(n).step(), first + 1);
        assert_eq!(tree.style(n).y, 20.0);
        assert_eq!(tree.style(n).x, 50.0);
        assert_eq!(tree.animation(n).pending(), 1);
    }

    #[test]
    fn zero_duration_completes_on_next_advance() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree
            .animate(n, HostTime(40))
            .then(StyleUpdate::new().x(5.0), t(0))
            .then(StyleUpdate::new().x(6.0), t(100));
        assert_eq!(
            tree.animation(n).phase(),
            AnimPhase::Animating {
                deadline: HostTime(40)
            }
        );
        assert_eq!(tree.advance_animations(HostTime(40)), 1);
        assert_eq!(tree.style(n).x, 6.0);
    }

    #[test]
    fn transition_end_ignores_wait_steps() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree.animate(n, HostTime(0)).wait(Duration::from_millis(100));
        assert!(!tree.transition_end(n, HostTime(10)));
        assert_eq!(tree.advance_animations(HostTime(100)), 1);
        assert_eq!(tree.animation(n).phase(), AnimPhase::Idle);
    }

    #[test]
    fn callbacks_run_between_steps() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let (l1, l2) = (log.clone(), log.clone());
        let _ = tree
            .animate(n, HostTime(0))
            .callback(move |_, _| l1.borrow_mut().push("first"))
            .wait(Duration::from_millis(10))
            .callback(move |_, _| l2.borrow_mut().push("second"));
        assert_eq!(*log.borrow(), ["first"]);

        let _ = tree.advance_animations(HostTime(10));
        assert_eq!(*log.borrow(), ["first", "second"]);
        assert_eq!(tree.animation(n).phase(), AnimPhase::Idle);
    }

    #[test]
    fn clear_runs_in_flight_callback_and_drops_queue() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let (l1, l2) = (log.clone(), log.clone());
        let _ = tree
            .animate(n, HostTime(0))
            .then_with(StyleUpdate::new().x(10.0), t(100), move |_, _| {
                l1.borrow_mut().push("in flight");
            })
            .callback(move |_, _| l2.borrow_mut().push("queued"))
            .clear();

        assert_eq!(*log.borrow(), ["in flight"]);
        assert_eq!(tree.animation(n).phase(), AnimPhase::Idle);
        assert_eq!(tree.animation(n).pending(), 0);
        assert_eq!(tree.advance_animations(HostTime(500)), 0);
        assert_eq!(*log.borrow(), ["in flight"]);
    }

    #[test]
    fn now_replaces_the_queue() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree
            .animate(n, HostTime(0))
            .then(StyleUpdate::new().x(1.0), t(100))
            .then(StyleUpdate::new().x(2.0), t(100))
            .now(StyleUpdate::new().x(9.0), t(50));
        assert_eq!(tree.style(n).x, 9.0);
        assert_eq!(tree.animation(n).pending(), 0);
    }

    #[test]
    fn pause_holds_queue_but_in_flight_completes() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree
            .animate(n, HostTime(0))
            .then(StyleUpdate::new().x(1.0), t(100))
            .then(StyleUpdate::new().x(2.0), t(100))
            .pause();

        assert_eq!(tree.advance_animations(HostTime(100)), 1);
        assert_eq!(tree.style(n).x, 1.0);
        assert_eq!(tree.animation(n).phase(), AnimPhase::Idle);
        assert_eq!(tree.animation(n).pending(), 1);

        tree.resume_animation(n, HostTime(150));
        assert_eq!(tree.style(n).x, 2.0);
        assert_eq!(
            tree.animation(n).phase(),
            AnimPhase::Animating {
                deadline: HostTime(250)
            }
        );
    }

    #[test]
    fn fade_in_on_opaque_node_calls_back_without_queueing() {
        let called = Rc::new(RefCell::new(false));
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        tree.set_visible(n, false);
        let flag = called.clone();
        let _ = tree
            .animate(n, HostTime(0))
            .fade_in_with(Transition::default(), move |_, _| *flag.borrow_mut() = true);

        assert!(*called.borrow());
        assert!(tree.style(n).visible);
        assert_eq!(tree.animation(n).phase(), AnimPhase::Idle);
    }

    #[test]
    fn fade_in_from_transparent_animates() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        tree.update_style(n, &StyleUpdate::new().opacity(0.0).visible(false));
        let _ = tree.animate(n, HostTime(0)).fade_in(t(300));
        assert!(tree.style(n).visible);
        assert_eq!(tree.style(n).opacity, 1.0);
        assert!(tree.animation(n).is_animating());
    }

    #[test]
    fn fade_out_on_transparent_node_hides_immediately() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree.set_style_prop(n, StyleProp::Opacity(0.0));
        let _ = tree.animate(n, HostTime(0)).fade_out(Transition::default());
        assert!(!tree.style(n).visible);
        assert_eq!(tree.animation(n).phase(), AnimPhase::Idle);
    }

    #[test]
    fn fade_out_hides_on_completion() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree.animate(n, HostTime(0)).fade_out(t(200));
        assert_eq!(tree.style(n).opacity, 0.0);
        assert!(tree.style(n).visible);

        let _ = tree.advance_animations(HostTime(200));
        assert!(!tree.style(n).visible);
    }

    #[test]
    fn callback_may_destroy_its_node() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree
            .animate(n, HostTime(0))
            .callback(|tree, id| tree.destroy_node(id))
            .then(StyleUpdate::new().x(5.0), t(100));
        assert!(!tree.is_alive(n));
        assert_eq!(tree.advance_animations(HostTime(1_000)), 0);
    }

    #[test]
    fn callback_may_chain_more_animation() {
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let _ = tree.animate(n, HostTime(0)).then_with(
            StyleUpdate::new().x(1.0),
            t(100),
            |tree, id| {
                let _ = tree.animate(id, HostTime(100)).then(StyleUpdate::new().x(2.0), t(100));
            },
        );
        assert_eq!(tree.advance_animations(HostTime(100)), 1);
        assert_eq!(tree.style(n).x, 2.0);
        assert_eq!(
            tree.animation(n).phase(),
            AnimPhase::Animating {
                deadline: HostTime(200)
            }
        );
    }

    #[test]
    fn destroy_runs_in_flight_callback() {
        let called = Rc::new(RefCell::new(false));
        let mut tree = SceneTree::<()>::new();
        let n = tree.create_node();
        let flag = called.clone();
        let _ = tree.animate(n, HostTime(0)).wait_with(Duration::from_millis(100), move |_, _| {
            *flag.borrow_mut() = true;
        });
        tree.destroy_node(n);
        assert!(*called.borrow());
    }
}
