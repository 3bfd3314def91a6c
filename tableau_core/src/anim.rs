// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation queue types.
//!
//! Each node owns an [`AnimationQueue`]: a FIFO of operations processed one
//! at a time. An `Animate` operation applies its target style immediately and
//! records a [`Transition`] describing how the host should interpolate to it;
//! the operation then waits on a single-fire completion. Whichever of the
//! following arrives first consumes the completion:
//!
//! - a transition-end notification from the host
//!   ([`SceneTree::transition_end`](crate::scene::SceneTree::transition_end)),
//! - the deadline passing
//!   ([`SceneTree::advance_animations`](crate::scene::SceneTree::advance_animations)),
//! - a forced [`clear`](crate::scene::Animator::clear).
//!
//! Later triggers for the same operation find the queue idle and are ignored.
//! Hosts that report one end per animated property, or that deliver an end
//! after the queue has moved on, should complete through
//! [`SceneTree::transition_end_of`](crate::scene::SceneTree::transition_end_of)
//! with the [`step`](AnimationQueue::step) the notification belongs to.
//!
//! The queue logic itself lives on [`SceneTree`](crate::scene::SceneTree),
//! because callbacks receive the tree and may restyle, re-animate or destroy
//! the node they run for.

use std::collections::VecDeque;

use crate::scene::{NodeId, SceneTree};
use crate::style::StyleUpdate;
use crate::time::{Duration, HostTime};

/// Default transition duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

/// Timing curve of a transition, named after the CSS keywords.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// `ease`.
    #[default]
    Ease,
    /// `ease-in`.
    EaseIn,
    /// `ease-out`.
    EaseOut,
    /// `ease-in-out`.
    EaseInOut,
    /// `linear`.
    Linear,
}

impl Easing {
    /// Returns the CSS timing-function keyword.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Linear => "linear",
        }
    }
}

/// Duration and easing of one animated step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    /// How long the host interpolates, and the completion timeout.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::Ease,
        }
    }
}

impl Transition {
    /// Creates a transition.
    #[must_use]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Creates a transition with the default easing.
    #[must_use]
    pub const fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::Ease,
        }
    }
}

/// A callback run when an animation step completes.
///
/// It receives the tree and the node the queue belongs to.
pub type AnimCallback<A> = Box<dyn FnOnce(&mut SceneTree<A>, NodeId)>;

/// One queued operation.
pub(crate) enum AnimOp<A> {
    /// Apply `props` under `transition`, then wait for completion.
    Animate {
        props: StyleUpdate,
        transition: Transition,
        callback: Option<AnimCallback<A>>,
    },
    /// Wait for `duration`, then complete.
    Wait {
        duration: Duration,
        callback: Option<AnimCallback<A>>,
    },
    /// Run immediately.
    Callback(AnimCallback<A>),
}

/// What satisfied a completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionSource {
    /// The host reported the end of the CSS transition.
    TransitionEnd,
    /// The deadline passed.
    Timeout,
    /// The queue was cleared.
    Cleared,
}

/// The single-fire end of an in-flight step.
pub(crate) struct Completion<A> {
    pub(crate) deadline: HostTime,
    pub(crate) callback: Option<AnimCallback<A>>,
}

/// Queue state.
pub(crate) enum AnimState<A> {
    Idle,
    Animating(Completion<A>),
}

/// Public view of a queue's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimPhase {
    /// Nothing in flight.
    Idle,
    /// A step is in flight and completes no later than `deadline`.
    Animating {
        /// Timeout of the in-flight step.
        deadline: HostTime,
    },
}

/// Per-node animation queue.
pub struct AnimationQueue<A> {
    pub(crate) ops: VecDeque<AnimOp<A>>,
    pub(crate) state: AnimState<A>,
    pub(crate) paused: bool,
    /// Transition of the in-flight `Animate` step, if any.
    pub(crate) transition: Option<Transition>,
    /// Number of steps started so far; never reset by a clear.
    pub(crate) step: u64,
}

impl<A> Default for AnimationQueue<A> {
    fn default() -> Self {
        Self {
            ops: VecDeque::new(),
            state: AnimState::Idle,
            paused: false,
            transition: None,
            step: 0,
        }
    }
}

impl<A> AnimationQueue<A> {
    /// Returns the queue's phase.
    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        match &self.state {
            AnimState::Idle => AnimPhase::Idle,
            AnimState::Animating(c) => AnimPhase::Animating {
                deadline: c.deadline,
            },
        }
    }

    /// Returns `true` while a step is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimState::Animating(_))
    }

    /// Returns the number of operations waiting behind the in-flight step.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if dequeuing is suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the transition of the in-flight `Animate` step.
    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Returns the serial of the most recently started step.
    ///
    /// Every `Animate` or `Wait` step that starts gets the next serial, so a
    /// completion tagged with an older serial belongs to a step that has
    /// already ended.
    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Drops all state, returning the in-flight callback if there was one.
    pub(crate) fn reset(&mut self) -> Option<AnimCallback<A>> {
        self.ops.clear();
        self.transition = None;
        match core::mem::replace(&mut self.state, AnimState::Idle) {
            AnimState::Idle => None,
            AnimState::Animating(c) => c.callback,
        }
    }
}

impl<A> core::fmt::Debug for AnimationQueue<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationQueue")
            .field("phase", &self.phase())
            .field("pending", &self.ops.len())
            .field("paused", &self.paused)
            .field("transition", &self.transition)
            .field("step", &self.step)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = Transition::default();
        assert_eq!(t.duration, Duration::from_millis(600));
        assert_eq!(t.easing.css_name(), "ease");
        let q = AnimationQueue::<()>::default();
        assert_eq!(q.phase(), AnimPhase::Idle);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn easing_names() {
        let names: Vec<_> = [
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::Linear,
        ]
        .iter()
        .map(|e| e.css_name())
        .collect();
        assert_eq!(
            names,
            ["ease", "ease-in", "ease-out", "ease-in-out", "linear"]
        );
    }

    #[test]
    fn reset_returns_in_flight_callback() {
        let mut q = AnimationQueue::<()>::default();
        q.state = AnimState::Animating(Completion {
            deadline: HostTime(10),
            callback: Some(Box::new(|_, _| {})),
        });
        q.ops.push_back(AnimOp::Wait {
            duration: Duration(5),
            callback: None,
        });
        q.step = 3;
        assert!(q.reset().is_some());
        assert!(!q.is_animating());
        assert_eq!(q.step(), 3);
        assert_eq!(q.pending(), 0);
        assert!(q.reset().is_none());
    }
}
