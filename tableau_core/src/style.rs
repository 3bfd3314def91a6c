// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node style state and the property update surface.
//!
//! [`Style`] is the plain-data bag of user-set properties stored for every
//! node. Callers never write it directly; they describe changes as
//! [`StyleProp`] values (usually collected in a [`StyleUpdate`]) and hand them
//! to [`SceneTree::update_style`](crate::scene::SceneTree::update_style),
//! which applies each property and keeps the ordering indices and dirty
//! channels in step.

use core::fmt;

use understory_dirty::Channel;

use crate::dirty;

/// A straight-alpha RGBA color with 8 bits per channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, `255` is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Formats the color as a CSS `#rrggbbaa` hex string.
    ///
    /// Both canvas `fillStyle` and element `background-color` accept it.
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_css())
    }
}

/// Canvas compositing mode applied while a node and its subtree paint.
///
/// A node with no composite operation inherits whatever its ancestors set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompositeOperation {
    /// Standard source-over alpha compositing.
    #[default]
    SourceOver,
    /// Draw only where the destination is opaque.
    SourceAtop,
    /// Keep the source only where it overlaps the destination.
    SourceIn,
    /// Keep the source only where it does not overlap the destination.
    SourceOut,
    /// Draw behind existing content.
    DestinationOver,
    /// Keep the destination only where it overlaps the source.
    DestinationIn,
    /// Keep the destination only where it does not overlap the source.
    DestinationOut,
    /// Additive blend.
    Lighter,
    /// Replace the destination.
    Copy,
    /// Exclusive or.
    Xor,
    /// Multiply blend.
    Multiply,
    /// Screen blend.
    Screen,
}

impl CompositeOperation {
    /// Returns the canvas `globalCompositeOperation` keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::SourceAtop => "source-atop",
            Self::SourceIn => "source-in",
            Self::SourceOut => "source-out",
            Self::DestinationOver => "destination-over",
            Self::DestinationIn => "destination-in",
            Self::DestinationOut => "destination-out",
            Self::Lighter => "lighter",
            Self::Copy => "copy",
            Self::Xor => "xor",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
        }
    }

    /// Returns the CSS `mix-blend-mode` keyword, if this operation has one.
    ///
    /// Porter-Duff operators have no element-level equivalent.
    #[must_use]
    pub const fn as_blend_mode(self) -> Option<&'static str> {
        match self {
            Self::SourceOver => Some("normal"),
            Self::Multiply => Some("multiply"),
            Self::Screen => Some("screen"),
            Self::Lighter => Some("plus-lighter"),
            _ => None,
        }
    }
}

/// User-set style of one node.
///
/// Lengths are in parent-local pixels, `r` is in radians.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Rotation around the anchor, in radians.
    pub r: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Whether the node (and its subtree) paints.
    pub visible: bool,
    /// Horizontal pivot for rotation and scale.
    pub anchor_x: f64,
    /// Vertical pivot for rotation and scale.
    pub anchor_y: f64,
    /// Extra horizontal translation.
    pub offset_x: f64,
    /// Extra vertical translation.
    pub offset_y: f64,
    /// Own opacity, multiplied down the ancestor chain.
    pub opacity: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Horizontal scale, multiplied with `scale`.
    pub scale_x: f64,
    /// Vertical scale, multiplied with `scale`.
    pub scale_y: f64,
    /// Stacking index among siblings.
    pub z_index: i32,
    /// Horizontal scroll offset of the node's content.
    pub scroll_left: f64,
    /// Vertical scroll offset of the node's content.
    pub scroll_top: f64,
    /// Mirror horizontally around the node's width.
    pub flip_x: bool,
    /// Mirror vertically around the node's height.
    pub flip_y: bool,
    /// Clip the subtree to `(0, 0, width, height)`.
    pub clip: bool,
    /// Fill painted under the node's own content.
    pub background_color: Option<Color>,
    /// Compositing mode for the subtree.
    pub composite_operation: Option<CompositeOperation>,
    /// Keep the anchor at the center whenever the size changes.
    pub center_anchor: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            r: 0.0,
            width: 0.0,
            height: 0.0,
            visible: true,
            anchor_x: 0.0,
            anchor_y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            opacity: 1.0,
            scale: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            z_index: 0,
            scroll_left: 0.0,
            scroll_top: 0.0,
            flip_x: false,
            flip_y: false,
            clip: false,
            background_color: None,
            composite_operation: None,
            center_anchor: false,
        }
    }
}

/// One property assignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleProp {
    /// Set `x`.
    X(f64),
    /// Set `y`.
    Y(f64),
    /// Add to `x`.
    Dx(f64),
    /// Add to `y`.
    Dy(f64),
    /// Set `r`.
    R(f64),
    /// Set `width`.
    Width(f64),
    /// Set `height`.
    Height(f64),
    /// Set `visible`.
    Visible(bool),
    /// Set `anchor_x`.
    AnchorX(f64),
    /// Set `anchor_y`.
    AnchorY(f64),
    /// Set `offset_x`.
    OffsetX(f64),
    /// Set `offset_y`.
    OffsetY(f64),
    /// Set `opacity`.
    Opacity(f64),
    /// Set `scale`.
    Scale(f64),
    /// Set `scale_x`.
    ScaleX(f64),
    /// Set `scale_y`.
    ScaleY(f64),
    /// Set `z_index`.
    ZIndex(i32),
    /// Set `scroll_left`.
    ScrollLeft(f64),
    /// Set `scroll_top`.
    ScrollTop(f64),
    /// Set `flip_x`.
    FlipX(bool),
    /// Set `flip_y`.
    FlipY(bool),
    /// Set `clip`.
    Clip(bool),
    /// Set or clear `background_color`.
    BackgroundColor(Option<Color>),
    /// Set or clear `composite_operation`.
    CompositeOperation(Option<CompositeOperation>),
    /// Set `center_anchor`.
    CenterAnchor(bool),
}

impl StyleProp {
    /// Returns the dirty channel this property reports on, if any.
    #[must_use]
    pub const fn channel(&self) -> Option<Channel> {
        match self {
            Self::X(_)
            | Self::Y(_)
            | Self::Dx(_)
            | Self::Dy(_)
            | Self::R(_)
            | Self::AnchorX(_)
            | Self::AnchorY(_)
            | Self::OffsetX(_)
            | Self::OffsetY(_)
            | Self::Scale(_)
            | Self::ScaleX(_)
            | Self::ScaleY(_)
            | Self::FlipX(_)
            | Self::FlipY(_)
            | Self::CenterAnchor(_) => Some(dirty::GEOMETRY),
            Self::Width(_) | Self::Height(_) => Some(dirty::SIZE),
            Self::Visible(_) => Some(dirty::VISIBILITY),
            Self::Opacity(_) => Some(dirty::OPACITY),
            Self::ZIndex(_) => Some(dirty::ORDER),
            Self::Clip(_) => Some(dirty::CLIP),
            Self::BackgroundColor(_) | Self::CompositeOperation(_) => Some(dirty::PAINT),
            Self::ScrollLeft(_) | Self::ScrollTop(_) => None,
        }
    }
}

impl Style {
    /// Applies one property. Returns `true` if the stored value changed.
    pub fn apply(&mut self, prop: StyleProp) -> bool {
        fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        }

        match prop {
            StyleProp::X(v) => set(&mut self.x, v),
            StyleProp::Y(v) => set(&mut self.y, v),
            StyleProp::Dx(v) => {
                let x = self.x + v;
                set(&mut self.x, x)
            }
            StyleProp::Dy(v) => {
                let y = self.y + v;
                set(&mut self.y, y)
            }
            StyleProp::R(v) => set(&mut self.r, v),
            StyleProp::Width(v) => set(&mut self.width, v),
            StyleProp::Height(v) => set(&mut self.height, v),
            StyleProp::Visible(v) => set(&mut self.visible, v),
            StyleProp::AnchorX(v) => set(&mut self.anchor_x, v),
            StyleProp::AnchorY(v) => set(&mut self.anchor_y, v),
            StyleProp::OffsetX(v) => set(&mut self.offset_x, v),
            StyleProp::OffsetY(v) => set(&mut self.offset_y, v),
            StyleProp::Opacity(v) => set(&mut self.opacity, v),
            StyleProp::Scale(v) => set(&mut self.scale, v),
            StyleProp::ScaleX(v) => set(&mut self.scale_x, v),
            StyleProp::ScaleY(v) => set(&mut self.scale_y, v),
            StyleProp::ZIndex(v) => set(&mut self.z_index, v),
            StyleProp::ScrollLeft(v) => set(&mut self.scroll_left, v),
            StyleProp::ScrollTop(v) => set(&mut self.scroll_top, v),
            StyleProp::FlipX(v) => set(&mut self.flip_x, v),
            StyleProp::FlipY(v) => set(&mut self.flip_y, v),
            StyleProp::Clip(v) => set(&mut self.clip, v),
            StyleProp::BackgroundColor(v) => set(&mut self.background_color, v),
            StyleProp::CompositeOperation(v) => set(&mut self.composite_operation, v),
            StyleProp::CenterAnchor(v) => set(&mut self.center_anchor, v),
        }
    }

    /// Moves the anchor to the center of the current size.
    ///
    /// Returns `true` if the anchor moved.
    pub fn recenter_anchor(&mut self) -> bool {
        let ax = self.width / 2.0;
        let ay = self.height / 2.0;
        let moved = self.anchor_x != ax || self.anchor_y != ay;
        self.anchor_x = ax;
        self.anchor_y = ay;
        moved
    }
}

/// An ordered batch of property assignments.
///
/// Properties apply in insertion order, so a later `Dx` sees an earlier `X`.
///
/// ```
/// use tableau_core::style::StyleUpdate;
///
/// let update = StyleUpdate::new().x(10.0).y(20.0).opacity(0.5);
/// assert_eq!(update.iter().count(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleUpdate {
    props: Vec<StyleProp>,
}

impl StyleUpdate {
    /// Creates an empty update.
    #[must_use]
    pub const fn new() -> Self {
        Self { props: Vec::new() }
    }

    /// Appends a property.
    #[must_use]
    pub fn with(mut self, prop: StyleProp) -> Self {
        self.props.push(prop);
        self
    }

    /// Appends `x`.
    #[must_use]
    pub fn x(self, v: f64) -> Self {
        self.with(StyleProp::X(v))
    }

    /// Appends `y`.
    #[must_use]
    pub fn y(self, v: f64) -> Self {
        self.with(StyleProp::Y(v))
    }

    /// Appends `r`.
    #[must_use]
    pub fn r(self, v: f64) -> Self {
        self.with(StyleProp::R(v))
    }

    /// Appends `width`.
    #[must_use]
    pub fn width(self, v: f64) -> Self {
        self.with(StyleProp::Width(v))
    }

    /// Appends `height`.
    #[must_use]
    pub fn height(self, v: f64) -> Self {
        self.with(StyleProp::Height(v))
    }

    /// Appends `width` and `height`.
    #[must_use]
    pub fn size(self, width: f64, height: f64) -> Self {
        self.width(width).height(height)
    }

    /// Appends `opacity`.
    #[must_use]
    pub fn opacity(self, v: f64) -> Self {
        self.with(StyleProp::Opacity(v))
    }

    /// Appends `scale`.
    #[must_use]
    pub fn scale(self, v: f64) -> Self {
        self.with(StyleProp::Scale(v))
    }

    /// Appends `visible`.
    #[must_use]
    pub fn visible(self, v: bool) -> Self {
        self.with(StyleProp::Visible(v))
    }

    /// Appends `z_index`.
    #[must_use]
    pub fn z_index(self, v: i32) -> Self {
        self.with(StyleProp::ZIndex(v))
    }

    /// Returns the properties in application order.
    pub fn iter(&self) -> impl Iterator<Item = StyleProp> + '_ {
        self.props.iter().copied()
    }

    /// Returns `true` if the update carries no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl FromIterator<StyleProp> for StyleUpdate {
    fn from_iter<I: IntoIterator<Item = StyleProp>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().collect(),
        }
    }
}

impl From<StyleProp> for StyleUpdate {
    fn from(prop: StyleProp) -> Self {
        Self { props: vec![prop] }
    }
}
