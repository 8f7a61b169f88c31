//! Primitives for working with decoration geometries.
//!
//! This module contains the core types [`Point`], [`Size`], [`Rectangle`] and
//! [`Margins`], which are used to describe borders, title bars, button cells and
//! shadow textures.
//!
//! All types in this module are generic over a [`Scalar`], which is a type that can act as a scalar
//! in a 2D coordinate space. Decoration geometry is computed in `i32`, while glyphs and
//! painter coordinates use `f32`. The [`Rect`], [`RectF`], [`PointF`] and [`Insets`]
//! aliases cover the common cases.
//!
//! ## Coordinate Spaces
//!
//! The geometry types are additionally generic over a marker type that implements
//! [`GeometryKind`]. Everything the decoration computes is [`Logical`]: painters map
//! it onto device pixels by the device pixel ratio.

use core::ops::{Add, Sub};

use std::marker::PhantomData;

pub mod marker {
    //! Marker types for marking Size, Point and Rectangle kind.
    //!
    //! This module contains the [`GeometryKind`] sealed trait,
    //! and its implementor [`Logical`].

    mod private {
        pub trait Sealed {}
    }

    use core::ops::{Add, Sub};

    /// A sealed trait for marking types as Scalars, that can be used in Points and Rectangles.
    pub trait Scalar:
        Sized
        + Copy
        + PartialEq
        + PartialOrd
        + Add<Self, Output = Self>
        + Sub<Self, Output = Self>
        + Default
    {
        /// The zero point of the Scalar. Usually, this is the additive identity of the Scalar.
        const ZERO: Self;

        /// Convert to this Scalar from an f64.
        fn from_f64(v: f64) -> Self;

        /// Convert this Scalar to an f64.
        fn to_f64(self) -> f64;

        /// The larger of `self` and `other`.
        #[inline]
        fn max_of(self, other: Self) -> Self {
            if other > self { other } else { self }
        }
    }

    macro_rules! __impl_scalar_integer {
        ($($targ:ty),+) => {
            $(
                impl Scalar for $targ {
                    const ZERO: Self = 0;

                    #[inline]
                    fn from_f64(v: f64) -> Self {
                        v as Self
                    }

                    #[inline]
                    fn to_f64(self) -> f64 {
                        self as f64
                    }
                }
            )+
        };
    }

    macro_rules! __impl_scalar_floating {
        ($($targ:ty),+) => {
            $(
                impl Scalar for $targ {
                    const ZERO: Self = 0.;

                    #[inline]
                    fn from_f64(v: f64) -> Self {
                        v as Self
                    }

                    #[inline]
                    fn to_f64(self) -> f64 {
                        self as f64
                    }
                }
            )+
        };
    }

    __impl_scalar_integer!(i32);
    __impl_scalar_floating!(f32, f64);

    /// A sealed trait defining geometry marker types.
    pub trait GeometryKind: Copy + PartialEq + core::fmt::Debug + private::Sealed {}

    macro_rules! __impl_geometrykind {
        {$(#[$outer:meta])? $targ:ident} => {
            $(
                #[$outer]
            )?
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $targ;

            impl private::Sealed for $targ {}
            impl GeometryKind for $targ {}
        };
    }

    __impl_geometrykind!{
        /// A type for marking geometrical types as logical.
        Logical
    }
}

pub use marker::{GeometryKind, Logical, Scalar};

/// A rectangle in logical decoration coordinates.
pub type Rect = Rectangle<i32, Logical>;
/// A rectangle in logical painter coordinates.
pub type RectF = Rectangle<f32, Logical>;
/// A point in logical painter coordinates.
pub type PointF = Point<f32, Logical>;
/// Border widths in logical decoration coordinates.
pub type Insets = Margins<i32, Logical>;

/// A type for representing a point on the decoration.
///
/// # Note
///
/// The (0, 0) reference is taken from the top left
/// corner of the decoration.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<N: Scalar, Kind: GeometryKind> {
    /// The `Point`'s X-coordinate.
    pub x: N,
    /// The `Point`'s Y-coordinate.
    pub y: N,
    _kind: PhantomData<Kind>,
}

impl<N: Scalar, Kind: GeometryKind> Point<N, Kind> {
    /// Creates a new Point.
    pub const fn new(x: N, y: N) -> Self {
        Self { x, y, _kind: PhantomData }
    }

    /// Creates a new Point at the origin.
    pub fn zeroed() -> Self {
        Self::new(N::ZERO, N::ZERO)
    }

    /// Converts the Point to another scalar type.
    ///
    /// Conversions into integers truncate.
    pub fn cast<M: Scalar>(self) -> Point<M, Kind> {
        Point::new(M::from_f64(self.x.to_f64()), M::from_f64(self.y.to_f64()))
    }
}

impl<N: Scalar, Kind: GeometryKind> Add for Point<N, Kind> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<N: Scalar, Kind: GeometryKind> Sub for Point<N, Kind> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<N: Scalar, Kind: GeometryKind> From<(N, N)> for Point<N, Kind> {
    fn from((x, y): (N, N)) -> Self {
        Self::new(x, y)
    }
}

/// A type for representing a 2D size.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size<N: Scalar, Kind: GeometryKind> {
    /// The width.
    pub width: N,
    /// The height.
    pub height: N,
    _kind: PhantomData<Kind>,
}

impl<N: Scalar, Kind: GeometryKind> Size<N, Kind> {
    /// Creates a new Size.
    pub const fn new(width: N, height: N) -> Self {
        Self { width, height, _kind: PhantomData }
    }

    /// Creates a new Size with both dimensions set to zero.
    pub fn zeroed() -> Self {
        Self::new(N::ZERO, N::ZERO)
    }

    /// Checks whether either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        !(self.width > N::ZERO && self.height > N::ZERO)
    }

    /// Returns the component-wise maximum of `self` and `other`.
    #[must_use]
    pub fn expanded_to(&self, other: Self) -> Self {
        Self::new(self.width.max_of(other.width), self.height.max_of(other.height))
    }

    /// Converts the Size to another scalar type.
    pub fn cast<M: Scalar>(self) -> Size<M, Kind> {
        Size::new(M::from_f64(self.width.to_f64()), M::from_f64(self.height.to_f64()))
    }
}

impl<N: Scalar, Kind: GeometryKind> Add for Size<N, Kind> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.width + other.width, self.height + other.height)
    }
}

impl<N: Scalar, Kind: GeometryKind> From<(N, N)> for Size<N, Kind> {
    fn from((width, height): (N, N)) -> Self {
        Self::new(width, height)
    }
}

/// Distances from each side of a [`Rectangle`], used for borders and shadow padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Margins<N: Scalar, Kind: GeometryKind> {
    /// Distance from the left edge.
    pub left: N,
    /// Distance from the top edge.
    pub top: N,
    /// Distance from the right edge.
    pub right: N,
    /// Distance from the bottom edge.
    pub bottom: N,
    _kind: PhantomData<Kind>,
}

impl<N: Scalar, Kind: GeometryKind> Margins<N, Kind> {
    /// Creates new Margins.
    pub const fn new(left: N, top: N, right: N, bottom: N) -> Self {
        Self { left, top, right, bottom, _kind: PhantomData }
    }

    /// Margins of zero on all sides.
    pub fn zeroed() -> Self {
        Self::new(N::ZERO, N::ZERO, N::ZERO, N::ZERO)
    }

    /// Checks that no side is negative.
    pub fn is_non_negative(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| *v >= N::ZERO)
    }

    /// Checks that every side is strictly positive.
    pub fn is_positive(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| *v > N::ZERO)
    }

    /// The sum of the left and right margins.
    pub fn horizontal(&self) -> N {
        self.left + self.right
    }

    /// The sum of the top and bottom margins.
    pub fn vertical(&self) -> N {
        self.top + self.bottom
    }
}

/// A type for representing a 2D rectangular space, anchored to a
/// Point on the coordinate space.
///
/// Rectangles take their gravity from the top-left corner: the right and
/// bottom edges returned by [`right`](Rectangle::right) and
/// [`bottom`](Rectangle::bottom) are exclusive.
///
/// _Note:_ The Default impl returns Rectangle {0, 0, 0, 0}.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle<N: Scalar, Kind: GeometryKind> {
    /// The point that the Rectangle is anchored to.
    pub point: Point<N, Kind>,
    /// The size of the Rectangle.
    pub size: Size<N, Kind>,
}

impl<N: Scalar, Kind: GeometryKind> Default for Rectangle<N, Kind> {
    fn default() -> Self {
        Rectangle::zeroed()
    }
}

impl<N: Scalar, Kind: GeometryKind> Rectangle<N, Kind> {
    /// Constructs a new `Rectangle`.
    pub fn new(x: N, y: N, width: N, height: N) -> Self {
        Rectangle {
            point: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Creates a new Rectangle of the given `size`, anchored at the origin (0, 0)
    pub fn from_size(size: Size<N, Kind>) -> Self {
        Rectangle {
            point: Point::zeroed(),
            size,
        }
    }

    /// Convenience function for constructing a `Rectangle` with all fields
    /// set to zero.
    pub fn zeroed() -> Self {
        Rectangle::new(N::ZERO, N::ZERO, N::ZERO, N::ZERO)
    }

    /// The x-coordinate of the left edge.
    pub fn x(&self) -> N {
        self.point.x
    }

    /// The y-coordinate of the top edge.
    pub fn y(&self) -> N {
        self.point.y
    }

    /// The width of the Rectangle.
    pub fn width(&self) -> N {
        self.size.width
    }

    /// The height of the Rectangle.
    pub fn height(&self) -> N {
        self.size.height
    }

    /// The x-coordinate one past the right edge.
    pub fn right(&self) -> N {
        self.point.x + self.size.width
    }

    /// The y-coordinate one past the bottom edge.
    pub fn bottom(&self) -> N {
        self.point.y + self.size.height
    }

    /// Checks whether the Rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check whether this Rectangle contains a certain point.
    pub fn contains_point(&self, pt: Point<N, Kind>) -> bool {
        let wrange = self.point.x..self.right();
        let hrange = self.point.y..self.bottom();

        wrange.contains(&pt.x) && hrange.contains(&pt.y)
    }

    /// Check whether this Rectangle shares a region of positive area with `other`.
    ///
    /// Rectangles that merely touch along an edge, or that are empty,
    /// do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false
        }

        self.point.x < other.right()
            && other.point.x < self.right()
            && self.point.y < other.bottom()
            && other.point.y < self.bottom()
    }

    /// Returns the smallest Rectangle containing both `self` and `other`.
    ///
    /// Empty rectangles do not contribute.
    #[must_use]
    pub fn united(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self
        }
        if self.is_empty() {
            return *other
        }
        let x = if other.point.x < self.point.x { other.point.x } else { self.point.x };
        let y = if other.point.y < self.point.y { other.point.y } else { self.point.y };
        let right = self.right().max_of(other.right());
        let bottom = self.bottom().max_of(other.bottom());

        Rectangle::new(x, y, right - x, bottom - y)
    }

    /// Moves each edge by the given deltas, like `QRect::adjusted`.
    #[must_use]
    pub fn adjusted(&self, dx1: N, dy1: N, dx2: N, dy2: N) -> Self {
        Rectangle::new(
            self.point.x + dx1,
            self.point.y + dy1,
            self.size.width - dx1 + dx2,
            self.size.height - dy1 + dy2,
        )
    }

    /// Creates a new `Rectangle` moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: N, dy: N) -> Self {
        Rectangle::new(self.point.x + dx, self.point.y + dy, self.size.width, self.size.height)
    }

    /// Shrinks the Rectangle by the given margins on each side.
    #[must_use]
    pub fn shrunk_by(&self, m: Margins<N, Kind>) -> Self {
        Rectangle::new(
            self.point.x + m.left,
            self.point.y + m.top,
            self.size.width - m.left - m.right,
            self.size.height - m.top - m.bottom,
        )
    }

    /// Clamps negative extents to zero, leaving the anchor untouched.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Rectangle::new(
            self.point.x,
            self.point.y,
            self.size.width.max_of(N::ZERO),
            self.size.height.max_of(N::ZERO),
        )
    }

    /// Converts the Rectangle to another scalar type.
    pub fn cast<M: Scalar>(self) -> Rectangle<M, Kind> {
        Rectangle {
            point: self.point.cast(),
            size: self.size.cast(),
        }
    }
}

impl Rectangle<i32, Logical> {
    /// The center point, rounded towards the top left.
    pub fn center(&self) -> Point<i32, Logical> {
        Point::new(
            self.point.x + (self.size.width - 1) / 2,
            self.point.y + (self.size.height - 1) / 2,
        )
    }

    /// Converts to an `f32` rectangle for painting.
    pub fn to_f32(&self) -> RectF {
        self.cast()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::new(0, 0, 10, 10);
        let touching = Rect::new(10, 0, 10, 10);
        let overlapping = Rect::new(9, 9, 10, 10);
        let empty = Rect::new(2, 2, 0, 5);

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(!a.intersects(&empty));
    }

    #[test]
    fn test_adjusted_and_shrunk() {
        let r = Rect::new(0, 0, 100, 40);

        assert_eq!(r.adjusted(1, 1, -1, 0), Rect::new(1, 1, 98, 39));
        assert_eq!(r.shrunk_by(Insets::new(2, 3, 4, 5)), Rect::new(2, 3, 94, 32));
    }

    #[test]
    fn test_united_ignores_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 5, 5, 10);

        assert_eq!(a.united(&b), Rect::new(0, 0, 25, 15));
        assert_eq!(a.united(&Rect::zeroed()), a);
    }

    #[test]
    fn test_clamped_and_center() {
        let r = Rect::new(5, 5, -3, 4).clamped();
        assert_eq!(r, Rect::new(5, 5, 0, 4));

        assert_eq!(Rect::new(0, 0, 273, 273).center(), Point::new(136, 136));
    }
}
