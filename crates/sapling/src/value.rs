//! Best-effort rendering of terminal values
//!
//! A value is rendered through its [`Display`](fmt::Display) impl when its
//! type has one, and as [`UNPRINTABLE_VALUE`] otherwise. The choice is made at
//! compile time, once per concrete leaf type, by method resolution on a
//! zero-sized [`Probe`]: the `Display` impl sits one autoref step ahead of the
//! fallback, so it wins whenever its bound holds.
//!
//! ```
//! use sapling::render_value;
//!
//! struct Opaque;
//!
//! assert_eq!(render_value!(42u32), "42");
//! assert_eq!(render_value!(Opaque), "<<unprintable-value>>");
//! ```

use std::fmt;
use std::marker::PhantomData;

/// Sentinel emitted for values whose type has no textual rendering.
pub const UNPRINTABLE_VALUE: &str = "<<unprintable-value>>";

/// A function that writes a value of type `T`.
pub type ValueRenderer<T> = fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result;

/// Render through the value's `Display` impl.
pub fn display_value<T: fmt::Display>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(value, f)
}

/// Render the sentinel, whatever the value.
pub fn unprintable_value<T>(_value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(UNPRINTABLE_VALUE)
}

/// A value paired with the renderer chosen for its type.
pub struct ValueDisplay<'a, T> {
    value: &'a T,
    render: ValueRenderer<T>,
}

impl<'a, T> ValueDisplay<'a, T> {
    /// Pair a value with a renderer.
    pub fn new(value: &'a T, render: ValueRenderer<T>) -> Self {
        Self { value, render }
    }
}

impl<T> fmt::Display for ValueDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.render)(self.value, f)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Compile-time capability probe
// ═══════════════════════════════════════════════════════════════════════

/// Zero-sized stand-in for a value type, used to pick its renderer.
#[doc(hidden)]
pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    /// Build a probe for the type of `value`.
    pub fn of(_value: &T) -> Self {
        Probe(PhantomData)
    }
}

/// Preferred tier: the type implements `Display`.
#[doc(hidden)]
pub trait ViaDisplay<T> {
    fn renderer(&self) -> ValueRenderer<T>;
}

impl<T: fmt::Display> ViaDisplay<T> for Probe<T> {
    fn renderer(&self) -> ValueRenderer<T> {
        display_value::<T>
    }
}

/// Fallback tier: reached only through an extra autoref.
#[doc(hidden)]
pub trait ViaFallback<T> {
    fn renderer(&self) -> ValueRenderer<T>;
}

impl<T> ViaFallback<T> for &Probe<T> {
    fn renderer(&self) -> ValueRenderer<T> {
        unprintable_value::<T>
    }
}

/// Pick the [`ValueRenderer`] for the type of a value.
///
/// The value's type must be concrete at the call site.
#[macro_export]
macro_rules! value_renderer {
    ($value:expr) => {{
        #[allow(unused_imports)]
        use $crate::value::{ViaDisplay as _, ViaFallback as _};
        (&$crate::value::Probe::of(&$value)).renderer()
    }};
}

/// Render a value to a `String`, or to the sentinel if its type has no
/// `Display` impl.
#[macro_export]
macro_rules! render_value {
    ($value:expr) => {
        match &$value {
            value => {
                let render = $crate::value_renderer!(*value);
                $crate::value::ValueDisplay::new(value, render).to_string()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Opaque {
        _secret: u32,
    }

    #[derive(Debug)]
    struct DebugOnly;

    struct Shown;

    impl fmt::Display for Shown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("shown!")
        }
    }

    #[test]
    fn test_display_types_render_verbatim() {
        assert_eq!(render_value!(5i32), "5");
        assert_eq!(render_value!(-3i8), "-3");
        assert_eq!(render_value!(2.5f64), "2.5");
        assert_eq!(render_value!(true), "true");
        assert_eq!(render_value!('x'), "x");
        assert_eq!(render_value!(String::from("hi")), "hi");
        assert_eq!(render_value!(Shown), "shown!");
    }

    #[test]
    fn test_types_without_display_render_sentinel() {
        assert_eq!(render_value!(Opaque { _secret: 7 }), UNPRINTABLE_VALUE);
        assert_eq!(render_value!(DebugOnly), UNPRINTABLE_VALUE);
        assert_eq!(render_value!(vec![1u8, 2, 3]), UNPRINTABLE_VALUE);
    }

    #[test]
    fn test_renderer_selection() {
        let n = 12u16;
        let render = value_renderer!(n);
        assert_eq!(ValueDisplay::new(&n, render).to_string(), "12");

        let opaque = Opaque { _secret: 1 };
        let render = value_renderer!(opaque);
        assert_eq!(
            ValueDisplay::new(&opaque, render).to_string(),
            UNPRINTABLE_VALUE
        );
    }

    #[test]
    fn test_explicit_renderers() {
        assert_eq!(ValueDisplay::new(&9, display_value::<i32>).to_string(), "9");
        assert_eq!(
            ValueDisplay::new(&9, unprintable_value::<i32>).to_string(),
            UNPRINTABLE_VALUE
        );
    }
}
