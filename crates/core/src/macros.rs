// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for reducing boilerplate.
//!
//! - [`simple_display!`] - `Display` impl mapping enum variants to string literals
//! - [`setters!`] - chained setter methods for value-type configuration structs

/// Generate a `Display` impl that maps enum variants to string literals.
///
/// Unit variants match directly; data-carrying variants use `(..)` to ignore fields.
///
/// ```ignore
/// crate::simple_display! {
///     MyEnum {
///         Foo => "foo",
///         Bar(..) => "bar",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($ignore:tt)* ))? => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant $(( $($ignore)* ))? => $str, )+
                })
            }
        }
    };
}

/// Generate chained setter methods inside an existing `impl` block.
///
/// Each setter consumes the value and returns the modified copy, so a
/// cloned template is never changed by a caller further down the chain.
///
/// Field groups:
/// - `into { field: Type }` - setter takes `impl Into<Type>`
/// - `set { field: Type }` - setter takes `Type` directly
/// - `option { field: Type }` - field is `Option<Type>`, setter wraps in `Some(v.into())`
///
/// ```ignore
/// impl CommandSpec {
///     cmder_core::setters! {
///         into { program: String }
///         set { retries: u32 }
///         option { cwd: PathBuf }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(into {
            $( $(#[$into_meta:meta])* $into_field:ident : $into_ty:ty ),* $(,)?
        })?
        $(set {
            $( $(#[$set_meta:meta])* $set_field:ident : $set_ty:ty ),* $(,)?
        })?
        $(option {
            $( $(#[$opt_meta:meta])* $opt_field:ident : $opt_ty:ty ),* $(,)?
        })?
    ) => {
        $($(
            $(#[$into_meta])*
            #[must_use]
            pub fn $into_field(mut self, v: impl Into<$into_ty>) -> Self {
                self.$into_field = v.into();
                self
            }
        )*)?

        $($(
            $(#[$set_meta])*
            #[must_use]
            pub fn $set_field(mut self, v: $set_ty) -> Self {
                self.$set_field = v;
                self
            }
        )*)?

        $($(
            $(#[$opt_meta])*
            #[must_use]
            pub fn $opt_field(mut self, v: impl Into<$opt_ty>) -> Self {
                self.$opt_field = Some(v.into());
                self
            }
        )*)?
    };
}
