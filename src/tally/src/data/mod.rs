//! Data that is tallied when looking for the best date

pub mod date;
pub mod selection;
pub mod user;

pub use date::*;
pub use selection::*;
pub use user::*;

/// Create a [`DateId`](date::DateId) literal.
///
/// Expects `m/d/y` format.
#[macro_export]
macro_rules! date {
    ($mo:literal/$d:literal/$yr:literal) => {
        $crate::data::date::DateId::from_ymd($yr, $mo, $d)
            .unwrap_or_else(|| panic!("`{}/{}/{}` is not a valid date", $mo, $d, $yr))
    };
}

/// Create a [`Directory`](user::Directory) for testing.
///
/// Each entry is replayed through [`Directory::record`](user::Directory::record)
/// in the order written, so repeating an entry toggles it back off.
#[macro_export]
macro_rules! directory {
    ($(
        $name:literal => $kind:ident $mo:literal/$d:literal/$yr:literal
    ),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut directory = $crate::data::user::Directory::new();
        $(
            directory.record(
                $crate::data::user::UserName::new($name)
                    .unwrap_or_else(|e| panic!("`{}` is not a valid user name: {e}", $name)),
                $crate::date!($mo/$d/$yr),
                stringify!($kind)
                    .parse::<$crate::data::selection::SelectionType>()
                    .unwrap_or_else(|e| panic!("`{}` is not a selection type: {e}", stringify!($kind))),
            );
        )*
        directory
    }};
}
