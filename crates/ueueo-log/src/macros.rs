//! Formatting shorthands over [`crate::facade`].
//!
//! With a single argument the message is logged verbatim, so `%` and braces
//! in it are never interpreted. With more arguments the first one is a
//! `format!` template.

#[macro_export]
macro_rules! v {
    ($msg:expr $(,)?) => {
        $crate::facade::v($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::facade::v(::std::format!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! d {
    ($msg:expr $(,)?) => {
        $crate::facade::d($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::facade::d(::std::format!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! i {
    ($msg:expr $(,)?) => {
        $crate::facade::i($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::facade::i(::std::format!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! w {
    ($msg:expr $(,)?) => {
        $crate::facade::w($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::facade::w(::std::format!($fmt, $($arg)+))
    };
}

/// Log at ERROR. Prefix with `err: <error>,` to attach an error and its
/// source chain.
#[macro_export]
macro_rules! e {
    (err: $err:expr $(,)?) => {
        $crate::facade::error_with(
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::None,
        )
    };
    (err: $err:expr, $msg:expr $(,)?) => {
        $crate::facade::error_with(
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::Some(::std::convert::AsRef::<str>::as_ref(&$msg)),
        )
    };
    (err: $err:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::facade::error_with(
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::Some(&::std::format!($fmt, $($arg)+)),
        )
    };
    ($msg:expr $(,)?) => {
        $crate::facade::e($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::facade::e(::std::format!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! wtf {
    ($msg:expr $(,)?) => {
        $crate::facade::wtf($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::facade::wtf(::std::format!($fmt, $($arg)+))
    };
}

/// Queue a block for the next record; returns the shared printer.
#[macro_export]
macro_rules! append {
    ($msg:expr $(,)?) => {
        $crate::facade::append($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::facade::append(::std::format!($fmt, $($arg)+))
    };
}
