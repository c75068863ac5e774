// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error taxonomy shared by the marshaller and the unmarshaller.
//!
//! Every failure raised while walking a nested value propagates unchanged to the
//! top-level call, so callers receive either a fully reconstructed graph or exactly
//! one [`enum@Error`] describing the first unrecoverable problem.

use std::borrow::Cow;

use thiserror::Error;

/// Set `GRAPH_MARSHAL_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("GRAPH_MARSHAL_PANIC_ON_ERROR").is_some();

#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for marshalling and unmarshalling operations.
///
/// # Always use the static constructors
///
/// Construct errors with [`Error::class_resolution`], [`Error::field_assignment`] and
/// friends rather than the enum variants. The constructors accept anything convertible
/// into `Cow<'static, str>` and honor `GRAPH_MARSHAL_PANIC_ON_ERROR`.
///
/// ```rust
/// use graph_marshal_core::error::Error;
///
/// let err = Error::class_resolution("no type named `app.Missing`");
/// let err = Error::field_assignment(format!("value {} does not fit in u8", 300));
/// ```
///
/// ## Debug mode
///
/// ```bash
/// RUST_BACKTRACE=1 GRAPH_MARSHAL_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A class name could not be resolved, even after the migration lookup.
    ///
    /// Do not construct this variant directly; use [`Error::class_resolution`] instead.
    #[error("{0}")]
    ClassResolution(Cow<'static, str>),

    /// The resolved type refused to produce an instance.
    ///
    /// Do not construct this variant directly; use [`Error::allocation`] instead.
    #[error("{0}")]
    Allocation(Cow<'static, str>),

    /// A value cannot be stored into a resolved field because its shape does not match.
    ///
    /// Do not construct this variant directly; use [`Error::field_assignment`] instead.
    #[error("{0}")]
    FieldAssignment(Cow<'static, str>),

    /// The marshaller met a value it cannot decompose.
    ///
    /// Do not construct this variant directly; use [`Error::unsupported_shape`] instead.
    #[error("{0}")]
    UnsupportedShape(Cow<'static, str>),

    /// An enumeration constant name is unknown to the current enum definition.
    ///
    /// Do not construct this variant directly; use [`Error::unknown_constant`] instead.
    #[error("{0}")]
    UnknownConstant(Cow<'static, str>),

    /// A node is structurally malformed (missing reserved entries, dangling references).
    ///
    /// Do not construct this variant directly; use [`Error::invalid_node`] instead.
    #[error("{0}")]
    InvalidNode(Cow<'static, str>),

    /// The graph is nested deeper than the configured maximum.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// A type registration conflicts with an existing one.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_registration`] instead.
    #[error("{0}")]
    InvalidRegistration(Cow<'static, str>),

    /// Generic error.
    ///
    /// Do not construct this variant directly; use [`Error::unknown`] instead.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

macro_rules! error_constructor {
    ($(#[$doc:meta])* $fn_name:ident => $variant:ident) => {
        $(#[$doc])*
        #[inline(always)]
        #[cold]
        #[track_caller]
        pub fn $fn_name<S: Into<Cow<'static, str>>>(s: S) -> Self {
            let err = Error::$variant(s.into());
            if PANIC_ON_ERROR {
                panic!("GRAPH_MARSHAL_PANIC_ON_ERROR: {}", err);
            }
            err
        }
    };
}

impl Error {
    error_constructor!(
        /// Creates a new [`Error::ClassResolution`].
        class_resolution => ClassResolution
    );
    error_constructor!(
        /// Creates a new [`Error::Allocation`].
        allocation => Allocation
    );
    error_constructor!(
        /// Creates a new [`Error::FieldAssignment`].
        ///
        /// ```
        /// use graph_marshal_core::error::Error;
        ///
        /// let err = Error::field_assignment("expected a node, found a scalar");
        /// ```
        field_assignment => FieldAssignment
    );
    error_constructor!(
        /// Creates a new [`Error::UnsupportedShape`].
        unsupported_shape => UnsupportedShape
    );
    error_constructor!(
        /// Creates a new [`Error::UnknownConstant`].
        unknown_constant => UnknownConstant
    );
    error_constructor!(
        /// Creates a new [`Error::InvalidNode`].
        invalid_node => InvalidNode
    );
    error_constructor!(
        /// Creates a new [`Error::DepthExceed`].
        depth_exceed => DepthExceed
    );
    error_constructor!(
        /// Creates a new [`Error::InvalidRegistration`].
        invalid_registration => InvalidRegistration
    );
    error_constructor!(
        /// Creates a new [`Error::Unknown`].
        unknown => Unknown
    );

    /// Prefixes the message with the class and field the error was raised for.
    ///
    /// The variant is kept, so callers can still match on the error kind.
    ///
    /// ```
    /// use graph_marshal_core::error::Error;
    ///
    /// let err = Error::field_assignment("expected bool").in_field("app.Flags", "enabled");
    /// assert!(matches!(err, Error::FieldAssignment(_)));
    /// assert_eq!(err.to_string(), "app.Flags.enabled: expected bool");
    /// ```
    #[inline(never)]
    pub fn in_field(self, class_name: &str, field: &str) -> Error {
        let prefix = |msg: Cow<'static, str>| -> Cow<'static, str> {
            Cow::Owned(format!("{}.{}: {}", class_name, field, msg))
        };
        match self {
            Error::ClassResolution(s) => Error::ClassResolution(prefix(s)),
            Error::Allocation(s) => Error::Allocation(prefix(s)),
            Error::FieldAssignment(s) => Error::FieldAssignment(prefix(s)),
            Error::UnsupportedShape(s) => Error::UnsupportedShape(prefix(s)),
            Error::UnknownConstant(s) => Error::UnknownConstant(prefix(s)),
            Error::InvalidNode(s) => Error::InvalidNode(prefix(s)),
            // depth errors carry no per-level prefix
            Error::DepthExceed(s) => Error::DepthExceed(s),
            Error::InvalidRegistration(s) => Error::InvalidRegistration(prefix(s)),
            Error::Unknown(s) => Error::Unknown(prefix(s)),
        }
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// ```
/// use graph_marshal_core::ensure;
/// use graph_marshal_core::error::Error;
///
/// fn check_len(n: usize) -> Result<(), Error> {
///     ensure!(n > 0, "length must be positive");
///     ensure!(n < 10, Error::field_assignment(format!("length {} too large", n)));
///     Ok(())
/// }
/// assert!(check_len(3).is_ok());
/// assert!(check_len(30).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::unknown($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`Error::Unknown`].
///
/// ```
/// use graph_marshal_core::bail;
/// use graph_marshal_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("something went wrong");
/// }
/// assert!(fail_fast().is_err());
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::unknown($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)))
    };
}
