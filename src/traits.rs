// SPDX-License-Identifier: MIT

/// A `Parseable` type can be used to deserialize data from the type `T` for
/// which it is implemented.
pub trait Parseable<T>
where
    Self: Sized,
    T: ?Sized,
{
    type Error;

    /// Deserialize the current type.
    fn parse(buf: &T) -> Result<Self, Self::Error>;
}

/// A `Parseable` type can be used to deserialize data from the type `T` for
/// which it is implemented, given extra parameters `P`.
pub trait ParseableParametrized<T, P>
where
    Self: Sized,
    T: ?Sized,
{
    type Error;

    /// Deserialize the current type.
    fn parse_with_param(buf: &T, params: P) -> Result<Self, Self::Error>;
}
