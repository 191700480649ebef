// SPDX-License-Identifier: MIT

// Getters index into the buffer with constant ranges and are only
// reachable on buffers validated by `new_checked`, so the fixed-width
// parsers they call cannot fail.

#[macro_export]
macro_rules! getter {
    ($buffer: ident, $name:ident, slice, $offset:expr) => {
        impl<'a, T: AsRef<[u8]> + ?Sized> $buffer<&'a T> {
            pub fn $name(&self) -> &'a [u8] {
                &self.buffer.as_ref()[$offset]
            }
        }
    };
    ($buffer: ident, $name:ident, $ty:tt, $offset:expr) => {
        impl<T: AsRef<[u8]>> $buffer<T> {
            $crate::getter!($name, $ty, $offset);
        }
    };
    ($name:ident, u8, $offset:expr) => {
        pub fn $name(&self) -> u8 {
            self.buffer.as_ref()[$offset]
        }
    };
    ($name:ident, u16, $offset:expr) => {
        pub fn $name(&self) -> u16 {
            $crate::parse_u16(&self.buffer.as_ref()[$offset]).unwrap()
        }
    };
    ($name:ident, u32, $offset:expr) => {
        pub fn $name(&self) -> u32 {
            $crate::parse_u32(&self.buffer.as_ref()[$offset]).unwrap()
        }
    };
    ($name:ident, i32, $offset:expr) => {
        pub fn $name(&self) -> i32 {
            $crate::parse_i32(&self.buffer.as_ref()[$offset]).unwrap()
        }
    };
}

#[macro_export]
macro_rules! buffer {
    ($name:ident($buffer_len:expr) { $($field:ident : ($ty:tt, $offset:expr)),* $(,)? }) => {
        $crate::buffer!($name { $($field: ($ty, $offset),)* });
        $crate::buffer_check_length!($name($buffer_len));
    };

    ($name:ident { $($field:ident : ($ty:tt, $offset:expr)),* $(,)? }) => {
        $crate::buffer_common!($name);
        $crate::fields!($name {
            $($field: ($ty, $offset),)*
        });
    };
}

#[macro_export]
macro_rules! fields {
    ($buffer:ident { $($name:ident : ($ty:tt, $offset:expr)),* $(,)? }) => {
        $(
            $crate::getter!($buffer, $name, $ty, $offset);
        )*
    }
}

#[macro_export]
macro_rules! buffer_check_length {
    ($name:ident($buffer_len:expr)) => {
        impl<T: AsRef<[u8]>> $name<T> {
            pub fn new_checked(buffer: T) -> Result<Self, $crate::DecodeError> {
                let packet = Self::new(buffer);
                packet.check_buffer_length()?;
                Ok(packet)
            }

            fn check_buffer_length(&self) -> Result<(), $crate::DecodeError> {
                let len = self.buffer.as_ref().len();
                if len < $buffer_len {
                    Err($crate::DecodeError::truncated_header(
                        stringify!($name),
                        len,
                        $buffer_len,
                    ))
                } else {
                    Ok(())
                }
            }
        }
    };
}

#[macro_export]
macro_rules! buffer_common {
    ($name:ident) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy)]
        pub struct $name<T> {
            buffer: T,
        }

        impl<T: AsRef<[u8]>> $name<T> {
            pub fn new(buffer: T) -> Self {
                Self { buffer }
            }

            pub fn into_inner(self) -> T {
                self.buffer
            }
        }

        impl<'a, T: AsRef<[u8]> + ?Sized> $name<&'a T> {
            pub fn inner(&self) -> &'a [u8] {
                &self.buffer.as_ref()[..]
            }
        }
    };
}
