//! Helper macro for generating domain port error enums.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $ctor:ident, $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@ctor $ctor:ident $variant:ident) => {
        #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
        pub fn $ctor() -> Self {
            Self::$variant
        }
    };

    (@ctor $ctor:ident $variant:ident { $($field:ident : $ty:ty),* }) => {
        #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
        pub fn $ctor($($field: impl Into<$ty>),*) -> Self {
            Self::$variant { $($field: $field.into()),* }
        }
    };
}

pub(crate) use define_port_error;
