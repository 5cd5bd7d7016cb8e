//! `define_port_error!` generates a `thiserror` enum per driven port together
//! with snake_case constructors that accept anything convertible into the
//! field types.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
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
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StoreError {
            Rejected => "store rejected the request",
            Query { message: String } => "query failed: {message}",
            Status { status: u16 } => "unexpected status {status}",
            Upstream { message: String, status: u16 } => "upstream {status}: {message}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::rejected(), StoreError::Rejected);
        assert_eq!(StoreError::rejected().to_string(), "store rejected the request");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StoreError::query("relation does not exist");
        assert_eq!(err.to_string(), "query failed: relation does not exist");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        assert_eq!(StoreError::status(503_u16).to_string(), "unexpected status 503");
        assert_eq!(
            StoreError::upstream("bad gateway", 502_u16).to_string(),
            "upstream 502: bad gateway"
        );
    }
}
